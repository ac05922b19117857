//! User Interface Module
//!
//! Rendering only: every piece reads from `App` and never mutates persisted state.

pub mod colors;
pub mod components;
pub mod tracker;
