//! Event Handling Module
//!
//! - **`keys`**: keyboard input processing for the tracker screen

pub mod keys;
