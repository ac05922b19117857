use thiserror::Error;

/// Reasons a phone number lookup is rejected before any field is derived
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Please enter a phone number")]
    Empty,

    /// The input could not be parsed as a phone number at all; holds the
    /// parser's reason, which is logged rather than shown
    #[error("Invalid phone number format. Please try again.")]
    Format(String),

    /// The input parsed but fails the numbering plan's validity rules
    #[error("Invalid phone number! Please enter a valid number.")]
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Template name cannot be empty")]
    EmptyName,

    #[error("Category name cannot be empty")]
    EmptyCategory,

    #[error("No category named '{0}'")]
    UnknownCategory(String),

    #[error("No template named '{name}' in category '{category}'")]
    UnknownTemplate { category: String, name: String },

    #[error(transparent)]
    Lookup(#[from] LookupError),
}
