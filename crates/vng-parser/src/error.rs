use thiserror::Error;

/// A report that could not be parsed at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse '{source_name}': {reason}")]
pub struct ParsingError {
    pub source_name: String,
    pub reason: ParseFailure,
}

impl ParsingError {
    pub fn new(source_name: impl Into<String>, reason: ParseFailure) -> Self {
        Self {
            source_name: source_name.into(),
            reason,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("input is empty")]
    EmptyInput,

    #[error("no category headers found")]
    NoCategories,
}

impl ParseFailure {
    /// Stable reason code for callers that map failures to messages.
    pub fn code(&self) -> &'static str {
        match self {
            ParseFailure::EmptyInput => "empty_input",
            ParseFailure::NoCategories => "no_categories",
        }
    }
}
