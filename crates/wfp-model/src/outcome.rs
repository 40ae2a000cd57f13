use serde::Serialize;

/// Result of validating one logical file or one sheet.
///
/// Data problems are reported here rather than through `Err`: a malformed
/// upload is an expected outcome, not an engine fault. The message is
/// always prefixed with the file identifier the caller supplied.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub message: String,
    pub warning: Option<String>,
}

impl ValidationOutcome {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            valid: true,
            message: message.into(),
            warning: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
            warning: None,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }
}
