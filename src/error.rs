use thiserror::Error;

/// Main error type for the Rusty HTML extension.
/// Aggregates errors from dependencies and internal modules.
#[derive(Error, Debug)]
pub(crate) enum RustyHtmlError {
    #[error("{0}")]
    WithContextError(String),

    // HTML module errors
    #[error("{0}")]
    HtmlError(#[from] crate::html::HtmlError),

    // Extension module errors
    #[error("{0}")]
    ExtensionError(#[from] crate::extension::ExtensionError),
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, RustyHtmlError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| RustyHtmlError::WithContextError(format!("{}: {}", message, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::HtmlError;

    #[test]
    fn test_with_prefix() {
        let result: Result<(), RustyHtmlError> = Err(HtmlError::NoTableFound.into());
        let error = result.with_prefix("page.html").unwrap_err();
        assert_eq!(error.to_string(), "page.html: No tables found");
    }
}
