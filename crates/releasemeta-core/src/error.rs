use thiserror::Error;

/// Errors that can occur while building a parser.
///
/// Parsing itself never fails; malformed input degrades to title text.
#[derive(Debug, Error)]
pub enum ReleaseMetaError {
    /// A configured release group or customization word produced an invalid regex.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The alternation that failed to compile.
        pattern: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// The parser configuration could not be decoded.
    #[error("invalid parser configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

/// Result type alias for releasemeta operations.
pub type Result<T> = std::result::Result<T, ReleaseMetaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = ReleaseMetaError::InvalidPattern {
            pattern: "(unclosed".into(),
            source,
        };
        assert!(err.to_string().starts_with("invalid pattern \"(unclosed\""));

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ReleaseMetaError::from(json_err);
        assert!(err.to_string().starts_with("invalid parser configuration"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReleaseMetaError>();
    }
}
