use thiserror::Error;

/// Unified error type for tag-gate operations
///
/// A denied promotion is not an error; it is a [`crate::domain::Verdict`]
/// with `allowed == false`. Everything here aborts the decision.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("Tag format error: {0}")]
    Format(String),

    #[error("Data source fault: {0}")]
    DataSource(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in tag-gate
pub type Result<T> = std::result::Result<T, GateError>;

impl GateError {
    /// Create a format error naming the offending tag
    pub fn format(msg: impl Into<String>) -> Self {
        GateError::Format(msg.into())
    }

    /// Create a data source fault with context
    pub fn data_source(msg: impl Into<String>) -> Self {
        GateError::DataSource(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GateError::Config(msg.into())
    }

    /// Process exit code for this error.
    ///
    /// 0 and 1 are reserved for allowed and denied verdicts, 2 for clap usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            GateError::Format(_) => 3,
            GateError::DataSource(_) => 4,
            GateError::Config(_) | GateError::Toml(_) => 5,
            GateError::Io(_) => 6,
        }
    }
}

impl From<reqwest::Error> for GateError {
    fn from(err: reqwest::Error) -> Self {
        GateError::DataSource(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GateError::format("not-a-tag");
        assert_eq!(err.to_string(), "Tag format error: not-a-tag");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GateError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let err: GateError = toml_err.into();
        assert!(err.to_string().starts_with("Config file parse error"));
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (GateError::format("x"), "Tag format error"),
            (GateError::data_source("x"), "Data source fault"),
            (GateError::config("x"), "Configuration error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_exit_codes_are_distinct_from_verdicts() {
        let errors = vec![
            GateError::format("x"),
            GateError::data_source("x"),
            GateError::config("x"),
            GateError::Io(std::io::Error::new(std::io::ErrorKind::Other, "x")),
        ];

        for err in errors {
            let code = err.exit_code();
            assert!(code > 2, "{} mapped to reserved code {}", err, code);
        }
    }

    #[test]
    fn test_format_and_fault_exit_codes_differ() {
        assert_ne!(
            GateError::format("x").exit_code(),
            GateError::data_source("x").exit_code()
        );
    }
}
