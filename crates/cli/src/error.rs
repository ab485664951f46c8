//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: effect error (unknown effect, bad config, bad viewport)
//! - 11: I/O error (scene read, snapshot write)
//! - 12: input error (bad color, bad JSON params, missing effect name)
//! - 13: serialization error

use landing_fx_core::FxError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    Effect(FxError),
    Io(String),
    Input(String),
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Effect(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Effect(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<FxError> for CliError {
    fn from(e: FxError) -> Self {
        match e {
            FxError::Io(msg) => CliError::Io(msg),
            FxError::InvalidColor(msg) => CliError::Input(msg),
            other => CliError::Effect(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_error_exit_code_is_10() {
        let err = CliError::from(FxError::UnknownEffect("foo".into()));
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("foo"));
    }

    #[test]
    fn fx_io_routes_to_cli_io() {
        let err = CliError::from(FxError::Io("disk full".into()));
        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn std_io_error_routes_to_cli_io() {
        let err = CliError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn invalid_color_routes_to_input() {
        let err = CliError::from(FxError::InvalidColor("bad hex".into()));
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn serde_json_error_routes_to_serialization() {
        let bad = serde_json::from_str::<serde_json::Value>("{invalid");
        let err = CliError::from(bad.unwrap_err());
        assert_eq!(err.exit_code(), 13);
    }
}
