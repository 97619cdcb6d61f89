use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] assetq_core::ValidationError),

    #[error(transparent)]
    Universe(#[from] assetq_core::CoreError),

    #[error("command error: {0}")]
    Command(String),

    #[error("strict mode failed: warnings={warning_count}, errors={error_count}")]
    StrictModeViolation {
        warning_count: usize,
        error_count: usize,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("batch worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Universe(assetq_core::CoreError::Io { .. }) => 10,
            Self::Universe(_) => 2,
            Self::Command(_) => 2,
            Self::StrictModeViolation { .. } => 5,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
            Self::Join(_) => 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_exit_codes() {
        assert_eq!(CliError::Command(String::from("x")).exit_code(), 2);
        assert_eq!(
            CliError::StrictModeViolation {
                warning_count: 1,
                error_count: 0
            }
            .exit_code(),
            5
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let missing = assetq_core::CoreError::Io {
            path: String::from("u.json"),
            source: io,
        };
        assert_eq!(CliError::from(missing).exit_code(), 10);
    }
}
