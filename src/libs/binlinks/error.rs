use thiserror::Error;

#[derive(Debug, Error)]
pub enum BinError {
    /// A missing or out-of-range option
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The named link file could not be opened
    #[error("could not open {path}: {source}")]
    InputNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A line that is not part of any recognized link form
    #[error("malformed record at line {line}: {reason}")]
    Malformed {
        /// The line number (1-based)
        line: usize,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BinError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        BinError::Config(msg.into())
    }

    pub fn malformed<S: Into<String>>(line: usize, reason: S) -> Self {
        BinError::Malformed {
            line,
            reason: reason.into(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, BinError::Malformed { .. })
    }
}
