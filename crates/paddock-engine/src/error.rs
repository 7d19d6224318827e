//! Error types for the engine binary.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: paddock_core::ConfigError,
    },

    /// The session could not start.
    #[error("session error: {source}")]
    Session {
        /// The underlying dispatch error.
        #[from]
        source: paddock_core::DispatchError,
    },

    /// The session runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: paddock_core::RunnerError,
    },

    /// The asset manifest could not be loaded.
    #[error("asset manifest error: {message}")]
    Assets {
        /// Description of the failure.
        message: String,
    },

    /// Logging could not be initialised.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the failure.
        message: String,
    },
}

/// A line of input that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The verb is not known.
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),

    /// An argument is missing.
    #[error("`{command}` needs {expected}")]
    MissingArgument {
        /// The command being parsed.
        command: &'static str,
        /// What was expected.
        expected: &'static str,
    },

    /// An argument did not parse.
    #[error("`{value}` is not a valid {expected}")]
    InvalidArgument {
        /// The offending text.
        value: String,
        /// What was expected.
        expected: &'static str,
    },
}
