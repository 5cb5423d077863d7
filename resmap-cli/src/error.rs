//! CLI error handling with user-friendly messages.

use std::fmt;
use std::process;

use resmap::config::ConfigFileError;
use resmap::navigation::NavigationError;
use resmap::session::SessionError;
use resmap::source::SourceError;

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to create the HTTP client
    Http(SourceError),
    /// Navigation request rejected
    Navigation(NavigationError),
    /// Session operation failed
    Session(SessionError),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
}

impl CliError {
    /// Exit the process with an error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::Config(_) = self {
            eprintln!();
            eprintln!("Create a config file with: resmap config init");
            eprintln!("then set [plan] district and block.");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Http(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Navigation(e) => write!(f, "Navigation failed: {}", e),
            CliError::Session(e) => write!(f, "Session error: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to start runtime: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Http(e) => Some(e),
            CliError::Navigation(e) => Some(e),
            CliError::Session(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<NavigationError> for CliError {
    fn from(e: NavigationError) -> Self {
        CliError::Navigation(e)
    }
}

impl From<SessionError> for CliError {
    fn from(e: SessionError) -> Self {
        CliError::Session(e)
    }
}
