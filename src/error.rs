// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Errors reported by the notice core.
///
/// Configuration errors (profile misuse, unknown event names) are raised at
/// the offending call site and never silently defaulted. Resource errors
/// terminate the lifecycle of the notice that raised them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A profile with this name does not exist.
    UnknownProfile(String),

    /// A profile with this name already exists and cannot be added again.
    DuplicateProfile(String),

    /// The built-in profiles cannot be removed or reset.
    ProtectedProfile(String),

    /// The event name is not one of the recognized lifecycle events.
    UnknownEvent(String),

    /// The symbol resource handed to the rendering collaborator was rejected.
    InvalidSymbol(String),

    /// Profile persistence failed to parse or serialize.
    Config(String),

    /// Profile persistence hit the filesystem.
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownProfile(name) => {
                write!(f, "A notice profile with the name <{}> does not exist", name)
            }
            Error::DuplicateProfile(name) => {
                write!(f, "A notice profile with the name <{}> already exists", name)
            }
            Error::ProtectedProfile(name) => {
                write!(f, "The built-in profile <{}> cannot be removed or reset", name)
            }
            Error::UnknownEvent(name) => write!(f, "Unknown lifecycle event <{}>", name),
            Error::InvalidSymbol(msg) => write!(f, "Invalid symbol resource: {}", msg),
            Error::Config(msg) => write!(f, "Config Error: {}", msg),
            Error::Io(msg) => write!(f, "I/O Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
