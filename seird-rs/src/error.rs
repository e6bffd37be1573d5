use thiserror::Error;

/// Failures raised while assembling a simulation. All of them are
/// deterministic functions of the input configuration; nothing in this
/// crate fails mid-run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The requested integration scheme is not registered. Never silently
    /// substituted: a different tableau changes the numerical order of the
    /// result without any signal to the caller.
    #[error("unknown integration scheme '{0}'")]
    UnknownTableau(String),

    /// A Butcher tableau failed the row-length invariant.
    #[error("malformed tableau '{name}': {reason}")]
    MalformedTableau { name: String, reason: String },

    /// A model, population or simulation parameter is outside its valid
    /// range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;
