//! Errors raised back into Lua when an argument fails validation.

use thiserror::Error;

/// Result type used by every accessor in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error destined for the interpreter.
///
/// Host functions propagate these with `?`; when the error reaches the
/// `mlua` callback boundary it is raised as a Lua error whose message is the
/// rendered text below.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A plain error message, raised as-is.
    #[error("{0}")]
    Runtime(String),

    /// A positional argument (or a field of one) failed validation.
    #[error("bad argument #{position}{callee} ({message})", callee = callee(.function))]
    BadArgument {
        position: i32,
        function: Option<String>,
        message: String,
    },

    /// The receiver of a method call failed validation.
    #[error("calling '{function}' on bad self ({message})")]
    BadSelf { function: String, message: String },

    /// An error coming from the interpreter itself.
    #[error(transparent)]
    Lua(#[from] mlua::Error),
}

fn callee(function: &Option<String>) -> String {
    match function {
        Some(name) => format!(" to '{}'", name),
        None => String::new(),
    }
}

impl Error {
    /// The message without the argument prefix.
    pub fn message(&self) -> String {
        match self {
            Error::Runtime(message)
            | Error::BadArgument { message, .. }
            | Error::BadSelf { message, .. } => message.clone(),
            Error::Lua(err) => err.to_string(),
        }
    }
}

impl From<Error> for mlua::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Lua(err) => err,
            other => mlua::Error::external(other),
        }
    }
}
