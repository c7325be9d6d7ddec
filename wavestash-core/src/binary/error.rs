use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("deserialization error")]
    Deserialize,
    #[error("unexpected end of stream")]
    UnexpectedEof,
}

impl ErrorKind {
    pub fn make(self, message: impl Into<String>) -> Error {
        Error {
            kind: self,
            context_stack: vec![message.into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    context_stack: Vec<String>,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        for (i, context) in self.context_stack.iter().rev().enumerate() {
            write!(f, "\n{i:5}: {context}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

pub trait ResultContextExt {
    fn context(self, text: &str) -> Self;
    fn with_context(self, text: impl FnOnce() -> String) -> Self;
}

impl<T> ResultContextExt for Result<T, Error> {
    fn context(self, text: &str) -> Self {
        self.with_context(|| text.to_string())
    }

    fn with_context(self, text: impl FnOnce() -> String) -> Self {
        self.map_err(|mut error| {
            error.context_stack.push(text());
            error
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, ResultContextExt};

    #[test]
    fn context_is_printed_outermost_first() {
        let result: Result<(), _> = Err(ErrorKind::UnexpectedEof.make("inner"));
        let error = result.context("outer").unwrap_err();
        assert_eq!(
            error.to_string(),
            "unexpected end of stream\n    0: outer\n    1: inner"
        );
    }
}
