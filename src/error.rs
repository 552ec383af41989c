use std::result;
use std::fmt::{self, Display};

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, PartialEq, Clone)]
#[non_exhaustive]
pub enum ErrorKind {
    UnexpectedCharacter { line: usize, character: char },
    UnterminatedString { line: usize },
}

#[derive(Debug, PartialEq, Clone)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn unexpected_character(line: usize, character: char) -> Error {
        let kind = ErrorKind::UnexpectedCharacter { line, character };
        Error { kind, message: "Unexpected character.".into() }
    }

    pub fn unterminated_string(line: usize) -> Error {
        let kind = ErrorKind::UnterminatedString { line };
        Error { kind, message: "Unterminated string.".into() }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn line(&self) -> usize {
        use ErrorKind::*;
        match self.kind() {
            UnexpectedCharacter { line, .. } | UnterminatedString { line } => *line,
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error: {}", self.line(), self.message)
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> std::io::Error {
        use std::io::ErrorKind::*;
        std::io::Error::new(Other, e)
    }
}

/// Receives lexical errors as a side channel while scanning continues.
///
/// Any `FnMut(Error)` closure is a reporter, so callers can log, count or
/// forward errors without a dedicated type.
pub trait Reporter {
    fn report(&mut self, error: Error);
}

impl<F: FnMut(Error)> Reporter for F {
    fn report(&mut self, error: Error) {
        self(error)
    }
}

/// A reporter that keeps every error it is handed, in order.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}

impl Reporter for Diagnostics {
    fn report(&mut self, error: Error) {
        tracing::debug!(line = error.line(), message = error.message(), "lexical error");
        self.errors.push(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_line_prefix() {
        let e = Error::unexpected_character(3, '$');
        assert_eq!("[line 3] Error: Unexpected character.", e.to_string());
    }

    #[test]
    fn unterminated_string_message() {
        let e = Error::unterminated_string(7);
        assert_eq!(7, e.line());
        assert_eq!("Unterminated string.", e.message());
        assert_eq!(&ErrorKind::UnterminatedString { line: 7 }, e.kind());
    }

    #[test]
    fn closures_are_reporters() {
        let mut lines = Vec::new();
        {
            let mut reporter = |e: Error| lines.push(e.line());
            reporter.report(Error::unterminated_string(2));
            reporter.report(Error::unexpected_character(5, '#'));
        }
        assert_eq!(vec![2, 5], lines);
    }

    #[test]
    fn diagnostics_collects_in_order() {
        let mut diagnostics = Diagnostics::new();
        assert!(!diagnostics.had_error());

        diagnostics.report(Error::unexpected_character(1, '@'));
        diagnostics.report(Error::unterminated_string(4));

        assert!(diagnostics.had_error());
        assert_eq!(2, diagnostics.len());
        let lines: Vec<_> = diagnostics.into_errors().iter().map(Error::line).collect();
        assert_eq!(vec![1, 4], lines);
    }

    #[test]
    fn converts_into_io_error() {
        let e: std::io::Error = Error::unterminated_string(1).into();
        assert_eq!(std::io::ErrorKind::Other, e.kind());
    }
}
