use thiserror::Error;

/// A parse failure.
///
/// Only [`ParseError::Unsupported`] is fatal: it aborts the whole parse even
/// inside the speculative loops (the template-declaration loop and the
/// restriction child loops) that otherwise turn a failed attempt into
/// ordinary loop termination.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The next token(s) do not match what a grammar rule requires.
    #[error("{file}:{line}: {message}")]
    Syntax {
        file: String,
        line: u32,
        message: String,
    },

    /// A template name was used before any template of that name was declared.
    #[error("{file}:{line}: unresolved template reference '{name}'")]
    UnresolvedReference {
        file: String,
        line: u32,
        name: String,
    },

    /// A construct the format defines but this parser deliberately rejects
    /// (multi-dimensional arrays, UUID data references).
    #[error("{file}:{line}: unsupported construct: {what}")]
    Unsupported {
        file: String,
        line: u32,
        what: String,
    },
}

impl ParseError {
    pub fn syntax(file: &str, line: u32, message: impl Into<String>) -> Self {
        ParseError::Syntax {
            file: file.to_owned(),
            line,
            message: message.into(),
        }
    }

    pub fn unresolved(file: &str, line: u32, name: impl Into<String>) -> Self {
        ParseError::UnresolvedReference {
            file: file.to_owned(),
            line,
            name: name.into(),
        }
    }

    pub fn unsupported(file: &str, line: u32, what: impl Into<String>) -> Self {
        ParseError::Unsupported {
            file: file.to_owned(),
            line,
            what: what.into(),
        }
    }

    /// Whether this error must abort the parse instead of ending a
    /// speculative attempt.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::Unsupported { .. })
    }
}
