//! Parse errors.
//!
//! Every tokenizer and parser step returns `Result<_, ParseError>`. The error
//! carries the byte offset (into the normalized buffer) where recognition
//! failed, and a kind that falls into one of three categories:
//! tokenization, structural, or type.

use std::fmt;

use thiserror::Error;

use crate::value::ValueType;

/// Broad classification of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A literal tokenizer could not recognize its expected shape.
    Tokenization,
    /// A delimiter is missing or out of order, or structures were left open.
    Structural,
    /// Unknown data type keyword or a literal that does not fit its type.
    Type,
}

/// The token shape a tokenizer was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expected {
    Identifier,
    Name,
    Reference,
    Boolean,
    Integer,
    Float,
    String,
    HexLiteral,
    DataType,
    ArraySize,
    PropertyValue,
}

impl Expected {
    /// Human-readable description used in error messages.
    pub fn description(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Name => "name",
            Self::Reference => "reference",
            Self::Boolean => "boolean literal",
            Self::Integer => "integer literal",
            Self::Float => "floating-point literal",
            Self::String => "string literal",
            Self::HexLiteral => "hexadecimal literal",
            Self::DataType => "primitive data type",
            Self::ArraySize => "array size",
            Self::PropertyValue => "property value",
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected {0}")]
    Expected(Expected),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("string literal is not valid UTF-8")]
    InvalidUtf8,

    #[error("expected `{0}`")]
    ExpectedToken(char),

    #[error("unexpected `{0}`")]
    UnexpectedToken(char),

    #[error("{0} structure(s) still open at end of input")]
    Unclosed(usize),

    #[error("structures nested deeper than {0} levels")]
    TooDeep(usize),

    #[error("sub-array holds {found} values, declared size is {expected}")]
    ArraySizeMismatch { expected: usize, found: usize },

    #[error("no buffer to parse")]
    NoBuffer,

    #[error("unknown primitive data type `{0}`")]
    UnknownDataType(String),

    #[error("array size must be a positive integer")]
    InvalidArraySize,

    #[error("literal `{literal}` does not fit in {ty}")]
    OutOfRange { literal: String, ty: ValueType },
}

impl ParseErrorKind {
    /// Map this kind onto the error taxonomy.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Expected(_) | Self::UnterminatedString | Self::InvalidUtf8 => {
                ErrorCategory::Tokenization
            }
            Self::ExpectedToken(_)
            | Self::UnexpectedToken(_)
            | Self::Unclosed(_)
            | Self::TooDeep(_)
            | Self::ArraySizeMismatch { .. }
            | Self::NoBuffer => ErrorCategory::Structural,
            Self::UnknownDataType(_) | Self::InvalidArraySize | Self::OutOfRange { .. } => {
                ErrorCategory::Type
            }
        }
    }
}

/// A parse failure at a byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    #[inline]
    pub(crate) fn expected(what: Expected, offset: usize) -> Self {
        Self::new(ParseErrorKind::Expected(what), offset)
    }

    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

/// Result of a tokenizer: the parsed item and the position just past it.
pub type Parsed<T> = Result<(T, usize), ParseError>;
