use crate::position::Position;
use thiserror::Error;

/// Fatal error raised when the lexer finds no matching token pattern at the
/// current cursor. The lexical grammar is intended to be total over UTF-8
/// text, so this should only ever fire on a malformed input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("LexError: no token pattern matched at {position}")]
pub struct LexError {
    pub pointer: usize,
    pub position: Position,
}

impl LexError {
    pub fn new(pointer: usize, position: Position) -> Self {
        Self { pointer, position }
    }
}

/// Fatal parse errors. No partial expression list is ever returned alongside
/// one of these; a parse either succeeds completely or fails completely.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("SyntaxError: could not parse expression at {position}")]
    UnparsedExpression { position: Position },

    #[error("SyntaxError: expected second expression in mix at {position}")]
    ExpectedSecondMixOperand { position: Position },

    #[error("SyntaxError: expected list item at {position}")]
    ExpectedListItem { position: Position },

    #[error("SyntaxError: expected rule1-separated list items at {position}")]
    ExpectedRule1SeparatedItems { position: Position },

    #[error("SyntaxError: unclosed '{opening}' at {position}")]
    UnclosedBracket { opening: char, position: Position },

    #[error("SyntaxError: stray token left after parsing at {position}")]
    StrayToken { position: Position },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::UnparsedExpression { position }
            | ParseError::ExpectedSecondMixOperand { position }
            | ParseError::ExpectedListItem { position }
            | ParseError::ExpectedRule1SeparatedItems { position }
            | ParseError::UnclosedBracket { position, .. }
            | ParseError::StrayToken { position } => *position,
        }
    }
}

/// Umbrella error for the façade, unifying the lex and parse failure
/// domains behind one type callers of [`crate::Interpreter::eval`] can match
/// on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvocatError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
