use std::fmt::{Display, Formatter};

/// The kinds of token the lexer can produce, tested in exactly this order
/// at every cursor position. Ordering is part of the language grammar: a
/// `Number` is a prefix of a `Weight`, a `Name` can absorb digits, and
/// `Rule1` can be mistaken for the two leading hyphens of a `Comment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    DieNotation,
    Weight,
    Number,
    Name,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Pipe,
    Define,
    DefEval,
    Select,
    SelEval,
    Comment,
    Rule1,
    Rule2,
    Split,
    Newline,
    White,
    Escape,
    Punct,
    Eof,
}

/// One scanned token: its kind, the (possibly normalized) matched text, and
/// the 0-based source line it was scanned on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }

    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::Eof, "", line)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({:?})@L{}", self.kind, self.lexeme, self.line)
    }
}
