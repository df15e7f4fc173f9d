use once_cell::unsync::OnceCell;
use std::fmt::{Display, Formatter};

/// Human-readable line/column location used in diagnostics.
///
/// Both fields are 1-based, matching how editors report locations. This is
/// distinct from [`crate::token::Token::line`], which is a 0-based counter
/// the lexer increments as it scans.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A source text wrapper that lazily indexes line breaks so byte offsets can
/// be converted to [`Position`]s on demand, without rescanning from the start
/// on every lookup.
pub struct Code<'c> {
    pub value: &'c str,
    line_breaks: OnceCell<Vec<usize>>,
}

impl<'c> From<&'c str> for Code<'c> {
    fn from(value: &'c str) -> Self {
        Code::new(value)
    }
}

impl<'c> Code<'c> {
    pub fn new(value: &'c str) -> Self {
        Self {
            value,
            line_breaks: OnceCell::new(),
        }
    }

    fn obtain_line_breaks(&self) -> &Vec<usize> {
        self.line_breaks.get_or_init(|| {
            self.value
                .bytes()
                .enumerate()
                .filter_map(|(index, b)| if b == b'\n' { Some(index) } else { None })
                .collect()
        })
    }

    /// Resolve a byte offset into the source into a 1-based line/column.
    pub fn obtain_position(&self, pointer: usize) -> Position {
        let line_breaks = self.obtain_line_breaks();
        let index = match line_breaks.binary_search(&pointer) {
            Ok(index) | Err(index) => index,
        };

        if index == 0 {
            Position::new(1, self.value[..pointer].chars().count() + 1)
        } else {
            let break_point = line_breaks[index - 1] + 1;
            Position::new(index + 1, self.value[break_point..pointer].chars().count() + 1)
        }
    }
}
