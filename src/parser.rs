use crate::ast::Expr;
use crate::error::ParseError;
use crate::position::Position;
use crate::token::{Token, TokenKind};

const LITERAL_KINDS: &[TokenKind] = &[
    TokenKind::Name,
    TokenKind::Number,
    TokenKind::Punct,
    TokenKind::Escape,
    TokenKind::White,
    TokenKind::DieNotation,
    TokenKind::Weight,
];

/// Recursive-descent parser over a flat token stream. Holds only a cursor
/// index — stateless across calls to [`Parser::parse`], same as the lexer is
/// stateless across calls to `tokenize`.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse the whole token stream into an ordered list of top-level
    /// expressions. Skips leading and inter-expression blank lines. A
    /// malformed expression aborts the whole call — no partial list is ever
    /// returned alongside an `Err`.
    pub fn parse(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut expressions = Vec::new();
        self.skip_newlines();
        while !self.at_eof() {
            expressions.push(self.parse_expression()?);
            self.skip_newlines();
        }
        Ok(expressions)
    }

    // ---- cursor helpers -----------------------------------------------

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn peek_ahead(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn at_eof(&self) -> bool {
        self.peek_kind(TokenKind::Eof)
    }

    fn take(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek_kind(kind) {
            let token = self.current().clone();
            self.pos += 1;
            Some(token)
        } else {
            None
        }
    }

    fn skip_newlines(&mut self) {
        while self.take(TokenKind::Newline).is_some() {}
    }

    fn skip_leading_white(&mut self) {
        while self.take(TokenKind::White).is_some() {}
    }

    fn take_weight(&mut self) -> Option<Token> {
        self.take(TokenKind::Weight)
    }

    /// A table/list item's optional leading weight may be preceded by
    /// indentation (`White`) rather than immediately at the start of the
    /// line — try the weight first, and if that fails, strip any leading
    /// whitespace and try again before giving up, so `   2  red` is read as
    /// a weight of `2` rather than having its `Weight` token swallowed into
    /// the item's literal text.
    fn take_leading_weight(&mut self) -> Option<Token> {
        self.take_weight().or_else(|| {
            self.skip_leading_white();
            self.take_weight()
        })
    }

    fn current_position(&self) -> Position {
        // Column tracking does not survive tokenization (the parser only
        // sees line numbers); diagnostics anchor to the start of the line.
        Position::new(self.current().line + 1, 1)
    }

    // ---- expression-level productions ----------------------------------

    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        if let Some(binding) = self.try_parse_named_binding()? {
            return Ok(binding);
        }
        let expr = self.parse_mix_with_err(&[TokenKind::Newline], |position| {
            ParseError::UnparsedExpression { position }
        })?;
        if !self.peek_kind(TokenKind::Newline) && !self.at_eof() {
            return Err(ParseError::StrayToken {
                position: self.current_position(),
            });
        }
        self.take(TokenKind::Newline);
        Ok(expr)
    }

    /// `definition | selection | evalDefinition | evalSelection`, tried in
    /// that order as alternatives to a bare `mix`. Returns `Ok(None)`
    /// (cursor unchanged) when none apply, letting the caller fall back to
    /// `mix`.
    fn try_parse_named_binding(&mut self) -> Result<Option<Expr>, ParseError> {
        if let Some(table) = self.try_parse_table()? {
            return Ok(Some(table));
        }

        let mark = self.pos;
        let name = match self.take(TokenKind::Name) {
            Some(token) => token.lexeme,
            None => return Ok(None),
        };

        let kind = if self.take(TokenKind::Define).is_some() {
            Some(TokenKind::Define)
        } else if self.take(TokenKind::Select).is_some() {
            Some(TokenKind::Select)
        } else if self.take(TokenKind::DefEval).is_some() {
            Some(TokenKind::DefEval)
        } else if self.take(TokenKind::SelEval).is_some() {
            Some(TokenKind::SelEval)
        } else {
            None
        };

        let Some(kind) = kind else {
            self.pos = mark;
            return Ok(None);
        };

        let items = self.parse_pipe_items()?;
        Ok(Some(match kind {
            TokenKind::Define => Expr::Definition { name, items },
            TokenKind::Select => Expr::Selection { name, items },
            TokenKind::DefEval => Expr::EvaluatingDefinition { name, items },
            TokenKind::SelEval => Expr::EvaluatingSelection { name, items },
            _ => unreachable!(),
        }))
    }

    /// `table1 | table2`: `(dN? name) newline (rule1 | rule2) newline items`.
    /// Backtracks completely (cursor fully restored) when the header shape
    /// does not match, since at that point we don't yet know whether this
    /// line is a table header, a plain `name :: ...` binding, or a bare
    /// literal line.
    fn try_parse_table(&mut self) -> Result<Option<Expr>, ParseError> {
        let mark = self.pos;
        let die_mode = self.take(TokenKind::DieNotation).is_some();

        let name = match self.take(TokenKind::Name) {
            Some(token) => token.lexeme,
            None => {
                self.pos = mark;
                return Ok(None);
            }
        };

        if self.take(TokenKind::Newline).is_none() {
            self.pos = mark;
            return Ok(None);
        }

        if self.take(TokenKind::Rule1).is_some() {
            self.take(TokenKind::Newline);
            let items = self.parse_table1_items(die_mode)?;
            return Ok(Some(Expr::Definition { name, items }));
        }

        if self.take(TokenKind::Rule2).is_some() {
            self.take(TokenKind::Newline);
            let items = self.parse_table2_items(die_mode)?;
            return Ok(Some(Expr::Definition { name, items }));
        }

        self.pos = mark;
        Ok(None)
    }

    /// `items := (weight? mix(terminator=pipe))* until newline|eof` — the
    /// pipe-separated alternative list used by plain (non-table) bindings.
    fn parse_pipe_items(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        loop {
            let weight = self.take_weight();
            let expr = self.parse_mix_with_err(&[TokenKind::Pipe, TokenKind::Newline], |position| {
                ParseError::ExpectedListItem { position }
            })?;
            let count = weight.map(|w| weight_count(&w.lexeme, false)).unwrap_or(1);
            for _ in 0..count {
                items.push(expr.clone());
            }
            if self.take(TokenKind::Pipe).is_none() {
                break;
            }
        }
        self.take(TokenKind::Newline);
        Ok(items)
    }

    /// Table 1 ("---"): one item per physical line, terminated by a blank
    /// line or eof.
    fn parse_table1_items(&mut self, die_mode: bool) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        loop {
            if self.at_eof() {
                break;
            }
            if self.peek_kind(TokenKind::Newline) {
                self.take(TokenKind::Newline);
                break;
            }

            let weight = self.take_leading_weight();
            let expr = self.parse_mix_with_err(&[TokenKind::Newline], |position| {
                ParseError::ExpectedListItem { position }
            })?;
            let count = weight.map(|w| weight_count(&w.lexeme, die_mode)).unwrap_or(1);
            for _ in 0..count {
                items.push(expr.clone());
            }

            if self.take(TokenKind::Newline).is_none() {
                break;
            }
        }
        Ok(items)
    }

    /// Table 2 ("==="): items may span multiple physical lines, joined by a
    /// spliced single-space literal, separated from each other by a `rule1`
    /// line; terminated by a blank line or eof.
    fn parse_table2_items(&mut self, die_mode: bool) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        loop {
            if self.at_eof() {
                break;
            }
            if self.peek_kind(TokenKind::Newline) {
                self.take(TokenKind::Newline);
                break;
            }

            let weight = self.take_leading_weight();
            let mut expr = self.parse_mix_with_err(
                &[TokenKind::Newline, TokenKind::Rule1],
                |position| ParseError::ExpectedRule1SeparatedItems { position },
            )?;

            loop {
                if !self.peek_kind(TokenKind::Newline) {
                    break;
                }
                match self.peek_ahead(1) {
                    TokenKind::Rule1 | TokenKind::Newline | TokenKind::Eof => {
                        self.take(TokenKind::Newline);
                        break;
                    }
                    _ => {
                        self.take(TokenKind::Newline);
                        self.skip_leading_white();
                        let continuation = self.parse_mix_with_err(
                            &[TokenKind::Newline, TokenKind::Rule1],
                            |position| ParseError::ExpectedSecondMixOperand { position },
                        )?;
                        expr = Expr::mix(expr, Expr::mix(Expr::literal(" "), continuation));
                    }
                }
            }

            let count = weight.map(|w| weight_count(&w.lexeme, die_mode)).unwrap_or(1);
            for _ in 0..count {
                items.push(expr.clone());
            }

            if self.peek_kind(TokenKind::Rule1) {
                self.take(TokenKind::Rule1);
                self.take(TokenKind::Newline);
            } else {
                break;
            }
        }
        Ok(items)
    }

    // ---- mix / atom productions -----------------------------------------

    /// `mix(T) := atom (literal|ref|draw)*`, stopping at any kind in
    /// `terminators`, at `eof`, or when no further atom can be parsed.
    /// Requires at least one atom; `on_empty` builds the error to raise
    /// when even the first atom is missing, so callers can report the
    /// specific production that expected content ("expected list item",
    /// "expected second expression in mix", etc).
    fn parse_mix_with_err(
        &mut self,
        terminators: &[TokenKind],
        on_empty: impl Fn(Position) -> ParseError,
    ) -> Result<Expr, ParseError> {
        let Some(first) = self.parse_atom()? else {
            return Err(on_empty(self.current_position()));
        };

        let mut atoms = vec![first];
        loop {
            if self.at_eof() || terminators.iter().any(|t| self.peek_kind(*t)) {
                break;
            }
            match self.parse_atom()? {
                Some(atom) => atoms.push(atom),
                None => break,
            }
        }
        Ok(fold_right(atoms))
    }

    /// `reference | draw | literal`. Returns `Ok(None)` when the current
    /// token cannot start any of the three (a terminator, or a structural
    /// token like a stray `)`/`}`).
    fn parse_atom(&mut self) -> Result<Option<Expr>, ParseError> {
        if self.peek_kind(TokenKind::LParen) {
            let open_position = self.current_position();
            self.take(TokenKind::LParen);
            let inner = self.parse_mix_with_err(&[TokenKind::RParen], |position| {
                ParseError::UnparsedExpression { position }
            })?;
            if self.take(TokenKind::RParen).is_none() {
                return Err(ParseError::UnclosedBracket {
                    opening: '(',
                    position: open_position,
                });
            }
            return Ok(Some(Expr::reference(inner)));
        }

        if self.peek_kind(TokenKind::LBrace) {
            let open_position = self.current_position();
            self.take(TokenKind::LBrace);
            let inner = self.parse_mix_with_err(&[TokenKind::RBrace], |position| {
                ParseError::UnparsedExpression { position }
            })?;
            if self.take(TokenKind::RBrace).is_none() {
                return Err(ParseError::UnclosedBracket {
                    opening: '{',
                    position: open_position,
                });
            }
            return Ok(Some(Expr::draw(inner)));
        }

        if LITERAL_KINDS.contains(&self.current().kind) {
            let mut text = String::new();
            while LITERAL_KINDS.contains(&self.current().kind) {
                text.push_str(&self.current().lexeme);
                self.pos += 1;
            }
            return Ok(Some(Expr::literal(text)));
        }

        Ok(None)
    }
}

fn fold_right(mut atoms: Vec<Expr>) -> Expr {
    let last = atoms.pop().expect("mix always has at least one atom");
    atoms
        .into_iter()
        .rev()
        .fold(last, |acc, atom| Expr::mix(atom, acc))
}

/// Interpret a `weight`/`dN` lexeme as a repeat count.
///
/// In die-notation mode a range `s-t` counts as `t - s + 1` occurrences and
/// an isolated number counts as exactly 1 (`N` itself is never inspected).
/// In frequency mode the number directly is the repeat count.
fn weight_count(text: &str, die_mode: bool) -> usize {
    match text.split_once('-') {
        Some((s, t)) => {
            let s: i64 = s.trim().parse().unwrap_or(1);
            let t: i64 = t.trim().parse().unwrap_or(s);
            if die_mode {
                (t - s + 1).max(0) as usize
            } else {
                s.max(0) as usize
            }
        }
        None => {
            if die_mode {
                1
            } else {
                text.trim().parse::<i64>().unwrap_or(1).max(0) as usize
            }
        }
    }
}
