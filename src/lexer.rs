use crate::error::LexError;
use crate::position::Code;
use crate::token::{Token, TokenKind};
use log::trace;
use regex::Regex;

/// A single ordered lexical rule: try `pattern` at the cursor: the first
/// rule (in table order) whose regex matches wins. Order is part of the
/// grammar — see `Lexer::rules` for why.
struct Rule {
    kind: TokenKind,
    pattern: Regex,
}

impl Rule {
    fn new(kind: TokenKind, pattern: &str) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).expect("lexical pattern must be a valid regex"),
        }
    }
}

/// Scans Invocat source text into a flat token stream. Stateless across
/// calls to [`Lexer::tokenize`] — all cursor state lives on the stack of
/// that call.
pub struct Lexer {
    rules: Vec<Rule>,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    /// Build the lexer's rule table. Order is significant: `dN` / `Weight` /
    /// `Number` / `Name` overlap (a weight is a number-with-separator, a
    /// name can swallow digits), and `Rule1` can be mistaken for the two
    /// leading hyphens of a `Comment`. The rules below are tried top to
    /// bottom and the first match wins.
    pub fn new() -> Self {
        const BLANK: &str = r"[ \t]";
        let rules = vec![
            Rule::new(
                TokenKind::DieNotation,
                &format!(r"^d[0-9]+{BLANK}({BLANK}|\p{{P}}){BLANK}*"),
            ),
            Rule::new(
                TokenKind::Weight,
                &format!(r"^[0-9]+(-[0-9]+)?{BLANK}({BLANK}|\p{{P}}){BLANK}*"),
            ),
            Rule::new(TokenKind::Number, r"^[0-9]+"),
            Rule::new(TokenKind::Name, r"^[\w!'?.,;]+( +[\w!'?.,;]+)*"),
            Rule::new(TokenKind::LParen, r"^\("),
            Rule::new(TokenKind::RParen, r"^\)"),
            Rule::new(TokenKind::LBrace, r"^\{"),
            Rule::new(TokenKind::RBrace, r"^\}"),
            Rule::new(TokenKind::Pipe, &format!(r"^{BLANK}*\|{BLANK}*")),
            Rule::new(TokenKind::Define, &format!(r"^{BLANK}*::{BLANK}*")),
            Rule::new(TokenKind::DefEval, &format!(r"^{BLANK}*:!{BLANK}*")),
            Rule::new(TokenKind::Select, &format!(r"^{BLANK}*<-{BLANK}*")),
            Rule::new(TokenKind::SelEval, &format!(r"^{BLANK}*<!{BLANK}*")),
            Rule::new(TokenKind::Comment, &format!(r"^{BLANK}*--{BLANK}+[^\n]*")),
            Rule::new(TokenKind::Rule1, r"^---+[^\n]*"),
            Rule::new(TokenKind::Rule2, r"^===+[^\n]*"),
            Rule::new(TokenKind::Split, r"^\\\r?\n"),
            Rule::new(TokenKind::Newline, &format!(r"^{BLANK}*\n")),
            Rule::new(TokenKind::White, r"^[ \t\r]+"),
            Rule::new(TokenKind::Escape, r"^\\[nrt(){}|\\]"),
            Rule::new(TokenKind::Punct, r"^\p{P}"),
        ];
        Self { rules }
    }

    /// Scan `source` into an ordered token stream terminated by a single
    /// `Eof` token. Comments and line splices are dropped; newline lexemes
    /// are trimmed to a bare `\n`; escape sequences are substituted; and the
    /// whitespace surrounding `|`, `::`, `:!`, `<-`, `<!` is absorbed into
    /// the operator token.
    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>, LexError> {
        let code = Code::new(source);
        let mut tokens = Vec::new();
        let mut pointer = 0usize;
        let mut line = 0usize;
        let len = source.len();

        while pointer < len {
            let remaining = &source[pointer..];
            let matched = self
                .rules
                .iter()
                .find_map(|rule| rule.pattern.find(remaining).map(|m| (rule.kind, m.as_str())));

            match matched {
                Some((kind, matched_text)) => {
                    trace!("lexer matched {:?} {:?} at byte {}", kind, matched_text, pointer);
                    let matched_len = matched_text.len();
                    pointer += matched_len;

                    match kind {
                        TokenKind::Comment | TokenKind::Split => {
                            // Dropped: never emitted into the token stream.
                        }
                        TokenKind::Newline => {
                            tokens.push(Token::new(TokenKind::Newline, "\n", line));
                            line += 1;
                        }
                        TokenKind::Escape => {
                            let substituted = substitute_escape(matched_text);
                            tokens.push(Token::new(TokenKind::Escape, substituted, line));
                        }
                        TokenKind::Pipe
                        | TokenKind::Define
                        | TokenKind::DefEval
                        | TokenKind::Select
                        | TokenKind::SelEval => {
                            tokens.push(Token::new(kind, matched_text.trim(), line));
                        }
                        TokenKind::Weight => {
                            tokens.push(Token::new(kind, matched_text.trim(), line));
                        }
                        TokenKind::DieNotation => {
                            // Only the `d<digits>` prefix is meaningful; the
                            // trailing separator that triggered recognition
                            // is discarded along with the digits themselves.
                            tokens.push(Token::new(kind, matched_text.trim(), line));
                        }
                        _ => {
                            tokens.push(Token::new(kind, matched_text, line));
                        }
                    }
                }
                None => {
                    let position = code.obtain_position(pointer);
                    trace!("lexer failed to match at byte {} ({})", pointer, position);
                    return Err(LexError::new(pointer, position));
                }
            }
        }

        tokens.push(Token::eof(line));
        Ok(tokens)
    }
}

fn substitute_escape(matched: &str) -> char {
    match matched.chars().nth(1) {
        Some('n') => '\n',
        Some('t') => '\t',
        Some('r') => '\r',
        Some('(') => '(',
        Some(')') => ')',
        Some('{') => '{',
        Some('}') => '}',
        Some('|') => '|',
        Some('\\') => '\\',
        other => unreachable!("unexpected escape sequence {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn ends_with_single_eof() {
        let lexer = Lexer::new();
        let tokens = lexer.tokenize("moon").unwrap();
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
    }

    #[test]
    fn empty_input_is_just_eof() {
        let lexer = Lexer::new();
        let tokens = lexer.tokenize("").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn never_emits_comment_or_split() {
        let lexer = Lexer::new();
        let tokens = lexer
            .tokenize("-- a comment\nx :: a \\\n| b\n")
            .unwrap();
        assert!(!kinds(&tokens).contains(&TokenKind::Comment));
        assert!(!kinds(&tokens).contains(&TokenKind::Split));
    }

    #[test]
    fn operators_absorb_surrounding_whitespace() {
        let lexer = Lexer::new();
        let tokens = lexer.tokenize("x  ::  a").unwrap();
        let define = tokens.iter().find(|t| t.kind == TokenKind::Define).unwrap();
        assert_eq!(define.lexeme, "::");
    }

    #[test]
    fn weight_requires_trailing_separator() {
        let lexer = Lexer::new();
        // "3 apples" — "3" followed by a single blank then a name char is
        // NOT a weight (needs blank-or-punct after the first blank).
        let tokens = lexer.tokenize("3 apples").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Number);
    }

    #[test]
    fn weight_recognized_before_double_blank() {
        let lexer = Lexer::new();
        let tokens = lexer.tokenize("2  apples").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Weight);
        assert_eq!(tokens[0].lexeme, "2");
    }

    #[test]
    fn die_notation_prefix_recognized() {
        let lexer = Lexer::new();
        let tokens = lexer.tokenize("d4  memory\n").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::DieNotation);
        assert_eq!(tokens[0].lexeme, "d4");
    }

    #[test]
    fn bare_double_hyphen_is_punctuation_not_comment() {
        let lexer = Lexer::new();
        let tokens = lexer.tokenize("--").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Punct);
        assert_eq!(tokens[1].kind, TokenKind::Punct);
    }

    #[test]
    fn rule1_matches_three_or_more_hyphens() {
        let lexer = Lexer::new();
        let tokens = lexer.tokenize("----\n").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Rule1);
    }

    #[test]
    fn escape_sequences_substitute() {
        let lexer = Lexer::new();
        let tokens = lexer.tokenize(r"\n\(\)").unwrap();
        let lexemes: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Escape)
            .map(|t| t.lexeme.as_str())
            .collect();
        assert_eq!(lexemes, vec!["\n", "(", ")"]);
    }

    #[test]
    fn unmatched_input_is_a_lex_error() {
        // every ASCII byte is handled by some rule (punct is the catch-all),
        // so provoke failure is not reachable for ASCII; this documents the
        // total-grammar invariant instead of asserting an error case.
        let lexer = Lexer::new();
        assert!(lexer.tokenize("hello world! (a|b) {c}").is_ok());
    }
}
