use crate::env::Environment;
use crate::error::InvocatError;
use crate::eval::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use log::warn;
use std::fs;
use std::path::Path;

/// The façade over lex → parse → evaluate. Owns the one [`Environment`] and
/// [`Evaluator`] (and thus the one random source) that every call to
/// [`Interpreter::eval`]/[`Interpreter::eval_file`] threads through, so
/// bindings and RNG state persist across calls on the same instance.
pub struct Interpreter {
    lexer: Lexer,
    env: Environment,
    evaluator: Evaluator,
}

impl Interpreter {
    /// `seed` selects the random source; omit it to seed from the empty
    /// string (still deterministic, just a fixed default sequence).
    pub fn new(seed: Option<&str>) -> Self {
        Self {
            lexer: Lexer::new(),
            env: Environment::new(),
            evaluator: Evaluator::new(seed.unwrap_or("")),
        }
    }

    /// Lex and parse `text` completely before evaluating anything, so a
    /// malformed program never partially mutates `self`'s environment.
    /// Returns the emitted top-level values, in source order, skipping
    /// binding forms that produce none. Returns `None` on a lex/parse error
    /// (logged at `warn`) and also when the program emits no values at all
    /// (e.g. a comment-only input, or one consisting only of binding
    /// forms); callers that need to distinguish the two, or need the error
    /// itself, should use `try_eval`.
    pub fn eval(&mut self, text: &str) -> Option<Vec<String>> {
        match self.try_eval(text) {
            Ok(values) if values.is_empty() => None,
            Ok(values) => Some(values),
            Err(error) => {
                warn!("{error}");
                None
            }
        }
    }

    /// Same as [`Interpreter::eval`], but surfaces the [`InvocatError`]
    /// instead of discarding it.
    pub fn try_eval(&mut self, text: &str) -> Result<Vec<String>, InvocatError> {
        let tokens = self.lexer.tokenize(text)?;
        let expressions = Parser::new(tokens).parse()?;

        let mut values = Vec::new();
        for expr in &expressions {
            if let Some(value) = self.evaluator.eval(expr, &mut self.env) {
                values.push(value);
            }
        }
        Ok(values)
    }

    /// Read `path` as UTF-8 and evaluate it as if its contents had been
    /// passed to [`Interpreter::eval`]. An I/O failure is logged at `warn`
    /// and reported as `None`, matching `eval`'s own error reporting instead
    /// of propagating `io::Error` to callers that only want text in/text
    /// out.
    pub fn eval_file(&mut self, path: impl AsRef<Path>) -> Option<Vec<String>> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => self.eval(&text),
            Err(error) => {
                warn!("could not read {}: {error}", path.display());
                None
            }
        }
    }

    /// Snapshot of the names currently bound in the environment.
    pub fn names(&self) -> Vec<String> {
        self.env.names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_returns_emitted_values_in_order() {
        let mut interp = Interpreter::new(Some("seed"));
        let values = interp.eval("x :: moon\n(x)\n").unwrap();
        assert_eq!(values, vec!["moon".to_string()]);
    }

    #[test]
    fn eval_returns_none_when_nothing_is_emitted() {
        let mut interp = Interpreter::new(Some("seed"));
        assert!(interp.eval("x :: moon\n").is_none());
        assert!(interp.eval("-- just a comment\n").is_none());
    }

    #[test]
    fn bindings_persist_across_eval_calls() {
        let mut interp = Interpreter::new(Some("seed"));
        interp.try_eval("x :: moon\n").unwrap();
        let values = interp.eval("(x)\n").unwrap();
        assert_eq!(values, vec!["moon".to_string()]);
        assert_eq!(interp.names(), vec!["x".to_string()]);
    }

    #[test]
    fn malformed_program_does_not_touch_the_environment() {
        let mut interp = Interpreter::new(Some("seed"));
        assert!(interp.try_eval("x :: moon\n(").is_err());
        assert!(interp.names().is_empty());
    }

    #[test]
    fn eval_file_reports_none_on_missing_file() {
        let mut interp = Interpreter::new(Some("seed"));
        assert!(interp.eval_file("/no/such/path/invocat.txt").is_none());
    }
}
