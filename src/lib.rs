//! Invocat is a small domain-specific language and interpreter for
//! generating aleatory (randomized) text from user-defined grammars.
//!
//! A program is a sequence of bindings (`name :: a | b`, weighted tables,
//! selections that freeze a choice, evaluating variants of both) plus bare
//! text that references and destructively draws from those bindings. The
//! pipeline is the conventional three stages:
//!
//! - [`lexer`] scans source text into a flat [`token::Token`] stream.
//! - [`parser`] turns that stream into a list of [`ast::Expr`] — the whole
//!   language is eight enum variants, see [`ast::Expr`]'s docs.
//! - [`eval`] tree-walks the AST, threading an [`env::Environment`] and a
//!   seeded random source.
//!
//! [`Interpreter`] is the façade most callers want: it owns the environment
//! and random source across multiple calls to `eval`/`eval_file`, so
//! bindings made by one call are visible to the next.
//!
//! # Example
//!
//! ```
//! use invocat::Interpreter;
//!
//! let mut interp = Interpreter::new(Some("a seed"));
//! let values = interp.eval("x :: moon | sun\n(x) rises.\n").unwrap();
//! assert_eq!(values.len(), 1);
//! ```

pub mod ast;
pub mod env;
pub mod error;
pub mod eval;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod position;
pub mod rng;
pub mod token;

pub use ast::Expr;
pub use env::Environment;
pub use error::{InvocatError, LexError, ParseError};
pub use eval::Evaluator;
pub use interpreter::Interpreter;
pub use lexer::Lexer;
pub use parser::Parser;
pub use position::{Code, Position};
pub use token::{Token, TokenKind};
