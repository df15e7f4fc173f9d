use std::fmt::{self, Display, Formatter};

/// The Invocat abstract syntax tree. Eight variants, fixed for the life of
/// the language — `eval` and `Display` dispatch on them with a single
/// `match`, no subtype hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `name :: a | b` — bind `name` to `items` verbatim, unevaluated.
    Definition { name: String, items: Vec<Expr> },
    /// `name <- a | b` — choose one of `items` now and freeze the binding.
    Selection { name: String, items: Vec<Expr> },
    /// `name :! a | b` — evaluate every item now, bind the results.
    EvaluatingDefinition { name: String, items: Vec<Expr> },
    /// `name <! a | b` — choose and evaluate one item now, bind the result.
    EvaluatingSelection { name: String, items: Vec<Expr> },
    /// `(name)` — nondestructive sample from `name`'s alternatives.
    Reference(Box<Expr>),
    /// `{name}` — destructive sample: the chosen alternative is removed.
    Draw(Box<Expr>),
    /// Bare text, a number, or a substituted escape.
    Literal(String),
    /// Juxtaposition of two expressions, right-leaning over a run of
    /// adjacent literals/references/draws.
    Mix(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn mix(left: Expr, right: Expr) -> Expr {
        Expr::Mix(Box::new(left), Box::new(right))
    }

    pub fn reference(name_expr: Expr) -> Expr {
        Expr::Reference(Box::new(name_expr))
    }

    pub fn draw(name_expr: Expr) -> Expr {
        Expr::Draw(Box::new(name_expr))
    }

    pub fn literal(text: impl Into<String>) -> Expr {
        Expr::Literal(text.into())
    }
}

/// Canonical surface-text rendering. Re-parsing this output reproduces a
/// structurally equal AST (modulo whitespace normalization performed by the
/// lexer) — this is the round-trip property tests rely on.
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Definition { name, items } => write_binding(f, name, "::", items),
            Expr::Selection { name, items } => write_binding(f, name, "<-", items),
            Expr::EvaluatingDefinition { name, items } => write_binding(f, name, ":!", items),
            Expr::EvaluatingSelection { name, items } => write_binding(f, name, "<!", items),
            Expr::Reference(inner) => write!(f, "({})", inner),
            Expr::Draw(inner) => write!(f, "{{{}}}", inner),
            Expr::Literal(text) => write!(f, "{}", text),
            Expr::Mix(left, right) => write!(f, "{}{}", left, right),
        }
    }
}

fn write_binding(
    f: &mut Formatter<'_>,
    name: &str,
    operator: &str,
    items: &[Expr],
) -> fmt::Result {
    write!(f, "{} {} ", name, operator)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " | ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_canonical_print_concatenates() {
        let e = Expr::mix(Expr::literal("a"), Expr::literal("b"));
        assert_eq!(e.to_string(), "ab");
    }

    #[test]
    fn definition_canonical_print() {
        let e = Expr::Definition {
            name: "color".into(),
            items: vec![Expr::literal("red"), Expr::literal("blue")],
        };
        assert_eq!(e.to_string(), "color :: red | blue ");
    }

    #[test]
    fn structural_equality_ignores_nothing_extra() {
        let a = Expr::reference(Expr::literal("x"));
        let b = Expr::reference(Expr::literal("x"));
        assert_eq!(a, b);
    }
}
