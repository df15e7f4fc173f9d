use crate::ast::Expr;
use crate::env::Environment;
use crate::rng::SeededRng;
use log::trace;

/// Tree-walks an [`Expr`], threading an [`Environment`] and sampling from a
/// seeded random source.
///
/// The specified signature is `eval(exp, env) -> (env', value?)`; this type
/// implements the thread as `&mut Environment` mutation instead of
/// returning a new map at each step (see `DESIGN.md`) — observable
/// behaviour is identical since `Expr` nodes are immutable once built.
pub struct Evaluator {
    rng: SeededRng,
}

impl Evaluator {
    pub fn new(seed: &str) -> Self {
        Self {
            rng: SeededRng::from_seed_str(seed),
        }
    }

    /// Evaluate `expr` in `env`, mutating `env` in place. Returns the
    /// produced value, or `None` when the expression is a binding form that
    /// produces none (`Definition`/`Selection`/`EvaluatingDefinition`/
    /// `EvaluatingSelection`). `Reference` and `Draw` always return
    /// `Some`, defaulting to the empty string when the name is undefined or
    /// drained — see `DESIGN.md`'s empty-vs-absent note.
    pub fn eval(&mut self, expr: &Expr, env: &mut Environment) -> Option<String> {
        match expr {
            Expr::Literal(text) => Some(text.clone()),

            Expr::Mix(left, right) => {
                let left_value = self.eval(left, env).unwrap_or_default();
                let right_value = self.eval(right, env).unwrap_or_default();
                Some(format!("{left_value}{right_value}"))
            }

            Expr::Definition { name, items } => {
                trace!("definition {name} := {} item(s)", items.len());
                env.bind(name.clone(), items.clone());
                None
            }

            Expr::Selection { name, items } => {
                if items.is_empty() {
                    return None;
                }
                let chosen = items[self.rng.uniform_index(items.len())].clone();
                trace!("selection {name} <- {chosen}");
                env.bind(name.clone(), vec![chosen]);
                None
            }

            Expr::EvaluatingDefinition { name, items } => {
                let mut evaluated = Vec::with_capacity(items.len());
                for item in items {
                    if let Some(value) = self.eval(item, env) {
                        evaluated.push(Expr::literal(value));
                    }
                }
                trace!("evaluating definition {name} := {} item(s)", evaluated.len());
                env.bind(name.clone(), evaluated);
                None
            }

            Expr::EvaluatingSelection { name, items } => {
                if items.is_empty() {
                    return None;
                }
                let chosen = items[self.rng.uniform_index(items.len())].clone();
                let value = self.eval(&chosen, env).unwrap_or_default();
                trace!("evaluating selection {name} <! {value:?}");
                env.bind(name.clone(), vec![Expr::literal(value)]);
                None
            }

            Expr::Reference(inner) => {
                let name = self.eval(inner, env).unwrap_or_default();
                Some(self.sample(&name, env, false))
            }

            Expr::Draw(inner) => {
                let name = self.eval(inner, env).unwrap_or_default();
                Some(self.sample(&name, env, true))
            }
        }
    }

    /// Shared implementation of `Reference`/`Draw`: pick one alternative
    /// uniformly from `name`'s list, optionally removing it, and evaluate
    /// the chosen alternative. Returns the empty string when `name` is
    /// unbound or bound to an empty list.
    fn sample(&mut self, name: &str, env: &mut Environment, destructive: bool) -> String {
        let items = match env.get(name) {
            Some(items) if !items.is_empty() => items.to_vec(),
            _ => return String::new(),
        };

        let chosen = items[self.rng.uniform_index(items.len())].clone();
        if destructive {
            env.remove_one(name, &chosen);
        }
        self.eval(&chosen, env).unwrap_or_default()
    }
}
