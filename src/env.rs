use crate::ast::Expr;
use std::collections::HashMap;

/// The persistent binding environment threaded through evaluation.
///
/// An absent key is distinct from a key bound to an empty list: the latter
/// is never observable from outside this type — [`Environment::bind`] and
/// [`Environment::remove_one`] both remove the key the moment its list would
/// become empty, so callers never see `Some(&[])`.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: HashMap<String, Vec<Expr>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&[Expr]> {
        self.bindings.get(name).map(Vec::as_slice)
    }

    /// Bind `name` to `items`, verbatim. Binding to an empty list removes
    /// the key instead of storing an empty `Vec`, preserving the invariant
    /// that no key ever maps to `[]`.
    pub fn bind(&mut self, name: impl Into<String>, items: Vec<Expr>) {
        let name = name.into();
        if items.is_empty() {
            self.bindings.remove(&name);
        } else {
            self.bindings.insert(name, items);
        }
    }

    /// Remove the first item structurally equal to `item` from `name`'s
    /// list. Removes the key entirely if the list becomes empty. Used by
    /// `Draw` to implement destructive sampling.
    pub fn remove_one(&mut self, name: &str, item: &Expr) {
        if let Some(items) = self.bindings.get_mut(name) {
            if let Some(index) = items.iter().position(|candidate| candidate == item) {
                items.remove(index);
            }
            if items.is_empty() {
                self.bindings.remove(name);
            }
        }
    }

    /// Snapshot of the currently bound names, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.bindings.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_empty_list_removes_key() {
        let mut env = Environment::new();
        env.bind("x", vec![Expr::literal("a")]);
        env.bind("x", vec![]);
        assert!(env.get("x").is_none());
    }

    #[test]
    fn remove_one_drains_to_absent_key() {
        let mut env = Environment::new();
        let item = Expr::literal("a");
        env.bind("x", vec![item.clone()]);
        env.remove_one("x", &item);
        assert!(env.get("x").is_none());
    }

    #[test]
    fn remove_one_leaves_other_items() {
        let mut env = Environment::new();
        let a = Expr::literal("a");
        let b = Expr::literal("b");
        env.bind("x", vec![a.clone(), b.clone()]);
        env.remove_one("x", &a);
        assert_eq!(env.get("x"), Some(&[b][..]));
    }

    #[test]
    fn definition_stores_items_verbatim() {
        let mut env = Environment::new();
        let items = vec![Expr::literal("a"), Expr::literal("b")];
        env.bind("x", items.clone());
        assert_eq!(env.get("x"), Some(items.as_slice()));
    }
}
