//! Variable bindings threaded explicitly through `unify` and `chain`.
//!
//! A [`Bindings`] value maps variable names to atoms. It is extended by
//! returning a new value rather than mutated in place, so every call tree owns
//! its own substitution and nothing leaks between unrelated queries.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::atom::Atom;

/// A substitution from variable name to atom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings {
    map: BTreeMap<String, Atom>,
}

impl Bindings {
    /// An empty substitution.
    pub fn new() -> Self {
        Self::default()
    }

    /// The atom bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Atom> {
        self.map.get(name)
    }

    /// A copy of `self` with `name` bound to `atom`, replacing any prior binding.
    pub fn with(&self, name: impl Into<String>, atom: Atom) -> Self {
        let mut next = self.clone();
        next.map.insert(name.into(), atom);
        next
    }

    /// Bind `name` to `atom` and propagate: `atom` is resolved against the
    /// existing bindings first, then every existing binding is rewritten with
    /// the new one, keeping the substitution idempotent.
    pub(crate) fn insert_normalized(&mut self, name: &str, atom: Atom) {
        let atom = self.apply(&atom);
        let single = Bindings::new().with(name, atom.clone());
        for value in self.map.values_mut() {
            *value = single.apply(value);
        }
        self.map.insert(name.to_string(), atom);
    }

    /// Replace every bound variable in `atom` with its binding, in one pass.
    ///
    /// Unbound variables pass through unchanged. Bound values are inserted as
    /// stored; variables inside them are not substituted again.
    pub fn apply(&self, atom: &Atom) -> Atom {
        match atom {
            Atom::Variable(name) => self.map.get(name).cloned().unwrap_or_else(|| atom.clone()),
            Atom::Symbol(_) => atom.clone(),
            Atom::Expression(children) => {
                Atom::Expression(children.iter().map(|c| self.apply(c)).collect())
            }
        }
    }

    /// Substitute until no bound variable remains. Stops on cyclic bindings
    /// after one pass per binding.
    pub fn resolve(&self, atom: &Atom) -> Atom {
        let mut current = self.apply(atom);
        for _ in 0..self.map.len() {
            let next = self.apply(&current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Atom)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, atom)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "${name} -> {atom}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::parse;

    #[test]
    fn with_returns_extended_copy() {
        let empty = Bindings::new();
        let one = empty.with("x", Atom::sym("3"));
        assert!(empty.is_empty());
        assert_eq!(one.get("x"), Some(&Atom::sym("3")));
        let overwritten = one.with("x", Atom::sym("4"));
        assert_eq!(overwritten.get("x"), Some(&Atom::sym("4")));
        assert_eq!(overwritten.len(), 1);
    }

    #[test]
    fn apply_rewrites_nested_variables() {
        let b = Bindings::new().with("x", Atom::sym("3"));
        let atom = parse("(eval (+ $x $y))").unwrap();
        assert_eq!(b.apply(&atom), parse("(eval (+ 3 $y))").unwrap());
    }

    #[test]
    fn apply_is_single_pass() {
        let b = Bindings::new()
            .with("x", Atom::var("y"))
            .with("y", Atom::sym("1"));
        assert_eq!(b.apply(&Atom::var("x")), Atom::var("y"));
        assert_eq!(b.resolve(&Atom::var("x")), Atom::sym("1"));
    }

    #[test]
    fn resolve_terminates_on_cycles() {
        let b = Bindings::new()
            .with("x", Atom::var("y"))
            .with("y", Atom::var("x"));
        let out = b.resolve(&Atom::var("x"));
        assert!(out.is_variable());
    }

    #[test]
    fn insert_normalized_propagates() {
        let mut b = Bindings::new();
        b.insert_normalized("x", parse("(f $y)").unwrap());
        b.insert_normalized("y", Atom::sym("a"));
        assert_eq!(b.get("x"), Some(&parse("(f a)").unwrap()));
        assert_eq!(b.get("y"), Some(&Atom::sym("a")));
    }

    #[test]
    fn display_lists_bindings() {
        let b = Bindings::new().with("x", Atom::sym("3"));
        assert_eq!(b.to_string(), "{$x -> 3}");
    }
}
