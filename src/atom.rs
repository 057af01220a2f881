//! Atom model: the universal term type of the engine.
//!
//! Every fact, rule, query and result is an [`Atom`]: a named [`Atom::Symbol`],
//! a logic [`Atom::Variable`], or an ordered [`Atom::Expression`] that owns its
//! children by value. Equality and hashing are structural, so atoms can be used
//! as map keys and compared directly.
//!
//! A handful of reserved symbol names act as control signals rather than
//! domain data; see [`NOT_REDUCIBLE`], [`EMPTY`], [`TRUE`] and [`FALSE`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the "no answer" sentinel produced by every evaluation miss.
pub const NOT_REDUCIBLE: &str = "NotReducible";
/// Name of the empty-result sentinel.
pub const EMPTY: &str = "Empty";
/// Name of the boolean true sentinel returned by grounded comparisons.
pub const TRUE: &str = "True";
/// Name of the boolean false sentinel returned by grounded comparisons.
pub const FALSE: &str = "False";
/// Head symbol of an equality rule `(= pattern body)`.
pub const EQUALITY: &str = "=";

/// Printed prefix of variables. Display-only; not part of the stored name.
pub const VARIABLE_PREFIX: char = '$';

/// A term: symbol, variable, or expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Atom {
    /// A named constant, function name, or number stored as text.
    Symbol(String),
    /// A logic placeholder. The name is stored without the `$` prefix.
    Variable(String),
    /// An ordered sequence of child atoms.
    Expression(Vec<Atom>),
}

impl Atom {
    /// Create a symbol.
    pub fn sym(name: impl Into<String>) -> Self {
        Atom::Symbol(name.into())
    }

    /// Create a variable. A leading `$` is accepted and stripped, so
    /// `Atom::var("$x") == Atom::var("x")`.
    pub fn var(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.strip_prefix(VARIABLE_PREFIX) {
            Some(stripped) => Atom::Variable(stripped.to_string()),
            None => Atom::Variable(name),
        }
    }

    /// Create an expression from an ordered sequence of children.
    pub fn expr(children: impl IntoIterator<Item = Atom>) -> Self {
        Atom::Expression(children.into_iter().collect())
    }

    /// The `NotReducible` sentinel.
    pub fn not_reducible() -> Self {
        Atom::sym(NOT_REDUCIBLE)
    }

    /// The `Empty` sentinel.
    pub fn empty() -> Self {
        Atom::sym(EMPTY)
    }

    /// The `True` sentinel.
    pub fn true_atom() -> Self {
        Atom::sym(TRUE)
    }

    /// The `False` sentinel.
    pub fn false_atom() -> Self {
        Atom::sym(FALSE)
    }

    /// Map a boolean onto the `True` / `False` sentinels.
    pub fn from_bool(value: bool) -> Self {
        if value {
            Atom::true_atom()
        } else {
            Atom::false_atom()
        }
    }

    pub fn is_expression(&self) -> bool {
        matches!(self, Atom::Expression(_))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Atom::Symbol(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Atom::Variable(_))
    }

    /// Whether this is the `NotReducible` sentinel.
    pub fn is_not_reducible(&self) -> bool {
        self.is_symbol_named(NOT_REDUCIBLE)
    }

    /// Whether this is a symbol with exactly the given name.
    pub fn is_symbol_named(&self, name: &str) -> bool {
        matches!(self, Atom::Symbol(s) if s == name)
    }

    /// Name of a symbol or variable; `None` for expressions.
    pub fn name(&self) -> Option<&str> {
        match self {
            Atom::Symbol(name) | Atom::Variable(name) => Some(name),
            Atom::Expression(_) => None,
        }
    }

    /// Children of an expression; `None` for symbols and variables.
    pub fn children(&self) -> Option<&[Atom]> {
        match self {
            Atom::Expression(children) => Some(children),
            _ => None,
        }
    }

    /// First child of a non-empty expression.
    ///
    /// Returns `None` for symbols, variables, and the empty expression.
    pub fn head(&self) -> Option<&Atom> {
        self.children().and_then(|c| c.first())
    }

    /// Children after the head of a non-empty expression.
    ///
    /// Returns `None` for symbols, variables, and the empty expression; a
    /// one-element expression has an empty tail.
    pub fn tail(&self) -> Option<&[Atom]> {
        self.children().and_then(|c| c.split_first()).map(|(_, rest)| rest)
    }

    /// Whether a variable occurs anywhere inside this atom.
    pub fn contains_variable(&self, name: &str) -> bool {
        match self {
            Atom::Variable(v) => v == name,
            Atom::Symbol(_) => false,
            Atom::Expression(children) => children.iter().any(|c| c.contains_variable(name)),
        }
    }

}

impl FromIterator<Atom> for Atom {
    fn from_iter<I: IntoIterator<Item = Atom>>(iter: I) -> Self {
        Atom::expr(iter)
    }
}

/// Parenthesized, space-joined rendering for logs and the CLI.
impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Symbol(name) => f.write_str(name),
            Atom::Variable(name) => write!(f, "{VARIABLE_PREFIX}{name}"),
            Atom::Expression(children) => {
                f.write_str("(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(atom: &Atom) -> u64 {
        let mut h = DefaultHasher::new();
        atom.hash(&mut h);
        h.finish()
    }

    #[test]
    fn variant_matters_for_equality() {
        assert_ne!(Atom::sym("x"), Atom::var("x"));
        assert_ne!(Atom::sym("x"), Atom::expr([Atom::sym("x")]));
    }

    #[test]
    fn expression_equality_is_order_and_length_sensitive() {
        let ab = Atom::expr([Atom::sym("a"), Atom::sym("b")]);
        let ba = Atom::expr([Atom::sym("b"), Atom::sym("a")]);
        let abc = Atom::expr([Atom::sym("a"), Atom::sym("b"), Atom::sym("c")]);
        assert_ne!(ab, ba);
        assert_ne!(ab, abc);
        assert_eq!(ab, Atom::expr([Atom::sym("a"), Atom::sym("b")]));
    }

    #[test]
    fn equal_atoms_hash_equal() {
        let a = Atom::expr([Atom::sym("+"), Atom::var("x"), Atom::sym("1")]);
        let b = Atom::expr([Atom::sym("+"), Atom::var("$x"), Atom::sym("1")]);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn variable_prefix_is_stripped() {
        assert_eq!(Atom::var("$data"), Atom::Variable("data".into()));
        assert_eq!(Atom::var("$data").name(), Some("data"));
    }

    #[test]
    fn head_and_tail_of_empty_expression_are_none() {
        let empty = Atom::expr([]);
        assert!(empty.head().is_none());
        assert!(empty.tail().is_none());
        assert!(Atom::sym("a").head().is_none());
        assert!(Atom::var("a").tail().is_none());
    }

    #[test]
    fn head_and_tail_of_expression() {
        let e = Atom::expr([Atom::sym("f"), Atom::sym("a"), Atom::sym("b")]);
        assert_eq!(e.head(), Some(&Atom::sym("f")));
        assert_eq!(e.tail(), Some(&[Atom::sym("a"), Atom::sym("b")][..]));

        let single = Atom::expr([Atom::sym("f")]);
        assert_eq!(single.tail(), Some(&[] as &[Atom]));
    }

    #[test]
    fn sentinels_are_plain_symbols() {
        assert_eq!(Atom::not_reducible(), Atom::sym("NotReducible"));
        assert!(Atom::not_reducible().is_not_reducible());
        assert_eq!(Atom::empty(), Atom::sym("Empty"));
        assert_eq!(Atom::from_bool(true), Atom::sym("True"));
        assert_eq!(Atom::from_bool(false), Atom::false_atom());
        assert!(!Atom::sym("RegionA").is_not_reducible());
    }

    #[test]
    fn display_renders_sexpr() {
        let e = Atom::expr([
            Atom::sym("eval"),
            Atom::expr([Atom::sym("+"), Atom::var("x"), Atom::sym("1")]),
        ]);
        assert_eq!(e.to_string(), "(eval (+ $x 1))");
        assert_eq!(Atom::expr([]).to_string(), "()");
    }

    #[test]
    fn contains_variable_searches_nested() {
        let e = Atom::expr([
            Atom::var("y"),
            Atom::expr([Atom::var("x"), Atom::var("y")]),
        ]);
        assert!(e.contains_variable("x"));
        assert!(!e.contains_variable("z"));
    }

    #[test]
    fn collect_into_expression() {
        let e: Atom = ["a", "b"].into_iter().map(Atom::sym).collect();
        assert_eq!(e, Atom::expr([Atom::sym("a"), Atom::sym("b")]));
    }
}
