//! Knowledge base: an append-only, ordered store of equality rules.
//!
//! Only atoms of the shape `(= pattern body)` are accepted. Lookup scans in
//! insertion order and returns the body of the first matching rule, so the
//! order in which facts are loaded is part of their meaning.
//!
//! Two lookup disciplines are offered:
//!
//! - [`KnowledgeBase::query`]: head-only matching. Two expressions match when
//!   their first children are equal; anything else must be exactly equal. No
//!   bindings are extracted and the body is returned as stored.
//! - [`KnowledgeBase::query_strict`]: full unification of the query against the
//!   rule pattern, with the rule's variables renamed apart and the unifier
//!   applied to the returned body.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::atom::{Atom, EQUALITY};
use crate::interp::bindings::Bindings;
use crate::interp::unify::unify_strict;

/// A stored `(= pattern body)` rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EqualityRule {
    pub pattern: Atom,
    pub body: Atom,
}

impl EqualityRule {
    /// Split a `(= pattern body)` atom into a rule. `None` for any other shape.
    pub fn from_atom(atom: &Atom) -> Option<Self> {
        match atom.children() {
            Some([head, pattern, body]) if head.is_symbol_named(EQUALITY) => Some(Self {
                pattern: pattern.clone(),
                body: body.clone(),
            }),
            _ => None,
        }
    }

    /// Rebuild the `(= pattern body)` atom.
    pub fn to_atom(&self) -> Atom {
        Atom::expr([Atom::sym(EQUALITY), self.pattern.clone(), self.body.clone()])
    }

    /// Head-only match of this rule's pattern against a query.
    fn matches_shallow(&self, query: &Atom) -> bool {
        match (&self.pattern, query) {
            (Atom::Expression(_), Atom::Expression(_)) => self.pattern.head() == query.head(),
            _ => self.pattern == *query,
        }
    }
}

impl fmt::Display for EqualityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(= {} {})", self.pattern, self.body)
    }
}

/// Ordered store of equality rules.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    rules: Vec<EqualityRule>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `atom` if it is a `(= pattern body)` rule.
    ///
    /// Returns `false` and leaves the store unchanged for any other shape.
    pub fn add_rule(&mut self, atom: &Atom) -> bool {
        match EqualityRule::from_atom(atom) {
            Some(rule) => {
                tracing::trace!(%rule, index = self.rules.len(), "rule added");
                self.rules.push(rule);
                true
            }
            None => {
                tracing::debug!(%atom, "rejected non-equality atom");
                false
            }
        }
    }

    /// Body of the first rule whose pattern head-matches `pattern`, or
    /// `NotReducible` when none does.
    pub fn query(&self, pattern: &Atom) -> Atom {
        match self.rules.iter().position(|rule| rule.matches_shallow(pattern)) {
            Some(index) => {
                tracing::trace!(%pattern, index, "rule matched");
                self.rules[index].body.clone()
            }
            None => {
                tracing::trace!(%pattern, "no rule matched");
                Atom::not_reducible()
            }
        }
    }

    /// Body of the first rule whose pattern unifies with `pattern`, with the
    /// unifier applied, or `NotReducible` when none does.
    pub fn query_strict(&self, pattern: &Atom) -> Atom {
        for (index, rule) in self.rules.iter().enumerate() {
            let suffix = format!("r{index}");
            let renamed = rename_apart(&rule.pattern, &suffix);
            if let Ok(unifier) = unify_strict(&renamed, pattern, &Bindings::new()) {
                tracing::trace!(%pattern, index, "rule unified");
                let body = unifier.resolve(&rename_apart(&rule.body, &suffix));
                return restore_names(&body, &suffix);
            }
        }
        tracing::trace!(%pattern, "no rule unified");
        Atom::not_reducible()
    }

    /// Stored rules in insertion order.
    pub fn rules(&self) -> &[EqualityRule] {
        &self.rules
    }

    /// Number of stored rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Rename every variable in `atom` to `name#suffix` so rule variables cannot
/// collide with query variables.
fn rename_apart(atom: &Atom, suffix: &str) -> Atom {
    match atom {
        Atom::Variable(name) => Atom::Variable(format!("{name}#{suffix}")),
        Atom::Symbol(_) => atom.clone(),
        Atom::Expression(children) => {
            Atom::Expression(children.iter().map(|c| rename_apart(c, suffix)).collect())
        }
    }
}

/// Undo [`rename_apart`] on variables the unifier left unbound.
fn restore_names(atom: &Atom, suffix: &str) -> Atom {
    match atom {
        Atom::Variable(name) => match name.strip_suffix(suffix).and_then(|n| n.strip_suffix('#')) {
            Some(original) => Atom::Variable(original.to_string()),
            None => atom.clone(),
        },
        Atom::Symbol(_) => atom.clone(),
        Atom::Expression(children) => {
            Atom::Expression(children.iter().map(|c| restore_names(c, suffix)).collect())
        }
    }
}
