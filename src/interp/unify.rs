//! First-order unification with occurs-check, used by strict mode.

use crate::atom::Atom;
use crate::interp::bindings::Bindings;

/// Why two atoms failed to unify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifyFailure {
    /// Variable occurs inside the term it would be bound to.
    OccursCheck { variable: String, term: Atom },
    /// Expressions of different length.
    ArityMismatch(usize, usize),
    /// Distinct symbols, or a symbol against an expression.
    Clash(Atom, Atom),
}

/// Unify `a` and `b` on top of `bindings`, returning the extended substitution.
///
/// Expressions unify child by child and must have equal length; a variable
/// unifies with any term it does not occur in, including another variable.
pub fn unify_strict(a: &Atom, b: &Atom, bindings: &Bindings) -> Result<Bindings, UnifyFailure> {
    let mut subst = bindings.clone();
    unify_into(a, b, &mut subst)?;
    Ok(subst)
}

fn unify_into(a: &Atom, b: &Atom, subst: &mut Bindings) -> Result<(), UnifyFailure> {
    let a = subst.resolve(a);
    let b = subst.resolve(b);

    match (&a, &b) {
        _ if a == b => Ok(()),

        (Atom::Variable(v), t) | (t, Atom::Variable(v)) => {
            if t.contains_variable(v) {
                return Err(UnifyFailure::OccursCheck {
                    variable: v.clone(),
                    term: t.clone(),
                });
            }
            subst.insert_normalized(v, t.clone());
            Ok(())
        }

        (Atom::Expression(xs), Atom::Expression(ys)) => {
            if xs.len() != ys.len() {
                return Err(UnifyFailure::ArityMismatch(xs.len(), ys.len()));
            }
            for (x, y) in xs.iter().zip(ys) {
                unify_into(x, y, subst)?;
            }
            Ok(())
        }

        _ => Err(UnifyFailure::Clash(a.clone(), b.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::parse;

    fn unify(a: &str, b: &str) -> Result<Bindings, UnifyFailure> {
        unify_strict(&parse(a).unwrap(), &parse(b).unwrap(), &Bindings::new())
    }

    #[test]
    fn binds_nested_variables() {
        let s = unify("(f $x (g $y))", "(f a (g b))").unwrap();
        assert_eq!(s.get("x"), Some(&Atom::sym("a")));
        assert_eq!(s.get("y"), Some(&Atom::sym("b")));
    }

    #[test]
    fn variables_unify_with_each_other() {
        let s = unify("(f $x $x)", "(f $y a)").unwrap();
        assert_eq!(s.resolve(&Atom::var("x")), Atom::sym("a"));
        assert_eq!(s.resolve(&Atom::var("y")), Atom::sym("a"));
    }

    #[test]
    fn occurs_check_fails() {
        assert!(matches!(
            unify("$x", "(f $x)"),
            Err(UnifyFailure::OccursCheck { .. })
        ));
    }

    #[test]
    fn arity_and_symbol_clashes() {
        assert_eq!(unify("(f a)", "(f a b)"), Err(UnifyFailure::ArityMismatch(2, 3)));
        assert!(matches!(unify("(f a)", "(f b)"), Err(UnifyFailure::Clash(..))));
        assert!(matches!(unify("a", "(a)"), Err(UnifyFailure::Clash(..))));
    }

    #[test]
    fn respects_incoming_bindings() {
        let incoming = Bindings::new().with("x", Atom::sym("a"));
        let a = parse("(f $x)").unwrap();
        assert!(unify_strict(&a, &parse("(f b)").unwrap(), &incoming).is_err());
        assert!(unify_strict(&a, &parse("(f a)").unwrap(), &incoming).is_ok());
    }

    #[test]
    fn unifier_makes_terms_equal() {
        let a = parse("(pair $x (h $z))").unwrap();
        let b = parse("(pair (g $y) (h c))").unwrap();
        let s = unify_strict(&a, &b, &Bindings::new()).unwrap();
        assert_eq!(s.resolve(&a), s.resolve(&b));
    }
}
