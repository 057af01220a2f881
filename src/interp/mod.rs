//! The interpreter: `eval`, `unify` and `chain` over a knowledge base.
//!
//! - [`Interpreter::evaluate`] performs one reduction step: a grounded function
//!   call when the expression head names one, otherwise a knowledge-base lookup.
//! - [`Interpreter::unify`] matches two atoms and picks one of two branch atoms.
//! - [`Interpreter::chain`] executes an instruction, binds its result to a
//!   variable, substitutes it into a continuation and reduces that.
//!
//! Bindings are never stored on the interpreter. `unify_with` and `chain_with`
//! take the incoming [`Bindings`] and return the extended set in an
//! [`Outcome`], so one interpreter can serve any number of independent queries.

pub mod bindings;
pub mod grounded;
pub mod unify;

use crate::atom::Atom;
use crate::config::{InterpreterConfig, UnifyMode};
use crate::error::{AtomError, GroundedError, MettaResult};
use crate::space::KnowledgeBase;

use self::bindings::Bindings;
use self::grounded::{GroundedFn, GroundedTable};
use self::unify::unify_strict;

/// Instruction name of `(eval ARG)`.
pub const EVAL: &str = "eval";
/// Instruction name of `(unify A B ON-SUCCESS ON-FAILURE)`.
pub const UNIFY: &str = "unify";
/// Instruction name of `(chain INSTRUCTION $VAR CONTINUATION)`.
pub const CHAIN: &str = "chain";

/// A result atom together with the bindings in force when it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub atom: Atom,
    pub bindings: Bindings,
}

impl Outcome {
    fn new(atom: Atom, bindings: Bindings) -> Self {
        Self { atom, bindings }
    }
}

/// Evaluator for the three primitive instructions.
#[derive(Debug)]
pub struct Interpreter<'kb> {
    space: &'kb KnowledgeBase,
    grounded: GroundedTable,
    config: InterpreterConfig,
}

impl<'kb> Interpreter<'kb> {
    /// Interpreter with the built-in grounded functions and default configuration.
    pub fn new(space: &'kb KnowledgeBase) -> Self {
        Self {
            space,
            grounded: GroundedTable::with_builtins(),
            config: InterpreterConfig::default(),
        }
    }

    /// Interpreter with an explicit configuration.
    pub fn with_config(space: &'kb KnowledgeBase, config: InterpreterConfig) -> MettaResult<Self> {
        config.validate()?;
        tracing::debug!(
            mode = %config.unify_mode,
            max_chain_depth = config.max_chain_depth,
            rules = space.len(),
            "interpreter configured"
        );
        Ok(Self {
            space,
            grounded: GroundedTable::with_builtins(),
            config,
        })
    }

    /// Add a grounded function next to the built-ins.
    pub fn register_grounded(&mut self, f: Box<dyn GroundedFn>) -> Result<(), GroundedError> {
        self.grounded.register(f)
    }

    pub fn space(&self) -> &KnowledgeBase {
        self.space
    }

    pub fn grounded(&self) -> &GroundedTable {
        &self.grounded
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // eval
    // -----------------------------------------------------------------------

    /// Reduce `atom` by one step.
    ///
    /// The empty expression is `NotReducible`. A non-empty expression whose
    /// head names a grounded function is applied to its tail; every other atom
    /// is looked up in the knowledge base. The result is not reduced further.
    pub fn evaluate(&self, atom: &Atom) -> Atom {
        let result = match atom {
            Atom::Expression(children) => match children.split_first() {
                None => Atom::not_reducible(),
                Some((head, args)) => match self.grounded.lookup(head) {
                    Some(f) => f.apply(args),
                    None => self.lookup(atom),
                },
            },
            Atom::Symbol(_) | Atom::Variable(_) => self.lookup(atom),
        };
        tracing::debug!(%atom, %result, "evaluate");
        result
    }

    fn lookup(&self, pattern: &Atom) -> Atom {
        match self.config.unify_mode {
            UnifyMode::Shallow => self.space.query(pattern),
            UnifyMode::Strict => self.space.query_strict(pattern),
        }
    }

    // -----------------------------------------------------------------------
    // unify
    // -----------------------------------------------------------------------

    /// Match `a` against `b` starting from empty bindings and return the
    /// chosen branch atom.
    pub fn unify(&self, a: &Atom, b: &Atom, on_success: &Atom, on_failure: &Atom) -> Atom {
        self.unify_with(a, b, on_success, on_failure, &Bindings::new())
            .atom
    }

    /// Match `a` against `b` on top of `bindings`.
    ///
    /// In shallow mode: equal atoms succeed; two expressions with equal heads
    /// succeed without binding anything; a variable `a` is bound to `b`;
    /// everything else fails. In strict mode the atoms are fully unified.
    pub fn unify_with(
        &self,
        a: &Atom,
        b: &Atom,
        on_success: &Atom,
        on_failure: &Atom,
        bindings: &Bindings,
    ) -> Outcome {
        let matched = match self.config.unify_mode {
            UnifyMode::Shallow => shallow_unify(a, b, bindings),
            UnifyMode::Strict => match unify_strict(a, b, bindings) {
                Ok(unifier) => Some(unifier),
                Err(failure) => {
                    tracing::trace!(?failure, "strict unification failed");
                    None
                }
            },
        };
        tracing::debug!(%a, %b, success = matched.is_some(), "unify");
        match matched {
            Some(extended) => Outcome::new(on_success.clone(), extended),
            None => Outcome::new(on_failure.clone(), bindings.clone()),
        }
    }

    // -----------------------------------------------------------------------
    // chain
    // -----------------------------------------------------------------------

    /// Execute `instruction`, bind the result to `variable`, substitute into
    /// `continuation` and reduce it, starting from empty bindings.
    ///
    /// Fails only when `variable` is not a variable.
    pub fn chain(&self, instruction: &Atom, variable: &Atom, continuation: &Atom) -> MettaResult<Atom> {
        Ok(self
            .chain_with(instruction, variable, continuation, &Bindings::new())?
            .atom)
    }

    /// [`chain`](Self::chain) on top of `bindings`, returning the final bindings too.
    pub fn chain_with(
        &self,
        instruction: &Atom,
        variable: &Atom,
        continuation: &Atom,
        bindings: &Bindings,
    ) -> MettaResult<Outcome> {
        self.chain_at(instruction, variable, continuation, bindings, 1)
    }

    fn chain_at(
        &self,
        instruction: &Atom,
        variable: &Atom,
        continuation: &Atom,
        bindings: &Bindings,
        depth: usize,
    ) -> MettaResult<Outcome> {
        let Atom::Variable(name) = variable else {
            return Err(AtomError::NotAVariable {
                found: variable.to_string(),
            }
            .into());
        };

        if depth > self.config.max_chain_depth {
            tracing::warn!(
                max_chain_depth = self.config.max_chain_depth,
                %instruction,
                "chain depth exhausted"
            );
            return Ok(Outcome::new(Atom::not_reducible(), bindings.clone()));
        }

        let executed = self.execute(instruction, bindings);
        let bindings = executed.bindings.with(name.clone(), executed.atom);
        let substituted = bindings.apply(continuation);
        tracing::debug!(depth, %instruction, var = %variable, %substituted, "chain");

        let Some((head, args)) = substituted.children().and_then(|c| c.split_first()) else {
            return Ok(Outcome::new(substituted, bindings));
        };
        if head.is_symbol_named(EVAL) {
            let atom = match args.first() {
                Some(arg) => self.evaluate(arg),
                None => Atom::not_reducible(),
            };
            return Ok(Outcome::new(atom, bindings));
        }
        if head.is_symbol_named(CHAIN) {
            return match args {
                [next, var, cont] => self.chain_at(next, var, cont, &bindings, depth + 1),
                _ => Ok(Outcome::new(Atom::not_reducible(), bindings)),
            };
        }
        Ok(Outcome::new(substituted, bindings))
    }

    /// Run one instruction atom as the first step of `chain` does.
    ///
    /// `(eval X)` evaluates `X`, `(unify A B S F)` unifies, the empty
    /// expression is `NotReducible`, and anything else is returned unevaluated.
    pub fn execute(&self, instruction: &Atom, bindings: &Bindings) -> Outcome {
        let Some(children) = instruction.children() else {
            return Outcome::new(instruction.clone(), bindings.clone());
        };
        match children {
            [] => Outcome::new(Atom::not_reducible(), bindings.clone()),
            [head, arg, ..] if head.is_symbol_named(EVAL) => {
                Outcome::new(self.evaluate(arg), bindings.clone())
            }
            [head, a, b, on_success, on_failure, ..] if head.is_symbol_named(UNIFY) => {
                self.unify_with(a, b, on_success, on_failure, bindings)
            }
            _ => Outcome::new(instruction.clone(), bindings.clone()),
        }
    }

    /// Run a top-level instruction: `(chain I $v C)` is chained, everything
    /// else goes through [`execute`](Self::execute).
    pub fn run(&self, instruction: &Atom) -> MettaResult<Outcome> {
        match instruction.children() {
            Some([head, next, var, cont]) if head.is_symbol_named(CHAIN) => {
                self.chain_with(next, var, cont, &Bindings::new())
            }
            _ => Ok(self.execute(instruction, &Bindings::new())),
        }
    }
}

/// Shallow match: exact equality, equal expression heads, or a bindable
/// variable on the left. Returns the extended bindings on success.
fn shallow_unify(a: &Atom, b: &Atom, bindings: &Bindings) -> Option<Bindings> {
    if a == b {
        return Some(bindings.clone());
    }
    if a.is_expression() && b.is_expression() && a.head() == b.head() {
        return Some(bindings.clone());
    }
    if let Atom::Variable(name) = a {
        return Some(bindings.with(name.clone(), b.clone()));
    }
    None
}
