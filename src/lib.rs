// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # minimetta
//!
//! A minimal symbolic term-rewriting engine: atoms, an ordered store of
//! equality rules, and an interpreter for three primitive instructions.
//!
//! ## Architecture
//!
//! - **Atoms** (`atom`): symbols, variables and expressions with structural equality
//! - **Knowledge base** (`space`): append-only `(= pattern body)` rules, first match wins
//! - **Interpreter** (`interp`): `eval`, `unify` and `chain`, with grounded `+ - < ==`
//! - **Reader** (`reader`): s-expression text to atoms, for the CLI and seed packs
//! - **Seed packs** (`seeds`): TOML bundles of rules
//!
//! ## Library usage
//!
//! ```
//! use minimetta::atom::Atom;
//! use minimetta::interp::Interpreter;
//! use minimetta::reader::parse;
//! use minimetta::space::KnowledgeBase;
//!
//! let mut kb = KnowledgeBase::new();
//! kb.add_rule(&parse("(= (allocation_weight CRITICAL) 0.40)").unwrap());
//!
//! let interp = Interpreter::new(&kb);
//! let weight = interp.evaluate(&parse("(allocation_weight CRITICAL)").unwrap());
//! assert_eq!(weight, Atom::sym("0.40"));
//!
//! let x = interp
//!     .chain(
//!         &parse("(eval (+ 1 2))").unwrap(),
//!         &Atom::var("x"),
//!         &parse("(eval (+ $x 1))").unwrap(),
//!     )
//!     .unwrap();
//! assert_eq!(x, Atom::sym("4"));
//! ```

pub mod atom;
pub mod config;
pub mod error;
pub mod interp;
pub mod reader;
pub mod seeds;
pub mod space;
