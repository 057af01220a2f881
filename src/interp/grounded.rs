//! Grounded functions: built-in operations resolved before knowledge-base lookup.
//!
//! A grounded function receives the tail of an expression whose head names it
//! and returns an atom. Every failure mode (wrong arity, a non-numeric
//! argument) is reported as `NotReducible`, never as an error.
//!
//! ## Built-ins
//!
//! - `+`, `-`: binary arithmetic on numeric symbols, result as a numeric symbol
//! - `<`, `==`: binary comparison, result `True` / `False`

use std::collections::HashMap;
use std::fmt;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::atom::Atom;
use crate::error::GroundedError;

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// A number read from symbol text.
///
/// Text containing a `.` is read as a float, anything else as an
/// arbitrary-precision integer.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(BigInt),
    Float(f64),
}

impl Number {
    /// Read a number from a symbol. Variables and expressions are never numbers.
    pub fn from_atom(atom: &Atom) -> Option<Self> {
        match atom {
            Atom::Symbol(text) => Self::parse(text),
            _ => None,
        }
    }

    /// Read a number from text.
    pub fn parse(text: &str) -> Option<Self> {
        if text.contains('.') {
            text.parse::<f64>().ok().map(Number::Float)
        } else {
            text.parse::<BigInt>().ok().map(Number::Int)
        }
    }

    /// The value as a float. `None` for integers too large to convert.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Number::Int(i) => i.to_f64().filter(|f| f.is_finite()),
            Number::Float(f) => Some(*f),
        }
    }

    /// The number as a symbol atom.
    pub fn to_atom(&self) -> Atom {
        Atom::sym(self.to_string())
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(BigInt::from(value))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            // Debug keeps the fractional part ("5.0"), so the text reads back as a float.
            Number::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// Read exactly two numeric arguments.
fn binary_args(args: &[Atom]) -> Option<(Number, Number)> {
    match args {
        [a, b] => Some((Number::from_atom(a)?, Number::from_atom(b)?)),
        _ => None,
    }
}

/// Both operands as floats, for mixed int/float operations.
fn float_pair(a: &Number, b: &Number) -> Option<(f64, f64)> {
    Some((a.as_f64()?, b.as_f64()?))
}

// ---------------------------------------------------------------------------
// Core trait
// ---------------------------------------------------------------------------

/// A built-in operation invoked by name from an expression head.
pub trait GroundedFn: Send + Sync + fmt::Debug {
    /// Symbol name that invokes this function.
    fn name(&self) -> &str;

    /// Apply to the expression's tail. Returns `NotReducible` on any failure.
    fn apply(&self, args: &[Atom]) -> Atom;
}

// ---------------------------------------------------------------------------
// Built-in: arithmetic
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
}

/// Binary arithmetic. Integer operands stay exact integers; any float
/// operand promotes both. An integer too large for a float cannot be mixed
/// with one and gives `NotReducible`.
#[derive(Debug, Clone, Copy)]
pub struct Arithmetic {
    pub op: ArithOp,
}

impl Arithmetic {
    fn compute(&self, a: &Number, b: &Number) -> Option<Number> {
        match (a, b) {
            (Number::Int(x), Number::Int(y)) => Some(Number::Int(match self.op {
                ArithOp::Add => x + y,
                ArithOp::Sub => x - y,
            })),
            _ => {
                let (x, y) = float_pair(a, b)?;
                Some(Number::Float(match self.op {
                    ArithOp::Add => x + y,
                    ArithOp::Sub => x - y,
                }))
            }
        }
    }
}

impl GroundedFn for Arithmetic {
    fn name(&self) -> &str {
        match self.op {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
        }
    }

    fn apply(&self, args: &[Atom]) -> Atom {
        binary_args(args)
            .and_then(|(a, b)| self.compute(&a, &b))
            .map_or_else(Atom::not_reducible, |n| n.to_atom())
    }
}

// ---------------------------------------------------------------------------
// Built-in: comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Lt,
    Eq,
}

/// Binary numeric comparison returning `True` / `False`.
#[derive(Debug, Clone, Copy)]
pub struct Comparison {
    pub op: CmpOp,
}

impl Comparison {
    fn compare(&self, a: &Number, b: &Number) -> Option<bool> {
        match (a, b) {
            (Number::Int(x), Number::Int(y)) => Some(match self.op {
                CmpOp::Lt => x < y,
                CmpOp::Eq => x == y,
            }),
            _ => {
                let (x, y) = float_pair(a, b)?;
                Some(match self.op {
                    CmpOp::Lt => x < y,
                    CmpOp::Eq => x == y,
                })
            }
        }
    }
}

impl GroundedFn for Comparison {
    fn name(&self) -> &str {
        match self.op {
            CmpOp::Lt => "<",
            CmpOp::Eq => "==",
        }
    }

    fn apply(&self, args: &[Atom]) -> Atom {
        binary_args(args)
            .and_then(|(a, b)| self.compare(&a, &b))
            .map_or_else(Atom::not_reducible, Atom::from_bool)
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Table of grounded functions, looked up by head symbol.
#[derive(Debug, Default)]
pub struct GroundedTable {
    fns: Vec<Box<dyn GroundedFn>>,
    /// Index: function name → position in the fns vec.
    name_index: HashMap<String, usize>,
}

impl GroundedTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding `+`, `-`, `<` and `==`.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        let builtins: [Box<dyn GroundedFn>; 4] = [
            Box::new(Arithmetic { op: ArithOp::Add }),
            Box::new(Arithmetic { op: ArithOp::Sub }),
            Box::new(Comparison { op: CmpOp::Lt }),
            Box::new(Comparison { op: CmpOp::Eq }),
        ];
        for f in builtins {
            let name = f.name().to_string();
            table.name_index.insert(name, table.fns.len());
            table.fns.push(f);
        }
        table
    }

    /// Register an additional grounded function.
    pub fn register(&mut self, f: Box<dyn GroundedFn>) -> Result<(), GroundedError> {
        let name = f.name().to_string();
        if self.name_index.contains_key(&name) {
            return Err(GroundedError::Duplicate { name });
        }
        self.name_index.insert(name, self.fns.len());
        self.fns.push(f);
        Ok(())
    }

    /// The function named by `head`, if `head` is a symbol naming one.
    pub fn lookup(&self, head: &Atom) -> Option<&dyn GroundedFn> {
        let Atom::Symbol(name) = head else {
            return None;
        };
        self.name_index.get(name).map(|&idx| self.fns[idx].as_ref())
    }

    /// Registered function names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.fns.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.fns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fns.is_empty()
    }
}
