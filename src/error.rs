//! Rich diagnostic error types for the minimetta engine.
//!
//! Evaluation misses are never errors: they are reported through the
//! `NotReducible` sentinel atom. The types here cover the remaining failure
//! classes: contract violations by the caller, and I/O or parse failures in
//! the layers that feed the engine (reader, configuration, seed packs).

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the minimetta engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum MettaError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Atom(#[from] AtomError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Seed(#[from] SeedError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Grounded(#[from] GroundedError),
}

// ---------------------------------------------------------------------------
// Atom / contract errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum AtomError {
    #[error("chain target must be a variable, got {found}")]
    #[diagnostic(
        code(minimetta::atom::not_a_variable),
        help(
            "The second argument of `chain` names the variable that receives the \
             instruction's result. Pass a Variable such as `$x`."
        )
    )]
    NotAVariable { found: String },
}

// ---------------------------------------------------------------------------
// Reader errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    #[error("unexpected end of input: {open} unclosed parenthesis(es)")]
    #[diagnostic(
        code(minimetta::parse::unclosed),
        help("Every `(` must be matched by a `)`.")
    )]
    Unclosed { open: usize },

    #[error("unexpected `)` at byte {offset}")]
    #[diagnostic(
        code(minimetta::parse::unexpected_close),
        help("Remove the stray `)` or add the missing `(` before it.")
    )]
    UnexpectedClose { offset: usize },

    #[error("expected a single atom, found {count}")]
    #[diagnostic(
        code(minimetta::parse::atom_count),
        help("Wrap several atoms in parentheses to form one expression.")
    )]
    AtomCount { count: usize },

    #[error("unterminated string literal starting at byte {offset}")]
    #[diagnostic(
        code(minimetta::parse::unterminated_string),
        help("Close the string literal with a matching `\"`.")
    )]
    UnterminatedString { offset: usize },

    #[error("bare `$` at byte {offset}")]
    #[diagnostic(
        code(minimetta::parse::empty_variable),
        help("Variables need a name after the `$` prefix, e.g. `$x`.")
    )]
    EmptyVariable { offset: usize },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(minimetta::config::read),
        help("Ensure the config file exists and is valid TOML.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}: {message}")]
    #[diagnostic(
        code(minimetta::config::parse),
        help("Check the TOML syntax. Known keys: `max_chain_depth`, `unify_mode`.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(minimetta::config::write),
        help("Ensure you have write permissions to the target directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {message}")]
    #[diagnostic(code(minimetta::config::invalid), help("{message}"))]
    Invalid { message: String },
}

// ---------------------------------------------------------------------------
// Seed pack errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum SeedError {
    #[error("seed pack not found: \"{id}\"")]
    #[diagnostic(
        code(minimetta::seed::not_found),
        help("Bundled packs: {available}. External packs are loaded by path with `--seed`.")
    )]
    NotFound { id: String, available: String },

    #[error("failed to parse seed pack \"{id}\": {message}")]
    #[diagnostic(
        code(minimetta::seed::parse),
        help(
            "A seed pack has a `[seed]` table (id, name, version, description) and a \
             `rules` array of `(= pattern body)` strings."
        )
    )]
    Parse { id: String, message: String },

    #[error("failed to read seed file: {path}")]
    #[diagnostic(code(minimetta::seed::io), help("Ensure the file exists and is readable."))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("rule {index} of seed pack \"{id}\" is not valid s-expression text")]
    #[diagnostic(code(minimetta::seed::rule_syntax))]
    RuleSyntax {
        id: String,
        index: usize,
        #[source]
        #[diagnostic_source]
        source: ParseError,
    },
}

// ---------------------------------------------------------------------------
// Grounded function errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GroundedError {
    #[error("duplicate grounded function registration: {name}")]
    #[diagnostic(
        code(minimetta::grounded::duplicate),
        help("A grounded function with this name is already registered. Pick another name.")
    )]
    Duplicate { name: String },
}

/// Convenience alias for functions returning minimetta results.
pub type MettaResult<T> = std::result::Result<T, MettaError>;
