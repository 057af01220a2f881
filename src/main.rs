//! minimetta CLI: load rules, then evaluate, unify or chain atoms.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use minimetta::atom::Atom;
use minimetta::config::{InterpreterConfig, UnifyMode};
use minimetta::interp::{Interpreter, Outcome};
use minimetta::reader::parse;
use minimetta::seeds::{bundled_ids, SeedPack};
use minimetta::space::KnowledgeBase;

#[derive(Parser)]
#[command(name = "minimetta", version, about = "Minimal symbolic term-rewriting engine")]
struct Cli {
    /// Interpreter config file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed pack files to load, in order.
    #[arg(long = "seed", global = true)]
    seeds: Vec<PathBuf>,

    /// Load a bundled seed pack before any --seed files: `--bundled` for
    /// `funding`, or `--bundled=ID` (see `packs`).
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "funding",
        value_name = "ID"
    )]
    bundled: Option<String>,

    /// Use full unification instead of head-only matching.
    #[arg(long, global = true)]
    strict: bool,

    /// Override the maximum chain depth.
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one atom by a single reduction step.
    Eval {
        /// Atom in s-expression form, e.g. "(+ 2 3)".
        expr: String,
    },

    /// Look up the first matching rule body without grounded functions.
    Query {
        /// Pattern in s-expression form.
        pattern: String,
    },

    /// Unify two atoms and print the selected branch.
    Unify {
        a: String,
        b: String,
        on_success: String,
        on_failure: String,
    },

    /// Execute an instruction, bind it, and reduce the continuation.
    Chain {
        instruction: String,
        /// Variable receiving the result, e.g. "$x".
        variable: String,
        continuation: String,
    },

    /// Run a top-level instruction: (eval X), (unify A B S F) or (chain I $v C).
    Run {
        instruction: String,
    },

    /// List the loaded rules.
    Rules {
        /// Print as JSON instead of s-expressions.
        #[arg(long)]
        json: bool,
    },

    /// List the seed packs bundled into the binary.
    Packs,

    /// Self-test: arithmetic chain and allocation weight lookup on the bundled pack.
    Check,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => InterpreterConfig::load(path)?,
        None => InterpreterConfig::default(),
    };
    if cli.strict {
        config.unify_mode = UnifyMode::Strict;
    }
    if let Some(depth) = cli.max_depth {
        config.max_chain_depth = depth;
    }

    let mut kb = KnowledgeBase::new();
    let bundled = match (&cli.bundled, &cli.command) {
        (Some(id), _) => Some(id.as_str()),
        (None, Commands::Check) => Some("funding"),
        (None, _) => None,
    };
    if let Some(id) = bundled {
        SeedPack::bundled(id)?.apply(&mut kb);
    }
    for path in &cli.seeds {
        SeedPack::load(path)?.apply(&mut kb);
    }

    let interp = Interpreter::with_config(&kb, config)?;

    match cli.command {
        Commands::Eval { expr } => {
            println!("{}", interp.evaluate(&parse(&expr)?));
        }

        Commands::Query { pattern } => {
            let pattern = parse(&pattern)?;
            let result = match interp.config().unify_mode {
                UnifyMode::Shallow => kb.query(&pattern),
                UnifyMode::Strict => kb.query_strict(&pattern),
            };
            println!("{result}");
        }

        Commands::Unify {
            a,
            b,
            on_success,
            on_failure,
        } => {
            let out = interp.unify_with(
                &parse(&a)?,
                &parse(&b)?,
                &parse(&on_success)?,
                &parse(&on_failure)?,
                &Default::default(),
            );
            print_outcome(&out);
        }

        Commands::Chain {
            instruction,
            variable,
            continuation,
        } => {
            let out = interp.chain_with(
                &parse(&instruction)?,
                &parse(&variable)?,
                &parse(&continuation)?,
                &Default::default(),
            )?;
            print_outcome(&out);
        }

        Commands::Run { instruction } => {
            let out = interp.run(&parse(&instruction)?)?;
            print_outcome(&out);
        }

        Commands::Rules { json } => {
            if json {
                let out = serde_json::to_string_pretty(kb.rules()).into_diagnostic()?;
                println!("{out}");
            } else if kb.is_empty() {
                println!("No rules loaded.");
            } else {
                println!("Rules ({}):", kb.len());
                for rule in kb.rules() {
                    println!("  {rule}");
                }
            }
        }

        Commands::Packs => {
            for id in bundled_ids() {
                let pack = SeedPack::bundled(id)?;
                println!(
                    "{:<12} {} v{} ({} rules)",
                    pack.id,
                    pack.name,
                    pack.version,
                    pack.rules.len()
                );
                if !pack.description.is_empty() {
                    println!("             {}", pack.description);
                }
            }
        }

        Commands::Check => {
            let chained = interp.chain(
                &parse("(eval (+ 1 2))")?,
                &Atom::var("x"),
                &parse("(eval (+ $x 1))")?,
            )?;
            let weight = interp.evaluate(&parse("(allocation_weight CRITICAL)")?);

            println!("chain (eval (+ 1 2)) $x (eval (+ $x 1)) -> {chained} (expected 4)");
            println!("(allocation_weight CRITICAL) -> {weight} (expected 0.40)");

            if chained != Atom::sym("4") || weight != Atom::sym("0.40") {
                miette::bail!("self-test failed");
            }
            println!("All checks passed.");
        }
    }

    Ok(())
}

fn print_outcome(out: &Outcome) {
    println!("{}", out.atom);
    if !out.bindings.is_empty() {
        println!("  bindings: {}", out.bindings);
    }
}
