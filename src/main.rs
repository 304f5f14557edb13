use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use arbor_avl::script::{self, Op, ShellKey};
use arbor_avl::{EngineConfig, Highlight, HighlightQueue, MutationReport, TreeHandle, TreeService};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "arbor", about = "AVL balancing engine with rotation telemetry")]
struct Cli {
    /// Log rotations and rebalancing decisions.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Highlight snapshots buffered between the engine and the shell.
    #[arg(long, global = true, default_value_t = 64)]
    queue_capacity: usize,

    /// Skip the full invariant walk after each mutation.
    #[arg(long, global = true)]
    no_verify: bool,

    /// Print mutation reports as JSON (requires the `visualize` feature).
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply commands given as arguments, e.g. `+30 +20 +10 -20 show`.
    Run {
        /// Commands (`+N`, `-N`, `traverse`, `reset`, `show`, or quoted `insert N`).
        #[arg(required = true, allow_hyphen_values = true)]
        ops: Vec<String>,
    },
    /// Apply commands from a file, one per line.
    Script {
        /// Script file.
        path: PathBuf,
    },
    /// Read commands interactively from standard input.
    Repl,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if cli.json && !cfg!(feature = "visualize") {
        bail!("--json requires building with `--features visualize`");
    }

    let config = EngineConfig::default()
        .with_queue_capacity(cli.queue_capacity)
        .with_invariant_checks(!cli.no_verify);
    let service = TreeService::<ShellKey>::spawn(config).context("failed to start tree service")?;
    let shell = Shell {
        tree: service.handle(),
        highlights: service.highlights(),
        json: cli.json,
    };

    match cli.command {
        Commands::Run { ops } => {
            for (idx, text) in ops.iter().enumerate() {
                let op = script::parse_line(text)
                    .with_context(|| format!("invalid command {} ('{}')", idx + 1, text))?;
                if let Some(op) = op {
                    shell.apply(op)?;
                }
            }
        }
        Commands::Script { path } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read script {}", path.display()))?;
            let ops = script::parse_script(&text)
                .with_context(|| format!("invalid script {}", path.display()))?;
            for op in ops {
                shell.apply(op)?;
            }
        }
        Commands::Repl => run_repl(&shell)?,
    }

    service.shutdown().context("tree service did not stop cleanly")?;
    Ok(())
}

/// Thin presentation layer: prints reports and polls highlights once per command.
struct Shell {
    tree: TreeHandle<ShellKey>,
    highlights: HighlightQueue<ShellKey>,
    json: bool,
}

impl Shell {
    fn apply(&self, op: Op) -> Result<()> {
        match op {
            Op::Insert(key) => {
                println!("Inserting: {key}");
                let report = self.tree.insert(key)?;
                self.print_report(&report)?;
            }
            Op::Delete(key) => {
                println!("Deleting: {key}");
                let report = self.tree.delete(key)?;
                self.print_report(&report)?;
            }
            Op::Traverse => {
                let keys = self.tree.traverse()?;
                let rendered: Vec<String> = keys.iter().map(ToString::to_string).collect();
                println!("Inorder Traversal: {}", rendered.join(" "));
            }
            Op::Reset => {
                self.tree.reset()?;
                println!("Tree has been reset.");
            }
            Op::Show => {
                let structure = self.tree.structure()?;
                if structure.is_empty() {
                    println!("(empty)");
                } else {
                    print!("{structure}");
                }
            }
        }
        Ok(())
    }

    fn print_report(&self, report: &MutationReport<ShellKey>) -> Result<()> {
        if self.json {
            println!("{}", render_json(report)?);
        } else {
            println!("  outcome: {}", report.outcome);
            for (case, idx) in report.rebalances.iter().zip(1..) {
                println!("  rebalance {idx}: {case}");
            }
            for event in &report.rotations {
                println!("  {event}");
            }
        }

        match self.highlights.poll() {
            Highlight::Pair(pair) => println!("  highlight: {pair}"),
            Highlight::Clear => println!("  highlight: none"),
        }
        Ok(())
    }
}

#[cfg(feature = "visualize")]
fn render_json(report: &MutationReport<ShellKey>) -> Result<String> {
    serde_json::to_string(report).context("failed to serialize report")
}

#[cfg(not(feature = "visualize"))]
fn render_json(_report: &MutationReport<ShellKey>) -> Result<String> {
    bail!("JSON output requires the `visualize` feature")
}

fn run_repl(shell: &Shell) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("> ");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read standard input")?;
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }
        match script::parse_line(&line) {
            Ok(Some(op)) => shell.apply(op)?,
            Ok(None) => {}
            Err(err) => println!("error: {err}"),
        }
        print!("> ");
        stdout.flush()?;
    }
    Ok(())
}
