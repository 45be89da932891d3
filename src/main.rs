//! Command-line front-end
//!
//! Parses a TPTP problem, runs saturation, and reports the result in
//! SZS form. Set the environment variable `LOG` to `info`, `debug` or
//! `trace` for an increasingly detailed log of the proof search.

use clap::Parser;
use log::info;
use resolute::selection::{ClauseHeuristic, LiteralSelection};
use resolute::szs::{Output, OutputKind, Status};
use resolute::{parse_problem_file, ProofState, ProverConfig, ProverResult, SearchStats};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Saturation-based resolution prover for first-order logic with
/// equality, reading TPTP CNF/FOF problems.
#[derive(Debug, Parser)]
#[command(name = "resolute", version)]
struct Cli {
    /// Path of the TPTP problem file
    file: PathBuf,

    /// Add equality axioms if the problem uses equality
    #[arg(short = 't', long = "eq-axioms")]
    eq_axioms: bool,

    /// Accept full FOF input and clausify it; without this flag the
    /// input is assumed to be CNF already
    #[arg(short = 'i', long = "clausify")]
    clausify: bool,

    /// Discard clauses subsumed by a processed or unprocessed clause
    #[arg(short = 'f', long = "forward-subsumption")]
    forward_subsumption: bool,

    /// Remove clauses that a new or given clause properly subsumes
    #[arg(short = 'b', long = "backward-subsumption")]
    backward_subsumption: bool,

    /// Select the first positive literal instead of a negative one;
    /// this makes the search incomplete
    #[arg(short = 'p', long = "pos-lit-selection", conflicts_with = "neg_lit_selection")]
    pos_lit_selection: bool,

    /// Given-clause heuristic: FIFO, SymbolCount, PickGiven2, PickGiven5
    #[arg(short = 'H', long = "given-clause-heuristic", default_value = "PickGiven5")]
    heuristic: String,

    /// Negative literal selection: none, first, smallest, largest
    #[arg(short = 'n', long = "neg-lit-selection", default_value = "none")]
    neg_lit_selection: String,

    /// Enable the set-of-support strategy (negated conjecture descendants)
    #[arg(short = 'S', long = "set-of-support")]
    set_of_support: bool,

    /// Soft wall-clock budget in seconds
    #[arg(long = "timeout", default_value_t = 300)]
    timeout: u64,

    /// Soft clause-count budget; 0 means no limit
    #[arg(long = "max-clauses", default_value_t = 0)]
    max_clauses: usize,

    /// Directory to search for included files (repeatable)
    #[arg(long = "include")]
    include: Vec<String>,

    /// Write search statistics in JSON format to the given file
    #[arg(long = "stats")]
    stats: Option<PathBuf>,
}

/// Statistics record written by `--stats`.
#[derive(Debug, Serialize)]
struct StatsReport<'a> {
    status: &'a str,
    time_seconds: f64,
    clauses_created: usize,
    #[serde(flatten)]
    search: SearchStats,
}

fn main() {
    use env_logger::Env;
    env_logger::Builder::from_env(Env::default().filter_or("LOG", "warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("resolute: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(cli)?;

    let include_dirs: Vec<&str> = cli.include.iter().map(String::as_str).collect();
    let problem = parse_problem_file(&cli.file.to_string_lossy(), &include_dirs)?;
    info!(
        "parsed {} clauses from '{}'",
        problem.formula.clauses.len(),
        cli.file.display()
    );

    if problem.is_fof && !cli.clausify {
        return Err("problem contains fof formulas; pass -i to enable clausification".into());
    }

    let fof_conjecture = problem.has_conjecture;
    let mut state = ProofState::new(problem.formula, config, problem.interner);

    let start = Instant::now();
    let result = state.saturate();
    let elapsed = start.elapsed();

    let status = report(&state, result, fof_conjecture);
    println!("{}", state.stats);
    println!("# Total time         : {:.3} s", elapsed.as_secs_f64());

    if let Some(path) = &cli.stats {
        let report = StatsReport {
            status: status.as_str(),
            time_seconds: elapsed.as_secs_f64(),
            clauses_created: state.clause_count(),
            search: state.stats,
        };
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
    }
    Ok(())
}

/// Print the SZS status line and the accompanying output block.
fn report(state: &ProofState, result: ProverResult, fof_conjecture: bool) -> Status {
    match result {
        ProverResult::Refutation(empty_id) => {
            let status = Status::for_outcome(true, fof_conjecture);
            println!("{}", status);
            let lines: Vec<String> = state
                .derivation_ancestry(&[empty_id])
                .into_iter()
                .map(|id| state.clause_line(id))
                .collect();
            println!(
                "{}",
                Output {
                    kind: OutputKind::CnfRefutation,
                    lines: &lines,
                }
            );
            status
        }
        ProverResult::Saturated => {
            let status = Status::for_outcome(false, fof_conjecture);
            println!("{}", status);
            let lines: Vec<String> = state
                .derivation_ancestry(&state.processed_ids())
                .into_iter()
                .map(|id| state.clause_line(id))
                .collect();
            println!(
                "{}",
                Output {
                    kind: OutputKind::Saturation,
                    lines: &lines,
                }
            );
            status
        }
        ProverResult::GaveUp => {
            println!("{}", Status::GaveUp);
            Status::GaveUp
        }
    }
}

fn build_config(cli: &Cli) -> Result<ProverConfig, String> {
    let heuristic = ClauseHeuristic::from_name(&cli.heuristic).ok_or_else(|| {
        format!(
            "unknown clause evaluation heuristic '{}' (supported: FIFO, SymbolCount, PickGiven2, PickGiven5)",
            cli.heuristic
        )
    })?;

    let literal_selection = if cli.pos_lit_selection {
        LiteralSelection::FirstPositive
    } else {
        LiteralSelection::from_name(&cli.neg_lit_selection).ok_or_else(|| {
            format!(
                "unknown literal selection function '{}' (supported: none, first, smallest, largest)",
                cli.neg_lit_selection
            )
        })?
    };

    Ok(ProverConfig {
        add_eq_axioms: cli.eq_axioms,
        forward_subsumption: cli.forward_subsumption,
        backward_subsumption: cli.backward_subsumption,
        use_sos: cli.set_of_support,
        literal_selection,
        heuristic,
        timeout: Duration::from_secs(cli.timeout),
        max_clauses: cli.max_clauses,
    })
}
