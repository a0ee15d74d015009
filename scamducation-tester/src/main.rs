mod policy;
mod reports;
mod simulation;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use policy::PolicyKind;
use simulation::{RunReport, SimulationConfig, simulate};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "scamducation-tester", version)]
#[command(
    about = "Simulates player policies against the Scamducation core and reports milestone pacing"
)]
struct Args {
    /// Policies to simulate (comma-separated)
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_value = "decliner,faller,alternator,completionist"
    )]
    policies: Vec<PolicyKind>,

    /// Seeds to run (comma-separated)
    #[arg(long, value_delimiter = ',', default_value = "1337")]
    seeds: Vec<u64>,

    /// Route cap per run
    #[arg(long, default_value_t = 200)]
    max_routes: u32,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Include every route in the report
    #[arg(short, long)]
    verbose: bool,
}

fn announce_banner(args: &Args) {
    eprintln!("{}", "🎣 Scamducation Policy Tester".bright_magenta().bold());
    eprintln!(
        "Policies: {}  Seeds: {}  Route cap: {}",
        args.policies
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(","),
        args.seeds
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(","),
        args.max_routes
    );
}

fn run_all(args: &Args) -> Result<Vec<RunReport>> {
    let config = SimulationConfig {
        max_routes: args.max_routes,
        keep_routes: args.verbose,
    };
    let mut runs = Vec::with_capacity(args.policies.len() * args.seeds.len());
    for &kind in &args.policies {
        for &seed in &args.seeds {
            let run = simulate(kind, seed, config)
                .with_context(|| format!("simulating {kind} with seed {seed}"))?;
            log::info!(
                "{kind} seed {seed}: {} routes, grand {}",
                run.routes_played,
                run.grand_reached
            );
            runs.push(run);
        }
    }
    Ok(runs)
}

fn write_reports(args: &Args, runs: &[RunReport]) -> Result<()> {
    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(stdout().lock()),
    };
    match args.report {
        ReportFormat::Console => reports::generate_console_report(&mut out, runs, args.verbose)?,
        ReportFormat::Json => reports::generate_json_report(&mut out, runs)?,
        ReportFormat::Markdown => reports::generate_markdown_report(&mut out, runs)?,
    }
    out.flush().context("flushing report")?;
    Ok(())
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();
    announce_banner(&args);

    let start_time = Instant::now();
    let runs = run_all(&args)?;
    write_reports(&args, &runs)?;

    let failed: Vec<_> = runs.iter().filter(|run| !run.passed()).collect();
    eprintln!("Finished in {:?}", start_time.elapsed());
    if failed.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        for run in failed {
            eprintln!(
                "{} {} (seed {}) missed the grand achievement within {} routes",
                "❌".red(),
                run.policy,
                run.seed,
                run.routes_played
            );
        }
        Ok(ExitCode::FAILURE)
    }
}
