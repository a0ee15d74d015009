use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use scamducation_game::Achievement;
use serde::Serialize;

use crate::simulation::RunReport;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    passed: bool,
    runs: &'a [RunReport],
}

fn milestone_cell(run: &RunReport, achievement: Achievement) -> String {
    run.milestone(achievement)
        .map_or_else(|| "-".to_string(), |route| route.to_string())
}

pub fn generate_console_report(
    out: &mut dyn Write,
    runs: &[RunReport],
    verbose: bool,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Scamducation Policy Simulation".bright_cyan().bold())?;
    writeln!(out, "{}", "=================================".cyan())?;

    let passed = runs.iter().filter(|r| r.passed()).count();
    writeln!(out, "Total runs: {}", runs.len())?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (runs.len() - passed).to_string().red())?;
    writeln!(out)?;

    for run in runs {
        let status = if run.passed() {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{} {} (seed {})", status, run.policy.label().bold(), run.seed)?;
        writeln!(
            out,
            "   Routes: {}  avoided {}/8  fallen {}/8  learned {}/9",
            run.routes_played, run.avoided, run.fallen_for, run.learned
        )?;
        for achievement in Achievement::ALL {
            let cell = milestone_cell(run, achievement);
            let line = format!("     {:<48} {}", achievement.title(), cell);
            if cell == "-" {
                writeln!(out, "{}", line.dimmed())?;
            } else {
                writeln!(out, "{line}")?;
            }
        }
        if verbose {
            for route in &run.routes {
                writeln!(
                    out,
                    "     route {:>3}: {:<12} {:?} {:?}",
                    route.route,
                    route.category.to_string(),
                    route.choice,
                    route.unlocked
                )?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, runs: &[RunReport]) -> Result<()> {
    let report = JsonReport {
        generated_at: chrono::Local::now().to_rfc3339(),
        passed: runs.iter().all(RunReport::passed),
        runs,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, runs: &[RunReport]) -> Result<()> {
    writeln!(out, "# Scamducation Policy Simulation\n")?;
    writeln!(
        out,
        "_Generated {}_\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    )?;

    write!(out, "| Policy | Seed | Routes | Result |")?;
    for achievement in Achievement::ALL {
        write!(out, " {} |", achievement.id())?;
    }
    writeln!(out)?;
    write!(out, "|---|---|---|---|")?;
    for _ in Achievement::ALL {
        write!(out, "---|")?;
    }
    writeln!(out)?;

    for run in runs {
        let status = if run.passed() { "✅" } else { "❌" };
        write!(
            out,
            "| {} | {} | {} | {} |",
            run.policy, run.seed, run.routes_played, status
        )?;
        for achievement in Achievement::ALL {
            write!(out, " {} |", milestone_cell(run, achievement))?;
        }
        writeln!(out)?;
    }
    Ok(())
}
