//! HealthTwin: Deterministic health-risk scoring
//!
//! Command-line entry point. Reads one input record as JSON and prints the
//! prediction.
//!
//! # Usage
//!
//! ```bash
//! healthtwin [--summary] [INPUT]
//! ```
//!
//! `INPUT` is a JSON file path, or `-` / absent for stdin.

use std::io::{Read, Write};

use anyhow::{anyhow, bail, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use healthtwin::config::{Config, LogMode};
use healthtwin::domain::{InputRecord, PredictionResult, ScoreBand};
use healthtwin::HealthPredictor;

const USAGE: &str = "Usage: healthtwin [--summary] [INPUT]

Scores one lifestyle/clinical record given as JSON.

Arguments:
  INPUT       JSON file path, or '-' for stdin (default)

Options:
  --summary   Print a human-readable summary instead of JSON
  -h, --help  Show this help";

#[derive(Debug, Default)]
struct Args {
    summary: bool,
    input: Option<String>,
    help: bool,
}

fn parse_args(mut argv: impl Iterator<Item = String>) -> Result<Args> {
    let mut args = Args::default();
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--summary" => args.summary = true,
            "-h" | "--help" => args.help = true,
            "-" => args.input = None,
            s if s.starts_with("--") => bail!("Unknown option {s}\n\n{USAGE}"),
            s => {
                if args.input.is_some() {
                    bail!("Only one INPUT may be given\n\n{USAGE}");
                }
                args.input = Some(s.to_string());
            }
        }
    }
    Ok(args)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("Failed to read {p}")),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_summary(out: &mut impl Write, result: &PredictionResult) -> std::io::Result<()> {
    let band = ScoreBand::from_score(result.health_score);
    writeln!(out, "Health score: {:.1} ({band})", result.health_score)?;
    writeln!(out, "  {}", band.description())?;
    writeln!(out, "Risks:")?;
    let values = [result.risks.cardio, result.risks.mental, result.risks.sleep];
    for ((name, level), value) in result.risks.levels().iter().zip(values) {
        writeln!(out, "  {name:<7} {:>5.1}%  {level}", value * 100.0)?;
    }
    let trajectory: Vec<String> = result.trajectory.iter().map(|v| format!("{v:.1}")).collect();
    writeln!(out, "Trajectory: {}", trajectory.join(" -> "))?;
    if result.advice.is_empty() {
        writeln!(out, "Advice: none")?;
    } else {
        writeln!(out, "Advice:")?;
        for advice in &result.advice {
            writeln!(out, "  - {advice}")?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = Config::from_env();

    // Stdout carries the result; logs go to stderr or a file.
    let (writer, _guard) = match config.log_mode {
        LogMode::File => {
            if let Some(parent) = config.log_file.parent() {
                // Best-effort: don't fail startup just because the directory is missing.
                let _ = std::fs::create_dir_all(parent);
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.log_file)
                .with_context(|| format!("Failed to open log file {:?}", config.log_file))?;
            tracing_appender::non_blocking(file)
        }
        LogMode::Stderr => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    tracing::info!("Starting HealthTwin...");

    // Refuse to score anything if the model cannot be loaded/verified.
    let predictor = HealthPredictor::new(config.model_loader());
    predictor
        .warm_up()
        .map_err(|e| anyhow!("Failed to load model from {:?}: {e}", config.model_path))?;

    let raw = read_input(args.input.as_deref())?;
    let input = InputRecord::from_json_str(&raw)?;
    if let Err(errors) = input.validate() {
        bail!("Invalid input:\n  {}", errors.join("\n  "));
    }

    let result = predictor.predict(&input)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.summary {
        write_summary(&mut out, &result)?;
    } else {
        serde_json::to_writer_pretty(&mut out, &result)?;
        writeln!(out)?;
    }

    tracing::info!("HealthTwin finished.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> impl Iterator<Item = String> {
        items
            .iter()
            .map(|s| (*s).to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_parse_args() {
        let args = parse_args(argv(&["--summary", "record.json"])).expect("parse");
        assert!(args.summary);
        assert_eq!(args.input.as_deref(), Some("record.json"));

        let args = parse_args(argv(&["-"])).expect("parse");
        assert!(args.input.is_none());

        assert!(parse_args(argv(&["--verbose"])).is_err());
        assert!(parse_args(argv(&["a.json", "b.json"])).is_err());
    }

    #[test]
    fn test_summary_output() {
        let input = InputRecord {
            age: 45,
            sex: 1,
            bp_systolic: 138.0,
            cholesterol: 220.0,
            bmi: 29.4,
            smoking: 1,
            alcohol_level: 2,
            exercise_freq: 1,
            sleep_hours: 5.5,
            stress_score: 7,
        };
        let result = PredictionResult::assemble(0.3, &input);

        let mut buf = Vec::new();
        write_summary(&mut buf, &result).expect("write");
        let text = String::from_utf8(buf).expect("utf8");

        assert!(text.contains("Health score: 44.1 (CONCERNING)"));
        assert!(text.contains("cardio"));
        assert!(text.contains("HIGH"));
        assert!(text.contains("Quit smoking"));
    }
}
