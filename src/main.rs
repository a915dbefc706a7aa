// Fri Oct 16 2026 - Alex

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colored::Colorize;
use hypermatcher::{
    config::Config,
    input::{load_patterns, CorpusBuffer},
    utils::logging,
    Engine,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Multi-pattern signature matcher", long_about = None)]
struct Args {
    /// Signature file, one pattern per line
    #[arg(short, long)]
    patterns: PathBuf,

    /// Files to scan; stdin when none are given
    inputs: Vec<PathBuf>,

    /// JSON engine configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct InputReport {
    input: String,
    matches: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    let engine = Engine::with_config(config)?;

    let patterns = load_patterns(&args.patterns)
        .with_context(|| format!("failed to read patterns from {}", args.patterns.display()))?;

    let start_time = Instant::now();
    engine.update(&patterns)?;
    log::info!("loaded {} patterns in {:.2}ms", patterns.len(), start_time.elapsed().as_secs_f64() * 1000.0);

    let (names, buffers) = read_inputs(&args.inputs)?;
    let corpora: Vec<[&[u8]; 1]> = buffers.iter().map(|b| [b.as_ref()]).collect();

    let results = engine.match_batch(&corpora)?;

    let reports: Vec<InputReport> = names.into_iter()
        .zip(results)
        .map(|(input, matches)| InputReport { input, matches })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_reports(&reports);
    }

    Ok(())
}

fn read_inputs(paths: &[PathBuf]) -> Result<(Vec<String>, Vec<CorpusBuffer>)> {
    if paths.is_empty() {
        let buffer = CorpusBuffer::from_reader(std::io::stdin().lock())
            .context("failed to read stdin")?;
        return Ok((vec!["<stdin>".to_string()], vec![buffer]));
    }

    let mut names = Vec::with_capacity(paths.len());
    let mut buffers = Vec::with_capacity(paths.len());

    for path in paths {
        let buffer = CorpusBuffer::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        names.push(path.display().to_string());
        buffers.push(buffer);
    }

    Ok((names, buffers))
}

fn print_reports(reports: &[InputReport]) {
    for report in reports {
        if report.matches.is_empty() {
            println!("{} {}: no matches", "[-]".dimmed(), report.input);
            continue;
        }

        println!("{} {}: {} matched", "[+]".green(), report.input.cyan(), report.matches.len());
        for pattern in &report.matches {
            println!("    {}", pattern.yellow());
        }
    }
}
