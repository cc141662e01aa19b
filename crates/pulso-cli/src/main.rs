//! Pulso — clusters and ranks insights from tagged survey responses.

use std::path::PathBuf;

use anyhow::Context;
use pulso_core::PulsoConfig;
use pulso_runtime::Orchestrator;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod input;
mod report;

/// `PULSO_CONFIG` names a JSON config file; otherwise `PULSO_*` variables apply.
fn load_config() -> anyhow::Result<PulsoConfig> {
    match std::env::var("PULSO_CONFIG") {
        Ok(path) => PulsoConfig::load(&path).with_context(|| format!("config {}", path)),
        Err(_) => Ok(PulsoConfig::from_env()?),
    }
}

fn organize(responses_path: PathBuf, output_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config()?;
    let responses = input::load_responses(&responses_path)?;
    info!("Loaded {} responses from {}", responses.len(), responses_path.display());

    let orchestrator = Orchestrator::new(config)?;
    let run = orchestrator.run(&responses)?;
    report::print_summary(&run);

    if let Some(path) = output_path {
        let output = report::OrganizeOutput::new(&run);
        std::fs::write(&path, serde_json::to_string_pretty(&output)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Wrote clusters to {}", path.display());
    }
    Ok(())
}

fn evaluate(system_path: PathBuf, gold_path: PathBuf) -> anyhow::Result<()> {
    let system = input::load_insights(&system_path)?;
    let gold = input::load_insights(&gold_path)?;

    let phrases = pulso_extract::evaluate_phrases(&system.phrases, &gold.phrases);
    let word_sets = pulso_extract::evaluate_word_sets(&system.word_sets, &gold.word_sets);
    report::print_evaluation(&phrases, &word_sets);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("organize") => {
            if args.len() < 3 {
                eprintln!("Usage: pulso organize <responses.json> [output.json]");
                std::process::exit(1);
            }
            organize(PathBuf::from(&args[2]), args.get(3).map(PathBuf::from))
        }
        Some("evaluate") => {
            if args.len() < 4 {
                eprintln!("Usage: pulso evaluate <system.json> <gold.json>");
                std::process::exit(1);
            }
            evaluate(PathBuf::from(&args[2]), PathBuf::from(&args[3]))
        }
        Some("--help") | Some("-h") | Some("help") | None => {
            println!("Pulso — insight clustering for tagged survey responses");
            println!();
            println!("Usage: pulso <command>");
            println!();
            println!("Commands:");
            println!("  organize <responses.json> [output.json]   Extract, cluster and rank");
            println!("  evaluate <system.json> <gold.json>        Score extractions against a gold standard");
            println!("  help                                      Show this help message");
            println!();
            println!("Environment:");
            println!("  PULSO_CONFIG        JSON config file (overrides the variables below)");
            println!("  PULSO_TECHNIQUE     dice | word2vec | fasttext");
            println!("  PULSO_NGRAM         Dice shingle size, 2 or 3");
            println!("  PULSO_ORGANIZATION  all | categories");
            println!("  PULSO_PRIORITY      ';'-separated category ranking");
            println!("  PULSO_VECTORS       word vector file for word2vec/fasttext");
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown command: {}. Use 'pulso help' for usage.", other);
            std::process::exit(1);
        }
    }
}
