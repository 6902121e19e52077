use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use nativeparams::{mapper, parser};

static LOG_ENV_VAR: &str = "NATIVEPARAMS_LOG";

#[derive(Parser)]
#[command(name = "nativeparams")]
#[command(about = "Inspect the template tags and parameters of a saved native question")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the card's template tags in query order
    Tags {
        /// Card YAML/JSON file
        card: PathBuf,
    },
    /// Parameters the card exposes for its template tags
    Parameters {
        /// Card YAML/JSON file
        card: PathBuf,
    },
    /// Map dashboard filter values onto the card's template tags
    Remap {
        /// Card YAML/JSON file
        card: PathBuf,

        /// Dashboard parameters (list of parameters with targets)
        #[arg(long)]
        dashboard_parameters: PathBuf,

        /// Values keyed by dashboard parameter id
        #[arg(long)]
        values: PathBuf,
    },
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let output = match args.command {
        Commands::Tags { card } => handle_tags(card)?,
        Commands::Parameters { card } => handle_parameters(card)?,
        Commands::Remap {
            card,
            dashboard_parameters,
            values,
        } => handle_remap(card, dashboard_parameters, values)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn load_card(path: &PathBuf) -> anyhow::Result<nativeparams::Card> {
    let card = parser::parse_card_file(path)
        .with_context(|| format!("Failed to load card from {}", path.display()))?;
    if !card.is_native() {
        tracing::warn!(card = ?card.id, "card is not a native question, it has no template tags");
    }
    Ok(card)
}

fn handle_tags(card_path: PathBuf) -> anyhow::Result<serde_json::Value> {
    let card = load_card(&card_path)?;
    let tags = mapper::get_template_tags(&card);
    Ok(serde_json::to_value(tags)?)
}

fn handle_parameters(card_path: PathBuf) -> anyhow::Result<serde_json::Value> {
    let card = load_card(&card_path)?;
    let parameters = mapper::get_parameters_from_card(&card);
    Ok(serde_json::to_value(parameters)?)
}

fn handle_remap(
    card_path: PathBuf,
    parameters_path: PathBuf,
    values_path: PathBuf,
) -> anyhow::Result<serde_json::Value> {
    let card = load_card(&card_path)?;
    let dashboard_parameters = parser::parse_parameters_file(&parameters_path).with_context(|| {
        format!("Failed to load dashboard parameters from {}", parameters_path.display())
    })?;
    let values = parser::parse_values_file(&values_path)
        .with_context(|| format!("Failed to load values from {}", values_path.display()))?;

    let tags: Vec<_> = mapper::get_template_tags(&card).into_iter().cloned().collect();
    let remapped =
        mapper::remap_parameter_values_to_template_tags(&tags, &dashboard_parameters, &values);
    tracing::debug!(count = remapped.len(), "remapped parameter values");

    Ok(serde_json::to_value(remapped)?)
}
