//! Animalfacts CLI - look up an animal and print or render what the API knows

mod logging;

use animalfacts::{
    render_html, AnimalClient, AnimalQuery, AnimalRecord, AnimalSource, Config, QueryError,
    DEFAULT_TEMPLATE,
};
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Prompt shown when no name is given on the command line
const PROMPT: &str = "Enter the name of the animal you want to fetch data for: ";

/// Message printed when nothing came back
const NO_DATA_MESSAGE: &str = "No data found or an error occurred.";

/// Output format for fetched records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One compact JSON object per line
    #[default]
    Text,
    /// Pretty-printed JSON array
    Json,
}

/// Animalfacts - look up facts about an animal
#[derive(Parser, Debug)]
#[command(name = "animalfacts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Animal name (prompted for when omitted)
    name: Option<String>,

    /// Also render the records to an HTML file
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "animals.html")]
    html: Option<PathBuf>,

    /// Template for --html (must contain __REPLACE_ANIMALS_INFO__)
    #[arg(long, value_name = "PATH", requires = "html")]
    template: Option<PathBuf>,

    /// Output format
    #[arg(long, short, default_value = "text")]
    output: OutputFormat,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let client = match AnimalClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let input = match cli.name {
        Some(name) => name,
        None => prompt_for_name(),
    };

    let records = match lookup(&client, &input).await {
        Ok(records) => records,
        Err(e) => {
            writeln_safe(&e.to_string());
            return;
        }
    };

    writeln_safe(&format_records(&records, cli.output));

    if let Some(path) = cli.html {
        if let Err(e) = write_html(&records, cli.template.as_deref(), &path) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        eprintln!("Website was successfully generated to {}", path.display());
    }
}

/// Validate the raw input and fetch records for it
///
/// Blank input is rejected before the source is touched.
async fn lookup(source: &dyn AnimalSource, input: &str) -> Result<Vec<AnimalRecord>, QueryError> {
    let query = AnimalQuery::new(input)?;
    Ok(source.fetch_records(&query).await)
}

/// Read one line from stdin after printing the prompt
fn prompt_for_name() -> String {
    print!("{}", PROMPT);
    if let Err(e) = io::stdout().flush() {
        tracing::warn!("Failed to flush stdout: {}", e);
    }

    let mut line = String::new();
    if let Err(e) = io::stdin().lock().read_line(&mut line) {
        tracing::warn!("Failed to read from stdin: {}", e);
    }
    line
}

/// Format records for stdout
fn format_records(records: &[AnimalRecord], output: OutputFormat) -> String {
    match output {
        OutputFormat::Json => {
            serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
        }
        OutputFormat::Text if records.is_empty() => NO_DATA_MESSAGE.to_string(),
        OutputFormat::Text => {
            let mut output = String::from("Fetched animal data:");
            for record in records {
                output.push('\n');
                output.push_str(&serde_json::Value::Object(record.clone()).to_string());
            }
            output
        }
    }
}

/// Render records and overwrite the file at `path`
fn write_html(
    records: &[AnimalRecord],
    template: Option<&Path>,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let template = match template {
        Some(template_path) => std::fs::read_to_string(template_path)?,
        None => DEFAULT_TEMPLATE.to_string(),
    };
    let html = render_html(records, &template)?;
    std::fs::write(path, html)?;
    Ok(())
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
