use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use hogan_runtime::{Partials, RenderError, Result, Template};
use serde_json::Value;
use tracing::{debug, Level};

/// Render a compiled template program against JSON data.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Program file (JSON array of nodes).
    program: PathBuf,
    /// Context data as a JSON string.
    #[arg(long, conflicts_with = "context_file")]
    context: Option<String>,
    /// Read context data from a JSON file.
    #[arg(long)]
    context_file: Option<PathBuf>,
    /// Register a partial as NAME=PATH (repeatable).
    #[arg(long = "partial", value_name = "NAME=PATH", value_parser = parse_partial)]
    partials: Vec<(String, PathBuf)>,
    /// More log output on stderr (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_partial(s: &str) -> std::result::Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=PATH, got `{s}`")),
    }
}

fn load_template(path: &Path) -> Result<Template> {
    let source = std::fs::read_to_string(path)?;
    Template::from_program_json(&source)
}

fn run(args: &Args) -> Result<String> {
    let context: Value = match (&args.context, &args.context_file) {
        (Some(json), _) => serde_json::from_str(json)?,
        (None, Some(path)) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        (None, None) => Value::Object(Default::default()),
    };

    let mut partials = Partials::new();
    for (name, path) in &args.partials {
        let template = load_template(path)
            .map_err(|e| RenderError::Program(format!("partial `{name}`: {e}")))?;
        debug!(partial = %name, path = %path.display(), "registered partial");
        partials.register(name.clone(), template);
    }

    load_template(&args.program)?.render(context, &partials)
}

fn main() {
    // Parse CLI arguments.
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(out) => print!("{out}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
