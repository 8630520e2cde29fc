use clap::{ArgAction, Args, Parser, Subcommand};
use mailmood::batch::{analyze_lines, rewrite_lines};
use mailmood::config::{load_config_from_file, Config};
use mailmood::lexicon_io::load_tables;
use mailmood::rewrite::rewrite_draft_with;
use mailmood::types::tone_data::ToneLabel;
use mailmood::{MailmoodError, Result, ToneAnalyzer, ToneTables};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_CONFIG_FILE: &str = "mailmood.toml";

/// Heuristic tone analysis for email text
#[derive(Parser)]
#[command(name = "mailmood", version, about)]
struct Cli {
    /// Config file (defaults to ./mailmood.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print single-line JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify the tone of a message
    Analyze(InputArgs),
    /// Reword a draft toward a target tone
    Rewrite {
        #[command(flatten)]
        input: InputArgs,
        /// Target tone, e.g. calm_professional or warm_positive
        #[arg(long)]
        target: Option<ToneLabel>,
    },
    /// Classify (or rewrite) every request in a JSON Lines file
    Batch {
        /// One {"text": ..., "mode": ...} object per line, or
        /// {"text": ..., "targetTone": ...} with --rewrite
        path: PathBuf,

        /// Treat lines as rewrite requests
        #[arg(long)]
        rewrite: bool,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Message text; read from --file or stdin when omitted
    text: Option<String>,

    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(cli.verbose, &config.log_filter);
    info!(
        lexicon = ?config.lexicon_path,
        target = %config.default_target_tone,
        "configuration loaded"
    );

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, configured: &str) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load_config_from_file(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                load_config_from_file(default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn run(cli: Cli, config: &Config) -> Result<()> {
    let custom_tables;
    let tables = match &config.lexicon_path {
        Some(path) => {
            custom_tables = load_tables(path)?;
            &custom_tables
        }
        None => ToneTables::builtin(),
    };
    let analyzer = ToneAnalyzer::new(tables);
    let pretty = config.pretty_json && !cli.compact;

    match cli.command {
        Command::Analyze(input) => {
            let text = read_input(&input)?;
            let response = analyzer.analyze(&text);
            info!(tone = response.tone_label.display_name(), "analysis complete");
            print_json(&response, pretty)
        }
        Command::Rewrite { input, target } => {
            let text = read_input(&input)?;
            let target = target.unwrap_or(config.default_target_tone);
            print_json(&rewrite_draft_with(&analyzer, &text, Some(target)), pretty)
        }
        Command::Batch { path, rewrite } => {
            run_batch(&analyzer, &path, rewrite, config.default_target_tone)
        }
    }
}

fn read_input(input: &InputArgs) -> Result<String> {
    let text = match (&input.text, &input.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path).map_err(|e| MailmoodError::Io {
            path: path.clone(),
            source: e,
        })?,
        (None, None) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| MailmoodError::Io {
                    path: PathBuf::from("<stdin>"),
                    source: e,
                })?;
            buffer
        }
    };

    if text.trim().is_empty() {
        return Err(MailmoodError::EmptyInput);
    }
    Ok(text)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", rendered);
    Ok(())
}

fn run_batch(
    analyzer: &ToneAnalyzer<'_>,
    path: &Path,
    rewrite: bool,
    default_target: ToneLabel,
) -> Result<()> {
    let file = File::open(path).map_err(|e| MailmoodError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let reader = BufReader::new(file);

    if rewrite {
        for record in rewrite_lines(analyzer, reader, path, default_target)? {
            print_json(&record, false)?;
        }
    } else {
        for record in analyze_lines(analyzer, reader, path)? {
            print_json(&record, false)?;
        }
    }
    Ok(())
}
