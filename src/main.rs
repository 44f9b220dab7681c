//! currency-converter CLI
//!
//! Interactive currency converter with an editable rate table.
//!
//! # Usage
//!
//! ```bash
//! # Start the converter
//! currency-converter
//!
//! # Use a different rate file
//! currency-converter --rates-file ./rates.properties
//!
//! # Print the rate table and exit
//! currency-converter rates --format json
//! ```

use currency_converter::config::{Config, RATES_FILE_ENV};
use currency_converter::persistence::{RateFile, RateRepository};
use currency_converter::ui::{Console, Session};
use log::{error, info};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

fn print_usage() {
    eprintln!(
        r#"currency-converter — convert amounts with an editable exchange rate table

USAGE:
    currency-converter [OPTIONS] [COMMAND]

COMMANDS:
    (none)      Start the interactive converter
    rates       Print the current rate table and exit
    help        Show this message

OPTIONS:
    --rates-file <FILE>  Rate file to load and save (default: ~/.currency_rates.properties,
                         or ${env})
    --format <FORMAT>    Output format for 'rates': text (default) or json

EXAMPLES:
    currency-converter
    currency-converter --rates-file ./rates.properties
    currency-converter rates --format json"#,
        env = RATES_FILE_ENV
    );
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}

enum Command {
    Interactive,
    Rates,
}

struct Args {
    command: Command,
    rates_file: Option<PathBuf>,
    format: String,
}

fn parse_args(args: &[String]) -> Args {
    let mut parsed = Args {
        command: Command::Interactive,
        rates_file: None,
        format: "text".to_string(),
    };
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--rates-file" => {
                i += 1;
                parsed.rates_file = Some(args.get(i).map(PathBuf::from).unwrap_or_else(|| {
                    eprintln!("--rates-file requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                parsed.format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            "rates" => parsed.command = Command::Rates,
            "help" | "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }
    parsed
}

fn cmd_rates(file: &RateFile, format: &str) {
    let store = file.load();
    match format {
        "json" => match serde_json::to_string_pretty(&store) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error encoding rates: {}", e);
                process::exit(1);
            }
        },
        "text" => print!("{}", store),
        other => {
            eprintln!("Unknown format '{}': expected 'text' or 'json'", other);
            process::exit(1);
        }
    }
}

fn cmd_interactive(file: &RateFile) -> io::Result<()> {
    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());
    let mut session = Session::new(file, console);
    session.run()?;
    io::stdout().flush()
}

fn main() {
    init_logger();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args);

    let config = Config::load(args.rates_file.as_deref());
    info!("using rate file {}", config.rates_file.display());
    let file = RateFile::new(config.rates_file);

    match args.command {
        Command::Rates => cmd_rates(&file, &args.format),
        Command::Interactive => {
            if let Err(e) = cmd_interactive(&file) {
                error!("terminal error: {}", e);
                process::exit(1);
            }
        }
    }
}
