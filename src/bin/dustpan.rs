//! Command-line interface for dustpan
//! Loads the notes named by a configuration file, types and sorts them, and writes the reports.
//!
//! Usage:
//!   dustpan --config `<config>`                                      - Write the outputs named in the config
//!   dustpan --config `<config>` --format `<format>` [--output `<path>`] - Render one format
//!   dustpan --list-formats                                           - List all available formats

use chrono::Local;
use clap::{Arg, ArgAction, Command};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use dustpan::dustpan::formats::{write_report, FormatRegistry, Report};
use dustpan::dustpan::pipeline::{Pipeline, Settings};

fn main() {
    let matches = Command::new("dustpan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tabulate @field plain-text notes")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to the JSON configuration file")
                .default_value("config.json"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Render a single format (e.g., 'csv', 'json', 'yaml') instead of the configured outputs"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Where to write the --format output (default: stdout)")
                .requires("format"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more (-v: info, -vv: debug)")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_tracing(matches.get_count("verbose"));

    let registry = FormatRegistry::with_defaults();
    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return;
    }

    let config = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("config.json");
    let format = matches.get_one::<String>("format").map(String::as_str);
    let output = matches.get_one::<String>("output").map(Path::new);
    handle_run_command(&registry, config, format, output);
}

/// `RUST_LOG` applies unless `-v` asks for a level explicitly.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Handle a processing run
fn handle_run_command(
    registry: &FormatRegistry,
    config: &str,
    format: Option<&str>,
    output: Option<&Path>,
) {
    let settings = Settings::load(config).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    let now = Local::now().naive_local();
    let pipeline = Pipeline::new(settings);
    let docs = pipeline.run(now);
    let settings = pipeline.settings();
    let report = Report::from_settings(&docs, settings, now);

    if let Some(format) = format {
        let result = match output {
            Some(path) => write_report(registry, &report, format, path),
            None => registry.serialize(&report, format).map(|s| print!("{}", s)),
        };
        if let Err(e) = result {
            eprintln!("Output error: {}", e);
            eprintln!("\nAvailable formats:");
            for name in registry.list_formats() {
                eprintln!("  {}", name);
            }
            std::process::exit(1);
        }
        return;
    }

    let mut failed = false;
    if let Some(dst) = &settings.config.csv.dst {
        if let Err(e) = write_report(registry, &report, "csv", &settings.resolve(dst)) {
            eprintln!("csv: {}", e);
            failed = true;
        }
    }
    let json = match &settings.config.json.dst {
        Some(dst) => write_report(registry, &report, "json", &settings.resolve(dst)),
        None => registry
            .serialize(&report, "json")
            .map(|s| println!("{}", s)),
    };
    if let Err(e) = json {
        eprintln!("json: {}", e);
        failed = true;
    }
    if failed {
        std::process::exit(1);
    }
}

/// Handle the list-formats command
fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available output formats:\n");
    for name in registry.list_formats() {
        let description = registry.get(&name).map(|f| f.description()).unwrap_or("");
        println!("  {}", name);
        println!("    {}", description);
        println!();
    }
}
