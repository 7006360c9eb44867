//! IBCS Charts CLI
//!
//! Usage:
//!   ibcs-charts [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --settings <FILE>     Chart settings (TOML format)
//!   -s, --stylesheet <FILE>   Stylesheet file for color palette (TOML format)
//!       --width <PX>          Viewport width [default: 800]
//!       --height <PX>         Viewport height [default: 400]
//!   -t, --chart-type <TYPE>   Override the chart type from the settings
//!   -d, --debug               Outline layout regions and log the layout
//!   -v, --verbose             Log pipeline progress to stderr
//!   -h, --help                Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use ibcs_charts::{render_with_config, ChartType, RenderConfig, Settings, Stylesheet};

#[derive(Parser)]
#[command(name = "ibcs-charts")]
#[command(about = "IBCS variance charts from CSV data")]
struct Cli {
    /// Input CSV file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Chart settings file (TOML format)
    #[arg(short = 'c', long)]
    settings: Option<PathBuf>,

    /// Stylesheet file for color palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 400.0)]
    height: f64,

    /// Chart type, overriding the settings file
    #[arg(short = 't', long)]
    chart_type: Option<ChartType>,

    /// Debug mode: outline layout regions and log the computed layout
    #[arg(short, long)]
    debug: bool,

    /// Log pipeline progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Load stylesheet
    let stylesheet = match &cli.stylesheet {
        Some(path) => match Stylesheet::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Stylesheet::default(),
    };

    // Load settings
    let mut settings = match &cli.settings {
        Some(path) => match Settings::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading settings '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    if let Some(chart_type) = cli.chart_type {
        settings = settings.with_chart_type(chart_type);
    }

    // Read input
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let config = RenderConfig::new()
        .with_size(cli.width, cli.height)
        .with_settings(settings)
        .with_stylesheet(stylesheet)
        .with_debug(cli.debug);
    match render_with_config(&source, config) {
        Ok(svg) => {
            println!("{}", svg);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_intro() {
    let types: Vec<&str> = ChartType::ALL.iter().map(|t| t.as_str()).collect();
    println!(
        r#"IBCS Charts - variance charts from CSV data

USAGE:
    ibcs-charts [OPTIONS] [FILE]
    cat sales.csv | ibcs-charts

OPTIONS:
    -c, --settings     Chart settings (TOML file)
    -s, --stylesheet   Custom color palette (TOML file)
    --width, --height  Viewport size in pixels (default 800x400)
    -t, --chart-type   One of: {}
    -d, --debug        Outline layout regions
    -v, --verbose      Log progress to stderr
    -h, --help         Print help

QUICK START:
    printf 'category,actual,budget\nNorth,120,100\nSouth,90,100\n' | ibcs-charts > chart.svg

Columns are matched by header: category, group, actual, budget,
previous_year, forecast, comment. Only category and actual are required."#,
        types.join(", ")
    );
}
