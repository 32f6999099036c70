//! wdtk-constraints CLI
//!
//! Usage:
//!   wdtk-constraints [OPTIONS] [FILES]...
//!
//! Options:
//!   -c, --config <FILE>    Configuration file (TOML format)
//!   -f, --format <FORMAT>  Output format: owl or turtle
//!   -t, --title <TITLE>    Page title of the text read from stdin
//!       --templates        Print the collected templates instead of rendering
//!   -v, --verbose          Increase log verbosity
//!   -h, --help             Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use wdtk_constraints::processor::wikidata_namespaces;
use wdtk_constraints::{
    translate_pages, OutputFormat, PipelineConfig, PropertyId, Revision, RevisionProcessor,
    TemplateCollector,
};

#[derive(Parser)]
#[command(name = "wdtk-constraints")]
#[command(about = "Translate Wikidata property constraint templates into OWL")]
struct Cli {
    /// Wikitext files of property talk pages (reads from stdin if none given)
    inputs: Vec<PathBuf>,

    /// Configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format, overriding the configuration
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Page title of the text read from stdin
    #[arg(short, long, default_value = "Property talk:P1")]
    title: String,

    /// Print the templates found on each property page instead of rendering
    #[arg(long)]
    templates: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    if cli.inputs.is_empty() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => match PipelineConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading configuration '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => PipelineConfig::default(),
    };
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    // Setup logging
    let log_level = match cli.verbose {
        0 => match config.logging.level() {
            Ok(level) => level,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error installing logger: {}", e);
    }

    // Read input
    let pages = match read_pages(&cli) {
        Ok(pages) => pages,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let revisions = pages
        .iter()
        .map(|(title, text)| Revision::new(title, text));

    if cli.templates {
        let mut collector = TemplateCollector::new(config.namespaces);
        collector.start_revision_processing(&wikidata_namespaces());
        for revision in revisions {
            collector.process_revision(&revision);
        }
        collector.finish_revision_processing();
        for (property, templates) in collector.templates() {
            println!("{}", property);
            for template in templates {
                println!("  {}", template);
            }
        }
        return;
    }

    match translate_pages(revisions, &config) {
        Ok(output) => {
            for (title, err) in &output.malformed {
                eprint!("{}", err.format(title));
            }
            for err in &output.errors {
                eprintln!("Error: {}", err);
            }
            print!("{}", output.document);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Read every input as `(title, text)`
fn read_pages(cli: &Cli) -> Result<Vec<(String, String)>, String> {
    if cli.inputs.is_empty() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("reading from stdin: {}", e))?;
        return Ok(vec![(cli.title.clone(), buffer)]);
    }

    cli.inputs
        .iter()
        .map(|path| {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("reading file '{}': {}", path.display(), e))?;
            Ok((title_for(path), text))
        })
        .collect()
}

/// Page title of a file: `P31.wiki` is read as `Property talk:P31`
fn title_for(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.parse::<PropertyId>() {
        Ok(property) => format!("Property talk:{}", property),
        Err(_) => stem,
    }
}

fn print_intro() {
    println!(
        r#"wdtk-constraints - Wikidata property constraints as OWL

USAGE:
    wdtk-constraints [OPTIONS] [FILES]...
    cat page.wiki | wdtk-constraints --title "Property talk:P21"

OPTIONS:
    -c, --config      Configuration file (TOML)
    -f, --format      Output format: owl (default) or turtle
    -t, --title       Page title of the text read from stdin
    --templates       Print collected templates instead of rendering
    -v, --verbose     More logging (-vv for trace)
    -h, --help        Print help

QUICK START:
    echo '{{{{Constraint:Single value}}}}' | wdtk-constraints -t 'Property talk:P21'

Files named after a property (P21.wiki) are read as that property's talk page."#
    );
}
