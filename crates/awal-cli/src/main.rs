mod config;
mod session;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use awal_core::{
    Corpus, Language, MIN_QUERY_CHARS, RotationController, export_corpus, parse_corpus,
};
use clap::{Parser, Subcommand};

use crate::config::{CorpusSource, Overrides, Settings};
use crate::session::{Session, render};

/// Demo corpus compiled into the binary, used when no corpus is configured.
const BUNDLED_CORPUS: &str = include_str!("../data/quotes.json");

#[derive(Parser)]
#[command(name = "awal", about = "Bilingual (French/Kabyle) quote rotation")]
struct Cli {
    /// Corpus JSON file (overrides $AWAL_CORPUS and the config file)
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// Config file (default: $AWAL_CONFIG, then ~/.config/awal/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Starting language: fr or kab
    #[arg(long, global = true)]
    lang: Option<Language>,

    /// Seed for a reproducible rotation order
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print successive random quotes without repeats
    Next {
        /// Number of quotes to print
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,
    },

    /// Search text, author, source and translation in both languages
    Search {
        /// Case-insensitive substring (at least two characters)
        query: String,
    },

    /// Show per-language quote counts
    Stats,

    /// Write the effective corpus to a JSON file
    Export {
        /// Output file path
        path: PathBuf,
    },

    /// Line-driven session: Enter for next, 1/2 language, h history, s search
    Interactive,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = config::resolve(Overrides {
        config: cli.config.clone(),
        corpus: cli.corpus.clone(),
        language: cli.lang,
        seed: cli.seed,
    })?;
    tracing::debug!(?settings, "resolved settings");

    match &cli.command {
        Commands::Next { count } => cmd_next(&cli, &settings, *count),
        Commands::Search { query } => cmd_search(&settings, query),
        Commands::Stats => cmd_stats(&settings),
        Commands::Export { path } => cmd_export(&settings, path),
        Commands::Interactive => cmd_interactive(&settings),
    }
}

fn load_corpus(settings: &Settings) -> Result<Corpus> {
    match &settings.corpus {
        CorpusSource::Bundled => {
            parse_corpus(BUNDLED_CORPUS).context("bundled corpus is malformed")
        }
        CorpusSource::File(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read corpus {}", path.display()))?;
            parse_corpus(&content)
                .with_context(|| format!("failed to load corpus {}", path.display()))
        }
    }
}

fn open_controller(settings: &Settings) -> Result<RotationController> {
    let corpus = load_corpus(settings)?;
    let controller = match settings.seed {
        Some(seed) => RotationController::seeded(corpus, seed),
        None => RotationController::new(corpus),
    };
    Ok(controller.with_language(settings.language))
}

fn cmd_next(cli: &Cli, settings: &Settings, count: usize) -> Result<()> {
    let mut controller = open_controller(settings)?;
    let language = controller.target_language();

    for _ in 0..count {
        let quote = controller.advance(language)?;
        println!("{}", render(quote, language));
    }

    if cli.verbose {
        eprintln!(
            "--- pool: {language} remaining={}/{}, history={} ---",
            controller.remaining(language),
            controller.corpus().count(language),
            controller.history().len()
        );
    }
    Ok(())
}

fn cmd_search(settings: &Settings, query: &str) -> Result<()> {
    let corpus = load_corpus(settings)?;

    if query.chars().count() < MIN_QUERY_CHARS {
        println!("(query too short: at least {MIN_QUERY_CHARS} characters)");
        return Ok(());
    }

    let hits = awal_core::search(&corpus, query);
    if hits.is_empty() {
        println!("(no matches)");
    }
    for hit in &hits {
        println!("{:>3}  {}", hit.index, render(hit.quote, hit.language));
    }
    Ok(())
}

fn cmd_stats(settings: &Settings) -> Result<()> {
    let corpus = load_corpus(settings)?;

    let source = match &settings.corpus {
        CorpusSource::Bundled => "bundled".to_string(),
        CorpusSource::File(path) => path.display().to_string(),
    };
    println!("corpus:  {source}");
    for language in Language::ALL {
        println!("{:<8} {}", format!("{language}:"), corpus.count(language));
    }
    println!("total:   {}", corpus.total());
    Ok(())
}

fn cmd_export(settings: &Settings, path: &Path) -> Result<()> {
    let corpus = load_corpus(settings)?;

    let json = export_corpus(&corpus).context("failed to serialize corpus")?;
    std::fs::write(path, &json).with_context(|| format!("failed to write {}", path.display()))?;

    println!("exported {} quotes to {}", corpus.total(), path.display());
    Ok(())
}

fn cmd_interactive(settings: &Settings) -> Result<()> {
    let controller = open_controller(settings)?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    let mut session = Session::new(controller, stdout.lock());
    session.run(stdin.lock())
}
