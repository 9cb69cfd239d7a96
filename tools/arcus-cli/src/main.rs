mod config;
mod treebank;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use arcus_eval::{DependencyTree, Evaluator};
use arcus_parser::{replay, tab, ParserDriver, SystemKind};
use arcus_protocol::{Action, Sentence, SentenceId, TokenRecord, EMPTY_FIELD};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::FileConfig;

#[derive(Parser)]
#[command(author, version, about = "Static-oracle transition parsing and attachment scoring")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Oracle-parse a gold treebank and report UAS/LAS
    Eval {
        /// Tab treebank (word, tag, head, label) or a compiled .rkyv archive
        file: PathBuf,

        #[arg(long)]
        system: Option<SystemKind>,

        /// Print at most this many mismatches
        #[arg(long)]
        show: Option<usize>,

        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Oracle-parse a treebank and print every predicted tree
    Parse {
        file: PathBuf,

        #[arg(long)]
        system: Option<SystemKind>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Tree)]
        format: OutputFormat,

        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Apply a literal action sequence to a sentence and print the tree
    Replay {
        /// Space-separated words, without the root
        #[arg(long)]
        sentence: String,

        /// Actions separated by spaces or commas, e.g. "SHIFT LEFT-ARC(det)"
        #[arg(long)]
        actions: String,

        #[arg(long, default_value_t = SystemKind::ArcEager)]
        system: SystemKind,
    },

    /// Archive a tab treebank with rkyv
    Compile {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Tree,
    Tab,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Option<FileConfig>> {
    path.map(|p| FileConfig::load(p)).transpose()
}

fn run_eval(
    file: PathBuf,
    system: Option<SystemKind>,
    show: Option<usize>,
    config_path: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let config = config::resolve(load_config(config_path.as_ref())?, system, show);
    let treebank = treebank::load(&file)?;
    let report = Evaluator::new(config).evaluate(&treebank)?;

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        write!(out, "{report}")?;
    }
    Ok(())
}

fn run_parse(
    file: PathBuf,
    system: Option<SystemKind>,
    format: OutputFormat,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = config::resolve(load_config(config_path.as_ref())?, system, None);
    let treebank = treebank::load(&file)?;
    let driver = ParserDriver::new(config.system.system(), config.driver);

    let mut out = io::stdout().lock();
    for sentence in &treebank.sentences {
        let (result, _) = driver.parse(sentence)?;
        match format {
            OutputFormat::Tree => {
                write!(out, "{}", DependencyTree::from_result(sentence, &result))?
            }
            OutputFormat::Tab => tab::write_tab(&mut out, sentence, &result)?,
        }
    }
    Ok(())
}

fn run_replay(words: &str, actions: &str, system: SystemKind) -> anyhow::Result<()> {
    let records = words
        .split_whitespace()
        .map(|word| TokenRecord {
            word: word.to_string(),
            tag: EMPTY_FIELD.to_string(),
            head: 0,
            label: EMPTY_FIELD.to_string(),
        })
        .collect();
    let sentence = Sentence::new(SentenceId(0), records)?;

    let actions = actions
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|a| !a.is_empty())
        .map(|a| a.parse::<Action>())
        .collect::<Result<Vec<_>, _>>()?;

    let run = replay(system.system(), sentence.len(), &actions)?;
    for &position in &run.skipped {
        warn!(position, action = %actions[position], "action had no effect");
    }

    let result = run.into_result(sentence.len());
    write!(io::stdout().lock(), "{}", DependencyTree::from_result(&sentence, &result))?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arcus=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Eval { file, system, show, config, json } => {
            run_eval(file, system, show, config, json)
        }
        Command::Parse { file, system, format, config } => {
            run_parse(file, system, format, config)
        }
        Command::Replay { sentence, actions, system } => {
            run_replay(&sentence, &actions, system)
        }
        Command::Compile { input, output } => {
            let sentences = treebank::compile(&input, &output)
                .with_context(|| format!("failed to compile {}", input.display()))?;
            info!(sentences, output = %output.display(), "treebank archived");
            println!("Archived {} sentences to {}", sentences, output.display());
            Ok(())
        }
    }
}
