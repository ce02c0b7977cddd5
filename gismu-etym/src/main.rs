use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gismu_etym_lib::loader::{self, Lexicon};
use gismu_etym_lib::{annotate, decompose, output, score, AnnotatorConfig};
use serde::Serialize;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gismu-etym", about = "Lojban gismu etymology and lujvo markup")]
struct Cli {
    /// Dictionary as a single JSON document.
    #[arg(long, conflicts_with = "gismu")]
    dict: Option<PathBuf>,

    /// Fixed-width gismu list (gismu.txt).
    #[arg(long)]
    gismu: Option<PathBuf>,

    /// Oblique keyword list, used with --gismu.
    #[arg(long, requires = "gismu")]
    oblique: Option<PathBuf>,

    /// Source word list as <lang>=<path>, e.g. zh=lojban-source-words_zh.txt.
    /// May be repeated. Used with --gismu.
    #[arg(long = "sources", requires = "gismu")]
    sources: Vec<String>,

    /// Annotator configuration (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decompose one word into gismu and rafsi.
    Decompose { word: String },

    /// Mark up gismu and lujvo in text. If omitted, reads from stdin.
    Annotate {
        text: Option<String>,

        /// Output in bracketed {text:gismu} format.
        #[arg(long, conflicts_with = "html")]
        bracketed: bool,

        /// Output HTML with one link per recognised piece.
        #[arg(long)]
        html: bool,
    },

    /// Score a source word transcription against a gismu.
    Score { gismu: String, word: String },

    /// Ranked etymology of a gismu, or of every gismu if omitted.
    Rank { gismu: Option<String> },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Score { gismu, word } => print_json(
            &json!({ "gismu": gismu, "word": word, "score": score(gismu, word) }),
            cli.pretty,
        ),
        Command::Decompose { word } => {
            let lexicon = load_lexicon(&cli)?;
            let result = match decompose(word, &lexicon.dictionary) {
                Ok(spans) => json!({ "word": word, "spans": spans }),
                Err(failure) => json!({ "word": word, "failure": failure }),
            };
            print_json(&result, cli.pretty)
        }
        Command::Annotate { text, bracketed, html } => {
            let lexicon = load_lexicon(&cli)?;
            let config = load_config(cli.config.as_deref())?;
            let mode = if *html {
                Mode::Html
            } else if *bracketed {
                Mode::Bracketed
            } else {
                Mode::Json
            };
            match text {
                Some(text) => annotate_line(text, &lexicon, &config, mode, cli.pretty),
                None => {
                    for line in io::stdin().lock().lines() {
                        let line = line.context("failed to read stdin")?;
                        if !line.trim().is_empty() {
                            annotate_line(&line, &lexicon, &config, mode, cli.pretty)?;
                        }
                    }
                    Ok(())
                }
            }
        }
        Command::Rank { gismu } => {
            let lexicon = load_lexicon(&cli)?;
            let gismu_list: Vec<String> = match gismu {
                Some(g) => {
                    if !lexicon.dictionary.is_root(g) {
                        bail!("unknown gismu {g:?}");
                    }
                    vec![g.clone()]
                }
                None => lexicon
                    .dictionary
                    .roots()
                    .sorted()
                    .into_iter()
                    .map(|r| r.gismu.clone())
                    .collect(),
            };
            for g in &gismu_list {
                print_json(&json!({ "gismu": g, "etymology": lexicon.etymology(g) }), cli.pretty)?;
            }
            Ok(())
        }
    }
}

#[derive(Clone, Copy)]
enum Mode {
    Json,
    Bracketed,
    Html,
}

fn annotate_line(
    line: &str,
    lexicon: &Lexicon,
    config: &AnnotatorConfig,
    mode: Mode,
    pretty: bool,
) -> Result<()> {
    let text = annotate(line, &lexicon.dictionary, config);
    match mode {
        Mode::Json => print_json(&text, pretty)?,
        Mode::Bracketed => println!("{}", output::text_to_bracketed(&text)),
        Mode::Html => println!("{}", output::text_to_html(&text, &lexicon.dictionary, config)),
    }
    Ok(())
}

fn load_lexicon(cli: &Cli) -> Result<Lexicon> {
    let lexicon = read_lexicon(cli)?;
    info!(
        gismu = lexicon.dictionary.roots().len(),
        rafsi = lexicon.dictionary.affixes().len(),
        "lexicon loaded"
    );
    Ok(lexicon)
}

fn read_lexicon(cli: &Cli) -> Result<Lexicon> {
    if let Some(path) = &cli.dict {
        return loader::load_json(path)
            .with_context(|| format!("failed to load dictionary {}", path.display()));
    }
    let Some(gismu_path) = &cli.gismu else {
        bail!("one of --dict or --gismu is required");
    };
    let sources = cli
        .sources
        .iter()
        .map(|arg| {
            loader::parse_source_arg(arg)
                .map(|(language, path)| (language, Path::new(path)))
                .with_context(|| format!("bad --sources value {arg:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    loader::load_word_lists(gismu_path, cli.oblique.as_deref(), &sources)
        .with_context(|| format!("failed to load word lists from {}", gismu_path.display()))
}

fn load_config(path: Option<&Path>) -> Result<AnnotatorConfig> {
    match path {
        Some(path) => AnnotatorConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(AnnotatorConfig::default()),
    }
}

fn print_json(value: &impl Serialize, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    println!("{}", json.context("JSON serialization failed")?);
    Ok(())
}
