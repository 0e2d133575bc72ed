use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use hanzi_kb::{DictionarySource, KbConfig, KbError, KnowledgeBase};
use hanzi_types::single_char;

const DEFAULT_DATA_DIR: &str = "data";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let (data_dir, queries) = parse_args();
    let mut config = KbConfig::from_data_dir(&data_dir);
    if let Ok(path) = env::var("CEDICT_PATH") {
        config.dictionary = DictionarySource::Legacy(PathBuf::from(path));
    }
    if let Some(top_words) = env::var("TOP_WORDS").ok().and_then(|v| v.parse().ok()) {
        config.top_words = top_words;
    }

    info!("loading knowledge base from {}", data_dir.display());
    let start = Instant::now();
    let kb = KnowledgeBase::load(config).await?;
    info!(
        "assembled {} characters in {} ms",
        kb.character_count(),
        start.elapsed().as_millis()
    );

    if queries.is_empty() {
        println!("Recommended terms: {}", kb.recommended_terms().join(", "));
        return Ok(());
    }

    for query in queries {
        match single_char(&query) {
            Some(character) => match kb.character(character) {
                Ok(entry) => println!("{}", serde_json::to_string_pretty(&entry)?),
                Err(KbError::CharacterNotFound(c)) => println!("{c}: not found"),
            },
            None => match kb.dictionary_entry(&query) {
                Some(entry) => {
                    println!("{query}: {}", serde_json::to_string_pretty(entry)?)
                }
                None => println!("{query}: not found"),
            },
        }
    }

    Ok(())
}

/// `--data-dir=PATH` (or the DATA_DIR env var) selects the data directory;
/// every remaining argument is a character or word to look up.
fn parse_args() -> (PathBuf, Vec<String>) {
    let mut data_dir = env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));
    let mut queries = Vec::new();
    for arg in env::args().skip(1) {
        if let Some(path) = arg.strip_prefix("--data-dir=") {
            data_dir = PathBuf::from(path);
        } else {
            queries.push(arg);
        }
    }
    (data_dir, queries)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
