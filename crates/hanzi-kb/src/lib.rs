//! Assembled, read-only Chinese-character knowledge base.
//!
//! [`KnowledgeBase::load`] runs the source loaders — attribute table with
//! radical resolution, word-frequency corpus, dictionary, recommended terms
//! — and joins them into one immutable state object. Independent sources
//! load concurrently, but nothing is queryable until every loader has
//! finished: a malformed source aborts the whole load and no handle is ever
//! produced (fail closed). After that the `Arc<KnowledgeBase>` can be shared
//! with any number of readers; every operation is a pure read.
//!
//! ```no_run
//! use hanzi_kb::{KbConfig, KnowledgeBase};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let kb = KnowledgeBase::load(KbConfig::from_data_dir("data")).await?;
//! let fire = kb.character('火')?;
//! println!("{} is unbound: {}", fire.record.character, fire.is_unbound);
//! # Ok(()) }
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::spawn_blocking;
use tracing::info;

use hanzi_db::{DEFAULT_TOP_WORDS, LexicalIndex, RadicalTable, load_attribute_table};
use hanzi_types::{CharacterEntry, CharacterRecord, DictionaryEntry, RadicalRecord};

/// Where the dictionary comes from: the legacy line format, or a
/// preprocessed JSON dump that skips re-parsing it.
#[derive(Clone, Debug)]
pub enum DictionarySource {
    Legacy(PathBuf),
    Precomputed(PathBuf),
}

/// Paths and knobs for [`KnowledgeBase::load`].
#[derive(Clone, Debug)]
pub struct KbConfig {
    pub attribute_path: PathBuf,
    pub radical_path: PathBuf,
    pub lexical_path: PathBuf,
    pub dictionary: DictionarySource,
    pub recommended_path: PathBuf,
    pub top_words: usize,
}

impl KbConfig {
    /// Conventional file names under a single data directory, preferring the
    /// precomputed dictionary dump when it exists.
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let dump = dir.join("cc-cedict.json");
        let dictionary = if dump.exists() {
            DictionarySource::Precomputed(dump)
        } else {
            DictionarySource::Legacy(dir.join("cedict_ts.u8"))
        };
        Self {
            attribute_path: dir.join("hanzidb-formatted.json"),
            radical_path: dir.join("radicals.json"),
            lexical_path: dir.join("cldb-small.csv"),
            dictionary,
            recommended_path: dir.join("recommended-search-terms.en.json"),
            top_words: DEFAULT_TOP_WORDS,
        }
    }
}

/// Errors surfaced by the query operations. Lookup misses on words and
/// radicals are plain `Option`s; only character lookup treats absence as an
/// error.
#[derive(Debug, Error)]
pub enum KbError {
    #[error("character not found: {0}")]
    CharacterNotFound(char),
}

/// One page of character records, most frequent first.
#[derive(Clone, Debug, Serialize)]
pub struct CharacterPage {
    pub total: usize,
    pub has_more: bool,
    pub items: Vec<CharacterRecord>,
}

/// The joined, immutable state behind the query API.
pub struct KnowledgeBase {
    characters: HashMap<char, CharacterRecord>,
    by_rank: Vec<char>,
    radicals: RadicalTable,
    lexical: LexicalIndex,
    dictionary: HashMap<String, DictionaryEntry>,
    recommended: Vec<String>,
}

impl KnowledgeBase {
    /// Load every source and assemble the knowledge base.
    ///
    /// The attribute/radical pair, the frequency corpus, the dictionary, and
    /// the recommended-terms list are independent and run on blocking tasks
    /// joined together; the first failure wins and nothing partial escapes.
    pub async fn load(config: KbConfig) -> Result<Arc<Self>> {
        let KbConfig {
            attribute_path,
            radical_path,
            lexical_path,
            dictionary,
            recommended_path,
            top_words,
        } = config;

        let characters_task = spawn_blocking(move || -> Result<_> {
            let radicals = RadicalTable::load(&radical_path)?;
            let characters = load_attribute_table(&attribute_path, &radicals)?;
            Ok((characters, radicals))
        });
        let lexical_task =
            spawn_blocking(move || LexicalIndex::from_csv_file(&lexical_path, top_words));
        let dictionary_task = spawn_blocking(move || match dictionary {
            DictionarySource::Legacy(path) => hanzi_db::parse_dictionary(path),
            DictionarySource::Precomputed(path) => hanzi_db::load_dictionary_json(path),
        });
        let recommended_task = spawn_blocking(move || load_recommended_terms(&recommended_path));

        let (characters, lexical, dictionary, recommended) = tokio::try_join!(
            characters_task,
            lexical_task,
            dictionary_task,
            recommended_task
        )
        .context("source loader task panicked")?;
        let (characters, radicals) = characters?;
        let lexical = lexical?;
        let dictionary = dictionary?;
        let recommended = recommended?;

        let by_rank = rank_order(&characters);
        info!(
            "knowledge base assembled: {} characters, {} dictionary entries, {} indexed by corpus",
            characters.len(),
            dictionary.len(),
            lexical.character_count()
        );

        Ok(Arc::new(Self {
            characters,
            by_rank,
            radicals,
            lexical,
            dictionary,
            recommended,
        }))
    }

    /// The merged per-character view.
    ///
    /// A character the corpus never saw still succeeds, with
    /// `is_unbound: false` and an empty common-word list; only a missing
    /// attribute record is an error.
    pub fn character(&self, character: char) -> Result<CharacterEntry, KbError> {
        let record = self
            .characters
            .get(&character)
            .ok_or(KbError::CharacterNotFound(character))?;
        Ok(CharacterEntry {
            record: record.clone(),
            is_unbound: self.lexical.is_unbound(character),
            common_words: self.lexical.common_words(character).to_vec(),
        })
    }

    /// One page of the full character table, most frequent first (ascending
    /// frequency rank, unranked records last, ties by codepoint). Pages are
    /// 1-based; an out-of-range page is empty but still reports the total.
    pub fn characters(&self, page: usize, page_size: usize) -> CharacterPage {
        let total = self.by_rank.len();
        let offset = page.saturating_sub(1).saturating_mul(page_size);
        let items: Vec<CharacterRecord> = self
            .by_rank
            .iter()
            .skip(offset)
            .take(page_size)
            .map(|c| self.characters[c].clone())
            .collect();
        let has_more = offset + items.len() < total;
        CharacterPage {
            total,
            has_more,
            items,
        }
    }

    /// Exact-match dictionary lookup; absence is not an error.
    pub fn dictionary_entry(&self, word: &str) -> Option<&DictionaryEntry> {
        self.dictionary.get(word)
    }

    /// The fixed, load-time list of recommended search terms.
    pub fn recommended_terms(&self) -> &[String] {
        &self.recommended
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    // Flattened accessors for one-shot bulk consumers (document-store
    // export and the like).

    /// Every character record in pagination order.
    pub fn character_records(&self) -> impl Iterator<Item = &CharacterRecord> {
        self.by_rank.iter().map(|c| &self.characters[c])
    }

    /// Every dictionary entry with its headword.
    pub fn dictionary_entries(&self) -> impl Iterator<Item = (&str, &DictionaryEntry)> {
        self.dictionary.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every canonical radical record.
    pub fn radical_records(&self) -> impl Iterator<Item = (char, &RadicalRecord)> {
        self.radicals.iter()
    }

    /// Every character's ranked common-word list from the corpus.
    pub fn common_word_lists(&self) -> impl Iterator<Item = (char, &[hanzi_types::CommonWord])> {
        self.lexical.iter()
    }
}

/// Deterministic pagination order: ascending frequency rank (rank 1 = most
/// frequent first), unranked records after every ranked one, ties broken by
/// codepoint.
fn rank_order(characters: &HashMap<char, CharacterRecord>) -> Vec<char> {
    let mut order: Vec<char> = characters.keys().copied().collect();
    order.sort_by_key(|c| (characters[c].freq_rank.unwrap_or(u32::MAX), *c));
    order
}

#[derive(Deserialize)]
struct RecommendedTerms {
    terms: Vec<String>,
}

fn load_recommended_terms(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let raw: RecommendedTerms = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse recommended terms {}", path.display()))?;
    Ok(raw.terms)
}
