//! Word-frequency corpus aggregation.
//!
//! Streams the tabular word list (word, up to four constituent characters,
//! frequency score) and builds two things per character: the top-K most
//! frequent multi-character words containing it, and a flag for whether the
//! character occurs standalone as a one-character word.
//!
//! Unlike the dictionary parser this stage is not line-tolerant: the final
//! ranking depends on every row, so any malformed row aborts the load.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};
use hanzi_types::{CommonWord, single_char};
use tracing::info;

/// Common-word list size used when the caller does not override it.
pub const DEFAULT_TOP_WORDS: usize = 6;

const CHARACTER_COLUMNS: [&str; 4] = ["C1", "C2", "C3", "C4"];

/// Per-character index over the word-frequency corpus.
pub struct LexicalIndex {
    words: HashMap<char, Vec<CommonWord>>,
    unbound: HashSet<char>,
}

struct Columns {
    word: usize,
    frequency: usize,
    characters: [usize; 4],
}

impl Columns {
    fn from_header(header: &str) -> Result<Self> {
        let names: Vec<&str> = header.split(',').map(str::trim).collect();
        let find = |name: &str| {
            names
                .iter()
                .position(|n| *n == name)
                .with_context(|| format!("corpus header is missing the {name} column"))
        };
        Ok(Self {
            word: find("Word")?,
            frequency: find("Frequency")?,
            characters: [
                find(CHARACTER_COLUMNS[0])?,
                find(CHARACTER_COLUMNS[1])?,
                find(CHARACTER_COLUMNS[2])?,
                find(CHARACTER_COLUMNS[3])?,
            ],
        })
    }
}

impl LexicalIndex {
    /// Stream the corpus and build the index, keeping the `top_words` most
    /// frequent multi-character words per character.
    pub fn from_csv_file(path: impl AsRef<Path>, top_words: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        let header = lines
            .next()
            .with_context(|| format!("{} is empty", path.display()))?
            .with_context(|| format!("read header of {}", path.display()))?;
        let columns = Columns::from_header(&header)?;

        let mut words: HashMap<char, Vec<CommonWord>> = HashMap::new();
        let mut unbound = HashSet::new();
        let mut rows = 0usize;
        for (lineno, line) in lines.enumerate() {
            let rowno = lineno + 2;
            let line =
                line.with_context(|| format!("read {}:{}", path.display(), rowno))?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();

            let word = fields
                .get(columns.word)
                .map(|w| w.trim())
                .with_context(|| format!("{}:{} missing word column", path.display(), rowno))?;
            let frequency: f64 = fields
                .get(columns.frequency)
                .map(|f| f.trim())
                .with_context(|| format!("{}:{} missing frequency column", path.display(), rowno))?
                .parse()
                .with_context(|| format!("{}:{} unparseable frequency", path.display(), rowno))?;
            if !frequency.is_finite() {
                bail!("{}:{} non-finite frequency", path.display(), rowno);
            }

            for &index in &columns.characters {
                let cell = fields.get(index).map(|f| f.trim()).unwrap_or("");
                if cell.is_empty() {
                    continue;
                }
                let character = single_char(cell).with_context(|| {
                    format!(
                        "{}:{} cell {:?} is not a single character",
                        path.display(),
                        rowno,
                        cell
                    )
                })?;
                words.entry(character).or_default().push(CommonWord {
                    word: word.to_string(),
                    frequency,
                });
            }

            // A one-character word marks its character as usable standalone.
            if let Some(character) = single_char(word) {
                unbound.insert(character);
            }
            rows += 1;
        }

        // Ranking needs the complete stream: filter out single-character
        // "words", stable-sort descending by frequency (ties keep source
        // order), and cap each list.
        for list in words.values_mut() {
            list.retain(|w| w.word.chars().count() >= 2);
            list.sort_by(|a, b| {
                b.frequency
                    .partial_cmp(&a.frequency)
                    .unwrap_or(Ordering::Equal)
            });
            list.truncate(top_words);
        }
        words.retain(|_, list| !list.is_empty());

        info!(
            "aggregated {} corpus rows into {} character indexes",
            rows,
            words.len()
        );
        Ok(Self { words, unbound })
    }

    /// The ranked common-word list for a character; empty when the corpus
    /// never saw it in a multi-character word.
    pub fn common_words(&self, character: char) -> &[CommonWord] {
        self.words
            .get(&character)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the character occurs standalone as a one-character word.
    pub fn is_unbound(&self, character: char) -> bool {
        self.unbound.contains(&character)
    }

    /// Iterate every indexed character with its ranked word list, e.g. for a
    /// bulk export.
    pub fn iter(&self) -> impl Iterator<Item = (char, &[CommonWord])> {
        self.words.iter().map(|(&c, list)| (c, list.as_slice()))
    }

    pub fn character_count(&self) -> usize {
        self.words.len()
    }
}
