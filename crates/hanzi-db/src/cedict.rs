//! Streaming parser for the CC-CEDICT legacy line format.
//!
//! Each dictionary line looks like
//!
//! ```text
//! 火山 火山 [huo3 shan1] /volcano/
//! ```
//!
//! traditional form, simplified form, bracketed numeric-tone pinyin, then
//! slash-delimited glosses. Entries are keyed by the simplified form (the
//! one character lookups use) and the pinyin is tone-marked on the way in.
//! Lines that do not match the grammar — comments, stray headers, anything
//! with trailing content after the final gloss delimiter — are skipped, not
//! fatal; a repeated headword keeps the last entry seen.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use hanzi_types::DictionaryEntry;
use tracing::{debug, info};

/// Stream the legacy dictionary file into a headword-keyed map.
pub fn parse_dictionary(path: impl AsRef<Path>) -> Result<HashMap<String, DictionaryEntry>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut entries = HashMap::new();
    let mut skipped = 0usize;
    for (lineno, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("read line {} in {}", lineno + 1, path.display()))?;
        match parse_line(&line) {
            Some((headword, entry)) => {
                entries.insert(headword, entry);
            }
            None => {
                if !line.trim().is_empty() {
                    debug!("{}:{} does not match the entry grammar", path.display(), lineno + 1);
                    skipped += 1;
                }
            }
        }
    }

    info!(
        "parsed {} dictionary entries ({} lines skipped)",
        entries.len(),
        skipped
    );
    Ok(entries)
}

/// Load a precomputed dictionary dump, skipping the legacy parse entirely.
pub fn load_dictionary_json(path: impl AsRef<Path>) -> Result<HashMap<String, DictionaryEntry>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let entries: HashMap<String, DictionaryEntry> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse dictionary dump {}", path.display()))?;
    info!("loaded {} precomputed dictionary entries", entries.len());
    Ok(entries)
}

/// Parse one line against the fixed grammar; `None` means the line is
/// skipped.
fn parse_line(line: &str) -> Option<(String, DictionaryEntry)> {
    let (traditional, rest) = line.split_once(' ')?;
    if traditional.is_empty() {
        return None;
    }
    let (simplified, rest) = rest.split_once(' ')?;
    if simplified.is_empty() {
        return None;
    }

    let rest = rest.strip_prefix('[')?;
    let (pinyin, rest) = rest.split_once(']')?;
    if pinyin.is_empty()
        || !pinyin
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ')
    {
        return None;
    }

    let rest = rest.strip_prefix(' ')?;
    let glosses = rest.strip_prefix('/')?;
    // The glosses must run to the last '/' on the line; trailing content
    // makes the line ambiguous and it is skipped whole.
    let (glosses, tail) = glosses.rsplit_once('/')?;
    if !tail.trim().is_empty() {
        return None;
    }
    // A second bracketed entry on the same line would otherwise be swallowed
    // into the gloss span; such lines are ambiguous and skipped whole.
    if glosses.contains("] /") {
        return None;
    }
    let definitions: Vec<String> = glosses
        .split('/')
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect();
    if definitions.is_empty() {
        return None;
    }

    Some((
        simplified.to_string(),
        DictionaryEntry {
            pinyin: hanzi_pinyin::mark_tones(pinyin),
            definitions,
        },
    ))
}
