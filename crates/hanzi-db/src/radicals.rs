//! Canonical radical table and its derived variant index.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use hanzi_types::{RadicalRecord, ResolvedRadical, single_char};
use tracing::{info, warn};

/// Lookup table for semantic-radical references.
///
/// Built once from the radical JSON table. Lookups check the canonical map
/// first and fall back to the variant index, so a glyph that is somehow both
/// a canonical radical and someone's variant resolves to its canonical
/// record.
pub struct RadicalTable {
    canonical: HashMap<char, RadicalRecord>,
    by_variant: HashMap<char, char>,
}

impl RadicalTable {
    /// Load the radical table from a JSON object keyed by radical glyph.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
        let raw: HashMap<String, RadicalRecord> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parse radical table {}", path.display()))?;

        let mut canonical = HashMap::with_capacity(raw.len());
        for (key, record) in raw {
            let radical = single_char(&key).with_context(|| {
                format!(
                    "radical table {} key {:?} is not a single character",
                    path.display(),
                    key
                )
            })?;
            canonical.insert(radical, record);
        }

        let mut by_variant = HashMap::new();
        for (&radical, record) in &canonical {
            let Some(variant) = record.variant else {
                continue;
            };
            if canonical.contains_key(&variant) {
                warn!("radical {radical} lists canonical glyph {variant} as its variant; ignored");
                continue;
            }
            by_variant.insert(variant, radical);
        }

        info!(
            "loaded {} radicals ({} variant glyphs)",
            canonical.len(),
            by_variant.len()
        );
        Ok(Self {
            canonical,
            by_variant,
        })
    }

    /// Resolve a radical reference to its canonical record.
    ///
    /// Returns `None` when the glyph matches neither a canonical radical nor
    /// a variant — callers treat that as "radical unknown", not an error.
    pub fn resolve(&self, key: char) -> Option<ResolvedRadical> {
        if let Some(record) = self.canonical.get(&key) {
            return Some(resolved(key, record));
        }
        let canonical_key = *self.by_variant.get(&key)?;
        let record = self.canonical.get(&canonical_key)?;
        Some(resolved(canonical_key, record))
    }

    /// Iterate the canonical records, e.g. for a bulk export.
    pub fn iter(&self) -> impl Iterator<Item = (char, &RadicalRecord)> {
        self.canonical.iter().map(|(&k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

fn resolved(radical: char, record: &RadicalRecord) -> ResolvedRadical {
    ResolvedRadical {
        radical,
        strokes: record.strokes,
        translation: record.translation.clone(),
    }
}
