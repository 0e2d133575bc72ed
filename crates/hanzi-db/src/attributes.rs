//! Per-character attribute table loader.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use hanzi_types::{CharacterRecord, single_char};
use serde::Deserialize;
use tracing::info;

use crate::radicals::RadicalTable;

/// Raw attribute row as it appears in the source file. All values are
/// strings; numeric fields are parsed after the fact.
#[derive(Deserialize)]
struct RawAttributeRow {
    // the key is misspelled in the raw data
    #[serde(rename = "charcter")]
    character: String,
    frequency_rank: Option<String>,
    pinyin: Option<String>,
    radical: Option<String>,
    definition: Option<String>,
    stroke_count: Option<String>,
}

/// Load the attribute table into a per-character map, resolving semantic
/// radicals through `radicals`.
///
/// A row whose key is not a single character aborts the load. Numeric
/// fields that are absent or unparseable both come out as `None`. A
/// character whose radical reference is itself gets no `semantic_radical`
/// at all, and neither does one whose reference resolves to nothing.
pub fn load_attribute_table(
    path: impl AsRef<Path>,
    radicals: &RadicalTable,
) -> Result<HashMap<char, CharacterRecord>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let rows: Vec<RawAttributeRow> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse attribute table {}", path.display()))?;

    // First pass: build the records, keeping each raw radical reference
    // aside for the resolution pass.
    let mut table = HashMap::with_capacity(rows.len());
    let mut pending = Vec::new();
    for (rowno, row) in rows.into_iter().enumerate() {
        let character = single_char(&row.character).with_context(|| {
            format!(
                "attribute table {} row {}: key {:?} is not a single character",
                path.display(),
                rowno + 1,
                row.character
            )
        })?;

        table.insert(
            character,
            CharacterRecord {
                character,
                freq_rank: parse_count(row.frequency_rank.as_deref()),
                pinyin: row.pinyin,
                definitions: row.definition.as_deref().map_or_else(Vec::new, split_definitions),
                stroke_count: parse_count(row.stroke_count.as_deref()),
                semantic_radical: None,
            },
        );
        if let Some(reference) = row.radical.as_deref().and_then(single_char) {
            pending.push((character, reference));
        }
    }

    // Second pass: attach resolved radicals. A self-reference carries no
    // information and is dropped outright.
    for (character, reference) in pending {
        if reference == character {
            continue;
        }
        if let Some(record) = table.get_mut(&character) {
            record.semantic_radical = radicals.resolve(reference);
        }
    }

    info!("loaded {} character records", table.len());
    Ok(table)
}

/// Absence and parse failure are the same thing here.
fn parse_count(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse().ok())
}

fn split_definitions(raw: &str) -> Vec<String> {
    raw.split([';', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn radical_fixture() -> RadicalTable {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(
            r#"{
                "火": {"strokes": 4, "english": "fire", "variant": "灬"},
                "水": {"strokes": 4, "english": "water", "variant": "氵"}
            }"#
            .as_bytes(),
        )
        .unwrap();
        RadicalTable::load(file.path()).expect("radical fixture")
    }

    fn load(json: &str) -> Result<HashMap<char, CharacterRecord>> {
        let radicals = radical_fixture();
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(json.as_bytes()).unwrap();
        load_attribute_table(file.path(), &radicals)
    }

    #[test]
    fn parses_fields_and_elides_self_radical() {
        let table = load(
            r#"[{
                "charcter": "火",
                "frequency_rank": "10",
                "pinyin": "huǒ",
                "radical": "火",
                "definition": "fire; urgent",
                "stroke_count": "4"
            }]"#,
        )
        .unwrap();
        let fire = &table[&'火'];
        assert_eq!(fire.freq_rank, Some(10));
        assert_eq!(fire.stroke_count, Some(4));
        assert_eq!(fire.definitions, vec!["fire", "urgent"]);
        assert_eq!(fire.pinyin.as_deref(), Some("huǒ"));
        assert!(fire.semantic_radical.is_none());
    }

    #[test]
    fn resolves_variant_radical_references() {
        let table = load(
            r#"[{
                "charcter": "然",
                "frequency_rank": "51",
                "pinyin": "rán",
                "radical": "灬",
                "definition": "so; thus",
                "stroke_count": "12"
            }]"#,
        )
        .unwrap();
        let radical = table[&'然'].semantic_radical.as_ref().expect("resolved");
        assert_eq!(radical.radical, '火');
        assert_eq!(radical.translation, "fire");
    }

    #[test]
    fn unparseable_counts_read_as_absent() {
        let table = load(
            r#"[{
                "charcter": "山",
                "frequency_rank": "not-a-number",
                "pinyin": "shān",
                "definition": "mountain"
            }]"#,
        )
        .unwrap();
        let mountain = &table[&'山'];
        assert_eq!(mountain.freq_rank, None);
        assert_eq!(mountain.stroke_count, None);
        assert_eq!(mountain.definitions, vec!["mountain"]);
    }

    #[test]
    fn unknown_radical_reference_is_omitted() {
        let table = load(
            r#"[{
                "charcter": "狗",
                "frequency_rank": "810",
                "pinyin": "gǒu",
                "radical": "犬",
                "definition": "dog",
                "stroke_count": "8"
            }]"#,
        )
        .unwrap();
        assert!(table[&'狗'].semantic_radical.is_none());
    }

    #[test]
    fn multi_character_key_is_fatal() {
        assert!(load(r#"[{"charcter": "火山", "definition": "volcano"}]"#).is_err());
    }

    #[test]
    fn empty_definition_splits_to_nothing() {
        let table = load(r#"[{"charcter": "乭", "definition": " ; , "}]"#).unwrap();
        assert!(table[&'乭'].definitions.is_empty());
    }
}
