//! Shared record types for the hanzi knowledge base.
//!
//! Each source table has its own record shape; the assembler merges them
//! into per-character and per-word views. All fields are plain owned data —
//! records are built once at load time and never mutated, so there is no
//! borrowing from a backing buffer here.
//!
//! Serialized names follow the original service's JSON output (camelCase,
//! optional fields omitted when absent), so assembled records can be handed
//! to a transport or bulk-export consumer as-is.
//!
//! ```rust
//! use hanzi_types::single_char;
//!
//! assert_eq!(single_char(" 火 "), Some('火'));
//! assert_eq!(single_char("火山"), None);
//! assert_eq!(single_char(""), None);
//! ```

use serde::{Deserialize, Serialize};

/// Canonical radical table row: stroke count, translation, optional variant
/// glyph. The source file names the translation field `english`; it is
/// exposed (and re-serialized) as `translation`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RadicalRecord {
    pub strokes: Option<u32>,
    #[serde(rename(deserialize = "english"))]
    pub translation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<char>,
}

/// A radical reference resolved through the canonical table. `radical` is
/// always the canonical glyph, even when the reference used a variant form.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ResolvedRadical {
    pub radical: char,
    pub strokes: Option<u32>,
    pub translation: String,
}

/// Per-character attribute record from the attribute table.
///
/// `freq_rank` and `stroke_count` are `None` both when the source field is
/// absent and when it fails to parse — the two cases are deliberately not
/// distinguished. `semantic_radical` is omitted when the character is its
/// own radical or when the reference cannot be resolved.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub character: char,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freq_rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinyin: Option<String>,
    pub definitions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_radical: Option<ResolvedRadical>,
}

/// Dictionary entry keyed by headword: tone-marked pronunciation plus the
/// ordered gloss list.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DictionaryEntry {
    pub pinyin: String,
    pub definitions: Vec<String>,
}

/// One ranked entry in a character's common-word list.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CommonWord {
    pub word: String,
    pub frequency: f64,
}

/// Fully merged per-character view: the attribute record joined with the
/// word-frequency data. A character with no lexical data gets
/// `is_unbound: false` and an empty word list.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CharacterEntry {
    #[serde(flatten)]
    pub record: CharacterRecord,
    pub is_unbound: bool,
    pub common_words: Vec<CommonWord>,
}

/// Interpret a table cell or key as a single character.
///
/// Surrounding whitespace is tolerated; anything longer than one character
/// (or empty) is rejected.
pub fn single_char(text: &str) -> Option<char> {
    let mut chars = text.trim().chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_char_rejects_multi_char_cells() {
        assert_eq!(single_char("火"), Some('火'));
        assert_eq!(single_char("  灬\t"), Some('灬'));
        assert_eq!(single_char("火山"), None);
        assert_eq!(single_char(""), None);
        assert_eq!(single_char("   "), None);
    }

    #[test]
    fn character_record_omits_absent_fields() {
        let record = CharacterRecord {
            character: '火',
            freq_rank: Some(10),
            pinyin: Some("huǒ".into()),
            definitions: vec!["fire".into(), "urgent".into()],
            stroke_count: Some(4),
            semantic_radical: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["character"], "火");
        assert_eq!(json["freqRank"], 10);
        assert_eq!(json["strokeCount"], 4);
        assert!(json.get("semanticRadical").is_none());
    }

    #[test]
    fn character_entry_flattens_record() {
        let entry = CharacterEntry {
            record: CharacterRecord {
                character: '山',
                freq_rank: None,
                pinyin: Some("shān".into()),
                definitions: vec!["mountain".into()],
                stroke_count: Some(3),
                semantic_radical: Some(ResolvedRadical {
                    radical: '山',
                    strokes: Some(3),
                    translation: "mountain".into(),
                }),
            },
            is_unbound: true,
            common_words: vec![CommonWord {
                word: "火山".into(),
                frequency: 12.5,
            }],
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["character"], "山");
        assert_eq!(json["isUnbound"], true);
        assert_eq!(json["commonWords"][0]["word"], "火山");
        assert_eq!(json["semanticRadical"]["radical"], "山");
        assert!(json.get("freqRank").is_none());
    }

    #[test]
    fn radical_record_reads_renamed_translation_field() {
        let record: RadicalRecord =
            serde_json::from_str(r#"{"strokes": 4, "english": "fire", "variant": "灬"}"#).unwrap();
        assert_eq!(record.translation, "fire");
        assert_eq!(record.variant, Some('灬'));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["translation"], "fire");
    }
}
