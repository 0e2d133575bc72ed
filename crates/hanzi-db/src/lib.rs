//! Loaders for the heterogeneous hanzi data sources.
//!
//! Four independently-keyed sources feed the knowledge base:
//!
//! - [`cedict`]: the CC-CEDICT dictionary, either streamed from its legacy
//!   line format (tone-marking pinyin on the way in) or loaded from a
//!   precomputed JSON dump.
//! - [`attributes`]: the per-character attribute table (frequency rank,
//!   stroke count, definitions, semantic-radical reference).
//! - [`radicals`]: the canonical radical table plus its derived
//!   variant-glyph index.
//! - [`lexical`]: the word-frequency corpus, aggregated into per-character
//!   common-word rankings and standalone-word flags.
//!
//! Error policy differs by source, deliberately: the structured tables and
//! the frequency corpus fail hard on any malformed row (startup is
//! all-or-nothing), while the legacy dictionary skips lines that do not
//! match its grammar.

pub mod attributes;
pub mod cedict;
pub mod lexical;
pub mod radicals;

pub use attributes::load_attribute_table;
pub use cedict::{load_dictionary_json, parse_dictionary};
pub use lexical::{DEFAULT_TOP_WORDS, LexicalIndex};
pub use radicals::RadicalTable;
