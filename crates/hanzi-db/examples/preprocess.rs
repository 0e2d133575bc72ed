//! One-shot preprocessing of the legacy CC-CEDICT file into a JSON dump the
//! knowledge base can load without re-parsing the line format.

use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use hanzi_db::parse_dictionary;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let usage = "usage: cargo run -p hanzi-db --example preprocess -- <cedict_ts.u8> <out.json>";
    let input = args.next().map(PathBuf::from).context(usage)?;
    let output = args.next().map(PathBuf::from).context(usage)?;

    let entries = parse_dictionary(&input)
        .with_context(|| format!("parsing dictionary from {}", input.display()))?;

    let file = File::create(&output).with_context(|| format!("create {}", output.display()))?;
    serde_json::to_writer(BufWriter::new(file), &entries)
        .with_context(|| format!("write {}", output.display()))?;

    println!("Entries: {}", entries.len());
    println!("Written: {}", output.display());
    Ok(())
}
