use std::{env, fs, path::Path, process};

use anyhow::{Context, Result};
use blockdoc_engine::{Block, HtmlImporter, serialize_document};
use log::info;

fn main() -> Result<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;

    let args: Vec<String> = env::args().skip(1).collect();
    let (command, input, output) = match args.as_slice() {
        [command, input] => (command.as_str(), input.as_str(), None),
        [command, input, output] => (command.as_str(), input.as_str(), Some(output.as_str())),
        _ => usage(),
    };

    match command {
        "import" => import_file(Path::new(input), output.map(Path::new)),
        "export" => export_file(Path::new(input), output.map(Path::new)),
        _ => usage(),
    }
}

/// Reads an HTML file and emits the recovered blocks as JSON.
fn import_file(input: &Path, output: Option<&Path>) -> Result<()> {
    let html = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let blocks = HtmlImporter::new()
        .import(&html)
        .with_context(|| format!("refused to import {}", input.display()))?;
    info!("imported {} block(s) from {}", blocks.len(), input.display());

    let json = serde_json::to_string_pretty(&blocks)?;
    emit(output, &json)
}

/// Reads a JSON block array and emits the canonical HTML document.
fn export_file(input: &Path, output: Option<&Path>) -> Result<()> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let blocks: Vec<Block> = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a block array", input.display()))?;
    let html = serialize_document(&blocks);
    info!("exported {} block(s) from {}", blocks.len(), input.display());

    emit(output, &html)
}

fn emit(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{text}"),
    }
    Ok(())
}

fn usage() -> ! {
    eprintln!("Usage: blockdoc <import|export> <input-file> [output-file]");
    eprintln!("  import  recover blocks from an HTML file, emit JSON");
    eprintln!("  export  serialize a JSON block array to canonical HTML");
    process::exit(2);
}
