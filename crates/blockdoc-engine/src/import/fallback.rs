//! Last-resort plain-text extraction.
//!
//! Used when the tree pass blows up or the generic walk finds nothing to
//! classify. A single generic tag pattern delimits fragments; all structural
//! fidelity (headings, lists, tables) is lost on this tier.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ids::IdGenerator;
use crate::models::{Block, BlockType};

// Script/style bodies are excised wholesale so raw code or JSON payloads
// never surface as document text.
static RAW_ELEMENTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>")
        .expect("raw-element pattern is valid")
});

static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Emits one paragraph block per non-empty text fragment between tags.
pub fn parse(html: &str, ids: &mut dyn IdGenerator) -> Vec<Block> {
    let stripped = RAW_ELEMENTS.replace_all(html, " ");
    ANY_TAG
        .split(&stripped)
        .map(|fragment| html_escape::decode_html_entities(fragment).trim().to_string())
        .filter(|text| !text.is_empty())
        .map(|text| Block::new(ids.next_id(), BlockType::Paragraph, text))
        .collect()
}
