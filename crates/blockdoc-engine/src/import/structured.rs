//! Marker-trusting recovery of canonical block markup.
//!
//! Elements carrying the `data-block-type` marker were emitted by this
//! engine's own serializer (or a faithful copy of its output), so their
//! markers are authoritative and the round-trip is exact.

use scraper::{ElementRef, Html};

use crate::ids::IdGenerator;
use crate::models::{Block, BlockType, StyleTag};
use crate::serialize::{ID_ATTR, TYPE_ATTR};

use super::dom;

/// Recovers blocks from elements carrying the canonical marker attributes.
///
/// Returns `None` when no element is marked, handing control to the generic
/// mapper.
pub fn recover(doc: &Html, ids: &mut dyn IdGenerator) -> Option<Vec<Block>> {
    let marked: Vec<ElementRef<'_>> = doc
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().attr(TYPE_ATTR).is_some())
        .collect();
    if marked.is_empty() {
        return None;
    }

    let mut blocks = Vec::new();
    for el in marked {
        recover_element(el, ids, &mut blocks);
    }
    Some(blocks)
}

fn recover_element(el: ElementRef<'_>, ids: &mut dyn IdGenerator, out: &mut Vec<Block>) {
    let marker = el.value().attr(TYPE_ATTR).unwrap_or_default();
    // Unknown marker values degrade to paragraph rather than being dropped.
    let kind = BlockType::from_marker(marker).unwrap_or(BlockType::Paragraph);
    let id = match el.value().attr(ID_ATTR) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => ids.next_id(),
    };
    let style = el
        .value()
        .attr("class")
        .and_then(StyleTag::from_class)
        .filter(|style| *style != StyleTag::Normal);

    match kind {
        BlockType::Paragraph => {
            let segments = dom::break_segments(el);
            if segments.len() <= 1 {
                let content = segments.into_iter().next().unwrap_or_default();
                out.push(styled(Block::new(id, BlockType::Paragraph, content), style));
            } else {
                // Another tool merged paragraphs into one element with line
                // breaks; rebuild one block per segment under fresh ids.
                for segment in segments.into_iter().filter(|s| !s.is_empty()) {
                    out.push(styled(
                        Block::new(ids.next_id(), BlockType::Paragraph, segment),
                        style,
                    ));
                }
            }
        }
        BlockType::Heading1 | BlockType::Heading2 | BlockType::Heading3 => {
            out.push(styled(Block::new(id, kind, dom::element_text(el)), style));
        }
        BlockType::BulletList => {
            out.push(styled(Block::new(id, kind, dom::list_items(el)), style));
        }
        BlockType::Table => {
            let table = dom::read_table(el);
            out.push(styled(
                Block::new(id, BlockType::Table, "").with_table(table),
                style,
            ));
        }
        BlockType::Image => {
            let mut block = Block::new(id, BlockType::Image, dom::image_alt(el));
            if let Some(src) = el.value().attr("src") {
                block = block.with_src(src);
            }
            out.push(styled(block, style));
        }
        BlockType::HorizontalRule => {
            out.push(styled(Block::new(id, BlockType::HorizontalRule, ""), style));
        }
        BlockType::Calendar => {
            // The structured payload travels via the data island, not the
            // element; only the summary text is recoverable here.
            out.push(styled(
                Block::new(id, BlockType::Calendar, dom::element_text(el)),
                style,
            ));
        }
    }
}

fn styled(block: Block, style: Option<StyleTag>) -> Block {
    match style {
        Some(style) => block.with_style(style),
        None => block,
    }
}
