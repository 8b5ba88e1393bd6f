//! Best-effort mapping of foreign HTML onto blocks.
//!
//! A flatten-then-classify pass: every descendant element is visited in
//! document order and each recognized tag converts independently of nesting
//! depth, so content inside unknown wrappers is still captured.

use scraper::{ElementRef, Html};

use crate::ids::IdGenerator;
use crate::models::{Block, BlockType};

use super::dom;

/// Maps arbitrary HTML onto blocks.
///
/// An empty result signals the caller to drop to the regex fallback tier.
pub fn map(doc: &Html, ids: &mut dyn IdGenerator) -> Vec<Block> {
    let mut blocks = Vec::new();
    for node in doc.root_element().descendants() {
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };
        if let Some(block) = classify(el, ids) {
            blocks.push(block);
        }
    }
    blocks
}

fn classify(el: ElementRef<'_>, ids: &mut dyn IdGenerator) -> Option<Block> {
    let block = match el.value().name() {
        "h1" => Block::new(ids.next_id(), BlockType::Heading1, dom::element_text(el)),
        "h2" => Block::new(ids.next_id(), BlockType::Heading2, dom::element_text(el)),
        "h3" => Block::new(ids.next_id(), BlockType::Heading3, dom::element_text(el)),
        "p" => Block::new(ids.next_id(), BlockType::Paragraph, dom::element_text(el)),
        "hr" => Block::new(ids.next_id(), BlockType::HorizontalRule, ""),
        "img" => {
            let mut block = Block::new(ids.next_id(), BlockType::Image, dom::image_alt(el));
            if let Some(src) = el.value().attr("src") {
                block = block.with_src(src);
            }
            block
        }
        "table" => {
            Block::new(ids.next_id(), BlockType::Table, "").with_table(dom::read_table(el))
        }
        // List order semantics are not preserved on this path: both list
        // kinds collapse to one paragraph of newline-joined items.
        "ul" | "ol" => Block::new(ids.next_id(), BlockType::Paragraph, dom::list_items(el)),
        _ => return None,
    };
    Some(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIdGenerator;

    fn map_all(html: &str) -> Vec<Block> {
        let doc = Html::parse_fragment(html);
        let mut ids = SequentialIdGenerator::new("g");
        map(&doc, &mut ids)
    }

    #[test]
    fn untagged_heading_and_paragraph() {
        let blocks = map_all("<h2>Title</h2><p>Body</p>");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockType::Heading2);
        assert_eq!(blocks[0].content, "Title");
        assert_eq!(blocks[1].kind, BlockType::Paragraph);
        assert_eq!(blocks[1].content, "Body");
    }

    #[test]
    fn lists_collapse_to_paragraphs() {
        let blocks = map_all("<ol><li>first</li><li>second</li></ol>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockType::Paragraph);
        assert_eq!(blocks[0].content, "first\nsecond");
    }

    #[test]
    fn recognized_elements_inside_unknown_wrappers_are_captured() {
        let blocks = map_all("<div><section><h3>Deep</h3></section><span>skip</span></div>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockType::Heading3);
        assert_eq!(blocks[0].content, "Deep");
    }

    #[test]
    fn image_without_alt_falls_back_to_src_only() {
        let blocks = map_all(r#"<img src="x.png">"#);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockType::Image);
        assert_eq!(blocks[0].content, "");
        assert_eq!(blocks[0].src.as_deref(), Some("x.png"));
    }

    #[test]
    fn foreign_table_derives_payload() {
        let blocks = map_all(
            "<table><thead><tr><th>H</th></tr></thead><tbody><tr><td>v</td></tr></tbody></table>",
        );
        let table = blocks[0].table_data.as_ref().expect("table payload");
        assert!(table.has_header_row);
        assert_eq!(blocks[0].content, "H\nv");
    }

    #[test]
    fn unrecognized_only_input_yields_nothing() {
        assert!(map_all("<div><span>just inline text</span></div>").is_empty());
    }
}
