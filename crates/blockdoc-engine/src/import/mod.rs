//! Import orchestration: tiered recovery from flat HTML back into blocks.
//!
//! Tier order: pre-check rejection, a guarded tree pass (structured recovery
//! when markers are present, otherwise generic mapping), the regex fallback
//! when the tree pass blows up or the generic walk yields nothing, the
//! schedule overlay, and finally the default-blocks guarantee. Import never
//! returns an empty array and never propagates a failure other than the
//! explicit rejection.

mod dom;
mod fallback;
mod generic;
mod schedule;
mod structured;

use std::panic::{self, AssertUnwindSafe};

use chrono::{Local, NaiveDate};
use log::warn;
use scraper::Html;

use crate::ids::{IdGenerator, UuidIdGenerator};
use crate::models::{Block, BlockType};

/// Substrings marking input as captured console output rather than document
/// HTML. Matched on the raw input before any parsing.
const REJECT_MARKERS: &[&str] = &[
    "console.log",
    "console.error",
    "console.warn",
    "console.debug",
];

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    /// The pre-check heuristic matched. This is the only failure a caller
    /// has to handle; every other problem degrades internally.
    #[error("input rejected: looks like captured console output (matched `{marker}`)")]
    Rejected { marker: &'static str },
}

/// Converts HTML back into blocks with tiered degradation.
///
/// Holds the per-call state the tiers need: the id source for synthesized
/// blocks and the date stamped onto a calendar overlay.
pub struct HtmlImporter {
    ids: Box<dyn IdGenerator>,
    today: NaiveDate,
}

impl HtmlImporter {
    /// Importer with random UUID ids and the local date.
    pub fn new() -> Self {
        Self::with_parts(Box::new(UuidIdGenerator), Local::now().date_naive())
    }

    /// Importer with an injected id source and calendar-overlay date.
    pub fn with_parts(ids: Box<dyn IdGenerator>, today: NaiveDate) -> Self {
        Self { ids, today }
    }

    /// Imports arbitrary HTML into a non-empty block sequence.
    ///
    /// # Errors
    /// Returns [`ImportError::Rejected`] when the pre-check heuristic
    /// matches; nothing else surfaces.
    pub fn import(&mut self, html: &str) -> Result<Vec<Block>, ImportError> {
        precheck(html)?;

        let ids = self.ids.as_mut();
        let mut blocks = match guarded_tree_pass(html, ids) {
            Some(TreePass::Structured(blocks)) => blocks,
            Some(TreePass::Generic(blocks)) if !blocks.is_empty() => blocks,
            Some(TreePass::Generic(_)) => fallback::parse(html, ids),
            None => {
                warn!("tree pass failed, dropping to tag-stripping extraction");
                fallback::parse(html, ids)
            }
        };

        schedule::overlay(html, &mut blocks, ids, self.today);

        if blocks.is_empty() {
            blocks = default_blocks(ids);
        }
        Ok(blocks)
    }
}

impl Default for HtmlImporter {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot import with production defaults.
pub fn import_html(html: &str) -> Result<Vec<Block>, ImportError> {
    HtmlImporter::new().import(html)
}

fn precheck(html: &str) -> Result<(), ImportError> {
    for marker in REJECT_MARKERS.iter().copied() {
        if html.contains(marker) {
            return Err(ImportError::Rejected { marker });
        }
    }
    Ok(())
}

enum TreePass {
    Structured(Vec<Block>),
    Generic(Vec<Block>),
}

/// Runs the single DOM pass with panic isolation.
///
/// `None` means the pass blew up and the fallback tier owns the input.
fn guarded_tree_pass(html: &str, ids: &mut dyn IdGenerator) -> Option<TreePass> {
    panic::catch_unwind(AssertUnwindSafe(|| tree_pass(html, ids))).ok()
}

fn tree_pass(html: &str, ids: &mut dyn IdGenerator) -> TreePass {
    let doc = Html::parse_fragment(html);
    match structured::recover(&doc, ids) {
        Some(blocks) => TreePass::Structured(blocks),
        None => TreePass::Generic(generic::map(&doc, ids)),
    }
}

fn default_blocks(ids: &mut dyn IdGenerator) -> Vec<Block> {
    vec![
        Block::new(ids.next_id(), BlockType::Heading1, "Imported document"),
        Block::new(ids.next_id(), BlockType::Paragraph, ""),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIdGenerator;

    fn importer() -> HtmlImporter {
        HtmlImporter::with_parts(
            Box::new(SequentialIdGenerator::new("t")),
            NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date"),
        )
    }

    #[test]
    fn console_capture_is_rejected_before_parsing() {
        let err = importer()
            .import(r#"<p data-block-type="paragraph">console.log("oops")</p>"#)
            .expect_err("pre-check must fire");
        assert_eq!(
            err,
            ImportError::Rejected {
                marker: "console.log"
            }
        );
    }

    #[test]
    fn empty_input_yields_the_default_blocks() {
        let blocks = importer().import("").expect("import is total");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockType::Heading1);
        assert_eq!(blocks[1].kind, BlockType::Paragraph);
        assert_eq!(blocks[1].content, "");
    }

    #[test]
    fn island_only_input_yields_one_calendar_block() {
        let html = r#"<script id="schedule-data">[{"id":"e1","title":"Kickoff","start":"2025-01-01"}]</script>"#;
        let blocks = importer().import(html).expect("import is total");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockType::Calendar);
        let calendar = blocks[0].calendar_data.as_ref().expect("calendar payload");
        assert_eq!(calendar.events.len(), 1);
        assert_eq!((calendar.year, calendar.month), (2025, 6));
    }

    #[test]
    fn malformed_markup_never_comes_back_empty() {
        for html in [
            "<div><p>unterminated",
            "<<<>>>",
            "<table><tr><td>loose",
            "plain text, no tags at all",
        ] {
            let blocks = importer().import(html).expect("import is total");
            assert!(!blocks.is_empty(), "empty result for {html:?}");
        }
    }

    #[test]
    fn marked_input_takes_the_structured_path() {
        let html = r#"<h1 data-block-type="heading1" data-block-id="b1">Hi</h1><h2>ignored</h2>"#;
        let blocks = importer().import(html).expect("import is total");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].id, "b1");
    }

    #[test]
    fn unmarked_input_takes_the_generic_path() {
        let blocks = importer()
            .import("<h2>Title</h2><p>Body</p>")
            .expect("import is total");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockType::Heading2);
        assert_eq!(blocks[1].kind, BlockType::Paragraph);
    }

    #[test]
    fn unclassifiable_markup_drops_to_the_fallback_tier() {
        let blocks = importer()
            .import("<div><span>inline only</span></div>")
            .expect("import is total");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockType::Paragraph);
        assert_eq!(blocks[0].content, "inline only");
    }
}
