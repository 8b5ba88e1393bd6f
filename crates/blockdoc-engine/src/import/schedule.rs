//! Schedule data island extraction.
//!
//! The island is a script element with a fixed id whose body is a JSON array
//! of events. The scan runs over the raw input string rather than the parsed
//! tree so it still works when tree parsing failed and a lower tier produced
//! the blocks.

use chrono::{Datelike, NaiveDate};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ids::IdGenerator;
use crate::models::{Block, BlockType, CalendarData, CalendarEvent};

static ISLAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<script\b[^>]*\bid\s*=\s*["']schedule-data["'][^>]*>(.*?)</script\s*>"#)
        .expect("island pattern is valid")
});

/// Extracts events from the schedule data island, if present.
///
/// Malformed JSON is logged and treated as zero events; this scan never
/// fails.
pub fn extract_events(html: &str) -> Vec<CalendarEvent> {
    let Some(captures) = ISLAND.captures(html) else {
        return Vec::new();
    };
    match serde_json::from_str(captures[1].trim()) {
        Ok(events) => events,
        Err(err) => {
            warn!("schedule data island holds malformed JSON, ignoring: {err}");
            Vec::new()
        }
    }
}

/// Appends one synthetic calendar block when the island yielded events and
/// the result does not already contain a calendar block.
pub fn overlay(html: &str, blocks: &mut Vec<Block>, ids: &mut dyn IdGenerator, today: NaiveDate) {
    let events = extract_events(html);
    if events.is_empty() || blocks.iter().any(|block| block.kind == BlockType::Calendar) {
        return;
    }
    let calendar = CalendarData {
        year: today.year(),
        month: today.month(),
        events,
    };
    blocks.push(Block::new(ids.next_id(), BlockType::Calendar, "").with_calendar(calendar));
}
