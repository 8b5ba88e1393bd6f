//! Canonical HTML serialization of block sequences.
//!
//! One top-level element per block, newline-joined, in array order. Every
//! element carries the `data-block-type` and `data-block-id` markers so the
//! structured recovery path can rebuild the exact block list later, plus a
//! `class` attribute when the block has a non-normal style. Serialization has
//! no failure mode.

use std::borrow::Cow;
use std::fmt::Write;

use crate::models::{Block, BlockType, CalendarEvent, StyleTag, TableData};

/// Marker attribute recording the block kind.
pub const TYPE_ATTR: &str = "data-block-type";
/// Marker attribute recording the block id verbatim.
pub const ID_ATTR: &str = "data-block-id";

/// Fixed element id of the schedule data island.
pub const SCHEDULE_ISLAND_ID: &str = "schedule-data";

/// Shared entity escape for all emitted text and attribute values.
///
/// Covers `&`, `<`, `>`, `"` and `'`.
fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_safe(text)
}

/// Serializes blocks to canonical markup, one top-level element per block.
pub fn serialize_blocks(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serializes a whole document for the export boundary.
///
/// Canonical block markup, plus the schedule data island appended when any
/// calendar block carries events. The island is how structured calendar data
/// crosses the flat-HTML boundary; the calendar element itself only carries
/// the human-readable summary.
pub fn serialize_document(blocks: &[Block]) -> String {
    let mut html = serialize_blocks(blocks);
    let events = blocks.iter().find_map(|block| {
        block
            .calendar_data
            .as_ref()
            .filter(|calendar| !calendar.events.is_empty())
            .map(|calendar| calendar.events.as_slice())
    });
    if let Some(events) = events {
        if !html.is_empty() {
            html.push('\n');
        }
        html.push_str(&schedule_island(events));
    }
    html
}

fn render_block(block: &Block) -> String {
    let attrs = marker_attrs(block);
    let text = escape(&block.content);
    match block.kind {
        BlockType::Heading1 => format!("<h1 {attrs}>{text}</h1>"),
        BlockType::Heading2 => format!("<h2 {attrs}>{text}</h2>"),
        BlockType::Heading3 => format!("<h3 {attrs}>{text}</h3>"),
        BlockType::Paragraph => format!("<p {attrs}>{text}</p>"),
        BlockType::HorizontalRule => format!("<hr {attrs} />"),
        BlockType::Image => format!(
            "<img {attrs} src=\"{}\" alt=\"{text}\" />",
            escape(block.src.as_deref().unwrap_or(""))
        ),
        BlockType::BulletList => render_list(&attrs, &block.content),
        BlockType::Table => render_table(&attrs, block),
        BlockType::Calendar => format!("<div {attrs}>{text}</div>"),
    }
}

fn marker_attrs(block: &Block) -> String {
    let mut attrs = format!(
        "{TYPE_ATTR}=\"{}\" {ID_ATTR}=\"{}\"",
        block.kind.as_marker(),
        escape(&block.id)
    );
    if let Some(style) = block.style.filter(|style| *style != StyleTag::Normal) {
        let _ = write!(attrs, " class=\"{}\"", style.as_class());
    }
    attrs
}

fn render_list(attrs: &str, content: &str) -> String {
    let items: String = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("<li>{}</li>", escape(line)))
        .collect();
    format!("<ul {attrs}>{items}</ul>")
}

fn render_table(attrs: &str, block: &Block) -> String {
    // A table block without structured payload rebuilds the grid from its
    // plain-text mirror.
    let rebuilt;
    let table = match &block.table_data {
        Some(table) => table,
        None => {
            rebuilt = TableData::new(
                block
                    .content
                    .lines()
                    .map(|line| line.split('\t').map(str::to_string).collect())
                    .collect(),
                false,
                false,
            );
            &rebuilt
        }
    };

    let mut out = format!("<table {attrs}>");
    let mut rows = table.rows.iter();
    if table.has_header_row {
        if let Some(head) = rows.next() {
            out.push_str("<thead><tr>");
            for cell in head {
                let _ = write!(out, "<th>{}</th>", escape(cell));
            }
            out.push_str("</tr></thead>");
        }
    }
    out.push_str("<tbody>");
    for row in rows {
        out.push_str("<tr>");
        for (index, cell) in row.iter().enumerate() {
            let tag = if table.has_header_column && index == 0 {
                "th"
            } else {
                "td"
            };
            let _ = write!(out, "<{tag}>{}</{tag}>", escape(cell));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

fn schedule_island(events: &[CalendarEvent]) -> String {
    let payload = serde_json::to_string(events).unwrap_or_else(|_| "[]".to_string());
    // A raw `</` inside a script element would terminate it early.
    let payload = payload.replace("</", "<\\/");
    format!("<script id=\"{SCHEDULE_ISLAND_ID}\" type=\"application/json\">{payload}</script>")
}
