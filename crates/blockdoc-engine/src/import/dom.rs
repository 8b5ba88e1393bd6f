//! Read-side helpers over parsed HTML element nodes.
//!
//! Both recovery tiers extract content through these functions so the two
//! paths agree on what "the text of an element" means.

use scraper::{ElementRef, Node};

use crate::models::TableData;

/// Collects the visible text of an element.
///
/// Script and style subtrees are excluded, `<br>` becomes a newline, and the
/// result is trimmed at both ends. Interior whitespace is preserved so
/// canonical content survives a round-trip unchanged.
pub fn element_text(el: ElementRef<'_>) -> String {
    break_segments(el).join("\n").trim().to_string()
}

/// Splits an element's inline content on `<br>` boundaries.
///
/// Returns one trimmed segment per boundary-delimited run, empty segments
/// included; a single-element result means no line break was present.
pub fn break_segments(el: ElementRef<'_>) -> Vec<String> {
    let mut segments = vec![String::new()];
    collect(el, &mut segments);
    segments
        .into_iter()
        .map(|segment| segment.trim().to_string())
        .collect()
}

fn collect(el: ElementRef<'_>, segments: &mut Vec<String>) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => {
                if let Some(last) = segments.last_mut() {
                    last.push_str(text);
                }
            }
            Node::Element(_) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                match child_el.value().name() {
                    "br" => segments.push(String::new()),
                    "script" | "style" => {}
                    _ => collect(child_el, segments),
                }
            }
            _ => {}
        }
    }
}

/// Whitespace-collapsed text for content that lives inside tab- or
/// newline-delimited mirrors (table cells, list items).
pub fn cell_text(el: ElementRef<'_>) -> String {
    element_text(el)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Newline-joined text of an element's direct `<li>` children.
pub fn list_items(el: ElementRef<'_>) -> String {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|li| li.value().name() == "li")
        .map(cell_text)
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Image content: non-empty `alt` attribute, else element text.
pub fn image_alt(el: ElementRef<'_>) -> String {
    match el.value().attr("alt") {
        Some(alt) if !alt.is_empty() => alt.to_string(),
        _ => element_text(el),
    }
}

/// Reads a `<table>` element into structured table data.
///
/// `<thead>` presence sets `has_header_row`; a leading `<th>` in any body
/// row sets `has_header_column`. Rows come back rectangular.
pub fn read_table(table: ElementRef<'_>) -> TableData {
    let mut rows = Vec::new();
    let mut has_header_row = false;
    let mut has_header_column = false;

    for node in table.descendants() {
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };
        if el.value().name() != "tr" {
            continue;
        }
        let in_head = in_thead(el, table);
        has_header_row |= in_head;

        let mut cells = Vec::new();
        for (index, cell) in row_cells(el).enumerate() {
            if !in_head && index == 0 && cell.value().name() == "th" {
                has_header_column = true;
            }
            cells.push(cell_text(cell));
        }
        rows.push(cells);
    }

    TableData::new(rows, has_header_row, has_header_column)
}

fn row_cells<'a>(row: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
}

fn in_thead(row: ElementRef<'_>, table: ElementRef<'_>) -> bool {
    row.ancestors()
        .take_while(|node| node.id() != table.id())
        .filter_map(ElementRef::wrap)
        .any(|el| el.value().name() == "thead")
}
