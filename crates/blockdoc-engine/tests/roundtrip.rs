//! Round-trip guarantees for canonical markup.

use blockdoc_engine::{
    Block, BlockType, CalendarData, CalendarEvent, HtmlImporter, SequentialIdGenerator, StyleTag,
    TableData, serialize_blocks, serialize_document,
};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn importer() -> HtmlImporter {
    HtmlImporter::with_parts(
        Box::new(SequentialIdGenerator::new("fresh")),
        NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date"),
    )
}

#[rstest]
#[case::heading1(Block::new("b1", BlockType::Heading1, "Quarterly plan"))]
#[case::heading2(Block::new("b2", BlockType::Heading2, "Details"))]
#[case::heading3(Block::new("b3", BlockType::Heading3, "Fine print"))]
#[case::paragraph(Block::new("b4", BlockType::Paragraph, "Plain body text."))]
#[case::styled(Block::new("b5", BlockType::Paragraph, "Do this").with_style(StyleTag::ActionItem))]
#[case::escaping(Block::new("b6", BlockType::Paragraph, "a < b & \"c\" 'd'"))]
#[case::bullet_list(Block::new("b7", BlockType::BulletList, "alpha\nbeta\ngamma"))]
#[case::rule(Block::new("b8", BlockType::HorizontalRule, ""))]
#[case::image(Block::new("b9", BlockType::Image, "a chart").with_src("https://x.test/c.png"))]
#[case::table(Block::new("b10", BlockType::Table, "").with_table(TableData::new(
    vec![vec!["H1".into(), "H2".into()], vec!["a".into(), "b".into()]],
    true,
    false,
)))]
fn canonical_round_trip_is_exact(#[case] block: Block) {
    let html = serialize_blocks(std::slice::from_ref(&block));
    let recovered = importer().import(&html).expect("canonical input imports");
    assert_eq!(recovered, vec![block]);
}

#[test]
fn calendar_round_trips_summary_and_id() {
    let block = Block::new("c1", BlockType::Calendar, "").with_calendar(CalendarData {
        year: 2025,
        month: 6,
        events: vec![CalendarEvent {
            id: "e1".into(),
            title: "Kickoff".into(),
            start: "2025-06-02".into(),
            end: Some("2025-06-03".into()),
            color: Some("#336699".into()),
        }],
    });
    let html = serialize_blocks(std::slice::from_ref(&block));
    let recovered = importer().import(&html).expect("canonical input imports");

    // The structured payload travels via the data island only; the element
    // preserves identity and the summary text.
    assert_eq!(recovered.len(), 1);
    assert_eq!(recovered[0].id, "c1");
    assert_eq!(recovered[0].kind, BlockType::Calendar);
    assert_eq!(recovered[0].content, "1 scheduled event");
    assert_eq!(recovered[0].calendar_data, None);
}

#[test]
fn serialization_is_idempotent_across_recovery() {
    let blocks = vec![
        Block::new("b1", BlockType::Heading1, "Notes").with_style(StyleTag::Important),
        Block::new("b2", BlockType::Paragraph, "First paragraph."),
        Block::new("b3", BlockType::BulletList, "one\ntwo"),
        Block::new("b4", BlockType::Table, "").with_table(TableData::new(
            vec![
                vec!["k".into(), "v".into()],
                vec!["size".into(), "10".into()],
            ],
            true,
            true,
        )),
        Block::new("b5", BlockType::HorizontalRule, ""),
        Block::new("b6", BlockType::Image, "logo").with_src("logo.svg"),
    ];

    let first = serialize_blocks(&blocks);
    let recovered = importer().import(&first).expect("canonical input imports");
    let second = serialize_blocks(&recovered);
    assert_eq!(second, first);
}

#[test]
fn table_shape_survives_the_boundary() {
    let table = TableData::new(
        vec![
            vec!["H1".into(), "H2".into()],
            vec!["a".into(), "b".into()],
        ],
        true,
        false,
    );
    let block = Block::new("t1", BlockType::Table, "").with_table(table.clone());

    let html = serialize_blocks(std::slice::from_ref(&block));
    assert!(html.contains("<thead>"));
    assert!(html.contains("<tbody>"));

    let recovered = importer().import(&html).expect("canonical input imports");
    assert_eq!(recovered[0].table_data.as_ref(), Some(&table));
}

#[test]
fn merged_paragraphs_split_back_apart() {
    let html = r#"<p data-block-type="paragraph" data-block-id="x">Line1<br>Line2</p>"#;
    let recovered = importer().import(html).expect("canonical input imports");
    assert_eq!(recovered.len(), 2);
    assert_eq!(recovered[0].content, "Line1");
    assert_eq!(recovered[1].content, "Line2");
    assert_ne!(recovered[0].id, "x");
    assert_ne!(recovered[1].id, recovered[0].id);
}

#[test]
fn exported_document_reimports_without_duplicating_the_calendar() {
    let blocks = vec![
        Block::new("b1", BlockType::Paragraph, "Agenda below."),
        Block::new("c1", BlockType::Calendar, "").with_calendar(CalendarData {
            year: 2025,
            month: 6,
            events: vec![CalendarEvent {
                id: "e1".into(),
                title: "Kickoff".into(),
                start: "2025-06-02".into(),
                end: None,
                color: None,
            }],
        }),
    ];
    let html = serialize_document(&blocks);
    assert!(html.contains("schedule-data"));

    let recovered = importer().import(&html).expect("canonical input imports");
    let calendars = recovered
        .iter()
        .filter(|block| block.kind == BlockType::Calendar)
        .count();
    assert_eq!(calendars, 1);
}

#[test]
fn foreign_input_produces_fresh_deterministic_ids() {
    let recovered = importer()
        .import("<h2>Title</h2><p>Body</p>")
        .expect("import is total");
    let ids: Vec<&str> = recovered.iter().map(|block| block.id.as_str()).collect();
    assert_eq!(ids, vec!["fresh-1", "fresh-2"]);
}
