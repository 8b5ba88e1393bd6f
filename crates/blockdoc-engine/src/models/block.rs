use serde::{Deserialize, Serialize};

use super::{calendar::CalendarData, table::TableData};

/// Closed set of block kinds understood by the engine.
///
/// The serde names below double as the `data-block-type` marker values in
/// canonical markup, so they must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockType {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    BulletList,
    Table,
    Image,
    HorizontalRule,
    Calendar,
}

impl BlockType {
    /// Marker-attribute value for this kind.
    pub fn as_marker(self) -> &'static str {
        match self {
            BlockType::Heading1 => "heading1",
            BlockType::Heading2 => "heading2",
            BlockType::Heading3 => "heading3",
            BlockType::Paragraph => "paragraph",
            BlockType::BulletList => "bulletList",
            BlockType::Table => "table",
            BlockType::Image => "image",
            BlockType::HorizontalRule => "horizontalRule",
            BlockType::Calendar => "calendar",
        }
    }

    /// Parses a marker-attribute value. Unknown values yield `None`.
    pub fn from_marker(value: &str) -> Option<Self> {
        match value {
            "heading1" => Some(BlockType::Heading1),
            "heading2" => Some(BlockType::Heading2),
            "heading3" => Some(BlockType::Heading3),
            "paragraph" => Some(BlockType::Paragraph),
            "bulletList" => Some(BlockType::BulletList),
            "table" => Some(BlockType::Table),
            "image" => Some(BlockType::Image),
            "horizontalRule" => Some(BlockType::HorizontalRule),
            "calendar" => Some(BlockType::Calendar),
            _ => None,
        }
    }
}

/// Rendering hint carried alongside a block, orthogonal to its kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleTag {
    #[default]
    Normal,
    Important,
    ActionItem,
}

impl StyleTag {
    /// Class-attribute value carried in canonical markup.
    pub fn as_class(self) -> &'static str {
        match self {
            StyleTag::Normal => "normal",
            StyleTag::Important => "important",
            StyleTag::ActionItem => "action-item",
        }
    }

    /// Finds a known style among the whitespace-separated classes of a
    /// `class` attribute.
    pub fn from_class(value: &str) -> Option<Self> {
        value.split_whitespace().find_map(|class| match class {
            "normal" => Some(StyleTag::Normal),
            "important" => Some(StyleTag::Important),
            "action-item" => Some(StyleTag::ActionItem),
            _ => None,
        })
    }
}

/// Atomic content unit of a document.
///
/// Array order is document order. For table and calendar blocks the
/// structured payload is the source of truth and `content` is a derived
/// plain-text mirror kept in sync for consumers that only understand text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Opaque identifier, unique within one document.
    pub id: String,
    /// Serialized as `type` to match the external schema naming.
    #[serde(rename = "type")]
    pub kind: BlockType,
    /// Plain text, newline-delimited items for lists, or the flattened
    /// mirror for structured kinds.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleTag>,
    /// Image source, meaningful only for image blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_data: Option<TableData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_data: Option<CalendarData>,
}

impl Block {
    pub fn new(id: impl Into<String>, kind: BlockType, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            content: content.into(),
            style: None,
            src: None,
            table_data: None,
            calendar_data: None,
        }
    }

    pub fn with_style(mut self, style: StyleTag) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    /// Attaches table data and refreshes the plain-text mirror.
    pub fn with_table(mut self, table: TableData) -> Self {
        self.content = table.flatten();
        self.table_data = Some(table);
        self
    }

    /// Attaches calendar data and refreshes the plain-text mirror.
    pub fn with_calendar(mut self, calendar: CalendarData) -> Self {
        self.content = calendar.summary();
        self.calendar_data = Some(calendar);
        self
    }
}
