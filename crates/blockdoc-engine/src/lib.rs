pub mod ids;
pub mod import;
pub mod models;
pub mod serialize;

// Re-export key types for easier usage
pub use ids::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use import::{HtmlImporter, ImportError, import_html};
pub use models::{Block, BlockType, CalendarData, CalendarEvent, StyleTag, TableData};
pub use serialize::{serialize_blocks, serialize_document};
