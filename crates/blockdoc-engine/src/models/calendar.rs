use serde::{Deserialize, Serialize};

/// A single event as carried by the schedule data island.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    /// ISO date string, e.g. `2025-01-01`.
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Structured payload of a calendar block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarData {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
    pub events: Vec<CalendarEvent>,
}

impl CalendarData {
    /// Human-readable mirror used as the owning block's `content`.
    pub fn summary(&self) -> String {
        match self.events.len() {
            1 => "1 scheduled event".to_string(),
            n => format!("{n} scheduled events"),
        }
    }
}
