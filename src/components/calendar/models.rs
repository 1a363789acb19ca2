use crate::error::{validation_error, AppResult, Error};
use chrono::NaiveDate;
use rust_i18n::t;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Category of a calendar event, each bound to a fixed display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    #[default]
    Work,
    Personal,
    Schedule,
    Gaming,
    Other,
}

impl EventType {
    /// Every type, in form order. The first one is the create-form default.
    pub const ALL: [EventType; 5] = [
        EventType::Work,
        EventType::Personal,
        EventType::Schedule,
        EventType::Gaming,
        EventType::Other,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            EventType::Work => "work",
            EventType::Personal => "personal",
            EventType::Schedule => "schedule",
            EventType::Gaming => "gaming",
            EventType::Other => "other",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            EventType::Work => "#3b82f6",
            EventType::Personal => "#10b981",
            EventType::Schedule => "#f59e0b",
            EventType::Gaming => "#8b5cf6",
            EventType::Other => "#6b7280",
        }
    }

    /// Localized display label
    pub fn label(&self) -> String {
        match self {
            EventType::Work => t!("event_type.work").to_string(),
            EventType::Personal => t!("event_type.personal").to_string(),
            EventType::Schedule => t!("event_type.schedule").to_string(),
            EventType::Gaming => t!("event_type.gaming").to_string(),
            EventType::Other => t!("event_type.other").to_string(),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EventType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| validation_error(&format!("Unknown event type: {}", s)))
    }
}

/// Identifier of an event, unique within one store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scheduled entry on the calendar
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub description: Option<String>,
}

impl CalendarEvent {
    /// Display color, always the one bound to the event's type
    pub fn color(&self) -> &'static str {
        self.event_type.color()
    }
}

// Color is derived, so it is written out but never read back
impl Serialize for CalendarEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            id: EventId,
            title: &'a str,
            date: NaiveDate,
            #[serde(rename = "type")]
            event_type: EventType,
            color: &'static str,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<&'a str>,
        }

        Wire {
            id: self.id,
            title: &self.title,
            date: self.date,
            event_type: self.event_type,
            color: self.color(),
            description: self.description.as_deref(),
        }
        .serialize(serializer)
    }
}

/// Form state of the event editor.
///
/// `event_type` and `color` are only changed together through
/// [`set_type`](Self::set_type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub id: Option<EventId>,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub description: String,
    event_type: EventType,
    color: &'static str,
}

impl EventDraft {
    /// Blank draft for a new event on `date`
    pub fn for_date(date: NaiveDate) -> Self {
        let event_type = EventType::default();
        Self {
            id: None,
            title: String::new(),
            date: Some(date),
            description: String::new(),
            event_type,
            color: event_type.color(),
        }
    }

    /// Draft pre-filled from an existing event
    pub fn from_event(event: &CalendarEvent) -> Self {
        Self {
            id: Some(event.id),
            title: event.title.clone(),
            date: Some(event.date),
            description: event.description.clone().unwrap_or_default(),
            event_type: event.event_type,
            color: event.color(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_type(mut self, event_type: EventType) -> Self {
        self.set_type(event_type);
        self
    }

    pub fn set_type(&mut self, event_type: EventType) {
        self.event_type = event_type;
        self.color = event_type.color();
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn color(&self) -> &'static str {
        self.color
    }

    /// Required fields check: a non-blank title and a date
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(validation_error("Title is required"));
        }
        if self.date.is_none() {
            return Err(validation_error("Date is required"));
        }
        Ok(())
    }

    /// Build the stored record under `id`
    pub fn to_event(&self, id: EventId) -> AppResult<CalendarEvent> {
        self.validate()?;
        let date = self.date.ok_or_else(|| validation_error("Date is required"))?;
        let description = Some(self.description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(CalendarEvent {
            id,
            title: self.title.trim().to_string(),
            date,
            event_type: self.event_type,
            description,
        })
    }
}
