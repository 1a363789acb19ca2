use super::filter::TypeFilter;
use super::grid::MonthGrid;
use super::models::{CalendarEvent, EventDraft, EventId};
use crate::error::{validation_error, AppResult, Error};
use chrono::{NaiveDate, Utc};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// In-memory events of one calendar session
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<CalendarEvent>,
    last_id: u64,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with `events`, whose ids must be unique
    pub fn from_events(events: Vec<CalendarEvent>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for event in &events {
            if !seen.insert(event.id) {
                return Err(validation_error(&format!("Duplicate event id {}", event.id)));
            }
        }
        let last_id = events.iter().map(|e| e.id.0).max().unwrap_or(0);
        Ok(Self { events, last_id })
    }

    // Wall-clock millis, bumped past the previous id so ids never repeat
    fn next_id(&mut self) -> AppResult<EventId> {
        let bumped = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| validation_error("Event ids are exhausted"))?;
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let id = now.max(bumped);
        self.last_id = id;
        Ok(EventId(id))
    }

    /// Append a new event built from `draft` under a fresh id
    pub fn create(&mut self, draft: &EventDraft) -> AppResult<CalendarEvent> {
        draft.validate()?;
        let id = self.next_id()?;
        let event = draft.to_event(id)?;
        debug!("Created event {} on {}", event.id, event.date);
        self.events.push(event.clone());
        Ok(event)
    }

    /// Replace the event with the draft's id, in place
    pub fn update(&mut self, draft: &EventDraft) -> AppResult<CalendarEvent> {
        let id = draft
            .id
            .ok_or_else(|| validation_error("Cannot update an event without an id"))?;
        let slot = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::NotFound(format!("event {}", id)))?;

        let event = draft.to_event(id)?;
        *slot = event.clone();
        debug!("Updated event {}", id);
        Ok(event)
    }

    /// Remove the event with `id`, handing it back
    pub fn delete(&mut self, id: EventId) -> AppResult<CalendarEvent> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| Error::NotFound(format!("event {}", id)))?;
        debug!("Deleted event {}", id);
        Ok(self.events.remove(index))
    }

    pub fn get(&self, id: EventId) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn all(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events on `date` whose type passes `filter`, in insertion order
    pub fn events_on<'a>(&'a self, date: NaiveDate, filter: &'a TypeFilter) -> impl Iterator<Item = &'a CalendarEvent> + 'a {
        self.events
            .iter()
            .filter(move |e| e.date == date && filter.matches(e))
    }

    /// Visible events for every day of `grid`, keyed by date
    pub fn grid_events(&self, grid: &MonthGrid, filter: &TypeFilter) -> BTreeMap<NaiveDate, Vec<CalendarEvent>> {
        let mut by_day: BTreeMap<NaiveDate, Vec<CalendarEvent>> = BTreeMap::new();
        for event in self
            .events
            .iter()
            .filter(|e| grid.contains(e.date) && filter.matches(e))
        {
            by_day.entry(event.date).or_default().push(event.clone());
        }
        by_day
    }
}
