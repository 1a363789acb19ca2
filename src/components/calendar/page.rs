use super::editor::EditorState;
use super::filter::TypeFilter;
use super::grid::{first_of_month, month_grid, shift_month, MonthGrid};
use super::models::{CalendarEvent, EventDraft, EventId, EventType};
use super::store::EventStore;
use crate::error::{invalid_state_error, validation_error, AppResult, Error};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Everything needed to draw the calendar for the displayed month
#[derive(Debug, Clone, Serialize)]
pub struct CalendarView {
    pub title: String,
    pub grid: MonthGrid,
    pub events: BTreeMap<NaiveDate, Vec<CalendarEvent>>,
    pub active_types: Vec<EventType>,
    #[serde(skip)]
    pub editor: EditorState,
}

/// State of one calendar page session: events, filter, modal and month
#[derive(Debug, Clone)]
pub struct CalendarPage {
    store: EventStore,
    filter: TypeFilter,
    editor: EditorState,
    displayed: NaiveDate,
    today: NaiveDate,
}

impl CalendarPage {
    pub fn new(today: NaiveDate) -> Self {
        Self::with_store(EventStore::new(), today)
    }

    pub fn with_store(store: EventStore, today: NaiveDate) -> Self {
        Self {
            store,
            filter: TypeFilter::default(),
            editor: EditorState::Closed,
            displayed: first_of_month(today),
            today,
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn filter(&self) -> &TypeFilter {
        &self.filter
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    /// First day of the displayed month
    pub fn displayed_month(&self) -> NaiveDate {
        self.displayed
    }

    pub fn grid(&self) -> AppResult<MonthGrid> {
        month_grid(self.displayed, self.today)
    }

    pub fn view(&self) -> AppResult<CalendarView> {
        let grid = self.grid()?;
        Ok(CalendarView {
            title: grid.title(),
            events: self.store.grid_events(&grid, &self.filter),
            grid,
            active_types: self.filter.active_types().collect(),
            editor: self.editor.clone(),
        })
    }

    pub fn next_month(&mut self) -> AppResult<()> {
        self.show_month(1)
    }

    pub fn prev_month(&mut self) -> AppResult<()> {
        self.show_month(-1)
    }

    /// Move the displayed month by `offset` months. A month without a
    /// buildable grid is refused and the displayed month stays put.
    pub fn show_month(&mut self, offset: i32) -> AppResult<()> {
        let month = shift_month(self.displayed, offset).ok_or_else(|| {
            validation_error(&format!(
                "Cannot move {} months from {}",
                offset, self.displayed
            ))
        })?;
        month_grid(month, self.today)?;
        self.displayed = month;
        Ok(())
    }

    pub fn go_to_today(&mut self) {
        self.displayed = first_of_month(self.today);
    }

    pub fn toggle_type(&mut self, event_type: EventType) -> bool {
        self.filter.toggle(event_type)
    }

    /// Open the modal for a new event on `date`
    pub fn open_create(&mut self, date: NaiveDate) -> AppResult<()> {
        self.ensure_closed()?;
        self.editor = EditorState::Create(EventDraft::for_date(date));
        debug!("Editor opened to create on {}", date);
        Ok(())
    }

    /// Open the modal on an existing event
    pub fn open_edit(&mut self, id: EventId) -> AppResult<()> {
        self.ensure_closed()?;
        let event = self
            .store
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("event {}", id)))?;
        self.editor = EditorState::Edit(EventDraft::from_event(event));
        debug!("Editor opened to edit {}", id);
        Ok(())
    }

    /// Mutable access to the open draft, for form input
    pub fn draft_mut(&mut self) -> Option<&mut EventDraft> {
        self.editor.draft_mut()
    }

    /// Replace the open draft's fields. The id cannot change.
    pub fn update_draft(&mut self, draft: EventDraft) -> AppResult<()> {
        let current = self
            .editor
            .draft_mut()
            .ok_or_else(|| invalid_state_error("Editor is closed"))?;
        if current.id != draft.id {
            return Err(invalid_state_error("Draft id does not match the open event"));
        }
        *current = draft;
        Ok(())
    }

    /// Commit the open draft. Validation failures keep the editor open.
    pub fn save(&mut self) -> AppResult<CalendarEvent> {
        let saved = match &self.editor {
            EditorState::Closed => return Err(invalid_state_error("Editor is closed")),
            EditorState::Create(draft) => self.store.create(draft)?,
            EditorState::Edit(draft) => self.store.update(draft)?,
        };
        self.editor = EditorState::Closed;
        Ok(saved)
    }

    /// Delete the event being edited and close the editor
    pub fn delete(&mut self) -> AppResult<CalendarEvent> {
        let id = match &self.editor {
            EditorState::Edit(EventDraft { id: Some(id), .. }) => *id,
            other => {
                return Err(invalid_state_error(&format!(
                    "Delete is only available while editing (editor is {})",
                    other.mode()
                )))
            }
        };
        let removed = self.store.delete(id)?;
        self.editor = EditorState::Closed;
        Ok(removed)
    }

    pub fn cancel(&mut self) {
        self.editor = EditorState::Closed;
    }

    fn ensure_closed(&self) -> AppResult<()> {
        if self.editor.is_open() {
            return Err(invalid_state_error(&format!(
                "Editor is already open ({})",
                self.editor.mode()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn page() -> CalendarPage {
        CalendarPage::new(date(2028, 3, 6))
    }

    #[test]
    fn create_flow() {
        let mut page = page();
        page.open_create(date(2028, 3, 6)).unwrap();
        assert_eq!(page.editor().mode(), "create");

        page.draft_mut().unwrap().title = "Standup".to_string();
        let event = page.save().unwrap();

        assert!(!page.editor().is_open());
        assert_eq!(page.store().len(), 1);
        assert_eq!(event.event_type, EventType::Work);
    }

    #[test]
    fn failed_validation_keeps_draft() {
        let mut page = page();
        page.open_create(date(2028, 3, 6)).unwrap();
        page.draft_mut().unwrap().description = "notes typed so far".to_string();

        assert!(matches!(page.save(), Err(Error::Validation(_))));
        assert_eq!(page.editor().mode(), "create");
        assert_eq!(page.editor().draft().unwrap().description, "notes typed so far");
        assert!(page.store().is_empty());
    }

    #[test]
    fn edit_changes_type_and_color() {
        let mut page = page();
        page.open_create(date(2028, 3, 6)).unwrap();
        page.draft_mut().unwrap().title = "Standup".to_string();
        let created = page.save().unwrap();

        page.open_edit(created.id).unwrap();
        let draft = page.editor().draft().unwrap().clone().with_type(EventType::Personal);
        assert_eq!(draft.color(), EventType::Personal.color());
        page.update_draft(draft).unwrap();
        let updated = page.save().unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.color(), EventType::Personal.color());
        assert_eq!(page.store().len(), 1);
    }

    #[test]
    fn delete_only_from_edit() {
        let mut page = page();
        assert!(matches!(page.delete(), Err(Error::InvalidState(_))));

        page.open_create(date(2028, 3, 7)).unwrap();
        assert!(matches!(page.delete(), Err(Error::InvalidState(_))));
        page.draft_mut().unwrap().title = "Dentist".to_string();
        let event = page.save().unwrap();

        page.open_edit(event.id).unwrap();
        let removed = page.delete().unwrap();
        assert_eq!(removed.id, event.id);
        assert!(page.store().is_empty());
        assert!(!page.editor().is_open());
    }

    #[test]
    fn transitions_require_closed_editor() {
        let mut page = page();
        page.open_create(date(2028, 3, 6)).unwrap();
        assert!(matches!(page.open_create(date(2028, 3, 7)), Err(Error::InvalidState(_))));

        page.cancel();
        assert!(matches!(page.open_edit(EventId(1)), Err(Error::NotFound(_))));
        assert!(matches!(page.save(), Err(Error::InvalidState(_))));
    }

    #[test]
    fn update_draft_cannot_change_id() {
        let mut page = page();
        page.open_create(date(2028, 3, 6)).unwrap();
        let mut draft = page.editor().draft().unwrap().clone();
        draft.id = Some(EventId(99));
        assert!(page.update_draft(draft).is_err());
    }

    #[test]
    fn cancel_discards_changes() {
        let mut page = page();
        page.open_create(date(2028, 3, 6)).unwrap();
        page.draft_mut().unwrap().title = "Standup".to_string();
        let event = page.save().unwrap();

        page.open_edit(event.id).unwrap();
        page.draft_mut().unwrap().title = "Renamed".to_string();
        page.cancel();
        assert_eq!(page.store().get(event.id).unwrap().title, "Standup");
    }

    #[test]
    fn out_of_month_days_accept_events() {
        let mut page = page();
        let leading = page.grid().unwrap().weeks[0][0];
        assert!(!leading.in_month);

        page.open_create(leading.date).unwrap();
        page.draft_mut().unwrap().title = "Borrowed day".to_string();
        page.save().unwrap();

        assert_eq!(page.view().unwrap().events[&leading.date].len(), 1);
    }

    #[test]
    fn month_navigation() {
        let mut page = page();
        page.next_month().unwrap();
        assert_eq!(page.displayed_month(), date(2028, 4, 1));
        assert_eq!(page.view().unwrap().title, "April 2028");

        page.prev_month().unwrap();
        page.prev_month().unwrap();
        assert_eq!(page.displayed_month(), date(2028, 2, 1));

        page.go_to_today();
        assert_eq!(page.displayed_month(), date(2028, 3, 1));
    }

    #[test]
    fn filter_toggle_hides_from_view_only() {
        let mut page = page();
        page.open_create(date(2028, 3, 6)).unwrap();
        page.draft_mut().unwrap().title = "Raid".to_string();
        page.draft_mut().unwrap().set_type(EventType::Gaming);
        page.save().unwrap();

        assert!(!page.toggle_type(EventType::Gaming));
        assert!(page.view().unwrap().events.is_empty());
        assert!(!page.view().unwrap().active_types.contains(&EventType::Gaming));
        assert_eq!(page.store().len(), 1);
    }

    #[test]
    fn unreachable_months_leave_the_page_where_it_was() {
        let mut page = page();
        let to_last_month = (262_142 - 2028) * 12 + 9;

        assert!(matches!(page.show_month(to_last_month), Err(Error::Validation(_))));
        assert!(page.show_month(i32::MAX).is_err());
        assert_eq!(page.displayed_month(), date(2028, 3, 1));
        assert_eq!(page.view().unwrap().title, "March 2028");
    }
}
