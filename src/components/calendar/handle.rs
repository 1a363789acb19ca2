use super::actor::{CalendarActor, CalendarActorHandle};
use super::models::{CalendarEvent, EventDraft, EventId, EventType};
use super::page::{CalendarPage, CalendarView};
use crate::error::{validation_error, AppResult};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the calendar actor
#[derive(Clone)]
pub struct CalendarHandle {
    actor_handle: CalendarActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl CalendarHandle {
    /// Create a new CalendarHandle and spawn the actor
    pub fn new(page: CalendarPage) -> Self {
        let (mut actor, handle) = CalendarActor::new(page);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Snapshot of the displayed month
    pub async fn view(&self) -> AppResult<CalendarView> {
        self.actor_handle.view().await
    }

    pub async fn open_create(&self, date: NaiveDate) -> AppResult<()> {
        self.actor_handle.open_create(date).await
    }

    pub async fn open_edit(&self, id: EventId) -> AppResult<()> {
        self.actor_handle.open_edit(id).await
    }

    pub async fn update_draft(&self, draft: EventDraft) -> AppResult<()> {
        self.actor_handle.update_draft(draft).await
    }

    pub async fn save(&self) -> AppResult<CalendarEvent> {
        self.actor_handle.save().await
    }

    pub async fn delete(&self) -> AppResult<CalendarEvent> {
        self.actor_handle.delete().await
    }

    pub async fn cancel(&self) -> AppResult<()> {
        self.actor_handle.cancel().await
    }

    /// Open, fill and save a new event in one go
    pub async fn add_event(&self, draft: EventDraft) -> AppResult<CalendarEvent> {
        let date = draft.date.ok_or_else(|| validation_error("Date is required"))?;
        self.open_create(date).await?;
        if let Err(e) = self.update_draft(draft).await {
            self.cancel().await?;
            return Err(e);
        }
        match self.save().await {
            Ok(event) => Ok(event),
            Err(e) => {
                self.cancel().await?;
                Err(e)
            }
        }
    }

    pub async fn toggle_type(&self, event_type: EventType) -> AppResult<bool> {
        self.actor_handle.toggle_type(event_type).await
    }

    pub async fn show_month(&self, offset: i32) -> AppResult<()> {
        self.actor_handle.show_month(offset).await
    }

    pub async fn go_to_today(&self) -> AppResult<()> {
        self.actor_handle.go_to_today().await
    }

    /// Every stored event, ignoring the filter
    pub async fn events(&self) -> AppResult<Vec<CalendarEvent>> {
        self.actor_handle.events().await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        self.actor_handle.shutdown().await
    }
}
