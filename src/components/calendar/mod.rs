mod actor;
pub mod editor;
pub mod filter;
pub mod grid;
mod handle;
pub mod models;
pub mod page;
pub mod store;

pub use editor::EditorState;
pub use filter::TypeFilter;
pub use grid::{month_grid, GridDay, MonthGrid};
pub use handle::CalendarHandle;
pub use models::{CalendarEvent, EventDraft, EventId, EventType};
pub use page::{CalendarPage, CalendarView};
pub use store::EventStore;

use crate::config::Config;
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Scheduling calendar component
#[derive(Default)]
pub struct CalendarComponent {
    handle: RwLock<Option<CalendarHandle>>,
}

impl CalendarComponent {
    /// Create a new calendar component
    pub fn new() -> Self {
        Self {
            handle: RwLock::new(None),
        }
    }

    /// Get the handle if it exists
    pub async fn get_handle(&self) -> Option<CalendarHandle> {
        let handle_lock = self.handle.read().await;
        handle_lock.clone()
    }
}

#[async_trait]
impl super::Component for CalendarComponent {
    fn name(&self) -> &'static str {
        "calendar"
    }

    async fn init(&self, config: Arc<RwLock<Config>>) -> AppResult<()> {
        let tz = config.read().await.tz()?;
        let today = Utc::now().with_timezone(&tz).date_naive();

        let mut handle_lock = self.handle.write().await;
        if handle_lock.is_none() {
            *handle_lock = Some(CalendarHandle::new(CalendarPage::new(today)));
        }

        Ok(())
    }

    async fn shutdown(&self) -> AppResult<()> {
        let handle_lock = self.handle.read().await;
        if let Some(handle) = &*handle_lock {
            handle.shutdown().await?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
