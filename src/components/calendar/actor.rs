use super::models::{CalendarEvent, EventDraft, EventId, EventType};
use super::page::{CalendarPage, CalendarView};
use crate::error::{component_error, AppResult};
use chrono::NaiveDate;
use tokio::sync::mpsc;
use tracing::info;

/// The calendar actor that owns the page state and processes messages
pub struct CalendarActor {
    page: CalendarPage,
    command_rx: mpsc::Receiver<CalendarCommand>,
}

/// Commands that can be sent to the calendar actor
pub enum CalendarCommand {
    View(mpsc::Sender<AppResult<CalendarView>>),
    OpenCreate(NaiveDate, mpsc::Sender<AppResult<()>>),
    OpenEdit(EventId, mpsc::Sender<AppResult<()>>),
    UpdateDraft(EventDraft, mpsc::Sender<AppResult<()>>),
    Save(mpsc::Sender<AppResult<CalendarEvent>>),
    Delete(mpsc::Sender<AppResult<CalendarEvent>>),
    Cancel,
    ToggleType(EventType, mpsc::Sender<bool>),
    ShowMonth(i32, mpsc::Sender<AppResult<()>>),
    GoToToday,
    Events(mpsc::Sender<Vec<CalendarEvent>>),
    Shutdown,
}

/// Handle for communicating with the calendar actor
#[derive(Clone)]
pub struct CalendarActorHandle {
    command_tx: mpsc::Sender<CalendarCommand>,
}

impl CalendarActorHandle {
    async fn request<T>(&self, build: impl FnOnce(mpsc::Sender<T>) -> CalendarCommand) -> AppResult<T> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(build(response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Response channel closed"))
    }

    async fn notify(&self, command: CalendarCommand) -> AppResult<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))
    }

    pub async fn view(&self) -> AppResult<CalendarView> {
        self.request(CalendarCommand::View).await?
    }

    pub async fn open_create(&self, date: NaiveDate) -> AppResult<()> {
        self.request(|tx| CalendarCommand::OpenCreate(date, tx)).await?
    }

    pub async fn open_edit(&self, id: EventId) -> AppResult<()> {
        self.request(|tx| CalendarCommand::OpenEdit(id, tx)).await?
    }

    pub async fn update_draft(&self, draft: EventDraft) -> AppResult<()> {
        self.request(|tx| CalendarCommand::UpdateDraft(draft, tx)).await?
    }

    pub async fn save(&self) -> AppResult<CalendarEvent> {
        self.request(CalendarCommand::Save).await?
    }

    pub async fn delete(&self) -> AppResult<CalendarEvent> {
        self.request(CalendarCommand::Delete).await?
    }

    pub async fn cancel(&self) -> AppResult<()> {
        self.notify(CalendarCommand::Cancel).await
    }

    pub async fn toggle_type(&self, event_type: EventType) -> AppResult<bool> {
        self.request(|tx| CalendarCommand::ToggleType(event_type, tx)).await
    }

    pub async fn show_month(&self, offset: i32) -> AppResult<()> {
        self.request(|tx| CalendarCommand::ShowMonth(offset, tx)).await?
    }

    pub async fn go_to_today(&self) -> AppResult<()> {
        self.notify(CalendarCommand::GoToToday).await
    }

    pub async fn events(&self) -> AppResult<Vec<CalendarEvent>> {
        self.request(CalendarCommand::Events).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        let _ = self.command_tx.send(CalendarCommand::Shutdown).await;
        Ok(())
    }
}

impl CalendarActor {
    /// Create a new actor and return its handle
    pub fn new(page: CalendarPage) -> (Self, CalendarActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self { page, command_rx };
        let handle = CalendarActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Calendar actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                CalendarCommand::View(response_tx) => {
                    let _ = response_tx.send(self.page.view()).await;
                }
                CalendarCommand::OpenCreate(date, response_tx) => {
                    let _ = response_tx.send(self.page.open_create(date)).await;
                }
                CalendarCommand::OpenEdit(id, response_tx) => {
                    let _ = response_tx.send(self.page.open_edit(id)).await;
                }
                CalendarCommand::UpdateDraft(draft, response_tx) => {
                    let _ = response_tx.send(self.page.update_draft(draft)).await;
                }
                CalendarCommand::Save(response_tx) => {
                    let _ = response_tx.send(self.page.save()).await;
                }
                CalendarCommand::Delete(response_tx) => {
                    let _ = response_tx.send(self.page.delete()).await;
                }
                CalendarCommand::Cancel => self.page.cancel(),
                CalendarCommand::ToggleType(event_type, response_tx) => {
                    let _ = response_tx.send(self.page.toggle_type(event_type)).await;
                }
                CalendarCommand::ShowMonth(offset, response_tx) => {
                    let _ = response_tx.send(self.page.show_month(offset)).await;
                }
                CalendarCommand::GoToToday => self.page.go_to_today(),
                CalendarCommand::Events(response_tx) => {
                    let _ = response_tx.send(self.page.store().all().to_vec()).await;
                }
                CalendarCommand::Shutdown => {
                    info!("Calendar actor shutting down");
                    break;
                }
            }
        }

        info!("Calendar actor shut down");
    }
}
