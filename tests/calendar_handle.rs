use chrono::NaiveDate;
use expertmeet::components::calendar::{
    CalendarEvent, CalendarHandle, CalendarPage, EditorState, EventDraft, EventId, EventStore,
    EventType,
};
use expertmeet::error::Error;
use std::collections::HashSet;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn handle() -> CalendarHandle {
    CalendarHandle::new(CalendarPage::new(date(2028, 3, 6)))
}

/// Create, retype and delete the standup event through the actor
#[tokio::test]
async fn standup_lifecycle() {
    let calendar = handle();

    calendar.open_create(date(2028, 3, 6)).await.unwrap();
    let view = calendar.view().await.unwrap();
    let draft = match view.editor {
        EditorState::Create(draft) => draft,
        other => panic!("expected create editor, got {:?}", other),
    };
    assert_eq!(draft.event_type(), EventType::Work);

    calendar.update_draft(draft.title("Standup")).await.unwrap();
    let created = calendar.save().await.unwrap();
    assert_eq!(created.color(), EventType::Work.color());
    assert_eq!(calendar.events().await.unwrap().len(), 1);

    calendar.open_edit(created.id).await.unwrap();
    let edit = EventDraft::from_event(&created).with_type(EventType::Personal);
    calendar.update_draft(edit).await.unwrap();
    let updated = calendar.save().await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.date, date(2028, 3, 6));
    assert_eq!(updated.color(), EventType::Personal.color());

    calendar.open_edit(created.id).await.unwrap();
    calendar.delete().await.unwrap();
    assert!(calendar.events().await.unwrap().is_empty());

    calendar.shutdown().await.unwrap();
}

#[tokio::test]
async fn add_event_rejects_blank_title_and_closes_editor() {
    let calendar = handle();

    let result = calendar
        .add_event(EventDraft::for_date(date(2028, 3, 9)))
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));
    assert!(calendar.events().await.unwrap().is_empty());
    assert!(!calendar.view().await.unwrap().editor.is_open());
}

#[tokio::test]
async fn concurrent_edits_of_one_event_are_serialised() {
    let calendar = handle();
    let seed = calendar
        .add_event(EventDraft::for_date(date(2028, 3, 1)).title("seed"))
        .await
        .unwrap();

    // The editor admits one caller at a time; the others retry until it closes
    let mut tasks = Vec::new();
    for i in 0..10 {
        let calendar = calendar.clone();
        let seed = seed.clone();
        tasks.push(tokio::spawn(async move {
            loop {
                match calendar.open_edit(seed.id).await {
                    Ok(()) => break,
                    Err(Error::InvalidState(_)) => tokio::task::yield_now().await,
                    Err(e) => panic!("unexpected error {:?}", e),
                }
            }
            let draft = EventDraft::from_event(&seed).title(format!("edit {}", i));
            calendar.update_draft(draft).await.unwrap();
            calendar.save().await.unwrap()
        }));
    }
    for task in tasks {
        let saved = task.await.unwrap();
        assert_eq!(saved.id, seed.id);
    }

    let events = calendar.events().await.unwrap();
    assert_eq!(events.len(), 1);
    assert!(events[0].title.starts_with("edit "));
}

#[tokio::test]
async fn concurrent_adds_get_unique_ids() {
    let calendar = handle();

    let mut tasks = Vec::new();
    for day in 1..=20 {
        let calendar = calendar.clone();
        tasks.push(tokio::spawn(async move {
            loop {
                let draft = EventDraft::for_date(date(2028, 3, day)).title("x");
                match calendar.add_event(draft).await {
                    Ok(event) => return event,
                    Err(Error::InvalidState(_)) => tokio::task::yield_now().await,
                    Err(e) => panic!("unexpected error {:?}", e),
                }
            }
        }));
    }

    let mut ids = HashSet::new();
    for task in tasks {
        assert!(ids.insert(task.await.unwrap().id));
    }
    assert_eq!(calendar.events().await.unwrap().len(), 20);
}

#[tokio::test]
async fn unreachable_month_is_refused_and_actor_keeps_serving() {
    let calendar = handle();

    let result = calendar.show_month((262_142 - 2028) * 12 + 9).await;

    assert!(matches!(result, Err(Error::Validation(_))));
    assert_eq!(calendar.view().await.unwrap().title, "March 2028");

    calendar.show_month(1).await.unwrap();
    assert_eq!(calendar.view().await.unwrap().title, "April 2028");
}

#[tokio::test]
async fn filter_and_navigation_through_handle() {
    let store = EventStore::from_events(vec![
        CalendarEvent {
            id: EventId(1),
            title: "Raid".to_string(),
            date: date(2028, 3, 10),
            event_type: EventType::Gaming,
            description: None,
        },
        CalendarEvent {
            id: EventId(2),
            title: "Review".to_string(),
            date: date(2028, 4, 12),
            event_type: EventType::Work,
            description: Some("Q1".to_string()),
        },
    ])
    .unwrap();
    let calendar = CalendarHandle::new(CalendarPage::with_store(store, date(2028, 3, 6)));

    let view = calendar.view().await.unwrap();
    assert_eq!(view.title, "March 2028");
    assert_eq!(view.events.len(), 1);

    assert!(!calendar.toggle_type(EventType::Gaming).await.unwrap());
    assert!(calendar.view().await.unwrap().events.is_empty());
    assert_eq!(calendar.events().await.unwrap().len(), 2);

    calendar.show_month(1).await.unwrap();
    let april = calendar.view().await.unwrap();
    assert_eq!(april.title, "April 2028");
    assert_eq!(april.events[&date(2028, 4, 12)][0].title, "Review");

    calendar.go_to_today().await.unwrap();
    assert_eq!(calendar.view().await.unwrap().title, "March 2028");
}
