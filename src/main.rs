use expertmeet::api::ExpertMeetApi;
use expertmeet::components::calendar::{CalendarComponent, CalendarView, EventType};
use expertmeet::session::SessionContext;
use expertmeet::startup;
use chrono::Datelike;
use std::env;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting ExpertMeet");

    // Load configuration
    let config = startup::load_config().await?;
    let (session_path, api) = {
        let config_read = config.read().await;
        (config_read.session_path.clone(), ExpertMeetApi::from_config(&config_read)?)
    };

    let session = SessionContext::load(&session_path).await?;
    match session.user.as_ref() {
        Some(user) => info!("Session restored for {} ({:?})", user.email, user.role),
        None => info!("No saved session"),
    }

    let components = startup::start_components(config).await?;

    if let Some(calendar) = components.get::<CalendarComponent>() {
        if let Some(handle) = calendar.get_handle().await {
            let view = handle.view().await?;
            println!("{}", render_month(&view));
        }
    }

    // Optional expert id argument: show that profile
    if let Some(expert_id) = env::args().nth(1) {
        match api.expert_profile(&expert_id).await {
            Ok(profile) => {
                println!("{} {}", profile.name, profile.title.unwrap_or_default());
                if !profile.expertise.is_empty() {
                    println!("  {}", profile.expertise.join(", "));
                }
            }
            Err(e) => warn!("Could not load expert {}: {}", expert_id, e),
        }
    }

    session.save(&session_path).await?;
    components.shutdown_all().await?;

    Ok(())
}

/// Plain-text month preview
fn render_month(view: &CalendarView) -> String {
    let mut out = format!("{:^35}\n", view.title);
    out.push_str(" Sun  Mon  Tue  Wed  Thu  Fri  Sat\n");

    for week in &view.grid.weeks {
        for day in week {
            let marker = if day.is_today {
                '*'
            } else if view.events.contains_key(&day.date) {
                '+'
            } else if !day.in_month {
                '.'
            } else {
                ' '
            };
            out.push_str(&format!(" {:>2}{} ", day.date.day(), marker));
        }
        out.push('\n');
    }

    let legend: Vec<String> = EventType::ALL
        .iter()
        .filter(|t| view.active_types.contains(t))
        .map(|t| format!("{} {}", t.label(), t.color()))
        .collect();
    out.push_str(&legend.join(" | "));
    out
}
