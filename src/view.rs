// src/view.rs
use crate::event::Event;
use crate::store::EventStore;

pub const EMPTY_LIST_TEXT: &str = "No events found.";
const MISSING_FIELD_TEXT: &str = "N/A";

fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() { MISSING_FIELD_TEXT } else { value }
}

/// One block per event, separated by blank lines.
pub fn format_event_list(events: &[Event]) -> String {
    if events.is_empty() {
        return EMPTY_LIST_TEXT.to_string();
    }
    events
        .iter()
        .map(|event| {
            format!(
                "[{}] {}\n    {} @ {}\n    {}",
                event.id(),
                event.title(),
                or_placeholder(event.date()),
                or_placeholder(event.location()),
                event.description()
            )
        })
        .collect::<Vec<String>>()
        .join("\n\n")
}

pub fn format_event_detail(event: &Event) -> String {
    format!(
        "{}\n\nDate: {}\nLocation: {}\n\n{}",
        event.title(),
        or_placeholder(event.date()),
        or_placeholder(event.location()),
        event.description().trim()
    )
}

/// The home view: error banner first, then the list unless it failed.
pub fn render_home(store: &EventStore) -> String {
    if store.is_loading() {
        return "Loading...".to_string();
    }
    match store.error() {
        Some(message) => format!("Error: {}", message),
        None => format_event_list(store.events()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventId;
    use crate::event_source::FakeEventSource;
    use reqwest::StatusCode;
    use std::sync::Arc;

    fn event(location: &str) -> Event {
        Event::new(
            EventId::Numeric(3),
            "Board games".to_string(),
            "Bring snacks ".to_string(),
            "2024-04-04".to_string(),
            location.to_string(),
        )
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_event_list(&[]), EMPTY_LIST_TEXT);
    }

    #[test]
    fn test_list_entry_layout() {
        let text = format_event_list(&[event("Cafe")]);
        assert_eq!(text, "[3] Board games\n    2024-04-04 @ Cafe\n    Bring snacks ");
    }

    #[test]
    fn test_detail_uses_placeholder_for_blank_fields() {
        let text = format_event_detail(&event(""));
        assert!(text.contains("Location: N/A"));
        assert!(text.ends_with("Bring snacks"));
    }

    #[tokio::test]
    async fn test_home_shows_error_banner() {
        let mut store =
            EventStore::new(Arc::new(FakeEventSource::failing(StatusCode::INTERNAL_SERVER_ERROR)));
        store.refresh().await;
        assert!(render_home(&store).starts_with("Error: Failed to load events"));
    }
}
