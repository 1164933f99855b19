// src/event_factory.rs
use crate::event::{Event, EventDraft, EventId};
use chrono::Utc;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SUMMARY_CHARS: usize = 100;
pub const ELLIPSIS: &str = "...";

/// A post as served by the placeholder API.
#[derive(Debug, Clone, Deserialize)]
pub struct RemotePost {
    pub id: EventId,
    #[serde(rename = "userId", default)]
    pub user_id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Request body for creating a post. The API has no date or location fields.
#[derive(Debug, Clone, Serialize)]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub body: &'a str,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

/// Response to a create request; every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedPost {
    #[serde(default)]
    pub id: Option<EventId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionStyle {
    /// First `max_chars` characters of the body followed by an ellipsis.
    Summary { max_chars: usize },
    Full,
}

pub struct EventFactory {
    description_style: DescriptionStyle,
}

impl Default for EventFactory {
    fn default() -> Self {
        Self { description_style: DescriptionStyle::Full }
    }
}

impl EventFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory used for list views.
    pub fn summaries() -> Self {
        Self::new().with_description_style(DescriptionStyle::Summary {
            max_chars: DEFAULT_SUMMARY_CHARS,
        })
    }

    // Builder methods
    pub fn with_description_style(mut self, style: DescriptionStyle) -> Self {
        self.description_style = style;
        self
    }

    pub fn create_event(&self, post: RemotePost) -> Event {
        let description = match self.description_style {
            DescriptionStyle::Summary { max_chars } => summarize(&post.body, max_chars),
            DescriptionStyle::Full => post.body,
        };
        let date = placeholder_date(&post.id);
        Event::new(
            post.id,
            post.title,
            description,
            date,
            placeholder_location(post.user_id),
        )
    }

    pub fn create_events(&self, posts: Vec<RemotePost>) -> Vec<Event> {
        debug!("EventFactory: adapting {} posts", posts.len());
        posts.into_iter().map(|post| self.create_event(post)).collect()
    }

    /// Date and location never round-trip through the API, so they always come
    /// from the draft.
    pub fn create_from_draft(&self, created: CreatedPost, draft: &EventDraft) -> Event {
        let id = match created.id {
            Some(id) if !id.is_empty() => id,
            _ => {
                let synthesized = synthesize_id();
                warn!("EventFactory: create response had no id, using {}", synthesized);
                synthesized
            }
        };
        Event::new(
            id,
            created.title.unwrap_or_else(|| draft.title.clone()),
            created.body.unwrap_or_else(|| draft.description.clone()),
            draft.date.clone(),
            draft.location.clone(),
        )
    }
}

/// Character-based prefix; the marker is appended even to short bodies.
pub fn summarize(body: &str, max_chars: usize) -> String {
    let mut summary: String = body.chars().take(max_chars).collect();
    summary.push_str(ELLIPSIS);
    summary
}

// The placeholder API carries no dates or venues. These are stable filler
// values, not real data.
pub fn placeholder_date(id: &EventId) -> String {
    let seed = match id {
        EventId::Numeric(n) => *n,
        // Byte sum, so the same text always lands on the same day.
        EventId::Text(s) => s.bytes().fold(0u64, |acc, b| acc.wrapping_add(u64::from(b))),
    };
    format!("2024-{:02}-{:02}", (seed % 9) + 1, (seed % 28) + 1)
}

pub fn placeholder_location(user_id: u64) -> String {
    format!("Venue {}", user_id)
}

fn synthesize_id() -> EventId {
    EventId::Numeric(Utc::now().timestamp_millis().max(0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64, body: &str) -> RemotePost {
        RemotePost {
            id: EventId::Numeric(id),
            user_id: 3,
            title: format!("Post {}", id),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_summary_is_truncated_with_marker() {
        let long_body = "x".repeat(250);
        let event = EventFactory::summaries().create_event(post(1, &long_body));

        assert_eq!(event.description().chars().count(), DEFAULT_SUMMARY_CHARS + ELLIPSIS.len());
        assert!(event.description().ends_with(ELLIPSIS));
        assert_eq!(event.title(), "Post 1");
        assert_eq!(event.id(), &EventId::Numeric(1));
    }

    #[test]
    fn test_summary_counts_characters_not_bytes() {
        let body = "é".repeat(120);
        let summary = summarize(&body, 100);
        assert_eq!(summary.chars().count(), 103);
    }

    #[test]
    fn test_full_description_is_untouched() {
        let long_body = "word ".repeat(60);
        let event = EventFactory::new().create_event(post(2, &long_body));
        assert_eq!(event.description(), long_body);
    }

    #[test]
    fn test_placeholder_values_are_deterministic() {
        let event = EventFactory::new().create_event(post(1, "b"));
        assert_eq!(event.date(), "2024-02-02");
        assert_eq!(event.location(), "Venue 3");

        assert_eq!(placeholder_date(&EventId::Numeric(10)), "2024-02-11");
        assert_eq!(placeholder_date(&EventId::Numeric(27)), "2024-01-28");
        assert_eq!(placeholder_date(&EventId::Numeric(28)), "2024-02-01");
    }

    #[test]
    fn test_text_ids_are_kept_and_get_stable_dates() {
        let remote: RemotePost = serde_json::from_str(
            r#"{"userId": 2, "id": "evt-abc", "title": "Text id", "body": "b"}"#,
        )
        .unwrap();
        let event = EventFactory::new().create_event(remote);

        assert_eq!(event.id(), &EventId::Text("evt-abc".to_string()));
        assert_eq!(event.location(), "Venue 2");
        // "abc" sums to 294: month 294 % 9 + 1, day 294 % 28 + 1.
        assert_eq!(placeholder_date(&EventId::Text("abc".to_string())), "2024-07-15");
        assert_eq!(event.date(), placeholder_date(&EventId::Text("evt-abc".to_string())));
    }

    #[test]
    fn test_created_event_keeps_draft_date_and_location() {
        let draft = EventDraft::new("Meetup", "Talks", "2025-03-14", "Hall B");
        let created = CreatedPost {
            id: Some(EventId::Numeric(101)),
            title: Some("Meetup".to_string()),
            body: Some("Talks".to_string()),
        };

        let event = EventFactory::new().create_from_draft(created, &draft);

        assert_eq!(event.id(), &EventId::Numeric(101));
        assert_eq!(event.date(), "2025-03-14");
        assert_eq!(event.location(), "Hall B");
    }

    #[test]
    fn test_created_event_without_id_gets_timestamp_id() {
        let draft = EventDraft::new("Meetup", "Talks", "2025-03-14", "Hall B");
        let before = Utc::now().timestamp_millis() as u64;

        let event = EventFactory::new().create_from_draft(CreatedPost::default(), &draft);

        match event.id() {
            EventId::Numeric(n) => assert!(*n >= before),
            other => panic!("expected numeric id, got {:?}", other),
        }
        assert_eq!(event.title(), "Meetup");
        assert_eq!(event.description(), "Talks");
    }
}
