// src/event.rs
use crate::errors::EventError;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

// === EVENT ID ===
/// Remote ids are integers; locally parsed or synthesized ids may be either.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Numeric(u64),
    Text(String),
}

impl EventId {
    pub fn is_empty(&self) -> bool {
        match self {
            EventId::Numeric(_) => false,
            EventId::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Numeric(n) => write!(f, "{}", n),
            EventId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for EventId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.parse::<u64>() {
            Ok(n) => EventId::Numeric(n),
            Err(_) => EventId::Text(trimmed.to_string()),
        })
    }
}

impl From<u64> for EventId {
    fn from(n: u64) -> Self {
        EventId::Numeric(n)
    }
}

// === EVENT ===
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    title: String,
    description: String,
    date: String,
    location: String,
}

impl Event {
    pub fn new(
        id: EventId,
        title: String,
        description: String,
        date: String,
        location: String,
    ) -> Self {
        Self { id, title, description, date, location }
    }

    pub fn id(&self) -> &EventId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID          : {}", self.id)?;
        writeln!(f, "Title       : {}", self.title)?;
        writeln!(f, "Date        : {}", self.date)?;
        writeln!(f, "Location    : {}", self.location)?;
        write!(f, "Description : {}", self.description)
    }
}

// === DRAFT ===
/// User-entered data for an event that has not been created yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
}

impl EventDraft {
    pub fn new(title: &str, description: &str, date: &str, location: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            date: date.to_string(),
            location: location.to_string(),
        }
    }

    /// Presence check only; the first blank field in form order is reported.
    pub fn validate(&self) -> Result<(), EventError> {
        let fields = [
            ("title", &self.title),
            ("description", &self.description),
            ("date", &self.date),
            ("location", &self.location),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(EventError::MissingField(name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_parsing() {
        assert_eq!("42".parse::<EventId>().unwrap(), EventId::Numeric(42));
        assert_eq!(" 42 ".parse::<EventId>().unwrap(), EventId::Numeric(42));
        assert_eq!("abc-1".parse::<EventId>().unwrap(), EventId::Text("abc-1".to_string()));
        assert!(EventId::Text("  ".to_string()).is_empty());
        assert!(!EventId::Numeric(0).is_empty());
    }

    #[test]
    fn test_event_id_serde_accepts_numbers_and_strings() {
        let n: EventId = serde_json::from_str("101").unwrap();
        let s: EventId = serde_json::from_str("\"x9\"").unwrap();
        assert_eq!(n, EventId::Numeric(101));
        assert_eq!(s, EventId::Text("x9".to_string()));
        assert_eq!(n.to_string(), "101");
    }

    #[test]
    fn test_draft_validation() {
        let draft = EventDraft::new("Meetup", "Talks and pizza", "2024-05-01", "Hall A");
        assert!(draft.validate().is_ok());

        let blank_title = EventDraft { title: "   ".to_string(), ..draft.clone() };
        assert!(matches!(blank_title.validate(), Err(EventError::MissingField("title"))));

        let no_location = EventDraft { location: String::new(), ..draft.clone() };
        assert!(matches!(no_location.validate(), Err(EventError::MissingField("location"))));

        // Presence only: the date text is not parsed.
        let odd_date = EventDraft { date: "next friday".to_string(), ..draft };
        assert!(odd_date.validate().is_ok());
    }
}
