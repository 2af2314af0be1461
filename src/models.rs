use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;
use crate::normalize::{DEFAULT_DURATION_MINUTES, UNTITLED_EVENT};

/// Mind-body archetype (dosha) assigned by the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Vata,
    Pitta,
    Kapha,
}

impl Archetype {
    /// Enumeration order; also the quiz tie-break order.
    pub const ALL: [Archetype; 3] = [Archetype::Vata, Archetype::Pitta, Archetype::Kapha];

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Vata => "Vata",
            Archetype::Pitta => "Pitta",
            Archetype::Kapha => "Kapha",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vata" | "v" => Ok(Archetype::Vata),
            "pitta" | "p" => Ok(Archetype::Pitta),
            "kapha" | "k" => Ok(Archetype::Kapha),
            _ => Err(DomainError::UnknownArchetype(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    DeepWork,
    Meeting,
    Admin,
    Break,
}

impl EventType {
    pub fn label(&self) -> &'static str {
        match self {
            EventType::DeepWork => "Deep Work",
            EventType::Meeting => "Meeting",
            EventType::Admin => "Admin",
            EventType::Break => "Break",
        }
    }

    /// Storage representation.
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EventType::DeepWork => "deep_work",
            EventType::Meeting => "meeting",
            EventType::Admin => "admin",
            EventType::Break => "break",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EventType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect();

        match key.as_str() {
            "deepwork" => Ok(EventType::DeepWork),
            "meeting" => Ok(EventType::Meeting),
            "admin" => Ok(EventType::Admin),
            "break" => Ok(EventType::Break),
            _ => Err(DomainError::UnknownEventType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "Low",
            Intensity::Medium => "Medium",
            Intensity::High => "High",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Intensity::Low),
            "medium" | "med" => Ok(Intensity::Medium),
            "high" => Ok(Intensity::High),
            _ => Err(DomainError::UnknownIntensity(s.to_string())),
        }
    }
}

/// An event with every scoring field populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalEvent {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub duration_minutes: u32,
    pub intensity: Intensity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Event authored through quick-add. Fields may be missing when the row
/// was stored by an older client or edited by hand.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalEvent {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub event_type: Option<EventType>,
    #[serde(default)]
    pub intensity: Option<Intensity>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl LocalEvent {
    /// Builds a quick-add event, filling the form defaults.
    pub fn quick_add(
        title: Option<String>,
        event_type: Option<EventType>,
        duration_minutes: Option<i64>,
        intensity: Option<Intensity>,
    ) -> Self {
        LocalEvent {
            id: Uuid::new_v4().to_string(),
            title: Some(
                title
                    .filter(|value| !value.trim().is_empty())
                    .unwrap_or_else(|| UNTITLED_EVENT.to_string()),
            ),
            event_type: Some(event_type.unwrap_or(EventType::DeepWork)),
            intensity: Some(intensity.unwrap_or(Intensity::Medium)),
            duration_minutes: Some(
                duration_minutes
                    .filter(|m| *m > 0)
                    .unwrap_or(i64::from(DEFAULT_DURATION_MINUTES)),
            ),
            timestamp: Some(Utc::now()),
        }
    }
}

/// Entry pulled from a third-party calendar feed: only a title and a window.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExternalEvent {
    pub id: String,
    #[serde(default, alias = "title")]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum RawEvent {
    Local(LocalEvent),
    External(ExternalEvent),
}

impl RawEvent {
    pub fn id(&self) -> &str {
        match self {
            RawEvent::Local(event) => &event.id,
            RawEvent::External(event) => &event.id,
        }
    }
}

impl From<CanonicalEvent> for RawEvent {
    fn from(event: CanonicalEvent) -> Self {
        RawEvent::Local(LocalEvent {
            id: event.id,
            title: Some(event.title),
            event_type: Some(event.event_type),
            intensity: Some(event.intensity),
            duration_minutes: Some(i64::from(event.duration_minutes)),
            timestamp: event.timestamp,
        })
    }
}

/// Fixed color family handed to the UI for each status band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Emerald,
    Amber,
    Red,
}

impl ColorToken {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorToken::Emerald => "emerald",
            ColorToken::Amber => "amber",
            ColorToken::Red => "red",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            ColorToken::Emerald => "#10b981",
            ColorToken::Amber => "#ffb300",
            ColorToken::Red => "#f44336",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCategory {
    Optimal,
    Dipping,
    Critical,
}

impl StatusCategory {
    pub fn classify(percentage: u8) -> Self {
        match percentage {
            0..=49 => StatusCategory::Optimal,
            50..=74 => StatusCategory::Dipping,
            _ => StatusCategory::Critical,
        }
    }

    pub fn status_text(&self) -> &'static str {
        match self {
            StatusCategory::Optimal => "Optimal energy balance. Keep it up.",
            StatusCategory::Dipping => "Energy dipping. Schedule a short break soon.",
            StatusCategory::Critical => "Critical zone approaching. Intervention recommended.",
        }
    }

    pub fn color(&self) -> ColorToken {
        match self {
            StatusCategory::Optimal => ColorToken::Emerald,
            StatusCategory::Dipping => ColorToken::Amber,
            StatusCategory::Critical => ColorToken::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnoutResult {
    pub percentage: u8,
    pub status_category: StatusCategory,
}

impl BurnoutResult {
    pub fn status_text(&self) -> &'static str {
        self.status_category.status_text()
    }

    pub fn color(&self) -> ColorToken {
        self.status_category.color()
    }
}

/// Per-type aggregate over a canonical event list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeSummary {
    pub event_type: EventType,
    pub count: usize,
    pub total_duration: u32,
    pub high_intensity_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_parses_display_and_storage_forms() {
        assert_eq!("Deep Work".parse::<EventType>(), Ok(EventType::DeepWork));
        assert_eq!("deep_work".parse::<EventType>(), Ok(EventType::DeepWork));
        assert_eq!("MEETING".parse::<EventType>(), Ok(EventType::Meeting));
        assert!("standup".parse::<EventType>().is_err());
    }

    #[test]
    fn archetype_parse_rejects_unknown_values() {
        assert_eq!("pitta".parse::<Archetype>(), Ok(Archetype::Pitta));
        assert_eq!(
            "Tridosha".parse::<Archetype>(),
            Err(DomainError::UnknownArchetype("Tridosha".to_string()))
        );
    }

    #[test]
    fn status_bands_follow_thresholds() {
        assert_eq!(StatusCategory::classify(49), StatusCategory::Optimal);
        assert_eq!(StatusCategory::classify(50), StatusCategory::Dipping);
        assert_eq!(StatusCategory::classify(74), StatusCategory::Dipping);
        assert_eq!(StatusCategory::classify(75), StatusCategory::Critical);
        assert_eq!(StatusCategory::Critical.color(), ColorToken::Red);
    }

    #[test]
    fn quick_add_fills_form_defaults() {
        let event = LocalEvent::quick_add(Some("  ".to_string()), None, Some(0), None);
        assert_eq!(event.title.as_deref(), Some(UNTITLED_EVENT));
        assert_eq!(event.event_type, Some(EventType::DeepWork));
        assert_eq!(event.intensity, Some(Intensity::Medium));
        assert_eq!(event.duration_minutes, Some(60));
        assert!(Uuid::parse_str(&event.id).is_ok());
    }

    #[test]
    fn raw_event_json_is_tagged_by_source() {
        let raw: RawEvent = serde_json::from_str(
            r#"{"source":"external","id":"g-1","title":"Team Sync","start":"2026-03-02T09:00:00Z","end":"2026-03-02T09:30:00Z"}"#,
        )
        .unwrap();

        match raw {
            RawEvent::External(event) => {
                assert_eq!(event.summary.as_deref(), Some("Team Sync"));
                assert!(event.start.is_some());
            }
            other => panic!("unexpected variant {other:?}"),
        }
    }
}
