use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{CanonicalEvent, EventType, ExternalEvent, Intensity, LocalEvent, RawEvent};

pub const DEFAULT_DURATION_MINUTES: u32 = 60;
pub const UNTITLED_EVENT: &str = "Untitled Event";

const MEETING_KEYWORDS: &[&str] = &["sync", "meeting", "call", "standup", "1:1"];
const MEETING_ESCALATORS: &[&str] = &["review", "urgent"];
const DEEP_WORK_KEYWORDS: &[&str] = &["code", "design", "deep work", "sprint", "review", "debug"];
const BREAK_KEYWORDS: &[&str] = &["break", "lunch", "walk", "meditate"];

/// Turns raw events into canonical ones. Never fails: anything that
/// cannot be recovered falls back to Admin / Low / 60 minutes.
pub fn normalize(raw_events: &[RawEvent]) -> Vec<CanonicalEvent> {
    raw_events.iter().map(normalize_event).collect()
}

pub fn normalize_event(raw: &RawEvent) -> CanonicalEvent {
    match raw {
        RawEvent::Local(event) => normalize_local(event),
        RawEvent::External(event) => normalize_external(event),
    }
}

fn normalize_local(event: &LocalEvent) -> CanonicalEvent {
    let duration = positive_minutes(event.duration_minutes);

    if let (Some(event_type), Some(intensity), Some(duration_minutes)) =
        (event.event_type, event.intensity, duration)
    {
        return CanonicalEvent {
            id: event.id.clone(),
            title: event.title.clone().unwrap_or_default(),
            event_type,
            duration_minutes,
            intensity,
            timestamp: event.timestamp,
        };
    }

    let title = display_title(event.title.as_deref());
    let (event_type, intensity) = classify_title(&title);
    debug!(id = %event.id, %event_type, %intensity, "classified partial local event");

    CanonicalEvent {
        id: event.id.clone(),
        title,
        event_type,
        duration_minutes: duration.unwrap_or(DEFAULT_DURATION_MINUTES),
        intensity,
        timestamp: event.timestamp,
    }
}

fn normalize_external(event: &ExternalEvent) -> CanonicalEvent {
    let title = display_title(event.summary.as_deref());
    let (event_type, intensity) = classify_title(&title);
    let duration_minutes =
        window_minutes(event.start, event.end).unwrap_or(DEFAULT_DURATION_MINUTES);

    debug!(id = %event.id, %event_type, %intensity, duration_minutes, "classified external event");

    CanonicalEvent {
        id: event.id.clone(),
        title,
        event_type,
        duration_minutes,
        intensity,
        timestamp: event.start,
    }
}

/// Keyword heuristic over a display title; first matching rule wins.
pub fn classify_title(title: &str) -> (EventType, Intensity) {
    let lowered = title.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

    if contains_any(MEETING_KEYWORDS) {
        let intensity = if contains_any(MEETING_ESCALATORS) {
            Intensity::High
        } else {
            Intensity::Medium
        };
        (EventType::Meeting, intensity)
    } else if contains_any(DEEP_WORK_KEYWORDS) {
        (EventType::DeepWork, Intensity::High)
    } else if contains_any(BREAK_KEYWORDS) {
        (EventType::Break, Intensity::Low)
    } else {
        (EventType::Admin, Intensity::Low)
    }
}

fn display_title(title: Option<&str>) -> String {
    match title {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => UNTITLED_EVENT.to_string(),
    }
}

fn positive_minutes(value: Option<i64>) -> Option<u32> {
    value
        .filter(|minutes| *minutes > 0)
        .map(|minutes| u32::try_from(minutes).unwrap_or(u32::MAX))
}

fn window_minutes(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Option<u32> {
    let (start, end) = (start?, end?);
    positive_minutes(Some((end - start).num_minutes()))
}
