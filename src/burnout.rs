use crate::models::{Archetype, BurnoutResult, CanonicalEvent, EventType, Intensity, StatusCategory};

/// Baseline wear applied before any event is counted.
pub const BASE_SCORE: u32 = 15;
pub const ARCHETYPE_PENALTY: u32 = 10;

pub fn score(events: &[CanonicalEvent], archetype: Option<Archetype>) -> BurnoutResult {
    let total = events
        .iter()
        .fold(BASE_SCORE, |acc, event| acc.saturating_add(event_load(event, archetype)));

    let percentage = total.min(100) as u8;

    BurnoutResult {
        percentage,
        status_category: StatusCategory::classify(percentage),
    }
}

/// Points a single event adds to the running score.
pub fn event_load(event: &CanonicalEvent, archetype: Option<Archetype>) -> u32 {
    intensity_weight(event.intensity)
        + duration_weight(event.duration_minutes)
        + archetype
            .map(|archetype| archetype_penalty(event, archetype))
            .unwrap_or(0)
}

pub fn intensity_weight(intensity: Intensity) -> u32 {
    match intensity {
        Intensity::High => 15,
        Intensity::Medium => 10,
        Intensity::Low => 5,
    }
}

pub fn duration_weight(duration_minutes: u32) -> u32 {
    match duration_minutes {
        0..=90 => 0,
        91..=120 => 10,
        _ => 25,
    }
}

pub fn archetype_penalty(event: &CanonicalEvent, archetype: Archetype) -> u32 {
    if is_archetype_trigger(event, archetype) {
        ARCHETYPE_PENALTY
    } else {
        0
    }
}

/// Whether this event is the kind of block that drains the archetype.
pub fn is_archetype_trigger(event: &CanonicalEvent, archetype: Archetype) -> bool {
    match archetype {
        Archetype::Vata => event.event_type == EventType::Meeting,
        Archetype::Pitta => {
            event.event_type == EventType::DeepWork && event.intensity == Intensity::High
        }
        Archetype::Kapha => event.event_type == EventType::Admin && event.duration_minutes > 60,
    }
}
