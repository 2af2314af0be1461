//! Dosha-aware burnout scoring for calendar schedules.
//!
//! Raw calendar entries go through [`normalize`], are scored by
//! [`burnout::score`] and turned into dashboard copy by
//! [`insights::generate_insights`]. The archetype comes from the quiz in
//! [`quiz`] and is persisted by the shell through [`db`].

pub mod burnout;
pub mod db;
pub mod errors;
pub mod insights;
pub mod models;
pub mod normalize;
pub mod profiles;
pub mod quiz;
pub mod report;

use serde::Serialize;

use crate::insights::InsightsBundle;
use crate::models::{Archetype, CanonicalEvent, RawEvent};

/// Everything a dashboard render needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub archetype: Option<Archetype>,
    pub events: Vec<CanonicalEvent>,
    pub insights: InsightsBundle,
}

/// Normalizer, scorer and insight generator in one pass.
pub fn evaluate(raw_events: &[RawEvent], archetype: Option<Archetype>) -> Dashboard {
    let events = normalize::normalize(raw_events);
    let insights = insights::generate_insights(&events, archetype);

    Dashboard {
        archetype,
        events,
        insights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExternalEvent, StatusCategory};

    #[test]
    fn pipeline_handles_mixed_sources() {
        let raw = vec![
            RawEvent::from(CanonicalEvent {
                id: "1".to_string(),
                title: "Deep Work Session".to_string(),
                event_type: models::EventType::DeepWork,
                duration_minutes: 120,
                intensity: models::Intensity::High,
                timestamp: None,
            }),
            RawEvent::External(ExternalEvent {
                id: "g-1".to_string(),
                summary: Some("Urgent client call".to_string()),
                start: None,
                end: None,
            }),
        ];

        let dashboard = evaluate(&raw, Some(Archetype::Pitta));
        assert_eq!(dashboard.events.len(), 2);
        // 15 + (15 + 10 + 10) + (15)
        assert_eq!(dashboard.insights.burnout.percentage, 65);
        assert_eq!(dashboard.insights.burnout.status_category, StatusCategory::Dipping);
    }

    #[test]
    fn empty_feed_degrades_to_baseline() {
        let dashboard = evaluate(&[], Some(Archetype::Vata));
        assert!(dashboard.events.is_empty());
        assert_eq!(dashboard.insights.burnout.percentage, 15);
        assert_eq!(dashboard.insights.alignment.percentage, 85);
    }
}
