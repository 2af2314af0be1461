use std::fmt::Write;

use chrono::NaiveDate;

use crate::insights::{self, InsightsBundle};
use crate::models::{Archetype, CanonicalEvent};
use crate::profiles;

pub fn build_report(
    archetype: Option<Archetype>,
    generated_on: NaiveDate,
    events: &[CanonicalEvent],
) -> String {
    let bundle = insights::generate_insights(events, archetype);
    render_report(archetype, generated_on, events, &bundle)
}

pub fn render_report(
    archetype: Option<Archetype>,
    generated_on: NaiveDate,
    events: &[CanonicalEvent],
    bundle: &InsightsBundle,
) -> String {
    let mut output = String::new();
    let archetype_label = archetype.map(|value| value.as_str()).unwrap_or("neutral profile");

    let _ = writeln!(output, "# Ayurvedic Workflow Insights");
    let _ = writeln!(
        output,
        "Generated for {} on {} ({} events)",
        archetype_label,
        generated_on,
        events.len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "> {}", bundle.ai_summary.sentence());

    let _ = writeln!(output);
    let _ = writeln!(output, "## Burnout Threshold");
    let _ = writeln!(
        output,
        "- {}% ({:?}): {}",
        bundle.burnout.percentage,
        bundle.burnout.status_category,
        bundle.burnout.status_text()
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Pranic Alignment");
    let _ = writeln!(
        output,
        "- {}% {}: {}",
        bundle.alignment.percentage, bundle.alignment.status, bundle.alignment.subtext
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Primary Energy Drainer");
    let _ = writeln!(output, "- {}: {}", bundle.drainer.title, bundle.drainer.subtext);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recommendation");
    let _ = writeln!(
        output,
        "- {}: {} [{}]",
        bundle.recommendation.title, bundle.recommendation.text, bundle.recommendation.button_text
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recommended Rituals");
    for ritual in &bundle.rituals {
        let _ = writeln!(output, "- {} {}", ritual.icon, ritual.label);
    }

    let summaries = insights::summarize_by_type(events);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Event Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No events scheduled.");
    } else {
        for summary in &summaries {
            let _ = writeln!(
                output,
                "- {}: {} events, {} minutes ({} high intensity)",
                summary.event_type,
                summary.count,
                summary.total_duration,
                summary.high_intensity_count
            );
        }
    }

    if let Some(archetype) = archetype {
        let protocol = profiles::burnout_protocol(archetype);
        let _ = writeln!(output);
        let _ = writeln!(output, "## {}", protocol.title);
        let _ = writeln!(output, "State: {}", protocol.state);
        let _ = writeln!(output, "Goal: {}", protocol.goal);
        for activity in protocol.activities.iter() {
            let _ = writeln!(output, "- {}: {}", activity.name, activity.description);
        }
        let _ = writeln!(output, "Dietary nudge: {}", protocol.diet);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventType, Intensity};

    fn report_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn report_lists_every_section() {
        let events = vec![CanonicalEvent {
            id: "2".to_string(),
            title: "Team Sync".to_string(),
            event_type: EventType::Meeting,
            duration_minutes: 60,
            intensity: Intensity::High,
            timestamp: None,
        }];

        let report = build_report(Some(Archetype::Vata), report_date(), &events);
        assert!(report.contains("Generated for Vata on 2026-03-02 (1 events)"));
        assert!(report.contains("- 40% (Optimal): Optimal energy balance. Keep it up."));
        assert!(report.contains("## Primary Energy Drainer\n- Context-Switching Overload"));
        assert!(report.contains("- Meeting: 1 events, 60 minutes (1 high intensity)"));
        assert!(report.contains("## Vata Burnout (The Scattered Mind)"));
    }

    #[test]
    fn neutral_report_skips_protocol() {
        let report = build_report(None, report_date(), &[]);
        assert!(report.contains("Generated for neutral profile"));
        assert!(report.contains("No events scheduled."));
        assert!(!report.contains("Burnout (The"));
    }
}
