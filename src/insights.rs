//! Dashboard insights derived from a scored schedule.
//!
//! Everything here is a pure function of `(events, archetype)`: alignment,
//! the dominant drainer, a recommendation, a one-line mood summary and a
//! pair of micro-rituals.

use serde::Serialize;

use crate::burnout;
use crate::models::{
    Archetype, BurnoutResult, CanonicalEvent, ColorToken, EventType, EventTypeSummary, Intensity,
};

/// Burnout percentage at which the mood summary switches to its alert form.
pub const ALERT_THRESHOLD: u8 = 50;
/// Burnout percentage at which recommendations escalate.
pub const CRITICAL_THRESHOLD: u8 = 75;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alignment {
    pub percentage: u8,
    pub status: &'static str,
    pub color: ColorToken,
    pub subtext: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Drainer {
    pub event_type: Option<EventType>,
    pub title: String,
    pub subtext: String,
    pub impact_percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub title: &'static str,
    pub text: &'static str,
    pub button_text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodSummary {
    pub text: &'static str,
    pub highlight: &'static str,
    pub suffix: &'static str,
    pub color: ColorToken,
}

impl MoodSummary {
    pub fn sentence(&self) -> String {
        format!("{} {}{}", self.text, self.highlight, self.suffix)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ritual {
    pub icon: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsBundle {
    pub burnout: BurnoutResult,
    pub alignment: Alignment,
    pub drainer: Drainer,
    pub recommendation: Recommendation,
    pub ai_summary: MoodSummary,
    pub rituals: Vec<Ritual>,
}

pub fn generate_insights(events: &[CanonicalEvent], archetype: Option<Archetype>) -> InsightsBundle {
    let burnout = burnout::score(events, archetype);
    let summaries = summarize_by_type(events);
    let (ai_summary, rituals) = mood_and_rituals(archetype, burnout);

    InsightsBundle {
        alignment: alignment(burnout, events),
        drainer: dominant_drainer(&summaries, archetype, burnout.percentage),
        recommendation: recommendation(archetype, burnout.percentage),
        ai_summary,
        rituals: rituals.to_vec(),
        burnout,
    }
}

pub fn alignment(burnout: BurnoutResult, events: &[CanonicalEvent]) -> Alignment {
    let percentage = 100u8.saturating_sub(burnout.percentage);

    if percentage < 50 {
        Alignment {
            percentage,
            status: "Severe Misalignment",
            color: ColorToken::Red,
            subtext: "Your schedule is working against your natural rhythm. Protect recovery time before adding anything else.".to_string(),
        }
    } else if percentage < 75 {
        let high_count = events
            .iter()
            .filter(|event| event.intensity == Intensity::High)
            .count();
        let subtext = if high_count > 0 {
            format!(
                "{} high-intensity {} pulling you off balance.",
                high_count,
                if high_count == 1 { "event is" } else { "events are" }
            )
        } else {
            "Your energy is dipping slightly below your natural rhythm.".to_string()
        };

        Alignment {
            percentage,
            status: "Moderate Alignment",
            color: ColorToken::Amber,
            subtext,
        }
    } else {
        Alignment {
            percentage,
            status: "Optimal Alignment",
            color: ColorToken::Emerald,
            subtext: "Your day flows in harmony with your natural energy rhythm.".to_string(),
        }
    }
}

/// Groups events by type, in order of first appearance.
pub fn summarize_by_type(events: &[CanonicalEvent]) -> Vec<EventTypeSummary> {
    let mut summaries: Vec<EventTypeSummary> = Vec::new();

    for event in events {
        let index = match summaries
            .iter()
            .position(|summary| summary.event_type == event.event_type)
        {
            Some(index) => index,
            None => {
                summaries.push(EventTypeSummary {
                    event_type: event.event_type,
                    count: 0,
                    total_duration: 0,
                    high_intensity_count: 0,
                });
                summaries.len() - 1
            }
        };

        let entry = &mut summaries[index];
        entry.count += 1;
        entry.total_duration = entry.total_duration.saturating_add(event.duration_minutes);
        if event.intensity == Intensity::High {
            entry.high_intensity_count += 1;
        }
    }

    summaries
}

/// How strongly one event type drains the given archetype.
pub fn drain_metric(summary: &EventTypeSummary, archetype: Option<Archetype>) -> u32 {
    match (archetype, summary.event_type) {
        (Some(Archetype::Vata), EventType::Meeting) => summary.count as u32 * 10,
        (Some(Archetype::Pitta), EventType::DeepWork) => summary.high_intensity_count as u32 * 10,
        (Some(Archetype::Kapha), EventType::Admin) => {
            if summary.total_duration > 60 {
                10
            } else {
                0
            }
        }
        _ => summary.total_duration,
    }
}

/// Share of the burnout score attributed to a metric, capped at 100.
pub fn impact_percent(metric: u32, burnout_percentage: u8) -> u8 {
    if burnout_percentage == 0 {
        return 0;
    }
    let share = f64::from(metric) / f64::from(burnout_percentage) * 100.0;
    share.min(100.0).round() as u8
}

pub fn dominant_drainer(
    summaries: &[EventTypeSummary],
    archetype: Option<Archetype>,
    burnout_percentage: u8,
) -> Drainer {
    let mut best: Option<(&EventTypeSummary, u32)> = None;
    for summary in summaries {
        let metric = drain_metric(summary, archetype);
        let current = best.map(|(_, value)| value).unwrap_or(0);
        if metric > current {
            best = Some((summary, metric));
        }
    }

    let Some((summary, metric)) = best else {
        return Drainer {
            event_type: None,
            title: "No Significant Drainers".to_string(),
            subtext: "Your schedule is well balanced. Nothing is draining you disproportionately today.".to_string(),
            impact_percent: 0,
        };
    };

    let impact = impact_percent(metric, burnout_percentage);
    let (title, subtext) = match (archetype, summary.event_type) {
        (Some(Archetype::Vata), EventType::Meeting) => (
            "Context-Switching Overload".to_string(),
            format!(
                "{} fragmenting your attention. Frequent switching drains Vata's nervous system (~{}% of today's load).",
                plural(summary.count, "meeting is", "meetings are"),
                impact
            ),
        ),
        (Some(Archetype::Pitta), EventType::DeepWork) => (
            "Overheated Focus Blocks".to_string(),
            format!(
                "{} pushing Pitta past its heat threshold (~{}% of today's load).",
                plural(
                    summary.high_intensity_count,
                    "high-intensity deep work block is",
                    "high-intensity deep work blocks are"
                ),
                impact
            ),
        ),
        (Some(Archetype::Kapha), EventType::Admin) => (
            "Stagnant Admin Marathon".to_string(),
            format!(
                "{} minutes of admin work are letting Kapha energy settle into inertia (~{}% of today's load).",
                summary.total_duration, impact
            ),
        ),
        (_, event_type) => (
            format!("Heavy {} Load", event_type.label()),
            format!(
                "{} minutes across {} weigh on your energy (~{}% of today's load).",
                summary.total_duration,
                plural(
                    summary.count,
                    &format!("{} block", event_type.label()),
                    &format!("{} blocks", event_type.label())
                ),
                impact
            ),
        ),
    };

    Drainer {
        event_type: Some(summary.event_type),
        title,
        subtext,
        impact_percent: impact,
    }
}

pub fn recommendation(archetype: Option<Archetype>, burnout_percentage: u8) -> Recommendation {
    let critical = burnout_percentage >= CRITICAL_THRESHOLD;

    match (archetype, critical) {
        (Some(Archetype::Vata), false) => Recommendation {
            title: "Protect a Focus Block",
            text: "Batch your meetings and guard a 90-minute focus block so your mind can settle into a single stream of work.",
            button_text: "Auto-Schedule Deep Work",
        },
        (Some(Archetype::Vata), true) => Recommendation {
            title: "Ground Your Nervous System",
            text: "Your calendar is scattering your energy. Step away for 20 minutes of Yoga Nidra or 4-7-8 breathing before the next call.",
            button_text: "Start Grounding Rest",
        },
        (Some(Archetype::Pitta), false) => Recommendation {
            title: "Pace Your Intensity",
            text: "Keep 10 AM to 2 PM for deep work and move check-ins to the late afternoon so focus never tips into frustration.",
            button_text: "Protect Pitta Hours",
        },
        (Some(Archetype::Pitta), true) => Recommendation {
            title: "Cool Down Now",
            text: "You are running hot. Pause for five rounds of Sheetali cooling breath and rest your eyes away from the screen.",
            button_text: "Start Cooling Breath",
        },
        (Some(Archetype::Kapha), false) => Recommendation {
            title: "Front-Load Momentum",
            text: "Move your hardest task into the 6 AM to 10 AM window to build momentum before your energy settles.",
            button_text: "Reschedule to Morning",
        },
        (Some(Archetype::Kapha), true) => Recommendation {
            title: "Break the Stagnation",
            text: "Long low-stimulation blocks are weighing you down. Take a 5-minute brisk walk or a round of Surya Bhedana breath.",
            button_text: "Start Energizing Walk",
        },
        (None, false) => Recommendation {
            title: "Keep a Steady Rhythm",
            text: "Alternate focused work with short breaks to keep your energy even through the day.",
            button_text: "Add a Short Break",
        },
        (None, true) => Recommendation {
            title: "Take a Recovery Break",
            text: "Your load is high. Clear fifteen minutes for a walk or slow breathing before you continue.",
            button_text: "Schedule Recovery Break",
        },
    }
}

pub fn mood_and_rituals(
    archetype: Option<Archetype>,
    burnout: BurnoutResult,
) -> (MoodSummary, [Ritual; 2]) {
    let alert = burnout.percentage >= ALERT_THRESHOLD;
    let color = burnout.color();
    let summary = |text: &'static str, highlight: &'static str, suffix: &'static str| MoodSummary {
        text,
        highlight,
        suffix,
        color,
    };

    match (archetype, alert) {
        (Some(Archetype::Vata), false) => (
            summary("Your Vata energy is", "light and creative", " today. A good window for expansive thinking."),
            [ritual("🌬️", "4-7-8 Breathing"), ritual("🍵", "Warm Spiced Tea")],
        ),
        (Some(Archetype::Vata), true) => (
            summary("Your Vata energy is", "scattered", " by constant context-switching. Ground yourself before the next call."),
            [ritual("🧘", "Yoga Nidra"), ritual("🌿", "Barefoot Grounding")],
        ),
        (Some(Archetype::Pitta), false) => (
            summary("Your Pitta fire is", "sharp and focused", ". Channel it into your most important work."),
            [ritual("💧", "Mint Water Break"), ritual("🚶", "Nature Walk")],
        ),
        (Some(Archetype::Pitta), true) => (
            summary("Your Pitta fire is", "running hot", ". Cool down before frustration sets in."),
            [ritual("❄️", "Sheetali Breath"), ritual("🕯️", "Trataka Eye Rest")],
        ),
        (Some(Archetype::Kapha), false) => (
            summary("Your Kapha energy is", "stable and grounded", ". Use that steadiness to finish what you start."),
            [ritual("☀️", "Sun Salutation"), ritual("🫚", "Ginger Tea")],
        ),
        (Some(Archetype::Kapha), true) => (
            summary("Your Kapha energy is", "sliding into stagnation", ". A burst of movement will restore momentum."),
            [ritual("🔥", "Surya Bhedana"), ritual("⚡", "Micro-HIIT")],
        ),
        (None, false) => (
            summary("Your energy is", "holding steady", ". Keep the rhythm going."),
            [ritual("🚶", "Short Walk"), ritual("💧", "Hydration Break")],
        ),
        (None, true) => (
            summary("Your energy is", "under strain", ". A deliberate pause will help."),
            [ritual("🌬️", "Box Breathing"), ritual("🧘", "Stretch Break")],
        ),
    }
}

fn ritual(icon: &'static str, label: &'static str) -> Ritual {
    Ritual { icon, label }
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatusCategory;

    fn sample_event(event_type: EventType, intensity: Intensity, duration_minutes: u32) -> CanonicalEvent {
        CanonicalEvent {
            id: format!("{event_type:?}-{duration_minutes}"),
            title: event_type.label().to_string(),
            event_type,
            duration_minutes,
            intensity,
            timestamp: None,
        }
    }

    #[test]
    fn vata_meeting_scenario_aligns_at_sixty() {
        let events = vec![sample_event(EventType::Meeting, Intensity::High, 60)];
        let bundle = generate_insights(&events, Some(Archetype::Vata));

        assert_eq!(bundle.burnout.percentage, 40);
        assert_eq!(bundle.alignment.percentage, 60);
        assert_eq!(bundle.alignment.color, ColorToken::Amber);
        assert_eq!(bundle.alignment.subtext, "1 high-intensity event is pulling you off balance.");
        assert_eq!(bundle.drainer.event_type, Some(EventType::Meeting));
        assert_eq!(bundle.drainer.impact_percent, 25);
        assert_eq!(bundle.recommendation.button_text, "Auto-Schedule Deep Work");
    }

    #[test]
    fn empty_schedule_is_harmonious() {
        let bundle = generate_insights(&[], Some(Archetype::Kapha));

        assert_eq!(bundle.alignment.percentage, 85);
        assert_eq!(bundle.alignment.status, "Optimal Alignment");
        assert_eq!(bundle.drainer.title, "No Significant Drainers");
        assert_eq!(bundle.drainer.impact_percent, 0);
        assert_eq!(bundle.rituals.len(), 2);
    }

    #[test]
    fn amber_alignment_without_high_events_uses_generic_dip() {
        let events = vec![sample_event(EventType::Break, Intensity::Low, 30); 3];
        let bundle = generate_insights(&events, Some(Archetype::Pitta));
        assert_eq!(bundle.alignment.percentage, 70);
        assert_eq!(
            bundle.alignment.subtext,
            "Your energy is dipping slightly below your natural rhythm."
        );
    }

    #[test]
    fn critical_schedule_escalates_everything() {
        let events = vec![sample_event(EventType::DeepWork, Intensity::High, 120); 3];
        let bundle = generate_insights(&events, Some(Archetype::Pitta));

        assert_eq!(bundle.burnout.status_category, StatusCategory::Critical);
        assert_eq!(bundle.alignment.status, "Severe Misalignment");
        assert_eq!(bundle.recommendation.title, "Cool Down Now");
        assert_eq!(bundle.ai_summary.highlight, "running hot");
        assert_eq!(bundle.ai_summary.color, ColorToken::Red);
    }

    #[test]
    fn generic_metric_can_outweigh_archetype_metric() {
        let events = vec![
            sample_event(EventType::Meeting, Intensity::Medium, 30),
            sample_event(EventType::DeepWork, Intensity::High, 120),
        ];
        let summaries = summarize_by_type(&events);
        assert_eq!(drain_metric(&summaries[0], Some(Archetype::Vata)), 10);
        assert_eq!(drain_metric(&summaries[1], Some(Archetype::Vata)), 120);

        let drainer = dominant_drainer(&summaries, Some(Archetype::Vata), 75);
        assert_eq!(drainer.event_type, Some(EventType::DeepWork));
        assert_eq!(drainer.title, "Heavy Deep Work Load");
        assert_eq!(drainer.impact_percent, 100);
    }

    #[test]
    fn ties_go_to_first_seen_type() {
        let events = vec![
            sample_event(EventType::Admin, Intensity::Low, 45),
            sample_event(EventType::Break, Intensity::Low, 45),
        ];
        let drainer = dominant_drainer(&summarize_by_type(&events), None, 25);
        assert_eq!(drainer.event_type, Some(EventType::Admin));
    }

    #[test]
    fn kapha_short_admin_is_not_a_drainer() {
        let events = vec![sample_event(EventType::Admin, Intensity::Low, 45)];
        let drainer = dominant_drainer(&summarize_by_type(&events), Some(Archetype::Kapha), 20);
        assert_eq!(drainer.event_type, None);
    }

    #[test]
    fn impact_guards_against_zero_score() {
        assert_eq!(impact_percent(30, 0), 0);
        assert_eq!(impact_percent(10, 40), 25);
        assert_eq!(impact_percent(10, 30), 33);
    }

    #[test]
    fn grouping_accumulates_per_type() {
        let events = vec![
            sample_event(EventType::Meeting, Intensity::High, 30),
            sample_event(EventType::Admin, Intensity::Low, 20),
            sample_event(EventType::Meeting, Intensity::Medium, 45),
        ];
        let summaries = summarize_by_type(&events);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].event_type, EventType::Meeting);
        assert_eq!(summaries[0].count, 2);
        assert_eq!(summaries[0].total_duration, 75);
        assert_eq!(summaries[0].high_intensity_count, 1);
    }

    #[test]
    fn insights_are_deterministic() {
        let events = vec![
            sample_event(EventType::Admin, Intensity::Low, 90),
            sample_event(EventType::Meeting, Intensity::High, 60),
        ];
        assert_eq!(
            generate_insights(&events, Some(Archetype::Kapha)),
            generate_insights(&events, Some(Archetype::Kapha))
        );
    }

    #[test]
    fn neutral_bundle_uses_generic_copy() {
        let events = vec![
            sample_event(EventType::Meeting, Intensity::High, 60),
            sample_event(EventType::Admin, Intensity::Low, 30),
        ];
        let bundle = generate_insights(&events, None);

        assert_eq!(bundle.burnout.percentage, 35);
        assert_eq!(bundle.alignment.percentage, 65);
        assert_eq!(bundle.drainer.event_type, Some(EventType::Meeting));
        assert_eq!(bundle.drainer.title, "Heavy Meeting Load");
        assert_eq!(bundle.recommendation.title, "Keep a Steady Rhythm");
        assert_eq!(bundle.ai_summary.highlight, "holding steady");
        assert_eq!(bundle.rituals[0].label, "Short Walk");

        let heavy = vec![sample_event(EventType::Meeting, Intensity::High, 150); 3];
        let bundle = generate_insights(&heavy, None);
        assert_eq!(bundle.burnout.percentage, 100);
        assert_eq!(bundle.recommendation.button_text, "Schedule Recovery Break");
        assert_eq!(bundle.ai_summary.highlight, "under strain");
        assert_eq!(bundle.rituals[0].label, "Box Breathing");
    }

    #[test]
    fn alignment_saturates_for_out_of_range_scores() {
        let burnout = BurnoutResult {
            percentage: 150,
            status_category: StatusCategory::Critical,
        };
        let result = alignment(burnout, &[]);
        assert_eq!(result.percentage, 0);
        assert_eq!(result.status, "Severe Misalignment");
    }
}
