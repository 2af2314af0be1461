//! Static content keyed by archetype.

use serde::Serialize;

use crate::models::Archetype;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeProfile {
    pub profile: &'static str,
    pub calendar_strategy: &'static str,
    pub intervention: &'static str,
    pub notification_style: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub name: &'static str,
    pub description: &'static str,
}

/// Recovery protocol shown once an archetype tips into burnout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BurnoutProtocol {
    pub title: &'static str,
    pub state: &'static str,
    pub goal: &'static str,
    pub activities: [Activity; 4],
    pub diet: &'static str,
}

/// Paced breathing exercise; durations are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathingExercise {
    pub title: &'static str,
    pub audio: &'static str,
    pub inhale: u32,
    pub hold: u32,
    pub exhale: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BreathingPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathingPhase {
    pub fn label(&self) -> &'static str {
        match self {
            BreathingPhase::Inhale => "Inhale",
            BreathingPhase::Hold => "Hold",
            BreathingPhase::Exhale => "Exhale",
        }
    }
}

impl BreathingExercise {
    pub fn seconds(&self, phase: BreathingPhase) -> u32 {
        match phase {
            BreathingPhase::Inhale => self.inhale,
            BreathingPhase::Hold => self.hold,
            BreathingPhase::Exhale => self.exhale,
        }
    }

    /// Phase that follows `phase`, with its length. A zero hold is skipped.
    pub fn next_phase(&self, phase: BreathingPhase) -> (BreathingPhase, u32) {
        let next = match phase {
            BreathingPhase::Inhale if self.hold > 0 => BreathingPhase::Hold,
            BreathingPhase::Inhale | BreathingPhase::Hold => BreathingPhase::Exhale,
            BreathingPhase::Exhale => BreathingPhase::Inhale,
        };
        (next, self.seconds(next))
    }

    pub fn cycle_seconds(&self) -> u32 {
        self.inhale + self.hold + self.exhale
    }
}

/// One-minute stretch offered between calendar blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeskMovement {
    pub title: &'static str,
    pub benefit: &'static str,
    pub instruction: &'static str,
}

pub fn profile(archetype: Archetype) -> ArchetypeProfile {
    match archetype {
        Archetype::Vata => ArchetypeProfile {
            profile: "Creative, visionary, and fast-moving. However, they possess a fragile nervous system that is highly susceptible to digital overwhelm and context-switching fatigue.",
            calendar_strategy: "The app actively blocks back-to-back rapid meetings. It strictly enforces a \"Hard Stop\" at 6:00 PM, as Vatas struggle to wind down.",
            intervention: "If a calendar clash is detected, the app prescribes Grounding. It triggers Yoga Nidra (guided deep rest) or 4-7-8 box breathing.",
            notification_style: "Soft, gentle, and spaced out.",
            color: "#8BC34A",
        },
        Archetype::Pitta => ArchetypeProfile {
            profile: "Logical, driven, and highly productive. They are the classic \"Type A\" workers. Their burnout risk comes from workaholism, perfectionism, and literal \"overheating\" (frustration).",
            calendar_strategy: "The app protects their 10 AM - 2 PM block (Pitta time) fiercely for deep work, moving superficial check-in meetings to the late afternoon.",
            intervention: "If a calendar clash is detected, the app prescribes Cooling. It triggers Sheetali Pranayama (cooling breath) or Trataka (visual resting to reduce screen eye strain).",
            notification_style: "Direct, data-driven, and concise.",
            color: "#E57373",
        },
        Archetype::Kapha => ArchetypeProfile {
            profile: "Calm, steady, and methodical. They are the anchor of any team. Their burnout doesn't look like panic; it looks like stagnation, procrastination, and lack of motivation.",
            calendar_strategy: "The app pushes their hardest, most complex tasks to the morning (6 AM - 10 AM, Kapha time) to build early momentum before lethargy sets in.",
            intervention: "If a calendar clash is detected, the app prescribes Stimulation. It triggers Surya Bhedana (right-nostril energizing breath) or prompts a 5-minute brisk walk.",
            notification_style: "Energetic, encouraging, and action-oriented.",
            color: "#4FC3F7",
        },
    }
}

pub fn burnout_protocol(archetype: Archetype) -> BurnoutProtocol {
    match archetype {
        Archetype::Vata => BurnoutProtocol {
            title: "Vata Burnout (The Scattered Mind)",
            state: "Overwhelmed and anxious, with racing thoughts, digital overload, and insomnia.",
            goal: "Grounding, stabilizing, and slowing down the nervous system.",
            activities: [
                Activity {
                    name: "Yoga Nidra",
                    description: "A 15 to 20 minute guided body scan lying flat, a hard reset for the nervous system.",
                },
                Activity {
                    name: "4-7-8 Breathing",
                    description: "Inhale for 4 seconds, hold for 7, exhale for 8 to lower a racing heart rate.",
                },
                Activity {
                    name: "Tactile Grounding",
                    description: "Step away from screens and walk barefoot on grass, or wash hands and face with warm water.",
                },
                Activity {
                    name: "Auditory Anchoring",
                    description: "Low-frequency binaural beats or singing bowls to slow brainwave activity.",
                },
            ],
            diet: "Warm spiced milk or chamomile tea. Avoid caffeine.",
        },
        Archetype::Pitta => BurnoutProtocol {
            title: "Pitta Burnout (The Overheated Mind)",
            state: "Frustrated and irritable, with intense screen fatigue, eye strain, and a feeling of being on edge.",
            goal: "Cooling, softening, and releasing pressure.",
            activities: [
                Activity {
                    name: "Sheetali Pranayama",
                    description: "Inhale slowly through a rolled tongue, exhale through the nose to cool body and temper.",
                },
                Activity {
                    name: "Trataka",
                    description: "Gaze gently at a candle flame or plant for 3 to 5 minutes, then close the eyes.",
                },
                Activity {
                    name: "Nature Walk Near Water",
                    description: "Ten minutes outside near a fountain, lake, or cool breeze.",
                },
                Activity {
                    name: "Auditory Softening",
                    description: "Ambient water sounds or light flute music.",
                },
            ],
            diet: "Cool water infused with mint, fennel, or cucumber. Step away from spicy food and sour coffee.",
        },
        Archetype::Kapha => BurnoutProtocol {
            title: "Kapha Burnout (The Stagnant Mind)",
            state: "Lethargic and unmotivated, with heavy brain fog and procrastination.",
            goal: "Stimulating, energizing, and creating momentum.",
            activities: [
                Activity {
                    name: "Surya Bhedana",
                    description: "Breathe exclusively through the right nostril to activate the energizing channel.",
                },
                Activity {
                    name: "Micro-HIIT or Surya Namaskar",
                    description: "5 to 10 minutes of rapid, heat-building movement to break physical heaviness.",
                },
                Activity {
                    name: "Cold Splashes",
                    description: "Cold water on face and wrists to jolt the nervous system out of lethargy.",
                },
                Activity {
                    name: "Auditory Stimulation",
                    description: "Upbeat, high-tempo instrumentals or fast drumming.",
                },
            ],
            diet: "Warm water with ginger, black pepper, and honey. Avoid heavy, sweet, or dairy-heavy snacks.",
        },
    }
}

pub fn breathing(archetype: Archetype) -> BreathingExercise {
    match archetype {
        Archetype::Vata => BreathingExercise {
            title: "4-7-8 GROUNDING BREATH",
            audio: "432Hz Binaural Raga (Ahir Bhairav)",
            inhale: 4,
            hold: 7,
            exhale: 8,
        },
        Archetype::Pitta => BreathingExercise {
            title: "SHEETALI (COOLING BREATH)",
            audio: "Ambient Water/Flute sounds",
            inhale: 4,
            hold: 0,
            exhale: 6,
        },
        Archetype::Kapha => BreathingExercise {
            title: "SURYA BHEDANA (HEATING BREATH)",
            audio: "40Hz Gamma Focus beats",
            inhale: 4,
            hold: 2,
            exhale: 4,
        },
    }
}

pub fn desk_movement(archetype: Archetype) -> DeskMovement {
    match archetype {
        Archetype::Vata => DeskMovement {
            title: "Seated Forward Fold",
            benefit: "Grounds the nervous system",
            instruction: "Plant feet flat. Exhale and fold your torso over your legs. Let your head hang heavy to release chaotic Vata energy.",
        },
        Archetype::Pitta => DeskMovement {
            title: "Neck & Shoulder Release",
            benefit: "Releases trapped heat & tension",
            instruction: "Drop right ear to right shoulder. Extend left arm toward the floor. Breathe into the side of the neck to release frustration.",
        },
        Archetype::Kapha => DeskMovement {
            title: "Brisk Seated Twists",
            benefit: "Breaks physical lethargy",
            instruction: "Inhale tall, exhale and forcefully twist right, grabbing your chair. Alternate quickly to stimulate circulation.",
        },
    }
}
