use std::str::FromStr;

use serde::Serialize;

use crate::errors::DomainError;
use crate::models::Archetype;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Answer {
    pub text: &'static str,
    pub archetype: Archetype,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    pub id: u8,
    pub part: &'static str,
    pub text: &'static str,
    pub answers: [Answer; 3],
}

const fn question(
    id: u8,
    part: &'static str,
    text: &'static str,
    vata: &'static str,
    pitta: &'static str,
    kapha: &'static str,
) -> Question {
    Question {
        id,
        part,
        text,
        answers: [
            Answer { text: vata, archetype: Archetype::Vata },
            Answer { text: pitta, archetype: Archetype::Pitta },
            Answer { text: kapha, archetype: Archetype::Kapha },
        ],
    }
}

const MIND: &str = "Part 1: Mind & Focus";
const ENERGY: &str = "Part 2: Energy & Rhythm";
const BODY: &str = "Part 3: Physical Baseline";

pub static QUESTIONS: [Question; 10] = [
    question(
        1,
        MIND,
        "When tackling a new, complex project, your working style is usually:",
        "Jumping between multiple ideas quickly; highly creative but sometimes disorganized.",
        "Creating a structured, highly optimized plan and executing it with intense focus.",
        "Taking time to process the requirements fully, then working through it methodically and steadily.",
    ),
    question(
        2,
        MIND,
        "How does your memory function during a busy workday?",
        "I grasp new concepts instantly, but easily forget details if I'm distracted.",
        "I have a sharp, accurate memory, especially for facts, figures, and past mistakes.",
        "It takes me a moment to learn new software or routines, but once I learn it, I never forget it.",
    ),
    question(
        3,
        MIND,
        "In team meetings or Slack discussions, your communication style is:",
        "Fast, enthusiastic, and prone to going off on tangents.",
        "Direct, articulate, debate-oriented, and strictly to the point.",
        "Calm, thoughtful, observant, and speaking only when necessary.",
    ),
    question(
        4,
        MIND,
        "When dealing with interpersonal conflict at work or a harsh critique, you tend to:",
        "Overthink the situation, worry, and second-guess yourself.",
        "Become defensive, argumentative, or overly critical in return.",
        "Withdraw, avoid the conflict entirely, or hold onto the resentment quietly.",
    ),
    question(
        5,
        ENERGY,
        "If you don't use an alarm clock, your natural sleep pattern is:",
        "Light and easily interrupted; my mind races at night.",
        "Sound and moderate; I usually wake up feeling alert and ready to go.",
        "Deep and heavy; I struggle to wake up and feel groggy in the morning.",
    ),
    question(
        6,
        ENERGY,
        "How do you handle skipping a meal due to back-to-back meetings?",
        "My appetite is irregular anyway, but I might get lightheaded or jittery.",
        "I get extremely irritable, lose focus, and feel intensely \"hangry.\"",
        "I can easily skip a meal without much physical or emotional distress.",
    ),
    question(
        7,
        ENERGY,
        "How would you describe your overall daily stamina?",
        "Erratic. I work in intense, short bursts and crash suddenly.",
        "High and sustained. I can power through long days but risk burning out entirely.",
        "Slow to start, but I have incredible endurance once I get into a rhythm.",
    ),
    question(
        8,
        BODY,
        "When it comes to the office thermostat or general temperature, you are:",
        "Always cold. I need a sweater even in the summer.",
        "Always warm. I overheat easily and prefer cooler environments.",
        "Generally comfortable, but I strongly dislike cold, damp weather.",
    ),
    question(
        9,
        BODY,
        "Under stress, where do you carry physical tension?",
        "My neck, shoulders, and jaw (teeth grinding).",
        "My eyes (strain), or I get stress headaches/acid reflux.",
        "My lower back, or I feel an overall sense of heaviness in my limbs.",
    ),
    question(
        10,
        BODY,
        "How would you describe your natural physical frame and weight fluctuation?",
        "Naturally thin or wiry; I lose weight easily when stressed.",
        "Medium, athletic build; my weight stays relatively consistent.",
        "Solid, sturdy frame; I gain weight easily and find it hard to lose.",
    ),
];

/// Per-archetype answer counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub vata: u32,
    pub pitta: u32,
    pub kapha: u32,
}

impl Tally {
    /// Counts only the answered slots.
    pub fn from_answers(answers: &[Option<Archetype>]) -> Self {
        let mut tally = Tally::default();
        for archetype in answers.iter().flatten() {
            *tally.count_mut(*archetype) += 1;
        }
        tally
    }

    pub fn count(&self, archetype: Archetype) -> u32 {
        match archetype {
            Archetype::Vata => self.vata,
            Archetype::Pitta => self.pitta,
            Archetype::Kapha => self.kapha,
        }
    }

    fn count_mut(&mut self, archetype: Archetype) -> &mut u32 {
        match archetype {
            Archetype::Vata => &mut self.vata,
            Archetype::Pitta => &mut self.pitta,
            Archetype::Kapha => &mut self.kapha,
        }
    }

    /// Plurality winner; ties go to the earliest archetype in enumeration order.
    pub fn dominant(&self) -> Archetype {
        let mut dominant = Archetype::Vata;
        let mut max: Option<u32> = None;
        for archetype in Archetype::ALL {
            let count = self.count(archetype);
            if max.map_or(true, |current| count > current) {
                max = Some(count);
                dominant = archetype;
            }
        }
        dominant
    }
}

pub fn dominant_archetype(answers: &[Option<Archetype>]) -> Archetype {
    Tally::from_answers(answers).dominant()
}

/// Parses a scripted answer list such as `v,p,k,-,1,2`.
/// Letters or archetype names pick directly; `1`..`3` pick the answer at
/// that position; `-` or an empty slot leaves the question unanswered.
pub fn parse_answers(input: &str) -> Result<Vec<Option<Archetype>>, DomainError> {
    input
        .split(',')
        .map(str::trim)
        .map(|token| match token {
            "" | "-" => Ok(None),
            "1" => Ok(Some(Archetype::Vata)),
            "2" => Ok(Some(Archetype::Pitta)),
            "3" => Ok(Some(Archetype::Kapha)),
            other => Archetype::from_str(other)
                .map(Some)
                .map_err(|_| DomainError::InvalidAnswer(other.to_string())),
        })
        .collect()
}

/// In-progress quiz: a sparse answer array plus a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    answers: Vec<Option<Archetype>>,
    cursor: usize,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            answers: vec![None; QUESTIONS.len()],
            cursor: 0,
        }
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        QUESTIONS.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Records an answer at the cursor (overwriting any earlier one) and advances.
    pub fn answer(&mut self, archetype: Archetype) {
        if let Some(slot) = self.answers.get_mut(self.cursor) {
            *slot = Some(archetype);
            self.cursor += 1;
        }
    }

    /// Picks the answer at `index` (0-based) of the current question.
    pub fn choose(&mut self, index: usize) -> Result<Archetype, DomainError> {
        let archetype = self
            .current_question()
            .and_then(|question| question.answers.get(index))
            .map(|answer| answer.archetype)
            .ok_or_else(|| DomainError::InvalidAnswer((index + 1).to_string()))?;
        self.answer(archetype);
        Ok(archetype)
    }

    pub fn back(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= QUESTIONS.len()
    }

    pub fn answers(&self) -> &[Option<Archetype>] {
        &self.answers
    }

    pub fn tally(&self) -> Tally {
        Tally::from_answers(&self.answers)
    }

    pub fn dominant(&self) -> Archetype {
        self.tally().dominant()
    }
}
