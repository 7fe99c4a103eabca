//! Prompt pools for the two-player prompt game.
//!
//! Pure selection: given a game mode and a prompt kind, pick one prompt
//! from a static table. No state, no I/O. The mode/kind vocabulary lives
//! here because both the prompt tables and the replicated turn records
//! speak it.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Room-level flavor selecting which prompt tables are in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Friendly,
    Crush,
    Adult,
}

/// The two prompt categories a player can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    Truth,
    Dare,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameMode::Friendly => "friendly",
            GameMode::Crush => "crush",
            GameMode::Adult => "adult",
        };
        f.write_str(name)
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PromptKind::Truth => "truth",
            PromptKind::Dare => "dare",
        };
        f.write_str(name)
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "friendly" => Ok(GameMode::Friendly),
            "crush" => Ok(GameMode::Crush),
            "adult" => Ok(GameMode::Adult),
            other => Err(format!("unknown game mode '{other}'")),
        }
    }
}

impl FromStr for PromptKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truth" => Ok(PromptKind::Truth),
            "dare" => Ok(PromptKind::Dare),
            other => Err(format!("unknown prompt kind '{other}'")),
        }
    }
}

/// Every prompt available for a `(mode, kind)` pairing.
pub fn prompts(mode: GameMode, kind: PromptKind) -> &'static [&'static str] {
    match (mode, kind) {
        (GameMode::Friendly, PromptKind::Truth) => FRIENDLY_TRUTHS,
        (GameMode::Friendly, PromptKind::Dare) => FRIENDLY_DARES,
        (GameMode::Crush, PromptKind::Truth) => CRUSH_TRUTHS,
        (GameMode::Crush, PromptKind::Dare) => CRUSH_DARES,
        (GameMode::Adult, PromptKind::Truth) => ADULT_TRUTHS,
        (GameMode::Adult, PromptKind::Dare) => ADULT_DARES,
    }
}

/// Pick one prompt at random from the `(mode, kind)` table.
pub fn pick_prompt(mode: GameMode, kind: PromptKind) -> &'static str {
    let pool = prompts(mode, kind);
    // Tables are compile-time non-empty, so indexing cannot go wrong.
    pool[rand::thread_rng().gen_range(0..pool.len())]
}

static FRIENDLY_TRUTHS: &[&str] = &[
    "What is the most embarrassing thing you have done in public?",
    "What is a talent you wish you had?",
    "What is the silliest fear you still carry from childhood?",
    "What song do you secretly love but never admit to?",
    "What is the worst gift you have ever received?",
    "If you could swap lives with anyone for a day, who would it be?",
    "What is one habit of yours that drives other people crazy?",
    "What is the longest you have gone without showering?",
    "What was your most awkward school moment?",
    "What lie do you tell most often?",
];

static FRIENDLY_DARES: &[&str] = &[
    "Do your best impression of the other player.",
    "Speak in an accent until your next turn.",
    "Sing the chorus of the last song you listened to.",
    "Do ten jumping jacks right now.",
    "Text a friend nothing but a potato emoji.",
    "Balance something on your head until your next turn.",
    "Talk without closing your lips.",
    "Show the last photo in your camera roll.",
    "Dance for fifteen seconds with no music.",
    "Say the alphabet backwards as fast as you can.",
];

static CRUSH_TRUTHS: &[&str] = &[
    "What was your first impression of me?",
    "What is your idea of a perfect date?",
    "Have you ever dreamed about me? What happened?",
    "What is the most romantic thing you have ever done?",
    "What little thing makes your heart skip a beat?",
    "When did you last think about me, and why?",
    "What nickname would you secretly give me?",
    "What is one thing about me you find adorable?",
    "Would you rather hold hands or hug? Why?",
    "What song reminds you of me?",
];

static CRUSH_DARES: &[&str] = &[
    "Give me your best compliment, no laughing.",
    "Describe my smile in exactly five words.",
    "Write me a two-line poem right now.",
    "Hold eye contact for ten full seconds.",
    "Say my name in the most dramatic way possible.",
    "Draw a heart somewhere I can see it.",
    "Tell me your favorite memory of us.",
    "Send me the selfie you took most recently.",
    "Plan our imaginary dream vacation in one minute.",
    "Whisper something sweet.",
];

static ADULT_TRUTHS: &[&str] = &[
    "What is the most spontaneous thing you have ever done?",
    "What is your biggest turn-on in a partner's personality?",
    "What is a secret you have never told anyone?",
    "What was your most memorable kiss?",
    "What is something you find attractive that others might not?",
    "Have you ever had a crush on someone you should not have?",
    "What is the boldest message you have ever sent?",
    "What do you wear to feel most confident?",
    "What is a fantasy trip you would take with a partner?",
    "What is the most daring thing on your bucket list?",
];

static ADULT_DARES: &[&str] = &[
    "Describe your ideal evening together, sparing no detail.",
    "Give a slow-motion demonstration of your best dance move.",
    "Say something flirty in another language.",
    "Reveal the most daring outfit you own.",
    "Tell me what you noticed about me first.",
    "Recreate a famous romantic movie scene.",
    "Give your most charming wink on camera.",
    "Confess one thing you have wanted to ask me.",
    "Describe our first date as if telling a friend.",
    "Compliment three different things about me.",
];
