use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::sync::Mutex;

use crate::app::mood::Mood;

const HAPPY: &[&str] = &["happy", "upbeat", "party", "dance", "feel good"];
const SAD: &[&str] = &["sad", "melancholy", "emotional", "heartbreak"];
const CALM: &[&str] = &["relaxing", "chill", "peaceful", "ambient", "meditation"];
const NEUTRAL: &[&str] = &["popular", "indie", "alternative"];
const DEFAULT: &[&str] = &["popular"];

/// Mood label -> candidate search keywords.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoodQueryTable;

impl MoodQueryTable {
    pub fn keywords(&self, mood: Mood) -> &'static [&'static str] {
        match mood {
            Mood::Happy => HAPPY,
            Mood::Sad => SAD,
            Mood::Calm => CALM,
            Mood::Neutral => NEUTRAL,
        }
    }

    pub fn default_keywords(&self) -> &'static [&'static str] {
        DEFAULT
    }

    /// Missing and unrecognized labels both fall back to the default list.
    /// Matching is case-sensitive.
    pub fn resolve(&self, label: Option<&str>) -> &'static [&'static str] {
        label
            .and_then(|l| l.parse::<Mood>().ok())
            .map(|mood| self.keywords(mood))
            .unwrap_or_else(|| self.default_keywords())
    }
}

/// Chooses one keyword out of a non-empty candidate list.
pub trait KeywordPicker: Send + Sync {
    fn pick(&self, candidates: &[&'static str]) -> &'static str;
}

/// Uniform choice from the thread-local RNG.
pub struct RandomPicker;

impl KeywordPicker for RandomPicker {
    fn pick(&self, candidates: &[&'static str]) -> &'static str {
        candidates
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(DEFAULT[0])
    }
}

/// Uniform choice from a seeded RNG, reproducible across runs.
pub struct SeededPicker {
    rng: Mutex<StdRng>,
}

impl SeededPicker {
    pub fn new(seed: u64) -> Self {
        SeededPicker {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl KeywordPicker for SeededPicker {
    fn pick(&self, candidates: &[&'static str]) -> &'static str {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        candidates.choose(&mut *rng).copied().unwrap_or(DEFAULT[0])
    }
}
