use serde::Serialize;

const POSITIVE_WORDS: &[&str] = &[
    "happy", "joy", "excited", "love", "great", "amazing", "wonderful", "fantastic",
    "energetic", "cheerful", "awesome", "thrilled", "delighted",
];
const NEGATIVE_WORDS: &[&str] = &[
    "sad", "depressed", "angry", "hate", "terrible", "awful", "lonely", "hurt", "pain",
    "broken", "devastated", "miserable",
];
const CALM_WORDS: &[&str] = &[
    "calm", "peaceful", "relaxed", "tired", "sleepy", "chill", "mellow", "quiet", "serene",
    "tranquil",
];

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Calm,
    Neutral,
}

impl Mood {
    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Sad => "😢",
            Mood::Calm => "😌",
            Mood::Neutral => "😐",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Mood::Happy => "#FFD93D",
            Mood::Sad => "#6C7A89",
            Mood::Calm => "#95E1D3",
            Mood::Neutral => "#A8E6CF",
        }
    }

    /// "Happy", "Sad", ... as shown next to a recommended track.
    pub fn genre_label(self) -> String {
        let name = self.to_string();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => name,
        }
    }
}

/// Classifier output as handed to the browser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodReading {
    pub mood: Mood,
    pub emoji: &'static str,
    pub color: &'static str,
}

impl From<Mood> for MoodReading {
    fn from(mood: Mood) -> Self {
        MoodReading {
            mood,
            emoji: mood.emoji(),
            color: mood.color(),
        }
    }
}

fn count_matches(text: &str, words: &[&str]) -> usize {
    words.iter().filter(|word| text.contains(*word)).count()
}

/// Keyword-counting mood heuristic. Words match as substrings of the
/// lower-cased text, each word counted at most once.
pub fn classify(text: &str) -> Mood {
    let text = text.to_lowercase();
    let positive = count_matches(&text, POSITIVE_WORDS);
    let negative = count_matches(&text, NEGATIVE_WORDS);
    let calm = count_matches(&text, CALM_WORDS);

    if positive > negative && positive > calm {
        Mood::Happy
    } else if negative > positive {
        Mood::Sad
    } else if calm > positive {
        Mood::Calm
    } else {
        Mood::Neutral
    }
}
