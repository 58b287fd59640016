use serde::{Deserialize, Serialize};
use std::fmt;

/// The six surveyed emotion categories. Iteration and report order is
/// fixed: anger, enjoyment, surprise, fear, disgust, sadness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Enjoyment,
    Surprise,
    Fear,
    Disgust,
    Sadness,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Anger,
        Emotion::Enjoyment,
        Emotion::Surprise,
        Emotion::Fear,
        Emotion::Disgust,
        Emotion::Sadness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Enjoyment => "enjoyment",
            Emotion::Surprise => "surprise",
            Emotion::Fear => "fear",
            Emotion::Disgust => "disgust",
            Emotion::Sadness => "sadness",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
