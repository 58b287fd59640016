use crate::common::Emotion;
use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One color choice per emotion category. Fields are optional so that
/// records written before a category existed still deserialize; the
/// intake validator guarantees all six are present on new records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionColors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enjoyment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surprise: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fear: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disgust: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sadness: Option<String>,
}

impl EmotionColors {
    pub fn get(&self, emotion: Emotion) -> Option<&str> {
        match emotion {
            Emotion::Anger => self.anger.as_deref(),
            Emotion::Enjoyment => self.enjoyment.as_deref(),
            Emotion::Surprise => self.surprise.as_deref(),
            Emotion::Fear => self.fear.as_deref(),
            Emotion::Disgust => self.disgust.as_deref(),
            Emotion::Sadness => self.sadness.as_deref(),
        }
    }

    pub fn set(&mut self, emotion: Emotion, value: String) {
        let slot = match emotion {
            Emotion::Anger => &mut self.anger,
            Emotion::Enjoyment => &mut self.enjoyment,
            Emotion::Surprise => &mut self.surprise,
            Emotion::Fear => &mut self.fear,
            Emotion::Disgust => &mut self.disgust,
            Emotion::Sadness => &mut self.sadness,
        };
        *slot = Some(value);
    }
}

/// The optional demographic block attached to a submission. All answers
/// are free-form codes chosen by the form; unknown codes are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Questionnaire {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(rename = "educationOther", skip_serializing_if = "Option::is_none")]
    pub education_other: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psychology: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualization: Option<String>,
}

/// One accepted respondent record as it lives in the store: the six
/// colors flattened to top-level keys, the questionnaire, and the
/// acceptance timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(flatten)]
    pub colors: EmotionColors,
    #[serde(rename = "preQuestionnaire", skip_serializing_if = "Option::is_none")]
    pub questionnaire: Option<Questionnaire>,
    pub timestamp: String,
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
}

impl Submission {
    /// Stamps a validated submission with the acceptance time and a
    /// fresh record id.
    pub fn accept(colors: EmotionColors, questionnaire: Option<Questionnaire>) -> Self {
        Self {
            colors,
            questionnaire,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            id: Uuid::new_v4(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_colors() -> EmotionColors {
        let mut colors = EmotionColors::default();
        for emotion in Emotion::ALL {
            colors.set(emotion, "#102030".to_string());
        }
        colors
    }

    #[test]
    fn colors_flatten_to_top_level_keys() {
        let submission = Submission::accept(full_colors(), None);
        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["anger"], "#102030");
        assert_eq!(value["sadness"], "#102030");
        assert!(value.get("preQuestionnaire").is_none()); // omitted when absent
    }

    #[test]
    fn legacy_records_without_id_deserialize() {
        let raw = r##"{
            "anger": "#ff0000",
            "enjoyment": "#00ff00",
            "surprise": "#0000ff",
            "fear": "#111111",
            "disgust": "#222222",
            "sadness": "#333333",
            "timestamp": "2024-01-01 10:00:00"
        }"##;
        let submission: Submission = serde_json::from_str(raw).unwrap();
        assert_eq!(submission.colors.get(Emotion::Anger), Some("#ff0000"));
        assert!(submission.questionnaire.is_none());
    }

    #[test]
    fn questionnaire_round_trips_with_renamed_field() {
        let questionnaire = Questionnaire {
            education: Some("other".to_string()),
            education_other: Some("vocational".to_string()),
            ..Questionnaire::default()
        };
        let value = serde_json::to_value(&questionnaire).unwrap();
        assert_eq!(value["educationOther"], "vocational");
        let back: Questionnaire = serde_json::from_value(value).unwrap();
        assert_eq!(back, questionnaire);
    }
}
