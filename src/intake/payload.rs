use crate::common::{Emotion, EmotionColors, Questionnaire, Rgb24};
use crate::error::IntakeError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One submission as it arrives on the wire. Two shapes are accepted:
/// the current `{"preQuestionnaire": ..., "emotionColors": {...}}` form,
/// and the earliest clients' bare emotion-to-color map, which lands in
/// the flattened remainder.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionPayload {
    #[serde(rename = "preQuestionnaire")]
    pre_questionnaire: Option<Questionnaire>,
    #[serde(rename = "emotionColors")]
    emotion_colors: Option<Map<String, Value>>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl SubmissionPayload {
    pub fn parse(line: &str) -> Result<Self, IntakeError> {
        serde_json::from_str(line).map_err(IntakeError::MalformedPayload)
    }

    fn color_map(&self) -> &Map<String, Value> {
        self.emotion_colors.as_ref().unwrap_or(&self.rest)
    }

    /// Checks the submission rules: every emotion present, every color a
    /// well-formed `#RRGGBB` value. The questionnaire is only carried by
    /// the current payload shape.
    pub fn validate(&self) -> Result<(EmotionColors, Option<Questionnaire>), IntakeError> {
        let map = self.color_map();

        let missing: Vec<Emotion> = Emotion::ALL
            .into_iter()
            .filter(|e| !map.contains_key(e.as_str()))
            .collect();
        if !missing.is_empty() {
            return Err(IntakeError::MissingEmotions(missing));
        }

        let mut colors = EmotionColors::default();
        for emotion in Emotion::ALL {
            let value = &map[emotion.as_str()];
            match value.as_str() {
                Some(text) if Rgb24::parse(text).is_some() => {
                    colors.set(emotion, text.to_string());
                }
                Some(text) => {
                    return Err(IntakeError::MalformedColor {
                        emotion,
                        value: text.to_string(),
                    });
                }
                None => {
                    return Err(IntakeError::MalformedColor {
                        emotion,
                        value: value.to_string(),
                    });
                }
            }
        }

        let questionnaire = if self.emotion_colors.is_some() {
            self.pre_questionnaire.clone()
        } else {
            None
        };
        Ok((colors, questionnaire))
    }
}

/// The one-line JSON reply per submission attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionAck {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_submissions: Option<usize>,
}

impl SubmissionAck {
    pub fn accepted(total_submissions: usize) -> Self {
        Self {
            success: true,
            message: "Submission saved".to_string(),
            total_submissions: Some(total_submissions),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            total_submissions: None,
        }
    }
}
