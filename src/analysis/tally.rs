use crate::common::Questionnaire;
use indexmap::IndexMap;
use serde::Serialize;

/// Per-field answer counts over the pre-questionnaires. Maps preserve
/// first-seen answer order, which is the order the report renders in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuestionnaireTally {
    /// Number of submissions that carried a questionnaire; the base for
    /// percentage figures.
    pub respondents: usize,
    pub gender: IndexMap<String, usize>,
    pub age: IndexMap<String, usize>,
    pub education: IndexMap<String, usize>,
    pub psychology: IndexMap<String, usize>,
    pub visualization: IndexMap<String, usize>,
}

impl QuestionnaireTally {
    pub fn collect<'a>(questionnaires: impl Iterator<Item = &'a Questionnaire>) -> Self {
        let mut tally = Self::default();
        for questionnaire in questionnaires {
            tally.respondents += 1;
            count(&mut tally.gender, questionnaire.gender.as_deref());
            count(&mut tally.age, questionnaire.age.as_deref());
            count(&mut tally.education, education_key(questionnaire).as_deref());
            count(&mut tally.psychology, questionnaire.psychology.as_deref());
            count(
                &mut tally.visualization,
                questionnaire.visualization.as_deref(),
            );
        }
        tally
    }

    pub fn is_empty(&self) -> bool {
        self.respondents == 0
    }
}

fn count(counts: &mut IndexMap<String, usize>, answer: Option<&str>) {
    if let Some(answer) = answer {
        *counts.entry(answer.to_string()).or_insert(0) += 1;
    }
}

/// An education answer of `other` with a free text tallies under
/// `other: <text>`, so distinct write-ins stay distinct.
fn education_key(questionnaire: &Questionnaire) -> Option<String> {
    let education = questionnaire.education.as_deref()?;
    match questionnaire.education_other.as_deref() {
        Some(text) if education == "other" && !text.is_empty() => {
            Some(format!("other: {text}"))
        }
        _ => Some(education.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questionnaire(gender: &str, education: &str, other: Option<&str>) -> Questionnaire {
        Questionnaire {
            gender: Some(gender.to_string()),
            age: Some("18-25".to_string()),
            education: Some(education.to_string()),
            education_other: other.map(|o| o.to_string()),
            psychology: Some("beginner".to_string()),
            visualization: Some("no-knowledge".to_string()),
        }
    }

    #[test]
    fn counts_answers_per_field() {
        let entries = [
            questionnaire("female", "bachelor", None),
            questionnaire("male", "master", None),
            questionnaire("female", "bachelor", None),
        ];
        let tally = QuestionnaireTally::collect(entries.iter());
        assert_eq!(tally.respondents, 3);
        assert_eq!(tally.gender["female"], 2);
        assert_eq!(tally.gender["male"], 1);
        assert_eq!(tally.education["bachelor"], 2);
        assert_eq!(tally.age["18-25"], 3);
    }

    #[test]
    fn preserves_first_seen_order() {
        let entries = [
            questionnaire("prefer-not-say", "master", None),
            questionnaire("female", "bachelor", None),
            questionnaire("male", "doctoral", None),
        ];
        let tally = QuestionnaireTally::collect(entries.iter());
        let order: Vec<&String> = tally.gender.keys().collect();
        assert_eq!(order, ["prefer-not-say", "female", "male"]);
    }

    #[test]
    fn education_other_uses_the_write_in_text() {
        let entries = [
            questionnaire("male", "other", Some("vocational")),
            questionnaire("female", "other", Some("trade school")),
            questionnaire("male", "other", None), // no write-in, raw code
        ];
        let tally = QuestionnaireTally::collect(entries.iter());
        assert_eq!(tally.education["other: vocational"], 1);
        assert_eq!(tally.education["other: trade school"], 1);
        assert_eq!(tally.education["other"], 1);
    }

    #[test]
    fn skips_unanswered_fields() {
        let entries = [Questionnaire::default()];
        let tally = QuestionnaireTally::collect(entries.iter());
        assert_eq!(tally.respondents, 1);
        assert!(tally.gender.is_empty());
        assert!(tally.education.is_empty());
    }
}
