use crate::analysis::aggregator::{AggregationResult, DenseRegionAggregator};
use crate::analysis::tally::QuestionnaireTally;
use crate::common::Emotion;
use crate::error::AppError;
use crate::store::SubmissionStore;
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// One full analysis run, ready for the rendering layer. Emotions
/// nobody has submitted yet are absent rather than empty.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub total_submissions: usize,
    #[serde(rename = "preQuestionnaire", skip_serializing_if = "Option::is_none")]
    pub questionnaire: Option<QuestionnaireTally>,
    pub emotions: IndexMap<Emotion, AggregationResult>,
}

/// Assembles a report from the full submission history: one sample
/// sequence per emotion in submission order, aggregated independently,
/// plus the questionnaire tallies.
pub struct AnalysisRunner {
    store: Arc<dyn SubmissionStore>,
    aggregator: DenseRegionAggregator,
}

impl AnalysisRunner {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self {
            store,
            aggregator: DenseRegionAggregator::new(),
        }
    }

    pub async fn run(&self) -> Result<AnalysisReport, AppError> {
        let submissions = self.store.load().await?;
        info!("Analyzing {} submissions", submissions.len());

        let mut emotions = IndexMap::new();
        for emotion in Emotion::ALL {
            let samples: Vec<String> = submissions
                .iter()
                .filter_map(|s| s.colors.get(emotion))
                .map(String::from)
                .collect();
            match self.aggregator.aggregate(&samples)? {
                Some(result) => {
                    debug!(
                        "{}: {} ({} of {} samples in the dense region)",
                        emotion, result.representative_hex, result.dense_count, result.total_count
                    );
                    emotions.insert(emotion, result);
                }
                None => debug!("{}: no samples yet, skipped", emotion),
            }
        }

        let tally = QuestionnaireTally::collect(
            submissions.iter().filter_map(|s| s.questionnaire.as_ref()),
        );
        Ok(AnalysisReport {
            total_submissions: submissions.len(),
            questionnaire: (!tally.is_empty()).then_some(tally),
            emotions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{EmotionColors, Questionnaire, Submission};
    use crate::error::StoreError;
    use async_trait::async_trait;

    struct MemoryStore {
        submissions: Vec<Submission>,
    }

    #[async_trait]
    impl SubmissionStore for MemoryStore {
        async fn load(&self) -> Result<Vec<Submission>, StoreError> {
            Ok(self.submissions.clone())
        }

        async fn append(&self, _submission: Submission) -> Result<usize, StoreError> {
            unreachable!("analysis never appends")
        }
    }

    fn submission(color: &str, questionnaire: Option<Questionnaire>) -> Submission {
        let mut colors = EmotionColors::default();
        for emotion in Emotion::ALL {
            colors.set(emotion, color.to_string());
        }
        Submission::accept(colors, questionnaire)
    }

    fn runner(submissions: Vec<Submission>) -> AnalysisRunner {
        AnalysisRunner::new(Arc::new(MemoryStore { submissions }))
    }

    #[tokio::test]
    async fn report_covers_every_submitted_emotion() {
        let report = runner(vec![
            submission("#ff0000", None),
            submission("#fe0101", None),
        ])
        .run()
        .await
        .unwrap();

        assert_eq!(report.total_submissions, 2);
        assert_eq!(report.emotions.len(), 6);
        assert!(report.questionnaire.is_none()); // nobody filled one in
        let anger = &report.emotions[&Emotion::Anger];
        assert_eq!(anger.total_count, 2);
        assert_eq!(anger.dense_count, 2);
    }

    #[tokio::test]
    async fn emotions_without_samples_are_omitted() {
        let mut partial = submission("#00ff00", None);
        partial.colors.fear = None;
        let report = runner(vec![partial]).run().await.unwrap();

        assert_eq!(report.emotions.len(), 5);
        assert!(!report.emotions.contains_key(&Emotion::Fear));
    }

    #[tokio::test]
    async fn empty_store_yields_an_empty_report() {
        let report = runner(Vec::new()).run().await.unwrap();
        assert_eq!(report.total_submissions, 0);
        assert!(report.emotions.is_empty());
        assert!(report.questionnaire.is_none());
    }

    #[tokio::test]
    async fn questionnaire_tallies_ride_along() {
        let questionnaire = Questionnaire {
            gender: Some("female".to_string()),
            ..Questionnaire::default()
        };
        let report = runner(vec![
            submission("#112233", Some(questionnaire)),
            submission("#112233", None),
        ])
        .run()
        .await
        .unwrap();

        let tally = report.questionnaire.unwrap();
        assert_eq!(tally.respondents, 1); // only submissions carrying one
        assert_eq!(tally.gender["female"], 1);
    }
}
