use crate::common::Submission;
use crate::error::StoreError;
use crate::intake::payload::{SubmissionAck, SubmissionPayload};
use crate::store::SubmissionStore;
use futures::task::{Context, Poll};
use futures::Future;
use std::{pin::Pin, sync::Arc};
use tower::Service;
use tracing::{debug, info};

/// Validates a payload, persists the accepted record, and produces the
/// acknowledgement. Validation failures become rejected acks; only a
/// store failure surfaces as a service error.
#[derive(Clone)]
pub struct IntakeService {
    store: Arc<dyn SubmissionStore>,
}

impl IntakeService {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self { store }
    }
}

impl Service<SubmissionPayload> for IntakeService {
    type Response = SubmissionAck;
    type Error = StoreError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, payload: SubmissionPayload) -> Self::Future {
        let store = self.store.clone();

        Box::pin(async move {
            match payload.validate() {
                Ok((colors, questionnaire)) => {
                    let submission = Submission::accept(colors, questionnaire);
                    let total = store.append(submission).await?;
                    info!("Accepted submission, {} on record", total);
                    Ok(SubmissionAck::accepted(total))
                }
                Err(e) => {
                    debug!("Rejected submission: {}", e);
                    Ok(SubmissionAck::rejected(e.to_string()))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    #[derive(Default)]
    struct MemoryStore {
        submissions: Mutex<Vec<Submission>>,
    }

    #[async_trait]
    impl SubmissionStore for MemoryStore {
        async fn load(&self) -> Result<Vec<Submission>, StoreError> {
            Ok(self.submissions.lock().await.clone())
        }

        async fn append(&self, submission: Submission) -> Result<usize, StoreError> {
            let mut submissions = self.submissions.lock().await;
            submissions.push(submission);
            Ok(submissions.len())
        }
    }

    const VALID_PAYLOAD: &str = r##"{
        "anger": "#ff0000",
        "enjoyment": "#ffd700",
        "surprise": "#ff8c00",
        "fear": "#4b0082",
        "disgust": "#556b2f",
        "sadness": "#1e3a8a"
    }"##;

    #[tokio::test]
    async fn valid_submission_is_persisted_and_acked() {
        let store = Arc::new(MemoryStore::default());
        let mut service = IntakeService::new(store.clone());

        let payload = SubmissionPayload::parse(VALID_PAYLOAD).unwrap();
        let ack = service.ready().await.unwrap().call(payload).await.unwrap();

        assert!(ack.success);
        assert_eq!(ack.total_submissions, Some(1));
        assert_eq!(store.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_submission_is_acked_but_not_persisted() {
        let store = Arc::new(MemoryStore::default());
        let mut service = IntakeService::new(store.clone());

        let payload = SubmissionPayload::parse(r##"{"anger": "#ff0000"}"##).unwrap();
        let ack = service.ready().await.unwrap().call(payload).await.unwrap();

        assert!(!ack.success);
        assert!(ack.message.contains("enjoyment")); // names what is missing
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn running_total_grows_per_acceptance() {
        let store = Arc::new(MemoryStore::default());
        let mut service = IntakeService::new(store);

        for expected in 1..=3 {
            let payload = SubmissionPayload::parse(VALID_PAYLOAD).unwrap();
            let ack = service.ready().await.unwrap().call(payload).await.unwrap();
            assert_eq!(ack.total_submissions, Some(expected));
        }
    }
}
