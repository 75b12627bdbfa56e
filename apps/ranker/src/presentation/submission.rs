//! Submission controller — owns the in-flight flag the result view needs.
//!
//! The ranking client itself happily sends concurrent requests; this layer is
//! what refuses a second submission while one is outstanding.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use crate::client::RankingService;
use crate::errors::RankError;
use crate::models::{RankRequest, RankResponse};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Ranking,
    Ranked(RankResponse),
    Failed(String),
}

pub struct Submission {
    service: Arc<dyn RankingService>,
    state: Mutex<SubmissionState>,
}

impl Submission {
    pub fn new(service: Arc<dyn RankingService>) -> Self {
        Self {
            service,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.lock_state().clone()
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(*self.lock_state(), SubmissionState::Ranking)
    }

    /// Runs one ranking call. The previous result is discarded as soon as the
    /// new request starts. Dropping the returned future resets the state to
    /// `Idle`.
    pub async fn submit(&self, request: &RankRequest) -> Result<RankResponse, RankError> {
        let in_flight = InFlight::begin(&self.state)?;

        let outcome = self.service.submit(request).await;

        let next = match &outcome {
            Ok(response) => {
                info!("Submission finished with {} candidates", response.results.len());
                SubmissionState::Ranked(response.clone())
            }
            Err(e) => {
                warn!("Submission failed: {e}");
                SubmissionState::Failed(e.to_string())
            }
        };
        in_flight.finish(next);
        outcome
    }

    fn lock_state(&self) -> MutexGuard<'_, SubmissionState> {
        lock(&self.state)
    }
}

// The guard is never held across an await, so a poisoned lock still holds a
// consistent state.
fn lock(state: &Mutex<SubmissionState>) -> MutexGuard<'_, SubmissionState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Marks a submission as `Ranking` for as long as it lives. Dropped without
/// `finish` (the submit future was cancelled), it puts the state back to `Idle`.
struct InFlight<'a> {
    state: &'a Mutex<SubmissionState>,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn begin(state: &'a Mutex<SubmissionState>) -> Result<Self, RankError> {
        let mut current = lock(state);
        if matches!(*current, SubmissionState::Ranking) {
            return Err(RankError::validation(
                "a ranking request is already in flight",
            ));
        }
        *current = SubmissionState::Ranking;
        Ok(Self { state, armed: true })
    }

    fn finish(mut self, next: SubmissionState) {
        *lock(self.state) = next;
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("Submission cancelled before the service answered");
            *lock(self.state) = SubmissionState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::models::ZipUpload;
    use async_trait::async_trait;
    use serde_json::Value;
    use tokio::sync::Notify;

    /// Holds every submit until released; fails when the JD says "fail".
    struct GatedService {
        release: Notify,
        gated: bool,
        calls: AtomicUsize,
    }

    impl GatedService {
        fn new(gated: bool) -> Arc<Self> {
            Arc::new(Self {
                release: Notify::new(),
                gated,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl RankingService for GatedService {
        async fn submit(&self, request: &RankRequest) -> Result<RankResponse, RankError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.gated {
                self.release.notified().await;
            }
            if request.job_description == "fail" {
                return Err(RankError::Service {
                    status: Some(500),
                    message: "internal error".to_string(),
                });
            }
            Ok(RankResponse {
                job_id: None,
                job_skills: vec![request.job_description.clone()],
                results: vec![],
            })
        }

        async fn health_check(&self) -> Result<Value, RankError> {
            Ok(Value::Null)
        }
    }

    fn request(jd: &str) -> RankRequest {
        RankRequest::new(ZipUpload::new("a.zip", vec![1u8, 2, 3]), jd)
    }

    #[tokio::test]
    async fn test_success_then_failure_replaces_state() {
        let service = GatedService::new(false);
        let submission = Submission::new(service.clone());
        assert_eq!(submission.state(), SubmissionState::Idle);

        submission.submit(&request("rust")).await.unwrap();
        match submission.state() {
            SubmissionState::Ranked(response) => assert_eq!(response.job_skills, vec!["rust"]),
            other => panic!("unexpected state {other:?}"),
        }

        let err = submission.submit(&request("fail")).await.unwrap_err();
        assert!(err.to_string().contains("internal error"));
        assert!(matches!(
            submission.state(),
            SubmissionState::Failed(msg) if msg.contains("internal error")
        ));
        assert!(!submission.is_in_flight());
        assert_eq!(service.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_resubmission_refused_while_in_flight() {
        let service = GatedService::new(true);
        let submission = Arc::new(Submission::new(service.clone()));

        let first = {
            let submission = submission.clone();
            tokio::spawn(async move { submission.submit(&request("go")).await })
        };

        while !submission.is_in_flight() {
            tokio::task::yield_now().await;
        }

        let err = submission.submit(&request("rust")).await.unwrap_err();
        assert!(err.is_validation());

        service.release.notify_one();
        let response = first.await.unwrap().unwrap();
        assert_eq!(response.job_skills, vec!["go"]);
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert!(!submission.is_in_flight());
    }

    #[tokio::test]
    async fn test_cancelled_submission_resets_to_idle() {
        let service = GatedService::new(true);
        let submission = Submission::new(service.clone());

        let cancelled = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            submission.submit(&request("go")),
        )
        .await;
        assert!(cancelled.is_err());
        assert_eq!(submission.state(), SubmissionState::Idle);

        // Let the next call through the gate.
        service.release.notify_one();
        let response = submission.submit(&request("rust")).await.unwrap();
        assert_eq!(response.job_skills, vec!["rust"]);
        assert!(matches!(submission.state(), SubmissionState::Ranked(_)));
        assert_eq!(service.calls.load(Ordering::SeqCst), 2);
    }
}
