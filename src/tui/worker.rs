//! Background scoring worker.
//!
//! Scoring runs on its own thread so the TUI main loop keeps drawing while
//! the model works. Progress and the outcome come back over an mpsc channel.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::application::PendingSubmission;
use crate::ports::{RiskScorer, ScoringError};

/// Progress updates from the scoring worker.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringProgress {
    /// Preprocessing transform and model are running
    Scoring,
    /// Finished; hand `outcome` back to the controller with `ticket`
    Complete {
        ticket: u64,
        outcome: Result<f64, ScoringError>,
    },
}

/// Handle to a running scoring worker.
pub struct ScoringWorkerHandle {
    pub progress_rx: Receiver<ScoringProgress>,
    _handle: JoinHandle<()>,
}

impl ScoringWorkerHandle {
    /// Try to receive the next progress update (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<ScoringProgress> {
        self.progress_rx.try_recv().ok()
    }
}

pub struct ScoringWorker;

impl ScoringWorker {
    /// Spawn a background scoring task for `submission`.
    pub fn spawn(scorer: Arc<dyn RiskScorer>, submission: PendingSubmission) -> ScoringWorkerHandle {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::run_with_progress(scorer.as_ref(), submission, &tx);
        });

        ScoringWorkerHandle {
            progress_rx: rx,
            _handle: handle,
        }
    }

    fn run_with_progress(
        scorer: &dyn RiskScorer,
        submission: PendingSubmission,
        tx: &Sender<ScoringProgress>,
    ) {
        let _ = tx.send(ScoringProgress::Scoring);

        // Let the UI show the progress screen at least briefly.
        thread::sleep(Duration::from_millis(150));

        let outcome = scorer.score(&submission.record);
        if let Err(e) = &outcome {
            tracing::debug!(ticket = submission.ticket, "Worker scoring error: {}", e);
        }

        // The receiver is gone if the session was restarted meanwhile.
        let _ = tx.send(ScoringProgress::Complete {
            ticket: submission.ticket,
            outcome,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{derive_features, FeatureRecord, WizardState};

    struct Constant(f64);

    impl RiskScorer for Constant {
        fn score(&self, _record: &FeatureRecord) -> Result<f64, ScoringError> {
            Ok(self.0)
        }

        fn is_ready(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_worker_reports_outcome_with_ticket() {
        let submission = PendingSubmission {
            ticket: 7,
            record: derive_features(&WizardState::new()).expect("derivable"),
        };
        let handle = ScoringWorker::spawn(Arc::new(Constant(0.42)), submission);

        let first = handle
            .progress_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("progress");
        assert_eq!(first, ScoringProgress::Scoring);

        let done = handle
            .progress_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("outcome");
        assert_eq!(
            done,
            ScoringProgress::Complete {
                ticket: 7,
                outcome: Ok(0.42)
            }
        );
    }
}
