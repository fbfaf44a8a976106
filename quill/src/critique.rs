//! Critique request lifecycle.
//!
//! The blocking service call runs on a worker thread; results come back
//! over a channel tagged with a generation number. Editing the essay or
//! firing a new request bumps the generation, so a slow response for an
//! old version of the text can never be shown against the new one.

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Instant;

use quillcritic::{AnalysisResponse, CritiqueError, CritiqueService, EssayInputs};

pub enum AnalysisState {
    Idle,
    Requesting { started: Instant },
    Success(Box<AnalysisResponse>),
    Failed(String),
}

impl AnalysisState {
    pub fn is_requesting(&self) -> bool {
        matches!(self, AnalysisState::Requesting { .. })
    }
}

type TaggedResult = (u64, Result<AnalysisResponse, CritiqueError>);

pub struct CritiqueRunner {
    pub state: AnalysisState,
    service: Arc<CritiqueService>,
    generation: u64,
    tx: Sender<TaggedResult>,
    rx: Receiver<TaggedResult>,
}

impl CritiqueRunner {
    pub fn new(service: CritiqueService) -> Self {
        let (tx, rx) = channel();
        CritiqueRunner {
            state: AnalysisState::Idle,
            service: Arc::new(service),
            generation: 0,
            tx,
            rx,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.service.is_offline()
    }

    /// Fire a request on a worker thread. An in-flight request is not
    /// cancelled, its result just arrives with a stale generation.
    pub fn request(&mut self, inputs: EssayInputs) {
        if inputs.essay_text.trim().is_empty() {
            self.state = AnalysisState::Failed(CritiqueError::EmptyEssay.to_string());
            return;
        }

        self.generation += 1;
        let generation = self.generation;
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        self.state = AnalysisState::Requesting {
            started: Instant::now(),
        };

        std::thread::spawn(move || {
            let result = service.critique(&inputs);
            // Receiver dropped means the app is shutting down.
            let _ = tx.send((generation, result));
        });
    }

    /// The essay changed; any displayed or in-flight result no longer
    /// describes the text.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.state = AnalysisState::Idle;
    }

    /// Drain the channel. Returns true when the visible state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.rx.try_recv() {
                Ok((generation, result)) => {
                    changed |= self.apply_result(generation, result);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }

    fn apply_result(
        &mut self,
        generation: u64,
        result: Result<AnalysisResponse, CritiqueError>,
    ) -> bool {
        if generation != self.generation {
            log::debug!("discarding stale critique result (gen {generation})");
            return false;
        }
        self.state = match result {
            Ok(resp) => AnalysisState::Success(Box::new(resp)),
            Err(err) => AnalysisState::Failed(err.to_string()),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quillcritic::sample::sample_response;

    fn runner() -> CritiqueRunner {
        CritiqueRunner::new(CritiqueService::new(None))
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut r = runner();
        r.generation = 3;
        assert!(!r.apply_result(2, Ok(sample_response())));
        assert!(matches!(r.state, AnalysisState::Idle));
    }

    #[test]
    fn test_current_result_is_applied() {
        let mut r = runner();
        r.generation = 3;
        assert!(r.apply_result(3, Ok(sample_response())));
        assert!(matches!(r.state, AnalysisState::Success(_)));
    }

    #[test]
    fn test_failure_becomes_failed_state() {
        let mut r = runner();
        assert!(r.apply_result(0, Err(CritiqueError::service("boom"))));
        match &r.state {
            AnalysisState::Failed(msg) => assert!(msg.contains("boom")),
            _ => panic!("expected failed state"),
        }
    }

    #[test]
    fn test_invalidate_clears_result_and_stales_inflight() {
        let mut r = runner();
        r.apply_result(0, Ok(sample_response()));
        assert!(matches!(r.state, AnalysisState::Success(_)));

        r.invalidate();
        assert!(matches!(r.state, AnalysisState::Idle));
        // A result for the pre-edit generation is ignored afterwards.
        assert!(!r.apply_result(0, Ok(sample_response())));
        assert!(matches!(r.state, AnalysisState::Idle));
    }

    #[test]
    fn test_empty_essay_fails_without_spawning() {
        let mut r = runner();
        r.request(EssayInputs {
            essay_text: "  ".to_string(),
            ..Default::default()
        });
        match &r.state {
            AnalysisState::Failed(msg) => assert!(msg.contains("cannot be empty")),
            _ => panic!("expected failed state"),
        }
    }

    #[test]
    fn test_roundtrip_through_worker_thread() {
        let mut r = runner();
        // Offline service sleeps 1.5s; acceptable for one integration-ish
        // test of the channel plumbing.
        r.request(EssayInputs {
            essay_text: "An essay about rivers.".to_string(),
            ..Default::default()
        });
        assert!(r.state.is_requesting());

        let deadline = Instant::now() + std::time::Duration::from_secs(10);
        loop {
            if r.poll() {
                break;
            }
            if Instant::now() > deadline {
                panic!("no critique result arrived");
            }
            std::thread::sleep(std::time::Duration::from_millis(25));
        }
        assert!(matches!(r.state, AnalysisState::Success(_)));
    }
}
