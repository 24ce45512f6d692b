/*!
 * Mock alignment source for testing.
 *
 * - `MockAligner::fixed(words)` - Always returns the given timestamps
 * - `MockAligner::failing()` - Always fails with an error
 * - `MockAligner::empty()` - Succeeds with no timestamps
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{AlignmentRequest, AlignmentSource};
use crate::alignment::WordTimestamp;
use crate::errors::AlignerError;

/// Behavior mode for the mock aligner
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with these timestamps
    Fixed(Vec<WordTimestamp>),
    /// Always fails with an error
    Failing,
    /// Returns no timestamps
    Empty,
    /// Succeeds after a delay
    Slow { delay_ms: u64, words: Vec<WordTimestamp> },
}

/// Mock aligner recording the requests it receives
#[derive(Debug, Clone)]
pub struct MockAligner {
    behavior: MockBehavior,
    /// Shared between clones
    request_count: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<AlignmentRequest>>>,
}

impl MockAligner {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    pub fn fixed(words: Vec<WordTimestamp>) -> Self {
        Self::new(MockBehavior::Fixed(words))
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Number of `align` calls so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Most recent request, if any
    pub fn last_request(&self) -> Option<AlignmentRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }
}

#[async_trait]
impl AlignmentSource for MockAligner {
    async fn align(&self, request: &AlignmentRequest) -> Result<Vec<WordTimestamp>, AlignerError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        match &self.behavior {
            MockBehavior::Fixed(words) => Ok(words.clone()),
            MockBehavior::Failing => Err(AlignerError::ApiError {
                status_code: 500,
                message: "Simulated aligner failure".to_string(),
            }),
            MockBehavior::Empty => Ok(Vec::new()),
            MockBehavior::Slow { delay_ms, words } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                Ok(words.clone())
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
