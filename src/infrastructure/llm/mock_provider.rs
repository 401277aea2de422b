use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{
    Completion, CompletionRequest, CompletionUsage, ModelProvider, ModelProviderError,
};

/// Scriptable provider for tests and scaffold wiring: replies with a
/// queue of canned responses and records how often it was called.
pub struct MockModelProvider {
    responses: Mutex<VecDeque<Result<Completion, ModelProviderError>>>,
    calls: AtomicUsize,
}

impl MockModelProvider {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_responses<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::new();
        {
            let mut queue = provider.responses.lock().unwrap();
            for text in texts {
                queue.push_back(Ok(Completion {
                    text: text.into(),
                    usage: CompletionUsage::default(),
                }));
            }
        }
        provider
    }

    pub fn push_error(&self, error: ModelProviderError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn push_completion(&self, completion: Completion) {
        self.responses.lock().unwrap().push_back(Ok(completion));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockModelProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelProvider for MockModelProvider {
    async fn complete(&self, _request: &CompletionRequest) -> Result<Completion, ModelProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(Completion {
                    text: "{}".to_string(),
                    usage: CompletionUsage::default(),
                })
            })
    }
}
