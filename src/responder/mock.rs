use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::Responder;

/// A scripted responder for tests. Returns pre-defined replies in order,
/// repeating the last one once the script runs out. Records every prompt.
pub struct ScriptedResponder {
    replies: Vec<String>,
    index: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedResponder {
    pub fn new<S: Into<String>>(replies: impl IntoIterator<Item = S>) -> Self {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            index: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts seen so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        crate::engine::lock(&self.prompts).clone()
    }
}

impl Responder for ScriptedResponder {
    fn reply(&self, prompt: &str) -> String {
        crate::engine::lock(&self.prompts).push(prompt.to_string());
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        self.replies
            .get(i)
            .or_else(|| self.replies.last())
            .cloned()
            .unwrap_or_default()
    }
}
