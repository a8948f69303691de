pub mod mock;

/// Where the counterparty's words come from. Today a canned line;
/// the seam exists so a real backend can slot in later.
pub trait Responder: Send + Sync {
    fn reply(&self, prompt: &str) -> String;
}

/// Always says the same thing.
#[derive(Debug, Clone)]
pub struct CannedResponder {
    content: String,
}

impl CannedResponder {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self::new(crate::consts::DEFAULT_REPLY_CONTENT)
    }
}

impl Responder for CannedResponder {
    fn reply(&self, _prompt: &str) -> String {
        self.content.clone()
    }
}
