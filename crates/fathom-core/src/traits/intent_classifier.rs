use crate::intent::Intent;

/// Strategy for mapping a query to an intent. Never fails.
pub trait IIntentClassifier: Send + Sync {
    fn classify(&self, query: &str) -> Intent;
}
