//! Caller-owned debounce around the classifier.
//!
//! The classifier is pure and synchronous; flagging every keystroke would be
//! correct but noisy. A UI host instead submits each text change here, and a
//! classification fires only after the input has been quiet for the
//! configured delay. New input supersedes any pending classification, which
//! is safe to discard because classification has no side effects. At most
//! one classification is live per debouncer.
//!
//! Server-side callers that validate synchronously do not need this module;
//! it is gated behind the `debounce` feature.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::category::Classification;
use crate::rules::FidelityClassifier;

/// Default quiescence delay before a submitted text is classified.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Debounces classification of a live text field.
///
/// Must be used within a tokio runtime; pending work is aborted on drop.
pub struct Debouncer {
    classifier: Arc<FidelityClassifier>,
    delay: Duration,
    tx: mpsc::UnboundedSender<Classification>,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Creates a debouncer and the receiver its results are delivered on.
    pub fn new(
        classifier: FidelityClassifier,
        delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<Classification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                classifier: Arc::new(classifier),
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Creates a debouncer with the default delay.
    pub fn with_default_delay(
        classifier: FidelityClassifier,
    ) -> (Self, mpsc::UnboundedReceiver<Classification>) {
        Self::new(classifier, DEFAULT_DEBOUNCE)
    }

    /// Returns the configured quiescence delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Submits the current field contents, superseding any pending
    /// classification. The result arrives on the receiver after the delay,
    /// unless another submit or cancel lands first.
    pub fn submit(&mut self, text: impl Into<String>) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
            debug!("Superseded pending classification");
        }

        let text = text.into();
        let classifier = Arc::clone(&self.classifier);
        let tx = self.tx.clone();
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver may be gone if the field was closed mid-delay.
            let _ = tx.send(classifier.classify(&text));
        }));
    }

    /// Drops any pending classification without producing a result.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    fn debouncer() -> (Debouncer, mpsc::UnboundedReceiver<Classification>) {
        Debouncer::new(FidelityClassifier::with_defaults(), DEFAULT_DEBOUNCE)
    }

    #[tokio::test(start_paused = true)]
    async fn classifies_after_quiescence() {
        let (mut debouncer, mut rx) = debouncer();

        debouncer.submit("I noticed the thought and postponed it for 20 minutes");

        let result = rx.recv().await.unwrap();
        assert!(matches!(result, Classification::ProcessAffirmation { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn new_input_supersedes_pending() {
        let (mut debouncer, mut rx) = debouncer();

        debouncer.submit("what if this all goes wrong");
        debouncer.submit("I noticed the thought and postponed it for 20 minutes");

        // Only the later text is classified.
        let result = rx.recv().await.unwrap();
        assert!(matches!(result, Classification::ProcessAffirmation { .. }));

        // And nothing else arrives.
        let extra = timeout(DEFAULT_DEBOUNCE * 4, rx.recv()).await;
        assert!(extra.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_pending() {
        let (mut debouncer, mut rx) = debouncer();

        debouncer.submit("what if this all goes wrong");
        debouncer.cancel();

        let result = timeout(DEFAULT_DEBOUNCE * 4, rx.recv()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn submit_after_cancel_still_fires() {
        let (mut debouncer, mut rx) = debouncer();

        debouncer.submit("what if this all goes wrong");
        debouncer.cancel();
        debouncer.submit("Is this normal for me to feel?");

        let result = rx.recv().await.unwrap();
        assert!(matches!(result, Classification::ReassuranceFlag { .. }));
    }
}
