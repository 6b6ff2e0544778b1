//! Timer-based input coalescing

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

type Sink<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Emits only the latest pushed value, once input has been quiet for
/// `interval`.
///
/// Each `push` cancels the pending emission and schedules a new one on the
/// current tokio runtime. Outside a runtime the value is only held until
/// `flush` or the next `push`.
pub struct Debouncer<T> {
    interval: Duration,
    sink: Sink<T>,
    pending: Arc<Mutex<Option<T>>>,
    task: Option<JoinHandle<()>>,
}

impl<T> std::fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("interval", &self.interval)
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(interval: Duration, sink: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            interval,
            sink: Arc::new(sink),
            pending: Arc::new(Mutex::new(None)),
            task: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Record `value` and restart the quiet period
    pub fn push(&mut self, value: T) {
        self.abort_task();
        *self.pending.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);

        let Ok(handle) = Handle::try_current() else {
            return;
        };

        let pending = Arc::clone(&self.pending);
        let sink = Arc::clone(&self.sink);
        let interval = self.interval;

        self.task = Some(handle.spawn(async move {
            tokio::time::sleep(interval).await;
            let value = pending.lock().unwrap_or_else(PoisonError::into_inner).take();
            if let Some(value) = value {
                sink(value);
            }
        }));
    }

    /// Emit the pending value now, if there is one
    pub fn flush(&mut self) {
        self.abort_task();
        if let Some(value) = self.take_pending() {
            (self.sink)(value);
        }
    }

    /// Drop the pending value without emitting it
    pub fn cancel(&mut self) {
        self.abort_task();
        self.take_pending();
    }
}

impl<T> Debouncer<T> {
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn take_pending(&self) -> Option<T> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.abort_task();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(String) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |value: String| sink.lock().unwrap().push(value))
    }

    #[tokio::test(start_paused = true)]
    async fn test_emits_after_quiet_period() {
        let (seen, sink) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(300), sink);

        debouncer.push("a".to_string());
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(seen.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(*seen.lock().unwrap(), vec!["a".to_string()]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_pushes_coalesce_to_latest() {
        let (seen, sink) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(300), sink);

        for text in ["i", "iv", "iva", "ivan"] {
            debouncer.push(text.to_string());
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(seen.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(*seen.lock().unwrap(), vec!["ivan".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_emits_immediately() {
        let (seen, sink) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(300), sink);

        debouncer.push("now".to_string());
        debouncer.flush();
        assert_eq!(*seen.lock().unwrap(), vec!["now".to_string()]);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending() {
        let (seen, sink) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(300), sink);

        debouncer.push("never".to_string());
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_without_pending_is_noop() {
        let (seen, sink) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(300), sink);

        debouncer.flush();
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(debouncer.interval(), Duration::from_millis(300));
    }

    #[test]
    fn test_push_outside_runtime_holds_value_for_flush() {
        let (seen, sink) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(300), sink);

        debouncer.push("a".to_string());
        debouncer.push("ab".to_string());
        assert!(debouncer.is_pending());
        assert!(seen.lock().unwrap().is_empty());

        debouncer.flush();
        assert_eq!(*seen.lock().unwrap(), vec!["ab".to_string()]);
        assert!(!debouncer.is_pending());
    }
}
