//! Observable state store.
//!
//! `StateStore<T>` holds the latest published value.
//! Renderers subscribe with a [`StateWatcher`] and `await` the next value
//! instead of polling.

use tokio::sync::watch;

/// The single sink every new state is published to.
pub struct StateStore<T> {
    tx: watch::Sender<T>,
}

/// Receives every value published to a [`StateStore`].
///
/// Intermediate values may be skipped if the watcher falls behind; the most
/// recent one is always delivered.
pub struct StateWatcher<T> {
    rx: watch::Receiver<T>,
}

// -- StateStore ---------------------------------------------------------

impl<T: Clone> StateStore<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Replace the current value and wake all watchers.
    pub fn publish(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub fn subscribe(&self) -> StateWatcher<T> {
        StateWatcher {
            rx: self.tx.subscribe(),
        }
    }
}

// -- StateWatcher -------------------------------------------------------

impl<T: Clone> StateWatcher<T> {
    /// Wait for the next published value.
    ///
    /// Returns `Err` once every [`StateStore`] handle has been dropped.
    pub async fn changed(&mut self) -> Result<T, watch::error::RecvError> {
        self.rx.changed().await?;
        Ok(self.rx.borrow_and_update().clone())
    }

    /// The latest value, without waiting.
    pub fn current(&self) -> T {
        self.rx.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_watcher_sees_latest_value() {
        let store = StateStore::new(1u32);
        let mut watcher = store.subscribe();
        assert_eq!(watcher.current(), 1);

        store.publish(2);
        assert_eq!(watcher.changed().await.unwrap(), 2);

        store.publish(3);
        store.publish(4);
        assert_eq!(watcher.changed().await.unwrap(), 4);
        assert_eq!(watcher.current(), 4);
    }

    #[tokio::test]
    async fn test_watcher_ends_with_store() {
        let store = StateStore::new("a".to_owned());
        let mut watcher = store.subscribe();
        store.publish("b".to_owned());
        assert_eq!(watcher.changed().await.unwrap(), "b");
        drop(store);
        assert!(watcher.changed().await.is_err());
    }
}
