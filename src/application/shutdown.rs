// Cooperative shutdown over a watch channel
use tokio::sync::watch;

#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

pub fn channel() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, Shutdown { rx })
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl Shutdown {
    pub fn is_requested(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once shutdown has been requested. Never resolves if the
    /// trigger is dropped without firing.
    pub async fn requested(&mut self) {
        let closed = self.rx.wait_for(|requested| *requested).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_wakes_waiter() {
        let (trigger, mut shutdown) = channel();
        assert!(!shutdown.is_requested());

        let waiter = tokio::spawn(async move {
            shutdown.requested().await;
            shutdown.is_requested()
        });
        trigger.trigger();

        assert!(waiter.await.unwrap());
    }

    #[tokio::test]
    async fn test_already_requested_resolves_immediately() {
        let (trigger, mut shutdown) = channel();
        trigger.trigger();
        shutdown.requested().await;
        assert!(shutdown.is_requested());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_trigger_never_resolves() {
        let (trigger, mut shutdown) = channel();
        drop(trigger);

        let result = tokio::time::timeout(Duration::from_secs(60), shutdown.requested()).await;
        assert!(result.is_err());
    }
}
