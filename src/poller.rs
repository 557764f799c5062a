use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};
use tokio::select;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::api::device::FoodStatus;
use crate::client::FeederClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    /// No fetch has finished yet.
    Pending,
    Ready(FoodStatus),
    Failed(String),
}

/// Keeps the food status fresh in the background. The poller owns its task:
/// [`StatusPoller::stop`] ends it gracefully and dropping the poller aborts it.
pub struct StatusPoller {
    handle: Option<JoinHandle<()>>,
    stop_tx: Option<oneshot::Sender<()>>,
    state_rx: watch::Receiver<PollState>,
}

impl StatusPoller {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

    /// Starts polling. The first fetch happens right away, then once per
    /// `intv`.
    pub fn start(client: Arc<FeederClient>, intv: Duration) -> Self {
        let (state_tx, state_rx) = watch::channel(PollState::Pending);
        let (stop_tx, stop_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            Self::main_loop(client, intv, state_tx, stop_rx).await;
        });

        Self {
            handle: Some(handle),
            stop_tx: Some(stop_tx),
            state_rx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state_rx.clone()
    }

    pub fn latest(&self) -> PollState {
        self.state_rx.borrow().clone()
    }

    /// Stops polling and waits for the task to finish. A fetch in flight is
    /// allowed to complete first.
    pub async fn stop(mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                error!("Status poller task failed: {e}");
            }
        }
    }

    async fn main_loop(
        client: Arc<FeederClient>,
        intv: Duration,
        state_tx: watch::Sender<PollState>,
        mut stop_rx: oneshot::Receiver<()>,
    ) {
        let mut intv_tk = interval_at(Instant::now(), intv);
        intv_tk.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!("Status poller starting, interval: {}s", intv.as_secs_f64());
        loop {
            select! {
                _ = &mut stop_rx => {
                    info!("Status poller stopped");
                    return;
                }
                _ = intv_tk.tick() => {
                    let state = match client.get_food_status().await {
                        Ok(status) => {
                            debug!("Food status refreshed: {status:?}");
                            PollState::Ready(status)
                        }
                        Err(e) => {
                            error!("Refresh food status failed: {e:#}");
                            PollState::Failed(e.to_string())
                        }
                    };
                    if state_tx.send(state).is_err() {
                        return;
                    }
                }
            }
        }
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::client::device::{MockDevice, RemoteDevice, UnionDevice};
    use crate::client::fetch::{AuthFetch, Transport};
    use crate::session::SessionStore;
    use crate::storage::{MemoryStorage, UnionStorage};

    use super::*;

    fn build_fetch() -> AuthFetch {
        let storage = Arc::new(UnionStorage::Memory(MemoryStorage::new()));
        let transport = Transport::new("http://127.0.0.1:9").unwrap();
        AuthFetch::new(transport, SessionStore::new(storage))
    }

    #[tokio::test]
    async fn test_poll_mock() {
        let client = Arc::new(FeederClient::new(
            build_fetch(),
            UnionDevice::Mock(MockDevice),
        ));
        let poller = StatusPoller::start(client, Duration::from_millis(20));
        let mut rx = poller.subscribe();

        // Two refreshes prove the loop keeps ticking
        for _ in 0..2 {
            rx.changed().await.unwrap();
            match rx.borrow_and_update().clone() {
                PollState::Ready(status) => assert_eq!(status.level.percent(), 90),
                state => panic!("unexpected state {state:?}"),
            }
        }

        poller.stop().await;
        // The sender is gone with the task, drain whatever was sent before
        while rx.changed().await.is_ok() {}
    }

    #[tokio::test]
    async fn test_poll_failure_keeps_running() {
        let fetch = build_fetch();
        let client = Arc::new(FeederClient::new(
            fetch.clone(),
            UnionDevice::Remote(RemoteDevice::new(fetch)),
        ));
        let poller = StatusPoller::start(client, Duration::from_millis(20));
        let mut rx = poller.subscribe();

        for _ in 0..2 {
            rx.changed().await.unwrap();
            let state = rx.borrow_and_update().clone();
            assert!(matches!(state, PollState::Failed(_)), "{state:?}");
        }
        assert!(matches!(poller.latest(), PollState::Failed(_)));

        drop(poller);
        while rx.changed().await.is_ok() {}
    }
}
