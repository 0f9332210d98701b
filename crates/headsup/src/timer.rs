use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// One-shot auto-dismiss task on the current `LocalSet`.
///
/// Dropping the timer detaches it; only [`cancel`](Self::cancel) stops it.
pub(crate) struct DismissTimer {
    id: u64,
    handle: JoinHandle<()>,
}

impl DismissTimer {
    pub fn spawn(id: u64, after: Duration, fire: impl Future<Output = ()> + 'static) -> Self {
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep(after).await;
            fire.await;
        });
        Self { id, handle }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(self) {
        self.handle.abort();
    }
}
