use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

/// Per-project async locks guarding the extraction directory.
#[derive(Debug, Clone, Default)]
pub(crate) struct ProjectLocks {
    inner: Arc<Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>>,
}

impl ProjectLocks {
    /// Wait for exclusive access to `id`'s extraction directory.
    pub(crate) async fn lock(&self, id: Uuid) -> OwnedMutexGuard<()> {
        let slot = {
            let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            // Entries only referenced by the map are idle.
            map.retain(|_, slot| Arc::strong_count(slot) > 1);
            Arc::clone(map.entry(id).or_default())
        };
        slot.lock_owned().await
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
