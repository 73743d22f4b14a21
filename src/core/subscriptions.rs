use crate::domain::ports::EventStream;
use crate::utils::error::{PresenterError, Result};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Owned set of live stream subscriptions for one attach cycle.
///
/// Each subscription runs on its own task and invokes its handler once per
/// event, in stream order. Handlers run while holding a read guard on the
/// gate; [`Subscriptions::dispose`] takes the write guard, so it waits for a
/// handler already in progress and no handler starts after it returns.
pub struct Subscriptions {
    gate: Arc<RwLock<bool>>,
    handles: Vec<(&'static str, JoinHandle<()>)>,
    runtime: Handle,
}

impl Subscriptions {
    pub fn open() -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| PresenterError::NoRuntime)?;
        Ok(Self {
            gate: Arc::new(RwLock::new(true)),
            handles: Vec::new(),
            runtime,
        })
    }

    pub fn subscribe<T, F>(&mut self, name: &'static str, mut stream: EventStream<T>, mut handler: F)
    where
        T: Send + 'static,
        F: FnMut(T) + Send + 'static,
    {
        let gate = Arc::clone(&self.gate);
        let handle = self.runtime.spawn(async move {
            while let Some(event) = stream.recv().await {
                let open = gate.read().await;
                if !*open {
                    break;
                }
                handler(event);
            }
            tracing::debug!("Subscription '{}' finished", name);
        });
        self.handles.push((name, handle));
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// False while a dispose holds the gate.
    pub fn is_open(&self) -> bool {
        self.gate.try_read().map(|open| *open).unwrap_or(false)
    }

    /// Close the gate and cancel every subscription task.
    pub async fn dispose(&mut self) {
        *self.gate.write().await = false;
        for (name, handle) in self.handles.drain(..) {
            tracing::debug!("Disposing subscription '{}'", name);
            handle.abort();
        }
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        // 無法在 Drop 中 await；拿不到寫鎖時，abort 仍會在下一個 await 點生效
        if let Ok(mut open) = self.gate.try_write() {
            *open = false;
        }
        for (_, handle) in self.handles.drain(..) {
            handle.abort();
        }
    }
}
