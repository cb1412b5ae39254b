use std::future::Future;
use std::io;

use tokio::runtime::{Builder, Handle, Runtime};

/// The single sync→async boundary for legacy synchronous call sites.
///
/// Holds a dedicated bounded runtime. Outside any runtime the future is run
/// directly; inside one it is offloaded to the dedicated runtime and the
/// calling thread parks on the join handle, so a legacy caller nested inside
/// async dispatch never deadlocks the ambient event loop.
pub struct SyncBridge {
    runtime: Runtime,
}

impl SyncBridge {
    pub fn new(worker_threads: usize) -> io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(worker_threads.max(1))
            .thread_name("colloquy-sync-bridge")
            .enable_all()
            .build()?;
        Ok(Self { runtime })
    }

    /// Run `future` to completion from synchronous code.
    pub fn run<F>(&self, future: F) -> F::Output
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        match Handle::try_current() {
            Err(_) => self.runtime.block_on(future),
            Ok(_) => {
                let handle = self.runtime.spawn(future);
                futures::executor::block_on(handle).expect("sync bridge task panicked")
            }
        }
    }
}
