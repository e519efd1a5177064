//! Worker pool for crawl units
//!
//! Each crawl gets its own multi-threaded tokio runtime. Its scheduler is
//! work-stealing: a unit parked at a fan-in join frees its worker thread,
//! and idle workers pull ready units from busy workers' queues.

use crate::CrawlError;
use futures::future::{join_all, BoxFuture};
use std::future::Future;
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;

/// A fixed-size pool of worker threads
pub struct WorkerPool {
    runtime: Runtime,
    size: usize,
}

impl WorkerPool {
    /// Creates a pool with `min(requested, available parallelism)` workers
    ///
    /// # Returns
    ///
    /// * `Ok(WorkerPool)` - The pool is running
    /// * `Err(CrawlError::Pool)` - The runtime could not be started
    pub fn new(requested: usize) -> Result<Self, CrawlError> {
        let size = pool_size(requested);

        let runtime = Builder::new_multi_thread()
            .worker_threads(size)
            .thread_name("ripple-worker")
            .enable_all()
            .build()
            .map_err(|e| CrawlError::Pool(e.to_string()))?;

        tracing::debug!("Started worker pool with {} threads", size);

        Ok(Self { runtime, size })
    }

    /// Number of worker threads
    pub fn size(&self) -> usize {
        self.size
    }

    /// Submits a unit of work to the pool
    pub fn submit<F>(&self, unit: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.runtime.spawn(unit)
    }

    /// Blocks the calling thread until every submitted handle has finished
    ///
    /// Must not be called from inside an async context.
    pub fn drain(&self, handles: Vec<JoinHandle<()>>) {
        self.runtime.block_on(await_all(handles));
    }

    /// Tears the pool down
    pub fn shutdown(self) {
        tracing::debug!("Shutting down worker pool");
        self.runtime.shutdown_background();
    }
}

/// Resolves the worker count for a requested parallelism
pub fn pool_size(requested: usize) -> usize {
    let available = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    requested.min(available).max(1)
}

/// Spawns every unit onto the current pool and waits for all of them
///
/// A unit that panics is logged and otherwise ignored, so one bad branch
/// never takes down its siblings or the unit waiting on them.
pub async fn join_units(units: Vec<BoxFuture<'static, ()>>) {
    let handles = units.into_iter().map(tokio::spawn).collect();
    await_all(handles).await;
}

async fn await_all(handles: Vec<JoinHandle<()>>) {
    for result in join_all(handles).await {
        if let Err(e) = result {
            tracing::warn!("Crawl unit did not complete: {}", e);
        }
    }
}
