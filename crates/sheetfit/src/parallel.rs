//! Per-sheet worker pool
//!
//! Sheets are measured on a crate-local rayon pool rather than the global
//! one, so a pool that cannot be built degrades to serial execution instead
//! of panicking.

use std::sync::OnceLock;

use rayon::prelude::*;
use rayon::ThreadPool;

use crate::options::Parallelism;

static SHARED_POOL: OnceLock<Option<ThreadPool>> = OnceLock::new();

fn desired_threads() -> usize {
    std::env::var("RAYON_NUM_THREADS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
}

fn build_pool(threads: usize) -> Option<ThreadPool> {
    let try_build = |n| rayon::ThreadPoolBuilder::new().num_threads(n).build();
    match try_build(threads.max(1)) {
        Ok(pool) => Some(pool),
        Err(_) if threads > 1 => try_build(1).ok(),
        Err(_) => None,
    }
}

fn shared_pool() -> Option<&'static ThreadPool> {
    SHARED_POOL
        .get_or_init(|| build_pool(desired_threads()))
        .as_ref()
}

/// Run `f` over `items`, in parallel when allowed, keeping input order
///
/// `concurrent` is the document's answer to whether it tolerates calls from
/// several threads; without it the work runs on the calling thread.
pub(crate) fn map_ordered<T, R, F>(
    items: &[T],
    parallelism: Parallelism,
    concurrent: bool,
    f: F,
) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    let serial = |f: &F| items.iter().map(f).collect::<Vec<_>>();

    if !concurrent || items.len() < 2 {
        return serial(&f);
    }

    match parallelism {
        Parallelism::Serial => serial(&f),
        Parallelism::Auto => match shared_pool() {
            Some(pool) => pool.install(|| items.par_iter().map(&f).collect()),
            None => {
                tracing::warn!("failed to initialize thread pool; measuring sheets serially");
                serial(&f)
            }
        },
        Parallelism::Threads(n) => match build_pool(n) {
            Some(pool) => pool.install(|| items.par_iter().map(&f).collect()),
            None => {
                tracing::warn!(
                    workers = n,
                    "failed to initialize thread pool; measuring sheets serially"
                );
                serial(&f)
            }
        },
    }
}
