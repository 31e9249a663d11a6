//! Debounced persistence.
//!
//! One pending job per key. Scheduling again inside the quiet window replaces
//! the pending job and restarts the window, so a burst of edits produces a
//! single write carrying the last record.
//!
//! Each scheduled job gets a generation number. A timer only takes its job
//! out of the map if the entry still carries its generation; a timer that
//! lost the race to a reschedule (or to a flush) finds nothing and exits.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// A deferred write.
pub type PersistJob = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

struct Pending {
    generation: u64,
    timer: JoinHandle<()>,
    job: PersistJob,
}

pub struct PersistScheduler<K> {
    pending: Arc<Mutex<HashMap<K, Pending>>>,
    next_generation: AtomicU64,
}

impl<K> Default for PersistScheduler<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> PersistScheduler<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Run `job` once `delay` passes with no further schedule for `key`.
    ///
    /// Replaces any job already pending for `key`; the replaced job never runs.
    pub async fn schedule<F, Fut>(&self, key: K, delay: Duration, job: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let job: PersistJob = Box::new(move || -> BoxFuture<'static, ()> { Box::pin(job()) });
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);

        let mut pending = self.pending.lock().await;

        let map = Arc::clone(&self.pending);
        let timer_key = key.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let job = {
                let mut map = map.lock().await;
                match map.get(&timer_key) {
                    Some(entry) if entry.generation == generation => {
                        map.remove(&timer_key).map(|entry| entry.job)
                    }
                    _ => None,
                }
            };
            if let Some(job) = job {
                tracing::debug!(key = ?timer_key, generation, "Quiet window elapsed, persisting");
                job().await;
            }
        });

        if let Some(replaced) = pending.insert(key, Pending { generation, timer, job }) {
            replaced.timer.abort();
        }
    }

    /// Run the pending job for `key` now. Returns whether there was one.
    pub async fn flush(&self, key: &K) -> bool {
        let entry = self.pending.lock().await.remove(key);
        match entry {
            Some(entry) => {
                entry.timer.abort();
                (entry.job)().await;
                true
            }
            None => false,
        }
    }

    /// Run every pending job now, one after another. Returns how many ran.
    pub async fn flush_all(&self) -> usize {
        let drained: Vec<(K, Pending)> = self.pending.lock().await.drain().collect();
        let count = drained.len();
        for (key, entry) in drained {
            entry.timer.abort();
            tracing::debug!(key = ?key, "Flushing pending persist");
            (entry.job)().await;
        }
        count
    }

    /// Drop the pending job for `key` without running it.
    pub async fn cancel(&self, key: &K) -> bool {
        match self.pending.lock().await.remove(key) {
            Some(entry) => {
                entry.timer.abort();
                true
            }
            None => false,
        }
    }

    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }

    pub async fn is_pending(&self, key: &K) -> bool {
        self.pending.lock().await.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;
    use tokio::time::Instant;

    type Log = Arc<StdMutex<Vec<(Duration, &'static str)>>>;

    fn recorder(
        log: &Log,
        start: Instant,
        label: &'static str,
    ) -> impl FnOnce() -> futures_util::future::Ready<()> + Send + 'static {
        let log = Arc::clone(log);
        move || {
            log.lock().unwrap().push((start.elapsed(), label));
            futures_util::future::ready(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn edits_inside_the_window_coalesce_into_the_last() {
        let scheduler = PersistScheduler::new();
        let log: Log = Arc::default();
        let start = Instant::now();
        let window = Duration::from_millis(1000);

        scheduler.schedule("sheet", window, recorder(&log, start, "E1")).await;
        tokio::time::sleep(Duration::from_millis(200)).await;
        scheduler.schedule("sheet", window, recorder(&log, start, "E2")).await;

        // t = 1100: E1's window has passed but E1 was superseded
        tokio::time::sleep(Duration::from_millis(900)).await;
        assert!(log.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(scheduler.pending_count().await, 0);
        let log = log.lock().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].1, "E2");
        assert!(log[0].0 >= Duration::from_millis(1200));
    }

    #[tokio::test(start_paused = true)]
    async fn keys_are_independent() {
        let scheduler = PersistScheduler::new();
        let log: Log = Arc::default();
        let start = Instant::now();

        scheduler.schedule("a", Duration::from_millis(100), recorder(&log, start, "a")).await;
        scheduler.schedule("b", Duration::from_millis(100), recorder(&log, start, "b")).await;
        assert_eq!(scheduler.pending_count().await, 2);

        tokio::time::sleep(Duration::from_millis(150)).await;
        let mut labels: Vec<_> = log.lock().unwrap().iter().map(|(_, l)| *l).collect();
        labels.sort();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn flush_runs_immediately_and_only_once() {
        let scheduler = PersistScheduler::new();
        let log: Log = Arc::default();
        let start = Instant::now();

        scheduler.schedule("sheet", Duration::from_secs(1), recorder(&log, start, "E1")).await;
        assert!(scheduler.is_pending(&"sheet").await);
        assert!(scheduler.flush(&"sheet").await);
        assert_eq!(log.lock().unwrap().len(), 1);
        assert_eq!(log.lock().unwrap()[0].0, Duration::ZERO);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(log.lock().unwrap().len(), 1);
        assert!(!scheduler.flush(&"sheet").await);
    }

    #[tokio::test(start_paused = true)]
    async fn flush_all_drains_everything() {
        let scheduler = PersistScheduler::new();
        let log: Log = Arc::default();
        let start = Instant::now();

        scheduler.schedule(1, Duration::from_secs(5), recorder(&log, start, "one")).await;
        scheduler.schedule(2, Duration::from_secs(5), recorder(&log, start, "two")).await;

        assert_eq!(scheduler.flush_all().await, 2);
        assert_eq!(scheduler.pending_count().await, 0);
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_job_never_runs() {
        let scheduler = PersistScheduler::new();
        let log: Log = Arc::default();
        let start = Instant::now();

        scheduler.schedule("sheet", Duration::from_millis(10), recorder(&log, start, "E1")).await;
        assert!(scheduler.cancel(&"sheet").await);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(log.lock().unwrap().is_empty());
    }
}
