use std::sync::mpsc::{Receiver, SyncSender, sync_channel};
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{Result, anyhow, bail};

use super::{ExportJob, writer};

/// Worker threads to use when no override is configured: one per available
/// processing unit, floored at 1.
pub fn default_worker_count() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// Bounded queue of pending clip writes plus the fixed pool that drains it.
///
/// The driver enqueues every job for a pair before the pool starts, so
/// workers never wait for new work: each one dequeues until the queue runs
/// dry and then exits. Jobs are dequeued at most once; completion order is
/// unspecified. A failed export is not retried.
pub struct ExportScheduler {
    tx: SyncSender<ExportJob>,
    rx: Arc<Mutex<Receiver<ExportJob>>>,
    workers: usize,
}

impl ExportScheduler {
    /// Queue sized for `capacity` jobs, drained by `workers` threads.
    pub fn new(capacity: usize, workers: usize) -> Self {
        let (tx, rx) = sync_channel(capacity.max(1));
        ExportScheduler {
            tx,
            rx: Arc::new(Mutex::new(rx)),
            workers: workers.max(1),
        }
    }

    pub fn enqueue(&self, job: ExportJob) -> Result<()> {
        self.tx.send(job).map_err(|e| {
            anyhow!(
                "export queue rejected job for '{}'",
                e.0.destination.display()
            )
        })
    }

    /// Start the worker pool, wait for the queue to drain and report how many
    /// clips were written. Any worker failure fails the drain as a whole.
    pub fn drain(self) -> Result<usize> {
        let ExportScheduler { tx, rx, workers } = self;
        drop(tx);

        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let rx = Arc::clone(&rx);
            handles.push(thread::spawn(move || {
                let mut written = 0usize;
                let mut failures = Vec::new();
                loop {
                    let job = match rx.lock() {
                        Ok(queue) => queue.recv(),
                        Err(_) => break,
                    };
                    let Ok(job) = job else { break };
                    match writer::write_segment(&job) {
                        Ok(()) => {
                            println!("{}", job.destination.display());
                            written += 1;
                        }
                        Err(err) => failures.push(err.to_string()),
                    }
                }
                (written, failures)
            }));
        }

        let mut written = 0;
        let mut failures = Vec::new();
        for handle in handles {
            match handle.join() {
                Ok((count, errs)) => {
                    written += count;
                    failures.extend(errs);
                }
                Err(_) => failures.push("export worker panicked".to_string()),
            }
        }
        if !failures.is_empty() {
            bail!(
                "{} clip export(s) failed: {}",
                failures.len(),
                failures.join("; ")
            );
        }
        Ok(written)
    }
}
