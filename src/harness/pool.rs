//! Supervised worker pool with per-job timeouts.
//!
//! ```text
//! ┌────────────┐  jobs   ┌──────────┐  Started / Finished  ┌────────────┐
//! │ job queue  │────────>│ worker i │─────────────────────>│ supervisor │
//! └────────────┘         └──────────┘                      └────────────┘
//! ```
//!
//! Workers take jobs from a shared crossbeam channel and report a `Started`
//! event, stamped with the instant the call began, before each job and a
//! `Finished` event after it. Panics are caught in the worker. The
//! supervisor waits on the event channel with a timeout equal to the time
//! left until the earliest in-flight deadline. When a deadline passes, the
//! job is reported as [`JobOutcome::TimedOut`], its worker is retired (it
//! exits once its current call returns; its late result is discarded) and
//! a fresh worker takes its place.
//!
//! Jobs carry a group, usually the algorithm they exercise. After the first
//! timeout in a group, its jobs that have not started yet are reported as
//! [`JobOutcome::Skipped`] without running. A thread stuck in a call cannot
//! be stopped, so this keeps the number of stranded workers per group at
//! the number of its jobs that were already running.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::error::Result;

/// A unit of work for the pool.
pub type Job<T> = Box<dyn FnOnce() -> T + Send + 'static>;

/// How a job ended.
#[derive(Debug)]
pub enum JobOutcome<T> {
    /// The job returned a value.
    Completed(T),
    /// The job panicked; the payload message is kept.
    Panicked(String),
    /// The job did not finish within the timeout.
    TimedOut,
    /// The job was not run because an earlier job of its group timed out.
    Skipped,
}

enum Event<T> {
    Started {
        worker: usize,
        job: usize,
        at: Instant,
    },
    Skipped {
        job: usize,
    },
    Finished {
        worker: usize,
        job: usize,
        result: thread::Result<T>,
    },
}

struct Worker {
    retired: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Queue entry: (job index, group, job).
type Queued<T> = (usize, usize, Job<T>);

/// Outcomes collected so far by the supervising thread.
struct Progress<T> {
    outcomes: Vec<Option<JobOutcome<T>>>,
    remaining: usize,
    // job -> (worker, deadline)
    in_flight: FxHashMap<usize, (usize, Instant)>,
}

impl<T> Progress<T> {
    fn new(total: usize) -> Self {
        Self {
            outcomes: (0..total).map(|_| None).collect(),
            remaining: total,
            in_flight: FxHashMap::default(),
        }
    }

    fn record(&mut self, event: Event<T>, timeout: Duration) {
        match event {
            Event::Started { worker, job, at } => {
                if self.outcomes[job].is_none() {
                    self.in_flight.insert(job, (worker, at + timeout));
                }
            }
            Event::Skipped { job } => self.settle(job, JobOutcome::Skipped),
            Event::Finished {
                worker,
                job,
                result,
            } => {
                self.in_flight.remove(&job);
                if self.outcomes[job].is_some() {
                    trace!(job, worker, "discarding result of timed-out job");
                    return;
                }
                let outcome = match result {
                    Ok(value) => JobOutcome::Completed(value),
                    Err(payload) => JobOutcome::Panicked(panic_message(payload.as_ref())),
                };
                self.settle(job, outcome);
            }
        }
    }

    fn settle(&mut self, job: usize, outcome: JobOutcome<T>) {
        if self.outcomes[job].is_none() {
            self.outcomes[job] = Some(outcome);
            self.remaining -= 1;
        }
    }

    fn earliest_deadline(&self) -> Option<Instant> {
        self.in_flight.values().map(|&(_, deadline)| deadline).min()
    }

    /// Settles every in-flight job whose deadline has passed and returns
    /// the (job, worker) pairs, ordered by job.
    fn expire(&mut self, now: Instant) -> Vec<(usize, usize)> {
        let mut expired: Vec<(usize, usize)> = self
            .in_flight
            .iter()
            .filter(|(_, (_, deadline))| *deadline <= now)
            .map(|(&job, &(worker, _))| (job, worker))
            .collect();
        expired.sort_unstable();
        for &(job, _) in &expired {
            self.in_flight.remove(&job);
            self.settle(job, JobOutcome::TimedOut);
        }
        expired
    }

    fn finish(self) -> Vec<JobOutcome<T>> {
        self.outcomes
            .into_iter()
            .map(|outcome| {
                outcome.unwrap_or_else(|| {
                    JobOutcome::Panicked("worker exited without reporting".to_string())
                })
            })
            .collect()
    }
}

/// Runs jobs on a fixed number of worker threads, enforcing a wall-clock
/// budget per job.
#[derive(Debug, Clone, Copy)]
pub struct Supervisor {
    parallelism: usize,
    timeout: Duration,
}

impl Supervisor {
    /// Creates a supervisor. `parallelism` is raised to at least one.
    pub fn new(parallelism: usize, timeout: Duration) -> Self {
        Self {
            parallelism: parallelism.max(1),
            timeout,
        }
    }

    /// Number of concurrently running workers.
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// The per-job budget.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs every job and returns their outcomes in job order.
    ///
    /// Every job is its own group, so a timeout never skips another job.
    ///
    /// # Errors
    ///
    /// [`Error::Io`](crate::Error::Io) if a worker thread cannot be spawned.
    pub fn run<T: Send + 'static>(&self, jobs: Vec<Job<T>>) -> Result<Vec<JobOutcome<T>>> {
        self.run_grouped(jobs.into_iter().enumerate().collect())
    }

    /// Runs `(group, job)` pairs and returns their outcomes in job order.
    ///
    /// Once a job of a group times out, the group's jobs that have not
    /// started are reported as [`JobOutcome::Skipped`].
    ///
    /// # Errors
    ///
    /// [`Error::Io`](crate::Error::Io) if a worker thread cannot be spawned.
    pub fn run_grouped<T: Send + 'static>(
        &self,
        jobs: Vec<(usize, Job<T>)>,
    ) -> Result<Vec<JobOutcome<T>>> {
        let total = jobs.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let groups = jobs.iter().map(|&(group, _)| group + 1).max().unwrap_or(0);
        let abandoned: Arc<[AtomicBool]> = (0..groups).map(|_| AtomicBool::new(false)).collect();
        let mut group_of = Vec::with_capacity(total);

        let (job_tx, job_rx) = unbounded::<Queued<T>>();
        for (index, (group, job)) in jobs.into_iter().enumerate() {
            group_of.push(group);
            // The receiver is alive in this scope.
            let _ = job_tx.send((index, group, job));
        }
        drop(job_tx);

        let (event_tx, event_rx) = unbounded::<Event<T>>();
        let spawn = |id: usize| {
            spawn_worker(id, job_rx.clone(), event_tx.clone(), Arc::clone(&abandoned))
        };
        let mut workers: FxHashMap<usize, Worker> = FxHashMap::default();
        let mut next_worker = 0;
        for _ in 0..self.parallelism.min(total) {
            workers.insert(next_worker, spawn(next_worker)?);
            next_worker += 1;
        }
        debug!(
            jobs = total,
            groups,
            workers = workers.len(),
            timeout_ms = self.timeout.as_millis() as u64,
            "supervisor started"
        );

        let mut progress = Progress::new(total);
        while progress.remaining > 0 {
            let event = match progress.earliest_deadline() {
                Some(deadline) => {
                    event_rx.recv_timeout(deadline.saturating_duration_since(Instant::now()))
                }
                None => event_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };
            match event {
                Ok(event) => progress.record(event, self.timeout),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            let now = Instant::now();
            if progress.earliest_deadline().map_or(true, |deadline| deadline > now) {
                continue;
            }
            // A job whose result is already queued finished in time.
            for event in event_rx.try_iter() {
                progress.record(event, self.timeout);
            }
            for (job, worker) in progress.expire(now) {
                let group = group_of[job];
                if !abandoned[group].swap(true, Ordering::SeqCst) {
                    warn!(group, "group timed out; skipping its remaining jobs");
                }
                warn!(job, worker, "job exceeded its time budget; retiring worker");

                if let Some(old) = workers.remove(&worker) {
                    old.retired.store(true, Ordering::SeqCst);
                }
                workers.insert(next_worker, spawn(next_worker)?);
                next_worker += 1;
            }
        }

        drop(event_tx);
        // Every job is accounted for, so the live workers see an empty,
        // disconnected queue and exit.
        for (_, worker) in workers {
            let _ = worker.handle.join();
        }

        Ok(progress.finish())
    }
}

fn spawn_worker<T: Send + 'static>(
    id: usize,
    jobs: Receiver<Queued<T>>,
    events: Sender<Event<T>>,
    abandoned: Arc<[AtomicBool]>,
) -> Result<Worker> {
    let retired = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&retired);
    let handle = thread::Builder::new()
        .name(format!("phonetic-worker-{id}"))
        .spawn(move || worker_loop(id, jobs, events, flag, abandoned))?;
    trace!(worker = id, "worker spawned");
    Ok(Worker { retired, handle })
}

fn worker_loop<T: Send + 'static>(
    id: usize,
    jobs: Receiver<Queued<T>>,
    events: Sender<Event<T>>,
    retired: Arc<AtomicBool>,
    abandoned: Arc<[AtomicBool]>,
) {
    while !retired.load(Ordering::SeqCst) {
        let Ok((job, group, task)) = jobs.recv() else {
            break;
        };
        if abandoned[group].load(Ordering::SeqCst) {
            if events.send(Event::Skipped { job }).is_err() {
                break;
            }
            continue;
        }
        let started = Event::Started {
            worker: id,
            job,
            at: Instant::now(),
        };
        if events.send(started).is_err() {
            break;
        }
        let result = panic::catch_unwind(AssertUnwindSafe(task));
        if events
            .send(Event::Finished {
                worker: id,
                job,
                result,
            })
            .is_err()
        {
            break;
        }
    }
}

/// Extracts the message of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    fn boxed<T, F>(f: F) -> Job<T>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Box::new(f)
    }

    #[test]
    fn test_results_in_job_order() {
        let supervisor = Supervisor::new(4, Duration::from_secs(5));
        let jobs: Vec<Job<usize>> = (0..100).map(|i| boxed(move || i * 2)).collect();
        let outcomes = supervisor.run(jobs).unwrap();
        for (i, outcome) in outcomes.into_iter().enumerate() {
            assert!(matches!(outcome, JobOutcome::Completed(v) if v == i * 2));
        }
    }

    #[test]
    fn test_empty_run() {
        let supervisor = Supervisor::new(2, Duration::from_secs(1));
        assert!(supervisor.run(Vec::<Job<()>>::new()).unwrap().is_empty());
    }

    #[test]
    fn test_panic_is_caught() {
        let supervisor = Supervisor::new(2, Duration::from_secs(5));
        let jobs: Vec<Job<u8>> = vec![
            boxed(|| 1),
            boxed(|| panic!("boom")),
            boxed(|| 3),
        ];
        let outcomes = supervisor.run(jobs).unwrap();
        assert!(matches!(outcomes[0], JobOutcome::Completed(1)));
        assert!(matches!(&outcomes[1], JobOutcome::Panicked(m) if m == "boom"));
        assert!(matches!(outcomes[2], JobOutcome::Completed(3)));
    }

    #[test]
    fn test_hung_job_times_out_and_others_finish() {
        let supervisor = Supervisor::new(1, Duration::from_millis(100));
        let jobs: Vec<Job<u8>> = vec![
            boxed(|| {
                thread::sleep(Duration::from_secs(3));
                0
            }),
            boxed(|| 1),
            boxed(|| 2),
        ];
        let started = Instant::now();
        let outcomes = supervisor.run(jobs).unwrap();
        assert!(started.elapsed() < Duration::from_secs(3));
        assert!(matches!(outcomes[0], JobOutcome::TimedOut));
        assert!(matches!(outcomes[1], JobOutcome::Completed(1)));
        assert!(matches!(outcomes[2], JobOutcome::Completed(2)));
    }

    #[test]
    fn test_timed_out_group_is_skipped() {
        static RELEASE: AtomicBool = AtomicBool::new(false);
        let spins = Arc::new(AtomicUsize::new(0));

        let supervisor = Supervisor::new(2, Duration::from_millis(100));
        let mut jobs: Vec<(usize, Job<u32>)> = Vec::new();
        for i in 0..40 {
            let spins = Arc::clone(&spins);
            jobs.push((
                0,
                boxed(move || {
                    spins.fetch_add(1, Ordering::SeqCst);
                    while !RELEASE.load(Ordering::SeqCst) {
                        std::hint::spin_loop();
                    }
                    i
                }),
            ));
            jobs.push((1, boxed(move || i)));
        }
        let outcomes = supervisor.run_grouped(jobs).unwrap();
        RELEASE.store(true, Ordering::SeqCst);

        // Only calls already running when the first one timed out were started.
        assert!(spins.load(Ordering::SeqCst) <= supervisor.parallelism());
        for (index, outcome) in outcomes.iter().enumerate() {
            if index % 2 == 0 {
                assert!(matches!(outcome, JobOutcome::TimedOut | JobOutcome::Skipped));
            } else {
                assert!(matches!(outcome, JobOutcome::Completed(v) if *v as usize == index / 2));
            }
        }
        assert!(outcomes.iter().any(|o| matches!(o, JobOutcome::Skipped)));
    }

    #[test]
    fn test_ungrouped_jobs_are_never_skipped() {
        let supervisor = Supervisor::new(1, Duration::from_millis(50));
        let jobs: Vec<Job<u8>> = vec![
            boxed(|| {
                thread::sleep(Duration::from_millis(500));
                0
            }),
            boxed(|| {
                thread::sleep(Duration::from_millis(500));
                1
            }),
            boxed(|| 2),
        ];
        let outcomes = supervisor.run(jobs).unwrap();
        assert!(matches!(outcomes[0], JobOutcome::TimedOut));
        assert!(matches!(outcomes[1], JobOutcome::TimedOut));
        assert!(matches!(outcomes[2], JobOutcome::Completed(2)));
    }
}
