//! Interval-driven background job runner.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

/// How often a job runs.
#[derive(Debug, Clone, Copy)]
pub enum JobFrequency {
    /// Every N seconds.
    Seconds(u64),
    /// Once a day.
    Daily,
}

impl JobFrequency {
    /// Interval between two runs.
    pub fn period(&self) -> Duration {
        match self {
            JobFrequency::Seconds(secs) => Duration::from_secs(*secs),
            JobFrequency::Daily => Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// A unit of recurring background work.
#[async_trait::async_trait]
pub trait Job: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// How often the job should run.
    fn frequency(&self) -> JobFrequency;

    /// One run. Errors are logged; the schedule keeps going.
    async fn execute(&self) -> Result<(), String>;
}

/// Runs registered jobs on their intervals until shutdown is signalled.
pub struct JobScheduler {
    jobs: Vec<Arc<dyn Job>>,
    handles: Vec<JoinHandle<()>>,
    shutdown: watch::Sender<bool>,
}

impl JobScheduler {
    pub fn new() -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            jobs: Vec::new(),
            handles: Vec::new(),
            shutdown,
        }
    }

    /// Queue a job. Takes effect on the next `start`.
    pub fn register<J: Job + 'static>(&mut self, job: J) {
        self.jobs.push(Arc::new(job));
    }

    /// Spawn one looping task per registered job.
    pub fn start(&mut self) {
        info!(jobs = self.jobs.len(), "Starting background jobs");

        for job in self.jobs.drain(..) {
            let shutdown = self.shutdown.subscribe();
            self.handles.push(tokio::spawn(run_job(job, shutdown)));
        }
    }

    /// Signal all job loops to stop after their current run.
    pub fn shutdown(&self) {
        info!("Stopping background jobs");
        let _ = self.shutdown.send(true);
    }

    /// Wait for the job tasks to finish, up to `timeout`.
    pub async fn wait_for_shutdown(self, timeout: Duration) {
        let drain = async {
            for handle in self.handles {
                if let Err(e) = handle.await {
                    warn!("Background job task panicked: {}", e);
                }
            }
        };

        if tokio::time::timeout(timeout, drain).await.is_err() {
            warn!(?timeout, "Background jobs did not stop in time");
        }
    }
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_job(job: Arc<dyn Job>, mut shutdown: watch::Receiver<bool>) {
    let name = job.name();
    let period = job.frequency().period();
    let mut ticks = tokio::time::interval(period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The interval yields immediately on creation; consume that tick so the
    // job waits a full period before its first run.
    ticks.tick().await;

    info!(job = name, ?period, "Job scheduled");

    loop {
        tokio::select! {
            _ = ticks.tick() => {
                let started = std::time::Instant::now();
                match job.execute().await {
                    Ok(()) => debug!(
                        job = name,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Job run finished"
                    ),
                    Err(e) => error!(
                        job = name,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        error = %e,
                        "Job run failed"
                    ),
                }
            }
            _ = shutdown.changed() => {
                debug!(job = name, "Job loop stopped");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingJob {
        runs: Arc<AtomicUsize>,
        fail: bool,
        frequency: JobFrequency,
    }

    #[async_trait::async_trait]
    impl Job for CountingJob {
        fn name(&self) -> &'static str {
            "counting_job"
        }

        fn frequency(&self) -> JobFrequency {
            self.frequency
        }

        async fn execute(&self) -> Result<(), String> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err("boom".to_string())
            } else {
                Ok(())
            }
        }
    }

    fn counting_job(runs: &Arc<AtomicUsize>, fail: bool, frequency: JobFrequency) -> CountingJob {
        CountingJob {
            runs: Arc::clone(runs),
            fail,
            frequency,
        }
    }

    #[test]
    fn test_period_mapping() {
        assert_eq!(JobFrequency::Seconds(30).period(), Duration::from_secs(30));
        assert_eq!(JobFrequency::Daily.period(), Duration::from_secs(86400));
    }

    #[test]
    fn test_register_queues_jobs() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut scheduler = JobScheduler::new();
        assert!(scheduler.jobs.is_empty());

        scheduler.register(counting_job(&runs, false, JobFrequency::Seconds(1)));
        assert_eq!(scheduler.jobs.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_jobs_run_on_their_interval() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut scheduler = JobScheduler::new();
        scheduler.register(counting_job(&runs, false, JobFrequency::Seconds(5)));
        scheduler.start();

        // The first period elapses before the first run, then ticks at 5s and 10s
        tokio::time::sleep(Duration::from_secs(11)).await;
        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(1)).await;

        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_run_keeps_the_schedule() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut scheduler = JobScheduler::new();
        scheduler.register(counting_job(&runs, true, JobFrequency::Seconds(5)));
        scheduler.start();

        tokio::time::sleep(Duration::from_secs(16)).await;
        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(1)).await;

        assert_eq!(runs.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_shutdown_stops_idle_jobs() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut scheduler = JobScheduler::new();
        scheduler.register(counting_job(&runs, false, JobFrequency::Daily));
        scheduler.start();
        tokio::time::sleep(Duration::from_millis(50)).await;

        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(1)).await;

        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }
}
