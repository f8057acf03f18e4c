//! Cooperative job scheduler.
//!
//! Jobs are resumed one step at a time from the host's main loop. A job
//! that is cancelled or never driven again is simply dropped.

use std::collections::VecDeque;

/// Result of resuming a job once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Complete,
}

/// Work driven one step at a time by a [`Scheduler`].
pub trait Job {
    /// Do one bounded slice of work.
    fn resume(&mut self) -> JobStatus;

    fn name(&self) -> &str {
        "job"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(u64);

pub struct Scheduler<'a> {
    jobs: VecDeque<(JobId, Box<dyn Job + 'a>)>,
    next_id: u64,
    steps_per_tick: usize,
}

impl<'a> Scheduler<'a> {
    /// One step per job per tick.
    pub fn new() -> Self {
        Self::with_steps_per_tick(1)
    }

    /// `steps` is clamped to at least 1.
    pub fn with_steps_per_tick(steps: usize) -> Self {
        Self {
            jobs: VecDeque::new(),
            next_id: 0,
            steps_per_tick: steps.max(1),
        }
    }

    /// Queue a job; it first runs on the next [`tick`](Self::tick).
    pub fn run_job(&mut self, job: impl Job + 'a) -> JobId {
        let id = JobId(self.next_id);
        self.next_id += 1;
        log::debug!("scheduling {} as {:?}", job.name(), id);
        self.jobs.push_back((id, Box::new(job)));
        id
    }

    /// Drop a job without finishing it. Returns false if it was not queued.
    pub fn cancel(&mut self, id: JobId) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|(job_id, _)| *job_id != id);
        before != self.jobs.len()
    }

    /// Resume every queued job up to `steps_per_tick` times, retiring the
    /// ones that complete. Returns the number of steps taken.
    pub fn tick(&mut self) -> usize {
        let mut steps = 0;
        let steps_per_tick = self.steps_per_tick;
        self.jobs.retain_mut(|(id, job)| {
            for _ in 0..steps_per_tick {
                steps += 1;
                if job.resume() == JobStatus::Complete {
                    log::debug!("{} ({:?}) complete", job.name(), id);
                    return false;
                }
            }
            true
        });
        steps
    }

    /// Tick until no jobs remain. Returns the number of ticks.
    pub fn run_until_idle(&mut self) -> usize {
        let mut ticks = 0;
        while !self.is_idle() {
            self.tick();
            ticks += 1;
        }
        ticks
    }

    pub fn pending(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_idle(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl Default for Scheduler<'_> {
    fn default() -> Self {
        Self::new()
    }
}
