use uuid::Uuid;

use super::task::Job;
use super::timeline::TimeDomain;

/// All jobs scheduled on one machine, drawn as a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub machine: String,
    pub jobs: Vec<Job>,
}

impl Lane {
    pub fn new(machine: impl Into<String>) -> Self {
        Self {
            machine: machine.into(),
            jobs: Vec::new(),
        }
    }
}

/// A production schedule: one lane per machine, kept in the order machines
/// were first supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    pub name: String,
    pub lanes: Vec<Lane>,
}

impl Schedule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lanes: Vec::new(),
        }
    }

    /// Append a job to the machine's lane, creating the lane at the end of
    /// the stack if the machine has not been seen yet.
    pub fn push_job(&mut self, machine: &str, job: Job) {
        match self.lanes.iter_mut().find(|l| l.machine == machine) {
            Some(lane) => lane.jobs.push(job),
            None => {
                let mut lane = Lane::new(machine);
                lane.jobs.push(job);
                self.lanes.push(lane);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.iter().all(|l| l.jobs.is_empty())
    }

    pub fn job_count(&self) -> usize {
        self.lanes.iter().map(|l| l.jobs.len()).sum()
    }

    /// Iterate `(lane_index, job)` pairs in lane order.
    pub fn jobs(&self) -> impl Iterator<Item = (usize, &Job)> {
        self.lanes
            .iter()
            .enumerate()
            .flat_map(|(i, lane)| lane.jobs.iter().map(move |job| (i, job)))
    }

    pub fn find_job(&self, id: Uuid) -> Option<(&Lane, &Job)> {
        self.lanes
            .iter()
            .find_map(|lane| lane.jobs.iter().find(|j| j.id == id).map(|j| (lane, j)))
    }

    /// Smallest domain covering every job, or `None` for an empty schedule.
    pub fn domain(&self) -> Option<TimeDomain> {
        TimeDomain::covering(self.jobs().map(|(_, job)| job.span))
    }
}
