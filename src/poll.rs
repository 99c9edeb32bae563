//! Async job polling
//!
//! One RDS workflow is asynchronous: an export is requested, then its job
//! is polled at a fixed interval until it reports a terminal state. This
//! is the only wait/poll state machine in the crate and is distinct from
//! the pagination loop: states PENDING -> {SUCCESS, ERROR}, with a hard
//! deadline that fails the wait with the last observed status.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Observed state of an asynchronous job
#[derive(Debug, Clone)]
pub enum JobStatus {
    /// Still running
    Pending,
    /// Finished; carries the job's result payload
    Success(JsonValue),
    /// Terminally failed with a server-reported message
    Failed(String),
}

impl JobStatus {
    /// Short status label used in timeout errors and logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Success(_) => "SUCCESS",
            Self::Failed(_) => "ERROR",
        }
    }
}

/// Source of job status observations, typically one HTTP call per probe
#[async_trait]
pub trait JobProbe: Send + Sync {
    /// Observe the job's current status
    async fn status(&self) -> Result<JobStatus>;
}

/// Poll a job at a fixed interval until it reaches a terminal state.
///
/// A terminal state returns or fails immediately. When `deadline` elapses
/// first, the wait fails with [`Error::Timeout`] carrying the last
/// observed status. Probe errors propagate unchanged.
pub async fn wait_for_job(
    probe: &dyn JobProbe,
    interval: Duration,
    deadline: Duration,
) -> Result<JsonValue> {
    let started = Instant::now();
    let mut last_status;

    loop {
        let status = probe.status().await?;
        last_status = status.label();

        match status {
            JobStatus::Success(result) => {
                debug!("job finished after {:?}", started.elapsed());
                return Ok(result);
            }
            JobStatus::Failed(message) => {
                return Err(Error::job_failed(message));
            }
            JobStatus::Pending => {}
        }

        if started.elapsed() + interval > deadline {
            return Err(Error::Timeout {
                deadline_secs: deadline.as_secs(),
                last_status: last_status.to_string(),
            });
        }

        tokio::time::sleep(interval).await;
    }
}
