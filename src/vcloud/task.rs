use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, trace};

use crate::error::{InventoryError, Result};
use crate::vcloud::types::{Task, TaskState};
use crate::vcloud::Client;

/// Default interval between task status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Polls `task` until it finishes.
///
/// A zero `timeout` waits indefinitely. Tasks ending in `error`, `canceled`
/// or `aborted` are reported as [`InventoryError::TaskFailed`].
pub async fn wait_for_task<C>(client: &C, task: Task, timeout: Duration, poll_interval: Duration) -> Result<Task>
where
    C: Client + Sync + ?Sized,
{
    let started = Instant::now();
    let mut current = task;

    loop {
        match current.state() {
            TaskState::Success => {
                debug!("Task '{}' completed", current.label());
                return Ok(current);
            }
            state if state.is_finished() => {
                return Err(InventoryError::TaskFailed {
                    operation: current.label().to_string(),
                    status: current.status.clone(),
                    message: current.error
                        .as_ref()
                        .map(|error| error.message.clone())
                        .unwrap_or_default(),
                });
            }
            state => trace!("Task '{}' is {:?}", current.label(), state),
        }

        if !timeout.is_zero() && started.elapsed() >= timeout {
            return Err(InventoryError::Timeout(timeout.as_secs()));
        }

        tokio::time::sleep(poll_interval).await;
        current = client.task(&current.href).await?;
    }
}
