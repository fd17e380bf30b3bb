use std::fmt;
use std::time::Duration;

use crate::kernel::error::{Error, Result};
use crate::server::error::ServerError;
use crate::server::Server;

/// Fixed delay between the server terminating and control returning to the
/// caller, so asynchronous log writers and server cleanup can flush.
pub const GRACE_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Constructed,
    Starting,
    Running,
    Draining,
    Stopped,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Constructed => "constructed",
            LifecycleState::Starting => "starting",
            LifecycleState::Running => "running",
            LifecycleState::Draining => "draining",
            LifecycleState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// How a completed run ended.
#[derive(Debug)]
pub struct ShutdownReport {
    /// Error reported by `wait`, already logged.
    pub runtime_error: Option<Error>,
}

impl ShutdownReport {
    pub fn is_clean(&self) -> bool {
        self.runtime_error.is_none()
    }
}

/// Owns the server for its running lifetime and sequences start, wait and
/// the grace period.
pub struct Lifecycle<S: Server> {
    server: S,
    state: LifecycleState,
}

impl<S: Server> Lifecycle<S> {
    pub fn new(server: S) -> Self {
        Self {
            server,
            state: LifecycleState::Constructed,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn server(&self) -> &S {
        &self.server
    }

    fn transition(&mut self, next: LifecycleState) {
        log::debug!("Lifecycle {} -> {}", self.state, next);
        self.state = next;
    }

    /// Start the server, block until it terminates, then hold for
    /// [`GRACE_PERIOD`].
    ///
    /// A start failure is returned immediately and `wait` is never called.
    /// A `wait` failure is logged and reported, and the grace period still
    /// elapses.
    pub async fn run(&mut self) -> Result<ShutdownReport> {
        if self.state != LifecycleState::Constructed {
            return Err(Error::ServerStart(ServerError::AlreadyStarted));
        }

        self.transition(LifecycleState::Starting);
        if let Err(e) = self.server.start().await {
            self.transition(LifecycleState::Stopped);
            return Err(Error::ServerStart(e));
        }
        self.transition(LifecycleState::Running);
        log::info!("Server running");

        let runtime_error = match self.server.wait().await {
            Ok(()) => None,
            Err(e) => {
                let err = Error::ServerRuntime(e);
                log::error!("{}", err);
                Some(err)
            }
        };

        self.transition(LifecycleState::Draining);
        tokio::time::sleep(GRACE_PERIOD).await;
        self.transition(LifecycleState::Stopped);
        log::info!("Server stopped");

        Ok(ShutdownReport { runtime_error })
    }
}
