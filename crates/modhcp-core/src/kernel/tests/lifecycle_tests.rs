use crate::kernel::error::{BootstrapPhase, Error};
use crate::kernel::lifecycle::*;
use crate::server::error::ServerError;
use crate::server::Server;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

type Calls = Arc<Mutex<Vec<&'static str>>>;

struct MockServer {
    fail_start: bool,
    fail_wait: bool,
    calls: Calls,
}

impl MockServer {
    fn new(fail_start: bool, fail_wait: bool) -> (Self, Calls) {
        let calls = Calls::default();
        (
            Self {
                fail_start,
                fail_wait,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl Server for MockServer {
    async fn start(&mut self) -> Result<(), ServerError> {
        self.calls.lock().unwrap().push("start");
        if self.fail_start {
            let addr: SocketAddr = "0.0.0.0:67".parse().unwrap();
            return Err(ServerError::Bind {
                addr,
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            });
        }
        Ok(())
    }

    async fn wait(&mut self) -> Result<(), ServerError> {
        self.calls.lock().unwrap().push("wait");
        if self.fail_wait {
            return Err(ServerError::Task("listener panicked".into()));
        }
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn test_clean_run_waits_grace_period() {
    let (server, calls) = MockServer::new(false, false);
    let mut lifecycle = Lifecycle::new(server);
    assert_eq!(lifecycle.state(), LifecycleState::Constructed);

    let before = Instant::now();
    let report = lifecycle.run().await.expect("clean run");

    assert!(report.is_clean());
    assert!(before.elapsed() >= GRACE_PERIOD);
    assert_eq!(*calls.lock().unwrap(), vec!["start", "wait"]);
    assert_eq!(lifecycle.state(), LifecycleState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_start_failure_never_waits() {
    let (server, calls) = MockServer::new(true, false);
    let mut lifecycle = Lifecycle::new(server);

    let before = Instant::now();
    let result = lifecycle.run().await;

    match result {
        Err(err @ Error::ServerStart(ServerError::Bind { .. })) => {
            assert_eq!(err.phase(), BootstrapPhase::ServerStart);
            assert!(err.is_fatal());
        }
        other => panic!("Expected ServerStart, got {:?}", other),
    }
    assert_eq!(*calls.lock().unwrap(), vec!["start"]);
    assert!(before.elapsed() < GRACE_PERIOD, "no grace period on fatal start error");
    assert_eq!(lifecycle.state(), LifecycleState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_wait_error_still_drains_for_grace_period() {
    let (server, calls) = MockServer::new(false, true);
    let mut lifecycle = Lifecycle::new(server);

    let before = Instant::now();
    let report = lifecycle.run().await.expect("runtime errors are not fatal");

    assert!(before.elapsed() >= GRACE_PERIOD);
    match &report.runtime_error {
        Some(err @ Error::ServerRuntime(ServerError::Task(_))) => {
            assert!(!err.is_fatal());
            assert_eq!(err.phase(), BootstrapPhase::ServerRuntime);
        }
        other => panic!("Expected ServerRuntime, got {:?}", other),
    }
    assert!(!report.is_clean());
    assert_eq!(*calls.lock().unwrap(), vec!["start", "wait"]);
    assert_eq!(lifecycle.state(), LifecycleState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_lifecycle_runs_once() {
    let (server, calls) = MockServer::new(false, false);
    let mut lifecycle = Lifecycle::new(server);
    lifecycle.run().await.unwrap();

    let second = lifecycle.run().await;
    assert!(matches!(second, Err(Error::ServerStart(ServerError::AlreadyStarted))));
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[test]
fn test_grace_period_is_bounded_and_non_zero() {
    assert!(GRACE_PERIOD > std::time::Duration::ZERO);
    assert!(GRACE_PERIOD <= std::time::Duration::from_secs(5));
    assert_eq!(LifecycleState::Draining.to_string(), "draining");
}
