use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::UdpSocket;
use tokio::sync::Notify;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::kernel::constants;
use crate::plugin_system::registry::PluginRegistry;
use crate::server::chain::HandlerChain;
use crate::server::error::ServerError;
use crate::server::message::Request;
use crate::server::Server;

/// Requests another task to stop a running [`ChainServer`].
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    notify: Arc<Notify>,
}

impl ShutdownHandle {
    /// Make `wait` return cleanly. Safe to call before `wait` is entered.
    pub fn shutdown(&self) {
        self.notify.notify_one();
    }
}

/// Default engine: UDP listeners feeding per-family handler chains.
pub struct ChainServer {
    config: Config,
    registry: Arc<PluginRegistry>,
    started: bool,
    local_addrs: Vec<SocketAddr>,
    tasks: JoinSet<Result<(), ServerError>>,
    shutdown: Arc<Notify>,
    handled: Arc<AtomicU64>,
}

impl ChainServer {
    pub fn new(config: Config, registry: Arc<PluginRegistry>) -> Self {
        Self {
            config,
            registry,
            started: false,
            local_addrs: Vec::new(),
            tasks: JoinSet::new(),
            shutdown: Arc::new(Notify::new()),
            handled: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            notify: self.shutdown.clone(),
        }
    }

    /// Addresses actually bound, available after `start`.
    pub fn local_addrs(&self) -> &[SocketAddr] {
        &self.local_addrs
    }

    /// Datagrams that went through a handler chain so far.
    pub fn handled(&self) -> u64 {
        self.handled.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Server for ChainServer {
    async fn start(&mut self) -> Result<(), ServerError> {
        if self.started {
            return Err(ServerError::AlreadyStarted);
        }

        // Build every chain and bind every socket before serving anything,
        // so a failure leaves nothing running.
        let mut bound = Vec::new();
        for (family, section) in self.config.servers() {
            let chain = Arc::new(HandlerChain::build(family, section, &self.registry)?);
            log::info!("{} handler chain: [{}]", family, chain.names().join(", "));
            for addr in &section.listen {
                let socket = UdpSocket::bind(addr)
                    .await
                    .map_err(|source| ServerError::Bind { addr: *addr, source })?;
                let local = socket
                    .local_addr()
                    .map_err(|source| ServerError::Bind { addr: *addr, source })?;
                log::info!("Listening on {} ({})", local, family);
                bound.push((socket, local, chain.clone()));
            }
        }

        for (socket, local, chain) in bound {
            self.local_addrs.push(local);
            self.tasks.spawn(serve(socket, local, chain, self.handled.clone()));
        }
        self.started = true;
        Ok(())
    }

    async fn wait(&mut self) -> Result<(), ServerError> {
        if !self.started {
            return Err(ServerError::NotStarted);
        }
        let shutdown = self.shutdown.clone();

        let result = tokio::select! {
            signal = termination_signal() => match signal {
                Ok(name) => {
                    log::info!("Received {}, shutting down", name);
                    Ok(())
                }
                Err(e) => Err(ServerError::Signal(e)),
            },
            _ = shutdown.notified() => {
                log::info!("Shutdown requested");
                Ok(())
            }
            Some(joined) = self.tasks.join_next() => match joined {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e),
                Err(e) => Err(ServerError::Task(e.to_string())),
            },
        };

        self.tasks.abort_all();
        while self.tasks.join_next().await.is_some() {}
        result
    }
}

async fn serve(
    socket: UdpSocket,
    local: SocketAddr,
    chain: Arc<HandlerChain>,
    handled: Arc<AtomicU64>,
) -> Result<(), ServerError> {
    let mut buf = vec![0u8; constants::MAX_DATAGRAM_SIZE];
    loop {
        let (len, peer) = socket
            .recv_from(&mut buf)
            .await
            .map_err(|source| ServerError::Receive { addr: local, source })?;
        let request = Request::new(chain.family(), peer, &buf[..len]);
        let response = chain.process(&request);
        handled.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "{} request from {} ({} bytes): offered {:?}, {} option(s)",
            chain.family(),
            peer,
            len,
            response.offered_address(),
            response.options().count()
        );
    }
}

async fn termination_signal() -> std::io::Result<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res.map(|_| "SIGINT"),
            _ = sigterm.recv() => Ok("SIGTERM"),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.map(|_| "Ctrl-C")
    }
}
