//! Listener setup and shutdown signalling for the curator daemon.

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use listenfd::ListenFd;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

/// Pending connections the kernel queues before `accept`.
const LISTEN_BACKLOG: i32 = 1024;

/// Why the server is shutting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Interrupt,
    Terminate,
}

/// Use the socket handed over by systemd when there is one, otherwise
/// bind `bind_addr:port` ourselves with `SO_REUSEPORT` so a new curator
/// process can take over the port before the old one exits.
pub fn create_listener(bind_addr: &str, port: u16) -> Result<TcpListener> {
    if let Some(listener) = ListenFd::from_env().take_tcp_listener(0)? {
        info!("[Server] Using inherited socket {}", listener.local_addr()?);
        listener.set_nonblocking(true)?;
        return Ok(TcpListener::from_std(listener)?);
    }

    let ip: IpAddr =
        bind_addr.parse().with_context(|| format!("Invalid bind address '{}'", bind_addr))?;
    let addr = SocketAddr::new(ip, port);
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(LISTEN_BACKLOG)?;

    Ok(TcpListener::from_std(socket.into())?)
}

async fn wait_for_signal() -> ShutdownReason {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("[Server] Ctrl+C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            },
            Err(e) => {
                tracing::error!("[Server] SIGTERM handler unavailable: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => ShutdownReason::Interrupt,
        () = terminate => ShutdownReason::Terminate,
    }
}

/// Resolves once the process is asked to stop; in-flight requests are
/// then drained by `axum::serve`.
pub async fn shutdown_signal() {
    let reason = wait_for_signal().await;
    info!("🛑 [Server] {:?} received, finishing in-flight requests", reason);
}
