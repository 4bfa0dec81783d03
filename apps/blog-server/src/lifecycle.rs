//! Lifecycle controller - owns the listener and the store connection.
//!
//! ```text
//! Stopped -> Starting -> Running -> Stopping -> Stopped
//! ```
//!
//! `run_server` returns once the store is open and the socket is bound, so a
//! caller can issue requests immediately. `close_server` stops the listener
//! gracefully, then closes the store.

use std::net::{SocketAddr, TcpListener};

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing_actix_web::TracingLogger;

use crate::config::ServerConfig;
use crate::handlers;
use crate::observability::RequestIdMiddleware;
use crate::state::AppState;

/// Where the controller is in its start/stop cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Stopped,
    Starting,
    Running,
    Stopping,
}

/// Failures while bringing the server up. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("server is not stopped (currently {0:?})")]
    AlreadyRunning(Phase),

    #[error("cannot connect to database: {0}")]
    Connect(String),

    #[error("database migration failed: {0}")]
    Migration(String),

    #[error("no store available for database url {0}")]
    UnsupportedStore(String),

    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

struct RunningServer {
    addr: SocketAddr,
    state: AppState,
    handle: ServerHandle,
    task: JoinHandle<std::io::Result<()>>,
}

/// Starts and stops one server instance and its store connection.
///
/// Each controller is independent, so tests can run several side by side.
pub struct ServerController {
    config: ServerConfig,
    phase: Phase,
    running: Option<RunningServer>,
}

impl ServerController {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            phase: Phase::Stopped,
            running: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Address the listener is bound to, while running.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|r| r.addr)
    }

    /// Shared state of the running server, for direct store access.
    pub fn state(&self) -> Option<&AppState> {
        self.running.as_ref().map(|r| &r.state)
    }

    /// Open the store at `database_url` and start listening.
    pub async fn run_server(&mut self, database_url: &str) -> Result<SocketAddr, LifecycleError> {
        self.begin_start()?;

        let state = match AppState::connect(database_url, &self.config).await {
            Ok(state) => state,
            Err(e) => {
                self.phase = Phase::Stopped;
                tracing::error!(error = %e, "Server failed to start");
                return Err(e);
            }
        };

        self.serve(state).await
    }

    /// Start listening on an already opened store. Unless rejected with
    /// `AlreadyRunning`, the controller owns closing it from here on, also
    /// when startup fails.
    pub async fn run_with_state(&mut self, state: AppState) -> Result<SocketAddr, LifecycleError> {
        self.begin_start()?;
        self.serve(state).await
    }

    fn begin_start(&mut self) -> Result<(), LifecycleError> {
        if self.phase != Phase::Stopped {
            return Err(LifecycleError::AlreadyRunning(self.phase));
        }
        self.phase = Phase::Starting;
        Ok(())
    }

    async fn serve(&mut self, state: AppState) -> Result<SocketAddr, LifecycleError> {
        match self.listen(&state) {
            Ok((addr, handle, task)) => {
                self.running = Some(RunningServer {
                    addr,
                    state,
                    handle,
                    task,
                });
                self.phase = Phase::Running;
                tracing::info!(%addr, "Server listening");
                Ok(addr)
            }
            Err(e) => {
                close_store(&state).await;
                self.phase = Phase::Stopped;
                tracing::error!(error = %e, "Server failed to start");
                Err(e)
            }
        }
    }

    fn listen(
        &self,
        state: &AppState,
    ) -> Result<(SocketAddr, ServerHandle, JoinHandle<std::io::Result<()>>), LifecycleError> {
        let listener = self.bind()?;
        let addr = listener
            .local_addr()
            .map_err(|source| self.bind_error(source))?;

        let app_state = state.clone();
        let mut server = HttpServer::new(move || {
            App::new()
                .wrap(TracingLogger::default())
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new(app_state.clone()))
                .configure(handlers::configure_routes)
        })
        .disable_signals()
        .shutdown_timeout(self.config.shutdown_timeout);

        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        let server = server
            .listen(listener)
            .map_err(|source| self.bind_error(source))?
            .run();

        let handle = server.handle();
        let task = actix_rt::spawn(server);

        Ok((addr, handle, task))
    }

    fn bind(&self) -> Result<TcpListener, LifecycleError> {
        TcpListener::bind((self.config.host.as_str(), self.config.port))
            .map_err(|source| self.bind_error(source))
    }

    fn bind_error(&self, source: std::io::Error) -> LifecycleError {
        LifecycleError::Bind {
            addr: format!("{}:{}", self.config.host, self.config.port),
            source,
        }
    }

    /// Stop listening and close the store. Failures are logged, not returned.
    pub async fn close_server(&mut self) {
        let Some(running) = self.running.take() else {
            tracing::warn!("close_server called while not running");
            return;
        };

        self.phase = Phase::Stopping;
        tracing::info!(addr = %running.addr, "Stopping server");

        running.handle.stop(true).await;
        match running.task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!(error = %e, "Server exited with an error"),
            Err(e) => tracing::error!(error = %e, "Server task failed"),
        }

        close_store(&running.state).await;

        self.phase = Phase::Stopped;
        tracing::info!("Server stopped");
    }
}

async fn close_store(state: &AppState) {
    if let Err(e) = state.posts.close().await {
        tracing::error!(error = %e, "Failed to close post store");
    }
}
