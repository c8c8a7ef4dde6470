//! Background HTTP server
//!
//! The server runs an actix-web `HttpServer` on a dedicated thread with its
//! own actix system, so callers never need an async runtime of their own.
//! The listener is bound on the caller's thread first: bind failures surface
//! synchronously and the port is accepting connections (into the backlog)
//! before `start` returns.

use crate::config::{CorsConfig, ServerConfig};
use crate::core::mount::MountTable;
use crate::server::handlers::dispatch;
use crate::server::state::AppState;
use crate::utils::error::{ProviderError, Result};
use actix_cors::Cors;
use actix_web::dev::ServerHandle;
use actix_web::middleware::{Condition, DefaultHeaders};
use actix_web::{App, HttpServer as ActixHttpServer, web};
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info};
use tracing_actix_web::TracingLogger;

/// A running background server
pub struct BackgroundServer {
    addr: SocketAddr,
    base_url: String,
    handle: ServerHandle,
    thread: Option<JoinHandle<()>>,
}

impl BackgroundServer {
    /// Bind, spawn the server thread and wait until it owns the listener.
    pub fn start(config: &ServerConfig, mounts: Arc<MountTable>) -> Result<Self> {
        let bind_addr = config.address();
        let listener =
            TcpListener::bind(&bind_addr).map_err(|e| ProviderError::bind(&bind_addr, e))?;
        let addr = listener.local_addr()?;

        info!("Starting background server on {}", addr);

        let state = web::Data::new(AppState::new(mounts, config.clone()));
        let server_config = config.clone();
        let (tx, rx) = mpsc::channel();

        let thread = thread::Builder::new()
            .name(format!("bgserve-{}", addr.port()))
            .spawn(move || {
                let system = actix_web::rt::System::new();

                let result = system.block_on(async move {
                    let server = match ActixHttpServer::new(move || create_app(state.clone()))
                        .workers(server_config.workers)
                        .keep_alive(server_config.keep_alive_duration())
                        .shutdown_timeout(server_config.shutdown_timeout)
                        .disable_signals()
                        .listen(listener)
                    {
                        Ok(server) => server.run(),
                        Err(e) => {
                            let _ = tx.send(Err(e));
                            return Ok(());
                        }
                    };

                    let _ = tx.send(Ok(server.handle()));
                    server.await
                });

                if let Err(e) = result {
                    error!("Background server on {} failed: {}", addr, e);
                }
                debug!("Background server thread for {} exiting", addr);
            })?;

        let handle = rx
            .recv()
            .map_err(|_| ProviderError::server("Background server thread exited during startup"))?
            .map_err(|e| ProviderError::bind(addr.to_string(), e))?;

        let base_url = config.public_base_url(addr);
        info!("Background server listening on {} ({})", addr, base_url);

        Ok(Self {
            addr,
            base_url,
            handle,
            thread: Some(thread),
        })
    }

    /// Address the listener is bound to
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL published to callers
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stop accepting connections, let in-flight requests finish, and join
    /// the server thread.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };

        info!("Stopping background server on {}", self.addr);
        futures::executor::block_on(self.handle.stop(true));

        if thread.join().is_err() {
            error!("Background server thread for {} panicked", self.addr);
        }
        info!("Background server on {} stopped", self.addr);
    }
}

impl Drop for BackgroundServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for BackgroundServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundServer")
            .field("addr", &self.addr)
            .field("base_url", &self.base_url)
            .field("running", &self.thread.is_some())
            .finish()
    }
}

/// Create the Actix-web application
pub(crate) fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let cors_config = &state.config.cors;
    let cors = Condition::new(cors_config.enabled, build_cors(cors_config));

    App::new()
        .app_data(state)
        .wrap(cors)
        .wrap(TracingLogger::default())
        .wrap(DefaultHeaders::new().add(("Server", concat!("bgserve/", env!("CARGO_PKG_VERSION")))))
        .route("/{tail:.*}", web::to(dispatch))
}

fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "HEAD"])
        .allow_any_header()
        .expose_any_header()
        .max_age(config.max_age as usize);

    if config.allows_all_origins() {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
