//! `tiny_http` transport: a listener and a pool of worker threads.

use std::io::Read;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::app::{FormApp, Method, Page};
use crate::error::ServerError;

/// Largest request body read; larger posts get `413`.
pub const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// How often idle workers check for shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// A bound listener serving one [`FormApp`].
pub struct FormServer {
    server: Arc<tiny_http::Server>,
    app: Arc<FormApp>,
    shutdown: Arc<AtomicBool>,
}

/// Stops a running [`FormServer`] from another thread.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    shutdown: Arc<AtomicBool>,
}

impl ShutdownHandle {
    /// Ask every worker to exit after its current request.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

impl FormServer {
    /// Bind to `addr` (`host:port`; port `0` picks a free port).
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the address cannot be bound.
    pub fn bind(addr: &str, app: FormApp) -> Result<Self, ServerError> {
        let server = tiny_http::Server::http(addr).map_err(|e| ServerError::Bind {
            addr: addr.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            server: Arc::new(server),
            app: Arc::new(app),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// The bound address, when listening on IP.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            shutdown: Arc::clone(&self.shutdown),
        }
    }

    /// Serve requests on `workers` threads until shut down. Blocks.
    pub fn run(self, workers: usize) {
        let workers = workers.max(1);
        if let Some(addr) = self.local_addr() {
            tracing::info!(%addr, workers, "serving form");
        }

        let handles: Vec<_> = (0..workers)
            .map(|id| {
                let server = Arc::clone(&self.server);
                let app = Arc::clone(&self.app);
                let shutdown = Arc::clone(&self.shutdown);
                std::thread::Builder::new()
                    .name(format!("formkit-worker-{id}"))
                    .spawn(move || worker_loop(&server, &app, &shutdown))
            })
            .filter_map(|spawned| match spawned {
                Ok(handle) => Some(handle),
                Err(error) => {
                    tracing::error!(%error, "failed to spawn worker thread");
                    None
                }
            })
            .collect();

        if handles.is_empty() {
            tracing::error!("no worker threads running; stopping");
            return;
        }
        for handle in handles {
            if handle.join().is_err() {
                tracing::error!("worker thread panicked");
            }
        }
        tracing::info!("server stopped");
    }
}

fn worker_loop(server: &tiny_http::Server, app: &FormApp, shutdown: &AtomicBool) {
    while !shutdown.load(Ordering::SeqCst) {
        match server.recv_timeout(POLL_INTERVAL) {
            Ok(Some(request)) => serve(request, app),
            Ok(None) => {}
            Err(error) => tracing::warn!(%error, "failed to receive request"),
        }
    }
}

fn serve(mut request: tiny_http::Request, app: &FormApp) {
    let method = Method::from(request.method());
    let url = request.url().to_string();

    let page = match read_body(&mut request) {
        Ok(body) => app.handle(method, &url, &body),
        Err(page) => page,
    };

    tracing::info!(method = %request.method(), %url, status = page.status, "request");
    if let Err(error) = request.respond(into_response(page)) {
        tracing::warn!(%error, %url, "failed to write response");
    }
}

fn read_body(request: &mut tiny_http::Request) -> Result<Vec<u8>, Page> {
    read_limited(request.as_reader(), MAX_BODY_BYTES)
}

/// Read at most `limit` bytes; one byte more means the body is too large.
fn read_limited(reader: impl Read, limit: u64) -> Result<Vec<u8>, Page> {
    let mut body = Vec::new();
    reader
        .take(limit + 1)
        .read_to_end(&mut body)
        .map_err(|e| Page {
            status: 400,
            body: crate::pages::error_page(400, &format!("failed to read body: {e}")),
            allow: None,
        })?;
    if body.len() as u64 > limit {
        return Err(Page {
            status: 413,
            body: crate::pages::error_page(413, "Request body too large"),
            allow: None,
        });
    }
    Ok(body)
}

fn into_response(page: Page) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let mut response = tiny_http::Response::from_string(page.body).with_status_code(page.status);
    if let Ok(header) =
        tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..])
    {
        response.add_header(header);
    }
    if let Some(allow) = page.allow {
        if let Ok(header) = tiny_http::Header::from_bytes(&b"Allow"[..], allow.as_bytes()) {
            response.add_header(header);
        }
    }
    response
}
