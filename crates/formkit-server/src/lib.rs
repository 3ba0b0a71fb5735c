//! # formkit-server
//!
//! Serves a rendered form over HTTP and persists submissions.
//!
//! - `GET /` renders the form page
//! - `POST /submit` decodes the form body, reconstructs the typed document,
//!   writes it to the output file and returns a confirmation page
//!
//! Routing lives in [`FormApp`], which knows nothing about sockets; the
//! `tiny_http` listener and worker threads live in [`FormServer`].

pub mod app;
pub mod body;
pub mod error;
pub mod pages;
pub mod server;
pub mod store;

pub use app::{FormApp, Method, Page};
pub use error::ServerError;
pub use server::{FormServer, ShutdownHandle};
pub use store::DocumentStore;
