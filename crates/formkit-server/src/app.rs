//! Request routing, independent of the HTTP transport.

use std::sync::Arc;

use formkit_core::{FormDefinition, ListEncoding};

use crate::body::decode_form;
use crate::error::ServerError;
use crate::pages;
use crate::store::DocumentStore;

/// HTTP methods the app distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Other,
}

impl From<&tiny_http::Method> for Method {
    fn from(method: &tiny_http::Method) -> Self {
        match method {
            tiny_http::Method::Get => Self::Get,
            tiny_http::Method::Head => Self::Head,
            tiny_http::Method::Post => Self::Post,
            _ => Self::Other,
        }
    }
}

/// A response ready to be written by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub status: u16,
    pub body: String,
    /// Value for the `Allow` header on 405 responses.
    pub allow: Option<&'static str>,
}

impl Page {
    const fn ok(body: String) -> Self {
        Self {
            status: 200,
            body,
            allow: None,
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: pages::error_page(status, message),
            allow: None,
        }
    }

    fn method_not_allowed(allow: &'static str) -> Self {
        Self {
            allow: Some(allow),
            ..Self::error(405, "Method not allowed")
        }
    }
}

/// Form state shared by every request handler.
#[derive(Debug)]
pub struct FormApp {
    form: Arc<FormDefinition>,
    encoding: ListEncoding,
    title: String,
    store: DocumentStore,
}

impl FormApp {
    pub fn new(
        form: Arc<FormDefinition>,
        encoding: ListEncoding,
        title: impl Into<String>,
        store: DocumentStore,
    ) -> Self {
        Self {
            form,
            encoding,
            title: title.into(),
            store,
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Route one request.
    pub fn handle(&self, method: Method, url: &str, body: &[u8]) -> Page {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        match (path, method) {
            ("/", Method::Get | Method::Head) => self.show_form(),
            ("/", _) => Page::method_not_allowed("GET, HEAD"),
            ("/submit", Method::Post) => self.submit(body),
            ("/submit", _) => Page::method_not_allowed("POST"),
            _ => Page::error(404, "Not found"),
        }
    }

    fn show_form(&self) -> Page {
        let fragment = self.form.render(self.encoding);
        Page::ok(pages::form_page(&self.title, &fragment))
    }

    fn submit(&self, body: &[u8]) -> Page {
        match self.try_submit(body) {
            Ok(()) => Page::ok(pages::confirmation_page(self.store.path())),
            Err(ServerError::BadRequest(reason)) => Page::error(400, &reason),
            Err(error) => {
                tracing::error!(%error, "failed to persist submission");
                Page::error(500, "The submission could not be saved.")
            }
        }
    }

    fn try_submit(&self, body: &[u8]) -> Result<(), ServerError> {
        let flat = decode_form(body)?;
        let document = self.form.reconstruct(&flat);
        tracing::debug!(fields = flat.len(), "reconstructed submission");
        self.store.save(&document)
    }
}
