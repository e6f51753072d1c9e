//! Request handling entry point over an [`App`].

use crate::application::app::App;
use crate::http::{Request, Response};

/// Delegates requests to the app's router.
#[derive(Debug, Clone)]
pub struct Kernel {
    app: App,
}

impl Kernel {
    pub fn new(app: App) -> Self {
        Self { app }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Dispatch a parsed request.
    pub fn handle_request(&self, request: &Request) -> Response {
        let span = tracing::debug_span!("request", method = %request.method(), uri = %request.uri());
        let _enter = span.enter();

        let response = self.app.router().handle(request);
        tracing::info!(status = response.status_code(), "Request handled");
        response
    }

    /// Parse raw request text, dispatch it and serialize the response.
    pub fn handle_raw(&self, raw: &str) -> String {
        let request = Request::parsed(raw);
        self.handle_request(&request).to_string()
    }
}
