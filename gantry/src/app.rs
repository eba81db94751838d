//! The application: routing table, dispatcher, and configuration, wired
//! together behind a builder-style API.
//!
//! An [`App`] is configured single-threaded at startup — routes, mounts,
//! hooks, session store — and then treated as read-only for the rest of the
//! process, shared behind `Arc` by the server layer. Construction and
//! serving never overlap.

use crate::config::AppConfig;
use gantry_core::{
    Constructor, Controller, ControllerFactory, DispatchHook, HookPoint, Request, Response,
    SessionStore,
};
use gantry_std::dispatch::Dispatcher;
use gantry_std::router::{RouteError, RouteOutcome, RoutingTable};
use gantry_std::session_store::MemoryStore;
use gantry_std::static_files;
use std::path::PathBuf;
use std::sync::Arc;

/// An application: routes, hooks, config, and the dispatcher they feed.
pub struct App {
    config: AppConfig,
    table: RoutingTable,
    dispatcher: Dispatcher,
}

impl App {
    /// Create an application with default configuration and an in-memory
    /// session store.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create an application with the given configuration and an in-memory
    /// session store.
    pub fn with_config(config: AppConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// Create an application with an explicit session store backend.
    pub fn with_store(config: AppConfig, store: Arc<dyn SessionStore>) -> Self {
        let dispatcher = Dispatcher::new(store, config.session_cookie.clone());
        Self {
            config,
            table: RoutingTable::new(),
            dispatcher,
        }
    }

    /// The application configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Register a route for a `Default`-constructible controller type.
    pub fn route<C>(&mut self, pattern: &str) -> Result<&mut Self, RouteError>
    where
        C: Controller + Default + 'static,
    {
        self.route_factory(pattern, Arc::new(Constructor::<C>::new()))
    }

    /// Register a route with an explicit controller factory.
    pub fn route_factory(
        &mut self,
        pattern: &str,
        factory: Arc<dyn ControllerFactory>,
    ) -> Result<&mut Self, RouteError> {
        self.table.add_rule(pattern, factory)?;
        Ok(self)
    }

    /// Mount a filesystem directory under a URL prefix for direct file
    /// serving on `GET`/`HEAD`.
    pub fn static_path(
        &mut self,
        url_prefix: impl Into<String>,
        fs_path: impl Into<PathBuf>,
    ) -> &mut Self {
        self.table.set_static_path(url_prefix, fs_path);
        self
    }

    /// Register a hook at one lifecycle point.
    pub fn hook(&mut self, point: HookPoint, hook: impl DispatchHook + 'static) -> &mut Self {
        self.dispatcher.hooks_mut().register(point, hook);
        self
    }

    /// Register a hook at every lifecycle point.
    pub fn observe(&mut self, hook: impl DispatchHook + 'static) -> &mut Self {
        self.dispatcher.hooks_mut().observe(hook);
        self
    }

    /// Answer one request: match it against the routing table and, on a
    /// rule hit, drive the controller lifecycle.
    ///
    /// This is the whole request path minus the wire: the server layer
    /// calls it per request, and tests can call it directly.
    pub async fn handle(&self, mut request: Request) -> Response {
        match self.table.route(&mut request) {
            RouteOutcome::File(path) => static_files::respond(&path).await,
            RouteOutcome::Rule(target) => {
                match self.dispatcher.dispatch(target, request).await {
                    Ok(outcome) => outcome.response,
                    Err(err) => {
                        tracing::error!(error = %err, "dispatch failed");
                        let mut response = Response::new();
                        response.set_status(500);
                        response.set_header("Content-Type", "text/plain; charset=utf-8");
                        response.write_str("Internal Server Error\n");
                        response
                    }
                }
            }
            RouteOutcome::NotFound => {
                let mut response = Response::new();
                response.not_found();
                response
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
