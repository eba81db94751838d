//! # gantry - A Small MVC Web Framework
//!
//! `gantry` routes incoming HTTP requests to application-defined
//! controllers and drives each one through a fixed lifecycle — init, a
//! verb-specific entry point, render, output — with typed hooks firing
//! between phases.
//!
//! ## Routing
//!
//! Patterns are literal paths or templates with `:name(regex)` placeholders:
//!
//! ```rust,ignore
//! use gantry::{App, Controller};
//!
//! #[derive(Default)]
//! struct PostController;
//! impl Controller for PostController {}
//!
//! let mut app = App::new();
//! app.route::<PostController>("/post/:slug([\\w-]+)")?;
//! ```
//!
//! Literal routes are matched by string comparison before any regex runs;
//! matched placeholder values land in the request's query pairs under their
//! declared names.
//!
//! ## The short-circuit rule
//!
//! Every controller entry point and hook runs with mutable access to the
//! response. The first one to write a body byte or set a status code claims
//! the response: the rest of the lifecycle is skipped and the buffered
//! response goes out as-is.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod app;
mod config;
mod serve;

pub use app::App;
pub use config::{AppConfig, ConfigError};
pub use serve::{ServeError, init_tracing};

pub use gantry_core::{
    // Errors
    BoxError,
    // Attribute macro for implementing Controller / DispatchHook
    async_trait,
    // Collaborator bundle
    Bundle,
    // Controller factories
    Constructor,
    Context,
    // Controller capability
    Controller,
    ControllerFactory,
    DispatchError,
    // Hooks
    DispatchHook,
    FnFactory,
    FnHook,
    HookPoint,
    // Lifecycle
    Phase,
    // Request surface
    Request,
    Response,
    Session,
    SessionStore,
    Template,
    Verb,
    hook_fn,
};

pub use gantry_std::dispatch::{DispatchOutcome, Dispatcher};
pub use gantry_std::hooks::{HookRegistry, LogHook};
pub use gantry_std::router::{RouteError, RouteOutcome, RouteTarget, RoutingTable};
pub use gantry_std::session_store::MemoryStore;

/// Static file serving helpers.
pub mod static_files {
    pub use gantry_std::static_files::{MIME_TYPES, mime_for, respond};
}

/// Testing utilities.
pub mod testing {
    pub use gantry_std::testing::{ClaimingHook, ProbeController, ProbeFactory, RecordingHook};
}

/// Prelude module - common imports for Gantry applications.
///
/// # Usage
///
/// ```rust,ignore
/// use gantry::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        App,
        AppConfig,
        BoxError,
        Bundle,
        Controller,
        DispatchHook,
        HookPoint,
        Request,
        Response,
        RouteError,
        Verb,
        hook_fn,
    };
}
