//! # gantry-core
//!
//! Core traits and request types for the Gantry MVC framework.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! controllers, hooks, and session-store backends that don't need the full
//! `gantry-std` machinery.
//!
//! # Layers
//!
//! The framework is built from three layers around a per-request value:
//!
//! ## Request Surface ([`Request`], [`Response`], [`Context`])
//!
//! The parsed inbound request and the buffered response it will be answered
//! with. The response records whether any output (body byte or status code)
//! has occurred — that flag is the framework's central control signal: the
//! first lifecycle participant to produce output claims the response and
//! pre-empts everything after it.
//!
//! ## Capability Layer ([`Controller`])
//!
//! Application handlers with optional lifecycle entry points —
//! initialization, one entry point per HTTP verb, rendering, output. Every
//! entry point has a no-op default, so a controller implements only the
//! subset it needs. Fresh instances are produced per request by a
//! [`ControllerFactory`] stored on the matched route.
//!
//! ## Interposition Layer ([`DispatchHook`], [`HookPoint`])
//!
//! Hooks fire between lifecycle phases at typed points and receive the same
//! collaborator [`Bundle`] the controller does. Points are an enum, not
//! strings: an impossible point cannot be registered or invoked.
//!
//! # Collaborators
//!
//! [`Template`] and [`Session`] are per-request state values bundled with
//! the context and handed through the lifecycle. Session data persistence
//! is pluggable through [`SessionStore`].

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod bundle;
mod context;
mod controller;
mod error;
mod hook;
mod lifecycle;
mod request;
mod response;
mod session;
mod template;
mod verb;

// Controllers and hooks are object-safe async traits; implementors need
// the same attribute macro this crate uses.
pub use async_trait::async_trait;

pub use bundle::Bundle;
pub use context::Context;
pub use controller::{Constructor, Controller, ControllerFactory, FnFactory};
pub use error::{BoxError, DispatchError};
pub use hook::{DispatchHook, FnHook, HookPoint, hook_fn};
pub use lifecycle::Phase;
pub use request::Request;
pub use response::Response;
pub use session::{Session, SessionStore};
pub use template::Template;
pub use verb::Verb;
