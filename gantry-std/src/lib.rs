//! # gantry-std
//!
//! Standard implementations for the Gantry MVC framework.
//!
//! This crate provides:
//! - **Routing**: [`RoutingTable`](router::RoutingTable), rule compilation,
//!   and the two-tier match
//! - **Dispatch**: [`Dispatcher`](dispatch::Dispatcher), the per-request
//!   lifecycle state machine
//! - **Hooks**: [`HookRegistry`](hooks::HookRegistry) and the standard
//!   [`LogHook`](hooks::LogHook)
//! - **Collaborators**: in-memory sessions, static file responses
//! - **Testing utilities**: recording hooks and probe controllers

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use gantry_core;

pub mod dispatch;
pub mod hooks;
pub mod router;
pub mod session_store;
pub mod static_files;
pub mod testing;
