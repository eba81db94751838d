//! # Capability Layer (Controller)
//!
//! A Controller is an application-supplied handler driven through a fixed
//! lifecycle: initialization, one verb-specific entry point, rendering, and
//! output. Every entry point is optional — the trait ships no-op defaults,
//! so a controller implements exactly the subset it cares about and dispatch
//! is polymorphic over "exposes zero or more of the lifecycle methods".
//!
//! # Defaults
//!
//! `render` delegates to the bundle's template state and `output` writes the
//! rendered result when one exists; both degrade to no-ops for controllers
//! that never touch a template. Everything else defaults to doing nothing.
//!
//! # Construction
//!
//! Controllers are instantiated fresh for every matched request through a
//! [`ControllerFactory`] stored on the route rule. [`Constructor`] covers
//! the common `Default`-constructible case; [`FnFactory`] wraps a closure
//! for anything richer.

use crate::bundle::Bundle;
use crate::error::BoxError;
use async_trait::async_trait;
use std::marker::PhantomData;

/// An application handler with optional lifecycle entry points.
///
/// Entry points return `Result` so application failures can propagate with
/// `?`; an `Err` aborts the dispatch and is surfaced by the server layer.
/// Writing output is the ordinary way to answer — the first entry point or
/// hook that writes pre-empts the rest of the lifecycle.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Controller`",
    label = "missing `Controller` implementation",
    note = "All lifecycle entry points are optional; `impl Controller for {Self} {{}}` is valid."
)]
#[allow(unused_variables)]
#[async_trait]
pub trait Controller: Send {
    /// Called once, right after instantiation, with the controller's
    /// logical name.
    async fn init(&mut self, bundle: &mut Bundle, name: &str) -> Result<(), BoxError> {
        Ok(())
    }

    /// Entry point for `GET` requests.
    async fn get(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        Ok(())
    }

    /// Entry point for `POST` requests.
    async fn post(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        Ok(())
    }

    /// Entry point for `HEAD` requests.
    async fn head(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        Ok(())
    }

    /// Entry point for `DELETE` requests.
    async fn delete(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        Ok(())
    }

    /// Entry point for `PUT` requests.
    async fn put(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        Ok(())
    }

    /// Entry point for `PATCH` requests.
    async fn patch(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        Ok(())
    }

    /// Entry point for `OPTIONS` requests.
    async fn options(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        Ok(())
    }

    /// Render phase. The default delegates to the template state.
    async fn render(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        bundle.template.render();
        Ok(())
    }

    /// Output phase. The default writes the rendered template result, if
    /// rendering produced one.
    async fn output(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        if let Some(body) = bundle.template.take_result() {
            bundle.context.response.write_str(&body);
        }
        Ok(())
    }
}

/// Produces a fresh controller for each matched request.
///
/// One factory lives on each route rule for the process lifetime; the
/// controllers it builds live for a single request.
pub trait ControllerFactory: Send + Sync + 'static {
    /// The controller's logical name, passed to `init`.
    fn name(&self) -> &str;

    /// Instantiate a fresh controller.
    fn build(&self) -> Box<dyn Controller>;
}

/// A factory for `Default`-constructible controllers.
///
/// The logical name is the controller's unqualified type name.
pub struct Constructor<C> {
    name: &'static str,
    _marker: PhantomData<fn() -> C>,
}

impl<C: Controller + Default + 'static> Constructor<C> {
    /// Create a factory for `C`.
    pub fn new() -> Self {
        let full = std::any::type_name::<C>();
        let name = full.rsplit("::").next().unwrap_or(full);
        Self {
            name,
            _marker: PhantomData,
        }
    }
}

impl<C: Controller + Default + 'static> Default for Constructor<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Controller + Default + 'static> ControllerFactory for Constructor<C> {
    fn name(&self) -> &str {
        self.name
    }

    fn build(&self) -> Box<dyn Controller> {
        Box::new(C::default())
    }
}

/// A factory backed by a closure, for controllers that need constructor
/// arguments or shared state.
pub struct FnFactory<F> {
    name: String,
    build: F,
}

impl<F, C> FnFactory<F>
where
    F: Fn() -> C + Send + Sync + 'static,
    C: Controller + 'static,
{
    /// Create a factory with an explicit logical name.
    pub fn new(name: impl Into<String>, build: F) -> Self {
        Self {
            name: name.into(),
            build,
        }
    }
}

impl<F, C> ControllerFactory for FnFactory<F>
where
    F: Fn() -> C + Send + Sync + 'static,
    C: Controller + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn build(&self) -> Box<dyn Controller> {
        Box::new((self.build)())
    }
}
