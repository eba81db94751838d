//! Hook registry and standard hooks.
//!
//! The registry maps each typed [`HookPoint`] to an ordered list of hooks.
//! At a given point, hooks run sequentially in registration order; once one
//! of them produces output, the remaining hooks at that point are skipped —
//! the same pre-emption rule the pipeline applies between phases.

mod logging;

use gantry_core::{Bundle, DispatchError, DispatchHook, HookPoint};
use std::collections::HashMap;
use std::sync::Arc;

pub use logging::LogHook;

/// An ordered, point-keyed collection of registered hooks.
///
/// Built during application configuration and read-only while serving.
#[derive(Default)]
pub struct HookRegistry {
    hooks: HashMap<HookPoint, Vec<Arc<dyn DispatchHook>>>,
}

impl HookRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook at one point.
    pub fn register(&mut self, point: HookPoint, hook: impl DispatchHook + 'static) {
        self.register_arc(point, Arc::new(hook));
    }

    /// Register a shared hook at one point.
    pub fn register_arc(&mut self, point: HookPoint, hook: Arc<dyn DispatchHook>) {
        self.hooks.entry(point).or_default().push(hook);
    }

    /// Register one hook at every point, for lifecycle observers.
    pub fn observe(&mut self, hook: impl DispatchHook + 'static) {
        let hook: Arc<dyn DispatchHook> = Arc::new(hook);
        for point in HookPoint::all() {
            self.register_arc(point, hook.clone());
        }
    }

    /// Number of hooks registered at `point`.
    pub fn count(&self, point: HookPoint) -> usize {
        self.hooks.get(&point).map_or(0, Vec::len)
    }

    /// Invoke the hooks registered at `point`, in order, stopping early
    /// once one of them produces output.
    pub async fn call(
        &self,
        point: HookPoint,
        path: &str,
        bundle: &mut Bundle,
    ) -> Result<(), DispatchError> {
        let Some(hooks) = self.hooks.get(&point) else {
            return Ok(());
        };
        for hook in hooks {
            hook.call(point, path, bundle)
                .await
                .map_err(|source| DispatchError::Hook { point, source })?;
            if bundle.has_output() {
                break;
            }
        }
        Ok(())
    }
}
