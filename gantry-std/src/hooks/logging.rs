//! Logging hook for lifecycle observation.

use async_trait::async_trait;
use gantry_core::{BoxError, Bundle, DispatchHook, HookPoint};

/// A hook that emits a debug event at every point it is registered at.
///
/// Register it with [`HookRegistry::observe`](super::HookRegistry::observe)
/// to trace a request's whole lifecycle.
pub struct LogHook;

#[async_trait]
impl DispatchHook for LogHook {
    async fn call(
        &self,
        point: HookPoint,
        path: &str,
        bundle: &mut Bundle,
    ) -> Result<(), BoxError> {
        tracing::debug!(
            point = %point,
            path,
            status = ?bundle.context.response.status(),
            "lifecycle point"
        );
        Ok(())
    }
}
