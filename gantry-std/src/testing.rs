//! Testing utilities for Gantry.
//!
//! This module provides helpers to make testing controllers, hooks, and the
//! dispatch lifecycle easier:
//!
//! - [`RecordingHook`]: records every point it fires at
//! - [`ClaimingHook`]: writes output when invoked, claiming the response
//! - [`ProbeController`] / [`ProbeFactory`]: a controller that records which
//!   entry points ran, optionally misbehaving on purpose

use async_trait::async_trait;
use gantry_core::{
    BoxError, Bundle, Controller, ControllerFactory, DispatchHook, HookPoint,
};
use std::sync::{Arc, Mutex};

// ============================================================================
// Recording Hook
// ============================================================================

/// A hook that records every point and path it fires at.
///
/// Clones share the same recording, so keep one clone outside the registry
/// to inspect afterwards.
pub struct RecordingHook {
    fired: Arc<Mutex<Vec<(HookPoint, String)>>>,
}

impl RecordingHook {
    /// Create a hook with an empty recording.
    pub fn new() -> Self {
        Self {
            fired: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The recorded points, in firing order.
    pub fn points(&self) -> Vec<HookPoint> {
        self.fired.lock().unwrap().iter().map(|(p, _)| *p).collect()
    }

    /// The recorded point labels, in firing order.
    pub fn labels(&self) -> Vec<String> {
        self.fired
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.to_string())
            .collect()
    }

    /// Number of recorded firings.
    pub fn count(&self) -> usize {
        self.fired.lock().unwrap().len()
    }

    /// Clear the recording.
    pub fn clear(&self) {
        self.fired.lock().unwrap().clear();
    }
}

impl Default for RecordingHook {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RecordingHook {
    fn clone(&self) -> Self {
        Self {
            fired: self.fired.clone(),
        }
    }
}

#[async_trait]
impl DispatchHook for RecordingHook {
    async fn call(
        &self,
        point: HookPoint,
        path: &str,
        _bundle: &mut Bundle,
    ) -> Result<(), BoxError> {
        self.fired.lock().unwrap().push((point, path.to_string()));
        Ok(())
    }
}

// ============================================================================
// Claiming Hook
// ============================================================================

/// A hook that writes a fixed body when invoked, claiming the response and
/// pre-empting the rest of the lifecycle.
pub struct ClaimingHook {
    body: String,
}

impl ClaimingHook {
    /// Create a hook that writes `body`.
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

#[async_trait]
impl DispatchHook for ClaimingHook {
    async fn call(
        &self,
        _point: HookPoint,
        _path: &str,
        bundle: &mut Bundle,
    ) -> Result<(), BoxError> {
        bundle.context.response.write_str(&self.body);
        Ok(())
    }
}

// ============================================================================
// Probe Controller
// ============================================================================

/// A controller that records every entry point that runs.
///
/// Built through [`ProbeFactory`], which holds the shared log and the
/// misbehavior configuration.
pub struct ProbeController {
    log: Arc<Mutex<Vec<String>>>,
    write_at: Option<String>,
    session_write: Option<(String, String)>,
    fail_at: Option<String>,
}

impl ProbeController {
    fn record(&self, entry: &str, bundle: &mut Bundle) -> Result<(), BoxError> {
        self.log.lock().unwrap().push(entry.to_string());
        if self.write_at.as_deref() == Some(entry) {
            bundle.context.response.write_str("claimed");
        }
        if self.fail_at.as_deref() == Some(entry) {
            return Err(format!("probe failure in {entry}").into());
        }
        Ok(())
    }
}

#[async_trait]
impl Controller for ProbeController {
    async fn init(&mut self, bundle: &mut Bundle, _name: &str) -> Result<(), BoxError> {
        self.record("Init", bundle)
    }

    async fn get(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        if let Some((key, value)) = self.session_write.take() {
            bundle.session.set(key, value);
        }
        self.record("Get", bundle)
    }

    async fn post(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        self.record("Post", bundle)
    }

    async fn head(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        self.record("Head", bundle)
    }

    async fn delete(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        self.record("Delete", bundle)
    }

    async fn put(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        self.record("Put", bundle)
    }

    async fn patch(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        self.record("Patch", bundle)
    }

    async fn options(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        self.record("Options", bundle)
    }

    async fn render(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        self.record("Render", bundle)
    }

    async fn output(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        self.record("Output", bundle)
    }
}

/// Factory for [`ProbeController`] instances sharing one log.
///
/// Clones share the log, so keep one clone to inspect after dispatch.
pub struct ProbeFactory {
    log: Arc<Mutex<Vec<String>>>,
    write_at: Option<String>,
    session_write: Option<(String, String)>,
    fail_at: Option<String>,
}

impl ProbeFactory {
    /// A factory whose controllers record entry points and do nothing else.
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            write_at: None,
            session_write: None,
            fail_at: None,
        }
    }

    /// A factory whose controllers write output during the named entry
    /// point (`"Init"`, `"Get"`, `"Render"`, ...).
    pub fn writing_at(entry: impl Into<String>) -> Self {
        Self {
            write_at: Some(entry.into()),
            ..Self::new()
        }
    }

    /// A factory whose controllers write one session value during `Get`.
    pub fn with_session_write(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            session_write: Some((key.into(), value.into())),
            ..Self::new()
        }
    }

    /// A factory whose controllers fail during the named entry point.
    pub fn failing_at(entry: impl Into<String>) -> Self {
        Self {
            fail_at: Some(entry.into()),
            ..Self::new()
        }
    }

    /// The entry points recorded so far, across all built controllers.
    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl Default for ProbeFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ProbeFactory {
    fn clone(&self) -> Self {
        Self {
            log: self.log.clone(),
            write_at: self.write_at.clone(),
            session_write: self.session_write.clone(),
            fail_at: self.fail_at.clone(),
        }
    }
}

impl ControllerFactory for ProbeFactory {
    fn name(&self) -> &str {
        "ProbeController"
    }

    fn build(&self) -> Box<dyn Controller> {
        Box::new(ProbeController {
            log: self.log.clone(),
            write_at: self.write_at.clone(),
            session_write: self.session_write.clone(),
            fail_at: self.fail_at.clone(),
        })
    }
}
