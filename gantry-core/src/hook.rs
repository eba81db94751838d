//! # Interposition Layer (Hook)
//!
//! Hooks run between lifecycle phases at typed points: after controller
//! initialization, around the verb entry point, and around rendering and
//! output. A hook receives the point it fires at, the matched request path,
//! and the collaborator bundle — the same bundle the controller sees, so a
//! hook can read and write anything the controller can, including claiming
//! the response outright.
//!
//! Hook points are an enum rather than strings: a point that does not exist
//! cannot be registered or invoked, and the around-method points carry their
//! verb as data.

use crate::bundle::Bundle;
use crate::error::BoxError;
use crate::verb::Verb;
use async_trait::async_trait;
use std::fmt;

/// A typed position in the dispatch lifecycle where hooks fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    /// After the controller's `init` entry point.
    AfterInit,
    /// Before the verb entry point.
    Before(Verb),
    /// After the verb entry point.
    After(Verb),
    /// Before the render phase.
    BeforeRender,
    /// After the render phase.
    AfterRender,
    /// Before the output phase.
    BeforeOutput,
    /// After the output phase.
    AfterOutput,
}

impl HookPoint {
    /// Every hook point, covering all recognized verbs. Useful for
    /// registering an observer everywhere.
    pub fn all() -> Vec<HookPoint> {
        let mut points = vec![HookPoint::AfterInit];
        for verb in Verb::ALL {
            points.push(HookPoint::Before(verb));
            points.push(HookPoint::After(verb));
        }
        points.extend([
            HookPoint::BeforeRender,
            HookPoint::AfterRender,
            HookPoint::BeforeOutput,
            HookPoint::AfterOutput,
        ]);
        points
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookPoint::AfterInit => f.write_str("AfterInit"),
            HookPoint::Before(verb) => write!(f, "Before{}", verb.method_name()),
            HookPoint::After(verb) => write!(f, "After{}", verb.method_name()),
            HookPoint::BeforeRender => f.write_str("BeforeRender"),
            HookPoint::AfterRender => f.write_str("AfterRender"),
            HookPoint::BeforeOutput => f.write_str("BeforeOutput"),
            HookPoint::AfterOutput => f.write_str("AfterOutput"),
        }
    }
}

/// A lifecycle hook.
///
/// Hooks are shared across requests and invoked sequentially in
/// registration order; they must carry no per-request state of their own.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `DispatchHook`",
    label = "missing `DispatchHook` implementation",
    note = "Implement `call`, or wrap a closure with `hook_fn`."
)]
#[async_trait]
pub trait DispatchHook: Send + Sync {
    /// Called when dispatch reaches a point this hook is registered at.
    async fn call(&self, point: HookPoint, path: &str, bundle: &mut Bundle)
    -> Result<(), BoxError>;
}

/// Wrap a synchronous closure as a [`DispatchHook`].
pub fn hook_fn<F>(f: F) -> FnHook<F>
where
    F: Fn(HookPoint, &str, &mut Bundle) + Send + Sync,
{
    FnHook(f)
}

/// A [`DispatchHook`] backed by a synchronous closure. See [`hook_fn`].
pub struct FnHook<F>(F);

#[async_trait]
impl<F> DispatchHook for FnHook<F>
where
    F: Fn(HookPoint, &str, &mut Bundle) + Send + Sync,
{
    async fn call(
        &self,
        point: HookPoint,
        path: &str,
        bundle: &mut Bundle,
    ) -> Result<(), BoxError> {
        (self.0)(point, path, bundle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_lifecycle_labels() {
        assert_eq!(HookPoint::AfterInit.to_string(), "AfterInit");
        assert_eq!(HookPoint::Before(Verb::Get).to_string(), "BeforeGet");
        assert_eq!(HookPoint::After(Verb::Delete).to_string(), "AfterDelete");
        assert_eq!(HookPoint::BeforeOutput.to_string(), "BeforeOutput");
    }

    #[test]
    fn test_all_enumerates_every_point() {
        let points = HookPoint::all();
        // 5 fixed points plus Before/After for each of the 7 verbs.
        assert_eq!(points.len(), 5 + 2 * Verb::ALL.len());
        assert!(points.contains(&HookPoint::Before(Verb::Patch)));
        assert!(points.contains(&HookPoint::AfterOutput));
    }
}
