//! # Dispatch Pipeline
//!
//! The per-request state machine. Given a matched rule, the dispatcher
//! instantiates a fresh controller, assembles the collaborator bundle
//! (request/response context, blank template state, session opened from the
//! configured cookie), and walks the lifecycle:
//!
//! init → AfterInit hooks → verb resolution → Before hooks → verb entry
//! point → After hooks → BeforeRender hooks → render → AfterRender hooks →
//! BeforeOutput hooks → output → AfterOutput hooks → done.
//!
//! # Short-circuit rule
//!
//! After every controller entry point and every hook invocation the
//! pipeline consults the response's output flag. Any written body byte or
//! explicitly set status code halts the lifecycle unconditionally — later
//! phases, including their hooks, never run. Any participant may claim the
//! response this way; the dispatch outcome records the phase that did.
//!
//! # Verb resolution
//!
//! A request method outside the recognized set is answered with 405 right
//! after the AfterInit hooks. The typed hook points make Before/After hooks
//! for an unrecognized verb unrepresentable, so none fire.

use crate::hooks::HookRegistry;
use crate::router::RouteTarget;
use gantry_core::{
    BoxError, Bundle, Context, Controller, DispatchError, HookPoint, Phase, Request, Response,
    Session, SessionStore, Template, Verb,
};
use std::sync::Arc;

/// What one dispatch produced: the response and the last completed phase.
#[derive(Debug)]
pub struct DispatchOutcome {
    /// The last lifecycle phase that completed before the pipeline stopped.
    pub phase: Phase,
    /// The response to send.
    pub response: Response,
}

/// Drives matched requests through the controller lifecycle.
///
/// One dispatcher exists per application. It owns the hook registry and a
/// shared session store; per-request state lives entirely in the bundle it
/// builds for each call.
pub struct Dispatcher {
    hooks: HookRegistry,
    store: Arc<dyn SessionStore>,
    session_cookie: String,
}

impl Dispatcher {
    /// Create a dispatcher over a session store, reading session ids from
    /// the cookie named `session_cookie`.
    pub fn new(store: Arc<dyn SessionStore>, session_cookie: impl Into<String>) -> Self {
        Self {
            hooks: HookRegistry::new(),
            store,
            session_cookie: session_cookie.into(),
        }
    }

    /// The hook registry.
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Mutable access to the hook registry, for configuration.
    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    /// Run one matched request through the full lifecycle.
    ///
    /// Returns `Err` only when a controller entry point or hook fails;
    /// early termination through written output is the normal path and is
    /// reported through the outcome's phase.
    pub async fn dispatch(
        &self,
        target: &RouteTarget,
        mut request: Request,
    ) -> Result<DispatchOutcome, DispatchError> {
        request.parse_form_body();

        let path = request.path().to_string();
        let session_id = request.cookie(&self.session_cookie).map(str::to_string);
        let session = Session::open(self.store.as_ref(), session_id);
        let mut bundle = Bundle::new(Context::new(request), Template::new(), session);

        let mut controller = target.controller();
        let name = target.name();
        tracing::debug!(controller = name, path = %path, "dispatching");

        let phase = self
            .run(controller.as_mut(), name, &path, &mut bundle)
            .await?;

        // A written session persists no matter where the lifecycle stopped.
        if bundle.session.is_dirty() {
            if let Some(id) = bundle.session.persist(self.store.as_ref()) {
                let cookie = format!("{}={id}; Path=/; HttpOnly; SameSite=Lax", self.session_cookie);
                bundle.context.response.set_header("Set-Cookie", cookie);
            }
        }

        Ok(DispatchOutcome {
            phase,
            response: bundle.context.response,
        })
    }

    async fn run(
        &self,
        controller: &mut dyn Controller,
        name: &str,
        path: &str,
        bundle: &mut Bundle,
    ) -> Result<Phase, DispatchError> {
        let fail = |phase: Phase, source: BoxError| DispatchError::Controller {
            name: name.to_string(),
            phase,
            source,
        };

        controller
            .init(bundle, name)
            .await
            .map_err(|e| fail(Phase::Initialized, e))?;
        if bundle.has_output() {
            return Ok(Phase::Initialized);
        }

        self.hooks.call(HookPoint::AfterInit, path, bundle).await?;
        if bundle.has_output() {
            return Ok(Phase::AfterInit);
        }

        let Some(verb) = Verb::parse(bundle.context.request.method()) else {
            bundle.context.response.method_not_allowed();
            return Ok(Phase::AfterInit);
        };

        self.hooks.call(HookPoint::Before(verb), path, bundle).await?;
        if bundle.has_output() {
            return Ok(Phase::BeforeMethod);
        }

        invoke(controller, verb, bundle)
            .await
            .map_err(|e| fail(Phase::MethodInvoked, e))?;
        if bundle.has_output() {
            return Ok(Phase::MethodInvoked);
        }

        self.hooks.call(HookPoint::After(verb), path, bundle).await?;
        if bundle.has_output() {
            return Ok(Phase::AfterMethod);
        }

        self.hooks.call(HookPoint::BeforeRender, path, bundle).await?;
        if bundle.has_output() {
            return Ok(Phase::BeforeRender);
        }

        controller
            .render(bundle)
            .await
            .map_err(|e| fail(Phase::Rendered, e))?;
        if bundle.has_output() {
            return Ok(Phase::Rendered);
        }

        self.hooks.call(HookPoint::AfterRender, path, bundle).await?;
        if bundle.has_output() {
            return Ok(Phase::AfterRender);
        }

        self.hooks.call(HookPoint::BeforeOutput, path, bundle).await?;
        if bundle.has_output() {
            return Ok(Phase::BeforeOutput);
        }

        controller
            .output(bundle)
            .await
            .map_err(|e| fail(Phase::OutputEmitted, e))?;
        if bundle.has_output() {
            return Ok(Phase::OutputEmitted);
        }

        self.hooks.call(HookPoint::AfterOutput, path, bundle).await?;
        if bundle.has_output() {
            return Ok(Phase::AfterOutput);
        }

        Ok(Phase::Done)
    }
}

/// Invoke the controller entry point resolved for `verb`.
async fn invoke(
    controller: &mut dyn Controller,
    verb: Verb,
    bundle: &mut Bundle,
) -> Result<(), BoxError> {
    match verb {
        Verb::Get => controller.get(bundle).await,
        Verb::Post => controller.post(bundle).await,
        Verb::Head => controller.head(bundle).await,
        Verb::Delete => controller.delete(bundle).await,
        Verb::Put => controller.put(bundle).await,
        Verb::Patch => controller.patch(bundle).await,
        Verb::Options => controller.options(bundle).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_store::MemoryStore;
    use crate::testing::ProbeFactory;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(MemoryStore::new()), "gantry_session")
    }

    #[tokio::test]
    async fn test_quiet_lifecycle_runs_to_done() {
        let factory = ProbeFactory::new();
        let target = RouteTarget::new(Arc::new(factory.clone()));

        let outcome = dispatcher()
            .dispatch(&target, Request::new("GET", "/probe"))
            .await
            .unwrap();

        assert_eq!(outcome.phase, Phase::Done);
        assert_eq!(factory.log(), ["Init", "Get", "Render", "Output"]);
        assert!(!outcome.response.has_output());
    }

    #[tokio::test]
    async fn test_unrecognized_verb_answers_405() {
        let factory = ProbeFactory::new();
        let target = RouteTarget::new(Arc::new(factory.clone()));

        let outcome = dispatcher()
            .dispatch(&target, Request::new("TRACE", "/probe"))
            .await
            .unwrap();

        assert_eq!(outcome.response.status(), Some(405));
        // init ran, but no verb entry point did.
        assert_eq!(factory.log(), ["Init"]);
    }

    #[tokio::test]
    async fn test_output_during_init_stops_everything() {
        let factory = ProbeFactory::writing_at("Init");
        let target = RouteTarget::new(Arc::new(factory.clone()));

        let outcome = dispatcher()
            .dispatch(&target, Request::new("GET", "/probe"))
            .await
            .unwrap();

        assert_eq!(outcome.phase, Phase::Initialized);
        assert_eq!(factory.log(), ["Init"]);
    }

    #[tokio::test]
    async fn test_written_session_sets_cookie() {
        let factory = ProbeFactory::with_session_write("user", "alice");
        let target = RouteTarget::new(Arc::new(factory.clone()));

        let outcome = dispatcher()
            .dispatch(&target, Request::new("GET", "/probe"))
            .await
            .unwrap();

        let cookie = outcome.response.header("Set-Cookie").unwrap();
        assert!(cookie.starts_with("gantry_session="));
    }
}
