use gantry::{App, BoxError, Bundle, Controller, FnFactory, async_trait, hook_fn};
use std::sync::{Arc, Mutex};

// ============================================================================
// Shared sequence log
// ============================================================================

/// One log shared by a controller and the lifecycle observer, so tests can
/// assert the exact interleaving of entry points and hook points.
pub type SeqLog = Arc<Mutex<Vec<String>>>;

pub fn new_seq_log() -> SeqLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(log: &SeqLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Register an observer that appends every hook point label to `log`.
pub fn observe_labels(app: &mut App, log: &SeqLog) {
    let log = log.clone();
    app.observe(hook_fn(move |point, _path, _bundle| {
        log.lock().unwrap().push(point.to_string());
    }));
}

// ============================================================================
// Sequence-recording controller
// ============================================================================

/// Records its entry points into the shared log. `get` also records the
/// injected `slug` parameter; `render` and `output` record without
/// producing any output, so a quiet lifecycle runs to completion.
pub struct SeqController {
    log: SeqLog,
}

#[async_trait]
impl Controller for SeqController {
    async fn init(&mut self, _bundle: &mut Bundle, _name: &str) -> Result<(), BoxError> {
        self.log.lock().unwrap().push("Init".to_string());
        Ok(())
    }

    async fn get(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        let slug = bundle.context.query("slug").unwrap_or("").to_string();
        self.log.lock().unwrap().push(format!("Get[slug={slug}]"));
        Ok(())
    }

    async fn render(&mut self, _bundle: &mut Bundle) -> Result<(), BoxError> {
        self.log.lock().unwrap().push("Render".to_string());
        Ok(())
    }

    async fn output(&mut self, _bundle: &mut Bundle) -> Result<(), BoxError> {
        self.log.lock().unwrap().push("Output".to_string());
        Ok(())
    }
}

/// Register a `SeqController` route feeding the shared log.
pub fn route_seq(app: &mut App, pattern: &str, log: &SeqLog) {
    let log = log.clone();
    app.route_factory(
        pattern,
        Arc::new(FnFactory::new("PostController", move || SeqController {
            log: log.clone(),
        })),
    )
    .unwrap();
}
