//! Error types shared across the framework.

use crate::hook::HookPoint;
use crate::lifecycle::Phase;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failure inside the dispatch pipeline.
///
/// These are application failures escaping a controller entry point or a
/// hook — never routing misses (those are 404/405 responses) and never the
/// output-claimed short-circuit (that is the designed termination signal).
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A controller entry point returned an error.
    #[error("controller `{name}` failed in phase {phase}: {source}")]
    Controller {
        /// The controller's logical name.
        name: String,
        /// The phase whose entry point failed.
        phase: Phase,
        /// The underlying failure.
        #[source]
        source: BoxError,
    },

    /// A hook returned an error.
    #[error("hook failed at {point}: {source}")]
    Hook {
        /// The point the failing hook fired at.
        point: HookPoint,
        /// The underlying failure.
        #[source]
        source: BoxError,
    },
}
