//! Lifecycle phases of a single dispatch.

use std::fmt;

/// The strictly ordered phases of the per-request state machine.
///
/// After every phase the pipeline consults the response's output flag; the
/// phase recorded in the dispatch outcome is the last one that completed.
/// `Matched` is the entry state — a dispatch that got as far as running
/// anything always reports at least `Initialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// A rule matched; nothing has run yet.
    Matched,
    /// The controller's `init` entry point ran.
    Initialized,
    /// The `AfterInit` hooks ran.
    AfterInit,
    /// The `Before<verb>` hooks ran.
    BeforeMethod,
    /// The verb entry point ran.
    MethodInvoked,
    /// The `After<verb>` hooks ran.
    AfterMethod,
    /// The `BeforeRender` hooks ran.
    BeforeRender,
    /// The controller's `render` entry point ran.
    Rendered,
    /// The `AfterRender` hooks ran.
    AfterRender,
    /// The `BeforeOutput` hooks ran.
    BeforeOutput,
    /// The controller's `output` entry point ran.
    OutputEmitted,
    /// The `AfterOutput` hooks ran.
    AfterOutput,
    /// The full lifecycle completed without an early claim.
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Matched => "matched",
            Phase::Initialized => "initialized",
            Phase::AfterInit => "after-init",
            Phase::BeforeMethod => "before-method",
            Phase::MethodInvoked => "method-invoked",
            Phase::AfterMethod => "after-method",
            Phase::BeforeRender => "before-render",
            Phase::Rendered => "rendered",
            Phase::AfterRender => "after-render",
            Phase::BeforeOutput => "before-output",
            Phase::OutputEmitted => "output-emitted",
            Phase::AfterOutput => "after-output",
            Phase::Done => "done",
        };
        f.write_str(label)
    }
}
