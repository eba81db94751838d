//! The collaborator bundle handed to controllers and hooks.

use crate::context::Context;
use crate::session::Session;
use crate::template::Template;

/// Everything a lifecycle participant may touch: the request/response
/// context, the template state, and the session handle.
///
/// One bundle exists per request; the pipeline passes it by mutable
/// reference through every phase.
#[derive(Debug)]
pub struct Bundle {
    /// The request/response pair.
    pub context: Context,
    /// The per-request template state.
    pub template: Template,
    /// The per-request session handle.
    pub session: Session,
}

impl Bundle {
    /// Assemble a bundle from its three collaborators.
    pub fn new(context: Context, template: Template, session: Session) -> Self {
        Self {
            context,
            template,
            session,
        }
    }

    /// Whether the response has had output recorded.
    pub const fn has_output(&self) -> bool {
        self.context.response.has_output()
    }

    /// Append bytes to the response body.
    pub fn write(&mut self, bytes: impl AsRef<[u8]>) {
        self.context.response.write(bytes.as_ref());
    }
}
