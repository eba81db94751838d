//! Per-request template state.
//!
//! The template value is a blank slate handed to the controller at
//! initialization: a variable map, an optional source text, and the rendered
//! result. Rendering is plain `{{name}}` substitution — enough for the
//! default lifecycle to be useful without pulling in a template engine.
//! Applications with richer needs render through their own engine and store
//! the result here, so the output phase picks it up unchanged.

use std::collections::HashMap;

/// Mutable template state for a single request.
#[derive(Debug, Default)]
pub struct Template {
    source: Option<String>,
    vars: HashMap<String, String>,
    result: Option<String>,
}

impl Template {
    /// Create a blank template state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source text to render.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = Some(source.into());
    }

    /// Bind a variable for substitution.
    pub fn set_var(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Read back a bound variable.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Render the source by substituting every `{{name}}` occurrence with
    /// the bound variable value, storing the result. A template without a
    /// source renders nothing.
    pub fn render(&mut self) {
        let Some(source) = &self.source else {
            return;
        };
        let mut rendered = source.clone();
        for (name, value) in &self.vars {
            rendered = rendered.replace(&format!("{{{{{name}}}}}"), value);
        }
        self.result = Some(rendered);
    }

    /// Store an externally produced rendering result.
    pub fn set_result(&mut self, result: impl Into<String>) {
        self.result = Some(result.into());
    }

    /// The rendered result, if rendering has happened.
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Take the rendered result, leaving the template empty-handed.
    pub fn take_result(&mut self) -> Option<String> {
        self.result.take()
    }
}
