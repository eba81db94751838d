//! Route rule compilation.
//!
//! A registration pattern is either a literal path (no `:` markers) or a
//! template with one or more `:name(regex)` placeholders. Literal patterns
//! become static rules matched by string comparison and never touch the
//! regex engine. Placeholder patterns are rewritten into anchored regular
//! expressions whose capture groups line up, in order, with the recorded
//! parameter names.

use gantry_core::{Controller, ControllerFactory};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use thiserror::Error;

/// Recognizes one `:name(regex)` placeholder: the parameter name and the
/// parenthesized fragment that replaces the whole token.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(\w+)(\(.*?\))").expect("placeholder pattern is valid"));

/// A failed route registration. These surface at configuration time; a
/// pattern that registers successfully cannot fail at request time.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A `:` marker was not followed by a `name(regex)` clause.
    #[error("malformed route pattern `{pattern}`: every `:` must introduce a `:name(regex)` placeholder")]
    MalformedPattern {
        /// The offending registration pattern.
        pattern: String,
    },

    /// The rewritten pattern is not a valid regular expression.
    #[error("route pattern `{pattern}` does not compile: {source}")]
    InvalidRegex {
        /// The offending registration pattern.
        pattern: String,
        /// The regex compilation failure.
        #[source]
        source: regex::Error,
    },
}

/// The controller constructor a matched rule hands to the dispatch
/// pipeline, plus the controller's logical name.
pub struct RouteTarget {
    factory: Arc<dyn ControllerFactory>,
}

impl RouteTarget {
    /// Wrap a controller factory.
    pub fn new(factory: Arc<dyn ControllerFactory>) -> Self {
        Self { factory }
    }

    /// The controller's logical name.
    pub fn name(&self) -> &str {
        self.factory.name()
    }

    /// Instantiate a fresh controller for one request.
    pub fn controller(&self) -> Box<dyn Controller> {
        self.factory.build()
    }
}

/// A rule matched by literal comparison, tolerating one trailing slash.
pub struct StaticRule {
    pub(crate) pattern: String,
    pub(crate) target: RouteTarget,
}

impl StaticRule {
    /// Whether `path` matches this rule exactly, or after trimming exactly
    /// one trailing `/`.
    pub fn matches(&self, path: &str) -> bool {
        if path == self.pattern {
            return true;
        }
        match path.strip_suffix('/') {
            Some(trimmed) => trimmed == self.pattern,
            None => false,
        }
    }
}

/// A rule matched by an anchored regular expression with one capture group
/// per parameter name.
pub struct DynamicRule {
    pub(crate) matcher: Regex,
    pub(crate) params: Vec<String>,
    pub(crate) target: RouteTarget,
}

impl DynamicRule {
    /// The ordered parameter names, parallel to the matcher's capture
    /// groups.
    pub fn param_names(&self) -> &[String] {
        &self.params
    }
}

/// The result of compiling one registration pattern.
pub(crate) enum CompiledRule {
    Static(StaticRule),
    Dynamic(DynamicRule),
}

impl std::fmt::Debug for CompiledRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompiledRule::Static(rule) => {
                f.debug_tuple("Static").field(&rule.pattern).finish()
            }
            CompiledRule::Dynamic(rule) => f
                .debug_tuple("Dynamic")
                .field(&rule.matcher.as_str())
                .field(&rule.params)
                .finish(),
        }
    }
}

/// Compile a registration pattern.
///
/// Hazard: a placeholder is replaced by its first textual occurrence in the
/// pattern. A literal `(` elsewhere in the pattern that happens to spell
/// the same text as a placeholder token will be rewritten instead of it.
/// Patterns like that are degenerate and left to the registrant.
pub(crate) fn compile(pattern: &str, target: RouteTarget) -> Result<CompiledRule, RouteError> {
    let marker_count = pattern.matches(':').count();
    if marker_count == 0 {
        return Ok(CompiledRule::Static(StaticRule {
            pattern: pattern.to_string(),
            target,
        }));
    }

    let placeholders: Vec<_> = PLACEHOLDER.captures_iter(pattern).collect();
    if placeholders.len() != marker_count {
        return Err(RouteError::MalformedPattern {
            pattern: pattern.to_string(),
        });
    }

    let mut rewritten = pattern.to_string();
    let mut params = Vec::with_capacity(placeholders.len());
    for caps in &placeholders {
        let token = &caps[0];
        params.push(caps[1].to_string());
        rewritten = rewritten.replacen(token, &caps[2], 1);
    }

    let anchored = format!("^{rewritten}");
    let matcher = Regex::new(&anchored).map_err(|source| RouteError::InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })?;

    Ok(CompiledRule::Dynamic(DynamicRule {
        matcher,
        params,
        target,
    }))
}
