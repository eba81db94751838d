//! # Routing Table
//!
//! Maps an incoming request path to a registered rule with a two-tier
//! search: static-file mounts first (read verbs only), then literal rules,
//! then regex rules. Literal rules are checked before regex rules on
//! purpose — string equality is far cheaper than regex evaluation and most
//! traffic hits a small set of exact paths.
//!
//! Registration order is the authoritative match priority within each tier:
//! the first rule that accepts a path wins and scanning stops.
//!
//! The table is built during single-threaded application configuration and
//! is read-only while serving; lookups need no locking.

mod rule;

use gantry_core::{ControllerFactory, Request};
use std::path::PathBuf;
use std::sync::Arc;

pub use rule::{DynamicRule, RouteError, RouteTarget, StaticRule};

/// Ordered collections of compiled rules plus static-file mount points.
#[derive(Default)]
pub struct RoutingTable {
    static_rules: Vec<StaticRule>,
    dynamic_rules: Vec<DynamicRule>,
    static_mounts: Vec<(String, PathBuf)>,
}

/// The result of matching one request against the table.
pub enum RouteOutcome<'a> {
    /// The path sits under a static mount and the verb is `GET`/`HEAD`;
    /// the resolved file should be served directly.
    File(PathBuf),
    /// A rule matched. Extracted parameters, if any, have already been
    /// folded into the request's query pairs.
    Rule(&'a RouteTarget),
    /// Nothing matched.
    NotFound,
}

impl RoutingTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile and register a route pattern for a controller factory.
    ///
    /// Fails on malformed placeholder syntax or an invalid regex fragment;
    /// a failed registration leaves the table unchanged.
    pub fn add_rule(
        &mut self,
        pattern: &str,
        factory: Arc<dyn ControllerFactory>,
    ) -> Result<(), RouteError> {
        match rule::compile(pattern, RouteTarget::new(factory))? {
            rule::CompiledRule::Static(r) => self.static_rules.push(r),
            rule::CompiledRule::Dynamic(r) => self.dynamic_rules.push(r),
        }
        Ok(())
    }

    /// Mount a filesystem directory under a URL prefix. The first
    /// registered prefix that matches a path wins.
    pub fn set_static_path(&mut self, url_prefix: impl Into<String>, fs_path: impl Into<PathBuf>) {
        self.static_mounts.push((url_prefix.into(), fs_path.into()));
    }

    /// Number of registered static rules.
    pub fn static_rule_count(&self) -> usize {
        self.static_rules.len()
    }

    /// Number of registered dynamic rules.
    pub fn dynamic_rule_count(&self) -> usize {
        self.dynamic_rules.len()
    }

    /// Match a request against the table.
    ///
    /// On a dynamic match the captured values are appended to the request's
    /// query pairs under their declared parameter names, in capture order.
    pub fn route(&self, request: &mut Request) -> RouteOutcome<'_> {
        let path = request.path().to_string();

        // Mounts bypass the rule tables entirely, for read verbs only.
        if matches!(request.method(), "GET" | "HEAD") {
            for (prefix, dir) in &self.static_mounts {
                if let Some(rest) = path.strip_prefix(prefix.as_str()) {
                    return RouteOutcome::File(dir.join(rest.trim_start_matches('/')));
                }
            }
        }

        for rule in &self.static_rules {
            if rule.matches(&path) {
                return RouteOutcome::Rule(&rule.target);
            }
        }

        for rule in &self.dynamic_rules {
            let Some(caps) = rule.matcher.captures(&path) else {
                continue;
            };
            // A matcher whose capture count disagrees with its parameter
            // list rejects the candidate; scanning continues.
            if caps.len() - 1 != rule.params.len() {
                continue;
            }
            for (name, group) in rule.params.iter().zip(caps.iter().skip(1)) {
                let value = group.map(|m| m.as_str()).unwrap_or("");
                request.append_query(name.clone(), value);
            }
            return RouteOutcome::Rule(&rule.target);
        }

        RouteOutcome::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_core::{Constructor, Controller, FnFactory};

    #[derive(Default)]
    struct AController;
    impl Controller for AController {}

    #[derive(Default)]
    struct BController;
    impl Controller for BController {}

    fn table() -> RoutingTable {
        RoutingTable::new()
    }

    fn add<C: Controller + Default + 'static>(table: &mut RoutingTable, pattern: &str) {
        table
            .add_rule(pattern, Arc::new(Constructor::<C>::new()))
            .unwrap();
    }

    fn matched_name<'a>(table: &'a RoutingTable, request: &mut Request) -> Option<&'a str> {
        match table.route(request) {
            RouteOutcome::Rule(target) => Some(target.name()),
            _ => None,
        }
    }

    #[test]
    fn test_static_match_tolerates_one_trailing_slash() {
        let mut table = table();
        add::<AController>(&mut table, "/about");

        let mut req = Request::new("GET", "/about");
        assert_eq!(matched_name(&table, &mut req), Some("AController"));

        let mut req = Request::new("GET", "/about/");
        assert_eq!(matched_name(&table, &mut req), Some("AController"));

        let mut req = Request::new("GET", "/about//");
        assert_eq!(matched_name(&table, &mut req), None);
    }

    #[test]
    fn test_static_rule_wins_over_dynamic() {
        let mut table = table();
        add::<AController>(&mut table, "/user/:id([\\w]+)");
        add::<BController>(&mut table, "/user/me");

        let mut req = Request::new("GET", "/user/me");
        assert_eq!(matched_name(&table, &mut req), Some("BController"));
        // The dynamic rule never ran, so nothing was injected.
        assert_eq!(req.query("id"), None);
    }

    #[test]
    fn test_first_registered_dynamic_rule_wins() {
        let mut table = table();
        add::<AController>(&mut table, "/p/:x([a-z]+)");
        add::<BController>(&mut table, "/p/:y([a-z]+)");

        let mut req = Request::new("GET", "/p/abc");
        assert_eq!(matched_name(&table, &mut req), Some("AController"));
        assert_eq!(req.query("x"), Some("abc"));
        assert_eq!(req.query("y"), None);
    }

    #[test]
    fn test_dynamic_match_injects_params_in_capture_order() {
        let mut table = table();
        add::<AController>(&mut table, "/blog/:year([0-9]{4})/:slug([\\w-]+)");

        let mut req = Request::new("GET", "/blog/2024/hello-world");
        assert_eq!(matched_name(&table, &mut req), Some("AController"));
        assert_eq!(req.query("year"), Some("2024"));
        assert_eq!(req.query("slug"), Some("hello-world"));
    }

    #[test]
    fn test_dynamic_rule_rejects_non_matching_path() {
        let mut table = table();
        add::<AController>(&mut table, "/user/:id([0-9]+)");

        let mut req = Request::new("GET", "/user/abc");
        assert!(matches!(table.route(&mut req), RouteOutcome::NotFound));
    }

    #[test]
    fn test_capture_count_mismatch_skips_to_later_rules() {
        let mut table = table();
        // The placeholder's own fragment nests a second capture group, so
        // the matcher captures two values for one declared parameter.
        add::<AController>(&mut table, "/v/:tag((x|y)z)");
        add::<BController>(&mut table, "/v/:tag([a-z]+)");

        let mut req = Request::new("GET", "/v/xz");
        assert_eq!(matched_name(&table, &mut req), Some("BController"));
        assert_eq!(req.query("tag"), Some("xz"));
    }

    #[test]
    fn test_mounts_only_serve_read_verbs() {
        let mut table = table();
        table.set_static_path("/assets", "/var/www/assets");

        let mut req = Request::new("GET", "/assets/css/app.css");
        match table.route(&mut req) {
            RouteOutcome::File(path) => {
                assert_eq!(path, PathBuf::from("/var/www/assets/css/app.css"));
            }
            _ => panic!("expected a file outcome"),
        }

        let mut req = Request::new("POST", "/assets/css/app.css");
        assert!(matches!(table.route(&mut req), RouteOutcome::NotFound));
    }

    #[test]
    fn test_mount_takes_priority_over_rules() {
        let mut table = table();
        table.set_static_path("/assets", "/var/www/assets");
        add::<AController>(&mut table, "/assets/app.css");

        let mut req = Request::new("GET", "/assets/app.css");
        assert!(matches!(table.route(&mut req), RouteOutcome::File(_)));
    }

    #[test]
    fn test_failed_registration_leaves_table_unchanged() {
        let mut table = table();
        add::<AController>(&mut table, "/ok");
        assert!(
            table
                .add_rule("/bad/:id", Arc::new(Constructor::<AController>::new()))
                .is_err()
        );
        assert_eq!(table.static_rule_count(), 1);
        assert_eq!(table.dynamic_rule_count(), 0);
    }

    #[test]
    fn test_closure_factories_register_too() {
        let mut table = table();
        table
            .add_rule(
                "/custom",
                Arc::new(FnFactory::new("Custom", AController::default)),
            )
            .unwrap();
        let mut req = Request::new("GET", "/custom");
        assert_eq!(matched_name(&table, &mut req), Some("Custom"));
    }
}
