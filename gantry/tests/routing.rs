//! Routing behavior through the full application surface: tier priority,
//! parameter injection, static mounts, and session round-trips.

use gantry::{App, BoxError, Bundle, Controller, Request, async_trait};

#[derive(Default)]
struct TagController;

#[async_trait]
impl Controller for TagController {
    async fn get(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        let id = bundle.context.query("id").unwrap_or("none").to_string();
        bundle.write(format!("tag:{id}"));
        Ok(())
    }
}

#[derive(Default)]
struct FixedController;

#[async_trait]
impl Controller for FixedController {
    async fn get(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        bundle.write("fixed");
        Ok(())
    }
}

#[tokio::test]
async fn test_dynamic_match_injects_into_query() {
    let mut app = App::new();
    app.route::<TagController>("/user/:id([0-9]+)").unwrap();

    let response = app.handle(Request::new("GET", "/user/42")).await;
    assert_eq!(response.body(), b"tag:42");

    let response = app.handle(Request::new("GET", "/user/abc")).await;
    assert_eq!(response.status(), Some(404));
}

#[tokio::test]
async fn test_static_rule_beats_dynamic_for_same_path() {
    let mut app = App::new();
    app.route::<TagController>("/user/:id([\\w]+)").unwrap();
    app.route::<FixedController>("/user/me").unwrap();

    let response = app.handle(Request::new("GET", "/user/me")).await;
    assert_eq!(response.body(), b"fixed");
}

#[tokio::test]
async fn test_trailing_slash_still_hits_static_rule() {
    let mut app = App::new();
    app.route::<FixedController>("/about").unwrap();

    let response = app.handle(Request::new("GET", "/about/")).await;
    assert_eq!(response.body(), b"fixed");
}

#[tokio::test]
async fn test_injected_param_coexists_with_real_query() {
    let mut app = App::new();
    app.route::<TagController>("/user/:id([0-9]+)").unwrap();

    let response = app.handle(Request::new("GET", "/user/7?page=2")).await;
    assert_eq!(response.body(), b"tag:7");
}

#[tokio::test]
async fn test_static_mount_serves_files_on_get_only() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log(1)").unwrap();

    let mut app = App::new();
    app.static_path("/assets", dir.path());

    let response = app.handle(Request::new("GET", "/assets/app.js")).await;
    assert_eq!(response.status_or_default(), 200);
    assert_eq!(response.header("Content-Type"), Some("application/javascript"));
    assert_eq!(response.body(), b"console.log(1)");

    // The mount is invisible to writes; with no rules, that's a 404.
    let response = app.handle(Request::new("POST", "/assets/app.js")).await;
    assert_eq!(response.status(), Some(404));
}

#[tokio::test]
async fn test_mount_traversal_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let public = dir.path().join("public");
    std::fs::create_dir(&public).unwrap();
    std::fs::write(dir.path().join("secret.txt"), "top secret").unwrap();

    let mut app = App::new();
    app.static_path("/files", &public);

    let response = app
        .handle(Request::new("GET", "/files/../secret.txt"))
        .await;
    assert_eq!(response.status(), Some(404));
}

#[derive(Default)]
struct VisitController;

#[async_trait]
impl Controller for VisitController {
    async fn get(&mut self, bundle: &mut Bundle) -> Result<(), BoxError> {
        match bundle.session.get("user") {
            Some(user) => {
                let body = format!("welcome back, {user}");
                bundle.write(body);
            }
            None => bundle.session.set("user", "alice"),
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_session_round_trip_through_cookie() {
    let mut app = App::new();
    app.route::<VisitController>("/visit").unwrap();

    // First visit: nothing written, but the session write sets a cookie.
    let response = app.handle(Request::new("GET", "/visit")).await;
    let set_cookie = response.header("Set-Cookie").expect("session cookie").to_string();
    let id = set_cookie
        .strip_prefix("gantry_session=")
        .and_then(|rest| rest.split(';').next())
        .expect("cookie value");

    // Second visit presents the cookie and reads the session back.
    let request = Request::new("GET", "/visit")
        .with_header("Cookie", format!("gantry_session={id}"));
    let response = app.handle(request).await;
    assert_eq!(response.body(), b"welcome back, alice");
}
