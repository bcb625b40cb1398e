use box_server::http::request::{Method, Request, RequestBuilder};
use box_server::http::response::{PLAIN_TEXT, Response};
use box_server::routing::router::LANDING_PAGE;
use box_server::routing::{RouteError, RouteMatcher, Router};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn request(method: Method, path: &str) -> Request {
    RequestBuilder::new().method(method).path(path).build().unwrap()
}

#[derive(Debug)]
struct ExactPath;

impl RouteMatcher for ExactPath {
    fn matches(&self, pattern: &str, path: &str) -> bool {
        pattern == path
    }
}

#[test]
fn test_unregistered_method_is_501() {
    let router = Router::new();
    let res = router.handle(&request(Method::PATCH, "/x"));

    assert_eq!(res.header().status(), "501 Not Implemented");
    assert_eq!(res.header().content_type(), Some(PLAIN_TEXT));
    assert_eq!(res.content(), b"501 Not Implemented\n");
}

#[test]
fn test_unknown_method_is_501() {
    let router = Router::with_landing_page();
    let res = router.handle(&request(Method::UNKNOWN, "/"));

    assert_eq!(res.header().status(), "501 Not Implemented");
}

#[test]
fn test_known_method_without_routes_returns_default_response() {
    let router = Router::new();
    let res = router.handle(&request(Method::GET, "/"));

    assert_eq!(res.header().status(), "200 OK");
    assert!(res.content().is_empty());
    assert_eq!(res.header().content_length(), None);
}

#[test]
fn test_add_handle_requires_registered_method() {
    let mut router = Router::new();
    let result = router.add_handle(Method::POST, "/", |_: &Request, _: &mut Response| Ok(true));

    assert!(matches!(result, Err(RouteError::MethodNotRegistered(Method::POST))));
    assert!(!router.handles_method(Method::POST));

    router.add_method(Method::POST);
    router
        .add_handle(Method::POST, "/", |_: &Request, res: &mut Response| {
            res.write("posted");
            Ok(true)
        })
        .unwrap();

    let res = router.handle(&request(Method::POST, "/"));
    assert_eq!(res.content(), b"posted");
}

#[test]
fn test_add_method_keeps_existing_routes() {
    let mut router = Router::with_landing_page();
    router.add_method(Method::GET);

    let res = router.handle(&request(Method::GET, "/"));
    assert_eq!(res.content(), LANDING_PAGE.as_bytes());
}

#[test]
fn test_false_then_true_invokes_both_in_order() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut router = Router::new();

    let first = Arc::clone(&calls);
    router
        .add_handle(Method::GET, "/", move |_: &Request, _: &mut Response| {
            assert_eq!(first.fetch_add(1, Ordering::SeqCst), 0);
            Ok(false)
        })
        .unwrap();

    let second = Arc::clone(&calls);
    router
        .add_handle(Method::GET, "/", move |_: &Request, res: &mut Response| {
            assert_eq!(second.fetch_add(1, Ordering::SeqCst), 1);
            res.write("second");
            Ok(true)
        })
        .unwrap();

    let res = router.handle(&request(Method::GET, "/"));

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(res.content(), b"second");
}

#[test]
fn test_declining_handler_shares_the_response() {
    let mut router = Router::new();
    router
        .add_handle(Method::GET, "/", |_: &Request, res: &mut Response| {
            res.header_mut().set_field("X-First", "seen");
            Ok(false)
        })
        .unwrap();
    router
        .add_handle(Method::GET, "/", |_: &Request, res: &mut Response| {
            res.write("done");
            Ok(true)
        })
        .unwrap();

    let res = router.handle(&request(Method::GET, "/"));
    assert_eq!(res.header().field("X-First"), Some("seen"));
}

#[test]
fn test_first_accepting_handler_wins_regardless_of_pattern() {
    let mut router = Router::new();
    router
        .add_handle(Method::GET, "/users", |_: &Request, res: &mut Response| {
            res.write("users");
            Ok(true)
        })
        .unwrap();
    router
        .add_handle(Method::GET, "/other", |_: &Request, res: &mut Response| {
            res.write("other");
            Ok(true)
        })
        .unwrap();

    let res = router.handle(&request(Method::GET, "/other"));
    assert_eq!(res.content(), b"users");
}

#[test]
fn test_all_declining_returns_default_response() {
    let mut router = Router::new();
    router
        .add_handle(Method::GET, "/", |_: &Request, _: &mut Response| Ok(false))
        .unwrap();

    let res = router.handle(&request(Method::GET, "/"));
    assert_eq!(res.header().status(), "200 OK");
    assert!(res.content().is_empty());
}

#[test]
fn test_failing_handler_yields_500_and_stops() {
    let later = Arc::new(AtomicUsize::new(0));
    let mut router = Router::new();
    router
        .add_handle(Method::GET, "/boom", |_: &Request, res: &mut Response| {
            res.write("partial output");
            anyhow::bail!("database unavailable")
        })
        .unwrap();

    let counter = Arc::clone(&later);
    router
        .add_handle(Method::GET, "/", move |_: &Request, _: &mut Response| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        })
        .unwrap();

    let res = router.handle(&request(Method::GET, "/"));

    assert_eq!(res.header().status(), "500 Internal Server Error");
    assert_eq!(res.header().content_type(), Some("text/plain; encoding=utf-8"));
    assert_eq!(
        res.content(),
        b"500 Internal Server Error\nRoute /boom threw error: database unavailable\n"
    );
    assert_eq!(res.header().content_length(), Some(res.content().len()));
    assert_eq!(later.load(Ordering::SeqCst), 0);
}

#[test]
fn test_unknown_status_in_handler_becomes_500() {
    let mut router = Router::new();
    router
        .add_handle(Method::GET, "/", |_: &Request, res: &mut Response| {
            res.set_status(299)?;
            Ok(true)
        })
        .unwrap();

    let res = router.handle(&request(Method::GET, "/"));
    assert_eq!(res.header().status(), "500 Internal Server Error");
    let body = String::from_utf8(res.content().to_vec()).unwrap();
    assert!(body.contains("unknown HTTP status code 299"));
}

#[test]
fn test_landing_page_route() {
    let router = Router::with_landing_page();
    let res = router.handle(&request(Method::GET, "/anything"));

    assert_eq!(res.header().status(), "200 OK");
    assert_eq!(res.header().content_type(), Some("text/html"));
    assert_eq!(
        res.content(),
        b"<html><body><h1>it works!</h1><p>BOX/0.1</p></body></html>"
    );
}

#[test]
fn test_custom_matcher_filters_routes() {
    let mut router = Router::with_matcher(ExactPath);
    router
        .add_handle(Method::GET, "/a", |_: &Request, res: &mut Response| {
            res.write("a");
            Ok(true)
        })
        .unwrap();
    router
        .add_handle(Method::GET, "/b", |_: &Request, res: &mut Response| {
            res.write("b");
            Ok(true)
        })
        .unwrap();

    assert_eq!(router.handle(&request(Method::GET, "/b")).content(), b"b");
    assert!(router.handle(&request(Method::GET, "/c")).content().is_empty());
}
