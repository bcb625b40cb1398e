//! Method/pattern dispatch.
//!
//! # Responsibilities
//! - Keep one ordered route list per registered method
//! - Dispatch a request to the first route whose handler accepts it
//! - Turn unregistered methods into 501 and handler failures into 500
//!
//! # Design Decisions
//! - Registration order is dispatch priority
//! - A handler returning `Ok(false)` passes the same response on to the next route
//! - The router is built up front and shared read-only once serving starts

use std::collections::HashMap;
use std::fmt;

use crate::http::request::{Method, Request};
use crate::http::response::{PLAIN_TEXT, Response};
use crate::routing::matcher::{AlwaysMatch, RouteMatcher};

/// Page served by the landing route of [`Router::with_landing_page`].
pub const LANDING_PAGE: &str = "<html><body><h1>it works!</h1><p>BOX/0.1</p></body></html>";

/// A request handler.
///
/// Returns `Ok(true)` when it produced the response, `Ok(false)` to let the
/// next route have a go. An `Err` becomes a 500 response.
pub trait Handler: Send + Sync {
    fn handle(&self, req: &Request, res: &mut Response) -> anyhow::Result<bool>;
}

impl<F> Handler for F
where
    F: Fn(&Request, &mut Response) -> anyhow::Result<bool> + Send + Sync,
{
    fn handle(&self, req: &Request, res: &mut Response) -> anyhow::Result<bool> {
        self(req, res)
    }
}

fn landing_page(_req: &Request, res: &mut Response) -> anyhow::Result<bool> {
    res.header_mut().set_content_type("text/html");
    res.write(LANDING_PAGE);
    Ok(true)
}

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("method {0} has no route table; add it with Router::add_method first")]
    MethodNotRegistered(Method),
}

struct Route {
    pattern: String,
    handler: Box<dyn Handler>,
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route").field("pattern", &self.pattern).finish()
    }
}

/// Ordered per-method route tables.
#[derive(Debug)]
pub struct Router {
    routes: HashMap<Method, Vec<Route>>,
    matcher: Box<dyn RouteMatcher>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// An empty router with a GET table and the [`AlwaysMatch`] policy.
    pub fn new() -> Self {
        Self::with_matcher(AlwaysMatch)
    }

    /// An empty router with a GET table and a custom matching policy.
    pub fn with_matcher(matcher: impl RouteMatcher + 'static) -> Self {
        let mut routes = HashMap::new();
        routes.insert(Method::GET, Vec::new());

        Self {
            routes,
            matcher: Box::new(matcher),
        }
    }

    /// A router whose only route is `GET /`, serving [`LANDING_PAGE`].
    pub fn with_landing_page() -> Self {
        let mut router = Self::new();
        router.routes.insert(
            Method::GET,
            vec![Route {
                pattern: "/".to_string(),
                handler: Box::new(landing_page),
            }],
        );
        router
    }

    /// Creates an empty route table for `method`. Existing routes are kept.
    pub fn add_method(&mut self, method: Method) {
        self.routes.entry(method).or_default();
    }

    pub fn handles_method(&self, method: Method) -> bool {
        self.routes.contains_key(&method)
    }

    /// Appends a route to the table of `method`.
    ///
    /// Only GET has a table by default; other methods need
    /// [`Router::add_method`] first.
    pub fn add_handle<F>(
        &mut self,
        method: Method,
        pattern: impl Into<String>,
        handler: F,
    ) -> Result<(), RouteError>
    where
        F: Fn(&Request, &mut Response) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        let routes = self
            .routes
            .get_mut(&method)
            .ok_or(RouteError::MethodNotRegistered(method))?;

        routes.push(Route {
            pattern: pattern.into(),
            handler: Box::new(handler),
        });
        Ok(())
    }

    /// Dispatches `req` and returns the response to send.
    pub fn handle(&self, req: &Request) -> Response {
        let Some(routes) = self.routes.get(&req.method) else {
            tracing::debug!(method = %req.method, path = %req.path, "Method not implemented");
            return Response::not_implemented();
        };

        let mut res = Response::new();

        for route in routes {
            if !self.matcher.matches(&route.pattern, &req.path) {
                continue;
            }

            match route.handler.handle(req, &mut res) {
                Ok(true) => return res,
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(
                        pattern = %route.pattern,
                        method = %req.method,
                        path = %req.path,
                        error = %e,
                        "Route handler failed"
                    );

                    let header = res.header_mut();
                    header.set_status_line("500 Internal Server Error");
                    header.set_content_type(PLAIN_TEXT);
                    res.clear_content();
                    res.write("500 Internal Server Error\n");
                    res.write(format!("Route {} threw error: {}\n", route.pattern, e));
                    return res;
                }
            }
        }

        res
    }
}
