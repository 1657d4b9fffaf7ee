use crate::request::Request;
use crate::response::Response;

/// A handler turns a parsed request into a complete response. An `Err`
/// is answered with a 500 at the connection boundary.
pub type Handler = fn(&Request) -> anyhow::Result<Response>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchKind {
    /// The path must equal the route key.
    Exact,
    /// The path must start with the route key.
    Prefix,
}

struct Route {
    key: &'static str,
    kind: MatchKind,
    handler: Handler,
}

/// The route table. Built once before the accept loop starts and read-only
/// afterwards, so connection tasks can share it without locking.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Default::default()
    }

    /// Registers a handler under a route key. Registering the same key
    /// twice is a configuration error and panics; routes are wired once at
    /// startup, never at runtime.
    pub fn route(mut self, key: &'static str, kind: MatchKind, handler: Handler) -> Self {
        if self.routes.iter().any(|r| r.key == key) {
            panic!("handler for {key} already registered");
        }
        self.routes.push(Route { key, kind, handler });
        self
    }

    /// Maps a request path to the key of the route that will serve it.
    /// Exact matches win over prefix matches; `None` means no route.
    pub fn resolve(&self, path: &str) -> Option<&str> {
        self.find(path).map(|r| r.key)
    }

    /// Resolves the path and runs the matched handler. `None` is terminal:
    /// no route matched and no handler was invoked.
    pub fn dispatch(&self, req: &Request) -> Option<anyhow::Result<Response>> {
        let route = self.find(req.path())?;
        Some((route.handler)(req))
    }

    fn find(&self, path: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|r| r.kind == MatchKind::Exact && r.key == path)
            .or_else(|| {
                self.routes
                    .iter()
                    .find(|r| r.kind == MatchKind::Prefix && path.starts_with(r.key))
            })
    }
}
