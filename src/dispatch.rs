use http::header::{HeaderName, HeaderValue, ALLOW};
use http::{Method, Request, StatusCode};
use std::collections::HashMap;
use std::fmt;

/// The subset of a response a dispatcher is allowed to touch.
///
/// The dispatcher itself only sets headers and the status code; `write_body`
/// exists for handlers. Implemented for `http::Response<Vec<u8>>`, which also
/// serves as a test recorder; a transport integration implements this for its
/// own response type.
pub trait ResponseWriter {
    /// Sets a response header, replacing any previous value.
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Sets the response status code.
    fn set_status(&mut self, status: StatusCode);

    /// Appends bytes to the response body.
    fn write_body(&mut self, bytes: &[u8]);
}

impl ResponseWriter for http::Response<Vec<u8>> {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers_mut().insert(name, value);
    }

    fn set_status(&mut self, status: StatusCode) {
        *self.status_mut() = status;
    }

    fn write_body(&mut self, bytes: &[u8]) {
        self.body_mut().extend_from_slice(bytes);
    }
}

/// Trait implemented by anything that can respond to a request.
///
/// Implemented for plain functions and closures taking the request and a
/// [`ResponseWriter`], so those can be registered directly.
pub trait Handler<B> {
    /// Responds to the request by writing to `rw`.
    fn handle(&self, req: Request<B>, rw: &mut dyn ResponseWriter);
}

impl<B, F> Handler<B> for F
where
    F: Fn(Request<B>, &mut dyn ResponseWriter),
{
    fn handle(&self, req: Request<B>, rw: &mut dyn ResponseWriter) {
        (self)(req, rw)
    }
}

type BoxedHandler<B> = Box<dyn Handler<B> + Send + Sync>;

/// Dispatches requests to different handlers based on the incoming request's
/// HTTP method.
///
/// If no handler is registered for the request method, the dispatcher replies
/// with an `Allow` header listing the registered methods and, unless the
/// request is an `OPTIONS` request, a `405 Method Not Allowed` status.
/// Automatic `OPTIONS` replies can be overridden by registering a handler for
/// `OPTIONS`, which participates in lookup like any other method.
///
/// Registered methods are assumed to be upper-case; request methods are
/// normalized to upper case before lookup.
///
/// ```rust
/// use globmux::MethodRouter;
/// use http::{Request, Response, StatusCode};
///
/// let mut router = MethodRouter::new();
/// router.get(|_req: Request<()>, rw: &mut dyn globmux::ResponseWriter| {
///     rw.write_body(b"Hello, World!");
/// });
///
/// let mut res = Response::new(Vec::new());
/// router.call(Request::new(()), &mut res);
/// assert_eq!(res.status(), StatusCode::OK);
/// assert_eq!(res.body(), b"Hello, World!");
/// ```
pub struct MethodRouter<B = ()> {
    handlers: HashMap<Method, BoxedHandler<B>>,
}

impl<B> MethodRouter<B> {
    /// Returns a dispatcher with no handlers registered.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers a handler for the given method, replacing any previous
    /// handler for that method.
    pub fn insert(&mut self, method: Method, handler: impl Handler<B> + Send + Sync + 'static) {
        self.handlers.insert(method, Box::new(handler));
    }

    /// Registers a handler for GET requests.
    pub fn get(&mut self, handler: impl Handler<B> + Send + Sync + 'static) {
        self.insert(Method::GET, handler);
    }

    /// Registers a handler for HEAD requests.
    pub fn head(&mut self, handler: impl Handler<B> + Send + Sync + 'static) {
        self.insert(Method::HEAD, handler);
    }

    /// Registers a handler for OPTIONS requests, overriding automatic
    /// `OPTIONS` replies.
    pub fn options(&mut self, handler: impl Handler<B> + Send + Sync + 'static) {
        self.insert(Method::OPTIONS, handler);
    }

    /// Registers a handler for POST requests.
    pub fn post(&mut self, handler: impl Handler<B> + Send + Sync + 'static) {
        self.insert(Method::POST, handler);
    }

    /// Registers a handler for PUT requests.
    pub fn put(&mut self, handler: impl Handler<B> + Send + Sync + 'static) {
        self.insert(Method::PUT, handler);
    }

    /// Registers a handler for PATCH requests.
    pub fn patch(&mut self, handler: impl Handler<B> + Send + Sync + 'static) {
        self.insert(Method::PATCH, handler);
    }

    /// Registers a handler for DELETE requests.
    pub fn delete(&mut self, handler: impl Handler<B> + Send + Sync + 'static) {
        self.insert(Method::DELETE, handler);
    }

    /// Dispatches the request to the handler registered for its method.
    ///
    /// If no handler is registered, sets the `Allow` header to the sorted
    /// list of registered methods (always including `OPTIONS`) and, if the
    /// request is not an `OPTIONS` request, a `405 Method Not Allowed`
    /// status.
    pub fn call(&self, req: Request<B>, rw: &mut dyn ResponseWriter) {
        let method = normalize(req.method());

        if let Some(handler) = self.handlers.get(&method) {
            handler.handle(req, rw);
            return;
        }

        let allow = allow_header(self.handlers.keys());
        debug!("no handler for {} request, replying with Allow: {}", method, allow);

        // method names are valid header characters
        rw.set_header(ALLOW, HeaderValue::from_str(&allow).unwrap());
        if method != Method::OPTIONS {
            rw.set_status(StatusCode::METHOD_NOT_ALLOWED);
        }
    }
}

impl<B> Default for MethodRouter<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> fmt::Debug for MethodRouter<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

/// Replies to requests whose method is not in `allowed`, reporting whether a
/// reply was written.
///
/// Returns `false` without touching `rw` if the request method (normalized to
/// upper case) is in `allowed`, in which case the caller handles the request
/// itself.
/// Otherwise sets the `Allow` header from `allowed` (sorted, always including
/// `OPTIONS`) plus a 405 status for non-`OPTIONS` requests, and returns
/// `true`.
///
/// ```rust
/// use globmux::{not_allowed, ResponseWriter};
/// use http::{Method, Request, Response, StatusCode};
///
/// fn serve(req: Request<()>, rw: &mut dyn ResponseWriter) {
///     if not_allowed(rw, req.method(), &[Method::GET, Method::PUT]) {
///         return;
///     }
///
///     if *req.method() == Method::GET {
///         // handle GET
///     } else {
///         // handle PUT
///     }
/// }
///
/// let mut res = Response::new(Vec::new());
/// serve(Request::builder().method(Method::POST).body(()).unwrap(), &mut res);
/// assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
/// ```
pub fn not_allowed(rw: &mut dyn ResponseWriter, method: &Method, allowed: &[Method]) -> bool {
    let method = normalize(method);
    if allowed.contains(&method) {
        return false;
    }

    // method names are valid header characters
    rw.set_header(ALLOW, HeaderValue::from_str(&allow_header(allowed.iter())).unwrap());
    if method != Method::OPTIONS {
        rw.set_status(StatusCode::METHOD_NOT_ALLOWED);
    }

    true
}

// Builds the Allow header value: the sorted, comma-space joined methods,
// always including OPTIONS.
fn allow_header<'m>(methods: impl Iterator<Item = &'m Method>) -> String {
    let mut allow: Vec<&str> = methods
        .filter(|method| **method != Method::OPTIONS)
        .map(Method::as_str)
        .collect();
    allow.push(Method::OPTIONS.as_str());
    allow.sort_unstable();
    allow.dedup();
    allow.join(", ")
}

// Upper-cases extension methods so lookup is case-insensitive; standard
// methods are already upper-case.
fn normalize(method: &Method) -> Method {
    if method.as_str().bytes().any(|b| b.is_ascii_lowercase()) {
        let upper = method.as_str().to_ascii_uppercase();
        return Method::from_bytes(upper.as_bytes()).unwrap_or_else(|_| method.clone());
    }

    method.clone()
}
