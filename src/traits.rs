//! Host transport abstraction.
//!
//! The guard never touches a concrete HTTP stack. A host adapts its own
//! request and response types to these two traits and passes the chain
//! continuation as a closure; everything the guard needs is the capability
//! set below.

use http::{Method, StatusCode};

/// Read access to the inbound request, plus request-scoped attribute storage.
pub trait CsrfRequest {
    /// The request method.
    fn method(&self) -> &Method;

    /// The path component of the request target.
    fn path(&self) -> &str;

    /// All request cookies as `(name, value)` pairs, in the order the client
    /// sent them. Names are not guaranteed unique.
    fn cookies(&self) -> Vec<(String, String)>;

    /// A named parameter from the body or query string, if present.
    fn parameter(&self, name: &str) -> Option<String>;

    /// Store a request-scoped attribute for downstream handlers, e.g. for a
    /// template to embed the token in a form.
    fn set_attribute(&mut self, name: &str, value: &str);
}

/// Write access to the outbound response.
pub trait CsrfResponse {
    /// Add a `Set-Cookie` with the given path and max-age to the response.
    fn add_cookie(&mut self, name: &str, value: &str, path: &str, max_age_secs: u32);

    /// Reject the request with the given status. The response is complete
    /// after this call; no body is written.
    fn send_error(&mut self, status: StatusCode);
}
