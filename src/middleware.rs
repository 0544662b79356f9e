//! The CSRF guard itself: token issuance on safe requests, double-submit
//! validation on POSTs.

use crate::config::CsrfConfig;
use crate::error::Result;
use crate::token::CsrfToken;
use crate::traits::{CsrfRequest, CsrfResponse};
use http::{Method, StatusCode};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error};

/// Why a request was rejected. All three cases answer with HTTP 400; they are
/// distinguished here and in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No token parameter was submitted with the request.
    MissingParameter,
    /// The token cookie value differs from the submitted parameter.
    CookieMismatch,
    /// No cookie with the token name was sent at all.
    CookieNotFound,
}

/// Outcome of [`CsrfGuard::handle`] for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Safe-method request: a fresh token was issued and the chain ran.
    Issued(CsrfToken),
    /// Excluded path: validation skipped, chain ran.
    Skipped,
    /// Submitted token matched the cookie, chain ran.
    Accepted,
    /// Validation failed: 400 sent, chain not invoked.
    Rejected(Rejection),
}

impl Verdict {
    /// Whether the request was passed down the chain.
    pub fn passed(&self) -> bool {
        !matches!(self, Verdict::Rejected(_))
    }
}

/// Stateless double-submit-cookie CSRF guard.
///
/// Safe requests receive a fresh random token, stored as a cookie and exposed
/// as a request attribute for forms to embed. Mutating requests must echo the
/// token back as a parameter matching the cookie bit-for-bit; nothing is kept
/// server-side.
///
/// Two compatibility behaviors to be aware of:
///
/// - Only `POST` is treated as mutating. `PUT`, `DELETE`, and `PATCH` pass
///   unchecked like `GET`. If your application mutates state on those
///   methods, this guard alone does not cover them.
/// - When a client sends duplicate cookies with the token name, only the
///   first one is compared; later duplicates are ignored.
#[derive(Clone, Debug)]
pub struct CsrfGuard {
    config: Arc<CsrfConfig>,
}

impl CsrfGuard {
    /// Create a guard from a validated configuration.
    ///
    /// Fails fast on a blank token name so a misconfigured guard never
    /// serves a request.
    pub fn new(config: CsrfConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// The guard's configuration.
    pub fn config(&self) -> &CsrfConfig {
        &self.config
    }

    /// Process one request.
    ///
    /// Either issues a token and continues, or validates the submitted token
    /// against the cookie and continues, or answers 400 without invoking
    /// `next`. Every outcome is terminal within the request.
    pub async fn handle<Req, Resp, F, Fut>(
        &self,
        request: &mut Req,
        response: &mut Resp,
        next: F,
    ) -> Verdict
    where
        Req: CsrfRequest + ?Sized,
        Resp: CsrfResponse + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        let name = self.config.token_name.as_str();

        // Everything except POST is treated as safe and gets a fresh token.
        if request.method() != Method::POST {
            let token = CsrfToken::mint();
            debug!(token = %token, "new csrf token generated");
            request.set_attribute(name, token.as_str());
            response.add_cookie(
                name,
                token.as_str(),
                &self.config.cookie_path,
                self.config.cookie_max_age,
            );
            next().await;
            return Verdict::Issued(token);
        }

        if self.config.is_excluded(request.path()) {
            next().await;
            return Verdict::Skipped;
        }

        let Some(submitted) = request.parameter(name) else {
            error!(
                method = %request.method(),
                path = %request.path(),
                "csrf token not found in POST request"
            );
            response.send_error(StatusCode::BAD_REQUEST);
            return Verdict::Rejected(Rejection::MissingParameter);
        };
        request.set_attribute(name, &submitted);

        for (cookie_name, cookie_value) in request.cookies() {
            if cookie_name == name {
                if cookie_value == submitted {
                    next().await;
                    return Verdict::Accepted;
                }
                error!(
                    expected = %submitted,
                    received = %cookie_value,
                    "mismatched csrf token"
                );
                response.send_error(StatusCode::BAD_REQUEST);
                return Verdict::Rejected(Rejection::CookieMismatch);
            }
        }

        error!(path = %request.path(), "csrf cookie not found");
        response.send_error(StatusCode::BAD_REQUEST);
        Verdict::Rejected(Rejection::CookieNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct TestRequest {
        method: Method,
        path: String,
        cookies: Vec<(String, String)>,
        parameters: HashMap<String, String>,
        attributes: HashMap<String, String>,
    }

    impl TestRequest {
        fn new(method: Method, path: &str) -> Self {
            Self {
                method,
                path: path.to_string(),
                cookies: Vec::new(),
                parameters: HashMap::new(),
                attributes: HashMap::new(),
            }
        }
    }

    impl CsrfRequest for TestRequest {
        fn method(&self) -> &Method {
            &self.method
        }

        fn path(&self) -> &str {
            &self.path
        }

        fn cookies(&self) -> Vec<(String, String)> {
            self.cookies.clone()
        }

        fn parameter(&self, name: &str) -> Option<String> {
            self.parameters.get(name).cloned()
        }

        fn set_attribute(&mut self, name: &str, value: &str) {
            self.attributes.insert(name.to_string(), value.to_string());
        }
    }

    #[derive(Default)]
    struct TestResponse {
        cookies: Vec<(String, String, String, u32)>,
        error: Option<StatusCode>,
    }

    impl CsrfResponse for TestResponse {
        fn add_cookie(&mut self, name: &str, value: &str, path: &str, max_age_secs: u32) {
            self.cookies.push((
                name.to_string(),
                value.to_string(),
                path.to_string(),
                max_age_secs,
            ));
        }

        fn send_error(&mut self, status: StatusCode) {
            self.error = Some(status);
        }
    }

    fn guard() -> CsrfGuard {
        CsrfGuard::new(CsrfConfig::new("csrf").unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_get_issues_token() {
        let mut req = TestRequest::new(Method::GET, "/form");
        let mut resp = TestResponse::default();

        let verdict = guard().handle(&mut req, &mut resp, || async {}).await;

        let Verdict::Issued(token) = verdict else {
            panic!("expected Issued, got {verdict:?}");
        };
        assert_eq!(req.attributes["csrf"], token.as_str());
        assert_eq!(
            resp.cookies,
            vec![("csrf".to_string(), token.as_str().to_string(), "/".to_string(), 3600)]
        );
        assert!(resp.error.is_none());
    }

    #[tokio::test]
    async fn test_post_with_matching_token_passes() {
        let mut req = TestRequest::new(Method::POST, "/submit");
        req.parameters.insert("csrf".to_string(), "abc123".to_string());
        req.cookies.push(("csrf".to_string(), "abc123".to_string()));
        let mut resp = TestResponse::default();

        let verdict = guard().handle(&mut req, &mut resp, || async {}).await;

        assert_eq!(verdict, Verdict::Accepted);
        assert!(resp.error.is_none());
        assert_eq!(req.attributes["csrf"], "abc123");
    }

    #[tokio::test]
    async fn test_post_with_mismatched_token_rejected() {
        let mut req = TestRequest::new(Method::POST, "/submit");
        req.parameters.insert("csrf".to_string(), "abc123".to_string());
        req.cookies.push(("csrf".to_string(), "xyz999".to_string()));
        let mut resp = TestResponse::default();

        let verdict = guard().handle(&mut req, &mut resp, || async {}).await;

        assert_eq!(verdict, Verdict::Rejected(Rejection::CookieMismatch));
        assert_eq!(resp.error, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_blank_token_name_fails_at_construction() {
        let config: CsrfConfig = serde_json::from_str(r#"{"token_name": ""}"#).unwrap();
        assert!(CsrfGuard::new(config).is_err());
    }
}
