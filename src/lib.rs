//! # CSRF Guard
//!
//! Stateless double-submit-cookie CSRF protection for web applications.
//!
//! ## Features
//!
//! - ✅ **Double-Submit-Cookie Pattern** - No server-side token storage
//! - ✅ **Transport-Agnostic** - Narrow request/response traits any host can adapt to
//! - ✅ **Fail-Fast Configuration** - A misconfigured guard never serves traffic
//! - ✅ **Path Exclusion** - Exempt specific paths from validation
//! - ✅ **Concurrency-Safe Tokens** - Per-thread CSPRNG, no shared generator
//!
//! ## How it works
//!
//! On safe (non-POST) requests the guard mints a random token, sets it as a
//! cookie (`Path=/`, `Max-Age=3600` by default), and exposes it as a
//! request-scoped attribute for forms to embed. On POST requests the guard
//! compares the submitted token parameter against the token cookie: an exact
//! match passes the request down the chain, anything else answers HTTP 400.
//! An attacker site cannot forge the pair because same-origin policy prevents
//! it from reading or setting this site's cookies.
//!
//! The token is an opaque random value, not a MAC or signed payload, and the
//! guard does not defend against cookie theft or XSS-based exfiltration.
//!
//! ## Quick Start
//!
//! ```rust
//! use csrf_guard::{CsrfConfig, CsrfGuard};
//!
//! # fn example() -> Result<(), csrf_guard::CsrfError> {
//! let config = CsrfConfig::new("csrf")?
//!     .with_exclude("/webhook,/api/callback");
//!
//! let guard = CsrfGuard::new(config)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Handling requests
//!
//! The host adapts its request and response types to [`CsrfRequest`] and
//! [`CsrfResponse`] and calls [`CsrfGuard::handle`] with the chain
//! continuation:
//!
//! ```ignore
//! let verdict = guard
//!     .handle(&mut request, &mut response, || async {
//!         // rest of the processing pipeline
//!         router.dispatch(&request).await;
//!     })
//!     .await;
//!
//! if !verdict.passed() {
//!     // response already carries HTTP 400
//! }
//! ```
//!
//! ## Method coverage
//!
//! Only `POST` requests are validated; every other method, including `PUT`,
//! `DELETE`, and `PATCH`, is treated as safe and receives a fresh token. This
//! is deliberate for compatibility with clients of the original filter, but
//! it is broader than the conventional safe set of `GET`/`HEAD`/`OPTIONS`:
//! applications that mutate state on non-POST methods are not covered by
//! this guard alone.

pub mod config;
pub mod error;
pub mod middleware;
pub mod token;
pub mod traits;

pub use config::CsrfConfig;
pub use error::{CsrfError, Result};
pub use middleware::{CsrfGuard, Rejection, Verdict};
pub use token::CsrfToken;
pub use traits::{CsrfRequest, CsrfResponse};
