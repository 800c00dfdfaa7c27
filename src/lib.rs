//! # Pasvorto (Email/Password Provider Client)
//!
//! `pasvorto` is the client interface to the email/password authentication
//! provider of a backend application service: registration, email confirmation
//! (direct, resend, and custom-function retry), and password reset (by token
//! or by a server-side custom function).
//!
//! ## Calling conventions
//!
//! Every operation accepts its arguments in one of two shapes, resolved at
//! runtime by [`resolver::resolve`]:
//!
//! 1. **Positional** — the legacy ordered list of scalar values, e.g.
//!    `("t", "id", "pw")` for `resetPassword`.
//! 2. **Configuration object** — a single JSON object carrying the named
//!    fields, e.g. `{"token": "t", "tokenId": "id", "password": "pw"}`.
//!
//! `callResetPasswordFunction` additionally forwards a variable-length tail of
//! opaque values to the server-side function; these are encoded with the
//! strict (canonical) extended-JSON form so numeric types survive the wire.
//!
//! ## Environments
//!
//! Two front ends expose the same seven operations:
//!
//! - [`EmailPasswordAuth`] dispatches each call as a single `POST` over a
//!   [`Transport`] (by default [`HttpTransport`], backed by `reqwest`).
//! - [`BindingEmailPasswordAuth`] drives a callback-style native binding,
//!   converting each `callback(error, result)` settlement into an awaitable
//!   outcome through a one-shot cell.
//!
//! Neither front end retries, caches, or stores credentials; failures from the
//! transport or binding propagate to the caller unchanged.

pub mod binding;
pub mod ejson;
pub mod error;
pub mod operation;
pub mod provider;
pub mod resolver;
pub mod routes;
pub mod transport;

pub use binding::{adapt, AuthBinding, BindingEmailPasswordAuth, Callback};
pub use error::Error;
pub use operation::Operation;
pub use provider::EmailPasswordAuth;
pub use resolver::{CallArgs, ResolvedCall};
pub use routes::{AuthRoutes, DEFAULT_PROVIDER_NAME};
pub use transport::{HttpTransport, JsonRequest, Transport};
