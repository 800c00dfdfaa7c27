//! Email/password provider over an HTTP-style transport.
//!
//! Each public operation resolves its raw arguments, builds the request body
//! from the normalized argument object, and issues exactly one `POST` to the
//! route derived from the configured provider name. All seven operations are
//! acknowledgements: success carries no payload, and transport failures reach
//! the caller unchanged.

use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::ejson;
use crate::error::Error;
use crate::operation::Operation;
use crate::resolver::{self, CallArgs};
use crate::routes::AuthRoutes;
use crate::transport::{JsonRequest, Transport};

/// Client interface to the email/password authentication provider.
pub struct EmailPasswordAuth<T> {
    transport: T,
    routes: AuthRoutes,
}

impl<T: Transport> EmailPasswordAuth<T> {
    /// Provider client under the default provider name.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            routes: AuthRoutes::default(),
        }
    }

    /// Provider client under a custom provider name.
    pub fn with_provider_name(transport: T, provider_name: impl Into<String>) -> Self {
        Self {
            transport,
            routes: AuthRoutes::new(provider_name),
        }
    }

    #[must_use]
    pub fn provider_name(&self) -> &str {
        self.routes.provider_name()
    }

    /// Register a new email identity. Fields: `email`, `password`.
    ///
    /// # Errors
    ///
    /// Fails on a malformed call shape or when the transport reports a
    /// failure.
    pub async fn register_user(&self, args: impl Into<CallArgs>) -> Result<(), Error> {
        self.call(Operation::RegisterUser, args.into()).await
    }

    /// Confirm a registered identity from a confirmation-email token.
    /// Fields: `token`, `tokenId`.
    ///
    /// # Errors
    ///
    /// Fails on a malformed call shape or when the transport reports a
    /// failure.
    pub async fn confirm_user(&self, args: impl Into<CallArgs>) -> Result<(), Error> {
        self.call(Operation::ConfirmUser, args.into()).await
    }

    /// Ask the service to send the confirmation email again. Fields: `email`.
    ///
    /// # Errors
    ///
    /// Fails on a malformed call shape or when the transport reports a
    /// failure.
    pub async fn resend_confirmation_email(&self, args: impl Into<CallArgs>) -> Result<(), Error> {
        self.call(Operation::ResendConfirmationEmail, args.into())
            .await
    }

    /// Rerun the service's custom confirmation function. Fields: `email`.
    ///
    /// # Errors
    ///
    /// Fails on a malformed call shape or when the transport reports a
    /// failure.
    pub async fn retry_custom_confirmation(&self, args: impl Into<CallArgs>) -> Result<(), Error> {
        self.call(Operation::RetryCustomConfirmation, args.into())
            .await
    }

    /// Complete a password reset from a reset-email token.
    /// Fields: `token`, `tokenId`, `password`.
    ///
    /// # Errors
    ///
    /// Fails on a malformed call shape or when the transport reports a
    /// failure.
    pub async fn reset_password(&self, args: impl Into<CallArgs>) -> Result<(), Error> {
        self.call(Operation::ResetPassword, args.into()).await
    }

    /// Ask the service to send a password-reset email. Fields: `email`.
    ///
    /// # Errors
    ///
    /// Fails on a malformed call shape or when the transport reports a
    /// failure.
    pub async fn send_reset_password_email(&self, args: impl Into<CallArgs>) -> Result<(), Error> {
        self.call(Operation::SendResetPasswordEmail, args.into())
            .await
    }

    /// Run the service's custom reset function. Fields: `email`, `password`;
    /// any further values are forwarded opaquely to the function.
    ///
    /// # Errors
    ///
    /// Fails on a malformed call shape or when the transport reports a
    /// failure.
    pub async fn call_reset_password_function(
        &self,
        args: impl Into<CallArgs>,
    ) -> Result<(), Error> {
        self.call(Operation::CallResetPasswordFunction, args.into())
            .await
    }

    async fn call(&self, operation: Operation, args: CallArgs) -> Result<(), Error> {
        let (mut body, trailing) = resolver::resolve(operation, args)?.into_parts();
        if let Some(trailing) = trailing {
            body.insert(
                "arguments".to_string(),
                Value::String(ejson::encode_canonical(&trailing)?),
            );
        }

        let path = self.routes.path(operation);
        debug!("{}: POST {}", operation, path);

        // Acknowledgement only; any payload is discarded.
        self.transport
            .fetch_json(JsonRequest {
                method: Method::POST,
                path,
                body: Some(Value::Object(body)),
            })
            .await?;
        Ok(())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for EmailPasswordAuth<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailPasswordAuth")
            .field("provider_name", &self.routes.provider_name())
            .field("transport", &self.transport)
            .finish()
    }
}
