//! Callback-style native binding support.
//!
//! Some builds execute the provider operations through a native binding that
//! reports its outcome by invoking a `callback(error, result)` exactly once,
//! synchronously or asynchronously. [`adapt`] converts that shape into a
//! single awaitable outcome via a one-shot settlement cell: the first
//! settlement wins, later invocations are ignored.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::oneshot;
use tracing::debug;

use crate::ejson;
use crate::error::Error;
use crate::operation::Operation;
use crate::resolver::{self, CallArgs};

/// Settlement handle handed to a native operation.
///
/// Cheap to clone; all clones share the same one-shot cell. A falsy error
/// (absent or JSON null) settles as success.
#[derive(Clone)]
pub struct Callback {
    cell: Arc<Mutex<Option<oneshot::Sender<Result<Value, Value>>>>>,
}

impl Callback {
    fn new() -> (Self, oneshot::Receiver<Result<Value, Value>>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                cell: Arc::new(Mutex::new(Some(tx))),
            },
            rx,
        )
    }

    /// Settle with the `(error, result)` pair the native side produced.
    /// Only the first invocation has any effect.
    pub fn settle(&self, error: Option<Value>, result: Option<Value>) {
        let Ok(mut slot) = self.cell.lock() else {
            return;
        };
        let Some(tx) = slot.take() else {
            debug!("callback settled more than once, ignoring");
            return;
        };
        let outcome = match error {
            Some(error) if !error.is_null() => Err(error),
            _ => Ok(result.unwrap_or(Value::Null)),
        };
        // A closed receiver means the caller stopped waiting.
        let _ = tx.send(outcome);
    }
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let settled = self.cell.lock().map(|slot| slot.is_none()).unwrap_or(true);
        f.debug_struct("Callback").field("settled", &settled).finish()
    }
}

/// Run a callback-accepting native operation and wait for its settlement.
///
/// The callback exists before `bind` runs, so a binding that settles
/// synchronously cannot lose its outcome.
///
/// # Errors
///
/// [`Error::Binding`] with the native error value when the callback settles
/// with a truthy error; [`Error::BindingDropped`] when every handle is dropped
/// without settling.
pub async fn adapt<F>(bind: F) -> Result<Value, Error>
where
    F: FnOnce(Callback),
{
    let (callback, rx) = Callback::new();
    bind(callback);
    match rx.await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(error)) => Err(Error::Binding(error)),
        Err(_) => Err(Error::BindingDropped),
    }
}

/// Native implementation of the provider operations.
///
/// `invoke` receives the operation's arguments in named-field order (plus the
/// encoded trailing string for `callResetPasswordFunction`) and must settle
/// `callback` exactly once.
pub trait AuthBinding: Send + Sync {
    fn invoke(&self, operation: Operation, args: Vec<Value>, callback: Callback);
}

/// Email/password provider front end over a callback-style native binding.
///
/// Accepts the same dual calling convention as the HTTP-backed
/// [`EmailPasswordAuth`](crate::provider::EmailPasswordAuth): arguments are
/// resolved first, then flattened back into named-field order for the binding.
#[derive(Debug)]
pub struct BindingEmailPasswordAuth<B> {
    binding: B,
}

impl<B: AuthBinding> BindingEmailPasswordAuth<B> {
    pub fn new(binding: B) -> Self {
        Self { binding }
    }

    /// # Errors
    ///
    /// Fails on a malformed call shape or when the binding settles with an
    /// error.
    pub async fn register_user(&self, args: impl Into<CallArgs>) -> Result<(), Error> {
        self.call(Operation::RegisterUser, args.into()).await
    }

    /// # Errors
    ///
    /// Fails on a malformed call shape or when the binding settles with an
    /// error.
    pub async fn confirm_user(&self, args: impl Into<CallArgs>) -> Result<(), Error> {
        self.call(Operation::ConfirmUser, args.into()).await
    }

    /// # Errors
    ///
    /// Fails on a malformed call shape or when the binding settles with an
    /// error.
    pub async fn resend_confirmation_email(&self, args: impl Into<CallArgs>) -> Result<(), Error> {
        self.call(Operation::ResendConfirmationEmail, args.into())
            .await
    }

    /// # Errors
    ///
    /// Fails on a malformed call shape or when the binding settles with an
    /// error.
    pub async fn retry_custom_confirmation(&self, args: impl Into<CallArgs>) -> Result<(), Error> {
        self.call(Operation::RetryCustomConfirmation, args.into())
            .await
    }

    /// # Errors
    ///
    /// Fails on a malformed call shape or when the binding settles with an
    /// error.
    pub async fn reset_password(&self, args: impl Into<CallArgs>) -> Result<(), Error> {
        self.call(Operation::ResetPassword, args.into()).await
    }

    /// # Errors
    ///
    /// Fails on a malformed call shape or when the binding settles with an
    /// error.
    pub async fn send_reset_password_email(&self, args: impl Into<CallArgs>) -> Result<(), Error> {
        self.call(Operation::SendResetPasswordEmail, args.into())
            .await
    }

    /// # Errors
    ///
    /// Fails on a malformed call shape or when the binding settles with an
    /// error.
    pub async fn call_reset_password_function(
        &self,
        args: impl Into<CallArgs>,
    ) -> Result<(), Error> {
        self.call(Operation::CallResetPasswordFunction, args.into())
            .await
    }

    async fn call(&self, operation: Operation, args: CallArgs) -> Result<(), Error> {
        let (fields, trailing) = resolver::resolve(operation, args)?.into_parts();

        let mut positional: Vec<Value> = operation
            .named_fields()
            .iter()
            .map(|&name| fields.get(name).cloned().unwrap_or(Value::Null))
            .collect();
        if let Some(trailing) = trailing {
            positional.push(Value::String(ejson::encode_canonical(&trailing)?));
        }

        debug!("{}: invoking native binding", operation);
        adapt(|callback| self.binding.invoke(operation, positional, callback)).await?;
        Ok(())
    }
}
