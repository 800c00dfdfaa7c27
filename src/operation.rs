use std::fmt;

/// One named authentication action of the email/password provider.
///
/// Each operation carries a fixed, ordered list of named argument fields and a
/// route suffix under the provider's route prefix. Only
/// [`CallResetPasswordFunction`](Self::CallResetPasswordFunction) accepts
/// trailing arguments beyond its named fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    RegisterUser,
    ConfirmUser,
    ResendConfirmationEmail,
    RetryCustomConfirmation,
    ResetPassword,
    SendResetPasswordEmail,
    CallResetPasswordFunction,
}

impl Operation {
    pub const ALL: [Self; 7] = [
        Self::RegisterUser,
        Self::ConfirmUser,
        Self::ResendConfirmationEmail,
        Self::RetryCustomConfirmation,
        Self::ResetPassword,
        Self::SendResetPasswordEmail,
        Self::CallResetPasswordFunction,
    ];

    /// Public (camelCase) operation name, used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RegisterUser => "registerUser",
            Self::ConfirmUser => "confirmUser",
            Self::ResendConfirmationEmail => "resendConfirmationEmail",
            Self::RetryCustomConfirmation => "retryCustomConfirmation",
            Self::ResetPassword => "resetPassword",
            Self::SendResetPasswordEmail => "sendResetPasswordEmail",
            Self::CallResetPasswordFunction => "callResetPasswordFunction",
        }
    }

    /// Ordered named argument fields for the positional calling convention.
    #[must_use]
    pub const fn named_fields(self) -> &'static [&'static str] {
        match self {
            Self::RegisterUser | Self::CallResetPasswordFunction => &["email", "password"],
            Self::ConfirmUser => &["token", "tokenId"],
            Self::ResendConfirmationEmail
            | Self::RetryCustomConfirmation
            | Self::SendResetPasswordEmail => &["email"],
            Self::ResetPassword => &["token", "tokenId", "password"],
        }
    }

    /// Whether values beyond the named fields are forwarded as trailing args.
    #[must_use]
    pub const fn supports_trailing_args(self) -> bool {
        matches!(self, Self::CallResetPasswordFunction)
    }

    /// Route suffix under `/auth/providers/<provider-name>/`.
    #[must_use]
    pub const fn route_suffix(self) -> &'static str {
        match self {
            Self::RegisterUser => "register",
            Self::ConfirmUser => "confirm",
            Self::ResendConfirmationEmail => "confirmSend",
            Self::RetryCustomConfirmation => "confirmCall",
            Self::ResetPassword => "reset",
            Self::SendResetPasswordEmail => "resetSend",
            Self::CallResetPasswordFunction => "resetCall",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
