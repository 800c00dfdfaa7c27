use crate::operation::Operation;

/// Provider name used by the service when none is configured.
pub const DEFAULT_PROVIDER_NAME: &str = "local-userpass";

/// Builds service-relative routes for the email/password provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRoutes {
    provider_name: String,
}

impl AuthRoutes {
    #[must_use]
    pub fn new(provider_name: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
        }
    }

    #[must_use]
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// Route for one operation, relative to the application base URL.
    #[must_use]
    pub fn path(&self, operation: Operation) -> String {
        format!(
            "/auth/providers/{}/{}",
            self.provider_name,
            operation.route_suffix()
        )
    }
}

impl Default for AuthRoutes {
    fn default() -> Self {
        Self::new(DEFAULT_PROVIDER_NAME)
    }
}
