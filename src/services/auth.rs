//! Hosted authentication seam.
//!
//! Credential verification, social sign-in, and account storage all live in
//! the hosted service; the storefront validates forms before calling out and
//! maps the returned identity to a coarse role. The admin check is a
//! configured allow-list rather than a hardcoded owner address.

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

/// Errors from form validation and the hosted auth service.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    /// A required form field was empty; surfaced inline, nothing attempted.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Sign-up password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// The hosted service refused the credentials or the operation.
    #[error("Authentication rejected: {0}")]
    Rejected(String),

    /// The hosted service could not be reached.
    #[error("Auth service error: {0}")]
    Service(String),
}

/// Email/password credentials for sign-in.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Checks both fields are present; surfaced before any service call.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if self.password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        Ok(())
    }
}

/// The sign-up form: profile fields plus credentials and confirmation.
#[derive(Debug, Clone)]
pub struct SignUpForm {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    /// Validates required fields and the password confirmation; surfaced
    /// inline before any service call.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.full_name.trim().is_empty() {
            return Err(AuthError::MissingField("full name"));
        }
        if self.phone.trim().is_empty() {
            return Err(AuthError::MissingField("phone"));
        }
        if self.email.trim().is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if self.password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Who the hosted service says the caller is.
///
/// Guests carry neither a user id nor an email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Option<String>,
    pub email: Option<String>,
}

impl Identity {
    /// The explicit unauthenticated path.
    pub fn guest() -> Self {
        Self {
            user_id: None,
            email: None,
        }
    }
}

/// Coarse storefront role derived from an [`Identity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Customer,
    Guest,
}

/// The hosted auth service.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account. Callers validate the form first.
    async fn sign_up(&self, form: &SignUpForm) -> Result<Identity, AuthError>;

    /// Verifies email/password credentials.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, AuthError>;

    /// Federated (Google-style) sign-in through the provider's popup.
    async fn sign_in_federated(&self) -> Result<Identity, AuthError>;
}

/// Maps identities to roles via a configured admin allow-list.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    admin_emails: Vec<String>,
}

impl AccessPolicy {
    pub fn new(admin_emails: Vec<String>) -> Self {
        if admin_emails.is_empty() {
            warn!("Admin allow-list is empty; no account can reach the admin view");
        }
        Self {
            admin_emails: admin_emails
                .into_iter()
                .map(|e| e.trim().to_ascii_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// Allow-listed email → admin; any other email → customer; no email →
    /// guest.
    pub fn role_for(&self, identity: &Identity) -> Role {
        match &identity.email {
            Some(email) => {
                if self
                    .admin_emails
                    .iter()
                    .any(|admin| admin == &email.trim().to_ascii_lowercase())
                {
                    Role::Admin
                } else {
                    Role::Customer
                }
            }
            None => Role::Guest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> SignUpForm {
        SignUpForm {
            full_name: "Ama Mensah".into(),
            phone: "+233 504 388 888".into(),
            email: "ama@example.com".into(),
            password: "hunter2!".into(),
            confirm_password: "hunter2!".into(),
        }
    }

    #[test]
    fn sign_up_rejects_mismatched_passwords() {
        let mut f = form();
        f.confirm_password = "hunter3!".into();
        assert_eq!(f.validate(), Err(AuthError::PasswordMismatch));
    }

    #[test]
    fn sign_up_requires_profile_fields() {
        assert_eq!(form().validate(), Ok(()));

        let mut f = form();
        f.full_name = "  ".into();
        assert_eq!(f.validate(), Err(AuthError::MissingField("full name")));

        let mut f = form();
        f.phone = String::new();
        assert_eq!(f.validate(), Err(AuthError::MissingField("phone")));
    }

    #[test]
    fn roles_follow_the_allow_list() {
        let policy = AccessPolicy::new(vec!["Owner@Restaurant.com".into()]);

        let admin = Identity {
            user_id: Some("user_1".into()),
            email: Some("owner@restaurant.com".into()),
        };
        let customer = Identity {
            user_id: Some("user_2".into()),
            email: Some("ama@example.com".into()),
        };

        assert_eq!(policy.role_for(&admin), Role::Admin);
        assert_eq!(policy.role_for(&customer), Role::Customer);
        assert_eq!(policy.role_for(&Identity::guest()), Role::Guest);
    }
}
