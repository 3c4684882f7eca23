//! Authentication primitives: login credentials and registrations.
//!
//! Inbound payloads arrive with optional fields. These constructors validate
//! them before a handler talks to a port, and keep plaintext passwords in
//! zeroizing buffers.

use std::fmt;

use zeroize::Zeroizing;

use super::{Email, Role, UserProfile};

/// Raised when a login or registration payload lacks required values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteValues {
    missing: Vec<&'static str>,
}

impl IncompleteValues {
    /// Names of the missing fields, in payload order.
    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }
}

impl fmt::Display for IncompleteValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Incomplete values")
    }
}

impl std::error::Error for IncompleteValues {}

/// Collects blank or absent fields while validating a payload.
#[derive(Default)]
struct FieldCheck {
    missing: Vec<&'static str>,
}

impl FieldCheck {
    fn text(&mut self, field: &'static str, value: Option<&str>) -> String {
        match value.map(str::trim) {
            Some(text) if !text.is_empty() => text.to_owned(),
            _ => {
                self.missing.push(field);
                String::new()
            }
        }
    }

    fn secret(&mut self, field: &'static str, value: Option<&str>) -> Zeroizing<String> {
        match value {
            Some(secret) if !secret.is_empty() => Zeroizing::new(secret.to_owned()),
            _ => {
                self.missing.push(field);
                Zeroizing::new(String::new())
            }
        }
    }

    fn finish(self) -> Result<(), IncompleteValues> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(IncompleteValues {
                missing: self.missing,
            })
        }
    }
}

fn email_or_missing(check: &mut FieldCheck, raw: Option<&str>) -> Option<Email> {
    let text = check.text("email", raw);
    Email::new(text).ok()
}

/// Validated login credentials.
///
/// # Examples
/// ```
/// use adoptme::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(Some(" ada@example.com "), Some("pw"))
///     .expect("complete credentials");
/// assert_eq!(creds.email().as_str(), "ada@example.com");
/// ```
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw inputs. The email is trimmed; the password is kept as-is.
    pub fn try_from_parts(
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, IncompleteValues> {
        let mut check = FieldCheck::default();
        let email = email_or_missing(&mut check, email);
        let password = check.secret("password", password);
        check.finish()?;
        let email = email.ok_or_else(|| IncompleteValues {
            missing: vec!["email"],
        })?;
        Ok(Self { email, password })
    }

    /// Email used to look up the account.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plaintext password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration payload.
#[derive(Debug, Clone)]
pub struct Registration {
    profile: UserProfile,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw inputs; every field is required and the role is `user`.
    pub fn try_from_parts(
        first_name: Option<&str>,
        last_name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, IncompleteValues> {
        let mut check = FieldCheck::default();
        let first_name = check.text("first_name", first_name);
        let last_name = check.text("last_name", last_name);
        let email = email_or_missing(&mut check, email);
        let password = check.secret("password", password);
        check.finish()?;
        let email = email.ok_or_else(|| IncompleteValues {
            missing: vec!["email"],
        })?;
        Ok(Self {
            profile: UserProfile {
                first_name,
                last_name,
                email,
                role: Role::User,
            },
            password,
        })
    }

    /// Identity fields of the new account.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Plaintext password to hash before storage.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Split into profile and password.
    pub fn into_parts(self) -> (UserProfile, Zeroizing<String>) {
        (self.profile, self.password)
    }
}
