//! Login credential validation.
//!
//! Handlers pass raw payload strings through
//! [`LoginCredentials::try_from_parts`] before any service call, so the
//! credential validator and user manager only ever see a well-formed
//! [`Username`] and a non-empty password. The password is wrapped in
//! [`Zeroizing`] and wiped from memory on drop.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{Username, UsernameValidationError};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl From<UsernameValidationError> for CredentialsValidationError {
    fn from(err: UsernameValidationError) -> Self {
        match err {
            UsernameValidationError::Empty => Self::EmptyUsername,
        }
    }
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated login credentials: a domain [`Username`] plus the plaintext
/// password to check against the stored hash.
///
/// ## Invariants
/// - The username satisfies the [`Username`] invariants (trimmed,
///   non-empty).
/// - The password is non-empty but retains caller-provided whitespace;
///   stripping it would silently change which hash the input digests to.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" maria ", "s3cret")?;
/// assert_eq!(creds.username().as_ref(), "maria");
/// assert_eq!(creds.password(), "s3cret");
/// # Ok::<(), backend::domain::CredentialsValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username)?;

        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Validated username, ready for user lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialsValidationError::EmptyUsername)]
    #[case("   ", "pw", CredentialsValidationError::EmptyUsername)]
    #[case("maria", "", CredentialsValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn username_is_the_domain_newtype() {
        let creds =
            LoginCredentials::try_from_parts("  maria ", "pw").expect("valid inputs");
        assert_eq!(
            creds.username(),
            &Username::new("maria").expect("valid name")
        );
    }

    #[rstest]
    #[case("secret")]
    #[case(" padded secret ")]
    fn passwords_keep_their_whitespace(#[case] password: &str) {
        let creds =
            LoginCredentials::try_from_parts("maria", password).expect("valid inputs");
        assert_eq!(creds.password(), password);
    }
}
