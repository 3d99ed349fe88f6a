//! Authentication primitives: logins, passwords, roles and tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;
use std::str::FromStr;

use zeroize::Zeroizing;

/// Maximum length, in characters, of a login.
pub const LOGIN_MAX: usize = 64;

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// Login was missing or blank once trimmed.
    EmptyLogin,
    /// Login exceeded [`LOGIN_MAX`] characters.
    LoginTooLong {
        /// Permitted maximum.
        max: usize,
    },
    /// Password was empty.
    EmptyPassword,
    /// Role was not `USER` or `ADMIN`.
    UnknownRole,
}

impl AuthValidationError {
    /// Payload field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyLogin | Self::LoginTooLong { .. } => "login",
            Self::EmptyPassword => "password",
            Self::UnknownRole => "role",
        }
    }

    /// Stable code reported in error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyLogin => "empty_login",
            Self::LoginTooLong { .. } => "login_too_long",
            Self::EmptyPassword => "empty_password",
            Self::UnknownRole => "unknown_role",
        }
    }
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLogin => write!(f, "login must not be empty"),
            Self::LoginTooLong { max } => write!(f, "login must be at most {max} characters"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::UnknownRole => write!(f, "role must be USER or ADMIN"),
        }
    }
}

impl std::error::Error for AuthValidationError {}

/// Unique account login.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Login(String);

impl Login {
    /// Trim and validate a login.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AuthValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AuthValidationError::EmptyLogin);
        }
        if trimmed.chars().count() > LOGIN_MAX {
            return Err(AuthValidationError::LoginTooLong { max: LOGIN_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the login.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain-text password, wiped from memory on drop.
///
/// Whitespace is kept as given.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate a password.
    pub fn new(raw: &str) -> Result<Self, AuthValidationError> {
        if raw.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Expose the secret to a hasher.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Stored one-way password hash (PHC string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a credential hasher.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Coarse permission tag.
///
/// `Admin` satisfies every requirement `User` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Read-only access.
    User,
    /// Read and write access.
    Admin,
}

impl Role {
    /// Whether a holder of `self` may perform an action requiring `required`.
    ///
    /// # Examples
    /// ```
    /// use builders::domain::Role;
    ///
    /// assert!(Role::Admin.satisfies(Role::User));
    /// assert!(!Role::User.satisfies(Role::Admin));
    /// ```
    pub fn satisfies(self, required: Self) -> bool {
        self >= required
    }

    /// Upper-case wire and storage form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(AuthValidationError::UnknownRole),
        }
    }
}

/// Validated login credentials used by authentication services.
///
/// # Examples
/// ```
/// use builders::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "password").unwrap();
/// assert_eq!(creds.login().as_str(), "admin");
/// assert_eq!(creds.password().expose(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    login: Login,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw login/password inputs.
    pub fn try_from_parts(login: &str, password: &str) -> Result<Self, AuthValidationError> {
        Ok(Self {
            login: Login::new(login)?,
            password: Password::new(password)?,
        })
    }

    /// Login used for account lookups.
    pub fn login(&self) -> &Login {
        &self.login
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Request to create an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Login and password of the new account.
    pub credentials: LoginCredentials,
    /// Granted role.
    pub role: Role,
}

/// Persisted account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Unique login.
    pub login: Login,
    /// One-way hash of the password.
    pub password_hash: PasswordHash,
    /// Granted role.
    pub role: Role,
}

/// Signed bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded form sent in `Authorization: Bearer`.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Identity resolved from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Account login.
    pub login: Login,
    /// Current role of the account.
    pub role: Role,
}
