//! Port for issuing and verifying stateless bearer tokens.

use crate::domain::{AccessToken, Login};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token codecs.
    pub enum TokenCodecError {
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
        /// Signature, issuer or structure did not verify.
        Invalid { message: String } => "token is invalid: {message}",
        /// The token's validity window has passed.
        Expired => "token has expired",
    }
}

/// Signs and verifies time-bounded tokens binding a subject and issuer.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Issue a token for `subject`.
    fn issue(&self, subject: &Login) -> Result<AccessToken, TokenCodecError>;

    /// Verify `token` and return its subject.
    fn verify(&self, token: &str) -> Result<Login, TokenCodecError>;
}
