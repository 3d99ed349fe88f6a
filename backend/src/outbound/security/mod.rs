//! Credential hashing and bearer token adapters.
//!
//! [`Argon2CredentialHasher`] implements the password hashing port and
//! [`JwtTokenCodec`] implements the token port. Token signing settings are
//! read from the environment by [`token_settings_from_env`].

mod argon2_hasher;
mod jwt_codec;
mod token_config;

pub use argon2_hasher::Argon2CredentialHasher;
pub use jwt_codec::JwtTokenCodec;
pub use token_config::{
    BuildMode, DEFAULT_ISSUER, DEFAULT_TTL_MINUTES, TokenConfigError, TokenSettings,
    key_fingerprint, token_settings_from_env,
};
