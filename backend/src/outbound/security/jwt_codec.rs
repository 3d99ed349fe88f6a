//! HS256 JSON Web Tokens.
//!
//! Expiry is checked against the injected [`Clock`] rather than the library's
//! wall-clock check, so tests can move time.

use std::sync::Arc;

use chrono::TimeDelta;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenCodec, TokenCodecError};
use crate::domain::{AccessToken, Login};

use super::TokenSettings;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    sub: String,
    iat: i64,
    exp: i64,
}

/// [`TokenCodec`] signing HS256 JWTs with a shared secret.
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl JwtTokenCodec {
    /// Build a codec from validated settings.
    pub fn new(settings: &TokenSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(&settings.secret),
            decoding: DecodingKey::from_secret(&settings.secret),
            issuer: settings.issuer.clone(),
            ttl: settings.ttl,
            clock,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, subject: &Login) -> Result<AccessToken, TokenCodecError> {
        let now = self.clock.utc();
        let claims = Claims {
            iss: self.issuer.clone(),
            sub: subject.as_str().to_owned(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenCodecError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Login, TokenCodecError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation())
            .map_err(|err| TokenCodecError::invalid(err.to_string()))?;
        if data.claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenCodecError::expired());
        }
        Login::new(&data.claims.sub).map_err(|err| TokenCodecError::invalid(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};
    use zeroize::Zeroizing;

    use super::*;

    struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        fn advance(&self, delta: TimeDelta) {
            *self.0.lock().expect("clock lock") += delta;
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.0.lock().expect("clock lock")
        }
    }

    fn settings(secret: &[u8], issuer: &str) -> TokenSettings {
        TokenSettings {
            secret: Zeroizing::new(secret.to_vec()),
            issuer: issuer.to_owned(),
            ttl: TimeDelta::minutes(120),
        }
    }

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid instant");
        Arc::new(MutableClock(Mutex::new(start)))
    }

    fn login(raw: &str) -> Login {
        Login::new(raw).expect("login")
    }

    #[rstest]
    fn issued_tokens_verify_to_their_subject(clock: Arc<MutableClock>) {
        let codec = JwtTokenCodec::new(&settings(&[7; 32], "house-builders-api"), clock);
        let token = codec.issue(&login("ada")).expect("issue");

        assert_eq!(codec.verify(token.as_str()).expect("verify"), login("ada"));
    }

    #[rstest]
    fn tokens_expire_after_the_ttl(clock: Arc<MutableClock>) {
        let codec = JwtTokenCodec::new(&settings(&[7; 32], "house-builders-api"), clock.clone());
        let token = codec.issue(&login("ada")).expect("issue");

        clock.advance(TimeDelta::minutes(119));
        assert!(codec.verify(token.as_str()).is_ok());

        clock.advance(TimeDelta::minutes(1));
        assert_eq!(
            codec.verify(token.as_str()),
            Err(TokenCodecError::expired())
        );
    }

    #[rstest]
    fn foreign_signatures_are_invalid(clock: Arc<MutableClock>) {
        let issuer = JwtTokenCodec::new(&settings(&[1; 32], "house-builders-api"), clock.clone());
        let verifier = JwtTokenCodec::new(&settings(&[2; 32], "house-builders-api"), clock);
        let token = issuer.issue(&login("ada")).expect("issue");

        assert!(matches!(
            verifier.verify(token.as_str()),
            Err(TokenCodecError::Invalid { .. })
        ));
    }

    #[rstest]
    fn foreign_issuers_are_invalid(clock: Arc<MutableClock>) {
        let issuer = JwtTokenCodec::new(&settings(&[1; 32], "someone-else"), clock.clone());
        let verifier = JwtTokenCodec::new(&settings(&[1; 32], "house-builders-api"), clock);
        let token = issuer.issue(&login("ada")).expect("issue");

        assert!(matches!(
            verifier.verify(token.as_str()),
            Err(TokenCodecError::Invalid { .. })
        ));
    }

    #[rstest]
    #[case("")]
    #[case("not.a.jwt")]
    fn garbage_is_invalid(clock: Arc<MutableClock>, #[case] token: &str) {
        let codec = JwtTokenCodec::new(&settings(&[1; 32], "house-builders-api"), clock);
        assert!(matches!(
            codec.verify(token),
            Err(TokenCodecError::Invalid { .. })
        ));
    }
}
