//! Session tokens.
//!
//! A session is a compact HS256 JWT carrying the user's id, email and name.
//! [`SessionAuthority::resolve`] is all the orchestrator's callers need; the
//! HMAC authority also issues tokens for `fightcal session issue`.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;

use crate::error::{SessionError, SessionResult};
use crate::store::User;

type HmacSha256 = Hmac<Sha256>;

/// Default session lifetime.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// Resolves a session credential to the user it belongs to.
pub trait SessionAuthority: Send + Sync {
    /// Returns the user id for a valid, unexpired `token`.
    fn resolve(&self, token: &str) -> SessionResult<u64>;
}

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "userID")]
    pub user_id: u64,
    #[serde(rename = "userEmail")]
    pub user_email: String,
    #[serde(rename = "userName", default)]
    pub user_name: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Issues and verifies HS256 session tokens with a shared secret.
pub struct HmacSessionAuthority {
    secret: Vec<u8>,
    ttl: Duration,
}

impl HmacSessionAuthority {
    /// Creates an authority signing with `secret`.
    pub fn new(secret: impl AsRef<[u8]>) -> SessionResult<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(SessionError::EmptySecret);
        }
        Ok(Self {
            secret: secret.to_vec(),
            ttl: DEFAULT_SESSION_TTL,
        })
    }

    /// Builder: set session lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a session token for `user`, valid from now.
    pub fn issue(&self, user: &User) -> SessionResult<String> {
        self.issue_at(user, Utc::now())
    }

    /// Issues a session token as of `now`.
    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> SessionResult<String> {
        let iat = now.timestamp();
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = SessionClaims {
            user_id: user.id,
            user_email: user.email.clone(),
            user_name: user.name.clone(),
            iat,
            exp: iat.saturating_add(ttl),
        };
        let header = Header {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        };

        let header = encode_part(&header)?;
        let claims = encode_part(&claims)?;
        let signing_input = format!("{}.{}", header, claims);
        let signature = URL_SAFE_NO_PAD.encode(self.mac(&signing_input)?.finalize().into_bytes());

        debug!(user_id = user.id, "issued session");
        Ok(format!("{}.{}", signing_input, signature))
    }

    /// Verifies `token` and returns its claims.
    pub fn verify(&self, token: &str) -> SessionResult<SessionClaims> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies `token` as of `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> SessionResult<SessionClaims> {
        let token = token.trim();
        let (signing_input, signature) = token.rsplit_once('.').ok_or(SessionError::Malformed)?;
        let (header, claims) = signing_input
            .split_once('.')
            .ok_or(SessionError::Malformed)?;
        if claims.contains('.') {
            return Err(SessionError::Malformed);
        }

        let header: Header = decode_part(header)?;
        if header.alg != "HS256" {
            return Err(SessionError::UnsupportedAlgorithm(header.alg));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| SessionError::Malformed)?;
        self.mac(signing_input)?
            .verify_slice(&signature)
            .map_err(|_| SessionError::BadSignature)?;

        let claims: SessionClaims = decode_part(claims)?;
        if claims.exp <= now.timestamp() {
            return Err(SessionError::Expired);
        }
        Ok(claims)
    }

    fn mac(&self, signing_input: &str) -> SessionResult<HmacSha256> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|e| SessionError::Encode(e.to_string()))?;
        mac.update(signing_input.as_bytes());
        Ok(mac)
    }
}

impl SessionAuthority for HmacSessionAuthority {
    fn resolve(&self, token: &str) -> SessionResult<u64> {
        self.verify(token).map(|claims| claims.user_id)
    }
}

impl std::fmt::Debug for HmacSessionAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSessionAuthority")
            .field("secret", &"***")
            .field("ttl", &self.ttl)
            .finish()
    }
}

fn encode_part<T: Serialize>(value: &T) -> SessionResult<String> {
    let json = serde_json::to_vec(value).map_err(|e| SessionError::Encode(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode_part<T: for<'de> Deserialize<'de>>(part: &str) -> SessionResult<T> {
    let bytes = URL_SAFE_NO_PAD
        .decode(part)
        .map_err(|_| SessionError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| SessionError::Malformed)
}
