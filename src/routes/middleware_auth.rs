use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::warn;

use crate::error::{ApiError, AppError};
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session_token";
pub const SESSION_TTL_HOURS: i64 = 12;
pub const LOGIN_PATH: &str = "/users/login";

/// Verified identity of the caller, placed in request extensions by [`require_auth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub String);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::new(StatusCode::UNAUTHORIZED, "unauthorized"))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Debug)]
pub struct SessionToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    /// HttpOnly session cookie carrying the token.
    pub fn cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build((SESSION_COOKIE, self.value.clone()))
            .path("/")
            .http_only(true)
            .max_age(time::Duration::hours(SESSION_TTL_HOURS))
            .build();
        if let Ok(expires) = OffsetDateTime::from_unix_timestamp(self.expires_at.timestamp()) {
            cookie.set_expires(expires);
        }
        cookie
    }
}

/// Signing and verification keys derived from the configured secret.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl SessionKeys {
    pub fn new(secret: &str) -> Self {
        // Any HMAC variant is accepted, nothing outside that family.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self, email: &str) -> Result<SessionToken, AppError> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(SESSION_TTL_HOURS);
        let claims = Claims {
            email: email.to_string(),
            iat: now.timestamp() as usize,
            exp: expires_at.timestamp() as usize,
        };

        let value = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(SessionToken { value, expires_at })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding, &self.validation).map(|data| data.claims)
    }
}

fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("text/html"))
}

fn reject(status: StatusCode, message: &str) -> Response {
    ApiError::new(status, message).into_response()
}

pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let token = match jar.get(SESSION_COOKIE) {
        Some(cookie) => cookie.value_trimmed(),
        None => {
            if wants_html(req.headers()) {
                return Redirect::to(LOGIN_PATH).into_response();
            }
            return reject(StatusCode::UNAUTHORIZED, "unauthorized");
        }
    };

    let claims = match state.keys.verify(token) {
        Ok(claims) => claims,
        Err(e) => {
            warn!(error = %e, uri = %req.uri(), "session token rejected");
            return match e.kind() {
                ErrorKind::InvalidSignature => reject(StatusCode::UNAUTHORIZED, "unauthorized"),
                _ => reject(StatusCode::BAD_REQUEST, "bad req"),
            };
        }
    };

    req.extensions_mut().insert(AuthUser(claims.email));
    next.run(req).await
}
