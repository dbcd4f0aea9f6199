use axum::http::{HeaderMap, header};

use crate::error::AppError;
use crate::services::auth::{
    bypass::{self, BypassPolicy},
    resolver::UserResolver,
    token::TokenCodec,
};
use crate::services::auth::user::AuthenticatedUser;

const BEARER_PREFIX: &str = "Bearer ";

/// Authentication gate: header -> token -> user.
///
/// Holds no per-request state; cheap to share behind an `Arc`.
#[derive(Clone, Debug)]
pub struct AuthService {
    codec: TokenCodec,
    resolver: UserResolver,
    bypass: BypassPolicy,
}

impl AuthService {
    pub fn new(codec: TokenCodec, resolver: UserResolver, bypass: BypassPolicy) -> Self {
        Self {
            codec,
            resolver,
            bypass,
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Authenticate one request.
    ///
    /// Order matters and every step is terminal on failure:
    /// 1. bearer header present and non-blank, else `MissingToken`
    /// 2. token decodes, else development bypass or `InvalidToken`
    /// 3. subject resolves, else `Internal` (store fault) or `UserNotFound`
    pub async fn authenticate(
        &self,
        headers: &HeaderMap,
        host: Option<&str>,
    ) -> Result<AuthenticatedUser, AppError> {
        let Some(token) = bearer_token(headers) else {
            tracing::debug!("request without bearer token");
            return Err(AppError::MissingToken);
        };

        let claims = match self.codec.decode(token) {
            Ok(claims) => claims,
            Err(err) => {
                if self.bypass.should_bypass(host) {
                    tracing::warn!(
                        error = %err,
                        host = host.unwrap_or_default(),
                        "token invalid, development bypass granted"
                    );
                    return Ok(bypass::development_user());
                }

                // never log the token itself
                tracing::warn!(
                    error = %err,
                    token_len = token.len(),
                    "access token verification failed"
                );
                return Err(AppError::InvalidToken);
            }
        };

        let user = self
            .resolver
            .resolve(claims.subject_id)
            .await
            .map_err(|err| {
                tracing::error!(
                    error = ?err,
                    user_id = claims.subject_id,
                    "user lookup failed"
                );
                AppError::Internal
            })?;

        match user {
            Some(user) => {
                tracing::debug!(user_id = user.id, role = %user.role, "authenticated");
                Ok(user)
            }
            None => {
                tracing::warn!(user_id = claims.subject_id, "token subject not found");
                Err(AppError::UserNotFound)
            }
        }
    }
}

/// Token after the exact `Bearer ` prefix, if non-blank. Taken as-is apart from trailing
/// whitespace.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?.trim_end();

    (!token.is_empty()).then_some(token)
}
