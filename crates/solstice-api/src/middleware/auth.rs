use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;

/// Bearer-token middleware.
///
/// Extracts the `Authorization` header and inserts the caller's identity into
/// request extensions. The token is not validated against the identity
/// provider; it is used verbatim as the user identifier. A `Bearer ` prefix is
/// stripped when present.
pub async fn require_auth(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let user_id = {
        let auth_header = req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        let token = auth_header
            .strip_prefix("Bearer ")
            .unwrap_or(auth_header)
            .trim();

        if token.is_empty() {
            return Err(ApiError::Unauthorized(
                "Authorization header missing".to_string(),
            ));
        }

        token.to_string()
    };

    req.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(req).await)
}

/// Authenticated caller, as taken from the bearer token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: String,
}
