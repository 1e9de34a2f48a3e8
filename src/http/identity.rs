//! Maps request headers to the verified caller.
//!
//! Credential checks happen upstream; this layer only reads the result.

use axum::http::HeaderMap;

use super::error::ApiErrorResponse;
use crate::domain::Requester;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

pub trait IdentityProvider: Send + Sync {
    fn identify(&self, headers: &HeaderMap) -> Result<Requester, ApiErrorResponse>;
}

/// Trusts `x-user-role: staff` or `x-user-id: <id>` set by the gateway.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderIdentity;

impl IdentityProvider for HeaderIdentity {
    fn identify(&self, headers: &HeaderMap) -> Result<Requester, ApiErrorResponse> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        if header(USER_ROLE_HEADER).is_some_and(|role| role.eq_ignore_ascii_case("staff")) {
            return Ok(Requester::Staff);
        }
        header(USER_ID_HEADER)
            .map(Requester::customer)
            .ok_or_else(|| ApiErrorResponse::forbidden("Missing caller identity"))
    }
}
