use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Identity attached to a verified bearer token. Tokens are minted by the
/// external identity provider with the shared secret; the `admin` custom
/// claim authorizes mutating operations.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub admin: bool,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    /// Synthetic identity used when the service runs in demo mode and the
    /// auth gate is bypassed.
    pub fn demo_admin() -> Self {
        let now = Utc::now();
        Claims {
            sub: "demo".to_string(),
            email: "demo@localhost".to_string(),
            admin: true,
            exp: (now + Duration::hours(1)).timestamp() as usize,
            iat: now.timestamp() as usize,
        }
    }
}
