use axum::http::{self};
use jsonwebtoken::{decode, Algorithm, DecodingKey, TokenData, Validation};
use serde::{Deserialize, Serialize};

use crate::models::StudentProfile;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Teacher,
}

/// Claims issued by the login flow for every authenticated user.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct IdentityClaims {
    pub sub: String,
    pub name: String,
    pub username: String,
    #[serde(rename = "type", default)]
    pub role: Role,
    pub exp: usize,
}

/// Authenticated caller, attached to request extensions by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub profile: StudentProfile,
    pub role: Role,
}

impl From<IdentityClaims> for Identity {
    fn from(claims: IdentityClaims) -> Self {
        Self {
            id: claims.sub,
            profile: StudentProfile {
                display_name: claims.name,
                username: claims.username,
            },
            role: claims.role,
        }
    }
}

// Get the auth token from a request
pub fn get_auth_token<B>(req: &http::Request<B>) -> Result<String, String> {
    // 1. Try to get token from Authorization header
    if let Some(auth_header) = req.headers().get(http::header::AUTHORIZATION) {
        let auth_str = auth_header.to_str().map_err(|_| "Invalid Authorization header".to_string())?;
        Ok(auth_str
            .strip_prefix("Bearer ")
            .unwrap_or(auth_str)
            .to_string())
    }
    // 2. Try to get token from cookies
    else {
        let cookie_header = req.headers().get(http::header::COOKIE)
            .ok_or_else(|| "Missing Authorization header or Cookie".to_string())?
            .to_str()
            .map_err(|_| "Invalid Cookie header".to_string())?;

        for c in cookie::Cookie::split_parse(cookie_header).flatten() {
            if c.name() == "auth_token" {
                return Ok(c.value().to_string());
            }
        }
        Err("auth_token cookie not found".to_string())
    }
}

// Validate a JWT token and return the token data
pub fn validate_jwt(token: &str, secret: &str) -> Result<TokenData<IdentityClaims>, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    decode::<IdentityClaims>(token, &decoding_key, &validation)
}

#[cfg(test)]
pub mod test_tokens {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    pub const SECRET: &str = "test-secret";

    pub fn mint(id: &str, role: Role) -> String {
        let claims = IdentityClaims {
            sub: id.to_string(),
            name: format!("Name {id}"),
            username: format!("user-{id}"),
            role,
            exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
    }
}
