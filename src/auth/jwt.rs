use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::{Claims, TokenType};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

fn issue(
    user_id: u64,
    email: String,
    role: u8,
    secret: &str,
    ttl: usize,
    token_type: TokenType,
) -> (String, Claims) {
    let claims = Claims {
        user_id,
        sub: email,
        role,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
        token_type,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();

    (token, claims)
}

pub fn generate_access_token(
    user_id: u64,
    email: String,
    role: u8,
    secret: &str,
    ttl: usize,
) -> String {
    issue(user_id, email, role, secret, ttl, TokenType::Access).0
}

pub fn generate_refresh_token(
    user_id: u64,
    email: String,
    role: u8,
    secret: &str,
    ttl: usize,
) -> (String, Claims) {
    issue(user_id, email, role, secret, ttl, TokenType::Refresh)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}
