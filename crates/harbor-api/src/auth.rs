use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};

use harbor_db::models::NewUser;
use harbor_types::api::{Claims, RegisterRequest, StatusResponse, TokenRequest, TokenResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// Fixed session validity window.
const TOKEN_VALIDITY_MINUTES: i64 = 60;

/// Register a user. Called after the on-chain profile registration has
/// already settled; this only writes the off-chain mirror.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.wallet_address.is_empty() {
        return Err(ApiError::bad_request("wallet_address cannot be empty"));
    }
    if req.password.len() < 8 {
        return Err(ApiError::bad_request("password too short"));
    }

    // Hash with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|_| ApiError::internal("credential hashing failed"))?
        .to_string();

    let user = NewUser {
        address: req.wallet_address,
        username: req.username,
        display_name: req.display_name,
        bio: req.bio,
        avatar_cid: req.avatar_cid,
        password_hash,
    };

    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.create_user(&user))
        .await
        .map_err(ApiError::join)??;

    Ok(Json(StatusResponse {
        message: "User registered successfully".to_string(),
    }))
}

/// Issue a session token for a registered wallet.
pub async fn token(
    State(state): State<AppState>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let db = state.clone();
    let address = req.wallet_address.clone();
    let user = tokio::task::spawn_blocking(move || db.db.get_user(&address))
        .await
        .map_err(ApiError::join)??
        .ok_or_else(|| ApiError::unauthorized("User not registered"))?;

    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|_| ApiError::internal("stored credential is unreadable"))?;
    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::unauthorized("invalid credential"))?;

    let access_token = create_token(&state.jwt_secret, &user.address)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

pub fn create_token(secret: &str, wallet_address: &str) -> Result<String, ApiError> {
    let claims = Claims {
        sub: wallet_address.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::minutes(TOKEN_VALIDITY_MINUTES)).timestamp()
            as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| ApiError::internal("token signing failed"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation, decode};

    #[test]
    fn issued_token_carries_subject_and_validates() {
        let token = create_token("test-secret", "0xA").unwrap();
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(data.claims.sub, "0xA");
    }

    #[test]
    fn expired_token_is_rejected() {
        // Two hours past expiry, well beyond default leeway.
        let claims = Claims {
            sub: "0xA".to_string(),
            exp: (chrono::Utc::now() - chrono::Duration::hours(2)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(
            decode::<Claims>(
                &token,
                &DecodingKey::from_secret(b"test-secret"),
                &Validation::default(),
            )
            .is_err()
        );
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_token("secret-one", "0xA").unwrap();
        assert!(
            decode::<Claims>(
                &token,
                &DecodingKey::from_secret(b"secret-two"),
                &Validation::default(),
            )
            .is_err()
        );
    }
}
