//! # Token Issuance
//!
//! Login responds with an opaque token next to the redacted user. Issuance
//! sits behind the [`TokenIssuer`] trait so the mechanism can change
//! without touching the account logic: the default is the historical
//! static placeholder, and configuring `JWT_SECRET` swaps in real signed
//! tokens.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::error::ApiError;
use tienda_core::UsuarioPublico;

/// Issues the opaque session token returned by login.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, usuario: &UsuarioPublico) -> Result<String, ApiError>;
}

/// Selects the issuer for the given configuration.
pub fn token_issuer(config: &ApiConfig) -> Arc<dyn TokenIssuer> {
    match &config.jwt_secret {
        Some(secret) => Arc::new(JwtIssuer::new(secret.clone(), config.jwt_lifetime_secs)),
        None => Arc::new(StaticTokenIssuer),
    }
}

// =============================================================================
// Static Placeholder
// =============================================================================

/// Fixed placeholder token. Carries no identity and never expires; for
/// development only. Production deployments must set `JWT_SECRET`.
pub struct StaticTokenIssuer;

/// The placeholder value itself.
pub const TOKEN_ESTATICO: &str = "demo-token";

impl TokenIssuer for StaticTokenIssuer {
    fn issue(&self, usuario: &UsuarioPublico) -> Result<String, ApiError> {
        debug!(id = usuario.id, "Emitiendo token estático");
        Ok(TOKEN_ESTATICO.to_string())
    }
}

// =============================================================================
// JWT
// =============================================================================

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    /// Email at issuance time
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

/// HS256-signed token issuer.
pub struct JwtIssuer {
    secret: String,
    lifetime_secs: i64,
}

impl JwtIssuer {
    pub fn new(secret: String, lifetime_secs: i64) -> Self {
        JwtIssuer {
            secret,
            lifetime_secs,
        }
    }

    /// Validate and decode a token issued by this issuer.
    pub fn validate(&self, token: &str) -> Result<Claims, ApiError> {
        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| ApiError::internal(format!("Token inválido: {e}")))?;

        Ok(token_data.claims)
    }
}

impl TokenIssuer for JwtIssuer {
    fn issue(&self, usuario: &UsuarioPublico) -> Result<String, ApiError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.lifetime_secs);

        let claims = Claims {
            sub: usuario.id.to_string(),
            email: usuario.email.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        debug!(id = usuario.id, "Emitiendo JWT");
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::internal(format!("No se pudo generar el token: {e}")))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn usuario() -> UsuarioPublico {
        UsuarioPublico {
            id: 7,
            nombre: "Ana".into(),
            apellido: "García".into(),
            email: "ana@example.com".into(),
            telefono: String::new(),
            mascotas: vec![],
        }
    }

    #[test]
    fn test_static_issuer_returns_placeholder() {
        let token = StaticTokenIssuer.issue(&usuario()).unwrap();
        assert_eq!(token, TOKEN_ESTATICO);
    }

    #[test]
    fn test_jwt_issuer_roundtrip() {
        let issuer = JwtIssuer::new("secreto-de-prueba".into(), 3600);

        let token = issuer.issue(&usuario()).unwrap();
        let claims = issuer.validate(&token).unwrap();

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.email, "ana@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_jwt_validation_rejects_foreign_token() {
        let issuer = JwtIssuer::new("secreto-a".into(), 3600);
        let otro = JwtIssuer::new("secreto-b".into(), 3600);

        let token = issuer.issue(&usuario()).unwrap();
        assert!(otro.validate(&token).is_err());
    }
}
