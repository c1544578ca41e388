use crate::domain::auth::{Claims, TokenCodec, TokenType};
use anyhow::{Result, bail};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// HS256 JWT codec with one secret per token type
pub struct JwtTokenCodec {
    access: KeyPair,
    refresh: KeyPair,
}

impl JwtTokenCodec {
    pub fn new(access_secret: &[u8], refresh_secret: &[u8]) -> Result<Self> {
        if access_secret.is_empty() || refresh_secret.is_empty() {
            bail!("JWT secrets must not be empty");
        }

        Ok(Self {
            access: KeyPair::from_secret(access_secret),
            refresh: KeyPair::from_secret(refresh_secret),
        })
    }

    fn keys(&self, token_type: TokenType) -> &KeyPair {
        match token_type {
            TokenType::Access => &self.access,
            TokenType::Refresh => &self.refresh,
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn encode(&self, claims: &Claims) -> Result<String> {
        let header = Header::new(Algorithm::HS256);

        encode(&header, claims, &self.keys(claims.token_type).encoding)
            .map_err(|e| anyhow::anyhow!("Failed to generate {} token: {}", claims.token_type, e))
    }

    fn decode(&self, token: &str, token_type: TokenType) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<Claims>(token, &self.keys(token_type).decoding, &validation)
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }
}
