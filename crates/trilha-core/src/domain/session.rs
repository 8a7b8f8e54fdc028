//! Session state and display-name claim decoding.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

/// Authentication state held by the session boundary.
///
/// Invariant: `authenticated() == token.is_some()`. The display name is
/// derived from the token's `nome` claim and is `None` whenever decoding
/// fails; a malformed claim must never block login.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub display_name: Option<String>,
}

impl Session {
    pub fn from_token(token: String) -> Self {
        let display_name = decode_display_name(&token);
        Self {
            token: Some(token),
            display_name,
        }
    }

    pub fn authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct TokenClaims {
    nome: Option<String>,
}

/// Extract the `nome` claim from a JWT without verifying the signature.
///
/// Any failure (wrong segment count, bad base64, bad JSON, missing claim)
/// yields `None`; callers never see an error.
pub fn decode_display_name(token: &str) -> Option<String> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: TokenClaims = serde_json::from_slice(&bytes).ok()?;
    claims.nome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_claims(claims: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
        format!("{header}.{payload}.assinatura")
    }

    #[test]
    fn decodes_the_nome_claim() {
        let token = token_with_claims(&serde_json::json!({ "nome": "Maria", "sub": "u1" }));
        assert_eq!(decode_display_name(&token), Some("Maria".to_string()));
    }

    #[test]
    fn missing_claim_yields_none() {
        let token = token_with_claims(&serde_json::json!({ "sub": "u1" }));
        assert_eq!(decode_display_name(&token), None);
    }

    #[test]
    fn garbage_token_yields_none() {
        assert_eq!(decode_display_name("not-a-jwt"), None);
        assert_eq!(decode_display_name("a.%%%.c"), None);
        assert_eq!(decode_display_name(""), None);
    }

    #[test]
    fn session_stays_authenticated_on_decode_failure() {
        let session = Session::from_token("opaque-token".to_string());
        assert!(session.authenticated());
        assert_eq!(session.display_name, None);
    }
}
