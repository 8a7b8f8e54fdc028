//! Typed request/response records per endpoint.
//!
//! The server speaks Portuguese field names, partly camelCased; every rename
//! lives here so malformed payloads fail at the boundary instead of leaking
//! missing fields into the services.

use serde::{Deserialize, Serialize};

use crate::domain::ChallengeId;
use crate::domain::errors::{FieldChecks, ValidationErrors};

// ---------------------------------------------------------------------------
// auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::default();
        checks.require("email", &self.email).require("password", &self.password);
        checks.finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::default();
        checks
            .require("name", &self.name)
            .require("email", &self.email)
            .require("password", &self.password);
        checks.finish()
    }
}

// ---------------------------------------------------------------------------
// creation payloads (validate-then-POST, no optimism)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChallengeRequest {
    pub nome: String,
    pub descricao: String,
}

impl CreateChallengeRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::default();
        checks.require("nome", &self.nome).require("descricao", &self.descricao);
        checks.finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub descricao: String,
    pub pontos: i64,
}

impl CreateTaskRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::default();
        checks
            .require("descricao", &self.descricao)
            .require_positive("pontos", self.pontos);
        checks.finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRewardRequest {
    pub nome: String,
    #[serde(rename = "custoPontos")]
    pub custo_pontos: i64,
    #[serde(rename = "desafioId")]
    pub desafio_id: ChallengeId,
}

impl CreateRewardRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::default();
        checks
            .require("nome", &self.nome)
            .require_positive("custoPontos", self.custo_pontos);
        checks.finish()
    }
}

// ---------------------------------------------------------------------------
// reads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UserPointsResponse {
    pub pontos: i64,
}

// ---------------------------------------------------------------------------
// error bodies
// ---------------------------------------------------------------------------

/// Error responses optionally carry a `message` field; anything else is noise.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}

/// Extract the user-facing message of a non-2xx response.
///
/// Falls back to the generic templated string when the body is absent,
/// unparsable, or has no `message` field.
pub fn error_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| format!("Erro na requisição: {status}"))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn login_response_reads_access_token() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"accessToken":"jwt-abc"}"#).unwrap();
        assert_eq!(resp.access_token, "jwt-abc");
    }

    #[test]
    fn create_reward_serializes_camel_case() {
        let req = CreateRewardRequest {
            nome: "Pizza".to_string(),
            custo_pontos: 50,
            desafio_id: ChallengeId::new("c1"),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "nome": "Pizza", "custoPontos": 50, "desafioId": "c1" })
        );
    }

    #[rstest]
    #[case::empty_name("", "Diário", false)]
    #[case::empty_description("Exercício", "", false)]
    #[case::blank_name("   ", "Diário", false)]
    #[case::valid("Exercício", "Diário", true)]
    fn challenge_validation(#[case] nome: &str, #[case] descricao: &str, #[case] ok: bool) {
        let req = CreateChallengeRequest {
            nome: nome.to_string(),
            descricao: descricao.to_string(),
        };
        assert_eq!(req.validate().is_ok(), ok);
    }

    #[rstest]
    #[case::zero_points(0, false)]
    #[case::negative_points(-5, false)]
    #[case::positive_points(10, true)]
    fn task_points_must_be_positive(#[case] pontos: i64, #[case] ok: bool) {
        let req = CreateTaskRequest {
            descricao: "Correr".to_string(),
            pontos,
        };
        assert_eq!(req.validate().is_ok(), ok);
    }

    #[test]
    fn error_message_prefers_the_server_body() {
        let body = br#"{"message":"Pontos insuficientes."}"#;
        assert_eq!(error_message(400, body), "Pontos insuficientes.");
    }

    #[rstest]
    #[case::empty_body(b"".as_slice())]
    #[case::not_json(b"<html>oops</html>".as_slice())]
    #[case::no_message_field(br#"{"error":"x"}"#.as_slice())]
    fn error_message_falls_back_to_the_status_template(#[case] body: &[u8]) {
        assert_eq!(error_message(500, body), "Erro na requisição: 500");
    }
}
