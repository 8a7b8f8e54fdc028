//! Client-side failure taxonomy.
//!
//! Every boundary absorbs these into observable state (`FetchState.error`,
//! notifications, inline field errors); nothing propagates as an unhandled
//! fault past the service layer.

use thiserror::Error;

/// Generic transport-failure message shown when nothing better is known.
pub const ERRO_INESPERADO: &str = "Erro inesperado.";

/// What went wrong while talking to the API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No token held; the call was short-circuited before any network I/O.
    #[error("Usuário não autenticado.")]
    NotAuthenticated,

    /// Non-2xx response; `message` comes from the server body when present.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// No response was obtained at all.
    #[error("{0}")]
    Transport(String),

    /// The server answered 2xx but the body did not match the expected shape.
    #[error("Resposta inválida do servidor: {0}")]
    Decode(String),
}

/// Failure of the opaque credential storage (not an auth failure).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("armazenamento de credenciais: {0}")]
pub struct CredentialError(pub String);

/// One failed client-side field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Client-side validation failures; surfaced inline and blocking submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validação falhou em {} campo(s)", .fields.len())]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn field(&self, name: &str) -> Option<&FieldError> {
        self.fields.iter().find(|f| f.field == name)
    }
}

/// Accumulates field checks; empty means the input passed.
#[derive(Debug, Default)]
pub struct FieldChecks {
    fields: Vec<FieldError>,
}

impl FieldChecks {
    pub fn require(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fields.push(FieldError {
                field,
                message: "Campo obrigatório.".to_string(),
            });
        }
        self
    }

    pub fn require_positive(&mut self, field: &'static str, value: i64) -> &mut Self {
        if value <= 0 {
            self.fields.push(FieldError {
                field,
                message: "Deve ser um número maior que zero.".to_string(),
            });
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                fields: self.fields,
            })
        }
    }
}
