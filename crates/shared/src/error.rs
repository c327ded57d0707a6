use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    RateLimited,
    Unreachable,
    Internal,
}

impl ErrorCode {
    /// Short user-facing description, in the language of the interface.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Unauthorized => "Acesso não autorizado",
            Self::Forbidden => "Operação não permitida",
            Self::NotFound => "Produto não encontrado",
            Self::Validation => "Dados inválidos",
            Self::RateLimited => "Muitas requisições, tente novamente",
            Self::Unreachable => "Servidor indisponível",
            Self::Internal => "Erro inesperado",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code:?}: {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
