use serde::{Deserialize, Serialize};

use crate::domain::ProdutoId;

/// A product as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Produto {
    pub id: ProdutoId,
    #[serde(default)]
    pub codigo: String,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub descricao: String,
}

impl Produto {
    pub fn from_draft(id: ProdutoId, draft: ProdutoDraft) -> Self {
        Self {
            id,
            codigo: draft.codigo,
            nome: draft.nome,
            tipo: draft.tipo,
            descricao: draft.descricao,
        }
    }

    pub fn draft(&self) -> ProdutoDraft {
        ProdutoDraft {
            codigo: self.codigo.clone(),
            nome: self.nome.clone(),
            tipo: self.tipo.clone(),
            descricao: self.descricao.clone(),
        }
    }
}

/// Product fields without an id: the create payload and the form's working copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProdutoDraft {
    #[serde(default)]
    pub codigo: String,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub descricao: String,
}

impl ProdutoDraft {
    pub fn trimmed(&self) -> Self {
        Self {
            codigo: self.codigo.trim().to_string(),
            nome: self.nome.trim().to_string(),
            tipo: self.tipo.trim().to_string(),
            descricao: self.descricao.trim().to_string(),
        }
    }

    /// Labels of required fields that are blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.codigo.trim().is_empty() {
            missing.push("Código");
        }
        if self.nome.trim().is_empty() {
            missing.push("Nome");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }
}
