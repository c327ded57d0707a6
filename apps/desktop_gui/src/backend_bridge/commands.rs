//! Backend commands queued from UI to backend worker.

use shared::{domain::ProdutoId, protocol::ProdutoDraft};

#[derive(Debug, Clone)]
pub enum BackendCommand {
    OpenProdutos,
    FetchProdutos,
    AddProduto,
    Edit { id: ProdutoId },
    CloseModal,
    /// `editing` is the id the form was opened for, `None` in create mode.
    ConfirmModal {
        editing: Option<ProdutoId>,
        draft: ProdutoDraft,
    },
    Delete { id: ProdutoId },
    Logout,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenProdutos => "open_produtos",
            Self::FetchProdutos => "fetch_produtos",
            Self::AddProduto => "add_produto",
            Self::Edit { .. } => "edit",
            Self::CloseModal => "close_modal",
            Self::ConfirmModal { .. } => "confirm_modal",
            Self::Delete { .. } => "delete",
            Self::Logout => "logout",
        }
    }
}
