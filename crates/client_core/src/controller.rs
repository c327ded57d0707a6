//! Product list controller: owns the in-memory collection, the modal state
//! and the current route, and turns user intents into backend calls.
//!
//! The collection is only ever replaced by a successful fetch. Every mutation
//! is followed by a full refetch, never by a local patch.

use std::{fmt, sync::Arc, time::Duration};

use shared::{
    domain::ProdutoId,
    error::{ApiError, ErrorCode},
    protocol::{Produto, ProdutoDraft},
};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use crate::{ClientError, ProdutosApi};

pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);
const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Produtos,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Creating,
    Editing {
        id: ProdutoId,
        produto: Produto,
    },
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn target(&self) -> ModalTarget {
        match self {
            Self::Closed => ModalTarget::Closed,
            Self::Creating => ModalTarget::Create,
            Self::Editing { id, .. } => ModalTarget::Edit(id.clone()),
        }
    }

    pub fn editing_id(&self) -> Option<&ProdutoId> {
        match self {
            Self::Editing { id, .. } => Some(id),
            Self::Closed | Self::Creating => None,
        }
    }
}

/// What a modal confirm would act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalTarget {
    Closed,
    Create,
    Edit(ProdutoId),
}

impl fmt::Display for ModalTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => f.write_str("closed"),
            Self::Create => f.write_str("create"),
            Self::Edit(id) => write!(f, "edit {id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: Option<String>,
    pub status: NotificationStatus,
    pub duration: Duration,
    pub is_closable: bool,
}

impl Notification {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: NotificationStatus::Success,
            duration: NOTIFICATION_DURATION,
            is_closable: true,
        }
    }

    pub fn failure(title: impl Into<String>, err: &ApiError) -> Self {
        let description = match err.code {
            ErrorCode::Internal => err.message.clone(),
            code => code.describe().to_string(),
        };
        Self {
            title: title.into(),
            description: Some(description),
            status: NotificationStatus::Error,
            duration: NOTIFICATION_DURATION,
            is_closable: true,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ControllerEvent {
    ProdutosReplaced(Vec<Produto>),
    ModalChanged(ModalState),
    Navigated(Route),
    Notify(Notification),
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("produto {0} is not in the current list")]
    UnknownProduto(ProdutoId),
    #[error("no produto is being edited")]
    NotEditing,
    #[error("confirm for {submitted} does not match the open modal ({current})")]
    StaleConfirm {
        submitted: ModalTarget,
        current: ModalTarget,
    },
}

pub struct ProdutoListController {
    api: Arc<dyn ProdutosApi>,
    produtos: Vec<Produto>,
    modal: ModalState,
    route: Route,
    events: broadcast::Sender<ControllerEvent>,
}

impl ProdutoListController {
    pub fn new(api: Arc<dyn ProdutosApi>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            api,
            produtos: Vec::new(),
            modal: ModalState::Closed,
            route: Route::Produtos,
            events,
        }
    }

    pub fn produtos(&self) -> &[Produto] {
        &self.produtos
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn editing_produto_id(&self) -> Option<&ProdutoId> {
        self.modal.editing_id()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    /// Mount effect of the product page.
    pub async fn open_produtos_page(&mut self) -> Result<(), ControllerError> {
        self.navigate(Route::Produtos);
        self.fetch_produtos().await
    }

    pub async fn fetch_produtos(&mut self) -> Result<(), ControllerError> {
        match self.api.list().await {
            Ok(produtos) => {
                info!(count = produtos.len(), "produtos: collection refreshed");
                self.produtos = produtos;
                self.emit(ControllerEvent::ProdutosReplaced(self.produtos.clone()));
                Ok(())
            }
            Err(err) => Err(self.report_failure("Erro ao buscar produtos", err)),
        }
    }

    pub async fn handle_delete(&mut self, id: &ProdutoId) -> Result<(), ControllerError> {
        if let Err(err) = self.api.delete(id).await {
            return Err(self.report_failure("Erro ao excluir produto", err));
        }
        info!(id = %id, "produtos: deleted");

        self.refresh_after_mutation().await;
        self.notify(Notification::success("Produto deletado!"));
        Ok(())
    }

    pub fn handle_add_produto(&mut self) {
        self.set_modal(ModalState::Creating);
    }

    pub fn handle_modal_close(&mut self) {
        self.set_modal(ModalState::Closed);
    }

    pub async fn handle_produto_confirm(
        &mut self,
        draft: ProdutoDraft,
    ) -> Result<(), ControllerError> {
        if let Err(err) = self.api.create(&draft).await {
            return Err(self.report_failure("Erro ao adicionar produto", err));
        }
        info!(codigo = %draft.codigo, "produtos: created");

        self.refresh_after_mutation().await;
        self.set_modal(ModalState::Closed);
        self.notify(Notification::success("Produto adicionado!"));
        Ok(())
    }

    /// Opens the modal in edit mode from the in-memory list. No network call.
    pub fn handle_edit(&mut self, id: &ProdutoId) -> Result<(), ControllerError> {
        let Some(produto) = self.produtos.iter().find(|p| &p.id == id).cloned() else {
            warn!(id = %id, "produtos: edit requested for an id missing from the list");
            return Err(ControllerError::UnknownProduto(id.clone()));
        };

        self.set_modal(ModalState::Editing {
            id: id.clone(),
            produto,
        });
        Ok(())
    }

    pub async fn handle_produto_edit_confirm(
        &mut self,
        draft: ProdutoDraft,
    ) -> Result<(), ControllerError> {
        let Some(id) = self.modal.editing_id().cloned() else {
            warn!("produtos: edit confirm without a tracked produto");
            return Err(ControllerError::NotEditing);
        };

        if let Err(err) = self.api.update(&id, &draft).await {
            return Err(self.report_failure("Erro ao editar produto", err));
        }
        info!(id = %id, "produtos: updated");

        self.refresh_after_mutation().await;
        self.set_modal(ModalState::Closed);
        self.notify(Notification::success("Produto editado!"));
        Ok(())
    }

    /// Routes the modal's confirm to update or create, according to the mode
    /// the form was rendered in. The confirm is dropped unless the modal is
    /// still open in that same mode.
    pub async fn confirm_modal(
        &mut self,
        editing: Option<ProdutoId>,
        draft: ProdutoDraft,
    ) -> Result<(), ControllerError> {
        let current = self.modal.target();
        let submitted = match editing {
            Some(id) => ModalTarget::Edit(id),
            None => ModalTarget::Create,
        };
        if submitted != current {
            warn!(%submitted, %current, "produtos: dropping confirm for a modal that is no longer open");
            return Err(ControllerError::StaleConfirm { submitted, current });
        }

        if matches!(submitted, ModalTarget::Edit(_)) {
            self.handle_produto_edit_confirm(draft).await
        } else {
            self.handle_produto_confirm(draft).await
        }
    }

    pub fn handle_logout(&mut self) {
        self.set_modal(ModalState::Closed);
        self.navigate(Route::Home);
    }

    async fn refresh_after_mutation(&mut self) {
        if let Err(err) = self.fetch_produtos().await {
            warn!("produtos: refetch after mutation failed, keeping previous list: {err}");
        }
    }

    fn report_failure(&self, title: &str, err: ClientError) -> ControllerError {
        let api_error = err.to_api_error();
        error!(code = ?api_error.code, "{title}: {err}");
        self.notify(Notification::failure(title, &api_error));
        ControllerError::Client(err)
    }

    fn set_modal(&mut self, next: ModalState) {
        if self.modal == next {
            return;
        }
        self.modal = next;
        self.emit(ControllerEvent::ModalChanged(self.modal.clone()));
    }

    fn navigate(&mut self, route: Route) {
        if self.route == route {
            return;
        }
        info!(?route, "produtos: navigating");
        self.route = route;
        self.emit(ControllerEvent::Navigated(route));
    }

    fn notify(&self, notification: Notification) {
        self.emit(ControllerEvent::Notify(notification));
    }

    fn emit(&self, event: ControllerEvent) {
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
