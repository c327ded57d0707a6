//! Product form modal. Owns a working copy of the fields while open and hands
//! the finished draft back to the caller on confirm.

use client_core::ModalState;
use shared::{
    domain::ProdutoId,
    protocol::{Produto, ProdutoDraft},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ProdutoId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Pending,
    Confirm(ProdutoDraft),
    Cancel,
}

#[derive(Debug, Clone)]
pub struct ProdutoForm {
    mode: FormMode,
    draft: ProdutoDraft,
    /// Set once a confirm is queued; cleared when the backend answers.
    submitting: bool,
}

impl ProdutoForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            draft: ProdutoDraft::default(),
            submitting: false,
        }
    }

    pub fn edit(produto: &Produto) -> Self {
        Self {
            mode: FormMode::Edit(produto.id.clone()),
            draft: produto.draft(),
            submitting: false,
        }
    }

    pub fn for_modal(state: &ModalState) -> Option<Self> {
        match state {
            ModalState::Closed => None,
            ModalState::Creating => Some(Self::create()),
            ModalState::Editing { produto, .. } => Some(Self::edit(produto)),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn editing_id(&self) -> Option<&ProdutoId> {
        match &self.mode {
            FormMode::Create => None,
            FormMode::Edit(id) => Some(id),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    pub fn draft(&self) -> &ProdutoDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProdutoDraft {
        &mut self.draft
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Adicionar Produto",
            FormMode::Edit(_) => "Editar Produto",
        }
    }

    /// Trimmed draft, or `None` while a required field is blank or a previous
    /// confirm is still in flight.
    pub fn submit(&self) -> Option<ProdutoDraft> {
        if self.submitting {
            return None;
        }
        let draft = self.draft.trimmed();
        draft.is_complete().then_some(draft)
    }

    pub fn show(&mut self, ctx: &egui::Context) -> FormOutcome {
        let mut open = true;
        let mut outcome = FormOutcome::Pending;

        egui::Window::new(self.title())
            .id(egui::Id::new("produto_form_modal"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .open(&mut open)
            .show(ctx, |ui| {
                egui::Grid::new("produto_form_fields")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Código");
                        ui.text_edit_singleline(&mut self.draft.codigo);
                        ui.end_row();

                        ui.label("Nome");
                        ui.text_edit_singleline(&mut self.draft.nome);
                        ui.end_row();

                        ui.label("Tipo");
                        ui.text_edit_singleline(&mut self.draft.tipo);
                        ui.end_row();

                        ui.label("Descrição");
                        ui.add(egui::TextEdit::multiline(&mut self.draft.descricao).desired_rows(3));
                        ui.end_row();
                    });

                let missing = self.draft.missing_required();
                if !missing.is_empty() {
                    ui.label(
                        egui::RichText::new(format!("Obrigatório: {}", missing.join(", ")))
                            .weak(),
                    );
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Cancelar").clicked() {
                        outcome = FormOutcome::Cancel;
                    }
                    let confirm = ui.add_enabled(
                        missing.is_empty() && !self.submitting,
                        egui::Button::new("Confirmar"),
                    );
                    if self.submitting {
                        ui.spinner();
                    }
                    if confirm.clicked() {
                        if let Some(draft) = self.submit() {
                            outcome = FormOutcome::Confirm(draft);
                        }
                    }
                });
            });

        if !open {
            outcome = FormOutcome::Cancel;
        }
        outcome
    }
}
