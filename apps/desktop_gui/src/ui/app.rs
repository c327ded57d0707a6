use std::time::Duration;

use client_core::{ControllerEvent, NotificationStatus, Route};
use crossbeam_channel::{Receiver, Sender};
use shared::{domain::ProdutoId, protocol::Produto};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::form::{FormOutcome, ProdutoForm};
use crate::ui::toast::Toasts;

const IDLE_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
enum CardAction {
    Edit(ProdutoId),
    Delete(ProdutoId),
}

pub struct ProdutosApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    route: Route,
    produtos: Vec<Produto>,
    loaded_once: bool,
    form: Option<ProdutoForm>,
    toasts: Toasts,

    api_url: String,
    status: String,
}

impl ProdutosApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, api_url: String) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            route: Route::Produtos,
            produtos: Vec::new(),
            loaded_once: false,
            form: None,
            toasts: Toasts::default(),
            api_url,
            status: "Carregando produtos...".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::Error(err) => {
                self.status = format!("{} error: {}", err_label(err.category()), err.message());
                self.toasts.push(err.to_notification());
                self.release_form();
            }
            UiEvent::Controller(ControllerEvent::ProdutosReplaced(produtos)) => {
                self.status = format!("{} produto(s) em {}", produtos.len(), self.api_url);
                self.produtos = produtos;
                self.loaded_once = true;
            }
            UiEvent::Controller(ControllerEvent::ModalChanged(state)) => {
                self.form = ProdutoForm::for_modal(&state);
            }
            UiEvent::Controller(ControllerEvent::Navigated(route)) => {
                self.route = route;
                if route == Route::Home {
                    self.form = None;
                }
            }
            UiEvent::Controller(ControllerEvent::Notify(notification)) => {
                // A failed write leaves the modal open without a ModalChanged.
                if notification.status == NotificationStatus::Error {
                    self.release_form();
                }
                self.toasts.push(notification);
            }
        }
    }

    fn release_form(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.set_submitting(false);
        }
    }

    /// Returns whether the command reached the worker queue.
    fn queue(&mut self, cmd: BackendCommand) -> bool {
        match dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            Ok(()) => true,
            Err(err) => {
                self.toasts.push(err.to_notification());
                false
            }
        }
    }

    fn show_home_screen(&mut self, ctx: &egui::Context) {
        let mut enter = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.3);
                ui.heading("Produtos");
                ui.label("Sessão encerrada.");
                ui.add_space(12.0);
                enter = ui.button("Entrar").clicked();
            });
        });

        if enter {
            self.queue(BackendCommand::OpenProdutos);
        }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        let mut logout = false;
        let mut refresh = false;
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Produtos");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    logout = ui.button("Sair").clicked();
                    refresh = ui.button("Atualizar").clicked();
                });
            });
        });

        if logout {
            self.queue(BackendCommand::Logout);
        } else if refresh {
            self.queue(BackendCommand::FetchProdutos);
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(self.status.as_str());
        });
    }

    fn show_produtos_screen(&mut self, ctx: &egui::Context) {
        let mut add = false;
        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            add = ui.button("➕ Adicionar Produto").clicked();
            ui.add_space(8.0);

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if self.produtos.is_empty() {
                        let text = if self.loaded_once {
                            "Nenhum produto cadastrado."
                        } else {
                            "Carregando produtos..."
                        };
                        ui.label(egui::RichText::new(text).weak());
                    }
                    for produto in &self.produtos {
                        if let Some(clicked) = render_produto_card(ui, produto) {
                            action = Some(clicked);
                        }
                        ui.add_space(8.0);
                    }
                });
        });

        if add {
            self.queue(BackendCommand::AddProduto);
        }
        match action {
            Some(CardAction::Edit(id)) => {
                self.queue(BackendCommand::Edit { id });
            }
            Some(CardAction::Delete(id)) => {
                self.queue(BackendCommand::Delete { id });
            }
            None => {}
        }
    }

    fn show_form_modal(&mut self, ctx: &egui::Context) {
        let outcome = match self.form.as_mut() {
            Some(form) => form.show(ctx),
            None => return,
        };
        self.apply_form_outcome(outcome);
    }

    fn apply_form_outcome(&mut self, outcome: FormOutcome) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match outcome {
            FormOutcome::Pending => {}
            FormOutcome::Confirm(draft) => {
                let editing = form.editing_id().cloned();
                form.set_submitting(true);
                if !self.queue(BackendCommand::ConfirmModal { editing, draft }) {
                    self.release_form();
                }
            }
            FormOutcome::Cancel => {
                // Closed locally only once the worker has the close request.
                if self.queue(BackendCommand::CloseModal) {
                    self.form = None;
                }
            }
        }
    }
}

fn render_produto_card(ui: &mut egui::Ui, produto: &Produto) -> Option<CardAction> {
    let mut action = None;
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.heading(produto.nome.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("🗑").on_hover_text("Apagar").clicked() {
                        action = Some(CardAction::Delete(produto.id.clone()));
                    }
                    if ui.small_button("✏").on_hover_text("Editar").clicked() {
                        action = Some(CardAction::Edit(produto.id.clone()));
                    }
                });
            });
            labeled_line(ui, "Código:", &produto.codigo);
            labeled_line(ui, "Tipo:", &produto.tipo);
            labeled_line(ui, "Descrição:", &produto.descricao);
        });
    action
}

fn labeled_line(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new(label).strong());
        ui.label(value);
    });
}

impl eframe::App for ProdutosApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        match self.route {
            Route::Home => self.show_home_screen(ctx),
            Route::Produtos => {
                self.show_header(ctx);
                self.show_status_bar(ctx);
                self.show_produtos_screen(ctx);
                self.show_form_modal(ctx);
            }
        }
        self.toasts.show(ctx);

        let mut repaint_after = IDLE_REPAINT_INTERVAL;
        if !self.toasts.is_empty() {
            if let Some(expiry) = self.toasts.next_expiry(std::time::Instant::now()) {
                repaint_after = repaint_after.min(expiry);
            }
        }
        ctx.request_repaint_after(repaint_after);
    }
}
