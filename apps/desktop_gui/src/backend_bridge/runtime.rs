//! Backend worker thread: tokio runtime, product controller, and event intake.

use std::{sync::Arc, thread};

use anyhow::Context;
use client_core::{ClientSettings, ControllerEvent, HttpProdutosClient, ProdutoListController};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(settings: ClientSettings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(run_worker(settings, cmd_rx, ui_tx));
    });
}

fn build_controller(settings: &ClientSettings) -> anyhow::Result<ProdutoListController> {
    let client = HttpProdutosClient::new(settings).with_context(|| {
        format!(
            "backend worker startup failure: unusable api url '{}'",
            settings.api_url
        )
    })?;
    Ok(ProdutoListController::new(Arc::new(client)))
}

async fn run_worker(
    settings: ClientSettings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    let mut controller = match build_controller(&settings) {
        Ok(controller) => controller,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("{err:#}"),
            )));
            tracing::error!("{err:#}");
            return;
        }
    };

    let forward_task = tokio::spawn(forward_controller_events(
        controller.subscribe_events(),
        ui_tx.clone(),
    ));
    let _ = ui_tx.try_send(UiEvent::Info(format!(
        "Backend worker ready ({})",
        settings.api_url
    )));

    execute_command(&mut controller, BackendCommand::OpenProdutos).await;
    while let Ok(cmd) = cmd_rx.recv() {
        execute_command(&mut controller, cmd).await;
    }

    forward_task.abort();
    tracing::info!("ui command queue closed; backend worker exiting");
}

/// Runs one command to completion; failures were already logged and notified
/// by the controller.
pub async fn execute_command(controller: &mut ProdutoListController, cmd: BackendCommand) {
    let name = cmd.name();
    let result = match cmd {
        BackendCommand::OpenProdutos => controller.open_produtos_page().await,
        BackendCommand::FetchProdutos => controller.fetch_produtos().await,
        BackendCommand::AddProduto => {
            controller.handle_add_produto();
            Ok(())
        }
        BackendCommand::Edit { id } => controller.handle_edit(&id),
        BackendCommand::CloseModal => {
            controller.handle_modal_close();
            Ok(())
        }
        BackendCommand::ConfirmModal { editing, draft } => {
            controller.confirm_modal(editing, draft).await
        }
        BackendCommand::Delete { id } => controller.handle_delete(&id).await,
        BackendCommand::Logout => {
            controller.handle_logout();
            Ok(())
        }
    };

    if let Err(err) = result {
        tracing::debug!(command = name, "backend command failed: {err}");
    }
}

async fn forward_controller_events(
    mut events: broadcast::Receiver<ControllerEvent>,
    ui_tx: Sender<UiEvent>,
) {
    loop {
        match events.recv().await {
            Ok(event) => match ui_tx.try_send(UiEvent::Controller(event)) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    tracing::warn!("ui event queue is full; dropping controller event");
                }
                Err(TrySendError::Disconnected(_)) => break,
            },
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "controller event stream lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
