//! Stack of transient notifications drawn at the top of the window.

use std::time::{Duration, Instant};

use client_core::{Notification, NotificationStatus};

const MAX_VISIBLE_TOASTS: usize = 5;

struct Toast {
    id: u64,
    notification: Notification,
    shown_at: Instant,
}

#[derive(Default)]
pub struct Toasts {
    items: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    pub fn push(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }

    fn push_at(&mut self, notification: Notification, now: Instant) {
        self.next_id = self.next_id.wrapping_add(1);
        self.items.push(Toast {
            id: self.next_id,
            notification,
            shown_at: now,
        });
        if self.items.len() > MAX_VISIBLE_TOASTS {
            self.items.remove(0);
        }
    }

    pub fn prune(&mut self, now: Instant) {
        self.items
            .retain(|toast| now.saturating_duration_since(toast.shown_at) < toast.notification.duration);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Time until the next toast expires.
    pub fn next_expiry(&self, now: Instant) -> Option<Duration> {
        self.items
            .iter()
            .map(|toast| {
                toast
                    .notification
                    .duration
                    .saturating_sub(now.saturating_duration_since(toast.shown_at))
            })
            .min()
    }

    fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.prune(Instant::now());
        if self.items.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toast_stack"))
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 16.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for toast in &self.items {
                    let (fill, stroke) = toast_colors(toast.notification.status);
                    egui::Frame::new()
                        .fill(fill)
                        .stroke(egui::Stroke::new(1.0, stroke))
                        .corner_radius(egui::CornerRadius::same(8))
                        .inner_margin(egui::Margin::symmetric(12, 8))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.vertical(|ui| {
                                    ui.label(
                                        egui::RichText::new(&toast.notification.title)
                                            .strong()
                                            .color(egui::Color32::WHITE),
                                    );
                                    if let Some(description) = &toast.notification.description {
                                        ui.label(
                                            egui::RichText::new(description)
                                                .color(egui::Color32::WHITE),
                                        );
                                    }
                                });
                                if toast.notification.is_closable && ui.small_button("✕").clicked()
                                {
                                    dismissed = Some(toast.id);
                                }
                            });
                        });
                    ui.add_space(6.0);
                }
            });

        if let Some(id) = dismissed {
            self.dismiss(id);
        }
        if let Some(remaining) = self.next_expiry(Instant::now()) {
            ctx.request_repaint_after(remaining);
        }
    }
}

fn toast_colors(status: NotificationStatus) -> (egui::Color32, egui::Color32) {
    match status {
        NotificationStatus::Success => (
            egui::Color32::from_rgb(39, 103, 73),
            egui::Color32::from_rgb(72, 187, 120),
        ),
        NotificationStatus::Error => (
            egui::Color32::from_rgb(111, 53, 53),
            egui::Color32::from_rgb(175, 96, 96),
        ),
    }
}
