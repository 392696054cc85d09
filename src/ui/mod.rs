// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for editing one option list.
//! Handles layout, the save/reload/export controls, and wiring to the store worker.

pub mod components;

use std::sync::Arc;

use eframe::egui;

use crate::config::WizardConfig;
use crate::logic::store::OptionStore;
use crate::mvu::{self, AppModel, Command, Msg};
use crate::ui::components::option_wizard::{self, OptionWizardMsg};

/// Stateful egui application for editing and persisting an option list.
pub struct OptionWizardApp {
    model: AppModel,
    title: String,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl OptionWizardApp {
    /// Spawn the store worker and queue the initial load.
    pub fn new(config: &WizardConfig, store: Arc<dyn OptionStore>) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        // A single worker applies store writes in the order they were queued.
        std::thread::spawn(move || {
            for cmd in cmd_rx.iter() {
                let msg = mvu::run_command(cmd, store.as_ref());
                if msg_tx.send(msg).is_err() {
                    break;
                }
            }
        });

        Self {
            model: AppModel::from_config(config),
            title: config.record_key().to_string(),
            inbox: vec![Msg::ReloadRequested],
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for OptionWizardApp {
    /// Drains worker results, runs queued messages through the MVU update and
    /// dispatches the resulting commands.
    fn logic(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pull messages produced by the command worker.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        let msgs = std::mem::take(&mut self.inbox);
        for msg in msgs {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
        }
        if self.model.pending_commands > 0 {
            ctx.request_repaint();
        }
    }

    /// Renders the panels; messages they emit are handled on the next `logic` pass.
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ui.ctx());

        egui::Panel::top("top_bar").show_inside(ui, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Option wizard");
                ui.label(
                    egui::RichText::new(&self.title)
                        .small()
                        .color(egui::Color32::from_gray(110)),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(2.0);
                    egui::widgets::global_theme_preference_switch(ui);
                    ui.separator();
                    self.render_save_button(ui);
                    self.render_reload_button(ui);
                    ui.separator();
                    self.render_export_button(ui);
                });
            });
            ui.add_space(4.0);
        });

        let ctx = ui.ctx().clone();
        self.render_error_modal(&ctx);

        egui::Panel::bottom("status_panel")
            .resizable(false)
            .show_inside(ui, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            ui.add_space(8.0);
            egui::ScrollArea::both().show(ui, |ui| {
                let msgs = option_wizard::view(ui, &self.model.wizard);
                self.inbox.extend(msgs.into_iter().map(Msg::Wizard));
            });
        });

        if !self.inbox.is_empty() {
            ctx.request_repaint();
        }
    }
}

impl OptionWizardApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    /// Validate and persist the drafts; disabled while a command is in flight.
    fn render_save_button(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(format!("{} Save", egui_phosphor::regular::FLOPPY_DISK));
        if ui
            .add_enabled(self.model.pending_commands == 0, button)
            .on_disabled_hover_text("Waiting for the store")
            .clicked()
        {
            self.inbox
                .push(Msg::Wizard(OptionWizardMsg::SubmitRequested));
        }
    }

    fn render_reload_button(&mut self, ui: &mut egui::Ui) {
        if ui
            .button(egui_phosphor::regular::ARROWS_CLOCKWISE)
            .on_hover_text("Reload from store (discards unsaved edits)")
            .clicked()
        {
            self.inbox.push(Msg::ReloadRequested);
        }
    }

    /// Ask for a target file and export the widget markup for the current drafts.
    fn render_export_button(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(format!("{} Export HTML", egui_phosphor::regular::FILE_HTML));
        if ui.add(button).clicked() {
            let dialog = rfd::FileDialog::new()
                .set_title("Export option widget")
                .add_filter("HTML", &["html"])
                .set_file_name(format!("{}.html", self.model.widget_id));

            match dialog.save_file() {
                Some(path) => self.inbox.push(Msg::ExportRequested(path)),
                None => self.inbox.push(Msg::ExportCancelled),
            }
        }
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    /// Render latest status message when present.
    fn render_status(&self, ui: &mut egui::Ui) {
        let dirty = if self.model.wizard.is_dirty() {
            "  • unsaved changes"
        } else {
            ""
        };
        if let Some(text) = &self.model.status {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!("{text}{dirty}"))
                        .color(egui::Color32::from_gray(68)),
                );
                if self.model.pending_commands > 0 {
                    ui.add(egui::Spinner::new().size(14.0)).on_hover_text(format!(
                        "{} store operation(s) running",
                        self.model.pending_commands
                    ));
                }
            });
        }
    }
}
