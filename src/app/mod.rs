// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring egui/eframe to launch the option wizard UI.

use std::sync::Arc;

use eframe::egui;
use egui_phosphor::Variant;

use crate::config::WizardConfig;
use crate::logic::store::JsonFileStore;
use crate::ui::OptionWizardApp;

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run(config: WizardConfig) -> eframe::Result<()> {
    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 640.0])
            .with_min_inner_size([760.0, 360.0]),
        ..Default::default()
    };

    tracing::info!(
        store = %config.store_path.display(),
        record = %config.record_key(),
        "starting option wizard"
    );
    let store = Arc::new(JsonFileStore::new(config.store_path.clone()));

    eframe::run_native(
        "Option wizard",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(OptionWizardApp::new(&config, store)))
        }),
    )
}
