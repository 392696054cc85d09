// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Compact switch with a caption, used for the per-row `default` and `group` flags.

use eframe::egui;

/// Draw a labelled switch. Clicking either the switch or the caption flips `on`
/// and marks the returned response as changed.
pub fn flag_toggle(ui: &mut egui::Ui, on: &mut bool, caption: &str) -> egui::Response {
    let interact = ui.style().spacing.interact_size;
    let switch_size = egui::vec2(interact.x.max(30.0), interact.y.max(16.0));
    let galley = ui.painter().layout_no_wrap(
        caption.to_string(),
        egui::TextStyle::Small.resolve(ui.style()),
        ui.visuals().text_color(),
    );
    let gap = ui.style().spacing.item_spacing.x;
    let desired = egui::vec2(
        switch_size.x + gap + galley.size().x,
        switch_size.y.max(galley.size().y),
    );

    let (rect, mut response) = ui.allocate_exact_size(desired, egui::Sense::click());
    if response.clicked() {
        *on = !*on;
        response.mark_changed();
    }

    if ui.is_rect_visible(rect) {
        let switch_rect = egui::Rect::from_min_size(
            egui::pos2(rect.left(), rect.center().y - switch_size.y / 2.0),
            switch_size,
        );
        let t = ui.ctx().animate_bool(response.id, *on);
        let visuals = ui.style().interact_selectable(&response, *on);
        let fill = ui
            .visuals()
            .widgets
            .inactive
            .bg_fill
            .lerp_to_gamma(visuals.bg_fill, t);

        ui.painter().rect_filled(
            switch_rect.expand(visuals.expansion),
            switch_rect.height() * 0.5,
            fill,
        );
        let knob_radius = switch_rect.height() * 0.38;
        let knob_x = egui::lerp(
            (switch_rect.left() + knob_radius + 2.0)..=(switch_rect.right() - knob_radius - 2.0),
            t,
        );
        ui.painter().circle(
            egui::pos2(knob_x, switch_rect.center().y),
            knob_radius,
            visuals.bg_fill,
            visuals.fg_stroke,
        );

        let text_pos = egui::pos2(
            switch_rect.right() + gap,
            rect.center().y - galley.size().y / 2.0,
        );
        ui.painter()
            .galley(text_pos, galley, ui.visuals().text_color());
    }

    response
}
