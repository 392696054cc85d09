// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Option list editor component: editable rows, row buttons and drag reordering.

use eframe::egui;

use crate::config::Labels;
use crate::models::structural::move_record;
use crate::models::{
    OptionList, OptionRecord, RawRow, StructuralCommand, ValidationError, validate,
};
use crate::ui::components::flag_toggle;

/// Draft rows as typed, plus the outcome of the last submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionWizardModel {
    rows: Vec<OptionRecord>,
    errors: Vec<ValidationError>,
    dirty: bool,
    mandatory: bool,
    labels: Labels,
}

impl Default for OptionWizardModel {
    fn default() -> Self {
        Self::new(false, Labels::default())
    }
}

impl OptionWizardModel {
    pub fn new(mandatory: bool, labels: Labels) -> Self {
        Self {
            rows: vec![OptionRecord::blank()],
            errors: Vec::new(),
            dirty: false,
            mandatory,
            labels,
        }
    }

    pub fn rows(&self) -> &[OptionRecord] {
        &self.rows
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// True when rows were edited locally since the last load or save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Current drafts as an untrimmed list, e.g. for HTML export.
    pub fn draft_list(&self) -> OptionList {
        OptionList::new(self.rows.clone())
    }

    /// Drafts in the shape a posted form would have.
    fn raw_rows(&self) -> Vec<RawRow> {
        self.rows
            .iter()
            .map(|row| {
                RawRow::from([
                    ("reference".to_string(), row.reference.clone()),
                    ("value".to_string(), row.value.clone()),
                    ("label".to_string(), row.label.clone()),
                    ("default".to_string(), flag_token(row.is_default)),
                    ("group".to_string(), flag_token(row.is_group)),
                ])
            })
            .collect()
    }
}

fn flag_token(on: bool) -> String {
    (if on { "1" } else { "" }).to_string()
}

/// Text columns of a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextColumn {
    Reference,
    Value,
    Label,
}

/// Boolean columns of a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagColumn {
    Default,
    Group,
}

/// Messages produced by the option list view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionWizardMsg {
    /// Replace the drafts with a list fetched from the store.
    Loaded(OptionList),
    EditText {
        index: usize,
        column: TextColumn,
        text: String,
    },
    ToggleFlag {
        index: usize,
        column: FlagColumn,
        on: bool,
    },
    /// Row button pressed; persisted immediately against the stored list.
    Structural {
        command: StructuralCommand,
        index: usize,
    },
    /// Drag-and-drop reorder, kept local until the next submit.
    Reorder { from: usize, to: usize },
    SubmitRequested,
}

/// Side effects requested by the component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionWizardCommand {
    Save(OptionList),
    ApplyEdit {
        command: StructuralCommand,
        index: usize,
    },
}

/// Feedback surfaced to the status bar/modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionWizardEvent {
    pub message: String,
    pub is_error: bool,
}

/// Update the model based on a message.
pub fn update(
    model: &mut OptionWizardModel,
    msg: OptionWizardMsg,
    cmds: &mut Vec<OptionWizardCommand>,
) -> Option<OptionWizardEvent> {
    match msg {
        OptionWizardMsg::Loaded(list) => {
            model.rows = list.normalized().into_records();
            model.errors.clear();
            model.dirty = false;
            None
        }
        OptionWizardMsg::EditText {
            index,
            column,
            text,
        } => {
            if let Some(row) = model.rows.get_mut(index) {
                let slot = match column {
                    TextColumn::Reference => &mut row.reference,
                    TextColumn::Value => &mut row.value,
                    TextColumn::Label => &mut row.label,
                };
                *slot = text;
                model.dirty = true;
            }
            None
        }
        OptionWizardMsg::ToggleFlag { index, column, on } => {
            if let Some(row) = model.rows.get_mut(index) {
                match column {
                    FlagColumn::Default => row.is_default = on,
                    FlagColumn::Group => row.is_group = on,
                }
                model.dirty = true;
            }
            None
        }
        OptionWizardMsg::Structural { command, index } => {
            if index >= model.rows.len() {
                return None;
            }
            // Row indices address the stored list, which unsaved edits or drags
            // may no longer match.
            if model.dirty {
                return Some(OptionWizardEvent {
                    message: "Save or reload before using row buttons; the list has unsaved changes."
                        .to_string(),
                    is_error: true,
                });
            }
            cmds.push(OptionWizardCommand::ApplyEdit { command, index });
            None
        }
        OptionWizardMsg::Reorder { from, to } => {
            if from == to {
                return None;
            }
            if let Ok(moved) = move_record(&model.draft_list(), from, to) {
                model.rows = moved.into_records();
                model.dirty = true;
            }
            None
        }
        OptionWizardMsg::SubmitRequested => submit(model, cmds),
    }
}

/// Validate the drafts and queue a save when they pass.
fn submit(
    model: &mut OptionWizardModel,
    cmds: &mut Vec<OptionWizardCommand>,
) -> Option<OptionWizardEvent> {
    let report = validate(&model.raw_rows()).enforce_mandatory(model.mandatory);
    // Keep what the user typed on failure; show the trimmed rows on success.
    match report.into_result() {
        Ok(list) => {
            model.errors.clear();
            model.rows = list.clone().normalized().into_records();
            cmds.push(OptionWizardCommand::Save(list));
            None
        }
        Err(errors) => {
            let message = errors
                .iter()
                .map(|e| model.labels.get(e.as_str()).to_string())
                .collect::<Vec<_>>()
                .join("\n");
            model.errors = errors;
            Some(OptionWizardEvent {
                message,
                is_error: true,
            })
        }
    }
}

/// Render the component and return triggered messages.
pub fn view(ui: &mut egui::Ui, model: &OptionWizardModel) -> Vec<OptionWizardMsg> {
    let mut msgs = Vec::new();

    egui::CollapsingHeader::new("Options")
        .default_open(true)
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(
                    "References must be unique. Row buttons are saved right away; text edits are saved with Save.",
                )
                .small()
                .color(egui::Color32::from_gray(110)),
            );
            ui.add_space(8.0);

            render_header(ui, &model.labels);
            ui.separator();

            let last = model.rows.len().saturating_sub(1);
            for (index, row) in model.rows.iter().enumerate() {
                render_row(ui, index, last, row, model, &mut msgs);
                ui.add_space(4.0);
            }

            if !model.errors.is_empty() {
                ui.add_space(6.0);
                for err in &model.errors {
                    ui.label(
                        egui::RichText::new(model.labels.get(err.as_str()))
                            .color(egui::Color32::from_rgb(190, 40, 40)),
                    );
                }
            }
        });

    msgs
}

const TEXT_WIDTH: f32 = 150.0;

fn render_header(ui: &mut egui::Ui, labels: &Labels) {
    ui.horizontal(|ui| {
        ui.add_space(24.0);
        for key in ["opReference", "opValueProtected", "opLabel"] {
            ui.add_sized(
                [TEXT_WIDTH, 18.0],
                egui::Label::new(egui::RichText::new(labels.get(key)).strong()),
            );
        }
    });
}

fn render_row(
    ui: &mut egui::Ui,
    index: usize,
    last: usize,
    row: &OptionRecord,
    model: &OptionWizardModel,
    msgs: &mut Vec<OptionWizardMsg>,
) {
    let labels = &model.labels;
    let inner = ui.horizontal(|ui| {
        ui.dnd_drag_source(egui::Id::new(("option-row", index)), index, |ui| {
            ui.label(egui_phosphor::regular::DOTS_SIX_VERTICAL)
                .on_hover_text(labels.get("move"));
        });

        for (column, text, hint) in [
            (TextColumn::Reference, &row.reference, "reference"),
            (TextColumn::Value, &row.value, "value"),
            (TextColumn::Label, &row.label, "label"),
        ] {
            let mut buffer = text.clone();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut buffer)
                        .hint_text(hint)
                        .desired_width(TEXT_WIDTH),
                )
                .changed()
            {
                msgs.push(OptionWizardMsg::EditText {
                    index,
                    column,
                    text: buffer,
                });
            }
        }

        for (column, on, key) in [
            (FlagColumn::Default, row.is_default, "opDefault"),
            (FlagColumn::Group, row.is_group, "opGroup"),
        ] {
            let mut value = on;
            if flag_toggle(ui, &mut value, labels.get(key)).changed() {
                msgs.push(OptionWizardMsg::ToggleFlag {
                    index,
                    column,
                    on: value,
                });
            }
        }

        ui.separator();
        render_row_buttons(ui, index, last, labels, !model.dirty, msgs);
    });

    if let Some(from) = inner.response.dnd_release_payload::<usize>() {
        msgs.push(OptionWizardMsg::Reorder { from: *from, to: index });
    }
}

fn render_row_buttons(
    ui: &mut egui::Ui,
    index: usize,
    last: usize,
    labels: &Labels,
    saved: bool,
    msgs: &mut Vec<OptionWizardMsg>,
) {
    let buttons = [
        (StructuralCommand::Copy, egui_phosphor::regular::COPY, true),
        (StructuralCommand::MoveUp, egui_phosphor::regular::ARROW_UP, index > 0),
        (StructuralCommand::MoveDown, egui_phosphor::regular::ARROW_DOWN, index < last),
        (StructuralCommand::Delete, egui_phosphor::regular::TRASH_SIMPLE, true),
    ];

    for (command, icon, enabled) in buttons {
        let hover = labels.get(match command {
            StructuralCommand::Copy => "ow_copy",
            StructuralCommand::MoveUp => "ow_up",
            StructuralCommand::MoveDown => "ow_down",
            StructuralCommand::Delete => "ow_delete",
        });
        let mut response = ui
            .add_enabled(saved && enabled, egui::Button::new(icon))
            .on_hover_text(hover);
        if !saved {
            response = response.on_disabled_hover_text("Save first: row buttons act on the stored list");
        }
        if response.clicked() {
            msgs.push(OptionWizardMsg::Structural { command, index });
        }
    }
}
