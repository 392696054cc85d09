// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring component state, messages, and commands.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::{Labels, WizardConfig};
use crate::logic::html::render_widget;
use crate::logic::store::{OptionStore, RecordKey};
use crate::models::{OptionList, StructuralCommand, StructuralEditError, apply_command};
use crate::ui::components::option_wizard::{
    self, OptionWizardCommand, OptionWizardModel, OptionWizardMsg,
};

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    /// Store location of the edited list.
    pub record: Option<RecordKey>,
    /// Input name prefix used for HTML export.
    pub widget_id: String,
    /// Option list editor state.
    pub wizard: OptionWizardModel,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl AppModel {
    pub fn from_config(config: &WizardConfig) -> Self {
        Self {
            record: Some(config.record_key()),
            widget_id: config.widget_id.clone(),
            wizard: OptionWizardModel::new(config.mandatory, config.labels.clone()),
            ..Default::default()
        }
    }
}

/// Result of a structural edit run against the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Applied {
        command: StructuralCommand,
        list: OptionList,
    },
    /// The row no longer exists in the stored list; nothing was written.
    Ignored { list: OptionList },
}

/// Application messages routed through the update function.
pub enum Msg {
    ReloadRequested,
    LoadCompleted(Result<OptionList, String>),
    SaveCompleted(Result<OptionList, String>),
    EditCompleted(Result<EditOutcome, String>),
    ExportRequested(PathBuf),
    ExportCancelled,
    ExportCompleted(Result<PathBuf, String>),
    DismissError,
    Wizard(OptionWizardMsg),
}

/// Commands represent side-effects executed between frames.
pub enum Command {
    Load(RecordKey),
    Save {
        key: RecordKey,
        list: OptionList,
    },
    ApplyEdit {
        key: RecordKey,
        command: StructuralCommand,
        index: usize,
    },
    ExportHtml {
        path: PathBuf,
        list: OptionList,
        widget_id: String,
        labels: Labels,
    },
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::ReloadRequested => match model.record.clone() {
            Some(key) => cmds.push(Command::Load(key)),
            None => surface_event(model, "No record configured.".to_string(), true),
        },
        Msg::LoadCompleted(result) => match result {
            Ok(list) => {
                let rows = list.len();
                forward(model, OptionWizardMsg::Loaded(list), cmds);
                surface_event(model, format!("Loaded {rows} option(s)."), false);
            }
            Err(err) => surface_event(model, format!("Failed to load options:\n\n{err}"), true),
        },
        Msg::SaveCompleted(result) => match result {
            Ok(list) => {
                let rows = list.len();
                forward(model, OptionWizardMsg::Loaded(list), cmds);
                surface_event(model, format!("Saved {rows} option(s)."), false);
            }
            Err(err) => surface_event(model, format!("Failed to save options:\n\n{err}"), true),
        },
        Msg::EditCompleted(result) => match result {
            Ok(EditOutcome::Applied { command, list }) => {
                forward(model, OptionWizardMsg::Loaded(list), cmds);
                surface_event(model, format!("Applied '{}'.", command.as_str()), false);
            }
            Ok(EditOutcome::Ignored { list }) => {
                forward(model, OptionWizardMsg::Loaded(list), cmds);
                surface_event(
                    model,
                    "Row no longer exists; the list was reloaded.".to_string(),
                    false,
                );
            }
            Err(err) => surface_event(model, format!("Failed to update options:\n\n{err}"), true),
        },
        Msg::ExportRequested(path) => cmds.push(Command::ExportHtml {
            path,
            list: model.wizard.draft_list(),
            widget_id: model.widget_id.clone(),
            labels: model.wizard.labels().clone(),
        }),
        Msg::ExportCancelled => surface_event(model, "Export cancelled.".to_string(), false),
        Msg::ExportCompleted(result) => match result {
            Ok(path) => surface_event(model, format!("HTML exported: {}", path.display()), false),
            Err(err) => surface_event(model, format!("Failed to export HTML:\n\n{err}"), true),
        },
        Msg::DismissError => model.error = None,
        Msg::Wizard(m) => forward(model, m, cmds),
    }
}

/// Run a component message and translate its commands into root commands.
fn forward(model: &mut AppModel, msg: OptionWizardMsg, cmds: &mut Vec<Command>) {
    let mut wizard_cmds = Vec::new();
    if let Some(event) = option_wizard::update(&mut model.wizard, msg, &mut wizard_cmds) {
        surface_event(model, event.message, event.is_error);
    }
    if wizard_cmds.is_empty() {
        return;
    }
    let Some(key) = model.record.clone() else {
        surface_event(model, "No record configured.".to_string(), true);
        return;
    };
    for c in wizard_cmds {
        match c {
            OptionWizardCommand::Save(list) => cmds.push(Command::Save {
                key: key.clone(),
                list,
            }),
            OptionWizardCommand::ApplyEdit { command, index } => cmds.push(Command::ApplyEdit {
                key: key.clone(),
                command,
                index,
            }),
        }
    }
}

/// Execute a command synchronously and return a resulting message.
pub fn run_command(cmd: Command, store: &dyn OptionStore) -> Msg {
    match cmd {
        Command::Load(key) => Msg::LoadCompleted(store.load(&key).map_err(|e| format!("{e:#}"))),
        Command::Save { key, list } => {
            let res = store.save(&key, &list).map(|_| list);
            Msg::SaveCompleted(res.map_err(|e| format!("{e:#}")))
        }
        Command::ApplyEdit {
            key,
            command,
            index,
        } => Msg::EditCompleted(
            apply_stored_edit(store, &key, command, index).map_err(|e| format!("{e:#}")),
        ),
        Command::ExportHtml {
            path,
            list,
            widget_id,
            labels,
        } => {
            let html = render_widget(&list, &widget_id, &labels);
            let res = std::fs::write(&path, html)
                .with_context(|| format!("Failed to write HTML file {:?}", path))
                .map(|_| path);
            Msg::ExportCompleted(res.map_err(|e| format!("{e:#}")))
        }
    }
}

/// Fetch the stored list, apply one edit and write it back.
fn apply_stored_edit(
    store: &dyn OptionStore,
    key: &RecordKey,
    command: StructuralCommand,
    index: usize,
) -> Result<EditOutcome> {
    let current = store.load(key)?;
    match apply_command(&current, command, index) {
        Ok(list) => {
            store.save(key, &list)?;
            Ok(EditOutcome::Applied { command, list })
        }
        Err(err @ StructuralEditError::OutOfRange { .. }) => {
            tracing::warn!(%key, command = command.as_str(), "ignoring edit: {err}");
            Ok(EditOutcome::Ignored { list: current })
        }
    }
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        model.error = Some(message.clone());
    }
    model.status = Some(message);
}
