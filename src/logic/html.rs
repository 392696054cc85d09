// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! HTML markup for hosts that embed the option wizard in a server-rendered form.

use std::fmt::Write;

use crate::config::Labels;
use crate::models::{OptionList, RowButton};

/// Escape text for use inside element content or a quoted attribute.
fn esc(text: &str) -> String {
    ammonia::clean_text(text)
}

/// Quote text as a JavaScript string literal safe to place inside `<script>`.
fn js_string(text: &str) -> String {
    serde_json::Value::from(text)
        .to_string()
        .replace('<', "\\u003c")
}

/// Render the option table with one input row per record and the fixed row buttons.
///
/// The list is normalized first, so the table always has at least one row.
pub fn render_widget(list: &OptionList, widget_id: &str, labels: &Labels) -> String {
    let list = list.clone().normalized();
    let id = esc(widget_id);
    let mut out = String::new();

    let _ = write!(
        out,
        "<table class=\"tl_optionwizard\" id=\"ctrl_{id}\">\n  <thead>\n    <tr>\n      \
         <th>{}</th>\n      <th>{}</th>\n      <th>{}</th>\n      \
         <th>&nbsp;</th>\n      <th>&nbsp;</th>\n      <th>&nbsp;</th>\n    </tr>\n  </thead>\n  \
         <tbody class=\"sortable\">",
        esc(labels.get("opReference")),
        esc(labels.get("opValueProtected")),
        esc(labels.get("opLabel")),
    );

    for (i, record) in list.records().iter().enumerate() {
        out.push_str("\n    <tr>");
        for (field, value) in [
            ("reference", &record.reference),
            ("value", &record.value),
            ("label", &record.label),
        ] {
            let _ = write!(
                out,
                "\n      <td><input type=\"text\" name=\"{id}[{i}][{field}]\" id=\"{id}_{field}_{i}\" \
                 class=\"tl_text\" value=\"{}\"></td>",
                esc(value)
            );
        }
        for (field, checked, label_key) in [
            ("default", record.is_default, "opDefault"),
            ("group", record.is_group, "opGroup"),
        ] {
            let _ = write!(
                out,
                "\n      <td><input type=\"checkbox\" name=\"{id}[{i}][{field}]\" id=\"{id}_{field}_{i}\" \
                 class=\"fw_checkbox\" value=\"1\"{}> <label for=\"{id}_{field}_{i}\">{}</label></td>",
                if checked { " checked" } else { "" },
                esc(labels.get(label_key))
            );
        }

        out.push_str("\n      <td>");
        for button in RowButton::ALL {
            render_button(&mut out, button, labels);
        }
        out.push_str("</td>\n    </tr>");
    }

    let _ = write!(
        out,
        "\n  </tbody>\n</table><script>Backend.optionsWizard({})</script>",
        js_string(&format!("ctrl_{widget_id}"))
    );
    out
}

fn render_button(out: &mut String, button: RowButton, labels: &Labels) {
    match button {
        RowButton::Drag => {
            let _ = write!(
                out,
                "<button type=\"button\" class=\"drag-handle\" title=\"{}\" aria-hidden=\"true\">\
                 <img src=\"drag.svg\" alt=\"\"></button>",
                esc(labels.get("move"))
            );
        }
        other => {
            let name = other.as_str();
            let title = esc(labels.get(&format!("ow_{name}")));
            let _ = write!(
                out,
                "<button type=\"button\" data-command=\"{name}\" title=\"{title}\">\
                 <img src=\"{name}.svg\" alt=\"{title}\"></button> "
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OptionRecord;
    use std::collections::BTreeMap;

    #[test]
    fn renders_one_row_per_record_with_buttons() {
        let list = OptionList::new(vec![
            OptionRecord::new("a", "1", "Alpha"),
            OptionRecord::new("b", "2", "Beta"),
        ]);

        let html = render_widget(&list, "opts", &Labels::default());

        assert!(html.starts_with("<table class=\"tl_optionwizard\" id=\"ctrl_opts\">"));
        assert_eq!(html.matches("<tr>").count(), 3);
        assert!(html.contains("name=\"opts[1][label]\""));
        assert_eq!(html.matches("data-command=\"copy\"").count(), 2);
        assert_eq!(html.matches("data-command=\"delete\"").count(), 2);
        assert_eq!(html.matches("class=\"drag-handle\"").count(), 2);
        assert!(!html.contains("data-command=\"up\""));
    }

    #[test]
    fn empty_list_renders_blank_row() {
        let html = render_widget(&OptionList::default(), "opts", &Labels::default());
        assert!(html.contains("name=\"opts[0][reference]\""));
        assert!(!html.contains("opts[1]"));
    }

    #[test]
    fn escapes_user_text() {
        let list = OptionList::new(vec![OptionRecord::new("r", "\"><script>", "a & b")]);

        let html = render_widget(&list, "opts", &Labels::default());

        assert!(!html.contains("\"><script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&amp;"));
    }

    #[test]
    fn init_script_gets_raw_id_as_js_string() {
        let html = render_widget(&OptionList::default(), "a b/\"</script>", &Labels::default());

        let script = &html[html.rfind("<script>").unwrap()..];
        assert_eq!(
            script,
            "<script>Backend.optionsWizard(\"ctrl_a b/\\\"\\u003c/script>\")</script>"
        );
        assert!(!script.contains("&#"));
    }

    #[test]
    fn marks_checked_flags_and_uses_labels() {
        let mut record = OptionRecord::new("r", "", "");
        record.is_default = true;
        let labels = Labels::new(BTreeMap::from([("opDefault".to_string(), "Standard".to_string())]));

        let html = render_widget(&OptionList::new(vec![record]), "opts", &labels);

        assert!(html.contains("id=\"opts_default_0\" class=\"fw_checkbox\" value=\"1\" checked>"));
        assert!(html.contains("id=\"opts_group_0\" class=\"fw_checkbox\" value=\"1\">"));
        assert!(html.contains("Standard</label>"));
    }
}
