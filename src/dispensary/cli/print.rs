use colored::Colorize;
use dispensary::api::{CmdMessage, MessageLevel};
use dispensary::editor::{EditorMode, EditorState, FormField};
use dispensary::model::Entry;
use dispensary::query::Query;
use std::fmt::Write;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 6;
const PRICE_WIDTH: usize = 10;
const REQUIRED_MARKER: &str = "*";

/// Width available for a list line: the terminal's, capped.
pub(super) fn line_width() -> usize {
    let (_, cols) = console::Term::stdout().size();
    (cols as usize).clamp(40, MAX_LINE_WIDTH)
}

pub(super) fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        let _ = writeln!(out, "{}", line);
    }
    out
}

pub(super) fn render_error(err: &dyn std::fmt::Display) -> String {
    format!("{}\n", format!("Error: {}", err).red())
}

pub(super) fn render_entry_list(entries: &[Entry], width: usize) -> String {
    if entries.is_empty() {
        return "No entries found.\n".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        let id_str = format!("{:>4}. ", entry.id);
        let price = format!("{:>width$}", entry.price, width = PRICE_WIDTH);

        let tags = if entry.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", entry.tags.join(", "))
        };
        let label = format!("{}{}", entry.name, tags);

        let available = width.saturating_sub(ID_WIDTH + PRICE_WIDTH + 1);
        let label = truncate_to_width(&label, available);
        let padding = available.saturating_sub(label.width());

        let _ = writeln!(
            out,
            "{}{}{} {}",
            id_str.yellow(),
            label,
            " ".repeat(padding),
            price.bold()
        );
    }
    out
}

pub(super) fn render_full_entries(entries: &[Entry]) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push_str("\n================================\n\n");
        }
        let _ = writeln!(
            out,
            "{} {}  {}",
            entry.id.to_string().yellow(),
            entry.name.bold(),
            entry.price.bold()
        );
        out.push_str("--------------------------------\n");
        let _ = writeln!(out, "{}", entry.description);
        let _ = writeln!(out, "Category:     {}", entry.category);
        let _ = writeln!(out, "Prescription: {}", entry.prescription);
        let _ = writeln!(out, "Controlled:   {}", entry.controlled);
        let _ = writeln!(out, "Image:        {}", entry.image.dimmed());
        if !entry.side_effects.is_empty() {
            out.push_str("Side effects:\n");
            for effect in &entry.side_effects {
                let _ = writeln!(out, "  • {}", effect);
            }
        }
        if !entry.tags.is_empty() {
            let _ = writeln!(out, "Tags:         {}", entry.tags.join(", ").cyan());
        }
    }
    out
}

/// Every known item, with the selected ones marked.
pub(super) fn render_choices(items: &[String], selected: &[&str]) -> String {
    if items.is_empty() {
        return "(none)\n".to_string();
    }
    let mut out = String::new();
    for item in items {
        if selected.contains(&item.as_str()) {
            let _ = writeln!(out, "[x] {}", item.cyan().bold());
        } else {
            let _ = writeln!(out, "[ ] {}", item);
        }
    }
    out
}

pub(super) fn render_filters(query: &Query) -> String {
    if query.is_empty() {
        return format!("{}\n", "No filters".dimmed());
    }
    let mut parts = Vec::new();
    if !query.search_term.is_empty() {
        parts.push(format!("search \"{}\"", query.search_term));
    }
    if !query.selected_tags.is_empty() {
        parts.push(format!("tags {}", query.selected_tags.join(" | ")));
    }
    if let Some(category) = query.selected_category.as_deref().filter(|c| !c.is_empty()) {
        parts.push(format!("category {}", category));
    }
    format!("{}\n", format!("Filters: {}", parts.join(", ")).dimmed())
}

pub(super) fn render_editor(editor: &EditorState) -> String {
    let (Some(mode), Some(form)) = (editor.mode(), editor.form()) else {
        return "No entry is open for editing.\n".to_string();
    };

    let mut out = String::new();
    let heading = match mode {
        EditorMode::Create => "New entry".to_string(),
        EditorMode::Edit(id) => format!("Editing entry {}", id),
    };
    let _ = writeln!(out, "{}", heading.bold());
    for field in FormField::ALL {
        let marker = if field.is_required() {
            REQUIRED_MARKER
        } else {
            " "
        };
        let _ = writeln!(out, "{}{:<13} {}", marker, field.key(), form.get(field));
    }
    if let Some(error) = editor.error() {
        let _ = writeln!(out, "{}", error.red());
    }
    out
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
