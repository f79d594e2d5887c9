//! Interactive session.
//!
//! A line-driven event loop over one [`CatalogApi`]: every line is parsed,
//! executed against the session to completion, and rendered before the next
//! line is read. Errors are printed and the loop continues; only `quit` or
//! end of input stops it.

use super::print::{
    render_choices, render_editor, render_entry_list, render_error, render_filters,
    render_full_entries, render_messages,
};
use colored::Colorize;
use dispensary::api::CatalogApi;
use dispensary::editor::FormField;
use dispensary::error::{CatalogError, Result};
use dispensary::model::EntryId;
use dispensary::session::ConfirmationToken;
use dispensary::store::CatalogStore;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "dispensary> ";

const HELP: &str = "\
Browsing:
  list                      Show entries matching the current filters
  search [TEXT]             Set the search text (empty clears it)
  tag NAME                  Toggle a tag filter
  category [NAME]           Select a category (empty clears it)
  clear                     Clear all filters
  show ID...                Show entries in full
  tags | categories         List tags or categories
  add-category NAME         Add a category
Editing:
  new | edit ID             Open a blank or prefilled form
  set FIELD [VALUE]         Set a form field (lists are comma-separated)
  form                      Show the open form
  submit | cancel           Save or discard the form
Deleting:
  delete ID                 Ask to delete an entry
  confirm [TOKEN]           Confirm a delete (latest request by default)
Other:
  help | quit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ShellCommand {
    Empty,
    List,
    Search(String),
    Tag(String),
    Category(Option<String>),
    Clear,
    Show(Vec<EntryId>),
    Tags,
    Categories,
    AddCategory(String),
    New,
    Edit(EntryId),
    Set(FormField, String),
    Form,
    Submit,
    Cancel,
    Delete(EntryId),
    Confirm(Option<ConfirmationToken>),
    Help,
    Quit,
}

pub(super) fn parse_line(line: &str) -> std::result::Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "list" | "ls" => ShellCommand::List,
        "search" | "s" => ShellCommand::Search(rest.to_string()),
        "tag" | "t" => ShellCommand::Tag(required(rest, "tag NAME")?),
        "category" | "c" => {
            ShellCommand::Category(Some(rest.to_string()).filter(|c| !c.is_empty()))
        }
        "clear" => ShellCommand::Clear,
        "show" | "v" => {
            if rest.is_empty() {
                return Err("usage: show ID...".to_string());
            }
            let ids = rest
                .split_whitespace()
                .map(str::parse)
                .collect::<std::result::Result<Vec<EntryId>, _>>()?;
            ShellCommand::Show(ids)
        }
        "tags" => ShellCommand::Tags,
        "categories" => ShellCommand::Categories,
        "add-category" => ShellCommand::AddCategory(required(rest, "add-category NAME")?),
        "new" => ShellCommand::New,
        "edit" => ShellCommand::Edit(required(rest, "edit ID")?.parse()?),
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None => (rest, ""),
            };
            let field: FormField = required(field, "set FIELD [VALUE]")?.parse()?;
            ShellCommand::Set(field, value.to_string())
        }
        "form" => ShellCommand::Form,
        "submit" | "save" => ShellCommand::Submit,
        "cancel" => ShellCommand::Cancel,
        "delete" | "rm" => ShellCommand::Delete(required(rest, "delete ID")?.parse()?),
        "confirm" | "yes" => {
            if rest.is_empty() {
                ShellCommand::Confirm(None)
            } else {
                let token = rest.parse::<ConfirmationToken>().map_err(|e| e.to_string())?;
                ShellCommand::Confirm(Some(token))
            }
        }
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{}', type 'help'", other)),
    };
    Ok(command)
}

fn required(value: &str, usage: &str) -> std::result::Result<String, String> {
    if value.is_empty() {
        Err(format!("usage: {}", usage))
    } else {
        Ok(value.to_string())
    }
}

pub(super) fn run_shell<S, R, W>(
    api: &mut CatalogApi<S>,
    mut input: R,
    out: &mut W,
    width: usize,
) -> io::Result<()>
where
    S: CatalogStore,
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", "Type 'help' for commands.".dimmed())?;
    out.write_all(render_entry_list(&api.visible_entries().listed_entries, width).as_bytes())?;

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let rendered = match parse_line(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => execute(api, command, width).unwrap_or_else(|e| render_error(&e)),
            Err(message) => render_error(&message),
        };
        out.write_all(rendered.as_bytes())?;
    }
    Ok(())
}

fn execute<S: CatalogStore>(
    api: &mut CatalogApi<S>,
    command: ShellCommand,
    width: usize,
) -> Result<String> {
    let rendered = match command {
        ShellCommand::Empty => String::new(),
        ShellCommand::Help => HELP.to_string(),
        ShellCommand::Quit => String::new(),
        ShellCommand::List => render_view(api, width),
        ShellCommand::Search(term) => {
            api.set_search(&term);
            render_view(api, width)
        }
        ShellCommand::Tag(tag) => {
            api.toggle_tag(&tag);
            render_view(api, width)
        }
        ShellCommand::Category(category) => {
            api.select_category(category.as_deref());
            render_view(api, width)
        }
        ShellCommand::Clear => {
            api.clear_filters();
            render_view(api, width)
        }
        ShellCommand::Show(ids) => render_full_entries(&api.get_entries(&ids)?.listed_entries),
        ShellCommand::Tags => {
            let selected: Vec<&str> = api
                .session()
                .query()
                .selected_tags
                .iter()
                .map(String::as_str)
                .collect();
            render_choices(&api.tags().tags, &selected)
        }
        ShellCommand::Categories => {
            let selected: Vec<&str> = api
                .session()
                .query()
                .selected_category
                .as_deref()
                .into_iter()
                .collect();
            render_choices(&api.list_categories().categories, &selected)
        }
        ShellCommand::AddCategory(name) => {
            let (_, result) = api.add_category(&name);
            render_messages(&result.messages)
        }
        ShellCommand::New => {
            api.open_create();
            render_editor(api.session().editor())
        }
        ShellCommand::Edit(id) => {
            api.open_edit(id)?;
            render_editor(api.session().editor())
        }
        ShellCommand::Set(field, value) => {
            api.set_field(field, &value)?;
            render_editor(api.session().editor())
        }
        ShellCommand::Form => render_editor(api.session().editor()),
        ShellCommand::Submit => {
            let result = api.submit()?;
            render_messages(&result.messages)
        }
        ShellCommand::Cancel => {
            if api.session().editor().is_open() {
                api.cancel_edit();
                "Changes discarded.\n".to_string()
            } else {
                String::new()
            }
        }
        ShellCommand::Delete(id) => {
            let result = api.request_delete(id)?;
            format!(
                "{}Type 'confirm' to delete.\n",
                render_messages(&result.messages)
            )
        }
        ShellCommand::Confirm(token) => {
            let token = match token {
                Some(token) => token,
                None => api
                    .session()
                    .latest_pending_delete()
                    .map(|(token, _)| token)
                    .ok_or_else(|| CatalogError::UnknownConfirmation("none pending".into()))?,
            };
            let result = api.confirm_delete(token)?;
            render_messages(&result.messages)
        }
    };
    Ok(rendered)
}

fn render_view<S: CatalogStore>(api: &CatalogApi<S>, width: usize) -> String {
    let result = api.visible_entries();
    format!(
        "{}{}{}",
        render_filters(api.session().query()),
        render_entry_list(&result.listed_entries, width),
        render_messages(&result.messages)
    )
}
