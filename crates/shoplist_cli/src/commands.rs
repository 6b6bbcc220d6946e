use crate::args::{Cli, Commands};
use crate::config::AppConfig;
use crate::terminal::TerminalFrontend;
use anyhow::{anyhow, bail, Context, Result};
use log::info;
use shoplist_core::db::open_db;
use shoplist_core::view::text::{render_section_text, render_text};
use shoplist_core::{
    init_logging, Frontend, ItemId, KeyValueStore, ListService, MutationOutcome, SqliteKeyValueStore,
    BACKUP_FILE_NAME, PDF_FILE_NAME,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

pub fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::resolve(&cli)?;

    std::fs::create_dir_all(&config.data_dir).with_context(|| {
        format!(
            "failed to create data directory `{}`",
            config.data_dir.display()
        )
    })?;
    init_logging(&config.log_level, &config.log_dir()).context("failed to start logging")?;

    let conn = open_db(config.db_path())
        .with_context(|| format!("failed to open `{}`", config.db_path().display()))?;
    let store = SqliteKeyValueStore::new(&conn);
    let frontend = TerminalFrontend::stdio(config.assume_yes, config.quiet);
    let mut service = ListService::load(store, frontend)?;

    let command = cli.command.unwrap_or(Commands::List { section: None });
    info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&command)
    );
    dispatch(&mut service, command)
}

fn dispatch<S, R, W>(
    service: &mut ListService<S, TerminalFrontend<R, W>>,
    command: Commands,
) -> Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    match command {
        Commands::List { section: None } => {
            let text = render_text(&service.view()).to_text();
            service.frontend_mut().print(&text);
        }
        Commands::List {
            section: Some(target),
        } => {
            let view = service.view();
            let section = view
                .find_target(&target)
                .ok_or_else(|| anyhow!("unknown section: `{target}`"))?;
            let text = render_section_text(section).to_text();
            service.frontend_mut().print(&text);
        }
        Commands::Sections => {
            let view = service.view();
            for button in &view.nav {
                service
                    .frontend_mut()
                    .say(&format!("{}\t#{}", button.label, button.anchor));
            }
        }
        Commands::Add { section, name } => {
            let outcome = match name {
                Some(name) => service.add_item(&section, &name)?,
                None => service.add_item_interactive(&section)?,
            };
            report(service, outcome, "added");
        }
        Commands::QuickAdd {
            scroll,
            height,
            name,
        } => {
            let headings = render_text(&service.view()).heading_positions(scroll);
            if let Some(name) = name {
                service.frontend_mut().queue_answer(name);
            }
            let outcome = service.quick_add(&headings, height as f64)?;
            report(service, outcome, "added");
        }
        Commands::Edit {
            section,
            index,
            name,
        } => {
            let id = item_at(service, &section, index)?;
            let outcome = match name {
                Some(name) => service.edit_item(&section, id, &name)?,
                None => service.edit_item_interactive(&section, id)?,
            };
            report(service, outcome, "renamed");
        }
        Commands::Delete { section, index } => {
            let id = item_at(service, &section, index)?;
            let outcome = service.delete_item(&section, id)?;
            report(service, outcome, "deleted");
        }
        Commands::Check { section, item } => {
            let id = resolve_item(service, &section, &item)?;
            service.toggle_selection(&section, id, true)?;
        }
        Commands::Uncheck { section, item } => {
            let id = resolve_item(service, &section, &item)?;
            service.toggle_selection(&section, id, false)?;
        }
        Commands::UnselectAll => {
            let outcome = service.unselect_all()?;
            report(service, outcome, "cleared");
        }
        Commands::Summary => {
            let mut summary = service.text_summary();
            if !summary.ends_with('\n') {
                summary.push('\n');
            }
            service.frontend_mut().print(&summary);
        }
        Commands::ExportPdf { output } => {
            let bytes = service.export_pdf()?;
            let path = output.unwrap_or_else(|| PathBuf::from(PDF_FILE_NAME));
            write_file(service, &path, &bytes)?;
        }
        Commands::Backup { output } => {
            let json = service.backup()?;
            let path = output.unwrap_or_else(|| PathBuf::from(BACKUP_FILE_NAME));
            write_file(service, &path, json.as_bytes())?;
        }
        Commands::Restore { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read `{}`", file.display()))?;
            let summary = service.restore(&json)?;
            let message = match (summary.sections_replaced, summary.selection_replaced) {
                (true, true) => "Restored sections and selected items.",
                (true, false) => "Restored sections.",
                (false, true) => "Restored selected items.",
                (false, false) => "Backup held nothing to restore.",
            };
            service.frontend_mut().say(message);
        }
    }
    Ok(())
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::List { .. } => "list",
        Commands::Sections => "sections",
        Commands::Add { .. } => "add",
        Commands::QuickAdd { .. } => "quick-add",
        Commands::Edit { .. } => "edit",
        Commands::Delete { .. } => "delete",
        Commands::Check { .. } => "check",
        Commands::Uncheck { .. } => "uncheck",
        Commands::UnselectAll => "unselect-all",
        Commands::Summary => "summary",
        Commands::ExportPdf { .. } => "export-pdf",
        Commands::Backup { .. } => "backup",
        Commands::Restore { .. } => "restore",
    }
}

fn ensure_section<S: KeyValueStore, F: Frontend>(
    service: &ListService<S, F>,
    section: &str,
) -> Result<()> {
    if !service.sections().contains(section) {
        bail!("unknown section: `{section}`");
    }
    Ok(())
}

fn item_at<S: KeyValueStore, F: Frontend>(
    service: &ListService<S, F>,
    section: &str,
    index: usize,
) -> Result<ItemId> {
    ensure_section(service, section)?;
    service
        .item_id_at(section, index)
        .ok_or_else(|| anyhow!("no item at index {index} in `{section}`"))
}

/// Accepts an exact item name first, then a display index.
fn resolve_item<S: KeyValueStore, F: Frontend>(
    service: &ListService<S, F>,
    section: &str,
    item: &str,
) -> Result<ItemId> {
    ensure_section(service, section)?;
    if let Some(id) = service.find_item(section, item) {
        return Ok(id);
    }
    match item.trim().parse::<usize>() {
        Ok(index) => item_at(service, section, index),
        Err(_) => bail!("no item named `{item}` in `{section}`"),
    }
}

fn report<S, R, W>(
    service: &mut ListService<S, TerminalFrontend<R, W>>,
    outcome: MutationOutcome,
    verb: &str,
) where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    let message = match outcome {
        MutationOutcome::Applied | MutationOutcome::Duplicate => return,
        MutationOutcome::Unchanged => format!("Nothing {verb}."),
        MutationOutcome::Blank => format!("Empty name; nothing {verb}."),
        MutationOutcome::Cancelled => "Cancelled.".to_string(),
    };
    service.frontend_mut().say(&message);
}

fn write_file<S, R, W>(
    service: &mut ListService<S, TerminalFrontend<R, W>>,
    path: &Path,
    bytes: &[u8],
) -> Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    std::fs::write(path, bytes).with_context(|| format!("failed to write `{}`", path.display()))?;
    info!("event=file_export module=cli status=ok bytes={}", bytes.len());
    service
        .frontend_mut()
        .say(&format!("Wrote {}", path.display()));
    Ok(())
}
