use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shoplist")]
#[command(about = "Shopping list with sections, checked items, and PDF export", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the list database and logs.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Answer yes to every confirmation.
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Do not print the list after a change.
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every section, or jump to one by name or anchor.
    List {
        #[arg(long)]
        section: Option<String>,
    },

    /// Show the section navigation shortcuts.
    Sections,

    /// Add an item; prompts for the name when omitted.
    Add { section: String, name: Option<String> },

    /// Add an item to the section in view at a scroll position.
    QuickAdd {
        /// Lines scrolled past the top of the list.
        #[arg(long, default_value = "0")]
        scroll: usize,

        /// Visible lines.
        #[arg(long, default_value = "24")]
        height: usize,

        name: Option<String>,
    },

    /// Rename the item at a display index; prompts when no name is given.
    Edit {
        section: String,
        index: usize,
        name: Option<String>,
    },

    /// Delete the item at a display index.
    Delete { section: String, index: usize },

    /// Check an item (by name or display index).
    Check { section: String, item: String },

    /// Uncheck an item (by name or display index).
    Uncheck { section: String, item: String },

    /// Uncheck everything.
    UnselectAll,

    /// Print the checked items per section.
    Summary,

    /// Write the checked items as a PDF.
    ExportPdf {
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Write the full list state as JSON.
    Backup {
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Replace list state from a backup file.
    Restore { file: PathBuf },
}
