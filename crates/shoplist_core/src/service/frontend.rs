//! Host capabilities the list service drives: dialogs and re-rendering.

use crate::view::list_view::ListView;

/// Interactive collaborator injected into [`super::list_service::ListService`].
///
/// Terminal frontends implement it over stdin/stdout; tests use scripted
/// doubles.
pub trait Frontend {
    /// Asks a yes/no question. `false` means the action is abandoned.
    fn confirm(&mut self, message: &str) -> bool;

    /// Asks for a line of text. `None` means the user cancelled.
    fn prompt(&mut self, message: &str, default: Option<&str>) -> Option<String>;

    /// Shows a notice that needs no answer.
    fn alert(&mut self, message: &str);

    /// Redraws the list after a mutation has been persisted.
    fn render(&mut self, view: &ListView);
}
