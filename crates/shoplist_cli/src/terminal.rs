//! Line-oriented [`Frontend`] over a reader and a writer.

use log::warn;
use shoplist_core::view::text::render_text;
use shoplist_core::{Frontend, ListView};
use std::collections::VecDeque;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

pub struct TerminalFrontend<R: BufRead, W: Write> {
    input: R,
    output: W,
    assume_yes: bool,
    quiet: bool,
    queued_answers: VecDeque<String>,
}

impl TerminalFrontend<StdinLock<'static>, Stdout> {
    pub fn stdio(assume_yes: bool, quiet: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), assume_yes, quiet)
    }
}

impl<R: BufRead, W: Write> TerminalFrontend<R, W> {
    pub fn new(input: R, output: W, assume_yes: bool, quiet: bool) -> Self {
        Self {
            input,
            output,
            assume_yes,
            quiet,
            queued_answers: VecDeque::new(),
        }
    }

    /// Answers the next prompt with `answer` instead of reading input.
    pub fn queue_answer(&mut self, answer: impl Into<String>) {
        self.queued_answers.push_back(answer.into());
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Prints a line, logging instead of failing when the sink is gone.
    pub fn say(&mut self, message: &str) {
        self.print(&format!("{message}\n"));
    }

    /// Prints `text` exactly as given.
    pub fn print(&mut self, text: &str) {
        if let Err(err) = self.output.write_all(text.as_bytes()) {
            warn!("event=terminal_write module=cli status=error error={err}");
        }
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        if let Err(err) = write!(self.output, "{question} ").and_then(|_| self.output.flush()) {
            warn!("event=terminal_write module=cli status=error error={err}");
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
            Err(err) => {
                warn!("event=terminal_read module=cli status=error error={err}");
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> Frontend for TerminalFrontend<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        self.ask(&format!("{message} [y/N]"))
            .map(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }

    fn prompt(&mut self, message: &str, default: Option<&str>) -> Option<String> {
        if let Some(answer) = self.queued_answers.pop_front() {
            return Some(answer);
        }
        let question = match default {
            Some(default) => format!("{message} [{default}]"),
            None => message.to_string(),
        };
        let answer = self.ask(&question)?;
        match default {
            Some(default) if answer.trim().is_empty() => Some(default.to_string()),
            _ => Some(answer),
        }
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn render(&mut self, view: &ListView) {
        if self.quiet {
            return;
        }
        let text = render_text(view).to_text();
        self.print(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::TerminalFrontend;
    use shoplist_core::{Frontend, ListState, ListView, Sections, Selection};
    use std::io::Cursor;

    fn frontend(input: &str) -> TerminalFrontend<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalFrontend::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false, false)
    }

    fn written(frontend: &TerminalFrontend<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(frontend.output().clone()).unwrap()
    }

    #[test]
    fn confirm_accepts_only_yes() {
        let mut terminal = frontend("y\nno\nYES\n");
        assert!(terminal.confirm("Unselect all items?"));
        assert!(!terminal.confirm("Unselect all items?"));
        assert!(terminal.confirm("Unselect all items?"));
        assert!(!terminal.confirm("Unselect all items?"));
        assert!(written(&terminal).starts_with("Unselect all items? [y/N] "));
    }

    #[test]
    fn assume_yes_skips_reading() {
        let mut terminal =
            TerminalFrontend::new(Cursor::new(Vec::new()), Vec::new(), true, false);
        assert!(terminal.confirm("Delete \"Ale\" from Beer and Cider?"));
        assert!(terminal.output().is_empty());
    }

    #[test]
    fn prompt_handles_default_and_eof() {
        let mut terminal = frontend("\nRye\n");
        assert_eq!(
            terminal.prompt("Edit item name:", Some("Rice")).as_deref(),
            Some("Rice")
        );
        let question = "Enter new item name for Grocery:";
        assert_eq!(terminal.prompt(question, None).as_deref(), Some("Rye"));
        assert_eq!(terminal.prompt(question, None), None);
        assert!(written(&terminal).contains("Edit item name: [Rice] "));
    }

    #[test]
    fn queued_answer_wins_over_input() {
        let mut terminal = frontend("typed\n");
        terminal.queue_answer("Pasta");
        let question = "Enter new item name for Grocery:";
        assert_eq!(terminal.prompt(question, None).as_deref(), Some("Pasta"));
        assert_eq!(terminal.prompt(question, None).as_deref(), Some("typed"));
    }

    #[test]
    fn print_writes_text_verbatim() {
        let mut terminal = frontend("");
        terminal.print("Sweets:\nCandy\n\n");
        terminal.say("done");
        assert_eq!(written(&terminal), "Sweets:\nCandy\n\ndone\n");
    }

    #[test]
    fn render_prints_list_unless_quiet() {
        let sections: Sections = [("Grocery", vec!["Rice"])].into_iter().collect();
        let mut selection = Selection::new();
        selection.insert("Grocery", "Rice");
        let view = ListView::build(&ListState::new(sections, selection));

        let mut terminal = frontend("");
        terminal.render(&view);
        let text = written(&terminal);
        assert!(text.contains("## Grocery  [+ Add Item]"));
        assert!(text.contains("[x] Rice"));

        let mut quiet = TerminalFrontend::new(Cursor::new(Vec::new()), Vec::new(), false, true);
        quiet.render(&view);
        assert!(quiet.output().is_empty());
    }
}
