use terminal_size::{terminal_size, Width};

use crate::constant::{HELP_MESSAGE, HELP_NAME, HELP_SHORT};
use crate::parser::interface::UserInterface;

/// One help entry, accumulated in declaration order.
pub(crate) struct OptionEntry {
    rendering: String,
    hint: Option<&'static str>,
    default: Option<String>,
    help: Option<String>,
}

impl OptionEntry {
    pub(crate) fn new(
        rendering: String,
        hint: Option<&'static str>,
        default: Option<String>,
        help: Option<String>,
    ) -> Self {
        Self {
            rendering,
            hint,
            default,
            help,
        }
    }

    /// The implicit help flag, rendered after every declared entry.
    pub(crate) fn help_flag() -> Self {
        Self::new(
            format!("-{HELP_SHORT}, --{HELP_NAME}"),
            None,
            None,
            Some(HELP_MESSAGE.to_string()),
        )
    }
}

pub(crate) struct Printer {
    program: String,
    usage: Option<String>,
    entries: Vec<OptionEntry>,
    terminal_width: Option<usize>,
}

const FALLBACK_WIDTH: usize = 80;
const HELP_INDENT: usize = 4;
// Never wrap below this, no matter how narrow the terminal claims to be.
const MINIMUM_WRAP_WIDTH: usize = 17;

impl Printer {
    #[cfg(test)]
    pub(crate) fn empty(program: impl Into<String>) -> Self {
        Self::new(program, None, Vec::default(), None)
    }

    pub(crate) fn terminal(
        program: impl Into<String>,
        usage: Option<String>,
        entries: Vec<OptionEntry>,
    ) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(program, usage, entries, terminal_width)
    }

    pub(crate) fn new(
        program: impl Into<String>,
        usage: Option<String>,
        entries: Vec<OptionEntry>,
        terminal_width: Option<usize>,
    ) -> Self {
        Self {
            program: program.into(),
            usage,
            entries,
            terminal_width,
        }
    }

    pub(crate) fn print_help(&self, user_interface: &(impl UserInterface + ?Sized)) {
        let width = self.terminal_width.unwrap_or(FALLBACK_WIDTH);
        let wrap_width = std::cmp::max(
            width.saturating_sub(HELP_INDENT),
            MINIMUM_WRAP_WIDTH,
        );

        user_interface.print("USAGE".to_string());

        match &self.usage {
            Some(grammar) => {
                user_interface.print(format!("  {program} {grammar}", program = self.program))
            }
            None => user_interface.print(format!("  {program}", program = self.program)),
        }

        user_interface.print(String::default());
        user_interface.print("OPTIONS".to_string());

        for entry in &self.entries {
            let mut line = format!("  {rendering}", rendering = entry.rendering);

            if let Some(hint) = entry.hint {
                line.push_str(&format!(" {hint}"));
            }

            if let Some(default) = &entry.default {
                line.push_str(&format!("   (default: {default})"));
            }

            user_interface.print(line);

            if let Some(help) = &entry.help {
                let indent = HELP_INDENT;

                for paragraph in help.lines() {
                    for wrapped in wrap(paragraph, wrap_width) {
                        user_interface.print(format!("{:indent$}{wrapped}", ""));
                    }
                }
            }
        }
    }
}

/// Greedy word wrap; a word longer than the width is hard-broken with a
/// trailing hyphen.
/// Widths are measured in characters, not bytes.
fn wrap(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split_whitespace() {
        if current.is_empty() {
            break_word(&mut lines, &mut current, word, width);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            break_word(&mut lines, &mut current, word, width);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn break_word(lines: &mut Vec<String>, current: &mut String, word: &str, width: usize) {
    let mut rest = word;

    // Break only on character boundaries; a byte split could land inside a
    // multibyte character.
    while rest.chars().nth(width).is_some() {
        let Some((index, _)) = rest.char_indices().nth(width - 1) else {
            unreachable!("internal error - an over-long word must have a break index");
        };
        let (head, tail) = rest.split_at(index);
        lines.push(format!("{head}-"));
        rest = tail;
    }

    current.push_str(rest);
}
