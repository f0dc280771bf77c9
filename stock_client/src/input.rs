//! Line commands of the interactive mode.
//!
//! Plain lines replace the search text, as if typed. Lines starting with `/` stand in
//! for keys and pointer actions:
//!
//! | line        | action                                  |
//! |-------------|-----------------------------------------|
//! | `/down`     | move highlight down                     |
//! | `/up`       | move highlight up                       |
//! | `/enter`    | commit highlight, or submit the query   |
//! | `/esc`      | close the dropdown                      |
//! | `/pick N`   | click suggestion `N` (1-based)          |
//! | `/away`     | click outside the dropdown              |
//! | `/focus`    | focus the input again                   |
//! | `/submit`   | submit the current query                |
//! | `/help`     | print this table                        |
//! | `/quit`     | leave                                   |
use crate::suggest::Key;

/// Help text printed by `/help`.
pub const HELP: &str = "\
Type to search; suggestions appear after a short pause.
  /down /up      move highlight       /enter   commit or submit
  /esc           close dropdown       /pick N  click suggestion N
  /away          click outside        /focus   focus input
  /submit        submit query         /quit    leave";

/// One parsed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Key(Key),
    /// Zero-based index of the clicked suggestion.
    Pick(usize),
    Away,
    Focus,
    Submit,
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    pub fn parse(line: &str) -> Self {
        let Some(command) = line.trim().strip_prefix('/') else {
            return Input::Text(line.to_string());
        };
        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default().to_ascii_lowercase();

        match name.as_str() {
            "pick" => parts
                .next()
                .and_then(|n| n.parse::<usize>().ok())
                .filter(|n| *n > 0)
                .map(|n| Input::Pick(n - 1))
                .unwrap_or_else(|| Input::Unknown(line.trim().to_string())),
            "away" => Input::Away,
            "focus" => Input::Focus,
            "submit" | "go" => Input::Submit,
            "help" | "?" => Input::Help,
            "quit" | "exit" | "q" => Input::Quit,
            other => other
                .parse::<Key>()
                .map(Input::Key)
                .unwrap_or_else(|_| Input::Unknown(line.trim().to_string())),
        }
    }
}
