//! Line commands accepted by the interactive front end.

use todo_list_core::Place;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Type `title` into the draft and press Enter.
    Add(String),
    Delete(Vec<String>),
    Toggle(Vec<String>),
    SetPlace(Place),
    ClearPlace,
    Refresh,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  add <title>            add a new item
  rm <n|#id>...          delete items by row number or #id
  toggle <n|#id>...      toggle completion (several are sent together)
  place home|work|<text> attach a place to new items
  place clear            stop attaching a place
  refresh                fetch the list again
  help                   show this text
  quit                   exit";

impl Command {
    /// Parse one input line. Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let targets = || -> Result<Vec<String>, String> {
            let targets: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
            if targets.is_empty() {
                return Err(format!("{verb} needs at least one item number or id"));
            }
            Ok(targets)
        };

        let command = match verb {
            "add" | "a" => {
                if rest.is_empty() {
                    return Err("add needs a title".to_string());
                }
                Command::Add(rest.to_string())
            }
            "rm" | "delete" | "d" => Command::Delete(targets()?),
            "toggle" | "t" => Command::Toggle(targets()?),
            "place" | "p" => match rest {
                "" => return Err("place needs home, work, clear or a custom name".to_string()),
                "clear" => Command::ClearPlace,
                "home" => Command::SetPlace(Place::home()),
                "work" => Command::SetPlace(Place::work()),
                custom => Command::SetPlace(Place::custom(custom)),
            },
            "refresh" | "r" | "ls" => Command::Refresh,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(format!("unknown command: {other} (try 'help')")),
        };
        Ok(Some(command))
    }
}
