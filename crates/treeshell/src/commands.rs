//! Parsing of shell input lines
//!
//! Arguments are split on whitespace, so node names entered at the shell
//! cannot contain spaces. Names loaded from a file can.

use derive_more::Display;
use std::path::PathBuf;

/// One line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the root, optionally naming it
    CreateRoot(Option<String>),

    /// Add `name` under `parent`
    Add { parent: String, name: String },

    /// Delete a node and its subtree
    Delete(String),

    /// Move a node under a new parent
    Move { name: String, new_parent: String },

    /// Compare two subtrees
    Compare(String, String),

    /// Replace the tree with a JSON file
    Load(PathBuf),

    /// Write the tree to a JSON file
    Save(Option<PathBuf>),

    /// Collapse or expand one node locally
    Toggle(String),

    /// Re-fetch the tree and invert every node
    ToggleAll,

    /// Re-fetch the tree and expand every node
    ExpandAll,

    /// Draw the tree again
    Show,

    Help,
    Quit,
}

/// Why a line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Unknown command '{}', type 'help' for a list", _0)]
    Unknown(String),

    #[display(fmt = "Usage: {}", _0)]
    Usage(&'static str),
}

impl std::error::Error for ParseError {}

/// Shown by `help`
pub const HELP: &str = "\
Commands:
  create-root [name]        create the root node
  add <parent> <name>       add a node under <parent>
  delete <name>             delete a node and everything below it
  move <name> <new-parent>  move a node under a new parent
  compare <a> <b>           compare the subtrees under <a> and <b>
  load <path>               replace the tree with a JSON file
  save [path]               write the tree to a JSON file
  toggle <name>             collapse or expand a node
  toggle-all                invert every node
  expand-all                expand every node
  show                      draw the tree
  help                      show this list
  quit                      leave the shell";

impl Command {
    /// Parse one input line; `Ok(None)` for a blank line or a `#` comment
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (verb, args.as_slice()) {
            ("create-root", []) => Command::CreateRoot(None),
            ("create-root", [name]) => Command::CreateRoot(Some(name.to_string())),
            ("create-root", _) => return Err(ParseError::Usage("create-root [name]")),

            ("add", [parent, name]) => Command::Add {
                parent: parent.to_string(),
                name: name.to_string(),
            },
            ("add", _) => return Err(ParseError::Usage("add <parent> <name>")),

            ("delete", [name]) => Command::Delete(name.to_string()),
            ("delete", _) => return Err(ParseError::Usage("delete <name>")),

            ("move", [name, new_parent]) => Command::Move {
                name: name.to_string(),
                new_parent: new_parent.to_string(),
            },
            ("move", _) => return Err(ParseError::Usage("move <name> <new-parent>")),

            ("compare", [a, b]) => Command::Compare(a.to_string(), b.to_string()),
            ("compare", _) => return Err(ParseError::Usage("compare <a> <b>")),

            ("load", [path]) => Command::Load(PathBuf::from(path)),
            ("load", _) => return Err(ParseError::Usage("load <path>")),

            ("save", []) => Command::Save(None),
            ("save", [path]) => Command::Save(Some(PathBuf::from(path))),
            ("save", _) => return Err(ParseError::Usage("save [path]")),

            ("toggle", [name]) => Command::Toggle(name.to_string()),
            ("toggle", _) => return Err(ParseError::Usage("toggle <name>")),

            ("toggle-all", []) => Command::ToggleAll,
            ("expand-all", []) => Command::ExpandAll,
            ("show", []) => Command::Show,
            ("help", _) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            ("toggle-all" | "expand-all" | "show" | "quit" | "exit", _) => {
                return Err(ParseError::Usage("the command takes no arguments"))
            }

            (other, _) => return Err(ParseError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}
