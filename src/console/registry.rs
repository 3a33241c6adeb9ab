//! Command registry and help text.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Info,
    Show,
    Insert,
    Update,
    RemoveKey,
    Clear,
    Save,
    ExecuteScript,
    Exit,
    RemoveLower,
    ReplaceIfLower,
    RemoveLowerKey,
    GroupCountingByCreationDate,
    FilterGreaterThanCategory,
    PrintAscending,
}

/// Name, usage and help text for a single command.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub command: Command,
    pub name: &'static str,
    /// Arguments; `{x}` ones are read on the following lines.
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: Command::Help,
        name: "help",
        usage: "",
        description: "print help",
    },
    CommandSpec {
        command: Command::Info,
        name: "info",
        usage: "",
        description: "print info about the current state of the roster",
    },
    CommandSpec {
        command: Command::Show,
        name: "show",
        usage: "",
        description: "print all marines",
    },
    CommandSpec {
        command: Command::Insert,
        name: "insert",
        usage: "key {marine}",
        description: "add a new marine under the given key",
    },
    CommandSpec {
        command: Command::Update,
        name: "update",
        usage: "id {marine}",
        description: "replace the marine with the given id",
    },
    CommandSpec {
        command: Command::RemoveKey,
        name: "remove_key",
        usage: "key",
        description: "delete the marine with the given key",
    },
    CommandSpec {
        command: Command::Clear,
        name: "clear",
        usage: "",
        description: "delete all marines",
    },
    CommandSpec {
        command: Command::Save,
        name: "save",
        usage: "",
        description: "save marines to the file",
    },
    CommandSpec {
        command: Command::ExecuteScript,
        name: "execute_script",
        usage: "file_name",
        description: "run the commands in a script file",
    },
    CommandSpec {
        command: Command::Exit,
        name: "exit",
        usage: "",
        description: "end execution without saving",
    },
    CommandSpec {
        command: Command::RemoveLower,
        name: "remove_lower",
        usage: "{marine}",
        description: "delete all marines with health lower than the one given",
    },
    CommandSpec {
        command: Command::ReplaceIfLower,
        name: "replace_if_lower",
        usage: "key {marine}",
        description: "replace the marine under key if the new health is lower than the old",
    },
    CommandSpec {
        command: Command::RemoveLowerKey,
        name: "remove_lower_key",
        usage: "key",
        description: "delete all marines with a key lower than the one given",
    },
    CommandSpec {
        command: Command::GroupCountingByCreationDate,
        name: "group_counting_by_creation_date",
        usage: "",
        description: "print the number of marines per creation date",
    },
    CommandSpec {
        command: Command::FilterGreaterThanCategory,
        name: "filter_greater_than_category",
        usage: "{category}",
        description: "print marines with a category higher than the one given",
    },
    CommandSpec {
        command: Command::PrintAscending,
        name: "print_ascending",
        usage: "",
        description: "print all marines sorted by health",
    },
];

impl Command {
    pub fn from_name(name: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.command)
    }

    pub fn name(self) -> &'static str {
        COMMANDS
            .iter()
            .find(|spec| spec.command == self)
            .map_or("", |spec| spec.name)
    }
}

/// Generate help lines for all commands, aligned on the description.
pub fn help_lines() -> Vec<String> {
    let signature = |spec: &CommandSpec| {
        if spec.usage.is_empty() {
            spec.name.to_string()
        } else {
            format!("{} {}", spec.name, spec.usage)
        }
    };
    let longest = COMMANDS
        .iter()
        .map(|spec| signature(spec).len())
        .max()
        .unwrap_or(0);

    let mut lines = vec!["all args written as {arg} must be specified on further lines".to_string()];
    lines.extend(COMMANDS.iter().map(|spec| {
        format!(
            "{:<width$} {}",
            signature(spec),
            spec.description,
            width = longest
        )
    }));
    lines
}
