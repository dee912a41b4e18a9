//! REPL input parsing

/// Lines starting with this character are commands
pub const COMMAND_PREFIX: char = ':';

/// Command names offered by the completer, with descriptions
pub const COMMANDS: &[(&str, &str)] = &[
    (":list", "Show the ingredients collected so far"),
    (":remove", "Remove ingredient N"),
    (":clear", "Remove all ingredients"),
    (":generate", "Send the ingredients to the recipe webhook"),
    (":help", "Show this help"),
    (":quit", "Leave pantry"),
];

/// A parsed REPL line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Add an ingredient
    Add(String),
    List,
    /// Remove the ingredient at a 1-based position
    Remove(usize),
    Clear,
    Generate,
    Help,
    Quit,
    /// Blank input
    Empty,
    /// Unrecognised command or bad argument
    Invalid(String),
}

impl ReplCommand {
    /// Parse a line of input
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ReplCommand::Empty;
        }
        let Some(body) = line.strip_prefix(COMMAND_PREFIX) else {
            return ReplCommand::Add(line.to_string());
        };

        let mut parts = body.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next();

        match (name.as_str(), arg) {
            ("list" | "ls", None) => ReplCommand::List,
            ("remove" | "rm", Some(n)) => match n.parse::<usize>() {
                Ok(n) if n > 0 => ReplCommand::Remove(n),
                _ => ReplCommand::Invalid(format!("not an ingredient number: {n}")),
            },
            ("remove" | "rm", None) => ReplCommand::Invalid("usage: :remove N".to_string()),
            ("clear", None) => ReplCommand::Clear,
            ("generate" | "go", None) => ReplCommand::Generate,
            ("help" | "h" | "?", None) => ReplCommand::Help,
            ("quit" | "exit" | "q", None) => ReplCommand::Quit,
            _ => ReplCommand::Invalid(format!("unknown command: {line}")),
        }
    }
}

/// Help text listing the commands
pub fn help_text() -> String {
    let mut out = String::from(
        "Type an ingredient and press Enter to add it. Tab shows suggestions.\n\nCommands:\n",
    );
    for (name, description) in COMMANDS {
        let usage = if *name == ":remove" { ":remove N" } else { name };
        out.push_str(&format!("  {usage:<12} {description}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_adds() {
        assert_eq!(ReplCommand::parse("  chicken breast "), ReplCommand::Add("chicken breast".to_string()));
        assert_eq!(ReplCommand::parse("   "), ReplCommand::Empty);
    }

    #[test]
    fn test_commands() {
        assert_eq!(ReplCommand::parse(":list"), ReplCommand::List);
        assert_eq!(ReplCommand::parse(":LIST"), ReplCommand::List);
        assert_eq!(ReplCommand::parse(":remove 2"), ReplCommand::Remove(2));
        assert_eq!(ReplCommand::parse(":clear"), ReplCommand::Clear);
        assert_eq!(ReplCommand::parse(":generate"), ReplCommand::Generate);
        assert_eq!(ReplCommand::parse(":q"), ReplCommand::Quit);
    }

    #[test]
    fn test_invalid_commands() {
        assert!(matches!(ReplCommand::parse(":remove 0"), ReplCommand::Invalid(_)));
        assert!(matches!(ReplCommand::parse(":remove x"), ReplCommand::Invalid(_)));
        assert!(matches!(ReplCommand::parse(":remove"), ReplCommand::Invalid(_)));
        assert!(matches!(ReplCommand::parse(":dance"), ReplCommand::Invalid(_)));
        assert!(matches!(ReplCommand::parse(":list extra"), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_help_lists_commands() {
        let help = help_text();
        for (name, _) in COMMANDS {
            assert!(help.contains(name));
        }
        assert!(help.contains(":remove N"));
    }
}
