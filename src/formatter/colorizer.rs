//! Color output support for terminal formatting

/// ANSI color codes for terminal output
pub struct AnsiColors;

impl AnsiColors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Applies message colors when enabled
#[derive(Debug, Clone, Copy)]
pub struct Colorizer {
    enabled: bool,
}

impl Colorizer {
    /// Create a new colorizer
    ///
    /// # Arguments
    /// * `enabled` - Enable color output
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("{code}{text}{}", AnsiColors::RESET)
        } else {
            text.to_string()
        }
    }

    /// Colorize text as success (green)
    pub fn success(&self, text: &str) -> String {
        self.paint(AnsiColors::GREEN, text)
    }

    /// Colorize text as error (red), with an `Error:` prefix
    pub fn error(&self, text: &str) -> String {
        self.paint(AnsiColors::RED, &format!("Error: {text}"))
    }

    /// Colorize text as warning (yellow)
    pub fn warning(&self, text: &str) -> String {
        self.paint(AnsiColors::YELLOW, text)
    }

    /// Colorize a highlighted suggestion (bold cyan)
    pub fn highlight(&self, text: &str) -> String {
        self.paint(&format!("{}{}", AnsiColors::BOLD, AnsiColors::CYAN), text)
    }

    /// Dim secondary text
    pub fn dim(&self, text: &str) -> String {
        self.paint(AnsiColors::DIM, text)
    }
}
