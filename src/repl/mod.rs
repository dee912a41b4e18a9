//! Interactive ingredient entry
//!
//! This module provides the REPL built on reedline:
//! - Keystrokes drive the autocomplete controller through the hinter
//! - Tab opens a completion menu filled from the controller's suggestions
//! - Enter commits the line into the ingredient form
//! - `:`-commands manage the form and call the recipe webhook

mod command;
mod completer;
mod hinter;
mod prompt;
mod session;

pub use command::{ReplCommand, help_text};
pub use completer::IngredientCompleter;
pub use hinter::IngredientHinter;
pub use prompt::IngredientPrompt;
pub use session::{AddOutcome, Session};

use reedline::{
    ColumnarMenu, Emacs, KeyCode, KeyModifiers, MenuBuilder, Reedline, ReedlineEvent,
    ReedlineMenu, Signal, default_emacs_keybindings,
};

use crate::cli::Spinner;
use crate::config::{Config, SourceKind, WebhookConfig};
use crate::error::{PantryError, Result};
use crate::formatter::Formatter;
use crate::ingredients;
use crate::services::{self, RecipeWebhook};

const COMPLETION_MENU: &str = "completion_menu";

/// REPL engine for interactive ingredient entry
pub struct ReplEngine {
    /// Line editor for input
    editor: Reedline,

    /// Form and controller state
    session: Session,

    webhook: WebhookConfig,

    formatter: Formatter,

    /// Suppress banner and spinner
    quiet: bool,
}

impl ReplEngine {
    /// Create a new REPL engine
    ///
    /// # Arguments
    /// * `config` - Effective configuration
    /// * `quiet` - Suppress banner and spinner
    pub fn new(config: &Config, quiet: bool) -> Result<Self> {
        let source = services::candidate_source(config)?;
        let known = match config.source.kind {
            SourceKind::Spoonacular => None,
            SourceKind::Static | SourceKind::Simulated => Some(ingredients::load(&config.source)?),
        };
        let session = Session::new(source, known, &config.autocomplete);

        let menu = ColumnarMenu::default().with_name(COMPLETION_MENU);
        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let editor = Reedline::create()
            .with_completer(Box::new(IngredientCompleter::new(session.controller())))
            .with_hinter(Box::new(IngredientHinter::new(session.controller())))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(menu)))
            .with_edit_mode(Box::new(Emacs::new(keybindings)));

        Ok(Self {
            editor,
            session,
            webhook: config.webhook.clone(),
            formatter: Formatter::new(config.display.format, config.display.color_output),
            quiet,
        })
    }

    /// Run until `:quit` or Ctrl-D
    pub async fn run(&mut self) -> Result<()> {
        if !self.quiet {
            println!("pantry {} - type :help for commands", crate::VERSION);
        }

        while let Some(line) = self.read_line()? {
            match ReplCommand::parse(&line) {
                ReplCommand::Add(name) => self.add(&name),
                ReplCommand::List => self.list(),
                ReplCommand::Remove(position) => match self.session.remove(position) {
                    Some(removed) => println!("Removed {removed}"),
                    None => self.report(&format!("no ingredient #{position}")),
                },
                ReplCommand::Clear => {
                    self.session.clear();
                    println!("Cleared all ingredients");
                }
                ReplCommand::Generate => self.generate().await,
                ReplCommand::Help => print!("{}", help_text()),
                ReplCommand::Quit => break,
                ReplCommand::Empty => {}
                ReplCommand::Invalid(msg) => self.report(&msg),
            }
        }

        if !self.quiet {
            println!("Goodbye!");
        }
        Ok(())
    }

    /// Read a single line of input
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input line, or None on Ctrl-D
    fn read_line(&mut self) -> Result<Option<String>> {
        let form = self.session.form();
        let prompt = IngredientPrompt::new(form.last_index() + 1, form.valid_ingredients().len());

        match self.editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => Ok(Some(line)),
            Ok(Signal::CtrlD) => Ok(None),
            Ok(_) => {
                // Ctrl-C abandons the current line
                self.session.dismiss();
                Ok(Some(String::new()))
            }
            Err(err) => Err(PantryError::Generic(format!("Read error: {err}"))),
        }
    }

    fn add(&mut self, name: &str) {
        match self.session.add(name) {
            AddOutcome::Added(value) => println!("Added {value}"),
            AddOutcome::Unrecognized(value) => {
                println!("Added {value}");
                println!(
                    "{}",
                    self.formatter
                        .colorizer()
                        .warning(&format!("  '{value}' is not in the ingredient list"))
                );
            }
            AddOutcome::Ignored => {}
        }
    }

    fn list(&self) {
        let ingredients = self.session.ingredients();
        if ingredients.is_empty() {
            println!("{}", self.formatter.colorizer().dim("(no ingredients yet)"));
            return;
        }
        for (i, ingredient) in ingredients.iter().enumerate() {
            println!("{:>3}. {ingredient}", i + 1);
        }
    }

    async fn generate(&self) {
        if let Err(err) = self.try_generate().await {
            eprintln!("{}", self.formatter.format_error(&err));
        }
    }

    async fn try_generate(&self) -> Result<()> {
        let webhook = RecipeWebhook::from_config(&self.webhook)?;
        let spinner = Spinner::start("Generating recipes", !self.quiet);
        let outcome = webhook.generate(&self.session.ingredients()).await;
        spinner.finish();

        println!("{}", self.formatter.format_outcome(&outcome?)?);
        Ok(())
    }

    fn report(&self, msg: &str) {
        eprintln!("{}", self.formatter.colorizer().error(msg));
    }
}
