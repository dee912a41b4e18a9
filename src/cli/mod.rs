//! Command-line interface for pantry
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - One-shot subcommands (suggest, generate, config, completion)

pub mod completion;
mod progress;

pub use progress::Spinner;

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::autocomplete::{AutocompleteController, BoundValue};
use crate::config::{Config, LogLevel, OutputFormat, SourceKind};
use crate::error::Result;
use crate::formatter::Formatter;
use crate::services::{self, RecipeWebhook};

/// Pantry - ingredient autocomplete and recipe finder
#[derive(Parser, Debug)]
#[command(
    name = "pantry",
    version,
    about = "Ingredient autocomplete and recipe finder",
    long_about = "Collect ingredients with type-ahead suggestions from a bundled list, a
remote ingredient search or a simulated backend, then send them to a recipe
generation webhook."
)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Candidate source (static, spoonacular, simulated)
    #[arg(short = 's', long, value_name = "KIND", global = true)]
    pub source: Option<String>,

    /// Ingredient list file, one name per line
    #[arg(long = "ingredients", value_name = "FILE", global = true)]
    pub ingredients_file: Option<PathBuf>,

    /// Recipe webhook URL (overrides the saved one)
    #[arg(long, value_name = "URL", global = true)]
    pub webhook: Option<String>,

    /// Output format (plain, json, json-pretty, table)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv", global = true)]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for pantry
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enter ingredients interactively (default)
    Interactive,

    /// Print the suggestions for a query
    Suggest {
        /// Query text
        #[arg(value_name = "QUERY", default_value = "")]
        query: String,
    },

    /// Send ingredients to the recipe webhook
    Generate {
        /// Ingredients to send
        #[arg(value_name = "INGREDIENT", required = true)]
        ingredients: Vec<String>,
    },

    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show or edit configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,

        /// Save the recipe webhook URL to the configuration file
        #[arg(long, value_name = "URL")]
        set_webhook: Option<String>,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface from the process arguments
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        let config = Self::load_config(&args)?;

        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with environment and arguments
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {e}");
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        config.apply_env();
        Self::apply_args_to_config(&mut config, args);

        Ok(config)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Check whether the interactive REPL should run
    pub fn is_interactive(&self) -> bool {
        matches!(self.args.command, None | Some(Commands::Interactive))
    }

    /// Build a formatter from the effective display settings
    pub fn formatter(&self) -> Formatter {
        Formatter::new(
            self.config.display.format,
            self.config.display.color_output,
        )
    }

    /// Apply CLI arguments to configuration
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_source_args(config, args);
        Self::apply_display_args(config, args);
        Self::apply_logging_args(config, args);

        if let Some(url) = &args.webhook {
            config.webhook.url = Some(url.clone());
        }
    }

    /// Apply source-related CLI arguments to configuration
    fn apply_source_args(config: &mut Config, args: &CliArgs) {
        if let Some(kind) = &args.source {
            match SourceKind::parse(kind) {
                Some(kind) => config.source.kind = kind,
                None => eprintln!("Warning: Unknown source '{kind}', using {:?}", config.source.kind),
            }
        }

        if let Some(path) = &args.ingredients_file {
            config.source.ingredients_file = Some(path.clone());
        }
    }

    /// Apply display-related CLI arguments to configuration
    fn apply_display_args(config: &mut Config, args: &CliArgs) {
        if let Some(format_str) = &args.format {
            config.display.format = Self::parse_output_format(format_str);
        }

        if args.no_color {
            config.display.color_output = false;
        }
    }

    /// Apply logging-related CLI arguments to configuration
    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Parse output format string
    fn parse_output_format(format_str: &str) -> OutputFormat {
        match format_str.to_lowercase().as_str() {
            "plain" | "text" => OutputFormat::Plain,
            "json" => OutputFormat::Json,
            "json-pretty" | "jsonpretty" => OutputFormat::JsonPretty,
            "table" => OutputFormat::Table,
            _ => {
                eprintln!("Warning: Unknown format '{format_str}', using plain");
                OutputFormat::Plain
            }
        }
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if a subcommand was handled, false to continue
    ///   with the interactive REPL
    pub async fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            None | Some(Commands::Interactive) => Ok(false),
            Some(Commands::Suggest { query }) => {
                self.suggest(query).await?;
                Ok(true)
            }
            Some(Commands::Generate { ingredients }) => {
                self.generate(ingredients).await?;
                Ok(true)
            }
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell, &mut io::stdout())?;
                Ok(true)
            }
            Some(Commands::Config {
                show,
                validate,
                set_webhook,
            }) => {
                self.handle_config_command(*show, *validate, set_webhook.as_deref())?;
                Ok(true)
            }
        }
    }

    /// Run one query through a fresh controller and print what it settles on
    async fn suggest(&self, query: &str) -> Result<()> {
        let source = services::candidate_source(&self.config)?;
        let controller = AutocompleteController::new(
            source,
            Arc::new(BoundValue::new()),
            &self.config.autocomplete,
        );

        controller.input_change(query);
        let state = controller.settled().await;
        println!("{}", self.formatter().format_suggestions(&state)?);
        Ok(())
    }

    /// Send ingredients to the webhook and print the outcome
    async fn generate(&self, ingredients: &[String]) -> Result<()> {
        let webhook = RecipeWebhook::from_config(&self.config.webhook)?;
        let spinner = Spinner::start("Generating recipes", !self.args.quiet);
        let outcome = webhook.generate(ingredients).await;
        spinner.finish();

        println!("{}", self.formatter().format_outcome(&outcome?)?);
        Ok(())
    }

    /// Show version information
    fn show_version(&self) {
        println!("pantry version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }

    /// Handle config subcommand
    fn handle_config_command(
        &self,
        show: bool,
        validate: bool,
        set_webhook: Option<&str>,
    ) -> Result<()> {
        if let Some(url) = set_webhook {
            self.save_webhook(url)?;
        }

        if validate {
            self.validate_config_file();
        }

        if show {
            self.show_config()?;
        }

        Ok(())
    }

    /// Persist the webhook URL to the configuration file
    fn save_webhook(&self, url: &str) -> Result<()> {
        // Validates the URL before anything is written
        RecipeWebhook::new(url, self.config.webhook.timeout())?;

        let path = self.get_config_path();
        let mut stored = Config::load_from_file(Some(path.as_path()))?;
        stored.webhook.url = Some(url.trim().to_string());
        stored.save(&path)?;

        tracing::info!(path = %path.display(), "webhook URL saved");
        println!("Webhook URL saved to {}", path.display());
        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("❌ Configuration file does not exist");
            return;
        }

        match Config::load_from_file(Some(path.as_path())) {
            Ok(config) => match config.validate() {
                Ok(()) => println!("✅ Configuration is valid"),
                Err(e) => println!("❌ Configuration validation failed: {e}"),
            },
            Err(e) => println!("❌ Failed to load configuration: {e}"),
        }
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Configuration file: {}", path.display());
        println!();
        println!("=== Effective Configuration ===");
        println!();

        let mut shown = self.config.clone();
        if shown.source.api_key.is_some() {
            shown.source.api_key = Some("***".to_string());
        }
        let rendered = toml::to_string_pretty(&shown)
            .map_err(|e| crate::error::ConfigError::InvalidFormat(e.to_string()))?;
        println!("{rendered}");

        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_path)
    }
}
