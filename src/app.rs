//! Command line front end over the intimation board.

use std::path::PathBuf;
use std::process;

use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use dialoguer::Confirm;
use log::LevelFilter;

use crate::core::alerts::sound::{self, AlertSink};
use crate::core::board::Board;
use crate::core::config::{self, ConfigManager, Settings};
use crate::core::error::{Error, Result};
use crate::core::intake::{self, IntakeForm};
use crate::core::model::{DurationUnit, Priority};
use crate::core::store::JsonFileStore;
use crate::output::{self, OutputFormat};

/// Record prioritised intimations and get reminded until they expire
#[derive(Debug, Parser)]
#[command(name = "intimations", version, about)]
pub struct Cli {
    /// Directory holding settings.json and the default store
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new intimation
    Add(AddArgs),
    /// Show active intimations per tier
    Dashboard,
    /// Show the active intimations of one tier, firing due alerts
    List {
        #[arg(value_enum)]
        priority: Priority,
    },
    /// Delete an intimation by id
    Delete {
        id: i64,
        /// Tier list to show afterwards
        #[arg(short, long, value_enum)]
        priority: Option<Priority>,
    },
    /// Remove every stored intimation
    Wipe {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommand>,
    },
}

/// Intake fields. Everything is free text and validated by the board.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// System source / application
    #[arg(short, long, default_value = "")]
    pub app: String,
    #[arg(short, long, default_value = "")]
    pub sender: String,
    #[arg(short, long, default_value = "")]
    pub description: String,
    /// high, medium or low
    #[arg(short, long, default_value = "")]
    pub priority: String,
    /// Display hint for when to act
    #[arg(long, default_value = "")]
    pub alert_time: String,
    /// Hours between repeat alerts, 0 for none
    #[arg(short, long, default_value = "0")]
    pub interval: String,
    /// How long the intimation stays visible
    #[arg(long = "for", default_value = "")]
    pub duration: String,
    /// days, months or years
    #[arg(short, long)]
    pub unit: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective settings
    Show,
    /// Move the store slot
    SetStore { path: PathBuf },
    /// Turn alert sounds on or off
    Sound {
        #[arg(value_enum)]
        state: Toggle,
        /// Audio file to play instead of the built-in tone
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Unit used when `add` is given no --unit
    DefaultUnit {
        #[arg(value_enum)]
        unit: DurationUnit,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl AddArgs {
    fn to_form(&self, default_unit: DurationUnit) -> IntakeForm {
        IntakeForm {
            app_name: self.app.clone(),
            sender: self.sender.clone(),
            description: self.description.clone(),
            priority: self.priority.clone(),
            alert_time: self.alert_time.clone(),
            interval_hours: self.interval.clone(),
            duration_value: self.duration.clone(),
            duration_unit: self
                .unit
                .clone()
                .unwrap_or_else(|| default_unit.as_str().to_string()),
        }
    }
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let config_dir = self
            .config_dir
            .clone()
            .unwrap_or_else(config::default_config_dir);
        let manager = ConfigManager::new(config_dir);
        let settings = manager.load();

        let store_path = manager.store_path(&settings);
        log::debug!("Using store {:?}", store_path);
        let board = Board::new(
            JsonFileStore::new(store_path),
            sound::from_settings(settings.sound.enabled, settings.sound.file.clone()),
        );
        let now = Local::now();
        let format = self.format;

        match &self.command {
            Command::Add(args) => {
                let form = args.to_form(settings.default_duration_unit);
                let created = board.submit(&form, &now)?;

                match format {
                    OutputFormat::Json => output::print_item(&created, format),
                    OutputFormat::Table => {
                        let amount = intake::parse_leading_int(&form.duration_value).unwrap_or(0);
                        let unit = form
                            .duration_unit
                            .parse::<DurationUnit>()
                            .unwrap_or(settings.default_duration_unit);
                        output::print_success(&format!(
                            "{} deployed as {} (id {}), visible for {} {} until {}",
                            created.app_name,
                            created.priority.display_name(),
                            created.id,
                            amount,
                            unit.label(amount),
                            created.expiry.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                        ));
                        output::print_dashboard(&board.counts(&now), format);
                    }
                }
            }
            Command::Dashboard => output::print_dashboard(&board.counts(&now), format),
            Command::List { priority } => {
                let items = board.render(*priority, &now)?;
                output::print_items(*priority, &items, format);
                board.announce(&items);
            }
            Command::Delete { id, priority } => match priority {
                Some(priority) => {
                    let items = board.delete(*id, *priority, &now)?;
                    output::print_items(*priority, &items, format);
                    board.announce(&items);
                }
                None => {
                    if board.remove(*id)? {
                        output::print_success(&format!("Deleted intimation {}", id));
                    } else {
                        log::info!("Nothing to delete for id {}", id);
                    }
                }
            },
            Command::Wipe { yes } => wipe(&board, *yes, format)?,
            Command::Config { command } => configure(
                &manager,
                settings.clone(),
                command.as_ref().unwrap_or(&ConfigCommand::Show),
            )?,
        }

        Ok(())
    }
}

fn wipe<A: AlertSink>(board: &Board<JsonFileStore, A>, yes: bool, format: OutputFormat) -> Result<()> {
    let confirmed = yes
        || Confirm::new()
            .with_prompt("Are you sure? This will wipe all system intimations.")
            .default(false)
            .interact()
            .map_err(|e| Error::Prompt(e.to_string()))?;

    if !confirmed {
        output::print_warning("Wipe cancelled.");
        return Ok(());
    }

    board.wipe()?;
    output::print_success("All intimations wiped.");
    output::print_dashboard(&board.counts(&Local::now()), format);
    Ok(())
}

fn configure(manager: &ConfigManager, mut settings: Settings, command: &ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            output::print_kv("Settings file", &manager.config_path().display().to_string());
            output::print_kv("Store", &manager.store_path(&settings).display().to_string());
            output::print_kv(
                "Sound",
                match (settings.sound.enabled, &settings.sound.file) {
                    (false, _) => "off".to_string(),
                    (true, Some(file)) => file.display().to_string(),
                    (true, None) => "tone".to_string(),
                }
                .as_str(),
            );
            output::print_kv("Default unit", settings.default_duration_unit.as_str());
            return Ok(());
        }
        ConfigCommand::SetStore { path } => settings.store_path = path.clone(),
        ConfigCommand::Sound { state, file } => {
            settings.sound.enabled = *state == Toggle::On;
            if file.is_some() {
                settings.sound.file = file.clone();
            }
        }
        ConfigCommand::DefaultUnit { unit } => settings.default_duration_unit = *unit,
    }

    manager.save(&settings).map_err(Error::Config)?;
    output::print_success(&format!("Saved {}", manager.config_path().display()));
    Ok(())
}

fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => {
            builder.parse_filters(&filters);
        }
        Err(_) => {
            builder.filter_level(if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Warn
            });
        }
    }
    // A logger may already be installed when embedded
    let _ = builder.try_init();
}

pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = cli.execute() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
