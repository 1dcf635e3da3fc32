//! One-shot subcommand handlers.
//!
//! Every handler drives the same `ProductScreen` the interactive shell uses,
//! so validation and messages match the form exactly.

use crate::cli::{Cli, Commands};
use crate::{render, shell};
use log::info;
use roomdemo_core::{
    init_logging, AppConfig, FormError, JobReport, Product, ProductId, ProductScreen,
    ProductViewModel, ScreenAction, ScreenError,
};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Failure classes mapped to process exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Input rejected by the form; exit code 2.
    Validation(FormError),
    /// Configuration, store or I/O failure; exit code 1.
    Failure(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 1,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Failure(message) => f.write_str(message),
        }
    }
}

impl From<ScreenError> for CliError {
    fn from(value: ScreenError) -> Self {
        match value {
            ScreenError::Form(err) => Self::Validation(err),
            ScreenError::ViewModel(err) => Self::Failure(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ActionOutput<'a> {
    ok: bool,
    action: &'a str,
    affected: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_id: Option<ProductId>,
}

/// Resolves configuration from flags over environment defaults.
pub fn resolve_config(cli: &Cli) -> AppConfig {
    let mut config = AppConfig::from_env();
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    config
}

pub fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(&cli);
    if let Some(log_dir) = &config.log_dir {
        start_logging(&config.log_level, log_dir)?;
    }

    let view_model = ProductViewModel::open(&config.db_path).map_err(|err| {
        CliError::Failure(format!(
            "failed to open database `{}`: {err}",
            config.db_path.display()
        ))
    })?;
    let mut screen = ProductScreen::new(view_model);

    match cli.command {
        Commands::Add { name, quantity } => {
            screen.set_name(name);
            screen.set_quantity(quantity);
            let report = press_and_wait(&mut screen, ScreenAction::Add)?;
            let product_id = report.inserted.first().copied();
            let message = match product_id {
                Some(id) => format!("Product added (id {id})."),
                None => "Product added.".to_string(),
            };
            report_action(
                cli.json,
                ActionOutput {
                    ok: true,
                    action: "add",
                    affected: report.inserted.len(),
                    product_id,
                },
                &message,
            )
        }
        Commands::Search { name } => {
            screen.set_name(name);
            press_and_wait(&mut screen, ScreenAction::Search)?;
            report_list(cli.json, &screen)
        }
        Commands::Delete { name } => {
            screen.set_name(name);
            let report = press_and_wait(&mut screen, ScreenAction::Delete)?;
            report_action(
                cli.json,
                ActionOutput {
                    ok: true,
                    action: "delete",
                    affected: report.removed,
                    product_id: None,
                },
                &format!("Deleted {} product(s).", report.removed),
            )
        }
        Commands::List => {
            wait_idle(&screen)?;
            report_list(cli.json, &screen)
        }
        Commands::Shell => {
            let stdin = std::io::stdin();
            shell::run(&mut screen, stdin.lock(), std::io::stdout()).map_err(CliError::Failure)
        }
    }
}

fn start_logging(level: &str, log_dir: &Path) -> Result<(), CliError> {
    let dir = log_dir.to_str().ok_or_else(|| {
        CliError::Failure(format!(
            "log directory `{}` is not valid UTF-8",
            log_dir.display()
        ))
    })?;
    init_logging(level, dir).map_err(CliError::Failure)?;
    info!("event=cli_start module=cli status=ok");
    Ok(())
}

fn press_and_wait(
    screen: &mut ProductScreen,
    action: ScreenAction,
) -> Result<JobReport, CliError> {
    screen.press(action)?;
    wait_idle(screen)
}

/// Waits for dispatched store jobs; a failed job becomes exit code 1.
fn wait_idle(screen: &ProductScreen) -> Result<JobReport, CliError> {
    screen
        .view_model()
        .wait_idle()
        .map_err(|err| CliError::Failure(err.to_string()))
}

fn report_action(json: bool, output: ActionOutput<'_>, message: &str) -> Result<(), CliError> {
    if json {
        print_json(&output)
    } else {
        println!("{message}");
        Ok(())
    }
}

fn report_list(json: bool, screen: &ProductScreen) -> Result<(), CliError> {
    if json {
        let products: Vec<Product> = screen.visible_products();
        print_json(&products)
    } else {
        print!("{}", render::table(&screen.rows()));
        Ok(())
    }
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::Failure(format!("failed to encode JSON: {err}")))?;
    println!("{text}");
    Ok(())
}
