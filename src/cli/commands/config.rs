use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::process::Command;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn run_editor(editor: &str) -> bool {
    matches!(Command::new(editor).arg(Config::config_file()).status(), Ok(s) if s.success())
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        if *edit_config {
            let fallback = default_editor();
            let requested = editor.clone().unwrap_or_else(|| fallback.clone());

            if run_editor(&requested) {
                success(format!("Configuration file edited using '{}'", requested));
            } else if requested != fallback {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    requested, fallback
                ));
                if !run_editor(&fallback) {
                    return Err(AppError::Config(format!(
                        "failed to edit configuration with '{}'",
                        fallback
                    )));
                }
                success(format!("Configuration file edited using '{}'", fallback));
            } else {
                return Err(AppError::Config(format!(
                    "failed to edit configuration with '{}'",
                    requested
                )));
            }
        }
    }

    Ok(())
}
