use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::show::ShowLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppResult, Status};
use crate::models::event::EventView;
use crate::ui::messages::{field, status};

pub(crate) fn print_view(view: &EventView) {
    field("Link", &view.link);
    field("Name", &view.name);
    field("Description", &view.description);
    field("Start", &view.start);
    match &view.end {
        Some(end) => field("End", end),
        None => field("End", "-"),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { link, json } = cmd {
        let pool = DbPool::open(&cfg.database)?;
        let view = ShowLogic::find(&pool, link)?;

        if *json {
            let out = serde_json::to_string_pretty(&view)
                .map_err(|e| crate::errors::AppError::Other(e.to_string()))?;
            println!("{}", out);
        } else {
            status(Status::Ok);
            print_view(&view);
        }
    }

    Ok(())
}
