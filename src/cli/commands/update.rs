use crate::cli::commands::show::print_view;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::update::UpdateLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppResult, Status};
use crate::models::form::EventChanges;
use crate::ui::messages::{info, status};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Update {
        link,
        access,
        name,
        description,
        start,
        end,
        clear_end,
    } = cmd
    {
        let changes = EventChanges {
            name: name.clone(),
            description: description.clone(),
            start: start.into(),
            end: end.into(),
            clear_end: *clear_end,
        };

        let mut pool = DbPool::open(&cfg.database)?;
        let event = UpdateLogic::apply(&mut pool, link, access.as_deref(), &changes)?;

        status(Status::Ok);
        if changes.is_empty() {
            info("Nothing to change.");
        }
        print_view(&event.view());
    }

    Ok(())
}
