use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::create::CreateLogic;
use crate::core::link::RandomLinks;
use crate::db::pool::DbPool;
use crate::errors::{AppResult, Status};
use crate::models::form::EventForm;
use crate::ui::messages::{status, success};

/// Create an event: answers `302 Found` with the event location.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Create {
        name,
        description,
        access,
        start,
        end,
    } = cmd
    {
        let form = EventForm {
            name: name.clone(),
            description: description.clone(),
            access: access.clone(),
            start: start.into(),
            end: end.into(),
        };

        let mut pool = DbPool::open(&cfg.database)?;
        let links = RandomLinks::new(cfg.link_length);
        let event = CreateLogic::apply(&mut pool, cfg, &links, &form)?;

        status(Status::Found);
        println!("Location: {}", event.location());
        success(format!("Created '{}' with link {}", event.name, event.link()));
    }

    Ok(())
}
