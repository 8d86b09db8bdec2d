use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppResult, Status};
use crate::ui::messages::{status, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Delete { link, access } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;
        DeleteLogic::apply(&mut pool, link, access.as_deref())?;

        status(Status::Ok);
        success(format!("Event {} has been deleted.", link));
    }

    Ok(())
}
