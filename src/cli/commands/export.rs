use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        link,
        format,
        file,
        force,
    } = cmd
    {
        let pool = DbPool::open(&cfg.database)?;
        ExportLogic::export(&pool, link, format, file, *force)?;
    }
    Ok(())
}
