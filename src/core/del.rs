use crate::core::access::authorize;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::delete_event;
use crate::errors::AppResult;

pub struct DeleteLogic;

impl DeleteLogic {
    pub fn apply(pool: &mut DbPool, link: &str, access: Option<&str>) -> AppResult<()> {
        let tx = pool.transaction()?;

        let event = authorize(&tx, link, access)?;
        delete_event(&tx, event.id)?;
        ttlog(&tx, "del", link, &format!("Deleted '{}'", event.name))?;
        tx.commit()?;

        log::debug!("Deleted event {} (row {})", link, event.id);
        Ok(())
    }
}
