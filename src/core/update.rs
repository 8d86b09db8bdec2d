use crate::core::access::authorize;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::update_event;
use crate::errors::AppResult;
use crate::models::event::Event;
use crate::models::form::EventChanges;

pub struct UpdateLogic;

impl UpdateLogic {
    /// Lookup, access check, validation, then a single write and commit.
    /// A request that changes nothing is authorised but not written.
    pub fn apply(
        pool: &mut DbPool,
        link: &str,
        access: Option<&str>,
        changes: &EventChanges,
    ) -> AppResult<Event> {
        let tx = pool.transaction()?;

        let mut event = authorize(&tx, link, access)?;
        if changes.is_empty() {
            log::debug!("Nothing to update for {}", link);
            return Ok(event);
        }
        event.update(changes)?;

        update_event(&tx, &event)?;
        ttlog(&tx, "update", link, &format!("Updated '{}'", event.name))?;
        tx.commit()?;

        Ok(event)
    }
}
