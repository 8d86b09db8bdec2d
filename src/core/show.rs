use crate::db::pool::DbPool;
use crate::db::queries::find_by_link;
use crate::errors::{AppError, AppResult};
use crate::models::event::{Event, EventView};

pub struct ShowLogic;

impl ShowLogic {
    pub fn load(pool: &DbPool, link: &str) -> AppResult<Event> {
        find_by_link(&pool.conn, link)?.ok_or_else(|| AppError::NotFound(link.to_string()))
    }

    /// Public view of the event: decoded dates, no id and no access hash.
    pub fn find(pool: &DbPool, link: &str) -> AppResult<EventView> {
        Ok(Self::load(pool, link)?.view())
    }
}
