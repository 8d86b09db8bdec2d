use crate::config::Config;
use crate::core::link::LinkGenerator;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_event, is_link_collision};
use crate::errors::{AppError, AppResult};
use crate::models::event::Event;
use crate::models::form::EventForm;

/// High-level business logic for event creation.
pub struct CreateLogic;

impl CreateLogic {
    /// Validate the form, then persist the event, drawing a new link each
    /// time the store reports a link collision. Every attempt runs in its
    /// own transaction; after `cfg.max_link_attempts` collisions the request
    /// fails with [`AppError::LinkExhausted`].
    pub fn apply(
        pool: &mut DbPool,
        cfg: &Config,
        links: &dyn LinkGenerator,
        form: &EventForm,
    ) -> AppResult<Event> {
        let mut event = Event::construct(form, links, cfg.access_cost)?;

        for attempt in 1..=cfg.max_link_attempts {
            let tx = pool.transaction()?;

            match insert_event(&tx, &event) {
                Ok(id) => {
                    ttlog(&tx, "create", event.link(), &format!("Created '{}'", event.name))?;
                    tx.commit()?;
                    event.id = id;
                    log::debug!("Stored event {} as row {}", event.link(), id);
                    return Ok(event);
                }
                Err(e) if is_link_collision(&e) => {
                    log::warn!(
                        "Link collision on '{}' (attempt {}/{}), drawing a new one",
                        event.link(),
                        attempt,
                        cfg.max_link_attempts
                    );
                    tx.rollback()?;
                    event.relink(links);
                }
                Err(e) => return Err(e.into()),
            }
        }

        log::error!(
            "Gave up assigning a link after {} collisions",
            cfg.max_link_attempts
        );
        Err(AppError::LinkExhausted(cfg.max_link_attempts))
    }
}
