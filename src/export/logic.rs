use super::fs_utils::ensure_writable;
use super::ics::to_ics;
use super::{ExportFormat, notify_export_success};
use crate::core::show::ShowLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use std::fs;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    pub fn export(
        pool: &DbPool,
        link: &str,
        format: &ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        let event = ShowLogic::load(pool, link)?;

        let content = match format {
            ExportFormat::Ics => to_ics(&event, Utc::now())?,
            ExportFormat::Json => serde_json::to_string_pretty(&event.view())
                .map_err(|e| AppError::Export(e.to_string()))?,
        };

        fs::write(path, content)?;
        notify_export_success(format.as_str(), path);
        Ok(())
    }
}
