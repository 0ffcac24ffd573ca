use serde_json::Value;

use crate::repository::{DropDownMenuReader, DropDownMenuWriter};

use super::{ServiceError, ServiceResult};

/// Data of the first drop-down menu, or `None` when nothing was saved yet.
pub fn show_drop_down_menu<R>(repo: &R) -> ServiceResult<Option<Value>>
where
    R: DropDownMenuReader,
{
    match repo.first_drop_down_menu() {
        Ok(menu) => Ok(menu.and_then(|menu| menu.data)),
        Err(e) => {
            log::error!("Failed to get drop-down menu: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Replace the navigation tree. A JSON `null` clears it.
pub fn save_drop_down_menu<R>(data: Value, repo: &R) -> ServiceResult<Option<Value>>
where
    R: DropDownMenuWriter,
{
    let data = (!data.is_null()).then_some(data);
    match repo.save_drop_down_menu(data.as_ref()) {
        Ok(menu) => Ok(menu.data),
        Err(e) => {
            log::error!("Failed to save drop-down menu: {e}");
            Err(ServiceError::Internal)
        }
    }
}
