use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::types::DropDownMenuId;

/// The site-wide drop-down navigation tree. Only the first record is served.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DropDownMenu {
    pub id: DropDownMenuId,
    pub data: Option<Value>,
}
