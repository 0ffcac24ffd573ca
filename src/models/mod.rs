//! Diesel row types and their conversions into domain entities.

use serde_json::Value;

use crate::domain::types::TypeConstraintError;

pub mod config;
pub mod drop_down_menu;
pub mod landing_page_image;
pub mod menu_list;
pub mod product;
pub mod product_image;

/// Decode a JSON text column. Stored `null` collapses to `None`.
pub(crate) fn meta_from_column(value: Option<String>) -> Result<Option<Value>, TypeConstraintError> {
    match value {
        None => Ok(None),
        Some(text) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Null) => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(e) => Err(TypeConstraintError::InvalidValue(format!(
                "stored JSON is malformed: {e}"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_json_columns() {
        assert_eq!(meta_from_column(None).unwrap(), None);
        assert_eq!(meta_from_column(Some("null".into())).unwrap(), None);
        assert_eq!(
            meta_from_column(Some(r#"{"collection":"sev-drulo"}"#.into())).unwrap(),
            Some(serde_json::json!({"collection": "sev-drulo"}))
        );
        assert!(meta_from_column(Some("{oops".into())).is_err());
    }
}
