//! Category domain model.
//!
//! Categories are display groupings: tasks point at them by **name**, and the
//! `color`/`icon` fields are presentation hints passed through untouched.

use crate::model::{is_blank, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a category record.
pub type CategoryId = Uuid;

/// Display-hint defaults matching the external schema.
pub const DEFAULT_COLOR: &str = "#3B82F6";
pub const DEFAULT_ICON: &str = "Circle";

/// Named grouping referenced by name from [`Task::category`](crate::model::task::Task).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    /// Unique display key; the loose foreign-key target for tasks.
    pub name: String,
    pub color: String,
    pub icon: String,
}

impl Category {
    /// Materializes a confirmed record from a draft plus a store-assigned id.
    pub fn from_new(draft: &NewCategory, id: CategoryId) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            color: draft
                .color
                .clone()
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            icon: draft.icon.clone().unwrap_or_else(|| DEFAULT_ICON.to_string()),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.name) {
            return Err(ValidationError::EmptyCategoryName);
        }
        Ok(())
    }

    /// Applies a patch in place. Does not validate; callers validate after.
    pub fn apply_patch(&mut self, patch: &CategoryPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
        if let Some(icon) = &patch.icon {
            self.icon = icon.clone();
        }
    }
}

/// Creation draft; absent display hints fall back to schema defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.name) {
            return Err(ValidationError::EmptyCategoryName);
        }
        Ok(())
    }
}

/// Partial update for a category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{Category, NewCategory, DEFAULT_COLOR, DEFAULT_ICON};
    use uuid::Uuid;

    #[test]
    fn from_new_applies_display_defaults() {
        let category = Category::from_new(&NewCategory::new("Work"), Uuid::new_v4());
        assert_eq!(category.color, DEFAULT_COLOR);
        assert_eq!(category.icon, DEFAULT_ICON);
    }

    #[test]
    fn explicit_hints_are_kept() {
        let draft = NewCategory {
            name: "Home".to_string(),
            color: Some("#FF0000".to_string()),
            icon: Some("House".to_string()),
        };
        let category = Category::from_new(&draft, Uuid::new_v4());
        assert_eq!(category.color, "#FF0000");
        assert_eq!(category.icon, "House");
    }
}
