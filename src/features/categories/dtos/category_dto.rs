use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::categories::models::Category;
use crate::features::categories::tree::FlattenedCategory;
use crate::features::medias::dtos::MediaResponseDto;
use crate::shared::validation::SLUG_REGEX;

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub active: bool,
    pub image: Option<MediaResponseDto>,
    pub created_date: Option<NaiveDateTime>,
    pub last_modified_date: Option<NaiveDateTime>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            parent_id: c.parent_id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            active: c.active,
            image: c.image.map(Into::into),
            created_date: c.created_date,
            last_modified_date: c.last_modified_date,
        }
    }
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub active: bool,
    pub image: Option<MediaResponseDto>,
    pub children: Vec<CategoryTreeDto>,
}

impl From<Category> for CategoryTreeDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            active: c.active,
            image: c.image.map(Into::into),
            children: c.children.into_iter().map(Into::into).collect(),
        }
    }
}

/// Entry of the parent picker: a flattened category and whether it may be
/// chosen as parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryOptionDto {
    pub id: i64,
    pub name: String,
    /// Depth in the tree, roots are 0
    pub level: u32,
    pub disabled: bool,
}

impl CategoryOptionDto {
    pub fn new(category: FlattenedCategory, disabled: bool) -> Self {
        Self {
            id: category.id,
            name: category.name,
            level: category.level,
            disabled,
        }
    }
}

/// Query params for the parent picker
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryOptionsQuery {
    /// Category being edited; it and its descendants are marked disabled
    pub disable: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,

    /// Derived from the name when omitted
    #[validate(length(min = 1, max = 50, message = "Slug must be 1-50 characters"))]
    #[validate(regex(
        path = *SLUG_REGEX,
        message = "Slug may only contain lowercase letters, digits and single hyphens"
    ))]
    pub slug: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Description must be 1-255 characters"))]
    pub description: String,

    #[serde(default = "default_active")]
    pub active: bool,

    pub parent_id: Option<i64>,

    pub image_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "Slug must be 1-50 characters"))]
    #[validate(regex(
        path = *SLUG_REGEX,
        message = "Slug may only contain lowercase letters, digits and single hyphens"
    ))]
    pub slug: String,

    #[validate(length(min = 1, max = 255, message = "Description must be 1-255 characters"))]
    pub description: String,

    #[serde(default = "default_active")]
    pub active: bool,

    pub parent_id: Option<i64>,

    pub image_id: Option<i64>,
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto(name: &str, slug: Option<&str>) -> CreateCategoryDto {
        CreateCategoryDto {
            name: name.to_string(),
            slug: slug.map(str::to_string),
            description: "Seasonal flowers".to_string(),
            active: true,
            parent_id: None,
            image_id: None,
        }
    }

    #[test]
    fn test_create_dto_validation() {
        assert!(create_dto("Flowers", Some("flowers")).validate().is_ok());
        assert!(create_dto("Flowers", None).validate().is_ok());
        assert!(create_dto("", Some("flowers")).validate().is_err());
        assert!(create_dto("Flowers", Some("Flowers")).validate().is_err());
        assert!(create_dto("Flowers", Some("fresh--flowers")).validate().is_err());
        assert!(create_dto(&"a".repeat(51), None).validate().is_err());
    }

    #[test]
    fn test_update_dto_requires_valid_slug() {
        let mut dto = UpdateCategoryDto {
            name: "Roses".to_string(),
            slug: "roses".to_string(),
            description: "Red and white".to_string(),
            active: true,
            parent_id: Some(1),
            image_id: None,
        };
        assert!(dto.validate().is_ok());

        dto.slug = "-roses".to_string();
        assert!(dto.validate().is_err());

        dto.slug = "roses".to_string();
        dto.description = String::new();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_active_defaults_to_true() {
        let dto: CreateCategoryDto = serde_json::from_str(
            r#"{"name": "Roses", "description": "Red and white"}"#,
        )
        .unwrap();
        assert!(dto.active);
        assert!(dto.slug.is_none());
    }

    #[test]
    fn test_tree_dto_keeps_nesting() {
        let category: Category = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Flowers",
            "slug": "flowers",
            "active": true,
            "children": [
                {"id": 2, "name": "Roses", "slug": "roses", "active": true}
            ]
        }))
        .unwrap();

        let dto = CategoryTreeDto::from(category);
        assert_eq!(dto.children.len(), 1);
        assert_eq!(dto.children[0].slug, "roses");
    }
}
