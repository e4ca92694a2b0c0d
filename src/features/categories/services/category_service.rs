use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryOptionDto, CategoryResponseDto, CategoryTreeDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::{
    Category, CreateCategoryRequest, UpdateCategoryRequest,
};
use crate::features::categories::tree::{disabled_ids, CategoryTree};
use crate::modules::catalog_api::{CatalogApi, Page};
use crate::shared::query::ListQuery;
use crate::shared::validation::{slugify, SLUG_REGEX};

/// Service for category operations
pub struct CategoryService {
    api: Arc<dyn CatalogApi>,
}

impl CategoryService {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }

    /// One page of categories.
    ///
    /// The list screen stays usable when the catalog API is down, so upstream
    /// failures yield an empty page instead of an error.
    pub async fn list(&self, query: &ListQuery) -> Page<Category> {
        match self.api.list_categories(query).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Failed to list categories, returning empty page: {}", e);
                Page::empty(query.size)
            }
        }
    }

    /// Flat page as returned by [`Self::list`]
    pub async fn list_flat(&self, query: &ListQuery) -> (Vec<CategoryResponseDto>, i64) {
        let page = self.list(query).await.map(CategoryResponseDto::from);
        (page.content, page.total_elements)
    }

    /// Page content nested by `parent_id`; parents outside the page make
    /// their children roots
    pub async fn list_nested(&self, query: &ListQuery) -> (Vec<CategoryTreeDto>, i64) {
        let page = self.list(query).await;
        let total = page.total_elements;
        let forest = CategoryTree::from_flat(page.content).to_forest();
        (forest.into_iter().map(Into::into).collect(), total)
    }

    /// Whole hierarchy, normalized through the node store
    pub async fn tree(&self) -> Result<Vec<CategoryTreeDto>> {
        let tree = self.load_tree().await?;
        Ok(tree.to_forest().into_iter().map(Into::into).collect())
    }

    /// Parent picker entries in pre-order. When `disable` is set, that
    /// category and its whole subtree are flagged as not selectable.
    pub async fn options(&self, disable: Option<i64>) -> Result<Vec<CategoryOptionDto>> {
        let flat = self.load_tree().await?.flatten();
        let disabled = disable
            .map(|id| disabled_ids(&flat, id))
            .unwrap_or_default();

        Ok(flat
            .into_iter()
            .map(|c| {
                let is_disabled = disabled.contains(&c.id);
                CategoryOptionDto::new(c, is_disabled)
            })
            .collect())
    }

    pub async fn get(&self, id: i64) -> Result<CategoryResponseDto> {
        let category = self.api.get_category(id).await?;
        Ok(category.into())
    }

    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let slug = match dto.slug {
            Some(slug) => slug,
            None => derive_slug(&dto.name)?,
        };

        let request = CreateCategoryRequest {
            name: dto.name,
            slug,
            description: dto.description,
            active: dto.active,
            parent_id: dto.parent_id,
            image_id: dto.image_id,
        };

        let category = self.api.create_category(&request).await?;
        Ok(category.into())
    }

    /// Update a category. A new parent must not be the category itself or
    /// one of its descendants.
    pub async fn update(&self, id: i64, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        if let Some(parent_id) = dto.parent_id {
            let (_, forest) =
                tokio::try_join!(self.api.get_category(id), self.api.category_tree())?;

            let flat = CategoryTree::from_forest(forest).flatten();
            if disabled_ids(&flat, id).contains(&parent_id) {
                return Err(AppError::BadRequest(format!(
                    "Category {} cannot be moved under itself or one of its descendants",
                    id
                )));
            }
        }

        let request = UpdateCategoryRequest {
            name: dto.name,
            slug: dto.slug,
            description: dto.description,
            active: dto.active,
            parent_id: dto.parent_id,
            image_id: dto.image_id,
        };

        let category = self.api.update_category(id, &request).await?;
        Ok(category.into())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.api.delete_category(id).await
    }

    async fn load_tree(&self) -> Result<CategoryTree> {
        let forest = self.api.category_tree().await?;
        Ok(CategoryTree::from_forest(forest))
    }
}

fn derive_slug(name: &str) -> Result<String> {
    let slug = slugify(name);
    if slug.is_empty() || slug.len() > 50 || !SLUG_REGEX.is_match(&slug) {
        return Err(AppError::Validation(format!(
            "Cannot derive a valid slug from name '{}', please provide one",
            name
        )));
    }
    Ok(slug)
}
