use tracing::info;

use super::Backoffice;
use crate::cascade::{self, CascadeStep, Saga};
use crate::core::{CatalogError, Category, CategoryInput, RecordId, Result};
use crate::storage::{find_by_id, next_id, position_of};

const ENTITY: &str = "category";

impl Backoffice {
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.collections().categories.load().await
    }

    pub async fn get_category(&self, id: RecordId) -> Result<Category> {
        let categories = self.collections().categories.load().await?;
        find_by_id(&categories, id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(ENTITY, id))
    }

    pub async fn create_category(&self, input: CategoryInput) -> Result<Category> {
        let name = input.validate()?;
        let _gate = self.write_gate().await;

        let store = &self.collections().categories;
        let mut categories = store.load().await?;
        let category = Category {
            id: next_id(&categories),
            name,
        };
        categories.push(category.clone());
        store.save(&categories).await?;

        info!(category_id = category.id, name = %category.name, "category created");
        Ok(category)
    }

    /// Renames the category and every copy embedded in points of interest.
    pub async fn rename_category(&self, id: RecordId, input: CategoryInput) -> Result<Category> {
        let name = input.validate()?;
        let _gate = self.write_gate().await;
        let collections = self.collections();

        let mut categories = collections.categories.load().await?;
        let index =
            position_of(&categories, id).ok_or_else(|| CatalogError::not_found(ENTITY, id))?;
        categories[index].name = name.clone();

        let mut pois = collections.points_of_interest.load().await?;
        let touched = cascade::rename_poi_category(&mut pois, id, &name);

        let mut saga = Saga::new("rename category");
        if touched > 0 {
            saga.step(
                CascadeStep::SavePointsOfInterest,
                collections.points_of_interest.save(&pois),
            )
            .await?;
        }
        saga.step(CascadeStep::SaveCategories, collections.categories.save(&categories))
            .await?;

        info!(category_id = id, name = %name, points_of_interest = touched, "category renamed");
        Ok(categories[index].clone())
    }

    /// Deletes the category and drops it from every point of interest.
    pub async fn delete_category(&self, id: RecordId) -> Result<()> {
        let _gate = self.write_gate().await;
        let collections = self.collections();

        let mut categories = collections.categories.load().await?;
        let index =
            position_of(&categories, id).ok_or_else(|| CatalogError::not_found(ENTITY, id))?;
        categories.remove(index);

        let mut pois = collections.points_of_interest.load().await?;
        let touched = cascade::remove_poi_category(&mut pois, id);

        let mut saga = Saga::new("delete category");
        if touched > 0 {
            saga.step(
                CascadeStep::SavePointsOfInterest,
                collections.points_of_interest.save(&pois),
            )
            .await?;
        }
        saga.step(CascadeStep::SaveCategories, collections.categories.save(&categories))
            .await?;

        info!(category_id = id, points_of_interest = touched, "category deleted");
        Ok(())
    }
}
