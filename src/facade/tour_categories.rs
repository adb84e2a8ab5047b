use tracing::info;

use super::Backoffice;
use crate::cascade::{self, CascadeStep, Saga};
use crate::core::{CatalogError, CategoryInput, RecordId, Result, TourCategory};
use crate::storage::{find_by_id, next_id, position_of};

const ENTITY: &str = "tour category";

impl Backoffice {
    pub async fn list_tour_categories(&self) -> Result<Vec<TourCategory>> {
        self.collections().tour_categories.load().await
    }

    pub async fn get_tour_category(&self, id: RecordId) -> Result<TourCategory> {
        let categories = self.collections().tour_categories.load().await?;
        find_by_id(&categories, id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(ENTITY, id))
    }

    pub async fn create_tour_category(&self, input: CategoryInput) -> Result<TourCategory> {
        let name = input.validate()?;
        let _gate = self.write_gate().await;

        let store = &self.collections().tour_categories;
        let mut categories = store.load().await?;
        let category = TourCategory {
            id: next_id(&categories),
            name,
        };
        categories.push(category.clone());
        store.save(&categories).await?;

        info!(tour_category_id = category.id, name = %category.name, "tour category created");
        Ok(category)
    }

    /// Renames the tour category and every copy embedded in tours.
    pub async fn rename_tour_category(
        &self,
        id: RecordId,
        input: CategoryInput,
    ) -> Result<TourCategory> {
        let name = input.validate()?;
        let _gate = self.write_gate().await;
        let collections = self.collections();

        let mut categories = collections.tour_categories.load().await?;
        let index =
            position_of(&categories, id).ok_or_else(|| CatalogError::not_found(ENTITY, id))?;
        categories[index].name = name.clone();

        let mut tours = collections.tours.load().await?;
        let touched = cascade::rename_tour_category(&mut tours, id, &name);

        let mut saga = Saga::new("rename tour category");
        if touched > 0 {
            saga.step(CascadeStep::SaveTours, collections.tours.save(&tours))
                .await?;
        }
        saga.step(
            CascadeStep::SaveTourCategories,
            collections.tour_categories.save(&categories),
        )
        .await?;

        info!(tour_category_id = id, name = %name, tours = touched, "tour category renamed");
        Ok(categories[index].clone())
    }

    /// Deletes the tour category and drops it from every tour.
    pub async fn delete_tour_category(&self, id: RecordId) -> Result<()> {
        let _gate = self.write_gate().await;
        let collections = self.collections();

        let mut categories = collections.tour_categories.load().await?;
        let index =
            position_of(&categories, id).ok_or_else(|| CatalogError::not_found(ENTITY, id))?;
        categories.remove(index);

        let mut tours = collections.tours.load().await?;
        let touched = cascade::remove_tour_category(&mut tours, id);

        let mut saga = Saga::new("delete tour category");
        if touched > 0 {
            saga.step(CascadeStep::SaveTours, collections.tours.save(&tours))
                .await?;
        }
        saga.step(
            CascadeStep::SaveTourCategories,
            collections.tour_categories.save(&categories),
        )
        .await?;

        info!(tour_category_id = id, tours = touched, "tour category deleted");
        Ok(())
    }

    /// Rewrites the embedded name of a tour category inside tours only.
    ///
    /// The tour category collection itself is left alone. Returns the number of
    /// tours changed.
    pub async fn sync_tour_category_in_tours(
        &self,
        id: RecordId,
        input: CategoryInput,
    ) -> Result<usize> {
        let name = input.validate()?;
        let _gate = self.write_gate().await;

        let store = &self.collections().tours;
        let mut tours = store.load().await?;
        let touched = cascade::rename_tour_category(&mut tours, id, &name);
        if touched > 0 {
            store.save(&tours).await?;
        }

        info!(tour_category_id = id, tours = touched, "tour category synced into tours");
        Ok(touched)
    }

    /// Drops a tour category from every tour, leaving the category collection alone.
    pub async fn remove_tour_category_from_tours(&self, id: RecordId) -> Result<usize> {
        let _gate = self.write_gate().await;

        let store = &self.collections().tours;
        let mut tours = store.load().await?;
        let touched = cascade::remove_tour_category(&mut tours, id);
        if touched > 0 {
            store.save(&tours).await?;
        }

        info!(tour_category_id = id, tours = touched, "tour category removed from tours");
        Ok(touched)
    }
}
