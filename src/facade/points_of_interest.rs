use tracing::info;

use super::Backoffice;
use super::backoffice::warn_on_slug_collision;
use crate::cascade::{self, CascadeStep, Saga};
use crate::core::slug::{point_of_interest_slug, slug_matches};
use crate::core::time::timestamp_now;
use crate::core::{CatalogError, PoiDraft, PoiInput, PointOfInterest, RecordId, Result};
use crate::core::{Category, Municipality, TourRef};
use crate::storage::{find_by_id, next_id, position_of};

const ENTITY: &str = "point of interest";

/// Everything a point of interest copies from other collections.
struct ResolvedReferences {
    municipality: Municipality,
    categorie: Vec<Category>,
    tours: Vec<TourRef>,
}

impl Backoffice {
    pub async fn list_points_of_interest(&self) -> Result<Vec<PointOfInterest>> {
        self.collections().points_of_interest.load().await
    }

    pub async fn get_point_of_interest(&self, id: RecordId) -> Result<PointOfInterest> {
        let pois = self.collections().points_of_interest.load().await?;
        find_by_id(&pois, id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(ENTITY, id))
    }

    /// Case-insensitive; the first match wins when slugs collide.
    pub async fn get_point_of_interest_by_slug(&self, slug: &str) -> Result<PointOfInterest> {
        let pois = self.collections().points_of_interest.load().await?;
        pois.into_iter()
            .find(|poi| slug_matches(&poi.slug, slug))
            .ok_or_else(|| CatalogError::not_found(ENTITY, slug))
    }

    async fn resolve_poi_references(&self, draft: &PoiDraft) -> Result<ResolvedReferences> {
        let resolver = self.resolver();
        Ok(ResolvedReferences {
            municipality: resolver.resolve_municipality(&draft.comune).await?,
            categorie: resolver.resolve_categories(&draft.categorie).await?,
            tours: resolver.resolve_tours(&draft.tours).await?,
        })
    }

    /// Creates a point of interest and registers it in the tours it lists.
    ///
    /// Nothing is written unless the municipality, every category and every
    /// tour resolve.
    pub async fn create_point_of_interest(&self, input: PoiInput) -> Result<PointOfInterest> {
        let draft = input.validate()?;
        let _gate = self.write_gate().await;
        let collections = self.collections();

        let refs = self.resolve_poi_references(&draft).await?;
        let mut pois = collections.points_of_interest.load().await?;
        let mut tours = collections.tours.load().await?;

        let slug = point_of_interest_slug(&refs.municipality.slug, &draft.nome);
        warn_on_slug_collision(ENTITY, &slug, pois.iter().map(|poi| poi.slug.as_str()));

        let now = timestamp_now();
        let poi = PointOfInterest {
            id: next_id(&pois),
            nome: draft.nome,
            slug,
            comune: refs.municipality.nome,
            provincia: refs.municipality.provincia,
            categorie: refs.categorie,
            tours: refs.tours,
            data_creazione: now.clone(),
            ultima_modifica: now,
        };
        pois.push(poi.clone());
        let touched = cascade::sync_poi_into_tours(&mut tours, &poi);

        let mut saga = Saga::new("create point of interest");
        saga.step(
            CascadeStep::SavePointsOfInterest,
            collections.points_of_interest.save(&pois),
        )
        .await?;
        if touched > 0 {
            saga.step(CascadeStep::SaveTours, collections.tours.save(&tours))
                .await?;
        }

        info!(poi_id = poi.id, slug = %poi.slug, tours = touched, "point of interest created");
        Ok(poi)
    }

    /// Full replace of a point of interest; `dataCreazione` is kept.
    pub async fn update_point_of_interest(
        &self,
        id: RecordId,
        input: PoiInput,
    ) -> Result<PointOfInterest> {
        let draft = input.validate()?;
        let _gate = self.write_gate().await;
        let collections = self.collections();

        let mut pois = collections.points_of_interest.load().await?;
        let index = position_of(&pois, id).ok_or_else(|| CatalogError::not_found(ENTITY, id))?;
        let refs = self.resolve_poi_references(&draft).await?;
        let mut tours = collections.tours.load().await?;

        let slug = point_of_interest_slug(&refs.municipality.slug, &draft.nome);
        warn_on_slug_collision(
            ENTITY,
            &slug,
            pois.iter()
                .filter(|poi| poi.id != id)
                .map(|poi| poi.slug.as_str()),
        );

        let poi = PointOfInterest {
            id,
            nome: draft.nome,
            slug,
            comune: refs.municipality.nome,
            provincia: refs.municipality.provincia,
            categorie: refs.categorie,
            tours: refs.tours,
            data_creazione: pois[index].data_creazione.clone(),
            ultima_modifica: timestamp_now(),
        };
        pois[index] = poi.clone();
        let touched = cascade::sync_poi_into_tours(&mut tours, &poi);

        let mut saga = Saga::new("update point of interest");
        saga.step(
            CascadeStep::SavePointsOfInterest,
            collections.points_of_interest.save(&pois),
        )
        .await?;
        if touched > 0 {
            saga.step(CascadeStep::SaveTours, collections.tours.save(&tours))
                .await?;
        }

        info!(poi_id = id, slug = %poi.slug, tours = touched, "point of interest updated");
        Ok(poi)
    }

    /// Deletes a point of interest and its entry in every tour.
    pub async fn delete_point_of_interest(&self, id: RecordId) -> Result<()> {
        let _gate = self.write_gate().await;
        let collections = self.collections();

        let mut pois = collections.points_of_interest.load().await?;
        let index = position_of(&pois, id).ok_or_else(|| CatalogError::not_found(ENTITY, id))?;
        pois.remove(index);

        let mut tours = collections.tours.load().await?;
        let touched = cascade::remove_poi_from_tours(&mut tours, id);

        let mut saga = Saga::new("delete point of interest");
        saga.step(
            CascadeStep::SavePointsOfInterest,
            collections.points_of_interest.save(&pois),
        )
        .await?;
        if touched > 0 {
            saga.step(CascadeStep::SaveTours, collections.tours.save(&tours))
                .await?;
        }

        info!(poi_id = id, tours = touched, "point of interest deleted");
        Ok(())
    }

    /// Strips a tour from every point of interest. Run before deleting the tour.
    ///
    /// Returns the number of points of interest changed.
    pub async fn remove_tour_from_points_of_interest(&self, tour_id: RecordId) -> Result<usize> {
        let _gate = self.write_gate().await;

        let store = &self.collections().points_of_interest;
        let mut pois = store.load().await?;
        let touched = cascade::remove_tour_from_pois(&mut pois, tour_id);
        if touched > 0 {
            store.save(&pois).await?;
        }

        info!(tour_id, points_of_interest = touched, "tour removed from points of interest");
        Ok(touched)
    }
}
