use tracing::{info, warn};

use super::Backoffice;
use super::backoffice::warn_on_slug_collision;
use crate::cascade::{self, CascadeStep, Saga};
use crate::core::slug::{slug_matches, tour_slug};
use crate::core::time::timestamp_now;
use crate::core::{CatalogError, RecordId, Result, Tour, TourInput};
use crate::storage::{find_by_id, next_id, position_of};

const ENTITY: &str = "tour";

impl Backoffice {
    pub async fn list_tours(&self) -> Result<Vec<Tour>> {
        self.collections().tours.load().await
    }

    pub async fn get_tour(&self, id: RecordId) -> Result<Tour> {
        let tours = self.collections().tours.load().await?;
        find_by_id(&tours, id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(ENTITY, id))
    }

    pub async fn get_tour_by_slug(&self, slug: &str) -> Result<Tour> {
        let tours = self.collections().tours.load().await?;
        tours
            .into_iter()
            .find(|tour| slug_matches(&tour.slug, slug))
            .ok_or_else(|| CatalogError::not_found(ENTITY, slug))
    }

    /// New tours start without points of interest; those attach from the
    /// point-of-interest side.
    pub async fn create_tour(&self, input: TourInput) -> Result<Tour> {
        let draft = input.validate()?;
        let _gate = self.write_gate().await;

        let categorie = self.resolver().resolve_tour_categories(&draft.categorie).await?;
        let store = &self.collections().tours;
        let mut tours = store.load().await?;

        let slug = tour_slug(&draft.nome);
        warn_on_slug_collision(ENTITY, &slug, tours.iter().map(|tour| tour.slug.as_str()));

        let now = timestamp_now();
        let tour = Tour {
            id: next_id(&tours),
            nome: draft.nome,
            slug,
            categorie,
            pdi: Vec::new(),
            data_creazione: now.clone(),
            ultima_modifica: now,
        };
        tours.push(tour.clone());
        store.save(&tours).await?;

        info!(tour_id = tour.id, slug = %tour.slug, "tour created");
        Ok(tour)
    }

    /// Replaces name and categories. The `pdi` list and `dataCreazione` are
    /// kept; a new name is copied into every point of interest listing the tour.
    pub async fn update_tour(&self, id: RecordId, input: TourInput) -> Result<Tour> {
        let draft = input.validate()?;
        let _gate = self.write_gate().await;
        let collections = self.collections();

        let mut tours = collections.tours.load().await?;
        let index = position_of(&tours, id).ok_or_else(|| CatalogError::not_found(ENTITY, id))?;
        let categorie = self.resolver().resolve_tour_categories(&draft.categorie).await?;

        let slug = tour_slug(&draft.nome);
        warn_on_slug_collision(
            ENTITY,
            &slug,
            tours
                .iter()
                .filter(|tour| tour.id != id)
                .map(|tour| tour.slug.as_str()),
        );

        let renamed = tours[index].nome != draft.nome;
        let tour = &mut tours[index];
        tour.nome = draft.nome;
        tour.slug = slug;
        tour.categorie = categorie;
        tour.ultima_modifica = timestamp_now();
        let tour = tour.clone();

        let mut pois = if renamed {
            collections.points_of_interest.load().await?
        } else {
            Vec::new()
        };
        let touched = cascade::rename_tour_in_pois(&mut pois, id, &tour.nome);

        let mut saga = Saga::new("update tour");
        saga.step(CascadeStep::SaveTours, collections.tours.save(&tours))
            .await?;
        if touched > 0 {
            saga.step(
                CascadeStep::SavePointsOfInterest,
                collections.points_of_interest.save(&pois),
            )
            .await?;
        }

        info!(tour_id = id, slug = %tour.slug, points_of_interest = touched, "tour updated");
        Ok(tour)
    }

    /// Deletes the tour record only.
    ///
    /// Points of interest are not touched: callers strip the tour from them
    /// first with [`Backoffice::remove_tour_from_points_of_interest`].
    pub async fn delete_tour(&self, id: RecordId) -> Result<Tour> {
        let _gate = self.write_gate().await;
        let collections = self.collections();

        let mut tours = collections.tours.load().await?;
        let index = position_of(&tours, id).ok_or_else(|| CatalogError::not_found(ENTITY, id))?;
        let removed = tours.remove(index);
        collections.tours.save(&tours).await?;

        match collections.points_of_interest.load().await {
            Ok(pois) => {
                let dangling = pois.iter().filter(|poi| poi.has_tour(id)).count();
                if dangling > 0 {
                    warn!(
                        tour_id = id,
                        points_of_interest = dangling,
                        "deleted tour is still listed by points of interest"
                    );
                }
            }
            Err(err) => warn!(
                tour_id = id,
                error = %err,
                "could not check points of interest after tour delete"
            ),
        }

        info!(tour_id = id, "tour deleted");
        Ok(removed)
    }
}
