use tracing::{info, warn};

use super::Backoffice;
use super::backoffice::warn_on_slug_collision;
use crate::cascade::{self, CascadeStep, Saga};
use crate::core::slug::{municipality_slug, slug_matches};
use crate::core::{
    CatalogError, Municipality, MunicipalityInput, PointOfInterest, Province, RecordId, Result,
    Tour,
};
use crate::storage::{find_by_id, next_id, position_of};

const ENTITY: &str = "municipality";

impl Backoffice {
    pub async fn list_municipalities(&self) -> Result<Vec<Municipality>> {
        self.collections().municipalities.load().await
    }

    pub async fn get_municipality(&self, id: RecordId) -> Result<Municipality> {
        let municipalities = self.collections().municipalities.load().await?;
        find_by_id(&municipalities, id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(ENTITY, id))
    }

    /// Case-insensitive; the first match wins when slugs collide.
    pub async fn get_municipality_by_slug(&self, slug: &str) -> Result<Municipality> {
        let municipalities = self.collections().municipalities.load().await?;
        municipalities
            .into_iter()
            .find(|municipality| slug_matches(&municipality.slug, slug))
            .ok_or_else(|| CatalogError::not_found(ENTITY, slug))
    }

    /// Municipalities whose `provincia` matches the province slug. Empty is a not-found.
    pub async fn municipalities_of_province(
        &self,
        province_slug: &str,
    ) -> Result<Vec<Municipality>> {
        let municipalities = self.collections().municipalities.load().await?;
        let matching: Vec<Municipality> = municipalities
            .into_iter()
            .filter(|municipality| municipality.provincia.eq_ignore_ascii_case(province_slug))
            .collect();
        if matching.is_empty() {
            return Err(CatalogError::not_found("municipalities of province", province_slug));
        }
        Ok(matching)
    }

    pub async fn create_municipality(&self, input: MunicipalityInput) -> Result<Municipality> {
        let draft = input.validate()?;
        let slug = municipality_slug(&draft.nome, &draft.provincia);
        if Province::from_slug(&draft.provincia).is_none() {
            warn!(provincia = %draft.provincia, "province is not one of the fixed codes");
        }
        let _gate = self.write_gate().await;

        let store = &self.collections().municipalities;
        let mut municipalities = store.load().await?;
        warn_on_slug_collision(ENTITY, &slug, municipalities.iter().map(|m| m.slug.as_str()));

        let municipality = Municipality {
            id: next_id(&municipalities),
            nome: draft.nome,
            slug,
            provincia: draft.provincia,
        };
        municipalities.push(municipality.clone());
        store.save(&municipalities).await?;

        info!(municipality_id = municipality.id, slug = %municipality.slug, "municipality created");
        Ok(municipality)
    }

    /// Replaces name and province, then moves every point of interest filed
    /// under the old name and refreshes their entries in tours.
    pub async fn update_municipality(
        &self,
        id: RecordId,
        input: MunicipalityInput,
    ) -> Result<Municipality> {
        let draft = input.validate()?;
        let slug = municipality_slug(&draft.nome, &draft.provincia);
        let _gate = self.write_gate().await;
        let collections = self.collections();

        let mut municipalities = collections.municipalities.load().await?;
        let index = position_of(&municipalities, id)
            .ok_or_else(|| CatalogError::not_found(ENTITY, id))?;
        warn_on_slug_collision(
            ENTITY,
            &slug,
            municipalities
                .iter()
                .filter(|m| m.id != id)
                .map(|m| m.slug.as_str()),
        );

        let old_nome = municipalities[index].nome.clone();
        let updated = Municipality {
            id,
            nome: draft.nome,
            slug,
            provincia: draft.provincia,
        };
        municipalities[index] = updated.clone();

        let mut pois = collections.points_of_interest.load().await?;
        let touched = cascade::relocate_municipality(&mut pois, &old_nome, &updated);
        let (tours, tours_touched) = self.refreshed_tours(&pois, touched).await?;

        let mut saga = Saga::new("update municipality");
        saga.step(
            CascadeStep::SaveMunicipalities,
            collections.municipalities.save(&municipalities),
        )
        .await?;
        if touched > 0 {
            saga.step(
                CascadeStep::SavePointsOfInterest,
                collections.points_of_interest.save(&pois),
            )
            .await?;
        }
        if tours_touched > 0 {
            saga.step(CascadeStep::SaveTours, collections.tours.save(&tours))
                .await?;
        }

        info!(
            municipality_id = id,
            old_nome = %old_nome,
            slug = %updated.slug,
            points_of_interest = touched,
            tours = tours_touched,
            "municipality updated"
        );
        Ok(updated)
    }

    /// Deletes the municipality; its points of interest become unassigned, in
    /// their own collection and in tours.
    pub async fn delete_municipality(&self, id: RecordId) -> Result<()> {
        let _gate = self.write_gate().await;
        let collections = self.collections();

        let mut municipalities = collections.municipalities.load().await?;
        let index = position_of(&municipalities, id)
            .ok_or_else(|| CatalogError::not_found(ENTITY, id))?;
        let removed = municipalities.remove(index);

        let mut pois = collections.points_of_interest.load().await?;
        let touched = cascade::unassign_municipality(&mut pois, &removed.nome);
        let (tours, tours_touched) = self.refreshed_tours(&pois, touched).await?;

        let mut saga = Saga::new("delete municipality");
        if touched > 0 {
            saga.step(
                CascadeStep::SavePointsOfInterest,
                collections.points_of_interest.save(&pois),
            )
            .await?;
        }
        if tours_touched > 0 {
            saga.step(CascadeStep::SaveTours, collections.tours.save(&tours))
                .await?;
        }
        saga.step(
            CascadeStep::SaveMunicipalities,
            collections.municipalities.save(&municipalities),
        )
        .await?;

        info!(
            municipality_id = id,
            nome = %removed.nome,
            points_of_interest = touched,
            tours = tours_touched,
            "municipality deleted"
        );
        Ok(())
    }

    /// Tours with their point-of-interest entries rewritten from `pois`.
    /// Tours are not loaded when no point of interest moved.
    async fn refreshed_tours(
        &self,
        pois: &[PointOfInterest],
        pois_touched: usize,
    ) -> Result<(Vec<Tour>, usize)> {
        if pois_touched == 0 {
            return Ok((Vec::new(), 0));
        }
        let mut tours = self.collections().tours.load().await?;
        let touched = cascade::refresh_poi_refs(&mut tours, pois);
        Ok((tours, touched))
    }
}
