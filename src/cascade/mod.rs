//! Staleness repair for denormalized snapshots.
//!
//! Categories, tours and municipalities are copied into the records that
//! reference them. The functions here rewrite those copies in memory after
//! the owner is renamed or deleted; persisting the result is the caller's
//! job, through a [`Saga`]. Every function returns how many dependent records
//! it changed.

mod saga;

pub use saga::{CascadeStep, Saga};

use crate::core::slug::point_of_interest_slug;
use crate::core::{
    Municipality, Named, PoiRef, PointOfInterest, Record, RecordId, Tour, UNASSIGNED_MUNICIPALITY,
};

fn rename_in<T: Named>(entries: &mut [T], id: RecordId, name: &str) -> bool {
    let mut changed = false;
    for entry in entries.iter_mut().filter(|entry| entry.id() == id) {
        if entry.name() != name {
            entry.set_name(name.to_string());
            changed = true;
        }
    }
    changed
}

fn remove_from<T: Record>(entries: &mut Vec<T>, id: RecordId) -> bool {
    let before = entries.len();
    entries.retain(|entry| entry.id() != id);
    entries.len() != before
}

// ============================================================================
// Categories
// ============================================================================

pub fn rename_poi_category(
    pois: &mut [PointOfInterest],
    category_id: RecordId,
    name: &str,
) -> usize {
    pois.iter_mut()
        .map(|poi| rename_in(&mut poi.categorie, category_id, name))
        .filter(|changed| *changed)
        .count()
}

/// Points of interest may be left with no category; that is not re-validated here.
pub fn remove_poi_category(pois: &mut [PointOfInterest], category_id: RecordId) -> usize {
    pois.iter_mut()
        .map(|poi| remove_from(&mut poi.categorie, category_id))
        .filter(|changed| *changed)
        .count()
}

pub fn rename_tour_category(tours: &mut [Tour], category_id: RecordId, name: &str) -> usize {
    tours
        .iter_mut()
        .map(|tour| rename_in(&mut tour.categorie, category_id, name))
        .filter(|changed| *changed)
        .count()
}

pub fn remove_tour_category(tours: &mut [Tour], category_id: RecordId) -> usize {
    tours
        .iter_mut()
        .map(|tour| remove_from(&mut tour.categorie, category_id))
        .filter(|changed| *changed)
        .count()
}

// ============================================================================
// Municipalities
// ============================================================================

/// Moves every point of interest filed under `old_nome` to `municipality`,
/// recomputing its slug.
///
/// Matching is by name: points of interest keep no municipality id, so two
/// municipalities sharing a name are indistinguishable here.
pub fn relocate_municipality(
    pois: &mut [PointOfInterest],
    old_nome: &str,
    municipality: &Municipality,
) -> usize {
    let mut changed = 0;
    for poi in pois.iter_mut().filter(|poi| poi.comune == old_nome) {
        poi.comune = municipality.nome.clone();
        poi.provincia = municipality.provincia.clone();
        poi.slug = point_of_interest_slug(&municipality.slug, &poi.nome);
        changed += 1;
    }
    changed
}

pub fn unassign_municipality(pois: &mut [PointOfInterest], nome: &str) -> usize {
    let mut changed = 0;
    for poi in pois.iter_mut().filter(|poi| poi.comune == nome) {
        poi.comune = UNASSIGNED_MUNICIPALITY.to_string();
        poi.provincia = String::new();
        changed += 1;
    }
    changed
}

// ============================================================================
// Points of interest <-> tours
// ============================================================================

/// Upserts `{id, nome, comune}` of `poi` into every tour it lists and removes
/// it from every other tour.
pub fn sync_poi_into_tours(tours: &mut [Tour], poi: &PointOfInterest) -> usize {
    let snapshot = PoiRef::from(poi);
    let mut changed = 0;
    for tour in tours.iter_mut() {
        let touched = if poi.has_tour(tour.id) {
            match tour.pdi.iter().position(|entry| entry.id == poi.id) {
                Some(index) if tour.pdi[index] == snapshot => false,
                Some(index) => {
                    tour.pdi[index] = snapshot.clone();
                    true
                }
                None => {
                    tour.pdi.push(snapshot.clone());
                    true
                }
            }
        } else {
            remove_from(&mut tour.pdi, poi.id)
        };
        if touched {
            changed += 1;
        }
    }
    changed
}

pub fn remove_poi_from_tours(tours: &mut [Tour], poi_id: RecordId) -> usize {
    tours
        .iter_mut()
        .map(|tour| remove_from(&mut tour.pdi, poi_id))
        .filter(|changed| *changed)
        .count()
}

pub fn remove_tour_from_pois(pois: &mut [PointOfInterest], tour_id: RecordId) -> usize {
    pois.iter_mut()
        .map(|poi| remove_from(&mut poi.tours, tour_id))
        .filter(|changed| *changed)
        .count()
}

pub fn rename_tour_in_pois(
    pois: &mut [PointOfInterest],
    tour_id: RecordId,
    nome: &str,
) -> usize {
    pois.iter_mut()
        .map(|poi| rename_in(&mut poi.tours, tour_id, nome))
        .filter(|changed| *changed)
        .count()
}

/// Rewrites every `{id, nome, comune}` entry of `tours` from the matching
/// record in `pois`. Entries whose point of interest is not in `pois` are left
/// alone.
///
/// Returns the number of tours changed.
pub fn refresh_poi_refs(tours: &mut [Tour], pois: &[PointOfInterest]) -> usize {
    let mut changed = 0;
    for tour in tours.iter_mut() {
        let mut touched = false;
        for entry in tour.pdi.iter_mut() {
            let Some(poi) = pois.iter().find(|poi| poi.id == entry.id) else {
                continue;
            };
            let current = PoiRef::from(poi);
            if *entry != current {
                *entry = current;
                touched = true;
            }
        }
        if touched {
            changed += 1;
        }
    }
    changed
}
