use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::warn;

use crate::core::slug::slug_matches;
use crate::resolver::ReferenceResolver;
use crate::storage::Collections;

/// Entry point for every catalogue operation.
///
/// Cheap to clone; clones share the same stores and the same write gate.
#[derive(Clone)]
pub struct Backoffice {
    collections: Collections,
    write_gate: Arc<Mutex<()>>,
}

impl Backoffice {
    pub fn new(collections: Collections) -> Self {
        Self {
            collections,
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Backoffice over empty in-memory collections.
    pub fn in_memory() -> Self {
        Self::new(Collections::in_memory())
    }

    pub fn collections(&self) -> &Collections {
        &self.collections
    }

    pub(crate) fn resolver(&self) -> ReferenceResolver<'_> {
        ReferenceResolver::new(&self.collections)
    }

    /// Serializes mutations of this process: a load-modify-save sequence never
    /// interleaves with another one. Reads do not wait on it.
    pub(crate) async fn write_gate(&self) -> MutexGuard<'_, ()> {
        self.write_gate.lock().await
    }
}

/// Slugs are not unique; lookups return the first match. Make collisions visible.
pub(crate) fn warn_on_slug_collision<'a>(
    entity: &'static str,
    slug: &str,
    others: impl IntoIterator<Item = &'a str>,
) {
    let clashes = others
        .into_iter()
        .filter(|other| slug_matches(other, slug))
        .count();
    if clashes > 0 {
        warn!(entity, slug, clashes, "slug already in use; lookups by slug return the first match");
    }
}
