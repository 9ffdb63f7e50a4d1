//! [`Preview`] handles of staged image files.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, PoisonError},
};

use derive_more::{Debug, Display};
use tracing as log;
use uuid::Uuid;

/// Registry of live [`Preview`] handles.
///
/// A [`Preview`] holds its URL only while it's alive: dropping it releases
/// the URL back to the [`Registry`] it was acquired from.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    /// IDs of the currently acquired [`Preview`]s.
    live: Arc<Mutex<HashSet<Uuid>>>,
}

impl Registry {
    /// Acquires a new [`Preview`] handle for the file with the provided
    /// `name`.
    #[must_use]
    pub fn acquire(&self, name: &str) -> Preview {
        let id = Uuid::new_v4();
        _ = self
            .live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id);
        log::debug!("acquired preview `{id}` for `{name}`");

        Preview {
            id,
            url: format!("blob:listing/{id}"),
            registry: self.clone(),
        }
    }

    /// Returns the number of [`Preview`]s acquired and not released yet.
    #[must_use]
    pub fn live(&self) -> usize {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Releases the [`Preview`] with the provided `id`.
    fn release(&self, id: Uuid) {
        if self
            .live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
        {
            log::debug!("released preview `{id}`");
        }
    }
}

/// Scoped handle to a preview URL of a staged image file.
#[derive(Debug, Display)]
#[display("{url}")]
pub struct Preview {
    /// ID of this [`Preview`] in its [`Registry`].
    id: Uuid,

    /// URL this [`Preview`] is rendered from.
    url: String,

    /// [`Registry`] this [`Preview`] is released to.
    #[debug(skip)]
    registry: Registry,
}

impl Preview {
    /// Returns the URL of this [`Preview`].
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for Preview {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}

#[cfg(test)]
mod spec {
    use super::Registry;

    #[test]
    fn releases_on_drop() {
        let registry = Registry::default();

        let first = registry.acquire("a.jpg");
        let second = registry.acquire("b.jpg");
        assert_eq!(registry.live(), 2);
        assert_ne!(first.url(), second.url());
        assert!(first.url().starts_with("blob:"));

        drop(first);
        assert_eq!(registry.live(), 1);

        drop(second);
        assert_eq!(registry.live(), 0);
    }
}
