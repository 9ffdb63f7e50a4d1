//! [`Amenity`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};

/// Amenity offered by a listed property (Wi-Fi, parking, laundry, etc).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Amenity {
    /// ID of this [`Amenity`] in the backend catalog.
    pub id: Id,

    /// Human-readable [`Name`] of this [`Amenity`].
    pub name: Name,
}

/// ID of an [`Amenity`].
#[derive(
    Clone, Copy, Debug, Display, Eq, From, FromStr, Hash, Into, PartialEq,
)]
pub struct Id(u32);

/// Name of an [`Amenity`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq)]
#[as_ref(str, String)]
#[from(&str, String)]
pub struct Name(String);

/// Selector of the whole [`Amenity`] catalog.
#[derive(Clone, Copy, Debug, Default)]
pub struct Catalog;

/// Ordered set of [`Amenity`]s, unique by their [`Id`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Amenities(Vec<Amenity>);

impl Amenities {
    /// Adds an [`Amenity`] if it's absent, or removes it if it's present.
    ///
    /// Returns whether the [`Amenity`] is selected after the toggle.
    pub fn toggle(&mut self, id: Id, name: Name) -> bool {
        if let Some(pos) = self.0.iter().position(|a| a.id == id) {
            drop(self.0.remove(pos));
            false
        } else {
            self.0.push(Amenity { id, name });
            true
        }
    }

    /// Indicates whether an [`Amenity`] with the provided [`Id`] is selected.
    #[must_use]
    pub fn contains(&self, id: Id) -> bool {
        self.0.iter().any(|a| a.id == id)
    }

    /// Returns the selected [`Amenity`]s in selection order.
    #[must_use]
    pub fn as_slice(&self) -> &[Amenity] {
        &self.0
    }

    /// Returns the number of selected [`Amenity`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether no [`Amenity`] is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod spec {
    use super::{Amenities, Id};

    #[test]
    fn toggles_membership() {
        let mut set = Amenities::default();

        assert!(set.toggle(Id::from(1), "Wifi".into()));
        assert!(set.toggle(Id::from(2), "Parking".into()));
        assert!(set.contains(Id::from(1)));
        assert_eq!(set.len(), 2);

        assert!(!set.toggle(Id::from(1), "Wifi".into()));
        assert!(!set.contains(Id::from(1)));
        assert_eq!(set.as_slice()[0].id, Id::from(2));
    }

    #[test]
    fn never_duplicates() {
        let mut set = Amenities::default();

        _ = set.toggle(Id::from(7), "TV".into());
        _ = set.toggle(Id::from(7), "TV".into());
        _ = set.toggle(Id::from(7), "TV".into());

        assert_eq!(set.len(), 1);
    }
}
