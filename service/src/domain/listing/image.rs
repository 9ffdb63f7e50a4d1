//! Staged images of a [`Listing`].
//!
//! [`Listing`]: super::Listing

use std::slice;

use derive_more::Debug;
use tracing as log;

use crate::infra::preview::{self, Preview};

/// Minimal number of images a [`Listing`] must be submitted with.
///
/// [`Listing`]: super::Listing
pub const MIN: usize = 3;

/// Maximal number of images a [`Listing`] may be staged with.
///
/// [`Listing`]: super::Listing
pub const MAX: usize = 12;

/// Image file picked by a user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct File {
    /// Name of this [`File`].
    pub name: String,

    /// MIME type of this [`File`] contents.
    pub content_type: String,

    /// Contents of this [`File`].
    #[debug(skip)]
    pub bytes: Vec<u8>,
}

impl File {
    /// Creates a new [`File`] out of the provided parts.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// [`File`] staged for upload together with its [`Preview`].
#[derive(Debug)]
pub struct Staged {
    /// Staged [`File`].
    file: File,

    /// [`Preview`] of the staged [`File`].
    preview: Preview,
}

impl Staged {
    /// Returns the staged [`File`].
    #[must_use]
    pub fn file(&self) -> &File {
        &self.file
    }

    /// Returns the [`Preview`] of the staged [`File`].
    #[must_use]
    pub fn preview(&self) -> &Preview {
        &self.preview
    }
}

/// Ordered sequence of [`Staged`] images, never longer than [`MAX`].
#[derive(Debug, Default)]
pub struct Images(Vec<Staged>);

impl Images {
    /// Appends the provided `files`, acquiring a [`Preview`] for each of
    /// them.
    ///
    /// Files beyond [`MAX`] are dropped silently, without acquiring any
    /// [`Preview`]. Returns the number of actually staged files.
    pub fn add(
        &mut self,
        files: impl IntoIterator<Item = File>,
        previews: &preview::Registry,
    ) -> usize {
        let before = self.0.len();
        self.0.extend(
            files
                .into_iter()
                .take(MAX.saturating_sub(before))
                .map(|file| Staged {
                    preview: previews.acquire(&file.name),
                    file,
                }),
        );

        let added = self.0.len() - before;
        log::debug!("staged {added} image(s), {} in total", self.0.len());
        added
    }

    /// Removes the image at the provided `index`, releasing its [`Preview`].
    ///
    /// [`None`] is returned if there is no image at the provided `index`.
    pub fn remove(&mut self, index: usize) -> Option<File> {
        (index < self.0.len()).then(|| {
            let Staged { file, preview } = self.0.remove(index);
            drop(preview);
            file
        })
    }

    /// Indicates whether there are enough images to submit a [`Listing`].
    ///
    /// [`Listing`]: super::Listing
    #[must_use]
    pub fn is_enough(&self) -> bool {
        self.0.len() >= MIN
    }

    /// Returns the number of staged images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether no image is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the staged images in their order.
    pub fn iter(&self) -> slice::Iter<'_, Staged> {
        self.0.iter()
    }

    /// Iterates over the staged [`File`]s in their order.
    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.0.iter().map(Staged::file)
    }
}

impl<'a> IntoIterator for &'a Images {
    type Item = &'a Staged;
    type IntoIter = slice::Iter<'a, Staged>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod spec {
    use crate::infra::preview;

    use super::{File, Images, MAX};

    fn files(n: usize) -> Vec<File> {
        (0..n)
            .map(|i| File::new(format!("{i}.jpg"), "image/jpeg", vec![0; 4]))
            .collect()
    }

    #[test]
    fn caps_to_maximum_keeping_order() {
        let previews = preview::Registry::default();
        let mut images = Images::default();

        assert_eq!(images.add(files(15), &previews), MAX);

        assert_eq!(images.len(), 12);
        let names = images.files().map(|f| f.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names.first(), Some(&"0.jpg"));
        assert_eq!(names.last(), Some(&"11.jpg"));
        assert_eq!(previews.live(), 12);
    }

    #[test]
    fn drops_overflow_of_later_batches() {
        let previews = preview::Registry::default();
        let mut images = Images::default();

        assert_eq!(images.add(files(10), &previews), 10);
        assert_eq!(images.add(files(5), &previews), 2);

        assert_eq!(images.len(), MAX);
        assert_eq!(previews.live(), MAX);
    }

    #[test]
    fn releases_previews_on_remove_and_drop() {
        let previews = preview::Registry::default();
        let mut images = Images::default();
        _ = images.add(files(4), &previews);

        let removed = images.remove(1).unwrap();
        assert_eq!(removed.name, "1.jpg");
        assert_eq!(previews.live(), 3);
        assert!(images.remove(3).is_none());
        assert!(images.is_enough());

        drop(images);
        assert_eq!(previews.live(), 0);
    }
}
