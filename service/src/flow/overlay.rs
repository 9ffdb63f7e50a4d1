//! Processing [`Overlay`] definitions.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Processing indicator shown while a slow backend call is in flight.
#[derive(Clone, Debug, Default)]
pub struct Overlay(Arc<AtomicBool>);

impl Overlay {
    /// Indicates whether this [`Overlay`] is currently shown.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Shows this [`Overlay`] until the returned [`Processing`] guard is
    /// dropped.
    #[must_use]
    pub(crate) fn show(&self) -> Processing {
        self.0.store(true, Ordering::Release);
        Processing(self.clone())
    }
}

/// Guard hiding its [`Overlay`] once dropped.
#[derive(Debug)]
pub(crate) struct Processing(Overlay);

impl Drop for Processing {
    fn drop(&mut self) {
        self.0 .0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod spec {
    use super::Overlay;

    #[test]
    fn hides_once_guard_is_dropped() {
        let overlay = Overlay::default();
        assert!(!overlay.is_shown());

        let processing = overlay.show();
        assert!(overlay.clone().is_shown());

        drop(processing);
        assert!(!overlay.is_shown());
    }
}
