use crate::content::TimelineEntry;
use crate::i18n::{entry_key, Link, Localizer};

/// Single shared project modal.
#[derive(Clone, Debug, PartialEq)]
pub enum ModalState<T> {
    Closed,
    Open(T),
}

impl<T> Default for ModalState<T> {
    fn default() -> Self {
        Self::Closed
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ModalAction<T> {
    ViewDetails(T),
    Close,
}

impl<T> ModalState<T> {
    /// Opening while already open swaps the selection in place; there is no
    /// intermediate closed state.
    pub fn apply(self, action: ModalAction<T>) -> Self {
        match action {
            ModalAction::ViewDetails(selected) => Self::Open(selected),
            ModalAction::Close => Self::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn selected(&self) -> Option<&T> {
        match self {
            Self::Open(selected) => Some(selected),
            Self::Closed => None,
        }
    }
}

/// Suspends and restores page scrolling behind the modal.
pub trait ScrollLock {
    fn lock(&self);
    fn unlock(&self);
}

/// Holds the page scroll lock; dropping it releases the lock, so every exit
/// path (close control, backdrop, escape, unmount) restores scrolling.
pub struct ScrollLockGuard<L: ScrollLock> {
    lock: L,
}

impl<L: ScrollLock> ScrollLockGuard<L> {
    pub fn acquire(lock: L) -> Self {
        lock.lock();
        Self { lock }
    }
}

impl<L: ScrollLock> Drop for ScrollLockGuard<L> {
    fn drop(&mut self) {
        self.lock.unlock();
    }
}

/// Localized content of the open modal. Lists that are missing from the
/// catalog come back empty.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectDetails {
    pub title: String,
    pub details: String,
    pub features: Vec<String>,
    pub links: Vec<Link>,
    pub image: Option<&'static str>,
}

impl ProjectDetails {
    pub fn resolve(entry: &TimelineEntry, localizer: &Localizer) -> Self {
        let year = entry.year.to_string();
        Self {
            title: localizer.text_with(&entry_key(entry.key, "title"), &[("year", year.as_str())]),
            details: localizer.text(&entry_key(entry.key, "details")),
            features: localizer.list(&entry_key(entry.key, "items")),
            links: localizer.links(&entry_key(entry.key, "links")),
            image: entry.image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct CountingLock {
        locked: Rc<Cell<bool>>,
        releases: Rc<Cell<u32>>,
    }

    impl ScrollLock for CountingLock {
        fn lock(&self) {
            self.locked.set(true);
        }

        fn unlock(&self) {
            self.locked.set(false);
            self.releases.set(self.releases.get() + 1);
        }
    }

    #[test]
    fn view_details_opens_and_close_closes() {
        let state = ModalState::Closed.apply(ModalAction::ViewDetails("a"));
        assert_eq!(state.selected(), Some(&"a"));

        let state = state.apply(ModalAction::Close);
        assert!(!state.is_open());
    }

    #[test]
    fn view_details_while_open_replaces_selection() {
        let state = ModalState::Open("a").apply(ModalAction::ViewDetails("b"));

        assert_eq!(state, ModalState::Open("b"));
    }

    #[test]
    fn close_when_closed_is_a_no_op() {
        assert_eq!(ModalState::<&str>::Closed.apply(ModalAction::Close), ModalState::Closed);
    }

    #[test]
    fn guard_locks_until_dropped() {
        let lock = CountingLock::default();

        let guard = ScrollLockGuard::acquire(lock.clone());
        assert!(lock.locked.get());

        drop(guard);
        assert!(!lock.locked.get());
        assert_eq!(lock.releases.get(), 1);
    }

    #[test]
    fn unmounting_an_open_modal_restores_scrolling() {
        struct MountedModal {
            state: ModalState<&'static str>,
            _scroll_lock: Option<ScrollLockGuard<CountingLock>>,
        }

        let lock = CountingLock::default();
        let state = ModalState::Closed.apply(ModalAction::ViewDetails("a"));
        let mounted = MountedModal {
            _scroll_lock: state.is_open().then(|| ScrollLockGuard::acquire(lock.clone())),
            state,
        };
        assert!(mounted.state.is_open());
        assert!(lock.locked.get());

        drop(mounted);
        assert!(!lock.locked.get());
        assert_eq!(lock.releases.get(), 1);
    }

    #[test]
    fn details_resolve_through_catalog() {
        let entry = crate::content::CONTENT_TABLE[0];

        let details = ProjectDetails::resolve(&entry, &Localizer::new(Language::En));

        assert_eq!(details.title, "Health Manage Calendar");
        assert_eq!(details.features.len(), 3);
        assert_eq!(details.links.len(), 1);
        assert_eq!(details.image, entry.image);
    }

    #[test]
    fn unknown_entry_resolves_to_key_text_and_empty_lists() {
        let entry = TimelineEntry::new(2020, "unlisted", "/images/none.webp");

        let details = ProjectDetails::resolve(&entry, &Localizer::new(Language::Th));

        assert_eq!(details.title, "timeline.unlisted.title");
        assert!(details.features.is_empty());
        assert!(details.links.is_empty());
    }
}
