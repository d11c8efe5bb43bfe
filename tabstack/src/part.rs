//! Presentable parts: the externally owned units of UI a stack arranges.

use std::fmt;
use std::rc::{Rc, Weak};

use bitflags::bitflags;

use crate::geometry::Rect;

/// Stable identity of a presentable part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(pub u64);

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "part#{}", self.0)
    }
}

/// Opaque handle of a toolkit widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(pub u64);

bitflags! {
    /// Sizing hints a part reports along one axis.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SizeFlags: u8 {
        /// The part has a meaningful minimum size.
        const MIN = 1 << 0;
        /// The part has a meaningful maximum size.
        const MAX = 1 << 1;
        /// The part wants to fill the available space.
        const FILL = 1 << 2;
        /// The part's size along one axis depends on the other.
        const WRAP = 1 << 3;
    }
}

/// Part properties whose changes a stack reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartProperty {
    Title,
    Dirty,
    Input,
    PartName,
    ContentDescription,
    Busy,
    HighlightIfBack,
    Toolbar,
    PaneMenu,
    PreferredSize,
}

/// Capability interface of anything that can be stacked.
///
/// Parts are owned by the workbench. Implementations use interior
/// mutability: the stack only ever holds shared, non-owning references.
pub trait PresentablePart {
    fn id(&self) -> PartId;

    fn name(&self) -> String;

    fn title(&self) -> String;

    /// Content description shown next to the title.
    fn title_status(&self) -> String {
        String::new()
    }

    fn title_tool_tip(&self) -> String {
        String::new()
    }

    /// Icon key understood by the rendering layer.
    fn title_image(&self) -> Option<String> {
        None
    }

    fn is_dirty(&self) -> bool {
        false
    }

    fn is_busy(&self) -> bool {
        false
    }

    fn is_closeable(&self) -> bool {
        true
    }

    fn size_flags(&self, _width: bool) -> SizeFlags {
        SizeFlags::empty()
    }

    /// Preferred extent along one axis, or [`crate::INFINITE`].
    fn compute_preferred_size(
        &self,
        _width: bool,
        _available_parallel: i32,
        _available_perpendicular: i32,
        preferred_result: i32,
    ) -> i32 {
        preferred_result
    }

    fn set_visible(&self, visible: bool);

    fn set_focus(&self) {}

    /// Position the part's widget, in the coordinates of the folder's
    /// parent.
    fn set_bounds(&self, bounds: Rect);

    fn control(&self) -> ControlId;

    /// Start forwarding property changes to the owning stack.
    fn subscribe_properties(&self) {}

    /// Stop forwarding property changes to the owning stack.
    fn unsubscribe_properties(&self) {}
}

/// Non-owning reference to a presentable part.
///
/// Equality and hashing use the part id only, so a stale reference still
/// compares equal to the entry it was created for.
#[derive(Clone)]
pub struct PartRef {
    id: PartId,
    part: Weak<dyn PresentablePart>,
}

impl PartRef {
    pub fn new<P: PresentablePart + 'static>(part: &Rc<P>) -> Self {
        let part: Rc<dyn PresentablePart> = part.clone();
        Self::from_dyn(&part)
    }

    pub fn from_dyn(part: &Rc<dyn PresentablePart>) -> Self {
        Self {
            id: part.id(),
            part: Rc::downgrade(part),
        }
    }

    pub fn id(&self) -> PartId {
        self.id
    }

    /// Borrow the live part, or `None` once its owner dropped it.
    pub fn upgrade(&self) -> Option<Rc<dyn PresentablePart>> {
        self.part.upgrade()
    }

    pub fn is_alive(&self) -> bool {
        self.part.strong_count() > 0
    }
}

impl PartialEq for PartRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PartRef {}

impl std::hash::Hash for PartRef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for PartRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartRef")
            .field("id", &self.id)
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// Display snapshot of a part, rebuilt every time a tab is refreshed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartInfo {
    pub name: String,
    pub title: String,
    pub content_description: String,
    pub tool_tip: String,
    pub image: Option<String>,
    pub dirty: bool,
}

impl PartInfo {
    pub fn from_part(part: &dyn PresentablePart) -> Self {
        Self {
            name: part.name(),
            title: part.title(),
            content_description: part.title_status(),
            tool_tip: part.title_tool_tip(),
            image: part.title_image(),
            dirty: part.is_dirty(),
        }
    }

    /// Label shown on a tab: the part name, marked when dirty.
    pub fn label(&self) -> String {
        if self.dirty {
            format!("*{}", self.name)
        } else {
            self.name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    struct Doc {
        id: u64,
        dirty: bool,
    }

    impl PresentablePart for Doc {
        fn id(&self) -> PartId {
            PartId(self.id)
        }

        fn name(&self) -> String {
            "notes.txt".to_owned()
        }

        fn title(&self) -> String {
            "notes.txt - editor".to_owned()
        }

        fn is_dirty(&self) -> bool {
            self.dirty
        }

        fn set_visible(&self, _visible: bool) {}

        fn set_bounds(&self, _bounds: Rect) {}

        fn control(&self) -> ControlId {
            ControlId(self.id)
        }
    }

    #[test]
    fn dropped_part_leaves_a_dead_handle_with_the_same_identity() {
        let doc = Rc::new(Doc { id: 4, dirty: false });
        let handle = PartRef::new(&doc);
        let copy = handle.clone();
        assert!(handle.is_alive());

        drop(doc);
        assert!(!handle.is_alive());
        assert!(handle.upgrade().is_none());
        assert_eq!(handle, copy);
        assert_eq!(handle.id(), PartId(4));

        let set: HashSet<PartRef> = [handle, copy].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn dirty_parts_get_a_marked_label() {
        let doc = Doc { id: 1, dirty: true };
        let info = PartInfo::from_part(&doc);
        assert_eq!(info.title, "notes.txt - editor");
        assert_eq!(info.label(), "*notes.txt");

        let clean = PartInfo::from_part(&Doc { id: 2, dirty: false });
        assert_eq!(clean.label(), "notes.txt");
    }
}
