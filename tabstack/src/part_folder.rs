//! Keeps an ordered list of parts in step with the tabs of a folder.

use crate::folder::{
    TabFlags, TabFolder, TabFolderEvent, TabFolderEventKind, TabId,
};
use crate::geometry::Rect;
use crate::part::{PartId, PartInfo, PartProperty, PartRef, PresentablePart};
use crate::site::{ActiveState, StackState};
use crate::tab_order::PresentablePartList;

/// Bridges a [`TabFolder`] and the parts shown in it.
///
/// Owns the folder. The part list and the folder's items always hold the
/// same parts in the same order once a method returns, and at most one
/// part (the current one) is visible.
#[derive(Debug)]
pub struct PresentablePartFolder<F: TabFolder> {
    folder: F,
    parts: Vec<PartRef>,
    current: Option<PartRef>,
    visible: bool,
}

impl<F: TabFolder> PresentablePartFolder<F> {
    pub fn new(folder: F) -> Self {
        Self {
            folder,
            parts: Vec::new(),
            current: None,
            visible: true,
        }
    }

    pub fn folder(&self) -> &F {
        &self.folder
    }

    pub fn folder_mut(&mut self) -> &mut F {
        &mut self.folder
    }

    pub fn current(&self) -> Option<&PartRef> {
        self.current.as_ref()
    }

    pub fn index_of(&self, part: &PartRef) -> Option<usize> {
        self.parts.iter().position(|candidate| candidate == part)
    }

    pub fn contains(&self, part: &PartRef) -> bool {
        self.index_of(part).is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn part_for_tab(&self, tab: TabId) -> Option<PartRef> {
        self.folder.item_by_id(tab)?.data().cloned()
    }

    pub fn tab_for_part(&self, part: &PartRef) -> Option<TabId> {
        self.folder.find_item(part.id())
    }

    pub fn take_events(&mut self) -> Vec<TabFolderEvent> {
        self.folder.take_events()
    }

    /// Return drained but unhandled events to the front of the queue.
    pub fn requeue_events(&mut self, events: Vec<TabFolderEvent>) {
        if !events.is_empty() {
            self.folder.base_mut().requeue_events(events);
        }
    }

    pub fn set_state(&mut self, state: StackState) {
        self.folder.set_state(state);
    }

    pub fn set_active(&mut self, active: ActiveState) {
        self.folder.set_active(active);
    }

    /// Position the folder, shrinking a minimized stack to its chrome.
    pub fn set_bounds(&mut self, bounds: Rect) {
        let mut bounds = bounds;
        if self.folder.state() == StackState::Minimized {
            let minimum = self.folder.compute_size(Some(bounds.width), None);
            if minimum.height < bounds.height {
                bounds.height = minimum.height;
            }
        }
        self.folder.set_bounds(bounds);
        self.layout(false);
    }

    /// Lay out the folder and map the current part onto its content area.
    ///
    /// Folder bounds are expressed in the coordinates of the folder's
    /// parent, which is also the parent of every part's widget.
    pub fn layout(&mut self, changed: bool) {
        self.folder.layout(changed);
        if let Some(part) = self.current.as_ref().and_then(PartRef::upgrade) {
            part.set_bounds(self.folder.content_area());
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        self.folder.set_visible(visible);
        if let Some(part) = self.current.as_ref().and_then(PartRef::upgrade) {
            part.set_visible(visible);
        }
        if visible {
            self.layout(false);
        }
    }

    /// React to a property change of a part in this folder.
    pub fn child_property_changed(
        &mut self,
        part: &PartRef,
        property: PartProperty,
    ) {
        let Some(tab) = self.tab_for_part(part) else {
            return;
        };
        let Some(live) = part.upgrade() else {
            log::warn!("property change from dropped part {}", part.id());
            return;
        };
        let is_current = self.current.as_ref() == Some(part);

        match property {
            PartProperty::HighlightIfBack => {
                if !is_current {
                    if let Some(item) = self.folder.item_mut(tab) {
                        item.set_bold(true);
                    }
                }
            },
            PartProperty::Busy => {
                if let Some(item) = self.folder.item_mut(tab) {
                    item.set_busy(live.is_busy());
                }
            },
            PartProperty::Title
            | PartProperty::ContentDescription
            | PartProperty::PaneMenu
            | PartProperty::Toolbar => {
                self.init_tab(tab, live.as_ref());
                if is_current {
                    self.folder.set_selected_info(&PartInfo::from_part(
                        live.as_ref(),
                    ));
                    self.layout(true);
                }
            },
            PartProperty::PreferredSize => {
                let position = self
                    .folder
                    .item_by_id(tab)
                    .map(|item| item.bounds().origin())
                    .unwrap_or_default();
                self.folder.fire_event(
                    TabFolderEventKind::PreferredSize,
                    Some(tab),
                    position,
                );
            },
            PartProperty::Dirty
            | PartProperty::Input
            | PartProperty::PartName => {
                self.init_tab(tab, live.as_ref());
            },
        }
    }

    /// Drop the entry of a part whose owner is gone, without calling into it.
    pub fn forget(&mut self, id: PartId) {
        let Some(index) = self.parts.iter().position(|part| part.id() == id)
        else {
            return;
        };
        if self.current.as_ref().is_some_and(|part| part.id() == id) {
            self.current = None;
            self.folder.set_selection(None);
        }
        if let Some(tab) = self.folder.find_item(id) {
            self.folder.dispose_item(tab);
        }
        self.parts.remove(index);
    }

    /// Drop every entry whose part no longer upgrades.
    pub fn forget_invalidated(&mut self) -> Vec<PartId> {
        let dead: Vec<PartId> = self
            .parts
            .iter()
            .filter(|part| !part.is_alive())
            .map(PartRef::id)
            .collect();
        for id in &dead {
            log::warn!("forgetting dropped part {id}");
            self.forget(*id);
        }
        dead
    }

    fn init_tab(&mut self, tab: TabId, part: &dyn PresentablePart) {
        if let Some(item) = self.folder.item_mut(tab) {
            item.set_info(PartInfo::from_part(part));
            item.set_busy(part.is_busy());
        }
    }
}

impl<F: TabFolder> PresentablePartList for PresentablePartFolder<F> {
    fn insert(&mut self, part: &PartRef, index: usize) {
        let index = index.min(self.parts.len());
        if let Some(existing) = self.index_of(part) {
            if existing != index {
                self.move_part(part, index);
            }
            return;
        }
        let Some(live) = part.upgrade() else {
            log::warn!("ignoring insert of dropped part {}", part.id());
            return;
        };

        let flags = if live.is_closeable() {
            TabFlags::CLOSE
        } else {
            TabFlags::empty()
        };
        let tab = self.folder.add(index, flags);
        self.parts.insert(index, part.clone());
        if let Some(item) = self.folder.item_mut(tab) {
            item.set_data(Some(part.clone()));
        }
        self.init_tab(tab, live.as_ref());
        live.subscribe_properties();
        live.set_visible(false);
        self.folder.layout(false);
    }

    fn remove(&mut self, part: &PartRef) {
        let Some(index) = self.index_of(part) else {
            return;
        };
        if self.current.as_ref() == Some(part) {
            self.select(None);
        }
        if let Some(tab) = self.tab_for_part(part) {
            self.folder.dispose_item(tab);
        }
        self.parts.remove(index);
        if let Some(live) = part.upgrade() {
            live.unsubscribe_properties();
        }
    }

    fn move_part(&mut self, part: &PartRef, index: usize) {
        let Some(from) = self.index_of(part) else {
            return;
        };
        let to = index.min(self.parts.len() - 1);
        if from == to {
            return;
        }
        self.folder.move_item(from, to);
        let entry = self.parts.remove(from);
        self.parts.insert(to, entry);
    }

    fn size(&self) -> usize {
        self.parts.len()
    }

    fn select(&mut self, part: Option<&PartRef>) {
        if self.current.as_ref() == part {
            return;
        }
        if part.is_some_and(|part| !self.contains(part)) {
            return;
        }

        let next = part.and_then(PartRef::upgrade);
        if self.visible {
            if let Some(next) = &next {
                next.set_visible(true);
            }
        }
        let previous = self.current.as_ref().and_then(PartRef::upgrade);
        if let Some(previous) = previous {
            previous.set_visible(false);
        }

        self.current = part.cloned();
        let tab = part.and_then(|part| self.tab_for_part(part));
        self.folder.set_selection(tab);
        if let Some(tab) = tab {
            if let Some(item) = self.folder.item_mut(tab) {
                item.set_bold(false);
            }
        }
        if let Some(next) = &next {
            self.folder
                .set_selected_info(&PartInfo::from_part(next.as_ref()));
        }
        self.folder.show_selection();
        self.layout(true);
    }

    fn part_list(&self) -> Vec<PartRef> {
        self.parts.clone()
    }
}
