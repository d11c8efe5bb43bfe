//! Toolkit-neutral tab folder contract.
//!
//! A [`TabFolder`] is the widget-level strip of tabs for one stack. Concrete
//! folders embed a [`TabFolderBase`] for the state every folder shares
//! (focus appearance, zoom state, tab position and the event outbox) and
//! inherit hit-testing and input dispatch from the provided methods.
//!
//! Events are queued in the base and drained with
//! [`TabFolder::take_events`]. Draining needs `&mut` access, so the single
//! owner of the folder is the single listener.

mod event;
mod strip;

use std::collections::VecDeque;

use bitflags::bitflags;

use crate::geometry::{Point, Rect, Side, Size};
use crate::part::{ControlId, PartId, PartInfo, PartRef};
use crate::site::{ActiveState, StackState};

pub use event::{TabFolderEvent, TabFolderEventKind};
pub use strip::{FolderButton, FolderMetrics, StripTab, StripTabFolder};

/// Folder-allocated handle of one tab item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub u64);

bitflags! {
    /// Creation flags of a tab item.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TabFlags: u8 {
        /// Show a close affordance on the tab.
        const CLOSE = 1 << 0;
    }
}

/// Widget-level state of one tab.
pub trait TabItem {
    fn id(&self) -> TabId;

    /// Bounds in display coordinates. Empty when not laid out.
    fn bounds(&self) -> Rect;

    fn set_info(&mut self, info: PartInfo);

    fn info(&self) -> &PartInfo;

    /// `false` while the tab is scrolled out of view.
    fn is_showing(&self) -> bool {
        true
    }

    fn set_busy(&mut self, busy: bool);

    fn is_busy(&self) -> bool;

    /// Attention decoration for a tab in the background.
    fn set_bold(&mut self, bold: bool);

    fn is_bold(&self) -> bool;

    fn data(&self) -> Option<&PartRef>;

    fn set_data(&mut self, data: Option<PartRef>);
}

/// State shared by every concrete folder.
#[derive(Debug)]
pub struct TabFolderBase {
    active: ActiveState,
    state: StackState,
    tab_position: Side,
    toolbar_visible: bool,
    next_tab_id: u64,
    events: VecDeque<TabFolderEvent>,
}

impl TabFolderBase {
    pub fn new(tab_position: Side) -> Self {
        Self {
            active: ActiveState::Inactive,
            state: StackState::Restored,
            tab_position,
            toolbar_visible: true,
            next_tab_id: 0,
            events: VecDeque::new(),
        }
    }

    /// Allocate the next unique tab identifier.
    pub fn allocate_tab_id(&mut self) -> TabId {
        let id = TabId(self.next_tab_id);
        self.next_tab_id += 1;
        id
    }

    pub fn push_event(&mut self, event: TabFolderEvent) {
        log::trace!("tab folder event: {event:?}");
        self.events.push_back(event);
    }

    pub fn drain_events(&mut self) -> Vec<TabFolderEvent> {
        self.events.drain(..).collect()
    }

    /// Put events back in front of anything queued since they were
    /// drained, keeping their order.
    pub fn requeue_events(&mut self, events: Vec<TabFolderEvent>) {
        for event in events.into_iter().rev() {
            self.events.push_front(event);
        }
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }
}

impl Default for TabFolderBase {
    fn default() -> Self {
        Self::new(Side::Top)
    }
}

/// Contract every concrete tab strip satisfies.
pub trait TabFolder {
    fn base(&self) -> &TabFolderBase;

    fn base_mut(&mut self) -> &mut TabFolderBase;

    /// Insert an empty tab at `index`, clamped to `[0, item_count]`.
    fn add(&mut self, index: usize, flags: TabFlags) -> TabId;

    /// Relocate the tab at `from` so that it ends up at `to`. Both indices
    /// are clamped.
    fn move_item(&mut self, from: usize, to: usize);

    /// Destroy a tab item. Unknown ids are ignored.
    fn dispose_item(&mut self, tab: TabId);

    /// Items in display order.
    fn items(&self) -> Vec<&dyn TabItem>;

    fn item_mut(&mut self, tab: TabId) -> Option<&mut dyn TabItem>;

    fn set_selection(&mut self, tab: Option<TabId>);

    fn selection(&self) -> Option<TabId>;

    fn set_bounds(&mut self, bounds: Rect);

    /// Bounds of the whole folder in display coordinates.
    fn bounds(&self) -> Rect;

    /// Area the selected part's content occupies, in display coordinates.
    fn content_area(&self) -> Rect;

    /// Area covered by the tab strip, in display coordinates.
    fn tab_area(&self) -> Rect;

    /// Size the folder needs for its chrome. `None` hints mean "default".
    fn compute_size(
        &self,
        width_hint: Option<i32>,
        height_hint: Option<i32>,
    ) -> Size;

    fn layout(&mut self, flush: bool);

    fn set_visible(&mut self, visible: bool);

    fn control(&self) -> ControlId;

    /// Mirror the selected part's info into folder-level chrome.
    fn set_selected_info(&mut self, _info: &PartInfo) {}

    /// Scroll the selected tab into view.
    fn show_selection(&mut self) {}

    /// Where the part list popup opens.
    fn part_list_location(&self) -> Point {
        let area = self.tab_area();
        Point::new(area.right(), area.bottom())
    }

    fn item_count(&self) -> usize {
        self.items().len()
    }

    fn item(&self, index: usize) -> Option<&dyn TabItem> {
        self.items().get(index).copied()
    }

    fn item_by_id(&self, tab: TabId) -> Option<&dyn TabItem> {
        self.items().into_iter().find(|item| item.id() == tab)
    }

    fn index_of(&self, tab: TabId) -> Option<usize> {
        self.items().iter().position(|item| item.id() == tab)
    }

    /// Tab whose data refers to `part`.
    fn find_item(&self, part: PartId) -> Option<TabId> {
        self.items()
            .into_iter()
            .find(|item| item.data().is_some_and(|data| data.id() == part))
            .map(|item| item.id())
    }

    /// Tab whose bounds contain `point`.
    fn item_at(&self, point: Point) -> Option<TabId> {
        self.items()
            .into_iter()
            .find(|item| item.bounds().contains(point))
            .map(|item| item.id())
    }

    /// Whether `point` lies on a border region that ignores drags, double
    /// clicks and context menus.
    fn is_on_border(&self, _point: Point) -> bool {
        false
    }

    fn set_active(&mut self, active: ActiveState) {
        self.base_mut().active = active;
    }

    fn active(&self) -> ActiveState {
        self.base().active
    }

    fn set_state(&mut self, state: StackState) {
        self.base_mut().state = state;
    }

    fn state(&self) -> StackState {
        self.base().state
    }

    fn set_tab_position(&mut self, position: Side) {
        self.base_mut().tab_position = position;
    }

    fn tab_position(&self) -> Side {
        self.base().tab_position
    }

    fn set_toolbar_visible(&mut self, visible: bool) {
        self.base_mut().toolbar_visible = visible;
    }

    fn toolbar_visible(&self) -> bool {
        self.base().toolbar_visible
    }

    fn fire_event(
        &mut self,
        kind: TabFolderEventKind,
        tab: Option<TabId>,
        position: Point,
    ) {
        self.base_mut()
            .push_event(TabFolderEvent::new(kind, tab, position));
    }

    fn handle_context_menu(&mut self, position: Point) {
        if self.is_on_border(position) {
            return;
        }
        let tab = self.item_at(position);
        self.fire_event(TabFolderEventKind::SystemMenu, tab, position);
    }

    fn handle_mouse_press(&mut self, position: Point) {
        self.fire_event(TabFolderEventKind::GiveFocusToPart, None, position);
    }

    fn handle_double_click(&mut self, position: Point) {
        if self.is_on_border(position) {
            return;
        }
        let kind = if self.state() == StackState::Maximized {
            TabFolderEventKind::Restore
        } else {
            TabFolderEventKind::Maximize
        };
        self.fire_event(kind, None, position);
    }

    fn handle_drag_started(&mut self, position: Point) {
        if self.is_on_border(position) {
            return;
        }
        let tab = self.item_at(position);
        self.fire_event(TabFolderEventKind::DragStart, tab, position);
    }

    /// Drain queued events. Only the folder's owner can call this.
    fn take_events(&mut self) -> Vec<TabFolderEvent> {
        self.base_mut().drain_events()
    }
}
