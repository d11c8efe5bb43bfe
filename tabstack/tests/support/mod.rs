#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tabstack::{
    ControlId, DragSession, FolderMetrics, PartId, PartInfo, PartRef, Point,
    PresentablePart, Rect, Side, Size, SizeFlags, StackDropResult,
    StackError, StackPresentationSite, StackState, StripTabFolder, TabFlags,
    TabFolder, TabFolderBase, TabFolderEventKind, TabId, TabItem,
};

/// Part that records every call the stack makes on it.
pub struct FakePart {
    id: PartId,
    name: RefCell<String>,
    closeable: bool,
    busy: Cell<bool>,
    dirty: Cell<bool>,
    visible: Cell<bool>,
    visibility_changes: Cell<usize>,
    bounds: Cell<Option<Rect>>,
    bounds_calls: Cell<usize>,
    subscribed: Cell<bool>,
    focus_calls: Cell<usize>,
    size_flags: Cell<SizeFlags>,
    preferred: Cell<Option<i32>>,
}

impl FakePart {
    pub fn new(id: u64, name: &str) -> Rc<Self> {
        Rc::new(Self::build(id, name, true))
    }

    pub fn pinned(id: u64, name: &str) -> Rc<Self> {
        Rc::new(Self::build(id, name, false))
    }

    fn build(id: u64, name: &str, closeable: bool) -> Self {
        Self {
            id: PartId(id),
            name: RefCell::new(name.to_owned()),
            closeable,
            busy: Cell::new(false),
            dirty: Cell::new(false),
            visible: Cell::new(false),
            visibility_changes: Cell::new(0),
            bounds: Cell::new(None),
            bounds_calls: Cell::new(0),
            subscribed: Cell::new(false),
            focus_calls: Cell::new(0),
            size_flags: Cell::new(SizeFlags::empty()),
            preferred: Cell::new(None),
        }
    }

    pub fn handle(self: &Rc<Self>) -> PartRef {
        PartRef::new(self)
    }

    pub fn rename(&self, name: &str) {
        *self.name.borrow_mut() = name.to_owned();
    }

    pub fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
    }

    pub fn set_dirty(&self, dirty: bool) {
        self.dirty.set(dirty);
    }

    pub fn set_size_flags(&self, flags: SizeFlags) {
        self.size_flags.set(flags);
    }

    /// Preferred extent reported on both axes.
    pub fn set_preferred(&self, preferred: i32) {
        self.preferred.set(Some(preferred));
    }

    pub fn visible(&self) -> bool {
        self.visible.get()
    }

    pub fn visibility_changes(&self) -> usize {
        self.visibility_changes.get()
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds.get()
    }

    pub fn bounds_calls(&self) -> usize {
        self.bounds_calls.get()
    }

    pub fn subscribed(&self) -> bool {
        self.subscribed.get()
    }

    pub fn focus_calls(&self) -> usize {
        self.focus_calls.get()
    }
}

impl PresentablePart for FakePart {
    fn id(&self) -> PartId {
        self.id
    }

    fn name(&self) -> String {
        self.name.borrow().clone()
    }

    fn title(&self) -> String {
        format!("{} title", self.name.borrow())
    }

    fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    fn is_busy(&self) -> bool {
        self.busy.get()
    }

    fn is_closeable(&self) -> bool {
        self.closeable
    }

    fn size_flags(&self, _width: bool) -> SizeFlags {
        self.size_flags.get()
    }

    fn compute_preferred_size(
        &self,
        _width: bool,
        _available_parallel: i32,
        _available_perpendicular: i32,
        preferred_result: i32,
    ) -> i32 {
        self.preferred.get().unwrap_or(preferred_result)
    }

    fn set_visible(&self, visible: bool) {
        if self.visible.get() != visible {
            self.visibility_changes.set(self.visibility_changes.get() + 1);
        }
        self.visible.set(visible);
    }

    fn set_focus(&self) {
        self.focus_calls.set(self.focus_calls.get() + 1);
    }

    fn set_bounds(&self, bounds: Rect) {
        self.bounds.set(Some(bounds));
        self.bounds_calls.set(self.bounds_calls.get() + 1);
    }

    fn control(&self) -> ControlId {
        ControlId(1000 + self.id.0)
    }

    fn subscribe_properties(&self) {
        self.subscribed.set(true);
    }

    fn unsubscribe_properties(&self) {
        self.subscribed.set(false);
    }
}

/// Site that records requests instead of acting on them.
pub struct RecordingSite {
    pub state: StackState,
    pub requested_states: Vec<StackState>,
    pub closed: Vec<Vec<PartId>>,
    pub select_requests: Vec<PartId>,
    pub selection: Option<PartRef>,
    pub parts: Vec<PartRef>,
    pub part_drags: Vec<(PartId, Point, Option<usize>)>,
    pub stack_drags: Vec<Point>,
    /// Location hovered through the drag session during a part drag.
    pub hover_at: Option<Point>,
    pub hover_results: Vec<Option<StackDropResult>>,
    pub reject_drags: bool,
    pub stack_moveable: bool,
    pub flushes: usize,
    pub fail_flush: bool,
}

impl Default for RecordingSite {
    fn default() -> Self {
        Self {
            state: StackState::Restored,
            requested_states: Vec::new(),
            closed: Vec::new(),
            select_requests: Vec::new(),
            selection: None,
            parts: Vec::new(),
            part_drags: Vec::new(),
            stack_drags: Vec::new(),
            hover_at: None,
            hover_results: Vec::new(),
            reject_drags: false,
            stack_moveable: true,
            flushes: 0,
            fail_flush: false,
        }
    }
}

impl StackPresentationSite for RecordingSite {
    fn state(&self) -> StackState {
        self.state
    }

    fn set_state(&mut self, state: StackState) {
        self.requested_states.push(state);
    }

    fn close(&mut self, parts: &[PartRef]) {
        self.closed.push(parts.iter().map(PartRef::id).collect());
    }

    fn select_part(&mut self, part: &PartRef) {
        self.select_requests.push(part.id());
    }

    fn drag_start_part(
        &mut self,
        part: &PartRef,
        initial_location: Point,
        _keyboard: bool,
        session: &DragSession<'_>,
    ) -> tabstack::Result<()> {
        self.part_drags
            .push((part.id(), initial_location, session.drag_start()));
        if let Some(hover) = self.hover_at {
            self.hover_results.push(session.drag_over(hover));
        }
        if self.reject_drags {
            return Err(StackError::DragRejected);
        }
        Ok(())
    }

    fn drag_start_stack(
        &mut self,
        initial_location: Point,
        _keyboard: bool,
    ) -> tabstack::Result<()> {
        self.stack_drags.push(initial_location);
        if self.reject_drags {
            return Err(StackError::DragRejected);
        }
        Ok(())
    }

    fn selected_part(&self) -> Option<PartRef> {
        self.selection.clone()
    }

    fn part_list(&self) -> Vec<PartRef> {
        self.parts.clone()
    }

    fn flush_layout(&mut self) -> tabstack::Result<()> {
        self.flushes += 1;
        if self.fail_flush {
            return Err(StackError::Site("layout flush failed".to_owned()));
        }
        Ok(())
    }

    fn is_stack_moveable(&self) -> bool {
        self.stack_moveable
    }
}

/// Strip folder that counts how often each tab is disposed.
pub struct CountingFolder {
    inner: StripTabFolder,
    disposed: Rc<RefCell<Vec<TabId>>>,
    fire_on_add: Option<TabFolderEventKind>,
}

impl CountingFolder {
    pub fn new(bounds: Rect) -> Self {
        let mut inner = StripTabFolder::new(
            ControlId(1),
            FolderMetrics::default(),
            Side::Top,
        );
        inner.set_bounds(bounds);
        Self {
            inner,
            disposed: Rc::new(RefCell::new(Vec::new())),
            fire_on_add: None,
        }
    }

    /// Raise a tab-less `kind` event from every later `add`.
    pub fn fire_on_add(&mut self, kind: Option<TabFolderEventKind>) {
        self.fire_on_add = kind;
    }

    /// Shared view of disposed tabs, usable after the folder moved.
    pub fn disposals(&self) -> Rc<RefCell<Vec<TabId>>> {
        Rc::clone(&self.disposed)
    }

    pub fn inner(&self) -> &StripTabFolder {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut StripTabFolder {
        &mut self.inner
    }
}

impl TabFolder for CountingFolder {
    fn base(&self) -> &TabFolderBase {
        self.inner.base()
    }

    fn base_mut(&mut self) -> &mut TabFolderBase {
        self.inner.base_mut()
    }

    fn add(&mut self, index: usize, flags: TabFlags) -> TabId {
        let tab = self.inner.add(index, flags);
        if let Some(kind) = self.fire_on_add {
            self.inner.fire_event(kind, None, Point::new(0, 0));
        }
        tab
    }

    fn move_item(&mut self, from: usize, to: usize) {
        self.inner.move_item(from, to);
    }

    fn dispose_item(&mut self, tab: TabId) {
        self.disposed.borrow_mut().push(tab);
        self.inner.dispose_item(tab);
    }

    fn items(&self) -> Vec<&dyn TabItem> {
        self.inner.items()
    }

    fn item_mut(&mut self, tab: TabId) -> Option<&mut dyn TabItem> {
        self.inner.item_mut(tab)
    }

    fn set_selection(&mut self, tab: Option<TabId>) {
        self.inner.set_selection(tab);
    }

    fn selection(&self) -> Option<TabId> {
        self.inner.selection()
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.inner.set_bounds(bounds);
    }

    fn bounds(&self) -> Rect {
        self.inner.bounds()
    }

    fn content_area(&self) -> Rect {
        self.inner.content_area()
    }

    fn tab_area(&self) -> Rect {
        self.inner.tab_area()
    }

    fn compute_size(
        &self,
        width_hint: Option<i32>,
        height_hint: Option<i32>,
    ) -> Size {
        self.inner.compute_size(width_hint, height_hint)
    }

    fn layout(&mut self, flush: bool) {
        self.inner.layout(flush);
    }

    fn set_visible(&mut self, visible: bool) {
        self.inner.set_visible(visible);
    }

    fn control(&self) -> ControlId {
        self.inner.control()
    }

    fn set_selected_info(&mut self, info: &PartInfo) {
        self.inner.set_selected_info(info);
    }

    fn show_selection(&mut self) {
        self.inner.show_selection();
    }

    fn part_list_location(&self) -> Point {
        self.inner.part_list_location()
    }

    fn is_on_border(&self, point: Point) -> bool {
        self.inner.is_on_border(point)
    }
}

/// Ids attached to the folder's items, in display order.
pub fn item_part_ids(folder: &dyn TabFolder) -> Vec<u64> {
    folder
        .items()
        .iter()
        .filter_map(|item| item.data().map(|part| part.id().0))
        .collect()
}

pub fn part_ids(parts: &[PartRef]) -> Vec<u64> {
    parts.iter().map(|part| part.id().0).collect()
}

pub const FOLDER_BOUNDS: Rect = Rect::new(0, 0, 400, 300);
