//! The tabbed stack: folder events in, site requests out.

use std::cell::Cell;
use std::rc::Rc;

use crate::drag::{
    DragCookie, DragSession, ReplaceDragHandler, StackDropResult,
    TabDragHandler,
};
use crate::error::Result;
use crate::folder::{TabFolder, TabFolderEvent, TabFolderEventKind};
use crate::geometry::{INFINITE, Point, Rect, Side, Size};
use crate::memento::Memento;
use crate::part::{ControlId, PartId, PartProperty, PartRef, SizeFlags};
use crate::part_folder::PresentablePartFolder;
use crate::serializer::PresentationSerializer;
use crate::site::{ActiveState, StackPresentationSite, StackState};
use crate::tab_order::{AppendTabOrder, PresentablePartList, TabOrder};

/// Popup the host should open on behalf of the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuRequest {
    PartList {
        location: Point,
    },
    SystemMenu {
        part: Option<PartRef>,
        location: Point,
    },
    PaneMenu {
        part: Option<PartRef>,
        location: Point,
    },
}

/// Suppresses selection echoes from the folder while alive.
struct SelectionEchoGuard {
    counter: Rc<Cell<usize>>,
}

impl SelectionEchoGuard {
    fn new(counter: &Rc<Cell<usize>>) -> Self {
        counter.set(counter.get() + 1);
        Self {
            counter: Rc::clone(counter),
        }
    }
}

impl Drop for SelectionEchoGuard {
    fn drop(&mut self) {
        self.counter.set(self.counter.get().saturating_sub(1));
    }
}

/// A stack of parts shown as tabs.
///
/// Never changes its own zoom state or selection in response to user
/// input: it asks the site, and the site calls back into `set_state`,
/// `select_part` and friends.
pub struct TabbedStackPresentation<F: TabFolder, S: StackPresentationSite> {
    site: S,
    folder: PresentablePartFolder<F>,
    tabs: Box<dyn TabOrder>,
    drag_behavior: Box<dyn TabDragHandler>,
    ignore_selection_changes: Rc<Cell<usize>>,
    initializing: bool,
    drag_start: Option<usize>,
    menu_request: Option<MenuRequest>,
}

impl<F: TabFolder, S: StackPresentationSite> TabbedStackPresentation<F, S> {
    /// Stack with append ordering and replace-on-drop dragging.
    pub fn new(site: S, folder: F) -> Self {
        Self::with_part_folder(
            site,
            PresentablePartFolder::new(folder),
            Box::new(AppendTabOrder),
            Box::new(ReplaceDragHandler),
        )
    }

    pub fn with_part_folder(
        site: S,
        folder: PresentablePartFolder<F>,
        tabs: Box<dyn TabOrder>,
        drag_behavior: Box<dyn TabDragHandler>,
    ) -> Self {
        Self {
            site,
            folder,
            tabs,
            drag_behavior,
            ignore_selection_changes: Rc::new(Cell::new(0)),
            initializing: true,
            drag_start: None,
            menu_request: None,
        }
    }

    pub fn site(&self) -> &S {
        &self.site
    }

    pub fn site_mut(&mut self) -> &mut S {
        &mut self.site
    }

    pub fn part_folder(&self) -> &PresentablePartFolder<F> {
        &self.folder
    }

    pub fn folder(&self) -> &F {
        self.folder.folder()
    }

    /// Direct access for input forwarding. Call
    /// [`Self::process_folder_events`] afterwards.
    pub fn folder_mut(&mut self) -> &mut F {
        self.folder.folder_mut()
    }

    pub fn part_list(&self) -> Vec<PartRef> {
        self.tabs.part_list(&self.folder)
    }

    pub fn is_initializing(&self) -> bool {
        self.initializing
    }

    /// Nesting depth of operations that suppress selection echoes.
    pub fn ignored_selection_depth(&self) -> usize {
        self.ignore_selection_changes.get()
    }

    /// Index of the tab being dragged out of this stack, if any.
    pub fn drag_start(&self) -> Option<usize> {
        self.drag_start
    }

    pub fn take_menu_request(&mut self) -> Option<MenuRequest> {
        self.menu_request.take()
    }

    /// Handle every event the folder queued since the last call.
    pub fn process_folder_events(&mut self) -> Result<()> {
        self.dispatch_folder_events()
    }

    /// Handle queued events until the queue stays empty. A failing event
    /// does not stop the ones after it; the first error is returned.
    fn dispatch_folder_events(&mut self) -> Result<()> {
        let mut first_error = None;
        loop {
            let events = self.folder.take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                if let Err(err) = self.handle_tab_folder_event(event) {
                    log::warn!("folder event {:?} failed: {err}", event.kind);
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Run a mutation with its selection echoes suppressed.
    ///
    /// Input queued before the mutation is not an echo: it is set aside and
    /// put back afterwards for the next [`Self::process_folder_events`].
    fn mutate_quietly(
        &mut self,
        mutation: impl FnOnce(&mut Self),
    ) -> Result<()> {
        let pending = self.folder.take_events();
        let result = {
            let _guard =
                SelectionEchoGuard::new(&self.ignore_selection_changes);
            mutation(self);
            self.dispatch_folder_events()
        };
        self.folder.requeue_events(pending);
        result
    }

    pub fn handle_tab_folder_event(
        &mut self,
        event: TabFolderEvent,
    ) -> Result<()> {
        let part = event.tab.and_then(|tab| self.folder.part_for_tab(tab));

        match event.kind {
            TabFolderEventKind::Minimize => {
                self.request_state(StackState::Minimized)
            },
            TabFolderEventKind::Maximize => {
                self.request_state(StackState::Maximized)
            },
            TabFolderEventKind::Restore => {
                self.request_state(StackState::Restored)
            },
            TabFolderEventKind::Close => {
                if let Some(part) = part {
                    self.site.close(&[part]);
                }
            },
            TabFolderEventKind::ShowList => self.show_part_list(),
            TabFolderEventKind::GiveFocusToPart => self.focus_selected_part(),
            TabFolderEventKind::PaneMenu => {
                self.focus_selected_part();
                let part = part.or_else(|| self.site.selected_part());
                log::debug!("pane menu requested for {part:?}");
                self.menu_request = Some(MenuRequest::PaneMenu {
                    part,
                    location: event.position,
                });
            },
            TabFolderEventKind::DragStart => match part {
                Some(part) => self.start_part_drag(&part, event.position)?,
                None => {
                    if self.site.is_stack_moveable() {
                        self.site.drag_start_stack(event.position, false)?;
                    }
                },
            },
            TabFolderEventKind::TabSelected => {
                if self.ignore_selection_changes.get() == 0 {
                    if let Some(part) = part {
                        self.site.select_part(&part);
                    }
                } else {
                    log::trace!("ignoring selection echo for {part:?}");
                }
            },
            TabFolderEventKind::SystemMenu => {
                let part = part.or_else(|| self.site.selected_part());
                log::debug!("system menu requested for {part:?}");
                self.menu_request = Some(MenuRequest::SystemMenu {
                    part,
                    location: event.position,
                });
            },
            TabFolderEventKind::PreferredSize => {
                let part = part.or_else(|| self.sole_part());
                if part.is_some() && part == self.site.selected_part() {
                    self.site.flush_layout()?;
                }
            },
            TabFolderEventKind::HideToolbar => {
                self.folder.folder_mut().set_toolbar_visible(false);
            },
            TabFolderEventKind::ShowToolbar => {
                self.folder.folder_mut().set_toolbar_visible(true);
            },
        }
        Ok(())
    }

    fn request_state(&mut self, state: StackState) {
        log::debug!("requesting stack state {state:?}");
        self.site.set_state(state);
    }

    fn focus_selected_part(&self) {
        let selected = self.site.selected_part();
        if let Some(part) = selected.and_then(|part| part.upgrade()) {
            part.set_focus();
        }
    }

    fn start_part_drag(
        &mut self,
        part: &PartRef,
        position: Point,
    ) -> Result<()> {
        if !self.site.is_part_moveable(part) {
            return Ok(());
        }
        self.drag_start = self.folder.index_of(part);
        let session = DragSession::new(
            self.folder.folder(),
            self.drag_behavior.as_ref(),
            self.drag_start,
        );
        let result = self.site.drag_start_part(part, position, false, &session);
        self.drag_start = None;
        result
    }

    fn sole_part(&self) -> Option<PartRef> {
        let parts = self.folder.part_list();
        match parts.as_slice() {
            [part] => Some(part.clone()),
            _ => None,
        }
    }

    /// Add a part. During initial population the part is always appended;
    /// afterwards a cookie from [`Self::drag_over`] places it.
    pub fn add_part(
        &mut self,
        part: &PartRef,
        cookie: Option<DragCookie>,
    ) -> Result<()> {
        self.mutate_quietly(|stack| {
            if stack.initializing {
                stack.tabs.add_initial(&mut stack.folder, part);
            } else if let Some(cookie) = cookie {
                let index = stack
                    .drag_behavior
                    .insertion_position(stack.folder.folder(), Some(&cookie));
                stack.tabs.insert(&mut stack.folder, part, index);
            } else {
                stack.tabs.add(&mut stack.folder, part);
            }
        })?;

        if let Some(sole) = self.sole_part().and_then(|p| p.upgrade()) {
            let flags = sole.size_flags(true) | sole.size_flags(false);
            if !flags.is_empty() {
                self.site.flush_layout()?;
            }
        }
        Ok(())
    }

    pub fn move_part(
        &mut self,
        part: &PartRef,
        cookie: Option<DragCookie>,
    ) -> Result<()> {
        let index = self
            .drag_behavior
            .insertion_position(self.folder.folder(), cookie.as_ref());
        if self.folder.index_of(part) == Some(index) {
            return Ok(());
        }
        self.mutate_quietly(|stack| {
            stack.tabs.move_part(&mut stack.folder, part, index);
        })
    }

    pub fn remove_part(&mut self, part: &PartRef) -> Result<()> {
        self.mutate_quietly(|stack| stack.tabs.remove(&mut stack.folder, part))
    }

    pub fn select_part(&mut self, part: &PartRef) -> Result<()> {
        self.initializing = false;
        self.tabs.select(&mut self.folder, part);
        self.dispatch_folder_events()
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.folder.set_bounds(bounds);
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.folder.set_visible(visible);
    }

    /// Mirror the zoom state the site settled on.
    pub fn set_state(&mut self, state: StackState) {
        self.folder.set_state(state);
    }

    pub fn set_active(&mut self, active: ActiveState) {
        self.folder.set_active(active);
    }

    pub fn drag_over(&self, location: Point) -> Option<StackDropResult> {
        self.drag_behavior
            .drag_over(self.folder.folder(), location, self.drag_start)
    }

    /// Keyboard traversal order for `part`: its widget comes before the
    /// folder when the tabs are at the bottom, after it otherwise.
    pub fn get_tab_list(&self, part: &PartRef) -> Vec<ControlId> {
        let part_control = part.upgrade().map(|part| part.control());
        let folder_control = self.folder.folder().control();
        let mut list = Vec::with_capacity(2);
        if self.folder.folder().tab_position() == Side::Bottom {
            list.extend(part_control);
            list.push(folder_control);
        } else {
            list.push(folder_control);
            list.extend(part_control);
        }
        list
    }

    pub fn compute_minimum_size(&self) -> Size {
        self.folder.folder().compute_size(None, None)
    }

    /// Preferred extent along one axis, or [`INFINITE`].
    ///
    /// A single part adds the folder chrome: the larger of the two widths,
    /// the sum of the two heights. Several parts impose no preference. An
    /// empty stack never asks for less than its chrome.
    pub fn compute_preferred_size(
        &self,
        width: bool,
        available_parallel: i32,
        available_perpendicular: i32,
        preferred_result: i32,
    ) -> i32 {
        let chrome = self.compute_minimum_size().extent(width);
        if self.folder.folder().state() == StackState::Minimized {
            return chrome;
        }

        let live: Vec<_> = self
            .folder
            .part_list()
            .iter()
            .filter_map(PartRef::upgrade)
            .collect();
        match live.as_slice() {
            [part] => {
                let size = part.compute_preferred_size(
                    width,
                    available_parallel,
                    available_perpendicular,
                    preferred_result,
                );
                if size == INFINITE {
                    INFINITE
                } else if width {
                    size.max(chrome)
                } else {
                    size.saturating_add(chrome)
                }
            },
            [] if preferred_result != INFINITE => preferred_result.max(chrome),
            _ => INFINITE,
        }
    }

    pub fn get_size_flags(&self, width: bool) -> SizeFlags {
        let part_flags = self
            .sole_part()
            .and_then(|part| part.upgrade())
            .map(|part| part.size_flags(width))
            .unwrap_or_default();
        SizeFlags::MIN | part_flags
    }

    pub fn show_part_list(&mut self) {
        if self.folder.size() == 0 {
            return;
        }
        let location = self.folder.folder().part_list_location();
        log::debug!("part list requested at {location:?}");
        self.menu_request = Some(MenuRequest::PartList { location });
    }

    pub fn save_state(
        &self,
        serializer: &dyn PresentationSerializer,
        memento: &mut dyn Memento,
    ) {
        self.tabs.save_state(&self.folder, serializer, memento);
    }

    pub fn restore_state(
        &mut self,
        serializer: &dyn PresentationSerializer,
        memento: &dyn Memento,
    ) -> Result<()> {
        self.mutate_quietly(|stack| {
            stack
                .tabs
                .restore_state(&mut stack.folder, serializer, memento);
        })
    }

    pub fn control(&self) -> ControlId {
        self.folder.folder().control()
    }

    /// Route a property change of a stacked part.
    pub fn part_property_changed(
        &mut self,
        part: &PartRef,
        property: PartProperty,
    ) -> Result<()> {
        if !self.folder.contains(part) {
            return Ok(());
        }
        self.folder.child_property_changed(part, property);
        self.dispatch_folder_events()
    }

    /// Forget a part whose owner dropped it without removing it first.
    pub fn part_invalidated(&mut self, id: PartId) -> Result<()> {
        self.mutate_quietly(|stack| stack.folder.forget(id))
    }
}
