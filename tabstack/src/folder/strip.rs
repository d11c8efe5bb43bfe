//! A concrete folder that lays out its own tab strip.
//!
//! [`StripTabFolder`] computes every tab rectangle itself, so it works with
//! any renderer: a toolkit adapter draws the rectangles and forwards pointer
//! input to the `pointer_*` and `*_clicked` methods.

use crate::folder::{
    TabFlags, TabFolder, TabFolderBase, TabFolderEventKind, TabId, TabItem,
};
use crate::geometry::{Point, Rect, Side, Size};
use crate::part::{ControlId, PartInfo, PartRef};
use crate::site::StackState;

/// Layout metrics of a strip folder, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderMetrics {
    pub tab_height: i32,
    pub tab_padding: i32,
    /// Average advance of one label character.
    pub char_width: i32,
    pub close_width: i32,
    pub min_tab_width: i32,
    pub max_tab_width: i32,
    pub border: i32,
    /// Width of each chrome button at the end of the strip.
    pub button_width: i32,
    /// Pointer travel after a press that starts a drag.
    pub drag_threshold: i32,
}

impl Default for FolderMetrics {
    fn default() -> Self {
        Self {
            tab_height: 24,
            tab_padding: 8,
            char_width: 7,
            close_width: 16,
            min_tab_width: 48,
            max_tab_width: 220,
            border: 1,
            button_width: 20,
            drag_threshold: 6,
        }
    }
}

/// Chrome buttons at the end of the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FolderButton {
    PartList,
    Minimize,
    Maximize,
}

const BUTTONS: [FolderButton; 3] = [
    FolderButton::PartList,
    FolderButton::Minimize,
    FolderButton::Maximize,
];

/// One tab of a [`StripTabFolder`].
#[derive(Debug, Clone)]
pub struct StripTab {
    id: TabId,
    flags: TabFlags,
    info: PartInfo,
    busy: bool,
    bold: bool,
    data: Option<PartRef>,
    bounds: Rect,
    showing: bool,
}

impl StripTab {
    fn new(id: TabId, flags: TabFlags) -> Self {
        Self {
            id,
            flags,
            info: PartInfo::default(),
            busy: false,
            bold: false,
            data: None,
            bounds: Rect::default(),
            showing: false,
        }
    }

    pub fn flags(&self) -> TabFlags {
        self.flags
    }

    pub fn has_close(&self) -> bool {
        self.flags.contains(TabFlags::CLOSE)
    }
}

impl TabItem for StripTab {
    fn id(&self) -> TabId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_info(&mut self, info: PartInfo) {
        self.info = info;
    }

    fn info(&self) -> &PartInfo {
        &self.info
    }

    fn is_showing(&self) -> bool {
        self.showing
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    fn is_busy(&self) -> bool {
        self.busy
    }

    fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    fn is_bold(&self) -> bool {
        self.bold
    }

    fn data(&self) -> Option<&PartRef> {
        self.data.as_ref()
    }

    fn set_data(&mut self, data: Option<PartRef>) {
        self.data = data;
    }
}

#[derive(Debug, Clone, Copy)]
struct Press {
    origin: Point,
    dragging: bool,
}

/// Toolkit-neutral folder with a horizontal or vertical tab strip.
///
/// Like a native tab bar it selects the first tab added to an empty folder
/// and the neighbour of a removed selected tab, raising `TabSelected` for
/// both.
#[derive(Debug)]
pub struct StripTabFolder {
    base: TabFolderBase,
    metrics: FolderMetrics,
    control: ControlId,
    tabs: Vec<StripTab>,
    selection: Option<TabId>,
    bounds: Rect,
    visible: bool,
    scroll_offset: i32,
    selected_info: PartInfo,
    press: Option<Press>,
}

impl StripTabFolder {
    pub fn new(
        control: ControlId,
        metrics: FolderMetrics,
        position: Side,
    ) -> Self {
        Self {
            base: TabFolderBase::new(position),
            metrics,
            control,
            tabs: Vec::new(),
            selection: None,
            bounds: Rect::default(),
            visible: true,
            scroll_offset: 0,
            selected_info: PartInfo::default(),
            press: None,
        }
    }

    pub fn metrics(&self) -> &FolderMetrics {
        &self.metrics
    }

    pub fn tabs(&self) -> &[StripTab] {
        &self.tabs
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn selected_info(&self) -> &PartInfo {
        &self.selected_info
    }

    pub fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    fn is_horizontal(&self) -> bool {
        matches!(self.tab_position(), Side::Top | Side::Bottom)
    }

    /// Thickness of the strip across its main axis.
    fn strip_thickness(&self) -> i32 {
        if self.is_horizontal() {
            self.metrics.tab_height
        } else {
            self.metrics.max_tab_width
        }
    }

    fn chrome_length(&self) -> i32 {
        BUTTONS.len() as i32 * self.metrics.button_width
    }

    /// Part of the tab area left for tabs once chrome buttons are placed.
    fn tab_region(&self) -> Rect {
        let area = self.tab_area();
        let chrome = self.chrome_length();
        if self.is_horizontal() {
            Rect::new(area.x, area.y, (area.width - chrome).max(0), area.height)
        } else {
            Rect::new(area.x, area.y, area.width, (area.height - chrome).max(0))
        }
    }

    /// Bounds of a chrome button in display coordinates.
    pub fn button_bounds(&self, button: FolderButton) -> Rect {
        let region = self.tab_region();
        let slot = BUTTONS
            .iter()
            .position(|candidate| *candidate == button)
            .unwrap_or_default() as i32;
        let size = self.metrics.button_width;
        if self.is_horizontal() {
            Rect::new(
                region.right() + slot * size,
                region.y,
                size,
                region.height,
            )
        } else {
            Rect::new(
                region.x,
                region.bottom() + slot * size,
                region.width,
                size,
            )
        }
    }

    /// Rectangle of the close affordance inside a tab, if it has one.
    pub fn close_bounds(&self, tab: TabId) -> Option<Rect> {
        let item = self.tabs.iter().find(|item| item.id == tab)?;
        if !item.has_close() || item.bounds.is_empty() {
            return None;
        }
        let size = self.metrics.close_width.min(item.bounds.height);
        Some(Rect::new(
            item.bounds.right() - self.metrics.tab_padding / 2 - size,
            item.bounds.y + (item.bounds.height - size) / 2,
            size,
            size,
        ))
    }

    fn tab_length(&self, tab: &StripTab) -> i32 {
        if !self.is_horizontal() {
            return self.metrics.tab_height;
        }
        let chars = tab.info.label().chars().count() as i32;
        let close = if tab.has_close() {
            self.metrics.close_width
        } else {
            0
        };
        (chars * self.metrics.char_width + 2 * self.metrics.tab_padding + close)
            .clamp(self.metrics.min_tab_width, self.metrics.max_tab_width)
    }

    fn relayout_tabs(&mut self) {
        let region = self.tab_region();
        let horizontal = self.is_horizontal();
        let mut cursor = -self.scroll_offset;
        let lengths: Vec<i32> =
            self.tabs.iter().map(|tab| self.tab_length(tab)).collect();

        for (tab, length) in self.tabs.iter_mut().zip(lengths) {
            tab.bounds = if horizontal {
                Rect::new(region.x + cursor, region.y, length, region.height)
            } else {
                Rect::new(region.x, region.y + cursor, region.width, length)
            };
            tab.showing =
                !region.is_empty() && region.contains_rect(&tab.bounds);
            cursor += length;
        }
    }

    fn total_tab_length(&self) -> i32 {
        self.tabs.iter().map(|tab| self.tab_length(tab)).sum()
    }

    /// Scroll the strip by `delta` pixels along its axis.
    pub fn scroll_by(&mut self, delta: i32) {
        let region = self.tab_region();
        let visible = if self.is_horizontal() {
            region.width
        } else {
            region.height
        };
        let max_offset = (self.total_tab_length() - visible).max(0);
        self.scroll_offset = (self.scroll_offset + delta).clamp(0, max_offset);
        self.relayout_tabs();
    }

    fn set_selection_and_notify(&mut self, tab: Option<TabId>) {
        if self.selection == tab {
            return;
        }
        self.selection = tab;
        self.show_selection();
        if let Some(tab) = tab {
            let position = self
                .tabs
                .iter()
                .find(|item| item.id == tab)
                .map(|item| item.bounds.origin())
                .unwrap_or_default();
            self.fire_event(
                TabFolderEventKind::TabSelected,
                Some(tab),
                position,
            );
        }
    }

    /// Pointer pressed inside the folder.
    pub fn pointer_pressed(&mut self, position: Point) {
        if !self.bounds.contains(position) {
            return;
        }
        let on_button = BUTTONS
            .iter()
            .any(|button| self.button_bounds(*button).contains(position));
        if on_button {
            return;
        }

        if let Some(tab) = self.item_at(position) {
            let on_close = self
                .close_bounds(tab)
                .is_some_and(|close| close.contains(position));
            if on_close {
                return;
            }
            self.set_selection_and_notify(Some(tab));
        }

        self.handle_mouse_press(position);

        if self.tab_area().contains(position) {
            self.press = Some(Press {
                origin: position,
                dragging: false,
            });
        }
    }

    /// Pointer moved. Starts a drag once the press travelled far enough.
    pub fn pointer_moved(&mut self, position: Point) {
        let Some(press) = self.press else {
            return;
        };
        if press.dragging {
            return;
        }
        let delta = position.delta(press.origin);
        if delta.x.abs().max(delta.y.abs()) < self.metrics.drag_threshold {
            return;
        }
        self.press = Some(Press {
            dragging: true,
            ..press
        });
        self.handle_drag_started(press.origin);
    }

    pub fn pointer_released(&mut self) {
        self.press = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.press.is_some_and(|press| press.dragging)
    }

    pub fn double_clicked(&mut self, position: Point) {
        if self.tab_area().contains(position) {
            self.handle_double_click(position);
        }
    }

    pub fn context_menu(&mut self, position: Point) {
        if self.bounds.contains(position) {
            self.handle_context_menu(position);
        }
    }

    pub fn close_clicked(&mut self, tab: TabId) {
        let Some(item) = self.tabs.iter().find(|item| item.id == tab) else {
            return;
        };
        let position = item.bounds.origin();
        self.fire_event(TabFolderEventKind::Close, Some(tab), position);
    }

    pub fn button_clicked(&mut self, button: FolderButton) {
        let position = self.button_bounds(button).origin();
        let kind = match button {
            FolderButton::PartList => TabFolderEventKind::ShowList,
            FolderButton::Minimize if self.state() == StackState::Minimized => {
                TabFolderEventKind::Restore
            },
            FolderButton::Minimize => TabFolderEventKind::Minimize,
            FolderButton::Maximize if self.state() == StackState::Maximized => {
                TabFolderEventKind::Restore
            },
            FolderButton::Maximize => TabFolderEventKind::Maximize,
        };
        self.fire_event(kind, None, position);
    }
}

impl TabFolder for StripTabFolder {
    fn base(&self) -> &TabFolderBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut TabFolderBase {
        &mut self.base
    }

    fn add(&mut self, index: usize, flags: TabFlags) -> TabId {
        let id = self.base.allocate_tab_id();
        let index = index.min(self.tabs.len());
        self.tabs.insert(index, StripTab::new(id, flags));
        self.relayout_tabs();

        if self.selection.is_none() && self.tabs.len() == 1 {
            self.set_selection_and_notify(Some(id));
        }
        id
    }

    fn move_item(&mut self, from: usize, to: usize) {
        if self.tabs.is_empty() {
            return;
        }
        let last = self.tabs.len() - 1;
        let (from, to) = (from.min(last), to.min(last));
        if from == to {
            return;
        }
        let tab = self.tabs.remove(from);
        self.tabs.insert(to, tab);
        self.relayout_tabs();
    }

    fn dispose_item(&mut self, tab: TabId) {
        let Some(index) = self.tabs.iter().position(|item| item.id == tab)
        else {
            return;
        };
        self.tabs.remove(index);

        if self.selection == Some(tab) {
            self.selection = None;
            let neighbour = self
                .tabs
                .get(index)
                .or_else(|| index.checked_sub(1).and_then(|i| self.tabs.get(i)))
                .map(|item| item.id);
            self.relayout_tabs();
            self.set_selection_and_notify(neighbour);
        } else {
            self.relayout_tabs();
        }
    }

    fn items(&self) -> Vec<&dyn TabItem> {
        self.tabs.iter().map(|tab| tab as &dyn TabItem).collect()
    }

    fn item_mut(&mut self, tab: TabId) -> Option<&mut dyn TabItem> {
        self.tabs
            .iter_mut()
            .find(|item| item.id == tab)
            .map(|item| item as &mut dyn TabItem)
    }

    fn set_selection(&mut self, tab: Option<TabId>) {
        let known = tab.is_none_or(|tab| self.tabs.iter().any(|t| t.id == tab));
        if !known {
            return;
        }
        self.selection = tab;
    }

    fn selection(&self) -> Option<TabId> {
        self.selection
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.relayout_tabs();
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn content_area(&self) -> Rect {
        let b = self.bounds;
        let strip = self.strip_thickness().min(match self.tab_position() {
            Side::Top | Side::Bottom => b.height,
            Side::Left | Side::Right => b.width,
        });
        let area = match self.tab_position() {
            Side::Top => Rect::new(b.x, b.y + strip, b.width, b.height - strip),
            Side::Bottom => Rect::new(b.x, b.y, b.width, b.height - strip),
            Side::Left => {
                Rect::new(b.x + strip, b.y, b.width - strip, b.height)
            },
            Side::Right => Rect::new(b.x, b.y, b.width - strip, b.height),
        };
        area.inset(self.metrics.border)
    }

    fn tab_area(&self) -> Rect {
        let b = self.bounds;
        let strip = self.strip_thickness();
        match self.tab_position() {
            Side::Top => Rect::new(b.x, b.y, b.width, strip.min(b.height)),
            Side::Bottom => {
                let height = strip.min(b.height);
                Rect::new(b.x, b.bottom() - height, b.width, height)
            },
            Side::Left => Rect::new(b.x, b.y, strip.min(b.width), b.height),
            Side::Right => {
                let width = strip.min(b.width);
                Rect::new(b.right() - width, b.y, width, b.height)
            },
        }
    }

    fn compute_size(
        &self,
        width_hint: Option<i32>,
        height_hint: Option<i32>,
    ) -> Size {
        let border = 2 * self.metrics.border;
        let first_tab = self
            .tabs
            .first()
            .map(|tab| self.tab_length(tab))
            .unwrap_or(self.metrics.min_tab_width);
        let chrome = self.chrome_length();

        let (width, height) = if self.is_horizontal() {
            (first_tab + chrome + border, self.metrics.tab_height + border)
        } else {
            (
                self.metrics.max_tab_width + border,
                first_tab + chrome + border,
            )
        };

        Size::new(width_hint.unwrap_or(width), height_hint.unwrap_or(height))
    }

    fn layout(&mut self, _flush: bool) {
        self.relayout_tabs();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn control(&self) -> ControlId {
        self.control
    }

    fn set_selected_info(&mut self, info: &PartInfo) {
        self.selected_info = info.clone();
    }

    fn show_selection(&mut self) {
        let Some(selected) = self.selection else {
            return;
        };
        self.relayout_tabs();
        let Some(tab) = self.tabs.iter().find(|item| item.id == selected) else {
            return;
        };
        let region = self.tab_region();
        let (start, end, region_start, region_end) = if self.is_horizontal() {
            (tab.bounds.x, tab.bounds.right(), region.x, region.right())
        } else {
            (tab.bounds.y, tab.bounds.bottom(), region.y, region.bottom())
        };

        let delta = if start < region_start {
            start - region_start
        } else if end > region_end {
            (end - region_end).min(start - region_start)
        } else {
            0
        };
        if delta != 0 {
            self.scroll_offset = (self.scroll_offset + delta).max(0);
            self.relayout_tabs();
        }
    }

    fn part_list_location(&self) -> Point {
        let button = self.button_bounds(FolderButton::PartList);
        Point::new(button.x, button.bottom())
    }

    fn is_on_border(&self, point: Point) -> bool {
        self.bounds.contains(point)
            && !self.bounds.inset(self.metrics.border).contains(point)
    }
}
