//! Rubber-band tracking for window-level drags.
//!
//! A [`Tracker`] follows the pointer with one or more outline rectangles.
//! On every move a [`SnapProvider`] may replace the outline with the snap
//! rectangle of a drop target, which is how stack drop results become
//! visible feedback. Cursor shapes come from a [`DndTweaklet`].

use cursor_icon::CursorIcon;

use crate::drag::StackDropResult;
use crate::geometry::{Point, Rect, Side};

/// Cursor shown while dragging, by kind of drop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CursorType {
    #[default]
    Invalid,
    Left,
    Right,
    Top,
    Bottom,
    Center,
    Offscreen,
    FastView,
}

impl CursorType {
    /// Cursor for docking against `side` of a target.
    pub fn from_side(side: Side) -> Self {
        match side {
            Side::Left => CursorType::Left,
            Side::Right => CursorType::Right,
            Side::Top => CursorType::Top,
            Side::Bottom => CursorType::Bottom,
        }
    }
}

/// Toolkit binding for drag and drop.
pub trait DndTweaklet {
    fn cursor_icon(&self, cursor: CursorType) -> CursorIcon;

    fn create_tracker(&self) -> Tracker {
        Tracker::new()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDndTweaklet;

impl DndTweaklet for DefaultDndTweaklet {
    fn cursor_icon(&self, cursor: CursorType) -> CursorIcon {
        match cursor {
            CursorType::Invalid => CursorIcon::NotAllowed,
            CursorType::Left => CursorIcon::WResize,
            CursorType::Right => CursorIcon::EResize,
            CursorType::Top => CursorIcon::NResize,
            CursorType::Bottom => CursorIcon::SResize,
            CursorType::Center => CursorIcon::Move,
            CursorType::Offscreen => CursorIcon::Alias,
            CursorType::FastView => CursorIcon::Grabbing,
        }
    }
}

/// Feedback a drop target offers for the current pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snap {
    pub rectangle: Rect,
    pub cursor: CursorType,
}

impl Snap {
    /// Dropping into a stack shows the centre cursor.
    pub fn for_drop(result: &StackDropResult) -> Self {
        Self {
            rectangle: result.snap_rectangle,
            cursor: CursorType::Center,
        }
    }
}

/// Looks up drop feedback while a tracker moves.
pub trait SnapProvider {
    /// `dragged` is the outline before snapping.
    fn snap(&mut self, location: Point, dragged: Rect) -> Option<Snap>;
}

impl<T> SnapProvider for T
where
    T: FnMut(Point, Rect) -> Option<Snap>,
{
    fn snap(&mut self, location: Point, dragged: Rect) -> Option<Snap> {
        self(location, dragged)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrackerState {
    #[default]
    Idle,
    Tracking,
    Accepted,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerEvent {
    Moved { rectangle: Rect, cursor: CursorType },
}

#[derive(Debug, Clone, Default)]
pub struct Tracker {
    state: TrackerState,
    dragged: Vec<Rect>,
    shown: Vec<Rect>,
    last: Point,
    cursor: CursorType,
    stippled: bool,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn set_rectangles(&mut self, rectangles: &[Rect]) {
        self.dragged = rectangles.to_vec();
        self.shown = rectangles.to_vec();
    }

    /// Outlines currently shown.
    pub fn rectangles(&self) -> &[Rect] {
        &self.shown
    }

    /// Primary outline.
    pub fn rectangle(&self) -> Option<Rect> {
        self.shown.first().copied()
    }

    pub fn set_cursor(&mut self, cursor: CursorType) {
        self.cursor = cursor;
    }

    pub fn cursor(&self) -> CursorType {
        self.cursor
    }

    pub fn set_stippled(&mut self, stippled: bool) {
        self.stippled = stippled;
    }

    pub fn is_stippled(&self) -> bool {
        self.stippled
    }

    /// Start following the pointer from `start`.
    pub fn open(&mut self, start: Point) {
        self.state = TrackerState::Tracking;
        self.last = start;
    }

    pub fn pointer_moved(
        &mut self,
        location: Point,
        snap: &mut dyn SnapProvider,
    ) -> Option<TrackerEvent> {
        if self.state != TrackerState::Tracking {
            return None;
        }
        let delta = location.delta(self.last);
        self.last = location;
        for rectangle in &mut self.dragged {
            *rectangle = rectangle.translate(delta);
        }

        let primary = self.dragged.first().copied().unwrap_or_default();
        match snap.snap(location, primary) {
            Some(target) => {
                self.shown = vec![target.rectangle];
                self.cursor = target.cursor;
            },
            None => {
                self.shown = self.dragged.clone();
                self.cursor = CursorType::Invalid;
            },
        }
        log::trace!("tracker at {location:?}: {:?}", self.shown);

        Some(TrackerEvent::Moved {
            rectangle: self.shown.first().copied().unwrap_or(primary),
            cursor: self.cursor,
        })
    }

    /// Finish the drag and return the outline it ended with.
    pub fn release(&mut self) -> Option<Rect> {
        if self.state != TrackerState::Tracking {
            return None;
        }
        self.state = TrackerState::Accepted;
        self.rectangle()
    }

    pub fn cancel(&mut self) {
        if self.state == TrackerState::Tracking {
            self.state = TrackerState::Cancelled;
        }
    }
}
