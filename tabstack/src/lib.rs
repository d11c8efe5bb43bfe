//! Toolkit-neutral tabbed stack presentation.
//!
//! The crate arranges externally owned parts into a stack of tabs:
//! - [`TabFolder`] is the widget-level tab strip; [`StripTabFolder`] is a
//!   ready-made implementation that computes its own geometry;
//! - [`PresentablePartFolder`] keeps parts and tabs in the same order and
//!   shows exactly one part at a time;
//! - [`TabOrder`] decides where new parts land and persists the order
//!   through a [`Memento`];
//! - [`TabDragHandler`] turns pointer positions into drop targets;
//! - [`TabbedStackPresentation`] ties these together and talks to a
//!   [`StackPresentationSite`];
//! - [`Tracker`] draws rubber-band feedback for window-level drags.
//!
//! Everything runs on the UI thread. Parts are referenced through
//! [`PartRef`], a weak handle: a part dropped by its owner turns into a
//! no-op rather than a dangling reference.

mod drag;
mod error;
mod folder;
mod geometry;
mod memento;
mod part;
mod part_folder;
mod presentation;
mod serializer;
mod site;
mod tab_order;
mod tracker;

pub use drag::{
    DragCookie, DragSession, ReplaceDragHandler, StackDropResult,
    TabDragHandler,
};
pub use error::{Result, StackError};
pub use folder::{
    FolderButton, FolderMetrics, StripTab, StripTabFolder, TabFlags,
    TabFolder, TabFolderBase, TabFolderEvent, TabFolderEventKind, TabId,
    TabItem,
};
pub use geometry::{INFINITE, Point, Rect, Side, Size};
pub use memento::{
    JsonMemento, Memento, TAG_ID, TAG_PART, TAG_PRESENTATION,
};
pub use part::{
    ControlId, PartId, PartInfo, PartProperty, PartRef, PresentablePart,
    SizeFlags,
};
pub use part_folder::PresentablePartFolder;
pub use presentation::{MenuRequest, TabbedStackPresentation};
pub use serializer::{IndexSerializer, PresentationSerializer};
pub use site::{ActiveState, StackPresentationSite, StackState};
pub use tab_order::{AppendTabOrder, PresentablePartList, TabOrder};
pub use tracker::{
    CursorType, DefaultDndTweaklet, DndTweaklet, Snap, SnapProvider,
    Tracker, TrackerEvent, TrackerState,
};
