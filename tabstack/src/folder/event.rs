use crate::folder::TabId;
use crate::geometry::Point;

/// What happened inside a tab folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabFolderEventKind {
    PaneMenu,
    HideToolbar,
    ShowToolbar,
    Restore,
    Minimize,
    Close,
    Maximize,
    TabSelected,
    GiveFocusToPart,
    DragStart,
    ShowList,
    SystemMenu,
    PreferredSize,
}

/// Event raised by a folder and consumed by the stack that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabFolderEvent {
    pub kind: TabFolderEventKind,
    /// Tab the event refers to, if any.
    pub tab: Option<TabId>,
    /// Display position of the interaction.
    pub position: Point,
}

impl TabFolderEvent {
    pub fn new(
        kind: TabFolderEventKind,
        tab: Option<TabId>,
        position: Point,
    ) -> Self {
        Self {
            kind,
            tab,
            position,
        }
    }
}
