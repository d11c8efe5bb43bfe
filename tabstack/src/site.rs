//! The presentation site: the external controller a stack escalates to.

use crate::drag::DragSession;
use crate::error::Result;
use crate::geometry::Point;
use crate::part::PartRef;

/// Zoom state of a stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StackState {
    #[default]
    Restored,
    Minimized,
    Maximized,
}

/// Focus appearance of a stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ActiveState {
    #[default]
    Inactive,
    ActiveFocus,
    ActiveNoFocus,
}

/// Capabilities of the controller that owns a stack's docking state.
///
/// The stack never changes its own zoom state or selection: it asks the
/// site, and the site later calls back into the presentation.
pub trait StackPresentationSite {
    fn state(&self) -> StackState;

    /// Request a new zoom state.
    fn set_state(&mut self, state: StackState);

    fn close(&mut self, parts: &[PartRef]);

    fn select_part(&mut self, part: &PartRef);

    /// Begin dragging a single part.
    ///
    /// A modal drag loop may query drop targets through `session` before
    /// returning.
    fn drag_start_part(
        &mut self,
        part: &PartRef,
        initial_location: Point,
        keyboard: bool,
        session: &DragSession<'_>,
    ) -> Result<()>;

    /// Begin dragging the whole stack.
    fn drag_start_stack(
        &mut self,
        initial_location: Point,
        keyboard: bool,
    ) -> Result<()>;

    fn selected_part(&self) -> Option<PartRef>;

    fn part_list(&self) -> Vec<PartRef>;

    fn flush_layout(&mut self) -> Result<()>;

    fn is_part_moveable(&self, _part: &PartRef) -> bool {
        true
    }

    fn is_stack_moveable(&self) -> bool {
        true
    }
}
