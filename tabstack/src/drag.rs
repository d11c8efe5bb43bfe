//! Drop-target computation for drags over a tab folder.

use crate::folder::TabFolder;
use crate::geometry::{Point, Rect, Side};

/// Insertion index produced by a drag-over query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DragCookie(pub usize);

/// Drop feedback for a stack: where to draw the highlight and where the
/// part would land. A `None` cookie means "append".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackDropResult {
    pub snap_rectangle: Rect,
    pub cookie: Option<DragCookie>,
}

impl StackDropResult {
    pub fn new(snap_rectangle: Rect, cookie: Option<DragCookie>) -> Self {
        Self {
            snap_rectangle,
            cookie,
        }
    }
}

/// Turns pointer locations into drop targets and cookies into indices.
pub trait TabDragHandler {
    /// `drag_start` is the index of a tab being dragged out of this same
    /// folder, if any. `None` result means "no drop here".
    fn drag_over(
        &self,
        folder: &dyn TabFolder,
        location: Point,
        drag_start: Option<usize>,
    ) -> Option<StackDropResult>;

    /// Insertion index for `cookie`, never above the item count.
    fn insertion_position(
        &self,
        folder: &dyn TabFolder,
        cookie: Option<&DragCookie>,
    ) -> usize;
}

/// Drops onto a tab take that tab's place.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaceDragHandler;

impl ReplaceDragHandler {
    fn drop_past_last_tab(
        folder: &dyn TabFolder,
        title_area: Rect,
        drag_start: Option<usize>,
    ) -> Option<StackDropResult> {
        let count = folder.item_count();
        let last = folder.item(count - 1)?;
        if !last.is_showing() {
            return None;
        }
        let last_bounds = last.bounds();
        if last_bounds.is_empty() {
            return None;
        }

        if drag_start.is_some() {
            return Some(StackDropResult::new(
                last_bounds,
                Some(DragCookie(count - 1)),
            ));
        }

        // Stand-in for a tab that does not exist yet, three times as long
        // as the strip is thick.
        let mut drop_rectangle = title_area;
        match folder.tab_position() {
            Side::Top | Side::Bottom => {
                drop_rectangle.x = last_bounds.right();
                drop_rectangle.width = 3 * drop_rectangle.height;
            },
            Side::Left | Side::Right => {
                drop_rectangle.y = last_bounds.bottom();
                drop_rectangle.height = 3 * last_bounds.height;
            },
        }
        Some(StackDropResult::new(drop_rectangle, Some(DragCookie(count))))
    }
}

impl TabDragHandler for ReplaceDragHandler {
    fn drag_over(
        &self,
        folder: &dyn TabFolder,
        location: Point,
        drag_start: Option<usize>,
    ) -> Option<StackDropResult> {
        let Some(tab) = folder.item_at(location) else {
            let title_area = folder.tab_area();
            if title_area.contains(location) && folder.item_count() > 0 {
                return Self::drop_past_last_tab(folder, title_area, drag_start);
            }

            let bounds = folder.bounds();
            let closest = bounds.closest_side(location);
            log::trace!(
                "drag over {location:?}: closest {closest:?}, tabs on {:?}",
                folder.tab_position()
            );
            if closest == folder.tab_position() {
                return Some(StackDropResult::new(bounds, None));
            }
            return None;
        };

        let item = folder.item_by_id(tab)?;
        if !item.is_showing() {
            return None;
        }
        let bounds = item.bounds();
        if bounds.is_empty() {
            return None;
        }
        let index = folder.index_of(tab)?;
        Some(StackDropResult::new(bounds, Some(DragCookie(index))))
    }

    fn insertion_position(
        &self,
        folder: &dyn TabFolder,
        cookie: Option<&DragCookie>,
    ) -> usize {
        let count = folder.item_count();
        match cookie {
            Some(DragCookie(index)) => (*index).min(count),
            None => count,
        }
    }
}

/// Drop-target queries available while a part drag is in progress.
///
/// Borrows the folder and the drag handler of the stack the drag started
/// in, so a modal drag loop can ask for drop feedback before it returns.
pub struct DragSession<'a> {
    folder: &'a dyn TabFolder,
    handler: &'a dyn TabDragHandler,
    drag_start: Option<usize>,
}

impl<'a> DragSession<'a> {
    pub fn new(
        folder: &'a dyn TabFolder,
        handler: &'a dyn TabDragHandler,
        drag_start: Option<usize>,
    ) -> Self {
        Self {
            folder,
            handler,
            drag_start,
        }
    }

    /// Index of the dragged tab in its own folder.
    pub fn drag_start(&self) -> Option<usize> {
        self.drag_start
    }

    pub fn drag_over(&self, location: Point) -> Option<StackDropResult> {
        self.handler
            .drag_over(self.folder, location, self.drag_start)
    }

    pub fn insertion_position(&self, cookie: Option<&DragCookie>) -> usize {
        self.handler.insertion_position(self.folder, cookie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folder::{
        FolderMetrics, StripTabFolder, TabFlags, TabFolder, TabId,
    };
    use crate::part::{ControlId, PartInfo};

    fn folder_with_tabs(
        names: &[&str],
        width: i32,
    ) -> (StripTabFolder, Vec<TabId>) {
        let mut folder = StripTabFolder::new(
            ControlId(1),
            FolderMetrics::default(),
            Side::Top,
        );
        folder.set_bounds(Rect::new(100, 50, width, 300));
        let tabs = names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let tab = folder.add(index, TabFlags::empty());
                if let Some(item) = folder.item_mut(tab) {
                    item.set_info(PartInfo {
                        name: (*name).to_owned(),
                        ..PartInfo::default()
                    });
                }
                tab
            })
            .collect();
        folder.layout(false);
        (folder, tabs)
    }

    fn bounds_of(folder: &StripTabFolder, tab: TabId) -> Rect {
        folder
            .item_by_id(tab)
            .map(|item| item.bounds())
            .unwrap_or_default()
    }

    #[test]
    fn empty_title_area_accepts_append() {
        let (folder, _) = folder_with_tabs(&[], 400);
        let result =
            ReplaceDragHandler.drag_over(&folder, Point::new(200, 55), None);
        assert_eq!(result, Some(StackDropResult::new(folder.bounds(), None)));
        assert_eq!(ReplaceDragHandler.insertion_position(&folder, None), 0);
    }

    #[test]
    fn hovering_a_tab_targets_its_index() {
        let (folder, tabs) = folder_with_tabs(&["one", "two", "three"], 600);
        let target = bounds_of(&folder, tabs[1]);
        let result = ReplaceDragHandler
            .drag_over(&folder, Point::new(target.x + 2, target.y + 2), None)
            .expect("drop over tab");

        assert_eq!(result.snap_rectangle, target);
        assert_eq!(result.cookie, Some(DragCookie(1)));
        assert_eq!(
            ReplaceDragHandler
                .insertion_position(&folder, result.cookie.as_ref()),
            1
        );
    }

    #[test]
    fn past_last_tab_synthesizes_a_new_tab() {
        let (folder, tabs) = folder_with_tabs(&["one", "two"], 600);
        let last = bounds_of(&folder, tabs[1]);
        let location = Point::new(last.right() + 10, last.y + 2);

        let result = ReplaceDragHandler
            .drag_over(&folder, location, None)
            .expect("drop past last tab");
        let area = folder.tab_area();
        assert_eq!(
            result.snap_rectangle,
            Rect::new(last.right(), area.y, 3 * area.height, area.height)
        );
        assert_eq!(result.cookie, Some(DragCookie(2)));
    }

    #[test]
    fn past_last_tab_during_own_drag_reuses_last_tab() {
        let (folder, tabs) = folder_with_tabs(&["one", "two"], 600);
        let last = bounds_of(&folder, tabs[1]);
        let location = Point::new(last.right() + 10, last.y + 2);

        let result = ReplaceDragHandler
            .drag_over(&folder, location, Some(0))
            .expect("drop past last tab");
        assert_eq!(result.snap_rectangle, last);
        assert_eq!(result.cookie, Some(DragCookie(1)));
    }

    #[test]
    fn scrolled_out_tab_rejects_drop() {
        let (folder, tabs) =
            folder_with_tabs(&["first tab", "second tab", "third tab"], 200);
        let hidden = bounds_of(&folder, tabs[2]);
        let location = Point::new(hidden.x + 2, hidden.y + 2);
        assert_eq!(folder.item_at(location), Some(tabs[2]));
        assert_eq!(ReplaceDragHandler.drag_over(&folder, location, None), None);
    }

    #[test]
    fn outside_strip_depends_on_closest_side() {
        let (folder, _) = folder_with_tabs(&["one"], 400);
        let bounds = folder.bounds();

        let near_bottom = Point::new(bounds.x + 200, bounds.bottom() - 3);
        let target = ReplaceDragHandler.drag_over(&folder, near_bottom, None);
        assert_eq!(target, None);

        let above = Point::new(bounds.x + 200, bounds.y - 5);
        assert_eq!(
            ReplaceDragHandler.drag_over(&folder, above, None),
            Some(StackDropResult::new(bounds, None))
        );
    }

    #[test]
    fn stale_cookie_is_clamped() {
        let (folder, _) = folder_with_tabs(&["one", "two"], 400);
        assert_eq!(
            ReplaceDragHandler
                .insertion_position(&folder, Some(&DragCookie(42))),
            2
        );
    }
}
