//! Policies deciding where parts land in a stack.

use crate::memento::{Memento, TAG_ID, TAG_PART};
use crate::part::PartRef;
use crate::serializer::PresentationSerializer;

/// Ordered list of parts a [`TabOrder`] mutates.
pub trait PresentablePartList {
    /// Insert `part` at `index`, or move it there if already present.
    fn insert(&mut self, part: &PartRef, index: usize);

    fn remove(&mut self, part: &PartRef);

    fn move_part(&mut self, part: &PartRef, index: usize);

    fn size(&self) -> usize;

    /// Make `part` the current part. `None` clears the selection.
    fn select(&mut self, part: Option<&PartRef>);

    fn part_list(&self) -> Vec<PartRef>;
}

/// Translates "why a part entered or left the stack" into list mutations.
///
/// The policy borrows the list per call and keeps no reference to it.
pub trait TabOrder {
    /// A part opened by the user.
    fn add(&self, list: &mut dyn PresentablePartList, part: &PartRef);

    /// A part added while the stack is first populated.
    fn add_initial(&self, list: &mut dyn PresentablePartList, part: &PartRef);

    /// A part dropped at a resolved position.
    fn insert(
        &self,
        list: &mut dyn PresentablePartList,
        part: &PartRef,
        index: usize,
    );

    fn remove(&self, list: &mut dyn PresentablePartList, part: &PartRef);

    fn select(&self, list: &mut dyn PresentablePartList, part: &PartRef);

    fn move_part(
        &self,
        list: &mut dyn PresentablePartList,
        part: &PartRef,
        index: usize,
    );

    fn part_list(&self, list: &dyn PresentablePartList) -> Vec<PartRef> {
        list.part_list()
    }

    /// Store the current order as `part` children carrying an `id`.
    fn save_state(
        &self,
        list: &dyn PresentablePartList,
        serializer: &dyn PresentationSerializer,
        memento: &mut dyn Memento,
    ) {
        for part in self.part_list(list) {
            let child = memento.create_child(TAG_PART);
            child.put_string(TAG_ID, &serializer.id(&part));
        }
    }

    /// Re-add saved parts in saved order, skipping ids that no longer
    /// resolve.
    fn restore_state(
        &self,
        list: &mut dyn PresentablePartList,
        serializer: &dyn PresentationSerializer,
        memento: &dyn Memento,
    ) {
        for child in memento.children(TAG_PART) {
            let Some(id) = child.get_string(TAG_ID) else {
                continue;
            };
            match serializer.part(id) {
                Some(part) => self.add_initial(list, &part),
                None => log::debug!("skipping unresolved part id {id:?}"),
            }
        }
    }
}

/// Appends every new part at the end of the stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppendTabOrder;

impl TabOrder for AppendTabOrder {
    fn add(&self, list: &mut dyn PresentablePartList, part: &PartRef) {
        let end = list.size();
        list.insert(part, end);
    }

    fn add_initial(&self, list: &mut dyn PresentablePartList, part: &PartRef) {
        self.add(list, part);
    }

    fn insert(
        &self,
        list: &mut dyn PresentablePartList,
        part: &PartRef,
        index: usize,
    ) {
        list.insert(part, index);
    }

    fn remove(&self, list: &mut dyn PresentablePartList, part: &PartRef) {
        list.remove(part);
    }

    fn select(&self, list: &mut dyn PresentablePartList, part: &PartRef) {
        list.select(Some(part));
    }

    fn move_part(
        &self,
        list: &mut dyn PresentablePartList,
        part: &PartRef,
        index: usize,
    ) {
        list.move_part(part, index);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::geometry::Rect;
    use crate::memento::JsonMemento;
    use crate::part::{ControlId, PartId, PresentablePart};
    use crate::serializer::IndexSerializer;

    struct Stub(u64);

    impl PresentablePart for Stub {
        fn id(&self) -> PartId {
            PartId(self.0)
        }

        fn name(&self) -> String {
            format!("stub {}", self.0)
        }

        fn title(&self) -> String {
            self.name()
        }

        fn set_visible(&self, _visible: bool) {}

        fn set_bounds(&self, _bounds: Rect) {}

        fn control(&self) -> ControlId {
            ControlId(self.0)
        }
    }

    /// Plain vector list without any folder behind it.
    #[derive(Default)]
    struct VecList {
        parts: Vec<PartRef>,
        selected: Option<PartRef>,
    }

    impl PresentablePartList for VecList {
        fn insert(&mut self, part: &PartRef, index: usize) {
            if self.parts.contains(part) {
                self.move_part(part, index);
                return;
            }
            let index = index.min(self.parts.len());
            self.parts.insert(index, part.clone());
        }

        fn remove(&mut self, part: &PartRef) {
            self.parts.retain(|p| p != part);
        }

        fn move_part(&mut self, part: &PartRef, index: usize) {
            let Some(from) = self.parts.iter().position(|p| p == part) else {
                return;
            };
            let entry = self.parts.remove(from);
            let index = index.min(self.parts.len());
            self.parts.insert(index, entry);
        }

        fn size(&self) -> usize {
            self.parts.len()
        }

        fn select(&mut self, part: Option<&PartRef>) {
            self.selected = part.cloned();
        }

        fn part_list(&self) -> Vec<PartRef> {
            self.parts.clone()
        }
    }

    fn parts(count: u64) -> (Vec<Rc<Stub>>, Vec<PartRef>) {
        let owned: Vec<_> = (0..count).map(|id| Rc::new(Stub(id))).collect();
        let refs = owned.iter().map(PartRef::new).collect();
        (owned, refs)
    }

    fn ids(list: &VecList) -> Vec<u64> {
        list.part_list().iter().map(|part| part.id().0).collect()
    }

    #[test]
    fn add_and_add_initial_both_append() {
        let (_owned, refs) = parts(3);
        let order = AppendTabOrder;
        let mut list = VecList::default();

        order.add_initial(&mut list, &refs[0]);
        order.add(&mut list, &refs[1]);
        order.add_initial(&mut list, &refs[2]);
        assert_eq!(ids(&list), vec![0, 1, 2]);
    }

    #[test]
    fn insert_move_remove_select_forward_to_list() {
        let (_owned, refs) = parts(3);
        let order = AppendTabOrder;
        let mut list = VecList::default();

        order.add(&mut list, &refs[0]);
        order.add(&mut list, &refs[1]);
        order.insert(&mut list, &refs[2], 0);
        assert_eq!(ids(&list), vec![2, 0, 1]);

        order.move_part(&mut list, &refs[2], 2);
        assert_eq!(ids(&list), vec![0, 1, 2]);

        order.select(&mut list, &refs[1]);
        assert_eq!(list.selected.as_ref(), Some(&refs[1]));

        order.remove(&mut list, &refs[0]);
        assert_eq!(ids(&list), vec![1, 2]);
    }

    #[test]
    fn restore_reproduces_saved_order() {
        let (_owned, refs) = parts(3);
        let order = AppendTabOrder;
        let serializer = IndexSerializer::new(refs.clone());

        let mut saved = VecList::default();
        for index in [2, 0, 1] {
            order.add(&mut saved, &refs[index]);
        }
        let mut memento = JsonMemento::new("stack");
        order.save_state(&saved, &serializer, &mut memento);

        let mut restored = VecList::default();
        order.restore_state(&mut restored, &serializer, &memento);
        assert_eq!(ids(&restored), vec![2, 0, 1]);
    }

    #[test]
    fn restore_skips_ids_that_do_not_resolve() {
        let (owned, refs) = parts(3);
        let order = AppendTabOrder;

        let mut memento = JsonMemento::new("stack");
        for id in ["2", "bogus", "0", "1"] {
            memento.create_child(TAG_PART).put_string(TAG_ID, id);
        }
        memento.create_child(TAG_PART);

        let serializer = IndexSerializer::new(refs.clone());
        drop(owned);
        let (_alive, alive) = parts(2);
        let serializer_alive = IndexSerializer::new(alive.clone());

        let mut list = VecList::default();
        order.restore_state(&mut list, &serializer, &memento);
        assert!(list.part_list().is_empty());

        order.restore_state(&mut list, &serializer_alive, &memento);
        assert_eq!(ids(&list), vec![0, 1]);
    }
}
