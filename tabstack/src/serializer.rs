//! Mapping between parts and the string ids stored in a memento.

use crate::part::PartRef;

/// Resolves parts to persistent ids and back.
pub trait PresentationSerializer {
    fn id(&self, part: &PartRef) -> String;

    /// `None` when `id` no longer names a live part.
    fn part(&self, id: &str) -> Option<PartRef>;
}

/// Identifies each part by its position in a fixed part list.
///
/// Unknown parts serialize as `"-1"`, which never resolves.
#[derive(Debug, Clone, Default)]
pub struct IndexSerializer {
    parts: Vec<PartRef>,
}

impl IndexSerializer {
    pub fn new(parts: Vec<PartRef>) -> Self {
        Self { parts }
    }
}

impl PresentationSerializer for IndexSerializer {
    fn id(&self, part: &PartRef) -> String {
        match self.parts.iter().position(|candidate| candidate == part) {
            Some(index) => index.to_string(),
            None => "-1".to_owned(),
        }
    }

    fn part(&self, id: &str) -> Option<PartRef> {
        let index: usize = id.parse().ok()?;
        self.parts.get(index).filter(|part| part.is_alive()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::geometry::Rect;
    use crate::part::{ControlId, PartId, PresentablePart};

    struct Named(u64);

    impl PresentablePart for Named {
        fn id(&self) -> PartId {
            PartId(self.0)
        }

        fn name(&self) -> String {
            format!("part {}", self.0)
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

    #[test]
    fn ids_are_positions_in_the_part_list() {
        let a = Rc::new(Named(7));
        let b = Rc::new(Named(9));
        let stranger = Rc::new(Named(3));
        let serializer =
            IndexSerializer::new(vec![PartRef::new(&a), PartRef::new(&b)]);

        assert_eq!(serializer.id(&PartRef::new(&b)), "1");
        assert_eq!(serializer.id(&PartRef::new(&stranger)), "-1");
        assert_eq!(serializer.part("0"), Some(PartRef::new(&a)));
        assert_eq!(serializer.part("-1"), None);
        assert_eq!(serializer.part("2"), None);
        assert_eq!(serializer.part("one"), None);
    }

    #[test]
    fn dropped_parts_no_longer_resolve() {
        let a = Rc::new(Named(1));
        let serializer = IndexSerializer::new(vec![PartRef::new(&a)]);
        drop(a);

        assert_eq!(serializer.part("0"), None);
    }
}
