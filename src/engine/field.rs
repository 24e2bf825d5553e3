//! Field: the ordered, append-only collection of wells.

use super::well::{Well, WellId};

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    wells: Vec<Well>,
    next_id: u64,
    trace_well: Option<WellId>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wells: Vec::new(),
            next_id: 0,
            trace_well: None,
        }
    }

    /// Append `count` new wells at age 0, in creation order.
    ///
    /// The first well ever created becomes the decline-trace well.
    pub fn spud(&mut self, count: u64) {
        for _ in 0..count {
            let id = WellId(self.next_id);
            self.next_id += 1;
            self.trace_well.get_or_insert(id);
            self.wells.push(Well::new(id));
        }
    }

    pub fn wells(&self) -> &[Well] {
        &self.wells
    }

    pub(crate) fn wells_mut(&mut self) -> &mut [Well] {
        &mut self.wells
    }

    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    pub fn well_count(&self) -> u64 {
        self.next_id
    }

    pub const fn trace_well(&self) -> Option<WellId> {
        self.trace_well
    }

    /// Look a well up by id. Ids increase with position, so this is a
    /// binary search rather than a scan.
    pub fn well(&self, id: WellId) -> Option<&Well> {
        self.wells
            .binary_search_by_key(&id, |w| w.id)
            .ok()
            .and_then(|i| self.wells.get(i))
    }

    /// Current rate of the decline-trace well, 0 for an empty field.
    pub fn trace_flow(&self) -> f64 {
        self.trace_well
            .and_then(|id| self.well(id))
            .map_or(0.0, Well::flow_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spud_assigns_sequential_ids() {
        let mut field = Field::new("Test");
        field.spud(3);
        field.spud(2);
        let ids: Vec<u64> = field.wells().iter().map(|w| w.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert_eq!(field.well_count(), 5);
    }

    #[test]
    fn test_trace_well_is_first_created() {
        let mut field = Field::new("Test");
        field.spud(2);
        field.spud(4);
        assert_eq!(field.trace_well(), Some(WellId(0)));
        assert_eq!(field.well(WellId(4)).map(|w| w.id), Some(WellId(4)));
        assert!(field.well(WellId(9)).is_none());
    }

    #[test]
    fn test_empty_field_trace_flow_is_zero() {
        let mut field = Field::new("Empty");
        field.spud(0);
        assert!(field.is_empty());
        assert_eq!(field.trace_well(), None);
        assert_eq!(field.trace_flow(), 0.0);
    }
}
