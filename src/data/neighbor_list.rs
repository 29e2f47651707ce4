//! Named per-feature neighbor lists

use super::DynamicListArray;

/// Default name of the companion per-tuple count array
pub const NUM_NEIGHBORS: &str = "NumNeighbors";

/// A [`DynamicListArray`] that lives in an attribute matrix under a name,
/// linked to the array that records each tuple's list length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborList {
    name: String,
    num_neighbors_array_name: String,
    lists: DynamicListArray,
}

impl NeighborList {
    pub fn new(name: impl Into<String>, num_tuples: usize) -> Self {
        Self::from_lists(name, DynamicListArray::new(num_tuples))
    }

    pub fn from_lists(name: impl Into<String>, lists: DynamicListArray) -> Self {
        Self {
            name: name.into(),
            num_neighbors_array_name: NUM_NEIGHBORS.to_string(),
            lists,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn num_neighbors_array_name(&self) -> &str {
        &self.num_neighbors_array_name
    }

    pub fn set_num_neighbors_array_name(&mut self, name: impl Into<String>) {
        self.num_neighbors_array_name = name.into();
    }

    pub fn num_tuples(&self) -> usize {
        self.lists.tuple_count()
    }

    pub fn lists(&self) -> &DynamicListArray {
        &self.lists
    }

    pub fn into_lists(self) -> DynamicListArray {
        self.lists
    }

    /// List length of every tuple, as stored in the companion array
    pub fn counts(&self) -> Vec<i32> {
        self.lists.iter().map(|l| l.len() as i32).collect()
    }

    pub fn resize(&mut self, num_tuples: usize) {
        self.lists.resize(num_tuples);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_follow_lists() {
        let mut nl = NeighborList::from_lists(
            "NeighborList",
            DynamicListArray::from_lists(&[vec![], vec![2, 3], vec![1]]),
        );
        assert_eq!(nl.num_neighbors_array_name(), NUM_NEIGHBORS);
        assert_eq!(nl.counts(), vec![0, 2, 1]);
        nl.resize(5);
        assert_eq!(nl.counts(), vec![0, 2, 1, 0, 0]);
    }
}
