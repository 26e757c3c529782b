//! Ordered list of authored steps.
//!
//! Position is execution order in the compiled script. Ordinals are never
//! stored: the step at index `i` is always step `i + 1`.

use quest_data::StepRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepList {
    steps: Vec<StepRecord>,
}

impl StepList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: StepRecord) {
        self.steps.push(record);
    }

    /// Remove the step at `index`. Out-of-range indices leave the list untouched.
    pub fn delete_at(&mut self, index: usize) -> Option<StepRecord> {
        (index < self.steps.len()).then(|| self.steps.remove(index))
    }

    /// Swap the step with its predecessor. Returns whether anything moved.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.steps.len() {
            return false;
        }
        self.steps.swap(index - 1, index);
        true
    }

    /// Swap the step with its successor. Returns whether anything moved.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.steps.len() {
            return false;
        }
        self.steps.swap(index, index + 1);
        true
    }

    /// 1-based display position of `index`, if it exists.
    pub fn ordinal(&self, index: usize) -> Option<usize> {
        (index < self.steps.len()).then_some(index + 1)
    }

    pub fn get(&self, index: usize) -> Option<&StepRecord> {
        self.steps.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter()
    }

    pub fn as_slice(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl FromIterator<StepRecord> for StepList {
    fn from_iter<T: IntoIterator<Item = StepRecord>>(iter: T) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn titled(n: usize) -> StepRecord {
        StepRecord::new("INFO", Some("guard1")).with("title", format!("step {n}"))
    }

    fn titles(list: &StepList) -> Vec<String> {
        list.iter().map(|s| s.title().unwrap_or_default().to_string()).collect()
    }

    #[test]
    fn boundary_moves_are_noops() {
        let mut list: StepList = (0..3).map(titled).collect();
        let before = list.clone();
        assert!(!list.move_up(0));
        assert!(!list.move_down(2));
        assert!(!list.move_up(7));
        assert!(!list.move_down(7));
        assert_eq!(list, before);
    }

    #[test]
    fn moving_swaps_neighbours() {
        let mut list: StepList = (0..3).map(titled).collect();
        assert!(list.move_up(2));
        assert_eq!(titles(&list), ["step 0", "step 2", "step 1"]);
        assert!(list.move_down(0));
        assert_eq!(titles(&list), ["step 2", "step 0", "step 1"]);
    }

    #[test]
    fn delete_out_of_range_is_noop() {
        let mut list: StepList = (0..2).map(titled).collect();
        assert!(list.delete_at(2).is_none());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn delete_shifts_later_steps_forward() {
        let mut list: StepList = (0..4).map(titled).collect();
        let removed = list.delete_at(1).expect("in range");
        assert_eq!(removed.title(), Some("step 1"));
        assert_eq!(titles(&list), ["step 0", "step 2", "step 3"]);
        assert_eq!(list.ordinal(0), Some(1));
        assert_eq!(list.ordinal(1), Some(2));
        assert_eq!(list.ordinal(2), Some(3));
        assert_eq!(list.ordinal(3), None);
    }

    proptest! {
        #[test]
        fn ordinals_follow_positions(n in 0usize..40) {
            let list: StepList = (0..n).map(titled).collect();
            let ordinals: Vec<usize> = (0..list.len()).filter_map(|i| list.ordinal(i)).collect();
            prop_assert_eq!(ordinals, (1..=n).collect::<Vec<_>>());
        }

        #[test]
        fn up_then_down_restores_order(n in 2usize..20, idx in 1usize..20) {
            let idx = idx % n;
            prop_assume!(idx > 0);
            let mut list: StepList = (0..n).map(titled).collect();
            let before = list.clone();
            prop_assert!(list.move_up(idx));
            prop_assert!(list.move_down(idx - 1));
            prop_assert_eq!(list, before);
        }

        #[test]
        fn delete_moves_later_steps_by_one(n in 1usize..20, idx in 0usize..20) {
            let idx = idx % n;
            let mut list: StepList = (0..n).map(titled).collect();
            let before = titles(&list);
            list.delete_at(idx);
            let after = titles(&list);
            prop_assert_eq!(&after[..idx], &before[..idx]);
            prop_assert_eq!(&after[idx..], &before[idx + 1..]);
        }
    }
}
