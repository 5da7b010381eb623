use crate::{ordering::ThumbOrderingPolicy, range::ValueRange};

/// The ordered value set, one entry per thumb.
///
/// Every mutation goes through the range and the ordering policy, so stored
/// values are always inside the range.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ThumbValues {
    values: Vec<f32>,
}

impl ThumbValues {
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    /// Replaces every value, constraining each to the range and then the
    /// whole set to the ordering policy.
    pub fn replace_all(&mut self, values: &[f32], range: &ValueRange, policy: &ThumbOrderingPolicy) {
        self.values = values.iter().map(|value| range.constrain(*value)).collect();
        policy.enforce_all(&mut self.values, range);
    }

    /// Re-runs the current values through a (possibly new) range and policy.
    pub fn revalidate(&mut self, range: &ValueRange, policy: &ThumbOrderingPolicy) {
        for value in &mut self.values {
            *value = range.constrain(*value);
        }
        policy.enforce_all(&mut self.values, range);
    }

    /// Grows by repeating the last value (the minimum when empty) or shrinks
    /// by truncation. The gap is not enforced on repeated values.
    pub fn resize(&mut self, count: usize, range: &ValueRange) {
        let fill = self.values.last().copied().unwrap_or_else(|| range.minimum());
        self.values.resize(count, fill);
    }

    /// Constrains `candidate` for thumb `index` against the range and its
    /// neighbours, and stores it. Returns the stored value.
    pub fn commit(
        &mut self,
        index: usize,
        candidate: f32,
        range: &ValueRange,
        policy: &ThumbOrderingPolicy,
    ) -> Option<f32> {
        if index >= self.values.len() {
            return None;
        }
        let constrained = range.constrain(candidate);
        let permitted = policy.permit(&self.values, index, constrained, range);
        self.values[index] = permitted;
        Some(permitted)
    }
}
