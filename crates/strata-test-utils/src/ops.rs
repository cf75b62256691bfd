//! Random operation scripts and the `Vec` reference model.

use proptest::prelude::*;

/// One container operation with an unresolved index.
///
/// Index seeds are reduced modulo the valid range at application time, so
/// any generated script is valid against any length.
#[derive(Clone, Debug)]
pub enum ArrayOp {
    Insert(i32),
    InsertAt { seed: usize, value: i32 },
    RemoveAt { seed: usize },
}

impl ArrayOp {
    /// The concrete insertion index for a container of length `len`, if
    /// this is an insertion.
    pub fn insert_index(&self, len: usize) -> Option<usize> {
        match self {
            Self::Insert(_) => Some(len),
            Self::InsertAt { seed, .. } => Some(seed % (len + 1)),
            Self::RemoveAt { .. } => None,
        }
    }

    /// The concrete removal index for a container of length `len`.
    /// `None` when this is not a removal or the container is empty.
    pub fn remove_index(&self, len: usize) -> Option<usize> {
        match self {
            Self::RemoveAt { seed } if len > 0 => Some(seed % len),
            _ => None,
        }
    }

    /// Apply this operation to the reference model.
    pub fn apply_to_model(&self, model: &mut Vec<i32>) {
        match self {
            Self::Insert(value) | Self::InsertAt { value, .. } => {
                if let Some(index) = self.insert_index(model.len()) {
                    model.insert(index, *value);
                }
            }
            Self::RemoveAt { .. } => {
                if let Some(index) = self.remove_index(model.len()) {
                    model.remove(index);
                }
            }
        }
    }
}

/// Strategy for scripts of up to `max_ops` operations.
pub fn arb_ops(max_ops: usize) -> impl Strategy<Value = Vec<ArrayOp>> {
    let op = prop_oneof![
        any::<i32>().prop_map(ArrayOp::Insert),
        (any::<usize>(), any::<i32>()).prop_map(|(seed, value)| ArrayOp::InsertAt { seed, value }),
        any::<usize>().prop_map(|seed| ArrayOp::RemoveAt { seed }),
    ];
    proptest::collection::vec(op, 0..max_ops)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_follows_script() {
        let mut model = Vec::new();
        for op in [
            ArrayOp::Insert(10),
            ArrayOp::Insert(20),
            ArrayOp::InsertAt { seed: 0, value: 5 },
            ArrayOp::RemoveAt { seed: 1 },
        ] {
            op.apply_to_model(&mut model);
        }
        assert_eq!(model, vec![5, 20]);
    }

    #[test]
    fn removal_on_empty_is_noop() {
        let mut model = Vec::new();
        ArrayOp::RemoveAt { seed: 7 }.apply_to_model(&mut model);
        assert!(model.is_empty());
    }
}
