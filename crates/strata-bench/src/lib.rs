//! Benchmark workloads for the strata dynamic array.
//!
//! Provides deterministic, seeded operation scripts for benchmarks:
//!
//! - [`edit_script`]: mixed positional inserts and removals
//! - [`filled`]: an array of `0..len` built by appending
//! - [`replay`]: apply a script to an array

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use strata_array::{ArrayError, DynamicArray};

/// One positional edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    /// Insert the value at the index.
    Insert { index: usize, value: u64 },
    /// Remove the element at the index.
    Remove { index: usize },
}

/// Build a seeded script of `count` edits starting from an array of
/// `start_len` elements.
///
/// Inserts are chosen with probability `insert_ratio`; removals are only
/// emitted while the simulated length is non-zero, so every index in the
/// script is valid when replayed in order.
pub fn edit_script(seed: u64, start_len: usize, count: usize, insert_ratio: f64) -> Vec<Edit> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut len = start_len;
    let mut script = Vec::with_capacity(count);
    for _ in 0..count {
        if len == 0 || rng.gen_bool(insert_ratio) {
            let index = rng.gen_range(0..=len);
            script.push(Edit::Insert {
                index,
                value: rng.gen(),
            });
            len += 1;
        } else {
            let index = rng.gen_range(0..len);
            script.push(Edit::Remove { index });
            len -= 1;
        }
    }
    script
}

/// An array holding `0..len`, built by appending from the default capacity.
pub fn filled(len: usize) -> Result<DynamicArray<u64>, ArrayError> {
    let mut arr = DynamicArray::with_capacity(8)?;
    for v in 0..len as u64 {
        arr.insert(v)?;
    }
    Ok(arr)
}

/// Apply `script` to `arr` in order.
pub fn replay(arr: &mut DynamicArray<u64>, script: &[Edit]) -> Result<(), ArrayError> {
    for edit in script {
        match *edit {
            Edit::Insert { index, value } => {
                arr.insert_at(index, value)?;
            }
            Edit::Remove { index } => {
                arr.remove_at(index);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_is_deterministic() {
        assert_eq!(edit_script(7, 10, 50, 0.5), edit_script(7, 10, 50, 0.5));
        assert_ne!(edit_script(7, 10, 50, 0.5), edit_script(8, 10, 50, 0.5));
    }

    #[test]
    fn script_replays_cleanly() {
        let script = edit_script(42, 100, 1_000, 0.4);
        let mut arr = filled(100).unwrap();
        replay(&mut arr, &script).unwrap();
        let inserts = script
            .iter()
            .filter(|e| matches!(e, Edit::Insert { .. }))
            .count();
        assert_eq!(arr.len(), 100 + inserts - (script.len() - inserts));
    }

    #[test]
    fn filled_is_sequential() {
        let arr = filled(20).unwrap();
        assert!(arr.iter().copied().eq(0..20));
    }
}
