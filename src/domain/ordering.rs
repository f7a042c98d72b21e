use crate::error::{KanriError, Result};

/// Moves one element of a sequence to a new index.
///
/// Returns a freshly allocated permutation of the input containing every
/// original element exactly once; the caller's slice is never mutated, so
/// readers holding the previous sequence are unaffected until the result is
/// swapped in. The relative order of all other elements is preserved.
///
/// The destination index is interpreted against the sequence after the
/// element has been removed, and is clamped into range rather than rejected,
/// since drag coordinates are approximate. A `from` index outside the
/// sequence is an error: there is no element to move.
///
/// # Arguments
/// * `seq` - The sequence to reorder
/// * `from` - Index of the element to move
/// * `to` - Index the element should occupy afterwards
///
/// # Examples
/// ```
/// use kanri_core::domain::ordering::move_item;
///
/// let seq = vec!["a", "b", "c", "d"];
/// let moved = move_item(&seq, 0, 2).unwrap();
/// assert_eq!(moved, vec!["b", "c", "a", "d"]);
/// ```
pub fn move_item<T: Clone>(seq: &[T], from: usize, to: usize) -> Result<Vec<T>> {
    if from >= seq.len() {
        return Err(KanriError::IndexOutOfBounds {
            index: from,
            len: seq.len(),
        });
    }

    let mut next = seq.to_vec();
    let item = next.remove(from);
    let dest = to.min(next.len());
    next.insert(dest, item);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_item_forward() {
        let seq = vec![1, 2, 3, 4];
        assert_eq!(move_item(&seq, 0, 2).unwrap(), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_move_item_backward() {
        let seq = vec![1, 2, 3, 4];
        assert_eq!(move_item(&seq, 3, 1).unwrap(), vec![1, 4, 2, 3]);
    }

    #[test]
    fn test_move_item_is_a_permutation() {
        let seq = vec!["a", "b", "c", "d", "e"];

        for from in 0..seq.len() {
            for to in 0..seq.len() {
                let moved = move_item(&seq, from, to).unwrap();
                assert_eq!(moved.len(), seq.len());
                for item in &seq {
                    assert_eq!(
                        moved.iter().filter(|m| m == &item).count(),
                        1,
                        "element {} lost or duplicated moving {} -> {}",
                        item,
                        from,
                        to
                    );
                }
            }
        }
    }

    #[test]
    fn test_move_item_same_index_is_identity() {
        let seq = vec![1, 2, 3];

        for i in 0..seq.len() {
            assert_eq!(move_item(&seq, i, i).unwrap(), seq);
        }
    }

    #[test]
    fn test_move_item_round_trip() {
        let seq = vec![1, 2, 3, 4, 5];

        let there = move_item(&seq, 1, 3).unwrap();
        let back = move_item(&there, 3, 1).unwrap();

        assert_eq!(back, seq);
    }

    #[test]
    fn test_move_item_clamps_destination() {
        let seq = vec![1, 2, 3];

        // Past the end lands at the end
        assert_eq!(move_item(&seq, 0, 99).unwrap(), vec![2, 3, 1]);
    }

    #[test]
    fn test_move_item_source_out_of_bounds() {
        let seq = vec![1, 2, 3];

        let result = move_item(&seq, 3, 0);
        assert!(matches!(
            result,
            Err(KanriError::IndexOutOfBounds { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_move_item_empty_sequence() {
        let seq: Vec<i32> = Vec::new();
        assert!(move_item(&seq, 0, 0).is_err());
    }

    #[test]
    fn test_move_item_does_not_mutate_input() {
        let seq = vec![1, 2, 3];
        let _ = move_item(&seq, 0, 2).unwrap();
        assert_eq!(seq, vec![1, 2, 3]);
    }
}
