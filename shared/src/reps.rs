//! Sets/reps resize rule
//!
//! `reps_per_set` always holds one entry per completed set. Whenever the
//! number of completed sets changes the list is resized before burn is
//! recomputed: growing pads with zero reps, shrinking truncates.

use crate::errors::BurnError;

/// Largest sets count accepted for one exercise entry
///
/// Bounds the reps list allocated for a count that arrives from a form or
/// request body.
pub const MAX_SETS: i32 = 100;

/// Clamp a sets count coming from user input to `0..=MAX_SETS`
pub fn clamp_sets(sets_completed: i32) -> usize {
    sets_completed.clamp(0, MAX_SETS) as usize
}

/// Check a sets count taken as-is, returning it as a size
pub fn checked_sets(sets_completed: i32) -> Result<usize, BurnError> {
    if sets_completed < 0 {
        return Err(BurnError::InvalidInput(format!(
            "setsCompleted cannot be negative (got {})",
            sets_completed
        )));
    }
    if sets_completed > MAX_SETS {
        return Err(BurnError::InvalidInput(format!(
            "setsCompleted cannot exceed {} (got {})",
            MAX_SETS, sets_completed
        )));
    }
    Ok(sets_completed as usize)
}

/// Resize `current` to hold exactly `new_sets_completed` entries
pub fn resize_reps(current: &[i32], new_sets_completed: usize) -> Vec<i32> {
    let mut reps = current.to_vec();
    reps.resize(new_sets_completed, 0);
    reps
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![10, 8], 4, vec![10, 8, 0, 0])]
    #[case(vec![10, 8, 6], 1, vec![10])]
    #[case(vec![10, 8], 2, vec![10, 8])]
    #[case(vec![], 0, vec![])]
    #[case(vec![12], 0, vec![])]
    fn test_resize_reps(#[case] current: Vec<i32>, #[case] sets: usize, #[case] expected: Vec<i32>) {
        assert_eq!(resize_reps(&current, sets), expected);
    }

    #[rstest]
    #[case(-3, 0)]
    #[case(0, 0)]
    #[case(5, 5)]
    #[case(MAX_SETS, 100)]
    #[case(2_000_000_000, 100)]
    fn test_clamp_sets(#[case] input: i32, #[case] expected: usize) {
        assert_eq!(clamp_sets(input), expected);
    }

    #[rstest]
    #[case(0, Some(0))]
    #[case(MAX_SETS, Some(100))]
    #[case(MAX_SETS + 1, None)]
    #[case(50_000_000, None)]
    #[case(-1, None)]
    fn test_checked_sets(#[case] input: i32, #[case] expected: Option<usize>) {
        match expected {
            Some(size) => assert_eq!(checked_sets(input), Ok(size)),
            None => assert!(matches!(checked_sets(input), Err(BurnError::InvalidInput(_)))),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_resize_length_matches(reps in prop::collection::vec(0i32..40, 0..20), n in 0usize..30) {
            prop_assert_eq!(resize_reps(&reps, n).len(), n);
        }

        #[test]
        fn prop_resize_is_idempotent(reps in prop::collection::vec(0i32..40, 0..20), n in 0usize..30) {
            let once = resize_reps(&reps, n);
            prop_assert_eq!(resize_reps(&once, n), once);
        }

        #[test]
        fn prop_resize_keeps_prefix(reps in prop::collection::vec(0i32..40, 0..20), n in 0usize..30) {
            let resized = resize_reps(&reps, n);
            let kept = n.min(reps.len());
            prop_assert_eq!(&resized[..kept], &reps[..kept]);
            prop_assert!(resized[kept..].iter().all(|&r| r == 0));
        }
    }
}
