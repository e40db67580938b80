//! Counts-by-category tallies with percentage normalization.

use serde::{Deserialize, Serialize};

/// One category of a tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
    /// Half-up rounded share of the total. Because each bucket rounds
    /// independently, percentages are not guaranteed to sum to 100.
    pub percentage: u32,
}

/// Count items per category over a fixed universe.
///
/// Every category in `universe` appears in the output, zero-count entries
/// included, so a bar chart never silently omits an empty category.
pub fn tally<T, C: PartialEq + Copy>(
    items: &[T],
    category: impl Fn(&T) -> C,
    universe: &[C],
    label: impl Fn(&C) -> String,
) -> Vec<CategoryCount> {
    let total = items.len();
    universe
        .iter()
        .map(|c| {
            let count = items.iter().filter(|item| category(item) == *c).count();
            let percentage = if total > 0 {
                ((count as f64 / total as f64) * 100.0).round() as u32
            } else {
                0
            };
            CategoryCount {
                category: label(c),
                count,
                percentage,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_emits_zero_count_categories() {
        let items = vec!["a", "a", "b"];
        let universe = ["a", "b", "c"];
        let counts = tally(&items, |i| *i, &universe, |c| c.to_string());

        assert_eq!(counts.len(), 3);
        assert_eq!(counts[2].category, "c");
        assert_eq!(counts[2].count, 0);
        assert_eq!(counts[2].percentage, 0);
    }

    #[test]
    fn test_tally_percentages() {
        let items = vec!["a", "a", "a", "b"];
        let universe = ["a", "b"];
        let counts = tally(&items, |i| *i, &universe, |c| c.to_string());

        assert_eq!(counts[0].percentage, 75);
        assert_eq!(counts[1].percentage, 25);
    }

    #[test]
    fn test_tally_empty_input_is_all_zero() {
        let items: Vec<&str> = vec![];
        let universe = ["a", "b"];
        let counts = tally(&items, |i| *i, &universe, |c| c.to_string());

        assert!(counts.iter().all(|c| c.count == 0 && c.percentage == 0));
    }

    #[test]
    fn test_percentages_need_not_sum_to_100() {
        // Three equal buckets each round to 33; the sum is 99 and that is
        // accepted behavior, not a defect.
        let items = vec!["a", "b", "c"];
        let universe = ["a", "b", "c"];
        let counts = tally(&items, |i| *i, &universe, |c| c.to_string());

        assert!(counts.iter().all(|c| c.percentage == 33));
        let sum: u32 = counts.iter().map(|c| c.percentage).sum();
        assert_eq!(sum, 99);
    }

    #[test]
    fn test_half_up_rounding() {
        // 1 of 8 = 12.5% rounds up to 13
        let items = vec!["a", "b", "b", "b", "b", "b", "b", "b"];
        let universe = ["a", "b"];
        let counts = tally(&items, |i| *i, &universe, |c| c.to_string());
        assert_eq!(counts[0].percentage, 13);
        assert_eq!(counts[1].percentage, 88);
    }
}
