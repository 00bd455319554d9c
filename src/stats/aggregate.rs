//! Small in-memory aggregation toolkit shared by the stats endpoints and
//! the standings service: grouping, means, spreads, shares and ranks.

use std::collections::HashMap;
use std::hash::Hash;

/// Group items by a derived key.
pub fn group_by<K, T, F>(items: Vec<T>, key: F) -> HashMap<K, Vec<T>>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut groups: HashMap<K, Vec<T>> = HashMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation. Returns 0.0 for fewer than two observations.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Fraction of a whole, 0.0 when the whole is empty.
pub fn share(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Dense descending ranks: the highest value gets rank 1, ties share a
/// rank, and the next distinct value gets the next rank (1, 2, 2, 3).
pub fn dense_ranks_desc(values: &[i64]) -> Vec<usize> {
    let mut distinct: Vec<i64> = values.to_vec();
    distinct.sort_unstable_by(|a, b| b.cmp(a));
    distinct.dedup();

    let rank_of: HashMap<i64, usize> = distinct
        .into_iter()
        .enumerate()
        .map(|(i, v)| (v, i + 1))
        .collect();

    values.iter().map(|v| rank_of[v]).collect()
}

/// Dense ascending ranks: the lowest value gets rank 1. Used for draft
/// positions, where a smaller average position is better.
pub fn dense_ranks_asc_f64(values: &[f64]) -> Vec<usize> {
    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("draft positions are finite"));
    sorted.dedup();

    values
        .iter()
        .map(|v| {
            sorted
                .iter()
                .position(|s| s == v)
                .expect("value came from the same slice")
                + 1
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_by_collects_by_key() {
        let groups = group_by(vec![1, 2, 3, 4, 5], |n| n % 2);
        assert_eq!(groups[&0], vec![2, 4]);
        assert_eq!(groups[&1], vec![1, 3, 5]);
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[3.0, 5.0]), 4.0);
    }

    #[test]
    fn std_dev_needs_two_observations() {
        assert_eq!(sample_std_dev(&[]), 0.0);
        assert_eq!(sample_std_dev(&[7.0]), 0.0);
        // Known value: sample std dev of 2, 4, 4, 4, 5, 5, 7, 9 is ~2.138
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = sample_std_dev(&values);
        assert!((sd - 2.138).abs() < 0.001);
    }

    #[test]
    fn share_handles_empty_whole() {
        assert_eq!(share(3, 0), 0.0);
        assert_eq!(share(1, 4), 0.25);
    }

    #[test]
    fn dense_ranks_share_positions_on_ties() {
        assert_eq!(dense_ranks_desc(&[10, 8, 8, 3]), vec![1, 2, 2, 3]);
        assert_eq!(dense_ranks_desc(&[]), Vec::<usize>::new());
        assert_eq!(dense_ranks_desc(&[5, 5, 5]), vec![1, 1, 1]);
    }

    #[test]
    fn ascending_ranks_favor_small_values() {
        assert_eq!(dense_ranks_asc_f64(&[1.5, 3.0, 1.5]), vec![1, 2, 1]);
    }
}
