/// The `limit` items with the greatest key, greatest first.
///
/// Equal keys keep their input order.
pub fn top_recent<T, K, F>(mut items: Vec<T>, limit: usize, key: F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    items.truncate(limit);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[derive(Debug, Clone, PartialEq)]
    struct Inscription {
        id: u32,
        created_on: NaiveDate,
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_five_inscriptions_limit_three() {
        let items: Vec<Inscription> = ["2024-01-01", "2024-02-01", "2024-03-01", "2024-04-01", "2024-05-01"]
            .iter()
            .enumerate()
            .map(|(i, s)| Inscription {
                id: i as u32,
                created_on: d(s),
            })
            .collect();
        let top = top_recent(items, 3, |i| i.created_on);
        let dates: Vec<NaiveDate> = top.iter().map(|i| i.created_on).collect();
        assert_eq!(dates, vec![d("2024-05-01"), d("2024-04-01"), d("2024-03-01")]);
    }

    #[test]
    fn test_limit_larger_than_list() {
        let items = vec![Inscription { id: 1, created_on: d("2024-01-01") }];
        assert_eq!(top_recent(items, 10, |i| i.created_on).len(), 1);
    }

    proptest! {
        #[test]
        fn prop_top_recent_matches_full_sort(offsets in prop::collection::vec(0i64..500, 0..60), limit in 0usize..80) {
            let base = d("2023-01-01");
            let items: Vec<Inscription> = offsets
                .iter()
                .enumerate()
                .map(|(i, off)| Inscription { id: i as u32, created_on: base + Duration::days(*off) })
                .collect();

            let top = top_recent(items.clone(), limit, |i| i.created_on);
            prop_assert_eq!(top.len(), items.len().min(limit));
            prop_assert!(top.windows(2).all(|w| w[0].created_on >= w[1].created_on));

            let mut full = items.clone();
            full.sort_by(|a, b| b.created_on.cmp(&a.created_on));
            let expected: HashSet<u32> = full.iter().take(limit).map(|i| i.id).collect();
            let got: HashSet<u32> = top.iter().map(|i| i.id).collect();
            prop_assert_eq!(got, expected);
        }
    }
}
