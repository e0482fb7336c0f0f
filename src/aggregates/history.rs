//! A member's ceremony history: paid enrollments only, newest ceremony first.

use crate::entities::{ceremony_entity, enrollment_entity};
use crate::models::{HistoryItem, HistoryStats};
use crate::utils::{PaginatedResponse, PaginationParams};
use std::collections::HashSet;

pub fn history_item(
    enrollment: enrollment_entity::Model,
    ceremony: ceremony_entity::Model,
) -> HistoryItem {
    HistoryItem {
        enrollment_id: enrollment.id,
        ceremony_id: ceremony.id,
        title: ceremony.title,
        ceremony_date: ceremony.date,
        medicine: ceremony.medicine,
        paid: enrollment.paid,
        cancelled: enrollment.cancelled,
        created_at: enrollment.created_at,
    }
}

/// Keeps exactly the paid items.
pub fn paid_history(items: Vec<HistoryItem>) -> Vec<HistoryItem> {
    items.into_iter().filter(|item| item.paid).collect()
}

/// Stable: items on the same date keep their relative order.
pub fn sort_by_ceremony_date_desc(items: &mut [HistoryItem]) {
    items.sort_by(|a, b| b.ceremony_date.cmp(&a.ceremony_date));
}

/// Stats over the non-cancelled items.
///
/// `NaiveDate` orders exactly like its ISO `YYYY-MM-DD` text, so min/max here
/// match a lexicographic comparison of the stored dates.
pub fn history_stats(items: &[HistoryItem]) -> HistoryStats {
    let mut stats = HistoryStats::default();
    let mut seen = HashSet::new();

    for item in items.iter().filter(|item| !item.cancelled) {
        stats.total += 1;
        stats.first = Some(stats.first.map_or(item.ceremony_date, |d| d.min(item.ceremony_date)));
        stats.last = Some(stats.last.map_or(item.ceremony_date, |d| d.max(item.ceremony_date)));
        if let Some(medicine) = &item.medicine
            && seen.insert(medicine.as_str())
        {
            stats.medicines.push(medicine.clone());
        }
    }

    stats
}

/// Paid history, sorted and cut to one page.
pub fn history_page(
    items: Vec<HistoryItem>,
    page: Option<u32>,
    page_size: u32,
) -> PaginatedResponse<HistoryItem> {
    let mut history = paid_history(items);
    sort_by_ceremony_date_desc(&mut history);
    PaginatedResponse::from_vec(history, &PaginationParams::new(page, Some(page_size)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;
    use uuid::Uuid;

    fn item(date: &str, paid: bool, cancelled: bool, medicine: Option<&str>) -> HistoryItem {
        HistoryItem {
            enrollment_id: Uuid::new_v4(),
            ceremony_id: Uuid::new_v4(),
            title: "Cerimônia".to_string(),
            ceremony_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            medicine: medicine.map(str::to_string),
            paid,
            cancelled,
            created_at: None,
        }
    }

    #[test]
    fn test_empty_stats() {
        let stats = history_stats(&[]);
        assert_eq!(
            stats,
            HistoryStats {
                total: 0,
                first: None,
                last: None,
                medicines: vec![],
            }
        );
    }

    #[test]
    fn test_stats_ignore_cancelled() {
        let items = vec![
            item("2024-05-01", true, false, Some("Ayahuasca")),
            item("2023-01-10", true, true, Some("Rapé")),
            item("2024-02-01", true, false, None),
            item("2024-09-09", true, false, Some("Ayahuasca")),
        ];
        let stats = history_stats(&items);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.first, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(stats.last, NaiveDate::from_ymd_opt(2024, 9, 9));
        assert_eq!(stats.medicines, vec!["Ayahuasca".to_string()]);
    }

    #[test]
    fn test_history_page_filters_and_sorts() {
        let items = vec![
            item("2024-01-01", true, false, None),
            item("2024-03-01", false, false, None),
            item("2024-02-01", true, true, None),
            item("2024-04-01", true, false, None),
        ];
        let page = history_page(items, Some(1), 10);
        let dates: Vec<String> = page
            .items
            .iter()
            .map(|i| i.ceremony_date.to_string())
            .collect();
        assert_eq!(dates, vec!["2024-04-01", "2024-02-01", "2024-01-01"]);
        assert_eq!(page.pagination.total, 3);
    }

    #[test]
    fn test_history_second_page() {
        let items: Vec<_> = (1..=12)
            .map(|m| item(&format!("2024-{m:02}-01"), true, false, None))
            .collect();
        let page = history_page(items, Some(2), 10);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].ceremony_date.to_string(), "2024-02-01");
        assert_eq!(page.pagination.total_pages, 2);
    }

    fn arb_items() -> impl Strategy<Value = Vec<HistoryItem>> {
        let medicines = prop::option::of(prop::sample::select(vec!["Ayahuasca", "Rapé", "Kambo", "Sananga"]));
        prop::collection::vec((0i64..2_000, any::<bool>(), any::<bool>(), medicines), 0..50).prop_map(
            |rows| {
                let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
                rows.into_iter()
                    .map(|(offset, paid, cancelled, medicine)| {
                        let mut it = item("2020-01-01", paid, cancelled, medicine);
                        it.ceremony_date = base + Duration::days(offset);
                        it
                    })
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_paid_history_is_exactly_paid(items in arb_items()) {
            let expected: HashSet<Uuid> = items.iter().filter(|i| i.paid).map(|i| i.enrollment_id).collect();
            let got: HashSet<Uuid> = paid_history(items.clone()).iter().map(|i| i.enrollment_id).collect();
            prop_assert_eq!(got, expected);
        }

        #[test]
        fn prop_sort_is_idempotent_and_preserves_ids(items in arb_items()) {
            let mut once = items.clone();
            sort_by_ceremony_date_desc(&mut once);
            let mut twice = once.clone();
            sort_by_ceremony_date_desc(&mut twice);
            prop_assert_eq!(&once, &twice);
            prop_assert_eq!(once.len(), items.len());
            let before: HashSet<Uuid> = items.iter().map(|i| i.enrollment_id).collect();
            let after: HashSet<Uuid> = once.iter().map(|i| i.enrollment_id).collect();
            prop_assert_eq!(before, after);
            prop_assert!(once.windows(2).all(|w| w[0].ceremony_date >= w[1].ceremony_date));
        }

        #[test]
        fn prop_stats_match_active_items(items in arb_items()) {
            let stats = history_stats(&items);
            let active: Vec<&HistoryItem> = items.iter().filter(|i| !i.cancelled).collect();
            prop_assert_eq!(stats.total, active.len() as u64);

            let iso: Vec<String> = active.iter().map(|i| i.ceremony_date.format("%Y-%m-%d").to_string()).collect();
            prop_assert_eq!(stats.first.map(|d| d.to_string()), iso.iter().min().cloned());
            prop_assert_eq!(stats.last.map(|d| d.to_string()), iso.iter().max().cloned());

            let distinct: HashSet<&str> = active.iter().filter_map(|i| i.medicine.as_deref()).collect();
            prop_assert_eq!(stats.medicines.len(), distinct.len());
            let listed: HashSet<&str> = stats.medicines.iter().map(String::as_str).collect();
            prop_assert_eq!(listed, distinct);
        }
    }
}
