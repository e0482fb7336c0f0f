//! Cash-flow aggregation over manual transactions and processor payments.
//!
//! Everything here is a pure transform over rows already fetched for one
//! tenant; nothing is cached between calls.

use crate::entities::{
    PaymentStatus, TransactionKind, category_entity, payment_record_entity, transaction_entity,
};
use crate::models::{CategoryRef, LedgerEntry, LedgerSource, MonthlyBucket, PeriodTotals};
use chrono::{Datelike, NaiveDate};

/// Category synthesized for processor payments, which carry none.
pub const EXTERNAL_CATEGORY_NAME: &str = "Pagamentos online";
pub const EXTERNAL_CATEGORY_COLOR: &str = "#10B981";

pub fn manual_entry(
    tx: transaction_entity::Model,
    category: Option<category_entity::Model>,
) -> LedgerEntry {
    LedgerEntry {
        id: tx.id,
        source: LedgerSource::Manual,
        kind: tx.kind,
        amount_cents: tx.amount_cents,
        date: tx.occurred_on,
        description: tx.description,
        category: category.map(|c| CategoryRef {
            id: Some(c.id),
            name: c.name,
            color: c.color,
        }),
        payment_method: tx.payment_method,
        product_kind: None,
        reconciled: tx.reconciled,
        reconciled_by: tx.reconciled_by,
        reconciled_at: tx.reconciled_at,
    }
}

/// Maps a processor payment into the ledger shape.
///
/// Returns `None` unless the status is exactly `approved` and `paid_at` is
/// set; the ledger query selects on the same two columns.
/// Processor payments are always income and always count as reconciled.
pub fn external_entry(record: payment_record_entity::Model) -> Option<LedgerEntry> {
    if record.parsed_status() != PaymentStatus::Approved {
        return None;
    }
    let date = record.paid_at?.date_naive();
    let description = record
        .description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| format!("Pagamento online - {}", record.product_kind.label()));

    Some(LedgerEntry {
        id: record.id,
        source: LedgerSource::External,
        kind: TransactionKind::Entrada,
        amount_cents: record.amount_cents,
        date,
        description,
        category: Some(CategoryRef {
            id: None,
            name: EXTERNAL_CATEGORY_NAME.to_string(),
            color: EXTERNAL_CATEGORY_COLOR.to_string(),
        }),
        payment_method: record.payment_method,
        product_kind: Some(record.product_kind),
        reconciled: true,
        reconciled_by: None,
        reconciled_at: None,
    })
}

/// Concatenates both sources and sorts newest first.
///
/// The sort is stable: entries sharing a date keep manual-before-external
/// input order.
pub fn merge_entries(
    manual: Vec<(transaction_entity::Model, Option<category_entity::Model>)>,
    external: Vec<payment_record_entity::Model>,
) -> Vec<LedgerEntry> {
    let mut entries: Vec<LedgerEntry> = manual
        .into_iter()
        .map(|(tx, cat)| manual_entry(tx, cat))
        .chain(external.into_iter().filter_map(external_entry))
        .collect();
    sort_newest_first(&mut entries);
    entries
}

pub fn sort_newest_first(entries: &mut [LedgerEntry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
}

pub fn period_totals(entries: &[LedgerEntry]) -> PeriodTotals {
    let mut totals = PeriodTotals::default();
    for entry in entries {
        match (entry.kind, entry.source) {
            (TransactionKind::Entrada, LedgerSource::Manual) => {
                totals.manual_entradas += entry.amount_cents
            }
            (TransactionKind::Entrada, LedgerSource::External) => {
                totals.external_entradas += entry.amount_cents
            }
            (TransactionKind::Saida, _) => totals.saidas += entry.amount_cents,
        }
    }
    totals.entradas = totals.manual_entradas + totals.external_entradas;
    totals.saldo = totals.entradas - totals.saidas;
    totals
}

/// Twelve buckets indexed by calendar month; entries outside `year` are ignored.
pub fn monthly_buckets(entries: &[LedgerEntry], year: i32) -> [MonthlyBucket; 12] {
    let mut buckets: [MonthlyBucket; 12] = std::array::from_fn(|i| MonthlyBucket {
        month: i as u32 + 1,
        ..Default::default()
    });
    for entry in entries.iter().filter(|e| e.date.year() == year) {
        let bucket = &mut buckets[entry.date.month0() as usize];
        match entry.kind {
            TransactionKind::Entrada => bucket.entradas += entry.amount_cents,
            TransactionKind::Saida => bucket.saidas += entry.amount_cents,
        }
    }
    for bucket in buckets.iter_mut() {
        bucket.saldo = bucket.entradas - bucket.saidas;
    }
    buckets
}

/// First and last day of a calendar year.
pub fn year_range(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::entities::PaymentProductKind;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    pub fn manual(kind: TransactionKind, cents: i64, on: &str, desc: &str) -> transaction_entity::Model {
        transaction_entity::Model {
            id: Uuid::new_v4(),
            house_id: Uuid::nil(),
            kind,
            amount_cents: cents,
            occurred_on: date(on),
            category_id: None,
            payment_method: Some("pix".to_string()),
            description: desc.to_string(),
            notes: None,
            reconciled: false,
            reconciled_by: None,
            reconciled_at: None,
            created_by: Uuid::nil(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn payment(status: &str, cents: i64, on: &str) -> payment_record_entity::Model {
        let d = date(on);
        payment_record_entity::Model {
            id: Uuid::new_v4(),
            house_id: Uuid::nil(),
            user_id: None,
            amount_cents: cents,
            status: status.to_string(),
            paid_at: Some(
                Utc.from_utc_datetime(&d.and_hms_opt(12, 0, 0).unwrap()),
            ),
            product_kind: PaymentProductKind::Ceremony,
            product_id: None,
            description: None,
            payment_method: Some("credit_card".to_string()),
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_merge_sorts_descending_and_drops_unapproved() {
        let entries = merge_entries(
            vec![
                (manual(TransactionKind::Saida, 2_000, "2025-03-01", "Velas"), None),
                (manual(TransactionKind::Entrada, 10_000, "2025-03-10", "Doação"), None),
            ],
            vec![
                payment("approved", 25_000, "2025-03-05"),
                payment("pending", 99_999, "2025-03-06"),
                payment("rejected", 99_999, "2025-03-07"),
            ],
        );

        let dates: Vec<_> = entries.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![date("2025-03-10"), date("2025-03-05"), date("2025-03-01")]
        );
        let external = &entries[1];
        assert_eq!(external.source, LedgerSource::External);
        assert_eq!(external.kind, TransactionKind::Entrada);
        assert!(external.reconciled);
        assert_eq!(
            external.category.as_ref().map(|c| c.name.as_str()),
            Some(EXTERNAL_CATEGORY_NAME)
        );
        assert_eq!(external.description, "Pagamento online - Cerimônia");
    }

    #[test]
    fn test_period_totals() {
        let entries = merge_entries(
            vec![
                (manual(TransactionKind::Entrada, 10_000, "2025-03-10", "Doação"), None),
                (manual(TransactionKind::Saida, 2_500, "2025-03-01", "Velas"), None),
                (manual(TransactionKind::Saida, 500, "2025-03-02", "Água"), None),
            ],
            vec![payment("approved", 25_000, "2025-03-05")],
        );
        let totals = period_totals(&entries);
        assert_eq!(totals.manual_entradas, 10_000);
        assert_eq!(totals.external_entradas, 25_000);
        assert_eq!(totals.entradas, 35_000);
        assert_eq!(totals.saidas, 3_000);
        assert_eq!(totals.saldo, 32_000);
    }

    #[test]
    fn test_empty_inputs_yield_zero() {
        let entries = merge_entries(vec![], vec![]);
        assert!(entries.is_empty());
        assert_eq!(period_totals(&entries), PeriodTotals::default());
        assert!(monthly_buckets(&entries, 2025).iter().all(|b| b.saldo == 0));
    }

    #[test]
    fn test_monthly_buckets_by_calendar_month() {
        let entries = merge_entries(
            vec![
                (manual(TransactionKind::Entrada, 1_000, "2025-01-15", "a"), None),
                (manual(TransactionKind::Saida, 400, "2025-01-20", "b"), None),
                (manual(TransactionKind::Entrada, 7_000, "2024-12-31", "old"), None),
            ],
            vec![payment("approved", 3_000, "2025-12-01")],
        );
        let buckets = monthly_buckets(&entries, 2025);
        assert_eq!(buckets[0].month, 1);
        assert_eq!(buckets[0].entradas, 1_000);
        assert_eq!(buckets[0].saidas, 400);
        assert_eq!(buckets[0].saldo, 600);
        assert_eq!(buckets[11].month, 12);
        assert_eq!(buckets[11].entradas, 3_000);
        assert_eq!(buckets[5], MonthlyBucket { month: 6, ..Default::default() });
    }

    #[test]
    fn test_external_requires_paid_at_and_exact_status() {
        let mut unpaid = payment("approved", 100, "2025-01-01");
        unpaid.created_at = unpaid.paid_at.take();
        assert!(external_entry(unpaid).is_none());

        assert!(external_entry(payment(" APPROVED ", 100, "2025-01-01")).is_none());
        assert!(external_entry(payment("approved", 100, "2025-01-01")).is_some());
    }

    fn arb_entries() -> impl Strategy<Value = Vec<LedgerEntry>> {
        prop::collection::vec(
            (any::<bool>(), any::<bool>(), 1i64..1_000_000, 0u32..365),
            0..40,
        )
        .prop_map(|rows| {
            let manual_rows: Vec<(transaction_entity::Model, Option<category_entity::Model>)> = rows
                .iter()
                .filter(|(external, ..)| !external)
                .map(|(_, entrada, cents, day)| {
                    let kind = if *entrada {
                        TransactionKind::Entrada
                    } else {
                        TransactionKind::Saida
                    };
                    let mut tx = manual(kind, *cents, "2025-01-01", "x");
                    tx.occurred_on += chrono::Duration::days(*day as i64);
                    (tx, None)
                })
                .collect();
            let external_rows: Vec<payment_record_entity::Model> = rows
                .iter()
                .filter(|(external, ..)| *external)
                .map(|(_, _, cents, day)| {
                    let mut p = payment("approved", *cents, "2025-01-01");
                    p.paid_at = p.paid_at.map(|t| t + chrono::Duration::days(*day as i64));
                    p
                })
                .collect();
            merge_entries(manual_rows, external_rows)
        })
    }

    proptest! {
        #[test]
        fn prop_monthly_buckets_sum_to_period_totals(entries in arb_entries()) {
            let totals = period_totals(&entries);
            let buckets = monthly_buckets(&entries, 2025);
            let in_year: Vec<_> = entries.iter().filter(|e| e.date.year() == 2025).cloned().collect();
            let year_totals = period_totals(&in_year);
            prop_assert_eq!(buckets.iter().map(|b| b.entradas).sum::<i64>(), year_totals.entradas);
            prop_assert_eq!(buckets.iter().map(|b| b.saidas).sum::<i64>(), year_totals.saidas);
            prop_assert_eq!(totals.saldo, totals.entradas - totals.saidas);
        }

        #[test]
        fn prop_merge_is_sorted_descending(entries in arb_entries()) {
            prop_assert!(entries.windows(2).all(|w| w[0].date >= w[1].date));
        }
    }
}
