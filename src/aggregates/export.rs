use crate::error::{AppError, AppResult};
use crate::models::LedgerEntry;
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub const CSV_HEADER: [&str; 6] = [
    "Data",
    "Tipo",
    "Descrição",
    "Categoria",
    "Valor",
    "Forma Pagamento",
];

/// Commas in free text become semicolons so every row keeps six fields
/// without quoting; line breaks are flattened for the same reason.
fn sanitize(text: &str) -> String {
    text.replace(',', ";").replace(['\r', '\n'], " ")
}

/// Integer cents rendered as a two-decimal value (`12345` -> `123.45`).
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Renders the ledger as CSV. Output depends only on `entries`.
pub fn ledger_to_csv(entries: &[LedgerEntry]) -> AppResult<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for entry in entries {
        let category = entry
            .category
            .as_ref()
            .map(|c| sanitize(&c.name))
            .unwrap_or_default();
        let method = entry
            .payment_method
            .as_deref()
            .map(sanitize)
            .unwrap_or_default();
        writer.write_record([
            entry.date.format("%d/%m/%Y").to_string(),
            entry.kind.label().to_string(),
            sanitize(&entry.description),
            category,
            format_cents(entry.amount_cents),
            method,
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::InternalError(format!("Failed to flush CSV: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::InternalError(format!("Invalid CSV output: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::ledger::fixtures::{manual, payment};
    use crate::aggregates::ledger::merge_entries;
    use crate::entities::TransactionKind;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(12_345), "123.45");
        assert_eq!(format_cents(-250), "-2.50");
    }

    #[test]
    fn test_comma_in_description_keeps_six_fields() {
        let entries = merge_entries(
            vec![(
                manual(TransactionKind::Saida, 1_550, "2025-02-03", "Café, pão"),
                None,
            )],
            vec![],
        );
        let csv = ledger_to_csv(&entries).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Data,Tipo,Descrição,Categoria,Valor,Forma Pagamento");
        assert_eq!(lines[1], "03/02/2025,Saída,Café; pão,,15.50,pix");
        assert_eq!(lines[1].split(',').count(), 6);
    }

    #[test]
    fn test_export_is_deterministic() {
        let entries = merge_entries(
            vec![
                (manual(TransactionKind::Entrada, 10_000, "2025-03-10", "Doação"), None),
                (manual(TransactionKind::Saida, 2_000, "2025-03-01", "Velas, fósforos"), None),
            ],
            vec![payment("approved", 25_000, "2025-03-05")],
        );
        let first = ledger_to_csv(&entries).unwrap();
        let second = ledger_to_csv(&entries).unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
        assert_eq!(first.lines().count(), 4);
        assert!(first.lines().all(|l| l.split(',').count() == 6));
        assert!(first.contains("05/03/2025,Entrada,Pagamento online - Cerimônia,Pagamentos online,250.00,credit_card"));
    }

    #[test]
    fn test_empty_ledger_is_header_only() {
        let csv = ledger_to_csv(&[]).unwrap();
        assert_eq!(csv, "Data,Tipo,Descrição,Categoria,Valor,Forma Pagamento\n");
    }
}
