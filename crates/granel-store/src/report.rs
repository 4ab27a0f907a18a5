//! # CSV Financial Report
//!
//! Semicolon-delimited export of the filtered period, one row per ledger
//! record:
//!
//! ```text
//! DATA;TIPO;CATEGORIA;DESCRICAO;VALOR_ENTRADA;VALOR_SAIDA
//! 10/03/2024 14:32;VENDA;Vendas;Venda (3 itens);45,90;0
//! 10/03/2024 16:05;DESPESA;Fornecedores;Frete;0;15,00
//! ```
//!
//! Amounts use comma decimal separators (pt-BR spreadsheets); the unused
//! side of each row is a literal `0`.

use csv::WriterBuilder;

use crate::error::{StoreError, StoreResult};
use granel_core::ledger::{expenses_in_range, merge_entries, sales_in_range, EntryKind};
use granel_core::{DateRange, Expense, Money, Sale};

const HEADER: [&str; 6] = [
    "DATA",
    "TIPO",
    "CATEGORIA",
    "DESCRICAO",
    "VALOR_ENTRADA",
    "VALOR_SAIDA",
];

/// Renders the financial report for `range` as a CSV string.
///
/// Sale rows come first, then expense rows, each newest first within the
/// merged listing order.
pub fn financial_report_csv(
    sales: &[Sale],
    expenses: &[Expense],
    range: DateRange,
) -> StoreResult<String> {
    let sales_filtered = sales_in_range(sales, range);
    let expenses_filtered = expenses_in_range(expenses, range);

    let mut writer = WriterBuilder::new().delimiter(b';').from_writer(vec![]);
    writer
        .write_record(HEADER)
        .map_err(|e| StoreError::Report(e.to_string()))?;

    // Sale rows, then expense rows
    let mut entries = merge_entries(&sales_filtered, &[]);
    entries.extend(merge_entries(&[], &expenses_filtered));

    for entry in entries {
        let (inflow, outflow) = match entry.kind {
            EntryKind::Sale => (
                Money::from_cents(entry.inflow_cents).to_decimal_comma(),
                "0".to_string(),
            ),
            EntryKind::Expense => (
                "0".to_string(),
                Money::from_cents(entry.outflow_cents).to_decimal_comma(),
            ),
        };
        let kind = match entry.kind {
            EntryKind::Sale => "VENDA",
            EntryKind::Expense => "DESPESA",
        };
        writer
            .write_record([
                entry.created_at.format("%d/%m/%Y %H:%M").to_string(),
                kind.to_string(),
                entry.category,
                entry.description,
                inflow,
                outflow,
            ])
            .map_err(|e| StoreError::Report(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::Report(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| StoreError::Report(e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use granel_core::PaymentMethod;

    fn sale_on(day: &str, total: i64) -> Sale {
        let created_at: DateTime<Utc> = format!("{day}T14:32:00Z").parse().unwrap();
        Sale {
            id: format!("s-{total}"),
            created_at,
            lines: Vec::new(),
            total_cents: total,
            cost_cents: 0,
            profit_cents: total,
            method: PaymentMethod::Cash,
        }
    }

    fn expense_on(day: &str, value: i64, category: &str, description: &str) -> Expense {
        let created_at: DateTime<Utc> = format!("{day}T16:05:00Z").parse().unwrap();
        Expense {
            id: format!("e-{value}"),
            created_at,
            description: description.to_string(),
            value_cents: value,
            category: category.to_string(),
        }
    }

    #[test]
    fn test_report_layout() {
        let sales = vec![sale_on("2024-03-10", 4590)];
        let expenses = vec![expense_on("2024-03-10", 1500, "Fornecedores", "Frete")];
        let range = DateRange::single_day("2024-03-10".parse().unwrap());

        let csv = financial_report_csv(&sales, &expenses, range).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "DATA;TIPO;CATEGORIA;DESCRICAO;VALOR_ENTRADA;VALOR_SAIDA"
        );
        assert_eq!(lines[1], "10/03/2024 14:32;VENDA;Vendas;Venda (0 itens);45,90;0");
        assert_eq!(lines[2], "10/03/2024 16:05;DESPESA;Fornecedores;Frete;0;15,00");
    }

    #[test]
    fn test_report_respects_range() {
        let sales = vec![sale_on("2024-03-09", 1000), sale_on("2024-03-10", 2000)];
        let range = DateRange::single_day("2024-03-10".parse().unwrap());

        let csv = financial_report_csv(&sales, &[], range).unwrap();
        assert!(!csv.contains("10,00"));
        assert!(csv.contains("20,00"));
    }

    #[test]
    fn test_uncategorized_expense_defaults() {
        let expenses = vec![expense_on("2024-03-10", 700, "", "Troco perdido")];
        let range = DateRange::single_day("2024-03-10".parse().unwrap());

        let csv = financial_report_csv(&[], &expenses, range).unwrap();
        assert!(csv.contains(";DESPESA;Outros;Troco perdido;0;7,00"));
    }
}
