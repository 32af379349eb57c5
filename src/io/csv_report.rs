use crate::application::MonthlyReport;
use crate::domain::format_amount;

use super::{Currency, ExportError, display_date};

/// Render a monthly report as CSV: one row per transaction, a blank line,
/// then a summary block with the month's totals.
pub fn render_csv(report: &MonthlyReport, currency: &Currency) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let amount_header = format!("Amount ({})", currency.symbol);
    writer.write_record(["Date", "Description", "Type", amount_header.as_str()])?;

    for transaction in &report.transactions {
        writer.write_record([
            display_date(transaction.date),
            transaction.description.clone(),
            transaction.kind.label().to_string(),
            format_amount(transaction.amount),
        ])?;
    }

    let mut out = writer.into_inner().map_err(|e| e.into_error())?;
    out.push(b'\n');

    // The summary block has a different shape from the transaction rows.
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(out);
    let totals = &report.totals;
    writer.write_record(["Summary"])?;
    writer.write_record(["Total Income", currency.format(totals.income).as_str()])?;
    writer.write_record(["Total Expenses", currency.format(totals.expenses).as_str()])?;
    writer.write_record(["Balance", currency.format(totals.balance).as_str()])?;

    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MonthPeriod, Transaction, TransactionType};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn tx(id: i64, description: &str, amount: Decimal, kind: TransactionType, date: &str) -> Transaction {
        Transaction {
            id,
            description: description.into(),
            amount,
            kind,
            date: date.parse().unwrap(),
            created_at: date.parse().unwrap(),
        }
    }

    #[test]
    fn test_render_csv() {
        let report = MonthlyReport::new(
            MonthPeriod::new(2024, 3).unwrap(),
            vec![
                tx(2, "Freelance, March", dec!(50), TransactionType::Income, "2024-03-20T09:00:00Z"),
                tx(1, "Groceries", dec!(20), TransactionType::Expense, "2024-03-05T18:30:00Z"),
            ],
        ).unwrap();

        let csv = String::from_utf8(render_csv(&report, &Currency::default()).unwrap()).unwrap();
        assert_eq!(
            csv,
            "Date,Description,Type,Amount (₹)\n\
             20/3/2024,\"Freelance, March\",Income,50.00\n\
             5/3/2024,Groceries,Expense,20.00\n\
             \n\
             Summary\n\
             Total Income,₹50.00\n\
             Total Expenses,₹20.00\n\
             Balance,₹30.00\n"
        );
    }

    #[test]
    fn test_render_csv_empty_month() {
        let report = MonthlyReport::new(MonthPeriod::new(2024, 2).unwrap(), vec![]).unwrap();
        let csv = String::from_utf8(render_csv(&report, &Currency::new("$", "USD")).unwrap()).unwrap();
        assert_eq!(
            csv,
            "Date,Description,Type,Amount ($)\n\
             \n\
             Summary\n\
             Total Income,$0.00\n\
             Total Expenses,$0.00\n\
             Balance,$0.00\n"
        );
    }
}
