use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

use crate::application::MonthlyReport;

use super::layout::{PAGE_HEIGHT, PAGE_WIDTH, Page, PageLayout, TextStyle};
use super::{Currency, ExportError, display_date, win_ansi};

const REPORT_TITLE: &str = "Monthly Income & Expense Report";
const EMPTY_MONTH: &str = "No transactions for this month.";

/// Lay out a monthly report: title, month, summary totals, then one block per transaction.
pub fn layout_report(report: &MonthlyReport, currency: &Currency) -> Vec<Page> {
    let mut doc = PageLayout::new();

    doc.font_size(20.0).text(REPORT_TITLE, TextStyle::centered());
    doc.move_down(1.0);
    doc.font_size(16.0)
        .text(&report.period.label(), TextStyle::centered());
    doc.move_down(2.0);

    let totals = &report.totals;
    doc.font_size(14.0)
        .text("Summary", TextStyle::left().underlined());
    doc.move_down(0.5);
    doc.font_size(12.0);
    for (label, amount) in [
        ("Total Income", totals.income),
        ("Total Expenses", totals.expenses),
        ("Balance", totals.balance),
    ] {
        doc.text(
            &format!("{label}: {}", currency.format_for_document(amount)),
            TextStyle::indented(20.0),
        );
    }
    doc.move_down(2.0);

    doc.font_size(14.0)
        .text("Transactions", TextStyle::left().underlined());
    doc.move_down(0.5);

    if report.is_empty() {
        doc.font_size(12.0)
            .text(EMPTY_MONTH, TextStyle::indented(20.0));
    } else {
        doc.font_size(10.0);
        let count = report.transactions.len();
        for (index, tx) in report.transactions.iter().enumerate() {
            doc.text(
                &format!("{} - {}", display_date(tx.date), tx.kind.label()),
                TextStyle::indented(20.0),
            );
            doc.text(
                &format!(
                    "{}: {}{}",
                    tx.description,
                    tx.kind.sign(),
                    currency.format_for_document(tx.amount)
                ),
                TextStyle::indented(40.0),
            );
            if index + 1 < count {
                doc.move_down(0.3);
            }
        }
    }

    doc.into_pages()
}

/// Render a monthly report as a PDF document.
pub fn render_pdf(report: &MonthlyReport, currency: &Currency) -> Result<Vec<u8>, ExportError> {
    let pages = layout_report(report, currency);
    let title = format!("{} - {}", REPORT_TITLE, report.period.label());
    write_pdf(&pages, &title)
}

fn page_operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::new();
    for line in &page.lines {
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec!["F1".into(), line.size.into()]));
        ops.push(Operation::new("Td", vec![line.x.into(), line.baseline.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(win_ansi::encode(&line.text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));

        if line.underline {
            let y = line.baseline - line.size * 0.15;
            ops.push(Operation::new("w", vec![(line.size / 20.0).into()]));
            ops.push(Operation::new("m", vec![line.x.into(), y.into()]));
            ops.push(Operation::new("l", vec![(line.x + line.width).into(), y.into()]));
            ops.push(Operation::new("S", vec![]));
        }
    }
    ops
}

fn write_pdf(pages: &[Page], title: &str) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(title),
        "Producer" => Object::string_literal(concat!("pocketbook ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
