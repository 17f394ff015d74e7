// src/report/pdf.rs

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::error::AppError;
use crate::models::record::TestRecord;

/// Renders the full record set as a paginated A4 PDF at `path`,
/// overwriting any previous report.
///
/// One block per record: date, subject, chapter, marks and remarks.
/// A new page starts whenever fewer than 60mm remain below the cursor,
/// which always fits the next block.
pub fn render_report(records: &[TestRecord], path: &Path) -> Result<(), AppError> {
    let (doc, page, layer) = PdfDocument::new("Test Report", Mm(210.0), Mm(297.0), "Layer 1");

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_err)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_err)?;

    let mut current = doc.get_page(page).get_layer(layer);
    current.use_text("Test Report", 18.0, Mm(20.0), Mm(287.0), &bold);

    let mut y = 277.0;
    for record in records {
        if y < 60.0 {
            let (next_page, next_layer) = doc.add_page(Mm(210.0), Mm(297.0), "Layer 1");
            current = doc.get_page(next_page).get_layer(next_layer);
            y = 277.0;
        }

        let mut lines = vec![
            format!("Date: {}", record.date),
            format!("Subject: {}", record.subject),
            format!("Chapter: {}", record.chapter),
            format!("Marks: {} / {}", record.marks_scored, record.marks_total),
        ];
        if let Some(remarks) = &record.remarks {
            lines.push(format!("Remarks: {}", remarks));
        }

        for line in &lines {
            current.use_text(line.as_str(), 12.0, Mm(20.0), Mm(y), &font);
            y -= 7.0;
        }
        y -= 4.0;
    }

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file)).map_err(pdf_err)?;
    Ok(())
}

fn pdf_err<E: std::fmt::Display>(err: E) -> AppError {
    AppError::InternalServerError(format!("pdf rendering failed: {}", err))
}
