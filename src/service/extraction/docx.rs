//! DOCX raw-text extraction
//!
//! Walks the document body and keeps only the text runs. Paragraphs,
//! including those inside table cells, are separated by a blank line.

use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent, TableChild,
    TableRowChild, read_docx,
};

use crate::model::DocumentFormat;
use crate::service::extraction::ExtractionError;

/// Extract the body text of a DOCX container, discarding formatting
pub fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let docx = read_docx(bytes).map_err(|e| ExtractionError::failed(DocumentFormat::Docx, e))?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => paragraphs.push(paragraph_text(paragraph)),
            DocumentChild::Table(table) => collect_table(table, &mut paragraphs),
            _ => {}
        }
    }

    Ok(paragraphs
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&paragraph.children, &mut text);
    text
}

fn push_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_children(&link.children, out),
            _ => {}
        }
    }
}

fn collect_table(table: &Table, out: &mut Vec<String>) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row;
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell;
            collect_cell(&cell.children, out);
        }
    }
}

fn collect_cell(contents: &[TableCellContent], out: &mut Vec<String>) {
    for content in contents {
        match content {
            TableCellContent::Paragraph(paragraph) => out.push(paragraph_text(paragraph)),
            TableCellContent::Table(nested) => collect_table(nested, out),
            _ => {}
        }
    }
}
