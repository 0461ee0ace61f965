//! Serializes a [`Manifest`] into `.docx` bytes.

use std::io::Cursor;

use docx_rs::{
  AlignmentType, Docx, LineSpacing, Paragraph, Run, Shading, Table, TableCell, TableRow,
  VAlignType, WidthType,
};

use crate::{
  Error, Result,
  manifest::{Header, Manifest},
};

/// Background of the column header row.
pub const HEADER_FILL: &str = "76c157";
const HEADER_TEXT: &str = "FFFFFF";

// Sizes are in half-points.
const TITLE_SIZE: usize = 48;
const DETAIL_SIZE: usize = 24;
const CELL_SIZE: usize = 20;

/// Render `manifest` as a single-section Word document.
pub fn render(manifest: &Manifest) -> Result<Vec<u8>> {
  let mut doc = Docx::new();

  if let Some(header) = &manifest.header {
    doc = header_paragraphs(header)
      .into_iter()
      .fold(doc, |doc, p| doc.add_paragraph(p));
  }

  doc = doc.add_table(table(manifest));

  let mut buf = Cursor::new(Vec::new());
  doc
    .build()
    .pack(&mut buf)
    .map_err(|e| Error::Package(Box::new(e)))?;
  Ok(buf.into_inner())
}

fn header_paragraphs(header: &Header) -> Vec<Paragraph> {
  let title = Paragraph::new()
    .add_run(Run::new().add_text(header.title).size(TITLE_SIZE).bold())
    .align(AlignmentType::Center)
    .line_spacing(LineSpacing::new().after(240));

  let details = header.lines.iter().map(|line| {
    Paragraph::new()
      .add_run(Run::new().add_text(line.label).size(DETAIL_SIZE))
      .add_run(Run::new().add_text(&line.value).size(DETAIL_SIZE))
      .line_spacing(LineSpacing::new().before(60).after(60))
  });

  std::iter::once(title)
    .chain(details)
    .chain(std::iter::once(Paragraph::new()))
    .collect()
}

fn table(manifest: &Manifest) -> Table {
  let head = TableRow::new(
    manifest
      .columns
      .iter()
      .map(|label| {
        TableCell::new()
          .add_paragraph(
            Paragraph::new()
              .add_run(
                Run::new()
                  .add_text(label.to_uppercase())
                  .size(CELL_SIZE)
                  .bold()
                  .color(HEADER_TEXT),
              )
              .align(AlignmentType::Center),
          )
          .shading(Shading::new().fill(HEADER_FILL))
          .vertical_align(VAlignType::Center)
      })
      .collect(),
  );

  let body = manifest.rows.iter().map(|row| {
    TableRow::new(
      row
        .iter()
        .map(|value| {
          TableCell::new()
            .add_paragraph(
              Paragraph::new()
                .add_run(Run::new().add_text(value).size(CELL_SIZE))
                .align(AlignmentType::Center),
            )
            .vertical_align(VAlignType::Center)
        })
        .collect(),
    )
  });

  Table::new(std::iter::once(head).chain(body).collect()).width(5000, WidthType::Pct)
}
