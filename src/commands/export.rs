use std::path::Path;

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};
use tracing::debug;

use crate::error::{PipelineError, PipelineResult};
use crate::models::{Row, SchemaVariant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Xlsx,
    Csv,
}

impl SheetFormat {
    /// `.csv` (any case) selects CSV; everything else is written as a workbook.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => SheetFormat::Csv,
            _ => SheetFormat::Xlsx,
        }
    }
}

/// Creates or overwrites `output_path` with a header row and one line per record.
pub fn write_spreadsheet(
    rows: &[Row],
    variant: SchemaVariant,
    output_path: &Path,
) -> PipelineResult<()> {
    let columns = variant.columns();
    let format = SheetFormat::from_path(output_path);
    debug!(?format, rows = rows.len(), path = %output_path.display(), "writing spreadsheet");

    match format {
        SheetFormat::Xlsx => write_xlsx(rows, &columns, output_path),
        SheetFormat::Csv => write_csv(rows, &columns, output_path),
    }
}

fn write_xlsx(rows: &[Row], columns: &[&str], output_path: &Path) -> PipelineResult<()> {
    let to_err = |err: rust_xlsxwriter::XlsxError| PipelineError::export(output_path, err);

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, name) in columns.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as ColNum, *name, &header_format)
            .map_err(to_err)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let row_num = (index + 1) as RowNum;
        for (col, value) in row.values.iter().enumerate() {
            worksheet
                .write_string(row_num, col as ColNum, value)
                .map_err(to_err)?;
        }
    }

    workbook.save(output_path).map_err(to_err)
}

fn write_csv(rows: &[Row], columns: &[&str], output_path: &Path) -> PipelineResult<()> {
    let to_err = |err: csv::Error| PipelineError::export(output_path, err);

    let mut writer = csv::Writer::from_path(output_path).map_err(to_err)?;
    writer.write_record(columns).map_err(to_err)?;
    for row in rows {
        writer.write_record(&row.values).map_err(to_err)?;
    }
    writer
        .flush()
        .map_err(|err| PipelineError::io(output_path, err))
}
