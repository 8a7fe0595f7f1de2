use crate::domain::{Ga4Error, MergedTable, Result};
use rust_xlsxwriter::Workbook;
use std::path::Path;

const SHEET_NAME: &str = "Sheet1";

/// Writes a single-sheet workbook: header row, no index column, nulls as
/// empty cells. Cell values are written as text, exactly as received.
pub fn write_xlsx(table: &MergedTable, path: &Path) -> Result<()> {
    let fail = |e: rust_xlsxwriter::XlsxError| Ga4Error::write(path.display(), e);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(fail)?;

    for (col, name) in table.header().into_iter().enumerate() {
        worksheet
            .write_string(0, column(col, path)?, name)
            .map_err(fail)?;
    }

    for (index, row) in table.rows().iter().enumerate() {
        let excel_row = u32::try_from(index + 1)
            .map_err(|_| Ga4Error::write(path.display(), "too many rows for a worksheet"))?;

        worksheet
            .write_string(excel_row, 0, &row.key)
            .map_err(fail)?;
        for (col, value) in row.values.iter().enumerate() {
            if let Some(value) = value {
                worksheet
                    .write_string(excel_row, column(col + 1, path)?, value)
                    .map_err(fail)?;
            }
        }
    }

    workbook.save(path).map_err(fail)?;
    Ok(())
}

fn column(index: usize, path: &Path) -> Result<u16> {
    u16::try_from(index)
        .map_err(|_| Ga4Error::write(path.display(), "too many columns for a worksheet"))
}
