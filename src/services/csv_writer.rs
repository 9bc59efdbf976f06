//! CSV output for product exports

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::models::ProductRow;

const SEPARATOR: char = ',';

fn needs_quotes(field: &str) -> bool {
    field.contains(SEPARATOR) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single row, quoting fields that need it
pub fn write_row<W: Write, S: AsRef<str>>(w: &mut W, row: &[S]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", SEPARATOR)?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header followed by one line per product
pub fn write_products<W: Write>(w: &mut W, rows: &[ProductRow]) -> io::Result<()> {
    write_row(w, &ProductRow::HEADERS)?;
    for row in rows {
        write_row(w, &row.cells())?;
    }
    Ok(())
}

/// Write `rows` to `path`, replacing any existing file
pub fn save_products(path: &Path, rows: &[ProductRow]) -> AppResult<()> {
    let path_str = path.display().to_string();
    let file = File::create(path).map_err(|e| AppError::file_write_failed(&path_str, e))?;
    let mut w = BufWriter::new(file);
    write_products(&mut w, rows)
        .and_then(|_| w.flush())
        .map_err(|e| AppError::file_write_failed(&path_str, e))
}
