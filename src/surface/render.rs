//! Plain-text rendering of a volatility surface.

use super::grid::VolatilitySurface;
use std::fmt::Write;

const LABEL_WIDTH: usize = 10;
const CELL_WIDTH: usize = 10;

/// Renders the surface as a table of volatility percentages.
///
/// Rows are expiries (in days), columns are strikes. Cells without a solved
/// volatility show `-`.
#[must_use]
pub fn render_table(surface: &VolatilitySurface) -> String {
    let mut out = String::new();

    let _ = write!(out, "{:>LABEL_WIDTH$}", "T (days)");
    for strike in surface.strikes() {
        let _ = write!(out, "{:>CELL_WIDTH$.2}", strike);
    }
    out.push('\n');

    for (expiry, row) in surface.expiries().iter().zip(surface.rows()) {
        let _ = write!(out, "{:>LABEL_WIDTH$.1}", expiry * 365.0);
        for cell in row {
            match cell.outcome.volatility() {
                Some(vol) => {
                    let _ = write!(out, "{:>w$.2}%", vol * 100.0, w = CELL_WIDTH - 1);
                }
                None => {
                    let _ = write!(out, "{:>CELL_WIDTH$}", "-");
                }
            }
        }
        out.push('\n');
    }

    out
}
