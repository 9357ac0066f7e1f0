//! Terminal rendering
//!
//! Tables for the order listing and the draft parts buffer.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{details::OrderRow, parts::PartsBuffer};

/// Errors that can occur when rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to the output failed.
    #[error("failed to write output")]
    Io(#[from] io::Error),
}

/// Write the order listing as a table, or a notice when there are no rows.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if writing fails.
pub fn write_order_table(out: &mut impl io::Write, rows: &[OrderRow]) -> Result<(), RenderError> {
    if rows.is_empty() {
        writeln!(out, "No orders found")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record([
        "Number", "Date", "Customer", "Phone", "Equipment", "Status", "Priority", "Total",
    ]);

    for row in rows {
        builder.push_record([
            row.number.as_str(),
            row.date.as_str(),
            row.customer.as_str(),
            row.phone.as_str(),
            row.equipment.as_str(),
            row.status,
            row.priority,
            row.total.as_str(),
        ]);
    }

    write_table(out, builder, 7..8)
}

/// Write the parts in the draft buffer with their running total.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if writing fails.
pub fn write_parts_table(out: &mut impl io::Write, parts: &PartsBuffer) -> Result<(), RenderError> {
    if parts.is_empty() {
        writeln!(out, "No parts added")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Code", "Name", "Qty", "Unit Price", "Total"]);

    for part in parts.iter() {
        builder.push_record([
            part.code().to_string(),
            part.name().to_string(),
            part.quantity().to_string(),
            part.unit_price().to_string(),
            part.line_total().to_string(),
        ]);
    }

    write_table(out, builder, 2..5)?;

    writeln!(out, "Total: {}", parts.total())?;

    Ok(())
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric_columns: std::ops::Range<usize>,
) -> Result<(), RenderError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric_columns), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}
