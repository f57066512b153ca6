//! Text rendering of the view.
//!
//! `render` turns a `ViewState` into a `Page`, a plain value tests can
//! inspect cell by cell. `Page` implements `Display` as an aligned table.

use std::fmt;

use machines_core::Machine;

use crate::state::ViewState;

pub const TITLE: &str = "Remote Machines";
pub const COLUMNS: [&str; 3] = ["IP Address", "Description", "Contact Info"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub ip_address: String,
    pub contact_info: String,
    /// Lines of the error panel; `None` when no error is displayed.
    pub error: Option<Vec<String>>,
    pub rows: Vec<[String; 3]>,
}

pub fn render(state: &ViewState) -> Page {
    let error = state.error().map(|error| {
        let mut lines = vec![error.message.clone()];
        if let Some(status) = error.status {
            lines.push(format!("Status: {status}"));
        }
        if let Some(data) = error.data.as_deref().filter(|d| !d.is_empty()) {
            lines.push(format!("Detail: {data}"));
        }
        lines
    });

    Page {
        ip_address: state.ip_address().to_string(),
        contact_info: state.contact_info().to_string(),
        error,
        rows: state.machines().iter().map(row).collect(),
    }
}

fn row(machine: &Machine) -> [String; 3] {
    [
        machine.ip_address.clone(),
        machine.description.clone().unwrap_or_default(),
        machine.contact_info.clone(),
    ]
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TITLE}")?;
        writeln!(f)?;
        writeln!(f, "IP Address:   [{}]", self.ip_address)?;
        writeln!(f, "Contact Info: [{}]", self.contact_info)?;

        if let Some(lines) = &self.error {
            writeln!(f)?;
            for line in lines {
                writeln!(f, "{line}")?;
            }
        }

        let mut widths = COLUMNS.map(|c| c.chars().count());
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        writeln!(f)?;
        write_row(f, &COLUMNS, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;
        for row in &self.rows {
            write_row(f, row, &widths)?;
        }
        Ok(())
    }
}

fn write_row<S: AsRef<str>>(
    f: &mut fmt::Formatter<'_>,
    cells: &[S; 3],
    widths: &[usize; 3],
) -> fmt::Result {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect();
    writeln!(f, "{}", padded.join(" | ").trim_end())
}
