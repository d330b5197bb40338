//! The narrow surface the calculator talks to. A `Renderer` shows field
//! errors, duration cells and progress; it never computes anything. The
//! `Board` remembers what each of the twelve cells currently shows so a tick
//! only pushes the cells whose text changed.

use tokio::time::Instant;

use crate::duration::{DurationBreakdown, Unit};
use crate::error::Result;
use crate::field::{Field, LifeInputs};

pub const INVALID_NOTICE: &str = "Please enter valid dates!";
pub const FAILURE_NOTICE: &str = "An error occurred during calculation. Please check your inputs.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Lived,
    Remaining,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Lived, Section::Remaining];

    pub fn label(self) -> &'static str {
        match self {
            Section::Lived => "lived",
            Section::Remaining => "remaining",
        }
    }
}

/// One numeric display slot, e.g. `lived-seconds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub section: Section,
    pub unit: Unit,
}

impl Cell {
    pub fn new(section: Section, unit: Unit) -> Self {
        Self { section, unit }
    }

    pub fn id(&self) -> String {
        format!("{}-{}", self.section.label(), self.unit.label())
    }

    fn index(&self) -> usize {
        let s = match self.section {
            Section::Lived => 0,
            Section::Remaining => 1,
        };
        let u = Unit::ALL.iter().position(|u| *u == self.unit).unwrap_or(0);
        s * Unit::ALL.len() + u
    }
}

pub trait Renderer {
    fn clear_field_errors(&mut self) -> Result<()>;

    fn show_field_error(&mut self, field: Field, message: &str) -> Result<()>;

    /// Drops the error on one field, e.g. because the user edited it.
    fn clear_field_error(&mut self, field: Field) -> Result<()>;

    /// The field values changed.
    fn show_inputs(&mut self, _inputs: &LifeInputs) -> Result<()> {
        Ok(())
    }

    /// Earliest moment something on screen goes stale without any other
    /// update, such as a field error reaching the end of its window.
    fn next_expiry(&self) -> Option<Instant> {
        None
    }

    /// Sets the text of one cell. `highlight` asks for a brief flash.
    fn render_cell(&mut self, cell: Cell, text: &str, highlight: bool) -> Result<()>;

    fn render_progress(&mut self, fill: f64, text: &str) -> Result<()>;

    /// Whole-breakdown update, no highlight.
    fn render_breakdown(&mut self, section: Section, breakdown: &DurationBreakdown) -> Result<()> {
        for unit in Unit::ALL {
            let text = breakdown.get(unit).to_string();
            self.render_cell(Cell::new(section, unit), &text, false)?;
        }
        Ok(())
    }

    fn set_busy(&mut self, _busy: bool) -> Result<()> {
        Ok(())
    }

    fn set_results_visible(&mut self, _visible: bool) -> Result<()> {
        Ok(())
    }

    /// A one-off message for the user, outside any field.
    fn notify(&mut self, message: &str) -> Result<()>;

    /// Called once all updates of a step are pushed.
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Texts currently displayed in the twelve cells.
#[derive(Debug, Clone, Default)]
pub struct Board {
    shown: [Option<String>; 12],
}

impl Board {
    /// Records a full redraw.
    pub fn fill(&mut self, lived: &DurationBreakdown, remaining: &DurationBreakdown) {
        for (cell, text) in cells(lived, remaining) {
            self.shown[cell.index()] = Some(text);
        }
    }

    /// Records the new values and returns the cells whose text changed.
    pub fn diff(
        &mut self,
        lived: &DurationBreakdown,
        remaining: &DurationBreakdown,
    ) -> Vec<(Cell, String)> {
        let mut changed = Vec::new();
        for (cell, text) in cells(lived, remaining) {
            let slot = &mut self.shown[cell.index()];
            if slot.as_deref() != Some(text.as_str()) {
                *slot = Some(text.clone());
                changed.push((cell, text));
            }
        }
        changed
    }

    pub fn reset(&mut self) {
        self.shown = Default::default();
    }
}

fn cells(lived: &DurationBreakdown, remaining: &DurationBreakdown) -> Vec<(Cell, String)> {
    Section::ALL
        .into_iter()
        .flat_map(|section| {
            let breakdown = match section {
                Section::Lived => lived,
                Section::Remaining => remaining,
            };
            Unit::ALL
                .into_iter()
                .map(move |unit| (Cell::new(section, unit), breakdown.get(unit).to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::format_duration;

    #[test]
    fn cell_ids_match_display_slots() {
        assert_eq!(Cell::new(Section::Lived, Unit::Seconds).id(), "lived-seconds");
        assert_eq!(Cell::new(Section::Remaining, Unit::Years).id(), "remaining-years");
    }

    #[test]
    fn diff_reports_only_changed_cells() {
        let mut board = Board::default();
        let lived = format_duration(90_061_000);
        let remaining = format_duration(1_000_000_000);

        assert_eq!(board.diff(&lived, &remaining).len(), 12);
        assert!(board.diff(&lived, &remaining).is_empty());

        let lived2 = format_duration(90_062_000);
        let remaining2 = format_duration(999_999_000);
        let changed = board.diff(&lived2, &remaining2);
        let ids: Vec<String> = changed.iter().map(|(c, _)| c.id()).collect();
        assert_eq!(ids, vec!["lived-seconds", "remaining-seconds"]);
        assert_eq!(changed[0].1, "2");
    }

    #[test]
    fn fill_then_diff_is_quiet() {
        let mut board = Board::default();
        let lived = format_duration(5_000);
        let remaining = format_duration(7_000);
        board.fill(&lived, &remaining);
        assert!(board.diff(&lived, &remaining).is_empty());
        board.reset();
        assert_eq!(board.diff(&lived, &remaining).len(), 12);
    }
}
