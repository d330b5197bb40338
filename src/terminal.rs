//! Terminal presentation of the countdown.
//!
//! Keeps its own copy of what is on screen and redraws the whole frame on
//! `present`, the way a watch-style command does.

use owo_colors::OwoColorize;
use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;
use tokio::time::Instant;

use crate::annotations::Annotations;
use crate::duration::Unit;
use crate::error::Result;
use crate::field::{Field, LifeInputs};
use crate::render::{Cell, Renderer, Section};

const BAR_WIDTH: usize = 40;
const CALC_LABEL: &str = "Calculate Life Journey";
const BUSY_LABEL: &str = "Calculating...";

pub struct TerminalRenderer<W: Write> {
    out: W,
    /// Clear the screen before each frame
    clear_screen: bool,
    /// Coloured output
    color: bool,
    inputs: LifeInputs,
    cells: HashMap<Cell, String>,
    highlighted: Vec<Cell>,
    progress: Option<(f64, String)>,
    errors: Annotations,
    notice: Option<String>,
    busy: bool,
    results_visible: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, inputs: LifeInputs, error_ttl: Duration) -> Self {
        Self {
            out,
            clear_screen: true,
            color: true,
            inputs,
            cells: HashMap::new(),
            highlighted: Vec::new(),
            progress: None,
            errors: Annotations::new(error_ttl),
            notice: None,
            busy: false,
            results_visible: false,
        }
    }

    /// Plain frames: no screen clearing, no colour. Used for one-shot output.
    pub fn plain(mut self) -> Self {
        self.clear_screen = false;
        self.color = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn input_line(&self) -> String {
        let show = |field: Field| {
            self.inputs
                .get(field)
                .map(|v| field.format_value(v))
                .unwrap_or_else(|| "--".to_string())
        };
        format!(
            "Birth {}/{}/{}   Death {}/{}/{}",
            show(Field::BirthDay),
            show(Field::BirthMonth),
            show(Field::BirthYear),
            show(Field::DeathDay),
            show(Field::DeathMonth),
            show(Field::DeathYear),
        )
    }

    fn section_line(&self, section: Section) -> String {
        let mut line = format!("{:<10}", section.label());
        for unit in Unit::ALL {
            let cell = Cell::new(section, unit);
            let value = self.cells.get(&cell).map(String::as_str).unwrap_or("0");
            let value = format!("{value:>4}");
            let value = if self.color && self.highlighted.contains(&cell) {
                value.bright_blue().to_string()
            } else {
                value
            };
            line.push_str(&format!("{value} {}  ", unit.label()));
        }
        line.trim_end().to_string()
    }

    fn progress_line(&self) -> Option<String> {
        let (fill, text) = self.progress.as_ref()?;
        let filled = ((fill.clamp(0.0, 1.0)) * BAR_WIDTH as f64).round() as usize;
        let bar = format!(
            "{}{}",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH.saturating_sub(filled))
        );
        Some(format!("[{bar}] {text}"))
    }

    fn frame(&mut self) -> Vec<String> {
        let mut lines = vec![self.input_line(), String::new()];

        if self.results_visible {
            lines.push(self.section_line(Section::Lived));
            lines.push(self.section_line(Section::Remaining));
            lines.push(String::new());
            if let Some(progress) = self.progress_line() {
                lines.push(progress);
            }
        } else {
            lines.push("No results shown.".to_string());
        }

        let color = self.color;
        for (field, message) in self.errors.active(Instant::now()) {
            let line = format!("{field}: {message}");
            lines.push(if color { line.red().to_string() } else { line });
        }

        if let Some(notice) = &self.notice {
            lines.push(notice.clone());
        }

        let label = if self.busy { BUSY_LABEL } else { CALC_LABEL };
        lines.push(String::new());
        lines.push(format!(
            "[c] {label}  [bday=14] edit  [p] pause  [r] resume  [b] back  [q] quit"
        ));
        lines
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear_field_errors(&mut self) -> Result<()> {
        self.errors.clear_all();
        self.notice = None;
        Ok(())
    }

    fn show_field_error(&mut self, field: Field, message: &str) -> Result<()> {
        self.errors.show(field, message, Instant::now());
        Ok(())
    }

    fn clear_field_error(&mut self, field: Field) -> Result<()> {
        self.errors.clear(field);
        Ok(())
    }

    fn show_inputs(&mut self, inputs: &LifeInputs) -> Result<()> {
        self.inputs = *inputs;
        Ok(())
    }

    fn next_expiry(&self) -> Option<Instant> {
        self.errors.next_expiry()
    }

    fn render_cell(&mut self, cell: Cell, text: &str, highlight: bool) -> Result<()> {
        self.cells.insert(cell, text.to_string());
        if highlight {
            self.highlighted.push(cell);
        }
        Ok(())
    }

    fn render_progress(&mut self, fill: f64, text: &str) -> Result<()> {
        self.progress = Some((fill, text.to_string()));
        Ok(())
    }

    fn set_busy(&mut self, busy: bool) -> Result<()> {
        self.busy = busy;
        Ok(())
    }

    fn set_results_visible(&mut self, visible: bool) -> Result<()> {
        self.results_visible = visible;
        Ok(())
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        self.notice = Some(message.to_string());
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        let lines = self.frame();
        if self.clear_screen {
            // Clear screen, cursor home
            write!(self.out, "\x1b[2J\x1b[H")?;
        }
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        // Highlight lasts one frame
        self.highlighted.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::format_duration;

    fn renderer() -> TerminalRenderer<Vec<u8>> {
        TerminalRenderer::new(
            Vec::new(),
            LifeInputs::new(7, 3, 1990, 7, 3, 2070),
            Duration::from_secs(4),
        )
        .plain()
    }

    fn text(r: TerminalRenderer<Vec<u8>>) -> String {
        String::from_utf8(r.into_inner()).unwrap()
    }

    #[tokio::test]
    async fn frame_shows_cells_and_progress() {
        let mut r = renderer();
        r.render_breakdown(Section::Lived, &format_duration(90_061_000))
            .unwrap();
        r.render_progress(0.5, "50% Complete").unwrap();
        r.set_results_visible(true).unwrap();
        r.present().unwrap();

        let out = text(r);
        assert!(out.contains("Birth 07/03/1990   Death 07/03/2070"));
        assert!(out.contains("lived"));
        assert!(out.contains("   1 seconds"));
        assert!(out.contains(&format!("[{}{}] 50% Complete", "#".repeat(20), "-".repeat(20))));
        assert!(out.contains(CALC_LABEL));
    }

    #[tokio::test]
    async fn frame_lists_errors_and_busy_label() {
        let mut r = renderer();
        r.show_field_error(Field::BirthDay, "Invalid birth date").unwrap();
        r.set_busy(true).unwrap();
        r.present().unwrap();

        let out = text(r);
        assert!(out.contains("bday: Invalid birth date"));
        assert!(out.contains(BUSY_LABEL));
        assert!(out.contains("No results shown."));
    }

    #[tokio::test]
    async fn edited_field_loses_its_error_and_is_padded() {
        let mut r = renderer();
        r.show_field_error(Field::BirthDay, "Invalid birth date").unwrap();
        r.show_field_error(Field::DeathYear, "Life span must be at least 1 year")
            .unwrap();
        r.clear_field_error(Field::BirthDay).unwrap();
        r.show_inputs(&LifeInputs::new(4, 11, 1990, 7, 3, 2070)).unwrap();
        r.present().unwrap();

        let out = text(r);
        assert!(!out.contains("Invalid birth date"));
        assert!(out.contains("Life span must be at least 1 year"));
        assert!(out.contains("Birth 04/11/1990"));
    }

    #[tokio::test(start_paused = true)]
    async fn errors_clear_after_their_window() {
        let mut r = renderer();
        r.show_field_error(Field::DeathYear, "Life span must be at least 1 year")
            .unwrap();
        assert_eq!(r.next_expiry(), Some(Instant::now() + Duration::from_secs(4)));
        tokio::time::advance(Duration::from_secs(5)).await;
        r.present().unwrap();
        assert!(!text(r).contains("Life span"));
    }
}
