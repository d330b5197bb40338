//! The live countdown. A `LiveSession` owns everything the calculation and
//! its refresh loop need: the field values, the last validated interval, the
//! displayed cells and the single tick timer.
//!
//! Loop states:
//!   Idle   -> Active  on a successful calculation, or when the view becomes
//!                     visible again while results are shown
//!   Active -> Idle    on hide, back, unload, or any failure inside a tick
//!
//! Starting always replaces the previous timer, so there is never more than
//! one loop. Each tick re-reads the stored field values; when they stop
//! validating (mid-edit, say) the tick counts against the last validated
//! interval instead.

use chrono::NaiveDateTime;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::clock::Clock;
use crate::config::Config;
use crate::duration::{Unit, format_duration};
use crate::error::{Result, ValidationError};
use crate::field::{Field, LifeInputs};
use crate::life::{LifeInterval, LifeStats};
use crate::render::{Board, FAILURE_NOTICE, INVALID_NOTICE, Renderer, Section};
use crate::validate::validate_inputs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Active,
}

/// Signals coming from the presentation side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Run the calculation again with the current field values
    Recalculate,
    /// The view went out of sight
    Hidden,
    /// The view is in sight again
    Visible,
    /// The user left the results view
    Back,
    /// The program is shutting down
    Unload,
    /// A field was edited; `None` means it was emptied or holds no number
    Edit(Field, Option<i64>),
}

pub struct LiveSession<R, C> {
    config: Config,
    renderer: R,
    clock: C,
    inputs: LifeInputs,
    interval: Option<LifeInterval>,
    board: Board,
    ticker: Option<Interval>,
    results_visible: bool,
}

impl<R: Renderer, C: Clock> LiveSession<R, C> {
    pub fn new(config: Config, renderer: R, clock: C, inputs: LifeInputs) -> Self {
        Self {
            config,
            renderer,
            clock,
            inputs,
            interval: None,
            board: Board::default(),
            ticker: None,
            results_visible: false,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn inputs(&self) -> &LifeInputs {
        &self.inputs
    }

    /// Replaces the field values. Ticks pick them up from then on.
    pub fn set_inputs(&mut self, inputs: LifeInputs) -> Result<()> {
        self.inputs = inputs;
        self.renderer.show_inputs(&self.inputs)
    }

    /// Edits one field and drops that field's error, like typing into it.
    pub fn edit(&mut self, field: Field, value: Option<i64>) -> Result<()> {
        let mut inputs = self.inputs;
        inputs.set(field, value);
        self.set_inputs(inputs)?;
        self.renderer.clear_field_error(field)?;
        self.renderer.present()
    }

    /// The last interval that passed validation.
    pub fn interval(&self) -> Option<LifeInterval> {
        self.interval
    }

    pub fn results_visible(&self) -> bool {
        self.results_visible
    }

    pub fn state(&self) -> LoopState {
        if self.ticker.is_some() {
            LoopState::Active
        } else {
            LoopState::Idle
        }
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Clears old annotations, validates the fields and annotates every
    /// failed rule. Returns whether the inputs are valid.
    pub fn validate(&mut self) -> Result<bool> {
        Ok(self.annotated_interval()?.is_some())
    }

    fn annotated_interval(&mut self) -> Result<Option<LifeInterval>> {
        self.renderer.clear_field_errors()?;

        match validate_inputs(&self.inputs, self.now()) {
            Ok(interval) => Ok(Some(interval)),
            Err(errors) => {
                self.annotate(&errors)?;
                Ok(None)
            }
        }
    }

    fn annotate(&mut self, errors: &[ValidationError]) -> Result<()> {
        for err in errors {
            debug!(field = %err.field(), "{err}");
            self.renderer.show_field_error(err.field(), &err.to_string())?;
        }
        Ok(())
    }

    /// Validates with annotations, then computes stats at the current instant.
    pub fn calc_life(&mut self) -> Result<Option<LifeStats>> {
        let Some(interval) = self.annotated_interval()? else {
            return Ok(None);
        };
        self.interval = Some(interval);
        Ok(Some(interval.stats_at(self.now())))
    }

    /// The one-shot calculation: busy, wait, compute and show, not busy.
    /// Unexpected failures are logged and turned into a notice.
    pub async fn calculate(&mut self) -> Result<Option<LifeStats>> {
        info!("calculating");
        self.renderer.set_busy(true)?;
        self.renderer.present()?;

        time::sleep(self.config.calc_delay).await;

        let outcome = self.show_result();
        self.renderer.set_busy(false)?;

        let stats = match outcome {
            Ok(stats) => stats,
            Err(e) => {
                error!("calculation error: {e}");
                self.renderer.notify(FAILURE_NOTICE)?;
                None
            }
        };
        self.renderer.present()?;
        Ok(stats)
    }

    /// Computes and renders everything, then starts the live loop.
    pub fn show_result(&mut self) -> Result<Option<LifeStats>> {
        let Some(stats) = self.calc_life()? else {
            self.renderer.notify(INVALID_NOTICE)?;
            return Ok(None);
        };

        let lived = format_duration(stats.lived_ms);
        let remaining = format_duration(stats.remaining_ms);

        self.board.reset();
        self.renderer.render_breakdown(Section::Lived, &lived)?;
        self.renderer.render_breakdown(Section::Remaining, &remaining)?;
        self.board.fill(&lived, &remaining);
        self.renderer
            .render_progress(stats.fill(), &stats.progress_text())?;

        self.renderer.set_results_visible(true)?;
        self.results_visible = true;

        info!(
            percentage = stats.percentage_lived,
            "lived {lived}, remaining {remaining}"
        );

        self.start();
        Ok(Some(stats))
    }

    /// Starts ticking, replacing any running loop.
    pub fn start(&mut self) {
        if self.ticker.is_some() {
            debug!("replacing running live update");
        }
        let period = self.config.tick;
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.ticker = Some(ticker);
        info!(period_ms = period.as_millis() as u64, "live update started");
    }

    pub fn stop(&mut self) {
        if self.ticker.take().is_some() {
            info!("live update stopped");
        }
    }

    /// Resolves at the next tick; never resolves while idle.
    pub async fn next_tick(&mut self) {
        match self.ticker.as_mut() {
            Some(ticker) => {
                ticker.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }

    /// When the display next needs a redraw on its own, e.g. an error expiring.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.renderer.next_expiry()
    }

    /// Redraws once an annotation window has run out.
    pub fn on_expiry(&mut self) -> Result<()> {
        self.renderer.present()
    }

    /// One tick. A failure stops the loop instead of being retried.
    pub fn on_tick(&mut self) {
        if let Err(e) = self.refresh() {
            error!("error in live update: {e}");
            self.stop();
            // Some cells may not have been drawn; redraw all on restart
            self.board.reset();
        }
    }

    fn refresh(&mut self) -> Result<()> {
        let now = self.now();

        // Silent re-validation: ticks never touch the annotations
        match validate_inputs(&self.inputs, now) {
            Ok(interval) => self.interval = Some(interval),
            Err(errors) => {
                debug!(?errors, "stored inputs do not validate, using last interval");
            }
        }
        let Some(interval) = self.interval else {
            return Ok(());
        };
        let stats = interval.stats_at(now);

        let lived = format_duration(stats.lived_ms);
        let remaining = format_duration(stats.remaining_ms);

        for (cell, text) in self.board.diff(&lived, &remaining) {
            let highlight = cell.unit == Unit::Seconds;
            self.renderer.render_cell(cell, &text, highlight)?;
        }
        self.renderer
            .render_progress(stats.fill(), &stats.progress_text())?;
        self.renderer.present()
    }

    /// Applies a presentation event. Returns false once the session is over.
    pub async fn handle(&mut self, event: SessionEvent) -> Result<bool> {
        debug!(?event, "session event");
        match event {
            SessionEvent::Recalculate => {
                self.calculate().await?;
            }
            SessionEvent::Hidden => self.stop(),
            SessionEvent::Visible => {
                if self.results_visible {
                    self.start();
                }
            }
            SessionEvent::Back => {
                self.stop();
                self.results_visible = false;
                self.renderer.set_results_visible(false)?;
                self.renderer.present()?;
            }
            SessionEvent::Unload => {
                self.stop();
                return Ok(false);
            }
            SessionEvent::Edit(field, value) => self.edit(field, value)?,
        }
        Ok(true)
    }
}
