//! Lived and remaining lifespan between a birth date and a (projected) death
//! date, with a live countdown.

pub mod annotations;
pub mod cli;
pub mod clock;
pub mod config;
pub mod date;
pub mod driver;
pub mod duration;
pub mod error;
pub mod field;
pub mod life;
pub mod render;
pub mod session;
pub mod stats;
pub mod svg;
pub mod terminal;
pub mod validate;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use date::{DateTriple, is_valid_date};
pub use duration::{DurationBreakdown, format_duration};
pub use error::{LifespanError, ValidationError};
pub use field::{Field, LifeInputs};
pub use life::{LifeInterval, LifeStats, calc_life};
pub use session::{LiveSession, LoopState, SessionEvent};
pub use validate::validate_inputs;
