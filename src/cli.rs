//! Command line.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::field::LifeInputs;
use crate::svg::Theme;

#[derive(Parser, Debug)]
#[command(name = "lifespan")]
#[command(version, about = "Time lived and time remaining between two dates, live")]
pub struct Cli {
    /// Birth day (1-31)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub bday: String,
    /// Birth month (1-12)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub bmonth: String,
    /// Birth year (1900-2500)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub byear: String,
    /// Death day (1-31)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub dday: String,
    /// Death month (1-12)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub dmonth: String,
    /// Death year (1900-2500)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub dyear: String,

    /// Live-update period in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub tick_ms: u64,
    /// Delay before a calculation shows results, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub calc_delay_ms: u64,
    /// How long field errors stay visible, in milliseconds
    #[arg(long, default_value_t = 4000)]
    pub error_ttl_ms: u64,

    /// Print one frame and exit
    #[arg(long)]
    pub once: bool,
    /// Print one snapshot as JSON and exit
    #[arg(long)]
    pub json: bool,
    /// Write a progress card to this SVG file and exit
    #[arg(long, value_name = "PATH")]
    pub svg: Option<PathBuf>,
    /// Colour theme of the SVG card
    #[arg(long, value_enum, default_value_t = ThemeArg::Dark)]
    pub theme: ThemeArg,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

impl Cli {
    pub fn inputs(&self) -> LifeInputs {
        LifeInputs::parse([
            self.bday.as_str(),
            self.bmonth.as_str(),
            self.byear.as_str(),
            self.dday.as_str(),
            self.dmonth.as_str(),
            self.dyear.as_str(),
        ])
    }

    pub fn config(&self) -> Config {
        Config {
            tick: Duration::from_millis(self.tick_ms.max(1)),
            calc_delay: Duration::from_millis(self.calc_delay_ms),
            error_ttl: Duration::from_millis(self.error_ttl_ms),
        }
    }
}
