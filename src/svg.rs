//! Themed SVG progress card.

use crate::duration::DurationBreakdown;
use crate::stats::Snapshot;

const START_Y: i32 = 30;
const LINE_HEIGHT: i32 = 20;
const LEFT_PADDING: f32 = 15.0;
const RIGHT_PADDING: f32 = 30.0;
const CHAR_WIDTH: f32 = 9.6;
const MIN_COL_CHARS: usize = 50;
const BAR_HEIGHT: f32 = 14.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub key: &'static str,
    pub value: &'static str,
    pub cc: &'static str,
    pub fill: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#161b22",
                text: "#c9d1d9",
                key: "#ffa657",
                value: "#a5d6ff",
                cc: "#616e7f",
                fill: "#60a5fa",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                text: "#24292f",
                key: "#d73a49",
                value: "#0366d6",
                cc: "#6a737d",
                fill: "#0366d6",
            },
        }
    }
}

// Utilities for building SVG content

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn build_stat_row(key: &str, value: &str, align_width: usize) -> (String, String, String) {
    let key_part = format!("{key}: ");
    let base_len = key_part.len() + value.len();
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => ".".repeat(n),
    };

    (key_part, dots, value.to_string())
}

fn build_header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(base.len()) + 2;
    format!("{base}{}", "-".repeat(dash_count))
}

fn clock_value(b: &DurationBreakdown) -> String {
    format!("{:02}:{:02}:{:02}", b.hours, b.minutes, b.seconds)
}

enum Line {
    Header(String),
    Blank,
    Stat(String, String),
}

fn card_lines(snapshot: &Snapshot) -> Vec<Line> {
    vec![
        Line::Header("lifespan".to_string()),
        Line::Stat("Born".into(), snapshot.birth.clone()),
        Line::Stat("Death".into(), snapshot.death.clone()),
        Line::Blank,
        Line::Header("- Lived".to_string()),
        Line::Stat("Calendar".into(), snapshot.lived.to_string()),
        Line::Stat("Clock".into(), clock_value(&snapshot.lived)),
        Line::Blank,
        Line::Header("- Remaining".to_string()),
        Line::Stat("Calendar".into(), snapshot.remaining.to_string()),
        Line::Stat("Clock".into(), clock_value(&snapshot.remaining)),
        Line::Blank,
        Line::Stat("Progress".into(), snapshot.stats.progress_text()),
    ]
}

// Builds the text column and returns (tspans, width, height)

fn build_text_column(lines: &[Line]) -> (String, f32, f32) {
    let align_width = lines
        .iter()
        .filter_map(|line| match line {
            Line::Stat(k, v) => Some(k.len() + 2 + v.len()),
            _ => None,
        })
        .max()
        .unwrap_or(0)
        .max(MIN_COL_CHARS);

    let mut tspans = String::new();
    for (i, line) in lines.iter().enumerate() {
        let y = START_Y + (i as i32) * LINE_HEIGHT;

        match line {
            Line::Blank => {}
            Line::Header(label) => {
                tspans.push_str(&format!(
                    r#"<tspan x="{LEFT_PADDING}" y="{y}">{}</tspan>
"#,
                    escape_xml(&build_header_line(label, align_width))
                ));
            }
            Line::Stat(key, value) => {
                let (k, d, v) = build_stat_row(key, value, align_width);
                tspans.push_str(&format!(
                    r#"<tspan x="{LEFT_PADDING}" y="{y}" class="cc">. </tspan>
<tspan class="key">{}</tspan><tspan class="cc">{}</tspan><tspan class="value">{}</tspan>
"#,
                    escape_xml(&k),
                    escape_xml(&d),
                    escape_xml(&v)
                ));
            }
        }
    }

    let width = LEFT_PADDING + (align_width as f32 + 2.0) * CHAR_WIDTH + RIGHT_PADDING;
    let height = lines.len() as f32 * LINE_HEIGHT as f32 + START_Y as f32;

    (tspans, width, height)
}

/// Renders a progress card for `snapshot`.
pub fn generate_svg(snapshot: &Snapshot, theme: Theme) -> String {
    let colors = theme.colors();

    let lines = card_lines(snapshot);
    let (tspans, w, text_h) = build_text_column(&lines);

    let bar_y = text_h;
    let bar_w = w - LEFT_PADDING - RIGHT_PADDING;
    let fill_w = bar_w * snapshot.stats.fill().clamp(0.0, 1.0) as f32;
    let h = bar_y + BAR_HEIGHT + 30.0;

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px"
     font-family="ConsolasFallback,Consolas,monospace"
     font-size="16px">

<style>
.key      {{ fill: {key}; }}
.value    {{ fill: {value}; }}
.cc       {{ fill: {cc}; }}
</style>

<rect width="{w}px" height="{h}px" fill="{bg}" rx="15"/>

<text fill="{text}">
{tspans}
</text>

<!-- PROGRESS -->
<rect x="{x}" y="{bar_y}" width="{bar_w}" height="{bar_h}" fill="{cc}" rx="4"/>
<rect x="{x}" y="{bar_y}" width="{fill_w}" height="{bar_h}" fill="{fill}" rx="4"/>

</svg>
"#,
        w = w,
        h = h,
        x = LEFT_PADDING,
        bar_h = BAR_HEIGHT,
        bg = colors.bg,
        text = colors.text,
        key = colors.key,
        value = colors.value,
        cc = colors.cc,
        fill = colors.fill,
    )
}
