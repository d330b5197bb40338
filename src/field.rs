//! The six raw input fields and how their text is read.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    BirthDay,
    BirthMonth,
    BirthYear,
    DeathDay,
    DeathMonth,
    DeathYear,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::BirthDay,
        Field::BirthMonth,
        Field::BirthYear,
        Field::DeathDay,
        Field::DeathMonth,
        Field::DeathYear,
    ];

    /// Stable identifier, also used as the CLI flag name.
    pub fn id(self) -> &'static str {
        match self {
            Field::BirthDay => "bday",
            Field::BirthMonth => "bmonth",
            Field::BirthYear => "byear",
            Field::DeathDay => "dday",
            Field::DeathMonth => "dmonth",
            Field::DeathYear => "dyear",
        }
    }

    pub fn from_id(id: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.id() == id)
    }

    fn is_padded(self) -> bool {
        !matches!(self, Field::BirthYear | Field::DeathYear)
    }

    /// Display form of a field value: days and months below 10 get a leading zero.
    pub fn format_value(self, value: i64) -> String {
        if self.is_padded() && (0..10).contains(&value) {
            format!("0{value}")
        } else {
            value.to_string()
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Reads a number the way a numeric form field does: optional sign, then
/// leading digits. Trailing junk is ignored; no digits means missing.
pub fn parse_field(raw: &str) -> Option<i64> {
    let s = raw.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Raw values of all six fields, as last read from the input surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifeInputs {
    pub bday: Option<i64>,
    pub bmonth: Option<i64>,
    pub byear: Option<i64>,
    pub dday: Option<i64>,
    pub dmonth: Option<i64>,
    pub dyear: Option<i64>,
}

impl LifeInputs {
    pub fn new(bday: i64, bmonth: i64, byear: i64, dday: i64, dmonth: i64, dyear: i64) -> Self {
        Self {
            bday: Some(bday),
            bmonth: Some(bmonth),
            byear: Some(byear),
            dday: Some(dday),
            dmonth: Some(dmonth),
            dyear: Some(dyear),
        }
    }

    /// Builds inputs from raw text, one string per field in [`Field::ALL`] order.
    pub fn parse(raw: [&str; 6]) -> Self {
        let [bday, bmonth, byear, dday, dmonth, dyear] = raw.map(parse_field);
        Self {
            bday,
            bmonth,
            byear,
            dday,
            dmonth,
            dyear,
        }
    }

    pub fn get(&self, field: Field) -> Option<i64> {
        match field {
            Field::BirthDay => self.bday,
            Field::BirthMonth => self.bmonth,
            Field::BirthYear => self.byear,
            Field::DeathDay => self.dday,
            Field::DeathMonth => self.dmonth,
            Field::DeathYear => self.dyear,
        }
    }

    pub fn set(&mut self, field: Field, value: Option<i64>) {
        let slot = match field {
            Field::BirthDay => &mut self.bday,
            Field::BirthMonth => &mut self.bmonth,
            Field::BirthYear => &mut self.byear,
            Field::DeathDay => &mut self.dday,
            Field::DeathMonth => &mut self.dmonth,
            Field::DeathYear => &mut self.dyear,
        };
        *slot = value;
    }

    /// True when every field holds a non-zero number.
    pub fn is_complete(&self) -> bool {
        Field::ALL
            .iter()
            .all(|f| self.get(*f).is_some_and(|v| v != 0))
    }
}
