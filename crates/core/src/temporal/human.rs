//! Human-readable date/time parsing
//!
//! Text such as `"2020"`, `"2020-05-03 12:00"` or `"5 Jan 2020"` names a
//! point in time only partially. Every component the text leaves out is
//! taken from a default-anchor date:
//!
//! | Anchor | Default |
//! |--------|---------|
//! | `StartOfPeriod` | Jan 1 of the current year, 00:00:00 UTC |
//! | `EndOfPeriod` | Dec 31 of the current year, 23:59:00 UTC |
//!
//! Callers pick the anchor by how the result bounds a comparison: a bare
//! year used as an upper bound resolves to the end of that year, so the
//! whole year is included.
//!
//! All text is UTC unless it carries an explicit offset.

use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const WEEKDAYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// Which end of an unspecified period fills the missing components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateAnchor {
    /// Jan 1, 00:00 (inclusive lower bounds)
    #[default]
    StartOfPeriod,
    /// Dec 31, 23:59 (inclusive upper bounds)
    EndOfPeriod,
}

impl DateAnchor {
    /// Default date for the given year
    pub fn default_for_year(&self, year: i32) -> NaiveDateTime {
        let (month, day, hour, minute) = match self {
            DateAnchor::StartOfPeriod => (1, 1, 0, 0),
            DateAnchor::EndOfPeriod => (12, 31, 23, 59),
        };
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .unwrap_or(NaiveDateTime::MIN)
    }

    /// Default date for the current year
    pub fn current_default(&self) -> NaiveDateTime {
        self.default_for_year(Utc::now().year())
    }
}

/// Parse with the anchor applied to the current year
pub fn parse_human(text: &str, anchor: DateAnchor) -> Result<DateTime<Utc>> {
    parse_human_with_default(text, anchor.current_default())
}

/// Parse, filling unspecified components from `default`
///
/// # Errors
///
/// Returns a decode failure for empty text, unrecognised tokens, or a date
/// that does not exist.
pub fn parse_human_with_default(text: &str, default: NaiveDateTime) -> Result<DateTime<Utc>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::decode("empty date/time string"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    let mut fields = Fields::default();
    for token in tokenize(trimmed) {
        fields
            .absorb(&token)
            .map_err(|msg| Error::decode(format!("cannot parse date '{}': {}", text, msg)))?;
    }
    fields
        .resolve(default)
        .map_err(|msg| Error::decode(format!("cannot parse date '{}': {}", text, msg)))
}

/// Split on whitespace and commas; split ISO `dateTtime` tokens in two
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for raw in text.split(|c: char| c.is_whitespace() || c == ',') {
        if raw.is_empty() {
            continue;
        }
        let lower = raw.to_ascii_lowercase();
        let split_at = lower.find('t').filter(|&i| {
            i > 0
                && lower[i + 1..].contains(':')
                && lower[..i]
                    .bytes()
                    .all(|b| b.is_ascii_digit() || b == b'-' || b == b'/')
        });
        match split_at {
            Some(i) => {
                tokens.push(lower[..i].to_string());
                if i + 1 < lower.len() {
                    tokens.push(lower[i + 1..].to_string());
                }
            }
            None => tokens.push(lower),
        }
    }
    tokens
}

#[derive(Debug, Default)]
struct Fields {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    nanos: Option<u32>,
    pm: Option<bool>,
    offset_secs: Option<i32>,
}

impl Fields {
    fn absorb(&mut self, token: &str) -> std::result::Result<(), String> {
        match token {
            "z" | "utc" | "gmt" => return self.set_offset(0),
            "am" => return self.set_meridiem(false),
            "pm" => return self.set_meridiem(true),
            _ => {}
        }

        let first = token.chars().next().unwrap_or(' ');

        if (first == '+' || first == '-') && self.hour.is_some() {
            let secs = parse_offset(&token[1..])?;
            return self.set_offset(if first == '-' { -secs } else { secs });
        }

        if token.contains(':') {
            return self.absorb_time(token);
        }

        if first.is_ascii_digit() && (token.contains('-') || token.contains('/')) {
            return self.absorb_date(token);
        }

        if first.is_ascii_digit() {
            return self.absorb_number(token);
        }

        if token.chars().all(|c| c.is_ascii_alphabetic()) {
            return self.absorb_word(token);
        }

        Err(format!("unrecognised token '{}'", token))
    }

    fn absorb_time(&mut self, token: &str) -> std::result::Result<(), String> {
        if self.hour.is_some() {
            return Err(format!("duplicate time '{}'", token));
        }

        let mut body = token;
        if let Some(stripped) = body.strip_suffix("am") {
            self.set_meridiem(false)?;
            body = stripped;
        } else if let Some(stripped) = body.strip_suffix("pm") {
            self.set_meridiem(true)?;
            body = stripped;
        }
        if let Some(stripped) = body.strip_suffix('z') {
            self.set_offset(0)?;
            body = stripped;
        } else if let Some(pos) = body.rfind(|c: char| c == '+' || c == '-') {
            let secs = parse_offset(&body[pos + 1..])?;
            let sign = if body.as_bytes()[pos] == b'-' { -1 } else { 1 };
            self.set_offset(sign * secs)?;
            body = &body[..pos];
        }

        let parts: Vec<&str> = body.split(':').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(format!("invalid time '{}'", token));
        }
        self.hour = Some(parse_bounded(parts[0], 0, 23, "hour")?);
        self.minute = Some(parse_bounded(parts[1], 0, 59, "minute")?);
        if let Some(sec) = parts.get(2) {
            let (whole, frac) = match sec.split_once('.') {
                Some((w, f)) => (w, Some(f)),
                None => (*sec, None),
            };
            self.second = Some(parse_bounded(whole, 0, 59, "second")?);
            if let Some(frac) = frac {
                self.nanos = Some(parse_fraction(frac)?);
            }
        }
        Ok(())
    }

    fn absorb_date(&mut self, token: &str) -> std::result::Result<(), String> {
        if self.year.is_some() || self.month.is_some() {
            return Err(format!("duplicate date '{}'", token));
        }
        let parts: Vec<&str> = token.split(|c: char| c == '-' || c == '/').collect();
        match parts.as_slice() {
            [y, m, d] if y.len() == 4 => {
                self.year = Some(parse_year(y)?);
                self.month = Some(parse_bounded(m, 1, 12, "month")?);
                self.day = Some(parse_bounded(d, 1, 31, "day")?);
            }
            [m, d, y] if y.len() == 4 => {
                self.year = Some(parse_year(y)?);
                self.month = Some(parse_bounded(m, 1, 12, "month")?);
                self.day = Some(parse_bounded(d, 1, 31, "day")?);
            }
            [y, m] if y.len() == 4 => {
                self.year = Some(parse_year(y)?);
                self.month = Some(parse_bounded(m, 1, 12, "month")?);
            }
            [m, y] if y.len() == 4 => {
                self.year = Some(parse_year(y)?);
                self.month = Some(parse_bounded(m, 1, 12, "month")?);
            }
            _ => return Err(format!("invalid date '{}'", token)),
        }
        Ok(())
    }

    fn absorb_number(&mut self, token: &str) -> std::result::Result<(), String> {
        let digits = strip_ordinal(token);
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("unrecognised token '{}'", token));
        }
        match digits.len() {
            8 if self.year.is_none() && self.month.is_none() => {
                self.year = Some(parse_year(&digits[..4])?);
                self.month = Some(parse_bounded(&digits[4..6], 1, 12, "month")?);
                self.day = Some(parse_bounded(&digits[6..], 1, 31, "day")?);
            }
            4 if self.year.is_none() => self.year = Some(parse_year(digits)?),
            1 | 2 if self.day.is_none() => self.day = Some(parse_bounded(digits, 1, 31, "day")?),
            _ => return Err(format!("unexpected number '{}'", token)),
        }
        Ok(())
    }

    fn absorb_word(&mut self, token: &str) -> std::result::Result<(), String> {
        let prefix = token.get(..3).unwrap_or(token);
        if let Some(idx) = MONTHS.iter().position(|m| *m == prefix) {
            if self.month.is_some() {
                return Err(format!("duplicate month '{}'", token));
            }
            self.month = Some(idx as u32 + 1);
            return Ok(());
        }
        if WEEKDAYS.contains(&prefix) {
            return Ok(());
        }
        Err(format!("unrecognised word '{}'", token))
    }

    fn set_offset(&mut self, secs: i32) -> std::result::Result<(), String> {
        if self.offset_secs.is_some() {
            return Err("duplicate timezone".to_string());
        }
        self.offset_secs = Some(secs);
        Ok(())
    }

    fn set_meridiem(&mut self, pm: bool) -> std::result::Result<(), String> {
        if self.pm.is_some() {
            return Err("duplicate am/pm".to_string());
        }
        self.pm = Some(pm);
        Ok(())
    }

    fn resolve(self, default: NaiveDateTime) -> std::result::Result<DateTime<Utc>, String> {
        let year = self.year.unwrap_or(default.year());
        let month = self.month.unwrap_or(default.month());
        let days = days_in_month(year, month).ok_or_else(|| format!("invalid month {}", month))?;
        let day = match self.day {
            Some(d) if d > days => {
                return Err(format!("day {} out of range for {}-{:02}", d, year, month))
            }
            Some(d) => d,
            None => default.day().min(days),
        };

        let mut hour = self.hour.unwrap_or(default.hour());
        match self.pm {
            Some(_) if self.hour.is_none() => return Err("am/pm without a time".to_string()),
            Some(_) if hour == 0 || hour > 12 => {
                return Err(format!("hour {} is not a 12-hour clock value", hour))
            }
            Some(true) if hour < 12 => hour += 12,
            Some(false) if hour == 12 => hour = 0,
            _ => {}
        }
        let minute = self.minute.unwrap_or(default.minute());
        let second = self.second.unwrap_or(default.second());
        let nanos = self.nanos.unwrap_or(default.nanosecond());

        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_nano_opt(hour, minute, second, nanos))
            .ok_or_else(|| "date does not exist".to_string())?;
        let utc = Utc.from_utc_datetime(&naive);
        Ok(utc - chrono::Duration::seconds(i64::from(self.offset_secs.unwrap_or(0))))
    }
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}

fn strip_ordinal(token: &str) -> &str {
    ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| token.strip_suffix(suffix))
        .unwrap_or(token)
}

fn parse_year(text: &str) -> std::result::Result<i32, String> {
    text.parse::<i32>()
        .map_err(|_| format!("invalid year '{}'", text))
}

fn parse_bounded(text: &str, min: u32, max: u32, what: &str) -> std::result::Result<u32, String> {
    let value = text
        .parse::<u32>()
        .map_err(|_| format!("invalid {} '{}'", what, text))?;
    if value < min || value > max {
        return Err(format!("{} {} out of range", what, value));
    }
    Ok(value)
}

fn parse_fraction(text: &str) -> std::result::Result<u32, String> {
    if text.is_empty() || text.len() > 9 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid fraction '{}'", text));
    }
    let padded = format!("{:0<9}", text);
    padded
        .parse::<u32>()
        .map_err(|_| format!("invalid fraction '{}'", text))
}

/// `HH`, `HHMM` or `HH:MM` after the sign
fn parse_offset(text: &str) -> std::result::Result<i32, String> {
    let digits: String = text.chars().filter(|c| *c != ':').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid offset '{}'", text));
    }
    let (hours, minutes) = match digits.len() {
        1 | 2 => (&digits[..], "0"),
        4 => (&digits[..2], &digits[2..]),
        _ => return Err(format!("invalid offset '{}'", text)),
    };
    let hours = parse_bounded(hours, 0, 23, "offset hour")? as i32;
    let minutes = parse_bounded(minutes, 0, 59, "offset minute")? as i32;
    Ok(hours * 3600 + minutes * 60)
}
