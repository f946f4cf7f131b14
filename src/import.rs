//! Reader for TDR CSV exports.
//!
//! The export starts with a fixed three-line header followed by one reading
//! per line: `DATE,TIME,DEPTH[,...]`. Dates are `DD/MM/YYYY` or
//! `YYYY-MM-DD`, times `HH:MM:SS` with optional fractional seconds. Date and
//! time are combined into seconds since the Unix epoch (UTC). Columns after
//! depth are ignored.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use nom::{
    branch::alt,
    character::complete::{char, digit1, space0},
    combinator::map_res,
    number::complete::double,
    sequence::delimited,
    IResult, Parser,
};

use crate::error::ImportError;
use crate::models::Sample;

pub const HEADER_LINES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Date {
    year: u32,
    month: u32,
    day: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Clock {
    hour: u32,
    minute: u32,
    second: f64,
}

/// Parse a full export into time-ordered samples.
pub fn parse_tdr_export(text: &str) -> Result<Vec<Sample>, ImportError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < HEADER_LINES {
        return Err(ImportError::MissingHeader {
            expected: HEADER_LINES as u32,
            found: lines.len() as u32,
        });
    }

    let mut samples: Vec<Sample> = Vec::with_capacity(lines.len() - HEADER_LINES);
    for (offset, raw) in lines[HEADER_LINES..].iter().enumerate() {
        let line = (HEADER_LINES + offset + 1) as u32;
        if raw.trim().is_empty() {
            continue;
        }

        let sample = parse_row(raw, line)?;
        if let Some(prev) = samples.last() {
            if sample.time <= prev.time {
                return Err(ImportError::NonIncreasingTime { line });
            }
        }
        samples.push(sample);
    }

    log::debug!("parsed {} samples from TDR export", samples.len());
    Ok(samples)
}

fn parse_row(raw: &str, line: u32) -> Result<Sample, ImportError> {
    let row = raw.trim();
    // 1-based column of `remaining` within the untrimmed line
    let column = |remaining: &str| (raw.trim_end().len() - remaining.len() + 1) as u32;

    let (rest, (date, clock, depth)) = reading(row).map_err(|e| {
        let remaining = match e {
            nom::Err::Error(e) | nom::Err::Failure(e) => e.input,
            nom::Err::Incomplete(_) => "",
        };
        ImportError::MalformedRow {
            line,
            column: column(remaining),
            message: "expected DATE,TIME,DEPTH".to_string(),
        }
    })?;

    let rest = rest.trim_start();
    if !rest.is_empty() && !rest.starts_with(',') {
        return Err(ImportError::MalformedRow {
            line,
            column: column(rest),
            message: format!("unexpected characters: '{}'", rest),
        });
    }

    let time = epoch_seconds(date, clock).ok_or_else(|| ImportError::InvalidDate {
        line,
        value: row.to_string(),
    })?;

    if depth < 0.0 {
        return Err(ImportError::NegativeDepth { line, depth });
    }
    if !depth.is_finite() {
        return Err(ImportError::MalformedRow {
            line,
            column: column(row),
            message: format!("depth is not a finite number: {}", depth),
        });
    }

    Ok(Sample::new(time, depth))
}

fn reading(input: &str) -> IResult<&str, (Date, Clock, f64)> {
    (date, separator, clock, separator, double)
        .map(|(d, _, c, _, depth)| (d, c, depth))
        .parse(input)
}

fn separator(input: &str) -> IResult<&str, char> {
    delimited(space0, char(','), space0).parse(input)
}

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |digits: &str| digits.parse::<u32>()).parse(input)
}

fn date(input: &str) -> IResult<&str, Date> {
    alt((day_first_date, iso_date)).parse(input)
}

fn day_first_date(input: &str) -> IResult<&str, Date> {
    (number, char('/'), number, char('/'), number)
        .map(|(day, _, month, _, year)| Date { year, month, day })
        .parse(input)
}

fn iso_date(input: &str) -> IResult<&str, Date> {
    (number, char('-'), number, char('-'), number)
        .map(|(year, _, month, _, day)| Date { year, month, day })
        .parse(input)
}

fn clock(input: &str) -> IResult<&str, Clock> {
    (number, char(':'), number, char(':'), double)
        .map(|(hour, _, minute, _, second)| Clock {
            hour,
            minute,
            second,
        })
        .parse(input)
}

/// Seconds since the Unix epoch, `None` for an impossible date or time.
fn epoch_seconds(date: Date, clock: Clock) -> Option<f64> {
    if !(0.0..60.0).contains(&clock.second) {
        return None;
    }
    let whole_seconds = clock.second.trunc();

    let date = NaiveDate::from_ymd_opt(i32::try_from(date.year).ok()?, date.month, date.day)?;
    let time = NaiveTime::from_hms_opt(clock.hour, clock.minute, whole_seconds as u32)?;
    let timestamp = NaiveDateTime::new(date, time).and_utc().timestamp();

    Some(timestamp as f64 + (clock.second - whole_seconds))
}
