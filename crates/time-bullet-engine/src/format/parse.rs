use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Weekday};
use thiserror::Error;

use super::render::{render, weekday_min};
use super::tokens::{Item, Token};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected `{expected}` at byte {position}")]
    LiteralMismatch { expected: String, position: usize },

    #[error("expected {token:?} at byte {position}")]
    TokenMismatch { token: Token, position: usize },

    #[error("unexpected trailing input `{0}`")]
    TrailingInput(String),

    #[error("cannot resolve date or time: {0}")]
    Unresolved(#[from] format::ParseError),

    #[error("date or time out of range")]
    OutOfRange,

    #[error("`{input}` is not in canonical form (expected `{rendered}`)")]
    NotExact { input: String, rendered: String },
}

/// Exact-match parse of `input` against `items`.
///
/// Each token is read by chrono into a shared [`Parsed`]. Date parts the
/// format doesn't mention are filled from `reference`: the whole date when
/// no year or month is present, otherwise day 1 of the given month. The
/// result must render back to `input` unchanged, which rejects unpadded
/// values for padded tokens, mismatched weekday names, and similar
/// near-misses chrono's lenient reader lets through.
pub(super) fn parse_strict(
    items: &[Item],
    input: &str,
    reference: NaiveDate,
) -> Result<DateTime<FixedOffset>, ParseError> {
    let mut parsed = Parsed::new();
    let mut rest = input;

    for item in items {
        let position = input.len() - rest.len();
        rest = match item {
            Item::Literal(expected) => {
                rest.strip_prefix(expected.as_str())
                    .ok_or_else(|| ParseError::LiteralMismatch {
                        expected: expected.clone(),
                        position,
                    })?
            }
            Item::Token(token) => {
                read_token(*token, rest, &mut parsed).ok_or(ParseError::TokenMismatch {
                    token: *token,
                    position,
                })?
            }
        };
    }

    if !rest.is_empty() {
        return Err(ParseError::TrailingInput(rest.to_string()));
    }

    let value = resolve(&mut parsed, reference)?;
    let rendered = render(items, &value);
    if rendered != input {
        return Err(ParseError::NotExact {
            input: input.to_string(),
            rendered,
        });
    }

    Ok(value)
}

fn read_token<'a>(token: Token, input: &'a str, parsed: &mut Parsed) -> Option<&'a str> {
    match token.strftime() {
        Some(spec) => format::parse_and_remainder(parsed, input, StrftimeItems::new(spec)).ok(),
        None => read_weekday_min(input, parsed),
    }
}

/// `dd`: only the weekday, which chrono then checks against the date.
fn read_weekday_min<'a>(input: &'a str, parsed: &mut Parsed) -> Option<&'a str> {
    let mut weekday = Weekday::Sun;
    for _ in 0..7 {
        if let Some(rest) = input.strip_prefix(weekday_min(weekday).as_str()) {
            parsed.set_weekday(weekday).ok()?;
            return Some(rest);
        }
        weekday = weekday.succ();
    }
    None
}

/// Fill what the format left out, then let chrono build the value.
fn resolve(parsed: &mut Parsed, reference: NaiveDate) -> Result<DateTime<FixedOffset>, ParseError> {
    // day.js reads 69-99 as 19xx, chrono would pivot at 70
    if parsed.year().is_none()
        && let Some(yy) = parsed.year_mod_100()
    {
        parsed.set_year(i64::from(if yy > 68 { 1900 + yy } else { 2000 + yy }))?;
    }

    let dated = parsed.year().is_some() || parsed.month().is_some();
    if parsed.year().is_none() {
        parsed.set_year(i64::from(reference.year()))?;
    }
    if parsed.month().is_none() {
        parsed.set_month(i64::from(reference.month()))?;
    }
    if parsed.day().is_none() {
        parsed.set_day(i64::from(if dated { 1 } else { reference.day() }))?;
    }

    match (parsed.hour_div_12(), parsed.hour_mod_12()) {
        (None, None) => parsed.set_hour(0)?,
        // `h` without `A`/`a`
        (None, Some(_)) => parsed.set_ampm(false)?,
        _ => {}
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }

    let naive = parsed.to_naive_date()?.and_time(parsed.to_naive_time()?);
    let offset =
        FixedOffset::east_opt(parsed.offset().unwrap_or(0)).ok_or(ParseError::OutOfRange)?;

    naive
        .and_local_timezone(offset)
        .single()
        .ok_or(ParseError::OutOfRange)
}
