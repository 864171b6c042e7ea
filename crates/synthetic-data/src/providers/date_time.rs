//! Random dates and times.
//!
//! Bounds accept either a [`Value::DateTime`], a [`Value::Date`], a Unix
//! timestamp, or one of these expressions:
//!
//! - `now` and `today`
//! - a signed offset such as `-30 years`, `+2 weeks` or `-90 minutes`
//! - `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`, read in the generator's timezone
//!
//! Relative bounds are measured from [`Generator::now`], so a fixed clock
//! makes every formatter here reproducible.

use std::fmt::Write as _;

use chrono::{
    DateTime, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc,
};
use chrono_tz::{TZ_VARIANTS, Tz};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::GeneratorError;
use crate::generator::Generator;
use crate::provider::{Formatter, FormatterTable, Provider};
use crate::value::{Args, Value};

/// Reads a date expression relative to `now`.
///
/// Returns `None` for anything that is not a recognised expression or whose
/// result overflows the representable range.
///
/// # Example
///
/// ```
/// use chrono::TimeZone;
/// use synthetic_data::providers::date_time::parse_moment;
///
/// let now = chrono_tz::UTC
///     .with_ymd_and_hms(2024, 3, 31, 12, 0, 0)
///     .single()
///     .expect("valid instant");
/// let earlier = parse_moment(now, "-1 month").expect("parsed");
/// assert_eq!(earlier.format("%Y-%m-%d").to_string(), "2024-02-29");
/// assert!(parse_moment(now, "next tuesday").is_none());
/// ```
#[must_use]
pub fn parse_moment(now: DateTime<Tz>, expression: &str) -> Option<DateTime<Tz>> {
    let trimmed = expression.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "now" => return Some(now),
        "today" => {
            let midnight = now.date_naive().and_time(NaiveTime::MIN);
            return Some(localize(now.timezone(), midnight));
        }
        _ => {}
    }
    if let Ok(instant) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(localize(now.timezone(), instant));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(localize(now.timezone(), date.and_time(NaiveTime::MIN)));
    }
    shift(now, trimmed)
}

fn shift(now: DateTime<Tz>, expression: &str) -> Option<DateTime<Tz>> {
    let (negative, magnitude) = match expression.split_at_checked(1) {
        Some(("-", rest)) => (true, rest),
        Some(("+", rest)) => (false, rest),
        _ => (false, expression),
    };
    let mut parts = magnitude.split_whitespace();
    let amount: i64 = parts.next()?.parse().ok()?;
    let unit = parts.next()?.to_ascii_lowercase();
    if parts.next().is_some() {
        return None;
    }
    let signed = if negative { amount.checked_neg()? } else { amount };
    match unit.strip_suffix('s').unwrap_or(&unit) {
        "second" => now.checked_add_signed(TimeDelta::try_seconds(signed)?),
        "minute" => now.checked_add_signed(TimeDelta::try_minutes(signed)?),
        "hour" => now.checked_add_signed(TimeDelta::try_hours(signed)?),
        "day" => now.checked_add_signed(TimeDelta::try_days(signed)?),
        "week" => now.checked_add_signed(TimeDelta::try_weeks(signed)?),
        "month" => shift_months(now, signed),
        "year" => shift_months(now, signed.checked_mul(12)?),
        _ => None,
    }
}

fn shift_months(now: DateTime<Tz>, months: i64) -> Option<DateTime<Tz>> {
    let count = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months < 0 {
        now.checked_sub_months(count)
    } else {
        now.checked_add_months(count)
    }
}

/// Resolves a wall-clock time, taking the earlier reading when a DST change
/// makes it ambiguous and the UTC reading when it does not exist.
fn localize(timezone: Tz, local: NaiveDateTime) -> DateTime<Tz> {
    timezone
        .from_local_datetime(&local)
        .earliest()
        .unwrap_or_else(|| timezone.from_utc_datetime(&local))
}

/// Reads the bound at `index`, falling back to the expression `default`.
fn bound(
    generator: &Generator,
    args: Args<'_>,
    index: usize,
    default: &str,
) -> Result<DateTime<Tz>, GeneratorError> {
    let timezone = generator.default_timezone();
    match args.value(index) {
        None => parse_moment(generator.now(), default)
            .ok_or_else(|| args.invalid(format!("cannot read default bound '{default}'"))),
        Some(Value::DateTime(instant)) => Ok(instant.with_timezone(&timezone)),
        Some(Value::Date(date)) => Ok(localize(timezone, date.and_time(NaiveTime::MIN))),
        Some(Value::Int(timestamp)) => DateTime::from_timestamp(*timestamp, 0)
            .map(|instant| instant.with_timezone(&timezone))
            .ok_or_else(|| args.invalid(format!("timestamp {timestamp} is out of range"))),
        Some(Value::Text(expression)) => parse_moment(generator.now(), expression)
            .ok_or_else(|| args.invalid(format!("cannot read date expression '{expression}'"))),
        Some(other) => Err(args.invalid(format!("argument {index} is not a date: {other:?}"))),
    }
}

fn timezone_argument(
    generator: &Generator,
    args: Args<'_>,
    index: usize,
) -> Result<Tz, GeneratorError> {
    args.text(index)?.map_or(Ok(generator.default_timezone()), |name| {
        name.parse::<Tz>()
            .map_err(|_| GeneratorError::InvalidTimezone {
                name: name.to_owned(),
            })
    })
}

/// Picks an instant between `start` and `end` inclusive, at whole-second
/// precision, and expresses it in `timezone`.
fn between(
    generator: &mut Generator,
    args: Args<'_>,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    timezone: Tz,
) -> Result<DateTime<Tz>, GeneratorError> {
    if start > end {
        return Err(args.invalid(format!(
            "start {} is after end {}",
            start.to_rfc3339(),
            end.to_rfc3339()
        )));
    }
    let timestamp = generator
        .rng()
        .random_range(start.timestamp()..=end.timestamp());
    DateTime::from_timestamp(timestamp, 0)
        .map(|instant| instant.with_timezone(&timezone))
        .ok_or_else(|| args.invalid(format!("timestamp {timestamp} is out of range")))
}

/// An instant between the Unix epoch and the bound at `index` (default
/// `now`).
fn up_to(
    generator: &mut Generator,
    args: Args<'_>,
    index: usize,
) -> Result<DateTime<Tz>, GeneratorError> {
    let timezone = generator.default_timezone();
    let end = bound(generator, args, index, "now")?;
    let epoch = DateTime::<Utc>::UNIX_EPOCH.with_timezone(&timezone);
    between(generator, args, epoch, end, timezone)
}

/// An instant between `start` and the bound at index 0 (default `now`).
fn since(generator: &mut Generator, args: Args<'_>, start: &str) -> Result<Value, GeneratorError> {
    let timezone = generator.default_timezone();
    let begin = parse_moment(generator.now(), start)
        .ok_or_else(|| args.invalid(format!("cannot read date expression '{start}'")))?;
    let end = bound(generator, args, 0, "now")?;
    between(generator, args, begin, end, timezone).map(Value::from)
}

/// Formats `instant` with a user-supplied strftime pattern, rejecting
/// patterns chrono cannot render.
fn render(args: Args<'_>, instant: DateTime<Tz>, pattern: &str) -> Result<Value, GeneratorError> {
    let mut rendered = String::new();
    write!(rendered, "{}", instant.format(pattern))
        .map_err(|_| args.invalid(format!("unsupported format '{pattern}'")))?;
    Ok(Value::from(rendered))
}

/// A formatter that renders an instant up to the bound at index 0 with a
/// fixed pattern.
fn fixed_pattern(
    pattern: &'static str,
) -> impl Fn(&mut Generator, Args<'_>) -> Result<Value, GeneratorError> + Send + Sync + 'static {
    move |generator, args| {
        let instant = up_to(generator, args, 0)?;
        render(args, instant, pattern)
    }
}

/// Provider exposing date and time formatters.
///
/// | formatter | arguments | result |
/// |-----------|-----------|--------|
/// | `date_time_between` | start (`-30 years`), end (`now`), timezone | date-time |
/// | `date_time` | max (`now`) | date-time after the epoch |
/// | `date_time_this_century` | max (`now`) | date-time within 100 years |
/// | `date_time_this_decade` | max (`now`) | date-time within 10 years |
/// | `date_time_this_year` | max (`now`) | date-time within a year |
/// | `date_time_this_month` | max (`now`) | date-time within a month |
/// | `date` | format (`%Y-%m-%d`), max (`now`) | text |
/// | `time` | format (`%H:%M:%S`), max (`now`) | text |
/// | `iso8601` | max (`now`) | text |
/// | `unix_time` | max (`now`) | integer |
/// | `year`, `month`, `month_name`, `day_of_month`, `day_of_week`, `am_pm` | max (`now`) | text |
/// | `timezone` | | IANA zone name |
#[derive(Debug, Clone)]
pub struct DateTimeProvider {
    table: FormatterTable,
}

impl DateTimeProvider {
    /// Builds the provider.
    #[must_use]
    pub fn new() -> Self {
        let table = FormatterTable::new()
            .with("date_time_between", |generator, args| {
                let start = bound(generator, args, 0, "-30 years")?;
                let end = bound(generator, args, 1, "now")?;
                let timezone = timezone_argument(generator, args, 2)?;
                between(generator, args, start, end, timezone).map(Value::from)
            })
            .with("date_time", |generator, args| {
                up_to(generator, args, 0).map(Value::from)
            })
            .with("date_time_this_century", |generator, args| {
                since(generator, args, "-100 years")
            })
            .with("date_time_this_decade", |generator, args| {
                since(generator, args, "-10 years")
            })
            .with("date_time_this_year", |generator, args| {
                since(generator, args, "-1 year")
            })
            .with("date_time_this_month", |generator, args| {
                since(generator, args, "-1 month")
            })
            .with("date", |generator, args| {
                let pattern = args.text(0)?.unwrap_or("%Y-%m-%d");
                let instant = up_to(generator, args, 1)?;
                render(args, instant, pattern)
            })
            .with("time", |generator, args| {
                let pattern = args.text(0)?.unwrap_or("%H:%M:%S");
                let instant = up_to(generator, args, 1)?;
                render(args, instant, pattern)
            })
            .with("iso8601", fixed_pattern("%Y-%m-%dT%H:%M:%S%z"))
            .with("year", fixed_pattern("%Y"))
            .with("month", fixed_pattern("%m"))
            .with("month_name", fixed_pattern("%B"))
            .with("day_of_month", fixed_pattern("%d"))
            .with("day_of_week", fixed_pattern("%A"))
            .with("am_pm", fixed_pattern("%P"))
            .with("unix_time", |generator, args| {
                up_to(generator, args, 0).map(|instant| Value::Int(instant.timestamp()))
            })
            .with("timezone", |generator, _| {
                Ok(Value::from(
                    TZ_VARIANTS
                        .choose(generator.rng())
                        .map_or("UTC", |zone| zone.name()),
                ))
            });
        Self { table }
    }
}

impl Default for DateTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for DateTimeProvider {
    fn name(&self) -> &str {
        "date_time"
    }

    fn try_resolve(&self, formatter: &str) -> Option<Formatter> {
        self.table.get(formatter)
    }
}
