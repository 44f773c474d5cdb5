//! Window computation and early-stopping selection over a newest-first stream.

use chrono::{DateTime, Days, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use futures::{Stream, StreamExt};
use tracing::debug;

use crate::core::models::{Message, Selection, TimeWindow};
use crate::errors::DigestError;

/// Local midnight `days` days before `now`, in `now`'s own time zone.
///
/// When that midnight does not exist (a DST jump at 00:00) the first valid
/// instant of the day is used instead; when it is ambiguous, the earlier one.
#[must_use]
pub fn window_start<Z: TimeZone>(now: &DateTime<Z>, days: u32) -> DateTime<Utc> {
    let date = now
        .date_naive()
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN);
    let midnight = date.and_time(NaiveTime::MIN);
    let zone = now.timezone();

    zone.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            zone.from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
        })
        .map_or_else(
            || Utc.from_utc_datetime(&midnight),
            |start| start.with_timezone(&Utc),
        )
}

/// `[local midnight days ago, now)` for the given instant.
#[must_use]
pub fn trailing_window<Z: TimeZone>(now: &DateTime<Z>, days: u32) -> TimeWindow {
    TimeWindow {
        start: window_start(now, days),
        end: now.with_timezone(&Utc),
    }
}

/// Trailing window anchored in `timezone`, or in the system zone when unset.
#[must_use]
pub fn trailing_window_in(now: DateTime<Utc>, timezone: Option<Tz>, days: u32) -> TimeWindow {
    match timezone {
        Some(tz) => trailing_window(&now.with_timezone(&tz), days),
        None => trailing_window(&now.with_timezone(&Local), days),
    }
}

/// Pull messages until the first one older than `start`.
///
/// The stream must be newest-first. Nothing is pulled after the first
/// out-of-window message. Any stream error discards what was collected.
pub async fn select_window<A, S>(
    stream: S,
    start: DateTime<Utc>,
) -> Result<Vec<Message<A>>, DigestError>
where
    S: Stream<Item = Result<Message<A>, DigestError>>,
{
    let mut stream = std::pin::pin!(stream);
    let mut selected = Vec::new();

    while let Some(item) = stream.next().await {
        let message = item?;
        if message.timestamp < start {
            debug!(
                "Window boundary crossed at {} after {} messages",
                message.timestamp,
                selected.len()
            );
            break;
        }
        selected.push(message);
    }

    Ok(selected)
}

/// Pull at most `count` messages. Never pulls more than `count`.
pub async fn select_last<A, S>(stream: S, count: usize) -> Result<Vec<Message<A>>, DigestError>
where
    S: Stream<Item = Result<Message<A>, DigestError>>,
{
    let mut stream = std::pin::pin!(stream);
    let mut selected = Vec::with_capacity(count.min(1024));

    while selected.len() < count {
        match stream.next().await {
            Some(item) => selected.push(item?),
            None => break,
        }
    }

    Ok(selected)
}

/// Dispatch on the run's selection mode.
pub async fn select<A, S>(stream: S, selection: &Selection) -> Result<Vec<Message<A>>, DigestError>
where
    S: Stream<Item = Result<Message<A>, DigestError>>,
{
    match selection {
        Selection::Since(window) => select_window(stream, window.start).await,
        Selection::Last(count) => select_last(stream, *count).await,
    }
}
