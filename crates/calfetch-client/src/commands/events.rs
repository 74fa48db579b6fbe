//! Listing events of one calendar as JSON lines.

use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Local, TimeZone, Utc};
use tracing::{debug, info};

use calfetch_core::{Event, JsonLinesWriter, UpcomingFilter, UpcomingWindow};
use calfetch_providers::google::HttpTransport;
use calfetch_providers::{
    ApiClient, CalendarTransport, Credentials, EventPages, ProviderResult, Query,
};

use crate::cli::Cli;
use crate::error::{ClientError, ClientResult};

/// Runs the command line against the Google Calendar API, writing to stdout.
///
/// Returns the number of events printed.
pub fn execute(cli: &Cli) -> ClientResult<usize> {
    let credentials = load_credentials(&cli.config_path())?;
    let mut client = ApiClient::new(HttpTransport::new()?, credentials);

    fetch_events(
        &mut client,
        &cli.calendar,
        cli.upcoming,
        &Local::now(),
        Utc::now,
        io::stdout().lock(),
    )
}

/// Loads the credentials file, keeping a missing file distinguishable.
pub fn load_credentials(path: &Path) -> ClientResult<Credentials> {
    Credentials::load(path).map_err(|e| ClientError::from_load(e, path))
}

/// Builds the `events.list` query for a calendar and an optional window.
pub fn build_query(calendar: &str, window: Option<&UpcomingWindow>) -> Query {
    let query = Query::for_calendar(calendar);
    match window {
        Some(window) => query.merge(window.query_params()),
        None => query,
    }
}

/// Streams every event of `calendar` to `out`, one JSON object per line.
///
/// With `upcoming`, the listing is restricted to the window computed from
/// `now`, and events that already started by `clock` are dropped. Events are
/// written as they arrive; on error, the ones already written stay written.
pub fn fetch_events<T, Tz, C, W>(
    client: &mut ApiClient<T>,
    calendar: &str,
    upcoming: Option<f64>,
    now: &DateTime<Tz>,
    clock: C,
    out: W,
) -> ClientResult<usize>
where
    T: CalendarTransport,
    Tz: TimeZone,
    C: FnMut() -> DateTime<Utc>,
    W: Write,
{
    let window = upcoming
        .map(|days| UpcomingWindow::compute(now, days))
        .transpose()?;
    let query = build_query(calendar, window.as_ref());
    info!(calendar, upcoming = ?upcoming, "listing events");
    debug!(?query, "events query");

    let pages = EventPages::new(client, query);
    let mut writer = JsonLinesWriter::new(out);
    match window {
        Some(_) => emit(UpcomingFilter::new(pages, clock), &mut writer)?,
        None => emit(pages, &mut writer)?,
    }

    debug!(written = writer.written(), "done");
    Ok(writer.written())
}

fn emit<I, W>(events: I, writer: &mut JsonLinesWriter<W>) -> ClientResult<()>
where
    I: Iterator<Item = ProviderResult<Event>>,
    W: Write,
{
    for event in events {
        writer.write_event(&event?)?;
    }
    Ok(())
}
