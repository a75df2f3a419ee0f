//! View state owned by a front end: unit preference, latest result, loading
//! flag and the inline error line.

use std::sync::Arc;

use crate::{
    error::LookupError,
    model::WeatherSnapshot,
    notify::Notifier,
    units::TemperatureUnit,
    view::WeatherView,
};

/// Handle for one in-flight lookup. Only the most recent ticket may update
/// the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct Presenter {
    unit: TemperatureUnit,
    latest: Option<(String, WeatherSnapshot)>,
    loading: bool,
    error_line: Option<String>,
    issued: u64,
    notifier: Arc<dyn Notifier>,
}

impl Presenter {
    pub fn new(unit: TemperatureUnit, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            unit,
            latest: None,
            loading: false,
            error_line: None,
            issued: 0,
            notifier,
        }
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error_line(&self) -> Option<&str> {
        self.error_line.as_deref()
    }

    /// Start a lookup: enter the loading state and hide any previous error.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        self.loading = true;
        self.error_line = None;
        Ticket(self.issued)
    }

    /// Apply the outcome of the lookup started with `ticket`.
    ///
    /// Outcomes for superseded tickets are dropped. Otherwise loading is
    /// cleared whether the lookup succeeded or not, and a fresh view is
    /// returned on success.
    pub fn finish(
        &mut self,
        ticket: Ticket,
        outcome: Result<(String, WeatherSnapshot), LookupError>,
    ) -> Option<WeatherView> {
        if ticket.0 != self.issued {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.issued,
                "Dropping stale lookup result"
            );
            return None;
        }
        self.loading = false;

        match outcome {
            Ok((label, snapshot)) => {
                self.latest = Some((label, snapshot));
                self.render()
            }
            Err(err) => {
                self.reject(&err);
                None
            }
        }
    }

    /// Report an error that happened before any lookup started, such as a
    /// blank query.
    pub fn reject(&mut self, err: &LookupError) {
        tracing::debug!("Lookup failed: {err}");
        self.error_line = Some(err.inline_message().to_string());
        self.notifier.notify(err.notice());
    }

    /// Flip the current-conditions unit and re-render the latest result.
    pub fn toggle_unit(&mut self) -> Option<WeatherView> {
        self.unit = self.unit.toggle();
        self.render()
    }

    pub fn render(&self) -> Option<WeatherView> {
        self.latest
            .as_ref()
            .map(|(label, snapshot)| WeatherView::build(label, snapshot, self.unit))
    }
}
