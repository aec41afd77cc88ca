//! Watch command implementation: the live dashboard.

use crate::cli::WatchArgs;
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use pulse_domain::Incident;
use pulse_feed::{ConnectionState, FeedConfig, FeedConnector, FeedError};
use pulse_sdk::Endpoint;
use pulse_store::IncidentStore;
use std::future::Future;
use std::io::IsTerminal;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Execute the watch command.
pub async fn execute_watch(
    args: WatchArgs,
    endpoint: &Endpoint,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    watch_until(args, endpoint, config, formatter, tokio::signal::ctrl_c()).await
}

/// Run the dashboard until `interrupt` completes, the event limit is hit or
/// the feed gives up
async fn watch_until<F>(
    args: WatchArgs,
    endpoint: &Endpoint,
    config: &Config,
    formatter: &Formatter,
    interrupt: F,
) -> Result<()>
where
    F: Future,
{
    let feed_config = args
        .preset
        .map(FeedConfig::from)
        .unwrap_or_else(|| config.feed.clone());
    let capacity = args.capacity.unwrap_or(config.settings.store_capacity);
    let refresh = Duration::from_millis(config.settings.refresh_ms.max(50));

    let store = Arc::new(Mutex::new(IncidentStore::new(capacity)));
    let sink_store = Arc::clone(&store);
    let sink = move |incident: Incident| {
        sink_store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .append(incident);
    };

    let connector = FeedConnector::for_endpoint(endpoint, feed_config);
    tracing::info!(url = connector.url(), capacity, "watching alert stream");
    let handle = connector.connect(sink)?;

    let mut states = handle.subscribe_state();
    let mut watching_state = true;
    let mut ticker = tokio::time::interval(refresh);
    let mut view = LiveView::new(std::io::stdout().is_terminal());
    tokio::pin!(interrupt);

    let outcome = loop {
        tokio::select! {
            _ = &mut interrupt => {
                tracing::info!("interrupt received, closing alert feed");
                break Ok(());
            }
            changed = states.changed(), if watching_state => {
                watching_state = changed.is_ok();
            }
            _ = ticker.tick() => {}
        }

        let state = handle.state();
        let (frame, arrived) = {
            let store = store.lock().unwrap_or_else(PoisonError::into_inner);
            (view.render(&store, &state, formatter)?, store.total_appended())
        };
        if let Some(frame) = frame {
            println!("{}", frame);
        }

        if args.max_events.is_some_and(|max| arrived >= max) {
            tracing::info!(arrived, "event limit reached");
            break Ok(());
        }

        if state == ConnectionState::Closed && !handle.is_closed() {
            break Err(CliError::Feed(FeedError::Connect(
                "alert feed gave up reconnecting".to_string(),
            )));
        }
    };

    let metrics = handle.metrics();
    handle.shutdown().await;
    tracing::info!("alert feed stopped. Final metrics:\n{}", metrics.summary());

    outcome
}

/// Decides what to print each tick
///
/// The table format redraws the whole dashboard whenever incidents arrive or
/// the connection state changes. Line formats print only the new incidents,
/// oldest first.
struct LiveView {
    clear: bool,
    seen: u64,
    last_state: Option<ConnectionState>,
}

impl LiveView {
    fn new(clear: bool) -> Self {
        Self {
            clear,
            seen: 0,
            last_state: None,
        }
    }

    fn render(
        &mut self,
        store: &IncidentStore,
        state: &ConnectionState,
        formatter: &Formatter,
    ) -> Result<Option<String>> {
        let arrived = store.total_appended();
        let new = usize::try_from(arrived - self.seen)
            .unwrap_or(usize::MAX)
            .min(store.len());
        let state_changed = self.last_state.as_ref() != Some(state);

        self.seen = arrived;
        if state_changed {
            tracing::info!(%state, "alert feed state changed");
            self.last_state = Some(state.clone());
        }

        if formatter.format() == OutputFormat::Table {
            if new == 0 && !state_changed {
                return Ok(None);
            }
            let dashboard = formatter.format_dashboard(store, state)?;
            return Ok(Some(if self.clear {
                format!("{}{}", CLEAR_SCREEN, dashboard)
            } else {
                dashboard
            }));
        }

        if new == 0 {
            return Ok(None);
        }
        let rows: Vec<_> = store.rows().take(new).collect();
        let lines = rows
            .iter()
            .rev()
            .map(|row| formatter.format_row_line(row))
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(lines.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_domain::Severity;

    fn fire() -> Incident {
        Incident::new("Fire Detected", 0.95, "12:01", Severity::Critical)
    }

    fn fall() -> Incident {
        Incident::new("Person Fallen", 0.8, "12:02", Severity::Warning)
    }

    #[test]
    fn test_table_redraws_only_on_change() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut view = LiveView::new(false);
        let mut store = IncidentStore::default();

        let first = view
            .render(&store, &ConnectionState::Connecting, &formatter)
            .unwrap()
            .unwrap();
        assert!(first.contains("feed degraded"));
        assert!(first.contains("No incidents detected"));

        assert!(view
            .render(&store, &ConnectionState::Connecting, &formatter)
            .unwrap()
            .is_none());

        let open = view
            .render(&store, &ConnectionState::Open, &formatter)
            .unwrap()
            .unwrap();
        assert!(!open.contains("feed degraded"));

        store.append(fire());
        let frame = view
            .render(&store, &ConnectionState::Open, &formatter)
            .unwrap()
            .unwrap();
        assert!(frame.contains("Fire Detected"));
        assert!(!frame.contains("No incidents detected"));
    }

    #[test]
    fn test_line_formats_print_new_incidents_oldest_first() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let mut view = LiveView::new(false);
        let mut store = IncidentStore::default();

        assert!(view
            .render(&store, &ConnectionState::Open, &formatter)
            .unwrap()
            .is_none());

        store.append(fire());
        store.append(fall());
        let lines = view
            .render(&store, &ConnectionState::Open, &formatter)
            .unwrap()
            .unwrap();
        assert_eq!(lines, "Fire Detected\nPerson Fallen");

        assert!(view
            .render(&store, &ConnectionState::Open, &formatter)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_new_incidents_capped_by_store_capacity() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let mut view = LiveView::new(false);
        let mut store = IncidentStore::new(1);

        store.append(fire());
        store.append(fall());
        let lines = view
            .render(&store, &ConnectionState::Open, &formatter)
            .unwrap()
            .unwrap();
        assert_eq!(lines, "Person Fallen");
    }

    #[tokio::test]
    async fn test_gives_up_when_feed_stops() {
        let mut config = Config::default();
        config.feed = FeedConfig {
            max_reconnect_attempts: Some(0),
            ..FeedConfig::default()
        };
        config.settings.refresh_ms = 50;

        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let endpoint = Endpoint::new(pulse_sdk::Scheme::Http, "127.0.0.1", 1);

        let result = tokio::time::timeout(
            Duration::from_secs(10),
            execute_watch(WatchArgs::default(), &endpoint, &config, &formatter),
        )
        .await
        .expect("watch did not stop");
        assert!(matches!(result, Err(CliError::Feed(_))));
    }

    #[tokio::test]
    async fn test_interrupt_survives_redraws() {
        let mut config = Config::default();
        config.feed = FeedConfig {
            initial_backoff_ms: 20,
            max_backoff_ms: 20,
            ..FeedConfig::default()
        };
        config.settings.refresh_ms = 50;

        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let endpoint = Endpoint::new(pulse_sdk::Scheme::Http, "127.0.0.1", 1);
        // Fires only after several ticks have gone by.
        let interrupt = tokio::time::sleep(Duration::from_millis(300));

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            watch_until(WatchArgs::default(), &endpoint, &config, &formatter, interrupt),
        )
        .await
        .expect("interrupt was lost");
        assert!(result.is_ok());
    }
}
