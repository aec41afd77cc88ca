//! Incidents command implementation.

use crate::cli::IncidentsArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::views::store_from_fetch;
use pulse_sdk::PulseClient;

/// Execute the incidents command.
pub async fn execute_incidents(
    args: IncidentsArgs,
    client: &PulseClient,
    capacity: usize,
    formatter: &Formatter,
) -> Result<()> {
    let capacity = match args.limit {
        Some(0) => {
            return Err(CliError::InvalidInput(
                "limit must be at least 1".to_string(),
            ))
        }
        Some(limit) => limit,
        None => capacity,
    };

    let store = store_from_fetch(client.get_incidents().await, capacity);
    tracing::debug!(
        shown = store.len(),
        evicted = store.evicted(),
        "incident history loaded"
    );

    if store.is_empty() {
        eprintln!("{}", formatter.info("No incidents reported yet"));
    }
    println!("{}", formatter.format_rows(store.rows())?);
    Ok(())
}
