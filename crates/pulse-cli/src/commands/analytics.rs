//! Analytics command implementation.

use crate::cli::AnalyticsArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::views::AnalyticsView;
use pulse_sdk::PulseClient;

/// Execute the analytics command.
pub async fn execute_analytics(
    args: AnalyticsArgs,
    client: &PulseClient,
    formatter: &Formatter,
) -> Result<()> {
    let view = AnalyticsView::from_fetch(client.get_analytics().await, args.period.into());
    println!("{}", formatter.format_analytics(&view)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PeriodArg;
    use crate::config::OutputFormat;
    use pulse_sdk::{Endpoint, Scheme};

    #[tokio::test]
    async fn test_unreachable_server_does_not_fail() {
        // Port 1 is never an edge server; the fetch fails and the view falls back.
        let client = PulseClient::new(Endpoint::new(Scheme::Http, "127.0.0.1", 1)).unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let args = AnalyticsArgs {
            period: PeriodArg::Year,
        };
        assert!(execute_analytics(args, &client, &formatter).await.is_ok());
    }
}
