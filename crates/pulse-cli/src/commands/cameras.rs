//! Cameras command implementation.

use crate::error::Result;
use crate::output::Formatter;
use crate::views::cameras_from_fetch;
use pulse_sdk::PulseClient;

/// Execute the cameras command.
pub async fn execute_cameras(client: &PulseClient, formatter: &Formatter) -> Result<()> {
    let cameras = cameras_from_fetch(client.get_cameras().await);
    println!("{}", formatter.format_cameras(&cameras)?);
    Ok(())
}
