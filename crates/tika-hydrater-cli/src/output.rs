//! Output formatting for the CLI.

use crate::error::Result;
use tika_hydrater::Changes;

/// Render a changes record as JSON.
pub fn render_changes(changes: &Changes, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(changes)?
    } else {
        serde_json::to_string(changes)?
    };
    Ok(json)
}
