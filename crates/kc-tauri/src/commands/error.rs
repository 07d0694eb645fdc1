/// Centralized error mapping for commands.
///
/// Uses the alternate format so the whole context chain reaches the page.
pub fn map_err(err: anyhow::Error) -> String {
    format!("{err:#}")
}
