/// Marker the Register program logs the dispatched message id behind.
pub const REGISTER_LOG_MARKER: &str = "register ";

/// Message id from the first log line containing [`REGISTER_LOG_MARKER`].
///
/// The id is whatever follows the first occurrence of the marker on that line.
/// A line with nothing after the marker yields `None`.
pub fn extract_message_id<S: AsRef<str>>(logs: &[S]) -> Option<String> {
    logs.iter()
        .map(AsRef::as_ref)
        .find(|line| line.contains(REGISTER_LOG_MARKER))
        .and_then(|line| line.split(REGISTER_LOG_MARKER).nth(1))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
