//! Cross-reference tag embedded in event descriptions.
//!
//! When a calendar event is created from a task, the task's identifier is
//! carried inside the event description as a trailing `[tandem:<id>]` tag so
//! the pair can be re-found on later passes. The event normalizer strips the
//! tag before the description takes part in any comparison, and the remote
//! event store re-embeds it on every outgoing create/update.

const TAG_OPEN: &str = "[tandem:";
const TAG_CLOSE: char = ']';

/// Append the counterpart tag to a description.
pub fn embed(description: &str, task_ref: &str) -> String {
    if description.is_empty() {
        format!("{TAG_OPEN}{task_ref}{TAG_CLOSE}")
    } else {
        format!("{description}\n\n{TAG_OPEN}{task_ref}{TAG_CLOSE}")
    }
}

/// Extract the counterpart identifier from a description.
///
/// Returns the identifier (if a tag is present) and the description with
/// the tag and its separating blank line removed exactly, so embed followed
/// by extract round-trips.
pub fn extract(description: &str) -> (Option<String>, String) {
    let Some(open) = description.find(TAG_OPEN) else {
        return (None, description.to_string());
    };
    let after = &description[open + TAG_OPEN.len()..];
    let Some(close) = after.find(TAG_CLOSE) else {
        return (None, description.to_string());
    };

    let id = &after[..close];
    if id.is_empty() {
        return (None, description.to_string());
    }

    let before = &description[..open];
    let mut cleaned = String::with_capacity(description.len());
    cleaned.push_str(before.strip_suffix("\n\n").unwrap_or(before));
    cleaned.push_str(&after[close + TAG_CLOSE.len_utf8()..]);

    (Some(id.to_string()), cleaned)
}
