//! What to say for each hook event.

use crate::event::{EventRecord, HookClassifier, HookKind, SessionSource};

/// Explicit messages containing this (case-insensitively) are replaced by a
/// request for help.
const WAITING_PATTERN: &str = "waiting for your input";

/// Build the spoken message.
///
/// Precedence: explicit message (with the waiting-for-input rewrite), then
/// compaction, then the session-start source, then the other hook kinds, then
/// the generic fallback.
pub fn compose(
    classifier: &HookClassifier,
    record: &EventRecord,
    project: &str,
    addressee: &str,
) -> String {
    if let Some(message) = record.explicit_message() {
        if message.to_lowercase().contains(WAITING_PATTERN) {
            return format!("{addressee}, I need your help in {project}");
        }
        return message.to_string();
    }

    match classifier.kind() {
        HookKind::SessionStart => {
            match SessionSource::classify(record.source.as_deref(), classifier) {
                SessionSource::Compact => {
                    format!("{addressee}, we have compacted the context window in {project}")
                }
                SessionSource::Resume => format!("{addressee}, I am resuming work on {project}"),
                SessionSource::Clear => {
                    format!("{addressee}, I have cleared the context and am ready for {project}")
                }
                SessionSource::Startup | SessionSource::Other => {
                    format!("{addressee}, I am ready to work on {project}")
                }
            }
        }
        HookKind::SubagentStop => format!(
            "{addressee}, the subagent has completed its work in {project}, moving on now"
        ),
        HookKind::Notification => format!("{addressee}, I need your help in {project}"),
        HookKind::Stop => format!("{addressee}, I have completed my work in {project}"),
        HookKind::PreCompact => {
            format!("{addressee}, preparing to compact the context window in {project}")
        }
        HookKind::Other => format!("{addressee}, Claude needs your input in {project}"),
    }
}
