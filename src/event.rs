//! Hook events: the classifier from the environment and the record from stdin.

use std::io::Read;

use serde_json::{Map, Value};
use tracing::debug;

/// Lifecycle event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    SessionStart,
    SubagentStop,
    Notification,
    Stop,
    PreCompact,
    Other,
}

/// Markers are matched by containment, in this order. `SubagentStop` must
/// come before `Stop`.
const MARKERS: [(&str, HookKind); 5] = [
    ("SessionStart", HookKind::SessionStart),
    ("SubagentStop", HookKind::SubagentStop),
    ("Notification", HookKind::Notification),
    ("Stop", HookKind::Stop),
    ("PreCompact", HookKind::PreCompact),
];

impl HookKind {
    pub fn from_classifier(raw: &str) -> Self {
        MARKERS
            .iter()
            .find(|(marker, _)| raw.contains(marker))
            .map_or(Self::Other, |&(_, kind)| kind)
    }
}

/// The raw event classifier plus its parsed kind.
///
/// The raw string is kept because compaction can also be signalled by a
/// `:compact` suffix on the classifier itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookClassifier {
    raw: String,
    kind: HookKind,
}

impl HookClassifier {
    pub const ENV_VAR: &'static str = "CLAUDE_HOOK_TYPE";

    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let kind = HookKind::from_classifier(&raw);
        Self { raw, kind }
    }

    /// An explicit override wins over `CLAUDE_HOOK_TYPE`, which defaults to
    /// `unknown`.
    pub fn from_env(explicit: Option<&str>) -> Self {
        match explicit {
            Some(raw) => Self::new(raw),
            None => Self::new(std::env::var(Self::ENV_VAR).unwrap_or_else(|_| "unknown".into())),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> HookKind {
        self.kind
    }

    pub fn is_session_start(&self) -> bool {
        self.kind == HookKind::SessionStart
    }

    fn marks_compaction(&self) -> bool {
        self.raw.to_lowercase().contains(":compact")
    }
}

/// Why a session started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    Startup,
    Resume,
    Clear,
    Compact,
    Other,
}

impl SessionSource {
    /// Compaction is detected on the lowercased `source` *or* on the
    /// classifier; the other variants need an exact `source` match.
    pub fn classify(source: Option<&str>, classifier: &HookClassifier) -> Self {
        let source = source.unwrap_or_default();
        if source.to_lowercase().contains("compact") || classifier.marks_compaction() {
            return Self::Compact;
        }
        match source {
            "startup" => Self::Startup,
            "resume" => Self::Resume,
            "clear" => Self::Clear,
            _ => Self::Other,
        }
    }
}

/// The fields of the stdin document this hook cares about.
///
/// Parsing is lenient: anything that is not a JSON object, and any field that
/// is not a string, is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventRecord {
    pub source: Option<String>,
    pub message: Option<String>,
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_owned)
}

impl EventRecord {
    pub fn parse(input: &str) -> Self {
        if input.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<Value>(input) {
            Ok(Value::Object(map)) => Self {
                source: string_field(&map, "source"),
                message: string_field(&map, "message"),
            },
            Ok(other) => {
                debug!("Event data is not an object: {other}");
                Self::default()
            }
            Err(e) => {
                debug!("Ignoring malformed event data: {e}");
                Self::default()
            }
        }
    }

    pub fn read_from<R: Read>(mut reader: R) -> Self {
        let mut input = String::new();
        match reader.read_to_string(&mut input) {
            Ok(_) => Self::parse(&input),
            Err(e) => {
                debug!("Failed to read event data: {e}");
                Self::default()
            }
        }
    }

    /// The explicit message. Present-but-empty still counts.
    pub fn explicit_message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
