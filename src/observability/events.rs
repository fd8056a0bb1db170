//! Observable events
//!
//! Events are explicit and typed; every log line the crate emits names one.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A versioned schema finished building
    SchemaBuilt,
    /// A version-specific field replaced a base field of the same name
    FieldShadowed,
    /// A caller field named like the tag field was replaced by the tag literal
    TagFieldOverwritten,
    /// A build was refused
    BuildRejected,
    /// A value matched no version
    ParseRejected,
    /// A definition file was read and built
    DefinitionLoaded,
}

impl Event {
    /// Returns the event name written to the `event` key
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SchemaBuilt => "VERSIONED_SCHEMA_BUILT",
            Event::FieldShadowed => "VERSIONED_FIELD_SHADOWED",
            Event::TagFieldOverwritten => "VERSIONED_TAG_FIELD_OVERWRITTEN",
            Event::BuildRejected => "VERSIONED_BUILD_REJECTED",
            Event::ParseRejected => "VERSIONED_PARSE_REJECTED",
            Event::DefinitionLoaded => "VERSIONED_DEFINITION_LOADED",
        }
    }

    /// Returns the severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::SchemaBuilt | Event::DefinitionLoaded => Severity::Info,
            Event::FieldShadowed | Event::TagFieldOverwritten => Severity::Warn,
            Event::BuildRejected => Severity::Error,
            Event::ParseRejected => Severity::Trace,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::SchemaBuilt,
            Event::FieldShadowed,
            Event::TagFieldOverwritten,
            Event::BuildRejected,
            Event::ParseRejected,
            Event::DefinitionLoaded,
        ];
        for event in events {
            assert!(event.as_str().starts_with("VERSIONED_"));
        }
    }

    #[test]
    fn test_event_severities() {
        assert_eq!(Event::SchemaBuilt.severity(), Severity::Info);
        assert_eq!(Event::FieldShadowed.severity(), Severity::Warn);
        assert_eq!(Event::BuildRejected.severity(), Severity::Error);
        assert_eq!(Event::ParseRejected.severity(), Severity::Trace);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::ParseRejected), "VERSIONED_PARSE_REJECTED");
    }
}
