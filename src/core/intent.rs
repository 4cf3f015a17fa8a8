//! Backend intent classification, used only for display labels.

/// The category the backend assigned to a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Default sentinel; never shown as a badge.
    General,
    ConcurrentManager,
    Workflow,
    InvalidObjects,
    Tablespace,
    ConcurrentRequests,
    Alerts,
    /// Identifier this client does not know. Displayed verbatim.
    Other(String),
}

impl Intent {
    pub fn from_id(id: &str) -> Self {
        match id {
            "general" => Intent::General,
            "concurrent_manager" => Intent::ConcurrentManager,
            "workflow" => Intent::Workflow,
            "invalid_objects" => Intent::InvalidObjects,
            "tablespace" => Intent::Tablespace,
            "concurrent_requests" => Intent::ConcurrentRequests,
            "alerts" => Intent::Alerts,
            other => Intent::Other(other.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Intent::General => "general",
            Intent::ConcurrentManager => "concurrent_manager",
            Intent::Workflow => "workflow",
            Intent::InvalidObjects => "invalid_objects",
            Intent::Tablespace => "tablespace",
            Intent::ConcurrentRequests => "concurrent_requests",
            Intent::Alerts => "alerts",
            Intent::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Intent::General => "General",
            Intent::ConcurrentManager => "Concurrent Manager",
            Intent::Workflow => "Workflow",
            Intent::InvalidObjects => "Invalid Objects",
            Intent::Tablespace => "Tablespace",
            Intent::ConcurrentRequests => "Requests",
            Intent::Alerts => "Alerts",
            Intent::Other(raw) => raw,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Intent::General)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels() {
        assert_eq!(Intent::from_id("concurrent_manager").label(), "Concurrent Manager");
        assert_eq!(Intent::from_id("workflow").label(), "Workflow");
        assert_eq!(Intent::from_id("invalid_objects").label(), "Invalid Objects");
        assert_eq!(Intent::from_id("tablespace").label(), "Tablespace");
        assert_eq!(Intent::from_id("concurrent_requests").label(), "Requests");
        assert_eq!(Intent::from_id("alerts").label(), "Alerts");
    }

    #[test]
    fn unknown_identifier_displays_raw() {
        let intent = Intent::from_id("unknown");
        assert_eq!(intent, Intent::Other("unknown".into()));
        assert_eq!(intent.label(), "unknown");
        assert!(!intent.is_default());
    }

    #[test]
    fn general_is_the_default() {
        assert!(Intent::from_id("general").is_default());
        assert!(!Intent::from_id("alerts").is_default());
    }

    #[test]
    fn id_round_trips() {
        for id in ["general", "workflow", "alerts", "patching"] {
            assert_eq!(Intent::from_id(id).id(), id);
        }
    }
}
