/// Synthesizes the graph URI for one agent version, following the scheme:
/// `<base>/snapshot/<agent_id>/v<version>`.
///
/// `agent_id` is used verbatim; making it URI-safe is the caller's
/// responsibility.
pub fn snapshot_graph_uri(base: &str, agent_id: &str, version: u64) -> String {
    format!("{}/snapshot/{agent_id}/v{version}", base.trim_end_matches('/'))
}

/// Synthesizes the agent URI used by [`crate::TemporalStore::snapshot_to_canonical`]'s
/// canonical projection, following the scheme: `<base>/agent/<agent_id>`.
///
/// `agent_id` is used verbatim; making it URI-safe is the caller's
/// responsibility.
pub fn agent_uri(base: &str, agent_id: &str) -> String {
    format!("{}/agent/{agent_id}", base.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_expected_shape() {
        assert_eq!(
            snapshot_graph_uri("https://agents.invalid", "agent-1", 1),
            "https://agents.invalid/snapshot/agent-1/v1"
        );
    }

    #[test]
    fn trims_trailing_slash_on_base() {
        assert_eq!(
            snapshot_graph_uri("https://agents.invalid/", "agent-1", 2),
            "https://agents.invalid/snapshot/agent-1/v2"
        );
    }

    #[test]
    fn agent_uri_builds_expected_shape() {
        assert_eq!(
            agent_uri("https://agents.invalid", "agent-1"),
            "https://agents.invalid/agent/agent-1"
        );
    }

    #[test]
    fn agent_uri_trims_trailing_slash_on_base() {
        assert_eq!(
            agent_uri("https://agents.invalid/", "agent-1"),
            "https://agents.invalid/agent/agent-1"
        );
    }
}
