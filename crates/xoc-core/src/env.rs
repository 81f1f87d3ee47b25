//! Environment variable configuration for the demo services
//!
//! Every getter falls back to a default when the variable is missing or
//! does not parse.

use std::env;
use std::str::FromStr;
use std::time::Duration;

fn parsed_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| T::from_str(value.trim()).ok())
        .unwrap_or(default)
}

/// HTTP server configuration
pub mod server {
    use super::*;

    /// Port the API server listens on
    pub fn port() -> u16 {
        parsed_or("PORT", 3001)
    }

    /// Origin allowed to call the API from a browser
    pub fn cors_origin() -> String {
        env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string())
    }
}

/// Agent service configuration
pub mod agent {
    use super::*;

    /// Streaming endpoint of the agent service
    pub fn api_url() -> String {
        env::var("AGENT_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:9090/agent/stream".to_string())
    }

    /// Bearer token for the agent service, if any
    pub fn api_key() -> Option<String> {
        env::var("AGENT_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Upper bound on a single agent request
    pub fn timeout() -> Duration {
        Duration::from_secs(parsed_or("AGENT_TIMEOUT_SECONDS", 300))
    }

    /// Use the offline scripted agent instead of the agent service
    pub fn use_mock() -> bool {
        matches!(
            env::var("AGENT_MOCK").map(|v| v.to_lowercase()).as_deref(),
            Ok("1") | Ok("true") | Ok("yes")
        )
    }
}

/// Demo pacing configuration
pub mod demo {
    use super::*;

    /// Pause between commands, `DEMO_STEP_DELAY_MS` or `default`
    pub fn step_delay(default: Duration) -> Duration {
        env::var("DEMO_STEP_DELAY_MS")
            .ok()
            .and_then(|value| u64::from_str(value.trim()).ok())
            .map(Duration::from_millis)
            .unwrap_or(default)
    }
}
