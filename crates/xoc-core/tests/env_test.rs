//! Tests for environment configuration getters

use serial_test::serial;
use std::time::Duration;
use xoc_core::env;

const VARS: [&str; 7] = [
    "PORT",
    "CORS_ORIGIN",
    "AGENT_API_URL",
    "AGENT_API_KEY",
    "AGENT_TIMEOUT_SECONDS",
    "AGENT_MOCK",
    "DEMO_STEP_DELAY_MS",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_when_unset() {
    clear_env();

    assert_eq!(env::server::port(), 3001);
    assert_eq!(env::server::cors_origin(), "http://localhost:3000");
    assert_eq!(
        env::agent::api_url(),
        "http://127.0.0.1:9090/agent/stream"
    );
    assert_eq!(env::agent::api_key(), None);
    assert_eq!(env::agent::timeout(), Duration::from_secs(300));
    assert!(!env::agent::use_mock());
    assert_eq!(
        env::demo::step_delay(Duration::from_secs(5)),
        Duration::from_secs(5)
    );
}

#[test]
#[serial]
fn test_values_from_env() {
    clear_env();
    std::env::set_var("PORT", "8080");
    std::env::set_var("AGENT_API_KEY", "secret");
    std::env::set_var("AGENT_TIMEOUT_SECONDS", " 30 ");
    std::env::set_var("AGENT_MOCK", "TRUE");
    std::env::set_var("DEMO_STEP_DELAY_MS", "250");

    assert_eq!(env::server::port(), 8080);
    assert_eq!(env::agent::api_key().as_deref(), Some("secret"));
    assert_eq!(env::agent::timeout(), Duration::from_secs(30));
    assert!(env::agent::use_mock());
    assert_eq!(
        env::demo::step_delay(Duration::from_secs(5)),
        Duration::from_millis(250)
    );

    clear_env();
}

#[test]
#[serial]
fn test_invalid_values_fall_back() {
    clear_env();
    std::env::set_var("PORT", "not-a-port");
    std::env::set_var("AGENT_API_KEY", "   ");
    std::env::set_var("DEMO_STEP_DELAY_MS", "-5");

    assert_eq!(env::server::port(), 3001);
    assert_eq!(env::agent::api_key(), None);
    assert_eq!(
        env::demo::step_delay(Duration::from_secs(5)),
        Duration::from_secs(5)
    );

    clear_env();
}

#[test]
#[serial]
fn test_session_from_env_uses_scripted_agent_when_mocked() {
    clear_env();
    std::env::set_var("AGENT_MOCK", "1");

    let session = xoc_core::session_from_env().unwrap();
    assert!(session.config().thread_id.starts_with("xoc-demo-"));

    clear_env();
}
