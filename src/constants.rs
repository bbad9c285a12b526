//! Application constants
//!
//! Centralized location for magic strings, body templates and configuration defaults.

/// Application name
pub const APP_NAME: &str = "API Fuzztester";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Notice shown when a submission has no URL
pub const MSG_MISSING_URL: &str = "Please enter a URL";

/// Notice shown while a test attempt is pending
pub const MSG_TESTING: &str = "Testing API...";

/// Notice shown when a test attempt completes
pub const MSG_COMPLETED: &str = "API test completed!";

/// Canonical JSON body
pub const TEMPLATE_JSON: &str = r#"{
  "key": "value",
  "number": 42,
  "nested": { "example": true }
}"#;

/// Canonical XML body
pub const TEMPLATE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<root>
  <key>value</key>
  <number>42</number>
  <nested>
    <example>true</example>
  </nested>
</root>"#;

/// Canonical form data body
pub const TEMPLATE_FORM_DATA: &str = "key=value
number=42
nested[example]=true";

/// Canonical plain text body
pub const TEMPLATE_TEXT: &str = "Example request body
Line 2
Line 3";

/// Latency of the simulated test attempt
pub const DEFAULT_SIMULATED_LATENCY_MS: u64 = 1500;

/// Pending attempts are force-failed after this long
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How long error and success notices stay visible
pub const DEFAULT_TOAST_DURATION_MS: u64 = 4000;

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "fuzztester.log";

/// Config directory name under the home directory
pub const CONFIG_DIR: &str = ".fuzztester";

/// Config file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.yaml";
