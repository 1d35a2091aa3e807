//! Common constants used throughout the Scribe application.

/// Supported generator manifest file names
pub const CONFIG_FILES: [&str; 3] = ["scribe.json", "scribe.yml", "scribe.yaml"];

/// Directory inside a generator that holds named MiniJinja templates
pub const TEMPLATES_DIR: &str = "templates";

/// Directory inside a generator whose tree is emitted as verbatim assets
pub const STATIC_DIR: &str = "static";

/// Canonical file extension for named templates
pub const TEMPLATE_EXTENSION: &str = "j2";
