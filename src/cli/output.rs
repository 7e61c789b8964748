//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use serde_json::Value;

use crate::cli::args::OutputFormat;
use crate::cli::CliError;
use crate::domain::{EnvVar, RuntimeHealth, VersionEntry};

/// Print error (red "Error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}", format!("Error: {}", msg).red());
}

/// Print an error with its API status code and details, if any.
pub fn report(err: &CliError) {
    error(err);
    if let Some(status) = err.status() {
        eprintln!("{}", format!("Status Code: {}", status).red());
    }
    if let Some(details) = err.details().filter(|d| is_truthy(d)) {
        eprintln!("{}", format!("Details: {}", pretty_json(details)).red());
    }
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", format!("✓ {}", msg).green());
}

/// Print plain output (no color)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print prompt without newline (cyan)
pub fn prompt(msg: &(impl std::fmt::Display + ?Sized)) {
    use std::io::Write;
    print!("{} ", msg.to_string().cyan());
    std::io::stdout().flush().ok();
}

/// Print an API response in the requested format.
pub fn response(value: &Value, format: OutputFormat) {
    println!("{}", render(value, format));
}

pub fn render(value: &Value, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => pretty_json(value),
    }
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Python-style truthiness: null, false, 0, "" and empty collections are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Scalars print bare, everything else as compact JSON.
pub fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Sorted, masked summary of the variables about to be sent.
///
/// Empty when there is nothing to show.
pub fn env_summary(vars: &[EnvVar]) -> String {
    if vars.is_empty() {
        return String::new();
    }
    let mut sorted: Vec<&EnvVar> = vars.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut out = String::from("\nEnvironment variables:\n");
    for var in sorted {
        let label = if var.secret { " (secret)" } else { "" };
        out.push_str(&format!("  {}: {}{}\n", var.name, var.display_value(), label));
    }
    out
}

/// Human-readable block for a `status` response's `runtime_health`.
pub fn health_summary(health: &RuntimeHealth) -> String {
    let status = health.status.as_deref().unwrap_or("unknown");
    let colored_status = match status {
        "ok" => status.green(),
        "paused" => status.yellow(),
        _ => status.red(),
    };
    let ready = health
        .ready
        .as_ref()
        .filter(|r| !r.is_null())
        .map(plain)
        .unwrap_or_else(|| "unknown".into());

    let mut lines = vec![
        format!("Status: {}", colored_status),
        format!("Ready: {}", ready),
    ];
    if let Some(last) = health.last_event_received.as_ref().filter(|v| is_truthy(v)) {
        lines.push(format!("Last Event: {}", plain(last)));
    }
    if let Some(errors) = health.errors.as_ref().filter(|v| is_truthy(v)) {
        lines.push(format!("Errors: {}", plain(errors)).red().to_string());
    }
    lines.push(String::new());
    lines.join("\n")
}

/// Listing for a `list_versions` response; the current version is starred.
pub fn version_list(versions: &[VersionEntry]) -> String {
    if versions.is_empty() {
        return "No versions found.".into();
    }

    let mut lines = vec![format!("Found {} version(s):\n", versions.len())];
    for v in versions {
        let number = v.version.as_ref().map(plain).unwrap_or_else(|| "?".into());
        let created = v
            .created_at
            .as_ref()
            .filter(|c| !c.is_null())
            .map(plain)
            .unwrap_or_else(|| "unknown".into());
        let marker = if v.is_current {
            "★".green().to_string()
        } else {
            " ".to_string()
        };
        lines.push(format!("{} Version {} - Created: {}", marker, number, created));
        if let Some(description) = v.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(format!("  Description: {}", description));
        }
    }
    lines.push(String::new());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn no_color() {
        colored::control::set_override(false);
    }

    #[test]
    fn given_secret_var_when_summarizing_then_value_masked() {
        no_color();
        let vars = vec![
            EnvVar {
                name: "ZED".into(),
                value: "visible".into(),
                secret: false,
            },
            EnvVar {
                name: "API_KEY".into(),
                value: "secret-key-123".into(),
                secret: true,
            },
        ];

        let out = env_summary(&vars);

        assert!(out.contains("API_KEY: *** (secret)"));
        assert!(out.contains("ZED: visible"));
        assert!(!out.contains("secret-key-123"));
        assert!(out.find("API_KEY").unwrap() < out.find("ZED").unwrap());
    }

    #[test]
    fn given_full_health_when_summarizing_then_all_lines_present() {
        no_color();
        let health = RuntimeHealth::from_response(&json!({
            "runtime_health": {
                "status": "ok",
                "ready": true,
                "last_event_received": "2024-05-01T10:00:00Z",
                "errors": ["boom"]
            }
        }))
        .unwrap();

        let out = health_summary(&health);

        assert!(out.contains("Status: ok"));
        assert!(out.contains("Ready: true"));
        assert!(out.contains("Last Event: 2024-05-01T10:00:00Z"));
        assert!(out.contains("Errors: [\"boom\"]"));
    }

    #[test]
    fn given_sparse_health_when_summarizing_then_defaults_to_unknown() {
        no_color();
        let health = RuntimeHealth::from_response(&json!({"runtime_health": {"errors": []}}))
            .unwrap();

        let out = health_summary(&health);

        assert!(out.contains("Status: unknown"));
        assert!(out.contains("Ready: unknown"));
        assert!(!out.contains("Last Event"));
        assert!(!out.contains("Errors"));
    }

    #[test]
    fn given_versions_when_listing_then_current_marked_and_described() {
        no_color();
        let versions = VersionEntry::list_from_response(&json!({
            "versions": [
                {"version": 2, "created_at": "2024-05-02", "is_current": true, "description": "hotfix"},
                {"version": 1, "created_at": "2024-05-01"}
            ]
        }))
        .unwrap();

        let out = version_list(&versions);

        assert!(out.contains("Found 2 version(s):"));
        assert!(out.contains("★ Version 2 - Created: 2024-05-02"));
        assert!(out.contains("  Description: hotfix"));
        assert!(out.contains("  Version 1 - Created: 2024-05-01"));
    }

    #[test]
    fn given_no_versions_when_listing_then_says_so() {
        assert_eq!(version_list(&[]), "No versions found.");
    }

    #[test]
    fn given_values_when_checking_truthiness_then_matches_python() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(is_truthy(&json!({"a": 1})));
        assert!(is_truthy(&json!("x")));
    }

    #[test]
    fn given_json_format_when_rendering_then_pretty_printed() {
        let out = render(&json!({"id": "123"}), OutputFormat::Json);
        assert_eq!(out, "{\n  \"id\": \"123\"\n}");
    }
}
