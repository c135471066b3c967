//! Integration Test: Core Isolation
//!
//! The campaign studio core is headless; any surface must be able to embed
//! it. These tests enforce the boundary from both sides:
//!
//! **Policy**: `studio-core` must not reference terminal crates, and the TUI
//! must not talk to the model gateway directly. All generation goes through
//! the studio.

use std::fs;
use std::path::{Path, PathBuf};

/// Terminal crates the core must never reference
const TERMINAL_TOKENS: &[&str] = &["ratatui", "crossterm"];

/// Gateway tokens the TUI must never reference
const GATEWAY_TOKENS: &[&str] = &["reqwest", "generativelanguage"];

/// Test that the core never references terminal crates
#[test]
fn test_core_has_no_terminal_dependencies() {
    let core_src = workspace_root().join("studio/core/src");
    assert!(
        core_src.exists(),
        "expected {} in the workspace",
        core_src.display()
    );

    let violations = scan_for_tokens(&core_src, TERMINAL_TOKENS);
    report("studio-core references a terminal crate", &violations);
}

/// Test that the core manifest never pulls in terminal crates
#[test]
fn test_core_manifest_has_no_terminal_dependencies() {
    let manifest = workspace_root().join("studio/core/Cargo.toml");
    let content = fs::read_to_string(&manifest).expect("core manifest is readable");

    let mut violations = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let code_part = line.split('#').next().unwrap_or(line);
        for token in TERMINAL_TOKENS {
            if code_part.contains(token) {
                violations.push(format!("{}:{} - {}", manifest.display(), idx + 1, line.trim()));
            }
        }
    }

    report("studio-core's manifest names a terminal crate", &violations);
}

/// Test that the TUI never talks to the model gateway directly
#[test]
fn test_surface_never_talks_to_the_gateway() {
    let tui_src = workspace_root().join("tui/src");
    assert!(
        tui_src.exists(),
        "expected {} in the workspace",
        tui_src.display()
    );

    let violations = scan_for_tokens(&tui_src, GATEWAY_TOKENS);
    report("the TUI talks to the gateway directly", &violations);
}

/// Resolve the workspace root from this crate's manifest directory
fn workspace_root() -> PathBuf {
    // tests/architectural-enforcement sits two levels below the root
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map(Path::to_path_buf)
        .expect("workspace root exists")
}

/// Scan all Rust sources under `dir` for forbidden tokens
fn scan_for_tokens(dir: &Path, tokens: &[&str]) -> Vec<String> {
    let mut violations = Vec::new();

    for entry in walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }

        let content = match fs::read_to_string(entry.path()) {
            Ok(c) => c,
            Err(_) => continue,
        };
        let lines: Vec<&str> = content.lines().collect();

        for token in tokens {
            for line_number in find_token_in_lines(&lines, token) {
                violations.push(format!(
                    "{}:{} - {}",
                    entry.path().display(),
                    line_number,
                    lines[line_number - 1].trim()
                ));
            }
        }
    }

    violations
}

/// Line numbers (1-based) where `token` appears outside comments
fn find_token_in_lines(lines: &[&str], token: &str) -> Vec<usize> {
    let mut hits = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        // Skip comments, including doc comments
        let code_part = line.split("//").next().unwrap_or(line);
        if code_part.contains(token) {
            hits.push(idx + 1);
        }
    }
    hits
}

/// Print the violations and panic if any exist
fn report(rule: &str, violations: &[String]) {
    if violations.is_empty() {
        return;
    }

    eprintln!("\n❌ CRITICAL: {rule}!");
    eprintln!("The studio core stays headless; surfaces stay thin.\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }

    panic!(
        "\nFound {} layering violation(s).\nFix these before merging!",
        violations.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_detection_skips_comments() {
        let code = vec![
            "//! ratatui is deliberately absent here",
            "use tokio::sync::mpsc; // not crossterm",
            "use ratatui::style::Color;",
        ];

        assert!(find_token_in_lines(&code, "crossterm").is_empty());
        assert_eq!(find_token_in_lines(&code, "ratatui"), vec![3]);
    }

    #[test]
    fn test_token_detection_finds_plain_code() {
        let code = vec!["let client = reqwest::Client::new();"];
        assert_eq!(find_token_in_lines(&code, "reqwest"), vec![1]);
    }
}
