//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT call sleep methods. The studio is
//! event-driven: finished work arrives through the completion channel, and
//! surfaces apply it on their frame cadence.
//!
//! **Exceptions**: Frame rate limiting (TUI only) and test code.

use std::fs;
use std::path::{Path, PathBuf};

/// Test that production code does not contain sleep() calls
#[test]
fn test_no_sleep_in_production_code() {
    let violations = find_sleep_violations();

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Sleep calls found in production code!");
        eprintln!("Generation work reports back through the completion channel.\n");

        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }

        eprintln!("\n✅ ACCEPTABLE sleep uses:");
        eprintln!("  - Frame rate limiting in the TUI event loop");
        eprintln!("  - Test code (#[test] or #[tokio::test] functions)");
        eprintln!("\n❌ FORBIDDEN:");
        eprintln!("  - Sleep in polling loops");
        eprintln!("  - Sleep as poor man's synchronization");
        eprintln!("  - Sleep to 'wait' for generation to finish");

        panic!(
            "\nFound {} sleep violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

/// Find all sleep() calls in production code
fn find_sleep_violations() -> Vec<String> {
    let mut violations = Vec::new();
    let root = workspace_root();

    // The studio core never sleeps
    check_directory(
        &root.join("studio/core/src"),
        &mut violations,
        &SleepPolicy {
            allow_frame_limiting: false,
            allow_tests: true,
        },
    );

    // The TUI may sleep only to pace its frames
    check_directory(
        &root.join("tui/src"),
        &mut violations,
        &SleepPolicy {
            allow_frame_limiting: true,
            allow_tests: true,
        },
    );

    violations
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

struct SleepPolicy {
    allow_frame_limiting: bool,
    allow_tests: bool,
}

fn check_directory(dir: &Path, violations: &mut Vec<String>, policy: &SleepPolicy) {
    assert!(dir.exists(), "expected {} in the workspace", dir.display());

    for entry in walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.path().extension().and_then(|s| s.to_str()) == Some("rs") {
            check_file(entry.path(), violations, policy);
        }
    }
}

fn check_file(path: &Path, violations: &mut Vec<String>, policy: &SleepPolicy) {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return,
    };

    let lines: Vec<&str> = content.lines().collect();

    for (idx, line) in lines.iter().enumerate() {
        let line_number = idx + 1;

        // Skip comments
        let code_part = line.split("//").next().unwrap_or(line);

        // Check for sleep calls
        if code_part.contains("::sleep(") || code_part.contains(".sleep(") {
            // Check if it's in a test function
            if policy.allow_tests && is_in_test_function(&lines, idx) {
                continue;
            }

            // Check if it's frame limiting (only in the TUI event loop)
            if policy.allow_frame_limiting
                && path.ends_with("tui/src/app.rs")
                && is_frame_limiting_context(&lines, idx)
            {
                continue;
            }

            violations.push(format!(
                "{}:{} - {}",
                path.display(),
                line_number,
                line.trim()
            ));
        }
    }
}

/// Check if line is inside a test function
fn is_in_test_function(lines: &[&str], current_idx: usize) -> bool {
    // Scan backwards for #[test] or #[tokio::test]
    for i in (0..current_idx).rev() {
        let line = lines[i].trim();

        if line.starts_with("fn ") && !line.contains("test") {
            return false; // Found a non-test function first
        }

        if line.starts_with("#[test]") || line.starts_with("#[tokio::test") {
            return true;
        }

        // Stop at module boundaries
        if line.starts_with("mod ") || line.starts_with("impl ") {
            return false;
        }
    }
    false
}

/// Check if sleep is used for frame rate limiting (acceptable in the TUI)
fn is_frame_limiting_context(lines: &[&str], current_idx: usize) -> bool {
    // Look for frame_duration, frame rate, or FPS in nearby lines
    let context_range = current_idx.saturating_sub(10)..std::cmp::min(current_idx + 5, lines.len());

    for i in context_range {
        let line = lines[i].to_lowercase();
        if line.contains("frame")
            || line.contains("fps")
            || line.contains("rate limit")
            || line.contains("tick_rate")
        {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleep_violation_detection() {
        // This test verifies that the detector itself works
        let test_code = vec![
            "fn bad_function() {",
            "    tokio::time::sleep(Duration::from_millis(10)).await;",
            "}",
        ];

        assert!(
            !is_in_test_function(&test_code, 1),
            "Should detect this is not a test"
        );
    }

    #[test]
    fn test_test_function_detection() {
        let test_code = vec![
            "#[tokio::test]",
            "async fn test_something() {",
            "    tokio::time::sleep(Duration::from_millis(10)).await;",
            "}",
        ];

        assert!(
            is_in_test_function(&test_code, 2),
            "Should detect the test marker"
        );
    }

    #[test]
    fn test_frame_limiting_detection() {
        let test_code = vec![
            "fn render_loop() {",
            "    let frame_duration = Duration::from_millis(100); // 10 FPS",
            "    loop {",
            "        render();",
            "        tokio::time::sleep(frame_duration).await;",
            "    }",
            "}",
        ];

        assert!(
            is_frame_limiting_context(&test_code, 4),
            "Should detect frame rate limiting"
        );
    }

    #[test]
    fn test_unrelated_sleep_is_not_frame_limiting() {
        let test_code = vec![
            "async fn wait_for_result() {",
            "    tokio::time::sleep(Duration::from_secs(1)).await;",
            "}",
        ];

        assert!(
            !is_frame_limiting_context(&test_code, 1),
            "Should not excuse a bare polling sleep"
        );
    }
}
