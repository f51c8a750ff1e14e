//! Failure classification for `go` command output
//!
//! Known failure signatures are kept in [`SIGNATURES`], matched in table order
//! against the captured output. The first signature with a matching needle wins.
//! Extending the table does not require touching [`classify_failure`].

use crate::error::Error;

/// Revision of [`SIGNATURES`], bumped whenever an entry changes
pub const SIGNATURE_TABLE_VERSION: u32 = 1;

/// Category of a failed query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Package or path could not be resolved
    NotFound,
    /// Package resolved but the symbol does not exist
    SymbolNotFound,
    /// Build constraints exclude every file for the current platform
    PlatformExcluded,
    /// Command failed for a reason outside the signature table
    Unclassified,
    /// Command succeeded but printed nothing
    EmptyResult,
    /// Command exceeded its deadline
    Timeout,
    /// Command could not be started
    Spawn,
}

/// A known failure signature
#[derive(Debug)]
pub struct Signature {
    /// Resulting failure kind
    pub kind: FailureKind,
    /// Substrings, any of which identifies this failure
    pub needles: &'static [&'static str],
    /// Guidance emitted ahead of the raw output
    pub guidance: &'static str,
}

impl Signature {
    fn matches(&self, output: &str) -> bool {
        self.needles.iter().any(|needle| output.contains(needle))
    }
}

/// Guidance for an unresolvable package or path
pub const PACKAGE_NOT_FOUND_GUIDANCE: &str = "Package not found. Suggestions:\n\
1. For standard library packages, use just the package name (e.g., 'io', 'net/http')\n\
2. For external packages, use the full import path and ensure the module is required by the working module\n\
3. For local packages, provide the relative path (e.g., './pkg') or absolute path\n\
4. Check for typos in the package name";

/// Guidance for a missing symbol
pub const SYMBOL_NOT_FOUND_GUIDANCE: &str = "Symbol not found. Suggestions:\n\
1. Check if the symbol name is correct (case-sensitive)\n\
2. Use -u flag to see unexported symbols\n\
3. Use -all flag to see all package documentation";

/// Guidance for build-constraint exclusion
pub const PLATFORM_EXCLUDED_GUIDANCE: &str = "No Go files found for current platform. Suggestions:\n\
1. Try using -all flag to see all package files\n\
2. Check if you need to set GOOS/GOARCH environment variables";

/// Known failure signatures, in priority order
pub static SIGNATURES: &[Signature] = &[
    Signature {
        kind: FailureKind::NotFound,
        needles: &[
            "no such package",
            "is not in std",
            "cannot find package",
            "no required module provides package",
            "cannot find module providing package",
            "package not found",
        ],
        guidance: PACKAGE_NOT_FOUND_GUIDANCE,
    },
    Signature {
        kind: FailureKind::SymbolNotFound,
        needles: &["no such symbol", "no symbol", "no method or field"],
        guidance: SYMBOL_NOT_FOUND_GUIDANCE,
    },
    Signature {
        kind: FailureKind::PlatformExcluded,
        needles: &["build constraints exclude all Go files"],
        guidance: PLATFORM_EXCLUDED_GUIDANCE,
    },
];

/// An error message enriched with next steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    /// Failure category
    pub kind: FailureKind,
    /// Caller-facing message, always carrying the raw command output
    pub message: String,
}

impl ClassifiedError {
    /// Failure for a zero-exit command that printed nothing
    #[must_use]
    pub fn empty_result(command_line: &str, working_dir: &str) -> Self {
        Self {
            kind: FailureKind::EmptyResult,
            message: format!(
                "No documentation found by running the command: {command_line} from the directory: {working_dir}"
            ),
        }
    }

    /// Classify an error raised before any output was available
    #[must_use]
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::Timeout { command, timeout } => Self {
                kind: FailureKind::Timeout,
                message: format!(
                    "`{command}` did not finish within {}s. Suggestions:\n\
1. Narrow the query to a single package or symbol\n\
2. Raise toolchain.command_timeout_secs if the module is large or dependencies are still downloading",
                    timeout.as_secs()
                ),
            },
            Error::Execution { command, message } => Self {
                kind: FailureKind::Spawn,
                message: format!(
                    "Failed to run `{command}`: {message}\n\
Tip: check that the Go toolchain is installed and toolchain.go_binary points at it"
                ),
            },
            other => Self {
                kind: FailureKind::Unclassified,
                message: other.to_string(),
            },
        }
    }
}

/// Find the first signature matching `output`
#[must_use]
pub fn match_signature(output: &str) -> Option<&'static Signature> {
    SIGNATURES.iter().find(|signature| signature.matches(output))
}

/// Classify a non-zero exit of `subcommand` (e.g. `go doc`).
///
/// `exit` is the raw exit description, `output` the combined command output.
#[must_use]
pub fn classify_failure(subcommand: &str, exit: &str, output: &str) -> ClassifiedError {
    let (kind, message) = match match_signature(output) {
        Some(signature) => (
            signature.kind,
            format!("{}\nError details: {exit}\n{output}", signature.guidance),
        ),
        None => (
            FailureKind::Unclassified,
            format!(
                "{subcommand} error: {exit}\noutput: {output}\nTip: Use -h flag to see all available options"
            ),
        ),
    };

    tracing::warn!(?kind, subcommand, exit, "query failed");
    ClassifiedError { kind, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_package_not_found() {
        let output = "doc: no such package github.com/nope/nope\n";
        let classified = classify_failure("go doc", "exit status 1", output);
        assert_eq!(classified.kind, FailureKind::NotFound);
        assert!(classified.message.contains(PACKAGE_NOT_FOUND_GUIDANCE));
        assert!(classified.message.contains(output));
    }

    #[test]
    fn test_not_in_std() {
        let output = "package foo is not in std (/usr/local/go/src/foo)";
        let classified = classify_failure("go doc", "exit status 1", output);
        assert_eq!(classified.kind, FailureKind::NotFound);
    }

    #[test]
    fn test_package_signature_wins_over_symbol() {
        let output = "no such symbol Foo\ncannot find package bar";
        let classified = classify_failure("go doc", "exit status 1", output);
        assert_eq!(classified.kind, FailureKind::NotFound);
    }

    #[test]
    fn test_symbol_not_found() {
        let output = "doc: no symbol Frobnicate in package io\nexit status 1\n";
        let classified = classify_failure("go doc", "exit status 1", output);
        assert_eq!(classified.kind, FailureKind::SymbolNotFound);
        assert!(classified.message.starts_with(SYMBOL_NOT_FOUND_GUIDANCE));
        assert!(classified.message.contains(output));
    }

    #[test]
    fn test_platform_excluded() {
        let output = "build constraints exclude all Go files in /src/winonly";
        let classified = classify_failure("go doc", "exit status 1", output);
        assert_eq!(classified.kind, FailureKind::PlatformExcluded);
        assert!(classified.message.contains("GOOS/GOARCH"));
        assert!(classified.message.contains(output));
    }

    #[test]
    fn test_unclassified() {
        let output = "flag provided but not defined: -bogus";
        let classified = classify_failure("go list", "exit status 2", output);
        assert_eq!(classified.kind, FailureKind::Unclassified);
        assert_eq!(
            classified.message,
            "go list error: exit status 2\noutput: flag provided but not defined: -bogus\nTip: Use -h flag to see all available options"
        );
    }

    #[test]
    fn test_missing_tool_is_not_a_missing_package() {
        let output = "# runtime/cgo\nexec: \"gcc\": executable file not found in $PATH";
        let classified = classify_failure("go list", "exit status 1", output);
        assert_eq!(classified.kind, FailureKind::Unclassified);
        assert!(!classified.message.contains(PACKAGE_NOT_FOUND_GUIDANCE));
    }

    #[test]
    fn test_missing_module_is_not_found() {
        let output = "cannot find module providing package example.com/gone: module lookup disabled";
        let classified = classify_failure("go list", "exit status 1", output);
        assert_eq!(classified.kind, FailureKind::NotFound);
    }

    #[test]
    fn test_every_signature_has_needles() {
        for signature in SIGNATURES {
            assert!(!signature.needles.is_empty());
            assert!(!signature.guidance.is_empty());
        }
    }

    #[test]
    fn test_empty_result_message() {
        let classified = ClassifiedError::empty_result("go doc io", "/work");
        assert_eq!(classified.kind, FailureKind::EmptyResult);
        assert!(classified.message.starts_with("No documentation found"));
        assert!(classified.message.ends_with("/work"));
    }

    #[test]
    fn test_from_timeout_error() {
        let error = Error::Timeout {
            command: "go doc io".to_string(),
            timeout: Duration::from_secs(3),
        };
        let classified = ClassifiedError::from_error(&error);
        assert_eq!(classified.kind, FailureKind::Timeout);
        assert!(classified.message.contains("within 3s"));
    }

    #[test]
    fn test_from_spawn_error() {
        let error = Error::execution("go doc io", "No such file or directory");
        let classified = ClassifiedError::from_error(&error);
        assert_eq!(classified.kind, FailureKind::Spawn);
        assert!(classified.message.contains("No such file or directory"));
    }
}
