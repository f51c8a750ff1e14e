//! Translation of tool arguments into `go` argument lists
//!
//! Arguments arrive as an untyped JSON object. Missing keys and values of the
//! wrong type are treated as absent; flag syntax is left for `go` to judge.

use serde_json::{Map, Value};

/// Keys accepted for the documentation target, in priority order
pub const TARGET_FIELDS: [&str; 3] = ["pkgSymMethodOrField", "target", "path"];

/// Key for extra command flags
pub const FLAGS_FIELD: &str = "cmd_flags";

/// Key for listing patterns
pub const PACKAGES_FIELD: &str = "packages";

/// A caller-supplied query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolRequest {
    /// Package, symbol, method, field or path to document
    pub target: Option<String>,
    /// Extra flags, in caller order
    pub flags: Vec<String>,
    /// Package patterns for listing, in caller order
    pub packages: Vec<String>,
}

impl ToolRequest {
    /// Extract a request from a tool argument bag
    #[must_use]
    pub fn from_arguments(arguments: &Value) -> Self {
        let Some(map) = arguments.as_object() else {
            return Self::default();
        };

        Self {
            target: TARGET_FIELDS.iter().find_map(|key| get_string(map, key)),
            flags: get_string_list(map, FLAGS_FIELD).unwrap_or_default(),
            packages: get_string_list(map, PACKAGES_FIELD).unwrap_or_default(),
        }
    }

    /// Arguments for `go doc`: flags first, then the target when non-empty
    #[must_use]
    pub fn doc_args(&self) -> Vec<String> {
        let mut args = self.flags.clone();
        if let Some(target) = self.target.as_deref().filter(|t| !t.is_empty()) {
            args.push(target.to_string());
        }
        args
    }

    /// Arguments for `go list`: flags first, then package patterns
    #[must_use]
    pub fn list_args(&self) -> Vec<String> {
        let mut args = self.flags.clone();
        args.extend(self.packages.iter().cloned());
        args
    }
}

fn get_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)?.as_str().map(str::to_string)
}

/// A list with any non-string element counts as absent
fn get_string_list(map: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    map.get(key)?
        .as_array()?
        .iter()
        .map(|value| value.as_str().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_doc_target_only() {
        let request = ToolRequest::from_arguments(&json!({ "pkgSymMethodOrField": "io" }));
        assert_eq!(request.doc_args(), vec!["io"]);
    }

    #[test]
    fn test_doc_flags_precede_target() {
        let request = ToolRequest::from_arguments(&json!({
            "pkgSymMethodOrField": "fmt.Println",
            "cmd_flags": ["-src"]
        }));
        assert_eq!(request.doc_args(), vec!["-src", "fmt.Println"]);
    }

    #[test]
    fn test_doc_flag_order_is_preserved() {
        let request = ToolRequest::from_arguments(&json!({
            "cmd_flags": ["-u", "-all", "-short"],
            "pkgSymMethodOrField": "net/http"
        }));
        assert_eq!(request.doc_args(), vec!["-u", "-all", "-short", "net/http"]);
    }

    #[test]
    fn test_empty_target_is_dropped() {
        let request = ToolRequest::from_arguments(&json!({
            "pkgSymMethodOrField": "",
            "cmd_flags": ["-all"]
        }));
        assert_eq!(request.doc_args(), vec!["-all"]);
    }

    #[test]
    fn test_target_variants() {
        let request = ToolRequest::from_arguments(&json!({ "target": "./pkg" }));
        assert_eq!(request.target.as_deref(), Some("./pkg"));

        let request = ToolRequest::from_arguments(&json!({ "path": "./internal" }));
        assert_eq!(request.target.as_deref(), Some("./internal"));

        let request = ToolRequest::from_arguments(&json!({
            "pkgSymMethodOrField": "io",
            "target": "fmt"
        }));
        assert_eq!(request.target.as_deref(), Some("io"));
    }

    #[test]
    fn test_wrong_types_are_absent() {
        let request = ToolRequest::from_arguments(&json!({
            "pkgSymMethodOrField": 42,
            "cmd_flags": "-all",
            "packages": ["./...", 7]
        }));
        assert_eq!(request, ToolRequest::default());
        assert!(request.doc_args().is_empty());
        assert!(request.list_args().is_empty());
    }

    #[test]
    fn test_wrong_typed_target_falls_back_to_variant() {
        let request = ToolRequest::from_arguments(&json!({
            "pkgSymMethodOrField": null,
            "target": "io"
        }));
        assert_eq!(request.doc_args(), vec!["io"]);
    }

    #[test]
    fn test_non_object_arguments() {
        assert_eq!(ToolRequest::from_arguments(&Value::Null), ToolRequest::default());
        assert_eq!(
            ToolRequest::from_arguments(&json!(["io"])),
            ToolRequest::default()
        );
    }

    #[test]
    fn test_list_args() {
        let request = ToolRequest::from_arguments(&json!({ "packages": ["./..."] }));
        assert_eq!(request.list_args(), vec!["./..."]);

        let request = ToolRequest::from_arguments(&json!({
            "packages": ["std", "./cmd/..."],
            "cmd_flags": ["-json", "-m"]
        }));
        assert_eq!(request.list_args(), vec!["-json", "-m", "std", "./cmd/..."]);
    }
}
