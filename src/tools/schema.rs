//! Tool definitions expressed as data
//!
//! Each tool's parameters live in a constant table. The JSON schema shown to
//! callers and the argument validation both derive from that table.

use serde::Serialize;
use serde_json::{json, Map, Value};

/// Name of the IndexNow submission tool
pub const SUBMIT_URL_INDEXNOW: &str = "submit_url_indexnow";

/// Name of the Perplexity status tool
pub const CHECK_PERPLEXITY_STATUS: &str = "check_perplexity_status";

/// Name of the GEO audit tool
pub const AUDIT_PAGE_FOR_GEO: &str = "audit_page_for_geo";

/// JSON type accepted for a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Boolean,
    /// An array of strings; a single string is also accepted
    StringList,
}

impl ParamKind {
    fn schema(self) -> Value {
        match self {
            Self::String => json!({ "type": "string" }),
            Self::Boolean => json!({ "type": "boolean" }),
            Self::StringList => json!({ "type": "array", "items": { "type": "string" } }),
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
            Self::StringList => {
                value.is_string()
                    || value
                        .as_array()
                        .map(|items| items.iter().all(Value::is_string))
                        .unwrap_or(false)
            }
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Boolean => "a boolean",
            Self::StringList => "an array of strings",
        }
    }
}

/// One tool parameter
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
}

/// One tool: name, description, parameters
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
}

/// Every tool the registry exposes, in listing order
pub const TOOL_SPECS: &[ToolSpec] = &[
    ToolSpec {
        name: SUBMIT_URL_INDEXNOW,
        description: "Submit one or more URLs to IndexNow to encourage indexing.",
        params: &[
            ParamSpec {
                name: "urls",
                kind: ParamKind::StringList,
                required: true,
                description: "Array of URLs to submit",
            },
            ParamSpec {
                name: "host",
                kind: ParamKind::String,
                required: false,
                description: "Host for IndexNow payload; derived from first URL if omitted",
            },
            ParamSpec {
                name: "apiKey",
                kind: ParamKind::String,
                required: false,
                description: "IndexNow API key (falls back to INDEXNOW_KEY env var)",
            },
            ParamSpec {
                name: "keyLocation",
                kind: ParamKind::String,
                required: false,
                description: "Location of IndexNow key file; defaults to https://{host}/{apiKey}.txt",
            },
        ],
    },
    ToolSpec {
        name: CHECK_PERPLEXITY_STATUS,
        description: "Verify Perplexity visibility by requesting a URL summary.",
        params: &[
            ParamSpec {
                name: "url",
                kind: ParamKind::String,
                required: true,
                description: "URL to check",
            },
            ParamSpec {
                name: "apiKey",
                kind: ParamKind::String,
                required: false,
                description: "Perplexity API key (falls back to PERPLEXITY_API_KEY env var)",
            },
            ParamSpec {
                name: "model",
                kind: ParamKind::String,
                required: false,
                description: "Perplexity model to use (default sonar-pro)",
            },
        ],
    },
    ToolSpec {
        name: AUDIT_PAGE_FOR_GEO,
        description: "Audit a page for GEO / AI crawler visibility signals.",
        params: &[
            ParamSpec {
                name: "url",
                kind: ParamKind::String,
                required: true,
                description: "URL to audit",
            },
            ParamSpec {
                name: "checkRobotsTxt",
                kind: ParamKind::Boolean,
                required: false,
                description: "Whether to fetch and inspect robots.txt (default true)",
            },
        ],
    },
];

/// Listing entry handed to the dispatch shell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl ToolSpec {
    /// Looks up a tool by name
    pub fn find(name: &str) -> Option<&'static ToolSpec> {
        TOOL_SPECS.iter().find(|tool| tool.name == name)
    }

    /// JSON schema of the tool's arguments
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in self.params {
            let mut schema = param.kind.schema();
            if let Value::Object(fields) = &mut schema {
                fields.insert("description".to_string(), json!(param.description));
            }
            properties.insert(param.name.to_string(), schema);
        }

        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|param| param.required)
            .map(|param| param.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_schema: self.input_schema(),
        }
    }

    /// Checks arguments against the parameter table
    ///
    /// Required parameters must be present and non-null; present parameters
    /// must have the declared type. Unknown parameters are ignored.
    pub fn validate(&self, args: &Value) -> Result<(), String> {
        let empty = Map::new();
        let fields = match args {
            Value::Object(fields) => fields,
            Value::Null => &empty,
            _ => return Err(format!("Arguments for {} must be a JSON object", self.name)),
        };

        for param in self.params {
            match fields.get(param.name) {
                None | Some(Value::Null) if param.required => {
                    return Err(format!("Missing required argument '{}'", param.name));
                }
                None | Some(Value::Null) => {}
                Some(value) if !param.kind.accepts(value) => {
                    return Err(format!(
                        "Argument '{}' must be {}",
                        param.name,
                        param.kind.describe()
                    ));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}
