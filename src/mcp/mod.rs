//! MCP (Model Context Protocol) server for editor and assistant integration.
//!
//! Exposes tools: analyze_resume, validate_upload.

use crate::analyzer::AnalysisEngine;
use crate::upload::{ErrorResponse, UploadError, UploadPolicy};
use crate::FileMetadata;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// MCP JSON-RPC request
#[derive(Debug, Deserialize, Serialize)]
pub struct JsonRpcRequest {
    #[allow(dead_code)]
    pub jsonrpc: Option<String>,
    pub id: Option<serde_json::Value>,
    pub method: String,
    pub params: Option<serde_json::Value>,
}

/// MCP JSON-RPC response
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

/// JSON-RPC code for a method the server does not implement
pub const METHOD_NOT_FOUND: i32 = -32601;

/// Tool definition for MCP tools/list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolDef {
    name: String,
    description: String,
    input_schema: InputSchema,
}

#[derive(Debug, Serialize)]
struct InputSchema {
    #[serde(rename = "type")]
    typ: &'static str,
    properties: serde_json::Value,
    required: Vec<&'static str>,
}

/// Arguments shared by both tools: either a path on disk or upload metadata
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ToolArgs {
    file: Option<String>,
    file_name: Option<String>,
    file_size: Option<u64>,
    file_type: Option<String>,
}

impl ToolArgs {
    fn metadata(&self) -> anyhow::Result<Option<FileMetadata>> {
        if let Some(file) = self.file.as_deref().filter(|f| !f.is_empty()) {
            let path = Path::new(file);
            if !path.exists() {
                anyhow::bail!("File not found: {}", file);
            }
            let metadata = AnalysisEngine::metadata_for_path(path, self.file_type.as_deref())
                .map_err(|e| {
                    log::warn!("{:#}", e);
                    UploadError::AnalysisFailed(e.to_string())
                })?;
            return Ok(Some(metadata));
        }
        Ok(match (&self.file_name, self.file_size) {
            (Some(name), Some(size)) => Some(FileMetadata::new(
                name.clone(),
                size,
                self.file_type.clone().unwrap_or_default(),
            )),
            _ => None,
        })
    }
}

/// Handle a single JSON-RPC request and return a response.
pub fn handle_request(req: &JsonRpcRequest) -> JsonRpcResponse {
    handle_request_with_policy(req, &UploadPolicy::default())
}

/// Same as [`handle_request`], validating uploads against `policy`
pub fn handle_request_with_policy(req: &JsonRpcRequest, policy: &UploadPolicy) -> JsonRpcResponse {
    let id = req.id.clone();
    let result = match req.method.as_str() {
        "initialize" => serde_json::json!({
            "protocolVersion": "0.1.0",
            "capabilities": { "tools": {} },
            "serverInfo": { "name": "rescore", "version": env!("CARGO_PKG_VERSION") }
        }),
        "tools/list" => serde_json::json!({ "tools": tool_defs() }),
        "tools/call" => {
            let (name, args) = req
                .params
                .as_ref()
                .and_then(|p| p.get("params").or(Some(p)))
                .map(|p| {
                    let name = p.get("name").and_then(|n| n.as_str()).unwrap_or("");
                    let args = p
                        .get("arguments")
                        .cloned()
                        .and_then(|a| serde_json::from_value::<ToolArgs>(a).ok())
                        .unwrap_or_default();
                    (name, args)
                })
                .unwrap_or(("", ToolArgs::default()));

            let result = match name {
                "analyze_resume" => run_analyze(&args, policy),
                "validate_upload" => run_validate(&args, policy),
                _ => Err(anyhow::anyhow!("Unknown tool: {}", name)),
            };

            match result {
                Ok(val) => serde_json::json!({
                    "content": [{ "type": "text", "text": serde_json::to_string(&val).unwrap_or_else(|_| "{}".to_string()) }]
                }),
                Err(e) => serde_json::json!({
                    "content": [{ "type": "text", "text": format!("Error: {}", e) }],
                    "isError": true
                }),
            }
        }
        method => {
            log::debug!("Unknown method: {}", method);
            return JsonRpcResponse {
                jsonrpc: "2.0",
                id,
                result: None,
                error: Some(JsonRpcError {
                    code: METHOD_NOT_FOUND,
                    message: "Method not found".to_string(),
                }),
            };
        }
    };

    JsonRpcResponse {
        jsonrpc: "2.0",
        id,
        result: Some(result),
        error: None,
    }
}

fn tool_defs() -> Vec<ToolDef> {
    let properties = serde_json::json!({
        "file": { "type": "string", "description": "Path to a resume file (.pdf, .doc, .docx)" },
        "fileName": { "type": "string", "description": "Uploaded file name, when no path is given" },
        "fileSize": { "type": "number", "description": "Uploaded size in bytes, when no path is given" },
        "fileType": { "type": "string", "description": "Declared media type (inferred from the extension for paths)" }
    });
    vec![
        ToolDef {
            name: "analyze_resume".to_string(),
            description: "Score a resume file from its name, size and type and return findings and recommendations"
                .to_string(),
            input_schema: InputSchema {
                typ: "object",
                properties: properties.clone(),
                required: vec![],
            },
        },
        ToolDef {
            name: "validate_upload".to_string(),
            description: "Check whether a file would be accepted as a resume upload".to_string(),
            input_schema: InputSchema {
                typ: "object",
                properties,
                required: vec![],
            },
        },
    ]
}

/// Run the MCP server loop (stdin / stdout).
pub fn run_mcp_server(policy: &UploadPolicy) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let reader = BufReader::new(stdin.lock());

    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let req: JsonRpcRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping malformed request: {}", e);
                continue;
            }
        };

        let response = handle_request_with_policy(&req, policy);
        // Notifications get no reply
        if req.id.is_none() {
            continue;
        }
        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn run_analyze(args: &ToolArgs, policy: &UploadPolicy) -> anyhow::Result<serde_json::Value> {
    let metadata = args.metadata()?;
    let engine = AnalysisEngine::new().with_policy(policy.clone());
    let response = engine.analyze_upload(metadata.as_ref())?;
    Ok(serde_json::to_value(response)?)
}

fn run_validate(args: &ToolArgs, policy: &UploadPolicy) -> anyhow::Result<serde_json::Value> {
    let metadata = args.metadata()?;
    Ok(match policy.validate(metadata.as_ref()) {
        Ok(()) => serde_json::json!({ "valid": true }),
        Err(err) => validation_failure(&err),
    })
}

fn validation_failure(err: &UploadError) -> serde_json::Value {
    let body = ErrorResponse::from(err);
    serde_json::json!({
        "valid": false,
        "error": body.error,
        "statusCode": err.status_code(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::TempDir;

    fn make_request(method: &str, params: Option<serde_json::Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: Some("2.0".to_string()),
            id: Some(serde_json::json!(1)),
            method: method.to_string(),
            params,
        }
    }

    fn call_tool(name: &str, arguments: serde_json::Value) -> serde_json::Value {
        let req = make_request(
            "tools/call",
            Some(serde_json::json!({ "name": name, "arguments": arguments })),
        );
        handle_request(&req).result.unwrap()
    }

    fn tool_text(result: &serde_json::Value) -> &str {
        result["content"][0]["text"].as_str().unwrap()
    }

    #[test]
    fn test_initialize_returns_protocol_version_and_server_info() {
        let resp = handle_request(&make_request("initialize", None));

        assert_eq!(resp.jsonrpc, "2.0");
        assert_eq!(resp.id, Some(serde_json::json!(1)));
        assert!(resp.error.is_none());

        let result = resp.result.unwrap();
        assert_eq!(result["protocolVersion"], "0.1.0");
        assert_eq!(result["serverInfo"]["name"], "rescore");
        assert!(result["serverInfo"]["version"].is_string());
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[test]
    fn test_tools_list_returns_two_tools() {
        let result = handle_request(&make_request("tools/list", None)).result.unwrap();
        let tools = result["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);

        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["analyze_resume", "validate_upload"]);

        for tool in tools {
            let schema = &tool["inputSchema"];
            assert_eq!(schema["type"], "object");
            assert!(schema["properties"]["fileName"].is_object());
            assert!(schema["required"].is_array());
        }
    }

    #[test]
    fn test_analyze_resume_from_metadata() {
        let result = call_tool(
            "analyze_resume",
            serde_json::json!({
                "fileName": "resume_2024.pdf",
                "fileSize": 200000,
                "fileType": "application/pdf"
            }),
        );
        assert!(result.get("isError").is_none(), "got: {:?}", result);

        let parsed: serde_json::Value = serde_json::from_str(tool_text(&result)).unwrap();
        assert_eq!(parsed["status"], "green");
        assert_eq!(parsed["score"], 85);
        assert_eq!(parsed["fileName"], "resume_2024.pdf");
        assert_eq!(parsed["fileSize"], 200000);
    }

    #[test]
    fn test_analyze_resume_from_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("old_draft.doc");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&vec![b'x'; 50_000])
            .unwrap();

        let result = call_tool(
            "analyze_resume",
            serde_json::json!({ "file": path.to_string_lossy() }),
        );
        let parsed: serde_json::Value = serde_json::from_str(tool_text(&result)).unwrap();
        assert_eq!(parsed["status"], "yellow");
        assert_eq!(parsed["score"], 45);
    }

    #[test]
    fn test_analyze_resume_rejected_upload_is_error() {
        let result = call_tool(
            "analyze_resume",
            serde_json::json!({ "fileName": "doc1.txt", "fileSize": 500, "fileType": "text/plain" }),
        );
        assert_eq!(result["isError"], true);
        assert_eq!(
            tool_text(&result),
            "Error: Invalid file type. Please upload a PDF, DOC, or DOCX file."
        );
    }

    #[test]
    fn test_analyze_resume_without_file_is_error() {
        let result = call_tool("analyze_resume", serde_json::json!({}));
        assert_eq!(result["isError"], true);
        assert_eq!(tool_text(&result), "Error: No file provided");
    }

    #[test]
    fn test_analyze_nonexistent_path_returns_error() {
        let result = call_tool(
            "analyze_resume",
            serde_json::json!({ "file": "/nonexistent/path/resume.pdf" }),
        );
        assert_eq!(result["isError"], true);
        assert!(tool_text(&result).contains("File not found"));
    }

    #[test]
    fn test_unreadable_path_reports_analysis_failure() {
        let dir = TempDir::new().unwrap();
        let result = call_tool(
            "analyze_resume",
            serde_json::json!({ "file": dir.path().to_string_lossy() }),
        );
        assert_eq!(result["isError"], true);
        assert_eq!(tool_text(&result), "Error: Analysis failed. Please try again.");
    }

    #[test]
    fn test_validate_upload_accepts_and_rejects() {
        let ok = call_tool(
            "validate_upload",
            serde_json::json!({ "fileName": "cv.docx", "fileSize": 4096 }),
        );
        let parsed: serde_json::Value = serde_json::from_str(tool_text(&ok)).unwrap();
        assert_eq!(parsed, serde_json::json!({ "valid": true }));

        let too_big = call_tool(
            "validate_upload",
            serde_json::json!({
                "fileName": "cv.pdf",
                "fileSize": 10_485_761u64,
                "fileType": "application/pdf"
            }),
        );
        let parsed: serde_json::Value = serde_json::from_str(tool_text(&too_big)).unwrap();
        assert_eq!(parsed["valid"], false);
        assert_eq!(parsed["error"], "File too large. Maximum size is 10MB.");
        assert_eq!(parsed["statusCode"], 400);
    }

    #[test]
    fn test_custom_policy_limits_apply() {
        let policy = UploadPolicy::default().with_limits(Some(100), None);
        let req = make_request(
            "tools/call",
            Some(serde_json::json!({
                "name": "validate_upload",
                "arguments": { "fileName": "cv.pdf", "fileSize": 500 }
            })),
        );
        let result = handle_request_with_policy(&req, &policy).result.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(tool_text(&result)).unwrap();
        assert_eq!(parsed["valid"], true);
    }

    #[test]
    fn test_tools_call_unknown_tool_returns_error() {
        let result = call_tool("nonexistent_tool", serde_json::json!({}));
        assert_eq!(result["isError"], true);
        assert!(tool_text(&result).contains("Unknown tool"));
    }

    #[test]
    fn test_unknown_method_returns_method_not_found() {
        let resp = handle_request(&make_request("nonexistent/method", None));
        assert!(resp.result.is_none());
        let error = resp.error.unwrap();
        assert_eq!(error.code, -32601);
        assert_eq!(error.message, "Method not found");

        let json = serde_json::to_value(&handle_request(&make_request("resources/list", None))).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["error"]["code"], -32601);
        assert!(json.get("result").is_none());
    }

    #[test]
    fn test_jsonrpc_request_with_string_id() {
        let json = r#"{"jsonrpc":"2.0","id":"abc-123","method":"tools/list"}"#;
        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.id, Some(serde_json::json!("abc-123")));
        let resp = handle_request(&req);
        assert_eq!(resp.id, Some(serde_json::json!("abc-123")));
    }

    #[test]
    fn test_jsonrpc_request_without_id() {
        // Notifications have no id
        let json = r#"{"jsonrpc":"2.0","method":"initialize"}"#;
        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert!(req.id.is_none());
        assert!(handle_request(&req).id.is_none());
    }

    #[test]
    fn test_tools_call_with_nested_params() {
        // Some MCP clients wrap params inside a "params" key
        let req = make_request(
            "tools/call",
            Some(serde_json::json!({
                "params": {
                    "name": "analyze_resume",
                    "arguments": { "file": "/nonexistent/resume.pdf" }
                }
            })),
        );
        let result = handle_request(&req).result.unwrap();
        assert_eq!(result["isError"], true);
    }
}
