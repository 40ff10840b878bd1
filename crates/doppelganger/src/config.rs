use std::path::{Path, PathBuf};

use serde_json::Value as Json;

use crate::expr::{Expression, build_expression};

/// Errors detected eagerly while loading and type-checking a configuration
/// (spec §7). All config errors are fatal for startup; none taint a
/// request or another server once the process is running.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read configuration file: {0}")]
	Io(#[from] std::io::Error),
	#[error("invalid configuration JSON: {0}")]
	Json(#[from] serde_json::Error),
	#[error("No server found")]
	NoServers,
	#[error("unknown expression type: {0}")]
	UnknownExpressionType(String),
	#[error("missing required field: {0}")]
	MissingField(String),
	#[error("type check failed: {0}")]
	TypeMismatch(String),
	#[error("invalid regex pattern {0:?}: {1}")]
	InvalidRegex(String, String),
}

/// Response content (spec §3 `Content`). `File` only carries the path; the
/// domain crate never touches the filesystem (spec §4.4 design notes) —
/// opening and streaming the file is the adapter's job.
#[derive(Debug, Clone)]
pub enum Content {
	Json(Json),
	File(PathBuf),
}

/// One `(params, resp_code, content)` tuple — the unit of match-and-respond
/// (spec §3 `Mapping`, GLOSSARY).
#[derive(Debug, Clone)]
pub struct Mapping {
	pub params: Vec<Expression>,
	pub resp_code: u16,
	pub content: Option<Content>,
}

/// A routable path + verb with its ordered list of candidate mappings (spec
/// §3 `Endpoint`).
#[derive(Debug, Clone)]
pub struct Endpoint {
	pub path: String,
	pub verb: String,
	pub mappings: Vec<Mapping>,
}

/// One virtual server: a port and the endpoints it serves (spec §3
/// `Configuration`).
#[derive(Debug, Clone)]
pub struct Configuration {
	pub port: u16,
	pub endpoints: Vec<Endpoint>,
}

/// The whole, frozen configuration tree (spec §3 `Servers`).
#[derive(Debug, Clone)]
pub struct Servers {
	pub configurations: Vec<Configuration>,
}

fn parse_content(data: &Json) -> Result<Content, ConfigError> {
	let obj = data
		.as_object()
		.ok_or_else(|| ConfigError::TypeMismatch("content must be an object".to_string()))?;
	let content_type = obj.get("type").and_then(Json::as_str).unwrap_or("JSON");
	match content_type {
		"FILE" => {
			let path = obj
				.get("data")
				.and_then(Json::as_object)
				.and_then(|d| d.get("path"))
				.and_then(Json::as_str)
				.ok_or_else(|| ConfigError::MissingField("content.data.path".to_string()))?;
			Ok(Content::File(PathBuf::from(path)))
		}
		"JSON" => {
			let data = obj.get("data").cloned().unwrap_or(Json::Null);
			Ok(Content::Json(data))
		}
		other => Err(ConfigError::TypeMismatch(format!(
			"unknown content type: {other}"
		))),
	}
}

fn parse_mapping(data: &Json) -> Result<Mapping, ConfigError> {
	let obj = data
		.as_object()
		.ok_or_else(|| ConfigError::TypeMismatch("mapping must be an object".to_string()))?;

	let params = match obj.get("params").and_then(Json::as_array) {
		Some(arr) => arr.iter().map(build_expression).collect::<Result<_, _>>()?,
		None => Vec::new(),
	};

	let content = obj.get("content").filter(|v| !v.is_null()).map(parse_content).transpose()?;

	let resp_code = match obj.get("code").and_then(Json::as_u64) {
		Some(code) => code as u16,
		// Default status code (spec §4.4): 204 with no content, 200 with content.
		None if content.is_none() => 204,
		None => 200,
	};

	Ok(Mapping {
		params,
		resp_code,
		content,
	})
}

fn parse_endpoint(data: &Json) -> Result<Endpoint, ConfigError> {
	let obj = data
		.as_object()
		.ok_or_else(|| ConfigError::TypeMismatch("endpoint must be an object".to_string()))?;

	let mut path = obj
		.get("path")
		.and_then(Json::as_str)
		.unwrap_or("/")
		.to_string();
	if !path.starts_with('/') {
		path = format!("/{path}");
	}
	let verb = obj
		.get("verb")
		.and_then(Json::as_str)
		.unwrap_or("GET")
		.to_uppercase();

	let mappings = match obj.get("mappings").and_then(Json::as_array) {
		Some(arr) => arr.iter().map(parse_mapping).collect::<Result<_, _>>()?,
		None => Vec::new(),
	};

	Ok(Endpoint {
		path,
		verb,
		mappings,
	})
}

fn parse_configuration(data: &Json) -> Result<Configuration, ConfigError> {
	let obj = data
		.as_object()
		.ok_or_else(|| ConfigError::TypeMismatch("configuration must be an object".to_string()))?;

	let port = obj.get("port").and_then(Json::as_u64).unwrap_or(8000) as u16;
	let endpoints = match obj.get("endpoint").and_then(Json::as_array) {
		Some(arr) => arr.iter().map(parse_endpoint).collect::<Result<_, _>>()?,
		None => Vec::new(),
	};

	Ok(Configuration { port, endpoints })
}

/// Parses the top-level configuration document (spec §6.1). Dispatches on
/// whether a `"servers"` key is present rather than on any other field,
/// exactly as `examples/original_source/.../config.py:parse_servers` does
/// (OQ-1 in SPEC_FULL.md) — unambiguous, and matches the original.
pub fn parse_servers(data: &Json) -> Result<Servers, ConfigError> {
	let obj = data
		.as_object()
		.ok_or_else(|| ConfigError::TypeMismatch("configuration root must be an object".to_string()))?;

	if let Some(servers) = obj.get("servers") {
		let arr = servers
			.as_array()
			.ok_or_else(|| ConfigError::TypeMismatch("servers must be an array".to_string()))?;
		if arr.is_empty() {
			return Err(ConfigError::NoServers);
		}
		let configurations = arr.iter().map(parse_configuration).collect::<Result<_, _>>()?;
		Ok(Servers { configurations })
	} else {
		let configuration = parse_configuration(data)?;
		Ok(Servers {
			configurations: vec![configuration],
		})
	}
}

/// Reads and parses a configuration file from disk (spec §6.1, §6.3).
pub fn load_file(path: &Path) -> Result<Servers, ConfigError> {
	let raw = std::fs::read_to_string(path)?;
	let data: Json = serde_json::from_str(&raw)?;
	parse_servers(&data)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
