use serde_json::json;

use super::*;

#[test]
fn empty_servers_is_config_error() {
	let err = parse_servers(&json!({"servers": []})).unwrap_err();
	assert!(matches!(err, ConfigError::NoServers));
	assert_eq!(err.to_string(), "No server found");
}

#[test]
fn bare_configuration_becomes_single_server() {
	let servers = parse_servers(&json!({"port": 9001, "endpoint": []})).unwrap();
	assert_eq!(servers.configurations.len(), 1);
	assert_eq!(servers.configurations[0].port, 9001);
}

#[test]
fn defaults_apply() {
	let servers = parse_servers(&json!({"servers": [{}]})).unwrap();
	let cfg = &servers.configurations[0];
	assert_eq!(cfg.port, 8000);
	assert!(cfg.endpoints.is_empty());
}

#[test]
fn endpoint_defaults_and_leading_slash() {
	let servers = parse_servers(&json!({
		"servers": [{"endpoint": [{"path": "items"}]}],
	}))
	.unwrap();
	let endpoint = &servers.configurations[0].endpoints[0];
	assert_eq!(endpoint.path, "/items");
	assert_eq!(endpoint.verb, "GET");
}

#[test]
fn mapping_default_code_no_content_is_204() {
	let servers = parse_servers(&json!({
		"servers": [{"endpoint": [{"mappings": [{}]}]}],
	}))
	.unwrap();
	let mapping = &servers.configurations[0].endpoints[0].mappings[0];
	assert_eq!(mapping.resp_code, 204);
	assert!(mapping.content.is_none());
}

#[test]
fn mapping_default_code_with_content_is_200() {
	let servers = parse_servers(&json!({
		"servers": [{"endpoint": [{"mappings": [
			{"content": {"type": "JSON", "data": {"ok": true}}},
		]}]}],
	}))
	.unwrap();
	let mapping = &servers.configurations[0].endpoints[0].mappings[0];
	assert_eq!(mapping.resp_code, 200);
	assert!(matches!(mapping.content, Some(Content::Json(_))));
}

#[test]
fn mapping_explicit_code_is_respected() {
	let servers = parse_servers(&json!({
		"servers": [{"endpoint": [{"mappings": [{"code": 418}]}]}],
	}))
	.unwrap();
	assert_eq!(servers.configurations[0].endpoints[0].mappings[0].resp_code, 418);
}

#[test]
fn file_content_parses_path() {
	let servers = parse_servers(&json!({
		"servers": [{"endpoint": [{"mappings": [
			{"content": {"type": "FILE", "data": {"path": "./fixtures/hello.txt"}}},
		]}]}],
	}))
	.unwrap();
	let mapping = &servers.configurations[0].endpoints[0].mappings[0];
	match &mapping.content {
		Some(Content::File(path)) => assert_eq!(path, std::path::Path::new("./fixtures/hello.txt")),
		other => panic!("expected Content::File, got {other:?}"),
	}
}

#[test]
fn bad_expression_in_mapping_propagates_as_config_error() {
	let err = parse_servers(&json!({
		"servers": [{"endpoint": [{"mappings": [
			{"params": [{"type": "BOGUS"}]},
		]}]}],
	}))
	.unwrap_err();
	assert!(matches!(err, ConfigError::UnknownExpressionType(t) if t == "BOGUS"));
}
