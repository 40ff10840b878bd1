use serde_json::json;

use super::*;
use crate::config::parse_servers;
use crate::expr::Expression;
use crate::fetch::StaticFetchers;

fn endpoint_with_two_mappings() -> Endpoint {
	let servers = parse_servers(&json!({
		"servers": [{"endpoint": [{
			"path": "/users/:id",
			"mappings": [
				{
					"params": [{"type": "EQUALS", "left": {"type": "PATH", "id": "id"}, "right": {"type": "STRING", "value": "7"}}],
					"code": 200,
					"content": {"type": "JSON", "data": {"u": 7}},
				},
				{
					"params": [],
					"code": 204,
				},
			],
		}]}],
	}))
	.unwrap();
	servers.configurations.into_iter().next().unwrap().endpoints.into_iter().next().unwrap()
}

#[test]
fn first_matching_mapping_wins() {
	let endpoint = endpoint_with_two_mappings();
	let mut f = StaticFetchers::default();
	f.path.insert("id".to_string(), "7".to_string());

	let mapping = dispatch(&endpoint, &f).expect("a mapping should match");
	assert_eq!(mapping.resp_code, 200);
}

#[test]
fn falls_through_to_later_mapping() {
	let endpoint = endpoint_with_two_mappings();
	let mut f = StaticFetchers::default();
	f.path.insert("id".to_string(), "8".to_string());

	// The first mapping's param is falsy, the second has no params (an
	// empty AND is vacuously true), so it is selected.
	let mapping = dispatch(&endpoint, &f).expect("the catch-all mapping should match");
	assert_eq!(mapping.resp_code, 204);
}

#[test]
fn no_match_returns_none() {
	let endpoint = Endpoint {
		path: "/x".to_string(),
		verb: "GET".to_string(),
		mappings: vec![Mapping {
			params: vec![Expression::StringLit("".to_string())],
			resp_code: 200,
			content: None,
		}],
	};
	let f = StaticFetchers::default();
	// An empty string param is falsy (Value::is_truthy), so nothing matches.
	assert!(dispatch(&endpoint, &f).is_none());
}
