//! Request body and query-string parsing (spec §6.2). The domain crate only
//! ever sees a flat JSON object and a multi-map of query values — turning
//! the wire format into that shape is the adapter's job.

use std::collections::HashMap;

use serde_json::{Map, Value as Json};

/// Parses a raw request body into the flat object the evaluator's `BODY`
/// expressions look keys up in. Unsupported or unparsable bodies yield an
/// empty object rather than an error — a non-matching mapping, not a
/// request failure, is the correct outcome (spec §6.2).
pub fn parse(content_type: &str, raw: &[u8]) -> Map<String, Json> {
	let media_type = content_type.split(';').next().unwrap_or("").trim();
	match media_type {
		"application/json" => match serde_json::from_slice::<Json>(raw) {
			Ok(Json::Object(map)) => map,
			_ => Map::new(),
		},
		"application/x-www-form-urlencoded" => parse_urlencoded(raw),
		"multipart/form-data" => parse_multipart(content_type, raw),
		_ => Map::new(),
	}
}

fn parse_urlencoded(raw: &[u8]) -> Map<String, Json> {
	let pairs: Vec<(String, String)> = match serde_urlencoded::from_bytes(raw) {
		Ok(pairs) => pairs,
		Err(_) => return Map::new(),
	};
	flatten_pairs(pairs)
}

fn flatten_pairs(pairs: Vec<(String, String)>) -> Map<String, Json> {
	let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
	let mut order: Vec<String> = Vec::new();
	for (key, value) in pairs {
		if !grouped.contains_key(&key) {
			order.push(key.clone());
		}
		grouped.entry(key).or_default().push(value);
	}

	let mut out = Map::new();
	for key in order {
		let mut values = grouped.remove(&key).unwrap_or_default();
		let field = if values.len() == 1 {
			Json::String(values.remove(0))
		} else {
			Json::Array(values.into_iter().map(Json::String).collect())
		};
		out.insert(key, field);
	}
	out
}

/// A pragmatic `multipart/form-data` reader: extracts each part's `name`
/// and text value from its `Content-Disposition` header, ignoring file
/// attachments. Good enough for a mock server exercising form fields; it is
/// not a general MIME parser.
fn parse_multipart(content_type: &str, raw: &[u8]) -> Map<String, Json> {
	let Some(boundary) = content_type
		.split(';')
		.filter_map(|part| part.trim().strip_prefix("boundary="))
		.next()
	else {
		return Map::new();
	};
	let boundary = boundary.trim_matches('"');
	let delimiter = format!("--{boundary}");
	let body = String::from_utf8_lossy(raw);

	let mut pairs = Vec::new();
	for part in body.split(&delimiter) {
		let part = part.trim_start_matches("\r\n").trim_end_matches("\r\n");
		if part.is_empty() || part == "--" {
			continue;
		}
		let Some((headers, value)) = part.split_once("\r\n\r\n") else {
			continue;
		};
		let name = headers
			.lines()
			.find(|line| line.to_ascii_lowercase().starts_with("content-disposition"))
			.and_then(|line| {
				line.split(';').filter_map(|segment| segment.trim().strip_prefix("name=")).next()
			})
			.map(|name| name.trim_matches('"').to_string());
		if let Some(name) = name {
			pairs.push((name, value.trim_end_matches("--").trim_end_matches("\r\n").to_string()));
		}
	}
	flatten_pairs(pairs)
}

/// Parses a raw query string into a multi-map, preserving the order values
/// appear in for repeated keys.
pub fn parse_query(raw: Option<&str>) -> HashMap<String, Vec<String>> {
	let Some(raw) = raw else {
		return HashMap::new();
	};
	let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(raw) {
		Ok(pairs) => pairs,
		Err(_) => return HashMap::new(),
	};
	let mut map: HashMap<String, Vec<String>> = HashMap::new();
	for (key, value) in pairs {
		map.entry(key).or_default().push(value);
	}
	map
}
