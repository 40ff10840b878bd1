//! Adapts one [`Configuration`] into a bound, running `axum` server (spec
//! §4.3, §6.2, §6.3).

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path as AxumPath, RawQuery, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{on, MethodFilter};
use axum::Router;
use bytes::Bytes;
use doppel_core::OwnedOrBorrowed;
use doppelganger::config::{Configuration, Endpoint};
use doppelganger::dispatch;
use doppelganger::fetch::FetcherBundle;
use serde_json::{Map, Value as Json};

use crate::body;
use crate::content::emit_mapping;

#[derive(Clone)]
struct EndpointState {
	endpoint: Arc<Endpoint>,
	verbose: bool,
}

/// Builds the router for one virtual server: one route per endpoint, with
/// the Flask-style `:name` path placeholders translated into axum 0.8's
/// `{name}` capture syntax.
pub fn router(configuration: &Configuration, verbose: bool) -> Router {
	let mut router = Router::new();
	for endpoint in &configuration.endpoints {
		let axum_path = translate_path(&endpoint.path);
		let filter = verb_to_method_filter(&endpoint.verb);
		let state = EndpointState {
			endpoint: Arc::new(endpoint.clone()),
			verbose,
		};
		router = router.route(&axum_path, on(filter, handle).with_state(state));
	}
	router
}

/// `/users/:id` -> `/users/{id}`. Any other segment passes through
/// unchanged.
fn translate_path(path: &str) -> String {
	path.split('/')
		.map(|segment| match segment.strip_prefix(':') {
			Some(name) => format!("{{{name}}}"),
			None => segment.to_string(),
		})
		.collect::<Vec<_>>()
		.join("/")
}

fn verb_to_method_filter(verb: &str) -> MethodFilter {
	match verb {
		"GET" => MethodFilter::GET,
		"POST" => MethodFilter::POST,
		"PUT" => MethodFilter::PUT,
		"DELETE" => MethodFilter::DELETE,
		"PATCH" => MethodFilter::PATCH,
		"HEAD" => MethodFilter::HEAD,
		"OPTIONS" => MethodFilter::OPTIONS,
		"TRACE" => MethodFilter::TRACE,
		_ => MethodFilter::GET,
	}
}

async fn handle(
	State(state): State<EndpointState>,
	method: Method,
	AxumPath(path_params): AxumPath<HashMap<String, String>>,
	RawQuery(raw_query): RawQuery,
	headers: HeaderMap,
	raw_body: Bytes,
) -> Response {
	if state.verbose {
		tracing::debug!(
			path = %state.endpoint.path,
			method = %method,
			body = %String::from_utf8_lossy(&raw_body),
			"received request"
		);
	}

	let parsed_body = if matches!(method, Method::POST | Method::PUT | Method::DELETE) {
		let content_type = headers
			.get(axum::http::header::CONTENT_TYPE)
			.and_then(|v| v.to_str().ok())
			.unwrap_or("");
		body::parse(content_type, &raw_body)
	} else {
		Map::new()
	};
	let query = body::parse_query(raw_query.as_deref());

	let fetchers = RequestFetchers {
		body: parsed_body,
		query,
		path: path_params,
	};

	match dispatch(&state.endpoint, &fetchers) {
		Some(mapping) => emit_mapping(mapping).await,
		None => (
			StatusCode::NOT_FOUND,
			axum::Json(serde_json::json!({ "error": "No matching mapping found" })),
		)
			.into_response(),
	}
}

struct RequestFetchers {
	body: Map<String, Json>,
	query: HashMap<String, Vec<String>>,
	path: HashMap<String, String>,
}

impl FetcherBundle for RequestFetchers {
	fn body(&self, id: &str) -> Option<&Json> {
		self.body.get(id)
	}

	fn query(&self, key: &str) -> OwnedOrBorrowed<'_, String> {
		match self.query.get(key).and_then(|values| values.first()) {
			Some(v) => OwnedOrBorrowed::Borrowed(v),
			None => OwnedOrBorrowed::Owned(String::new()),
		}
	}

	fn query_array(&self, key: &str) -> Vec<String> {
		self.query.get(key).cloned().unwrap_or_default()
	}

	fn path(&self, key: &str) -> OwnedOrBorrowed<'_, String> {
		match self.path.get(key) {
			Some(v) => OwnedOrBorrowed::Borrowed(v),
			None => OwnedOrBorrowed::Owned(String::new()),
		}
	}
}
