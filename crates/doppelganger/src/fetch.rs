use doppel_core::OwnedOrBorrowed;
use serde_json::Value as Json;

/// The four capabilities an HTTP adapter must supply per request (spec
/// §6.2). Implemented as a trait rather than the Python source's struct of
/// closures (`EvaluationFetchers`) so an adapter can hand the evaluator a
/// `&self` that borrows directly from live request state instead of
/// allocating a closure per field on every request.
pub trait FetcherBundle {
	/// Looks up `id` in the parsed request body. Returns `None` if the body
	/// is empty, not an object, or does not contain the key — callers
	/// convert `None` to `""` per spec §3 `BODY`.
	fn body(&self, id: &str) -> Option<&Json>;

	/// First query value for `key`, or `""` if absent.
	fn query(&self, key: &str) -> OwnedOrBorrowed<'_, String>;

	/// All query values associated with `key`, in request order.
	fn query_array(&self, key: &str) -> Vec<String>;

	/// Value of the named path placeholder, or `""` if absent.
	fn path(&self, key: &str) -> OwnedOrBorrowed<'_, String>;
}

/// Canonical stringification of a JSON body value (spec §4.2, §9): numbers
/// in decimal form, booleans as `"true"`/`"false"`, null/missing as `""`,
/// objects/arrays as compact JSON (Open Question OQ-4 in SPEC_FULL.md).
pub fn canonical_body_string(value: Option<&Json>) -> String {
	match value {
		None | Some(Json::Null) => String::new(),
		Some(Json::String(s)) => s.clone(),
		Some(Json::Bool(b)) => b.to_string(),
		Some(Json::Number(n)) => n.to_string(),
		Some(v @ (Json::Object(_) | Json::Array(_))) => {
			serde_json::to_string(v).unwrap_or_default()
		}
	}
}

/// A fetcher bundle for use in unit tests, backed by plain owned maps.
#[derive(Debug, Default, Clone)]
pub struct StaticFetchers {
	pub body: serde_json::Map<String, Json>,
	pub query: std::collections::HashMap<String, Vec<String>>,
	pub path: std::collections::HashMap<String, String>,
}

impl FetcherBundle for StaticFetchers {
	fn body(&self, id: &str) -> Option<&Json> {
		self.body.get(id)
	}

	fn query(&self, key: &str) -> OwnedOrBorrowed<'_, String> {
		match self.query.get(key).and_then(|v| v.first()) {
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
