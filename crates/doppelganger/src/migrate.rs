use serde_json::Value as Json;

/// Rewrites a legacy `{key,type,value}` shorthand `params` element to a
/// canonical `EQUALS(left,right)` node (spec §4.5). Elements missing any of
/// the three fields pass through unchanged.
fn migrate_param(param: Json) -> Json {
	let Json::Object(obj) = &param else {
		return param;
	};
	let (Some(key), Some(ty), Some(value)) = (obj.get("key"), obj.get("type"), obj.get("value")) else {
		return param;
	};

	serde_json::json!({
		"type": "EQUALS",
		"left": { "type": ty.clone(), "id": key.clone() },
		"right": { "type": "STRING", "value": value.clone() },
	})
}

/// Recursively rewrites every `"params"` array in `value`, leaving
/// everything else — key order, unrelated arrays, deeper `"params"` nesting
/// — structurally untouched (spec §4.5, §8 laws 1–2). Idempotent on
/// already-canonical input: an `EQUALS` node has no `key`/`type`/`value`
/// triple at its own top level, so `migrate_param` passes it through, and
/// recursing into its `left`/`right` children (themselves not named
/// `"params"`) leaves them alone too.
pub fn migrate_value(value: Json) -> Json {
	match value {
		Json::Object(obj) => {
			let mut out = serde_json::Map::with_capacity(obj.len());
			for (k, v) in obj {
				if k == "params" {
					if let Json::Array(items) = v {
						out.insert(k, Json::Array(items.into_iter().map(migrate_param).collect()));
					} else {
						out.insert(k, v);
					}
				} else {
					out.insert(k, migrate_value(v));
				}
			}
			Json::Object(out)
		}
		Json::Array(items) => Json::Array(items.into_iter().map(migrate_value).collect()),
		other => other,
	}
}

#[cfg(test)]
#[path = "migrate_tests.rs"]
mod tests;
