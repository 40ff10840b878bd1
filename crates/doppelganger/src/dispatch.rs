use crate::config::{Endpoint, Mapping};
use crate::fetch::FetcherBundle;

/// Selects the first mapping (declaration order) whose `params` all
/// evaluate truthy (spec §4.3 step 3). Declaration order makes ties
/// impossible — the first match always wins (spec §8 law 5).
pub fn dispatch<'e>(endpoint: &'e Endpoint, fetchers: &impl FetcherBundle) -> Option<&'e Mapping> {
	let found = endpoint
		.mappings
		.iter()
		.position(|mapping| mapping.params.iter().all(|p| p.evaluate(fetchers).is_truthy()));

	match found {
		Some(i) => {
			tracing::debug!(path = %endpoint.path, mapping_index = i, "mapping matched");
			Some(&endpoint.mappings[i])
		}
		None => {
			tracing::debug!(path = %endpoint.path, "no mapping matched");
			None
		}
	}
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
