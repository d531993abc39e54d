mod collector;

pub use collector::Collector;

use std::collections::HashMap;

/// Decodes a hit query string into its parameters.
pub fn params(query: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}
