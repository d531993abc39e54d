use super::payload::{encode_value, EventPayload};
use crate::config::Config;
use crate::metadata::MetadataSnapshot;
use std::fmt::Write;

/// Composes hit URLs.
///
/// Everything except the event, the subsite and the timestamp is fixed for
/// the lifetime of a client, so it is rendered once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    // `{endpoint}?s={site_id}&`
    prefix: String,
    default_subsite_id: Option<String>,
    // `&{key}={value}` for every metadata entry
    metadata_query: String,
}

impl UrlBuilder {
    pub fn new(
        endpoint: &str,
        site_id: &str,
        default_subsite_id: Option<String>,
        metadata: &MetadataSnapshot,
    ) -> Self {
        let metadata_query = metadata.iter().fold(String::new(), |mut query, (key, value)| {
            let _ = write!(query, "&{}={}", key, encode_value(value));
            query
        });

        Self {
            prefix: format!("{endpoint}?s={site_id}&"),
            default_subsite_id,
            metadata_query,
        }
    }

    pub fn from_config(config: &Config, metadata: &MetadataSnapshot) -> Self {
        Self::new(
            &config.collector_endpoint(),
            &config.site_id,
            config.subsite_id.clone(),
            metadata,
        )
    }

    /// Same inputs give the same URL; `now_millis` only affects `na=`.
    pub fn build(
        &self,
        payload: &EventPayload,
        subsite_id_override: Option<&str>,
        now_millis: i64,
    ) -> String {
        let mut url = String::with_capacity(
            self.prefix.len() + payload.as_str().len() + self.metadata_query.len() + 32,
        );
        url.push_str(&self.prefix);
        url.push_str(payload.as_str());

        if let Some(subsite_id) = subsite_id_override.or(self.default_subsite_id.as_deref()) {
            url.push_str("&s2=");
            url.push_str(subsite_id);
        }

        url.push_str(&self.metadata_query);
        let _ = write!(url, "&na={now_millis}");

        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::ActionType;

    const NOW: i64 = 1_286_000_000_000;

    fn metadata() -> MetadataSnapshot {
        MetadataSnapshot::new()
            .with("os", "android-2.2")
            .with("lng", "fr_fr")
            .with("mdl", "gt-i5700")
            .with("apvr", "[1.0]")
    }

    fn builder(default_subsite_id: Option<&str>) -> UrlBuilder {
        let config = Config {
            subsite_id: default_subsite_id.map(str::to_string),
            ..Config::new("logi7", "123456")
        };
        UrlBuilder::from_config(&config, &metadata())
    }

    #[test]
    fn test_page_url() {
        let url = builder(None).build(&EventPayload::page("Home").unwrap(), None, NOW);
        assert_eq!(
            url,
            "http://logi7.xiti.com/hit.xiti?s=123456&p='Home'\
             &apvr=%5B1.0%5D&lng=fr_fr&mdl=gt-i5700&os=android-2.2&na=1286000000000"
        );
    }

    #[test]
    fn test_action_url_with_default_subsite() {
        let payload = EventPayload::action("Download", ActionType::Download).unwrap();
        let url = builder(Some("7")).build(&payload, None, NOW);
        assert!(url.starts_with(
            "http://logi7.xiti.com/hit.xiti?s=123456&p='Download'&clic='T'&s2=7&apvr="
        ));
    }

    #[test]
    fn test_override_wins_over_default_subsite() {
        let payload = EventPayload::page("Home").unwrap();
        let url = builder(Some("7")).build(&payload, Some("42"), NOW);
        assert!(url.contains("&s2=42&"));
        assert!(!url.contains("s2=7"));
    }

    #[test]
    fn test_no_subsite_at_all() {
        let payload = EventPayload::page("Home").unwrap();
        let url = builder(None).build(&payload, None, NOW);
        assert!(!url.contains("s2="));
    }

    #[test]
    fn test_build_is_deterministic() {
        let payload = EventPayload::page("Home").unwrap();
        let builder = builder(Some("7"));
        assert_eq!(
            builder.build(&payload, None, NOW),
            builder.build(&payload, None, NOW)
        );
    }

    #[test]
    fn test_clock_only_changes_na_suffix() {
        let payload = EventPayload::page("Home").unwrap();
        let builder = builder(Some("7"));
        let first = builder.build(&payload, None, NOW);
        let second = builder.build(&payload, None, NOW + 1);

        let (first_head, first_na) = first.rsplit_once("&na=").unwrap();
        let (second_head, second_na) = second.rsplit_once("&na=").unwrap();
        assert_eq!(first_head, second_head);
        assert_eq!(first_na, "1286000000000");
        assert_eq!(second_na, "1286000000001");
    }

    #[test]
    fn test_empty_metadata() {
        let builder = UrlBuilder::new(
            "http://logi7.xiti.com/hit.xiti",
            "1",
            None,
            &MetadataSnapshot::new(),
        );
        let url = builder.build(&EventPayload::page("Home").unwrap(), None, 5);
        assert_eq!(url, "http://logi7.xiti.com/hit.xiti?s=1&p='Home'&na=5");
    }
}
