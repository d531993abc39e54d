use super::{
    MetadataSnapshot, APP_VERSION_KEY, CLIENT_ID_KEY, CONNECTION_KEY, LOCALE_KEY, MODEL_KEY, OS_KEY,
};
use crate::constants::OS_NAME_PREFIX;

/// Raw device attributes, each one optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceInfo {
    pub locale: Option<String>,
    pub model: Option<String>,
    pub os_release: Option<String>,
    pub wifi_enabled: Option<bool>,
    pub app_version: Option<String>,
    pub device_id: Option<String>,
}

impl DeviceInfo {
    /// Normalizes the attributes into their wire form.
    pub fn snapshot(&self) -> MetadataSnapshot {
        let mut snapshot = MetadataSnapshot::new();

        if let Some(locale) = &self.locale {
            snapshot = snapshot.with(LOCALE_KEY, remove_spaces(locale));
        }
        if let Some(model) = &self.model {
            snapshot = snapshot.with(MODEL_KEY, remove_spaces(model));
        }
        if let Some(release) = &self.os_release {
            snapshot = snapshot.with(OS_KEY, remove_spaces(&format!("{OS_NAME_PREFIX}{release}")));
        }
        if let Some(wifi) = self.wifi_enabled {
            snapshot = snapshot.with(CONNECTION_KEY, if wifi { "wifi" } else { "gsm" });
        }
        if let Some(version) = &self.app_version {
            snapshot = snapshot.with(APP_VERSION_KEY, remove_spaces(version));
        }
        if let Some(id) = &self.device_id {
            snapshot = snapshot.with(CLIENT_ID_KEY, remove_spaces(id));
        }

        snapshot
    }
}

/// Lower-cased `input` without any space.
fn remove_spaces(input: &str) -> String {
    input.replace(' ', "").to_lowercase()
}
