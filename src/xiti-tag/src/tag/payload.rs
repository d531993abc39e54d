use crate::error::TagError;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Kind of action, sent as the `clic` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Action,
    Exit,
    Navigation,
    Download,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Action => "A",
            ActionType::Download => "T",
            ActionType::Exit => "S",
            ActionType::Navigation => "N",
        }
    }
}

/// Event part of a hit query string, already encoded.
///
/// Only the name is encoded; the `=`, `&` and `'` around it are kept as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPayload(String);

impl EventPayload {
    pub fn page(name: &str) -> Result<Self, TagError> {
        Ok(Self(format!("p='{}'", encode_name(name)?)))
    }

    pub fn action(name: &str, action_type: ActionType) -> Result<Self, TagError> {
        Ok(Self(format!(
            "p='{}'&clic='{}'",
            encode_name(name)?,
            action_type.as_str()
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn encode_name(name: &str) -> Result<String, TagError> {
    if name.is_empty() {
        return Err(TagError::EmptyName);
    }
    Ok(encode_value(name))
}

pub(crate) fn encode_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::action(ActionType::Action, "A")]
    #[case::download(ActionType::Download, "T")]
    #[case::exit(ActionType::Exit, "S")]
    #[case::navigation(ActionType::Navigation, "N")]
    fn test_action_codes(#[case] action_type: ActionType, #[case] code: &str) {
        assert_eq!(action_type.as_str(), code);
    }

    #[test]
    fn test_page_payload() {
        let payload = EventPayload::page("Home").unwrap();
        assert_eq!(payload.as_str(), "p='Home'");
    }

    #[test]
    fn test_action_payload() {
        let payload = EventPayload::action("Share", ActionType::Exit).unwrap();
        assert_eq!(payload.as_str(), "p='Share'&clic='S'");
    }

    #[test]
    fn test_name_is_encoded_but_not_separators() {
        let payload = EventPayload::page("a&b=c d'e").unwrap();
        assert_eq!(payload.as_str(), "p='a%26b%3Dc+d%27e'");
    }

    #[test]
    fn test_escaped_name_payload() {
        let name = crate::escape_page_name("Détail produit - n°1?");
        let payload = EventPayload::page(&name).unwrap();
        assert_eq!(name, "Detailproduitn°1");
        assert_eq!(payload.as_str(), "p='Detailproduitn%C2%B01'");
    }

    #[test]
    fn test_empty_name_is_rejected() {
        assert!(matches!(EventPayload::page(""), Err(TagError::EmptyName)));
        assert!(matches!(
            EventPayload::action("", ActionType::Action),
            Err(TagError::EmptyName)
        ));
    }
}
