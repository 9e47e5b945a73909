// src/message.rs
//
// Messages exchanged with the companion UI (the "popup").
// Wire form is JSON tagged by `action`, e.g.
//   {"action":"startPicking","elementType":"table"}
//   {"action":"disablePicking"}
//   {"action":"closePopup"}

use serde::{Deserialize, Serialize};

use crate::picker::PickKind;

/// Inbound: companion UI → page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Command {
    StartPicking {
        #[serde(rename = "elementType")]
        element_type: PickKind,
    },
    DisablePicking,
}

/// Outbound: page → companion UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Outbound {
    ClosePopup,
}

impl Command {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl Outbound {
    pub fn to_json(&self) -> String {
        // Unit variants with a string tag always serialize.
        serde_json::to_string(self).unwrap_or_default()
    }
}
