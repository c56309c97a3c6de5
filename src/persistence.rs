//! Saved-game record and its text encoding.
//!
//! The record is JSON wrapped in standard base64. Older saves were plain
//! JSON, so decoding falls back to that when the base64 path fails.

use crate::feedback::Feedback;
use crate::game_state::GamePhase;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SavedGame {
    pub solution: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub guesses: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub statuses: Vec<Feedback>,
    #[serde(deserialize_with = "null_as_default")]
    pub current_guess: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(rename = "gameState", deserialize_with = "null_as_default")]
    pub phase: GamePhase,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// # Errors
///
/// Returns the serializer error if the record cannot be turned into JSON.
pub fn encode_state(state: &SavedGame) -> serde_json::Result<String> {
    let json = serde_json::to_string(state)?;
    Ok(STANDARD.encode(json))
}

/// `None` means "no usable saved game".
#[must_use]
pub fn decode_state(raw: &str) -> Option<SavedGame> {
    let encoded = STANDARD
        .decode(raw.trim())
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok());
    encoded.or_else(|| serde_json::from_str(raw).ok())
}
