use serde::Deserialize;
use serde_json::Value;

/// Raw create-bookmark payload as it arrives on the wire. Every field is
/// optional and `rating` stays an untyped JSON value so the validator can
/// report "required" vs "not a number" vs "out of range" in its fixed order
/// instead of letting deserialization reject the request first.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBookmark {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<Value>,
}
