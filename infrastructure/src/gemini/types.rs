//! Gemini `generateContent` wire types.
//!
//! Only the fields the agent reads or writes are modelled. Response parts
//! are decoded once here into [`ContentPart`]; nothing past this module
//! sees the raw shape.

use mog_domain::{ContentPart, DomainError, ImageData, Role, Turn};
use serde::{Deserialize, Serialize};

/// Media type assumed when the provider omits `mimeType` on returned images.
pub const FALLBACK_IMAGE_MEDIA_TYPE: &str = "image/png";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
}

impl GenerateContentRequest {
    /// Persona as system instruction, prior turns, then the new user message.
    pub fn conversation(persona: &str, history: &[Turn], message: &str) -> Self {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content::text(wire_role(turn.role), &turn.text))
            .collect();
        contents.push(Content::text("user", message));

        let system_instruction =
            (!persona.trim().is_empty()).then(|| Content::text("system", persona));

        Self {
            contents,
            system_instruction,
        }
    }

    /// One user turn carrying the ordered parts.
    pub fn generation(parts: &[ContentPart]) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: parts.iter().map(Part::from).collect(),
            }],
            system_instruction: None,
        }
    }
}

fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Agent => "model",
    }
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    fn text(role: &str, text: &str) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part::Text {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl From<&ContentPart> for Part {
    fn from(part: &ContentPart) -> Self {
        match part {
            ContentPart::Text(text) => Part::Text { text: text.clone() },
            ContentPart::Image(image) => Part::InlineData {
                inline_data: InlineData {
                    mime_type: Some(image.media_type().to_string()),
                    data: image.to_base64(),
                },
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: Option<String>,
    pub data: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// A raw response part; either field may be present, or both.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    pub text: Option<String>,
    pub inline_data: Option<InlineData>,
}

impl GenerateContentResponse {
    fn first_candidate_parts(self) -> Vec<ResponsePart> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts)
            .unwrap_or_default()
    }

    /// Concatenated text of the first candidate; `None` when there is none.
    pub fn into_text(self) -> Option<String> {
        let text: String = self
            .first_candidate_parts()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        (!text.is_empty()).then_some(text)
    }

    /// Ordered parts of the first candidate. A part carrying both inline
    /// data and text yields the image first.
    pub fn into_parts(self) -> Result<Vec<ContentPart>, DomainError> {
        let mut parts = Vec::new();
        for raw in self.first_candidate_parts() {
            if let Some(inline) = raw.inline_data {
                let media_type = inline
                    .mime_type
                    .unwrap_or_else(|| FALLBACK_IMAGE_MEDIA_TYPE.to_string());
                parts.push(ContentPart::Image(ImageData::from_base64(
                    media_type,
                    &inline.data,
                )?));
            }
            if let Some(text) = raw.text {
                parts.push(ContentPart::Text(text));
            }
        }
        Ok(parts)
    }
}

#[derive(Debug, Deserialize)]
pub struct ErrorWrapper {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[allow(dead_code)]
    pub code: Option<i32>,
    pub message: Option<String>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_conversation_request_shape() {
        let history = vec![
            Turn::new(Role::User, "wen moon"),
            Turn::new(Role::Agent, "Soon, peasant."),
        ];
        let request = GenerateContentRequest::conversation("Be superior.", &history, "gm");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": "wen moon" }] },
                    { "role": "model", "parts": [{ "text": "Soon, peasant." }] },
                    { "role": "user", "parts": [{ "text": "gm" }] },
                ],
                "systemInstruction": { "role": "system", "parts": [{ "text": "Be superior." }] },
            })
        );
    }

    #[test]
    fn test_generation_request_keeps_part_order() {
        let image = ImageData::new("image/webp", vec![1, 2, 3]).unwrap();
        let parts = vec![ContentPart::text("Mog this image"), ContentPart::Image(image)];
        let value = serde_json::to_value(GenerateContentRequest::generation(&parts)).unwrap();

        assert!(value.get("systemInstruction").is_none());
        let wire_parts = &value["contents"][0]["parts"];
        assert_eq!(wire_parts[0]["text"], "Mog this image");
        assert_eq!(wire_parts[1]["inlineData"]["mimeType"], "image/webp");
        assert_eq!(wire_parts[1]["inlineData"]["data"], "AQID");
    }

    #[test]
    fn test_text_concatenates_first_candidate_only() {
        let decoded = response(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Mogged " }, { "text": "hard." }] } },
                { "content": { "parts": [{ "text": "ignored" }] } },
            ]
        }))
        .into_text();
        assert_eq!(decoded.as_deref(), Some("Mogged hard."));
    }

    #[test]
    fn test_text_is_none_without_candidates_or_text() {
        assert!(response(json!({})).into_text().is_none());
        assert!(
            response(json!({ "candidates": [{ "content": { "parts": [{ "text": "" }] } }] }))
                .into_text()
                .is_none()
        );
        assert!(
            response(json!({ "candidates": [{ "finishReason": "SAFETY" }] }))
                .into_text()
                .is_none()
        );
    }

    #[test]
    fn test_parts_split_combined_part_image_first() {
        let parts = response(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "Behold.", "inlineData": { "mimeType": "image/jpeg", "data": "AQID" } },
                { "inlineData": { "data": "BAU=" } },
                {},
            ] } }]
        }))
        .into_parts()
        .unwrap();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].as_image().unwrap().media_type(), "image/jpeg");
        assert_eq!(parts[1].as_text(), Some("Behold."));
        let second = parts[2].as_image().unwrap();
        assert_eq!(second.media_type(), FALLBACK_IMAGE_MEDIA_TYPE);
        assert_eq!(second.bytes(), &[4, 5]);
    }

    #[test]
    fn test_parts_reject_corrupt_inline_data() {
        let result = response(json!({
            "candidates": [{ "content": { "parts": [
                { "inlineData": { "mimeType": "image/png", "data": "%%%" } },
            ] } }]
        }))
        .into_parts();
        assert!(result.is_err());
    }

    #[test]
    fn test_error_wrapper_parses() {
        let wrapper: ErrorWrapper = serde_json::from_str(
            r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#,
        )
        .unwrap();
        assert_eq!(wrapper.error.status.as_deref(), Some("RESOURCE_EXHAUSTED"));
        assert_eq!(wrapper.error.message.as_deref(), Some("Quota exceeded"));
    }
}
