//! Wire-shape rendering for outbound payloads.
//!
//! Concrete clients consume baileys-style JSON message bodies; this module
//! produces those shapes from the typed [`OutgoingContent`] model. Raw bytes
//! render as base64 strings.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use serde_json::{json, Value};

use crate::types::{MediaSource, OutgoingContent};

fn media_to_json(source: &MediaSource) -> Value {
    match source {
        MediaSource::Url(url) => json!({ "url": url }),
        MediaSource::Bytes(bytes) => Value::String(B64.encode(bytes)),
    }
}

/// JSON body for one outbound message.
pub fn content_to_json(content: &OutgoingContent) -> Value {
    match content {
        OutgoingContent::Text { text } => json!({ "text": text }),
        OutgoingContent::Buttons {
            text,
            buttons,
            footer,
        } => {
            let buttons: Vec<Value> = buttons
                .iter()
                .map(|b| {
                    json!({
                        "buttonId": b.id,
                        "buttonText": { "displayText": b.text },
                        "type": 1,
                    })
                })
                .collect();
            let mut body = json!({ "text": text, "buttons": buttons });
            if let Some(footer) = footer {
                body["footer"] = json!(footer);
            }
            body
        }
        OutgoingContent::Document {
            document,
            mimetype,
            file_name,
            caption,
        } => json!({
            "document": media_to_json(document),
            "mimetype": mimetype,
            "fileName": file_name,
            "caption": caption,
        }),
        OutgoingContent::Audio {
            audio,
            mimetype,
            caption,
        } => json!({
            "audio": media_to_json(audio),
            "mimetype": mimetype,
            "caption": caption,
        }),
        OutgoingContent::Image { image, caption } => {
            let mut body = json!({ "image": media_to_json(image) });
            if let Some(caption) = caption {
                body["caption"] = json!(caption);
            }
            body
        }
        OutgoingContent::Video {
            video,
            caption,
            file_name,
        } => json!({
            "video": media_to_json(video),
            "caption": caption,
            "fileName": file_name,
        }),
        OutgoingContent::Sticker { sticker } => json!({
            "sticker": Value::String(B64.encode(sticker)),
        }),
    }
}

/// `data:` URI for raw media bytes, e.g. to hand image data to a renderer.
pub fn data_uri(bytes: &[u8], mimetype: &str) -> String {
    format!("data:{mimetype};base64,{}", B64.encode(bytes))
}
