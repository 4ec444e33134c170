use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Chat/participant address (jid-style string id).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Jid(pub String);

impl Jid {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One reply button: stable id plus display text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub id: String,
    pub text: String,
}

/// Media addressed by reference or carried inline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaSource {
    Url(String),
    Bytes(Vec<u8>),
}

/// Sticker input: a local file to read, or bytes already in hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocalMedia {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// Outbound payload shapes the client understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutgoingContent {
    Text {
        text: String,
    },
    Buttons {
        text: String,
        buttons: Vec<Button>,
        footer: Option<String>,
    },
    Document {
        document: MediaSource,
        mimetype: String,
        file_name: String,
        caption: String,
    },
    Audio {
        audio: MediaSource,
        mimetype: String,
        caption: String,
    },
    Image {
        image: MediaSource,
        caption: Option<String>,
    },
    Video {
        video: MediaSource,
        caption: String,
        file_name: String,
    },
    Sticker {
        sticker: Vec<u8>,
    },
}

/// Per-send options; `quoted` makes the send a reply to that message.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SendOptions {
    pub quoted: Option<MessageMeta>,
}

/// Admin role of a group participant, as reported by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Admin,
    SuperAdmin,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Jid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<AdminRole>,
}

/// Group metadata returned by `ChatClient::group_metadata`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMetadata {
    pub participants: Vec<Participant>,
}

/// Downloadable media kind attached to an incoming message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// Reference to an incoming message: where it came from and what it carries.
///
/// Direct chats may have no `remote_jid`; group messages carry the sender in
/// `participant`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessageMeta {
    pub remote_jid: Option<Jid>,
    pub participant: Option<Jid>,
    pub media: Option<MediaKind>,
    pub quoted: Option<Box<MessageMeta>>,
}

impl MessageMeta {
    pub fn from_chat(remote_jid: impl Into<String>) -> Self {
        Self {
            remote_jid: Some(Jid::new(remote_jid)),
            ..Self::default()
        }
    }
}

/// Options forwarded to the client when downloading message media.
#[derive(Clone, Debug)]
pub struct MediaDownloadOptions {
    pub timeout: std::time::Duration,
    pub user_agent: String,
}

/// MIME type inferred from a file extension; unknown or missing extensions
/// fall back to `application/octet-stream`.
pub fn mime_type_for(path: &str) -> &'static str {
    let extension = path
        .rsplit('.')
        .next()
        .filter(|ext| ext.len() < path.len())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("mp4") => "video/mp4",
        Some("gif") => "image/gif",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("pdf") => "application/pdf",
        Some("doc") | Some("docx") => "application/msword",
        _ => "application/octet-stream",
    }
}
