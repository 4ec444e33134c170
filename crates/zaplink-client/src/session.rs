//! Convenience send helpers over an injected [`ChatClient`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::port::ChatClient;
use crate::types::{
    Button, Jid, LocalMedia, MediaSource, MessageMeta, OutgoingContent, SendOptions,
};
use crate::{Error, Result};

/// Pass-through wrapper around a chat client, bound to the message currently
/// being handled.
///
/// Every send helper resolves its destination from an explicit requester
/// message or, failing that, the current message context; calling a helper
/// before [`ChatSession::set_current`] is a precondition error, not a silent
/// no-op.
pub struct ChatSession {
    client: Arc<dyn ChatClient>,
    config: ClientConfig,
    current: Option<MessageMeta>,
}

impl ChatSession {
    pub fn new(client: Arc<dyn ChatClient>, config: ClientConfig) -> Self {
        Self {
            client,
            config,
            current: None,
        }
    }

    pub fn client(&self) -> &Arc<dyn ChatClient> {
        &self.client
    }

    /// Bind the session to the message being handled.
    pub fn set_current(&mut self, message: MessageMeta) {
        self.current = Some(message);
    }

    pub fn current(&self) -> Option<&MessageMeta> {
        self.current.as_ref()
    }

    /// The message quoted by the current message, if any.
    pub fn quoted_message(&self) -> Option<&MessageMeta> {
        self.current.as_ref()?.quoted.as_deref()
    }

    fn context(&self) -> Result<&MessageMeta> {
        self.current.as_ref().ok_or(Error::NotInitialized)
    }

    /// Destination chat: the requester's jid when given, else the current
    /// message's. The session context is only required when the requester
    /// cannot name a destination itself.
    fn target_jid(&self, requester: Option<&MessageMeta>) -> Result<Jid> {
        if let Some(jid) = requester.and_then(|m| m.remote_jid.clone()) {
            return Ok(jid);
        }
        self.context()?
            .remote_jid
            .clone()
            .ok_or(Error::NotInitialized)
    }

    /// Plain text reply, quoting the author's message (or the current one).
    pub async fn reply_author(&self, message: &str, author: Option<&MessageMeta>) -> Result<()> {
        let jid = self.target_jid(author)?;
        let quoted = author.cloned().or_else(|| self.current.clone());
        self.client
            .send_message(
                &jid,
                OutgoingContent::Text {
                    text: message.to_string(),
                },
                Some(SendOptions { quoted }),
            )
            .await
    }

    /// Plain text send, no quoting.
    pub async fn send_text(&self, message: &str, requester: Option<&MessageMeta>) -> Result<()> {
        let jid = self.target_jid(requester)?;
        debug!(chat = jid.as_str(), "sending text");
        self.client
            .send_message(
                &jid,
                OutgoingContent::Text {
                    text: message.to_string(),
                },
                None,
            )
            .await
    }

    /// Button-list message: caption, reply buttons, optional footer title.
    pub async fn send_buttons(
        &self,
        caption: &str,
        buttons: Vec<Button>,
        requester: Option<&MessageMeta>,
        title: Option<&str>,
    ) -> Result<()> {
        let jid = self.target_jid(requester)?;
        self.client
            .send_message(
                &jid,
                OutgoingContent::Buttons {
                    text: caption.to_string(),
                    buttons,
                    footer: title.map(str::to_string),
                },
                None,
            )
            .await
    }

    /// Send a file from disk as a document; MIME type inferred from the
    /// extension, file name taken from the config default.
    pub async fn send_file(
        &self,
        file_address: &str,
        caption: &str,
        quoted: Option<&MessageMeta>,
    ) -> Result<()> {
        let jid = self.target_jid(quoted)?;
        let buffer = self.media_buffer(file_address).await?;
        let mimetype = crate::types::mime_type_for(file_address);
        self.client
            .send_message(
                &jid,
                OutgoingContent::Document {
                    document: MediaSource::Bytes(buffer),
                    mimetype: mimetype.to_string(),
                    file_name: self.config.default_file_name.clone(),
                    caption: caption.to_string(),
                },
                None,
            )
            .await
    }

    /// Send an audio file by reference.
    pub async fn send_song(
        &self,
        file_address: &str,
        caption: &str,
        quoted: Option<&MessageMeta>,
    ) -> Result<()> {
        let jid = self.target_jid(quoted)?;
        self.client
            .send_message(
                &jid,
                OutgoingContent::Audio {
                    audio: MediaSource::Url(file_address.to_string()),
                    mimetype: "audio/mp4".to_string(),
                    caption: caption.to_string(),
                },
                None,
            )
            .await
    }

    /// Raw bytes of a media file on disk.
    pub async fn media_buffer(&self, media_address: &str) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(media_address).await?)
    }

    /// Download the media attached to the quoted message (or the current one).
    pub async fn media_from_message(&self, quoted: Option<&MessageMeta>) -> Result<Vec<u8>> {
        let message = match quoted {
            Some(m) => m,
            None => self.context()?,
        };
        if message.media.is_none() {
            return Err(Error::NoMedia);
        }
        self.client
            .download_media(message, &self.config.download_options())
            .await
    }

    /// Send a sticker from a local file or bytes already in hand.
    pub async fn send_sticker(
        &self,
        media: LocalMedia,
        requester: Option<&MessageMeta>,
    ) -> Result<()> {
        let jid = self.target_jid(requester)?;
        let bytes = match media {
            LocalMedia::Path(path) => self.media_buffer(&path.to_string_lossy()).await?,
            LocalMedia::Bytes(bytes) => bytes,
        };
        self.client
            .send_message(&jid, OutgoingContent::Sticker { sticker: bytes }, None)
            .await
    }

    /// Send an animated (video) sticker.
    pub async fn send_video_sticker(
        &self,
        video: Vec<u8>,
        mimetype: &str,
        requester: Option<&MessageMeta>,
    ) -> Result<()> {
        let jid = self.target_jid(requester)?;
        debug!(chat = jid.as_str(), mimetype, "sending video sticker");
        self.client
            .send_message(&jid, OutgoingContent::Sticker { sticker: video }, None)
            .await
    }

    /// Send a document by URL.
    pub async fn send_file_from_url(
        &self,
        url: &str,
        file_name: &str,
        requester: &MessageMeta,
        caption: &str,
    ) -> Result<()> {
        let jid = self.target_jid(Some(requester))?;
        self.client
            .send_message(
                &jid,
                OutgoingContent::Document {
                    document: MediaSource::Url(url.to_string()),
                    mimetype: "application/octet-stream".to_string(),
                    file_name: file_name.to_string(),
                    caption: caption.to_string(),
                },
                None,
            )
            .await
    }

    /// Send an image by URL. A failed send is reported back to the author
    /// instead of propagating.
    pub async fn send_image_from_url(
        &self,
        url: &str,
        caption: Option<&str>,
        requester: Option<&MessageMeta>,
    ) -> Result<()> {
        let jid = self.target_jid(requester)?;
        let content = OutgoingContent::Image {
            image: MediaSource::Url(url.to_string()),
            caption: caption.map(str::to_string),
        };
        if let Err(e) = self.client.send_message(&jid, content, None).await {
            warn!(chat = jid.as_str(), "image send failed: {e}");
            self.reply_author(&format!("failed to send image: {e}"), requester)
                .await?;
        }
        Ok(())
    }

    /// Send in-memory bytes as a document. A failed send is reported back to
    /// the author instead of propagating.
    pub async fn send_file_from_buffer(
        &self,
        buffer: Vec<u8>,
        mimetype: &str,
        caption: &str,
        requester: &MessageMeta,
    ) -> Result<()> {
        let jid = self.target_jid(Some(requester))?;
        let content = OutgoingContent::Document {
            document: MediaSource::Bytes(buffer),
            mimetype: mimetype.to_string(),
            file_name: self.config.default_file_name.clone(),
            caption: caption.to_string(),
        };
        if let Err(e) = self.client.send_message(&jid, content, None).await {
            warn!(chat = jid.as_str(), "document send failed: {e}");
            self.reply_author(&format!("failed to send file: {e}"), Some(requester))
                .await?;
        }
        Ok(())
    }

    /// Send a video by URL. A failed send is reported back to the author
    /// instead of propagating.
    pub async fn send_video(
        &self,
        url: &str,
        name: &str,
        requester: &MessageMeta,
        caption: &str,
    ) -> Result<()> {
        let jid = self.target_jid(Some(requester))?;
        let content = OutgoingContent::Video {
            video: MediaSource::Url(url.to_string()),
            caption: caption.to_string(),
            file_name: name.to_string(),
        };
        if let Err(e) = self.client.send_message(&jid, content, None).await {
            warn!(chat = jid.as_str(), "video send failed: {e}");
            self.reply_author(&format!("failed to send video: {e}"), Some(requester))
                .await?;
        }
        Ok(())
    }

    /// Whether the sender of `requester` is an admin of the group it was sent
    /// in. Direct chats have no participant list; treat the sender as admin.
    pub async fn is_admin(&self, requester: &MessageMeta) -> Result<bool> {
        let Some(group) = &requester.remote_jid else {
            return Ok(true);
        };
        let metadata = self.client.group_metadata(group).await?;
        Ok(metadata
            .participants
            .iter()
            .filter(|p| p.admin.is_some())
            .any(|p| Some(&p.id) == requester.participant.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::types::{AdminRole, GroupMetadata, MediaDownloadOptions, MediaKind, Participant};

    #[derive(Clone, Debug)]
    struct SendCall {
        jid: Jid,
        content: OutgoingContent,
        options: Option<SendOptions>,
    }

    #[derive(Default)]
    struct FakeClient {
        sends: Mutex<Vec<SendCall>>,
        metadata: Mutex<Option<GroupMetadata>>,
        media: Mutex<Vec<u8>>,
        download_agents: Mutex<Vec<String>>,
        fail_next_send: AtomicBool,
    }

    impl FakeClient {
        fn sent(&self) -> Vec<SendCall> {
            self.sends.lock().unwrap().clone()
        }

        fn set_metadata(&self, metadata: GroupMetadata) {
            *self.metadata.lock().unwrap() = Some(metadata);
        }

        fn fail_next_send(&self) {
            self.fail_next_send.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl ChatClient for FakeClient {
        async fn send_message(
            &self,
            recipient: &Jid,
            content: OutgoingContent,
            options: Option<SendOptions>,
        ) -> Result<()> {
            if self.fail_next_send.swap(false, Ordering::SeqCst) {
                return Err(Error::Client("connection closed".to_string()));
            }
            self.sends.lock().unwrap().push(SendCall {
                jid: recipient.clone(),
                content,
                options,
            });
            Ok(())
        }

        async fn group_metadata(&self, _group: &Jid) -> Result<GroupMetadata> {
            self.metadata
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| Error::Client("no metadata configured".to_string()))
        }

        async fn download_media(
            &self,
            _message: &MessageMeta,
            options: &MediaDownloadOptions,
        ) -> Result<Vec<u8>> {
            self.download_agents
                .lock()
                .unwrap()
                .push(options.user_agent.clone());
            Ok(self.media.lock().unwrap().clone())
        }
    }

    fn session_with(client: Arc<FakeClient>) -> ChatSession {
        let mut session = ChatSession::new(client, ClientConfig::default());
        session.set_current(MessageMeta::from_chat("12345"));
        session
    }

    fn tmp_file(prefix: &str, ext: &str, contents: &[u8]) -> PathBuf {
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let pid = std::process::id();
        let path = PathBuf::from(format!("/tmp/{prefix}-{pid}-{ts}.{ext}"));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn send_text_targets_current_chat() {
        let client = Arc::new(FakeClient::default());
        let session = session_with(client.clone());

        session.send_text("Test message", None).await.unwrap();

        let sent = client.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].jid, Jid::new("12345"));
        assert_eq!(
            sent[0].content,
            OutgoingContent::Text {
                text: "Test message".to_string()
            }
        );
        assert!(sent[0].options.is_none());
    }

    #[tokio::test]
    async fn requester_jid_is_enough_without_a_context() {
        let client = Arc::new(FakeClient::default());
        let session = ChatSession::new(client.clone(), ClientConfig::default());
        let requester = MessageMeta::from_chat("12345");

        session
            .send_video("http://example.com/video.mp4", "video", &requester, "cap")
            .await
            .unwrap();
        session
            .send_file_from_buffer(b"data".to_vec(), "application/pdf", "cap", &requester)
            .await
            .unwrap();

        let sent = client.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|call| call.jid == Jid::new("12345")));
    }

    #[tokio::test]
    async fn sends_require_a_message_context() {
        let client = Arc::new(FakeClient::default());
        let session = ChatSession::new(client, ClientConfig::default());

        let err = session.send_text("hi", None).await.unwrap_err();
        assert!(matches!(err, Error::NotInitialized));
    }

    #[tokio::test]
    async fn reply_author_quotes_the_current_message() {
        let client = Arc::new(FakeClient::default());
        let session = session_with(client.clone());

        session.reply_author("Hello there", None).await.unwrap();

        let sent = client.sent();
        let options = sent[0].options.as_ref().expect("quoted send");
        assert_eq!(
            options.quoted.as_ref().and_then(|m| m.remote_jid.clone()),
            Some(Jid::new("12345"))
        );
    }

    #[tokio::test]
    async fn send_buttons_builds_button_payload() {
        let client = Arc::new(FakeClient::default());
        let session = session_with(client.clone());

        let buttons = vec![Button {
            id: "1".to_string(),
            text: "Button 1".to_string(),
        }];
        session
            .send_buttons("Test caption", buttons.clone(), None, Some("Test title"))
            .await
            .unwrap();

        let sent = client.sent();
        assert_eq!(
            sent[0].content,
            OutgoingContent::Buttons {
                text: "Test caption".to_string(),
                buttons,
                footer: Some("Test title".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn send_file_reads_disk_and_infers_mime() {
        let client = Arc::new(FakeClient::default());
        let session = session_with(client.clone());

        let path = tmp_file("zaplink-file", "pdf", b"file content");
        session
            .send_file(&path.to_string_lossy(), "Test caption", None)
            .await
            .unwrap();
        std::fs::remove_file(&path).unwrap();

        let sent = client.sent();
        assert_eq!(
            sent[0].content,
            OutgoingContent::Document {
                document: MediaSource::Bytes(b"file content".to_vec()),
                mimetype: "application/pdf".to_string(),
                file_name: "file".to_string(),
                caption: "Test caption".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn send_song_sends_audio_by_reference() {
        let client = Arc::new(FakeClient::default());
        let session = session_with(client.clone());

        session
            .send_song("path/to/file", "Test caption", None)
            .await
            .unwrap();

        let sent = client.sent();
        assert_eq!(
            sent[0].content,
            OutgoingContent::Audio {
                audio: MediaSource::Url("path/to/file".to_string()),
                mimetype: "audio/mp4".to_string(),
                caption: "Test caption".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn send_sticker_accepts_bytes_and_paths() {
        let client = Arc::new(FakeClient::default());
        let session = session_with(client.clone());

        session
            .send_sticker(LocalMedia::Bytes(b"sticker".to_vec()), None)
            .await
            .unwrap();

        let path = tmp_file("zaplink-sticker", "webp", b"file content");
        session
            .send_sticker(LocalMedia::Path(path.clone()), None)
            .await
            .unwrap();
        std::fs::remove_file(&path).unwrap();

        let sent = client.sent();
        assert_eq!(
            sent[0].content,
            OutgoingContent::Sticker {
                sticker: b"sticker".to_vec()
            }
        );
        assert_eq!(
            sent[1].content,
            OutgoingContent::Sticker {
                sticker: b"file content".to_vec()
            }
        );
    }

    #[tokio::test]
    async fn send_file_from_url_uses_octet_stream() {
        let client = Arc::new(FakeClient::default());
        let session = session_with(client.clone());
        let requester = MessageMeta::from_chat("12345");

        session
            .send_file_from_url("http://example.com/file", "file", &requester, "Test caption")
            .await
            .unwrap();

        let sent = client.sent();
        assert_eq!(
            sent[0].content,
            OutgoingContent::Document {
                document: MediaSource::Url("http://example.com/file".to_string()),
                mimetype: "application/octet-stream".to_string(),
                file_name: "file".to_string(),
                caption: "Test caption".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn send_video_builds_video_payload() {
        let client = Arc::new(FakeClient::default());
        let session = session_with(client.clone());
        let requester = MessageMeta::from_chat("12345");

        session
            .send_video("http://example.com/video.mp4", "video", &requester, "Test caption")
            .await
            .unwrap();

        let sent = client.sent();
        assert_eq!(
            sent[0].content,
            OutgoingContent::Video {
                video: MediaSource::Url("http://example.com/video.mp4".to_string()),
                caption: "Test caption".to_string(),
                file_name: "video".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn failed_image_send_is_reported_to_author() {
        let client = Arc::new(FakeClient::default());
        let session = session_with(client.clone());
        client.fail_next_send();

        session
            .send_image_from_url("http://example.com/image.jpg", Some("caption"), None)
            .await
            .unwrap();

        // The image send failed; the only recorded call is the diagnostic reply.
        let sent = client.sent();
        assert_eq!(sent.len(), 1);
        match &sent[0].content {
            OutgoingContent::Text { text } => {
                assert!(text.contains("failed to send image"), "got: {text}");
            }
            other => panic!("expected text reply, got {other:?}"),
        }
        assert!(sent[0].options.as_ref().is_some_and(|o| o.quoted.is_some()));
    }

    #[tokio::test]
    async fn failed_buffer_send_is_reported_to_author() {
        let client = Arc::new(FakeClient::default());
        let session = session_with(client.clone());
        let requester = MessageMeta::from_chat("12345");
        client.fail_next_send();

        session
            .send_file_from_buffer(b"data".to_vec(), "application/pdf", "cap", &requester)
            .await
            .unwrap();

        let sent = client.sent();
        assert_eq!(sent.len(), 1);
        assert!(matches!(
            &sent[0].content,
            OutgoingContent::Text { text } if text.contains("failed to send file")
        ));
    }

    #[tokio::test]
    async fn media_from_message_requires_attached_media() {
        let client = Arc::new(FakeClient::default());
        let session = session_with(client);

        let err = session.media_from_message(None).await.unwrap_err();
        assert!(matches!(err, Error::NoMedia));
    }

    #[tokio::test]
    async fn media_from_message_downloads_with_configured_options() {
        let client = Arc::new(FakeClient::default());
        *client.media.lock().unwrap() = b"media content".to_vec();

        let mut session = ChatSession::new(client.clone(), ClientConfig::default());
        let mut current = MessageMeta::from_chat("12345");
        current.media = Some(MediaKind::Image);
        session.set_current(current);

        let bytes = session.media_from_message(None).await.unwrap();
        assert_eq!(bytes, b"media content");
        assert_eq!(
            client.download_agents.lock().unwrap().as_slice(),
            ["zaplink"]
        );
    }

    #[tokio::test]
    async fn quoted_message_comes_from_current_context() {
        let client = Arc::new(FakeClient::default());
        let mut session = ChatSession::new(client, ClientConfig::default());

        let mut current = MessageMeta::from_chat("12345");
        current.quoted = Some(Box::new(MessageMeta::from_chat("67890")));
        session.set_current(current);

        let quoted = session.quoted_message().expect("quoted");
        assert_eq!(quoted.remote_jid, Some(Jid::new("67890")));
    }

    #[tokio::test]
    async fn is_admin_checks_group_participants() {
        let client = Arc::new(FakeClient::default());
        client.set_metadata(GroupMetadata {
            participants: vec![
                Participant {
                    id: Jid::new("12345"),
                    admin: Some(AdminRole::Admin),
                },
                Participant {
                    id: Jid::new("67890"),
                    admin: None,
                },
            ],
        });
        let session = session_with(client);

        let mut admin = MessageMeta::from_chat("group@g.us");
        admin.participant = Some(Jid::new("12345"));
        assert!(session.is_admin(&admin).await.unwrap());

        let mut member = MessageMeta::from_chat("group@g.us");
        member.participant = Some(Jid::new("67890"));
        assert!(!session.is_admin(&member).await.unwrap());
    }

    #[tokio::test]
    async fn direct_chats_count_as_admin() {
        let client = Arc::new(FakeClient::default());
        let session = session_with(client);

        let direct = MessageMeta::default();
        assert!(session.is_admin(&direct).await.unwrap());
    }
}
