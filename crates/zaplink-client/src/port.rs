use async_trait::async_trait;

use crate::types::{
    GroupMetadata, Jid, MediaDownloadOptions, MessageMeta, OutgoingContent, SendOptions,
};
use crate::Result;

/// Capability port over the injected chat client.
///
/// Deliberately narrow: session helpers only ever need these three calls, so a
/// substitute implementation is enough to test everything above the wire.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Deliver `content` to `recipient`. Fire-and-forget from the session's
    /// point of view: there is no retry policy on top of this call.
    async fn send_message(
        &self,
        recipient: &Jid,
        content: OutgoingContent,
        options: Option<SendOptions>,
    ) -> Result<()>;

    /// Metadata (participant list, admin flags) for a group chat.
    async fn group_metadata(&self, group: &Jid) -> Result<GroupMetadata>;

    /// Fetch the raw bytes of the media attached to `message`.
    async fn download_media(
        &self,
        message: &MessageMeta,
        options: &MediaDownloadOptions,
    ) -> Result<Vec<u8>>;
}
