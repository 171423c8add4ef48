//! Outbound message surface for the communication bridge.
//!
//! The CLI contract is real and tested: `<endpoint_id> <message>`, where
//! the message may carry a `[MEDIA:<type>] <path>` prefix selecting a
//! media payload over plain text. The transport behind it is a typed
//! placeholder — every call fails with [`SendError::NotImplemented`]
//! until a platform SDK integration is plugged in.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

/// Errors produced by the send surface.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("{0} not implemented")]
    NotImplemented(&'static str),
}

/// Media payload categories accepted by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    File,
    Video,
    Audio,
}

impl FromStr for MediaKind {
    type Err = SendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "file" => Ok(Self::File),
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            other => Err(SendError::UnsupportedMedia(other.to_string())),
        }
    }
}

/// A parsed outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingMessage {
    Text(String),
    Media { kind: MediaKind, path: PathBuf },
}

impl OutgoingMessage {
    /// Parse the raw CLI message argument.
    ///
    /// A message of the form `[MEDIA:<word>] <path>` becomes a media
    /// message; the media word must name a known [`MediaKind`]. Anything
    /// that does not match that shape — including a bare `[MEDIA:x]` with
    /// no path — is treated as plain text.
    pub fn parse(raw: &str) -> Result<Self, SendError> {
        if let Some((kind_word, path)) = split_media_prefix(raw) {
            let kind = kind_word.parse()?;
            return Ok(Self::Media {
                kind,
                path: PathBuf::from(path),
            });
        }
        Ok(Self::Text(raw.to_string()))
    }
}

/// Split `[MEDIA:<word>]<whitespace><path>` into its two captures.
///
/// Returns `None` when the message does not match that shape, in which
/// case it is sent as plain text.
fn split_media_prefix(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix("[MEDIA:")?;
    let close = rest.find(']')?;
    let kind = &rest[..close];
    if kind.is_empty() || !kind.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }

    let after = &rest[close + 1..];
    let path = after.trim_start();
    // At least one whitespace character must separate prefix and path.
    if path.is_empty() || path.len() == after.len() {
        return None;
    }
    Some((kind, path))
}

/// Concrete delivery mechanism for outbound messages.
///
/// The platform SDK (or whatever carries the messages) is an external
/// collaborator implementing this trait; the component core only defines
/// the contract.
pub trait Transport {
    fn send_text(&self, endpoint: &str, text: &str) -> Result<(), SendError>;

    fn send_media(&self, endpoint: &str, kind: MediaKind, path: &Path) -> Result<(), SendError>;
}

/// Stand-in transport used until an integration is wired up.
///
/// Fails every operation with a distinct not-implemented error so the
/// gap is visible at the call site rather than silently dropped.
pub struct PlaceholderTransport;

impl Transport for PlaceholderTransport {
    fn send_text(&self, _endpoint: &str, _text: &str) -> Result<(), SendError> {
        Err(SendError::NotImplemented("send_text"))
    }

    fn send_media(&self, _endpoint: &str, _kind: MediaKind, _path: &Path) -> Result<(), SendError> {
        Err(SendError::NotImplemented("send_media"))
    }
}

/// Parse `raw` and hand it to the matching transport operation.
pub fn dispatch(transport: &dyn Transport, endpoint: &str, raw: &str) -> Result<(), SendError> {
    match OutgoingMessage::parse(raw)? {
        OutgoingMessage::Text(text) => transport.send_text(endpoint, &text),
        OutgoingMessage::Media { kind, path } => transport.send_media(endpoint, kind, &path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_parses_as_text() {
        let msg = OutgoingMessage::parse("hello there").unwrap();
        assert_eq!(msg, OutgoingMessage::Text("hello there".to_string()));
    }

    #[test]
    fn media_prefix_parses_kind_and_path() {
        let msg = OutgoingMessage::parse("[MEDIA:image] /tmp/shot.png").unwrap();
        assert_eq!(
            msg,
            OutgoingMessage::Media {
                kind: MediaKind::Image,
                path: PathBuf::from("/tmp/shot.png"),
            }
        );
    }

    #[test]
    fn media_kind_is_case_insensitive() {
        let msg = OutgoingMessage::parse("[MEDIA:File] /tmp/doc.pdf").unwrap();
        assert!(matches!(
            msg,
            OutgoingMessage::Media {
                kind: MediaKind::File,
                ..
            }
        ));
    }

    #[test]
    fn unknown_media_word_is_rejected() {
        let err = OutgoingMessage::parse("[MEDIA:gif] /tmp/anim.gif").unwrap_err();
        assert!(matches!(err, SendError::UnsupportedMedia(ref w) if w == "gif"));
    }

    #[test]
    fn prefix_without_path_falls_back_to_text() {
        let msg = OutgoingMessage::parse("[MEDIA:image]").unwrap();
        assert_eq!(msg, OutgoingMessage::Text("[MEDIA:image]".to_string()));
    }

    #[test]
    fn prefix_without_separating_space_falls_back_to_text() {
        let msg = OutgoingMessage::parse("[MEDIA:image]/tmp/shot.png").unwrap();
        assert_eq!(
            msg,
            OutgoingMessage::Text("[MEDIA:image]/tmp/shot.png".to_string())
        );
    }

    #[test]
    fn malformed_media_word_falls_back_to_text() {
        let msg = OutgoingMessage::parse("[MEDIA:im age] /tmp/x").unwrap();
        assert!(matches!(msg, OutgoingMessage::Text(_)));
    }

    #[test]
    fn placeholder_transport_rejects_text() {
        let err = dispatch(&PlaceholderTransport, "chat-1", "hi").unwrap_err();
        assert!(matches!(err, SendError::NotImplemented("send_text")));
    }

    #[test]
    fn placeholder_transport_rejects_media() {
        let err =
            dispatch(&PlaceholderTransport, "chat-1", "[MEDIA:file] /tmp/doc.pdf").unwrap_err();
        assert!(matches!(err, SendError::NotImplemented("send_media")));
    }
}
