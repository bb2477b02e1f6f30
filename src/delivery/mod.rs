//! Getting a generated PDF to the user: save, open, share or preview.
//!
//! The strategies are host independent. A [`DeliveryHost`] supplies the
//! primitives (object handles, transient links, an optional legacy save API and
//! an optional share capability) and [`Delivery`] picks between them, falling
//! back until something works. Failures never propagate to the caller; they end
//! in an advisory message shown through [`DeliveryHost::notify`].

mod desktop;
mod preview;

pub use desktop::{CommandShare, DesktopHost};
pub use preview::PreviewSlot;

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub const PDF_MIME: &str = "application/pdf";
pub const DOWNLOAD_FAILED_MESSAGE: &str =
    "Could not download the PDF. Try Share or long-press \u{2192} \u{2018}Download Linked File\u{2019}.";
/// How long an object handle outlives the link that used it.
pub const REVOKE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Could not create an object handle: {0}")]
    HandleFailed(String),

    #[error("Unknown object handle '{0}'")]
    UnknownHandle(String),

    #[error("Link activation failed: {0}")]
    TriggerFailed(String),

    #[error("Save failed: {0}")]
    SaveFailed(String),

    #[error("No viewer is configured")]
    NoViewer,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    #[error("Share was cancelled")]
    Cancelled,

    #[error("Share failed: {0}")]
    Failed(String),
}

/// A short-lived, host-issued reference to in-memory bytes (a blob URL, a temp file).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectHandle(String);

impl ObjectHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    SameView,
    NewView,
}

/// A link created only to be activated once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientLink {
    pub href: ObjectHandle,
    pub target: LinkTarget,
    /// Suggested file name; `None` asks the host to open rather than save.
    pub download: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareFile {
    pub name: String,
    pub mime: String,
    pub bytes: Arc<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub files: Vec<ShareFile>,
}

/// Single-call save API some hosts expose.
pub trait LegacySave: Send + Sync {
    fn save(&self, bytes: &[u8], filename: &str) -> Result<(), DeliveryError>;
}

#[async_trait]
pub trait ShareCapability: Send + Sync {
    fn can_share_files(&self, files: &[ShareFile]) -> bool;
    async fn share(&self, payload: &SharePayload) -> Result<(), ShareError>;
}

/// The primitives a platform offers for handing bytes to the user.
pub trait DeliveryHost: Send + Sync + Debug + 'static {
    fn legacy_save(&self) -> Option<&dyn LegacySave> {
        None
    }

    fn create_object_handle(&self, bytes: &[u8], mime: &str) -> Result<ObjectHandle, DeliveryError>;

    fn trigger_link(&self, link: &TransientLink) -> Result<(), DeliveryError>;

    /// Releases a handle. Unknown or already revoked handles are ignored.
    fn revoke_object_handle(&self, handle: &ObjectHandle);

    /// True on hosts that mishandle forced downloads and should open a new view instead.
    fn prefers_new_view(&self) -> bool {
        false
    }

    fn share_capability(&self) -> Option<&dyn ShareCapability> {
        None
    }

    /// Shows an advisory message to the user.
    fn notify(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Handed to the host's legacy save API.
    Saved,
    /// A transient link was activated; the handle is revoked after [`REVOKE_DELAY`].
    Triggered { target: LinkTarget },
    /// Every strategy failed and the user was told.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    FellBack(DownloadOutcome),
}

#[derive(Debug)]
pub struct Delivery<H: DeliveryHost> {
    host: Arc<H>,
    revoke_after: Duration,
}

impl<H: DeliveryHost> Clone for Delivery<H> {
    fn clone(&self) -> Self {
        Self {
            host: self.host.clone(),
            revoke_after: self.revoke_after,
        }
    }
}

impl<H: DeliveryHost> Delivery<H> {
    pub fn new(host: Arc<H>) -> Self {
        Self {
            host,
            revoke_after: REVOKE_DELAY,
        }
    }

    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    /// Saves `bytes` under `filename` using the first strategy the host supports.
    pub fn download(&self, bytes: &[u8], filename: &str) -> DownloadOutcome {
        match self.try_download(bytes, filename) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Download failed: {}", e);
                self.host.notify(DOWNLOAD_FAILED_MESSAGE);
                DownloadOutcome::Failed
            }
        }
    }

    fn try_download(&self, bytes: &[u8], filename: &str) -> Result<DownloadOutcome, DeliveryError> {
        if let Some(legacy) = self.host.legacy_save() {
            legacy.save(bytes, filename)?;
            return Ok(DownloadOutcome::Saved);
        }

        let handle = self.host.create_object_handle(bytes, PDF_MIME)?;
        let link = if self.host.prefers_new_view() {
            TransientLink {
                href: handle.clone(),
                target: LinkTarget::NewView,
                download: None,
            }
        } else {
            TransientLink {
                href: handle.clone(),
                target: LinkTarget::SameView,
                download: Some(filename.to_string()),
            }
        };
        let result = self.host.trigger_link(&link);
        self.schedule_revoke(handle);
        result?;
        Ok(DownloadOutcome::Triggered {
            target: link.target,
        })
    }

    fn schedule_revoke(&self, handle: ObjectHandle) {
        let host = self.host.clone();
        let delay = self.revoke_after;
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    host.revoke_object_handle(&handle);
                });
            }
            Err(_) => {
                log::debug!("No async runtime; revoking {} immediately", handle.as_str());
                host.revoke_object_handle(&handle);
            }
        }
    }

    /// Shares through the host's share capability when it can take files,
    /// otherwise (or on cancellation or failure) falls back to [`Delivery::download`].
    pub async fn share(&self, bytes: &[u8], filename: &str, title: &str, text: &str) -> ShareOutcome {
        if let Some(capability) = self.host.share_capability() {
            let payload = SharePayload {
                title: title.to_string(),
                files: vec![ShareFile {
                    name: filename.to_string(),
                    mime: PDF_MIME.to_string(),
                    bytes: Arc::new(bytes.to_vec()),
                }],
                text: text.to_string(),
            };
            if capability.can_share_files(&payload.files) {
                match capability.share(&payload).await {
                    Ok(()) => return ShareOutcome::Shared,
                    Err(ShareError::Cancelled) => log::info!("Share cancelled; downloading instead"),
                    Err(e) => log::warn!("{}; downloading instead", e),
                }
            }
        }
        ShareOutcome::FellBack(self.download(bytes, filename))
    }

    /// Creates a handle for inline viewing. The caller owns it, normally via a [`PreviewSlot`].
    pub fn open_preview(&self, bytes: &[u8]) -> Result<ObjectHandle, DeliveryError> {
        self.host.create_object_handle(bytes, PDF_MIME)
    }
}
