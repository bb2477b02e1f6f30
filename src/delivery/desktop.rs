use super::{
    DeliveryError, DeliveryHost, LinkTarget, ObjectHandle, ShareCapability, ShareError, ShareFile,
    SharePayload, TransientLink,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempPath;

/// Delivery on a desktop: object handles are temporary files, downloads are
/// copies into a downloads directory and new views open in an external viewer.
#[derive(Debug)]
pub struct DesktopHost {
    downloads_dir: PathBuf,
    viewer_command: Option<String>,
    share: Option<CommandShare>,
    handles: Mutex<HashMap<ObjectHandle, TempPath>>,
}

impl DesktopHost {
    pub fn new(downloads_dir: impl Into<PathBuf>) -> Self {
        Self {
            downloads_dir: downloads_dir.into(),
            viewer_command: None,
            share: None,
            handles: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_viewer(mut self, command: Option<String>) -> Self {
        self.viewer_command = command.filter(|c| !c.trim().is_empty());
        self
    }

    pub fn with_share_command(mut self, command: Option<String>) -> Self {
        self.share = command
            .filter(|c| !c.trim().is_empty())
            .map(CommandShare::new);
        self
    }

    pub fn downloads_dir(&self) -> &Path {
        &self.downloads_dir
    }

    /// Path of the temporary file behind a live handle.
    pub fn handle_path(&self, handle: &ObjectHandle) -> Option<PathBuf> {
        self.handles
            .lock()
            .ok()?
            .get(handle)
            .map(|p| p.to_path_buf())
    }

    pub fn live_handles(&self) -> usize {
        self.handles.lock().map(|h| h.len()).unwrap_or(0)
    }

    fn open_in_viewer(&self, path: &Path) -> Result<(), DeliveryError> {
        let command = self.viewer_command.as_deref().ok_or(DeliveryError::NoViewer)?;
        let mut parts = command.split_whitespace();
        let program = parts.next().ok_or(DeliveryError::NoViewer)?;
        std::process::Command::new(program)
            .args(parts)
            .arg(path)
            .spawn()
            .map_err(|e| DeliveryError::TriggerFailed(format!("{}: {}", program, e)))?;
        log::info!("Opened {} with {}", path.display(), program);
        Ok(())
    }
}

impl DeliveryHost for DesktopHost {
    fn create_object_handle(&self, bytes: &[u8], _mime: &str) -> Result<ObjectHandle, DeliveryError> {
        let mut file = tempfile::Builder::new()
            .prefix("hirer-")
            .suffix(".pdf")
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;
        let path = file.into_temp_path();
        let handle = ObjectHandle::new(path.to_string_lossy());
        self.handles
            .lock()
            .map_err(|_| DeliveryError::HandleFailed("handle table lock poisoned".into()))?
            .insert(handle.clone(), path);
        log::debug!("Created object handle {}", handle.as_str());
        Ok(handle)
    }

    fn trigger_link(&self, link: &TransientLink) -> Result<(), DeliveryError> {
        let source = self
            .handle_path(&link.href)
            .ok_or_else(|| DeliveryError::UnknownHandle(link.href.as_str().to_string()))?;

        match (&link.download, link.target) {
            (Some(filename), _) => {
                std::fs::create_dir_all(&self.downloads_dir)?;
                let name = Path::new(filename)
                    .file_name()
                    .ok_or_else(|| DeliveryError::SaveFailed(format!("invalid file name '{}'", filename)))?;
                let target = self.downloads_dir.join(name);
                std::fs::copy(&source, &target)?;
                log::info!("Saved {}", target.display());
                Ok(())
            }
            (None, LinkTarget::NewView) | (None, LinkTarget::SameView) => self.open_in_viewer(&source),
        }
    }

    fn revoke_object_handle(&self, handle: &ObjectHandle) {
        let removed = self
            .handles
            .lock()
            .ok()
            .and_then(|mut handles| handles.remove(handle));
        if let Some(path) = removed {
            if let Err(e) = path.close() {
                log::debug!("Could not remove {}: {}", handle.as_str(), e);
            } else {
                log::debug!("Revoked object handle {}", handle.as_str());
            }
        }
    }

    fn share_capability(&self) -> Option<&dyn ShareCapability> {
        self.share.as_ref().map(|s| s as &dyn ShareCapability)
    }

    fn notify(&self, message: &str) {
        log::warn!("{}", message);
        eprintln!("{}", message);
    }
}

/// Shares by running `<command> <text> <file>...` with the files written to a temporary directory.
///
/// Exit status 0 means shared; 130 (interrupted) counts as a cancellation.
#[derive(Debug, Clone)]
pub struct CommandShare {
    command: String,
}

impl CommandShare {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

#[async_trait]
impl ShareCapability for CommandShare {
    fn can_share_files(&self, files: &[ShareFile]) -> bool {
        !files.is_empty()
    }

    async fn share(&self, payload: &SharePayload) -> Result<(), ShareError> {
        let dir = tempfile::tempdir().map_err(|e| ShareError::Failed(e.to_string()))?;
        let mut paths = Vec::with_capacity(payload.files.len());
        for file in &payload.files {
            let name = Path::new(&file.name)
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "shared.pdf".into());
            let path = dir.path().join(name);
            tokio::fs::write(&path, file.bytes.as_slice())
                .await
                .map_err(|e| ShareError::Failed(e.to_string()))?;
            paths.push(path);
        }

        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| ShareError::Failed("empty share command".into()))?;
        let status = tokio::process::Command::new(program)
            .args(parts)
            .arg(&payload.text)
            .args(&paths)
            .status()
            .await
            .map_err(|e| ShareError::Failed(format!("{}: {}", program, e)))?;

        match status.code() {
            Some(0) => Ok(()),
            Some(130) => Err(ShareError::Cancelled),
            _ => Err(ShareError::Failed(format!("{} exited with {}", program, status))),
        }
    }
}
