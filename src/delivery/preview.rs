use super::{DeliveryHost, ObjectHandle};
use std::sync::Arc;

/// Owns the handle of the PDF currently shown inline.
///
/// At most one handle is live: replacing it, clearing the slot or dropping the
/// slot revokes the previous one.
#[derive(Debug)]
pub struct PreviewSlot<H: DeliveryHost> {
    host: Arc<H>,
    current: Option<ObjectHandle>,
}

impl<H: DeliveryHost> PreviewSlot<H> {
    pub fn new(host: Arc<H>) -> Self {
        Self { host, current: None }
    }

    pub fn set(&mut self, handle: ObjectHandle) {
        if let Some(previous) = self.current.replace(handle) {
            self.host.revoke_object_handle(&previous);
        }
    }

    pub fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            self.host.revoke_object_handle(&previous);
        }
    }

    pub fn current(&self) -> Option<&ObjectHandle> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

impl<H: DeliveryHost> Drop for PreviewSlot<H> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::DesktopHost;

    #[test]
    fn test_replacing_and_dropping_revoke() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let host = Arc::new(DesktopHost::new(dir.path()));
        let first = host.create_object_handle(b"one", "application/pdf")?;
        let second = host.create_object_handle(b"two", "application/pdf")?;
        let first_path = host.handle_path(&first).unwrap();

        let mut slot = PreviewSlot::new(host.clone());
        slot.set(first);
        slot.set(second.clone());
        assert!(!first_path.exists());
        assert_eq!(slot.current(), Some(&second));
        assert_eq!(host.live_handles(), 1);

        drop(slot);
        assert_eq!(host.live_handles(), 0);
        Ok(())
    }
}
