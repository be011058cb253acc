use std::collections::HashMap;
use std::fmt;

use crate::frames::{FrameKind, StreamFrame};

/// Callback invoked with each dispatched frame.
pub type FrameListener = Box<dyn FnMut(&StreamFrame) + Send>;

/// Handle returned by registration; the only way to unregister.
///
/// Boxed closures are not comparable, so removal goes through the handle
/// rather than function identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Typed dispatch table from frame kind to listeners, plus a wildcard
/// any-frame channel.
///
/// Dispatch is synchronous and ordered: for each frame, the kind channel runs
/// in registration order, then the wildcard channel in registration order.
#[derive(Default)]
pub struct FrameRouter {
    next_id: u64,
    channels: HashMap<FrameKind, Vec<(ListenerId, FrameListener)>>,
    any: Vec<(ListenerId, FrameListener)>,
}

impl FrameRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for one frame kind.
    pub fn on(
        &mut self,
        kind: FrameKind,
        listener: impl FnMut(&StreamFrame) + Send + 'static,
    ) -> ListenerId {
        let id = self.next_listener_id();
        self.channels
            .entry(kind)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Registers a listener receiving every dispatched frame.
    pub fn on_any(&mut self, listener: impl FnMut(&StreamFrame) + Send + 'static) -> ListenerId {
        let id = self.next_listener_id();
        self.any.push((id, Box::new(listener)));
        id
    }

    /// Removes a previously registered listener. Returns false when the
    /// handle is unknown (already removed, or never issued by this router).
    pub fn off(&mut self, id: ListenerId) -> bool {
        for listeners in self.channels.values_mut() {
            if let Some(position) = listeners.iter().position(|(entry, _)| *entry == id) {
                listeners.remove(position);
                return true;
            }
        }
        if let Some(position) = self.any.iter().position(|(entry, _)| *entry == id) {
            self.any.remove(position);
            return true;
        }
        false
    }

    /// Hands one frame to the kind channel, then the wildcard channel.
    pub fn dispatch(&mut self, frame: &StreamFrame) {
        if let Some(listeners) = self.channels.get_mut(&frame.kind) {
            for (_, listener) in listeners.iter_mut() {
                listener(frame);
            }
        }
        for (_, listener) in self.any.iter_mut() {
            listener(frame);
        }
    }

    /// Total registered listeners across all channels.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.channels.values().map(Vec::len).sum::<usize>() + self.any.len()
    }

    fn next_listener_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl fmt::Debug for FrameRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameRouter")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
