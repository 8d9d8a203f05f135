use std::collections::BTreeMap;

/// Handle returned by [`FrameTicker::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickerId(u64);

/// Per-frame subscription registry.
///
/// The main loop calls [`advance`](FrameTicker::advance) once per rendered
/// frame; every subscriber gets one pending tick it drains with
/// [`take_ticks`](FrameTicker::take_ticks). Tests drive it with explicit
/// frame times instead of a clock.
#[derive(Debug, Default)]
pub struct FrameTicker {
    next_id: u64,
    pending: BTreeMap<TickerId, u32>,
    frame: u64,
}

impl FrameTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self) -> TickerId {
        let id = TickerId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id, 0);
        tracing::trace!(?id, "ticker subscription added");
        id
    }

    /// Returns false when the id was not subscribed.
    pub fn remove(&mut self, id: TickerId) -> bool {
        let removed = self.pending.remove(&id).is_some();
        if removed {
            tracing::trace!(?id, "ticker subscription removed");
        }
        removed
    }

    pub fn is_subscribed(&self, id: TickerId) -> bool {
        self.pending.contains_key(&id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.pending.len()
    }

    /// Delivers one tick of `dt` seconds to every subscriber.
    pub fn advance(&mut self, dt: f32) -> u64 {
        tracing::trace!(frame = self.frame + 1, dt, "tick");
        self.frame += 1;
        for ticks in self.pending.values_mut() {
            *ticks = ticks.saturating_add(1);
        }
        self.frame
    }

    /// Drains the ticks delivered to `id` since the last call.
    pub fn take_ticks(&mut self, id: TickerId) -> u32 {
        self.pending.get_mut(&id).map(std::mem::take).unwrap_or(0)
    }
}
