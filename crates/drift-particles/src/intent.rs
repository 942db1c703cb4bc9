//! Input events queued for the next tick.

use std::collections::VecDeque;

use drift_core::{Size, Vec2};

/// A host event waiting to be applied to the field.
///
/// Hosts never mutate particles directly. They enqueue intents, which the
/// field drains at the start of the next tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// The pointer moved to a position in device pixels.
    Hover(Vec2),
    /// The pointer left the surface.
    Leave,
    /// Spawn `push.particles_nb` particles here.
    Push(Vec2),
    /// Delete the `remove.particles_nb` particles nearest this point.
    Remove(Vec2),
    /// Blast particles away from this point once.
    Repulse(Vec2),
    /// The surface changed size or pixel density.
    Resize { size: Size, pixel_ratio: f32 },
}

/// FIFO of pending intents with resize coalescing.
#[derive(Debug, Default)]
pub(crate) struct IntentQueue {
    pending: VecDeque<Intent>,
}

impl IntentQueue {
    pub fn push(&mut self, intent: Intent) {
        self.pending.push_back(intent);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Take every pending intent in arrival order.
    ///
    /// Only the last `Resize` survives; it keeps its original position in the
    /// sequence so clicks before it land on the old layout.
    pub fn drain(&mut self) -> Vec<Intent> {
        let pending = std::mem::take(&mut self.pending);
        let last_resize = pending
            .iter()
            .rposition(|intent| matches!(intent, Intent::Resize { .. }));

        pending
            .into_iter()
            .enumerate()
            .filter(|(i, intent)| {
                !matches!(intent, Intent::Resize { .. }) || Some(*i) == last_resize
            })
            .map(|(_, intent)| intent)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resize(w: f32) -> Intent {
        Intent::Resize {
            size: Size::new(w, 100.0),
            pixel_ratio: 1.0,
        }
    }

    #[test]
    fn test_drain_keeps_order() {
        let mut queue = IntentQueue::default();
        queue.push(Intent::Push(Vec2::ONE));
        queue.push(Intent::Leave);
        queue.push(Intent::Remove(Vec2::ZERO));

        assert_eq!(
            queue.drain(),
            vec![
                Intent::Push(Vec2::ONE),
                Intent::Leave,
                Intent::Remove(Vec2::ZERO)
            ]
        );
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_resizes_coalesce_to_last() {
        let mut queue = IntentQueue::default();
        queue.push(resize(100.0));
        queue.push(Intent::Push(Vec2::ONE));
        queue.push(resize(200.0));
        queue.push(resize(300.0));

        assert_eq!(queue.drain(), vec![Intent::Push(Vec2::ONE), resize(300.0)]);
    }
}
