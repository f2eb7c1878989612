//! Hit notification plumbing
//!
//! Physics never mutates the world directly. After a body's velocity has been
//! resolved, the struck obstacle's listeners receive a [`HitEvent`] and queue
//! [`WorldCommand`]s through a [`HitContext`]; the driver applies those
//! commands before the next body moves.

use std::cell::RefCell;
use std::rc::Rc;

use super::listeners::GameCounters;
use crate::collision::{BodyId, Hitter, SurfaceId};
use crate::geometry::{Color, Point};

/// Identifier returned when a listener is registered on an obstacle
pub type ListenerId = u32;

/// Listener handle; one listener may observe many obstacles
pub type SharedListener = Rc<RefCell<dyn HitListener>>;

/// A resolved hit, as seen by observers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEvent {
    pub surface_id: SurfaceId,
    pub surface_color: Color,
    pub hitter: Hitter,
    pub point: Point,
}

/// Observer of hits on an obstacle
pub trait HitListener {
    fn hit_event(&mut self, event: &HitEvent, ctx: &mut HitContext<'_>);
}

/// Structural change requested by a listener
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldCommand {
    RemoveSurface(SurfaceId),
    RemoveBody(BodyId),
    RecolorBody { body: BodyId, color: Color },
}

/// Driver-owned state lent to listeners for the duration of one dispatch
pub struct HitContext<'a> {
    pub counters: &'a mut GameCounters,
    commands: Vec<WorldCommand>,
}

impl<'a> HitContext<'a> {
    pub fn new(counters: &'a mut GameCounters) -> Self {
        Self {
            counters,
            commands: Vec::new(),
        }
    }

    pub fn remove_surface(&mut self, id: SurfaceId) {
        self.commands.push(WorldCommand::RemoveSurface(id));
    }

    pub fn remove_body(&mut self, id: BodyId) {
        self.commands.push(WorldCommand::RemoveBody(id));
    }

    pub fn recolor_body(&mut self, body: BodyId, color: Color) {
        self.commands.push(WorldCommand::RecolorBody { body, color });
    }

    pub fn commands(&self) -> &[WorldCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<WorldCommand> {
        self.commands
    }
}

/// Registry of listeners attached to one obstacle
#[derive(Clone)]
pub struct HitListeners {
    entries: Vec<(ListenerId, SharedListener)>,
    next_id: ListenerId,
}

impl Default for HitListeners {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl HitListeners {
    pub fn add(&mut self, listener: SharedListener) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(lid, _)| *lid != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of the registered listeners, in registration order
    pub fn snapshot(&self) -> Vec<SharedListener> {
        self.entries.iter().map(|(_, l)| l.clone()).collect()
    }
}

/// Deliver `event` to each listener in order
pub fn dispatch(listeners: &[SharedListener], event: &HitEvent, ctx: &mut HitContext<'_>) {
    for listener in listeners {
        match listener.try_borrow_mut() {
            Ok(mut l) => l.hit_event(event, ctx),
            Err(_) => log::warn!(
                "Listener busy, hit on surface {} not delivered",
                event.surface_id
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        seen: Vec<SurfaceId>,
    }

    impl HitListener for Recorder {
        fn hit_event(&mut self, event: &HitEvent, ctx: &mut HitContext<'_>) {
            self.seen.push(event.surface_id);
            ctx.remove_surface(event.surface_id);
        }
    }

    fn event(surface_id: SurfaceId) -> HitEvent {
        HitEvent {
            surface_id,
            surface_color: Color::GRAY,
            hitter: Hitter {
                id: 1,
                color: Color::WHITE,
                position: Point::ORIGIN,
                radius: 5,
            },
            point: Point::ORIGIN,
        }
    }

    #[test]
    fn test_registry_add_remove() {
        let recorder = Rc::new(RefCell::new(Recorder { seen: Vec::new() }));
        let mut listeners = HitListeners::default();
        let a = listeners.add(recorder.clone());
        let b = listeners.add(recorder.clone());
        assert_ne!(a, b);
        assert_eq!(listeners.len(), 2);

        assert!(listeners.remove(a));
        assert!(!listeners.remove(a));
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn test_dispatch_queues_commands() {
        let recorder = Rc::new(RefCell::new(Recorder { seen: Vec::new() }));
        let mut listeners = HitListeners::default();
        listeners.add(recorder.clone());

        let mut counters = GameCounters::default();
        let mut ctx = HitContext::new(&mut counters);
        dispatch(&listeners.snapshot(), &event(7), &mut ctx);

        assert_eq!(ctx.commands(), &[WorldCommand::RemoveSurface(7)]);
        assert_eq!(recorder.borrow().seen, vec![7]);
    }
}
