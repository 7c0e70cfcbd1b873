//! Generic finite state machine engine.
//!
//! The machine owns one long-lived instance per state identifier, built once
//! when the machine is created. States are never recreated on a transition;
//! anything they need to reset happens in `on_enter`.
//!
//! A state does not switch the machine itself. `on_update` returns the
//! identifier it wants to move to and the owner decides whether to apply it,
//! which is where owner-level guards (such as "dead enemies stay dead") live.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Identifier of a state. Every member listed in `ALL` gets exactly one
/// instance in the machine.
pub trait StateId: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    const ALL: &'static [Self];
}

/// Lifecycle of a single state.
pub trait State<Id, Ctx> {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    fn on_enter(&mut self, _ctx: &mut Ctx) {}

    /// Called once per tick while this state is active.
    ///
    /// Returns the state to transition to, if any.
    fn on_update(&mut self, ctx: &mut Ctx) -> Option<Id>;

    fn on_exit(&mut self, _ctx: &mut Ctx) {}
}

/// Table of states plus the currently active one.
///
/// `S` is the stored state type, usually a boxed trait object such as
/// `dyn for<'a> State<MyId, MyContext<'a>>`.
pub struct StateMachine<Id: StateId, S: ?Sized> {
    states: HashMap<Id, Box<S>>,
    current: Option<Id>,
}

impl<Id: StateId, S: ?Sized> StateMachine<Id, S> {
    /// Build the full table by asking `build` for the instance of every id.
    pub fn from_fn(mut build: impl FnMut(Id) -> Box<S>) -> Self {
        let states = Id::ALL.iter().map(|&id| (id, build(id))).collect();
        Self {
            states,
            current: None,
        }
    }

    /// Currently active state, `None` before the first transition.
    pub fn current(&self) -> Option<Id> {
        self.current
    }

    /// Exit the current state (if any), enter `id` and make it current.
    ///
    /// Unconditional: guards belong to the owner.
    pub fn transition_to<Ctx>(&mut self, id: Id, ctx: &mut Ctx)
    where
        S: State<Id, Ctx>,
    {
        if let Some(previous) = self.current {
            if let Some(state) = self.states.get_mut(&previous) {
                state.on_exit(ctx);
            }
        }

        let Some(next) = self.states.get_mut(&id) else {
            // Unreachable with a table built by `from_fn`.
            bevy::log::error!("State {:?} missing from state table", id);
            return;
        };
        next.on_enter(ctx);
        self.current = Some(id);
    }

    /// Run `on_update` on the current state and hand back its request.
    pub fn tick<Ctx>(&mut self, ctx: &mut Ctx) -> Option<Id>
    where
        S: State<Id, Ctx>,
    {
        let id = self.current?;
        self.states.get_mut(&id)?.on_update(ctx)
    }
}
