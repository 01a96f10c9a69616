use std::fmt::Debug;

use crate::error::GameError;

/// A score keeping engine: state plus the commands that mutate it and a
/// projection of that state for rendering.
pub trait ScoreKeeper: Clone + PartialEq {
    type Action: Clone + Debug;
    type View;

    fn apply_action(&mut self, action: &Self::Action) -> Result<(), GameError>;
    /// Actions that would move the game forward from the current phase.
    fn available_actions(&self) -> Vec<Self::Action>;
    fn view(&self) -> Self::View;
    fn completed_rounds(&self) -> usize;
    fn is_finished(&self) -> bool;
}

pub type SubscriptionId = usize;

type Listener<V> = Box<dyn FnMut(&V)>;

/// Owns a single engine and republishes its view after every command that
/// changes it.
pub struct StateContainer<G: ScoreKeeper> {
    game: G,
    listeners: Vec<(SubscriptionId, Listener<G::View>)>,
    next_id: SubscriptionId,
}

impl<G: ScoreKeeper> StateContainer<G> {
    pub fn new(game: G) -> Self {
        Self {
            game,
            listeners: vec![],
            next_id: 0,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn get_state(&self) -> G::View {
        self.game.view()
    }

    /// Registers a listener and immediately hands it the current view.
    pub fn subscribe(&mut self, listener: impl FnMut(&G::View) + 'static) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        let mut listener: Listener<G::View> = Box::new(listener);
        listener(&self.game.view());
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Applies `action` to a copy of the game and swaps it in only if the
    /// command succeeded. Listeners are told only about actual changes.
    pub fn dispatch(&mut self, action: &G::Action) -> Result<(), GameError> {
        let mut next = self.game.clone();
        next.apply_action(action)?;
        if next == self.game {
            return Ok(());
        }
        self.game = next;
        if !self.listeners.is_empty() {
            let view = self.game.view();
            for (_, listener) in self.listeners.iter_mut() {
                listener(&view);
            }
        }
        Ok(())
    }
}
