//! Atom sprites driven entirely by the engine's notification streams.
//!
//! The scene never polls the board. A sprite is born from an `on_new_atom`
//! event and afterwards follows its atom's state stream, easing toward the
//! slot the latest state points at.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use macroquad::math::{Vec2, vec2};
use ::rand::Rng;

use crate::domain::{Atom, AtomGame, AtomId, AtomState, Player, Subscription};

/// Distance of the four fixed slots from the cell centre, in cells
pub const SLOT_OFFSET: f32 = 0.25;

const SPRING: f32 = 90.0;
const DAMPING: f32 = 0.8;
const SNAP_DISTANCE: f32 = 0.002;

/// Offset of a stacked atom from its cell centre, in cells.
/// Slots 0-3 sit left, above, right and below; anything further is scattered.
pub fn slot_offset(slot_index: usize) -> Vec2 {
    match slot_index {
        0 => vec2(-SLOT_OFFSET, 0.0),
        1 => vec2(0.0, -SLOT_OFFSET),
        2 => vec2(SLOT_OFFSET, 0.0),
        3 => vec2(0.0, SLOT_OFFSET),
        _ => {
            let mut rng = ::rand::rng();
            vec2(
                rng.random_range(-SLOT_OFFSET..=SLOT_OFFSET),
                rng.random_range(-SLOT_OFFSET..=SLOT_OFFSET),
            )
        }
    }
}

/// Where an atom in `state` should rest, in fractional cell coordinates
pub fn rest_position(state: &AtomState) -> Vec2 {
    vec2(state.x as f32 + 0.5, state.y as f32 + 0.5) + slot_offset(state.slot_index)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtomSprite {
    pub id: AtomId,
    pub player: Player,
    pub pos: Vec2,
    pub vel: Vec2,
    pub target: Vec2,
}

impl AtomSprite {
    fn spawn(id: AtomId, state: &AtomState) -> Self {
        let target = rest_position(state);
        Self {
            id,
            player: state.player,
            pos: target,
            vel: Vec2::ZERO,
            target,
        }
    }

    fn retarget(&mut self, state: &AtomState) {
        self.player = state.player;
        self.target = rest_position(state);
    }

    /// Damped spring step toward the target
    pub fn update(&mut self, delta_time: f32) {
        let diff = self.target - self.pos;
        if diff.length() < SNAP_DISTANCE && self.vel.length() < SNAP_DISTANCE {
            self.pos = self.target;
            self.vel = Vec2::ZERO;
            return;
        }
        // DAMPING is per 60 Hz frame
        self.vel = (self.vel + diff * SPRING * delta_time) * DAMPING.powf(delta_time * 60.0);
        self.pos += self.vel * delta_time;
    }

    pub fn is_resting(&self) -> bool {
        self.pos == self.target && self.vel == Vec2::ZERO
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

type SpriteMap = Arc<Mutex<BTreeMap<AtomId, AtomSprite>>>;

/// All atom sprites of one board.
pub struct AtomScene {
    sprites: SpriteMap,
    state_subscriptions: Arc<Mutex<Vec<Subscription>>>,
    _new_atoms: Subscription,
}

impl AtomScene {
    /// Start listening to `game` for new atoms.
    pub fn attach(game: &AtomGame) -> Self {
        let sprites: SpriteMap = Arc::new(Mutex::new(BTreeMap::new()));
        let state_subscriptions = Arc::new(Mutex::new(Vec::new()));

        let new_atoms = {
            let sprites = Arc::clone(&sprites);
            let state_subscriptions = Arc::clone(&state_subscriptions);
            game.on_new_atom().subscribe(move |atom: &Atom| {
                let subscription = follow(atom, Arc::clone(&sprites));
                lock(&state_subscriptions).push(subscription);
            })
        };

        Self {
            sprites,
            state_subscriptions,
            _new_atoms: new_atoms,
        }
    }

    /// Forget every sprite and stop following their atoms.
    pub fn clear(&self) {
        lock(&self.state_subscriptions).clear();
        lock(&self.sprites).clear();
    }

    pub fn update(&self, delta_time: f32) {
        lock(&self.sprites)
            .values_mut()
            .for_each(|sprite| sprite.update(delta_time));
    }

    /// Copy of all sprites, ordered by atom id
    pub fn sprites(&self) -> Vec<AtomSprite> {
        lock(&self.sprites).values().copied().collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.sprites).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn follow(atom: &Atom, sprites: SpriteMap) -> Subscription {
    let id = atom.id();
    atom.state().subscribe(move |state: &AtomState| {
        lock(&sprites)
            .entry(id)
            .and_modify(|sprite| sprite.retarget(state))
            .or_insert_with(|| AtomSprite::spawn(id, state));
    })
}
