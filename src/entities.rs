//! All game entity types — plain data plus the geometric queries on them.
//! Anything that advances time or touches the RNG lives in `compute`.

use crate::config::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BubbleKind {
    Normal,
    /// Costs a life when clicked; harmless when it escapes.
    Bomb,
    Coin,
    /// Restores one life (up to the cap).
    Heart,
}

impl BubbleKind {
    /// Score awarded for popping a bubble of this kind.
    pub fn points(self) -> u32 {
        match self {
            BubbleKind::Normal => 10,
            BubbleKind::Coin => 50,
            BubbleKind::Heart => 25,
            BubbleKind::Bomb => 0,
        }
    }

    /// Coin and heart pops use the "collect" cue instead of "pop".
    pub fn is_collectible(self) -> bool {
        matches!(self, BubbleKind::Coin | BubbleKind::Heart)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    Playing,
    GameOver,
}

/// Audio cues emitted by the simulation for the sound layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A normal bubble popped, or a bomb went off.
    Pop,
    /// A coin or heart was collected.
    Collect,
}

// ── Bubbles ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bubble {
    pub x: f32,
    pub y: f32,
    pub radius: u32,
    /// Units risen per frame.
    pub speed: f32,
    pub color: Rgb,
    pub kind: BubbleKind,
    pub pulse: f32,
    pub pulse_speed: f32,
    pub wobble: f32,
    pub wobble_speed: f32,
    pub wobble_amount: f32,
}

impl Bubble {
    /// True once the whole bubble has left through the top edge.
    pub fn is_off_screen(&self) -> bool {
        self.y < -(self.radius as f32)
    }

    /// Hit-test against the nominal radius, not the pulsing one.
    pub fn is_clicked(&self, x: f32, y: f32) -> bool {
        let dx = x - self.x;
        let dy = y - self.y;
        (dx * dx + dy * dy).sqrt() <= self.radius as f32
    }

    pub fn points(&self) -> u32 {
        self.kind.points()
    }

    /// Radius as drawn: breathes ±3 units around the nominal one.
    pub fn display_radius(&self) -> f32 {
        (self.radius as f32 + self.pulse.sin() * 3.0).max(0.0)
    }
}

// ── Particles ────────────────────────────────────────────────────────────────

/// A spark thrown out when a bubble pops.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub color: Rgb,
    pub size: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining frames.
    pub life: u32,
    pub gravity: f32,
}

impl Particle {
    pub fn is_dead(&self) -> bool {
        self.life == 0
    }
}

// ── Master game state ────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct EntireGameStateInfo {
    /// Live bubbles in spawn order (oldest first).
    pub bubbles: Vec<Bubble>,
    pub particles: Vec<Particle>,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub combo: u32,
    /// Frames left before the combo lapses.
    pub combo_timer: u32,
    /// Frames since the last spawn.
    pub spawn_clock: u32,
    /// Frames between spawns at the current level.
    pub spawn_interval: u32,
    /// Non-bomb bubbles popped this run; drives level progression.
    pub bubbles_popped: u32,
    pub status: GameStatus,
    /// Frames simulated while playing.
    pub frame: u64,
    /// Cues produced since the caller last drained them.
    pub events: Vec<GameEvent>,
}
