//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `EntireGameStateInfo` (and, where needed, the config and an RNG handle)
//! and returns a brand-new `EntireGameStateInfo`.  Side effects are limited
//! to the injected RNG and the cue list carried inside the state.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{GameConfig, Rgb, BOMB_GREY, COIN_GOLD, HEART_RED};
use crate::entities::{
    Bubble, BubbleKind, EntireGameStateInfo, GameEvent, GameStatus, Particle,
};

const MIN_RADIUS: u32 = 20;
const MAX_RADIUS: u32 = 40;
const PARTICLE_GRAVITY: f32 = 0.1;
const PARTICLE_SHRINK: f32 = 0.1;

// ── Spawning ─────────────────────────────────────────────────────────────────

/// Map one uniform roll in [0, 1) onto the cumulative type table.
pub fn bubble_kind_from_roll(cfg: &GameConfig, roll: f64) -> BubbleKind {
    if roll < cfg.bomb_threshold {
        BubbleKind::Bomb
    } else if roll < cfg.coin_threshold {
        BubbleKind::Coin
    } else if roll < cfg.heart_threshold {
        BubbleKind::Heart
    } else {
        BubbleKind::Normal
    }
}

/// Keep `x` within `[radius, width - radius]`; a field narrower than the
/// bubble pins it to the left bound.
fn clamp_x(x: f32, radius: f32, width: f32) -> f32 {
    x.min(width - radius).max(radius)
}

/// A new bubble just below the bottom edge.  `x` places it explicitly,
/// otherwise it lands uniformly where it fits.
pub fn spawn_bubble(cfg: &GameConfig, rng: &mut impl Rng, x: Option<f32>) -> Bubble {
    let radius = rng.gen_range(MIN_RADIUS..=MAX_RADIUS);
    let r = radius as f32;
    let x = match x {
        Some(x) => x,
        None if cfg.width > 2.0 * r => rng.gen_range(r..=cfg.width - r),
        None => clamp_x(cfg.width / 2.0, r, cfg.width),
    };
    let speed = rng.gen_range(1.0..3.0);
    let color = cfg
        .palette
        .choose(rng)
        .copied()
        .unwrap_or(Rgb(255, 255, 255));

    let kind = bubble_kind_from_roll(cfg, rng.gen::<f64>());
    let color = match kind {
        BubbleKind::Bomb => BOMB_GREY,
        BubbleKind::Coin => COIN_GOLD,
        BubbleKind::Heart => HEART_RED,
        BubbleKind::Normal => color,
    };

    Bubble {
        x,
        y: cfg.height + r,
        radius,
        speed,
        color,
        kind,
        pulse: 0.0,
        pulse_speed: rng.gen_range(0.02..0.05),
        wobble: 0.0,
        wobble_speed: rng.gen_range(0.03..0.07),
        wobble_amount: rng.gen_range(0.5..2.0),
    }
}

pub fn spawn_particle(x: f32, y: f32, color: Rgb, rng: &mut impl Rng) -> Particle {
    Particle {
        x,
        y,
        color,
        size: f32::from(rng.gen_range(3u8..=8)),
        vx: rng.gen_range(-4.0..4.0),
        vy: rng.gen_range(-4.0..4.0),
        life: rng.gen_range(20..=40),
        gravity: PARTICLE_GRAVITY,
    }
}

// ── Per-entity motion ────────────────────────────────────────────────────────

/// Rise, breathe and wobble by one frame.
pub fn advance_bubble(bubble: &Bubble, width: f32) -> Bubble {
    let pulse = bubble.pulse + bubble.pulse_speed;
    let wobble = bubble.wobble + bubble.wobble_speed;
    let x = bubble.x + wobble.sin() * bubble.wobble_amount;
    Bubble {
        x: clamp_x(x, bubble.radius as f32, width),
        y: bubble.y - bubble.speed,
        pulse,
        wobble,
        ..bubble.clone()
    }
}

pub fn advance_particle(p: &Particle) -> Particle {
    Particle {
        x: p.x + p.vx,
        y: p.y + p.vy,
        vy: p.vy + p.gravity,
        life: p.life.saturating_sub(1),
        size: (p.size - PARTICLE_SHRINK).max(0.0),
        ..p.clone()
    }
}

// ── Lifecycle ────────────────────────────────────────────────────────────────

/// A fresh run waiting for the start key.
pub fn init_state(cfg: &GameConfig) -> EntireGameStateInfo {
    EntireGameStateInfo {
        bubbles: Vec::new(),
        particles: Vec::new(),
        score: 0,
        lives: cfg.starting_lives.min(cfg.max_lives),
        level: 1,
        combo: 0,
        combo_timer: 0,
        spawn_clock: 0,
        spawn_interval: cfg.base_spawn_interval.max(cfg.min_spawn_interval),
        bubbles_popped: 0,
        status: GameStatus::NotStarted,
        frame: 0,
        events: Vec::new(),
    }
}

pub fn start_game(state: &EntireGameStateInfo) -> EntireGameStateInfo {
    if state.status != GameStatus::NotStarted {
        return state.clone();
    }
    log::info!("game started");
    EntireGameStateInfo {
        status: GameStatus::Playing,
        ..state.clone()
    }
}

/// Throw the finished run away.  Only valid from game over.
pub fn restart(state: &EntireGameStateInfo, cfg: &GameConfig) -> EntireGameStateInfo {
    if state.status != GameStatus::GameOver {
        return state.clone();
    }
    log::info!("restarting after final score {}", state.score);
    init_state(cfg)
}

/// Hand the accumulated cues to the caller, leaving the list empty.
pub fn take_events(state: &mut EntireGameStateInfo) -> Vec<GameEvent> {
    std::mem::take(&mut state.events)
}

fn lose_life(state: &mut EntireGameStateInfo) {
    state.lives = state.lives.saturating_sub(1);
    if state.lives == 0 && state.status == GameStatus::Playing {
        state.status = GameStatus::GameOver;
        log::info!(
            "game over: score {} level {} popped {}",
            state.score,
            state.level,
            state.bubbles_popped
        );
    }
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Resolve a click at world point (`x`, `y`).
///
/// Bubbles are scanned oldest first and only the first hit pops, so where
/// bubbles overlap the older one wins regardless of draw order.
pub fn check_bubble_click(
    state: &EntireGameStateInfo,
    cfg: &GameConfig,
    rng: &mut impl Rng,
    x: f32,
    y: f32,
) -> EntireGameStateInfo {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let Some(index) = state.bubbles.iter().position(|b| b.is_clicked(x, y)) else {
        return state.clone();
    };

    let mut next = state.clone();
    let bubble = next.bubbles.remove(index);

    if bubble.kind == BubbleKind::Bomb {
        next.events.push(GameEvent::Pop);
        lose_life(&mut next);
    } else {
        next.score += bubble.points();
        next.combo += 1;
        next.combo_timer = cfg.combo_window;
        next.bubbles_popped += 1;

        if bubble.kind == BubbleKind::Heart {
            next.lives = (next.lives + 1).min(cfg.max_lives);
        }
        next.events.push(if bubble.kind.is_collectible() {
            GameEvent::Collect
        } else {
            GameEvent::Pop
        });
    }

    // Re-checked after every click, bombs included, once anything has popped.
    if cfg.pops_per_level > 0
        && next.bubbles_popped > 0
        && next.bubbles_popped % cfg.pops_per_level == 0
    {
        next.level += 1;
        next.spawn_interval = cfg.spawn_interval_for(next.level);
        log::info!(
            "level {} reached, spawning every {} frames",
            next.level,
            next.spawn_interval
        );
    }

    for _ in 0..cfg.particles_per_pop {
        next.particles
            .push(spawn_particle(bubble.x, bubble.y, bubble.color, rng));
    }

    next
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(
    state: &EntireGameStateInfo,
    cfg: &GameConfig,
    rng: &mut impl Rng,
) -> EntireGameStateInfo {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let mut next = state.clone();
    next.frame += 1;

    // ── 1. Combo decay ───────────────────────────────────────────────────────
    if next.combo_timer > 0 {
        next.combo_timer -= 1;
    } else {
        next.combo = 0;
    }

    // ── 2. Spawn clock ───────────────────────────────────────────────────────
    next.spawn_clock += 1;
    if next.spawn_clock > next.spawn_interval {
        next.spawn_clock = 0;
        next.bubbles.push(spawn_bubble(cfg, rng, None));

        if rng.gen_bool(cfg.burst_chance.clamp(0.0, 1.0)) {
            let extra = rng.gen_range(cfg.burst_min..=cfg.burst_max.max(cfg.burst_min));
            log::debug!("burst of {extra} extra bubbles at frame {}", next.frame);
            for _ in 0..extra {
                next.bubbles.push(spawn_bubble(cfg, rng, None));
            }
        }
    }

    // ── 3. Bubbles rise; escapees cost a life unless they are bombs ─────────
    let risen: Vec<Bubble> = next
        .bubbles
        .iter()
        .map(|b| advance_bubble(b, cfg.width))
        .collect();
    let mut bubbles = Vec::with_capacity(risen.len());
    for bubble in risen {
        if !bubble.is_off_screen() {
            bubbles.push(bubble);
        } else if bubble.kind != BubbleKind::Bomb {
            lose_life(&mut next);
        }
    }
    next.bubbles = bubbles;

    // ── 4. Particles ─────────────────────────────────────────────────────────
    next.particles = next
        .particles
        .iter()
        .map(advance_particle)
        .filter(|p| !p.is_dead())
        .collect();

    next
}
