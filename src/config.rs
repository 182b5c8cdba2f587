//! Game configuration — every tunable number lives here.
//!
//! A `GameConfig` is built once and handed by reference to the simulation,
//! so tests can inject small playfields without touching globals.

/// A plain RGB colour triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const RED: Rgb = Rgb(255, 100, 100);
pub const GREEN: Rgb = Rgb(100, 255, 150);
pub const BLUE: Rgb = Rgb(100, 200, 255);
pub const YELLOW: Rgb = Rgb(255, 255, 100);
pub const PURPLE: Rgb = Rgb(200, 100, 255);
pub const ORANGE: Rgb = Rgb(255, 180, 50);
pub const PINK: Rgb = Rgb(255, 150, 200);

pub const BOMB_GREY: Rgb = Rgb(100, 100, 100);
pub const COIN_GOLD: Rgb = Rgb(255, 215, 0);
pub const HEART_RED: Rgb = Rgb(255, 100, 150);

/// Palette normal bubbles draw their colour from.
pub const PALETTE: [Rgb; 7] = [RED, GREEN, BLUE, YELLOW, PURPLE, ORANGE, PINK];

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Playfield width in world units.
    pub width: f32,
    /// Playfield height in world units.
    pub height: f32,
    pub palette: Vec<Rgb>,

    // ── Bubble type table (cumulative, one uniform roll) ─────────────────────
    pub bomb_threshold: f64,
    pub coin_threshold: f64,
    pub heart_threshold: f64,

    // ── Lives / scoring ──────────────────────────────────────────────────────
    pub starting_lives: u32,
    pub max_lives: u32,
    /// Frames a combo survives without another pop.
    pub combo_window: u32,
    /// Non-bomb pops needed per level.
    pub pops_per_level: u32,

    // ── Spawning ─────────────────────────────────────────────────────────────
    pub base_spawn_interval: u32,
    pub spawn_interval_step: u32,
    pub min_spawn_interval: u32,
    pub burst_chance: f64,
    pub burst_min: u32,
    pub burst_max: u32,

    pub particles_per_pop: usize,
    pub target_fps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            palette: PALETTE.to_vec(),
            bomb_threshold: 0.05,
            coin_threshold: 0.10,
            heart_threshold: 0.12,
            starting_lives: 3,
            max_lives: 5,
            combo_window: 60,
            pops_per_level: 20,
            base_spawn_interval: 60,
            spawn_interval_step: 3,
            min_spawn_interval: 20,
            burst_chance: 0.1,
            burst_min: 2,
            burst_max: 4,
            particles_per_pop: 15,
            target_fps: 60,
        }
    }
}

impl GameConfig {
    /// Default tuning on a playfield of the given size.
    pub fn with_size(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Frames between spawns at `level`, never below the floor.
    pub fn spawn_interval_for(&self, level: u32) -> u32 {
        self.base_spawn_interval
            .saturating_sub(level.saturating_mul(self.spawn_interval_step))
            .max(self.min_spawn_interval)
    }
}

// ── Runtime settings ─────────────────────────────────────────────────────────

/// Settings read from the environment at start-up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSettings {
    /// Fixed RNG seed (`BUBBLE_POP_SEED`) for reproducible runs.
    pub seed: Option<u64>,
    /// Disable the terminal bell (`BUBBLE_POP_MUTE`).
    pub mute: bool,
}

impl RunSettings {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("BUBBLE_POP_SEED").ok().as_deref(),
            std::env::var_os("BUBBLE_POP_MUTE").is_some(),
        )
    }

    /// Parse raw values; a malformed seed is reported and ignored.
    pub fn from_vars(seed: Option<&str>, mute: bool) -> Self {
        let seed = seed.and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(e) => {
                log::warn!("ignoring BUBBLE_POP_SEED={raw:?}: {e}");
                None
            }
        });
        Self { seed, mute }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_interval_follows_level_and_floors() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.spawn_interval_for(1), 57);
        assert_eq!(cfg.spawn_interval_for(2), 54);
        assert_eq!(cfg.spawn_interval_for(13), 21);
        assert_eq!(cfg.spawn_interval_for(14), 20);
        assert_eq!(cfg.spawn_interval_for(100), 20);
        assert_eq!(cfg.spawn_interval_for(u32::MAX), 20);
    }

    #[test]
    fn run_settings_parse() {
        assert_eq!(RunSettings::from_vars(Some("42"), false).seed, Some(42));
        assert_eq!(RunSettings::from_vars(Some(" 7 "), true).seed, Some(7));
        assert_eq!(RunSettings::from_vars(Some("abc"), false).seed, None);
        assert!(RunSettings::from_vars(None, true).mute);
    }
}
