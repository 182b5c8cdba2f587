//! Audio layer — the terminal bell is the only speaker we have.

use std::io::Write;

use bubble_pop::entities::GameEvent;

const BEL: &str = "\x07";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    /// One bell for a pop, two for a collect.
    Bell,
    Muted,
}

impl Sound {
    pub fn new(mute: bool) -> Self {
        if mute {
            Sound::Muted
        } else {
            Sound::Bell
        }
    }

    pub fn play<W: Write>(&self, out: &mut W, event: GameEvent) -> std::io::Result<()> {
        if *self == Sound::Muted {
            return Ok(());
        }
        let rings = match event {
            GameEvent::Pop => 1,
            GameEvent::Collect => 2,
        };
        out.write_all(BEL.repeat(rings).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_rings_per_cue() {
        let mut buf = Vec::new();
        Sound::Bell.play(&mut buf, GameEvent::Pop).unwrap();
        Sound::Bell.play(&mut buf, GameEvent::Collect).unwrap();
        assert_eq!(buf, b"\x07\x07\x07");
    }

    #[test]
    fn muted_is_silent() {
        let mut buf = Vec::new();
        Sound::new(true).play(&mut buf, GameEvent::Collect).unwrap();
        assert!(buf.is_empty());
    }
}
