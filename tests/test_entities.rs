use bubble_pop::config::Rgb;
use bubble_pop::entities::*;

fn bubble(x: f32, y: f32, radius: u32, kind: BubbleKind) -> Bubble {
    Bubble {
        x,
        y,
        radius,
        speed: 2.0,
        color: Rgb(255, 100, 100),
        kind,
        pulse: 0.0,
        pulse_speed: 0.03,
        wobble: 0.0,
        wobble_speed: 0.05,
        wobble_amount: 1.0,
    }
}

#[test]
fn points_per_kind() {
    assert_eq!(BubbleKind::Normal.points(), 10);
    assert_eq!(BubbleKind::Coin.points(), 50);
    assert_eq!(BubbleKind::Heart.points(), 25);
    assert_eq!(BubbleKind::Bomb.points(), 0);
    assert_eq!(bubble(0.0, 0.0, 20, BubbleKind::Coin).points(), 50);
}

#[test]
fn only_coins_and_hearts_are_collectible() {
    assert!(BubbleKind::Coin.is_collectible());
    assert!(BubbleKind::Heart.is_collectible());
    assert!(!BubbleKind::Normal.is_collectible());
    assert!(!BubbleKind::Bomb.is_collectible());
}

#[test]
fn off_screen_only_past_top_by_full_radius() {
    assert!(!bubble(100.0, 0.0, 30, BubbleKind::Normal).is_off_screen());
    assert!(!bubble(100.0, -30.0, 30, BubbleKind::Normal).is_off_screen());
    assert!(bubble(100.0, -30.5, 30, BubbleKind::Normal).is_off_screen());
    assert!(!bubble(100.0, 630.0, 30, BubbleKind::Normal).is_off_screen());
}

#[test]
fn click_hit_test_is_a_circle() {
    let b = bubble(100.0, 200.0, 30, BubbleKind::Normal);
    assert!(b.is_clicked(100.0, 200.0));
    assert!(b.is_clicked(130.0, 200.0)); // exactly on the rim
    assert!(b.is_clicked(100.0, 170.0));
    assert!(!b.is_clicked(130.5, 200.0));
    // Inside the bounding box, outside the circle
    assert!(!b.is_clicked(125.0, 225.0));
}

#[test]
fn hit_test_ignores_pulse() {
    let mut b = bubble(100.0, 200.0, 30, BubbleKind::Normal);
    b.pulse = std::f32::consts::FRAC_PI_2; // drawn 3 units larger
    assert!((b.display_radius() - 33.0).abs() < 1e-4);
    assert!(!b.is_clicked(132.0, 200.0));
}

#[test]
fn display_radius_never_negative() {
    let mut b = bubble(0.0, 0.0, 0, BubbleKind::Normal);
    b.pulse = -std::f32::consts::FRAC_PI_2;
    assert_eq!(b.display_radius(), 0.0);
}

#[test]
fn particle_dies_at_zero_life() {
    let mut p = Particle {
        x: 0.0,
        y: 0.0,
        color: Rgb(1, 2, 3),
        size: 4.0,
        vx: 1.0,
        vy: -1.0,
        life: 1,
        gravity: 0.1,
    };
    assert!(!p.is_dead());
    p.life = 0;
    assert!(p.is_dead());
}

#[test]
fn enums_compare() {
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::NotStarted, GameStatus::GameOver);
    assert_ne!(GameEvent::Pop, GameEvent::Collect);
    assert_ne!(BubbleKind::Bomb, BubbleKind::Normal);
}
