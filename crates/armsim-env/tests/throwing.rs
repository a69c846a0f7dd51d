//! Throwing scenarios across the whole stack.
//!
//! Run with: cargo test -p armsim-env --test throwing

use armsim_env::{Contact, Environment};
use proptest::prelude::*;

/// A 20 m cube with a 1 m deep floor slab and the arm in the middle
/// holding one ball.
///
/// The landing forecast samples at exactly the tick length, so it follows
/// the same steps as a real throw.
const ROOM: &str = r#"
    [physics]
    dimensions = [20.0, 20.0, 20.0]
    dt = 0.01
    landing_horizon = 15.0
    landing_resolution = 1500

    [[scene.obstacles]]
    min = [0.0, 0.0, 0.0]
    max = [20.0, 20.0, 1.0]

    [[scene.balls]]
    position = [0.0, 0.0, 0.0]
    radius = 0.3
    held = true

    [scene.robot]
    kind = "simple_human"
    upper = 2.0
    fore = 2.0
    q0 = [0.0, 0.0, 0.0, 0.5, 0.0]
    base = [10.0, 10.0, 2.0]
"#;

#[test]
fn dropped_ball_lands_below_hand() {
    let mut env = Environment::from_toml_str(ROOM).unwrap();
    let tip = env.robot().unwrap().pose().position();
    let id = env.release().unwrap();

    let landed = env.run(5.0);
    assert_eq!(landed, vec![(id, Contact::Static { index: 0 })]);
    let ball = env.ball(id).unwrap();
    // rests on the slab, not at its own centre
    assert!(ball.position().z - 0.3 <= 1.0);
    assert!(ball.position().z > 1.0);
    assert_eq!(ball.position().x, tip.x);
    assert_eq!(ball.position().y, tip.y);
    assert!(ball.trajectory().len() > 2);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// The forecast is exactly where a real throw ends up.
    #[test]
    fn forecast_matches_throw(
        shoulder in -100.0..100.0f64,
        elbow in -100.0..100.0f64,
        ticks in 1usize..10,
    ) {
        let mut env = Environment::from_toml_str(ROOM).unwrap();
        for _ in 0..ticks {
            env.update_link_velocity(1, shoulder).unwrap();
            env.update_link_velocity(3, elbow).unwrap();
        }
        let forecast = env.hypothetical_landing_position().unwrap();
        prop_assert!(forecast.is_some());

        let id = env.release().unwrap();
        let landed = env.run(15.0);
        prop_assert_eq!(landed.len(), 1);
        prop_assert_eq!(landed[0].0, id);
        prop_assert_eq!(forecast, Some(env.ball(id).unwrap().position()));
    }
}
