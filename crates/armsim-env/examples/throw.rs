//! Swing the arm of the predefined throwing room, forecast the landing
//! spot, then throw and compare.
//!
//! Run with `RUST_LOG=debug cargo run -p armsim-env --example throw` to
//! see collisions and hold/release events.

use anyhow::{Context, Result};
use armsim_env::{predefined, Contact};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut env = predefined("throwing")?;

    // Wind up the shoulder for a few ticks.
    for _ in 0..10 {
        env.update_link_velocity(1, 20.0)?;
    }
    let forecast = env
        .hypothetical_landing_position()?
        .context("throw never lands")?;
    println!("forecast: ({:.3}, {:.3}, {:.3})", forecast.x, forecast.y, forecast.z);

    let ball = env.release()?;
    for (id, contact) in env.run(10.0) {
        let landed = env.ball(id).context("ball vanished")?.position();
        let what = match contact {
            Contact::Wall { axis } => format!("wall on axis {axis}"),
            Contact::Static { index } => format!("static object {index}"),
        };
        println!("landed on {what} at ({:.3}, {:.3}, {:.3})", landed.x, landed.y, landed.z);
    }

    println!("score: {}", env.score(ball, 0)?);
    Ok(())
}
