//! Knife Arena entry point
//!
//! Native: runs a headless match until one ball is left and logs the kill feed.
//! Web: the host page drives the simulation through `knife_arena::wasm`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use knife_arena::consts::TICK_RATE_HZ;
    use knife_arena::{BallConfig, ImageHandle, SimSettings, Simulation};

    /// Stop after this many simulated seconds even if nobody has won
    const MAX_SECONDS: u64 = 600;
    const DEFAULT_BALLS: usize = 6;
    const MAX_START_SPEED: f32 = 4.0;

    pub fn run() -> Result<(), knife_arena::SettingsError> {
        let mut args = std::env::args().skip(1);
        let settings = match args.next() {
            Some(path) => SimSettings::load(path)?,
            None => SimSettings::default(),
        };
        let ball_count = args
            .next()
            .and_then(|n| n.parse().ok())
            .unwrap_or(DEFAULT_BALLS);

        let mut sim = Simulation::new(settings);
        // Headless: any handle will do, it only has to exist
        sim.set_knife_image(Some(ImageHandle(1)));
        sim.set_heart_image(Some(ImageHandle(2)));
        sim.set_kill_observer(|notice| {
            log::info!(
                "{} took out {}, {} balls left",
                notice.killer_color,
                notice.victim_color,
                notice.remaining
            );
        });

        let mut rng = Pcg32::seed_from_u64(sim.seed() ^ 0x9E37_79B9_7F4A_7C15);
        for _ in 0..ball_count {
            let config = BallConfig::default().with_velocity(
                rng.random_range(-MAX_START_SPEED..MAX_START_SPEED),
                rng.random_range(-MAX_START_SPEED..MAX_START_SPEED),
            );
            sim.add_ball(config);
        }

        log::info!("Seed {}: {} balls in the arena", sim.seed(), sim.ball_count());
        sim.start();

        let max_ticks = MAX_SECONDS * TICK_RATE_HZ as u64;
        while sim.ball_count() > 1 && sim.time_ticks() < max_ticks {
            sim.frame();
        }
        sim.stop();

        let secs = sim.time_ticks() as f32 / TICK_RATE_HZ as f32;
        match sim.balls() {
            [winner] => log::info!("{} wins after {:.1}s", winner.color, secs),
            balls => log::info!("No winner after {:.1}s ({} balls left)", secs, balls.len()),
        }
        for (killer, kills) in sim.kill_feed().leaderboard() {
            log::info!("ball {}: {} kills", killer, kills);
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Knife Arena (headless) starting...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web entry point is wasm::wasm_main
}
