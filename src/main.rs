//! Drift Circuit headless driver
//!
//! Runs the simulation core with a scripted driver at a fixed 60 Hz frame
//! rate and logs what happens. Usage:
//!
//! ```text
//! drift-circuit [tuning.json] [seconds]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use drift_circuit::consts::HOST_DT;
    use drift_circuit::sim::{Course, SimEvent, SimState, step};
    use drift_circuit::{Telemetry, Tuning};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Drift Circuit (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };
    let seconds: f32 = match args.next().map(|s| s.parse::<f32>()) {
        Some(Ok(s)) => s,
        Some(Err(e)) => {
            log::warn!("Bad duration argument ({e}), running 30 s");
            30.0
        }
        None => 30.0,
    };

    let mut state = SimState::new(tuning, Course::default());
    let frames = (seconds / HOST_DT).ceil() as u32;

    for frame in 0..frames {
        let input = scripted_input(frame as f32 * HOST_DT);
        step(&mut state, &input, HOST_DT);

        for event in state.drain_events() {
            match event {
                SimEvent::Crashed { .. } => log::warn!("t={:.2}s {:?}", state.time, event),
                _ => log::debug!("t={:.2}s {:?}", state.time, event),
            }
        }

        if frame % 300 == 0 {
            let t = Telemetry::capture(&state);
            log::info!(
                "t={:.1}s speed={:.2} accel={:.2} score={} x{:.1}",
                state.time,
                t.speed,
                t.acceleration,
                t.score,
                t.multiplier
            );
        }
    }

    println!("{}", Telemetry::capture(&state));
    println!("Crashes: {}", state.crashes);
}

/// Full throttle with alternating slides, easing off now and then
#[cfg(not(target_arch = "wasm32"))]
fn scripted_input(t: f32) -> drift_circuit::sim::DriveInput {
    let phase = t % 8.0;
    drift_circuit::sim::DriveInput {
        throttle: phase < 6.5,
        brake: (7.0..7.5).contains(&phase),
        steer_left: (2.0..3.0).contains(&phase),
        steer_right: (4.0..5.0).contains(&phase),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless driver on the web; the host page owns the frame loop
}
