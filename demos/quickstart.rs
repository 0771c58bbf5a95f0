// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Drive a sky engine through one accelerated day and print what a renderer
//! would upload each tick.
//!
//! Run with `RUST_LOG=skydome=debug cargo run --example quickstart`.

use qtty::{Degree, Seconds};
use skydome::{Body, DayCycle, EphemerisKind, SkyConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let kind: EphemerisKind = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("standard")
        .parse()?;
    let mut sky = SkyConfig::new(47.37, 8.54).with_ephemeris(kind).build();

    // One simulated day per 24 real seconds, starting at midnight.
    let mut clock = DayCycle::new(2024, 3, 20, 0.0, 24.0)?.with_utc_offset(1.0);
    clock.start();

    println!("ephemeris: {}  observer: {}", kind, sky.location());
    println!("{:>19}  {:>8}  {:>8}  {:>8}  {:>8}  {:>7}", "local", "sun alt", "sun az", "moon alt", "moon ⌀", "earth");
    for _ in 0..24 {
        sky.update(clock.time());
        let sun = sky.sun_horizon_direction();
        let moon = sky.moon_horizon_direction();
        let m = clock.moment();
        println!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02.0}  {:>8.2}  {:>8.2}  {:>8.2}  {:>8.4}  {:>7.3}",
            m.year,
            m.month,
            m.day,
            m.hour,
            m.minute,
            m.second,
            sun.altitude().to_degrees(),
            sun.azimuth().to_degrees(),
            moon.altitude().to_degrees(),
            2.0 * sky.angular_radius(Body::Moon).to::<Degree>().value(),
            sky.earthshine_intensity(),
        );
        clock.advance(Seconds::new(1.0));
    }

    let stars = sky.equatorial_to_horizon_matrix();
    println!("\nequatorial → horizon at LST {:.3}°:\n{}", sky.local_sidereal_time().value(), stars.matrix());
    Ok(())
}
