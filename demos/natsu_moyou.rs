//! # Natsu Moyou
//!
//! Sing two verses of "夏模様" on a connected NSX-39.
//!
//! **Concepts:** Composing a performance, hardware output, release discipline
//!
//! ```bash
//! cargo run --example natsu_moyou
//! # print the traffic without a device:
//! cargo run --example natsu_moyou -- --dry-run
//! RUST_LOG=uta=debug cargo run --example natsu_moyou
//! ```

use tracing_subscriber::EnvFilter;
use uta::prelude::*;
use uta::MidiOutputManager;

const LYRICS: &str = "なつがすぎ かぜあざみ だれのあこがれに さまよう \
                      あおぞらに のこされた わたしのこころは なつもよう";

const PHRASE_A: [i32; 10] = [64, 64, 64, 62, 67, 64, 65, 64, 62, 60];
const PHRASE_B: [i32; 12] = [57, 59, 60, 60, 55, 55, 60, 60, 60, 59, 60, 62];
const PHRASE_C: [i32; 13] = [57, 59, 60, 62, 64, 62, 60, 55, 57, 62, 59, 59, 60];

const HOLDS_A: [f64; 10] = [0.8, 0.4, 0.4, 0.8, 0.8, 0.4, 0.4, 0.4, 0.2, 1.25];
const HOLDS_B: [f64; 12] = [0.6, 0.4, 0.2, 0.4, 0.4, 0.4, 0.4, 0.6, 0.4, 0.4, 0.4, 1.2];
const HOLDS_C: [f64; 13] = [
    0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.8,
];

fn score() -> (Vec<i32>, Vec<f64>) {
    let pitches = [&PHRASE_A[..], &PHRASE_B, &PHRASE_A, &PHRASE_C].concat();
    let holds = [&HOLDS_A[..], &HOLDS_B, &HOLDS_A, &HOLDS_C].concat();
    (pitches, holds)
}

fn main() -> uta::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("uta=info".parse().unwrap()))
        .init();

    let (pitches, holds) = score();

    if std::env::args().any(|a| a == "--dry-run") {
        let capture = CaptureSession::new(0);
        let mut singer = Singer::builder()
            .build_with_timer(capture.clone(), VirtualTimer::new())?;
        let performance = singer.compose_uniform(LYRICS, &pitches, &holds)?;
        singer.sing(&performance)?;

        for captured in capture.messages() {
            println!("{:02X?}", captured.message.bytes);
        }
        return Ok(());
    }

    println!("MIDI output devices:");
    for dev in MidiOutputManager::list_devices() {
        println!("  [{}] {}", dev.index, dev.name);
    }

    let mut singer = Singer::builder().build()?;
    let performance = singer.compose_uniform(LYRICS, &pitches, &holds)?;
    println!(
        "\nSinging {} notes over {:.1}s",
        performance.melody().len(),
        performance.melody().total_duration().as_secs_f64()
    );

    let report = singer.sing(&performance)?;
    println!(
        "Done in {:.2}s (worst note-on lateness {:?})",
        report.elapsed().as_secs_f64(),
        report.max_lateness()
    );

    Ok(())
}
