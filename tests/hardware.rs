//! Singer tests against a connected NSX-39.
//!
//! All tests are `#[ignore]` so CI doesn't fail without the device.
//!
//! Run with:
//!   cargo test -p uta --test hardware -- --ignored --test-threads=1

#![cfg(feature = "midi-io")]

use std::time::Duration;
use uta::prelude::*;

#[test]
#[ignore]
fn test_sing_phrase() {
    let mut singer = Singer::builder().build().expect("NSX-39 not connected");

    let report = singer
        .sing_text(
            "さくら さくら",
            &[69, 69, 71, 69, 69, 71],
            &[80; 6],
            &[0.5, 0.5, 1.0, 0.5, 0.5, 1.0],
        )
        .unwrap();

    assert_eq!(report.timings.len(), 6);
    assert!(report.max_lateness() < Duration::from_millis(10));
}

#[test]
#[ignore]
fn test_cancel_releases_on_device() {
    let token = CancelToken::new();
    let mut singer = Singer::builder()
        .cancel_token(token.clone())
        .build()
        .expect("NSX-39 not connected");

    let canceller = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(700));
        token.cancel();
    });

    let err = singer
        .sing_text("あいうえお", &[60, 62, 64, 65, 67], &[80; 5], &[0.5; 5])
        .unwrap_err();
    canceller.join().unwrap();

    assert_eq!(err, Error::Sequencer(uta::sequencer::Error::Cancelled));
    assert!(singer.session().is_connected());
}
