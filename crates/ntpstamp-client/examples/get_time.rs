// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Example: fetch the time from a few public NTP servers.
//!
//! The last host cannot be resolved and shows the error path.
//!
//! Run with: `RUST_LOG=debug cargo run --example get_time`

use chrono::{TimeZone, Utc};
use ntpstamp_client::unix_time::Instant;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let hosts = [
        "time.google.com",
        "time.facebook.com",
        "time.apple.com",
        "invalid.host.example",
    ];

    for host in hosts {
        print!("{host}: ");
        match ntpstamp_client::get_ntp_timestamp(host) {
            Ok(ts) => {
                let unix = Instant::from(ts);
                match Utc.timestamp_opt(unix.secs(), unix.subsec_nanos() as u32) {
                    chrono::LocalResult::Single(utc) => println!(
                        "{} (NTP {}.{:010})",
                        utc.format("%Y-%m-%d %H:%M:%S%.6f UTC"),
                        ts.seconds,
                        ts.fraction
                    ),
                    _ => println!("NTP {}.{:010} (outside chrono range)", ts.seconds, ts.fraction),
                }
            }
            Err(e) => println!("error {} ({e})", e.kind().code()),
        }
    }
}
