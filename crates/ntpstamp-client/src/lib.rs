// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

/*!
Minimal blocking NTP client: one request, one reply, one timestamp.

The client sends a single NTP client-mode request over UDP/IPv4, waits up to
five seconds for the reply, checks that it is a trustworthy server response,
and returns the server's transmit timestamp in NTP format (seconds and
fraction since 1900). Converting it to another representation is left to the
caller.

# Example

```rust,no_run
use chrono::TimeZone;

let ts = ntpstamp_client::get_ntp_timestamp("time.google.com")?;
let unix = ntpstamp_client::unix_time::Instant::from(ts);
let utc = chrono::Utc
    .timestamp_opt(unix.secs(), unix.subsec_nanos() as _)
    .unwrap();
println!("{utc}");
# Ok::<(), Box<dyn std::error::Error>>(())
```

Environment access goes through the [`net`] traits, so a query can be run
against any [`net::Network`] with [`get_ntp_timestamp_with`].
*/

#![warn(missing_docs)]

// Re-export protocol types from ntpstamp_proto for convenience.
pub use ntpstamp_proto::{protocol, unix_time};

/// Error taxonomy and stable error codes.
pub mod error;

/// Network capability traits and the system implementation.
pub mod net;

mod config;
mod exchange;
mod request;
mod timestamp;

pub use config::{DEFAULT_TIMEOUT, MAX_HOSTNAME_LEN, NTP_PORT, RequestConfig};
pub use error::{ErrorKind, NtpError};
pub use exchange::exchange;
pub use request::{get_ntp_timestamp, get_ntp_timestamp_with, validate_hostname};
pub use timestamp::NtpTimestamp;
