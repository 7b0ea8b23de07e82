// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! NTP wire types, byte-order normalization, and response validation.
//!
//! This crate provides the fixed 48-byte NTP header (RFC 5905) as an in-memory
//! record whose multi-byte fields are held in host byte order, together with the
//! codec that converts it to and from network byte order exactly once at each
//! boundary.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Error types for buffer-based parsing and response validation.
pub mod error;

/// NTP protocol types and constants (RFC 5905).
pub mod protocol;

/// Unix time conversion utilities for NTP timestamps.
pub mod unix_time;
