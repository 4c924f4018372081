// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! Wire framing and message dispatch.

pub mod codec;
pub mod protocol;
