// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: small pointer-gesture state machines.
//!
//! Each module tracks the state of one kind of gesture between pointer events and
//! reports what the host should do with it. None of them dispatch events or know
//! about widgets; hosts call them from their own input handlers.
//!
//! - [`wheel`]: rotary input over a ring-shaped touch area, mapped to a single
//!   scroll delta. See [`wheel::WheelGesture`].
//!
//! This crate is `no_std`.

#![no_std]

pub mod wheel;
