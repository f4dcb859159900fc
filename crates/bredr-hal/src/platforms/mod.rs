// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Platform implementations of the HAL traits

#[cfg(feature = "recording")]
pub mod recording;

#[cfg(feature = "recording")]
pub use recording::{CoordinatorEvent, RadioRequest, RecordingCoordinator, RecordingRadio, RecordingRadioError};
