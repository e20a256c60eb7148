// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for sheet construction.

use core::fmt;

/// Errors reported when a sheet is configured with an unusable position set.
///
/// Everything downstream of construction clamps instead of failing, so this is
/// the only error the crate produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetError {
    /// The switchable position set was empty.
    NoSwitchablePositions,
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSwitchablePositions => {
                write!(f, "a sheet needs at least one switchable position")
            }
        }
    }
}

impl core::error::Error for SheetError {}
