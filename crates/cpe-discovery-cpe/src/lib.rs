// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! CPE 2.3 deconstruction and syntactic validation (§4.C, §4.D).

mod deconstruct;
mod error;
mod validate;

pub use deconstruct::{DeconstructedCpe, deconstruct};
pub use error::{Error, Result};
pub use validate::{SyntaxCheck, check_syntax};
