/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused,uncommon_codepoints)]

//! common foundation for the SkyPortal crates: angles and geo types, time and fs helpers,
//! logging/error macros, the blocking HTTP seam and RON config loading

pub mod macros;
pub mod collections;
pub mod datetime;
pub mod angle;
pub mod geo_constants;
pub mod geo;
pub mod fs;
pub mod net;
pub mod config;

/// install the global tracing subscriber (RUST_LOG controls the max level, default is "info").
/// Only binaries should call this. Returns false if there already was a global subscriber
pub fn init_tracing ()->bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter( filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
