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
#![allow(unused)]

//! the geospatial part of SkyPortal: display grid projection and the static background map tile

pub mod errors;
pub mod hardware;
pub mod projection;
pub mod geoapify;
pub mod tile;

pub use hardware::HardwareProfile;
pub use projection::{GeoProjector, Projection, ProjectionFrame};
pub use tile::{MapTile, MapTileBuilder, TileOrigin, compose_tile, default_tile};
pub use geoapify::StaticMapConfig;
