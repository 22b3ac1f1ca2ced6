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

use std::{fmt, str::FromStr};
use serde::{Serialize,Deserialize};
use crate::errors::MapError;

/// the supported display boards
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum HardwareProfile {
    /// Adafruit PyPortal, 3.2" 320x240
    PyPortal,
    /// Adafruit Feather with 3.5" TFT FeatherWing, 480x320
    Feather,
}

impl HardwareProfile {
    pub const ALL: [HardwareProfile;2] = [HardwareProfile::PyPortal, HardwareProfile::Feather];

    pub fn width (&self)->u32 {
        match self { HardwareProfile::PyPortal => 320, HardwareProfile::Feather => 480 }
    }

    pub fn height (&self)->u32 {
        match self { HardwareProfile::PyPortal => 240, HardwareProfile::Feather => 320 }
    }

    pub fn dimensions (&self)->(u32,u32) { (self.width(), self.height()) }

    pub fn name (&self)->&'static str {
        match self { HardwareProfile::PyPortal => "pyportal", HardwareProfile::Feather => "feather" }
    }

    /// the bundled background tile for this profile
    pub fn default_map_png (&self)->&'static [u8] {
        match self {
            HardwareProfile::PyPortal => include_bytes!("../assets/default_map_pyportal.png"),
            HardwareProfile::Feather => include_bytes!("../assets/default_map_feather.png"),
        }
    }
}

impl fmt::Display for HardwareProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str( self.name()) }
}

impl FromStr for HardwareProfile {
    type Err = MapError;

    fn from_str (s: &str)->Result<Self,Self::Err> {
        HardwareProfile::ALL.iter()
            .find( |p| p.name().eq_ignore_ascii_case( s.trim()))
            .copied()
            .ok_or_else( || MapError::UnsupportedProfile( s.to_string()))
    }
}
