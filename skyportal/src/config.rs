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

//! the device configuration. This is constructed once at startup and passed down explicitly

use std::{path::PathBuf, time::Duration};
use serde::{Serialize,Deserialize};
use chrono::FixedOffset;
use uom::si::{f64::Length, length::mile};
use skyportal_common::{
    config::{env_expand, load_config},
    datetime::{de_duration_from_fractional_secs, parse_utc_offset, ser_duration_as_fractional_secs},
    geo::GeoPoint,
    warn,
};
use skyportal_adsb::{FilterConfig, SourceConfig};
use skyportal_map::{HardwareProfile, ProjectionFrame, StaticMapConfig};
use crate::{errors::{config_error, Result}, hittest::DEFAULT_TOUCH_THRESHOLD_PX};

pub const CONFIG_FILE: &str = "skyportal.ron";

fn default_refresh_interval()->Duration { Duration::from_secs(30) }
fn default_http_timeout()->Duration { Duration::from_secs(20) }
fn default_touch_threshold()->f64 { DEFAULT_TOUCH_THRESHOLD_PX }
fn default_screenshot_dir()->PathBuf { PathBuf::from("screenshots") }
fn default_max_retained()->usize { 5 }

#[derive(Serialize,Deserialize,Debug,Clone)]
pub struct SkyPortalConfig {
    pub hardware: HardwareProfile,
    pub map: MapConfig,
    pub source: SourceConfig,

    #[serde(default="default_refresh_interval",
            deserialize_with="de_duration_from_fractional_secs", serialize_with="ser_duration_as_fractional_secs")]
    pub refresh_interval: Duration,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default="default_touch_threshold")]
    pub touch_threshold_px: f64,

    #[serde(default)]
    pub screenshots: ScreenshotConfig,

    /// "±HHMM" offset for the local time status label
    #[serde(default)]
    pub utc_offset: Option<String>,

    #[serde(default="default_http_timeout",
            deserialize_with="de_duration_from_fractional_secs", serialize_with="ser_duration_as_fractional_secs")]
    pub http_timeout: Duration,
}

#[derive(Serialize,Deserialize,Debug,Clone)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lon: f64,

    /// east-west extent of the background map
    pub grid_width_mi: f64,

    #[serde(default)]
    pub use_default_map: bool,

    #[serde(default)]
    pub provider: StaticMapConfig,
}

#[derive(Serialize,Deserialize,Debug,Clone)]
pub struct ScreenshotConfig {
    #[serde(default="default_screenshot_dir")]
    pub dir: PathBuf,

    #[serde(default="default_max_retained")]
    pub max_retained: usize,

    /// show the screenshot touch area
    #[serde(default)]
    pub button: bool,
}

impl Default for ScreenshotConfig {
    fn default()->Self {
        ScreenshotConfig { dir: default_screenshot_dir(), max_retained: default_max_retained(), button: false }
    }
}

impl SkyPortalConfig {
    /// load from the standard config locations and validate
    pub fn load ()->Result<Self> {
        Self::load_file( CONFIG_FILE)
    }

    pub fn load_file (filename: &str)->Result<Self> {
        let mut config: SkyPortalConfig = load_config( filename)?;
        config.expand_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_ron_str (s: &str)->Result<Self> {
        let mut config: SkyPortalConfig = ron::from_str( s)?;
        config.expand_env();
        config.validate()?;
        Ok(config)
    }

    /// secrets, urls and paths can refer to environment variables as `${VAR}`
    pub fn expand_env (&mut self) {
        let expand = |s: &mut String| *s = env_expand( s);

        if let Some(key) = self.map.provider.api_key.as_mut() { expand( key) }
        match &mut self.source {
            SourceConfig::OpenSky { username, password, base_url } => {
                expand( username);
                expand( password);
                if let Some(url) = base_url.as_mut() { expand( url) }
            }
            SourceConfig::AdsbLol { base_url } => {
                if let Some(url) = base_url.as_mut() { expand( url) }
            }
            SourceConfig::Proxy { url, api_key } => {
                expand( url);
                expand( api_key);
            }
        }
        self.screenshots.dir = PathBuf::from( env_expand( &self.screenshots.dir.to_string_lossy()));
    }

    pub fn validate (&self)->Result<()> {
        let m = &self.map;
        if !(m.center_lat >= -90.0 && m.center_lat <= 90.0) {
            return Err( config_error!("map center latitude out of range: {}", m.center_lat))
        }
        if !(m.center_lon >= -180.0 && m.center_lon <= 180.0) {
            return Err( config_error!("map center longitude out of range: {}", m.center_lon))
        }
        if !(m.grid_width_mi > 0.0 && m.grid_width_mi.is_finite()) {
            return Err( config_error!("grid width has to be positive: {}", m.grid_width_mi))
        }
        if self.screenshots.max_retained < 1 {
            return Err( config_error!("at least one screenshot has to be retained"))
        }
        if !(self.touch_threshold_px >= 0.0) {
            return Err( config_error!("negative touch threshold: {}", self.touch_threshold_px))
        }
        if self.refresh_interval.is_zero() {
            return Err( config_error!("refresh interval has to be positive"))
        }
        Ok(())
    }

    pub fn map_center (&self)->GeoPoint {
        GeoPoint::from_lon_lat_degrees( self.map.center_lon, self.map.center_lat)
    }

    pub fn projection_frame (&self)->Result<ProjectionFrame> {
        Ok( ProjectionFrame::for_profile( self.map_center(), Length::new::<mile>( self.map.grid_width_mi), self.hardware)?)
    }

    /// parsed UTC offset. Unparseable values fall back to UTC
    pub fn utc_offset (&self)->Option<FixedOffset> {
        let s = self.utc_offset.as_deref()?;
        let offset = parse_utc_offset( s);
        if offset.is_none() {
            warn!("ignoring invalid UTC offset {s:?}, using UTC");
        }
        offset
    }
}
