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

//! Geoapify static map requests, see https://apidocs.geoapify.com/docs/maps/static/

use std::fmt;
use serde::{Serialize,Deserialize};
use skyportal_common::{net::HttpGet, debug};
use crate::{errors::{fetch_error, Result}, projection::ProjectionFrame};

pub const GEOAPIFY_URL: &str = "https://maps.geoapify.com/v1/staticmap";
pub const DEFAULT_STYLE: &str = "klokantech-basic";

/// we request a larger image than we display so that labels get smaller when scaling down
pub const DEFAULT_OVERSAMPLING: u32 = 2;

fn default_url()->String { GEOAPIFY_URL.to_string() }
fn default_style()->String { DEFAULT_STYLE.to_string() }
fn default_oversampling()->u32 { DEFAULT_OVERSAMPLING }

#[derive(Serialize,Deserialize,Clone,PartialEq)]
pub struct StaticMapConfig {
    #[serde(default="default_url")]
    pub url: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default="default_style")]
    pub style: String,

    #[serde(default="default_oversampling")]
    pub oversampling: u32,
}

impl StaticMapConfig {
    pub fn with_api_key (api_key: impl Into<String>)->Self {
        StaticMapConfig { api_key: Some(api_key.into()), ..Self::default() }
    }
}

impl Default for StaticMapConfig {
    fn default()->Self {
        StaticMapConfig { url: default_url(), api_key: None, style: default_style(), oversampling: default_oversampling() }
    }
}

// no api key in logs
impl fmt::Debug for StaticMapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticMapConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("style", &self.style)
            .field("oversampling", &self.oversampling)
            .finish()
    }
}

/// query parameters for the static map that covers exactly the frame bounds
pub fn static_map_params (config: &StaticMapConfig, frame: &ProjectionFrame)->Result<Vec<(&'static str,String)>> {
    let api_key = config.api_key.as_deref()
        .map( str::trim)
        .filter( |k| !k.is_empty())
        .ok_or_else( || fetch_error!("no static map api key configured"))?;

    let bbox = frame.bounds();
    let center = frame.center();
    let scale = config.oversampling.max(1);

    Ok( vec![
        ("apiKey", api_key.to_string()),
        ("style", config.style.clone()),
        ("format", "png".to_string()),
        ("center", format!("lonlat:{:.6},{:.6}", center.lon_degrees(), center.lat_degrees())),
        ("area", format!("rect:{:.6},{:.6},{:.6},{:.6}", bbox.west(), bbox.south(), bbox.east(), bbox.north())),
        ("width", (frame.width_px() * scale).to_string()),
        ("height", (frame.height_px() * scale).to_string()),
    ])
}

/// blocking fetch of the encoded (PNG) static map for `frame`
pub fn fetch_static_map<C> (client: &C, config: &StaticMapConfig, frame: &ProjectionFrame)->Result<Vec<u8>> where C: HttpGet {
    let params = static_map_params( config, frame)?;
    debug!("requesting static map for {frame}");

    let response = client.get( &config.url, &[], &params)?;
    if !response.is_success() {
        return Err( fetch_error!("map provider returned {}: {}", response.status, response.body_excerpt(80)))
    }
    if response.body.is_empty() {
        return Err( fetch_error!("map provider returned empty body"))
    }

    Ok( response.body.to_vec())
}
