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

//! source for a user operated intermediary that pre-filters and compacts provider data.
//! Records already use our field names and SI units

use serde::Deserialize;
use skyportal_common::{datetime::EpochMillis, net::HttpGet, debug, warn};
use crate::{
    AircraftCategory, AircraftState, AircraftStateSource, PollQuery, StateSnapshot,
    errors::{check_status, Result},
    latitude, longitude, meters, meters_per_second, normalize_callsign, track,
};

#[derive(Deserialize)]
struct ProxyResponse {
    #[serde(alias="aircraft")]
    ac: Vec<ProxyRecord>,
    api_time: f64,
}

#[derive(Deserialize)]
struct ProxyRecord {
    #[serde(alias="icao24")]
    icao: String,
    callsign: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    track: Option<f64>,
    velocity_mps: Option<f64>,
    #[serde(default)]
    on_ground: Option<bool>,
    baro_altitude_m: Option<f64>,
    geo_altitude_m: Option<f64>,
    vertical_rate_mps: Option<f64>,
    aircraft_category: Option<CategoryValue>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryValue {
    Number(i64),
    Code(String),
}

impl From<CategoryValue> for AircraftCategory {
    fn from (v: CategoryValue)->Self {
        match v {
            CategoryValue::Number(n) => AircraftCategory::from_number(n),
            CategoryValue::Code(s) => AircraftCategory::from_emitter_code(&s),
        }
    }
}

pub struct ProxySource<C> where C: HttpGet {
    client: C,
    url: String,
    api_key: String,
}

impl<C> ProxySource<C> where C: HttpGet {
    pub fn new (client: C, url: impl Into<String>, api_key: impl Into<String>)->Self {
        ProxySource { client, url: url.into(), api_key: api_key.into() }
    }
}

impl<C> AircraftStateSource for ProxySource<C> where C: HttpGet {
    fn name (&self)->&'static str { "proxy" }

    fn poll (&self, query: &PollQuery)->Result<StateSnapshot> {
        let params = [
            ("lat", format!("{:.6}", query.center.lat_degrees())),
            ("lon", format!("{:.6}", query.center.lon_degrees())),
            ("radius", format!("{:.3}", query.radius_mi())),
        ];
        debug!("requesting proxy states from {} with {:?}", self.url, params);

        let response = self.client.get( &self.url, &[("x-api-key", self.api_key.as_str())], &params)?;
        check_status( self.name(), &response)?;

        let data: ProxyResponse = response.json()?;
        let aircraft = data.ac.into_iter().filter_map( to_aircraft_state).collect();

        Ok( StateSnapshot::new( aircraft, EpochMillis::from_secs_f64( data.api_time)))
    }
}

fn to_aircraft_state (rec: ProxyRecord)->Option<AircraftState> {
    let icao24 = rec.icao.trim().to_ascii_lowercase();
    if icao24.is_empty() {
        warn!("ignoring proxy record without icao id");
        return None
    }

    Some( AircraftState {
        icao24,
        callsign: normalize_callsign( rec.callsign.as_deref()),
        latitude: latitude( rec.lat),
        longitude: longitude( rec.lon),
        baro_altitude: meters( rec.baro_altitude_m),
        geo_altitude: meters( rec.geo_altitude_m),
        track: track( rec.track),
        ground_speed: meters_per_second( rec.velocity_mps),
        vertical_rate: meters_per_second( rec.vertical_rate_mps),
        on_ground: rec.on_ground.unwrap_or(false),
        category: rec.aircraft_category.map( AircraftCategory::from).unwrap_or_default(),
    })
}
