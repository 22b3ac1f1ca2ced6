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

//! ADSB.lol v2 REST source (unauthenticated). Field semantics follow the readsb json format,
//! see https://github.com/wiedehopf/readsb/blob/dev/README-json.md

use serde::Deserialize;
use skyportal_common::{datetime::EpochMillis, net::HttpGet, debug, warn};
use crate::{
    AircraftCategory, AircraftState, AircraftStateSource, PollQuery, StateSnapshot,
    errors::{check_status, Result},
    feet, feet_per_minute, knots, latitude, longitude, normalize_callsign, track,
};

pub const ADSBLOL_URL: &str = "https://api.adsb.lol/v2";

/// the API does not accept radii larger than this (nm)
pub const MAX_RADIUS_NM: u32 = 250;

#[derive(Deserialize)]
struct AdsbLolResponse {
    now: f64, // epoch millis
    #[serde(default)]
    ac: Vec<AdsbLolRecord>,
}

#[derive(Deserialize)]
struct AdsbLolRecord {
    hex: Option<String>,
    flight: Option<String>,
    r: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    track: Option<f64>,
    true_heading: Option<f64>,
    gs: Option<f64>,
    alt_baro: Option<BaroAltitude>,
    alt_geom: Option<f64>,
    baro_rate: Option<f64>,
    geom_rate: Option<f64>,
    category: Option<String>,
}

/// readsb reports either feet or the literal "ground"
#[derive(Deserialize)]
#[serde(untagged)]
enum BaroAltitude {
    Feet(f64),
    Text(String),
}

pub struct AdsbLolSource<C> where C: HttpGet {
    client: C,
    url: String,
}

impl<C> AdsbLolSource<C> where C: HttpGet {
    pub fn new (client: C)->Self {
        AdsbLolSource { client, url: ADSBLOL_URL.to_string() }
    }

    pub fn with_url (mut self, url: impl Into<String>)->Self {
        self.url = url.into();
        self
    }

    fn query_url (&self, query: &PollQuery)->String {
        format!("{}/lat/{:.6}/lon/{:.6}/dist/{}",
            self.url.trim_end_matches('/'), query.center.lat_degrees(), query.center.lon_degrees(), radius_nm( query))
    }
}

/// whole nautical miles, rounded up so that we never query less than requested
pub fn radius_nm (query: &PollQuery)->u32 {
    (query.radius_nm().ceil() as u32).clamp( 1, MAX_RADIUS_NM)
}

impl<C> AircraftStateSource for AdsbLolSource<C> where C: HttpGet {
    fn name (&self)->&'static str { "adsblol" }

    fn poll (&self, query: &PollQuery)->Result<StateSnapshot> {
        let url = self.query_url( query);
        debug!("requesting ADSB.lol states from {url}");

        let response = self.client.get( &url, &[], &[])?;
        check_status( self.name(), &response)?;

        let data: AdsbLolResponse = response.json()?;
        let aircraft: Vec<AircraftState> = data.ac.into_iter().filter_map( to_aircraft_state).collect();

        Ok( StateSnapshot::new( aircraft, EpochMillis::from_secs_f64( data.now / 1000.0)))
    }
}

fn to_aircraft_state (rec: AdsbLolRecord)->Option<AircraftState> {
    let Some(icao24) = rec.hex.map( |s| s.trim().to_ascii_lowercase()).filter( |s| !s.is_empty()) else {
        warn!("ignoring ADSB.lol record without hex id");
        return None
    };

    let (baro_altitude, on_ground) = match rec.alt_baro {
        Some(BaroAltitude::Feet(ft)) => (feet( Some(ft)), false),
        Some(BaroAltitude::Text(s)) => (None, s.eq_ignore_ascii_case("ground")),
        None => (None, false)
    };

    Some( AircraftState {
        icao24,
        callsign: normalize_callsign( rec.flight.as_deref()).or_else( || normalize_callsign( rec.r.as_deref())),
        latitude: latitude( rec.lat),
        longitude: longitude( rec.lon),
        baro_altitude,
        geo_altitude: feet( rec.alt_geom),
        track: track( rec.track.or( rec.true_heading)), // no ground track on the ground, but maybe a heading
        ground_speed: knots( rec.gs),
        vertical_rate: feet_per_minute( rec.baro_rate.or( rec.geom_rate)),
        on_ground,
        category: rec.category.as_deref().map( AircraftCategory::from_emitter_code).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record (json: &str)->AdsbLolRecord { serde_json::from_str( json).unwrap() }

    #[test]
    fn test_ground_altitude() {
        let ac = to_aircraft_state( record( r#"{"hex":"a1b2c3","alt_baro":"ground","gs":3.2}"#)).unwrap();
        assert!( ac.on_ground);
        assert_eq!( ac.baro_altitude, None);
    }

    #[test]
    fn test_fallbacks() {
        let ac = to_aircraft_state( record( r#"{"hex":"a1b2c3","r":"N12345","true_heading":45.0,"geom_rate":-640}"#)).unwrap();
        assert_eq!( ac.callsign.as_deref(), Some("N12345"));
        assert_eq!( ac.track.map(|t| t.degrees()), Some(45.0));
        assert!( ac.vertical_rate.is_some());
    }

    #[test]
    fn test_missing_hex() {
        assert!( to_aircraft_state( record( r#"{"flight":"DAL1"}"#)).is_none());
    }

    #[test]
    fn test_radius_rounding() {
        assert_eq!( radius_nm( &PollQuery::from_degrees_and_miles( 42.0, -71.0, 9.375)), 9); // 8.147 nm
        assert_eq!( radius_nm( &PollQuery::from_degrees_and_miles( 42.0, -71.0, 0.01)), 1);
        assert_eq!( radius_nm( &PollQuery::from_degrees_and_miles( 42.0, -71.0, 1000.0)), MAX_RADIUS_NM);
    }
}
