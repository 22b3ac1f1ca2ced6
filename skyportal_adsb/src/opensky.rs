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

//! OpenSky network REST source (`/api/states/all`), see
//! https://openskynetwork.github.io/opensky-api/rest.html#all-state-vectors

use serde::Deserialize;
use serde_json::Value;
use skyportal_common::{
    datetime::EpochMillis, geo::GeoRect,
    net::{basic_auth_value, HttpGet},
    debug,
};
use crate::{
    AircraftCategory, AircraftState, AircraftStateSource, PollQuery, StateSnapshot,
    errors::{check_status, parse_error, Result, SourceError},
    latitude, longitude, meters, meters_per_second, normalize_callsign, track,
};

pub const OPENSKY_URL: &str = "https://opensky-network.org/api/states/all";

// state vector column indices
const ICAO24: usize = 0;
const CALLSIGN: usize = 1;
const LONGITUDE: usize = 5;
const LATITUDE: usize = 6;
const BARO_ALTITUDE: usize = 7;
const ON_GROUND: usize = 8;
const VELOCITY: usize = 9;
const TRUE_TRACK: usize = 10;
const VERTICAL_RATE: usize = 11;
const GEO_ALTITUDE: usize = 13;
const CATEGORY: usize = 17;

#[derive(Deserialize)]
struct StatesResponse {
    time: f64,
    states: Option<Vec<Vec<Value>>>,
}

pub struct OpenSkySource<C> where C: HttpGet {
    client: C,
    url: String,
    username: String,
    password: String,
}

impl<C> OpenSkySource<C> where C: HttpGet {
    pub fn new (client: C, username: impl Into<String>, password: impl Into<String>)->Self {
        OpenSkySource { client, url: OPENSKY_URL.to_string(), username: username.into(), password: password.into() }
    }

    pub fn with_url (mut self, url: impl Into<String>)->Self {
        self.url = url.into();
        self
    }

    fn has_credentials (&self)->bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

impl<C> AircraftStateSource for OpenSkySource<C> where C: HttpGet {
    fn name (&self)->&'static str { "opensky" }

    fn poll (&self, query: &PollQuery)->Result<StateSnapshot> {
        if !self.has_credentials() {
            return Err( SourceError::SourceAuthError("no OpenSky credentials configured".into()))
        }

        let params = bbox_params( &GeoRect::enclosing_circle( &query.center, query.radius));
        let auth = basic_auth_value( &self.username, &self.password);
        debug!("requesting OpenSky states for {:?}", params);

        let response = self.client.get( &self.url, &[("Authorization", auth.as_str())], &params)?;
        check_status( self.name(), &response)?;

        parse_states( &response.json::<StatesResponse>()?)
    }
}

fn bbox_params (bbox: &GeoRect)->Vec<(&'static str,String)> {
    vec![
        ("lamin", format!("{:.6}", bbox.south())),
        ("lamax", format!("{:.6}", bbox.north())),
        ("lomin", format!("{:.6}", bbox.west())),
        ("lomax", format!("{:.6}", bbox.east())),
        ("extended", "1".to_string()),
    ]
}

fn parse_states (response: &StatesResponse)->Result<StateSnapshot> {
    let aircraft = match &response.states {
        Some(states) => states.iter().map( |sv| parse_state_vector(sv)).collect::<Result<Vec<_>>>()?,
        None => Vec::new() // no aircraft in the box
    };
    Ok( StateSnapshot::new( aircraft, EpochMillis::from_secs_f64( response.time)))
}

fn parse_state_vector (sv: &[Value])->Result<AircraftState> {
    let icao24 = column( sv, ICAO24)
        .and_then( Value::as_str)
        .map( |s| s.trim().to_ascii_lowercase())
        .filter( |s| !s.is_empty())
        .ok_or_else( || parse_error!("state vector without icao24: {:?}", sv.first()))?;

    Ok( AircraftState {
        callsign: normalize_callsign( opt_str( sv, CALLSIGN)?),
        latitude: latitude( opt_f64( sv, LATITUDE)?),
        longitude: longitude( opt_f64( sv, LONGITUDE)?),
        baro_altitude: meters( opt_f64( sv, BARO_ALTITUDE)?),
        geo_altitude: meters( opt_f64( sv, GEO_ALTITUDE)?),
        track: track( opt_f64( sv, TRUE_TRACK)?),
        ground_speed: meters_per_second( opt_f64( sv, VELOCITY)?),
        vertical_rate: meters_per_second( opt_f64( sv, VERTICAL_RATE)?),
        on_ground: opt_bool( sv, ON_GROUND)?.unwrap_or(false),
        category: opt_f64( sv, CATEGORY)?.map( |n| AircraftCategory::from_number( n as i64)).unwrap_or_default(),
        icao24,
    })
}

// short rows (no 'extended' columns) and JSON nulls are both "unknown"
fn column (sv: &[Value], idx: usize)->Option<&Value> {
    sv.get(idx).filter( |v| !v.is_null())
}

fn opt_f64 (sv: &[Value], idx: usize)->Result<Option<f64>> {
    match column( sv, idx) {
        Some(v) => v.as_f64().map( Some).ok_or_else( || parse_error!("column {idx} not a number: {v}")),
        None => Ok(None)
    }
}

fn opt_str (sv: &[Value], idx: usize)->Result<Option<&str>> {
    match column( sv, idx) {
        Some(v) => v.as_str().map( Some).ok_or_else( || parse_error!("column {idx} not a string: {v}")),
        None => Ok(None)
    }
}

fn opt_bool (sv: &[Value], idx: usize)->Result<Option<bool>> {
    match column( sv, idx) {
        Some(v) => v.as_bool().map( Some).ok_or_else( || parse_error!("column {idx} not a boolean: {v}")),
        None => Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uom::si::length::meter;

    #[test]
    fn test_state_vector_columns() {
        let sv = vec![
            json!("A1B2C3"), json!("DAL123  "), json!("United States"), json!(1700000000), json!(1700000001),
            json!(-71.1), json!(42.4), json!(0.0), json!(false), json!(120.5), json!(271.0), json!(-2.5),
            Value::Null, json!(null), json!("1234"), json!(false), json!(0), json!(4)
        ];
        let ac = parse_state_vector( &sv).unwrap();
        assert_eq!( ac.icao24, "a1b2c3");
        assert_eq!( ac.callsign.as_deref(), Some("DAL123"));
        assert_eq!( ac.baro_altitude.map(|a| a.get::<meter>()), Some(0.0)); // zero is a valid altitude
        assert_eq!( ac.geo_altitude, None);
        assert_eq!( ac.track.map(|t| t.degrees()), Some(271.0));
        assert_eq!( ac.category, AircraftCategory::Large);
    }

    #[test]
    fn test_short_row() {
        let sv = vec![ json!("abc123"), Value::Null, json!("Canada") ];
        let ac = parse_state_vector( &sv).unwrap();
        assert_eq!( ac, AircraftState::new("abc123"));
    }

    #[test]
    fn test_wrong_column_type() {
        let sv = vec![ json!("abc123"), Value::Null, json!("Canada"), json!(0), json!(0), json!("west"), json!(42.0) ];
        assert!( matches!( parse_state_vector( &sv), Err(SourceError::SourceParseError(_))));
    }
}
