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

//! aircraft state acquisition: the normalized [`AircraftState`] model, the provider specific
//! [`AircraftStateSource`] implementations and the [`controller::StateAcquisitionController`]
//! that owns the polling cadence

use std::{fmt, time::Duration};
use serde::{Serialize,Deserialize};
use chrono::{DateTime,Utc};
use uom::si::{f64::{Length,Velocity}, length::{meter,foot,mile,nautical_mile}, velocity::{meter_per_second,knot,foot_per_minute}};
use skyportal_common::{
    angle::{Angle360,Latitude,Longitude},
    datetime::{self,EpochMillis},
    geo::GeoPoint,
    net::HttpGet,
};

pub mod errors;
use errors::Result;

pub mod opensky;
pub mod adsblol;
pub mod proxy;
pub mod controller;

/* #region aircraft model ************************************************************************************/

/// emitter category, numbered the way OpenSky reports it in the extended state vector
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Default,Serialize,Deserialize)]
pub enum AircraftCategory {
    #[default] NoInfo = 0,
    NoCategoryInfo = 1,
    Light = 2,
    Small = 3,
    Large = 4,
    HighVortexLarge = 5,
    Heavy = 6,
    HighPerformance = 7,
    Rotorcraft = 8,
    Glider = 9,
    LighterThanAir = 10,
    Parachutist = 11,
    Ultralight = 12,
    Reserved = 13,
    Uav = 14,
    Space = 15,
    SurfaceEmergency = 16,
    SurfaceService = 17,
    PointObstacle = 18,
    ClusterObstacle = 19,
    LineObstacle = 20,
}

impl AircraftCategory {
    const BY_NUMBER: [AircraftCategory;21] = {
        use AircraftCategory::*;
        [ NoInfo, NoCategoryInfo, Light, Small, Large, HighVortexLarge, Heavy, HighPerformance, Rotorcraft,
          Glider, LighterThanAir, Parachutist, Ultralight, Reserved, Uav, Space,
          SurfaceEmergency, SurfaceService, PointObstacle, ClusterObstacle, LineObstacle ]
    };

    /// OpenSky category number, everything outside of 0..=20 is `NoInfo`
    pub fn from_number (n: i64)->Self {
        usize::try_from(n).ok()
            .and_then( |i| Self::BY_NUMBER.get(i).copied())
            .unwrap_or_default()
    }

    /// ADS-B emitter category code ("A0".."C5")
    pub fn from_emitter_code (code: &str)->Self {
        let code = code.trim().as_bytes();
        if code.len() != 2 || !code[1].is_ascii_digit() {
            return AircraftCategory::NoInfo
        }
        let n = (code[1] - b'0') as i64;

        match (code[0].to_ascii_uppercase(), n) {
            (b'A'|b'B'|b'C', 0) => AircraftCategory::NoCategoryInfo,
            (b'A', 1..=7) => Self::from_number( 1 + n),
            (b'B', 1..=7) => Self::from_number( 8 + n),
            (b'C', 1..=5) => Self::from_number( 15 + n),
            _ => AircraftCategory::NoInfo
        }
    }

    pub fn number (&self)->u8 { *self as u8 }

    pub fn is_rotorcraft (&self)->bool { *self == AircraftCategory::Rotorcraft }
}

/// one observed aircraft at one sample time. Everything but the `icao24` identifier is independently
/// optional: `None` means "currently unknown" and never stands for zero
#[derive(Debug,Clone,PartialEq)]
pub struct AircraftState {
    pub icao24: String,
    pub callsign: Option<String>,

    pub latitude: Option<Latitude>,
    pub longitude: Option<Longitude>,
    pub baro_altitude: Option<Length>,
    pub geo_altitude: Option<Length>,

    pub track: Option<Angle360>,
    pub ground_speed: Option<Velocity>,
    pub vertical_rate: Option<Velocity>,

    pub on_ground: bool,
    pub category: AircraftCategory,
}

impl AircraftState {
    /// an aircraft without anything but its identifier
    pub fn new (icao24: impl Into<String>)->Self {
        AircraftState {
            icao24: icao24.into(),
            callsign: None,
            latitude: None,
            longitude: None,
            baro_altitude: None,
            geo_altitude: None,
            track: None,
            ground_speed: None,
            vertical_rate: None,
            on_ground: false,
            category: AircraftCategory::NoInfo,
        }
    }

    pub fn position (&self)->Option<GeoPoint> {
        match (self.longitude, self.latitude) {
            (Some(lon), Some(lat)) => Some( GeoPoint::from_lon_lat( lon, lat)),
            _ => None
        }
    }

    /// we need a position and a track to draw an oriented icon
    pub fn is_plottable (&self)->bool {
        self.latitude.is_some() && self.longitude.is_some() && self.track.is_some()
    }
}

impl fmt::Display for AircraftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "AircraftState( icao24: {}", self.icao24)?;
        if let Some(cs) = &self.callsign { write!( f, ", cs: \"{cs}\"")?; }
        if let Some(p) = self.position() { write!( f, ", pos: {p}")?; }
        if let Some(alt) = self.baro_altitude { write!( f, ", baro_alt: {:.0}ft", alt.get::<foot>())?; }
        if let Some(alt) = self.geo_altitude { write!( f, ", geo_alt: {:.0}ft", alt.get::<foot>())?; }
        if let Some(trk) = self.track { write!( f, ", trk: {:.0}", trk.degrees())?; }
        if let Some(gs) = self.ground_speed { write!( f, ", spd: {:.0}kn", gs.get::<knot>())?; }
        if let Some(vr) = self.vertical_rate { write!( f, ", vr: {:.0}fpm", vr.get::<foot_per_minute>())?; }
        if self.on_ground { write!( f, ", on_ground")?; }
        write!( f, ", cat: {:?})", self.category)
    }
}

/// the result of one successful poll. Immutable once created
#[derive(Debug,Clone,PartialEq)]
pub struct StateSnapshot {
    pub aircraft: Vec<AircraftState>,

    /// when the provider computed the data (fractional seconds are kept as millis)
    pub source_time: EpochMillis,

    /// wall clock time at which the poll completed on our side
    pub completed_at: DateTime<Utc>,
}

impl StateSnapshot {
    pub fn new (aircraft: Vec<AircraftState>, source_time: EpochMillis)->Self {
        StateSnapshot { aircraft, source_time, completed_at: datetime::utc_now() }
    }

    pub fn len (&self)->usize { self.aircraft.len() }
    pub fn is_empty (&self)->bool { self.aircraft.is_empty() }

    pub fn get (&self, icao24: &str)->Option<&AircraftState> {
        self.aircraft.iter().find( |ac| ac.icao24 == icao24)
    }
}

/* #endregion aircraft model */

/* #region sources *******************************************************************************************/

/// what area to ask a provider for
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct PollQuery {
    pub center: GeoPoint,
    pub radius: Length,
}

impl PollQuery {
    pub fn new (center: GeoPoint, radius: Length)->Self { PollQuery { center, radius } }

    pub fn from_degrees_and_miles (lat: f64, lon: f64, radius_mi: f64)->Self {
        PollQuery { center: GeoPoint::from_lon_lat_degrees( lon, lat), radius: Length::new::<mile>(radius_mi) }
    }

    pub fn radius_mi (&self)->f64 { self.radius.get::<mile>() }
    pub fn radius_nm (&self)->f64 { self.radius.get::<nautical_mile>() }
}

/// the provider abstraction. Each implementation owns its wire format and is responsible for
/// turning missing fields into `None`
pub trait AircraftStateSource {
    /// short name used in logs and status messages
    fn name (&self)->&'static str;

    /// blocking. Fails with `SourceUnavailable`, `SourceAuthError` or `SourceParseError`
    fn poll (&self, query: &PollQuery)->Result<StateSnapshot>;
}

impl<T> AircraftStateSource for Box<T> where T: AircraftStateSource + ?Sized {
    fn name (&self)->&'static str { (**self).name() }
    fn poll (&self, query: &PollQuery)->Result<StateSnapshot> { (**self).poll( query) }
}

/// the configured data source. Secrets are kept out of the `Display` output
#[derive(Serialize,Deserialize,Clone,PartialEq)]
pub enum SourceConfig {
    OpenSky {
        username: String,
        password: String,
        #[serde(default)]
        base_url: Option<String>,
    },
    AdsbLol {
        #[serde(default)]
        base_url: Option<String>,
    },
    Proxy {
        url: String,
        api_key: String,
    },
}

impl SourceConfig {
    pub fn selector (&self)->&'static str {
        match self {
            SourceConfig::OpenSky{..} => "opensky",
            SourceConfig::AdsbLol{..} => "adsblol",
            SourceConfig::Proxy{..} => "proxy",
        }
    }
}

impl fmt::Display for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceConfig::OpenSky{username,..} => write!( f, "opensky(user: {username})"),
            SourceConfig::AdsbLol{base_url} => write!( f, "adsblol({})", base_url.as_deref().unwrap_or( adsblol::ADSBLOL_URL)),
            SourceConfig::Proxy{url,..} => write!( f, "proxy({url})"),
        }
    }
}

impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt( self, f) }
}

/// instantiate the configured source on top of the provided transport
pub fn create_source<C> (config: &SourceConfig, client: C)->Box<dyn AircraftStateSource> where C: HttpGet + 'static {
    match config {
        SourceConfig::OpenSky { username, password, base_url } => {
            let mut src = opensky::OpenSkySource::new( client, username, password);
            if let Some(url) = base_url { src = src.with_url( url) }
            Box::new( src)
        }
        SourceConfig::AdsbLol { base_url } => {
            let mut src = adsblol::AdsbLolSource::new( client);
            if let Some(url) = base_url { src = src.with_url( url) }
            Box::new( src)
        }
        SourceConfig::Proxy { url, api_key } => {
            Box::new( proxy::ProxySource::new( client, url, api_key))
        }
    }
}

/* #endregion sources */

/* #region display filter ************************************************************************************/

fn default_skip_ground()->bool { true }
fn default_ground_altitude_threshold()->f64 { 20.0 }

#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct FilterConfig {
    #[serde(default="default_skip_ground")]
    pub skip_ground: bool,

    #[serde(default="default_ground_altitude_threshold")]
    pub ground_altitude_threshold_m: f64,
}

impl Default for FilterConfig {
    fn default()->Self {
        FilterConfig { skip_ground: default_skip_ground(), ground_altitude_threshold_m: default_ground_altitude_threshold() }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum FilterVerdict {
    Show,
    MissingData,
    OnGround,
}

/// decides which aircraft get displayed
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct AircraftFilter {
    pub skip_ground: bool,
    pub ground_altitude_threshold: Length,
}

impl AircraftFilter {
    pub fn check (&self, ac: &AircraftState)->FilterVerdict {
        if !ac.is_plottable() {
            FilterVerdict::MissingData
        } else if self.skip_ground && (ac.on_ground || ac.geo_altitude.is_some_and( |alt| alt < self.ground_altitude_threshold)) {
            FilterVerdict::OnGround
        } else {
            FilterVerdict::Show
        }
    }

    pub fn accepts (&self, ac: &AircraftState)->bool { self.check(ac) == FilterVerdict::Show }
}

impl From<&FilterConfig> for AircraftFilter {
    fn from (cfg: &FilterConfig)->Self {
        AircraftFilter { skip_ground: cfg.skip_ground, ground_altitude_threshold: Length::new::<meter>( cfg.ground_altitude_threshold_m) }
    }
}

impl Default for AircraftFilter {
    fn default()->Self { AircraftFilter::from( &FilterConfig::default()) }
}

/* #endregion display filter */

/* #region normalization helpers (shared by the providers) ***************************************************/

/// blank callsigns are unknown callsigns
pub(crate) fn normalize_callsign (cs: Option<&str>)->Option<String> {
    cs.map( str::trim).filter( |s| !s.is_empty()).map( str::to_string)
}

pub(crate) fn latitude (deg: Option<f64>)->Option<Latitude> { deg.and_then( Latitude::try_from_degrees) }
pub(crate) fn longitude (deg: Option<f64>)->Option<Longitude> { deg.and_then( Longitude::try_from_degrees) }

pub(crate) fn track (deg: Option<f64>)->Option<Angle360> {
    deg.filter( |d| d.is_finite()).map( Angle360::from_degrees)
}

pub(crate) fn meters (v: Option<f64>)->Option<Length> { v.map( Length::new::<meter>) }
pub(crate) fn feet (v: Option<f64>)->Option<Length> { v.map( Length::new::<foot>) }
pub(crate) fn meters_per_second (v: Option<f64>)->Option<Velocity> { v.map( Velocity::new::<meter_per_second>) }
pub(crate) fn knots (v: Option<f64>)->Option<Velocity> { v.map( Velocity::new::<knot>) }
pub(crate) fn feet_per_minute (v: Option<f64>)->Option<Velocity> { v.map( Velocity::new::<foot_per_minute>) }

/* #endregion normalization helpers */
