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
#![allow(non_snake_case)]

//! this module provides the (small) set of geographic types we need on the WGS84 surface.
//! We wrap [geo](https://docs.rs/geo/latest/geo/index.html) types with the new type pattern so that
//! we keep normalized degree semantics and uom lengths at our API boundary.

use std::fmt;
use serde::{Serialize,Deserialize};
use geo::{Coord, Point, Rect};
use uom::si::f64::Length;
use uom::si::length::meter;

use crate::angle::{Latitude, Longitude};
use crate::geo_constants::MEAN_EARTH_RADIUS;

/* #region GeoPoint ***********************************************************************************************/

/// a wrapper for geo::Point that uses geodetic degrees stored as f64 (x: lon, y: lat)
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(from="LonLat", into="LonLat")]
pub struct GeoPoint(Point);

impl GeoPoint {
    pub fn from_lon_lat (lon: Longitude, lat: Latitude) -> Self {
        GeoPoint( Point::new( lon.degrees(), lat.degrees()))
    }

    pub fn from_lon_lat_degrees (lon: f64, lat: f64) -> Self {
        GeoPoint::from_lon_lat( Longitude::from_degrees(lon), Latitude::from_degrees(lat))
    }

    pub fn lon_degrees (&self)->f64 { self.0.x() }
    pub fn lat_degrees (&self)->f64 { self.0.y() }

    /// great circle distance on a spherical earth
    pub fn haversine_distance (&self, other: &GeoPoint) -> Length {
        let φ1 = self.lat_degrees().to_radians();
        let φ2 = other.lat_degrees().to_radians();
        let Δφ = (other.lat_degrees() - self.lat_degrees()).to_radians();
        let Δλ = (other.lon_degrees() - self.lon_degrees()).to_radians();

        let a = (Δφ / 2.0).sin().powi(2) + φ1.cos() * φ2.cos() * (Δλ / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();
        Length::new::<meter>( MEAN_EARTH_RADIUS * c)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.5},{:.5}]", self.0.x(),self.0.y())
    }
}

#[derive(Serialize,Deserialize)]
struct LonLat {
    #[serde(alias="longitude")] lon: f64,
    #[serde(alias="latitude")] lat: f64
}

impl From<LonLat> for GeoPoint {
    fn from (ll: LonLat)->Self { GeoPoint::from_lon_lat_degrees( ll.lon, ll.lat) }
}

impl From<GeoPoint> for LonLat {
    fn from (p: GeoPoint)->Self { LonLat{ lon: p.lon_degrees(), lat: p.lat_degrees() } }
}

/* #endregion GeoPoint */

/* #region GeoRect ***********************************************************************************************/

/// a lat/lon aligned rectangle. We do not support rectangles that cross the antimeridian
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeoRect(Rect);

impl GeoRect {
    pub fn from_wsen_degrees (west: f64, south: f64, east: f64, north: f64) -> Self {
        GeoRect( Rect::new( Coord{ x: west, y: south}, Coord{ x: east, y: north}))
    }

    /// the rectangle that encloses a circle of `radius` around `center`.
    /// Δlat is the angular distance, Δlon accounts for meridian convergence at the center latitude
    pub fn enclosing_circle (center: &GeoPoint, radius: Length) -> Self {
        let ang_dist = radius.get::<meter>() / MEAN_EARTH_RADIUS;
        let lat = center.lat_degrees().to_radians();

        let d_lat = ang_dist.to_degrees();
        let d_lon = (ang_dist.sin() / lat.cos()).clamp(-1.0, 1.0).asin().to_degrees();

        GeoRect::from_wsen_degrees(
            center.lon_degrees() - d_lon, (center.lat_degrees() - d_lat).max(-90.0),
            center.lon_degrees() + d_lon, (center.lat_degrees() + d_lat).min(90.0)
        )
    }

    #[inline] pub fn west(&self)->f64 { self.0.min().x }
    #[inline] pub fn east(&self)->f64 { self.0.max().x }
    #[inline] pub fn south(&self)->f64 { self.0.min().y }
    #[inline] pub fn north(&self)->f64 { self.0.max().y }

    pub fn center (&self)->GeoPoint {
        let c = self.0.center();
        GeoPoint::from_lon_lat_degrees( c.x, c.y)
    }

    /// half-open containment [west,east) x (south,north] which matches the pixel grid
    /// orientation (x grows east, y grows south)
    pub fn contains (&self, p: &GeoPoint)->bool {
        let (lon,lat) = (p.lon_degrees(), p.lat_degrees());
        lon >= self.west() && lon < self.east() && lat > self.south() && lat <= self.north()
    }
}

impl fmt::Display for GeoRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[w:{:.5},s:{:.5},e:{:.5},n:{:.5}]", self.west(), self.south(), self.east(), self.north())
    }
}

/* #endregion GeoRect */
