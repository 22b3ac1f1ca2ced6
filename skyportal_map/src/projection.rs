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

//! equirectangular projection of geodetic coordinates onto the fixed display grid. This is only
//! adequate for the small (tens of miles) grids we display, but it is cheap and exactly reproducible

use std::fmt;
use uom::si::{f64::Length, length::{meter,mile}};
use skyportal_common::{
    angle::normalize_180,
    geo::{GeoPoint, GeoRect},
    geo_constants::MEAN_EARTH_RADIUS,
};
use crate::{errors::{MapError, Result}, hardware::HardwareProfile};

/// the immutable scale/origin parameters of the display grid, derived from map configuration only
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct ProjectionFrame {
    center: GeoPoint,
    grid_width: Length,
    width_px: u32,
    height_px: u32,
    px_per_deg_lat: f64,
    px_per_deg_lon: f64,
}

impl ProjectionFrame {
    /// `grid_width` is the east-west extent of the display
    pub fn new (center: GeoPoint, grid_width: Length, width_px: u32, height_px: u32)->Result<Self> {
        let grid_width_m = grid_width.get::<meter>();
        if !grid_width_m.is_finite() || grid_width_m <= 0.0 {
            return Err( MapError::InvalidFrame( format!("grid width has to be positive, got {grid_width_m}m")))
        }
        if width_px == 0 || height_px == 0 {
            return Err( MapError::InvalidFrame( format!("empty display grid {width_px}x{height_px}")))
        }
        let lat = center.lat_degrees();
        if !lat.is_finite() || lat.abs() >= 89.0 || !center.lon_degrees().is_finite() {
            return Err( MapError::InvalidFrame( format!("unsupported map center {center}")))
        }

        let m_per_deg_lat = MEAN_EARTH_RADIUS.to_radians(); // arc length of one degree
        let px_per_deg_lat = width_px as f64 * m_per_deg_lat / grid_width_m;
        let px_per_deg_lon = px_per_deg_lat * lat.to_radians().cos();

        Ok( ProjectionFrame { center, grid_width, width_px, height_px, px_per_deg_lat, px_per_deg_lon })
    }

    pub fn for_profile (center: GeoPoint, grid_width: Length, profile: HardwareProfile)->Result<Self> {
        Self::new( center, grid_width, profile.width(), profile.height())
    }

    pub fn from_degrees_and_miles (lat: f64, lon: f64, grid_width_mi: f64, profile: HardwareProfile)->Result<Self> {
        Self::for_profile( GeoPoint::from_lon_lat_degrees( lon, lat), Length::new::<mile>( grid_width_mi), profile)
    }

    pub fn center (&self)->&GeoPoint { &self.center }
    pub fn grid_width (&self)->Length { self.grid_width }
    pub fn grid_height (&self)->Length { self.grid_width * (self.height_px as f64 / self.width_px as f64) }
    pub fn width_px (&self)->u32 { self.width_px }
    pub fn height_px (&self)->u32 { self.height_px }
    pub fn px_per_deg_lat (&self)->f64 { self.px_per_deg_lat }
    pub fn px_per_deg_lon (&self)->f64 { self.px_per_deg_lon }

    /// geographic extent of the display grid
    pub fn bounds (&self)->GeoRect {
        let half_lon = (self.width_px as f64 / 2.0) / self.px_per_deg_lon;
        let half_lat = (self.height_px as f64 / 2.0) / self.px_per_deg_lat;
        let (lon, lat) = (self.center.lon_degrees(), self.center.lat_degrees());

        GeoRect::from_wsen_degrees( lon - half_lon, lat - half_lat, lon + half_lon, lat + half_lat)
    }

    /// distance from the center to the grid corners, i.e. the radius that covers everything visible
    pub fn half_diagonal (&self)->Length {
        let w = self.grid_width.get::<meter>();
        let h = self.grid_height().get::<meter>();
        Length::new::<meter>( (w*w + h*h).sqrt() / 2.0)
    }
}

impl fmt::Display for ProjectionFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "ProjectionFrame( center: {}, width: {:.1}mi, grid: {}x{})",
                self.center, self.grid_width.get::<mile>(), self.width_px, self.height_px)
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Projection {
    Pixel { x: i32, y: i32 },
    /// not an error, callers just don't draw
    OutOfFrame,
}

impl Projection {
    pub fn pixel (&self)->Option<(i32,i32)> {
        match *self {
            Projection::Pixel{x,y} => Some((x,y)),
            Projection::OutOfFrame => None
        }
    }

    pub fn is_in_frame (&self)->bool { matches!( self, Projection::Pixel{..}) }
}

/// maps lat/lon to pixel coordinates (and back). The pixel domain is [0,width) x [0,height), x grows
/// east and y grows south. Nothing is clamped to the edges
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeoProjector {
    frame: ProjectionFrame,
}

impl GeoProjector {
    pub fn new (frame: ProjectionFrame)->Self { GeoProjector { frame } }

    pub fn frame (&self)->&ProjectionFrame { &self.frame }

    /// fractional pixel coordinates, not range checked
    pub fn to_screen (&self, lat: f64, lon: f64)->(f64,f64) {
        let f = &self.frame;
        let d_lon = normalize_180( lon - f.center.lon_degrees());
        let d_lat = lat - f.center.lat_degrees();

        let x = f.width_px as f64 / 2.0 + d_lon * f.px_per_deg_lon;
        let y = f.height_px as f64 / 2.0 - d_lat * f.px_per_deg_lat;
        (x, y)
    }

    pub fn project (&self, lat: f64, lon: f64)->Projection {
        let (x,y) = self.to_screen( lat, lon);
        let (w,h) = (self.frame.width_px as f64, self.frame.height_px as f64);

        if x >= 0.0 && x < w && y >= 0.0 && y < h { // also false for NaN
            Projection::Pixel { x: x.floor() as i32, y: y.floor() as i32 }
        } else {
            Projection::OutOfFrame
        }
    }

    pub fn project_point (&self, p: &GeoPoint)->Projection {
        self.project( p.lat_degrees(), p.lon_degrees())
    }

    /// geodetic position of a (fractional) pixel coordinate
    pub fn unproject (&self, x: f64, y: f64)->GeoPoint {
        let f = &self.frame;
        let lon = f.center.lon_degrees() + (x - f.width_px as f64 / 2.0) / f.px_per_deg_lon;
        let lat = f.center.lat_degrees() - (y - f.height_px as f64 / 2.0) / f.px_per_deg_lat;
        GeoPoint::from_lon_lat_degrees( normalize_180( lon), lat)
    }
}
