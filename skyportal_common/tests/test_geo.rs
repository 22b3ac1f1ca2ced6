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

use uom::si::{f64::Length, length::{meter, mile}};
use skyportal_common::geo::{GeoPoint, GeoRect};

// run with "cargo test --test test_geo -- --nocapture"

#[test]
fn test_haversine () {
    let bos = GeoPoint::from_lon_lat_degrees( -71.0096, 42.3656);
    let jfk = GeoPoint::from_lon_lat_degrees( -73.7781, 40.6413);
    let d = bos.haversine_distance( &jfk).get::<mile>();
    println!("BOS-JFK: {d:.1}mi");
    assert!( d > 180.0 && d < 190.0);

    assert_eq!( 0.0, bos.haversine_distance(&bos).get::<meter>());
}

#[test]
fn test_enclosing_circle () {
    let center = GeoPoint::from_lon_lat_degrees( -71.17, 42.41);
    let r = Length::new::<mile>( 10.0);
    let rect = GeoRect::enclosing_circle( &center, r);
    println!("rect: {rect}");

    // the rect is centered and wider in longitude than in latitude at 42°N
    let c = rect.center();
    assert!( (c.lon_degrees() + 71.17).abs() < 1e-9);
    assert!( (c.lat_degrees() - 42.41).abs() < 1e-9);
    assert!( (rect.east() - rect.west()) > (rect.north() - rect.south()));

    // the edge midpoints are (about) one radius away from the center
    let north = GeoPoint::from_lon_lat_degrees( -71.17, rect.north());
    let east = GeoPoint::from_lon_lat_degrees( rect.east(), 42.41);
    assert!( (center.haversine_distance(&north).get::<mile>() - 10.0).abs() < 0.01);
    assert!( (center.haversine_distance(&east).get::<mile>() - 10.0).abs() < 0.05);
}

#[test]
fn test_rect_contains () {
    let rect = GeoRect::from_wsen_degrees( -72.0, 42.0, -71.0, 43.0);
    assert!( rect.contains( &GeoPoint::from_lon_lat_degrees( -71.5, 42.5)));
    assert!( rect.contains( &GeoPoint::from_lon_lat_degrees( -72.0, 43.0))); // west and north edges are inside
    assert!( !rect.contains( &GeoPoint::from_lon_lat_degrees( -71.0, 42.5))); // east edge is outside
    assert!( !rect.contains( &GeoPoint::from_lon_lat_degrees( -71.5, 42.0))); // south edge is outside
}

#[test]
fn test_geopoint_serde () {
    let p: GeoPoint = serde_json::from_str( r#"{ "lon": -122.0, "lat": 37.0 }"#).unwrap();
    assert_eq!( GeoPoint::from_lon_lat_degrees( -122.0, 37.0), p);

    let p: GeoPoint = serde_json::from_str( r#"{ "longitude": -122.0, "latitude": 37.0 }"#).unwrap();
    assert_eq!( -122.0, p.lon_degrees());

    let s = serde_json::to_string( &p).unwrap();
    assert_eq!( r#"{"lon":-122.0,"lat":37.0}"#, s);
}
