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

use uom::si::{f64::Length, length::mile};
use skyportal_common::geo::GeoPoint;
use skyportal_map::{GeoProjector, HardwareProfile, Projection, ProjectionFrame};

fn projector (profile: HardwareProfile)->GeoProjector {
    GeoProjector::new( ProjectionFrame::from_degrees_and_miles( 42.41, -71.17, 15.0, profile).unwrap())
}

#[test]
fn test_center_projection() {
    assert_eq!( projector( HardwareProfile::PyPortal).project( 42.41, -71.17), Projection::Pixel{ x: 160, y: 120 });
    assert_eq!( projector( HardwareProfile::Feather).project( 42.41, -71.17), Projection::Pixel{ x: 240, y: 160 });
}

#[test]
fn test_deterministic() {
    let p = projector( HardwareProfile::PyPortal);
    let q = projector( HardwareProfile::PyPortal);

    for i in 0..50 {
        let lat = 42.30 + i as f64 * 0.0047;
        let lon = -71.30 + i as f64 * 0.0061;
        let a = p.project( lat, lon);
        assert_eq!( a, p.project( lat, lon));
        assert_eq!( a, q.project( lat, lon));
    }
}

#[test]
fn test_orientation() {
    let p = projector( HardwareProfile::PyPortal);
    let (x,y) = p.project( 42.45, -71.10).pixel().unwrap(); // north-east of center
    assert!( x > 160 && y < 120);

    let (x,y) = p.project( 42.38, -71.25).pixel().unwrap(); // south-west of center
    assert!( x < 160 && y > 120);
}

#[test]
fn test_out_of_frame() {
    let p = projector( HardwareProfile::PyPortal);
    let bbox = p.frame().bounds();
    let eps = 1e-6;

    assert_eq!( p.project( bbox.north() + eps, -71.17), Projection::OutOfFrame);
    assert_eq!( p.project( bbox.south() - eps, -71.17), Projection::OutOfFrame);
    assert_eq!( p.project( 42.41, bbox.west() - eps), Projection::OutOfFrame);
    assert_eq!( p.project( 42.41, bbox.east() + eps), Projection::OutOfFrame);
    assert_eq!( p.project( 40.64, -73.78), Projection::OutOfFrame); // JFK

    // just inside is never clamped onto the edge from outside
    let (x,_) = p.project( 42.41, bbox.west() + eps).pixel().unwrap();
    assert_eq!( x, 0);
    let (_,y) = p.project( bbox.south() + eps, -71.17).pixel().unwrap();
    assert_eq!( y, 239);
}

#[test]
fn test_bounds_agree_with_projection() {
    let p = projector( HardwareProfile::Feather);
    let bbox = p.frame().bounds();

    for i in 0..40 {
        for j in 0..40 {
            // sample a slightly larger area than the frame, off the exact edges
            let lat = bbox.south() - 0.01 + (bbox.north() - bbox.south() + 0.02) * (i as f64 + 0.5) / 40.0;
            let lon = bbox.west() - 0.01 + (bbox.east() - bbox.west() + 0.02) * (j as f64 + 0.5) / 40.0;
            let in_bbox = bbox.contains( &GeoPoint::from_lon_lat_degrees( lon, lat));

            match p.project( lat, lon) {
                Projection::Pixel{x,y} => {
                    assert!( in_bbox);
                    assert!( x >= 0 && x < 480 && y >= 0 && y < 320);
                }
                Projection::OutOfFrame => assert!( !in_bbox)
            }
        }
    }
}

#[test]
fn test_unproject() {
    let p = projector( HardwareProfile::PyPortal);
    let pt = p.unproject( 160.0, 120.0);
    assert!( (pt.lat_degrees() - 42.41).abs() < 1e-12);
    assert!( (pt.lon_degrees() + 71.17).abs() < 1e-12);

    let (x,y) = p.to_screen( 42.43, -71.12);
    let pt = p.unproject( x, y);
    assert!( (pt.lat_degrees() - 42.43).abs() < 1e-9);
    assert!( (pt.lon_degrees() + 71.12).abs() < 1e-9);
}

#[test]
fn test_frame_extent() {
    let frame = ProjectionFrame::from_degrees_and_miles( 42.41, -71.17, 15.0, HardwareProfile::PyPortal).unwrap();
    assert!( (frame.grid_height().get::<mile>() - 11.25).abs() < 1e-9);
    assert!( (frame.half_diagonal().get::<mile>() - 9.375).abs() < 1e-9);

    // the east-west extent of the bounds is the grid width
    let bbox = frame.bounds();
    let w = GeoPoint::from_lon_lat_degrees( bbox.west(), 42.41);
    let e = GeoPoint::from_lon_lat_degrees( bbox.east(), 42.41);
    assert!( (w.haversine_distance( &e).get::<mile>() - 15.0).abs() < 0.01);
}

#[test]
fn test_antimeridian() {
    let frame = ProjectionFrame::new( GeoPoint::from_lon_lat_degrees( 179.95, -16.5), Length::new::<mile>(15.0), 320, 240).unwrap();
    let p = GeoProjector::new( frame);
    let (x,_) = p.project( -16.5, -179.99).pixel().unwrap();
    assert!( x > 160);
}
