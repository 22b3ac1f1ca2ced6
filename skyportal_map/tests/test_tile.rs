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

use std::{cell::Cell, io::Cursor};
use image::{ImageFormat, Rgb, RgbImage};
use skyportal_common::net::{self, HttpGet, HttpResponse, NetError};
use skyportal_map::{
    compose_tile, default_tile, HardwareProfile, MapTileBuilder, ProjectionFrame, StaticMapConfig, TileOrigin,
    errors::MapError,
};

enum Reply {
    Body(u16, Vec<u8>),
    Fail,
}

struct MockClient {
    reply: Reply,
    n_requests: Cell<usize>,
}

impl MockClient {
    fn new (reply: Reply)->Self { MockClient { reply, n_requests: Cell::new(0) } }
}

impl HttpGet for MockClient {
    fn get (&self, _url: &str, _headers: &[(&str,&str)], query: &[(&str,String)]) -> net::Result<HttpResponse> {
        self.n_requests.set( self.n_requests.get() + 1);
        assert!( query.iter().any( |(k,_)| *k == "area"));
        match &self.reply {
            Reply::Body(status, body) => Ok( HttpResponse::new( *status, body.clone())),
            Reply::Fail => Err( NetError::Transport("connection reset".into()))
        }
    }
}

fn frame (profile: HardwareProfile)->ProjectionFrame {
    ProjectionFrame::from_degrees_and_miles( 42.41, -71.17, 15.0, profile).unwrap()
}

/// a 2x oversampled PNG the way the map provider would send it
fn provider_png (width: u32, height: u32)->Vec<u8> {
    let img = RgbImage::from_fn( width, height, |x,y| Rgb([ (x % 256) as u8, (y % 256) as u8, ((x+y) % 256) as u8 ]));
    let mut buf = Cursor::new( Vec::new());
    img.write_to( &mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn builder (reply: Reply, profile: HardwareProfile)->MapTileBuilder<MockClient> {
    MapTileBuilder::new( MockClient::new( reply), StaticMapConfig::with_api_key("test-key"), profile)
}

#[test]
fn test_fetched_tile() {
    let png = provider_png( 640, 480);
    let frame = frame( HardwareProfile::PyPortal);

    let tile = builder( Reply::Body( 200, png.clone()), HardwareProfile::PyPortal).build( &frame, false);
    assert_eq!( tile.origin(), TileOrigin::Fetched);
    assert_eq!( (tile.width(), tile.height()), (320,240));

    // the offline generator composes the same bytes into the same pixels
    assert_eq!( tile.image(), &compose_tile( &png, &frame).unwrap());
}

#[test]
fn test_fallback_on_transport_failure() {
    let b = builder( Reply::Fail, HardwareProfile::PyPortal);
    let tile = b.build( &frame( HardwareProfile::PyPortal), false);
    assert_eq!( tile.origin(), TileOrigin::Default);
    assert_eq!( (tile.width(), tile.height()), (320,240));
}

#[test]
fn test_fallback_on_status() {
    let tile = builder( Reply::Body( 401, b"invalid apiKey".to_vec()), HardwareProfile::Feather).build( &frame( HardwareProfile::Feather), false);
    assert_eq!( tile.origin(), TileOrigin::Default);
    assert_eq!( (tile.width(), tile.height()), (480,320));
}

#[test]
fn test_fallback_on_bad_image() {
    let b = builder( Reply::Body( 200, b"<html>not an image</html>".to_vec()), HardwareProfile::PyPortal);
    let frame = frame( HardwareProfile::PyPortal);
    assert!( matches!( b.fetch( &frame), Err(MapError::ImageError(_))));

    let tile = b.build( &frame, false);
    assert_eq!( tile.origin(), TileOrigin::Default);
    assert_eq!( tile.image(), default_tile( HardwareProfile::PyPortal, &frame).image());
}

#[test]
fn test_no_api_key() {
    let b = MapTileBuilder::new( MockClient::new( Reply::Fail), StaticMapConfig::default(), HardwareProfile::PyPortal);
    let tile = b.build( &frame( HardwareProfile::PyPortal), false);
    assert_eq!( tile.origin(), TileOrigin::Default);
}

#[test]
fn test_use_default() {
    let client = MockClient::new( Reply::Body( 200, provider_png( 640, 480)));
    let b = MapTileBuilder::new( &client, StaticMapConfig::with_api_key("test-key"), HardwareProfile::PyPortal);
    let tile = b.build( &frame( HardwareProfile::PyPortal), true);
    assert_eq!( tile.origin(), TileOrigin::Default);
    assert_eq!( client.n_requests.get(), 0);
}

#[test]
fn test_default_tiles() {
    for profile in HardwareProfile::ALL {
        let tile = default_tile( profile, &frame( profile));
        assert_eq!( tile.origin(), TileOrigin::Default);
        assert_eq!( (tile.width(), tile.height()), profile.dimensions());
    }
}

#[test]
fn test_save_bmp() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("default_map_pyportal.bmp");

    let tile = default_tile( HardwareProfile::PyPortal, &frame( HardwareProfile::PyPortal));
    tile.save_bmp( &path).unwrap();

    let bytes = std::fs::read( &path).unwrap();
    assert_eq!( &bytes[..2], b"BM");

    let reloaded = image::load_from_memory_with_format( &bytes, ImageFormat::Bmp).unwrap().into_rgb8();
    assert_eq!( &reloaded, tile.image());
}

#[test]
fn test_save_png_replaces_bundled_tile() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("default_map_feather.png");

    let frame = frame( HardwareProfile::Feather);
    let tile = default_tile( HardwareProfile::Feather, &frame);
    tile.save_png( &path).unwrap();

    let bytes = std::fs::read( &path).unwrap();
    assert_eq!( image::guess_format( &bytes).unwrap(), ImageFormat::Png);

    // usable wherever the bundled asset is
    let recomposed = compose_tile( &bytes, &frame).unwrap();
    assert_eq!( recomposed.dimensions(), (frame.width_px(), frame.height_px()));
    assert_eq!( &recomposed, tile.image());
}
