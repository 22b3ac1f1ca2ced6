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

use std::{fmt, io::Cursor, path::Path};
use image::{imageops::{self, FilterType}, ImageFormat, Rgb, RgbImage};
use skyportal_common::{fs::write_file_atomic, net::HttpGet, info, warn, error};
use crate::{
    errors::{MapError, Result},
    geoapify::{fetch_static_map, StaticMapConfig},
    hardware::HardwareProfile,
    projection::ProjectionFrame,
};

/// the resampling filter used whenever a decoded map does not match the display grid. This has to be
/// the same for live and offline tiles
pub const TILE_FILTER: FilterType = FilterType::Triangle;

/// used if even the bundled tile cannot be decoded
const BLANK_COLOR: Rgb<u8> = Rgb([242,239,233]);

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum TileOrigin {
    Fetched,
    Default,
    Blank,
}

/// the background bitmap for a session. Rebuilding means creating a new tile
#[derive(Clone)]
pub struct MapTile {
    image: RgbImage,
    origin: TileOrigin,
}

impl MapTile {
    pub fn image (&self)->&RgbImage { &self.image }
    pub fn origin (&self)->TileOrigin { self.origin }
    pub fn width (&self)->u32 { self.image.width() }
    pub fn height (&self)->u32 { self.image.height() }
    pub fn is_default (&self)->bool { self.origin != TileOrigin::Fetched }

    fn encode (&self, format: ImageFormat)->Result<Vec<u8>> {
        let mut buf = Cursor::new( Vec::with_capacity( (self.width() * self.height() * 3 + 54) as usize));
        self.image.write_to( &mut buf, format)?;
        Ok( buf.into_inner())
    }

    /// the format the device loads at runtime
    pub fn to_bmp (&self)->Result<Vec<u8>> { self.encode( ImageFormat::Bmp) }

    /// the format of the bundled default tiles in `assets/`
    pub fn to_png (&self)->Result<Vec<u8>> { self.encode( ImageFormat::Png) }

    pub fn save_bmp (&self, path: impl AsRef<Path>)->Result<()> {
        write_file_atomic( path, &self.to_bmp()?)?;
        Ok(())
    }

    pub fn save_png (&self, path: impl AsRef<Path>)->Result<()> {
        write_file_atomic( path, &self.to_png()?)?;
        Ok(())
    }
}

impl fmt::Debug for MapTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "MapTile( {}x{}, {:?})", self.width(), self.height(), self.origin)
    }
}

/// decode an encoded map image and scale it to the display grid of `frame`.
/// Both the live builder and the offline tile generator go through here
pub fn compose_tile (encoded: &[u8], frame: &ProjectionFrame)->Result<RgbImage> {
    let decoded = image::load_from_memory( encoded)?.into_rgb8();
    Ok( fit_to_frame( decoded, frame.width_px(), frame.height_px()))
}

fn fit_to_frame (img: RgbImage, width: u32, height: u32)->RgbImage {
    if img.dimensions() == (width,height) {
        img
    } else {
        imageops::resize( &img, width, height, TILE_FILTER)
    }
}

/// the bundled tile of the hardware profile, scaled to `frame` if required
pub fn default_tile (profile: HardwareProfile, frame: &ProjectionFrame)->MapTile {
    match compose_tile( profile.default_map_png(), frame) {
        Ok(image) => MapTile { image, origin: TileOrigin::Default },
        Err(e) => {
            error!("bundled map for {profile} is corrupted: {e}");
            MapTile { image: RgbImage::from_pixel( frame.width_px(), frame.height_px(), BLANK_COLOR), origin: TileOrigin::Blank }
        }
    }
}

/// builds the session background. Never fails, fetch errors of any kind end up in the bundled tile
pub struct MapTileBuilder<C> where C: HttpGet {
    client: C,
    config: StaticMapConfig,
    profile: HardwareProfile,
}

impl<C> MapTileBuilder<C> where C: HttpGet {
    pub fn new (client: C, config: StaticMapConfig, profile: HardwareProfile)->Self {
        MapTileBuilder { client, config, profile }
    }

    pub fn profile (&self)->HardwareProfile { self.profile }

    pub fn build (&self, frame: &ProjectionFrame, use_default: bool)->MapTile {
        if use_default {
            return default_tile( self.profile, frame)
        }

        match self.fetch( frame) {
            Ok(tile) => {
                info!("using fetched map tile for {frame}");
                tile
            }
            Err(e) => {
                warn!("falling back to default map tile: {e}");
                default_tile( self.profile, frame)
            }
        }
    }

    /// the fallible part of [`Self::build`]
    pub fn fetch (&self, frame: &ProjectionFrame)->Result<MapTile> {
        let encoded = fetch_static_map( &self.client, &self.config, frame)?;
        let image = compose_tile( &encoded, frame)?;
        Ok( MapTile { image, origin: TileOrigin::Fetched })
    }
}
