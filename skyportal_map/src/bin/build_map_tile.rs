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

use std::{path::PathBuf, time::Duration};
use anyhow::{anyhow, Result};
use clap::Parser;
use skyportal_common::{fs::ensure_writable_dir, net::BlockingHttpClient, info};
use skyportal_map::{HardwareProfile, MapTileBuilder, ProjectionFrame, StaticMapConfig};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "generate the default background map tile(s) for SkyPortal hardware profiles.\nWrites default_map_<target>.bmp for the device and default_map_<target>.png for skyportal_map/assets/")]
pub struct Args {
    /// hardware profiles to generate tiles for (pyportal|feather), all if none given
    pub targets: Vec<HardwareProfile>,

    #[arg(long, default_value_t = 42.41, allow_hyphen_values = true)]
    pub center_lat: f64,

    #[arg(long, default_value_t = -71.17, allow_hyphen_values = true)]
    pub center_lon: f64,

    /// east-west extent of the map in statute miles
    #[arg(long, default_value_t = 15.0)]
    pub grid_width: f64,

    /// Geoapify API key, defaults to the GEOAPIFY_KEY environment variable
    #[arg(long)]
    pub api_key: Option<String>,

    /// output directory
    #[arg(short, long, default_value = "./tmp")]
    pub out: PathBuf,
}

fn main()->Result<()> {
    skyportal_common::init_tracing();
    let args = Args::parse();

    let api_key = args.api_key.clone()
        .or_else( || std::env::var("GEOAPIFY_KEY").ok())
        .ok_or_else( || anyhow!("no Geoapify API key (use --api-key or set GEOAPIFY_KEY)"))?;
    let targets = if args.targets.is_empty() { HardwareProfile::ALL.to_vec() } else { args.targets.clone() };

    ensure_writable_dir( &args.out)?;
    let client = BlockingHttpClient::new( Duration::from_secs(30))?;

    for profile in targets {
        let frame = ProjectionFrame::from_degrees_and_miles( args.center_lat, args.center_lon, args.grid_width, profile)?;
        let builder = MapTileBuilder::new( &client, StaticMapConfig::with_api_key( api_key.as_str()), profile);

        // no fallback here, a failed fetch has to fail the tool
        let tile = builder.fetch( &frame)?;

        // BMP for the device, PNG as a drop-in replacement for the bundled assets/ tile
        let bmp_path = args.out.join( format!("default_map_{}.bmp", profile.name()));
        tile.save_bmp( &bmp_path)?;
        let png_path = args.out.join( format!("default_map_{}.png", profile.name()));
        tile.save_png( &png_path)?;

        info!("map tile for {frame} saved to {bmp_path:?} and {png_path:?}");
        println!("{}", bmp_path.display());
        println!("{}", png_path.display());
    }

    Ok(())
}
