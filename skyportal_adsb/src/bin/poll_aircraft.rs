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

use std::time::Duration;
use anyhow::Result;
use clap::Parser;
use skyportal_common::{config::load_config_from, net::BlockingHttpClient};
use skyportal_adsb::{create_source, PollQuery, SourceConfig, AircraftFilter};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "poll an aircraft state source once and print the normalized states")]
pub struct Args {
    /// RON file with the source config (e.g. `AdsbLol()`), default is ADSB.lol
    #[arg(short,long)]
    pub source: Option<String>,

    #[arg(long, default_value_t = 42.41, allow_hyphen_values = true)]
    pub lat: f64,

    #[arg(long, default_value_t = -71.17, allow_hyphen_values = true)]
    pub lon: f64,

    /// query radius in statute miles
    #[arg(short,long, default_value_t = 10.0)]
    pub radius: f64,

    /// request timeout in seconds
    #[arg(short,long, default_value_t = 20)]
    pub timeout: u64,

    /// only print aircraft that would be displayed
    #[arg(short,long)]
    pub filtered: bool,
}

fn main()->Result<()> {
    skyportal_common::init_tracing();
    let args = Args::parse();

    let config: SourceConfig = match &args.source {
        Some(path) => load_config_from( path)?,
        None => SourceConfig::AdsbLol { base_url: None }
    };
    let client = BlockingHttpClient::new( Duration::from_secs( args.timeout))?;
    let source = create_source( &config, client);

    let snapshot = source.poll( &PollQuery::from_degrees_and_miles( args.lat, args.lon, args.radius))?;
    let filter = AircraftFilter::default();

    println!("------- {} aircraft from {} at {}", snapshot.len(), config, snapshot.source_time);
    for ac in &snapshot.aircraft {
        if !args.filtered || filter.accepts( ac) {
            println!("{ac}");
        }
    }

    Ok(())
}
