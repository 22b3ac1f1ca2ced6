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

use std::time::Duration;
use anyhow::Result;
use clap::Parser;
use skyportal_common::{net::BlockingHttpClient, info};
use skyportal::{
    SkyPortal, SkyPortalConfig,
    render::LogRenderer,
    touch::NoTouch,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "headless SkyPortal flight tracker")]
pub struct Args {
    /// config file (looked up in $SKYPORTAL_CONFIGS, ./configs and ~/.skyportal/configs)
    #[arg(short, long, default_value = skyportal::config::CONFIG_FILE)]
    pub config: String,

    /// main loop tick in milliseconds
    #[arg(short, long, default_value_t = 200)]
    pub tick: u64,

    /// stop after this many loop iterations
    #[arg(short = 'n', long)]
    pub iterations: Option<u64>,
}

fn main()->Result<()> {
    skyportal_common::init_tracing();
    let args = Args::parse();

    let config = SkyPortalConfig::load_file( &args.config)?;
    let client = BlockingHttpClient::new( config.http_timeout)?;

    let mut skyportal = SkyPortal::new( &config, client, LogRenderer::new(), NoTouch)?;
    info!("initialization complete");

    skyportal.run( Duration::from_millis( args.tick), args.iterations);
    Ok(())
}
