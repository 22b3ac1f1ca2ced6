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

use thiserror::Error;
use skyportal_common::{config::ConfigError, net::NetError};
use skyportal_adsb::errors::SourceError;
use skyportal_map::errors::MapError;

pub type Result<T> = std::result::Result<T,SkyPortalError>;

#[derive(Error,Debug)]
pub enum SkyPortalError {

    #[error("config error {0}")]
    ConfigError(String),

    #[error("config load error {0}")]
    ConfigLoadError( #[from] ConfigError),

    #[error("ron error {0}")]
    RonError( #[from] ron::error::SpannedError),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("artifact store error {0}")]
    StoreError(String),

    #[error("map error {0}")]
    MapError( #[from] MapError),

    #[error("net error {0}")]
    NetError( #[from] NetError),

    #[error("source error {0}")]
    SourceError( #[from] SourceError),
}

macro_rules! config_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::SkyPortalError::ConfigError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use config_error;
