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
use skyportal_common::net::{HttpResponse, NetError};

pub type Result<T> = std::result::Result<T,SourceError>;

/// the acquisition error taxonomy. All variants are recoverable at the controller level,
/// which keeps the last good snapshot around
#[derive(Error,Debug,Clone,PartialEq)]
pub enum SourceError {

    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("source authentication failed: {0}")]
    SourceAuthError(String),

    #[error("source parse error: {0}")]
    SourceParseError(String),
}

impl SourceError {
    /// auth failures are configuration problems, not transient network blips
    pub fn is_config_problem (&self)->bool {
        matches!( self, SourceError::SourceAuthError(_))
    }
}

impl From<NetError> for SourceError {
    fn from (e: NetError)->Self { SourceError::SourceUnavailable( e.to_string()) }
}

impl From<serde_json::Error> for SourceError {
    fn from (e: serde_json::Error)->Self { SourceError::SourceParseError( e.to_string()) }
}

/// map a HTTP status into our taxonomy (the transport does not treat non-2xx as error)
pub fn check_status (provider: &str, response: &HttpResponse)->Result<()> {
    if response.is_success() {
        Ok(())
    } else if response.is_auth_failure() {
        Err( SourceError::SourceAuthError( format!("{provider} rejected credentials ({})", response.status)))
    } else {
        Err( SourceError::SourceUnavailable( format!("{provider} returned {}: {}", response.status, response.body_excerpt(80))))
    }
}

macro_rules! parse_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::SourceError::SourceParseError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use parse_error;
