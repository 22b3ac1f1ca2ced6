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

//! RON based configuration loading. Configs are looked up (first match wins) in
//!   - `$SKYPORTAL_CONFIGS/<filename>`
//!   - `./configs/<filename>`
//!   - `$HOME/.skyportal/configs/<filename>`

use std::{env, fs, path::{Path,PathBuf}};
use lazy_static::lazy_static;
use regex::{Captures,Regex};
use serde::de::DeserializeOwned;

use crate::define_error;

pub const CONFIGS: &str = "configs";
pub const CONFIG_DIR_ENV: &str = "SKYPORTAL_CONFIGS";

define_error!{ pub ConfigError =
    Io(#[from] std::io::Error) : "IO error: {0}",
    Ron(#[from] ron::error::SpannedError) : "RON error: {0}",
    ConfigNotFound(String) : "config not found: {0}"
}

pub type Result<T> = std::result::Result<T, ConfigError>;

pub fn find_config_file (filename: &str)->Option<PathBuf> {
    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        let path = Path::new(&dir).join(filename);
        if path.is_file() { return Some(path) }
    }

    let path = Path::new(CONFIGS).join(filename);
    if path.is_file() { return Some(path) }

    if let Ok(usr_home) = env::var("HOME") {
        let path = Path::new(&usr_home).join(".skyportal").join(CONFIGS).join(filename);
        if path.is_file() { return Some(path) }
    }

    None
}

/// load config using the lookup mechanism described in the module doc
pub fn load_config<C> (filename: &str) -> Result<C> where C: DeserializeOwned {
    match find_config_file( filename) {
        Some(path) => load_config_from( &path),
        None => Err( ConfigError::ConfigNotFound(filename.to_string()))
    }
}

pub fn load_config_from<C> (path: impl AsRef<Path>) -> Result<C> where C: DeserializeOwned {
    let data = fs::read_to_string( path.as_ref())?;
    Ok( ron::from_str( &data)? )
}

lazy_static! {
    static ref ENV_VAR_RE: Regex = Regex::new( r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
}

/// expand `${VAR}` references in config strings (e.g. paths or keys). Undefined variables
/// are replaced with an empty string, a bare `$` is kept
pub fn env_expand (s: &str)->String {
    ENV_VAR_RE.replace_all( s, |caps: &Captures| {
        env::var( &caps[1]).unwrap_or_default()
    }).into_owned()
}
