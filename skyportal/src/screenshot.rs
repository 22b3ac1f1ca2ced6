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

//! bounded FIFO storage for screenshot artifacts

use std::{collections::VecDeque, fs, path::{Path,PathBuf}};
use chrono::{DateTime,Utc};
use skyportal_common::{
    collections::BoundedFifo,
    datetime::utc_now,
    fs::{ensure_dir, filename, matching_files, remove_file_if_exists, write_file_atomic},
    debug, info, warn,
};
use crate::errors::{config_error, Result, SkyPortalError};

const PREFIX: &str = "screenshot_";
const EXTENSION: &str = ".bmp";

#[derive(Debug,Clone,PartialEq,Eq)]
pub struct ScreenshotRecord {
    pub seq: u64,
    pub path: PathBuf,
    pub created: DateTime<Utc>,
}

/// keeps at most `capacity` artifacts, evicting the oldest (by creation order) first. Evicted records
/// lose their files within the same `add` call
pub struct RollingArtifactStore {
    dir: PathBuf,
    capacity: usize,
    records: VecDeque<ScreenshotRecord>,
    next_seq: u64,
}

impl RollingArtifactStore {
    /// open (or create) the store in `dir`, picking up artifacts from previous sessions
    pub fn open (dir: impl AsRef<Path>, capacity: usize)->Result<Self> {
        if capacity < 1 {
            return Err( config_error!("artifact store capacity has to be at least 1"))
        }
        let dir = dir.as_ref().to_path_buf();
        ensure_dir( &dir)?;

        // set-aside victims and temp files of interrupted adds
        for path in matching_files( &dir, is_leftover)? {
            remove_file_if_exists( &path)?;
            debug!("removed leftover {:?}", path);
        }

        let mut restored: Vec<ScreenshotRecord> = matching_files( &dir, |name| parse_seq(name).is_some())?
            .into_iter()
            .filter_map( |path| {
                let seq = filename( &path).and_then( parse_seq)?;
                let created = fs::metadata( &path).and_then( |md| md.modified()).map( DateTime::<Utc>::from).unwrap_or_else( |_| utc_now());
                Some( ScreenshotRecord { seq, path, created })
            })
            .collect();
        restored.sort_by_key( |r| r.seq);

        let next_seq = restored.last().map( |r| r.seq + 1).unwrap_or(1);
        let mut records: VecDeque<ScreenshotRecord> = restored.into();
        for r in records.evict_to( capacity) {
            remove_file_if_exists( &r.path)?;
            debug!("evicted stale screenshot {:?}", r.path);
        }

        Ok( RollingArtifactStore { dir, capacity, records, next_seq })
    }

    pub fn dir (&self)->&Path { &self.dir }
    pub fn capacity (&self)->usize { self.capacity }
    pub fn len (&self)->usize { self.records.len() }
    pub fn is_empty (&self)->bool { self.records.is_empty() }

    /// oldest first
    pub fn records (&self)->impl Iterator<Item=&ScreenshotRecord> { self.records.iter() }

    /// store a new artifact and evict whatever exceeds the capacity. Either the new artifact is stored
    /// and all evicted artifacts are deleted, or nothing changes and an error is returned
    pub fn add (&mut self, artifact: &[u8])->Result<ScreenshotRecord> {
        let seq = self.next_seq;
        let path = self.dir.join( artifact_name( seq));
        write_file_atomic( &path, artifact)?;

        let n_evict = (self.records.len() + 1).saturating_sub( self.capacity);

        // move victims aside first so that we can roll back if any of them can't be removed
        let mut moved: Vec<(PathBuf,PathBuf)> = Vec::with_capacity( n_evict);
        for r in self.records.iter().take( n_evict) {
            let aside = aside_path( &r.path);
            match fs::rename( &r.path, &aside) {
                Ok(()) => moved.push( (r.path.clone(), aside)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {} // already gone
                Err(e) => {
                    for (orig, aside) in moved.iter().rev() {
                        if let Err(e) = fs::rename( aside, orig) { warn!("failed to restore {:?}: {}", orig, e) }
                    }
                    if let Err(e) = remove_file_if_exists( &path) { warn!("failed to remove {:?}: {}", path, e) }
                    return Err( SkyPortalError::StoreError( format!("failed to evict {:?}: {}", r.path, e)))
                }
            }
        }

        // commit
        self.next_seq += 1;
        let record = ScreenshotRecord { seq, path, created: utc_now() };
        for r in self.records.push_evicting( record.clone(), self.capacity) {
            debug!("evicted screenshot {:?}", r.path);
        }
        for (_, aside) in &moved {
            if let Err(e) = remove_file_if_exists( aside) { warn!("leftover evicted screenshot {:?}: {}", aside, e) }
        }

        info!("saved screenshot {:?}", record.path);
        Ok( record)
    }
}

fn artifact_name (seq: u64)->String { format!("{PREFIX}{seq:06}{EXTENSION}") }

fn aside_path (path: &Path)->PathBuf {
    let name = filename( &path).unwrap_or("artifact");
    path.with_file_name( format!(".{name}.evict"))
}

fn is_leftover (name: &str)->bool {
    name.strip_prefix('.')
        .and_then( |n| n.strip_suffix(".evict").or_else( || n.strip_suffix(".tmp")))
        .is_some_and( |n| parse_seq(n).is_some())
}

fn parse_seq (name: &str)->Option<u64> {
    let digits = name.strip_prefix( PREFIX)?.strip_suffix( EXTENSION)?;
    if !digits.is_empty() && digits.bytes().all( |b| b.is_ascii_digit()) { digits.parse().ok() } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!( artifact_name(7), "screenshot_000007.bmp");
        assert_eq!( parse_seq("screenshot_000007.bmp"), Some(7));
        assert_eq!( parse_seq("screenshot_1234567.bmp"), Some(1234567));
        assert_eq!( parse_seq(".screenshot_000007.bmp.evict"), None);
        assert_eq!( parse_seq("screenshot_.bmp"), None);
        assert_eq!( parse_seq("screenshot_00x007.bmp"), None);

        assert!( is_leftover(".screenshot_000007.bmp.evict"));
        assert!( is_leftover(".screenshot_000007.bmp.tmp"));
        assert!( !is_leftover("screenshot_000007.bmp"));
        assert!( !is_leftover(".notes.txt.tmp"));
    }
}
