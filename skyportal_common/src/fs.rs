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

use std::fs::{self,File};
use std::io::{self,Write,ErrorKind};
use std::path::{Path,PathBuf};

use crate::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

pub fn filename<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_name().and_then(|ostr| ostr.to_str())
}

pub fn ensure_dir (path: impl AsRef<Path>)->io::Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// check if dir pathname exists and is writable, try to create dir otherwise
pub fn ensure_writable_dir (path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        let md = fs::metadata(&path)?;
        if md.permissions().readonly() {
            Err(io_error!(ErrorKind::PermissionDenied, "output_dir {:?} not writable", &path))
        } else {
            Ok(())
        }

    } else {
        fs::create_dir_all(path)
    }
}

/// write file contents so that readers never see a partially written file: data goes into a
/// sibling temp file that is renamed to `path` once it is flushed
pub fn write_file_atomic (path: impl AsRef<Path>, data: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let fname = filename(&path).ok_or_else(|| io_error!(ErrorKind::InvalidInput, "not a file path {:?}", path))?;
    let tmp_path = path.with_file_name( format!(".{}.tmp", fname));

    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(data)?;
        file.flush()?;
    }

    if let Err(e) = fs::rename( &tmp_path, path) {
        let _ = fs::remove_file( &tmp_path);
        return Err(e)
    }
    Ok(())
}

/// remove file, treating an already missing file as success. Returns true if a file was removed
pub fn remove_file_if_exists (path: impl AsRef<Path>) -> Result<bool> {
    match fs::remove_file( path.as_ref()) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e)
    }
}

/// regular files in `dir` whose name matches `pred`, in no particular order
pub fn matching_files<F> (dir: impl AsRef<Path>, pred: F) -> Result<Vec<PathBuf>> where F: Fn(&str)->bool {
    let mut list = Vec::new();
    for e in fs::read_dir( dir.as_ref())? {
        let path = e?.path();
        if path.is_file() {
            if let Some(fname) = filename(&path) {
                if pred(fname) { list.push( path.clone()) }
            }
        }
    }
    Ok(list)
}
