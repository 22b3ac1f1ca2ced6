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

use std::fs;
use skyportal::{RollingArtifactStore, errors::SkyPortalError};

fn artifact (n: u8)->Vec<u8> { vec![n; 16] }

fn seqs (store: &RollingArtifactStore)->Vec<u64> { store.records().map( |r| r.seq).collect() }

fn files_in (dir: &std::path::Path)->Vec<String> {
    let mut names: Vec<String> = fs::read_dir( dir).unwrap()
        .map( |e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn test_fifo_eviction() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RollingArtifactStore::open( dir.path(), 3).unwrap();
    assert!( store.is_empty());

    for i in 1..=5 {
        let rec = store.add( &artifact(i)).unwrap();
        assert_eq!( rec.seq, i as u64);
        assert_eq!( fs::read( &rec.path).unwrap(), artifact(i));
        assert!( store.len() <= 3);
    }

    assert_eq!( seqs( &store), vec![3,4,5]);
    assert_eq!( files_in( dir.path()), vec![
        "screenshot_000003.bmp".to_string(), "screenshot_000004.bmp".to_string(), "screenshot_000005.bmp".to_string()
    ]);
}

#[test]
fn test_oldest_goes_first() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RollingArtifactStore::open( dir.path(), 2).unwrap();

    store.add( &artifact(1)).unwrap();
    store.add( &artifact(2)).unwrap();
    store.add( &artifact(3)).unwrap();
    assert!( !dir.path().join("screenshot_000001.bmp").exists());
    assert!( dir.path().join("screenshot_000002.bmp").exists());

    store.add( &artifact(4)).unwrap();
    assert!( !dir.path().join("screenshot_000002.bmp").exists());
    assert_eq!( seqs( &store), vec![3,4]);
}

#[test]
fn test_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = RollingArtifactStore::open( dir.path(), 5).unwrap();
        for i in 1..=4 { store.add( &artifact(i)).unwrap(); }
    }
    fs::write( dir.path().join("notes.txt"), "unrelated").unwrap();

    let mut store = RollingArtifactStore::open( dir.path(), 5).unwrap();
    assert_eq!( seqs( &store), vec![1,2,3,4]);

    let rec = store.add( &artifact(5)).unwrap();
    assert_eq!( rec.seq, 5);

    // smaller capacity evicts the oldest on open
    drop( store);
    let store = RollingArtifactStore::open( dir.path(), 2).unwrap();
    assert_eq!( seqs( &store), vec![4,5]);
    assert_eq!( files_in( dir.path()), vec![
        "notes.txt".to_string(), "screenshot_000004.bmp".to_string(), "screenshot_000005.bmp".to_string()
    ]);
}

#[test]
fn test_leftovers_removed_on_open() {
    let dir = tempfile::tempdir().unwrap();
    fs::write( dir.path().join("screenshot_000001.bmp"), artifact(1)).unwrap();
    fs::write( dir.path().join(".screenshot_000099.bmp.evict"), artifact(99)).unwrap();
    fs::write( dir.path().join(".screenshot_000002.bmp.tmp"), artifact(2)).unwrap();
    fs::write( dir.path().join(".notes.txt.tmp"), "unrelated").unwrap();

    let mut store = RollingArtifactStore::open( dir.path(), 1).unwrap();
    assert_eq!( seqs( &store), vec![1]);
    store.add( &artifact(2)).unwrap();
    store.add( &artifact(3)).unwrap();

    assert_eq!( files_in( dir.path()), vec![
        ".notes.txt.tmp".to_string(), "screenshot_000003.bmp".to_string()
    ]);
}

#[test]
fn test_missing_victim() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RollingArtifactStore::open( dir.path(), 1).unwrap();

    let first = store.add( &artifact(1)).unwrap();
    fs::remove_file( &first.path).unwrap();

    let second = store.add( &artifact(2)).unwrap();
    assert_eq!( seqs( &store), vec![2]);
    assert!( second.path.is_file());
}

#[test]
fn test_eviction_rollback() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RollingArtifactStore::open( dir.path(), 2).unwrap();
    store.add( &artifact(1)).unwrap();
    store.add( &artifact(2)).unwrap();

    // a directory in the way of moving the victim aside makes the eviction fail
    let obstacle = dir.path().join(".screenshot_000001.bmp.evict");
    fs::create_dir( &obstacle).unwrap();
    fs::write( obstacle.join("x"), "x").unwrap();

    let res = store.add( &artifact(3));
    assert!( matches!( res, Err(SkyPortalError::StoreError(_))));

    // nothing changed
    assert_eq!( seqs( &store), vec![1,2]);
    assert_eq!( fs::read( dir.path().join("screenshot_000001.bmp")).unwrap(), artifact(1));
    assert!( dir.path().join("screenshot_000002.bmp").is_file());
    assert!( !dir.path().join("screenshot_000003.bmp").exists());

    fs::remove_dir_all( &obstacle).unwrap();
    let rec = store.add( &artifact(3)).unwrap();
    assert_eq!( rec.seq, 3);
    assert_eq!( seqs( &store), vec![2,3]);
    assert!( !dir.path().join("screenshot_000001.bmp").exists());
    assert!( !obstacle.exists());
}

#[test]
fn test_zero_capacity() {
    let dir = tempfile::tempdir().unwrap();
    assert!( RollingArtifactStore::open( dir.path(), 0).is_err());
}
