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

use skyportal_common::collections::first_min_by_key;
use crate::render::RenderedPosition;

pub const DEFAULT_TOUCH_THRESHOLD_PX: f64 = 30.0;

/// resolves a touch point to the closest rendered aircraft within `max_px` (Euclidean pixel distance).
/// If several aircraft are equally close the first one in input order is returned. This ordering
/// is an implementation property callers should not build on
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct HitTester {
    pub max_px: f64,
}

impl Default for HitTester {
    fn default()->Self { HitTester { max_px: DEFAULT_TOUCH_THRESHOLD_PX } }
}

impl HitTester {
    pub fn new (max_px: f64)->Self { HitTester { max_px } }

    pub fn nearest<'a,I> (&self, touch_x: i32, touch_y: i32, positions: I)->Option<&'a RenderedPosition>
        where I: IntoIterator<Item=&'a RenderedPosition>
    {
        let candidates: Vec<&RenderedPosition> = positions.into_iter().collect();
        self.nearest_index( touch_x, touch_y, candidates.iter().copied()).map( |i| candidates[i])
    }

    /// input order index of the nearest position
    pub fn nearest_index<'a,I> (&self, touch_x: i32, touch_y: i32, positions: I)->Option<usize>
        where I: IntoIterator<Item=&'a RenderedPosition>
    {
        let (idx, dist) = first_min_by_key( positions, |p| distance( touch_x, touch_y, p.x, p.y))?;
        (dist <= self.max_px).then_some( idx)
    }
}

fn distance (x0: i32, y0: i32, x1: i32, y1: i32)->f64 {
    let dx = x1 as f64 - x0 as f64;
    let dy = y1 as f64 - y0 as f64;
    (dx*dx + dy*dy).sqrt()
}
