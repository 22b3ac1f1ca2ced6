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

use std::collections::VecDeque;

/// a VecDeque used as a bounded FIFO. The bound is explicit (not the VecDeque capacity, which
/// can grow beyond what was requested) so that eviction is deterministic
pub trait BoundedFifo<T> {
    /// push `t` to the back and return all front elements that had to be evicted to
    /// keep at most `max_len` elements, oldest first
    fn push_evicting (&mut self, t: T, max_len: usize)->Vec<T>;

    /// drop front elements until at most `max_len` remain, returning them oldest first
    fn evict_to (&mut self, max_len: usize)->Vec<T>;
}

impl<T> BoundedFifo<T> for VecDeque<T> {
    fn push_evicting (&mut self, t: T, max_len: usize)->Vec<T> {
        self.push_back(t);
        self.evict_to( max_len)
    }

    fn evict_to (&mut self, max_len: usize)->Vec<T> {
        let n = self.len().saturating_sub( max_len);
        self.drain(..n).collect()
    }
}

/// index of the first element with the smallest key. Ties resolve to the element that comes
/// first in iteration order, NaN keys are never selected
pub fn first_min_by_key<T,I,F> (it: I, mut key: F)->Option<(usize,f64)>
    where I: IntoIterator<Item=T>, F: FnMut(&T)->f64
{
    let mut best: Option<(usize,f64)> = None;
    for (i,e) in it.into_iter().enumerate() {
        let k = key(&e);
        match best {
            Some((_,kb)) if !(k < kb) => {}
            _ if k.is_nan() => {}
            _ => best = Some((i,k))
        }
    }
    best
}
