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

/// the raw touchscreen driver: last touch coordinate, if the screen is currently touched
pub trait TouchSource {
    fn touch_point (&mut self)->Option<(i32,i32)>;
}

impl<T> TouchSource for Box<T> where T: TouchSource + ?Sized {
    fn touch_point (&mut self)->Option<(i32,i32)> { (**self).touch_point() }
}

/// for headless operation
pub struct NoTouch;

impl TouchSource for NoTouch {
    fn touch_point (&mut self)->Option<(i32,i32)> { None }
}

/// reports a touch only once per press, further samples are suppressed until the touch is released.
/// Since we sample slowly a few duplicates might still get through
pub struct DebouncedTouch<T> where T: TouchSource {
    source: T,
    is_pressed: bool,
}

impl<T> DebouncedTouch<T> where T: TouchSource {
    pub fn new (source: T)->Self { DebouncedTouch { source, is_pressed: false } }

    pub fn is_pressed (&self)->bool { self.is_pressed }

    pub fn touch_point (&mut self)->Option<(i32,i32)> {
        match self.source.touch_point() {
            Some(p) if !self.is_pressed => {
                self.is_pressed = true;
                Some(p)
            }
            Some(_) => None,
            None => {
                self.is_pressed = false;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Samples(VecDeque<Option<(i32,i32)>>);

    impl TouchSource for Samples {
        fn touch_point (&mut self)->Option<(i32,i32)> { self.0.pop_front().flatten() }
    }

    #[test]
    fn test_press_edge() {
        let samples = vec![ None, Some((10,10)), Some((11,10)), Some((12,11)), None, Some((50,60)), None ];
        let mut touch = DebouncedTouch::new( Samples( samples.into()));

        let reported: Vec<Option<(i32,i32)>> = (0..7).map( |_| touch.touch_point()).collect();
        assert_eq!( reported, vec![ None, Some((10,10)), None, None, None, Some((50,60)), None ]);
        assert!( !touch.is_pressed());
    }
}
