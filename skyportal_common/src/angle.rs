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

//! normalized angle types. Values are stored in degrees and normalized on construction

use std::{fmt, marker::PhantomData, cmp};
use serde::ser::{Serialize as SerializeTrait, Serializer};
use serde::de::{self, Deserialize as DeserializeTrait, Deserializer, Visitor};

#[inline]
pub fn normalize_90 (d:f64) -> f64 {
    let x = d % 360.0;

    if x < -90.0 { -180.0 - x }
    else if x > 90.0 { 180.0 - x }
    else { x }
}

#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

#[inline]
pub fn normalize_360 (d: f64) -> f64 {
    let x = d % 360.0;
    if x < 0.0 { 360.0 + x } else { x }
}

pub trait AngleKind {
    const NAME: &'static str;
    const MIN: f64;
    const MAX: f64;
    fn normalize(v: f64)->f64;
}

#[derive(Debug,Clone,Copy)]
pub struct LatitudeKind {}
impl AngleKind for LatitudeKind {
    const NAME: &'static str = "Latitude";
    const MIN: f64 = -90.0;
    const MAX: f64 = 90.0;
    fn normalize(v: f64) -> f64 { normalize_90(v) }
}

#[derive(Debug,Clone,Copy)]
pub struct LongitudeKind {}
impl AngleKind for LongitudeKind {
    const NAME: &'static str = "Longitude";
    const MIN: f64 = -180.0;
    const MAX: f64 = 180.0;
    fn normalize(v: f64) -> f64 { normalize_180(v) }
}

#[derive(Debug,Clone,Copy)]
pub struct FullCircleKind {}
impl AngleKind for FullCircleKind {
    const NAME: &'static str = "Angle360";
    const MIN: f64 = 0.0;
    const MAX: f64 = 360.0;
    fn normalize(v: f64) -> f64 { normalize_360(v) }
}

#[derive(Copy, Clone)]
pub struct NormalizedAngle<K> where K: AngleKind {
    value: f64,
    kind: PhantomData<K>,
}

impl<K> NormalizedAngle<K> where K: AngleKind {
    #[inline]
    pub fn from_degrees(deg: f64) -> Self {
        NormalizedAngle { value: K::normalize(deg), kind: PhantomData }
    }

    /// checked ctor for values that come from external sources - this does not silently wrap
    pub fn try_from_degrees(deg: f64) -> Option<Self> {
        if deg.is_finite() && deg >= K::MIN && deg <= K::MAX { Some( Self::from_degrees(deg)) } else { None }
    }

    #[inline] pub fn degrees(&self)->f64 { self.value }
}

impl NormalizedAngle<FullCircleKind> {
    /// index of the `resolution_deg` wide sector this angle falls into (0 is [0,resolution))
    pub fn sector (&self, resolution_deg: f64)->usize {
        let n_sectors = (360.0 / resolution_deg).ceil() as usize;
        let idx = (self.value / resolution_deg).floor() as usize;
        if n_sectors > 0 { idx % n_sectors } else { 0 }
    }
}

impl <K> From<NormalizedAngle<K>> for f64 where K: AngleKind {
    fn from(a: NormalizedAngle<K>) -> Self { a.value }
}

impl<K> fmt::Display for NormalizedAngle<K> where K: AngleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}°", self.value) }
}

impl<K> fmt::Debug for NormalizedAngle<K> where K: AngleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}({})", K::NAME, self.value) }
}

impl<K> cmp::PartialOrd for NormalizedAngle<K> where K: AngleKind {
    fn partial_cmp(&self,other:&Self) -> Option<cmp::Ordering> { self.value.partial_cmp(&other.value) }
}

impl<K> cmp::PartialEq for NormalizedAngle<K> where K: AngleKind {
    fn eq(&self, other: &Self) -> bool { self.value == other.value }
}

pub type Longitude = NormalizedAngle<LongitudeKind>;
pub type Latitude = NormalizedAngle<LatitudeKind>;
pub type Angle360 = NormalizedAngle<FullCircleKind>;

//--- serde support

impl<'de,K> DeserializeTrait<'de> for NormalizedAngle<K> where K: AngleKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        struct AngleVisitor<K>(PhantomData<K>);

        impl<'de,K> Visitor<'de> for AngleVisitor<K> where K: AngleKind {
            type Value = NormalizedAngle<K>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!( formatter, "floating point degrees between [{}..{}]", K::MIN, K::MAX)
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> where E: de::Error {
                NormalizedAngle::try_from_degrees(value).ok_or_else( || E::custom(format!("degrees out of range: {}", value)))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> where E: de::Error { self.visit_f64( value as f64) }
            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> where E: de::Error { self.visit_f64( value as f64) }
        }

        deserializer.deserialize_f64( AngleVisitor(PhantomData))
    }
}

impl<K> SerializeTrait for NormalizedAngle<K> where K: AngleKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_f64(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize () {
        assert_eq!( -160.0, Longitude::from_degrees(200.0).degrees());
        assert_eq!( 350.0, Angle360::from_degrees(-10.0).degrees());
        assert!( Latitude::try_from_degrees(91.0).is_none());
        assert!( Longitude::try_from_degrees(f64::NAN).is_none());
    }

    #[test]
    fn test_sector () {
        assert_eq!( 0, Angle360::from_degrees(29.9).sector(30.0));
        assert_eq!( 1, Angle360::from_degrees(30.0).sector(30.0));
        assert_eq!( 11, Angle360::from_degrees(359.9).sector(30.0));
    }
}
