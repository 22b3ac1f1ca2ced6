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

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Serialize,Deserialize,Serializer,Deserializer,de::Error as DeError};
use std::time::Duration;
use std::fmt;

#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord)]
pub struct EpochMillis(i64);

impl EpochMillis {
    pub fn new(millis:i64)->Self { EpochMillis(millis) }

    pub fn from_secs(secs: i64)->Self { EpochMillis(secs*1000) }

    /// provider timestamps are often fractional seconds
    pub fn from_secs_f64(secs: f64)->Self { EpochMillis( (secs * 1000.0).round() as i64) }

    pub fn millis(&self)->i64 { self.0 }

    pub fn to_utc(&self)->Option<DateTime<Utc>> { DateTime::<Utc>::from_timestamp_millis(self.0) }
}

impl fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_utc() {
            Some(dt) => write!(f, "{}", dt),
            None => write!(f, "EpochMillis({})", self.0)
        }
    }
}

/// this should be used wherever we might have to use a sim clock instead of the wall clock
#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

/// parse a "±HHMM" UTC offset (as reported by time services, e.g. "-0500" or "+0530").
/// The minutes carry the sign of the hours
pub fn parse_utc_offset (s: &str)->Option<FixedOffset> {
    let s = s.trim();
    if s.len() != 5 || !s.is_ascii() { return None }

    let (sign, digits) = match s.split_at(1) { ("+",d) => (1,d), ("-",d) => (-1,d), _ => return None };
    if !digits.bytes().all( |b| b.is_ascii_digit()) { return None }
    let hours: i32 = digits[0..2].parse().ok()?;
    let minutes: i32 = digits[2..4].parse().ok()?;
    if hours > 23 || minutes > 59 { return None }

    FixedOffset::east_opt( sign * (hours * 3600 + minutes * 60))
}

/// format epoch millis as local time for the given offset, falling back to UTC if there is none
pub fn format_local (t: EpochMillis, offset: Option<FixedOffset>)->String {
    let offset = offset.unwrap_or_else( || Utc.fix());
    match t.to_utc() {
        Some(dt) => dt.with_timezone(&offset).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "?".to_string()
    }
}

//--- support for serde

pub fn ser_duration_as_fractional_secs<S: Serializer> (dur: &Duration, s: S) -> Result<S::Ok, S::Error>  {
    s.serialize_f64( dur.as_secs_f64())
}

pub fn de_duration_from_fractional_secs <'a,D>(deserializer: D) -> Result<Duration,D::Error> where D: Deserializer<'a> {
    let secs: f64 = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(secs).map_err( |e| DeError::custom( format!("invalid duration {secs}: {e}")))
}
