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

use chrono::FixedOffset;
use skyportal_common::datetime::format_local;
use skyportal_adsb::{StateSnapshot, controller::AcquisitionStatus};

/// the status label text after a poll
pub fn status_text (status: AcquisitionStatus, snapshot: Option<&StateSnapshot>, utc_offset: Option<FixedOffset>)->String {
    let time = snapshot.map( |s| format_local( s.source_time, utc_offset));

    match (status, time) {
        (AcquisitionStatus::Current, Some(t)) => t,
        (AcquisitionStatus::Stale, Some(t)) => format!("stale {t}"),
        (AcquisitionStatus::Misconfigured, _) => "config error".to_string(),
        _ => "no data".to_string()
    }
}
