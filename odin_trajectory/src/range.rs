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

use tracing::debug;
use crate::{FlightRun, PositionReport, Rejection, StageResult};

/// (min,max) of the present altitudes, None if there are none
pub fn altitude_extent (alts: &[Option<f64>])->Option<(f64,f64)> {
    alts.iter().flatten().fold( None, |acc, &a| match acc {
        Some((min,max)) => Some( (f64::min(min,a), f64::max(max,a)) ),
        None => Some( (a,a) )
    })
}

/// keep the run only if all its altitudes are strictly within (`min_alt_threshold`,`max_alt_threshold`).
/// This weeds out erroneously high reports and low altitude segments such as approaches
pub fn check_altitude_range<R: PositionReport> (run: FlightRun<R>, min_alt_threshold: f64, max_alt_threshold: f64)->StageResult<R> {
    match altitude_extent( &run.altitudes()) {
        Some((min_alt,max_alt)) if min_alt > min_alt_threshold && max_alt < max_alt_threshold => Ok(run),
        Some((min_alt,max_alt)) => {
            debug!("dropping {run}: altitude {min_alt:.0}..{max_alt:.0} outside of {min_alt_threshold}..{max_alt_threshold}");
            Err( Rejection::AltitudeOutOfRange { min_alt, max_alt } )
        }
        None => Err( Rejection::AltitudeOutOfRange { min_alt: f64::NAN, max_alt: f64::NAN } )
    }
}
