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

//! removal of single sample altitude spikes and rejection of runs that still have implausible
//! altitude jumps afterwards. Thresholds are altitude differences between consecutive samples,
//! `min_thresh` being the (negative) descent limit and `max_thresh` the climb limit

use itertools::Itertools;
use tracing::debug;
use crate::{FlightRun, PositionReport, Rejection, StageResult};

/// consecutive differences `alts[i+1] - alts[i]`
pub fn altitude_diffs (alts: &[f64])->Vec<f64> {
    alts.iter().tuple_windows().map( |(a,b)| b - a).collect()
}

/// flatten spikes that are immediately reversed by the next step.
/// Only works on single sample excursions - longer ones are left alone since we can't tell what the
/// real altitude was
pub fn smooth_spikes (mut alts: Vec<f64>, min_thresh: f64, max_thresh: f64)->Vec<f64> {
    let diffs = altitude_diffs( &alts);

    for i in 1..diffs.len().saturating_sub(1) {
        let d = diffs[i];
        if d < min_thresh || d > max_thresh {
            if (d + diffs[i+1]).abs() < max_thresh { // next step takes us back to where we were
                alts[i+1] = alts[i];
            }
        }
    }

    alts
}

/// true if all consecutive differences are within the thresholds (plus tolerance).
/// Sequences with less than two values can't be checked and are never continuous
pub fn is_continuous (alts: &[f64], min_thresh: f64, max_thresh: f64, tolerance: f64)->bool {
    match diff_extent( alts) {
        Some((min_diff,max_diff)) => max_diff <= max_thresh + tolerance && min_diff >= min_thresh - tolerance,
        None => false
    }
}

fn diff_extent (alts: &[f64])->Option<(f64,f64)> {
    altitude_diffs( alts).into_iter().minmax().into_option()
}

/// smooth spikes and drop the run if it still has discontinuities. Accepted runs keep the smoothed altitudes
pub fn check_trajectory<R: PositionReport> (run: FlightRun<R>, min_thresh: f64, max_thresh: f64, tolerance: f64)->StageResult<R> {
    if run.len() < 2 {
        debug!("dropping {run}: too short to check continuity");
        return Err( Rejection::TooShort { len: run.len() } )
    }

    let Some(alts) = run.complete_altitudes() else {
        debug!("dropping {run}: missing altitudes");
        return Err( Rejection::Discontinuous { min_diff: f64::NAN, max_diff: f64::NAN } )
    };

    let alts = smooth_spikes( alts, min_thresh, max_thresh);

    if is_continuous( &alts, min_thresh, max_thresh, tolerance) {
        Ok( run.with_altitudes( &alts))
    } else {
        let (min_diff, max_diff) = diff_extent( &alts).unwrap_or( (f64::NAN, f64::NAN));
        debug!("dropping {run}: altitude diffs {min_diff:.1}..{max_diff:.1} exceed {min_thresh:.1}..{max_thresh:.1} ±{tolerance}");
        Err( Rejection::Discontinuous { min_diff, max_diff } )
    }
}
