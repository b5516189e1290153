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

//! repair of missing altitudes within a flight run

use tracing::debug;
use crate::{FlightRun, PositionReport, Rejection, StageResult};

/// fraction of present (non-missing, non-NaN) altitudes. 0.0 for empty input
pub fn presence_ratio (alts: &[Option<f64>])->f64 {
    if alts.is_empty() {
        0.0
    } else {
        let n_present = alts.iter().filter( |a| a.is_some_and( |a| !a.is_nan())).count();
        n_present as f64 / alts.len() as f64
    }
}

/// fill every gap of missing values that is bounded on both sides by linear interpolation.
/// Leading and trailing gaps are left as they are
pub fn interpolate_gaps (alts: &mut [Option<f64>]) {
    let mut prev: Option<usize> = None; // index of last present value

    for i in 0..alts.len() {
        if let Some(v1) = alts[i].filter( |a| !a.is_nan()) {
            if let Some(j) = prev {
                let gap = i - j - 1;
                if gap > 0 {
                    if let Some(v0) = alts[j] {
                        let step = (v1 - v0) / (gap + 1) as f64;
                        for k in 1..=gap {
                            alts[j+k] = Some( v0 + step * k as f64);
                        }
                    }
                }
            }
            prev = Some(i);
        } else {
            alts[i] = None;
        }
    }
}

/// drop runs with too many missing altitudes, trim reports before the first and after the last present
/// altitude, and interpolate the remaining gaps
pub fn impute_altitudes<R: PositionReport> (run: FlightRun<R>, impute_tolerance: f64)->StageResult<R> {
    let alts = run.altitudes();

    let ratio = presence_ratio( &alts);
    if run.is_empty() || ratio < impute_tolerance {
        debug!("dropping {run}: presence ratio {ratio:.2} below {impute_tolerance}");
        return Err( Rejection::InsufficientAltitude { ratio } )
    }

    if ratio == 1.0 {
        return Ok(run) // nothing to repair
    }

    let (Some(first), Some(last)) = (alts.iter().position( |a| a.is_some()), alts.iter().rposition( |a| a.is_some())) else {
        debug!("dropping {run}: no altitude at all");
        return Err( Rejection::InsufficientAltitude { ratio } )
    };

    let mut alts = alts[first..=last].to_vec();
    interpolate_gaps( &mut alts);

    // all interior gaps are bounded now, hence this can't fail
    let alts: Vec<f64> = alts.into_iter().flatten().collect();

    Ok( run.retain_range( first..=last).with_altitudes( &alts))
}
