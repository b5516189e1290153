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

//! splitting the reports of one aircraft into flight runs at time gaps

use std::time::Duration;
use chrono::{DateTime,TimeDelta,Utc};
use crate::{FlightRun, PositionReport, RunIndex, errors::{OdinTrajectoryError,Result}};

/// segmentation state of a single report
#[derive(Debug,Clone,Copy,PartialEq)]
pub enum RunLabel {
    Unassigned,
    Assigned(RunIndex)
}

/// indices of the reports that start a new run, i.e. that follow their predecessor
/// by more than `split_threshold`. The first report is never a split point
pub fn split_points (timestamps: &[DateTime<Utc>], split_threshold: Duration)->Vec<usize> {
    let max_gap = TimeDelta::from_std( split_threshold).unwrap_or( TimeDelta::MAX);

    timestamps.windows(2).enumerate()
        .filter( |(_,w)| (w[1] - w[0]) > max_gap)
        .map( |(i,_)| i+1)
        .collect()
}

/// label chronologically sorted timestamps with their run index.
/// Reports before the first split point are run 0, reports from split point k-1 up to
/// split point k are run k, and reports from the last split point on are run `n_splits`
pub fn label_runs (timestamps: &[DateTime<Utc>], split_threshold: Duration)->Vec<RunLabel> {
    let n = timestamps.len();
    let splits = split_points( timestamps, split_threshold);
    let mut labels = vec![RunLabel::Unassigned; n];

    if splits.is_empty() {
        labels.fill( RunLabel::Assigned( RunIndex::new(0)));

    } else {
        let n_splits = splits.len();
        labels[..splits[0]].fill( RunLabel::Assigned( RunIndex::new(0)));
        labels[splits[n_splits-1]..].fill( RunLabel::Assigned( RunIndex::new( n_splits as u32)));

        for (k, w) in splits.windows(2).enumerate() {
            labels[w[0]..w[1]].fill( RunLabel::Assigned( RunIndex::new( (k+1) as u32)));
        }
    }

    labels
}

/// turn labels into run indices, failing if any label is still unassigned
pub fn into_run_indices (icao24: &str, labels: Vec<RunLabel>)->Result<Vec<RunIndex>> {
    let count = labels.iter().filter( |l| **l == RunLabel::Unassigned).count();
    if count > 0 {
        return Err( OdinTrajectoryError::UnlabelledReports { icao24: icao24.to_string(), count })
    }

    Ok( labels.into_iter().filter_map( |l| if let RunLabel::Assigned(idx) = l { Some(idx) } else { None }).collect() )
}

/// sort the reports of one aircraft and split them into flight runs.
/// Returns an error if any report could not be assigned to a run, which indicates a logic error
pub fn segment_reports<R: PositionReport> (icao24: &str, mut reports: Vec<R>, split_threshold: Duration)->Result<Vec<FlightRun<R>>> {
    if reports.is_empty() {
        return Ok( Vec::new())
    }

    reports.sort_by_key( |r| r.timestamp()); // stable, keeps the input order of duplicates
    let timestamps: Vec<DateTime<Utc>> = reports.iter().map( |r| r.timestamp()).collect();

    let labels = into_run_indices( icao24, label_runs( &timestamps, split_threshold))?;

    let mut runs: Vec<FlightRun<R>> = Vec::new();
    let mut current: Vec<R> = Vec::new();
    let mut current_idx = labels[0];

    for (r, idx) in reports.into_iter().zip( labels.into_iter()) {
        if idx != current_idx {
            runs.push( FlightRun::new( icao24, current_idx, std::mem::take(&mut current)));
            current_idx = idx;
        }
        current.push(r);
    }
    runs.push( FlightRun::new( icao24, current_idx, current));

    Ok(runs)
}
