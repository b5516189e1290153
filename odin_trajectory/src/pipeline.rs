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

//! grouping of report streams by aircraft and flight run, and the parallel per-group stage
//! chain. Groups never share data, hence the only sequential part is the final accumulation

use std::{collections::BTreeMap, fmt};
use rayon::prelude::*;
use tracing::{debug,error};

use crate::{
    FlightRun, PositionReport, Rejection, StageResult, TrajectoryConfig,
    errors::{OdinTrajectoryError,Result},
    segment::segment_reports, impute::impute_altitudes, range::check_altitude_range, smooth::check_trajectory
};

/// the result of running the stage chain on a single flight run
pub type RunOutcome<R> = StageResult<R>;

/// counters accumulated over a pipeline run
#[derive(Debug,Default,Clone,PartialEq)]
pub struct PipelineStats {
    pub n_reports: usize,
    pub n_aircraft: usize,
    pub n_runs: usize,
    pub n_accepted: usize,
    pub n_insufficient_altitude: usize,
    pub n_out_of_range: usize,
    pub n_too_short: usize,
    pub n_discontinuous: usize,
    pub n_failed_aircraft: usize,
}

impl PipelineStats {
    pub fn n_rejected (&self)->usize {
        self.n_insufficient_altitude + self.n_out_of_range + self.n_too_short + self.n_discontinuous
    }

    pub fn add_rejection (&mut self, rejection: &Rejection) {
        match rejection {
            Rejection::InsufficientAltitude{..} => self.n_insufficient_altitude += 1,
            Rejection::AltitudeOutOfRange{..} => self.n_out_of_range += 1,
            Rejection::TooShort{..} => self.n_too_short += 1,
            Rejection::Discontinuous{..} => self.n_discontinuous += 1,
        }
    }

    pub fn merge (&mut self, other: &PipelineStats) {
        self.n_reports += other.n_reports;
        self.n_aircraft += other.n_aircraft;
        self.n_runs += other.n_runs;
        self.n_accepted += other.n_accepted;
        self.n_insufficient_altitude += other.n_insufficient_altitude;
        self.n_out_of_range += other.n_out_of_range;
        self.n_too_short += other.n_too_short;
        self.n_discontinuous += other.n_discontinuous;
        self.n_failed_aircraft += other.n_failed_aircraft;
    }
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "reports: {}, aircraft: {}, runs: {}, accepted: {}, rejected: {} (altitude data: {}, range: {}, short: {}, discontinuous: {})",
            self.n_reports, self.n_aircraft, self.n_runs, self.n_accepted, self.n_rejected(),
            self.n_insufficient_altitude, self.n_out_of_range, self.n_too_short, self.n_discontinuous)?;
        if self.n_failed_aircraft > 0 {
            write!( f, ", failed aircraft: {}", self.n_failed_aircraft)?;
        }
        Ok(())
    }
}

/// what comes out of processing a batch of reports
#[derive(Debug)]
pub struct PipelineOutput<R> {
    pub accepted: Vec<FlightRun<R>>, // ordered by icao24, then run index
    pub stats: PipelineStats,
    pub failed: Vec<(String,OdinTrajectoryError)>, // aircraft we had to abort
}

pub struct TrajectoryPipeline {
    config: TrajectoryConfig
}

impl TrajectoryPipeline {
    pub fn new (config: TrajectoryConfig)->Self {
        TrajectoryPipeline { config }
    }

    pub fn config (&self)->&TrajectoryConfig { &self.config }

    /// impute -> range -> smooth/validate for a single flight run
    pub fn process_run<R: PositionReport> (&self, run: FlightRun<R>)->RunOutcome<R> {
        let cfg = &self.config;

        impute_altitudes( run, cfg.impute_tolerance)
            .and_then( |run| check_altitude_range( run, cfg.altitude_min, cfg.altitude_max))
            .and_then( |run| check_trajectory( run, cfg.invalid_min_threshold, cfg.invalid_max_threshold, cfg.invalid_tolerance))
    }

    /// segment the reports of one aircraft and process each resulting run. This only fails if segmentation
    /// could not assign all reports, in which case none of the aircraft's runs are processed
    pub fn process_aircraft<R> (&self, icao24: &str, reports: Vec<R>)->Result<Vec<RunOutcome<R>>> where R: PositionReport + Send {
        let runs = segment_reports( icao24, reports, self.config.split_threshold)?;
        Ok( runs.into_par_iter().map( |run| self.process_run(run)).collect() )
    }

    /// process reports of any number of aircraft, in any order
    pub fn process<R,I> (&self, reports: I)->PipelineOutput<R> where R: PositionReport + Send, I: IntoIterator<Item=R> {
        let mut stats = PipelineStats::default();

        let groups = group_by_aircraft( reports);
        stats.n_aircraft = groups.len();
        stats.n_reports = groups.values().map( |v| v.len()).sum();

        let results: Vec<(String,Result<Vec<RunOutcome<R>>>)> = groups.into_par_iter()
            .map( |(icao24,reports)| {
                let res = self.process_aircraft( &icao24, reports);
                (icao24, res)
            })
            .collect();

        let mut accepted: Vec<FlightRun<R>> = Vec::new();
        let mut failed: Vec<(String,OdinTrajectoryError)> = Vec::new();

        for (icao24, res) in results {
            match res {
                Ok(outcomes) => {
                    for outcome in outcomes {
                        stats.n_runs += 1;
                        match outcome {
                            Ok(run) => {
                                stats.n_accepted += 1;
                                accepted.push(run);
                            }
                            Err(rejection) => stats.add_rejection( &rejection)
                        }
                    }
                }
                Err(e) => {
                    error!("aborted processing of aircraft {icao24}: {e}");
                    stats.n_failed_aircraft += 1;
                    failed.push( (icao24, e));
                }
            }
        }
        debug!("pipeline done: {stats}");

        PipelineOutput { accepted, stats, failed }
    }
}

/// partition reports by aircraft id. Each group keeps the input order
pub fn group_by_aircraft<R,I> (reports: I)->BTreeMap<String,Vec<R>> where R: PositionReport, I: IntoIterator<Item=R> {
    let mut groups: BTreeMap<String,Vec<R>> = BTreeMap::new();
    for r in reports {
        if let Some(v) = groups.get_mut( r.icao24()) {
            v.push(r);
        } else {
            groups.insert( r.icao24().to_string(), vec![r]);
        }
    }
    groups
}
