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
#![allow(unused)]

mod common;
use common::*;

use std::time::Duration;
use odin_trajectory::{FlightMetadata, Rejection, RunIndex, TrajectoryConfig, TrajectoryPipeline, PositionReport, pipeline::group_by_aircraft};

fn pipeline ()->TrajectoryPipeline {
    TrajectoryPipeline::new( TrajectoryConfig::default())
}

/// a plausible cruise segment at ~3000m with gentle climb
fn cruise (icao24: &str, t0: i64, n: usize)->Vec<TestReport> {
    (0..n).map( |i| report( icao24, t0 + (i as i64)*5, Some( 3000.0 + (i as f64)*10.0))).collect()
}

#[test]
fn test_process_run_accepts_repairable() {
    let mut alts: Vec<Option<f64>> = (0..20).map( |i| Some( 4000.0 + i as f64)).collect();
    alts[5] = None;
    alts[10] = Some(9500.0); // single sample spike
    let run = run_from_alts( &alts);

    let run = pipeline().process_run(run).unwrap();
    assert!( run.has_complete_altitudes());
    assert_eq!( run.len(), 20);
    assert_eq!( alts_of(&run)[5], 4005.0);
    assert_eq!( alts_of(&run)[10], 4009.0);
}

fn alts_of (run: &odin_trajectory::FlightRun<TestReport>)->Vec<f64> {
    run.reports().iter().map( |r| r.alt.unwrap()).collect()
}

#[test]
fn test_rejected_stage_stops_chain() {
    let p = pipeline();

    let run = run_from_alts( &[Some(3000.0), None, None, Some(3000.0)]);
    assert!( matches!( p.process_run(run), Err(Rejection::InsufficientAltitude{..})));

    let run = run_from_values( &[800.0, 810.0, 820.0]);
    assert!( matches!( p.process_run(run), Err(Rejection::AltitudeOutOfRange{..})));

    let run = run_from_values( &[3000.0]);
    assert!( matches!( p.process_run(run), Err(Rejection::TooShort{..})));

    let run = run_from_values( &[3000.0, 3010.0, 6000.0, 6010.0]);
    assert!( matches!( p.process_run(run), Err(Rejection::Discontinuous{..})));
}

#[test]
fn test_process_mixed_aircraft() {
    let mut reports: Vec<TestReport> = Vec::new();
    reports.extend( cruise( "bbb222", 1_000, 30));
    reports.extend( cruise( "aaa111", 1_000, 30));
    reports.extend( cruise( "aaa111", 5_000, 30)); // second flight after a long gap
    reports.extend( cruise( "ccc333", 1_000, 30).into_iter().map( |mut r| { r.alt = Some(500.0); r })); // too low
    reports.reverse(); // order must not matter

    let out = pipeline().process( reports);

    assert!( out.failed.is_empty());
    assert_eq!( out.stats.n_reports, 120);
    assert_eq!( out.stats.n_aircraft, 3);
    assert_eq!( out.stats.n_runs, 4);
    assert_eq!( out.stats.n_accepted, 3);
    assert_eq!( out.stats.n_out_of_range, 1);
    assert_eq!( out.stats.n_rejected(), 1);

    let ids: Vec<(&str,u32)> = out.accepted.iter().map( |r| (r.icao24(), r.index().value())).collect();
    assert_eq!( ids, vec![("aaa111",0), ("aaa111",1), ("bbb222",0)]);

    for run in &out.accepted {
        assert!( run.has_complete_altitudes());
        let t = times(run);
        assert!( t.windows(2).all( |w| w[0] < w[1]));
    }
}

#[test]
fn test_presence_rejects_regardless() {
    // perfectly fine altitudes where present, but only half of them
    let alts: Vec<Option<f64>> = (0..10).map( |i| if i % 2 == 0 { Some(3000.0) } else { None }).collect();
    let out = pipeline().process( reports_from_alts( "abc123", 0, &alts));
    assert!( out.accepted.is_empty());
    assert_eq!( out.stats.n_insufficient_altitude, 1);
}

#[test]
fn test_custom_split_threshold() {
    let config = TrajectoryConfig { split_threshold: Duration::from_secs(3), ..TrajectoryConfig::default() };
    let p = TrajectoryPipeline::new( config);
    let out = p.process( cruise( "abc123", 0, 10)); // 5s spacing -> every report is its own run
    assert_eq!( out.stats.n_runs, 10);
    assert_eq!( out.stats.n_too_short, 10);
}

#[test]
fn test_metadata() {
    let run = run_from_values( &[3000.0, 3500.0, 3200.0, 2900.0, 3100.0]);
    let md = FlightMetadata::from_run( &run).unwrap();
    assert_eq!( md.min_alt, 2900.0);
    assert_eq!( md.max_alt, 3500.0);
    assert_eq!( md.mid_alt, 3200.0);
    assert_eq!( md.first_alt, 3000.0);
    assert_eq!( md.last_alt, 3100.0);

    let run = run_from_values( &[1.0, 2.0, 3.0, 4.0]);
    assert_eq!( FlightMetadata::from_run( &run).unwrap().mid_alt, 3.0); // floor(len/2)

    let run = run_from_alts( &[Some(1.0), None]);
    assert!( FlightMetadata::from_run( &run).is_none());
}

#[test]
fn test_group_by_aircraft() {
    let reports = vec![ report("b", 2, None), report("a", 1, None), report("b", 1, None)];
    let groups = group_by_aircraft( reports);
    assert_eq!( groups.keys().collect::<Vec<_>>(), vec!["a","b"]);
    assert_eq!( groups["b"].iter().map( |r| r.time).collect::<Vec<_>>(), vec![2,1]);
}
