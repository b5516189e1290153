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

use chrono::{DateTime,Utc};
use odin_trajectory::{FlightRun, PositionReport, RunIndex};

/// minimal report type for tests - the real ones carry passthrough data we don't need here
#[derive(Debug,Clone,PartialEq)]
pub struct TestReport {
    pub icao24: String,
    pub time: i64,
    pub alt: Option<f64>,
    pub tag: usize, // stands in for passthrough fields the pipeline must not touch
}

impl PositionReport for TestReport {
    fn icao24 (&self)->&str { self.icao24.as_str() }
    fn timestamp (&self)->DateTime<Utc> { DateTime::from_timestamp( self.time, 0).unwrap() }
    fn altitude (&self)->Option<f64> { self.alt }
    fn set_altitude (&mut self, alt: f64) { self.alt = Some(alt) }
}

pub fn report (icao24: &str, time: i64, alt: Option<f64>)->TestReport {
    TestReport { icao24: icao24.to_string(), time, alt, tag: time as usize }
}

/// reports at 1 sec intervals starting at `t0`
pub fn reports_from_alts (icao24: &str, t0: i64, alts: &[Option<f64>])->Vec<TestReport> {
    alts.iter().enumerate().map( |(i,alt)| report( icao24, t0 + i as i64, *alt)).collect()
}

pub fn run_from_alts (alts: &[Option<f64>])->FlightRun<TestReport> {
    FlightRun::new( "abc123", RunIndex::new(0), reports_from_alts( "abc123", 1_700_000_000, alts))
}

pub fn run_from_values (alts: &[f64])->FlightRun<TestReport> {
    let alts: Vec<Option<f64>> = alts.iter().map( |a| Some(*a)).collect();
    run_from_alts( &alts)
}

pub fn times (run: &FlightRun<TestReport>)->Vec<i64> {
    run.reports().iter().map( |r| r.time).collect()
}

pub fn alts (run: &FlightRun<TestReport>)->Vec<Option<f64>> {
    run.reports().iter().map( |r| r.alt).collect()
}

pub fn assert_close (a: f64, b: f64) {
    assert!( (a - b).abs() < 1e-9, "{a} != {b}");
}
