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

//! core of the trajectory extraction: turn per-aircraft position report streams into
//! continuous, plausible flight runs. The stages are
//!   segment -> impute -> range -> smooth/validate
//! each of which takes a [`FlightRun`] by value and either returns it or a [`Rejection`].
//! Nothing in here does I/O.

use std::fmt;
use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};

pub mod errors;
pub use errors::{OdinTrajectoryError,Result};

pub mod config;
pub use config::TrajectoryConfig;

pub mod segment;
pub mod impute;
pub mod range;
pub mod smooth;

pub mod pipeline;
pub use pipeline::{TrajectoryPipeline,PipelineOutput,PipelineStats,RunOutcome};

/// the view of a single observation the pipeline needs. Everything else a concrete report
/// type carries is passed through untouched
pub trait PositionReport {
    fn icao24 (&self)->&str;
    fn timestamp (&self)->DateTime<Utc>;

    /// barometric altitude. NaN values are treated as missing
    fn altitude (&self)->Option<f64>;
    fn set_altitude (&mut self, alt: f64);

    fn has_altitude (&self)->bool { present( self.altitude()).is_some() }
}

/// normalize NaN altitudes into None
#[inline]
pub fn present (alt: Option<f64>)->Option<f64> {
    alt.filter( |a| !a.is_nan())
}

/// the index of a flight run within the reports of one aircraft
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct RunIndex(u32);

impl RunIndex {
    pub fn new (idx: u32)->Self { RunIndex(idx) }
    pub fn value (&self)->u32 { self.0 }
}

impl fmt::Display for RunIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a time ordered sequence of reports from one aircraft without gaps exceeding the split threshold
#[derive(Debug,Clone)]
pub struct FlightRun<R> {
    icao24: String,
    index: RunIndex,
    reports: Vec<R>,
}

impl<R: PositionReport> FlightRun<R> {
    /// note this does not sort - callers have to pass in chronologically ordered reports
    pub fn new (icao24: impl ToString, index: RunIndex, reports: Vec<R>)->Self {
        FlightRun { icao24: icao24.to_string(), index, reports }
    }

    pub fn icao24 (&self)->&str { self.icao24.as_str() }
    pub fn index (&self)->RunIndex { self.index }
    pub fn reports (&self)->&[R] { self.reports.as_slice() }
    pub fn into_reports (self)->Vec<R> { self.reports }

    pub fn len (&self)->usize { self.reports.len() }
    pub fn is_empty (&self)->bool { self.reports.is_empty() }

    pub fn first_timestamp (&self)->Option<DateTime<Utc>> { self.reports.first().map( |r| r.timestamp()) }
    pub fn last_timestamp (&self)->Option<DateTime<Utc>> { self.reports.last().map( |r| r.timestamp()) }

    pub fn altitudes (&self)->Vec<Option<f64>> {
        self.reports.iter().map( |r| present( r.altitude())).collect()
    }

    /// all altitudes if every report has one, None otherwise
    pub fn complete_altitudes (&self)->Option<Vec<f64>> {
        self.reports.iter().map( |r| present( r.altitude())).collect()
    }

    pub fn has_complete_altitudes (&self)->bool {
        self.reports.iter().all( |r| r.has_altitude())
    }

    /// consume the run and return one that only keeps the reports within `range`
    pub(crate) fn retain_range (mut self, range: std::ops::RangeInclusive<usize>)->Self {
        let (start, end) = range.into_inner();
        self.reports.truncate( end + 1);
        self.reports.drain( ..start);
        self
    }

    /// replace altitudes positionally. `alts` has to have the same length as the run
    pub(crate) fn with_altitudes (mut self, alts: &[f64])->Self {
        for (r, alt) in self.reports.iter_mut().zip( alts.iter()) {
            r.set_altitude( *alt);
        }
        self
    }
}

impl<R: PositionReport> fmt::Display for FlightRun<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "FlightRun( icao24: {}, run: {}, n_reports: {}", self.icao24, self.index, self.reports.len())?;
        if let (Some(t0),Some(t1)) = (self.first_timestamp(), self.last_timestamp()) {
            write!( f, ", start: {}, end: {}", t0.format("%Y-%m-%dT%H:%M:%S"), t1.format("%Y-%m-%dT%H:%M:%S"))?;
        }
        write!( f, ")")
    }
}

/// summary altitudes of a valid flight run
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct FlightMetadata {
    pub min_alt: f64,
    pub max_alt: f64,
    pub mid_alt: f64, // altitude of the report in the middle of the run (len/2)
    pub first_alt: f64,
    pub last_alt: f64,
}

impl FlightMetadata {
    /// None if there are no altitudes
    pub fn from_altitudes (alts: &[f64])->Option<Self> {
        let first_alt = *alts.first()?;
        let last_alt = *alts.last()?;
        let mid_alt = alts[alts.len() / 2];
        let min_alt = alts.iter().copied().fold( f64::INFINITY, f64::min);
        let max_alt = alts.iter().copied().fold( f64::NEG_INFINITY, f64::max);

        Some( FlightMetadata { min_alt, max_alt, mid_alt, first_alt, last_alt } )
    }

    /// None if the run is empty or still has missing altitudes
    pub fn from_run<R: PositionReport> (run: &FlightRun<R>)->Option<Self> {
        run.complete_altitudes().and_then( |alts| Self::from_altitudes( &alts))
    }
}

/// why a flight run was dropped. This is a data quality outcome, not an error
#[derive(Debug,Clone,Copy,PartialEq)]
pub enum Rejection {
    /// not enough present altitudes to interpolate the rest
    InsufficientAltitude { ratio: f64 },
    /// altitude excursion outside of the operational envelope
    AltitudeOutOfRange { min_alt: f64, max_alt: f64 },
    /// not enough samples left to check continuity
    TooShort { len: usize },
    /// altitude rate of change outside of bounds even after smoothing
    Discontinuous { min_diff: f64, max_diff: f64 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::InsufficientAltitude {ratio} => write!( f, "insufficient altitude data (ratio {:.2})", ratio),
            Rejection::AltitudeOutOfRange {min_alt,max_alt} => write!( f, "altitude out of range ({:.0}..{:.0})", min_alt, max_alt),
            Rejection::TooShort {len} => write!( f, "too short ({} reports)", len),
            Rejection::Discontinuous {min_diff,max_diff} => write!( f, "discontinuous altitude (diffs {:.1}..{:.1})", min_diff, max_diff),
        }
    }
}

/// what each stage returns
pub type StageResult<R> = std::result::Result<FlightRun<R>,Rejection>;
