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

//! the OpenSky side of trajectory extraction: reading state vector dumps, running them through the
//! `odin_trajectory` pipeline and exporting the accepted flights as JSON files that can be used as
//! simulator input

use std::{fmt, path::Path};
use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};
use odin_trajectory::{PositionReport, TrajectoryConfig};

pub mod errors;
use errors::{OdinOpenSkyError,Result,op_failed};

pub mod reader;
pub mod export;
pub mod batch;

/// default regex for input files we process in directories
pub const DEFAULT_INPUT_PATTERN: &str = r".*\.csv(\.gz)?$";

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct OpenSkyConfig {
    pub trajectory: TrajectoryConfig,
    pub input_pattern: String, // filename regex for files in input directories
}

impl Default for OpenSkyConfig {
    fn default()->Self {
        OpenSkyConfig { trajectory: TrajectoryConfig::default(), input_pattern: DEFAULT_INPUT_PATTERN.to_string() }
    }
}

impl OpenSkyConfig {
    pub fn check (&self)->Result<()> {
        self.trajectory.check()?;
        regex::Regex::new( &self.input_pattern)?;
        Ok(())
    }
}

pub fn load_config (path: impl AsRef<Path>)->Result<OpenSkyConfig> {
    let data = std::fs::read( path.as_ref())?;
    let config: OpenSkyConfig = ron::de::from_bytes( data.as_slice())?;
    config.check()?;
    Ok(config)
}

/// a single OpenSky state vector (see https://opensky-network.org/datasets/states/README.txt).
/// Only `icao24`, `timestamp` and `baroaltitude` are used by the pipeline, the rest is passed through
/// into the exported flights. Altitudes are in meters
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct StateVector {
    pub time: i64, // epoch seconds as in the source
    pub icao24: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub velocity: Option<f64>,
    pub heading: Option<f64>,
    pub vertrate: Option<f64>,
    pub callsign: Option<String>,
    pub onground: Option<bool>,
    pub alert: Option<bool>,
    pub spi: Option<bool>,
    pub squawk: Option<String>,
    pub baroaltitude: Option<f64>,
    pub lastposupdate: Option<f64>,
    pub lastcontact: Option<f64>,

    #[serde(with="chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
}

impl PositionReport for StateVector {
    fn icao24 (&self)->&str { self.icao24.as_str() }
    fn timestamp (&self)->DateTime<Utc> { self.timestamp }
    fn altitude (&self)->Option<f64> { self.baroaltitude }
    fn set_altitude (&mut self, alt: f64) { self.baroaltitude = Some(alt) }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "StateVector( icao24: {}, time: {}", self.icao24, self.time)?;
        if let Some(cs) = &self.callsign { write!( f, ", cs: \"{cs}\"")?; }
        if let (Some(lat),Some(lon)) = (self.lat,self.lon) { write!( f, ", pos: ({lat:.5},{lon:.5})")?; }
        if let Some(alt) = self.baroaltitude { write!( f, ", alt: {alt:.0}")?; }
        write!( f, ")")
    }
}

/// what we get from the CSV. Everything is optional so that we can skip incomplete rows
/// instead of failing the whole file
#[derive(Deserialize,Debug,Default)]
#[serde(default)]
pub(crate) struct RawStateVector {
    time: Option<f64>,
    icao24: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    velocity: Option<f64>,
    heading: Option<f64>,
    vertrate: Option<f64>,
    callsign: Option<String>,
    onground: Option<String>,
    alert: Option<String>,
    spi: Option<String>,
    squawk: Option<String>,
    baroaltitude: Option<f64>,
    lastposupdate: Option<f64>,
    lastcontact: Option<f64>,
    // geoaltitude is ignored
}

impl TryFrom<RawStateVector> for StateVector {
    type Error = OdinOpenSkyError;

    fn try_from (raw: RawStateVector)->Result<Self> {
        let icao24 = raw.icao24.as_deref().map( |s| s.trim().to_lowercase()).filter( |s| !s.is_empty())
            .ok_or_else( || op_failed!("state vector without icao24"))?;
        let time = raw.time.filter( |t| t.is_finite()).map( |t| t.floor() as i64)
            .ok_or_else( || op_failed!("state vector without time: {icao24}"))?;
        let timestamp = DateTime::<Utc>::from_timestamp( time, 0)
            .ok_or_else( || op_failed!("state vector time out of range: {time}"))?;

        Ok( StateVector {
            time,
            icao24,
            lat: raw.lat,
            lon: raw.lon,
            velocity: raw.velocity,
            heading: raw.heading,
            vertrate: raw.vertrate,
            callsign: raw.callsign.map( |cs| cs.trim().to_string()).filter( |cs| !cs.is_empty()),
            onground: parse_flag( &raw.onground),
            alert: parse_flag( &raw.alert),
            spi: parse_flag( &raw.spi),
            squawk: raw.squawk.map( |s| s.trim().to_string()).filter( |s| !s.is_empty()),
            baroaltitude: raw.baroaltitude.filter( |a| !a.is_nan()),
            lastposupdate: raw.lastposupdate,
            lastcontact: raw.lastcontact,
            timestamp
        })
    }
}

/// OpenSky dumps use Python style "True"/"False"
fn parse_flag (s: &Option<String>)->Option<bool> {
    match s.as_deref().map( |s| s.trim()) {
        Some("True") | Some("true") | Some("1") => Some(true),
        Some("False") | Some("false") | Some("0") => Some(false),
        _ => None
    }
}
