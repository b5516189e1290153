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

//! writing accepted flight runs as JSON files of the form
//! ```json
//! { "metadata": { "min_alt":.., "max_alt":.., "mid_alt":.., "first_alt":.., "last_alt":.. },
//!   "data": [ { <state vector fields>, "timestamp": <epoch secs>, "flight_label": <run index> }, .. ] }
//! ```

use std::{fs::File, io::{BufWriter,Write}, path::{Path,PathBuf}};
use serde::{Serialize,Deserialize};
use tracing::{debug,info};
use odin_trajectory::{FlightRun, FlightMetadata, PositionReport};

use crate::StateVector;
use crate::errors::{OdinOpenSkyError,Result,op_failed};

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct FlightRecord {
    #[serde(flatten)]
    pub state: StateVector,
    pub flight_label: u32,
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct FlightFile {
    pub metadata: FlightMetadata,
    pub data: Vec<FlightRecord>,
}

/// `<icao24>-<YYYYmmdd-HHMMSS>.json`, using the time of the first report
pub fn flight_filename (run: &FlightRun<StateVector>)->Option<String> {
    run.first_timestamp().map( |t| format!("{}-{}.json", run.icao24(), t.format("%Y%m%d-%H%M%S")))
}

/// turn a run into the exported representation. Runs with missing altitudes are refused
pub fn flight_file (run: FlightRun<StateVector>)->Result<FlightFile> {
    let metadata = FlightMetadata::from_run( &run).ok_or_else( || OdinOpenSkyError::MissingAltitude( run.to_string()))?;
    let flight_label = run.index().value();
    let data: Vec<FlightRecord> = run.into_reports().into_iter().map( |state| FlightRecord{ state, flight_label }).collect();

    Ok( FlightFile { metadata, data } )
}

/// save a single run into `dir`, returning the path of the written file
pub fn save_flight (run: FlightRun<StateVector>, dir: impl AsRef<Path>)->Result<PathBuf> {
    let filename = flight_filename( &run).ok_or_else( || op_failed!("cannot export empty run {}", run))?;
    let path = dir.as_ref().join( filename);
    let flight = flight_file( run)?;

    let mut writer = BufWriter::new( File::create( &path)?);
    serde_json::to_writer( &mut writer, &flight)?;
    writer.flush()?;

    debug!("saved {} reports to {:?}", flight.data.len(), path);
    Ok( path )
}

/// save all runs into `dir`, returning the written paths in input order
pub fn export_flights<I> (runs: I, dir: impl AsRef<Path>)->Result<Vec<PathBuf>> where I: IntoIterator<Item=FlightRun<StateVector>> {
    let dir = dir.as_ref();
    let mut paths = Vec::new();

    for run in runs {
        paths.push( save_flight( run, dir)?);
    }

    if !paths.is_empty() {
        info!("exported {} flights to {:?}", paths.len(), dir);
    }
    Ok( paths )
}

/// read back an exported flight
pub fn load_flight (path: impl AsRef<Path>)->Result<FlightFile> {
    let file = File::open( path.as_ref())?;
    Ok( serde_json::from_reader( std::io::BufReader::new( file))? )
}
