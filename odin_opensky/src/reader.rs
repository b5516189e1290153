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

//! reading OpenSky state vector CSV files (plain or gzipped)

use std::{fs::File, io::{BufReader,Read}, path::Path};
use flate2::read::GzDecoder;
use tracing::{debug,warn};

use crate::{StateVector,RawStateVector};
use crate::errors::{OdinOpenSkyError,Result,op_failed};

/// the columns we can't do without
const REQUIRED_COLUMNS: [&str;3] = ["time", "icao24", "baroaltitude"];

/// parse state vectors from a CSV source with a header line. Rows that can't be parsed or lack
/// icao24/time are skipped, a missing required column fails the whole source
pub fn read_state_vectors (reader: impl Read)->Result<Vec<StateVector>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any( |h| h == col) {
            return Err( op_failed!("missing column '{col}' in state vector header"))
        }
    }

    let mut svs: Vec<StateVector> = Vec::new();
    let mut n_skipped = 0;

    for res in csv_reader.deserialize::<RawStateVector>() {
        match res.map_err( OdinOpenSkyError::from).and_then( StateVector::try_from) {
            Ok(sv) => svs.push(sv),
            Err(e) => {
                debug!("skipping state vector row: {e}");
                n_skipped += 1;
            }
        }
    }

    if n_skipped > 0 {
        warn!("skipped {n_skipped} malformed state vector rows");
    }

    Ok( svs )
}

/// read a state vector file. Files ending in ".gz" are decompressed on the fly
pub fn read_state_vector_file (path: impl AsRef<Path>)->Result<Vec<StateVector>> {
    let path = path.as_ref();
    let file = File::open( path)?;

    if is_gzipped( path) {
        read_state_vectors( BufReader::new( GzDecoder::new( file)))
    } else {
        read_state_vectors( BufReader::new( file))
    }
}

fn is_gzipped (path: &Path)->bool {
    path.extension().map( |ext| ext.eq_ignore_ascii_case("gz")).unwrap_or(false)
}
