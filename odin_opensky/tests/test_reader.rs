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

// run with "cargo test --test test_reader -- --nocapture"

use std::{fs::File, io::Write};
use flate2::{Compression, write::GzEncoder};
use odin_opensky::{StateVector, reader::{read_state_vectors, read_state_vector_file}};

const SAMPLE: &str = "resources/states_sample.csv";

#[test]
fn test_read_sample() {
    let svs = read_state_vector_file( SAMPLE).unwrap();
    println!("read {} state vectors", svs.len());

    assert_eq!( svs.len(), 27); // two malformed rows are skipped
    assert!( svs.iter().all( |sv| !sv.icao24.is_empty()));

    let sv = &svs[0];
    println!("{sv}");
    assert_eq!( sv.icao24, "a1b2c3");
    assert_eq!( sv.time, 1656000000);
    assert_eq!( sv.timestamp.timestamp(), 1656000000);
    assert_eq!( sv.callsign.as_deref(), Some("UAL123"));
    assert_eq!( sv.onground, Some(false));
    assert_eq!( sv.squawk.as_deref(), Some("1234"));
    assert_eq!( sv.baroaltitude, Some(3000.0));
    assert_eq!( sv.lastcontact, Some(1655999999.8));

    // empty altitude field
    let sv = svs.iter().find( |sv| sv.icao24 == "a1b2c3" && sv.time == 1656000040).unwrap();
    assert_eq!( sv.baroaltitude, None);

    // empty callsign
    let sv = svs.iter().find( |sv| sv.icao24 == "778899").unwrap();
    assert_eq!( sv.callsign, None);
}

#[test]
fn test_read_gzipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("states.csv.gz");

    let data = std::fs::read( SAMPLE).unwrap();
    let mut enc = GzEncoder::new( File::create(&path).unwrap(), Compression::default());
    enc.write_all( &data).unwrap();
    enc.finish().unwrap();

    let svs = read_state_vector_file( &path).unwrap();
    assert_eq!( svs.len(), 27);
}

#[test]
fn test_partial_columns() {
    let input = "time,icao24,baroaltitude\n1656000000,ABC123,1500.5\n1656000010,abc123,\n";
    let svs = read_state_vectors( input.as_bytes()).unwrap();

    assert_eq!( svs.len(), 2);
    assert_eq!( svs[0].icao24, "abc123"); // normalized
    assert_eq!( svs[0].baroaltitude, Some(1500.5));
    assert_eq!( svs[1].baroaltitude, None);
    assert_eq!( svs[0].lat, None);
    assert_eq!( svs[0].onground, None);
}

#[test]
fn test_missing_required_column() {
    let input = "time,callsign,baroaltitude\n1656000000,UAL1,1500.5\n";
    let res = read_state_vectors( input.as_bytes());
    println!("{res:?}");
    assert!( res.is_err());
}

#[test]
fn test_missing_file() {
    assert!( read_state_vector_file( "resources/no_such_file.csv").is_err());
}
