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

//! pipeline parameters. All values are plain numbers in the units of the report stream
//! (seconds for time, meters for barometric altitude, meters per sample interval for rates)

use std::{fmt, path::Path, time::Duration};
use serde::{Serialize,Deserialize,Serializer,Deserializer};
use uom::si::{f64::Velocity, velocity::{foot_per_minute,meter_per_second}};
use crate::errors::{Result,config_error};

pub const DEFAULT_SPLIT_THRESHOLD: Duration = Duration::from_secs(60);
pub const DEFAULT_IMPUTE_TOLERANCE: f64 = 0.8;
pub const DEFAULT_ALTITUDE_MIN: f64 = 1250.0;
pub const DEFAULT_ALTITUDE_MAX: f64 = 10000.0;
pub const DEFAULT_INVALID_TOLERANCE: f64 = 5.0;

/// the climb and descent limits the default rate thresholds are derived from
pub const CLIMB_FPM: f64 = 5000.0;
pub const DESCENT_FPM: f64 = 4500.0;

/// max climb between two consecutive samples (positive)
pub fn default_invalid_max_threshold ()->f64 {
    Velocity::new::<foot_per_minute>(CLIMB_FPM).get::<meter_per_second>()
}

/// max descent between two consecutive samples (negative)
pub fn default_invalid_min_threshold ()->f64 {
    -Velocity::new::<foot_per_minute>(DESCENT_FPM).get::<meter_per_second>()
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct TrajectoryConfig {
    #[serde(serialize_with="serialize_duration", deserialize_with="deserialize_duration")]
    pub split_threshold: Duration, // max gap between two reports of the same flight run
    pub impute_tolerance: f64, // min ratio of present altitudes required to attempt interpolation
    pub altitude_min: f64, // flights have to stay above this altitude
    pub altitude_max: f64, // flights have to stay below this altitude
    pub invalid_min_threshold: f64,
    pub invalid_max_threshold: f64,
    pub invalid_tolerance: f64, // jitter allowed past the invalid thresholds
}

impl Default for TrajectoryConfig {
    fn default()->Self {
        TrajectoryConfig {
            split_threshold: DEFAULT_SPLIT_THRESHOLD,
            impute_tolerance: DEFAULT_IMPUTE_TOLERANCE,
            altitude_min: DEFAULT_ALTITUDE_MIN,
            altitude_max: DEFAULT_ALTITUDE_MAX,
            invalid_min_threshold: default_invalid_min_threshold(),
            invalid_max_threshold: default_invalid_max_threshold(),
            invalid_tolerance: DEFAULT_INVALID_TOLERANCE,
        }
    }
}

impl TrajectoryConfig {
    pub fn from_ron_str (s: &str)->Result<Self> {
        let config: TrajectoryConfig = ron::from_str(s)?;
        config.check()?;
        Ok(config)
    }

    pub fn load (path: impl AsRef<Path>)->Result<Self> {
        let data = std::fs::read_to_string( path.as_ref())?;
        Self::from_ron_str( &data)
    }

    /// reject parameter combinations that would silently drop or accept everything
    pub fn check (&self)->Result<()> {
        if !(0.0..=1.0).contains( &self.impute_tolerance) {
            return Err( config_error( format!("impute_tolerance {} not within [0,1]", self.impute_tolerance)))
        }
        if self.altitude_min >= self.altitude_max {
            return Err( config_error( format!("altitude_min {} not below altitude_max {}", self.altitude_min, self.altitude_max)))
        }
        if self.invalid_min_threshold >= self.invalid_max_threshold {
            return Err( config_error( format!("invalid_min_threshold {} not below invalid_max_threshold {}",
                self.invalid_min_threshold, self.invalid_max_threshold)))
        }
        if self.invalid_tolerance < 0.0 {
            return Err( config_error( format!("negative invalid_tolerance {}", self.invalid_tolerance)))
        }
        Ok(())
    }
}

impl fmt::Display for TrajectoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "TrajectoryConfig( split: {:?}, impute: {}, alt: {}..{}, rate: {:.2}..{:.2} ±{} )",
            self.split_threshold, self.impute_tolerance, self.altitude_min, self.altitude_max,
            self.invalid_min_threshold, self.invalid_max_threshold, self.invalid_tolerance)
    }
}

//--- duration (de)serialization as human readable strings such as "60s" or "2min"

pub fn deserialize_duration <'a,D>(deserializer: D) -> std::result::Result<Duration,D::Error>
    where D: Deserializer<'a>
{
    String::deserialize(deserializer).and_then( |string| {
        parse_duration::parse(string.as_str())
            .map_err( |e| serde::de::Error::custom(format!("{:?}",e)))
    })
}

pub fn serialize_duration<S: Serializer> (dur: &Duration, s: S) -> std::result::Result<S::Ok, S::Error>  {
    let dfm = format!("{:?}", dur);
    s.serialize_str(&dfm)
}
