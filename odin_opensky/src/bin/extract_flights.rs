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

//! extract flight trajectories from OpenSky state vector files.
//!   extract_flights [--config <ron-file>] [overrides..] <input-file-or-dir> <output-dir>
//! use RUST_LOG to control log output (default is "info")

use std::{path::PathBuf, time::Duration};
use anyhow::{Result,anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use odin_opensky::{OpenSkyConfig, load_config, batch::process_path};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "extract continuous flight trajectories from OpenSky state vector files")]
pub struct Args {
    /// RON config file (defaults are used if not set)
    #[arg(short,long)]
    pub config: Option<PathBuf>,

    /// max gap between reports of the same flight run (e.g. "60s", "2min")
    #[arg(long, value_parser = parse_duration::parse)]
    pub split_threshold: Option<Duration>,

    /// min ratio of present altitudes in a run
    #[arg(long)]
    pub impute_tolerance: Option<f64>,

    /// min altitude in meters
    #[arg(long)]
    pub altitude_min: Option<f64>,

    /// max altitude in meters
    #[arg(long)]
    pub altitude_max: Option<f64>,

    /// max descent between consecutive samples in meters (negative)
    #[arg(long, allow_hyphen_values=true)]
    pub invalid_min_threshold: Option<f64>,

    /// max climb between consecutive samples in meters
    #[arg(long)]
    pub invalid_max_threshold: Option<f64>,

    /// jitter allowed past the rate thresholds in meters
    #[arg(long)]
    pub invalid_tolerance: Option<f64>,

    /// print the effective config as RON and exit
    #[arg(long)]
    pub show_config: bool,

    /// state vector file (.csv or .csv.gz) or directory with such files
    #[arg(required_unless_present="show_config")]
    pub input_path: Option<PathBuf>,

    /// directory to store the flight JSON files in
    #[arg(required_unless_present="show_config")]
    pub output_path: Option<PathBuf>,
}

fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = effective_config( &args)?;

    if args.show_config {
        println!("{}", ron::ser::to_string_pretty( &config, ron::ser::PrettyConfig::default())?);
        return Ok(())
    }

    let input = args.input_path.as_ref().ok_or_else( || anyhow!("no input path"))?;
    let output = args.output_path.as_ref().ok_or_else( || anyhow!("no output path"))?;

    let summary = process_path( input, output, &config)?;
    println!("{summary}");

    Ok(())
}

fn effective_config (args: &Args)->Result<OpenSkyConfig> {
    let mut config = if let Some(path) = &args.config { load_config( path)? } else { OpenSkyConfig::default() };
    let tc = &mut config.trajectory;

    if let Some(v) = args.split_threshold { tc.split_threshold = v }
    if let Some(v) = args.impute_tolerance { tc.impute_tolerance = v }
    if let Some(v) = args.altitude_min { tc.altitude_min = v }
    if let Some(v) = args.altitude_max { tc.altitude_max = v }
    if let Some(v) = args.invalid_min_threshold { tc.invalid_min_threshold = v }
    if let Some(v) = args.invalid_max_threshold { tc.invalid_max_threshold = v }
    if let Some(v) = args.invalid_tolerance { tc.invalid_tolerance = v }

    config.check()?;
    Ok(config)
}
