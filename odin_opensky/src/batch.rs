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

//! batch driver: read -> pipeline -> export for a single file or all matching files of a directory.
//! A file that fails does not abort the batch

use std::{fmt, fs, path::{Path,PathBuf}};
use regex::Regex;
use tracing::{info,warn,error};
use odin_trajectory::{TrajectoryPipeline, PipelineStats};

use crate::{OpenSkyConfig, reader::read_state_vector_file, export::export_flights};
use crate::errors::{OdinOpenSkyError,Result,op_failed};

/// what we got out of a single input file
#[derive(Debug,Clone)]
pub struct FileSummary {
    pub path: PathBuf,
    pub stats: PipelineStats,
    pub exported: Vec<PathBuf>,
}

#[derive(Debug,Default,Clone)]
pub struct BatchSummary {
    pub processed: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
    pub stats: PipelineStats,
    pub n_exported: usize,
}

impl BatchSummary {
    fn add_file (&mut self, fsum: FileSummary) {
        self.stats.merge( &fsum.stats);
        self.n_exported += fsum.exported.len();
        self.processed.push( fsum.path);
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "files: {} ok, {} failed; flights exported: {}; {}",
            self.processed.len(), self.failed.len(), self.n_exported, self.stats)
    }
}

/// process one state vector file and export its accepted flights into `output_dir`
pub fn process_file (path: impl AsRef<Path>, output_dir: impl AsRef<Path>, pipeline: &TrajectoryPipeline)->Result<FileSummary> {
    let path = path.as_ref();
    let svs = read_state_vector_file( path)?;
    info!("read {} state vectors from {:?}", svs.len(), path);

    let output = pipeline.process( svs);
    let exported = export_flights( output.accepted, output_dir)?;

    Ok( FileSummary { path: path.to_path_buf(), stats: output.stats, exported } )
}

/// the files to process: `input` itself if it is a file, or the files of directory `input` that match
/// `pattern`, sorted by name
pub fn input_files (input: impl AsRef<Path>, pattern: &Regex)->Result<Vec<PathBuf>> {
    let input = input.as_ref();

    if input.is_file() {
        Ok( vec![input.to_path_buf()] )

    } else if input.is_dir() {
        let mut list: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir( input)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() {
                if let Some(fname) = entry.file_name().to_str() {
                    if pattern.is_match( fname) { list.push( path) }
                }
            }
        }
        list.sort();
        Ok( list )

    } else {
        Err( op_failed!("input path does not exist: {:?}", input))
    }
}

/// create output dir if it does not exist yet
pub fn ensure_output_dir (path: impl AsRef<Path>)->Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        if fs::metadata( path)?.permissions().readonly() {
            Err( op_failed!("output dir {:?} not writable", path))
        } else {
            Ok(())
        }
    } else {
        Ok( fs::create_dir_all( path)? )
    }
}

/// process all input files. Only fails if the configuration is invalid, the input can't be listed
/// or the output dir can't be created. Per-file errors are logged and recorded in the summary
pub fn process_path (input: impl AsRef<Path>, output_dir: impl AsRef<Path>, config: &OpenSkyConfig)->Result<BatchSummary> {
    config.check()?;
    let output_dir = output_dir.as_ref();
    ensure_output_dir( output_dir)?;

    let pattern = Regex::new( &config.input_pattern)?;
    let files = input_files( input, &pattern)?;
    if files.is_empty() {
        warn!("no input files found");
    }

    let pipeline = TrajectoryPipeline::new( config.trajectory.clone());
    let mut summary = BatchSummary::default();
    let n_files = files.len();

    for (i,path) in files.into_iter().enumerate() {
        info!("processing file {}/{}: {:?}", i+1, n_files, path);
        match process_file( &path, output_dir, &pipeline) {
            Ok(fsum) => {
                info!("{:?}: {} flights exported, {}", path, fsum.exported.len(), fsum.stats);
                summary.add_file( fsum);
            }
            Err(e) => {
                error!("failed to process {:?}: {}", path, e);
                summary.failed.push( path);
            }
        }
    }

    info!("batch done: {summary}");
    Ok( summary )
}
