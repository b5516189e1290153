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

use thiserror::Error;

pub type Result<T> = std::result::Result<T,OdinTrajectoryError>;

#[derive(Error,Debug)]
pub enum OdinTrajectoryError {

    /// segmentation left reports without a run index. This is a logic error, not bad input
    #[error("{count} reports of aircraft {icao24} could not be assigned to a flight run")]
    UnlabelledReports { icao24: String, count: usize },

    #[error("config error {0}")]
    ConfigError(String),

    #[error("RON error {0}")]
    RonError( #[from] ron::error::SpannedError),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),
}

pub fn config_error (msg: impl ToString)->OdinTrajectoryError {
    OdinTrajectoryError::ConfigError(msg.to_string())
}
