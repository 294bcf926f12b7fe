//! Error types for trajectory loading and scene configuration.

use thiserror::Error;

/// Errors raised before or while composing frames.
///
/// All of them are fatal for a run: there is no retry path.
#[derive(Debug, Error)]
pub enum VizError {
    /// Trajectory or scene file could not be opened/read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    
    /// Trajectory table is malformed (missing columns, non-integer ids, ...)
    #[error("Trajectory parse error: {0}")]
    Csv(#[from] csv::Error),
    
    /// Scene override file is not valid JSON for the scene schema
    #[error("Scene file error: {0}")]
    SceneFile(#[from] serde_json::Error),
    
    /// Table contained no rows, so there are no agents and no timesteps
    #[error("Trajectory is empty: no agents or timesteps")]
    EmptyTrajectory,
    
    /// Agent ids must form the dense range [0, agents)
    #[error("Agent id {agent_id} out of range for {agents} distinct agents")]
    AgentIdOutOfRange { agent_id: usize, agents: usize },
    
    /// Largest timestep times agent count does not fit in memory
    #[error("Trajectory too large: timestep {timestep} with {agents} agents")]
    TrajectoryTooLarge { timestep: usize, agents: usize },
    
    /// Frame asked for a timestep beyond the end of the log
    #[error("Frame {frame} is past the last timestep ({timesteps} timesteps)")]
    FrameOutOfRange { frame: usize, timesteps: usize },
    
    /// Configuration value rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl VizError {
    /// Creates an invalid configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Result alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, VizError>;
