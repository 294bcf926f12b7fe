//! Trajectory store: the precomputed flight log as a dense position tensor.
//!
//! The input table has one row per observed `(timestep, agent_id)` pair:
//!
//! ```text
//! timestep,agent_id,x,y,z
//! 0,0,1.0,1.0,0.5
//! 0,1,1.0,19.0,0.5
//! ...
//! ```
//!
//! Rows may arrive in any order and pairs may be missing. Missing pairs
//! hold the origin.

use crate::error::{Result, VizError};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One row of the trajectory table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    pub timestep: usize,
    pub agent_id: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl TrajectoryRecord {
    /// Position as a vector.
    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// Dense `(T, N, 3)` position tensor, immutable once built.
#[derive(Debug, Clone)]
pub struct Trajectory {
    /// Row-major `[timestep][agent]`
    positions: Vec<Vector3<f64>>,

    /// T = max(timestep) + 1
    timesteps: usize,

    /// N = number of distinct agent ids
    agents: usize,
}

impl Trajectory {
    /// Loads a trajectory table from a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let trajectory = Self::from_reader(file)?;
        tracing::info!(
            "Loaded {} agents x {} timesteps from {}",
            trajectory.agents,
            trajectory.timesteps,
            path.display()
        );
        Ok(trajectory)
    }

    /// Loads a trajectory table from any CSV source with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let records = rdr
            .deserialize::<TrajectoryRecord>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::debug!("Parsed {} trajectory rows", records.len());
        Self::from_records(&records)
    }

    /// Builds the tensor from already-parsed records.
    pub fn from_records(records: &[TrajectoryRecord]) -> Result<Self> {
        let agent_ids: BTreeSet<usize> = records.iter().map(|r| r.agent_id).collect();
        let agents = agent_ids.len();
        let max_timestep = match records.iter().map(|r| r.timestep).max() {
            Some(t) if agents > 0 => t,
            _ => return Err(VizError::EmptyTrajectory),
        };

        // Ids are assumed dense; the largest one exposes any gap.
        if let Some(&max_id) = agent_ids.iter().next_back() {
            if max_id >= agents {
                return Err(VizError::AgentIdOutOfRange {
                    agent_id: max_id,
                    agents,
                });
            }
        }

        let too_large = || VizError::TrajectoryTooLarge {
            timestep: max_timestep,
            agents,
        };
        let timesteps = max_timestep.checked_add(1).ok_or_else(too_large)?;
        let cells = timesteps.checked_mul(agents).ok_or_else(too_large)?;

        let mut positions = Vec::new();
        positions
            .try_reserve_exact(cells)
            .map_err(|_| too_large())?;
        positions.resize(cells, Vector3::zeros());
        for record in records {
            positions[record.timestep * agents + record.agent_id] = record.position();
        }

        Ok(Self {
            positions,
            timesteps,
            agents,
        })
    }

    /// Number of timesteps (T).
    pub fn timesteps(&self) -> usize {
        self.timesteps
    }

    /// Number of agents (N).
    pub fn agents(&self) -> usize {
        self.agents
    }

    /// Tensor shape `(T, N, 3)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.timesteps, self.agents, 3)
    }

    /// Positions of every agent at `timestep`.
    ///
    /// # Panics
    /// If `timestep >= self.timesteps()`.
    pub fn row(&self, timestep: usize) -> &[Vector3<f64>] {
        let start = timestep * self.agents;
        &self.positions[start..start + self.agents]
    }

    /// Position of one agent at one timestep, if in range.
    pub fn position(&self, timestep: usize, agent: usize) -> Option<Vector3<f64>> {
        if timestep >= self.timesteps || agent >= self.agents {
            return None;
        }
        Some(self.positions[timestep * self.agents + agent])
    }

    /// Goal of every agent: its position at the final timestep (T - 1).
    pub fn goals(&self) -> &[Vector3<f64>] {
        self.row(self.timesteps - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_AGENTS: &str = "\
timestep,agent_id,x,y,z
0,0,0,0,0
0,1,1,1,1
1,0,2,2,2
1,1,3,3,3
";

    #[test]
    fn test_shape_and_counts() {
        let traj = Trajectory::from_reader(TWO_AGENTS.as_bytes()).unwrap();
        assert_eq!(traj.shape(), (2, 2, 3));
        assert_eq!(traj.agents(), 2);
        assert_eq!(traj.timesteps(), 2);
        assert_eq!(traj.position(1, 1), Some(Vector3::new(3.0, 3.0, 3.0)));
    }

    #[test]
    fn test_unordered_rows_and_gaps() {
        let csv = "\
timestep,agent_id,x,y,z
4,1,9,9,9
0,0,1,2,3
2,1,5,5,5
";
        let traj = Trajectory::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(traj.shape(), (5, 2, 3));
        assert_eq!(traj.position(0, 0), Some(Vector3::new(1.0, 2.0, 3.0)));
        // Absent pairs default to the origin
        assert_eq!(traj.position(3, 0), Some(Vector3::zeros()));
        assert_eq!(traj.position(0, 1), Some(Vector3::zeros()));
        assert_eq!(traj.position(4, 1), Some(Vector3::new(9.0, 9.0, 9.0)));
        assert_eq!(traj.position(5, 0), None);
    }

    #[test]
    fn test_goals_are_last_row() {
        let traj = Trajectory::from_reader(TWO_AGENTS.as_bytes()).unwrap();
        let goals = traj.goals();
        assert_eq!(goals.len(), 2);
        for (i, goal) in goals.iter().enumerate() {
            assert_eq!(Some(*goal), traj.position(traj.timesteps() - 1, i));
        }
    }

    #[test]
    fn test_empty_table_rejected() {
        let csv = "timestep,agent_id,x,y,z\n";
        assert!(matches!(
            Trajectory::from_reader(csv.as_bytes()),
            Err(VizError::EmptyTrajectory)
        ));
    }

    #[test]
    fn test_sparse_agent_ids_rejected() {
        let csv = "timestep,agent_id,x,y,z\n0,0,0,0,0\n0,5,1,1,1\n";
        assert!(matches!(
            Trajectory::from_reader(csv.as_bytes()),
            Err(VizError::AgentIdOutOfRange { agent_id: 5, agents: 2 })
        ));
    }

    #[test]
    fn test_malformed_rows_rejected() {
        let missing_column = "timestep,agent_id,x,y\n0,0,1,1\n";
        assert!(matches!(
            Trajectory::from_reader(missing_column.as_bytes()),
            Err(VizError::Csv(_))
        ));

        let fractional_id = "timestep,agent_id,x,y,z\n0,0.5,1,1,1\n";
        assert!(matches!(
            Trajectory::from_reader(fractional_id.as_bytes()),
            Err(VizError::Csv(_))
        ));
    }

    #[test]
    fn test_huge_timesteps_rejected() {
        let last = TrajectoryRecord {
            timestep: usize::MAX,
            agent_id: 0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        };
        assert!(matches!(
            Trajectory::from_records(&[last]),
            Err(VizError::TrajectoryTooLarge { timestep: usize::MAX, agents: 1 })
        ));

        // T fits, T * N does not
        let timestep = (1usize << (usize::BITS - 1)) - 1;
        let records = [
            TrajectoryRecord { timestep, ..last },
            TrajectoryRecord { timestep: 0, agent_id: 1, ..last },
        ];
        assert!(matches!(
            Trajectory::from_records(&records),
            Err(VizError::TrajectoryTooLarge { agents: 2, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Trajectory::from_path("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, VizError::Io(_)));
    }
}
