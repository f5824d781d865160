//! Team and child models.
//!
//! A team owns an ordered roster of children and a program progress counter:
//! the number of curriculum workshops it has completed so far. The counter is
//! advanced only by the backend, as a side effect of recording a new
//! workshop occurrence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::workshop::TOTAL_WORKSHOPS;

/// A child enrolled in exactly one team. Roster membership determines which
/// children need an attendance mark for the open workshop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl Child {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

/// Number of workshops a team has completed (0..=12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Progress {
    pub current: u8,
}

impl Progress {
    pub fn is_finished(&self) -> bool {
        self.current >= TOTAL_WORKSHOPS
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Program {
    #[serde(default)]
    pub progress: Progress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub children: Vec<Child>,
    #[serde(default)]
    pub program: Program,
}

impl Team {
    /// The ordered roster of children assigned to this team.
    pub fn roster(&self) -> &[Child] {
        &self.children
    }

    /// Completed-workshop counter, clamped to the curriculum length in case
    /// the backend ever reports a value past the end.
    pub fn current(&self) -> u8 {
        self.program.progress.current.min(TOTAL_WORKSHOPS)
    }
}
