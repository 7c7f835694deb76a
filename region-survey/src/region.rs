use std::fmt;

use itertools::Itertools;

/// One maximal 4-connected run of identically labeled cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub label: char,
    /// Number of member cells.
    pub area: usize,
    /// Count of exposed edges.
    pub perimeter: usize,
    /// Count of distinct straight boundary runs.
    pub sides: usize,
}

impl Region {
    pub fn fence_cost(&self) -> usize {
        self.area * self.sides
    }

    pub fn perimeter_cost(&self) -> usize {
        self.area * self.perimeter
    }
}

/// Catalog of every region discovered by one survey pass, in row-major
/// discovery order. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Survey {
    regions: Vec<Region>,
}

impl Survey {
    pub(crate) fn push(&mut self, region: Region) {
        self.regions.push(region);
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Total side-aware pricing: sum of area × sides over all regions.
    pub fn fence_cost(&self) -> usize {
        self.regions.iter().map(Region::fence_cost).sum()
    }

    /// Simpler cross-check pricing: sum of area × perimeter over all regions.
    pub fn perimeter_cost(&self) -> usize {
        self.regions.iter().map(Region::perimeter_cost).sum()
    }

    /// Sum of region areas; equals width × height of the surveyed grid.
    pub fn total_area(&self) -> usize {
        self.regions.iter().map(|r| r.area).sum()
    }
}

impl fmt::Display for Survey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.regions
                .iter()
                .map(|r| format!(
                    "{} area: {}, perimeter: {}, sides: {}",
                    r.label, r.area, r.perimeter, r.sides
                ))
                .join("\n")
        )
    }
}
