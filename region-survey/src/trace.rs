use tracing::debug;

use crate::{
    direction::{Direction, SideSet},
    events::{NullSink, TraceEvent, TraceSink},
    grid::{Grid, Position},
    region::{Region, Survey},
};

/// Surveys the whole grid: partitions it into maximal 4-connected regions of
/// identical label and computes each region's area, perimeter, and count of
/// distinct straight sides.
#[tracing::instrument(skip_all)]
pub fn survey(grid: &Grid) -> Survey {
    survey_with(grid, &mut NullSink)
}

/// Like [`survey`], emitting a [`TraceEvent`] to `sink` for every cell visit
/// and side decision. The sink is invoked synchronously; a blocking sink
/// stalls the trace.
#[tracing::instrument(skip_all)]
pub fn survey_with(grid: &Grid, sink: &mut impl TraceSink) -> Survey {
    let mut tracer = Tracer::new(grid);
    let mut survey = Survey::default();

    for pos in grid.positions() {
        if tracer.is_visited(pos) {
            continue;
        }
        let region = tracer.trace_region(grid.get(pos), pos, sink);
        sink.emit(TraceEvent::RegionClosed {
            label: region.label,
            area: region.area,
            sides: region.sides,
        });
        survey.push(region);
    }

    survey
}

/// Pass-scoped state: the visited overlay and the board-shaped record of
/// boundary masks for visited cells. Both live exactly as long as one survey
/// pass and are discarded once the catalog is built.
struct Tracer<'a> {
    grid: &'a Grid,
    visited: Vec<bool>,
    found_edges: Vec<SideSet>,
}

impl<'a> Tracer<'a> {
    fn new(grid: &'a Grid) -> Self {
        let len = grid.width() * grid.height();
        Self {
            grid,
            visited: vec![false; len],
            found_edges: vec![SideSet::EMPTY; len],
        }
    }

    fn is_visited(&self, pos: Position) -> bool {
        self.grid.valid(pos) && self.visited[self.grid.index(pos)]
    }

    fn same_label(&self, label: char, pos: Position) -> bool {
        self.grid.get(pos) == label
    }

    /// Flood-fills one region depth-first from `start` over an explicit
    /// worklist. Neighbors are pushed in reverse [`Direction::CARDINALS`]
    /// order so `Up` pops first and the scan policy holds depth-first.
    fn trace_region(
        &mut self,
        label: char,
        start: Position,
        sink: &mut impl TraceSink,
    ) -> Region {
        let mut region = Region {
            label,
            area: 0,
            perimeter: 0,
            sides: 0,
        };
        let mut stack = vec![start];

        while let Some(pos) = stack.pop() {
            // cells can be pushed by two neighbors; only the first pop counts
            if self.is_visited(pos) {
                continue;
            }
            self.visited[self.grid.index(pos)] = true;
            region.area += 1;
            sink.emit(TraceEvent::CellVisited {
                position: pos,
                label,
            });

            let edges = self.boundary_sides(label, pos);
            self.found_edges[self.grid.index(pos)] = edges;
            region.perimeter += edges.len();

            for dir in edges.iter() {
                if self.claim_side(label, pos, dir) {
                    region.sides += 1;
                    debug!("{} {},{} added side: {:?}", label, pos.x, pos.y, dir);
                    sink.emit(TraceEvent::SideAdded {
                        position: pos,
                        direction: dir,
                    });
                }
            }

            for dir in Direction::CARDINALS.into_iter().rev() {
                let next = pos.step(dir);
                if self.is_visited(next) || !self.same_label(label, next) {
                    continue;
                }
                stack.push(next);
            }
        }

        debug!(
            "{} area: {}, perimeter: {}, sides: {}",
            label, region.area, region.perimeter, region.sides
        );
        region
    }

    /// Boundary mask for one cell: a bit per cardinal direction whose
    /// neighbor is out of bounds or carries a different label.
    fn boundary_sides(&self, label: char, pos: Position) -> SideSet {
        let mut sides = SideSet::EMPTY;
        for dir in Direction::CARDINALS {
            if !self.same_label(label, pos.step(dir)) {
                sides.insert(dir);
            }
        }
        sides
    }

    /// Decides whether the boundary edge at `pos` facing `dir` starts a new
    /// straight side or continues one already counted. Walks the
    /// perpendicular axis both ways over same-label cells whose own boundary
    /// mask carries `dir`; a recorded `dir` bit anywhere on the run means the
    /// side was already claimed. Each walk is capped at the first visited
    /// cell: a visited cell either carries the recorded bit (checked first)
    /// or the run is broken there.
    fn claim_side(&self, label: char, pos: Position, dir: Direction) -> bool {
        let (dx, dy) = dir.turn_right().offset();

        for (sx, sy) in [(dx, dy), (-dx, -dy)] {
            let mut next = Position::new(pos.x + sx, pos.y + sy);
            loop {
                if !self.grid.valid(next) || !self.same_label(label, next) {
                    break;
                }
                if self.found_edges[self.grid.index(next)].contains(dir) {
                    return false;
                }
                if self.is_visited(next) {
                    break;
                }
                if !self.boundary_sides(label, next).contains(dir) {
                    break;
                }
                next = Position::new(next.x + sx, next.y + sy);
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid;
    use rstest::rstest;

    const LARGE: &str = "RRRRIICCFF
RRRRIICCCF
VVRRRCCFFF
VVRCCCJFFF
VVVVCJJCFE
VVIVCCJJEE
VVIIICJJEE
MIIIIIJJEE
MIIISIJEEE
MMMISSJEEE";

    #[rstest]
    #[case::four_regions("AAAA\nBBCD\nBBCC\nEEEC", 140, 80)]
    #[case::nested_crosses("OOOOO\nOXOXO\nOOOOO\nOXOXO\nOOOOO", 772, 436)]
    #[case::e_shape("EEEEE\nEXXXX\nEEEEE\nEXXXX\nEEEEE", 692, 236)]
    #[case::diagonal_touch("AAAAAA\nAAABBA\nAAABBA\nABBAAA\nABBAAA\nAAAAAA", 1184, 368)]
    #[case::large(LARGE, 1930, 1206)]
    fn test_pricing(
        #[case] input: &str,
        #[case] perimeter_cost: usize,
        #[case] fence_cost: usize,
    ) -> miette::Result<()> {
        let board = grid::parse(input)?;

        let survey = survey(&board);

        assert_eq!(survey.total_area(), board.width() * board.height());
        assert_eq!(survey.perimeter_cost(), perimeter_cost);
        assert_eq!(survey.fence_cost(), fence_cost);
        Ok(())
    }

    #[rstest]
    #[case::single_cell("A", 1, 4)]
    #[case::single_row("AAAA", 4, 4)]
    #[case::block("AAA\nAAA", 6, 4)]
    #[case::l_tromino("AA\nAB", 3, 6)]
    #[case::plus("BAB\nAAA\nBAB", 5, 12)]
    fn test_shape_sides(
        #[case] input: &str,
        #[case] area: usize,
        #[case] sides: usize,
    ) -> miette::Result<()> {
        let board = grid::parse(input)?;

        let survey = survey(&board);
        let region = survey
            .regions()
            .iter()
            .find(|r| r.label == 'A')
            .expect("region A");

        assert_eq!(region.area, area);
        assert_eq!(region.sides, sides);
        Ok(())
    }

    #[test_log::test]
    fn test_reference_board() -> miette::Result<()> {
        let board = grid::parse("AAAA\nABCA\nAABA\nABAA")?;

        let survey = survey(&board);

        let labels = survey.regions().iter().map(|r| r.label).collect::<Vec<_>>();
        assert_eq!(labels, vec!['A', 'B', 'C', 'B', 'B']);

        let a = survey.regions()[0];
        assert_eq!((a.area, a.perimeter, a.sides), (12, 26, 14));
        for single in &survey.regions()[1..] {
            assert_eq!((single.area, single.perimeter, single.sides), (1, 4, 4));
        }

        assert_eq!(survey.fence_cost(), 184);
        assert_eq!(survey.perimeter_cost(), 328);
        Ok(())
    }

    #[test]
    fn test_enclosed_hole() -> miette::Result<()> {
        let board = grid::parse("BBB\nBAB\nBBB")?;

        let survey = survey(&board);

        assert_eq!(survey.regions().len(), 2);
        let outer = survey.regions()[0];
        let hole = survey.regions()[1];

        // outer boundary (4 sides) plus the hole's inner boundary (4 more)
        assert_eq!((outer.label, outer.area, outer.perimeter, outer.sides), ('B', 8, 16, 8));
        assert_eq!((hole.label, hole.area, hole.sides), ('A', 1, 4));
        assert_eq!(survey.fence_cost(), 68);
        Ok(())
    }

    #[test]
    fn test_diagonal_touch_is_two_regions() -> miette::Result<()> {
        let board = grid::parse("AB\nBA")?;

        let survey = survey(&board);

        assert_eq!(survey.regions().len(), 4);
        for region in survey.regions() {
            assert_eq!((region.area, region.sides), (1, 4));
        }
        Ok(())
    }

    #[test]
    fn test_survey_is_deterministic() -> miette::Result<()> {
        let board = grid::parse(LARGE)?;

        assert_eq!(survey(&board), survey(&board));
        Ok(())
    }

    #[test]
    fn test_event_order() -> miette::Result<()> {
        let board = grid::parse("AB")?;
        let mut events: Vec<TraceEvent> = Vec::new();

        survey_with(&board, &mut events);

        let expected = |x, label| {
            let position = Position::new(x, 0);
            vec![
                TraceEvent::CellVisited { position, label },
                TraceEvent::SideAdded {
                    position,
                    direction: Direction::Up,
                },
                TraceEvent::SideAdded {
                    position,
                    direction: Direction::Right,
                },
                TraceEvent::SideAdded {
                    position,
                    direction: Direction::Down,
                },
                TraceEvent::SideAdded {
                    position,
                    direction: Direction::Left,
                },
                TraceEvent::RegionClosed {
                    label,
                    area: 1,
                    sides: 4,
                },
            ]
        };

        let mut wanted = expected(0, 'A');
        wanted.extend(expected(1, 'B'));
        assert_eq!(events, wanted);
        Ok(())
    }
}
