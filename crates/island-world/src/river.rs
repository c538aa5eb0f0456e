//! River carving: a random walk from one grid edge to another.

use crate::grid::TileGrid;
use crate::random::RandomSource;
use island_core::{Direction, Position, TileType};
use tracing::{trace, warn};

/// Segments a river may take per tile of grid size before it is abandoned
const SEGMENTS_PER_TILE: i32 = 10;
/// Segment lengths are drawn from `[1, size / FLOW_DISTANCE_DIVISOR)`
const FLOW_DISTANCE_DIVISOR: i32 = 25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiverReport {
    /// Grid edge the river started on
    pub source_edge: Direction,
    pub start: Position,
    pub end: Position,
    pub segments: i32,
    /// False when the segment budget ran out before reaching another edge
    pub completed: bool,
    /// Tiles that were not river before this call
    pub tiles_carved: usize,
}

/// Carve one river of `TileType::River`.
///
/// The river starts at a random point on a random edge and never flows back
/// towards that edge. Each segment walks a random allowed direction for a
/// random distance, dropping steps that would leave the grid. The river is
/// complete once it stands on a grid edge off the line of its source edge;
/// after `size * 10` segments it is abandoned as is.
pub fn carve_river<R: RandomSource>(grid: &mut TileGrid, rng: &mut R) -> RiverReport {
    let size = grid.size();
    let all = Direction::all();
    let source_edge = rng.choose(&all).unwrap_or(Direction::North);
    let along = rng.range(0, size);
    let start = match source_edge {
        Direction::North => Position::new(along, 0),
        Direction::South => Position::new(along, size - 1),
        Direction::East => Position::new(size - 1, along),
        Direction::West => Position::new(0, along),
    };
    let flows: Vec<Direction> = all.into_iter().filter(|d| *d != source_edge).collect();

    let mut report = RiverReport {
        source_edge,
        start,
        end: start,
        segments: 0,
        completed: false,
        tiles_carved: 0,
    };
    if !grid.in_range(start) {
        return report;
    }
    report.tiles_carved += mark_river(grid, start);

    let max_segments = size * SEGMENTS_PER_TILE;
    let mut current = start;
    while report.segments < max_segments {
        report.segments += 1;
        let direction = rng.choose(&flows).unwrap_or(source_edge.opposite());
        let distance = rng.range(1, size / FLOW_DISTANCE_DIVISOR);

        for _ in 0..distance {
            let next = current.step(direction);
            if !grid.in_range(next) {
                break;
            }
            report.tiles_carved += mark_river(grid, next);
            current = next;
        }

        if grid.is_edge(current) && !on_source_line(current, source_edge, size) {
            report.completed = true;
            break;
        }
    }
    report.end = current;

    if report.completed {
        trace!(
            start = %report.start,
            end = %report.end,
            segments = report.segments,
            carved = report.tiles_carved,
            "River reached the coast"
        );
    } else {
        warn!(
            start = %report.start,
            end = %report.end,
            segments = report.segments,
            "River abandoned after exhausting its segment budget"
        );
    }
    report
}

fn mark_river(grid: &mut TileGrid, pos: Position) -> usize {
    match grid.get(pos) {
        Some(TileType::River) | None => 0,
        Some(_) => usize::from(grid.set(pos, TileType::River)),
    }
}

/// Whether `pos` shares the row or column of the edge the river started on
fn on_source_line(pos: Position, source_edge: Direction, size: i32) -> bool {
    match source_edge {
        Direction::North => pos.y == 0,
        Direction::South => pos.y == size - 1,
        Direction::East => pos.x == size - 1,
        Direction::West => pos.x == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fill::fill_region;
    use crate::random::SequenceRandom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::{HashSet, VecDeque};

    fn ocean(size: i32) -> TileGrid {
        let mut grid = TileGrid::new(size);
        let bounds = grid.bounds();
        fill_region(&mut grid, bounds, TileType::Ocean);
        grid
    }

    fn river_connects(grid: &TileGrid, from: Position, to: Position) -> bool {
        let mut seen = HashSet::from([from]);
        let mut queue = VecDeque::from([from]);
        while let Some(pos) = queue.pop_front() {
            if pos == to {
                return true;
            }
            for (next, tile) in grid.neighbors(pos) {
                if tile == TileType::River && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        false
    }

    #[test]
    fn test_straight_river_from_north_to_south() {
        // on 25 tiles every segment is one step long and draws nothing
        let mut grid = ocean(25);
        let mut values = vec![0, 7];
        values.extend(std::iter::repeat(0).take(24));
        let mut rng = SequenceRandom::new(values);

        let report = carve_river(&mut grid, &mut rng);
        assert_eq!(report.source_edge, Direction::North);
        assert_eq!(report.start, Position::new(7, 0));
        assert_eq!(report.end, Position::new(7, 24));
        assert_eq!(report.segments, 24);
        assert!(report.completed);
        assert_eq!(report.tiles_carved, 25);
        assert_eq!(grid.count(TileType::River), 25);
    }

    #[test]
    fn test_walking_along_source_edge_does_not_finish() {
        let mut grid = ocean(25);
        // start in the north-west corner, walk east three times, then south
        let mut values = vec![0, 0, 1, 1, 1];
        values.extend(std::iter::repeat(0).take(24));
        let mut rng = SequenceRandom::new(values);

        let report = carve_river(&mut grid, &mut rng);
        assert_eq!(report.start, Position::new(0, 0));
        assert_eq!(report.end, Position::new(3, 24));
        assert_eq!(report.segments, 27);
        assert!(report.completed);
    }

    #[test]
    fn test_clipped_steps_leave_river_in_place() {
        let mut grid = ocean(25);
        // north-west corner start: west is clipped, one step east, then south
        let mut values = vec![0, 0, 2, 1];
        values.extend(std::iter::repeat(0).take(24));
        let mut rng = SequenceRandom::new(values);
        let report = carve_river(&mut grid, &mut rng);

        assert_eq!(report.start, Position::new(0, 0));
        assert_eq!(report.end, Position::new(1, 24));
        assert_eq!(report.segments, 26);
        assert!(report.completed);
        assert_eq!(grid.count(TileType::River), 26);
        for (pos, tile) in grid.iter() {
            if tile == TileType::River {
                assert!(pos.x <= 1);
            }
        }
    }

    #[test]
    fn test_abandoned_after_segment_budget() {
        let mut grid = ocean(25);
        // south edge start at x = 2, then east and west forever along the edge
        let mut rng = SequenceRandom::new(vec![1, 2, 1, 2]);
        let report = carve_river(&mut grid, &mut rng);

        assert_eq!(report.source_edge, Direction::South);
        assert_eq!(report.segments, 25 * SEGMENTS_PER_TILE);
        assert!(!report.completed);
        for (pos, tile) in grid.iter() {
            if tile == TileType::River {
                assert_eq!(pos.y, 24);
            }
        }
    }

    #[test]
    fn test_random_rivers_reach_another_edge_or_stop_within_budget() {
        for seed in 0..64 {
            let size = 40 + (seed as i32 % 3) * 30;
            let mut grid = ocean(size);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let report = carve_river(&mut grid, &mut rng);

            assert!(report.segments <= size * SEGMENTS_PER_TILE);
            assert!(river_connects(&grid, report.start, report.end));
            if report.completed {
                assert!(grid.is_edge(report.end));
                assert!(!on_source_line(report.end, report.source_edge, size));
            }
            for (pos, tile) in grid.iter() {
                if tile == TileType::River {
                    assert!(grid.in_range(pos));
                }
            }
        }
    }

    #[test]
    fn test_river_never_steps_towards_source_edge() {
        let mut grid = ocean(60);
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let report = carve_river(&mut grid, &mut rng);
        for (pos, tile) in grid.iter() {
            if tile != TileType::River {
                continue;
            }
            match report.source_edge {
                Direction::North => assert!(pos.y >= report.start.y),
                Direction::South => assert!(pos.y <= report.start.y),
                Direction::East => assert!(pos.x <= report.start.x),
                Direction::West => assert!(pos.x >= report.start.x),
            }
        }
    }

    #[test]
    fn test_empty_grid() {
        let mut grid = TileGrid::new(0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let report = carve_river(&mut grid, &mut rng);
        assert_eq!(report.segments, 0);
        assert!(!report.completed);
    }
}
