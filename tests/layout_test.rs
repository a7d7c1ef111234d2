use tui_maze::core::{generate_seeded, ArenaLayout};
use tui_maze::types::{BodyLabel, BORDER_THICKNESS, WALL_THICKNESS};

fn interior_segments(rows: usize, columns: usize) -> usize {
    (rows - 1) * columns + rows * (columns - 1)
}

#[test]
fn test_wall_count_is_segments_minus_passages() {
    for (rows, columns) in [(1, 1), (2, 2), (6, 6), (4, 9), (10, 3)] {
        let grid = generate_seeded(rows, columns, 5).unwrap();
        let layout = ArenaLayout::from_grid(&grid, 600.0, 600.0);
        assert_eq!(
            layout.walls.len(),
            interior_segments(rows, columns) - (rows * columns - 1),
            "{}x{}",
            rows,
            columns
        );
        assert!(layout.walls.iter().all(|w| w.label == BodyLabel::Wall));
    }
}

#[test]
fn test_default_arena_has_twenty_five_walls() {
    let grid = generate_seeded(6, 6, 123).unwrap();
    let layout = ArenaLayout::from_grid(&grid, 600.0, 600.0);
    assert_eq!(layout.walls.len(), 25);
    assert_eq!(layout.borders.len(), 4);
}

#[test]
fn test_borders_frame_the_arena() {
    let grid = generate_seeded(3, 4, 1).unwrap();
    let layout = ArenaLayout::from_grid(&grid, 400.0, 300.0);

    let top = layout.borders[0];
    assert_eq!((top.x, top.y, top.width, top.height), (200.0, 0.0, 400.0, BORDER_THICKNESS));
    let bottom = layout.borders[1];
    assert_eq!((bottom.x, bottom.y), (200.0, 300.0));
    let left = layout.borders[2];
    assert_eq!((left.x, left.y, left.width, left.height), (0.0, 150.0, BORDER_THICKNESS, 300.0));
    let right = layout.borders[3];
    assert_eq!((right.x, right.y), (400.0, 150.0));
    assert!(layout.borders.iter().all(|b| b.label == BodyLabel::Border));
}

#[test]
fn test_goal_and_ball_sit_in_opposite_corners() {
    let grid = generate_seeded(6, 6, 2).unwrap();
    let layout = ArenaLayout::from_grid(&grid, 600.0, 600.0);

    assert_eq!(layout.goal.label, BodyLabel::Goal);
    assert_eq!((layout.goal.x, layout.goal.y), (550.0, 550.0));
    assert!((layout.goal.width - 70.0).abs() < 1e-4);
    assert!((layout.goal.height - 70.0).abs() < 1e-4);

    assert_eq!((layout.ball.x, layout.ball.y), (50.0, 50.0));
    assert_eq!(layout.ball.radius, 25.0);
}

#[test]
fn test_closed_walls_match_the_grid() {
    let grid = generate_seeded(5, 5, 99).unwrap();
    let layout = ArenaLayout::from_grid(&grid, 500.0, 500.0);

    for (r, row) in grid.horizontal_passages().iter().enumerate() {
        for (c, &open) in row.iter().enumerate() {
            let (x, y) = (c as f32 * 100.0 + 50.0, r as f32 * 100.0 + 100.0);
            let found = layout
                .walls
                .iter()
                .any(|w| w.x == x && w.y == y && w.width == 100.0 && w.height == WALL_THICKNESS);
            assert_eq!(found, !open, "horizontal [{}][{}]", r, c);
        }
    }
    for (r, row) in grid.vertical_passages().iter().enumerate() {
        for (c, &open) in row.iter().enumerate() {
            let (x, y) = (c as f32 * 100.0 + 100.0, r as f32 * 100.0 + 50.0);
            let found = layout
                .walls
                .iter()
                .any(|w| w.x == x && w.y == y && w.width == WALL_THICKNESS && w.height == 100.0);
            assert_eq!(found, !open, "vertical [{}][{}]", r, c);
        }
    }
}
