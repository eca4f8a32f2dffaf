use dungeon_chase_core::{CellCoord, Command, Direction, EnemyId};
use dungeon_chase_system_pursuit::{find_path, Pursuit};
use dungeon_chase_world::{self as world, load_world, query};

fn assert_four_adjacent(path: &[CellCoord]) {
    for pair in path.windows(2) {
        assert_eq!(
            pair[0].manhattan_distance(pair[1]),
            1,
            "cells {:?} and {:?} are not 4-adjacent",
            pair[0],
            pair[1],
        );
    }
}

#[test]
fn open_grid_path_length_matches_manhattan_distance() {
    let world = load_world("@....\n.....\n.....\n....z").expect("map");
    let grid = query::tile_grid(&world);
    let start = CellCoord::new(4, 3);
    let goal = CellCoord::new(0, 0);

    let path = find_path(grid, start, goal);

    assert_eq!(
        path.len() as u32,
        start.manhattan_distance(goal) + 1,
        "optimal path visits manhattan-distance + 1 cells"
    );
    assert_eq!(path.first().copied(), Some(goal));
    assert_eq!(path.last().copied(), Some(start));
    assert_four_adjacent(&path);
}

#[test]
fn path_routes_around_walls() {
    let world = load_world("@.#.z\n..#..\n.....").expect("map");
    let grid = query::tile_grid(&world);

    let path = find_path(grid, CellCoord::new(4, 0), CellCoord::new(0, 0));

    assert_eq!(path.first().copied(), Some(CellCoord::new(0, 0)));
    assert_eq!(path.last().copied(), Some(CellCoord::new(4, 0)));
    assert_four_adjacent(&path);
    assert!(
        path.iter().all(|cell| grid.is_passable(*cell)),
        "path never crosses impassable terrain"
    );
    // The wall column forces a detour through the open bottom row.
    assert_eq!(path.len(), 9);
}

#[test]
fn walled_off_goal_yields_empty_path() {
    let world = load_world("@.#..\n..#.z\n..#..").expect("map");
    let grid = query::tile_grid(&world);

    let path = find_path(grid, CellCoord::new(4, 1), CellCoord::new(0, 0));

    assert!(path.is_empty());
}

#[test]
fn closed_doors_seal_a_route_like_walls() {
    let world = load_world("@.|.z").expect("map");
    let grid = query::tile_grid(&world);

    let path = find_path(grid, CellCoord::new(4, 0), CellCoord::new(0, 0));

    assert!(path.is_empty());
}

#[test]
fn start_equals_goal_yields_single_cell_path() {
    let world = load_world("@.").expect("map");
    let grid = query::tile_grid(&world);

    let path = find_path(grid, CellCoord::new(0, 0), CellCoord::new(0, 0));

    assert_eq!(path, vec![CellCoord::new(0, 0)]);
}

#[test]
fn repeated_searches_return_identical_paths() {
    // A 4x4 open room offers many equal-cost routes; the insertion-order
    // tie-break must keep the choice stable.
    let world = load_world("@...\n....\n....\n...z").expect("map");
    let grid = query::tile_grid(&world);
    let start = CellCoord::new(3, 3);
    let goal = CellCoord::new(0, 0);

    let first = find_path(grid, start, goal);
    let second = find_path(grid, start, goal);

    assert_eq!(first, second);
    assert_eq!(first.len(), 7);
}

#[test]
fn plan_advances_every_enemy_one_cell_closer() {
    let mut world = load_world("@....\n.....\na...b").expect("map");
    let mut pursuit = Pursuit::default();
    let mut commands = Vec::new();

    pursuit.plan(&world, &mut commands);

    assert_eq!(commands.len(), 2);

    let player = query::player(&world);
    let enemies = query::enemy_view(&world).into_vec();
    let mut events = Vec::new();
    for command in &commands {
        world::apply(&mut world, *command, &mut events);
    }

    let advanced = query::enemy_view(&world).into_vec();
    for (before, after) in enemies.iter().zip(advanced.iter()) {
        assert_eq!(
            after.cell.manhattan_distance(player) + 1,
            before.cell.manhattan_distance(player),
            "enemy {} did not move one cell closer",
            before.id.get(),
        );
    }
}

#[test]
fn adjacent_enemy_stays_put() {
    let world = load_world("@z").expect("map");
    let mut pursuit = Pursuit::default();
    let mut commands = Vec::new();

    pursuit.plan(&world, &mut commands);

    assert!(commands.is_empty());
}

#[test]
fn unreachable_enemy_stays_put() {
    let world = load_world("@.#.z").expect("map");
    let mut pursuit = Pursuit::default();
    let mut commands = Vec::new();

    pursuit.plan(&world, &mut commands);

    assert!(commands.is_empty());
}

#[test]
fn plan_emits_steps_in_stable_enemy_order() {
    let world = load_world("@....\n....a\nb...c").expect("map");
    let mut pursuit = Pursuit::default();
    let mut commands = Vec::new();

    pursuit.plan(&world, &mut commands);

    let stepped: Vec<EnemyId> = commands
        .iter()
        .filter_map(|command| match command {
            Command::StepEnemy { enemy_id, .. } => Some(*enemy_id),
            _ => None,
        })
        .collect();
    assert_eq!(
        stepped,
        vec![EnemyId::new(0), EnemyId::new(1), EnemyId::new(2)]
    );
}

#[test]
fn planned_step_is_applicable_to_the_world() {
    let mut world = load_world("@..\n.#.\n..z").expect("map");
    let mut pursuit = Pursuit::default();
    let mut commands = Vec::new();

    pursuit.plan(&world, &mut commands);
    assert_eq!(commands.len(), 1);

    let mut events = Vec::new();
    world::apply(&mut world, commands[0], &mut events);
    let enemy = query::enemy_view(&world).into_vec()[0];
    assert!(matches!(
        commands[0],
        Command::StepEnemy {
            direction: Direction::North | Direction::West,
            ..
        }
    ));
    assert_eq!(enemy.cell.manhattan_distance(query::player(&world)), 3);
}
