use std::collections::BTreeSet;
use std::path::Path;

use quadlife::HashLife;
use quadlife::Point;
use quadlife::World;
use quadlife::pattern;

fn load(name: &str) -> World {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/patterns")
        .join(name);

    let bytes = std::fs::read(&path).unwrap();
    let pattern = pattern::read_pattern(&bytes).unwrap();

    World::from_points(&pattern.cells)
}

fn cells(world: &World) -> BTreeSet<Point> {
    world.points().into_iter().collect()
}

fn shifted(cells: &BTreeSet<Point>, (dx, dy): Point) -> BTreeSet<Point> {
    cells.iter().map(|&(x, y)| (x + dx, y + dy)).collect()
}

#[test]
fn still_life() {
    let mut world = load("beehive.cells");
    let before = cells(&world);

    for iterations in [1, 2, 7, 1 << 20] {
        world.advance(iterations);
        assert_eq!(cells(&world), before);
    }
}

#[test]
fn oscillators() {
    for name in ["blinker.cells", "toad.lif"] {
        let mut world = load(name);
        let phase_0 = cells(&world);

        world.advance(1);
        let phase_1 = cells(&world);
        assert_ne!(phase_0, phase_1, "{name}");
        assert_eq!(phase_0.len(), phase_1.len(), "{name}");

        world.advance(1);
        assert_eq!(cells(&world), phase_0, "{name}");

        world.advance(999);
        assert_eq!(cells(&world), phase_1, "{name}");
    }
}

#[test]
fn glider_moves_south_east() {
    let mut world = load("glider.rle");
    let start = cells(&world);

    world.advance(4);
    assert_eq!(cells(&world), shifted(&start, (1, 1)));

    world.advance(4 * 1000);
    assert_eq!(cells(&world), shifted(&start, (1001, 1001)));
}

#[test]
fn spaceship_moves_west() {
    let mut world = load("lwss.life");
    let start = cells(&world);

    world.advance(4);
    assert_eq!(cells(&world), shifted(&start, (-2, 0)));
}

#[test]
fn long_jump() {
    let mut world = load("glider.rle");
    let start = cells(&world);

    world.advance(1 << 40);

    let d = 1 << 38;
    assert_eq!(cells(&world), shifted(&start, (d, d)));
    assert_eq!(world.generation(), 1 << 40);
}

#[test]
fn methuselah() {
    let mut world = load("r_pentomino.rle");

    world.advance(1103);
    assert_eq!(world.population(), 116);

    world.advance(1);
    assert_eq!(world.population(), 116);
}

#[test]
fn glider_gun() {
    let mut world = load("gosper_glider_gun.rle");

    world.advance(30);
    assert_eq!(world.population(), 41);

    world.advance(270);
    assert_eq!(world.population(), 86);

    world.advance(2700);
    assert_eq!(world.population(), 536);
}

#[test]
fn one_jump_equals_many_steps() {
    let mut jump = load("r_pentomino.rle");
    let mut steps = load("r_pentomino.rle");

    jump.advance(500);
    for _ in 0..500 {
        steps.advance(1);
    }

    assert_eq!(cells(&jump), cells(&steps));
}

#[test]
fn engine_round_trip() {
    let world = load("gosper_glider_gun.rle");
    let points = cells(&world);

    let mut life = HashLife::new();
    let root = life.build_tree(&world.points());
    let min = points.iter().fold((i128::MAX, i128::MAX), |(mx, my), &(x, y)| {
        (mx.min(x), my.min(y))
    });

    let flat: BTreeSet<Point> = life.flatten(root).into_iter().collect();
    let (fx, fy) = flat.iter().fold((i128::MAX, i128::MAX), |(mx, my), &(x, y)| {
        (mx.min(x), my.min(y))
    });

    assert_eq!(shifted(&flat, (min.0 - fx, min.1 - fy)), points);
}
