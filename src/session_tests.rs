#![cfg(test)]

use crate::config::EditorConfig;
use crate::script::parse_script;
use crate::session::{EditorSession, Outcome, SessionError};
use delve_catalog::Material;
use delve_geom::CellCoord;
use delve_grid::Grid;
use delve_place::PlacementError;
use proptest::prelude::*;

fn session(layers: usize, rows: usize, columns: usize) -> EditorSession {
    let cfg = EditorConfig::default();
    EditorSession::from_config(Grid::solid(layers, rows, columns).unwrap(), &cfg).unwrap()
}

fn run(s: &mut EditorSession, src: &str) -> Vec<Result<Outcome, SessionError>> {
    parse_script(src).unwrap().into_iter().map(|c| s.apply(c)).collect()
}

#[test]
fn dig_room_stairs_and_ramp_down() {
    let mut s = session(3, 8, 8);
    assert_eq!(s.layer(), 1);
    let results = run(
        &mut s,
        "goto 1 1\n\
         select\n\
         goto 4 3\n\
         select\n\
         mode stairs\n\
         select\n\
         select\n\
         layer down\n\
         mode ramp\n\
         select\n\
         select\n",
    );
    assert!(results.iter().all(|r| r.is_ok()));
    for row in 1..=3 {
        for column in 1..=4 {
            let want = if (column, row) == (4, 3) { Material::Stairs } else { Material::Floor };
            assert_eq!(s.grid().get(CellCoord::new(column, row, 1)), Ok(want.code()));
        }
    }
    assert_eq!(s.grid().get(CellCoord::new(4, 3, 0)), Ok(Material::Ramp.code()));

    // Back on the room layer the ramp below is not visible through solid stairs.
    s.set_layer(1);
    let d = s.resolve(4, 3).unwrap().unwrap();
    assert_eq!(d.material, Material::Stairs);
    assert!(!d.is_peek());
}

#[test]
fn empty_cells_reveal_layer_below() {
    let mut s = session(3, 4, 4);
    run(&mut s, "layer down\nmode water\nselect\nselect\nlayer up\nmode empty\nselect\nselect\n");
    let d = s.resolve(0, 0).unwrap().unwrap();
    assert_eq!(d.material, Material::Water);
    assert_eq!(d.peek_depth, 1);
    assert_eq!(d.color.a, 0x77);
}

#[test]
fn trade_depot_near_edge_is_partial() {
    let mut s = session(1, 10, 10);
    let results = run(&mut s, "mode trade-depot\ngoto 1 1\nselect\n");
    match &results[2] {
        Err(SessionError::Placement(PlacementError::Incomplete { written, failures })) => {
            assert_eq!(*written, 16);
            assert_eq!(failures.len(), 9);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(s.grid().get(CellCoord::new(3, 3, 0)), Ok(Material::TradingCircle.code()));
}

#[test]
fn copy_paste_clips_at_edge() {
    let mut s = session(1, 4, 4);
    let results = run(
        &mut s,
        "mode water\nselect\nmove right\nselect\n\
         mode copy\ngoto 0 0\nselect\ngoto 1 1\nselect\n\
         goto 3 3\npaste\n",
    );
    assert!(results[..9].iter().all(|r| r.is_ok()));
    assert!(matches!(
        results[10],
        Err(SessionError::Placement(PlacementError::Incomplete { written: 1, .. }))
    ));
    assert_eq!(s.grid().get(CellCoord::new(3, 3, 0)), Ok(Material::Water.code()));
}

proptest! {
    // Cursor movement never leaves the grid.
    #[test]
    fn cursor_stays_inside(moves in prop::collection::vec((0usize..6, 0u32..20), 0..40)) {
        let mut s = session(4, 7, 5);
        let words = ["move up", "move down", "move left", "move right", "layer up", "layer down"];
        let src: String = moves.iter().map(|(w, n)| format!("{} {}\n", words[*w], n)).collect();
        run(&mut s, &src);
        let c = s.cursor();
        prop_assert!(s.grid().contains(c));
    }

    // Step counts past i32::MAX still clamp towards the requested edge.
    #[test]
    fn huge_steps_reach_the_edge(n in (i32::MAX as u32 - 2)..=u32::MAX) {
        let mut s = session(1, 7, 5);
        run(&mut s, &format!("goto 2 3\nmove right {}\nmove up {}\n", n, n));
        prop_assert_eq!((s.cursor().column, s.cursor().row), (4, 0));
    }
}
