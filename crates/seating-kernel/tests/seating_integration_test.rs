//! End-to-end checks of the seating kernel through its public API.
//!
//! Each test drives a `SeatingState` (or the free functions behind it) the way
//! an application loop would: one operation per user gesture.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use seating_kernel::{
    Assignment, GridSpec, LayoutRecord, Outcome, Position, RejectReason, Roster, SeatGeometry,
    SeatingState, StudentId, Template, ValidPositionSet, place_random, place_unseated, reconcile,
    relocate, shape_cells,
};

fn p(row: u8, col: u8) -> Position {
    Position::new(row, col)
}

fn roster_of(names: &[&str]) -> (Roster, Vec<StudentId>) {
    let mut roster = Roster::new();
    let ids = names.iter().filter_map(|n| roster.add(n, "")).collect();
    (roster, ids)
}

fn state(rows: u32, cols: u32, template: Template) -> SeatingState {
    SeatingState::with_grid(GridSpec::new(rows, cols, template), SeatGeometry::default())
}

#[test]
fn test_reading_order_contract() {
    let (roster, ids) = roster_of(&["E1", "E2", "E3"]);
    let valid = shape_cells(2, 3, Template::Full);

    let seats = reconcile(&Assignment::new(), &ValidPositionSet::new(), &valid, roster.as_slice());

    let placed: Vec<(Position, StudentId)> =
        seats.iter().map(|(pos, id)| (pos, id.clone())).collect();
    assert_eq!(
        placed,
        vec![(p(0, 0), ids[0].clone()), (p(0, 1), ids[1].clone()), (p(0, 2), ids[2].clone())]
    );
}

#[test]
fn test_u_template_shape() {
    let valid = shape_cells(3, 3, Template::U);
    let expected: ValidPositionSet = [(0, 0), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        .into_iter()
        .map(|(r, c)| p(r, c))
        .collect();
    assert_eq!(valid, expected);
}

#[test]
fn test_reconcile_deterministic_and_idempotent() {
    let (roster, ids) = roster_of(&["A", "B", "C", "D", "E", "F"]);
    let v1 = shape_cells(3, 4, Template::Full);
    let v2 = shape_cells(3, 4, Template::U);

    let mut seats = Assignment::new();
    seats.seat(p(1, 1), ids[0].clone(), &v1);
    seats.seat(p(2, 3), ids[1].clone(), &v1);
    seats.seat(p(0, 2), ids[2].clone(), &v1);

    let a = reconcile(&seats, &v1, &v2, roster.as_slice());
    let b = reconcile(&seats, &v1, &v2, roster.as_slice());
    assert_eq!(a, b);
    assert_eq!(reconcile(&a, &v2, &v2, roster.as_slice()), a);
    assert!(a.verify(&v2, &roster).is_ok());
    assert_eq!(a.position_of(&ids[1]), Some(p(2, 3)));
}

#[test]
fn test_move_and_swap_semantics() {
    let (roster, ids) = roster_of(&["E1", "E2"]);
    let valid = shape_cells(2, 2, Template::Full);

    let mut seats = Assignment::new();
    seats.seat(p(0, 0), ids[0].clone(), &valid);

    let (moved, outcome) = relocate(&seats, &valid, p(0, 0), p(0, 1));
    assert_eq!(outcome, Outcome::Moved { from: p(0, 0), to: p(0, 1) });
    assert!(moved.student_at(p(0, 0)).is_none());
    assert_eq!(moved.student_at(p(0, 1)), Some(&ids[0]));

    seats.seat(p(0, 1), ids[1].clone(), &valid);
    let (swapped, _) = relocate(&seats, &valid, p(0, 0), p(0, 1));
    assert_eq!(swapped.student_at(p(0, 0)), Some(&ids[1]));
    assert_eq!(swapped.student_at(p(0, 1)), Some(&ids[0]));
    assert!(swapped.verify(&valid, &roster).is_ok());
}

#[test]
fn test_drop_outside_template_rejected() {
    let (_, ids) = roster_of(&["E1"]);
    let valid = shape_cells(3, 3, Template::U);
    let mut seats = Assignment::new();
    seats.seat(p(1, 0), ids[0].clone(), &valid);

    let (after, outcome) = relocate(&seats, &valid, p(1, 0), p(1, 1));
    assert_eq!(after, seats);
    assert_eq!(outcome, Outcome::Rejected(RejectReason::NoSeat(p(1, 1))));
}

#[test]
fn test_capacity_overflow() {
    let (roster, ids) = roster_of(&["A", "B", "C", "D", "E"]);
    let valid = shape_cells(1, 3, Template::Full);

    let det = place_unseated(&Assignment::new(), &valid, roster.as_slice());
    assert_eq!(det.len(), 3);
    assert!(ids[..3].iter().all(|id| det.position_of(id).is_some()));
    assert!(ids[3..].iter().all(|id| det.position_of(id).is_none()));

    let rec = reconcile(&Assignment::new(), &ValidPositionSet::new(), &valid, roster.as_slice());
    assert_eq!(rec, det);

    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let random = place_random(&valid, roster.as_slice(), &mut rng);
    assert_eq!(random.len(), 3);
    assert!(random.verify(&valid, &roster).is_ok());
}

#[test]
fn test_classroom_session() {
    let mut st = state(4, 6, Template::Full);
    let ids = st.import_students(
        ["Ana", "Ben", "Cem", "Dia", "Eli", "Fay", "Gus", "Hal"]
            .into_iter()
            .map(|n| (n, "")),
    );
    assert_eq!(st.seats().len(), 8);

    // Drag Ana two seats to the right and one row back (stride 80).
    assert!(st.begin_drag(p(0, 0)));
    st.drag_to(158.0, 83.0);
    assert!(st.release_drag().is_mutation());
    assert_eq!(st.seats().position_of(&ids[0]), Some(p(1, 2)));

    // Switch to a U layout: Ana's seat (1,2) disappears, the back row opens.
    st.set_template(Template::U);
    assert!(st.verify().is_ok());
    assert!(!st.valid().contains(&p(1, 2)));
    assert!(st.seats().position_of(&ids[0]).is_some());

    // Delete a student and reload from a snapshot.
    st.remove_student(&ids[3]);
    let record = LayoutRecord::from(&st);
    let reloaded = SeatingState::from_record(record);
    assert_eq!(reloaded.seats(), st.seats());
    assert!(reloaded.verify().is_ok());
    assert!(reloaded.seats().position_of(&ids[3]).is_none());
}
