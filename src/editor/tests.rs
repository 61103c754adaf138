// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use crate::model::fixtures::{catalog, ex, push_pull_snapshot, set, ROUTINE_ID};
use crate::model::RoutineSetRow;
use crate::plan::{
    ExerciseCreate, ExerciseOrderUpdate, SavePlan, SetCreate, SetOrderUpdate, SetValuesUpdate,
};
use crate::runner::ExerciseRef;

use super::{build_save_plan, EditorError, EditorRoutine, ExerciseMeta, SetFieldUpdate};

#[fixture]
fn editor() -> EditorRoutine {
    EditorRoutine::from_snapshot(&push_pull_snapshot())
}

fn set_ids(editor: &EditorRoutine, ex_id: i64) -> Vec<i64> {
    editor
        .exercise(ex(ex_id))
        .expect("exercise")
        .visible_sets()
        .map(|node| node.id.get())
        .collect()
}

fn bench_meta() -> ExerciseMeta {
    let entries = catalog();
    let bench = &entries[0];
    ExerciseMeta {
        name: Some(bench.name.clone()),
        muscle_group: bench.muscle_group.clone(),
        category: bench.category.clone(),
    }
}

#[rstest]
fn snapshot_builds_ordered_clean_tree(editor: EditorRoutine) {
    let order: Vec<i64> = editor.visible_exercises().map(|node| node.id.get()).collect();
    assert_eq!(order, vec![10, 11]);
    assert_eq!(set_ids(&editor, 10), vec![20, 21]);
    assert_eq!(set_ids(&editor, 11), vec![22]);

    let bench = editor.exercise(ex(10)).expect("bench");
    assert_eq!(bench.exercise_name.as_deref(), Some("Bench Press"));
    assert_eq!(bench.muscle_group.as_deref(), Some("Chest"));

    assert!(!editor.has_unsaved());
    assert_eq!(build_save_plan(&editor), SavePlan::default());
}

#[test]
fn snapshot_drops_orphans_and_zero_fills_missing_values() {
    let mut snapshot = push_pull_snapshot();
    snapshot.sets.push(RoutineSetRow {
        id: set(30),
        routine_exercise_id: ex(99),
        exercise_id: 1,
        set_order: 1,
        is_active: true,
        planned_reps: Some(5),
        planned_weight_kg: Some(5.0),
        notes: None,
    });
    snapshot.sets[0].planned_reps = None;
    snapshot.sets[0].planned_weight_kg = None;

    let editor = EditorRoutine::from_snapshot(&snapshot);
    let bench = editor.exercise(ex(10)).expect("bench");
    let second = bench.set(set(21)).expect("set 21");
    assert_eq!(second.planned_reps, 0);
    assert_eq!(second.planned_weight_kg, 0.0);
    assert!(editor.visible_exercises().all(|node| node.set(set(30)).is_none()));
}

#[rstest]
fn added_exercise_gets_temp_id_and_next_order(mut editor: EditorRoutine) {
    let new_ex = editor.add_exercise(1, bench_meta());
    let new_set = editor.add_set(new_ex).expect("add set");

    assert_eq!(new_ex.get(), -1);
    assert_eq!(new_set.get(), -2);
    let node = editor.exercise(new_ex).expect("new exercise");
    assert_eq!(node.exercise_order, 3);
    assert!(node.flags.created);
    assert_eq!(node.set(new_set).map(|s| s.set_order), Some(1));
    assert!(editor.has_unsaved());
}

#[rstest]
fn created_exercise_is_planned_with_filled_sets(mut editor: EditorRoutine) {
    let new_ex = editor.add_exercise(1, bench_meta());
    let filled = editor.add_set(new_ex).expect("add set");
    editor.add_set(new_ex).expect("blank set");
    editor
        .update_set_field(new_ex, filled, SetFieldUpdate::reps_text("8"))
        .expect("reps");
    editor
        .update_set_field(new_ex, filled, SetFieldUpdate::weight_text("62.5"))
        .expect("weight");

    let node = editor.exercise(new_ex).expect("new exercise");
    assert!(!node.set(filled).expect("filled").flags.dirty);

    let plan = build_save_plan(&editor);
    assert_eq!(
        plan.create_exercises,
        vec![ExerciseCreate {
            temp_ex_id: new_ex,
            exercise_id: 1,
            order: 3,
            name: "Bench Press".to_owned(),
        }]
    );
    assert_eq!(
        plan.create_sets_by_exercise[&new_ex],
        vec![SetCreate {
            set_id: filled,
            reps: 8,
            weight: 62.5,
            set_order: 1,
        }]
    );
    assert!(plan.update_sets.is_empty());
}

#[rstest]
fn created_exercise_without_values_has_no_bucket(mut editor: EditorRoutine) {
    let new_ex = editor.add_exercise(2, ExerciseMeta::default());
    editor.add_set(new_ex).expect("blank set");

    let plan = build_save_plan(&editor);
    assert_eq!(plan.create_exercises.len(), 1);
    assert_eq!(plan.create_exercises[0].name, "");
    assert!(plan.create_sets_by_exercise.is_empty());
}

#[rstest]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
#[case(f64::NEG_INFINITY)]
#[case(-20.0)]
fn out_of_range_weight_is_stored_as_zero(mut editor: EditorRoutine, #[case] weight: f64) {
    let new_ex = editor.add_exercise(1, bench_meta());
    let blank = editor.add_set(new_ex).expect("blank set");
    let filled = editor.add_set(new_ex).expect("filled set");
    editor
        .update_set_field(new_ex, blank, SetFieldUpdate::PlannedWeightKg(weight))
        .expect("blank weight");
    editor
        .update_set_field(new_ex, filled, SetFieldUpdate::PlannedReps(5))
        .expect("reps");
    editor
        .update_set_field(new_ex, filled, SetFieldUpdate::PlannedWeightKg(weight))
        .expect("filled weight");

    let node = editor.exercise(new_ex).expect("new exercise");
    assert_eq!(node.set(blank).expect("blank").planned_weight_kg, 0.0);

    let plan = build_save_plan(&editor);
    assert_eq!(
        plan.create_sets_by_exercise[&new_ex],
        vec![SetCreate {
            set_id: filled,
            reps: 5,
            weight: 0.0,
            set_order: 2,
        }]
    );
    let json = serde_json::to_value(&plan).expect("json");
    assert_eq!(json["create_sets_by_exercise"]["-1"][0]["weight"], 0.0);
}

#[rstest]
fn nan_weight_on_persisted_set_updates_to_zero(mut editor: EditorRoutine) {
    editor
        .update_set_field(ex(11), set(22), SetFieldUpdate::PlannedWeightKg(f64::NAN))
        .expect("weight");

    let plan = build_save_plan(&editor);
    assert_eq!(
        plan.update_sets,
        vec![SetValuesUpdate {
            id: set(22),
            reps: Some(12),
            weight: Some(0.0),
        }]
    );
}

#[rstest]
fn failed_add_set_does_not_consume_a_temp_id(mut editor: EditorRoutine) {
    editor.remove_exercise(ex(11)).expect("remove exercise");
    editor.add_set(ex(404)).unwrap_err();
    editor.add_set(ex(11)).unwrap_err();

    let new_ex = editor.add_exercise(1, bench_meta());
    let new_set = editor.add_set(new_ex).expect("add set");
    assert_eq!(new_ex.get(), -1);
    assert_eq!(new_set.get(), -2);
}

#[rstest]
fn editing_persisted_set_emits_full_update_and_order(mut editor: EditorRoutine) {
    editor
        .update_set_field(ex(10), set(20), SetFieldUpdate::PlannedReps(12))
        .expect("update");

    assert!(editor.has_unsaved());
    let plan = build_save_plan(&editor);
    assert_eq!(
        plan.update_sets,
        vec![SetValuesUpdate {
            id: set(20),
            reps: Some(12),
            weight: Some(50.0),
        }]
    );
    assert_eq!(
        plan.order_sets,
        vec![SetOrderUpdate {
            id: set(20),
            set_order: 1,
        }]
    );
}

#[rstest]
#[case::reps(SetFieldUpdate::PlannedReps(10))]
#[case::weight(SetFieldUpdate::PlannedWeightKg(50.0))]
#[case::notes(SetFieldUpdate::Notes(None))]
fn writing_same_value_keeps_set_clean(mut editor: EditorRoutine, #[case] update: SetFieldUpdate) {
    editor
        .update_set_field(ex(10), set(20), update)
        .expect("update");

    assert!(!editor.has_unsaved());
    assert!(build_save_plan(&editor).is_empty());
}

#[rstest]
fn notes_edit_marks_set_dirty(mut editor: EditorRoutine) {
    editor
        .update_set_field(
            ex(11),
            set(22),
            SetFieldUpdate::Notes(Some("pause at chest".to_owned())),
        )
        .expect("notes");

    let node = editor.exercise(ex(11)).and_then(|e| e.set(set(22))).expect("set");
    assert!(node.flags.dirty);
    assert_eq!(node.notes.as_deref(), Some("pause at chest"));
}

#[rstest]
fn removing_persisted_exercise_deletes_it_once(mut editor: EditorRoutine) {
    editor.remove_exercise(ex(10)).expect("remove");

    let order: Vec<i64> = editor.exercise_order().iter().map(|id| id.get()).collect();
    assert_eq!(order, vec![11]);
    let removed = editor.exercise(ex(10)).expect("still tracked");
    assert!(removed.all_sets().all(|node| node.flags.deleted));
    assert!(editor.has_unsaved());

    let plan = build_save_plan(&editor);
    assert_eq!(plan.delete_exercises, vec![ex(10)]);
    assert!(plan.delete_sets.is_empty());
}

#[rstest]
fn removing_persisted_set_deletes_it(mut editor: EditorRoutine) {
    editor.remove_set(ex(10), set(21)).expect("remove");
    editor.remove_set(ex(10), set(21)).expect("remove again");

    assert_eq!(set_ids(&editor, 10), vec![20]);
    let plan = build_save_plan(&editor);
    assert_eq!(plan.delete_sets, vec![set(21)]);
    assert!(plan.update_sets.is_empty());
}

#[rstest]
fn added_then_removed_nodes_leave_nothing_to_save(mut editor: EditorRoutine) {
    let new_ex = editor.add_exercise(2, ExerciseMeta::default());
    let new_set = editor.add_set(ex(11)).expect("add set");
    editor
        .update_set_field(ex(11), new_set, SetFieldUpdate::PlannedReps(5))
        .expect("reps");
    editor.remove_set(ex(11), new_set).expect("remove set");
    editor.remove_exercise(new_ex).expect("remove exercise");

    assert!(!editor.has_unsaved());
    assert!(build_save_plan(&editor).is_empty());
}

#[rstest]
fn reindex_after_removal_renumbers_and_dirties(mut editor: EditorRoutine) {
    editor.remove_set(ex(10), set(20)).expect("remove");
    editor.reindex_set_orders(ex(10)).expect("reindex");

    let plan = build_save_plan(&editor);
    assert_eq!(plan.delete_sets, vec![set(20)]);
    assert_eq!(
        plan.update_sets,
        vec![SetValuesUpdate {
            id: set(21),
            reps: Some(8),
            weight: Some(60.0),
        }]
    );
    assert_eq!(
        plan.order_sets,
        vec![SetOrderUpdate {
            id: set(21),
            set_order: 1,
        }]
    );
}

#[rstest]
fn moving_set_renumbers_visible_sets(mut editor: EditorRoutine) {
    editor.move_set(ex(10), set(21), 0).expect("move");

    assert_eq!(set_ids(&editor, 10), vec![21, 20]);
    let orders: Vec<(i64, u32)> = build_save_plan(&editor)
        .order_sets
        .iter()
        .map(|o| (o.id.get(), o.set_order))
        .collect();
    assert_eq!(orders, vec![(21, 1), (20, 2)]);
}

#[rstest]
fn moving_exercise_emits_exercise_orders(mut editor: EditorRoutine) {
    editor.move_exercise(ex(11), 0).expect("move");

    let plan = build_save_plan(&editor);
    assert_eq!(
        plan.order_exercises,
        vec![
            ExerciseOrderUpdate {
                id: ex(11),
                order: 1,
            },
            ExerciseOrderUpdate {
                id: ex(10),
                order: 2,
            },
        ]
    );
    assert!(plan.order_sets.is_empty());
}

#[rstest]
fn move_index_is_clamped(mut editor: EditorRoutine) {
    editor.move_exercise(ex(10), 99).expect("move");
    let order: Vec<i64> = editor.exercise_order().iter().map(|id| id.get()).collect();
    assert_eq!(order, vec![11, 10]);
}

#[rstest]
fn mutations_report_unknown_and_removed_targets(mut editor: EditorRoutine) {
    assert_eq!(
        editor.add_set(ex(404)),
        Err(EditorError::ExerciseNotFound { ex_id: ex(404) })
    );
    assert_eq!(
        editor.remove_set(ex(10), set(22)),
        Err(EditorError::SetNotFound {
            ex_id: ex(10),
            set_id: set(22),
        })
    );

    editor.remove_set(ex(10), set(20)).expect("remove set");
    assert_eq!(
        editor.update_set_field(ex(10), set(20), SetFieldUpdate::PlannedReps(1)),
        Err(EditorError::SetDeleted { set_id: set(20) })
    );

    editor.remove_exercise(ex(11)).expect("remove exercise");
    assert_eq!(
        editor.add_set(ex(11)),
        Err(EditorError::ExerciseDeleted { ex_id: ex(11) })
    );
    assert_eq!(
        editor.move_exercise(ex(11), 0),
        Err(EditorError::ExerciseDeleted { ex_id: ex(11) })
    );
}

#[rstest]
fn ex_id_map_covers_live_exercises(mut editor: EditorRoutine) {
    let new_ex = editor.add_exercise(7, ExerciseMeta::default());
    editor.remove_exercise(ex(11)).expect("remove");

    let map = editor.ex_id_map();
    assert_eq!(map.len(), 2);
    assert_eq!(map[&ex(10)], ExerciseRef::persisted(ex(10), 1));
    assert_eq!(map[&new_ex], ExerciseRef::pending(7));
    assert!(!map.contains_key(&ex(11)));
}

#[test]
fn empty_editor_starts_clean() {
    let editor = EditorRoutine::new(push_pull_snapshot().routine);
    assert_eq!(editor.routine.routine_id, ROUTINE_ID);
    assert!(!editor.has_unsaved());
    assert_eq!(editor.visible_exercises().count(), 0);
}

#[test]
fn editor_error_messages_name_the_target() {
    let err = EditorError::SetNotFound {
        ex_id: ex(10),
        set_id: set(7),
    };
    assert_eq!(err.to_string(), "set 7 not found under exercise 10");
}
