//! Plan editor.
//!
//! These functions edit a [`WorkoutsMap`] in memory; callers persist the
//! whole map afterwards (see [`crate::AppState::edit_workouts`]).

use crate::defaults;
use crate::error::{RepbookError, Result};
use crate::model::{Exercise, ExerciseType, WorkoutPlan, WorkoutsMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Field updates for an existing exercise; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ExercisePatch {
    pub name: Option<String>,
    pub pl: Option<String>,
    pub sets: Option<u32>,
    pub reps: Option<String>,
    pub tempo: Option<String>,
    pub rir: Option<String>,
    pub rest: Option<u32>,
    pub link: Option<String>,
    pub kind: Option<ExerciseType>,
}

impl ExercisePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.pl.is_none()
            && self.sets.is_none()
            && self.reps.is_none()
            && self.tempo.is_none()
            && self.rir.is_none()
            && self.rest.is_none()
            && self.link.is_none()
            && self.kind.is_none()
    }

    fn apply(self, exercise: &mut Exercise) {
        if let Some(name) = self.name {
            exercise.name = name;
        }
        if let Some(pl) = self.pl {
            exercise.pl = pl;
        }
        if let Some(sets) = self.sets {
            exercise.sets = sets;
        }
        if let Some(reps) = self.reps {
            exercise.reps = reps;
        }
        if let Some(tempo) = self.tempo {
            exercise.tempo = tempo;
        }
        if let Some(rir) = self.rir {
            exercise.rir = rir;
        }
        if let Some(rest) = self.rest {
            exercise.rest = rest;
        }
        if let Some(link) = self.link {
            exercise.link = link;
        }
        if let Some(kind) = self.kind {
            exercise.kind = kind;
        }
    }
}

pub fn plan_mut<'m>(workouts: &'m mut WorkoutsMap, plan_id: &str) -> Result<&'m mut WorkoutPlan> {
    workouts
        .get_mut(plan_id)
        .ok_or_else(|| RepbookError::PlanNotFound(plan_id.to_string()))
}

fn check_index(plan_id: &str, plan: &WorkoutPlan, index: usize) -> Result<()> {
    if index >= plan.exercises.len() {
        return Err(RepbookError::NotFound(format!(
            "Exercise at index {} in plan '{}' (plan has {} exercises)",
            index,
            plan_id,
            plan.exercises.len()
        )));
    }
    Ok(())
}

/// Template for an exercise added from the editor.
pub fn new_exercise(now_ms: i64) -> Exercise {
    Exercise {
        id: format!("custom_{}", now_ms),
        name: "Nowe ćwiczenie".to_string(),
        pl: "Opis...".to_string(),
        sets: 3,
        reps: "10".to_string(),
        tempo: "2011".to_string(),
        rir: "1".to_string(),
        rest: 90,
        link: String::new(),
        kind: ExerciseType::Standard,
    }
}

/// Append `exercise` to the plan; returns its index.
pub fn add_exercise(workouts: &mut WorkoutsMap, plan_id: &str, exercise: Exercise) -> Result<usize> {
    if exercise.sets == 0 {
        return Err(RepbookError::Validation(
            "An exercise needs at least one set".to_string(),
        ));
    }
    let plan = plan_mut(workouts, plan_id)?;
    if plan.exercises.iter().any(|ex| ex.id == exercise.id) {
        return Err(RepbookError::Validation(format!(
            "Plan '{}' already has an exercise '{}'",
            plan_id, exercise.id
        )));
    }
    plan.exercises.push(exercise);
    Ok(plan.exercises.len() - 1)
}

pub fn update_exercise(
    workouts: &mut WorkoutsMap,
    plan_id: &str,
    index: usize,
    patch: ExercisePatch,
) -> Result<()> {
    if patch.sets == Some(0) {
        return Err(RepbookError::Validation(
            "An exercise needs at least one set".to_string(),
        ));
    }
    let plan = plan_mut(workouts, plan_id)?;
    check_index(plan_id, plan, index)?;
    patch.apply(&mut plan.exercises[index]);
    Ok(())
}

pub fn remove_exercise(workouts: &mut WorkoutsMap, plan_id: &str, index: usize) -> Result<Exercise> {
    let plan = plan_mut(workouts, plan_id)?;
    check_index(plan_id, plan, index)?;
    Ok(plan.exercises.remove(index))
}

/// Swap the exercise at `index` with its neighbour; returns the new index.
pub fn move_exercise(
    workouts: &mut WorkoutsMap,
    plan_id: &str,
    index: usize,
    direction: Direction,
) -> Result<usize> {
    let plan = plan_mut(workouts, plan_id)?;
    check_index(plan_id, plan, index)?;
    let target = match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => Some(index + 1).filter(|&t| t < plan.exercises.len()),
    }
    .ok_or_else(|| {
        RepbookError::InvalidInput(format!(
            "Exercise at index {} cannot move {}",
            index,
            match direction {
                Direction::Up => "up",
                Direction::Down => "down",
            }
        ))
    })?;
    plan.exercises.swap(index, target);
    Ok(target)
}

/// Replace a plan with its bundled version.
pub fn reset_plan(workouts: &mut WorkoutsMap, plan_id: &str) -> Result<()> {
    let plan = defaults::default_plan(plan_id).ok_or_else(|| {
        RepbookError::NotFound(format!("No bundled default for plan '{}'", plan_id))
    })?;
    workouts.insert(plan_id.to_string(), plan);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_workouts;

    #[test]
    fn test_add_and_remove() {
        let mut map = default_workouts();
        let before = map["gora"].exercises.len();
        let idx = add_exercise(&mut map, "gora", new_exercise(1_700_000_000_000)).unwrap();
        assert_eq!(idx, before);
        assert_eq!(map["gora"].exercises[idx].id, "custom_1700000000000");
        assert_eq!(map["gora"].exercises[idx].rest, 90);

        let dup = add_exercise(&mut map, "gora", new_exercise(1_700_000_000_000));
        assert!(dup.is_err());

        let removed = remove_exercise(&mut map, "gora", idx).unwrap();
        assert_eq!(removed.name, "Nowe ćwiczenie");
        assert!(remove_exercise(&mut map, "gora", 99).unwrap_err().is_not_found());
    }

    #[test]
    fn test_move_swaps_neighbours() {
        let mut map = default_workouts();
        let first = map["dol"].exercises[0].id.clone();
        let second = map["dol"].exercises[1].id.clone();

        assert_eq!(move_exercise(&mut map, "dol", 0, Direction::Down).unwrap(), 1);
        assert_eq!(map["dol"].exercises[0].id, second);
        assert_eq!(map["dol"].exercises[1].id, first);

        assert!(move_exercise(&mut map, "dol", 0, Direction::Up).is_err());
        let last = map["dol"].exercises.len() - 1;
        assert!(move_exercise(&mut map, "dol", last, Direction::Down).is_err());
    }

    #[test]
    fn test_update_then_reset() {
        let mut map = default_workouts();
        let patch = ExercisePatch {
            sets: Some(5),
            kind: Some(ExerciseType::RepsOnly),
            ..Default::default()
        };
        update_exercise(&mut map, "fbw", 0, patch).unwrap();
        assert_eq!(map["fbw"].exercises[0].sets, 5);

        let zero = ExercisePatch {
            sets: Some(0),
            ..Default::default()
        };
        assert!(update_exercise(&mut map, "fbw", 0, zero).is_err());

        reset_plan(&mut map, "fbw").unwrap();
        assert_eq!(map["fbw"], default_workouts()["fbw"]);

        let copy = map["fbw"].clone();
        map.insert("mine".to_string(), copy);
        assert!(reset_plan(&mut map, "mine").is_err());
    }
}
