//! Statistics engine: read-only aggregates recomputed from the full set
//! history on every call.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use trainlog_core::error::{TrainlogError, TrainlogResult};
use trainlog_core::models::exercise::{Exercise, MuscleGroup};
use trainlog_core::models::stats::{MuscleGroupStat, PersonalBest, ProgressPoint};
use trainlog_core::models::workout::SetHistoryEntry;
use trainlog_core::repository::{ExerciseRepository, WorkoutRepository};
use uuid::Uuid;

/// Per muscle group: distinct training dates and total sets, in
/// muscle-group order. Groups without sets are omitted.
pub fn muscle_group_stats(history: &[SetHistoryEntry]) -> Vec<MuscleGroupStat> {
    let mut groups: BTreeMap<MuscleGroup, (BTreeSet<NaiveDate>, u64)> = BTreeMap::new();
    for entry in history {
        let (dates, sets) = groups.entry(entry.exercise.muscle_group).or_default();
        dates.insert(entry.date);
        *sets += 1;
    }

    groups
        .into_iter()
        .map(|(muscle_group, (dates, set_count))| MuscleGroupStat {
            muscle_group,
            workout_count: dates.len() as u64,
            set_count,
        })
        .collect()
}

/// Heaviest logged weight per exercise, ordered by muscle group then
/// exercise name. Exercises never lifted above zero are left out.
pub fn personal_bests(history: &[SetHistoryEntry]) -> Vec<PersonalBest> {
    let mut best: HashMap<Uuid, (&Exercise, f64)> = HashMap::new();
    for entry in history.iter().filter(|e| e.weight > 0.0) {
        best.entry(entry.exercise.id)
            .and_modify(|(_, max)| *max = max.max(entry.weight))
            .or_insert((&entry.exercise, entry.weight));
    }

    let mut bests: Vec<PersonalBest> = best
        .into_values()
        .map(|(exercise, max_weight)| PersonalBest {
            exercise_id: exercise.id,
            exercise_name: exercise.name.clone(),
            muscle_group: exercise.muscle_group,
            max_weight,
        })
        .collect();
    bests.sort_by(|a, b| {
        a.muscle_group
            .cmp(&b.muscle_group)
            .then_with(|| a.exercise_name.cmp(&b.exercise_name))
            .then_with(|| a.exercise_id.cmp(&b.exercise_id))
    });
    bests
}

/// Daily max weight and volume (`sum(weight * reps)`), date ascending.
/// `history` is expected to hold a single exercise.
pub fn exercise_progress(history: &[SetHistoryEntry]) -> Vec<ProgressPoint> {
    let mut days: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for entry in history {
        let (max, volume) = days.entry(entry.date).or_insert((0.0, 0.0));
        *max = max.max(entry.weight);
        *volume += entry.weight * f64::from(entry.reps);
    }

    days.into_iter()
        .map(|(date, (max_weight, total_volume))| ProgressPoint {
            date,
            max_weight,
            total_volume,
        })
        .collect()
}

pub struct StatisticsService<W: WorkoutRepository, E: ExerciseRepository> {
    workouts: W,
    exercises: E,
}

impl<W: WorkoutRepository, E: ExerciseRepository> StatisticsService<W, E> {
    pub fn new(workouts: W, exercises: E) -> Self {
        Self {
            workouts,
            exercises,
        }
    }

    pub async fn muscle_group_stats(&self, owner: Uuid) -> TrainlogResult<Vec<MuscleGroupStat>> {
        let history = self.workouts.set_history(owner, None).await?;
        Ok(muscle_group_stats(&history))
    }

    pub async fn personal_bests(&self, owner: Uuid) -> TrainlogResult<Vec<PersonalBest>> {
        let history = self.workouts.set_history(owner, None).await?;
        Ok(personal_bests(&history))
    }

    /// Fails `NotFound` when the exercise is not visible to `owner`.
    pub async fn exercise_progress(
        &self,
        owner: Uuid,
        exercise_id: Uuid,
    ) -> TrainlogResult<Vec<ProgressPoint>> {
        let exercise = self.exercises.get_by_id(exercise_id).await?;
        if !exercise.is_visible_to(owner) {
            return Err(TrainlogError::not_found("exercise", exercise_id));
        }
        let history = self.workouts.set_history(owner, Some(exercise_id)).await?;
        Ok(exercise_progress(&history))
    }
}
