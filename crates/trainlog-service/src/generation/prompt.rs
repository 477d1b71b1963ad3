//! Prompt construction for menu generation.

use std::fmt::Write;

use trainlog_core::models::exercise::Exercise;

use super::GenerateMenuInput;

const SYSTEM_PREAMBLE: &str = "\
You are a professional personal trainer. Build the best training menu \
for the user and answer in JSON. Follow these rules strictly:
1. Only use exercise_id values from the \"Available exercises\" list below.
2. Reply with a bare JSON object (no code fences, no commentary).
3. Use exactly this shape:
{
  \"name\": \"menu name (at most 20 characters)\",
  \"description\": \"what the menu is for (at most 100 characters)\",
  \"items\": [
    {
      \"exercise_id\": \"exercise id copied from the list\",
      \"order_number\": 1,
      \"target_sets\": 3,
      \"target_reps\": 10,
      \"target_weight\": 40.0,
      \"note\": \"optional form cue\"
    }
  ]
}
order_number starts at 1. target_sets is 1-5 and target_reps is 5-20. \
Omit target_weight when unsure.

Available exercises (exercise_id: name (muscle group)):
";

/// Instruction block enumerating every exercise the model may use.
pub fn build_system_prompt(catalog: &[Exercise]) -> String {
    let mut prompt = String::from(SYSTEM_PREAMBLE);
    for exercise in catalog {
        let _ = writeln!(
            prompt,
            "- {}: {} ({})",
            exercise.id,
            exercise.name,
            exercise.muscle_group.label()
        );
    }
    prompt
}

/// The user's goals, one line per field.
pub fn build_user_message(input: &GenerateMenuInput) -> String {
    let mut message = String::new();
    let _ = writeln!(message, "Training goal: {}", input.goal.trim());
    let _ = writeln!(message, "Fitness level: {}", input.fitness_level.trim());
    let _ = writeln!(message, "Sessions per week: {}", input.days_per_week);
    let _ = writeln!(message, "Minutes per session: {}", input.duration_minutes);

    if !input.target_muscle_groups.is_empty() {
        let groups: Vec<&str> = input
            .target_muscle_groups
            .iter()
            .map(|g| g.label())
            .collect();
        let _ = writeln!(message, "Focus muscle groups: {}", groups.join(", "));
    }

    if let Some(notes) = input.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        let _ = writeln!(message, "Other requests: {notes}");
    }

    message
}
