//! Plain-text rendering of backend data.

use revoo_core::models::{Habit, WeeklyGoal};

/// Widest title shown in list rows
const TITLE_WIDTH: usize = 32;

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

pub fn habit_row(habit: &Habit) -> String {
    let mut row = format!(
        "{:>5}  {:<width$}  {:>7}",
        habit.id,
        truncate(&habit.titulo, TITLE_WIDTH),
        habit.points_display(),
        width = TITLE_WIDTH
    );
    if !habit.is_active() {
        row.push_str("  (inactive)");
    }
    row
}

pub fn habit_list(habits: &[Habit]) -> String {
    if habits.is_empty() {
        return "No habits yet.".to_string();
    }
    habits.iter().map(habit_row).collect::<Vec<_>>().join("\n")
}

pub fn habit_detail(habit: &Habit) -> String {
    let mut lines = vec![
        format!("#{} {}", habit.id, habit.titulo),
        format!("Points:   {}", habit.points_display()),
        format!("Active:   {}", if habit.is_active() { "yes" } else { "no" }),
    ];
    if let Some(label) = habit.categoria.label() {
        lines.push(format!("Category: {}", label));
    }
    if let Some(descricao) = habit.descricao.as_deref().filter(|d| !d.is_empty()) {
        lines.push(String::new());
        lines.push(descricao.to_string());
    }
    lines.join("\n")
}

pub fn goal_row(goal: &WeeklyGoal) -> String {
    let owner = goal
        .nome_colaborador
        .clone()
        .unwrap_or_else(|| format!("#{}", goal.id_colaborador));
    format!(
        "{:>5}  {:<width$}  goal {} ({})  {}",
        goal.id,
        truncate(&goal.titulo_habito, TITLE_WIDTH),
        goal.quantidade_meta,
        goal.week_display(),
        owner,
        width = TITLE_WIDTH
    )
}

pub fn goal_list(goals: &[WeeklyGoal]) -> String {
    if goals.is_empty() {
        return "No weekly goals yet.".to_string();
    }
    goals.iter().map(goal_row).collect::<Vec<_>>().join("\n")
}
