//! Output formatting for CLI commands

use crate::training::TrainingResult;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{key}:"), value);
}

/// Print the totals of a finished session
pub fn print_result(result: &TrainingResult) {
    print_kv("games", &result.total_games.to_string());
    print_kv(
        "X wins",
        &format!("{} ({:.1}%)", result.x_wins, result.x_win_rate * 100.0),
    );
    print_kv(
        "O wins",
        &format!("{} ({:.1}%)", result.o_wins, result.o_win_rate * 100.0),
    );
    print_kv(
        "ties",
        &format!("{} ({:.1}%)", result.ties, result.tie_rate * 100.0),
    );
    if result.forfeits > 0 {
        print_kv("forfeits", &result.forfeits.to_string());
    }
    print_kv(
        "X moving average",
        &format!("{:.1}", result.final_x_average),
    );
    print_kv(
        "O moving average",
        &format!("{:.1}", result.final_o_average),
    );
}
