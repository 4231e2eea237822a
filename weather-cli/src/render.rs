//! Table output. Colour is only emitted when stdout is a terminal.

use comfy_table::{Cell, Color, Table, presets::UTF8_FULL};
use weather_core::{CURRENT_HEADERS, CurrentRow, FORECAST_HEADERS, ForecastRow};

pub fn current_table(rows: &[CurrentRow]) -> Table {
    let mut table = base_table(CURRENT_HEADERS);

    for row in rows {
        table.add_row(vec![
            Cell::new(format!("📅 {}", row.date)).fg(Color::White),
            Cell::new(format!("📍 {}", row.location)).fg(Color::Cyan),
            Cell::new(format!("🌡️ ↘️ {}", row.min_temp)).fg(Color::Blue),
            Cell::new(format!("🌡️ ↗️ {}", row.max_temp)).fg(Color::Blue),
            Cell::new(format!("☁️ {}", row.condition)).fg(Color::White),
            Cell::new(format!("💧 {}", row.humidity)).fg(Color::Cyan),
        ]);
    }

    table
}

pub fn forecast_table(rows: &[ForecastRow]) -> Table {
    let mut table = base_table(FORECAST_HEADERS);

    for row in rows {
        table.add_row(vec![
            Cell::new(format!("📅 {}", row.date)).fg(Color::White),
            Cell::new(format!("📍 {}", row.location)).fg(Color::Cyan),
            Cell::new(format!("🌡️ ↘️ {}", row.min_temp)).fg(Color::Blue),
            Cell::new(format!("🌡️ ↗️ {}", row.max_temp)).fg(Color::Blue),
            Cell::new(format!("{} ☁️", row.condition)).fg(Color::White),
            Cell::new(format!("{} 🌧️", row.precipitation)).fg(Color::Blue),
            Cell::new(format!("{} 💧", row.humidity)).fg(Color::Magenta),
        ]);
    }

    table
}

pub fn error_line(message: &str) -> String {
    format!("❌ Error: {message}")
}

fn base_table<const N: usize>(headers: [&str; N]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(headers);
    table
}
