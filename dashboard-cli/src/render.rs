use dashboard_core::{Units, WeatherRecord};

/// Multi-line weather report for one city, in the requested units.
pub fn weather_report(record: &WeatherRecord, units: Units) -> String {
    let condition = record.primary_condition();
    let glyph = condition.map_or("☁", |c| c.glyph());
    let description = condition.map_or("—", |c| c.description.as_str());
    let label = condition.map_or("—", |c| c.label.as_str());

    let mut out = String::new();
    out.push_str(&format!("{}, {}\n", record.name, record.country));
    out.push_str(&format!(
        "{}  {}{}  {}\n",
        glyph,
        units.temperature(record.temperature_c),
        units.temperature_unit(),
        description,
    ));
    out.push_str(&format!(
        "Feels like {}{}\n\n",
        units.temperature(record.feels_like_c),
        units.temperature_unit(),
    ));

    out.push_str(&format!("{:<11}{}%\n", "Humidity", record.humidity_pct));
    out.push_str(&format!(
        "{:<11}{} {}\n",
        "Wind",
        units.wind_speed(record.wind_speed_mps),
        units.wind_speed_unit(),
    ));
    out.push_str(&format!("{:<11}{}\n\n", "Condition", label));

    out.push_str(&format!(
        "Fetched {} • city #{}",
        record.fetched_at.format("%Y-%m-%d %H:%M UTC"),
        record.city_id,
    ));
    if let Some(c) = condition {
        out.push_str(&format!(" • condition #{}", c.id));
    }
    out.push('\n');

    out
}
