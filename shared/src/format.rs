//! Display formatting for the dashboard
//!
//! [`DashboardView`] derives every display value from one composite response
//! for one language, so a render cycle never reads ambient state.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::alerts::{evaluate_alert, AlertLevel};
use crate::convert::{
    estimate_air_quality, feels_like_comparison, icon_glyph, wind_direction, UvLevel,
};
use crate::i18n::{self, Label};
use crate::models::CompositeResponse;
use crate::simulate::moon_phase;
use crate::types::Language;

pub fn format_temperature(celsius: f64) -> String {
    format!("{}°C", celsius.round() as i64)
}

pub fn format_wind_speed(kmh: f64, lang: Language) -> String {
    let unit = match lang {
        Language::Ar => "كم/س",
        Language::En | Language::Fr => "km/h",
    };
    format!("{} {unit}", kmh.round() as i64)
}

pub fn format_visibility(km: f64, lang: Language) -> String {
    let unit = match lang {
        Language::Ar => "كم",
        Language::En | Language::Fr => "km",
    };
    format!("{km} {unit}")
}

pub fn format_humidity(humidity: i32) -> String {
    format!("{humidity}%")
}

/// Day heading for the `index`-th forecast entry; the first entry is "today"
pub fn day_label(date: NaiveDate, index: usize, lang: Language) -> String {
    if index == 0 {
        i18n::label(Label::Today, lang).to_string()
    } else {
        i18n::weekday_label(date.weekday(), lang).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertView {
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastView {
    pub day: String,
    pub glyph: String,
    pub high: String,
    pub low: String,
    pub description: String,
}

/// Display values for one render of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub language: Language,
    pub city: String,
    pub glyph: String,
    pub temperature: String,
    pub feels_like: String,
    pub description: String,
    pub humidity: String,
    pub wind: String,
    pub visibility: String,
    pub uv: String,
    pub air_quality: String,
    pub moon: String,
    pub wave_height: String,
    pub water_temperature: String,
    pub high_tide: String,
    pub low_tide: String,
    pub alert: Option<AlertView>,
    pub forecast: Vec<ForecastView>,
}

impl DashboardView {
    /// Derive the view; `today` drives the moon phase
    pub fn build(data: &CompositeResponse, lang: Language, today: NaiveDate) -> Self {
        let current = &data.current;
        let uv_level = UvLevel::from_index(current.uv_index);
        let aqi = estimate_air_quality(current.wind_speed, current.humidity, &current.description);
        let compass = wind_direction(f64::from(current.wind_direction));
        let phase = moon_phase(today);

        let alert = evaluate_alert(current).map(|alert| AlertView {
            level: alert.level,
            title: i18n::alert_title(alert.kind, lang).to_string(),
            message: i18n::alert_message(&alert, lang),
        });

        let forecast = data
            .forecast
            .iter()
            .enumerate()
            .map(|(index, day)| ForecastView {
                day: day_label(day.date, index, lang),
                glyph: icon_glyph(&day.icon).to_string(),
                high: format_temperature(day.max_temp),
                low: format_temperature(day.min_temp),
                description: day.description.clone(),
            })
            .collect();

        Self {
            language: lang,
            city: current.city.clone(),
            glyph: icon_glyph(&current.icon).to_string(),
            temperature: format_temperature(current.temperature),
            feels_like: format!(
                "{} ({})",
                format_temperature(current.feels_like),
                i18n::feels_like_label(
                    feels_like_comparison(current.temperature, current.feels_like),
                    lang
                )
            ),
            description: current.description.clone(),
            humidity: format_humidity(current.humidity),
            wind: format!(
                "{} {}",
                format_wind_speed(current.wind_speed, lang),
                i18n::compass_label(compass, lang)
            ),
            visibility: format_visibility(current.visibility, lang),
            uv: format!(
                "{} ({})",
                current.uv_index,
                i18n::uv_level_label(uv_level, lang)
            ),
            air_quality: format!(
                "{} ({})",
                aqi.index,
                i18n::aqi_level_label(aqi.level, lang)
            ),
            moon: format!("{} {}", phase.emoji(), i18n::moon_phase_label(phase, lang)),
            wave_height: format!("{:.1} m", data.ocean.wave_height),
            water_temperature: format_temperature(data.ocean.water_temperature),
            high_tide: data.ocean.high_tide.clone(),
            low_tide: data.ocean.low_tide.clone(),
            alert,
            forecast,
        }
    }

    /// Plain-text rendering, one line per row
    pub fn lines(&self) -> Vec<String> {
        let lang = self.language;
        let mut lines = vec![
            format!("{} {} {} {}", self.city, self.glyph, self.temperature, self.description),
            format!("{}: {}", i18n::label(Label::FeelsLike, lang), self.feels_like),
            format!("{}: {}", i18n::label(Label::Humidity, lang), self.humidity),
            format!("{}: {}", i18n::label(Label::Wind, lang), self.wind),
            format!("{}: {}", i18n::label(Label::Visibility, lang), self.visibility),
            format!("{}: {}", i18n::label(Label::UvIndex, lang), self.uv),
            format!("{}: {}", i18n::label(Label::AirQuality, lang), self.air_quality),
            format!("{}: {}", i18n::label(Label::MoonPhase, lang), self.moon),
            format!("{}: {}", i18n::label(Label::WaveHeight, lang), self.wave_height),
            format!(
                "{}: {}",
                i18n::label(Label::WaterTemperature, lang),
                self.water_temperature
            ),
            format!(
                "{}: {}  {}: {}",
                i18n::label(Label::HighTide, lang),
                self.high_tide,
                i18n::label(Label::LowTide, lang),
                self.low_tide
            ),
        ];

        if let Some(alert) = &self.alert {
            lines.push(format!("[{}] {}", alert.title, alert.message));
        }

        lines.push(i18n::label(Label::Forecast, lang).to_string());
        for day in &self.forecast {
            lines.push(format!(
                "  {} {} {} / {} {}",
                day.day, day.glyph, day.high, day.low, day.description
            ));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastDay, OceanSnapshot, WeatherSnapshot};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn composite() -> CompositeResponse {
        let now = Utc.with_ymd_and_hms(2024, 6, 14, 12, 0, 0).unwrap();
        let day = |d: u32, max: f64| ForecastDay {
            id: Uuid::new_v4(),
            city: "Boujdour".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, d).unwrap(),
            max_temp: max,
            min_temp: 18.2,
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
            humidity: 65,
            wind_speed: 20.0,
            timestamp: now,
        };
        CompositeResponse {
            current: WeatherSnapshot {
                id: Uuid::new_v4(),
                city: "Boujdour".to_string(),
                country: "Morocco".to_string(),
                temperature: 23.6,
                feels_like: 23.9,
                humidity: 72,
                wind_speed: 61.2,
                wind_direction: 250,
                visibility: 10.0,
                uv_index: 7.1,
                pressure: 1014.0,
                description: "few clouds".to_string(),
                icon: "02d".to_string(),
                sunrise: Utc.with_ymd_and_hms(2024, 6, 14, 6, 50, 0).unwrap(),
                sunset: Utc.with_ymd_and_hms(2024, 6, 14, 20, 33, 0).unwrap(),
                timestamp: now,
            },
            ocean: OceanSnapshot {
                id: Uuid::new_v4(),
                city: "Boujdour".to_string(),
                wave_height: 1.84,
                water_temperature: 21.6,
                high_tide: "17:12".to_string(),
                low_tide: "23:24".to_string(),
                timestamp: now,
            },
            forecast: vec![day(14, 24.4), day(15, 25.1)],
        }
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(format_temperature(23.6), "24°C");
        assert_eq!(format_temperature(-0.4), "0°C");
        assert_eq!(format_wind_speed(12.4, Language::En), "12 km/h");
        assert_eq!(format_wind_speed(12.6, Language::Ar), "13 كم/س");
        assert_eq!(format_humidity(55), "55%");
        assert_eq!(format_visibility(2.5, Language::Fr), "2.5 km");
    }

    #[test]
    fn test_day_label_marks_first_entry_as_today() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(day_label(date, 0, Language::En), "Today");
        assert_eq!(day_label(date, 1, Language::En), "Sat");
        assert_eq!(day_label(date, 1, Language::Fr), "sam.");
    }

    #[test]
    fn test_view_derives_values_in_english() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let view = DashboardView::build(&composite(), Language::En, today);

        assert_eq!(view.temperature, "24°C");
        assert_eq!(view.feels_like, "24°C (Similar to actual)");
        assert_eq!(view.wind, "61 km/h WSW");
        assert_eq!(view.uv, "7.1 (High)");
        assert_eq!(view.wave_height, "1.8 m");
        assert_eq!(view.moon, "🌕 Full Moon");
        assert_eq!(view.forecast.len(), 2);
        assert_eq!(view.forecast[0].day, "Today");
        assert_eq!(view.forecast[1].high, "25°C");

        let alert = view.alert.as_ref().unwrap();
        assert_eq!(alert.level, AlertLevel::Warning);
        assert_eq!(alert.title, "Strong Winds");
    }

    #[test]
    fn test_view_follows_requested_language() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let fr = DashboardView::build(&composite(), Language::Fr, today);
        assert_eq!(fr.wind, "61 km/h OSO");
        assert_eq!(fr.alert.unwrap().title, "Vents forts");

        let ar = DashboardView::build(&composite(), Language::Ar, today);
        assert!(ar.lines().iter().any(|line| line.starts_with("الرياح")));
    }

    #[test]
    fn test_lines_include_forecast_rows() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let lines = DashboardView::build(&composite(), Language::En, today).lines();
        assert!(lines.iter().any(|l| l == "5-day forecast"));
        assert!(lines.iter().any(|l| l.starts_with("  Today ☀️ 24°C / 18°C")));
        assert!(lines.iter().any(|l| l.starts_with("[Strong Winds]")));
    }
}
