//! Localized labels for English, French and Arabic
//!
//! Every lookup takes the target [`Language`] explicitly.

use chrono::Weekday;

use crate::alerts::{AlertKind, WeatherAlert};
use crate::convert::{AqiLevel, FeelsLike, Severity, UvLevel};
use crate::simulate::MoonPhase;
use crate::types::Language;

/// Fixed UI strings that are not tied to a derived category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Temperature,
    FeelsLike,
    Humidity,
    Wind,
    Visibility,
    UvIndex,
    Pressure,
    AirQuality,
    WaveHeight,
    WaterTemperature,
    HighTide,
    LowTide,
    MoonPhase,
    Forecast,
    Today,
    LastUpdated,
    Loading,
    LoadError,
    Retry,
}

pub fn label(key: Label, lang: Language) -> &'static str {
    use Language::*;
    match (key, lang) {
        (Label::Temperature, En) => "Temperature",
        (Label::Temperature, Fr) => "Température",
        (Label::Temperature, Ar) => "درجة الحرارة",
        (Label::FeelsLike, En) => "Feels like",
        (Label::FeelsLike, Fr) => "Ressenti",
        (Label::FeelsLike, Ar) => "الإحساس الحراري",
        (Label::Humidity, En) => "Humidity",
        (Label::Humidity, Fr) => "Humidité",
        (Label::Humidity, Ar) => "الرطوبة",
        (Label::Wind, En) => "Wind",
        (Label::Wind, Fr) => "Vent",
        (Label::Wind, Ar) => "الرياح",
        (Label::Visibility, En) => "Visibility",
        (Label::Visibility, Fr) => "Visibilité",
        (Label::Visibility, Ar) => "مدى الرؤية",
        (Label::UvIndex, En) => "UV index",
        (Label::UvIndex, Fr) => "Indice UV",
        (Label::UvIndex, Ar) => "مؤشر الأشعة فوق البنفسجية",
        (Label::Pressure, En) => "Pressure",
        (Label::Pressure, Fr) => "Pression",
        (Label::Pressure, Ar) => "الضغط الجوي",
        (Label::AirQuality, En) => "Air quality",
        (Label::AirQuality, Fr) => "Qualité de l'air",
        (Label::AirQuality, Ar) => "جودة الهواء",
        (Label::WaveHeight, En) => "Wave height",
        (Label::WaveHeight, Fr) => "Hauteur des vagues",
        (Label::WaveHeight, Ar) => "ارتفاع الأمواج",
        (Label::WaterTemperature, En) => "Water temperature",
        (Label::WaterTemperature, Fr) => "Température de l'eau",
        (Label::WaterTemperature, Ar) => "حرارة الماء",
        (Label::HighTide, En) => "High tide",
        (Label::HighTide, Fr) => "Marée haute",
        (Label::HighTide, Ar) => "المد العالي",
        (Label::LowTide, En) => "Low tide",
        (Label::LowTide, Fr) => "Marée basse",
        (Label::LowTide, Ar) => "الجزر",
        (Label::MoonPhase, En) => "Moon phase",
        (Label::MoonPhase, Fr) => "Phase lunaire",
        (Label::MoonPhase, Ar) => "طور القمر",
        (Label::Forecast, En) => "5-day forecast",
        (Label::Forecast, Fr) => "Prévisions sur 5 jours",
        (Label::Forecast, Ar) => "توقعات 5 أيام",
        (Label::Today, En) => "Today",
        (Label::Today, Fr) => "Aujourd'hui",
        (Label::Today, Ar) => "اليوم",
        (Label::LastUpdated, En) => "Last updated",
        (Label::LastUpdated, Fr) => "Dernière mise à jour",
        (Label::LastUpdated, Ar) => "آخر تحديث",
        (Label::Loading, En) => "Loading weather data...",
        (Label::Loading, Fr) => "Chargement des données météo...",
        (Label::Loading, Ar) => "جارٍ تحميل بيانات الطقس...",
        (Label::LoadError, En) => "Unable to load weather data",
        (Label::LoadError, Fr) => "Impossible de charger les données météo",
        (Label::LoadError, Ar) => "تعذر تحميل بيانات الطقس",
        (Label::Retry, En) => "Retry",
        (Label::Retry, Fr) => "Réessayer",
        (Label::Retry, Ar) => "إعادة المحاولة",
    }
}

pub fn uv_level_label(level: UvLevel, lang: Language) -> &'static str {
    match (level, lang) {
        (UvLevel::Low, Language::En) => "Low",
        (UvLevel::Low, Language::Fr) => "Faible",
        (UvLevel::Low, Language::Ar) => "منخفض",
        (UvLevel::Moderate, Language::En) => "Moderate",
        (UvLevel::Moderate, Language::Fr) => "Modéré",
        (UvLevel::Moderate, Language::Ar) => "معتدل",
        (UvLevel::High, Language::En) => "High",
        (UvLevel::High, Language::Fr) => "Élevé",
        (UvLevel::High, Language::Ar) => "مرتفع",
        (UvLevel::VeryHigh, Language::En) => "Very high",
        (UvLevel::VeryHigh, Language::Fr) => "Très élevé",
        (UvLevel::VeryHigh, Language::Ar) => "مرتفع جدًا",
        (UvLevel::Extreme, Language::En) => "Extreme",
        (UvLevel::Extreme, Language::Fr) => "Extrême",
        (UvLevel::Extreme, Language::Ar) => "شديد",
    }
}

pub fn aqi_level_label(level: AqiLevel, lang: Language) -> &'static str {
    match lang {
        Language::En => level.label(),
        Language::Fr => match level {
            AqiLevel::Good => "Bon",
            AqiLevel::Moderate => "Modéré",
            AqiLevel::UnhealthyForSensitive => "Mauvais pour les personnes sensibles",
            AqiLevel::Unhealthy => "Mauvais",
            AqiLevel::VeryUnhealthy => "Très mauvais",
        },
        Language::Ar => match level {
            AqiLevel::Good => "جيد",
            AqiLevel::Moderate => "معتدل",
            AqiLevel::UnhealthyForSensitive => "غير صحي للفئات الحساسة",
            AqiLevel::Unhealthy => "غير صحي",
            AqiLevel::VeryUnhealthy => "غير صحي جدًا",
        },
    }
}

pub fn severity_label(severity: Severity, lang: Language) -> &'static str {
    match (severity, lang) {
        (Severity::Low, Language::En) => "Low",
        (Severity::Low, Language::Fr) => "Faible",
        (Severity::Low, Language::Ar) => "منخفضة",
        (Severity::Medium, Language::En) => "Medium",
        (Severity::Medium, Language::Fr) => "Moyenne",
        (Severity::Medium, Language::Ar) => "متوسطة",
        (Severity::High, Language::En) => "High",
        (Severity::High, Language::Fr) => "Élevée",
        (Severity::High, Language::Ar) => "مرتفعة",
    }
}

pub fn moon_phase_label(phase: MoonPhase, lang: Language) -> &'static str {
    match lang {
        Language::En => match phase {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        },
        Language::Fr => match phase {
            MoonPhase::NewMoon => "Nouvelle lune",
            MoonPhase::WaxingCrescent => "Premier croissant",
            MoonPhase::FirstQuarter => "Premier quartier",
            MoonPhase::WaxingGibbous => "Gibbeuse croissante",
            MoonPhase::FullMoon => "Pleine lune",
            MoonPhase::WaningGibbous => "Gibbeuse décroissante",
            MoonPhase::LastQuarter => "Dernier quartier",
            MoonPhase::WaningCrescent => "Dernier croissant",
        },
        Language::Ar => match phase {
            MoonPhase::NewMoon => "محاق",
            MoonPhase::WaxingCrescent => "هلال متزايد",
            MoonPhase::FirstQuarter => "تربيع أول",
            MoonPhase::WaxingGibbous => "أحدب متزايد",
            MoonPhase::FullMoon => "بدر",
            MoonPhase::WaningGibbous => "أحدب متناقص",
            MoonPhase::LastQuarter => "تربيع أخير",
            MoonPhase::WaningCrescent => "هلال متناقص",
        },
    }
}

pub fn feels_like_label(comparison: FeelsLike, lang: Language) -> &'static str {
    match (comparison, lang) {
        (FeelsLike::Similar, Language::En) => "Similar to actual",
        (FeelsLike::Similar, Language::Fr) => "Semblable à la réelle",
        (FeelsLike::Similar, Language::Ar) => "مماثلة للفعلية",
        (FeelsLike::Warmer, Language::En) => "Feels warmer",
        (FeelsLike::Warmer, Language::Fr) => "Ressenti plus chaud",
        (FeelsLike::Warmer, Language::Ar) => "تبدو أدفأ",
        (FeelsLike::Cooler, Language::En) => "Feels cooler",
        (FeelsLike::Cooler, Language::Fr) => "Ressenti plus frais",
        (FeelsLike::Cooler, Language::Ar) => "تبدو أبرد",
    }
}

/// Short weekday name
pub fn weekday_label(day: Weekday, lang: Language) -> &'static str {
    const EN: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    const FR: [&str; 7] = ["lun.", "mar.", "mer.", "jeu.", "ven.", "sam.", "dim."];
    const AR: [&str; 7] = [
        "الاثنين", "الثلاثاء", "الأربعاء", "الخميس", "الجمعة", "السبت", "الأحد",
    ];
    let index = day.num_days_from_monday() as usize;
    match lang {
        Language::En => EN[index],
        Language::Fr => FR[index],
        Language::Ar => AR[index],
    }
}

/// Compass point for display; French writes west as `O` (ouest)
pub fn compass_label(point: &str, lang: Language) -> String {
    match lang {
        Language::Fr => point.replace('W', "O"),
        Language::En | Language::Ar => point.to_string(),
    }
}

pub fn alert_title(kind: AlertKind, lang: Language) -> &'static str {
    match (kind, lang) {
        (AlertKind::HighUv, Language::En) => "High UV Index",
        (AlertKind::HighUv, Language::Fr) => "Indice UV élevé",
        (AlertKind::HighUv, Language::Ar) => "مؤشر أشعة فوق بنفسجية مرتفع",
        (AlertKind::StrongWind, Language::En) => "Strong Winds",
        (AlertKind::StrongWind, Language::Fr) => "Vents forts",
        (AlertKind::StrongWind, Language::Ar) => "رياح قوية",
        (AlertKind::ExtremeHeat, Language::En) => "Extreme Heat",
        (AlertKind::ExtremeHeat, Language::Fr) => "Chaleur extrême",
        (AlertKind::ExtremeHeat, Language::Ar) => "حرارة شديدة",
        (AlertKind::Storm, Language::En) => "Storm Alert",
        (AlertKind::Storm, Language::Fr) => "Alerte orage",
        (AlertKind::Storm, Language::Ar) => "تنبيه عاصفة",
    }
}

pub fn alert_message(alert: &WeatherAlert, lang: Language) -> String {
    let rounded = alert.value.round() as i64;
    match (alert.kind, lang) {
        (AlertKind::HighUv, Language::En) => format!(
            "UV index is {}. Use sun protection when outdoors.",
            alert.value
        ),
        (AlertKind::HighUv, Language::Fr) => format!(
            "L'indice UV est de {}. Protégez-vous du soleil à l'extérieur.",
            alert.value
        ),
        (AlertKind::HighUv, Language::Ar) => format!(
            "مؤشر الأشعة فوق البنفسجية هو {}. استخدم الحماية من الشمس في الخارج.",
            alert.value
        ),
        (AlertKind::StrongWind, Language::En) => {
            format!("Wind speed is {rounded} km/h. Be cautious outdoors.")
        }
        (AlertKind::StrongWind, Language::Fr) => {
            format!("La vitesse du vent est de {rounded} km/h. Soyez prudent à l'extérieur.")
        }
        (AlertKind::StrongWind, Language::Ar) => {
            format!("سرعة الرياح {rounded} كم/س. توخَّ الحذر في الخارج.")
        }
        (AlertKind::ExtremeHeat, Language::En) => format!(
            "Temperature is {rounded}°C. Stay hydrated and avoid prolonged sun exposure."
        ),
        (AlertKind::ExtremeHeat, Language::Fr) => format!(
            "La température est de {rounded}°C. Hydratez-vous et évitez une exposition prolongée au soleil."
        ),
        (AlertKind::ExtremeHeat, Language::Ar) => {
            format!("درجة الحرارة {rounded}°م. اشرب الماء بانتظام وتجنب التعرض الطويل للشمس.")
        }
        (AlertKind::Storm, Language::En) => {
            "Thunderstorm conditions detected. Seek shelter indoors.".to_string()
        }
        (AlertKind::Storm, Language::Fr) => {
            "Conditions orageuses détectées. Abritez-vous à l'intérieur.".to_string()
        }
        (AlertKind::Storm, Language::Ar) => {
            "تم رصد ظروف عاصفة رعدية. احتمِ في الداخل.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertLevel;

    #[test]
    fn test_labels_differ_per_language() {
        for key in [Label::Temperature, Label::HighTide, Label::Retry] {
            let en = label(key, Language::En);
            let fr = label(key, Language::Fr);
            let ar = label(key, Language::Ar);
            assert_ne!(en, fr);
            assert_ne!(en, ar);
        }
    }

    #[test]
    fn test_aqi_english_matches_band_label() {
        assert_eq!(
            aqi_level_label(AqiLevel::UnhealthyForSensitive, Language::En),
            "Unhealthy for Sensitive"
        );
        assert_eq!(aqi_level_label(AqiLevel::Good, Language::Fr), "Bon");
    }

    #[test]
    fn test_weekday_labels() {
        assert_eq!(weekday_label(Weekday::Mon, Language::En), "Mon");
        assert_eq!(weekday_label(Weekday::Sun, Language::Fr), "dim.");
        assert_eq!(weekday_label(Weekday::Fri, Language::Ar), "الجمعة");
    }

    #[test]
    fn test_compass_label_in_french() {
        assert_eq!(compass_label("WSW", Language::Fr), "OSO");
        assert_eq!(compass_label("NE", Language::Fr), "NE");
        assert_eq!(compass_label("NW", Language::En), "NW");
    }

    #[test]
    fn test_alert_message_rounds_wind() {
        let alert = WeatherAlert {
            level: AlertLevel::Warning,
            kind: AlertKind::StrongWind,
            value: 61.7,
        };
        assert_eq!(
            alert_message(&alert, Language::En),
            "Wind speed is 62 km/h. Be cautious outdoors."
        );
        assert!(alert_message(&alert, Language::Fr).contains("62 km/h"));
    }

    #[test]
    fn test_alert_message_keeps_uv_value() {
        let alert = WeatherAlert {
            level: AlertLevel::Warning,
            kind: AlertKind::HighUv,
            value: 9.5,
        };
        assert_eq!(
            alert_message(&alert, Language::En),
            "UV index is 9.5. Use sun protection when outdoors."
        );
        assert_eq!(alert_title(AlertKind::HighUv, Language::Fr), "Indice UV élevé");
    }
}
