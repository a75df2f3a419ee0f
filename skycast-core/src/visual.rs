use serde::{Deserialize, Serialize};

/// Visual category for a WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCategory {
    Rainy,
    Cloudy,
    Sunny,
}

impl WeatherCategory {
    /// Classify a weather code. Rainy ranges are checked before cloudy ones,
    /// and anything unmatched is sunny.
    pub fn classify(code: i32) -> Self {
        match code {
            51..=57 | 61..=67 | 80..=82 => WeatherCategory::Rainy,
            3..=49 | 71..=77 | 85.. => WeatherCategory::Cloudy,
            _ => WeatherCategory::Sunny,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCategory::Rainy => "Rainy",
            WeatherCategory::Cloudy => "Cloudy",
            WeatherCategory::Sunny => "Sunny",
        }
    }

    /// Icon name, as used by lucide-style icon sets.
    pub fn icon(&self) -> &'static str {
        match self {
            WeatherCategory::Rainy => "cloud-rain",
            WeatherCategory::Cloudy => "cloud",
            WeatherCategory::Sunny => "sun",
        }
    }

    pub fn is_rainy(&self) -> bool {
        matches!(self, WeatherCategory::Rainy)
    }
}

impl std::fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_sky_codes_are_sunny() {
        for code in 0..=2 {
            assert_eq!(WeatherCategory::classify(code), WeatherCategory::Sunny);
        }
    }

    #[test]
    fn rain_ranges_take_precedence() {
        for code in [51, 55, 57, 61, 65, 67, 80, 81, 82] {
            assert_eq!(WeatherCategory::classify(code), WeatherCategory::Rainy, "code {code}");
        }
    }

    #[test]
    fn cloudy_ranges() {
        for code in [3, 45, 49, 71, 77, 85, 95, 99, 1000] {
            assert_eq!(WeatherCategory::classify(code), WeatherCategory::Cloudy, "code {code}");
        }
    }

    #[test]
    fn gaps_fall_through_to_sunny() {
        for code in [-1, 50, 58, 60, 68, 70, 78, 79, 83, 84] {
            assert_eq!(WeatherCategory::classify(code), WeatherCategory::Sunny, "code {code}");
        }
    }

    #[test]
    fn every_code_maps_to_exactly_one_category() {
        for code in -10..200 {
            let category = WeatherCategory::classify(code);
            let rainy = (51..=57).contains(&code)
                || (61..=67).contains(&code)
                || (80..=82).contains(&code);
            assert_eq!(category.is_rainy(), rainy, "code {code}");
        }
    }

    #[test]
    fn labels_and_icons() {
        assert_eq!(WeatherCategory::Rainy.label(), "Rainy");
        assert_eq!(WeatherCategory::Rainy.icon(), "cloud-rain");
        assert_eq!(WeatherCategory::Cloudy.icon(), "cloud");
        assert_eq!(WeatherCategory::Sunny.to_string(), "Sunny");
        assert_eq!(WeatherCategory::Sunny.icon(), "sun");
    }
}
