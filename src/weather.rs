//! Presentation of Open-Meteo weather codes.
//!
//! Every code maps to a Spanish label and to one [`Condition`] category, which
//! carries the short symbol shown on hourly cards. Both lookups are total:
//! codes outside the table fall back to the unknown label and symbol.

const UNKNOWN_LABEL: &str = "Condición desconocida";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Clear,
    PartlyCloudy,
    Overcast,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

impl Condition {
    /// Fog (45, 48) has a label but no symbol group, so it lands in `Unknown`.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1 | 2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            51 | 53 | 55 => Self::Drizzle,
            61 | 63 | 65 | 80 | 81 | 82 => Self::Rain,
            71 | 73 | 75 => Self::Snow,
            95 | 96 | 99 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::PartlyCloudy => "🌤️",
            Self::Overcast => "☁️",
            Self::Drizzle => "🌦️",
            Self::Rain => "🌧️",
            Self::Snow => "❄️",
            Self::Thunderstorm => "⛈️",
            Self::Unknown => "ℹ️",
        }
    }
}

/// Label for a weather code, `"Condición desconocida"` when the code is not known.
pub fn label(code: i32) -> &'static str {
    match code {
        0 => "Despejado",
        1 => "Mayormente despejado",
        2 => "Parcialmente nublado",
        3 => "Nublado",
        45 => "Niebla",
        48 => "Niebla con escarcha",
        51 => "Llovizna débil",
        53 => "Llovizna",
        55 => "Llovizna intensa",
        61 => "Lluvia débil",
        63 => "Lluvia",
        65 => "Lluvia intensa",
        71 => "Nieve débil",
        73 => "Nieve",
        75 => "Nieve intensa",
        80 => "Chubascos débiles",
        81 => "Chubascos",
        82 => "Chubascos intensos",
        95 => "Tormenta",
        96 => "Tormenta con granizo",
        99 => "Tormenta fuerte con granizo",
        _ => UNKNOWN_LABEL,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub label: &'static str,
    pub symbol: &'static str,
}

impl Classification {
    /// Used when the provider sends no code at all.
    pub const UNKNOWN: Classification = Classification {
        label: UNKNOWN_LABEL,
        symbol: "ℹ️",
    };
}

pub fn classify(code: i32) -> Classification {
    Classification {
        label: label(code),
        symbol: Condition::from_code(code).symbol(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [(i32, &str, Condition); 21] = [
        (0, "Despejado", Condition::Clear),
        (1, "Mayormente despejado", Condition::PartlyCloudy),
        (2, "Parcialmente nublado", Condition::PartlyCloudy),
        (3, "Nublado", Condition::Overcast),
        (45, "Niebla", Condition::Unknown),
        (48, "Niebla con escarcha", Condition::Unknown),
        (51, "Llovizna débil", Condition::Drizzle),
        (53, "Llovizna", Condition::Drizzle),
        (55, "Llovizna intensa", Condition::Drizzle),
        (61, "Lluvia débil", Condition::Rain),
        (63, "Lluvia", Condition::Rain),
        (65, "Lluvia intensa", Condition::Rain),
        (71, "Nieve débil", Condition::Snow),
        (73, "Nieve", Condition::Snow),
        (75, "Nieve intensa", Condition::Snow),
        (80, "Chubascos débiles", Condition::Rain),
        (81, "Chubascos", Condition::Rain),
        (82, "Chubascos intensos", Condition::Rain),
        (95, "Tormenta", Condition::Thunderstorm),
        (96, "Tormenta con granizo", Condition::Thunderstorm),
        (99, "Tormenta fuerte con granizo", Condition::Thunderstorm),
    ];

    #[test]
    fn test_known_codes() {
        for (code, expected_label, condition) in TABLE {
            let c = classify(code);
            assert_eq!(c.label, expected_label, "label for code {code}");
            assert_eq!(c.symbol, condition.symbol(), "symbol for code {code}");
            assert_eq!(Condition::from_code(code), condition);
        }
    }

    #[test]
    fn test_category_symbols() {
        assert_eq!(classify(0).symbol, "☀️");
        assert_eq!(classify(2).symbol, "🌤️");
        assert_eq!(classify(3).symbol, "☁️");
        assert_eq!(classify(53).symbol, "🌦️");
        assert_eq!(classify(80).symbol, "🌧️");
        assert_eq!(classify(75).symbol, "❄️");
        assert_eq!(classify(96).symbol, "⛈️");
    }

    #[test]
    fn test_fog_has_label_but_unknown_symbol() {
        assert_eq!(classify(45).label, "Niebla");
        assert_eq!(classify(45).symbol, "ℹ️");
    }

    #[test]
    fn test_unknown_codes() {
        for code in [9999, -1, 4, 56, 77, i32::MAX, i32::MIN] {
            let c = classify(code);
            assert_eq!(c.label, "Condición desconocida");
            assert_eq!(c, Classification::UNKNOWN);
        }
    }
}
