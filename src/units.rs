pub mod temperature {
    /// Apparent temperature heuristic in °C.
    ///
    /// Above 10 °C humidity dominates: `T - 0.15·V + 0.02·(H - 50)`.
    /// At or below 10 °C wind dominates: `(T - 0.3·V) + 0.01·(H - 50)`.
    /// Inputs are not validated and the result is not rounded.
    pub fn comfort_index(temp_c: f64, wind_kmh: f64, humidity_pct: f64) -> f64 {
        if temp_c > 10.0 {
            temp_c - 0.15 * wind_kmh + 0.02 * (humidity_pct - 50.0)
        } else {
            (temp_c - 0.3 * wind_kmh) + 0.01 * (humidity_pct - 50.0)
        }
    }

    /// Rounds half up (towards positive infinity), so -2.5 becomes -2.
    pub fn round_display(value: f64) -> i64 {
        (value + 0.5).floor() as i64
    }

    #[cfg(test)]
    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_comfort_warm() {
        assert!(close(comfort_index(15.0, 10.0, 50.0), 13.5));
        assert!(close(comfort_index(20.0, 0.0, 100.0), 21.0));
    }

    #[test]
    fn test_comfort_cold() {
        assert!(close(comfort_index(5.0, 10.0, 50.0), 2.0));
        assert!(close(comfort_index(0.0, 20.0, 0.0), -6.5));
    }

    #[test]
    fn test_comfort_boundary_is_cold() {
        // cold branch: 10 + 0.01 * 10 = 10.1, warm would give 10.2
        assert!(close(comfort_index(10.0, 0.0, 60.0), 10.1));
        assert!(close(comfort_index(10.0, 0.0, 50.0), 10.0));
        assert!(close(comfort_index(10.0, 10.0, 50.0), 7.0));
        assert!(comfort_index(10.000001, 10.0, 50.0) > 8.0);
    }

    #[test]
    fn test_comfort_unvalidated_inputs() {
        assert!(close(comfort_index(5.0, -10.0, 250.0), 10.0));
        assert!(comfort_index(f64::NAN, 0.0, 50.0).is_nan());
    }

    #[test]
    fn test_comfort_is_repeatable() {
        let a = comfort_index(12.3, 17.9, 83.0);
        let b = comfort_index(12.3, 17.9, 83.0);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_round_display() {
        assert_eq!(round_display(13.5), 14);
        assert_eq!(round_display(13.49), 13);
        assert_eq!(round_display(-2.5), -2);
        assert_eq!(round_display(-2.51), -3);
        assert_eq!(round_display(0.0), 0);
    }
}

pub mod direction {
    const COMPASS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSO", "SO", "OSO", "O", "ONO",
        "NO", "NNO",
    ];

    pub fn degree_to_compass(deg: f64) -> &'static str {
        let deg = (deg % 360.0) + 360.0;
        let val = (deg / 22.5 + 0.5) as usize;
        COMPASS[val % 16]
    }

    #[test]
    fn test_degree_to_compass() {
        assert_eq!(degree_to_compass(0.0), "N");
        assert_eq!(degree_to_compass(90.0), "E");
        assert_eq!(degree_to_compass(180.0), "S");
        assert_eq!(degree_to_compass(225.0), "SO");
        assert_eq!(degree_to_compass(270.0), "O");
        assert_eq!(degree_to_compass(315.0), "NO");
        assert_eq!(degree_to_compass(360.0), "N");
        assert_eq!(degree_to_compass(-90.0), "O");
    }
}
