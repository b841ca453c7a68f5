//! Unit tests for bf-core primitives.

#[cfg(test)]
mod ids {
    use crate::StationId;

    #[test]
    fn index_roundtrip() {
        let id = StationId(7);
        assert_eq!(id.index(), 7);
        assert_eq!(StationId::try_from(7usize).unwrap(), id);
    }

    #[test]
    fn ordering_follows_inner_value() {
        assert!(StationId(0) < StationId(1));
    }

    #[test]
    fn display() {
        assert_eq!(StationId(3).to_string(), "StationId(3)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Point;

    #[test]
    fn zero_distance() {
        let p = Point::new(2.5, 7.5);
        assert_eq!(p.distance(p), 0.0);
    }

    #[test]
    fn pythagorean_distance() {
        let d = Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12, "got {d}");
    }

    #[test]
    fn clamp_to_map() {
        let p = Point::new(-1.0, 12.0).clamp_to(10.0);
        assert_eq!(p, Point::new(0.0, 10.0));
    }
}

#[cfg(test)]
mod weather {
    use crate::{CoreError, Weather};

    #[test]
    fn factors_match_table() {
        assert_eq!(Weather::Sunny.factor(), 1.2);
        assert_eq!(Weather::Cloudy.factor(), 1.0);
        assert_eq!(Weather::Rainy.factor(), 0.6);
        assert_eq!(Weather::Snowy.factor(), 0.3);
        assert_eq!(Weather::Stormy.factor(), 0.2);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Rainy".parse::<Weather>().unwrap(), Weather::Rainy);
        assert_eq!(" stormy ".parse::<Weather>().unwrap(), Weather::Stormy);
    }

    #[test]
    fn unknown_condition_rejected() {
        let err = "blizzard".parse::<Weather>().unwrap_err();
        assert_eq!(err, CoreError::InvalidWeather("blizzard".into()));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for w in Weather::ALL {
            assert_eq!(w.to_string().parse::<Weather>().unwrap(), w);
        }
    }
}

#[cfg(test)]
mod demand {
    use crate::{DemandCurve, HourOfDay};

    #[test]
    fn standard_curve_peaks() {
        let c = DemandCurve::default();
        assert_eq!(c.factor(HourOfDay::new(8).unwrap()), 0.9);
        assert_eq!(c.factor(HourOfDay::new(17).unwrap()), 0.9);
        assert_eq!(c.factor(HourOfDay::new(3).unwrap()), 0.01);
    }

    #[test]
    fn values_outside_unit_interval_rejected() {
        let mut v = [0.5; 24];
        v[4] = 1.5;
        assert!(DemandCurve::new(v).is_err());
        v[4] = f64::NAN;
        assert!(DemandCurve::new(v).is_err());
    }

    #[test]
    fn wrong_length_rejected() {
        assert!(DemandCurve::try_from(vec![0.5; 23]).is_err());
        assert!(DemandCurve::try_from(vec![0.5; 24]).is_ok());
    }
}

#[cfg(test)]
mod time {
    use crate::{DemandCurve, HourOfDay, SimClock, Weather};

    #[test]
    fn hour_bounds() {
        assert!(HourOfDay::new(23).is_ok());
        assert!(HourOfDay::new(24).is_err());
    }

    #[test]
    fn hour_wraps_at_midnight() {
        let h = HourOfDay::new(23).unwrap();
        assert_eq!(h.next(), HourOfDay::MIDNIGHT);
        assert_eq!(HourOfDay::new(22).unwrap().offset(50).get(), 0);
    }

    #[test]
    fn hour_display() {
        assert_eq!(HourOfDay::new(8).unwrap().to_string(), "08:00");
    }

    #[test]
    fn clock_combined_factor() {
        let clock = SimClock::new(HourOfDay::new(8).unwrap(), Weather::Rainy, DemandCurve::default());
        assert!((clock.combined_factor() - 0.54).abs() < 1e-12);
    }

    #[test]
    fn clock_advance_cycles_full_day() {
        let mut clock = SimClock::new(HourOfDay::new(5).unwrap(), Weather::Sunny, DemandCurve::default());
        for _ in 0..24 {
            clock.advance();
        }
        assert_eq!(clock.hour.get(), 5);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn children_diverge() {
        let mut root = SimRng::new(1);
        let mut c0 = root.child(0);
        let mut c1 = root.child(1);
        let a: u64 = c0.random();
        let b: u64 = c1.random();
        assert_ne!(a, b);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        assert!(rng.gen_bool(3.0));
        assert!(!rng.gen_bool(f64::NAN));
    }
}

#[cfg(test)]
mod config {
    use crate::{SimConfig, Weather};

    #[test]
    fn default_is_valid() {
        let cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.weather, Weather::Sunny);
        assert_eq!(cfg.start_hour, 8);
    }

    #[test]
    fn zero_counts_rejected() {
        assert!(SimConfig::with_counts(0, 10, 1).validate().is_err());
        assert!(SimConfig::with_counts(4, 0, 1).validate().is_err());
    }

    #[test]
    fn bad_ranges_rejected() {
        let mut cfg = SimConfig::default();
        cfg.capacity_min = 20;
        assert!(cfg.validate().is_err());

        let mut cfg = SimConfig::default();
        cfg.start_hour = 24;
        assert!(cfg.validate().is_err());

        let mut cfg = SimConfig::default();
        cfg.max_cascade_distance = Some(-1.0);
        assert!(cfg.validate().is_err());

        let mut cfg = SimConfig::default();
        cfg.departure_scale = f64::INFINITY;
        assert!(cfg.validate().is_err());
    }
}
