//! Unit tests for bf-network.
//!
//! Most tests use hand-placed stations so distances are easy to reason about.

#[cfg(test)]
mod helpers {
    use bf_core::Point;

    use crate::{StationNetwork, StationNetworkBuilder};

    /// Four stations on a line, capacity 5 each.
    ///
    /// ```text
    ///   0 ── 1 ──── 2 ──── 3
    ///   x: 0   1      3      5
    /// ```
    pub fn line4() -> StationNetwork {
        let mut b = StationNetworkBuilder::new();
        for x in [0.0, 1.0, 3.0, 5.0] {
            b.add_station(Point::new(x, 0.0), 5);
        }
        b.occupancy(vec![5, 0, 0, 0]).build().unwrap()
    }
}

// ── Builder & geometry ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use bf_core::{Point, StationId};

    use crate::{NetworkError, StationNetworkBuilder, StationSpec};

    #[test]
    fn empty_build_rejected() {
        let err = StationNetworkBuilder::new().build().unwrap_err();
        assert_eq!(err, NetworkError::EmptyNetwork);
    }

    #[test]
    fn zero_capacity_rejected() {
        let mut b = StationNetworkBuilder::new();
        b.add_station(Point::new(0.0, 0.0), 3);
        b.add_station(Point::new(1.0, 0.0), 0);
        assert_eq!(b.build().unwrap_err(), NetworkError::ZeroCapacity(StationId(1)));
    }

    #[test]
    fn non_finite_location_rejected() {
        let b = StationNetworkBuilder::from_specs(vec![StationSpec::new(Point::new(f64::NAN, 0.0), 3)]);
        assert!(matches!(b.build(), Err(NetworkError::NonFiniteLocation(_))));
    }

    #[test]
    fn occupancy_over_capacity_rejected() {
        let mut b = StationNetworkBuilder::new();
        b.add_station(Point::new(0.0, 0.0), 3);
        let err = b.occupancy(vec![4]).build().unwrap_err();
        assert!(matches!(err, NetworkError::OccupancyExceedsCapacity { occupancy: 4, capacity: 3, .. }));
    }

    #[test]
    fn occupancy_length_mismatch_rejected() {
        let mut b = StationNetworkBuilder::new();
        b.add_station(Point::new(0.0, 0.0), 3);
        assert!(matches!(
            b.occupancy(vec![1, 1]).build(),
            Err(NetworkError::LengthMismatch { expected: 1, got: 2, .. })
        ));
    }

    #[test]
    fn ids_follow_insertion_order() {
        let net = super::helpers::line4();
        for (i, s) in net.stations().iter().enumerate() {
            assert_eq!(s.id, StationId(i as u32));
        }
    }

    #[test]
    fn distance_table_symmetric_zero_diagonal() {
        let net = super::helpers::line4();
        for a in 0..4u32 {
            assert_eq!(net.distance(StationId(a), StationId(a)), 0.0);
            for b in 0..4u32 {
                assert_eq!(net.distance(StationId(a), StationId(b)), net.distance(StationId(b), StationId(a)));
            }
        }
        assert_eq!(net.distance(StationId(0), StationId(3)), 5.0);
    }

    #[test]
    fn totals() {
        let net = super::helpers::line4();
        assert_eq!(net.total_occupancy(), 5);
        assert_eq!(net.total_capacity(), 20);
        assert_eq!(net.capacities(), vec![5, 5, 5, 5]);
    }
}

#[cfg(test)]
mod nearest {
    use bf_core::{Point, StationId};

    use crate::StationNetworkBuilder;

    #[test]
    fn sorted_by_distance() {
        let net = super::helpers::line4();
        assert_eq!(net.nearest_order(StationId(2)), &[StationId(1), StationId(3), StationId(0)]);
        assert_eq!(net.nearest_order(StationId(0)), &[StationId(1), StationId(2), StationId(3)]);
    }

    #[test]
    fn ties_go_to_lowest_id() {
        // Station 0 in the middle, the other three all at distance 1.
        let mut b = StationNetworkBuilder::new();
        b.add_station(Point::new(0.0, 0.0), 5);
        b.add_station(Point::new(0.0, 1.0), 5);
        b.add_station(Point::new(-1.0, 0.0), 5);
        b.add_station(Point::new(1.0, 0.0), 5);
        let net = b.build().unwrap();
        assert_eq!(net.nearest_order(StationId(0)), &[StationId(1), StationId(2), StationId(3)]);
    }

    #[test]
    fn excludes_self() {
        let net = super::helpers::line4();
        for s in net.stations() {
            assert!(!net.nearest_order(s.id).contains(&s.id));
            assert_eq!(net.nearest_order(s.id).len(), 3);
        }
    }
}

#[cfg(test)]
mod commit {
    use crate::NetworkError;

    #[test]
    fn commit_replaces_occupancy() {
        let mut net = super::helpers::line4();
        net.commit_occupancy(&[1, 2, 1, 1]).unwrap();
        assert_eq!(net.occupancy(), vec![1, 2, 1, 1]);
    }

    #[test]
    fn failed_commit_leaves_network_untouched() {
        let mut net = super::helpers::line4();
        let err = net.commit_occupancy(&[0, 0, 0, 6]).unwrap_err();
        assert!(matches!(err, NetworkError::OccupancyExceedsCapacity { .. }));
        assert_eq!(net.occupancy(), vec![5, 0, 0, 0]);
    }
}

// ── Transition matrices ───────────────────────────────────────────────────────

#[cfg(test)]
mod matrix {
    use bf_core::{Point, ScalePolicy};

    use crate::{DISTANCE_EPSILON, NetworkError, ROW_TOLERANCE, StationNetworkBuilder, TransitionMatrix};

    #[test]
    fn base_rows_normalized_with_zero_diagonal() {
        let net = super::helpers::line4();
        let base = TransitionMatrix::build_base(&net);
        assert_eq!(base.len(), 4);
        for i in 0..4 {
            assert_eq!(base.get(i, i), 0.0);
        }
        assert!(base.is_row_stochastic(ROW_TOLERANCE));
    }

    #[test]
    fn base_weights_are_inverse_distance() {
        let net = super::helpers::line4();
        let base = TransitionMatrix::build_base(&net);
        // Row 0: distances 1, 3, 5.
        let w = [1.0 / (1.0 + DISTANCE_EPSILON), 1.0 / (3.0 + DISTANCE_EPSILON), 1.0 / (5.0 + DISTANCE_EPSILON)];
        let total: f64 = w.iter().sum();
        for (j, wj) in w.iter().enumerate() {
            assert!((base.get(0, j + 1) - wj / total).abs() < 1e-12);
        }
        assert!(base.get(0, 1) > base.get(0, 2));
        assert!(base.get(0, 2) > base.get(0, 3));
    }

    #[test]
    fn coincident_stations_get_finite_weights() {
        let mut b = StationNetworkBuilder::new();
        b.add_station(Point::new(1.0, 1.0), 5);
        b.add_station(Point::new(1.0, 1.0), 5);
        b.add_station(Point::new(4.0, 5.0), 5);
        let base = TransitionMatrix::build_base(&b.build().unwrap());
        assert!(base.row(0).iter().all(|p| p.is_finite()));
        assert!(base.is_row_stochastic(ROW_TOLERANCE));
    }

    #[test]
    fn modifiers_shrink_off_diagonal_and_fill_diagonal() {
        let net = super::helpers::line4();
        let base = TransitionMatrix::build_base(&net);
        let eff = base.apply_modifiers(0.5, 0.6, ScalePolicy::Clamp).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                if i != j {
                    assert!((eff.get(i, j) - base.get(i, j) * 0.3).abs() < 1e-12);
                }
            }
            assert!((eff.get(i, i) - 0.7).abs() < 1e-9);
        }
        assert!(eff.is_row_stochastic(ROW_TOLERANCE));
    }

    #[test]
    fn every_hour_and_weather_stays_stochastic() {
        use bf_core::{DemandCurve, HourOfDay, Weather};

        let net = super::helpers::line4();
        let base = TransitionMatrix::build_base(&net);
        let curve = DemandCurve::default();
        for h in 0..24 {
            for w in Weather::ALL {
                let eff = base
                    .apply_modifiers(curve.factor(HourOfDay::new(h).unwrap()), w.factor(), ScalePolicy::Clamp)
                    .unwrap();
                assert!(eff.is_row_stochastic(ROW_TOLERANCE), "hour {h} weather {w}");
            }
        }
    }

    #[test]
    fn clamp_caps_scale_above_one() {
        // Sunny peak: 0.9 × 1.2 = 1.08.
        let net = super::helpers::line4();
        let base = TransitionMatrix::build_base(&net);
        let eff = base.apply_modifiers(0.9, 1.2, ScalePolicy::Clamp).unwrap();
        for i in 0..4 {
            assert!(eff.get(i, i) >= 0.0);
            assert!(eff.get(i, i) < 1e-9);
        }
        assert!(eff.is_row_stochastic(ROW_TOLERANCE));
    }

    #[test]
    fn reject_refuses_scale_above_one() {
        let net = super::helpers::line4();
        let base = TransitionMatrix::build_base(&net);
        let err = base.apply_modifiers(0.9, 1.2, ScalePolicy::Reject).unwrap_err();
        assert!(matches!(err, NetworkError::NegativeDiagonal { row: 0, .. }));
        // Scale exactly 1 is fine.
        assert!(base.apply_modifiers(1.0, 1.0, ScalePolicy::Reject).is_ok());
    }

    #[test]
    fn negative_scale_rejected() {
        let net = super::helpers::line4();
        let base = TransitionMatrix::build_base(&net);
        assert!(matches!(
            base.apply_modifiers(-0.1, 1.0, ScalePolicy::Clamp),
            Err(NetworkError::InvalidScale(_))
        ));
    }

    #[test]
    fn single_station_becomes_stay_row() {
        let mut b = StationNetworkBuilder::new();
        b.add_station(Point::new(0.0, 0.0), 5);
        let base = TransitionMatrix::build_base(&b.build().unwrap());
        let eff = base.apply_modifiers(0.9, 1.2, ScalePolicy::Reject).unwrap();
        assert_eq!(eff.get(0, 0), 1.0);
    }
}

// ── Layout generation ─────────────────────────────────────────────────────────

#[cfg(test)]
mod layout {
    use bf_core::{SimConfig, SimRng};

    use crate::{NetworkError, distribute_bikes, generate_stations};

    #[test]
    fn generated_stations_respect_config() {
        let cfg = SimConfig::with_counts(40, 100, 7);
        let mut rng = SimRng::new(cfg.seed);
        let specs = generate_stations(&cfg, &mut rng).unwrap();
        assert_eq!(specs.len(), 40);
        for s in &specs {
            assert!((cfg.capacity_min..cfg.capacity_max).contains(&s.capacity));
            assert!((0.0..=cfg.map_size).contains(&s.location.x));
            assert!((0.0..=cfg.map_size).contains(&s.location.y));
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let cfg = SimConfig::default();
        let a = generate_stations(&cfg, &mut SimRng::new(3)).unwrap();
        let b = generate_stations(&cfg, &mut SimRng::new(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_spread_puts_stations_on_centres() {
        let mut cfg = SimConfig::with_counts(4, 10, 1);
        cfg.cluster_spread = 0.0;
        let specs = generate_stations(&cfg, &mut SimRng::new(1)).unwrap();
        assert_eq!((specs[0].location.x, specs[0].location.y), (2.5, 2.5));
        assert_eq!((specs[1].location.x, specs[1].location.y), (7.5, 7.5));
    }

    #[test]
    fn distribution_sums_to_total_and_fits() {
        let caps = [5, 12, 7, 3, 9];
        for seed in 0..50 {
            let occ = distribute_bikes(&caps, 30, &mut SimRng::new(seed)).unwrap();
            assert_eq!(occ.iter().sum::<u32>(), 30);
            for (o, c) in occ.iter().zip(caps) {
                assert!(*o <= c);
            }
        }
    }

    #[test]
    fn full_network_is_exactly_full() {
        let caps = [4, 4, 4];
        let occ = distribute_bikes(&caps, 12, &mut SimRng::new(0)).unwrap();
        assert_eq!(occ, vec![4, 4, 4]);
    }

    #[test]
    fn too_many_bikes_rejected() {
        let err = distribute_bikes(&[2, 2], 5, &mut SimRng::new(0)).unwrap_err();
        assert_eq!(err, NetworkError::BikesExceedCapacity { bikes: 5, capacity: 4 });
    }
}

// ── Parallel feature ──────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parallel"))]
mod parallel {
    use bf_core::{Point, ScalePolicy, SimConfig, SimRng, StationId};

    use crate::matrix::{base_row, effective_row};
    use crate::network::distance_row;
    use crate::{StationNetwork, StationNetworkBuilder, TransitionMatrix, generate_stations};

    fn generated(seed: u64) -> StationNetwork {
        let cfg = SimConfig::with_counts(50, 100, seed);
        let specs = generate_stations(&cfg, &mut SimRng::new(seed)).unwrap();
        StationNetworkBuilder::from_specs(specs).build().unwrap()
    }

    #[test]
    fn distance_table_matches_sequential_rows() {
        let net = generated(11);
        let locations: Vec<Point> = net.stations().iter().map(|s| s.location).collect();
        for a in 0..net.len() {
            let mut expected = vec![0.0; net.len()];
            distance_row(&locations, a, &mut expected);
            assert_eq!(net.distances_from(StationId(a as u32)), expected.as_slice(), "row {a}");
        }
    }

    #[test]
    fn base_matrix_matches_sequential_rows() {
        let net = generated(12);
        let base = TransitionMatrix::build_base(&net);
        for i in 0..net.len() {
            assert_eq!(base.row(i), base_row(&net, i).as_slice(), "row {i}");
        }
    }

    #[test]
    fn effective_matrix_matches_sequential_rows() {
        let net = generated(13);
        let base = TransitionMatrix::build_base(&net);
        for scale in [0.05, 0.5, 1.0, 1.08] {
            let effective = base.apply_modifiers(scale, 1.0, ScalePolicy::Clamp).unwrap();
            for i in 0..net.len() {
                let expected = effective_row(base.row(i), i, scale, ScalePolicy::Clamp).unwrap();
                assert_eq!(effective.row(i), expected.as_slice(), "scale {scale}, row {i}");
            }
        }
    }

    #[test]
    fn reject_reports_lowest_failing_row() {
        let net = generated(14);
        let base = TransitionMatrix::build_base(&net);
        let err = base.apply_modifiers(2.0, 1.0, ScalePolicy::Reject).unwrap_err();
        let expected = effective_row(base.row(0), 0, 2.0, ScalePolicy::Reject).unwrap_err();
        assert_eq!(err, expected);
    }
}
