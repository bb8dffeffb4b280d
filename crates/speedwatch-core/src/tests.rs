#[cfg(test)]
mod tests {
    use crate::commands::SimCommand;
    use crate::config::{duration_label, ConfigError, SimConfig};
    use crate::enums::*;
    use crate::events::Alert;
    use crate::state::{FleetSnapshot, VehicleView};
    use crate::types::{AlertId, Position, SimTime, VehicleId};

    fn view(id: u64, speed: f64) -> VehicleView {
        VehicleView {
            id: VehicleId(id),
            slot: id as usize,
            position: Position::new(0.0, 25.0),
            direction: Direction::Forward,
            lane: Lane::Upper,
            speed,
            color: VehicleColor::Blue,
            plate: format!("AB-{}", 1000 + id),
            alerted: false,
            speeding: false,
            speed_history: Vec::new(),
            last_updated: SimTime::default(),
        }
    }

    // ---- Configuration ----

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.speed_limit, 80.0);
        assert_eq!(config.violation_threshold_ticks, 300);
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.history_window, 300);
    }

    #[test]
    fn test_speed_limit_bounds() {
        let mut config = SimConfig {
            speed_limit: 0.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::SpeedLimit(0.5)));

        config.speed_limit = 1.0;
        assert!(config.validate().is_ok());

        config.speed_limit = 400.0;
        assert!(matches!(config.validate(), Err(ConfigError::SpeedLimit(_))));

        config.speed_limit = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::SpeedLimit(_))));
    }

    #[test]
    fn test_non_positive_bounds_rejected() {
        let zero_threshold = SimConfig {
            violation_threshold_ticks: 0,
            ..Default::default()
        };
        assert_eq!(
            zero_threshold.validate(),
            Err(ConfigError::ViolationThreshold(0))
        );

        let zero_fleet = SimConfig {
            fleet_size: 0,
            ..Default::default()
        };
        assert_eq!(zero_fleet.validate(), Err(ConfigError::FleetSize(0)));

        let zero_interval = SimConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(zero_interval.validate(), Err(ConfigError::TickInterval(0)));

        let zero_window = SimConfig {
            history_window: 0,
            ..Default::default()
        };
        assert_eq!(zero_window.validate(), Err(ConfigError::HistoryWindow(0)));

        let zero_tick_secs = SimConfig {
            sim_tick_secs: 0.0,
            ..Default::default()
        };
        assert_eq!(
            zero_tick_secs.validate(),
            Err(ConfigError::SimTickSecs(0.0))
        );
    }

    #[test]
    fn test_jitter_and_location_bounds() {
        let negative_jitter = SimConfig {
            speed_jitter: -1.0,
            ..Default::default()
        };
        assert_eq!(
            negative_jitter.validate(),
            Err(ConfigError::SpeedJitter(-1.0))
        );

        let no_jitter = SimConfig {
            speed_jitter: 0.0,
            ..Default::default()
        };
        assert!(no_jitter.validate().is_ok());

        let blank = SimConfig {
            location: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(blank.validate(), Err(ConfigError::EmptyLocation));
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::FleetSize(0);
        assert_eq!(err.to_string(), "fleet size must be between 1 and 1000, got 0");
        let err = ConfigError::SpeedLimit(0.0);
        assert!(err.to_string().contains("speed limit 0 km/h"));
    }

    #[test]
    fn test_partial_config_json_uses_defaults() {
        let config: SimConfig = serde_json::from_str(r#"{"speed_limit": 60.0}"#).unwrap();
        assert_eq!(config.speed_limit, 60.0);
        assert_eq!(config.fleet_size, SimConfig::default().fleet_size);
        assert_eq!(config.location, "Main Highway - Camera #1");
    }

    // ---- Duration label ----

    #[test]
    fn test_default_duration_label_is_five_minutes() {
        assert_eq!(SimConfig::default().duration_label(), "5+ minutes");
    }

    #[test]
    fn test_duration_label_follows_config() {
        let config = SimConfig {
            violation_threshold_ticks: 300,
            sim_tick_secs: 0.1,
            ..Default::default()
        };
        assert_eq!(config.duration_label(), "30+ seconds");

        let config = SimConfig {
            violation_threshold_ticks: 60,
            ..Default::default()
        };
        assert_eq!(config.duration_label(), "1+ minute");

        let config = SimConfig {
            violation_threshold_ticks: 600,
            ..Default::default()
        };
        assert_eq!(config.duration_label(), "10+ minutes");
    }

    #[test]
    fn test_duration_label_units() {
        assert_eq!(duration_label(1.0), "1+ second");
        assert_eq!(duration_label(59.9), "59+ seconds");
        assert_eq!(duration_label(7200.0), "2+ hours");
        assert_eq!(duration_label(3600.0), "1+ hour");
        assert_eq!(duration_label(0.5), "500+ milliseconds");
        assert_eq!(duration_label(0.001), "1+ millisecond");
    }

    #[test]
    fn test_duration_label_survives_float_products() {
        let config = SimConfig {
            violation_threshold_ticks: 100,
            sim_tick_secs: 0.29,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.duration_label(), "29+ seconds");

        let config = SimConfig {
            violation_threshold_ticks: 5,
            sim_tick_secs: 0.1,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.duration_label(), "500+ milliseconds");
    }

    #[test]
    fn test_duration_label_ignores_wall_interval() {
        let fast = SimConfig {
            tick_interval_ms: 10,
            ..Default::default()
        };
        let slow = SimConfig {
            tick_interval_ms: 5000,
            ..Default::default()
        };
        assert_eq!(fast.duration_label(), slow.duration_label());
    }

    // ---- Enums ----

    #[test]
    fn test_direction_exit_boundaries() {
        assert!(!Direction::Forward.has_exited(110.0));
        assert!(Direction::Forward.has_exited(110.1));
        assert!(!Direction::Reverse.has_exited(-10.0));
        assert!(Direction::Reverse.has_exited(-10.1));
        assert_eq!(Direction::Forward.entry_x(), 0.0);
        assert_eq!(Direction::Reverse.entry_x(), 100.0);
    }

    #[test]
    fn test_lane_coordinates() {
        assert_eq!(Lane::Upper.y(), 25.0);
        assert_eq!(Lane::Lower.y(), 75.0);
    }

    #[test]
    fn test_palette_hex_codes_unique() {
        let mut codes: Vec<&str> = VehicleColor::PALETTE.iter().map(|c| c.hex()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), VehicleColor::PALETTE.len());
    }

    // ---- Serde ----

    /// Verify SimCommand round-trips through serde (tagged union).
    #[test]
    fn test_sim_command_serde() {
        let commands = vec![
            SimCommand::Configure {
                config: SimConfig::default(),
            },
            SimCommand::Pause,
            SimCommand::Resume,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: SimCommand = serde_json::from_str(&json).unwrap();
            // SimCommand doesn't derive PartialEq
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_alert_serde() {
        let alert = Alert {
            id: AlertId(3),
            vehicle_id: VehicleId(17),
            plate: "KX-4821".to_string(),
            speed: 104.5,
            duration: "5+ minutes".to_string(),
            timestamp: SimTime {
                tick: 300,
                elapsed_secs: 300.0,
            },
            location: "Main Highway - Camera #1".to_string(),
        };
        let json = serde_json::to_string(&alert).unwrap();
        let back: Alert = serde_json::from_str(&json).unwrap();
        assert_eq!(alert, back);
    }

    // ---- Types ----

    #[test]
    fn test_identity_display() {
        assert_eq!(VehicleId(12).to_string(), "vehicle-12");
        assert_eq!(AlertId(4).to_string(), "alert-4");
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..300 {
            time.advance(1.0);
        }
        assert_eq!(time.tick, 300);
        assert!((time.elapsed_secs - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_sim_time_orders_by_tick() {
        let early = SimTime {
            tick: 5,
            elapsed_secs: 5.0,
        };
        let late = SimTime {
            tick: 6,
            elapsed_secs: 6.0,
        };
        assert!(early < late);
    }

    // ---- Snapshot helpers ----

    #[test]
    fn test_ranked_by_speed_fastest_first() {
        let snapshot = FleetSnapshot {
            vehicles: vec![view(0, 60.0), view(1, 110.0), view(2, 85.0)],
            ..Default::default()
        };
        let ranked: Vec<u64> = snapshot.ranked_by_speed().iter().map(|v| v.id.0).collect();
        assert_eq!(ranked, vec![1, 2, 0]);
        assert_eq!(snapshot.vehicle(VehicleId(2)).map(|v| v.speed), Some(85.0));
        assert!(snapshot.vehicle(VehicleId(9)).is_none());
    }
}
