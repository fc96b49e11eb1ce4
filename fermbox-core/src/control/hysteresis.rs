//! Bang-bang control with hysteresis
//!
//! Two switching thresholds straddle the setpoint. Below the low threshold
//! the heater runs, above the high threshold it stops, and inside the band
//! it keeps whatever it was doing. The band is what keeps the relay from
//! chattering around the setpoint.

/// Heater state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeaterState {
    /// Heater energized
    Heating,
    /// Heater de-energized (power-on state)
    #[default]
    Idle,
}

impl HeaterState {
    /// Whether the heater output should be driven on
    pub const fn is_on(self) -> bool {
        matches!(self, HeaterState::Heating)
    }

    /// Next state for a temperature reading
    ///
    /// Each state only looks at the threshold that can leave it, so a
    /// reading inside the band is always a self-loop.
    pub fn next(self, temperature_c: f32, thresholds: Thresholds) -> Self {
        match self {
            HeaterState::Idle if temperature_c < thresholds.low_c => HeaterState::Heating,
            HeaterState::Heating if temperature_c > thresholds.high_c => HeaterState::Idle,
            state => state,
        }
    }
}

/// Switching thresholds around a setpoint
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    /// Heater turns on strictly below this
    pub low_c: f32,
    /// Heater turns off strictly above this
    pub high_c: f32,
}

impl Thresholds {
    /// Thresholds for a setpoint and full band width
    pub fn around(target_c: f32, band_c: f32) -> Self {
        let half = band_c / 2.0;
        Self {
            low_c: target_c - half,
            high_c: target_c + half,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn thresholds() -> Thresholds {
        Thresholds::around(28.0, 0.4)
    }

    fn state_for(heating: bool) -> HeaterState {
        if heating {
            HeaterState::Heating
        } else {
            HeaterState::Idle
        }
    }

    fn in_band(t: &Thresholds, temperature_c: f32) -> bool {
        temperature_c >= t.low_c && temperature_c <= t.high_c
    }

    #[test]
    fn test_thresholds_around_setpoint() {
        let t = thresholds();
        assert!((t.low_c - 27.8).abs() < 1e-5);
        assert!((t.high_c - 28.2).abs() < 1e-5);
        assert!(in_band(&t, 28.0));
        assert!(!in_band(&t, 27.5));
        assert!(!in_band(&t, 28.5));
    }

    #[test]
    fn test_activation_sequence() {
        let t = thresholds();

        let state = HeaterState::Idle.next(27.5, t);
        assert_eq!(state, HeaterState::Heating);

        // Inside the band: keeps heating
        let state = state.next(28.0, t);
        assert_eq!(state, HeaterState::Heating);

        let state = state.next(28.5, t);
        assert_eq!(state, HeaterState::Idle);

        // Inside the band: stays idle
        let state = state.next(28.0, t);
        assert_eq!(state, HeaterState::Idle);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let t = Thresholds {
            low_c: 27.75,
            high_c: 28.25,
        };
        assert_eq!(HeaterState::Idle.next(27.75, t), HeaterState::Idle);
        assert_eq!(HeaterState::Heating.next(28.25, t), HeaterState::Heating);
    }

    #[test]
    fn test_redundant_transitions_are_self_loops() {
        let t = thresholds();
        assert_eq!(HeaterState::Heating.next(20.0, t), HeaterState::Heating);
        assert_eq!(HeaterState::Idle.next(35.0, t), HeaterState::Idle);
    }

    #[test]
    fn test_power_on_state_is_idle() {
        assert_eq!(HeaterState::default(), HeaterState::Idle);
        assert!(!HeaterState::default().is_on());
        assert!(state_for(true).is_on());
    }

    proptest! {
        #[test]
        fn prop_no_chatter_inside_band(
            target in 25.0f32..30.0,
            band in 0.1f32..2.0,
            frac in 0.01f32..0.99,
            heating in any::<bool>(),
            repeats in 1usize..50,
        ) {
            let t = Thresholds::around(target, band);
            let temp = t.low_c + (t.high_c - t.low_c) * frac;
            prop_assume!(temp > t.low_c && temp < t.high_c);

            let start = state_for(heating);
            let mut state = start;
            for _ in 0..repeats {
                state = state.next(temp, t);
                prop_assert_eq!(state, start);
            }
        }

        #[test]
        fn prop_outside_band_is_decisive(
            target in 25.0f32..30.0,
            band in 0.1f32..2.0,
            offset in 0.01f32..10.0,
            heating in any::<bool>(),
        ) {
            let t = Thresholds::around(target, band);
            let state = state_for(heating);
            prop_assert_eq!(state.next(t.low_c - offset, t), HeaterState::Heating);
            prop_assert_eq!(state.next(t.high_c + offset, t), HeaterState::Idle);
        }
    }
}
