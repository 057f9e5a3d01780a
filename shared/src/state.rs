//! Oven State Machine
//!
//! Defines the reflow phases and the per-tick thermal transition that
//! advances a run from heating through soak, reflow, and cool-down.

use crate::thermal;

/// The six mutually exclusive phases of a reflow run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Heating,
    Soaking,
    Reflowing,
    Cooling,
    Complete,
}

impl Phase {
    /// Wire token used in status lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "IDLE",
            Phase::Heating => "HEATING",
            Phase::Soaking => "SOAKING",
            Phase::Reflowing => "REFLOWING",
            Phase::Cooling => "COOLING",
            Phase::Complete => "COMPLETE",
        }
    }

    /// Parse a wire token back into a phase
    pub fn from_token(token: &str) -> Option<Phase> {
        match token {
            "IDLE" => Some(Phase::Idle),
            "HEATING" => Some(Phase::Heating),
            "SOAKING" => Some(Phase::Soaking),
            "REFLOWING" => Some(Phase::Reflowing),
            "COOLING" => Some(Phase::Cooling),
            "COMPLETE" => Some(Phase::Complete),
            _ => None,
        }
    }

    /// True for the phases the simulator leaves alone
    pub fn is_quiescent(&self) -> bool {
        matches!(self, Phase::Idle | Phase::Complete)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for one reflow run, set wholesale by a START command
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProcessProfile {
    pub soak_temp: f64,
    pub soak_time: u32,
    pub reflow_peak: f64,
    /// Recorded from the command but not consulted by the engine; the
    /// reflow exit keys off reaching the peak temperature.
    pub reflow_time: u32,
}

/// A phase transition produced by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: Phase,
    pub to: Phase,
}

/// The single oven the device simulates
///
/// Exactly one instance exists for the process lifetime. Temperatures only
/// move through [`Oven::tick`] and the START/STOP effects; a status query
/// never mutates.
#[derive(Debug, Clone)]
pub struct Oven {
    /// Simulated sensor reading (deg C)
    pub current_temp: f64,
    /// The immediate target the engine is ramping toward (deg C)
    pub goal_temp: f64,
    pub phase: Phase,
    /// Soak countdown in seconds; stale outside of `Soaking`
    pub countdown: u32,
    pub profile: ProcessProfile,
}

impl Default for Oven {
    fn default() -> Self {
        Self::new()
    }
}

impl Oven {
    /// Create the oven in its power-on state
    pub fn new() -> Self {
        Self {
            current_temp: thermal::AMBIENT_TEMP_C,
            goal_temp: 0.0,
            phase: Phase::Idle,
            countdown: 0,
            profile: ProcessProfile::default(),
        }
    }

    /// Advance the simulation by one tick (one simulated second)
    ///
    /// Ramping toward the goal is evaluated before the soak hold, so the
    /// soak countdown only starts once the goal has been reached and
    /// clamped. Returns the phase transition this tick fired, if any.
    pub fn tick(&mut self) -> Option<PhaseChange> {
        if self.phase.is_quiescent() {
            return None;
        }

        if self.current_temp < self.goal_temp {
            self.current_temp += thermal::HEAT_RATE_C;
            if self.current_temp >= self.goal_temp {
                // Clamp at the goal, then fire the target-reached transition
                self.current_temp = self.goal_temp;
                match self.phase {
                    Phase::Heating => {
                        self.countdown = self.profile.soak_time;
                        return Some(self.transition(Phase::Soaking));
                    }
                    Phase::Reflowing => {
                        self.goal_temp = thermal::AMBIENT_TEMP_C;
                        return Some(self.transition(Phase::Cooling));
                    }
                    _ => {}
                }
            }
        } else if self.phase == Phase::Soaking {
            // Hold the soak temperature with small corrections
            if self.current_temp > self.goal_temp {
                self.current_temp -= thermal::SOAK_NUDGE_C;
            }
            if self.current_temp < self.goal_temp {
                self.current_temp += thermal::SOAK_NUDGE_C;
            }

            self.countdown = self.countdown.saturating_sub(1);
            if self.countdown == 0 {
                self.goal_temp = self.profile.reflow_peak;
                return Some(self.transition(Phase::Reflowing));
            }
        } else if self.phase == Phase::Cooling && self.current_temp > thermal::AMBIENT_TEMP_C {
            self.current_temp -= thermal::COOL_RATE_C;
            if self.current_temp <= thermal::AMBIENT_TEMP_C {
                self.current_temp = thermal::AMBIENT_TEMP_C;
                self.goal_temp = 0.0;
                return Some(self.transition(Phase::Complete));
            }
        }

        None
    }

    /// Begin a new run: replace the profile wholesale and ramp toward soak
    pub fn start(&mut self, profile: ProcessProfile) {
        self.profile = profile;
        self.goal_temp = profile.soak_temp;
        self.phase = Phase::Heating;
        self.countdown = 0;
    }

    /// Abort the run by cooling back to ambient
    ///
    /// No-op when the oven is already quiescent. Returns true when the
    /// stop took effect.
    pub fn stop(&mut self) -> bool {
        if self.phase.is_quiescent() {
            return false;
        }
        self.phase = Phase::Cooling;
        self.goal_temp = thermal::AMBIENT_TEMP_C;
        self.countdown = 0;
        true
    }

    fn transition(&mut self, to: Phase) -> PhaseChange {
        let from = self.phase;
        self.phase = to;
        PhaseChange { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_profile() -> ProcessProfile {
        ProcessProfile {
            soak_temp: 150.0,
            soak_time: 5,
            reflow_peak: 200.0,
            reflow_time: 10,
        }
    }

    #[test]
    fn test_initial_state() {
        let oven = Oven::new();
        assert_eq!(oven.phase, Phase::Idle);
        assert_eq!(oven.current_temp, 25.0);
        assert_eq!(oven.goal_temp, 0.0);
        assert_eq!(oven.countdown, 0);
    }

    #[test]
    fn test_tick_is_noop_when_quiescent() {
        let mut oven = Oven::new();
        assert!(oven.tick().is_none());
        assert_eq!(oven.current_temp, 25.0);

        oven.phase = Phase::Complete;
        assert!(oven.tick().is_none());
        assert_eq!(oven.phase, Phase::Complete);
    }

    #[test]
    fn test_start_loads_profile_and_heats() {
        let mut oven = Oven::new();
        oven.start(test_profile());

        assert_eq!(oven.phase, Phase::Heating);
        assert_eq!(oven.goal_temp, 150.0);
        assert_eq!(oven.countdown, 0);
        assert_eq!(oven.profile, test_profile());
    }

    #[test]
    fn test_heating_ramp_and_clamp() {
        let mut oven = Oven::new();
        oven.start(test_profile());

        // Fixed rate per tick while below the goal
        assert!(oven.tick().is_none());
        assert_eq!(oven.current_temp, 27.5);

        // 49 more ticks reach the soak temperature exactly
        let mut change = None;
        for _ in 0..49 {
            change = oven.tick();
        }
        assert_eq!(oven.current_temp, 150.0);
        assert_eq!(
            change,
            Some(PhaseChange {
                from: Phase::Heating,
                to: Phase::Soaking,
            })
        );
        assert_eq!(oven.countdown, 5);
    }

    #[test]
    fn test_heating_clamps_overshoot() {
        let mut oven = Oven::new();
        oven.start(ProcessProfile {
            soak_temp: 26.0,
            soak_time: 3,
            reflow_peak: 200.0,
            reflow_time: 10,
        });

        // 25.0 + 2.5 would overshoot; the tick clamps and transitions
        let change = oven.tick();
        assert_eq!(oven.current_temp, 26.0);
        assert_eq!(
            change,
            Some(PhaseChange {
                from: Phase::Heating,
                to: Phase::Soaking,
            })
        );
        assert_eq!(oven.countdown, 3);
    }

    #[test]
    fn test_soak_holds_temperature() {
        let mut oven = Oven::new();
        oven.profile = test_profile();
        oven.phase = Phase::Soaking;
        oven.current_temp = 150.0;
        oven.goal_temp = 150.0;
        oven.countdown = 3;

        assert!(oven.tick().is_none());
        assert_eq!(oven.current_temp, 150.0);
        assert_eq!(oven.countdown, 2);
        assert_eq!(oven.phase, Phase::Soaking);
    }

    #[test]
    fn test_soak_countdown_exit() {
        let mut oven = Oven::new();
        oven.profile = test_profile();
        oven.phase = Phase::Soaking;
        oven.current_temp = 150.0;
        oven.goal_temp = 150.0;
        oven.countdown = 1;

        let change = oven.tick();
        assert_eq!(
            change,
            Some(PhaseChange {
                from: Phase::Soaking,
                to: Phase::Reflowing,
            })
        );
        assert_eq!(oven.goal_temp, 200.0);
    }

    #[test]
    fn test_reflow_peak_transitions_to_cooling() {
        let mut oven = Oven::new();
        oven.profile = test_profile();
        oven.phase = Phase::Reflowing;
        oven.current_temp = 197.5;
        oven.goal_temp = 200.0;

        let change = oven.tick();
        assert_eq!(oven.current_temp, 200.0);
        assert_eq!(
            change,
            Some(PhaseChange {
                from: Phase::Reflowing,
                to: Phase::Cooling,
            })
        );
        assert_eq!(oven.goal_temp, 25.0);
    }

    #[test]
    fn test_cooling_ramp_to_complete() {
        let mut oven = Oven::new();
        oven.phase = Phase::Cooling;
        oven.current_temp = 29.0;
        oven.goal_temp = 25.0;

        assert!(oven.tick().is_none());
        assert_eq!(oven.current_temp, 27.0);

        // 27 - 2 = 25 crosses the threshold, clamps, and completes
        let change = oven.tick();
        assert_eq!(oven.current_temp, 25.0);
        assert_eq!(
            change,
            Some(PhaseChange {
                from: Phase::Cooling,
                to: Phase::Complete,
            })
        );
        assert_eq!(oven.goal_temp, 0.0);
    }

    #[test]
    fn test_full_cycle() {
        let mut oven = Oven::new();
        oven.start(test_profile());

        let mut transitions = Vec::new();
        let mut ticks = 0;
        while oven.phase != Phase::Complete {
            ticks += 1;
            assert!(ticks < 1000, "cycle did not complete");
            if let Some(change) = oven.tick() {
                transitions.push(change.to);
            }
        }

        assert_eq!(
            transitions,
            vec![
                Phase::Soaking,
                Phase::Reflowing,
                Phase::Cooling,
                Phase::Complete,
            ]
        );
        // 50 ticks heating, 5 soaking, 20 ramping to peak, 88 cooling
        assert_eq!(ticks, 163);
        assert_eq!(oven.current_temp, 25.0);
        assert_eq!(oven.goal_temp, 0.0);
    }

    #[test]
    fn test_stop_from_active_phases() {
        for phase in [Phase::Heating, Phase::Soaking, Phase::Reflowing] {
            let mut oven = Oven::new();
            oven.start(test_profile());
            oven.phase = phase;
            oven.current_temp = 120.0;
            oven.countdown = 7;

            assert!(oven.stop());
            assert_eq!(oven.phase, Phase::Cooling);
            assert_eq!(oven.goal_temp, 25.0);
            assert_eq!(oven.countdown, 0);
            // The temperature itself is left for the cooling ramp
            assert_eq!(oven.current_temp, 120.0);
        }
    }

    #[test]
    fn test_stop_when_quiescent_is_noop() {
        let mut oven = Oven::new();
        assert!(!oven.stop());
        assert_eq!(oven.phase, Phase::Idle);
        assert_eq!(oven.goal_temp, 0.0);

        oven.phase = Phase::Complete;
        assert!(!oven.stop());
        assert_eq!(oven.phase, Phase::Complete);
    }

    #[test]
    fn test_start_overwrites_previous_profile() {
        let mut oven = Oven::new();
        oven.start(test_profile());
        for _ in 0..60 {
            oven.tick();
        }

        let second = ProcessProfile {
            soak_temp: 165.0,
            soak_time: 90,
            reflow_peak: 235.0,
            reflow_time: 45,
        };
        oven.start(second);

        assert_eq!(oven.profile, second);
        assert_eq!(oven.phase, Phase::Heating);
        assert_eq!(oven.goal_temp, 165.0);
        assert_eq!(oven.countdown, 0);
    }

    #[test]
    fn test_phase_tokens() {
        let phases = [
            Phase::Idle,
            Phase::Heating,
            Phase::Soaking,
            Phase::Reflowing,
            Phase::Cooling,
            Phase::Complete,
        ];
        for phase in phases {
            assert_eq!(Phase::from_token(phase.as_str()), Some(phase));
        }
        assert_eq!(Phase::Idle.as_str(), "IDLE");
        assert_eq!(Phase::from_token("idle"), None);
        assert_eq!(Phase::from_token("BAKING"), None);
    }
}
