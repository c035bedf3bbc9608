//! Control actions a user can issue against a VM.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Power-state action posted to `/api/vm/{vmid}/{action}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VmAction {
    Start,
    Shutdown,
    Reboot,
    Stop,
}

impl VmAction {
    /// Every action, in the order the buttons are laid out.
    pub const ALL: [Self; 4] = [Self::Start, Self::Shutdown, Self::Reboot, Self::Stop];

    /// Path segment used by the backend endpoint.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Shutdown => "shutdown",
            Self::Reboot => "reboot",
            Self::Stop => "stop",
        }
    }

    /// Destructive actions go through a confirmation dialog first.
    #[must_use]
    pub fn is_destructive(self) -> bool {
        !matches!(self, Self::Start)
    }

    /// Whether the action makes sense for a VM in the given running state.
    ///
    /// Only a stopped VM can be started; everything else needs it running.
    #[must_use]
    pub fn is_available(self, running: bool) -> bool {
        match self {
            Self::Start => !running,
            Self::Shutdown | Self::Reboot | Self::Stop => running,
        }
    }

    /// Button caption.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Shutdown => "Shut down",
            Self::Reboot => "Reboot",
            Self::Stop => "Force stop",
        }
    }

    /// Question shown in the confirmation dialog.
    #[must_use]
    pub fn confirm_message(self) -> &'static str {
        match self {
            Self::Start => "Start this VM?",
            Self::Shutdown => "Shut down this VM?",
            Self::Reboot => "Reboot this VM?",
            Self::Stop => "Force stop this VM? This may cause data loss!",
        }
    }
}

impl fmt::Display for VmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VmAction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| ParseError::UnknownAction(s.to_string()))
    }
}

/// Adjustment of a VM's scheduled auto-shutdown, sent as
/// `{"action": "delay" | "reset"}` to `/api/vm/{vmid}/autoshutdown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoShutdownAction {
    /// Push the scheduled shutdown back by six hours.
    Delay,
    /// Recompute the schedule from the VM's current uptime.
    Reset,
}

impl AutoShutdownAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Delay => "delay",
            Self::Reset => "reset",
        }
    }

    /// Button caption.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Delay => "Delay 6 hours",
            Self::Reset => "Reset shutdown time",
        }
    }
}

impl fmt::Display for AutoShutdownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AutoShutdownAction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delay" => Ok(Self::Delay),
            "reset" => Ok(Self::Reset),
            other => Err(ParseError::UnknownAutoShutdownAction(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_treat_only_start_as_non_destructive() {
        assert!(!VmAction::Start.is_destructive());
        assert!(VmAction::Shutdown.is_destructive());
        assert!(VmAction::Reboot.is_destructive());
        assert!(VmAction::Stop.is_destructive());
    }

    #[test]
    fn should_allow_start_only_when_not_running() {
        assert!(VmAction::Start.is_available(false));
        assert!(!VmAction::Start.is_available(true));
    }

    #[test]
    fn should_allow_power_off_actions_only_when_running() {
        for action in [VmAction::Shutdown, VmAction::Reboot, VmAction::Stop] {
            assert!(action.is_available(true), "{action} should be available");
            assert!(!action.is_available(false), "{action} should be unavailable");
        }
    }

    #[test]
    fn should_parse_every_action_from_its_path_segment() {
        for action in VmAction::ALL {
            assert_eq!(action.as_str().parse::<VmAction>(), Ok(action));
        }
    }

    #[test]
    fn should_reject_unknown_action() {
        assert_eq!(
            "destroy".parse::<VmAction>(),
            Err(ParseError::UnknownAction("destroy".to_string()))
        );
    }

    #[test]
    fn should_serialize_auto_shutdown_action_lowercase() {
        let json = serde_json::to_string(&AutoShutdownAction::Delay).unwrap();
        assert_eq!(json, "\"delay\"");
        assert_eq!("reset".parse(), Ok(AutoShutdownAction::Reset));
        assert!("later".parse::<AutoShutdownAction>().is_err());
    }
}
