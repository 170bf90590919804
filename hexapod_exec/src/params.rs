//! # Hexapod Executable Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::net::SocketOptions;
use serde::Deserialize;
use std::time::Duration;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Deserialize, Debug)]
pub struct HexapodExecParams {
    /// Endpoint of the OSC servo board, for example `"169.254.1.1:9000"`
    pub servo_board_endpoint: String,

    /// Options for the socket used to reach the servo board
    #[serde(default)]
    pub socket: SocketOptions,

    /// Time allowed for the servos to reach their positions at the end of each gait phase.
    ///
    /// Units: milliseconds
    pub settle_period_ms: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl HexapodExecParams {
    pub fn settle_period(&self) -> Duration {
        Duration::from_millis(self.settle_period_ms)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_shipped_params_parse() -> Result<(), util::params::LoadError> {
        let params: HexapodExecParams =
            util::params::from_str(include_str!("../../params/hexapod_exec.toml"))?;

        assert_eq!(params.servo_board_endpoint, "169.254.1.1:9000");
        assert_eq!(params.settle_period(), Duration::from_millis(100));
        assert_eq!(params.socket.bind_addr, "0.0.0.0:0");

        Ok(())
    }

    #[test]
    fn test_socket_defaults() -> Result<(), util::params::LoadError> {
        let params: HexapodExecParams = util::params::from_str(
            "servo_board_endpoint = \"127.0.0.1:9000\"\nsettle_period_ms = 20\n",
        )?;

        assert_eq!(params.socket.bind_addr, "0.0.0.0:0");
        assert_eq!(params.socket.send_timeout_ms, 0);

        Ok(())
    }
}
