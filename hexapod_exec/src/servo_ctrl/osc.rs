//! [`ServoDriver`] implementation for OSC servo boards

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{net::OscSocket, osc::OscMessage};

use super::{ServoDriver, ServoError};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

const MAX_DUTY_PERCENT: f32 = 100.0;

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ServoDriver for OscSocket {
    fn set_duty_cycle(&mut self, channel: u8, duty_percent: f32) -> Result<(), ServoError> {
        // If the duty cycle is out of range return an error
        if !(0.0..=MAX_DUTY_PERCENT).contains(&duty_percent) {
            return Err(ServoError::InvalidDutyCycle(duty_percent));
        }

        self.send(&OscMessage::pwm_duty(channel, duty_percent))?;

        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
