//! Test doubles for the hardware facing traits.
//!
//! The doubles share one [`EventLog`] so tests can check the order in which commands and settling
//! periods happened.

use std::{cell::RefCell, collections::VecDeque, io, rc::Rc, time::Duration};

use comms_if::net::NetError;

use crate::{
    cmd_loop::{Intent, IntentError, IntentSource},
    gait::Settle,
    servo_ctrl::{ServoDriver, ServoError},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Duty(u8, f32),
    Settle(Duration),
}

#[derive(Debug, Default, Clone)]
pub struct EventLog(Rc<RefCell<Vec<Event>>>);

impl EventLog {
    pub fn push(&self, e: Event) {
        self.0.borrow_mut().push(e);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }
}

/// Records every duty cycle demand, optionally failing once a number of sends have succeeded.
pub struct MockDriver {
    log: EventLog,

    fail_after: Option<usize>,

    sent: usize,
}

impl MockDriver {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            fail_after: None,
            sent: 0,
        }
    }

    pub fn failing_after(log: &EventLog, sends: usize) -> Self {
        Self {
            fail_after: Some(sends),
            ..Self::new(log)
        }
    }
}

impl ServoDriver for MockDriver {
    fn set_duty_cycle(&mut self, channel: u8, duty_percent: f32) -> Result<(), ServoError> {
        if Some(self.sent) == self.fail_after {
            return Err(NetError::SendError(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "mock send failure",
            ))
            .into());
        }

        self.sent += 1;
        self.log.push(Event::Duty(channel, duty_percent));

        Ok(())
    }
}

pub struct MockSettle {
    log: EventLog,
}

impl MockSettle {
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }
}

impl Settle for MockSettle {
    fn settle(&mut self, period: Duration) {
        self.log.push(Event::Settle(period));
    }
}

/// Plays back a fixed list of intents, then fails as if the input closed.
pub struct MockIntents {
    intents: VecDeque<Intent>,
}

impl MockIntents {
    pub fn new(intents: &[Intent]) -> Self {
        Self {
            intents: intents.iter().copied().collect(),
        }
    }
}

impl IntentSource for MockIntents {
    fn next_intent(&mut self) -> Result<Intent, IntentError> {
        self.intents.pop_front().ok_or_else(|| {
            IntentError::Io(io::Error::new(io::ErrorKind::UnexpectedEof, "no more intents"))
        })
    }
}
