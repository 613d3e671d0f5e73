//! Rotary encoder handler
//!
//! Decodes quadrature encoder signals into signed detent counts.
//! Uses a state machine for reliable decoding with noise rejection.

use embassy_rp::gpio::Input;
use embassy_time::{Duration, Timer};

/// Encoder state machine states
#[derive(Clone, Copy, PartialEq)]
enum State {
    Idle,
    CwStep1,
    CwStep2,
    CcwStep1,
    CcwStep2,
}

/// Quadrature encoder handler
pub struct Encoder<'d> {
    a: Input<'d>,
    b: Input<'d>,
    state: State,
    last_a: bool,
    last_b: bool,
}

impl<'d> Encoder<'d> {
    pub fn new(a: Input<'d>, b: Input<'d>) -> Self {
        let last_a = a.is_high();
        let last_b = b.is_high();

        Self {
            a,
            b,
            state: State::Idle,
            last_a,
            last_b,
        }
    }

    /// Poll for rotation
    ///
    /// Returns a signed detent count (+1 clockwise, -1 counter-clockwise)
    /// when a full step completes. Should be called every few ms.
    pub async fn poll(&mut self) -> Option<i8> {
        // Small delay between polls
        Timer::after(Duration::from_millis(2)).await;

        let a = self.a.is_high();
        let b = self.b.is_high();

        // No change
        if a == self.last_a && b == self.last_b {
            return None;
        }

        let delta = self.decode(a, b);

        self.last_a = a;
        self.last_b = b;

        delta
    }

    /// Decode encoder state using the step state machine
    ///
    /// Quadrature encoding:
    /// CW:  A leads B (A changes first when rotating clockwise)
    /// CCW: B leads A (B changes first when rotating counter-clockwise)
    fn decode(&mut self, a: bool, b: bool) -> Option<i8> {
        match self.state {
            State::Idle => {
                if !a && b {
                    // A fell first -> CW direction
                    self.state = State::CwStep1;
                } else if a && !b {
                    // B fell first -> CCW direction
                    self.state = State::CcwStep1;
                }
                None
            }
            State::CwStep1 => {
                if !a && !b {
                    self.state = State::CwStep2;
                } else if a && b {
                    // Back to idle (noise/bounce)
                    self.state = State::Idle;
                }
                None
            }
            State::CwStep2 => {
                if a || b {
                    // Either went high -> complete CW step
                    self.state = State::Idle;
                    return Some(1);
                }
                None
            }
            State::CcwStep1 => {
                if !a && !b {
                    self.state = State::CcwStep2;
                } else if a && b {
                    self.state = State::Idle;
                }
                None
            }
            State::CcwStep2 => {
                if a || b {
                    // Either went high -> complete CCW step
                    self.state = State::Idle;
                    return Some(-1);
                }
                None
            }
        }
    }
}
