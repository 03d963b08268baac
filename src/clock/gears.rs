//! Gear rotation: which clocks a turning gear drags along, and by how much.

use super::tables::{CLOCK_COUNT, COUPLINGS, FACE_CLOCKS, HOURS, PIN_COUNT};

/// Signed hour change for every clock.
pub type ClockDelta = [i32; CLOCK_COUNT];

/// Clocks engaged with `gear` under the given pin configuration.
pub fn coupled(gear: usize, pins: &[bool; PIN_COUNT]) -> [bool; CLOCK_COUNT] {
    let mut engaged = [false; CLOCK_COUNT];
    for (clock, coupling) in COUPLINGS[gear].iter().enumerate() {
        engaged[clock] = coupling.engaged(gear, pins);
    }
    engaged
}

/// Compute the clock delta for turning `gear` by `amount` hours.
///
/// `amount` is clockwise as seen from the front. Back clocks are driven from
/// the other side of the differential, so they move by `-amount`.
pub fn rotate(gear: usize, amount: i32, pins: &[bool; PIN_COUNT]) -> ClockDelta {
    let engaged = coupled(gear, pins);
    let mut delta = [0; CLOCK_COUNT];
    for clock in 0..CLOCK_COUNT {
        if engaged[clock] {
            delta[clock] = if clock < FACE_CLOCKS { amount } else { -amount };
        }
    }
    delta
}

/// Reduce an hour value into `0..12`, also for negative inputs.
#[inline]
pub fn wrap_hour(value: i32) -> u8 {
    value.rem_euclid(HOURS) as u8
}

/// Apply a delta to the clock faces in place.
pub fn apply_delta(clocks: &mut [u8; CLOCK_COUNT], delta: &ClockDelta) {
    for (hour, &d) in clocks.iter_mut().zip(delta.iter()) {
        *hour = wrap_hour(*hour as i32 + d);
    }
}
