//! Binary command frames for the lamp firmware.
//!
//! Every command is exactly [`FRAME_LEN`] bytes so the firmware can keep one
//! fixed-size read buffer and branch on a marker byte instead of parsing
//! variable-length messages.

use crate::state::{LedArray, TimerMinutes, NUM_LEDS};

/// Fixed size of every command frame: 4 bytes per LED.
pub const FRAME_LEN: usize = NUM_LEDS * 4;

/// Marker byte distinguishing a timer frame from an LED-state frame.
///
/// The firmware tells the two apart by byte 0 alone, so an LED-state frame
/// whose first LED has a red channel of exactly 0xF0 (240) is
/// indistinguishable from a timer command on the wire. This is a known
/// ambiguity in the wire format, left as-is for firmware compatibility.
pub const TIMER_MARKER: u8 = 0xF0;

/// Encode the strip colors plus the global brightness.
///
/// Each LED contributes 4 bytes in order: red, green, blue, then a brightness
/// slot. The firmware reads a single global brightness multiplexed into LED
/// 0's brightness slot; the slot is zero for every other LED.
pub fn encode_led_frame(leds: &LedArray, brightness: u8) -> [u8; FRAME_LEN] {
    let mut frame = [0u8; FRAME_LEN];
    for (i, led) in leds.iter().enumerate() {
        frame[4 * i] = led.r;
        frame[4 * i + 1] = led.g;
        frame[4 * i + 2] = led.b;
        frame[4 * i + 3] = if i == 0 { brightness } else { 0 };
    }
    frame
}

/// Encode the full-shutdown command: an all-zero frame.
pub fn encode_off_frame() -> [u8; FRAME_LEN] {
    [0u8; FRAME_LEN]
}

/// Encode a timer command: [`TIMER_MARKER`], the duration split big-endian
/// across bytes 1-2, then zero padding up to the shared frame size.
pub fn encode_timer_frame(minutes: TimerMinutes) -> [u8; FRAME_LEN] {
    let mut frame = [0u8; FRAME_LEN];
    let minutes = minutes.get();
    frame[0] = TIMER_MARKER;
    frame[1] = (minutes >> 8) as u8;
    frame[2] = (minutes & 0xFF) as u8;
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Rgb;

    fn distinct_strip() -> LedArray {
        let mut leds = [Rgb::default(); NUM_LEDS];
        for (i, slot) in leds.iter_mut().enumerate() {
            let i = i as u8;
            *slot = Rgb::new(i * 3, i * 5 + 1, i * 7 + 2);
        }
        leds
    }

    #[test]
    fn test_led_frame_layout() {
        let leds = distinct_strip();
        let frame = encode_led_frame(&leds, 200);

        assert_eq!(frame.len(), FRAME_LEN);
        for (i, led) in leds.iter().enumerate() {
            assert_eq!(frame[4 * i], led.r);
            assert_eq!(frame[4 * i + 1], led.g);
            assert_eq!(frame[4 * i + 2], led.b);
            // Brightness rides on LED 0's fourth byte only.
            assert_eq!(frame[4 * i + 3], if i == 0 { 200 } else { 0 });
        }
    }

    #[test]
    fn test_led_frame_round_trips_colors() {
        // Decoding the channel triples back out must reproduce the colors
        // exactly; the fourth byte is not part of color identity.
        let leds = distinct_strip();
        let frame = encode_led_frame(&leds, 17);

        let decoded: Vec<Rgb> = frame
            .chunks_exact(4)
            .map(|quad| Rgb::new(quad[0], quad[1], quad[2]))
            .collect();
        assert_eq!(decoded, leds);
    }

    #[test]
    fn test_off_frame_all_zero() {
        assert_eq!(encode_off_frame(), [0u8; FRAME_LEN]);
    }

    #[test]
    fn test_timer_frame_bytes() {
        let frame = encode_timer_frame(TimerMinutes::new(45).unwrap());
        assert_eq!(frame[0], TIMER_MARKER);
        assert_eq!(frame[1], 0x00);
        assert_eq!(frame[2], 0x2D);
        assert!(frame[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_timer_frame_sixteen_bit_split() {
        for minutes in [1u16, 90, 180] {
            let frame = encode_timer_frame(TimerMinutes::new(minutes).unwrap());
            assert_eq!(((frame[1] as u16) << 8) | frame[2] as u16, minutes);
        }
    }
}
