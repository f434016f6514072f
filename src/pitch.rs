//! MIDI note number / frequency conversion in twelve-tone equal temperament.
//!
//! Reference pitch is A4 = 440 Hz = MIDI note 69. Fractional note numbers
//! are allowed in both directions (cents are hundredths of a note).

/// Frequency of the reference pitch A4, in Hertz.
pub const A4_HZ: f64 = 440.0;

/// MIDI note number of A4.
pub const A4_MIDI: f64 = 69.0;

/// Notes per octave.
pub const NOTES_PER_OCTAVE: f64 = 12.0;

/// Convert a (possibly fractional) MIDI note number to a frequency in Hz.
pub fn midi_to_hz(note: f64) -> f64 {
    A4_HZ * 2f64.powf((note - A4_MIDI) / NOTES_PER_OCTAVE)
}

/// Convert a frequency in Hz to a (possibly fractional) MIDI note number.
///
/// Follows IEEE semantics for non-positive input: 0 Hz maps to negative
/// infinity, negative frequencies to NaN.
pub fn hz_to_midi(hz: f64) -> f64 {
    A4_MIDI + NOTES_PER_OCTAVE * (hz / A4_HZ).log2()
}

/// Element-wise [`midi_to_hz`].
pub fn midi_to_hz_slice(notes: &[f64]) -> Vec<f64> {
    notes.iter().copied().map(midi_to_hz).collect()
}

/// Element-wise [`hz_to_midi`].
pub fn hz_to_midi_slice(freqs: &[f64]) -> Vec<f64> {
    freqs.iter().copied().map(hz_to_midi).collect()
}
