// muse -- a text notation to wave encoder
// Copyright (C) 2021  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use crate::util;

/// Defines the tuning by assigning a frequency to a reference pitch.
/// All other pitches follow at 12 equal-tempered semitones per octave.
///
/// # Examples
///
/// ```
/// use muse_audio::tuning::*;
/// assert_eq!(Tuning::default().frequency(0), 440.0);
/// assert_eq!(Tuning::default().frequency(12), 880.0);
/// assert_eq!(Tuning::default().frequency(-12), 220.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Semitone offset of the reference pitch.
    pub reference_pitch: i32,
    pub reference_frequency: f64,
}

impl Tuning {
    /// Return the frequency of a pitch, given as semitone offset, relative to this tuning.
    pub fn frequency(&self, pitch: i32) -> f64 {
        let semitones = pitch - self.reference_pitch;
        self.reference_frequency * util::from_semitones(semitones as f64)
    }
}

/// Default concert tuning, where A4 corresponds to 440 Hz.
impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            reference_pitch: 0,
            reference_frequency: 440.0,
        }
    }
}

/// Frequency of a pitch in concert tuning.
pub fn frequency(pitch: i32) -> f64 {
    Tuning::default().frequency(pitch)
}
