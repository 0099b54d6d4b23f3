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

//! This is the namespace for all parts dealing with data in sampled waves.

/// Number of samples per second of every buffer produced by the encoder.
pub const SAMPLE_RATE: u32 = 44100;

/// Signed samples of a single channel, or of interleaved stereo frames.
///
/// Values stay within the 16-bit range for sensible volumes; chords may exceed
/// it, which is left to the output stage to clamp.
pub type SampleBuffer = Vec<i32>;

/// Number of whole samples that fit into `duration` seconds.
/// A partial sample at the end is dropped.
///
/// # Examples
///
/// ```
/// use muse_audio::wave::*;
///
/// assert_eq!(sample_count(1.0, SAMPLE_RATE), 44100);
/// assert_eq!(sample_count(0.5, SAMPLE_RATE), 22050);
/// assert_eq!(sample_count(1.5 / 44100.0, SAMPLE_RATE), 1);
/// assert_eq!(sample_count(-1.0, SAMPLE_RATE), 0);
/// ```
pub fn sample_count(duration: f64, sample_rate: u32) -> usize {
    (duration * sample_rate as f64).floor() as usize
}

/// Time in seconds of the sample at `index`.
pub fn sample_time(index: usize, sample_rate: u32) -> f64 {
    index as f64 / sample_rate as f64
}
