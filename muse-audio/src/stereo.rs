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

//! Putting the two channels of a tune together into interleaved stereo frames.

use log::debug;
use snafu::{ensure, Snafu};

use crate::wave::SampleBuffer;

/// Default for the largest length difference between channels that is fixed up
/// by truncating the longer channel.
pub const DEFAULT_TOLERANCE: usize = 1500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StereoConfig {
    /// Length differences (in samples) strictly below this are truncated away.
    pub tolerance: usize,
    /// Upper bound on the number of samples per channel, if any.
    pub max_length: Option<usize>,
}

impl StereoConfig {
    /// Check channel lengths before their samples are produced.
    ///
    /// Only lengths above `max_length + tolerance` are rejected here, since shorter
    /// ones may still be brought within the limit by truncation.
    pub fn check_planned(&self, channel1: usize, channel2: usize) -> Result<(), StereoError> {
        if let Some(max_length) = self.max_length {
            let length = channel1.max(channel2);
            ensure!(
                length <= max_length.saturating_add(self.tolerance),
                TooLong { length, max_length }
            );
        }
        Ok(())
    }
}

impl Default for StereoConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_length: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum StereoError {
    #[snafu(display("tune too long: {} samples per channel, at most {} allowed", length, max_length))]
    TooLong { length: usize, max_length: usize },
    #[snafu(display("channel lengths differ: {} and {} samples", left, right))]
    LengthMismatch { left: usize, right: usize },
}

/// Interleave two channels into stereo frames `[l0, r0, l1, r1, ...]`.
///
/// An empty second channel is replaced by the first one. If one channel is
/// longer than the other by less than the configured tolerance, its excess
/// samples are dropped.
///
/// # Examples
///
/// ```
/// use muse_audio::stereo::*;
///
/// let frames = assemble_stereo(&[1, 2, 3], &[-1, -2, -3], &StereoConfig::default()).unwrap();
/// assert_eq!(frames, vec![1, -1, 2, -2, 3, -3]);
///
/// let mono = assemble_stereo(&[1, 2], &[], &StereoConfig::default()).unwrap();
/// assert_eq!(mono, vec![1, 1, 2, 2]);
/// ```
pub fn assemble_stereo(
    channel1: &[i32],
    channel2: &[i32],
    config: &StereoConfig,
) -> Result<SampleBuffer, StereoError> {
    let channel2 = if channel2.is_empty() {
        channel1
    } else {
        channel2
    };
    let channel1 = truncate_excess(channel1, channel2.len(), config.tolerance, "C1");
    let channel2 = truncate_excess(channel2, channel1.len(), config.tolerance, "C2");

    if let Some(max_length) = config.max_length {
        ensure!(
            channel1.len() <= max_length,
            TooLong {
                length: channel1.len(),
                max_length
            }
        );
    }
    ensure!(
        channel1.len() == channel2.len(),
        LengthMismatch {
            left: channel1.len(),
            right: channel2.len()
        }
    );

    let mut frames = Vec::with_capacity(2 * channel1.len());
    for (left, right) in channel1.iter().zip(channel2.iter()) {
        frames.push(*left);
        frames.push(*right);
    }
    Ok(frames)
}

/// Cut `channel` down to `other_len` if it exceeds it by less than `tolerance`.
fn truncate_excess<'a>(channel: &'a [i32], other_len: usize, tolerance: usize, name: &str) -> &'a [i32] {
    let excess = channel.len().saturating_sub(other_len);
    if excess > 0 && excess < tolerance {
        debug!("dropping {} trailing samples of {}", excess, name);
        &channel[..other_len]
    } else {
        channel
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ramp(len: usize) -> Vec<i32> {
        (0..len as i32).collect()
    }

    #[test]
    fn interleaves_equal_lengths() {
        let left = ramp(100);
        let right: Vec<i32> = left.iter().map(|x| -x - 1).collect();
        let frames = assemble_stereo(&left, &right, &StereoConfig::default()).unwrap();
        assert_eq!(frames.len(), 200);
        for (i, frame) in frames.chunks(2).enumerate() {
            assert_eq!(frame, &[left[i], right[i]]);
        }
    }

    #[test]
    fn small_difference_truncates_left() {
        let frames = assemble_stereo(&ramp(5000), &ramp(4000), &StereoConfig::default()).unwrap();
        assert_eq!(frames.len(), 8000);
        assert_eq!(frames[frames.len() - 2], 3999);
    }

    #[test]
    fn small_difference_truncates_right() {
        let frames = assemble_stereo(&ramp(4000), &ramp(5000), &StereoConfig::default()).unwrap();
        assert_eq!(frames.len(), 8000);
        assert_eq!(frames[frames.len() - 1], 3999);
    }

    #[test]
    fn large_difference_fails() {
        assert_eq!(
            assemble_stereo(&ramp(6000), &ramp(4000), &StereoConfig::default()),
            Err(StereoError::LengthMismatch {
                left: 6000,
                right: 4000
            })
        );
        assert_eq!(
            assemble_stereo(&ramp(4000), &ramp(6000), &StereoConfig::default()),
            Err(StereoError::LengthMismatch {
                left: 4000,
                right: 6000
            })
        );
    }

    #[test]
    fn tolerance_is_exclusive() {
        let config = StereoConfig {
            tolerance: 10,
            max_length: None,
        };
        assert!(assemble_stereo(&ramp(19), &ramp(10), &config).is_ok());
        assert!(assemble_stereo(&ramp(20), &ramp(10), &config).is_err());
    }

    #[test]
    fn mono_promotion() {
        let frames = assemble_stereo(&ramp(3), &[], &StereoConfig::default()).unwrap();
        assert_eq!(frames, vec![0, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn empty_tune() {
        assert_eq!(assemble_stereo(&[], &[], &StereoConfig::default()), Ok(vec![]));
    }

    #[test]
    fn size_guard() {
        let config = StereoConfig {
            tolerance: DEFAULT_TOLERANCE,
            max_length: Some(100),
        };
        assert!(assemble_stereo(&ramp(100), &ramp(100), &config).is_ok());
        assert_eq!(
            assemble_stereo(&ramp(101), &ramp(101), &config),
            Err(StereoError::TooLong {
                length: 101,
                max_length: 100
            })
        );
    }

    #[test]
    fn size_guard_checked_before_mismatch() {
        let config = StereoConfig {
            tolerance: 10,
            max_length: Some(100),
        };
        assert!(matches!(
            assemble_stereo(&ramp(500), &ramp(50), &config),
            Err(StereoError::TooLong { .. })
        ));
    }

    #[test]
    fn planned_lengths_leave_room_for_truncation() {
        let config = StereoConfig {
            tolerance: 10,
            max_length: Some(100),
        };
        assert_eq!(config.check_planned(109, 100), Ok(()));
        assert_eq!(config.check_planned(110, 0), Ok(()));
        assert_eq!(
            config.check_planned(100, 111),
            Err(StereoError::TooLong {
                length: 111,
                max_length: 100
            })
        );
        assert_eq!(
            config.check_planned(usize::MAX, 0),
            Err(StereoError::TooLong {
                length: usize::MAX,
                max_length: 100
            })
        );
        assert_eq!(StereoConfig::default().check_planned(usize::MAX, usize::MAX), Ok(()));
    }
}
