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

//! Envelopes shape the loudness of a note over its duration.

use std::f64::consts::PI;
use std::fmt;

/// The amplitude contour applied to every sample of a note.
///
/// Each envelope is a pure function of the time elapsed since the note started
/// and the total duration of the note.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Envelope {
    /// Constant full volume.
    Flat,
    /// Quarter sine from silence to full volume.
    Rise,
    /// Quarter cosine from full volume to silence.
    Drop,
    /// Half sine, swelling and fading.
    Round,
    /// Linear swell and fade.
    Triangle,
    /// Quick swell with a long tail.
    Tadpole,
    /// Flat top with rounded edges, built from odd harmonics.
    Combi,
    /// Smoothed triangle, built from odd harmonics.
    Diamond,
}

impl Envelope {
    pub const ALL: [Envelope; 8] = [
        Envelope::Flat,
        Envelope::Rise,
        Envelope::Drop,
        Envelope::Round,
        Envelope::Triangle,
        Envelope::Tadpole,
        Envelope::Combi,
        Envelope::Diamond,
    ];

    /// Gain at `elapsed` seconds into a note lasting `duration` seconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use muse_audio::envelope::Envelope;
    ///
    /// assert_eq!(Envelope::Flat.eval(0.3, 1.0), 1.0);
    /// assert_eq!(Envelope::Rise.eval(0.0, 1.0), 0.0);
    /// assert_eq!(Envelope::Drop.eval(0.0, 1.0), 1.0);
    /// assert_eq!(Envelope::Triangle.eval(0.5, 1.0), 1.0);
    /// ```
    pub fn eval(self, elapsed: f64, duration: f64) -> f64 {
        let progress = elapsed / duration;
        match self {
            Envelope::Flat => 1.0,
            //   . --
            //  /
            // /
            Envelope::Rise => (PI * progress / 2.0).sin(),
            // -- .
            //     \
            //      \
            Envelope::Drop => (PI * progress / 2.0).cos(),
            //   . -- .
            //  /      \
            // /        \
            Envelope::Round => (PI * progress).sin(),
            //    /\
            //   /  \
            //  /    \
            Envelope::Triangle => 1.0 - (2.0 * progress - 1.0).abs(),
            // peaks at a third of the note, at roughly 1.3 before scaling
            Envelope::Tadpole => {
                ((PI * progress).sin() + 0.5 * (2.0 * PI * progress).sin()) / 1.3
            }
            Envelope::Combi => {
                4.0 / PI
                    * ((PI * progress).sin()
                        + (3.0 * PI * progress).sin() / 3.0
                        + (5.0 * PI * progress).sin() / 5.0)
            }
            Envelope::Diamond => {
                8.0 / (PI * PI)
                    * ((PI * progress).sin() - (3.0 * PI * progress).sin() / 9.0
                        + (5.0 * PI * progress).sin() / 25.0)
            }
        }
    }

    /// The name used in score files.
    pub fn name(self) -> &'static str {
        match self {
            Envelope::Flat => "flat",
            Envelope::Rise => "rise",
            Envelope::Drop => "drop",
            Envelope::Round => "round",
            Envelope::Triangle => "triangle",
            Envelope::Tadpole => "tadpole",
            Envelope::Combi => "combi",
            Envelope::Diamond => "diamond",
        }
    }

    /// Look up a name as written in score files. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Envelope> {
        Envelope::ALL.iter().copied().find(|env| env.name() == name)
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const EPS: f64 = 1e-9;

    fn samples(env: Envelope) -> Vec<f64> {
        (0..=100).map(|i| env.eval(i as f64 / 100.0, 1.0)).collect()
    }

    #[test]
    fn names_round_trip() {
        for &env in Envelope::ALL.iter() {
            assert_eq!(Envelope::from_name(env.name()), Some(env));
            assert_eq!(env.to_string(), env.name());
        }
        assert_eq!(Envelope::from_name("curve"), None);
        assert_eq!(Envelope::from_name("Flat"), None);
    }

    #[test]
    fn rise_and_drop_are_monotonic() {
        let rise = samples(Envelope::Rise);
        let drop = samples(Envelope::Drop);
        assert!(rise.windows(2).all(|w| w[0] <= w[1]));
        assert!(drop.windows(2).all(|w| w[0] >= w[1]));
        assert!((rise[100] - 1.0).abs() < EPS);
        assert!(drop[100].abs() < EPS);
    }

    #[test]
    fn symmetric_shapes() {
        for &env in [Envelope::Round, Envelope::Triangle, Envelope::Combi, Envelope::Diamond].iter() {
            let s = samples(env);
            for i in 0..=50 {
                assert!((s[i] - s[100 - i]).abs() < EPS, "{} at {}", env, i);
            }
            assert!(s[0].abs() < EPS, "{}", env);
        }
    }

    #[test]
    fn tadpole_peaks_early() {
        let s = samples(Envelope::Tadpole);
        let peak = s
            .iter()
            .enumerate()
            .fold(0, |best, (i, v)| if *v > s[best] { i } else { best });
        assert!(peak > 25 && peak < 40, "peak at {}", peak);
        assert!(s[peak] <= 1.0);
    }

    #[test]
    fn depends_on_relative_time_only() {
        for &env in Envelope::ALL.iter() {
            assert!((env.eval(0.25, 1.0) - env.eval(0.5, 2.0)).abs() < EPS, "{}", env);
        }
    }
}
