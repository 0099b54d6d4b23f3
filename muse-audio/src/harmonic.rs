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

//! Harmonics define the timbre of a note by stacking overtones on the fundamental.

use std::f64::consts::PI;
use std::fmt;

/// A waveform built from weighted sine partials.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Harmonic {
    /// The pure fundamental.
    First,
    /// Fundamental plus the second harmonic.
    Second,
    /// Fundamental plus the second and third harmonics.
    Third,
    /// A plucked-string timbre with a sub-octave and decaying overtones.
    Stringed,
}

/// Relative frequency and weight of every partial.
type Partials = &'static [(f64, f64)];

impl Harmonic {
    pub const ALL: [Harmonic; 4] = [
        Harmonic::First,
        Harmonic::Second,
        Harmonic::Third,
        Harmonic::Stringed,
    ];

    fn partials(self) -> Partials {
        match self {
            Harmonic::First => &[(1.0, 1.0)],
            Harmonic::Second => &[(1.0, 1.0), (2.0, 1.0)],
            Harmonic::Third => &[(1.0, 1.0), (2.0, 1.0), (3.0, 1.0)],
            Harmonic::Stringed => &[
                (1.0, 3.0),
                (0.5, 0.5),
                (2.0, 1.5),
                (3.0, 0.25),
                (4.0, 0.125),
            ],
        }
    }

    /// Amplitude of the waveform at `phase`, measured in periods of the fundamental,
    /// i.e. `frequency * elapsed_seconds`.
    ///
    /// # Examples
    ///
    /// ```
    /// use muse_audio::harmonic::Harmonic;
    ///
    /// assert_eq!(Harmonic::First.eval(0.0), 0.0);
    /// assert!((Harmonic::First.eval(0.25) - 1.0).abs() < 1e-12);
    /// ```
    pub fn eval(self, phase: f64) -> f64 {
        let base = 2.0 * PI * phase;
        self.partials()
            .iter()
            .map(|&(multiple, weight)| weight * (base * multiple).sin())
            .sum()
    }

    /// The name used in score files.
    pub fn name(self) -> &'static str {
        match self {
            Harmonic::First => "first",
            Harmonic::Second => "second",
            Harmonic::Third => "third",
            Harmonic::Stringed => "stringed",
        }
    }

    /// Look up a name as written in score files. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Harmonic> {
        Harmonic::ALL.iter().copied().find(|har| har.name() == name)
    }
}

impl fmt::Display for Harmonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn names_round_trip() {
        for &har in Harmonic::ALL.iter() {
            assert_eq!(Harmonic::from_name(har.name()), Some(har));
            assert_eq!(har.to_string(), har.name());
        }
        assert_eq!(Harmonic::from_name("fourth"), None);
        assert_eq!(Harmonic::from_name("First"), None);
    }

    #[test]
    fn stacks_add_up() {
        for i in 0..50 {
            let x = i as f64 / 37.0;
            let one = (2.0 * PI * x).sin();
            let two = (4.0 * PI * x).sin();
            let three = (6.0 * PI * x).sin();
            assert!((Harmonic::First.eval(x) - one).abs() < 1e-9);
            assert!((Harmonic::Second.eval(x) - (one + two)).abs() < 1e-9);
            assert!((Harmonic::Third.eval(x) - (one + two + three)).abs() < 1e-9);
        }
    }

    #[test]
    fn silent_at_phase_zero() {
        for &har in Harmonic::ALL.iter() {
            assert_eq!(har.eval(0.0), 0.0, "{}", har);
        }
    }

    #[test]
    fn periodic_in_fundamental() {
        // The stringed sub-octave makes it periodic over two periods only.
        for &har in Harmonic::ALL.iter() {
            assert!((har.eval(0.1) - har.eval(2.1)).abs() < 1e-9, "{}", har);
        }
    }
}
