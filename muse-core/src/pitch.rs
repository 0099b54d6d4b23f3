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

//! Names of the pitches that can be written down in a score.

use std::collections::HashMap;

/// Lowest octave that has names in the pitch table.
pub const LOWEST_OCTAVE: i32 = 1;
/// Highest octave that has names in the pitch table.
pub const HIGHEST_OCTAVE: i32 = 7;

/// The letter of a pitch in standard notation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PitchName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl PitchName {
    /// All letters in the order they appear within an octave.
    pub const ALL: [PitchName; 7] = [
        PitchName::C,
        PitchName::D,
        PitchName::E,
        PitchName::F,
        PitchName::G,
        PitchName::A,
        PitchName::B,
    ];

    /// Semitones between this letter and the A of the same octave.
    pub fn offset_from_a(self) -> i32 {
        match self {
            PitchName::C => -9,
            PitchName::D => -7,
            PitchName::E => -5,
            PitchName::F => -4,
            PitchName::G => -2,
            PitchName::A => 0,
            PitchName::B => 2,
        }
    }

    /// The lowercase letter used in note tokens.
    pub fn letter(self) -> char {
        match self {
            PitchName::C => 'c',
            PitchName::D => 'd',
            PitchName::E => 'e',
            PitchName::F => 'f',
            PitchName::G => 'g',
            PitchName::A => 'a',
            PitchName::B => 'b',
        }
    }

    /// The inverse of [`PitchName::letter`]. Only lowercase letters are recognized.
    pub fn from_letter(letter: char) -> Option<PitchName> {
        PitchName::ALL
            .iter()
            .copied()
            .find(|name| name.letter() == letter)
    }
}

/// Semitone offset of a named pitch relative to A4.
///
/// # Examples
///
/// ```
/// use muse_core::pitch::*;
///
/// assert_eq!(semitones(PitchName::A, 4), 0);
/// assert_eq!(semitones(PitchName::C, 4), -9);
/// assert_eq!(semitones(PitchName::A, 5), 12);
/// assert_eq!(semitones(PitchName::B, 1), -34);
/// ```
pub fn semitones(name: PitchName, octave: i32) -> i32 {
    name.offset_from_a() + 12 * (octave - 4)
}

/// Maps names like `c4` to their semitone offset from A4.
///
/// The table is filled once on construction and only read afterwards,
/// so a single instance can be shared by everything parsing notes.
#[derive(Debug, Clone)]
pub struct PitchTable {
    pitches: HashMap<String, i32>,
}

impl PitchTable {
    pub fn new() -> Self {
        let mut pitches = HashMap::new();
        for octave in LOWEST_OCTAVE..=HIGHEST_OCTAVE {
            for &name in PitchName::ALL.iter() {
                pitches.insert(
                    format!("{}{}", name.letter(), octave),
                    semitones(name, octave),
                );
            }
        }
        Self { pitches }
    }

    /// Look up a pitch by its two-character name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use muse_core::pitch::*;
    /// let table = PitchTable::new();
    /// assert_eq!(table.get("a4"), Some(0));
    /// assert_eq!(table.get("c1"), Some(-45));
    /// assert_eq!(table.get("b7"), Some(38));
    /// assert_eq!(table.get("h4"), None);
    /// assert_eq!(table.get("c8"), None);
    /// ```
    pub fn get(&self, name: &str) -> Option<i32> {
        self.pitches.get(name).copied()
    }

    /// Look up a pitch by letter and octave.
    pub fn named(&self, name: PitchName, octave: i32) -> Option<i32> {
        self.get(&format!("{}{}", name.letter(), octave))
    }

}

impl Default for PitchTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn table_size() {
        let table = PitchTable::new();
        assert_eq!(table.pitches.len(), 49);
        for &name in PitchName::ALL.iter() {
            assert!(table.named(name, LOWEST_OCTAVE - 1).is_none());
            assert!(table.named(name, HIGHEST_OCTAVE + 1).is_none());
        }
    }

    #[test]
    fn octaves_are_twelve_semitones_apart() {
        let table = PitchTable::new();
        for &name in PitchName::ALL.iter() {
            for octave in LOWEST_OCTAVE..HIGHEST_OCTAVE {
                let low = table.named(name, octave).unwrap();
                let high = table.named(name, octave + 1).unwrap();
                assert_eq!(high - low, 12);
            }
        }
    }

    #[test]
    fn letters_within_octave() {
        let table = PitchTable::new();
        let octave: Vec<i32> = ["c4", "d4", "e4", "f4", "g4", "a4", "b4"]
            .iter()
            .map(|name| table.get(name).unwrap())
            .collect();
        assert_eq!(octave, vec![-9, -7, -5, -4, -2, 0, 2]);
    }

    #[test]
    fn letter_round_trip() {
        for &name in PitchName::ALL.iter() {
            assert_eq!(PitchName::from_letter(name.letter()), Some(name));
        }
        assert_eq!(PitchName::from_letter('h'), None);
        assert_eq!(PitchName::from_letter('C'), None);
    }
}
