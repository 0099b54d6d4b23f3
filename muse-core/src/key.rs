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

//! Key signatures and the pitches they alter.

use std::collections::{BTreeSet, HashMap};

use crate::pitch::{PitchName, PitchTable};

/// Sharp keys in circle-of-fifths order, each adding one more sharp.
pub const SHARP_KEYS: [&str; 7] = ["G", "D", "A", "E", "B", "F#", "C#"];
/// The pitches receiving a sharp, in the order they are added.
pub const SHARP_ORDER: [PitchName; 7] = [
    PitchName::F,
    PitchName::C,
    PitchName::G,
    PitchName::D,
    PitchName::A,
    PitchName::E,
    PitchName::B,
];

/// Flat keys in circle-of-fourths order, each adding one more flat.
pub const FLAT_KEYS: [&str; 7] = ["F", "Bb", "Eb", "Ab", "Db", "Gb", "Cb"];
/// The pitches receiving a flat, in the order they are added.
pub const FLAT_ORDER: [PitchName; 7] = [
    PitchName::B,
    PitchName::E,
    PitchName::A,
    PitchName::D,
    PitchName::G,
    PitchName::C,
    PitchName::F,
];

/// The key without any accidentals.
pub const NATURAL_KEY: &str = "C";

/// Whether a key raises or lowers its affected pitches.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum KeyKind {
    Natural,
    Sharp,
    Flat,
}

impl KeyKind {
    /// The accidental added to every affected pitch.
    pub fn direction(self) -> i32 {
        match self {
            KeyKind::Natural => 0,
            KeyKind::Sharp => 1,
            KeyKind::Flat => -1,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct KeySignature {
    pub kind: KeyKind,
    /// Raw semitone offsets that receive the key's accidental.
    pub affected: BTreeSet<i32>,
}

impl KeySignature {
    fn natural() -> Self {
        Self {
            kind: KeyKind::Natural,
            affected: BTreeSet::new(),
        }
    }

    /// The accidental this key adds to `pitch`.
    pub fn accidental_for(&self, pitch: i32) -> i32 {
        if self.affected.contains(&pitch) {
            self.kind.direction()
        } else {
            0
        }
    }
}

/// All known key signatures by name.
#[derive(Debug, Clone)]
pub struct KeyTable {
    keys: HashMap<String, KeySignature>,
    natural: KeySignature,
}

impl KeyTable {
    /// Build every key signature from the base pitches of the first octave.
    ///
    /// # Examples
    ///
    /// ```
    /// use muse_core::key::*;
    /// use muse_core::pitch::PitchTable;
    ///
    /// let keys = KeyTable::new(&PitchTable::new());
    /// let g = keys.get("G").unwrap();
    /// assert_eq!(g.kind, KeyKind::Sharp);
    /// // f2 up to f6
    /// assert_eq!(g.affected.iter().copied().collect::<Vec<_>>(), vec![-28, -16, -4, 8, 20]);
    /// assert!(keys.get("C").unwrap().affected.is_empty());
    /// ```
    pub fn new(pitches: &PitchTable) -> Self {
        let mut keys = HashMap::new();
        keys.insert(NATURAL_KEY.to_string(), KeySignature::natural());
        Self::insert_progression(&mut keys, pitches, KeyKind::Sharp, &SHARP_KEYS, &SHARP_ORDER);
        Self::insert_progression(&mut keys, pitches, KeyKind::Flat, &FLAT_KEYS, &FLAT_ORDER);
        Self {
            keys,
            natural: KeySignature::natural(),
        }
    }

    fn insert_progression(
        keys: &mut HashMap<String, KeySignature>,
        pitches: &PitchTable,
        kind: KeyKind,
        names: &[&str],
        order: &[PitchName],
    ) {
        for (index, name) in names.iter().enumerate() {
            let mut affected = BTreeSet::new();
            for &base in &order[..=index] {
                // Every letter is present in the first octave of the table.
                let base_pitch = pitches.named(base, 1).unwrap_or_default();
                for octave in 1..=5 {
                    affected.insert(base_pitch + 12 * octave);
                }
            }
            keys.insert(name.to_string(), KeySignature { kind, affected });
        }
    }

    pub fn get(&self, name: &str) -> Option<&KeySignature> {
        self.keys.get(name)
    }

    /// Like `get`, but unknown keys fall back to the natural key.
    pub fn get_or_natural(&self, name: &str) -> &KeySignature {
        self.keys.get(name).unwrap_or(&self.natural)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains_key(name)
    }
}
