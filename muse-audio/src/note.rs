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

//! Definitions of what notes and tunes are.

use std::fmt;

use muse_core::key::KeySignature;

use crate::envelope::Envelope;
use crate::harmonic::Harmonic;

/// A single note, chord or rest as written in one token of a score.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Semitone offsets from A4. Empty for rests, more than one for chords.
    pub pitches: Vec<i32>,
    /// One per pitch: 1 for sharp, -1 for flat, 0 for natural.
    pub accidentals: Vec<i32>,
    /// Duration in seconds.
    pub duration: f64,
    pub envelope: Envelope,
    pub harmonic: Harmonic,
    pub volume: i32,
}

impl Note {
    /// A silent note.
    pub fn rest(duration: f64, envelope: Envelope, harmonic: Harmonic, volume: i32) -> Self {
        Self {
            pitches: Vec::new(),
            accidentals: Vec::new(),
            duration,
            envelope,
            harmonic,
            volume,
        }
    }

    pub fn is_rest(&self) -> bool {
        self.pitches.is_empty()
    }

    /// The pitches that actually sound, with accidentals applied.
    pub fn sounding_pitches(&self) -> impl Iterator<Item = i32> + '_ {
        self.pitches
            .iter()
            .zip(self.accidentals.iter())
            .map(|(pitch, accidental)| pitch + accidental)
    }

    /// Return this note with the accidentals of `key` added on top of the written ones.
    ///
    /// Applying the same key twice adds its accidentals twice.
    pub fn with_key(self, key: &KeySignature) -> Note {
        let accidentals = self
            .accidentals
            .iter()
            .enumerate()
            .map(|(index, &accidental)| {
                accidental + self.pitches.get(index).map_or(0, |&pitch| key.accidental_for(pitch))
            })
            .collect();
        Note {
            accidentals,
            ..self
        }
    }
}

/// One of the two channels of a tune.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Channel {
    Left,
    Right,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Left => write!(f, "C1"),
            Channel::Right => write!(f, "C2"),
        }
    }
}

/// A complete piece of music, ready to be encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Tune {
    /// Name of the key signature, e.g. `"Eb"`.
    pub key: String,
    /// Duration in seconds of a note without explicit length.
    pub length: f64,
    pub channel1: Vec<Note>,
    pub channel2: Vec<Note>,
}

impl Tune {
    pub fn new(key: &str, length: f64) -> Self {
        Self {
            key: key.to_string(),
            length,
            channel1: Vec::new(),
            channel2: Vec::new(),
        }
    }

    pub fn channel_mut(&mut self, channel: Channel) -> &mut Vec<Note> {
        match channel {
            Channel::Left => &mut self.channel1,
            Channel::Right => &mut self.channel2,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use muse_core::key::KeyTable;
    use muse_core::pitch::PitchTable;

    fn note(pitches: Vec<i32>, accidentals: Vec<i32>) -> Note {
        Note {
            pitches,
            accidentals,
            duration: 0.25,
            envelope: Envelope::Flat,
            harmonic: Harmonic::First,
            volume: 100,
        }
    }

    #[test]
    fn with_key_adds_accidentals() {
        let pitches = PitchTable::new();
        let keys = KeyTable::new(&pitches);
        let f4 = pitches.get("f4").unwrap();
        let g4 = pitches.get("g4").unwrap();

        let n = note(vec![f4, g4], vec![0, 1]).with_key(keys.get("D").unwrap());
        assert_eq!(n.accidentals, vec![1, 1]);
        assert_eq!(n.sounding_pitches().collect::<Vec<_>>(), vec![f4 + 1, g4 + 1]);

        let twice = n.with_key(keys.get("D").unwrap());
        assert_eq!(twice.accidentals, vec![2, 1]);
    }

    #[test]
    fn rest_has_no_pitches() {
        let rest = Note::rest(1.0, Envelope::Flat, Harmonic::First, 100);
        assert!(rest.is_rest());
        assert_eq!(rest.sounding_pitches().count(), 0);
    }

    #[test]
    fn channels_by_name() {
        let mut tune = Tune::new("C", 0.25);
        tune.channel_mut(Channel::Left).push(note(vec![0], vec![0]));
        tune.channel_mut(Channel::Right).push(note(vec![2], vec![0]));
        tune.channel_mut(Channel::Left).push(note(vec![4], vec![0]));
        assert_eq!(tune.channel1.len(), 2);
        assert_eq!(tune.channel2[0].pitches, vec![2]);
        assert_eq!(Channel::Left.to_string(), "C1");
        assert_eq!(Channel::Right.to_string(), "C2");
    }
}
