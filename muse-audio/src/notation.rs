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

//! The textual format of single notes inside a score.
//!
//! A token consists of an optional length multiplier and a pitch specifier,
//! separated by a colon:
//!
//! - `c4`, `f4#`, `b3b`: a single pitch, optionally sharp or flat,
//! - `0.5:e4`: the same with half the default length,
//! - `c4-e4-g4`: a chord,
//! - `z`: a rest.

use snafu::{ensure, OptionExt, Snafu};

use muse_core::pitch::PitchTable;

use crate::envelope::Envelope;
use crate::harmonic::Harmonic;
use crate::note::Note;

/// Marks a rest in place of a pitch.
pub const REST: &str = "z";

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ParseError {
    #[snafu(display("invalid length in note {:?}", token))]
    InvalidLength { token: String },
    #[snafu(display("malformed chord {:?}", chord))]
    MalformedChord { chord: String },
    #[snafu(display("invalid note token length {:?}, expected 2 or 3 characters", note))]
    InvalidNoteLength { note: String },
    #[snafu(display("unknown pitch {:?}", note))]
    UnknownPitch { note: String },
    #[snafu(display("unknown envelope {:?}", name))]
    UnknownEnvelope { name: String },
    #[snafu(display("unknown harmonic {:?}", name))]
    UnknownHarmonic { name: String },
}

/// Parse a single note token into a note.
///
/// # Examples
///
/// ```
/// use muse_core::pitch::PitchTable;
/// use muse_audio::notation::parse_note_token;
///
/// let pitches = PitchTable::new();
/// let note = parse_note_token(&pitches, "0.5:c4", 1.0, "flat", "first", 1000).unwrap();
/// assert_eq!(note.pitches, vec![-9]);
/// assert_eq!(note.accidentals, vec![0]);
/// assert_eq!(note.duration, 0.5);
/// ```
pub fn parse_note_token(
    pitches: &PitchTable,
    token: &str,
    default_length: f64,
    envelope: &str,
    harmonic: &str,
    volume: i32,
) -> Result<Note, ParseError> {
    NoteParser::new(pitches, default_length, envelope, harmonic, volume)?.parse(token)
}

/// Parses note tokens sharing the same default length, envelope, harmonic and volume.
#[derive(Debug, Clone)]
pub struct NoteParser<'a> {
    pitches: &'a PitchTable,
    default_length: f64,
    envelope: Envelope,
    harmonic: Harmonic,
    volume: i32,
}

impl<'a> NoteParser<'a> {
    /// Resolve the envelope and harmonic names once for all subsequent notes.
    pub fn new(
        pitches: &'a PitchTable,
        default_length: f64,
        envelope: &str,
        harmonic: &str,
        volume: i32,
    ) -> Result<Self, ParseError> {
        let envelope = Envelope::from_name(envelope).context(UnknownEnvelope { name: envelope })?;
        let harmonic = Harmonic::from_name(harmonic).context(UnknownHarmonic { name: harmonic })?;
        Ok(Self {
            pitches,
            default_length,
            envelope,
            harmonic,
            volume,
        })
    }

    pub fn parse(&self, token: &str) -> Result<Note, ParseError> {
        let (multiplier, spec) = split_length(token)?;
        let mut note = Note::rest(
            multiplier * self.default_length,
            self.envelope,
            self.harmonic,
            self.volume,
        );

        if spec.chars().count() > 3 {
            let chord: Vec<&str> = spec.split('-').collect();
            ensure!(chord.len() >= 2, MalformedChord { chord: spec });
            for part in chord {
                self.push_pitch(&mut note, part)?;
            }
        } else {
            self.push_pitch(&mut note, spec)?;
        }
        Ok(note)
    }

    /// Add a single pitch specifier to the note. Rests add nothing.
    fn push_pitch(&self, note: &mut Note, spec: &str) -> Result<(), ParseError> {
        if spec == REST {
            return Ok(());
        }
        let chars: Vec<char> = spec.chars().collect();
        ensure!(
            chars.len() == 2 || chars.len() == 3,
            InvalidNoteLength { note: spec }
        );
        let name: String = chars[..2].iter().collect();
        let pitch = self.pitches.get(&name).context(UnknownPitch { note: spec })?;
        // Any other trailing character is read as natural.
        let accidental = match chars.get(2) {
            Some('#') => 1,
            Some('b') => -1,
            _ => 0,
        };
        note.pitches.push(pitch);
        note.accidentals.push(accidental);
        Ok(())
    }
}

/// Split off the optional length multiplier of a token.
fn split_length(token: &str) -> Result<(f64, &str), ParseError> {
    let mut parts = token.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(spec), None, _) => Ok((1.0, spec)),
        (Some(length), Some(spec), None) => {
            let multiplier = length
                .parse::<f64>()
                .ok()
                .context(InvalidLength { token })?;
            ensure!(
                multiplier.is_finite() && multiplier >= 0.0,
                InvalidLength { token }
            );
            Ok((multiplier, spec))
        }
        _ => InvalidLength { token }.fail(),
    }
}
