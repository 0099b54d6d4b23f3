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

//! Turning tunes into sampled waveforms.

use log::{debug, trace, warn};
use snafu::{ensure, ResultExt, Snafu};

use muse_core::key::{KeyTable, NATURAL_KEY};

use crate::note::{Channel, Note, Tune};
use crate::stereo::{self, StereoConfig, StereoError};
use crate::tuning::Tuning;
use crate::wave::{self, SampleBuffer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Samples per second of the generated channels.
    pub sample_rate: u32,
    pub stereo: StereoConfig,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            sample_rate: wave::SAMPLE_RATE,
            stereo: StereoConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Snafu)]
pub enum EncodingError {
    #[snafu(display("invalid note duration {} seconds", duration))]
    InvalidDuration { duration: f64 },
    #[snafu(display("note has {} pitches but {} accidentals", pitches, accidentals))]
    AccidentalMismatch { pitches: usize, accidentals: usize },
    #[snafu(display("mismatched chord note lengths: {} and {} samples", expected, actual))]
    ChordLengthMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Snafu)]
pub enum Error {
    #[snafu(display("cannot encode note {} of {}: {}", index, channel, source))]
    EncodeNote {
        channel: Channel,
        index: usize,
        source: EncodingError,
    },
    #[snafu(display("cannot put channels together: {}", source))]
    AssembleStereo { source: StereoError },
}

/// Add the accidentals of the tune's key signature to every note.
///
/// The result must not be passed through here again, since the key would be applied twice.
pub fn apply_key_signature(tune: Tune, keys: &KeyTable) -> Tune {
    if !keys.contains(&tune.key) {
        warn!("unknown key {:?}, playing in {}", tune.key, NATURAL_KEY);
    }
    let key = keys.get_or_natural(&tune.key);
    Tune {
        channel1: tune.channel1.into_iter().map(|n| n.with_key(key)).collect(),
        channel2: tune.channel2.into_iter().map(|n| n.with_key(key)).collect(),
        ..tune
    }
}

/// Encode a tune into interleaved stereo samples.
///
/// # Examples
///
/// ```
/// use muse_core::{key::KeyTable, pitch::PitchTable};
/// use muse_audio::encoder::*;
/// use muse_audio::notation::NoteParser;
/// use muse_audio::note::Tune;
///
/// let pitches = PitchTable::new();
/// let parser = NoteParser::new(&pitches, 0.5, "drop", "second", 3000).unwrap();
/// let mut tune = Tune::new("G", 0.5);
/// tune.channel1.push(parser.parse("f4").unwrap());
/// tune.channel1.push(parser.parse("z").unwrap());
///
/// let samples = encode_tune(tune, &KeyTable::new(&pitches), &EncoderConfig::default()).unwrap();
/// // two notes of half a second, duplicated onto both channels
/// assert_eq!(samples.len(), 2 * 44100);
/// ```
pub fn encode_tune(tune: Tune, keys: &KeyTable, config: &EncoderConfig) -> Result<SampleBuffer, Error> {
    config
        .stereo
        .check_planned(
            planned_length(&tune.channel1, config.sample_rate),
            planned_length(&tune.channel2, config.sample_rate),
        )
        .context(AssembleStereo)?;
    let tune = apply_key_signature(tune, keys);
    let channel1 = encode_channel(&tune.channel1, Channel::Left, config.sample_rate)?;
    let channel2 = encode_channel(&tune.channel2, Channel::Right, config.sample_rate)?;
    debug!(
        "encoded {} samples for C1 and {} samples for C2",
        channel1.len(),
        channel2.len()
    );
    stereo::assemble_stereo(&channel1, &channel2, &config.stereo).context(AssembleStereo)
}

/// Number of samples the notes will take up once encoded.
fn planned_length(notes: &[Note], sample_rate: u32) -> usize {
    notes.iter().fold(0, |total, note| {
        total.saturating_add(wave::sample_count(note.duration, sample_rate))
    })
}

/// Encode all notes of a channel one after another.
pub fn encode_channel(notes: &[Note], channel: Channel, sample_rate: u32) -> Result<SampleBuffer, Error> {
    let mut samples = Vec::new();
    for (index, note) in notes.iter().enumerate() {
        let data = encode_note(note, sample_rate).context(EncodeNote { channel, index })?;
        trace!("{} note {}: {} samples", channel, index, data.len());
        samples.extend(data);
    }
    Ok(samples)
}

/// Encode a single note, rest or chord.
pub fn encode_note(note: &Note, sample_rate: u32) -> Result<SampleBuffer, EncodingError> {
    ensure!(
        note.pitches.len() == note.accidentals.len(),
        AccidentalMismatch {
            pitches: note.pitches.len(),
            accidentals: note.accidentals.len()
        }
    );
    ensure!(
        note.duration.is_finite() && note.duration >= 0.0,
        InvalidDuration {
            duration: note.duration
        }
    );

    if note.is_rest() {
        return Ok(vec![0; wave::sample_count(note.duration, sample_rate)]);
    }

    let tuning = Tuning::default();
    let voices: Vec<SampleBuffer> = note
        .sounding_pitches()
        .map(|pitch| synthesize(note, tuning.frequency(pitch), sample_rate))
        .collect();
    mix(voices)
}

/// Sample the note's waveform at the given frequency.
fn synthesize(note: &Note, frequency: f64, sample_rate: u32) -> SampleBuffer {
    let volume = note.volume as f64;
    (0..wave::sample_count(note.duration, sample_rate))
        .map(|index| {
            let t = wave::sample_time(index, sample_rate);
            let gain = note.envelope.eval(t, note.duration);
            (volume * gain * note.harmonic.eval(frequency * t)).round() as i32
        })
        .collect()
}

/// Sum the voices of a chord sample by sample.
fn mix(mut voices: Vec<SampleBuffer>) -> Result<SampleBuffer, EncodingError> {
    let mut sum = voices.pop().unwrap_or_default();
    for voice in voices {
        ensure!(
            voice.len() == sum.len(),
            ChordLengthMismatch {
                expected: sum.len(),
                actual: voice.len()
            }
        );
        for (total, sample) in sum.iter_mut().zip(voice) {
            *total = total.saturating_add(sample);
        }
    }
    Ok(sum)
}
