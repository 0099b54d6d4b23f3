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

//! Scores as written in YAML files, and how they become tunes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use snafu::{ResultExt, Snafu};

use muse_audio::notation::{NoteParser, ParseError};
use muse_audio::note::{Channel, Tune};
use muse_core::key::NATURAL_KEY;
use muse_core::pitch::PitchTable;

/// A complete score file.
///
/// ```yaml
/// name: scale
/// key: G
/// length: 0.25
/// envelope: drop
/// harmonic: stringed
/// volume: 4000
/// sections:
///   - C1: [g4, a4, b4, c5, d5, e5, f5, g5]
///     C2:
///       - 2:g3-b3-d4
///       - 2:c4-e4-g4
///       - 2:d4-f4-a4
///       - 2:g3-b3-d4
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Score {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_key")]
    pub key: String,
    /// Duration in seconds of a note without explicit length.
    pub length: f64,
    #[serde(default = "default_envelope")]
    pub envelope: String,
    #[serde(default = "default_harmonic")]
    pub harmonic: String,
    pub volume: i32,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A part of the score, with the notes for both channels.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Section {
    #[serde(rename = "C1", default)]
    pub c1: Vec<String>,
    #[serde(rename = "C2", default)]
    pub c2: Vec<String>,
}

impl Section {
    pub fn channel(&self, channel: Channel) -> &[String] {
        match channel {
            Channel::Left => &self.c1,
            Channel::Right => &self.c2,
        }
    }
}

fn default_key() -> String {
    NATURAL_KEY.to_string()
}

fn default_envelope() -> String {
    "flat".to_string()
}

fn default_harmonic() -> String {
    "first".to_string()
}

#[derive(Debug, Snafu)]
pub enum ScoreError {
    #[snafu(display("cannot read score file {}: {}", path.display(), source))]
    ReadScore { path: PathBuf, source: io::Error },
    #[snafu(display("cannot unmarshal score: {}", source))]
    ParseYaml { source: serde_yaml::Error },
    #[snafu(display("cannot set up instrument: {}", source))]
    Instrument { source: ParseError },
    #[snafu(display("[{}] section {}: cannot make note {:?}: {}", channel, section, token, source))]
    Token {
        section: usize,
        channel: Channel,
        token: String,
        source: ParseError,
    },
}

impl Score {
    pub fn from_yaml(input: &str) -> Result<Score, ScoreError> {
        serde_yaml::from_str(input).context(ParseYaml)
    }

    pub fn load(path: &Path) -> Result<Score, ScoreError> {
        let input = fs::read_to_string(path).context(ReadScore { path })?;
        Score::from_yaml(&input)
    }

    /// Parse all notes of all sections, in order, into a tune.
    pub fn to_tune(&self, pitches: &PitchTable) -> Result<Tune, ScoreError> {
        let parser = NoteParser::new(
            pitches,
            self.length,
            &self.envelope,
            &self.harmonic,
            self.volume,
        )
        .context(Instrument)?;

        let mut tune = Tune::new(&self.key, self.length);
        for (section_index, section) in self.sections.iter().enumerate() {
            for &channel in [Channel::Left, Channel::Right].iter() {
                for token in section.channel(channel) {
                    let note = parser.parse(token).context(Token {
                        section: section_index,
                        channel,
                        token: token.as_str(),
                    })?;
                    tune.channel_mut(channel).push(note);
                }
            }
        }
        Ok(tune)
    }

    /// Where to write the rendered tune if no output is given:
    /// the score's name, or the file name of the score itself.
    pub fn default_output(&self, source: &Path) -> PathBuf {
        let base = if self.name.is_empty() {
            source.with_extension("")
        } else {
            source.with_file_name(&self.name)
        };
        let mut file = base.into_os_string();
        file.push(".wav");
        file.into()
    }
}
