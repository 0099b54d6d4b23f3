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

//! The glue responsible for turning scores into actual waveforms.

use std::path::{Path, PathBuf};

use log::info;
use snafu::{ResultExt, Snafu};

use muse_audio::encoder::{self, EncoderConfig};
use muse_audio::note::Tune;
use muse_audio::wave::SampleBuffer;
use muse_core::key::KeyTable;
use muse_core::pitch::PitchTable;

use crate::output;
use crate::score::{Score, ScoreError};

#[derive(Debug, Snafu)]
pub enum RenderError {
    #[snafu(display("cannot read the score: {}", source))]
    ReadTune { source: ScoreError },
    #[snafu(display("cannot encode the tune: {}", source))]
    Encode { source: encoder::Error },
    #[snafu(display("cannot write {}: {}", path.display(), source))]
    WriteWav { path: PathBuf, source: hound::Error },
}

/// Holds the lookup tables that are built once and shared by every score.
pub struct Renderer {
    pitches: PitchTable,
    keys: KeyTable,
    config: EncoderConfig,
}

impl Renderer {
    pub fn new(config: EncoderConfig) -> Self {
        let pitches = PitchTable::new();
        let keys = KeyTable::new(&pitches);
        Self {
            pitches,
            keys,
            config,
        }
    }

    /// Parse the notes of a score.
    pub fn tune(&self, score: &Score) -> Result<Tune, RenderError> {
        score.to_tune(&self.pitches).context(ReadTune)
    }

    /// Encode a tune into interleaved stereo samples.
    pub fn encode(&self, tune: Tune) -> Result<SampleBuffer, RenderError> {
        info!("encoding in {} with notes of {:.3} seconds", tune.key, tune.length);
        let samples = encoder::encode_tune(tune, &self.keys, &self.config).context(Encode)?;
        let frames = samples.len() / 2;
        info!(
            "total length {} samples ({:.2} seconds)",
            frames,
            frames as f64 / self.config.sample_rate as f64
        );
        Ok(samples)
    }

    pub fn render(&self, score: &Score) -> Result<SampleBuffer, RenderError> {
        info!("rendering {:?}", score.name);
        self.encode(self.tune(score)?)
    }

    /// Render a score and write the result to a WAV file.
    pub fn render_to_file(&self, score: &Score, path: &Path) -> Result<(), RenderError> {
        let samples = self.render(score)?;
        output::wav::write_wav(path, &samples).context(WriteWav { path })?;
        info!("written to {}", path.display());
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use muse_audio::stereo::{StereoConfig, StereoError};

    // C1: 6 notes of 5512 samples, C2: 3 notes of 11025 samples
    const SCORE: &str = r"
name: test
key: Eb
length: 0.125
envelope: round
harmonic: second
volume: 3000
sections:
  - C1: [c4, d4, e4, f4]
    C2:
      - 2:c3-g3
      - 2:z
  - C1: [g4, z]
    C2:
      - 2:e3
";

    #[test]
    fn tolerates_rounding_between_channels() {
        let score = Score::from_yaml(SCORE).unwrap();
        let samples = Renderer::default().render(&score).unwrap();
        assert_eq!(samples.len(), 2 * 6 * 5512);
    }

    #[test]
    fn mismatched_channels() {
        let score = Score::from_yaml("length: 1.0\nvolume: 10\nsections:\n  - C1: [c4]\n    C2:\n      - 0.5:c4\n").unwrap();
        let err = Renderer::default().render(&score).unwrap_err();
        match err {
            RenderError::Encode {
                source: encoder::Error::AssembleStereo { source },
            } => assert_eq!(
                source,
                StereoError::LengthMismatch {
                    left: 44100,
                    right: 22050
                }
            ),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn size_guard() {
        let score = Score::from_yaml(SCORE).unwrap();
        let renderer = Renderer::new(EncoderConfig {
            stereo: StereoConfig {
                max_length: Some(44100 / 2),
                ..StereoConfig::default()
            },
            ..EncoderConfig::default()
        });
        assert!(matches!(
            renderer.render(&score),
            Err(RenderError::Encode {
                source: encoder::Error::AssembleStereo {
                    source: StereoError::TooLong { .. }
                }
            })
        ));
    }

    #[test]
    fn bad_token() {
        let score = Score::from_yaml("length: 1.0\nvolume: 10\nsections:\n  - C1: [c]\n").unwrap();
        assert!(matches!(
            Renderer::default().render(&score),
            Err(RenderError::ReadTune { .. })
        ));
    }

    #[test]
    fn writes_wav_file() {
        let score = Score::from_yaml(SCORE).unwrap();
        let path = std::env::temp_dir().join(format!("muse-render-test-{}.wav", std::process::id()));
        Renderer::default().render_to_file(&score, &path).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec(), output::wav::spec());
        assert_eq!(reader.len() as usize, 2 * 6 * 5512);
        std::fs::remove_file(&path).unwrap();
    }
}
