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

//! Writing interleaved stereo samples as 16-bit PCM WAV files.

use std::io::{Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use muse_audio::wave::SAMPLE_RATE;

pub const BIT_DEPTH: u16 = 16;
pub const CHANNELS: u16 = 2;

/// Format of every WAV file written by muse.
pub fn spec() -> WavSpec {
    WavSpec {
        channels: CHANNELS,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: BIT_DEPTH,
        sample_format: SampleFormat::Int,
    }
}

/// Write interleaved stereo samples to a WAV file at `path`.
pub fn write_wav(path: &Path, samples: &[i32]) -> hound::Result<()> {
    let writer = WavWriter::create(path, spec())?;
    write_samples(writer, samples)
}

/// Write interleaved stereo samples as WAV data into any seekable writer.
pub fn write_wav_to<W: Write + Seek>(writer: W, samples: &[i32]) -> hound::Result<()> {
    let writer = WavWriter::new(writer, spec())?;
    write_samples(writer, samples)
}

fn write_samples<W: Write + Seek>(mut writer: WavWriter<W>, samples: &[i32]) -> hound::Result<()> {
    for &sample in samples {
        writer.write_sample(clamp(sample))?;
    }
    writer.finalize()
}

/// Saturate a sample to the 16-bit range.
fn clamp(sample: i32) -> i16 {
    sample.max(i16::MIN as i32).min(i16::MAX as i32) as i16
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn round_trip(samples: &[i32]) -> (WavSpec, Vec<i16>) {
        let mut cursor = Cursor::new(Vec::new());
        write_wav_to(&mut cursor, samples).unwrap();
        let reader = hound::WavReader::new(Cursor::new(cursor.into_inner())).unwrap();
        let spec = reader.spec();
        let read = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
        (spec, read)
    }

    #[test]
    fn header() {
        let (spec, samples) = round_trip(&[]);
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, SampleFormat::Int);
        assert!(samples.is_empty());
    }

    #[test]
    fn samples_are_kept_in_order() {
        let (_, samples) = round_trip(&[1, -1, 200, -200, 32767, -32768]);
        assert_eq!(samples, vec![1, -1, 200, -200, 32767, -32768]);
    }

    #[test]
    fn loud_samples_saturate() {
        let (_, samples) = round_trip(&[40000, -40000]);
        assert_eq!(samples, vec![i16::MAX, i16::MIN]);
    }
}
