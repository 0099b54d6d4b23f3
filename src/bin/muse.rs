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

//! `muse` encodes score files written in YAML into stereo wav files.

use std::io;
use std::path::PathBuf;

use log::error;
use structopt::StructOpt;

use muse::render::Renderer;
use muse::score::Score;
use muse_audio::encoder::EncoderConfig;
use muse_audio::stereo::StereoConfig;
use muse_audio::wave::{self, SAMPLE_RATE};

#[derive(Debug, StructOpt)]
#[structopt(name = "muse", about = "Encoding text scores into music")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// The score file (YAML).
    #[structopt(parse(from_os_str))]
    score: PathBuf,

    /// Output wav file. Named after the score if not given.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Refuse to encode tunes longer than this many seconds.
    #[structopt(long)]
    max_seconds: Option<f64>,

    /// Largest length difference between the channels, in samples, that is fixed by truncation.
    #[structopt(long, default_value = "1500")]
    tolerance: usize,

    /// Dump the tune parsed from the score.
    #[structopt(long)]
    #[allow(clippy::option_option)]
    dump_description: Option<Option<PathBuf>>,
}

fn main() -> io::Result<()> {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    run(opt).map_err(|e| {
        error!("{}", e);
        e
    })
}

fn run(opt: Opt) -> io::Result<()> {
    let config = EncoderConfig {
        sample_rate: SAMPLE_RATE,
        stereo: StereoConfig {
            tolerance: opt.tolerance,
            max_length: opt
                .max_seconds
                .map(|seconds| wave::sample_count(seconds, SAMPLE_RATE)),
        },
    };
    log::debug!("{:?}", config);
    let renderer = Renderer::new(config);

    let score = Score::load(&opt.score).map_err(invalid_data)?;
    let output = opt
        .output
        .clone()
        .unwrap_or_else(|| score.default_output(&opt.score));

    let dump_out = opt
        .dump_description
        .map(|path| path.unwrap_or_else(|| "/dev/stdout".into()));
    if let Some(dump_out_path) = dump_out {
        use std::io::Write;
        let tune = renderer.tune(&score).map_err(invalid_data)?;
        let mut f = std::fs::File::create(dump_out_path)?;
        writeln!(f, "{:#?}", tune)?;
    }

    renderer
        .render_to_file(&score, &output)
        .map_err(invalid_data)?;
    Ok(())
}

fn invalid_data<E: std::error::Error + Send + Sync + 'static>(err: E) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}
