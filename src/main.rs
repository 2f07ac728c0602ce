mod check;

use self::check::check_sheet;
use clap::{value_parser, Arg, ArgAction, Command};
use engine::{SheetMetadata, Timer};
use failure::{err_msg, Error, ResultExt};
use log::{error, info, warn};
use std::path::PathBuf;
use std::process;

pub struct CheckConfig {
    metadata_file: PathBuf,
    texture_file: Option<PathBuf>,
    list: bool,
}

impl CheckConfig {
    pub fn from_args() -> Result<CheckConfig, Error> {
        let matches = Command::new("sheet_check")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Checks spritesheet clip metadata against its texture.")
            .arg(
                Arg::new("metadata")
                    .long("metadata")
                    .short('m')
                    .help("path to TOML clip metadata file")
                    .value_name("FILE")
                    .value_parser(value_parser!(PathBuf))
                    .required(true),
            )
            .arg(
                Arg::new("texture")
                    .long("texture")
                    .short('t')
                    .help("texture to check against instead of the one named in the metadata")
                    .value_name("FILE")
                    .value_parser(value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("list")
                    .long("list")
                    .short('l')
                    .help("print every clip with its texture coordinates")
                    .action(ArgAction::SetTrue),
            )
            .get_matches();

        Ok(CheckConfig {
            metadata_file: matches
                .get_one::<PathBuf>("metadata")
                .cloned()
                .ok_or_else(|| err_msg("missing --metadata"))?,
            texture_file: matches.get_one::<PathBuf>("texture").cloned(),
            list: matches.get_flag("list"),
        })
    }
}

fn run() -> Result<(), Error> {
    let config = CheckConfig::from_args()?;
    let mut timer = Timer::new();
    timer.start();

    let metadata = SheetMetadata::from_file(&config.metadata_file)?;
    let texture_file = config
        .texture_file
        .unwrap_or_else(|| metadata.texture.clone());
    let (width, height) = image::image_dimensions(&texture_file)
        .with_context(|_| format!("reading texture `{}`", texture_file.display()))?;
    info!(
        "Checking {} clips of {:?} against {}x{} texture {:?}...",
        metadata.clips.len(),
        config.metadata_file,
        width,
        height,
        texture_file
    );

    let report = check_sheet(&metadata, width, height);
    let mut out_of_bounds = 0;
    for clip in &report {
        if !clip.in_bounds {
            warn!(
                "Clip {} `{}` {:?} lies outside the texture.",
                clip.index, clip.name, clip.rect
            );
            out_of_bounds += 1;
        }
        if config.list {
            println!(
                "{:4} {:16} {:5} {:5} {:5} {:5}  ({:.4}, {:.4})-({:.4}, {:.4})",
                clip.index,
                clip.name,
                clip.rect.x,
                clip.rect.y,
                clip.rect.w,
                clip.rect.h,
                clip.uv_min[0],
                clip.uv_min[1],
                clip.uv_max[0],
                clip.uv_max[1]
            );
        }
    }

    info!("Done checking clips in {}ms.", timer.ticks());
    if out_of_bounds > 0 {
        return Err(err_msg(format!(
            "{} of {} clips lie outside the texture",
            out_of_bounds,
            report.len()
        )));
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(error) = run() {
        error!("{}", error);
        for cause in error.iter_causes() {
            error!("    caused by: {}", cause);
        }
        process::exit(1);
    }
}
