// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use seamgrid::processor;
use seamgrid::{carve, visualize_seams, CarvingScheme, Orientation, RgbWeights};
use std::io;
use std::process;

use clap::{crate_version, value_t, App, AppSettings, Arg, ArgMatches, SubCommand};
use failure::{bail, err_msg, Error};
use image::{Rgb, RgbImage};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn paths<'a, 'b>() -> Vec<Arg<'a, 'b>> {
    vec![
        Arg::with_name("input")
            .help("The image to read")
            .required(true)
            .index(1),
        Arg::with_name("output")
            .help("Where to write the result; the format follows the extension")
            .required(true)
            .index(2),
    ]
}

fn target_size<'a, 'b>() -> Vec<Arg<'a, 'b>> {
    vec![
        Arg::with_name("width")
            .help("Output width in pixels")
            .long("width")
            .takes_value(true)
            .required(true),
        Arg::with_name("height")
            .help("Output height in pixels")
            .long("height")
            .takes_value(true)
            .required(true),
    ]
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("seamgrid")
        .version(crate_version!())
        .about("Content-aware image resizing")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("weights")
                .help("Red, green and blue weights for the grayscale intensity")
                .long("weights")
                .takes_value(true)
                .global(true),
        )
        .subcommand(
            SubCommand::with_name("carve")
                .about("Resize by removing or duplicating seams")
                .args(&paths())
                .args(&target_size())
                .arg(
                    Arg::with_name("scheme")
                        .help("Order in which seams are taken")
                        .long("scheme")
                        .takes_value(true)
                        .possible_values(&["vertical-first", "horizontal-first", "intermittent"])
                        .default_value("intermittent"),
                ),
        )
        .subcommand(
            SubCommand::with_name("seams")
                .about("Paint the seams a carve would take")
                .args(&paths())
                .args(&target_size())
                .arg(
                    Arg::with_name("direction")
                        .help("Which seams to show")
                        .long("direction")
                        .takes_value(true)
                        .possible_values(&["vertical", "horizontal"])
                        .default_value("vertical"),
                )
                .arg(
                    Arg::with_name("color")
                        .help("Seam colour as RRGGBB")
                        .long("color")
                        .takes_value(true)
                        .default_value("ff0000"),
                ),
        )
        .subcommand(
            SubCommand::with_name("greyscale")
                .about("Weighted greyscale")
                .args(&paths()),
        )
        .subcommand(
            SubCommand::with_name("gradient")
                .about("Gradient magnitude of the weighted greyscale")
                .args(&paths()),
        )
        .subcommand(
            SubCommand::with_name("hue")
                .about("Scale each channel by its weight")
                .args(&paths()),
        )
        .subcommand(
            SubCommand::with_name("resize")
                .about("Uniform resampling, for comparison")
                .args(&paths())
                .args(&target_size())
                .arg(
                    Arg::with_name("filter")
                        .long("filter")
                        .takes_value(true)
                        .possible_values(&["nearest", "bilinear"])
                        .default_value("bilinear"),
                ),
        )
}

fn parse_color(s: &str) -> Result<Rgb<u8>, Error> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 {
        bail!("seam colour must be six hex digits, got {:?}", s);
    }
    let value = u32::from_str_radix(hex, 16)?;
    Ok(Rgb([(value >> 16) as u8, (value >> 8) as u8, value as u8]))
}

fn load(matches: &ArgMatches) -> Result<RgbImage, Error> {
    let path = matches.value_of("input").ok_or_else(|| err_msg("no input"))?;
    Ok(image::open(path)?.to_rgb())
}

fn save(matches: &ArgMatches, image: &RgbImage) -> Result<(), Error> {
    let path = matches.value_of("output").ok_or_else(|| err_msg("no output"))?;
    image.save(path)?;
    info!(path, size = ?image.dimensions(), "wrote image");
    Ok(())
}

fn size(matches: &ArgMatches) -> Result<(u32, u32), Error> {
    Ok((
        value_t!(matches, "width", u32)?,
        value_t!(matches, "height", u32)?,
    ))
}

fn run() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let matches = app().get_matches();
    let (name, sub) = match matches.subcommand() {
        (name, Some(sub)) => (name, sub),
        _ => bail!("no command given"),
    };
    let weights = match sub.value_of("weights").or_else(|| matches.value_of("weights")) {
        Some(w) => w.parse::<RgbWeights>()?,
        None => RgbWeights::default(),
    };
    let image = load(sub)?;

    let result = match name {
        "carve" => {
            let (width, height) = size(sub)?;
            let scheme = sub
                .value_of("scheme")
                .unwrap_or("intermittent")
                .parse::<CarvingScheme>()
                .map_err(err_msg)?;
            carve(&image, width, height, &weights, scheme)?
        }
        "seams" => {
            let (width, height) = size(sub)?;
            let direction = sub
                .value_of("direction")
                .unwrap_or("vertical")
                .parse::<Orientation>()
                .map_err(err_msg)?;
            let marker = parse_color(sub.value_of("color").unwrap_or("ff0000"))?;
            visualize_seams(&image, width, height, &weights, direction, marker)?
        }
        "greyscale" => processor::greyscale(&image, &weights),
        "gradient" => processor::gradient_magnitude(&image, &weights),
        "hue" => processor::change_hue(&image, &weights),
        "resize" => {
            let (width, height) = size(sub)?;
            match sub.value_of("filter") {
                Some("nearest") => processor::nearest_neighbor(&image, width, height),
                _ => processor::bilinear(&image, width, height),
            }
        }
        other => bail!("unknown command {:?}", other),
    };
    save(sub, &result)
}

fn main() {
    if let Err(err) = run() {
        eprintln!("seamgrid: {}", err);
        for cause in err.iter_causes() {
            eprintln!("  caused by: {}", cause);
        }
        process::exit(1);
    }
}
