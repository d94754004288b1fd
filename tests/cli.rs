use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use image::{Rgba, RgbaImage};
use shiftinvert::cli::{CliArgs, run};
use shiftinvert::io::{SaveFormat, load_image, save_image};
use shiftinvert::{ColorInversionFilter, InvertSettings};

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("shiftinvert-cli-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn sample() -> RgbaImage {
    RgbaImage::from_fn(10, 6, |x, y| Rgba([(x * 25) as u8, (y * 40) as u8, 60, 255 - x as u8]))
}

#[test]
fn inverts_single_file() {
    let dir = temp_dir();
    let input = dir.join("in.png");
    let output = dir.join("out.png");
    save_image(&sample(), &input, SaveFormat::Png, 90).unwrap();

    let args = CliArgs::try_parse_from([
        "shiftinvert",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ])
    .unwrap();
    assert_eq!(run(args, &InvertSettings::default()), ExitCode::SUCCESS);

    let result = load_image(&output).unwrap();
    let expected = ColorInversionFilter::default().apply_to_rgba_image(&sample(), true);
    let _ = std::fs::remove_dir_all(&dir);
    assert_eq!(result, expected);
}

#[test]
fn bypass_copies_pixels() {
    let dir = temp_dir();
    let input = dir.join("in.png");
    let output = dir.join("copy.png");
    save_image(&sample(), &input, SaveFormat::Png, 90).unwrap();

    let args = CliArgs::try_parse_from([
        "shiftinvert",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--bypass",
    ])
    .unwrap();
    assert_eq!(run(args, &InvertSettings::default()), ExitCode::SUCCESS);

    let result = load_image(&output).unwrap();
    let _ = std::fs::remove_dir_all(&dir);
    assert_eq!(result, sample());
}

#[test]
fn batch_into_output_dir() {
    let dir = temp_dir();
    let out_dir = dir.join("out");
    for name in ["a.png", "b.png"] {
        save_image(&sample(), &dir.join(name), SaveFormat::Png, 90).unwrap();
    }
    let pattern = dir.join("*.png");

    let args = CliArgs::try_parse_from([
        "shiftinvert",
        "-i",
        pattern.to_str().unwrap(),
        "--output-dir",
        out_dir.to_str().unwrap(),
        "--format",
        "tga",
    ])
    .unwrap();
    assert_eq!(run(args, &InvertSettings::default()), ExitCode::SUCCESS);

    let a = out_dir.join("a.tga").exists();
    let b = out_dir.join("b.tga").exists();
    let _ = std::fs::remove_dir_all(&dir);
    assert!(a && b);
}

#[test]
fn invalid_bias_fails() {
    let dir = temp_dir();
    let input = dir.join("in.png");
    save_image(&sample(), &input, SaveFormat::Png, 90).unwrap();

    let args = CliArgs::try_parse_from([
        "shiftinvert",
        "-i",
        input.to_str().unwrap(),
        "--white-bias",
        "-2",
    ])
    .unwrap();
    let code = run(args, &InvertSettings::default());
    let _ = std::fs::remove_dir_all(&dir);
    assert_eq!(code, ExitCode::FAILURE);
}

#[test]
fn missing_input_fails() {
    let dir = temp_dir();
    let args = CliArgs::try_parse_from([
        "shiftinvert",
        "-i",
        dir.join("nope.png").to_str().unwrap(),
    ])
    .unwrap();
    let code = run(args, &InvertSettings::default());
    let _ = std::fs::remove_dir_all(&dir);
    assert_eq!(code, ExitCode::FAILURE);
}

#[test]
fn single_output_rejected_for_many_inputs_even_with_output_dir() {
    let dir = temp_dir();
    let out_dir = dir.join("out");
    let single = dir.join("x.png");
    let a = dir.join("a.png");
    let b = dir.join("b.png");
    save_image(&sample(), &a, SaveFormat::Png, 90).unwrap();
    save_image(&sample(), &b, SaveFormat::Png, 90).unwrap();

    let args = CliArgs::try_parse_from([
        "shiftinvert",
        "-i",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        "-o",
        single.to_str().unwrap(),
        "--output-dir",
        out_dir.to_str().unwrap(),
    ])
    .unwrap();
    let code = run(args, &InvertSettings::default());
    let wrote_single = single.exists();
    let wrote_dir = out_dir.exists();
    let _ = std::fs::remove_dir_all(&dir);

    assert_eq!(code, ExitCode::FAILURE);
    assert!(!wrote_single);
    assert!(!wrote_dir);
}
