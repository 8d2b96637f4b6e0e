use image::{Rgba, RgbaImage};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// A colored content square surrounded by a near-white frame, like the
/// AI-generated sources the post-processor was written for.
fn create_framed_source(path: &Path, size: u32, inset: u32) {
    let image = RgbaImage::from_fn(size, size, |x, y| {
        let inside = x >= inset && x < size - inset && y >= inset && y < size - inset;
        if inside {
            Rgba([40, 30, 120, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    });
    image.save(path).expect("Failed to save source image");
}

#[test]
fn detect_crop_removes_the_white_frame() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let source_path = temp_dir.path().join("source.png");
    create_framed_source(&source_path, 256, 32);
    let output_path = temp_dir.path().join("app-icon.png");

    let output = Command::new(binary_path())
        .arg("process")
        .arg(&source_path)
        .arg("-o")
        .arg(&output_path)
        .arg("--size")
        .arg("128")
        .arg("--detect-crop")
        .output()
        .expect("Failed to run app-icon-gen");
    assert_success(&output);

    let icon = image::open(&output_path)
        .expect("Failed to load processed icon")
        .to_rgba8();
    assert_eq!(icon.dimensions(), (128, 128));
    // Squircle corners are transparent, the center is the (resampled) content
    // color rather than frame white.
    assert_eq!(icon.get_pixel(0, 0)[3], 0);
    let center = icon.get_pixel(64, 64);
    assert_eq!(center[3], 255);
    assert!(center[0] < 200, "frame white survived the crop: {center:?}");
}

#[test]
fn absolute_bounds_crop_and_resample_to_the_canonical_size() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let source_path = temp_dir.path().join("source.png");
    create_framed_source(&source_path, 256, 32);
    let output_path = temp_dir.path().join("app-icon.png");

    let output = Command::new(binary_path())
        .arg("process")
        .arg(&source_path)
        .arg("-o")
        .arg(&output_path)
        .arg("--size")
        .arg("64")
        .arg("--crop-bounds")
        .arg("32,32,224,224")
        .output()
        .expect("Failed to run app-icon-gen");
    assert_success(&output);

    let icon = image::open(&output_path)
        .expect("Failed to load processed icon")
        .to_rgba8();
    assert_eq!(icon.dimensions(), (64, 64));
    assert_eq!(icon.get_pixel(32, 32)[3], 255);
}

#[test]
fn probe_reports_the_content_bounds() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let source_path = temp_dir.path().join("source.png");
    create_framed_source(&source_path, 256, 32);

    let output = Command::new(binary_path())
        .arg("probe")
        .arg(&source_path)
        .output()
        .expect("Failed to run app-icon-gen");
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Image size: 256x256"), "stdout: {stdout}");
    assert!(stdout.contains("left=32"), "stdout: {stdout}");
    assert!(stdout.contains("right=223"), "stdout: {stdout}");
    assert!(stdout.contains("top=32"), "stdout: {stdout}");
    assert!(stdout.contains("bottom=223"), "stdout: {stdout}");
}

#[test]
fn missing_source_exits_nonzero() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let output = Command::new(binary_path())
        .arg("process")
        .arg(temp_dir.path().join("no-such-file.png"))
        .arg("-o")
        .arg(temp_dir.path().join("out.png"))
        .output()
        .expect("Failed to run app-icon-gen");
    assert!(!output.status.success());
}

#[test]
fn oversized_crop_bounds_exit_nonzero() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let source_path = temp_dir.path().join("source.png");
    create_framed_source(&source_path, 128, 16);

    let output = Command::new(binary_path())
        .arg("process")
        .arg(&source_path)
        .arg("-o")
        .arg(temp_dir.path().join("out.png"))
        .arg("--crop-bounds")
        .arg("180,180,844,844")
        .output()
        .expect("Failed to run app-icon-gen");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exceed"), "stderr: {stderr}");
}

fn assert_success(output: &std::process::Output) {
    if !output.status.success() {
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("app-icon-gen command failed with status: {}", output.status);
    }
}

/// Path to the app-icon-gen binary, building it first if necessary.
fn binary_path() -> std::path::PathBuf {
    let debug_path = std::path::Path::new("target/debug/app-icon-gen");
    if debug_path.exists() {
        return debug_path.to_path_buf();
    }

    let build_output = Command::new("cargo")
        .args(["build", "--bin", "app-icon-gen"])
        .output()
        .expect("Failed to run cargo build");
    if !build_output.status.success() {
        panic!(
            "Failed to build app-icon-gen binary: {}",
            String::from_utf8_lossy(&build_output.stderr)
        );
    }

    debug_path.to_path_buf()
}
