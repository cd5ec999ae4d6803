mod common;

use common::synthetic_disparity::{add_clutter, bin_angle, road_bin, road_disparity};
use vdisparity_horizon::diagnostics::CandidateOutcome;
use vdisparity_horizon::image::{DisparityImage, DisparityMap};
use vdisparity_horizon::{EstimateError, EstimatorParams, HorizonEstimator};

const CY: f32 = 384.0;
const BASELINE: f32 = 0.8;
const FOCAL: f32 = 704.7082;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn implied_pitch(rho: f32, theta: f32) -> f32 {
    let horizon = rho / theta.sin();
    -((CY - horizon) / FOCAL).atan()
}

fn estimator(max_dis: usize) -> HorizonEstimator {
    HorizonEstimator::new(EstimatorParams::new(CY, BASELINE, FOCAL, max_dis))
}

#[test]
fn recovers_pitch_of_synthetic_road_line() {
    init_logger();
    let (rows, cols, max_dis) = (768usize, 120usize, 64usize);
    let (rho, theta) = (40.0f32, bin_angle(174));
    let data = road_disparity(rows, cols, cols, rho, theta, max_dis);

    let est = estimator(max_dis)
        .compute(&data, rows, cols)
        .expect("road line should be found");

    let expected = implied_pitch(rho, theta);
    assert!(
        (est.pitch - expected).abs() < 1e-3,
        "pitch={} expected={}",
        est.pitch,
        expected
    );
    assert!((est.theta - theta).abs() < 1e-5, "theta={}", est.theta);
    assert!((est.rho - rho).abs() < 1e-3, "rho={}", est.rho);
    assert_eq!(est.horizon_row, (rho / theta.sin()).ceil() as i32);
    assert!(est.horizon_row >= 0 && est.horizon_row <= rows as i32);
    assert!(est.slope > 0.0);
    assert!(est.camera_height.is_finite() && est.camera_height > 0.0);
}

#[test]
fn cluttered_scene_with_horizon_near_center_has_level_pitch() {
    init_logger();
    let (rows, cols, road_cols, max_dis) = (768usize, 200usize, 160usize, 64usize);
    let (rho, theta) = (40.0f32, bin_angle(174));
    let mut data = road_disparity(rows, cols, road_cols, rho, theta, max_dis);
    add_clutter(&mut data, rows, cols, road_cols, max_dis, 7);

    let est = estimator(max_dis)
        .compute(&data, rows, cols)
        .expect("road line should survive clutter");

    assert!(est.pitch.abs() < 0.01, "pitch={}", est.pitch);
    assert!(
        (est.horizon_point - CY).abs() < 5.0,
        "horizon_point={}",
        est.horizon_point
    );
    assert!((est.pitch - implied_pitch(rho, theta)).abs() < 1e-3);
}

#[test]
fn horizon_above_center_means_camera_looks_down() {
    let (rows, cols, max_dis) = (600usize, 80usize, 96usize);
    let (rho, theta) = (35.0f32, bin_angle(170));
    let data = road_disparity(rows, cols, cols, rho, theta, max_dis);

    let est = estimator(max_dis)
        .compute(&data, rows, cols)
        .expect("road line should be found");
    assert!(est.pitch < 0.0, "pitch={}", est.pitch);
    assert!((est.pitch - implied_pitch(rho, theta)).abs() < 1e-3);
    assert!(est.horizon_row > 150 && est.horizon_row < 250);
}

#[test]
fn receding_disparity_scene_places_horizon_below_last_row() {
    init_logger();
    // Disparity shrinks towards the bottom of the image, so the fitted line
    // meets zero disparity far below the image. Only the pitch gates
    // acceptance, hence the horizon row is allowed to exceed `rows`.
    let (rows, cols, max_dis) = (400usize, 50usize, 50usize);
    let focal = 704.7f32;
    let mut data = vec![0.0f32; rows * cols];
    for i in 0..=350 {
        let d = 40.0 - i as f32 * 0.05;
        data[i * cols..i * cols + 30].fill(d);
    }
    let image = DisparityImage::from_vec(cols, rows, data).expect("image");
    let estimator = HorizonEstimator::new(EstimatorParams::new(CY, BASELINE, focal, max_dis));

    let est = estimator
        .estimate(&image.as_map())
        .expect("pitch of the receding line is within bounds");

    assert!((est.theta - bin_angle(3)).abs() < 1e-5, "theta={}", est.theta);
    assert!((est.rho - 40.0).abs() < 1.5, "rho={}", est.rho);
    assert_eq!(est.horizon_row, est.horizon_point.ceil() as i32);
    assert!(
        est.horizon_row > rows as i32 && (700..=800).contains(&est.horizon_row),
        "horizon_row={}",
        est.horizon_row
    );
    let expected_pitch = -((CY - est.horizon_point) / focal).atan();
    assert!((est.pitch - expected_pitch).abs() < 1e-4);
    assert!(est.pitch > 0.45 && est.pitch < 0.52, "pitch={}", est.pitch);
    assert!(estimator.params().pitch_in_range(est.pitch));
    assert!(est.slope < 0.0, "slope={}", est.slope);
    assert!(est.camera_height < 0.0);
    assert!(!est.height_within_bounds);
}

#[test]
fn repeated_calls_are_identical() {
    let (rows, cols, max_dis) = (768usize, 64usize, 64usize);
    let data = road_disparity(rows, cols, cols, 40.0, bin_angle(174), max_dis);
    let estimator = estimator(max_dis);
    let first = estimator.compute(&data, rows, cols);
    let second = estimator.compute(&data, rows, cols);
    assert!(first.is_ok());
    assert_eq!(first, second);
}

#[test]
fn one_estimator_can_serve_several_threads() {
    let (rows, cols, max_dis) = (768usize, 64usize, 64usize);
    let data = road_disparity(rows, cols, cols, 40.0, bin_angle(174), max_dis);
    let estimator = estimator(max_dis);
    let reference = estimator.compute(&data, rows, cols).expect("estimate");

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| estimator.compute(&data, rows, cols)))
            .collect();
        for handle in handles {
            let result = handle.join().expect("worker panicked");
            assert_eq!(result.as_ref(), Ok(&reference));
        }
    });
}

#[test]
fn all_invalid_map_fails_without_signal() {
    let data = vec![0.0f32; 400 * 50];
    assert_eq!(
        estimator(50).compute(&data, 400, 50),
        Err(EstimateError::NoSignal)
    );
}

#[test]
fn single_disparity_bin_fails_cleanly() {
    let (rows, cols) = (400usize, 50usize);
    let data = road_disparity(rows, cols, cols, 40.0, bin_angle(174), 64);
    let result = estimator(1).compute(&data, rows, cols);
    assert!(matches!(
        result,
        Err(EstimateError::InsufficientResolution { max_dis: 1 })
    ));
}

#[test]
fn too_few_road_rows_yield_no_line() {
    let (rows, cols, max_dis) = (400usize, 50usize, 50usize);
    let mut data = vec![0.0f32; rows * cols];
    for y in 390..400 {
        for x in 0..cols {
            data[y * cols + x] = (y - 380) as f32 + 0.5;
        }
    }
    let result = estimator(max_dis).compute(&data, rows, cols);
    assert!(
        matches!(
            result,
            Err(EstimateError::NoPlausibleLine { candidates: 0, .. })
        ),
        "{result:?}"
    );
}

#[test]
fn unreachable_pitch_range_rejects_every_line() {
    let (rows, cols, max_dis) = (768usize, 64usize, 64usize);
    let data = road_disparity(rows, cols, cols, 40.0, bin_angle(174), max_dis);
    // |rho| / sin(theta) is never negative, so the pitch never drops below
    // -atan(cy / focal) (about -28.6 deg here).
    let estimator = HorizonEstimator::new(
        EstimatorParams::new(CY, BASELINE, FOCAL, max_dis).with_pitch_range_deg(-50.0, -40.0),
    );
    let map = DisparityMap::from_slice(&data, rows, cols).expect("map");
    let detail = estimator.estimate_detailed(&map);

    match detail.result {
        Err(EstimateError::NoPlausibleLine {
            candidates,
            rejected,
            ..
        }) => {
            assert!(candidates > 0);
            assert!(rejected > 0);
        }
        other => panic!("unexpected result {other:?}"),
    }
    let stage = detail.report.line_search.expect("line search ran");
    assert!(stage.accepted_index.is_none());
    assert!(stage
        .samples
        .iter()
        .all(|s| s.outcome != CandidateOutcome::Accepted));
    assert!(detail.report.error.is_some());
}

#[test]
fn detailed_estimate_reports_every_stage() {
    let (rows, cols, max_dis) = (768usize, 64usize, 48usize);
    let (rho, theta) = (40.0f32, bin_angle(174));
    let mut data = road_disparity(rows, cols, cols, rho, theta, 64);
    // a few matches far beyond the histogram width
    data[0] = 90.0;
    data[1] = 200.0;
    let map = DisparityMap::from_slice(&data, rows, cols).expect("map");

    let detail = estimator(max_dis).estimate_detailed(&map);
    let mask = detail.mask.as_ref().expect("mask");
    assert_eq!((mask.w, mask.h), (max_dis, rows));

    let hist = detail.report.histogram.as_ref().expect("histogram stage");
    assert_eq!(hist.valid_pixels, map.valid_count());
    assert!(hist.clamped_pixels >= 2);
    assert!(hist.on_cells > 0);

    let road_rows = (0..rows)
        .filter(|&y| road_bin(y, rho, theta, max_dis).is_some())
        .count();
    assert!(road_rows > 25);

    for label in ["histogram", "binarize", "hough", "select"] {
        assert!(
            detail.report.timings.stage_ms(label).is_some(),
            "missing timing {label}"
        );
    }
    if let Ok(est) = &detail.result {
        assert_eq!(detail.report.estimate.as_ref(), Some(est));
        assert!(!detail.report.summary().is_empty());
    }
}
