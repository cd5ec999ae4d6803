use serde::Serialize;
use std::env;
use std::path::Path;
use vdisparity_horizon::config::horizon::load_config;
use vdisparity_horizon::image::io::{load_disparity_png, save_binary_mask, write_json_file};
use vdisparity_horizon::{EstimateReport, HorizonEstimator};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let disparity = load_disparity_png(&config.input)?;
    let params = config.estimator.resolve(&config.camera);
    let estimator = HorizonEstimator::new(params);
    let detail = estimator.estimate_detailed(&disparity);

    if let (Some(path), Some(mask)) = (&config.output.vdisparity_image, &detail.mask) {
        save_binary_mask(mask, path)?;
        println!("Saved v-disparity mask to {}", path.display());
    }

    let output = HorizonDemoOutput {
        input: config.input.display().to_string(),
        found: detail.result.is_ok(),
        report: detail.report,
    };
    write_json_file(&config.output.result_json, &output)?;

    println!("{}", output.report.summary());
    println!(
        "Saved result to {}",
        config.output.result_json.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: horizon_demo <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HorizonDemoOutput {
    input: String,
    found: bool,
    report: EstimateReport,
}
