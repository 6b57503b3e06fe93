use assert_fs::prelude::*;
use predicates::prelude::*;

const MONTHLY_CSV: &str = "\
bps_nama_kabupaten_kota,tahun,bulan,jumlah_curah_hujan,satuan
KOTA BANDUNG,2019,JANUARI,400,MM
KOTA BANDUNG,2019,FEBRUARI,600,MM
KOTA BANDUNG,2020,JANUARI,1000,MM
KOTA BANDUNG,2020,FEBRUARI,2000,MM
KABUPATEN BOGOR,2020,JANUARI,7777,MM
";

fn run_simulate(input: &str, output: &str, extra: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = assert_cmd::cargo_bin_cmd!("rainfall-forecasts");
    cmd.args(["simulate", "-i", input, "-o", output]);
    cmd.args(extra);
    cmd.assert()
}

#[test]
fn simulate_writes_report_and_prints_prediction() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("curah_hujan.csv");
    input.write_str(MONTHLY_CSV).unwrap();
    let output = temp.child("result.yaml");
    let output_arg = output.path().to_str().unwrap();

    run_simulate(input.path().to_str().unwrap(), output_arg, &["-n", "25"])
        .success()
        .stdout(predicate::str::contains("Rainfall Simulation Report"))
        .stdout(predicate::str::contains("Trials: 25"))
        .stdout(predicate::str::contains("2019 | 1,000.00 | 0.2500 | 0.2500 | 000 - 249"))
        .stdout(predicate::str::contains("2020 | 3,000.00 | 0.7500 | 1.0000 | 250 - 999"))
        .stdout(predicate::str::contains("Final prediction:"))
        .stdout(predicate::str::contains(format!(
            "Simulation result for 25 trials written to {output_arg}"
        )));

    let yaml = std::fs::read_to_string(output.path()).unwrap();
    assert!(yaml.contains("data_source: curah_hujan.csv"));
    assert!(yaml.contains("seed: 42"));
    assert!(yaml.contains("trial_count: 25"));
    assert!(yaml.contains("interval_table:"));
    assert!(yaml.contains("simulation_results:"));
    assert!(yaml.contains("final_prediction:"));
    assert!(yaml.contains("daily_average:"));
}

#[test]
fn simulate_is_reproducible_for_a_fixed_seed() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("curah_hujan.csv");
    input.write_str(MONTHLY_CSV).unwrap();
    let first = temp.child("first.json");
    let second = temp.child("second.json");
    let input_arg = input.path().to_str().unwrap();

    for output in [&first, &second] {
        run_simulate(
            input_arg,
            output.path().to_str().unwrap(),
            &["-n", "200", "--seed", "7", "--format", "json"],
        )
        .success();
    }

    let first = std::fs::read(first.path()).unwrap();
    let second = std::fs::read(second.path()).unwrap();
    assert_eq!(first, second);

    let value: serde_json::Value = serde_json::from_slice(&first).unwrap();
    assert_eq!(value["seed"], 7);
    assert_eq!(value["simulation_results"].as_array().unwrap().len(), 200);
}

#[test]
fn simulate_clamps_trial_count() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("curah_hujan.csv");
    input.write_str(MONTHLY_CSV).unwrap();
    let output = temp.child("result.yaml");
    let input_arg = input.path().to_str().unwrap();
    let output_arg = output.path().to_str().unwrap();

    run_simulate(input_arg, output_arg, &["-n", "5000"])
        .success()
        .stdout(predicate::str::contains("Trials: 1000"));
    run_simulate(input_arg, output_arg, &["-n", "-3"])
        .success()
        .stdout(predicate::str::contains("Trials: 1"));
}

#[test]
fn simulate_accepts_yearly_yaml_and_config() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("yearly.yaml");
    input
        .write_str("- year: 2019\n  total_rainfall: 1000\n- year: 2020\n  total_rainfall: 3000\n")
        .unwrap();
    let config = temp.child("forecast.yaml");
    config
        .write_str(&format!(
            "data_file: {}\nseed: 11\ndefault_trials: 30\n",
            input.path().display()
        ))
        .unwrap();
    let output = temp.child("result.yaml");

    let mut cmd = assert_cmd::cargo_bin_cmd!("rainfall-forecasts");
    cmd.args([
        "simulate",
        "-c",
        config.path().to_str().unwrap(),
        "-o",
        output.path().to_str().unwrap(),
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Seed: 11"))
        .stdout(predicate::str::contains("Trials: 30"))
        .stdout(predicate::str::contains("Data source: yearly.yaml"));
}

#[test]
fn simulate_rejects_dataset_with_missing_column() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("curah_hujan.csv");
    input
        .write_str("bps_nama_kabupaten_kota,tahun,jumlah_curah_hujan\nKOTA BANDUNG,2020,10\n")
        .unwrap();
    let output = temp.child("result.yaml");

    run_simulate(
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
        &[],
    )
    .failure()
    .code(1)
    .stderr(predicate::str::contains("missing required columns: bulan"));

    output.assert(predicate::path::missing());
}

#[test]
fn simulate_rejects_zero_total_rainfall() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("curah_hujan.csv");
    input
        .write_str(
            "bps_nama_kabupaten_kota,tahun,bulan,jumlah_curah_hujan\n\
             KOTA BANDUNG,2019,1,0\n\
             KOTA BANDUNG,2020,1,0\n",
        )
        .unwrap();
    let output = temp.child("result.yaml");

    run_simulate(
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
        &[],
    )
    .failure()
    .code(1)
    .stderr(predicate::str::contains("must be greater than zero"));

    output.assert(predicate::path::missing());
}

#[test]
fn simulate_reports_missing_data_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let output = temp.child("result.yaml");

    run_simulate(
        temp.path().join("nowhere.csv").to_str().unwrap(),
        output.path().to_str().unwrap(),
        &[],
    )
    .failure()
    .stderr(predicate::str::contains("data file not found"));
}

#[test]
fn simulate_reports_unknown_city() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("curah_hujan.csv");
    input.write_str(MONTHLY_CSV).unwrap();
    let output = temp.child("result.yaml");

    run_simulate(
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
        &["--city", "KOTA CIREBON"],
    )
    .failure()
    .stderr(predicate::str::contains("no rows for 'KOTA CIREBON'"));
}

#[test]
fn simulate_writes_no_result_when_histogram_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("yearly.yaml");
    input
        .write_str("- year: 2019\n  total_rainfall: 1000\n- year: 2020\n  total_rainfall: 3000\n")
        .unwrap();
    let output = temp.child("result.yaml");
    let histogram = temp.path().join("no_such_dir").join("histogram.png");

    run_simulate(
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
        &["--histogram", histogram.to_str().unwrap()],
    )
    .failure()
    .code(1)
    .stderr(predicate::str::contains("failed to render histogram"));

    output.assert(predicate::path::missing());
}

#[test]
fn simulate_rejects_infinite_yearly_total() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("yearly.yaml");
    input
        .write_str("- year: 2019\n  total_rainfall: 1000\n- year: 2020\n  total_rainfall: .inf\n")
        .unwrap();
    let output = temp.child("result.yaml");

    run_simulate(
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
        &[],
    )
    .failure()
    .code(1)
    .stderr(predicate::str::contains("year 2020 has a non-finite total rainfall"));

    output.assert(predicate::path::missing());
}
