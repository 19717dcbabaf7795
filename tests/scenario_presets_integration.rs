use std::process::Command;

#[derive(Debug)]
struct Savings {
    monthly: f64,
    percent: f64,
}

#[test]
fn scenario_files_run_via_cli_and_report_distinct_savings() {
    let baseline = run_and_parse_savings(&["--scenario", "scenarios/baseline.toml"]);
    let power_module = run_and_parse_savings(&["--scenario", "scenarios/power_module.toml"]);
    let light_load = run_and_parse_savings(&["--scenario", "scenarios/light_load.toml"]);

    assert!(
        baseline.monthly > 0.0,
        "expected the baseline hybrid to save money: {baseline:?}"
    );
    assert!(
        (baseline.monthly - power_module.monthly).abs() > 1.0,
        "expected baseline and power_module savings to differ: baseline={:.2}, power_module={:.2}",
        baseline.monthly,
        power_module.monthly
    );
    assert!(
        (baseline.percent - light_load.percent).abs() > 0.1,
        "expected baseline and light_load percentages to differ: baseline={:.1}, light_load={:.1}",
        baseline.percent,
        light_load.percent
    );
}

#[test]
fn scenario_file_matches_its_preset() {
    let from_file = run_and_parse_savings(&["--scenario", "scenarios/light_load.toml"]);
    let from_preset = run_and_parse_savings(&["--preset", "light_load"]);
    assert!((from_file.monthly - from_preset.monthly).abs() < 0.01);
}

#[test]
fn replacement_catalog_is_accepted() {
    let savings = run_and_parse_savings(&[
        "--reference",
        "scenarios/reference.toml",
        "--scenario",
        "scenarios/baseline.toml",
    ]);
    assert!(savings.monthly.is_finite());
}

#[test]
fn report_out_writes_csv() {
    let path = std::env::temp_dir().join(format!("eboss-sizer-{}.csv", std::process::id()));
    let path_str = path.to_string_lossy().to_string();
    run_and_parse_savings(&["--preset", "baseline", "--report-out", &path_str]);

    let content = std::fs::read_to_string(&path).expect("CSV should be written");
    let _ = std::fs::remove_file(&path);
    assert_eq!(content.lines().count(), 5);
}

#[test]
fn unknown_preset_fails_with_nonzero_exit() {
    let output = Command::new(env!("CARGO_BIN_EXE_eboss-sizer"))
        .args(["--preset", "nope"])
        .output()
        .expect("eboss-sizer process should run");
    assert!(!output.status.success());
}

fn run_and_parse_savings(args: &[&str]) -> Savings {
    let output = Command::new(env!("CARGO_BIN_EXE_eboss-sizer"))
        .args(args)
        .output()
        .expect("eboss-sizer process should run");

    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={} ",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    parse_savings(&stdout)
}

fn parse_savings(stdout: &str) -> Savings {
    let label = "Monthly savings:";
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing line `{label}` in output: {stdout}"));

    // "Monthly savings:       $2158.12 (20.7%)"
    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid savings format for line `{line}`"));
    let (amount, percent) = raw
        .split_once(' ')
        .unwrap_or_else(|| panic!("invalid savings format for line `{line}`"));

    let monthly = amount
        .trim_start_matches('$')
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{amount}` from line `{line}`"));
    let percent = percent
        .trim_matches(|c| c == '(' || c == ')' || c == '%')
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{percent}` from line `{line}`"));

    Savings { monthly, percent }
}
