/// Command-line behaviour of the `percolation-stats` binary.
use std::process::Command;

fn percolation_stats() -> Command {
    Command::new(env!("CARGO_BIN_EXE_percolation-stats"))
}

fn value_after<'a>(stdout: &'a str, prefix: &str) -> &'a str {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix(prefix))
        .unwrap_or_else(|| panic!("missing '{prefix}' in output:\n{stdout}"))
}

#[test]
fn test_prints_three_summary_lines() {
    let output = percolation_stats()
        .args(["1", "5", "--seed", "1"])
        .output()
        .expect("failed to run binary");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 3, "got:\n{stdout}");
    assert_eq!(value_after(&stdout, "mean = "), "1");
    assert_eq!(value_after(&stdout, "stddev = "), "0");
    assert_eq!(value_after(&stdout, "95% confidence interval = "), "[1, 1]");
}

#[test]
fn test_same_seed_same_output() {
    let run = || {
        percolation_stats()
            .args(["12", "20", "--seed", "99", "--strategy", "shuffled"])
            .output()
            .expect("failed to run binary")
    };
    let a = run();
    let b = run();
    assert!(a.status.success());
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn test_threads_do_not_change_result() {
    let run = |threads: &str| {
        percolation_stats()
            .args(["10", "16", "--seed", "5", "--threads", threads])
            .output()
            .expect("failed to run binary")
    };
    let sequential = run("1");
    let parallel = run("4");
    assert!(sequential.status.success());
    assert!(parallel.status.success());
    assert_eq!(sequential.stdout, parallel.stdout);
}

#[test]
fn test_render_writes_grid_to_stderr() {
    let output = percolation_stats()
        .args(["3", "2", "--seed", "8", "--render"])
        .output()
        .expect("failed to run binary");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let grid: Vec<&str> = stderr
        .lines()
        .filter(|l| l.chars().count() == 3 && l.chars().all(|c| "F□■".contains(c)))
        .collect();
    assert_eq!(grid.len(), 3, "stderr was:\n{stderr}");
    assert!(grid[0].contains('F'));
}

#[test]
fn test_rejects_bad_arguments() {
    for args in [
        vec!["0", "10"],
        vec!["10", "0"],
        vec!["abc", "10"],
        vec!["10"],
        vec!["10", "5", "--strategy", "bogus"],
    ] {
        let output = percolation_stats()
            .args(&args)
            .output()
            .expect("failed to run binary");
        assert!(!output.status.success(), "{args:?} should fail");
        assert!(!output.stderr.is_empty(), "{args:?} should explain the failure");
        assert!(output.stdout.is_empty());
    }
}
