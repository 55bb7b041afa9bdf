use emucheck_core::{EmulatorDetector, Evaluation, SignalCategory};

pub struct CheckCommandConfig<'a> {
    pub fixture_path: Option<&'a str>,
    pub probe_config_path: Option<&'a str>,
    pub policy_path: Option<&'a str>,
    pub threshold: Option<u32>,
    pub json: bool,
    pub output_path: Option<&'a str>,
}

pub fn run(cfg: CheckCommandConfig<'_>) {
    let policy = super::load_policy(cfg.policy_path, cfg.threshold);
    let probe = super::make_probe(cfg.fixture_path, cfg.probe_config_path);

    let detector = match EmulatorDetector::new(policy) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Failed to load scoring policy: {e}");
            std::process::exit(1);
        }
    };
    let eval = match detector.check(probe.as_ref()) {
        Ok(eval) => eval,
        Err(e) => {
            eprintln!("Check failed: {e}");
            std::process::exit(1);
        }
    };

    let json = if cfg.json || cfg.output_path.is_some() {
        match eval.report.to_json() {
            Ok(j) => Some(j),
            Err(e) => {
                eprintln!("Failed to serialize report: {e}");
                std::process::exit(1);
            }
        }
    } else {
        None
    };

    match (&json, cfg.json) {
        (Some(j), true) => println!("{j}"),
        _ => print_summary(&eval),
    }

    if let (Some(path), Some(j)) = (cfg.output_path, &json) {
        if let Err(e) = write_report(path, j) {
            eprintln!("Failed to write report to {path}: {e}");
            std::process::exit(1);
        }
        if !cfg.json {
            println!("\nReport saved to: {path}");
        }
    }

    std::process::exit(exit_code(&eval));
}

fn write_report(path: &str, json: &str) -> std::io::Result<()> {
    std::fs::write(path, json)
}

fn print_summary(eval: &Evaluation) {
    println!("{}", eval.report.render_text());
    println!();
    println!(
        "Signals read: {}/{}",
        eval.report.evaluated_categories().len(),
        SignalCategory::ALL.len()
    );
    if eval.is_emulator {
        println!("Verdict: EMULATOR");
    } else {
        println!("Verdict: real hardware");
    }
}

fn exit_code(eval: &Evaluation) -> i32 {
    if eval.is_emulator {
        super::EMULATOR_EXIT_CODE
    } else {
        0
    }
}
