pub fn run(path: Option<&str>) {
    let policy = super::load_policy(path, None);
    match policy.to_json() {
        Ok(json) => {
            println!("{json}");
            eprintln!("max achievable score: {}", policy.max_score());
        }
        Err(e) => {
            eprintln!("Failed to serialize policy: {e}");
            std::process::exit(1);
        }
    }
}
