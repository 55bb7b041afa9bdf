use emucheck_core::check_root;

pub fn run(fixture: Option<&str>, probe_config: Option<&str>) {
    let probe = super::make_probe(fixture, probe_config);
    let status = check_root(probe.as_ref());
    println!("Root: {status}");
}
