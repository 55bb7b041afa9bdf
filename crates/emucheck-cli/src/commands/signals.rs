use emucheck_core::{Reliability, SignalCategory};

pub fn run() {
    println!(
        "emucheck evaluates {} signal(s), in this order:\n",
        SignalCategory::ALL.len()
    );
    for category in SignalCategory::ALL {
        let info = category.info();
        let marker = match info.reliability {
            Reliability::Normal => " ",
            Reliability::Low => "~",
        };
        println!("  {marker} {:<14} {}", info.name, info.description);
        println!("    {:<14} from {}", "", info.origin);
    }
    println!("\n  ~ low confidence: many real devices lack this feature too");
}
