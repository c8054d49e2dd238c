#![allow(clippy::exit, clippy::unwrap_used)]

const ASSETS: &[&str] = &[
    "assets/car.bmp",
    "assets/sedan.bmp",
    "assets/coupe.bmp",
    "assets/shield.bmp",
    "assets/background.bmp",
    "assets/start_screen.bmp",
    "assets/game_over.bmp",
];

fn main() {
    if std::env::var("PROFILE").unwrap_or_default() == "release" {
        println!("cargo:rustc-env=DEFMT_LOG=off");
    }

    // Sprites are baked in with include_bytes!.
    for asset in ASSETS {
        println!("cargo:rerun-if-changed={asset}");
    }

    linker_hints();
    println!("cargo:rustc-link-arg=-Tdefmt.x");
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}

/// Re-invoked by the linker on errors; prints a hint for the usual suspects.
fn linker_hints() {
    let mut args = std::env::args().skip(1);
    let Some(kind) = args.next() else {
        println!(
            "cargo:rustc-link-arg=-Wl,--error-handling-script={}",
            std::env::current_exe().unwrap().display()
        );
        return;
    };

    if kind != "undefined-symbol" {
        std::process::exit(1);
    }

    let hint = match args.next().as_deref() {
        Some("_defmt_timestamp") => Some("`defmt` not found: is `defmt.x` passed to the linker and `esp_println` linked in?"),
        Some("_stack_start") => Some("Is the linker script `linkall.x` missing?"),
        Some("esp_rtos_initialized" | "esp_rtos_yield_task" | "esp_rtos_task_create") => {
            Some("No scheduler: call `esp_rtos::start` before spawning tasks.")
        }
        _ => None,
    };
    if let Some(hint) = hint {
        eprintln!();
        eprintln!("💡 {hint}");
        eprintln!();
    }
    std::process::exit(0);
}
