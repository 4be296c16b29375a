//! `config` subcommand — show or update the driver configuration.
//!
//! Configuration is in-memory per driver instance; an update here shows
//! the dirty-flag flow, it does not persist anywhere.

use aorusled_lib::driver::capabilities;

use super::{ConfigOutput, Driver, Result, kv, kv_width};

pub(super) fn cmd_config(argb1: Option<String>, argb2: Option<String>, json: bool) -> Result<()> {
    let mut driver = Driver::new();

    if let (Some(argb1), Some(argb2)) = (argb1.as_deref(), argb2.as_deref()) {
        driver.set_led_counts(argb1, argb2);
        if !driver.is_dirty() {
            log::warn!("LED counts must be numeric; update discarded");
        }
    } else if argb1.is_some() || argb2.is_some() {
        log::warn!("both --argb1 and --argb2 are required to update; showing current config");
    }

    let config = driver.config();
    let caps = capabilities();

    if json {
        let output = ConfigOutput {
            settings: config,
            dirty: driver.is_dirty(),
            capabilities: caps,
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return Ok(());
    }

    let w = kv_width(&[
        "ARGB header 1",
        "ARGB header 2",
        "Dirty",
        "Push",
        "Pull",
        "Custom override",
    ]);
    kv("ARGB header 1", format!("{} LEDs", config.argb1_leds), w);
    kv("ARGB header 2", format!("{} LEDs", config.argb2_leds), w);
    kv("Dirty", driver.is_dirty(), w);
    kv("Push", caps.supports_push, w);
    kv("Pull", caps.supports_pull, w);
    kv("Custom override", caps.supports_custom_override, w);

    Ok(())
}
