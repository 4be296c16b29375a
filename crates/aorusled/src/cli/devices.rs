//! `devices` subcommand — list HID candidates for the controller.

use aorusled_lib::device;

use super::{DevicesOutput, Result};

pub(super) fn cmd_devices(json: bool) -> Result<()> {
    let devices = device::list_candidates();

    if json {
        let output = DevicesOutput {
            count: devices.len(),
            devices,
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return Ok(());
    }

    if devices.is_empty() {
        println!("No IT8297 controllers found.");
        return Ok(());
    }

    println!(
        "Found {} IT8297 interface{}:",
        devices.len(),
        if devices.len() == 1 { "" } else { "s" }
    );
    println!();

    for (i, dev) in devices.iter().enumerate() {
        println!("  [{}] {}", i + 1, dev.path);
        println!(
            "      VID/PID: {:04X}:{:04X}",
            dev.vendor_id, dev.product_id
        );
        if let Some(ref product) = dev.product {
            println!("      Product: {product}");
        }
    }

    Ok(())
}
