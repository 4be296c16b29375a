//! `probe` subcommand — run a discovery pass and print the result.

use aorusled_lib::profiles::Addressing;

use super::{Driver, ProbeOutput, Result, ZoneJson, kv, kv_width};

fn mode_name(addressing: Addressing) -> &'static str {
    match addressing {
        Addressing::Single(_) => "single",
        Addressing::Composite(_) => "composite",
        Addressing::Strip(_) => "strip",
    }
}

pub(super) fn cmd_probe(json: bool) -> Result<()> {
    let mut driver = Driver::new();
    driver.rescan()?;

    let Some(identity) = driver.identity() else {
        println!("No IT8297 controller found.");
        return Ok(());
    };
    let layout = driver.layout().expect("layout set whenever identity is");

    let zones: Vec<ZoneJson> = driver
        .zones()
        .iter()
        .enumerate()
        .map(|(index, z)| ZoneJson {
            index,
            name: z.name.clone(),
            mode: mode_name(z.addressing).into(),
            channel_order: z.channel_order.to_string(),
            leds: z.slots.len(),
        })
        .collect();

    if json {
        let output = ProbeOutput {
            name: driver.name().into(),
            chip_product_name: identity.product_name.clone(),
            firmware: identity.firmware(),
            chip_id: identity.chip_id,
            led_count: identity.led_count().to_string(),
            layout: layout.to_string(),
            zones,
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return Ok(());
    }

    let w = kv_width(&["Board", "Chip name", "Firmware", "Chip id", "Max LEDs", "Layout"]);
    kv("Board", driver.name(), w);
    kv("Chip name", &identity.product_name, w);
    kv("Firmware", identity.firmware(), w);
    kv("Chip id", format!("0x{:08X}", identity.chip_id), w);
    kv("Max LEDs", identity.led_count(), w);
    kv("Layout", layout, w);
    println!();

    println!("Zones:");
    for z in &zones {
        println!(
            "  [{}] {} — {} ({}, {} LED{})",
            z.index,
            z.name,
            z.mode,
            z.channel_order,
            z.leds,
            if z.leds == 1 { "" } else { "s" }
        );
    }

    Ok(())
}
