//! `set` subcommand — color one zone and push it.

use aorusled_lib::color::{format_color, parse_color};

use super::{Driver, Result};

pub(super) fn cmd_set(zone_index: usize, color: &str, slot: Option<usize>) -> Result<()> {
    let color = parse_color(color)?;

    let mut driver = Driver::new();
    driver.rescan()?;

    if !driver.is_connected() {
        println!("No IT8297 controller found.");
        return Ok(());
    }

    let Some(zone) = driver.zone_mut(zone_index) else {
        println!(
            "No zone {zone_index} on this board (run `aorusled probe` for the zone list)."
        );
        return Ok(());
    };
    let name = zone.name.clone();

    match slot {
        Some(slot) => zone.set_color(slot, color),
        None => zone.fill(color),
    }
    driver.push(zone_index)?;

    match slot {
        Some(slot) => println!("{name} slot {slot} set to {}", format_color(color)),
        None => println!("{name} set to {}", format_color(color)),
    }
    Ok(())
}
