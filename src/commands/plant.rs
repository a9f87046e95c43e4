//! Plant commands: add, water, list, watch, export

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use colored::Colorize;
use crossterm::tty::IsTty;
use crossterm::{cursor, queue, terminal::{Clear, ClearType}};

use sprout::card::PlantCard;
use sprout::config::Config;
use sprout::countdown::{self, describe_interval};
use sprout::error::{Result, SproutError};
use sprout::form::AddPlantForm;
use sprout::garden::EMPTY_MESSAGE;
use sprout::plant::Plant;

use crate::utils::{open_garden, print_notice, prompt_text, truncate_str};

/// Add a plant, prompting for whatever wasn't given on the command line
pub fn cmd_add(config: &Config, name: Option<String>, every: Option<String>) -> Result<()> {
    let mut garden = open_garden(config)?;
    let interactive = name.is_none() || every.is_none();
    let mut form = AddPlantForm::with_values(name.unwrap_or_default(), every.unwrap_or_default());

    loop {
        if interactive {
            form.name = prompt_text("Plant name:", &form.name, "e.g., Snake Plant")?;
            form.interval = prompt_text("Watering interval (days):", &form.interval, "e.g., 7")?;
        }

        let mut added = None;
        match form.submit(|name, interval| added = Some(garden.add(name, interval).cloned())) {
            Ok(notice) => {
                if let Some(result) = added {
                    let plant = result?;
                    print_notice(&notice);
                    println!("  Name: {}", plant.name);
                    println!("  {}", describe_interval(plant.interval));
                    println!("  Id: {}", plant.id.dimmed());
                }
                return Ok(());
            }
            // The form keeps its text, so the next prompt starts from it
            Err(e) if interactive => eprintln!("{} {}", "✗".red(), e),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Mark a plant as watered
pub fn cmd_water(config: &Config, id_or_name: &str) -> Result<()> {
    let mut garden = open_garden(config)?;
    let plant = garden.find(id_or_name)?.clone();
    let since = countdown::days_since_watered(plant.last_watered, Utc::now());

    let card = PlantCard::mount(&plant, config.refresh_interval(), Utc::now(), Instant::now());
    let mut outcome = Ok(false);
    let notice = card.water(|id| outcome = garden.water(id));
    outcome?;
    print_notice(&notice);
    println!("  Previously watered {} day(s) ago", since);

    let watered = garden.find(&plant.id)?;
    let next = countdown::next_watering(watered.last_watered, watered.interval);
    let local_time: chrono::DateTime<chrono::Local> = next.into();
    println!("  Next watering: {}", local_time.format("%Y-%m-%d %H:%M"));

    Ok(())
}

/// List all plants with their current countdown
pub fn cmd_list(config: &Config, json: bool) -> Result<()> {
    let garden = open_garden(config)?;
    let now = Utc::now();
    let view = garden.view(now);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.is_empty {
        println!("\n{}", EMPTY_MESSAGE);
        println!("Add one with: sprout add \"Snake Plant\" --every 7");
        return Ok(());
    }

    let due = view.plants.iter().filter(|p| p.needs_water).count();
    println!("\nPlants ({}, {} due):\n", view.plants.len(), due);
    for plant in garden.plants() {
        println!("  {}", plant_line(plant, now));
    }
    println!();

    Ok(())
}

fn plant_line(plant: &Plant, now: chrono::DateTime<Utc>) -> String {
    let c = countdown::countdown(plant.last_watered, plant.interval, now);
    let status = countdown::status_line(&c);
    let status = if c.is_due() { status.red().bold() } else { status.green() };
    let marker = if c.is_due() { "●".red() } else { "●".green() };
    format!(
        "{} {:<24} {:<22} {}",
        marker,
        truncate_str(&plant.name, 24),
        describe_interval(plant.interval).dimmed(),
        status,
    )
}

/// Live countdown, redrawn in place on every refresh until Ctrl+C
pub fn cmd_watch(config: &Config, plant: Option<String>) -> Result<()> {
    let garden = open_garden(config)?;
    let plants: Vec<Plant> = match plant {
        Some(id_or_name) => vec![garden.find(&id_or_name)?.clone()],
        None => garden.plants().to_vec(),
    };

    if plants.is_empty() {
        println!("\n{}", EMPTY_MESSAGE);
        return Ok(());
    }

    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
        .map_err(|e| SproutError::IoError(std::io::Error::other(e.to_string())))?;

    let period = config.refresh_interval();
    let mut cards: Vec<PlantCard> = plants
        .iter()
        .map(|p| PlantCard::mount(p, period, Utc::now(), Instant::now()))
        .collect();

    // Redraw in place only on a terminal; piped output gets one block per refresh
    let in_place = std::io::stdout().is_tty();

    println!("\nWatching {} plant(s). Press Ctrl+C to stop.\n", cards.len());
    draw_cards(&mut std::io::stdout().lock(), &cards, false)?;

    while running.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(100));
        let (now, at) = (Utc::now(), Instant::now());
        let mut refreshed = false;
        for card in cards.iter_mut() {
            refreshed |= card.tick(now, at);
        }
        if refreshed {
            let mut out = std::io::stdout().lock();
            if !in_place {
                writeln!(out)?;
            }
            draw_cards(&mut out, &cards, in_place)?;
        }
    }

    for card in cards.iter_mut() {
        card.unmount();
    }
    println!();
    Ok(())
}

/// Write one line per card. With `overwrite`, first move back up over the
/// previous frame and clear each line before writing it.
fn draw_cards<W: Write>(out: &mut W, cards: &[PlantCard], overwrite: bool) -> Result<()> {
    if overwrite && !cards.is_empty() {
        queue!(out, cursor::MoveUp(cards.len() as u16))?;
    }
    for card in cards {
        if overwrite {
            queue!(out, Clear(ClearType::CurrentLine))?;
        }
        let status = card.status_line();
        let status = if card.needs_water() { status.red().bold() } else { status.green() };
        writeln!(out, "  {:<24} {}", truncate_str(&card.plant().name, 24), status)?;
    }
    out.flush()?;
    Ok(())
}

/// Print the stored list exactly as persisted
pub fn cmd_export(config: &Config) -> Result<()> {
    let garden = open_garden(config)?;
    let raw = garden.repository().raw()?.unwrap_or_else(|| "[]".to_string());
    println!("{}", raw);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::num::NonZeroU32;

    fn cards() -> Vec<PlantCard> {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let fern = Plant {
            id: "p1".to_string(),
            name: "Fern".to_string(),
            interval: NonZeroU32::new(3).unwrap(),
            last_watered: t0,
        };
        vec![PlantCard::mount(&fern, Duration::from_secs(1), t0, Instant::now())]
    }

    #[test]
    fn test_plain_draw_has_no_cursor_control() {
        let mut out = Vec::new();
        draw_cards(&mut out, &cards(), false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Fern"));
        assert!(!text.contains("\x1b[1A"));
        assert!(!text.contains("\x1b[2K"));
    }

    #[test]
    fn test_overwrite_moves_up_and_clears() {
        let mut out = Vec::new();
        draw_cards(&mut out, &cards(), true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1b[1A"));
        assert!(text.contains("\x1b[2K"));
        assert!(text.contains("Fern"));
    }
}
