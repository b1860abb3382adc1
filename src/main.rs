//! pinconfirm - PIN confirmation screen
//!
//! Opens the "confirm your PIN" screen in the terminal against a simulated key
//! backup service.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use pinconfirm::config::{KeyboardSetting, ScreenConfig};
use pinconfirm::render::ColorTheme;
use pinconfirm::{
    ConfirmScreenFactory, PinBackupService, PinValue, ScreenOutcome, SimulatedBackupService,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let matches = Command::new("pinconfirm")
        .version(pinconfirm::VERSION)
        .about("Confirm a newly chosen PIN before it is sent to the key backup service")
        .long_about(
            "pinconfirm shows the PIN confirmation screen: re-enter the PIN chosen on the \
             previous step, and once it matches it is handed to a (simulated) key backup service.",
        )
        .arg(
            Arg::new("pin")
                .long("pin")
                .value_name("PIN")
                .help("The PIN chosen on the previous screen")
                .required(true),
        )
        .arg(
            Arg::new("keyboard")
                .long("keyboard")
                .value_name("MODE")
                .help("Initial keyboard: numeric or alphanumeric"),
        )
        .arg(
            Arg::new("latency-ms")
                .long("latency-ms")
                .value_name("MS")
                .value_parser(clap::value_parser!(u64))
                .help("Simulated backup service latency"),
        )
        .arg(
            Arg::new("fail")
                .long("fail")
                .action(ArgAction::SetTrue)
                .help("Make the simulated backup service report failure"),
        )
        .arg(
            Arg::new("animation-ms")
                .long("animation-ms")
                .value_name("MS")
                .value_parser(clap::value_parser!(u64))
                .help("Length of the success/failure animation"),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("NAME")
                .help("Color theme: default, monochrome or high-contrast"),
        )
        .get_matches();

    let mut config = ScreenConfig::load().context("loading configuration")?;
    if let Some(keyboard) = matches.get_one::<String>("keyboard") {
        config.keyboard = KeyboardSetting::parse(keyboard)?;
    }
    if let Some(latency) = matches.get_one::<u64>("latency-ms") {
        config.backup.latency_ms = *latency;
    }
    if matches.get_flag("fail") {
        config.backup.fail = true;
    }
    if let Some(animation) = matches.get_one::<u64>("animation-ms") {
        config.animation_ms = *animation;
    }
    if let Some(theme) = matches.get_one::<String>("theme") {
        config.theme = theme.clone();
    }
    config.validate()?;

    let raw_pin = matches.get_one::<String>("pin").context("--pin is required")?;
    let pin = PinValue::parse(raw_pin);
    if !pin.meets_minimum_length() {
        anyhow::bail!("PIN must be at least {} characters", PinValue::MINIMUM_LENGTH);
    }

    let backup = Arc::new(SimulatedBackupService::new(
        config.backup.latency(),
        config.backup.outcome(),
    ));
    let factory = ConfirmScreenFactory::new(
        pin,
        config.keyboard_mode(),
        Arc::clone(&backup) as Arc<dyn PinBackupService>,
    );
    let theme = ColorTheme::from_name(&config.theme)?;

    let outcome = pinconfirm::app::run_terminal_screen(&factory, theme, config.animation()).await?;

    match outcome {
        ScreenOutcome::PinCreated => {
            let keyboard = backup
                .stored()
                .map(|stored| stored.keyboard_mode.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            println!("PIN created ({keyboard} keyboard).");
        }
        ScreenOutcome::Cancelled => println!("PIN confirmation cancelled."),
    }

    Ok(())
}
