//! `kaptcha` - Image CAPTCHA synthesis demo.
//!
//! SPDX-License-Identifier: AGPL-3.0-only
//!
//! Loads settings from the environment, sets up logging, renders a batch of
//! challenges and writes them to disk as PNG files.

use kaptcha::{Result, Settings};

use std::fs::{self, File};
use std::io::BufWriter;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn run(settings: &Settings) -> Result<()> {
    let producer = settings.producer()?;
    fs::create_dir_all(&settings.output_dir)?;

    for index in 0..settings.count {
        let captcha = producer.next_captcha()?;
        let path = settings.output_dir.join(format!("captcha_{index}.png"));
        let mut writer = BufWriter::new(File::create(&path)?);
        captcha.write_png(&mut writer)?;

        info!(
            path = %path.display(),
            answer = %captcha.answer(),
            width = captcha.width(),
            height = captcha.height(),
            "Captcha written"
        );
    }

    Ok(())
}

fn init_tracing(pretty: bool) -> WorkerGuard {
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(non_blocking);

    if pretty {
        subscriber.init();
    } else {
        subscriber.json().init();
    }
    guard
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env();
    let _guard = init_tracing(settings.as_ref().is_ok_and(Settings::pretty_logs));

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    info!(
        width = settings.width,
        height = settings.height,
        generator = ?settings.generator,
        interferers = ?settings.interferers,
        count = settings.count,
        log_format = %settings.log_format,
        output_dir = %settings.output_dir.display(),
        "Generator initialized"
    );

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Captcha generation failed");
            ExitCode::FAILURE
        }
    }
}
