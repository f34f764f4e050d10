/* This file is part of the VidGrab project
*
*  Copyright (C) 2025 The VidGrab Contributors
*  
*  This program is free software: you can redistribute it and/or modify
*  it under the terms of the GNU Affero General Public License as published by
*  the Free Software Foundation, either version 3 of the License, or
*  (at your option) any later version.
*
*  This program is distributed in the hope that it will be useful,
*  but WITHOUT ANY WARRANTY; without even the implied warranty of
*  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
*  GNU Affero General Public License for more details.
*
*  You should have received a copy of the GNU Affero General Public License
*  along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use std::{cell::Cell, path::PathBuf, process::ExitCode, rc::Rc};

use anyhow::{bail, Context};
use clap::Parser;
use env_logger::Env;
use log::info;
use tokio::{sync::Notify, task::LocalSet};
use vidgrab_client::{
    constants::DEFAULT_FILENAME, messages::{DOWNLOAD_FAILED, FILE_FETCH_FAILED}, HttpBackend, JobController, JobStatus, Phase, TokioRuntime,
    ViewState,
};

mod config;
mod sink;

use sink::DirFileSink;

type Controller = JobController<HttpBackend, TokioRuntime>;

/// Downloads videos through a VidGrab server
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Page URL of the video
    #[arg(required_unless_present = "health")]
    url: Option<String>,
    /// Quality selector, one of best, 1080p, 720p, 480p, 360p or audio
    #[arg(short, long, default_value = "best")]
    quality: String,
    /// Directory to save the file in
    #[arg(short, long, default_value = ".")]
    output: PathBuf,
    /// Config file, created with defaults if missing
    #[arg(short, long, default_value = config::CONFIG_PATH)]
    config: PathBuf,
    /// Overrides the API base URL from the config file
    #[arg(long)]
    api_base: Option<String>,
    /// Overrides the API key from the config file
    #[arg(long, env = "VIDGRAB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Only print the video's metadata
    #[arg(long)]
    info_only: bool,
    /// Only check whether the server is up
    #[arg(long, conflicts_with = "url")]
    health: bool,
}

/// Prints progress lines, skipping notifications that didn't change what's shown
#[derive(Default)]
struct ProgressPrinter {
    last: Cell<Option<(JobStatus, i64)>>,
}

impl ProgressPrinter {
    fn show(&self, view: &ViewState) {
        let Some(ref progress) = view.progress else { return };
        let current = Some((progress.status, progress.percent));
        if self.last.replace(current) == current {
            return;
        }
        eprintln!("{:>11} {:>3}%  speed: {}  eta: {}", progress.status_label, progress.percent, progress.speed, progress.eta);
    }
}

fn report_failure(view: &ViewState) -> ExitCode {
    eprintln!("Error: {}", view.error.as_deref().unwrap_or(DOWNLOAD_FAILED));
    ExitCode::FAILURE
}

async fn run(args: Args, controller: Controller) -> anyhow::Result<ExitCode> {
    if args.health {
        let health = controller.check_health().await.context("Health check failed")?;
        println!("Server {} is {}", health.version, health.status);
        return Ok(ExitCode::SUCCESS);
    }
    let Some(url) = args.url else {
        bail!("A video URL is required");
    };

    controller.analyze(&url).await;
    let view = controller.view();
    let Some(metadata) = view.metadata.as_ref().filter(|_| view.phase == Phase::Ready) else {
        return Ok(report_failure(&view));
    };
    println!("{}", metadata.title);
    println!("  by {} ({})", metadata.uploader, metadata.duration_label);
    if args.info_only {
        for option in view.quality_options {
            println!("  {:<8} {}", option.selector_value, option.quality_label);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let finished = Rc::new(Notify::new());
    let printer = ProgressPrinter::default();
    let subscription = {
        let finished = finished.clone();
        controller.subscribe(move |view| {
            printer.show(view);
            if matches!(view.phase, Phase::Completed | Phase::Failed) {
                finished.notify_one();
            }
        })
    };
    controller.start_download(&args.quality).await;
    if controller.phase() == Phase::Downloading {
        finished.notified().await;
    }
    controller.unsubscribe(subscription);

    let view = controller.view();
    if view.phase != Phase::Completed {
        return Ok(report_failure(&view));
    }
    let sink = DirFileSink::new(&args.output);
    let filename = view.filename.as_deref().unwrap_or(DEFAULT_FILENAME);
    if controller.retrieve_file(&sink).await.is_err() {
        eprintln!("Error: {}", controller.view().file_error.as_deref().unwrap_or(FILE_FETCH_FAILED));
        return Ok(ExitCode::FAILURE);
    }
    println!("Saved to {}", sink.target_path(filename).display());
    controller.dispose();
    Ok(ExitCode::SUCCESS)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let args = Args::parse();

    let mut config = config::load_or_create(&args.config)?;
    if let Some(ref base) = args.api_base {
        config.api_base_url = base.as_str().into();
    }
    if let Some(ref key) = args.api_key {
        config.api_key = Some(key.as_str().into());
    }
    let backend = HttpBackend::new(&config).context("Failed to set up the API client")?;
    info!("Using API at {}", config.api_base_url);
    let controller = JobController::new(backend, TokioRuntime, &config);

    LocalSet::new().run_until(run(args, controller)).await
}
