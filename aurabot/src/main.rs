mod commands;
mod config;
mod handlers;
mod storages;
mod totals;

use std::{path::PathBuf, sync::Arc};

use auracore::text::Segmenter;
use clap::Parser;
use config::{Args, DEFAULT_EVENTS_DIR};
use handlers::handle_text_message;
use storages::{AuraEventStorage, AuraEventStorageTrait, PersistentAuraEventStorage};
use teloxide::prelude::*;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    pretty_env_logger::init();
    log::info!("Starting aura score bot...");

    let token = match args.get_token() {
        Ok(token) => token,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let bot = Bot::new(token);

    let presets = match args.load_presets() {
        Ok(presets) => presets,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    log::info!("Loaded {} emoji presets", presets.len());
    let presets = Arc::new(presets);

    // Grapheme segmentation strategy is picked once for the whole process
    let segmenter = Segmenter::detect();
    log::info!("Using {:?} grapheme segmentation", segmenter);

    // Initialize event storage based on CLI arguments
    let storage: Arc<dyn AuraEventStorageTrait> = if let Some(storage_path) = args.persistent_storage
    {
        let storage_dir = storage_path.unwrap_or_else(|| PathBuf::from(DEFAULT_EVENTS_DIR));
        log::info!(
            "Using persistent event storage in directory: {:?}",
            storage_dir
        );
        Arc::new(PersistentAuraEventStorage::new(storage_dir))
    } else {
        log::info!("Using in-memory event storage");
        Arc::new(AuraEventStorage::new())
    };

    // Route all text messages (including commands) to handle_text_message
    let handler = dptree::entry().branch(
        Update::filter_message().branch(
            dptree::filter(|msg: Message| msg.text().is_some()).endpoint(handle_text_message),
        ),
    );

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![storage, presets, segmenter])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
