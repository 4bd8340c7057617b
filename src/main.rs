mod app_runtime;
mod bookmark_store;
mod boot;
mod config;
mod controls;
mod dice_widget;
mod dom;
mod flipbook;
mod input;
mod nav_menu;
mod notify;
mod service_worker;

use std::error::Error;

use crate::config::{FlipbookOptions, DICE_CONTAINER_ID, SERVICE_WORKER_PATH};
use crate::controls::ControlBar;
use crate::dom::{document, js_err};
use crate::flipbook::Flipbook;

fn run() -> Result<(), Box<dyn Error>> {
    boot::set_phase("flipbook");
    let flipbook = Flipbook::mount(&FlipbookOptions::default())?;
    let document = document().map_err(js_err)?;
    let controls = ControlBar::mount(&document, &flipbook).map_err(js_err)?;
    app_runtime::install(flipbook, controls);
    if let Err(err) = app_runtime::expose_page_jump() {
        gloo::console::warn!("page jump unavailable", js_err(err));
    }

    boot::set_phase("dice");
    if let Err(err) = dice_widget::mount_dice_widget(DICE_CONTAINER_ID) {
        gloo::console::error!("dice widget:", err.to_string());
    }

    service_worker::register(SERVICE_WORKER_PATH);
    Ok(())
}

fn main() {
    console_error_panic_hook::set_once();
    match run() {
        Ok(()) => boot::ready(),
        Err(err) => boot::fail(&err.to_string()),
    }
}
