#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod config;
mod content;
mod error;
mod i18n;
mod log;
mod menu;
mod modal;
mod reveal;
mod scroll;
mod theme;
mod timeline;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project renders in the browser. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
