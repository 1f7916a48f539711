/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Main executable for mie-rs

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    mie_rs::cli::run()
}
