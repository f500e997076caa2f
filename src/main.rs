mod apple;
mod game;
mod geometry;
mod menu;
mod snake;
mod state;
mod term;

use std::{fs::File, process::exit};

use anyhow::Result;
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::game::{Rules, SnakeGame};
use crate::term::{KeyReader, TermManager};

const WINDOW_HEIGHT: u16 = 20;
const WINDOW_WIDTH: u16 = WINDOW_HEIGHT * 2;
const LOG_FILE: &str = "snake.log";

fn main() {
    init_logging();

    // The terminal is already restored by the time `run` returns, so the
    // error lands on a normal screen.
    if let Err(err) = run() {
        error!("Fatal: {:#}", err);
        eprintln!("snake: {:#}", err);
        exit(1);
    }
}

fn run() -> Result<()> {
    let mut term = TermManager::open(WINDOW_HEIGHT, WINDOW_WIDTH)?;

    let rules = Rules { allow_reversal: true };
    let mut game = SnakeGame::new(&mut term, KeyReader, rand::thread_rng(), rules);
    game.run()?;
    drop(game);

    term.restore()
}

fn init_logging() {
    // stdout belongs to the game, so logs go to a file.
    match File::create(LOG_FILE) {
        Ok(file) => {
            if WriteLogger::init(LevelFilter::Info, Config::default(), file).is_ok() {
                info!("Starting snake");
            }
        }
        Err(err) => eprintln!("snake: logging disabled, cannot create {}: {}", LOG_FILE, err),
    }
}
