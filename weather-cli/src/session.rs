//! Interactive menu loop.
//!
//! The loop is a small state machine: [`Session::step`] handles one prompt
//! and tells the driver whether to keep going. Nothing in here exits the
//! process.

use std::io::Write;

use anyhow::Result;
use log::debug;
use thiserror::Error;
use weather_core::{CityName, ProviderReply, WeatherService, WeatherSource};

use crate::{prompt::Prompter, render};

const MENU: &str = "Hi! select an option:\n 1: Current Weather\n 2: Three day forecast\n 3: Exit program";
const OPTION_PROMPT: &str = "Option selected:";
const CITY_PROMPT: &str = "Enter City (or 'exit' to leave):";
const EXIT_TOKEN: &str = "exit";
const GOODBYE: &str = "Goodbye, exiting weather checker!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Current,
    Forecast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Run(Action),
    Exit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuInputError {
    #[error("Invalid input. Please enter a number (1, 2, or 3).")]
    NotANumber,

    #[error("Invalid input. Please enter a valid option.")]
    UnknownOption(u64),
}

pub fn parse_menu_choice(input: &str) -> Result<MenuChoice, MenuInputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(MenuInputError::NotANumber);
    }

    // All digits; only overflow can fail here, and that is never a valid option.
    let n: u64 = trimmed.parse().unwrap_or(u64::MAX);
    match n {
        1 => Ok(MenuChoice::Run(Action::Current)),
        2 => Ok(MenuChoice::Run(Action::Forecast)),
        3 => Ok(MenuChoice::Exit),
        other => Err(MenuInputError::UnknownOption(other)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Menu,
    City(Action),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Session<S, P, W> {
    service: WeatherService<S>,
    prompter: P,
    out: W,
    state: State,
}

impl<S, P, W> Session<S, P, W>
where
    S: WeatherSource,
    P: Prompter,
    W: Write,
{
    pub fn new(service: WeatherService<S>, prompter: P, out: W) -> Self {
        Self {
            service,
            prompter,
            out,
            state: State::Menu,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Runs steps until one of them asks to exit.
    pub async fn run(&mut self) -> Result<()> {
        while self.step().await? == Flow::Continue {
            debug!("session now in {:?}", self.state());
        }
        Ok(())
    }

    pub async fn step(&mut self) -> Result<Flow> {
        match self.state {
            State::Menu => self.menu_step(),
            State::City(action) => self.city_step(action).await,
        }
    }

    fn menu_step(&mut self) -> Result<Flow> {
        writeln!(self.out, "{MENU}")?;

        let Some(input) = self.prompter.ask(OPTION_PROMPT)? else {
            return self.goodbye();
        };

        match parse_menu_choice(&input) {
            Ok(MenuChoice::Run(action)) => self.state = State::City(action),
            Ok(MenuChoice::Exit) => return self.goodbye(),
            Err(err) => writeln!(self.out, "{err}")?,
        }

        Ok(Flow::Continue)
    }

    async fn city_step(&mut self, action: Action) -> Result<Flow> {
        let Some(input) = self.prompter.ask(CITY_PROMPT)? else {
            return self.goodbye();
        };

        if input.trim().eq_ignore_ascii_case(EXIT_TOKEN) {
            return self.goodbye();
        }

        // Invalid input keeps the state, so the next step prompts for the city again.
        let city = match CityName::parse(&input) {
            Ok(city) => city,
            Err(err) => {
                writeln!(self.out, "{err}")?;
                return Ok(Flow::Continue);
            }
        };

        debug!("{action:?} requested for {city}");

        match action {
            Action::Current => match self.service.current_rows(&city).await? {
                ProviderReply::Success(rows) => {
                    writeln!(self.out, "{}", render::current_table(&rows))?
                }
                ProviderReply::Failure(message) => {
                    writeln!(self.out, "{}", render::error_line(&message))?
                }
            },
            Action::Forecast => match self.service.forecast_rows(&city).await? {
                ProviderReply::Success(rows) => {
                    writeln!(self.out, "{}", render::forecast_table(&rows))?
                }
                ProviderReply::Failure(message) => {
                    writeln!(self.out, "{}", render::error_line(&message))?
                }
            },
        }

        self.state = State::Menu;
        Ok(Flow::Continue)
    }

    fn goodbye(&mut self) -> Result<Flow> {
        writeln!(self.out, "{GOODBYE}")?;
        Ok(Flow::Exit)
    }
}
