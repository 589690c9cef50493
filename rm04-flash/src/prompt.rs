// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Interactive image choice and Ctrl+C handling.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;

use rm04_common::image::parse_choice;
use rm04_common::{FlashError, Selector};

use crate::report;

static PROMPT_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Install the process Ctrl+C handler.
///
/// While the image menu is waiting for input an interrupt is a quit, reported
/// the same way as choosing `q`. At any other time the handler does nothing
/// and the running programmer receives the signal itself.
pub fn install_interrupt_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        if PROMPT_ACTIVE.load(Ordering::SeqCst) {
            println!();
            report::exit_with(&FlashError::ImageNotSelected);
        }
        log::debug!("interrupt outside prompt ignored");
    })?;
    Ok(())
}

/// Raises `flag` while alive and restores its previous value on drop.
struct PromptGuard {
    flag: &'static AtomicBool,
    previous: bool,
}

impl PromptGuard {
    fn activate(flag: &'static AtomicBool) -> Self {
        let previous = flag.swap(true, Ordering::SeqCst);
        PromptGuard { flag, previous }
    }
}

impl Drop for PromptGuard {
    fn drop(&mut self) {
        self.flag.store(self.previous, Ordering::SeqCst);
    }
}

/// Reads the menu choice as one line of text.
pub struct TerminalSelector<R, W> {
    input: R,
    output: W,
}

impl TerminalSelector<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Selector for TerminalSelector<R, W> {
    fn select(&mut self, count: usize) -> Option<usize> {
        let _guard = PromptGuard::activate(&PROMPT_ACTIVE);

        write!(self.output, "choice: ").ok()?;
        self.output.flush().ok()?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => parse_choice(&line, count),
            Err(e) => {
                log::debug!("failed to read choice: {}", e);
                None
            }
        }
    }
}
