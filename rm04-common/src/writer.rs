// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Write orchestration: resolve the image and part, then run the programmer.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::FlashConfig;
use crate::error::FlashError;
use crate::image::{resolve_image, validate_image, Selector};
use crate::programmer::{detect_part, ProgrammerClient};

/// Fully resolved arguments for one programmer write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub image: PathBuf,
    pub part: String,
}

/// Drives a single image write through a [`ProgrammerClient`].
pub struct FlashWriter<'a, C: ?Sized, S: ?Sized> {
    config: &'a FlashConfig,
    client: &'a mut C,
    selector: &'a mut S,
}

impl<'a, C, S> FlashWriter<'a, C, S>
where
    C: ProgrammerClient + ?Sized,
    S: Selector + ?Sized,
{
    pub fn new(config: &'a FlashConfig, client: &'a mut C, selector: &'a mut S) -> Self {
        Self {
            config,
            client,
            selector,
        }
    }

    /// Turn optional user input into a concrete image path and part name.
    ///
    /// Empty values count as absent. The image is validated even when it came
    /// from the directory scan.
    pub fn resolve<W: Write>(
        &mut self,
        image: Option<&Path>,
        part: Option<&str>,
        out: &mut W,
    ) -> Result<Invocation, FlashError> {
        let image = match image.filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => path.to_path_buf(),
            None => resolve_image(self.config, &mut *self.selector, out)?
                .ok_or(FlashError::ImageNotSelected)?,
        };

        let size = validate_image(&image, self.config.image_size)?;
        log::debug!("using image {} ({} bytes)", image.display(), size);

        let part = match part.map(str::trim).filter(|p| !p.is_empty()) {
            Some(name) => name.to_string(),
            None => {
                let identity = detect_part(&mut *self.client)?;
                log::info!("detected flash 0x{:x} ({})", identity.id, identity.name);
                identity.name.to_string()
            }
        };

        Ok(Invocation { image, part })
    }

    /// Resolve, announce and write the image. The programmer is run once.
    pub fn write<W: Write>(
        &mut self,
        image: Option<&Path>,
        part: Option<&str>,
        out: &mut W,
    ) -> Result<Invocation, FlashError> {
        let invocation = self.resolve(image, part, out)?;

        writeln!(out)?;
        writeln!(out, "Writing image file to flash:")?;
        writeln!(out, "   Flash device name: {}", invocation.part)?;
        writeln!(out, "   Image file name:   {}", invocation.image.display())?;
        writeln!(out)?;
        out.flush()?;

        self.client.write_image(&invocation.part, &invocation.image)?;
        log::info!("flash write complete");
        Ok(invocation)
    }
}
