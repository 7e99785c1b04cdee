use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use lm_core::config::{AppConfig, OutputMode};
use lm_core::frame::{CharGrid, PixelImage};
use lm_core::traits::GlyphRasterizer;
use lm_match::matcher::BrightnessMatcher;
use lm_render::html::HtmlWriter;
use lm_render::renderer::render_with;
use lm_render::writer::{ArtWriter, ConsoleWriter};

use crate::command::{self, Command, CommandError};

const PROMPT: &str = ">>> ";

/// The interactive session: a live matcher, the loaded image, and the
/// current resolution/writer state.
///
/// The last rendered grid is cached and reused by `asciiart` until the
/// resolution, the charset, or the rounding policy changes.
pub struct Shell {
    matcher: BrightnessMatcher<Box<dyn GlyphRasterizer>>,
    image: PixelImage,
    resolution: u32,
    writer: Box<dyn ArtWriter>,
    config: AppConfig,
    cached: Option<CharGrid>,
}

impl Shell {
    /// Build a session from a loaded image and validated configuration.
    pub fn new(image: PixelImage, config: AppConfig, rasterizer: Box<dyn GlyphRasterizer>) -> Self {
        let charset: Vec<char> = config.charset.chars().collect();
        let matcher = BrightnessMatcher::new(&charset, rasterizer);
        let writer = writer_for(config.output, &config);
        Self {
            matcher,
            image,
            resolution: config.resolution,
            writer,
            config,
            cached: None,
        }
    }

    /// Prompt/execute loop. Returns on `exit` or end of input; command
    /// failures are printed and the loop keeps going.
    ///
    /// # Errors
    /// Returns an error only when the terminal itself fails.
    pub fn run(&mut self) -> Result<()> {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            print!("{PROMPT}");
            std::io::stdout().flush().context("cannot flush stdout")?;

            line.clear();
            let read = stdin
                .lock()
                .read_line(&mut line)
                .context("cannot read stdin")?;
            if read == 0 {
                break; // EOF
            }

            match command::parse(&line) {
                Ok(Command::Exit) => break,
                Ok(cmd) => {
                    if let Err(err) = self.execute(cmd) {
                        println!("{err}");
                    }
                }
                Err(err) => println!("{err}"),
            }
        }
        Ok(())
    }

    fn execute(&mut self, cmd: Command) -> Result<()> {
        match cmd {
            Command::Exit => {}
            Command::Chars => self.print_chars(),
            Command::Add(selection) => {
                let mut changed = false;
                for ch in selection.chars() {
                    changed |= self.matcher.add_char(ch);
                }
                if changed {
                    self.cached = None;
                }
            }
            Command::Remove(selection) => {
                let mut changed = false;
                for ch in selection.chars() {
                    changed |= self.matcher.remove_char(ch);
                }
                if changed {
                    self.cached = None;
                }
            }
            Command::ResUp => {
                let doubled = self.resolution.saturating_mul(2);
                if doubled > self.max_resolution() {
                    return Err(CommandError::ResolutionBounds.into());
                }
                self.set_resolution(doubled);
            }
            Command::ResDown => {
                let halved = self.resolution / 2;
                if halved < self.min_resolution() {
                    return Err(CommandError::ResolutionBounds.into());
                }
                self.set_resolution(halved);
            }
            Command::Round(rounding) => {
                if self.matcher.rounding() != rounding {
                    self.matcher.set_rounding(rounding);
                    self.cached = None;
                }
            }
            Command::Output(mode) => {
                self.writer = writer_for(mode, &self.config);
            }
            Command::Render => {
                if self.matcher.len() < 2 {
                    return Err(CommandError::CharsetTooSmall.into());
                }
                if self.cached.is_none() {
                    let grid = render_with(&self.matcher, &self.image, self.resolution)?;
                    self.cached = Some(grid);
                }
                if let Some(grid) = &self.cached {
                    self.writer.write(grid)?;
                }
            }
        }
        Ok(())
    }

    fn print_chars(&self) {
        let listed: Vec<String> = self
            .matcher
            .chars()
            .into_iter()
            .map(|ch| ch.to_string())
            .collect();
        println!("{}", listed.join(" "));
    }

    /// Widest usable grid: one character column per pixel column.
    fn max_resolution(&self) -> u32 {
        self.image.width
    }

    /// Narrowest usable grid: keeps at least one full tile row.
    fn min_resolution(&self) -> u32 {
        (self.image.width / self.image.height.max(1)).max(1)
    }

    fn set_resolution(&mut self, resolution: u32) {
        self.resolution = resolution;
        self.cached = None;
        println!("Resolution set to {resolution}");
    }
}

fn writer_for(mode: OutputMode, config: &AppConfig) -> Box<dyn ArtWriter> {
    match mode {
        OutputMode::Console => Box::new(ConsoleWriter),
        OutputMode::Html => Box::new(HtmlWriter::new(
            config.html_path.clone(),
            &config.html_font,
        )),
    }
}

#[cfg(test)]
mod tests {
    use lm_core::glyph::GlyphBitmap;
    use lm_match::rounding::Rounding;

    use super::*;

    /// Brightness follows the code point, folded into [0, 32] ink cells.
    struct RampRasterizer;

    impl GlyphRasterizer for RampRasterizer {
        fn rasterize(&self, ch: char) -> GlyphBitmap {
            let mut bm = GlyphBitmap::new(32, 1);
            for x in 0..(ch as usize % 33) {
                bm.set(x, 0, true);
            }
            bm
        }
    }

    fn shell(width: u32, height: u32) -> Shell {
        let config = AppConfig::default();
        Shell::new(
            PixelImage::blank(width, height),
            config,
            Box::new(RampRasterizer),
        )
    }

    fn execute(sh: &mut Shell, line: &str) -> Result<()> {
        sh.execute(command::parse(line).map_err(anyhow::Error::from)?)
    }

    #[test]
    fn add_and_remove_mutate_the_charset() {
        let mut sh = shell(16, 16);
        execute(&mut sh, "add a-c").unwrap();
        assert!(sh.matcher.contains('a'));
        assert!(sh.matcher.contains('c'));

        execute(&mut sh, "remove a").unwrap();
        assert!(!sh.matcher.contains('a'));
    }

    #[test]
    fn res_up_doubles_until_the_image_width() {
        let mut sh = shell(8, 8);
        assert_eq!(sh.resolution, 2);
        execute(&mut sh, "res up").unwrap();
        execute(&mut sh, "res up").unwrap();
        assert_eq!(sh.resolution, 8);
        // 16 columns would exceed the 8-pixel width
        assert!(execute(&mut sh, "res up").is_err());
        assert_eq!(sh.resolution, 8);
    }

    #[test]
    fn res_down_stops_at_the_aspect_floor() {
        let mut sh = shell(16, 8);
        // floor is width/height = 2
        execute(&mut sh, "res up").unwrap();
        execute(&mut sh, "res down").unwrap();
        assert_eq!(sh.resolution, 2);
        assert!(execute(&mut sh, "res down").is_err());
        assert_eq!(sh.resolution, 2);
    }

    #[test]
    fn render_requires_two_characters() {
        let mut sh = shell(8, 8);
        execute(&mut sh, "remove all").unwrap();
        execute(&mut sh, "add 0").unwrap();
        let err = execute(&mut sh, "asciiart").unwrap_err();
        assert_eq!(err.to_string(), CommandError::CharsetTooSmall.to_string());
    }

    #[test]
    fn render_fills_the_cache_and_mutations_drop_it() {
        let mut sh = shell(8, 8);
        execute(&mut sh, "asciiart").unwrap();
        assert!(sh.cached.is_some());

        execute(&mut sh, "add x").unwrap();
        assert!(sh.cached.is_none());

        execute(&mut sh, "asciiart").unwrap();
        assert!(sh.cached.is_some());
        execute(&mut sh, "round up").unwrap();
        assert!(sh.cached.is_none());
    }

    #[test]
    fn repeated_add_keeps_the_cache() {
        let mut sh = shell(8, 8);
        execute(&mut sh, "asciiart").unwrap();
        execute(&mut sh, "add 0").unwrap(); // already in the default charset
        assert!(sh.cached.is_some());
    }

    #[test]
    fn round_command_switches_the_policy() {
        let mut sh = shell(8, 8);
        execute(&mut sh, "round up").unwrap();
        assert_eq!(sh.matcher.rounding(), Rounding::Up);
        execute(&mut sh, "round abs").unwrap();
        assert_eq!(sh.matcher.rounding(), Rounding::Closest);
    }
}
