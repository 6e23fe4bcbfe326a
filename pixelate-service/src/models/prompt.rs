use std::fmt;
use std::str::FromStr;

const STICKER_PROMPT: &str = "Make the image into a chibi sticker set. And convert it into a pixel art style, making sure each grid is clearly visible so I can use it for bead sprites. Try to use as few grids as possible while fully preserving the original design.";

const PIXELATE_PROMPT: &str = "Convert this image into pixel art with clearly visible square pixels and a limited color palette, keeping the original composition.";

const BEAD_PATTERN_PROMPT: &str = "Convert this image into a fuse-bead pattern on a grid of exactly 52 by 52 cells. \
Every cell must be a single flat square of one solid color with no gradients, anti-aliasing, dithering or texture. \
Draw thin, evenly spaced grid lines between all cells so each bead position is countable. \
Use a palette of at most 24 distinct colors, chosen to match common bead colors. \
Keep the subject centered, preserve its silhouette and key features, simplify fine details to fit the grid, \
and fill the background with a single plain light color. Do not add text, borders, shadows or perspective.";

/// Named prompt wordings a deployment can choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptPreset {
    #[default]
    Sticker,
    Pixelate,
    BeadPattern,
}

impl PromptPreset {
    pub fn text(self) -> &'static str {
        match self {
            PromptPreset::Sticker => STICKER_PROMPT,
            PromptPreset::Pixelate => PIXELATE_PROMPT,
            PromptPreset::BeadPattern => BEAD_PATTERN_PROMPT,
        }
    }
}

impl FromStr for PromptPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sticker" => Ok(PromptPreset::Sticker),
            "pixelate" => Ok(PromptPreset::Pixelate),
            "bead-pattern" | "bead_pattern" => Ok(PromptPreset::BeadPattern),
            other => Err(format!(
                "unknown prompt preset '{}' (expected sticker, pixelate or bead-pattern)",
                other
            )),
        }
    }
}

/// The fixed instruction sent with every upload. Chosen once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPrompt(String);

impl ConversionPrompt {
    pub fn preset(preset: PromptPreset) -> Self {
        Self(preset.text().to_string())
    }

    pub fn custom(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConversionPrompt {
    fn default() -> Self {
        Self::preset(PromptPreset::default())
    }
}

impl fmt::Display for ConversionPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_preset_names() {
        assert_eq!("sticker".parse::<PromptPreset>(), Ok(PromptPreset::Sticker));
        assert_eq!(" Pixelate ".parse::<PromptPreset>(), Ok(PromptPreset::Pixelate));
        assert_eq!("bead-pattern".parse::<PromptPreset>(), Ok(PromptPreset::BeadPattern));
        assert_eq!("BEAD_PATTERN".parse::<PromptPreset>(), Ok(PromptPreset::BeadPattern));
        assert!("watercolor".parse::<PromptPreset>().is_err());
    }

    #[test]
    fn default_prompt_is_sticker_wording() {
        assert!(ConversionPrompt::default().as_str().starts_with("Make the image into a chibi"));
    }

    #[test]
    fn bead_pattern_mentions_grid_size() {
        assert!(PromptPreset::BeadPattern.text().contains("52 by 52"));
    }
}
