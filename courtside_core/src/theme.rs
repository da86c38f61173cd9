//! Visual and audio themes.
//!
//! Themes only carry presentation data: colours, sound cue names and the
//! end-of-match messages. Every theme drives the same simulation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::types::Side;

/// Colours as `#RRGGBB` strings, the way a canvas front end consumes them
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Palette {
    pub background: String,
    pub foreground: String,
    pub ball: String,
    pub net: String,
    pub player_paddle: String,
    pub opponent_paddle: String,
}

/// Sound asset names, one per audio cue
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SoundCues {
    pub paddle_hit: String,
    pub player_score: String,
    pub opponent_score: String,
    pub win: String,
    pub lose: String,
    pub music: String,
}

impl SoundCues {
    pub fn for_score(&self, scorer: Side) -> &str {
        match scorer {
            Side::Player => &self.player_score,
            Side::Opponent => &self.opponent_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Messages {
    pub win: String,
    pub lose: String,
    pub play_again: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Theme {
    pub name: String,
    pub palette: Palette,
    pub sounds: SoundCues,
    pub messages: Messages,
}

const BUILTIN_NAMES: [&str; 2] = ["dusk", "classic"];

impl Default for Theme {
    fn default() -> Self {
        Theme::dusk()
    }
}

impl Theme {
    /// Muted purples with platformer sound effects
    pub fn dusk() -> Self {
        Theme {
            name: "dusk".to_string(),
            palette: Palette {
                background: "#3B3B58".to_string(),
                foreground: "#CF9893".to_string(),
                ball: "#BC7C9C".to_string(),
                net: "#BC7C9C".to_string(),
                player_paddle: "#A96DA3".to_string(),
                opponent_paddle: "#7A5980".to_string(),
            },
            sounds: SoundCues {
                paddle_hit: "sounds/smb_bump.wav".to_string(),
                player_score: "sounds/smb_coin.wav".to_string(),
                opponent_score: "sounds/smb_breakblock.wav".to_string(),
                win: "sounds/smb_stage_clear.wav".to_string(),
                lose: "sounds/smb_gameover.wav".to_string(),
                music: "sounds/01-main-theme-overworld.mp3".to_string(),
            },
            messages: Messages {
                win: "awesome job!".to_string(),
                lose: "ha ha ha ha ha ha haboo boo boo boo boo hoohoohoohoohoohoo".to_string(),
                play_again: "play again".to_string(),
            },
        }
    }

    /// Black and white
    pub fn classic() -> Self {
        Theme {
            name: "classic".to_string(),
            palette: Palette {
                background: "#000000".to_string(),
                foreground: "#FFFFFF".to_string(),
                ball: "#FFFFFF".to_string(),
                net: "#FFFFFF".to_string(),
                player_paddle: "#FFFFFF".to_string(),
                opponent_paddle: "#FFFFFF".to_string(),
            },
            sounds: SoundCues {
                paddle_hit: "sounds/pong.mp3".to_string(),
                player_score: "sounds/score.mp3".to_string(),
                opponent_score: "sounds/computer-score.mp3".to_string(),
                win: "sounds/win.mp3".to_string(),
                lose: "sounds/lose.mp3".to_string(),
                music: "sounds/music.mp3".to_string(),
            },
            messages: Messages {
                win: "nice rally".to_string(),
                lose: "better luck next time".to_string(),
                play_again: "click to play again".to_string(),
            },
        }
    }

    pub fn builtin_names() -> &'static [&'static str] {
        &BUILTIN_NAMES
    }

    /// Look up a built-in theme by name (case-insensitive)
    pub fn by_name(name: &str) -> Result<Theme> {
        match name.to_ascii_lowercase().as_str() {
            "dusk" => Ok(Theme::dusk()),
            "classic" => Ok(Theme::classic()),
            _ => Err(SimError::UnknownTheme {
                name: name.to_string(),
            }),
        }
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Theme> {
        Ok(serde_json::from_str(json)?)
    }

    /// First line of the end-of-match screen
    pub fn headline(&self, winner: Side) -> &'static str {
        match winner {
            Side::Player => "Player Won!",
            Side::Opponent => "Computer Won...",
        }
    }

    /// Second line of the end-of-match screen
    pub fn message(&self, winner: Side) -> &str {
        match winner {
            Side::Player => &self.messages.win,
            Side::Opponent => &self.messages.lose,
        }
    }
}

/// Parse `#RRGGBB` into its channels. Anything else gives `None`.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_resolve_by_name() {
        for name in Theme::builtin_names() {
            let theme = Theme::by_name(name).unwrap();
            assert_eq!(theme.name, *name);
        }
        assert_eq!(Theme::by_name("DUSK").unwrap(), Theme::dusk());
        assert!(matches!(
            Theme::by_name("neon"),
            Err(SimError::UnknownTheme { .. })
        ));
    }

    #[test]
    fn test_builtin_palettes_parse() {
        for name in Theme::builtin_names() {
            let palette = Theme::by_name(name).unwrap().palette;
            for colour in [
                &palette.background,
                &palette.foreground,
                &palette.ball,
                &palette.net,
                &palette.player_paddle,
                &palette.opponent_paddle,
            ] {
                assert!(parse_hex_color(colour).is_some(), "{name}: {colour}");
            }
        }
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#3B3B58"), Some((0x3B, 0x3B, 0x58)));
        assert_eq!(parse_hex_color("#ffffff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("#bc7c9ce"), None);
        assert_eq!(parse_hex_color("3B3B58"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
    }

    #[test]
    fn test_end_of_match_text() {
        let theme = Theme::dusk();
        assert_eq!(theme.headline(Side::Player), "Player Won!");
        assert_eq!(theme.message(Side::Player), "awesome job!");
        assert_eq!(theme.headline(Side::Opponent), "Computer Won...");
        assert_eq!(theme.sounds.for_score(Side::Opponent), "sounds/smb_breakblock.wav");
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_theme_json() {
        let json = serde_json::to_string(&Theme::classic()).unwrap();
        assert_eq!(Theme::from_json(&json).unwrap(), Theme::classic());
        assert!(Theme::from_json("{}").is_err());
    }
}
